mod config;
mod driver;
mod font;
mod graphics;
mod grid;
mod life;
mod overlay;
mod render;
mod surface;

use std::path::PathBuf;
use std::time::Instant;
use winit::{
    dpi::LogicalSize,
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

use crate::config::BackgroundConfig;
use crate::driver::{AnimationDriver, DriverSettings};
use crate::font::FontRenderer;
use crate::graphics::GraphicsRenderer;
use crate::overlay::Splash;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = BackgroundConfig::load_or_default(config_path.as_deref())?;
    match &config_path {
        Some(path) => log::info!("Loaded config from {}", path.display()),
        None => log::info!("Using default config"),
    }
    let settings = DriverSettings::from_config(&config)?;

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(config.title.as_str())
        .with_inner_size(LogicalSize::new(config.window_width, config.window_height))
        .with_resizable(true)
        .build(&event_loop)?;

    let splash = config.show_overlay.then(|| {
        let font = config.font_path.as_ref().and_then(|path| match FontRenderer::load(path) {
            Ok(font) => Some(font),
            Err(err) => {
                log::warn!("Falling back to bitmap label: {}", err);
                None
            }
        });
        Splash::new(font, &settings.palette)
    });

    let mut graphics = GraphicsRenderer::new(&window, splash)?;
    let mut driver = AnimationDriver::new(settings);

    let (width, height) = graphics.logical_size();
    driver.mount(width, height);
    let mounted_at = Instant::now();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    driver.unmount();
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(size) => {
                    graphics.resize(size.width, size.height);
                    let (width, height) = graphics.logical_size();
                    driver.resize(width, height);
                }
                WindowEvent::ScaleFactorChanged {
                    scale_factor,
                    new_inner_size,
                } => {
                    graphics.set_scale_factor(scale_factor);
                    graphics.resize(new_inner_size.width, new_inner_size.height);
                    let (width, height) = graphics.logical_size();
                    driver.resize(width, height);
                }
                _ => {}
            },
            Event::MainEventsCleared => {
                if !driver.is_stopped() {
                    window.request_redraw();
                }
            }
            Event::RedrawRequested(_) => {
                if let Err(err) = graphics.render_frame(&mut driver, mounted_at.elapsed()) {
                    log::error!("Render error: {}", err);
                    driver.unmount();
                    *control_flow = ControlFlow::Exit;
                }
            }
            Event::LoopDestroyed => {
                if !driver.is_stopped() {
                    driver.unmount();
                }
            }
            _ => {}
        }
    });
}
