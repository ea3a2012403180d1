use pixels::{Pixels, SurfaceTexture};
use rand::Rng;
use std::fmt::Display;
use std::time::Duration;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::window::Window;

use crate::driver::{AnimationDriver, FrameOutcome};
use crate::overlay::Splash;
use crate::surface::PixelSurface;

/// Logical viewport for a physical window size, the unit cells are counted in.
pub fn logical_viewport(size: PhysicalSize<u32>, scale_factor: f64) -> (u32, u32) {
    let logical: LogicalSize<u32> = size.to_logical(scale_factor);
    (logical.width, logical.height)
}

/// Size to keep after a buffer resize: the requested one only if it took.
fn committed_size<E: Display>(
    current: (u32, u32),
    requested: (u32, u32),
    outcome: Result<(), E>,
) -> (u32, u32) {
    match outcome {
        Ok(()) => requested,
        Err(err) => {
            log::error!("Failed to resize buffer: {}", err);
            current
        }
    }
}

/// Window framebuffer the background and splash are painted into.
/// The buffer matches the physical window size.
pub struct GraphicsRenderer {
    pixels: Pixels,
    width: u32,
    height: u32,
    scale_factor: f64,
    splash: Option<Splash>,
}

impl GraphicsRenderer {
    pub fn new(window: &Window, splash: Option<Splash>) -> Result<Self, pixels::Error> {
        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, window);
        let pixels = Pixels::new(size.width, size.height, surface_texture)?;

        Ok(Self {
            pixels,
            width: size.width,
            height: size.height,
            scale_factor: window.scale_factor(),
            splash,
        })
    }

    /// Current viewport in logical pixels
    pub fn logical_size(&self) -> (u32, u32) {
        logical_viewport(PhysicalSize::new(self.width, self.height), self.scale_factor)
    }

    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.scale_factor = scale_factor;
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        // Minimised windows report 0x0, which pixels refuses.
        if width == 0 || height == 0 {
            return;
        }

        if let Err(err) = self.pixels.resize_surface(width, height) {
            log::error!("Failed to resize surface: {}", err);
        }
        let outcome = self.pixels.resize_buffer(width, height);
        let current = (self.width, self.height);
        (self.width, self.height) = committed_size(current, (width, height), outcome);
    }

    /// Hands the framebuffer to the driver for one frame callback and
    /// presents it when a new generation was drawn.
    pub fn render_frame<R: Rng>(
        &mut self,
        driver: &mut AnimationDriver<R>,
        now: Duration,
    ) -> Result<FrameOutcome, pixels::Error> {
        let cell_pixels = driver.settings().cell_size as f64 * self.scale_factor;
        let frame = self.pixels.frame_mut();
        let outcome = match PixelSurface::new(frame, self.width, self.height, cell_pixels) {
            Some(mut surface) => {
                let outcome = driver.on_frame(now, Some(&mut surface));
                if outcome == FrameOutcome::Updated {
                    if let Some(splash) = &self.splash {
                        splash.draw(&mut surface, self.scale_factor as f32);
                    }
                }
                outcome
            }
            None => driver.on_frame(now, None),
        };

        if outcome == FrameOutcome::Updated {
            self.pixels.render()?;
        }
        Ok(outcome)
    }
}
