use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use crate::config::{BackgroundConfig, ConfigError, Palette};
use crate::grid::{shape_for_viewport, Grid};
use crate::life::Life;
use crate::render::render_grid;
use crate::surface::DrawSurface;

/// Lifecycle of the background animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Idle,      // Not mounted yet
    Scheduled, // Waiting for the next frame callback
    Running,   // Inside a frame callback
    Stopped,   // Unmounted, terminal
}

/// What a frame callback did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Updated, // Stepped and rendered
    Skipped, // Interval not elapsed or no surface
    Ignored, // Not scheduled (idle or stopped)
}

/// Fixed parameters of the automaton
#[derive(Debug, Clone, Copy)]
pub struct DriverSettings {
    pub cell_size: u32,
    pub update_interval: Duration,
    pub seed_density: f64,
    pub palette: Palette,
}

impl DriverSettings {
    pub fn from_config(config: &BackgroundConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            cell_size: config.cell_size.max(1),
            update_interval: config.update_interval(),
            seed_density: config.seed_density,
            palette: config.palette()?,
        })
    }
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self {
            cell_size: 8,
            update_interval: Duration::from_millis(10),
            seed_density: 0.3,
            palette: Palette::default(),
        }
    }
}

/// Owns the automaton and gates updates on elapsed frame time
pub struct AnimationDriver<R: Rng = StdRng> {
    settings: DriverSettings,
    life: Option<Life>,
    last_update: Duration,
    state: DriverState,
    rng: R,
}

impl AnimationDriver<StdRng> {
    pub fn new(settings: DriverSettings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }
}

impl<R: Rng> AnimationDriver<R> {
    pub fn with_rng(settings: DriverSettings, rng: R) -> Self {
        Self {
            settings,
            life: None,
            last_update: Duration::ZERO,
            state: DriverState::Idle,
            rng,
        }
    }

    /// Seeds the grid for a viewport given in logical pixels and schedules
    /// the first frame
    pub fn mount(&mut self, width: u32, height: u32) {
        if self.state != DriverState::Idle {
            return;
        }
        let (rows, cols) = shape_for_viewport(width, height, self.settings.cell_size);
        let grid = Grid::seeded(rows, cols, self.settings.seed_density, &mut self.rng);
        log::info!(
            "Mounted background: {}x{} px -> {} rows x {} cols, {} live",
            width,
            height,
            rows,
            cols,
            grid.population()
        );
        self.life = Some(Life::new(grid));
        self.state = DriverState::Scheduled;
    }

    /// Frame callback. `now` is the time since mount and must not go backwards.
    pub fn on_frame(
        &mut self,
        now: Duration,
        surface: Option<&mut dyn DrawSurface>,
    ) -> FrameOutcome {
        if self.state != DriverState::Scheduled {
            return FrameOutcome::Ignored;
        }
        self.state = DriverState::Running;

        let due = now.saturating_sub(self.last_update) > self.settings.update_interval;
        let outcome = match (self.life.as_mut(), surface) {
            (Some(life), Some(surface)) if due => {
                life.step();
                render_grid(surface, life.grid(), &self.settings.palette);
                self.last_update = now;
                log::trace!(
                    "Generation {}: {} live",
                    life.generation(),
                    life.grid().population()
                );
                FrameOutcome::Updated
            }
            _ => FrameOutcome::Skipped,
        };

        self.state = DriverState::Scheduled;
        outcome
    }

    /// Reallocates the grid for a new logical viewport, keeping the overlap
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.state == DriverState::Stopped {
            return;
        }
        let Some(life) = self.life.as_mut() else {
            return;
        };

        let (rows, cols) = shape_for_viewport(width, height, self.settings.cell_size);
        let old_shape = life.grid().shape();
        if old_shape == (rows, cols) {
            return;
        }

        let density = self.settings.seed_density;
        let grid = Grid::resized_from(life.grid(), rows, cols, density, &mut self.rng);
        log::debug!(
            "Resized grid {:?} -> {:?}, kept {}x{}",
            old_shape,
            (rows, cols),
            old_shape.0.min(rows),
            old_shape.1.min(cols)
        );
        life.replace_grid(grid);
    }

    /// Tears down the grid. No further frames or resizes have any effect.
    pub fn unmount(&mut self) {
        if let Some(life) = self.life.take() {
            log::info!("Unmounted background after {} generations", life.generation());
        }
        self.state = DriverState::Stopped;
    }

    #[cfg(test)]
    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_stopped(&self) -> bool {
        self.state == DriverState::Stopped
    }

    #[cfg(test)]
    pub fn grid(&self) -> Option<&Grid> {
        self.life.as_ref().map(Life::grid)
    }

    #[cfg(test)]
    pub fn generation(&self) -> u64 {
        self.life.as_ref().map_or(0, Life::generation)
    }

    pub fn settings(&self) -> &DriverSettings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    fn driver() -> AnimationDriver<StdRng> {
        AnimationDriver::with_rng(DriverSettings::default(), StdRng::seed_from_u64(11))
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_mount_schedules_and_sizes_grid() {
        let mut driver = driver();
        assert_eq!(driver.state(), DriverState::Idle);
        driver.mount(801, 600);
        assert_eq!(driver.state(), DriverState::Scheduled);
        assert_eq!(driver.grid().unwrap().shape(), (75, 101));
    }

    #[test]
    fn test_frames_before_mount_are_ignored() {
        let mut driver = driver();
        let mut surface = RecordingSurface::default();
        assert_eq!(driver.on_frame(ms(100), Some(&mut surface)), FrameOutcome::Ignored);
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn test_update_gated_on_interval() {
        let mut driver = driver();
        driver.mount(80, 80);
        let mut surface = RecordingSurface::default();

        // Exactly the interval is not enough.
        assert_eq!(driver.on_frame(ms(10), Some(&mut surface)), FrameOutcome::Skipped);
        assert_eq!(driver.on_frame(ms(11), Some(&mut surface)), FrameOutcome::Updated);
        assert_eq!(driver.generation(), 1);
        assert_eq!(driver.on_frame(ms(15), Some(&mut surface)), FrameOutcome::Skipped);
        assert_eq!(driver.on_frame(ms(21), Some(&mut surface)), FrameOutcome::Skipped);
        assert_eq!(driver.on_frame(ms(22), Some(&mut surface)), FrameOutcome::Updated);
        assert_eq!(driver.generation(), 2);
        assert_eq!(driver.state(), DriverState::Scheduled);
    }

    #[test]
    fn test_missing_surface_skips_frame() {
        let mut driver = driver();
        driver.mount(80, 80);
        assert_eq!(driver.on_frame(ms(50), None), FrameOutcome::Skipped);
        assert_eq!(driver.generation(), 0);
        assert_eq!(driver.state(), DriverState::Scheduled);
    }

    #[test]
    fn test_render_follows_step() {
        let mut driver = driver();
        driver.mount(80, 80);
        let mut surface = RecordingSurface::default();
        driver.on_frame(ms(20), Some(&mut surface));

        let grid = driver.grid().unwrap();
        assert_eq!(surface.calls[0], (0, 0, 10, 10, Palette::default().background));
        assert_eq!(surface.calls.len(), 1 + grid.population());
    }

    #[test]
    fn test_resize_keeps_overlap() {
        let mut driver = driver();
        driver.mount(40, 40);
        let before = driver.grid().unwrap().clone();

        driver.resize(80, 64);
        let after = driver.grid().unwrap();
        assert_eq!(after.shape(), (8, 10));
        for row in 0..5 {
            for col in 0..5 {
                assert_eq!(after.is_alive(row, col), before.is_alive(row, col));
            }
        }

        let mut surface = RecordingSurface::default();
        assert_eq!(driver.on_frame(ms(20), Some(&mut surface)), FrameOutcome::Updated);
        assert_eq!(surface.calls[0], (0, 0, 10, 8, Palette::default().background));
    }

    #[test]
    fn test_nothing_runs_after_unmount() {
        let mut driver = driver();
        driver.mount(80, 80);
        let mut surface = RecordingSurface::default();
        driver.on_frame(ms(20), Some(&mut surface));
        driver.unmount();
        assert!(driver.is_stopped());
        assert!(driver.grid().is_none());

        let mut after = RecordingSurface::default();
        for t in 1..20 {
            assert_eq!(driver.on_frame(ms(100 * t), Some(&mut after)), FrameOutcome::Ignored);
        }
        driver.resize(160, 160);
        driver.mount(80, 80);
        assert!(after.calls.is_empty());
        assert!(driver.grid().is_none());
        assert_eq!(driver.state(), DriverState::Stopped);
    }
}
