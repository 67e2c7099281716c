//! Scene configuration.
//!
//! [`SceneConfig`] collects everything the viewer needs before it opens a
//! window. Values are set with `with_*` builder methods and checked once by
//! [`SceneConfig::validate`].
//!
//! ```
//! use embers::SceneConfig;
//!
//! let config = SceneConfig::new()
//!     .with_particle_count(5_000)
//!     .with_window_size(1024, 768);
//! assert!(config.validate().is_ok());
//! ```

use std::path::PathBuf;

use crate::error::AppError;
use crate::time::FIXED_STEP;

/// Spherical camera placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraOrbit {
    /// Distance from the origin.
    pub radius: f32,
    /// Polar angle from +Y, radians.
    pub theta: f32,
    /// Azimuth around +Y from +X, radians.
    pub phi: f32,
}

impl CameraOrbit {
    /// Smallest radius the viewer zooms to.
    pub const MIN_RADIUS: f32 = 2.0;
    /// Largest radius the viewer zooms to.
    pub const MAX_RADIUS: f32 = 40.0;

    /// Apply a drag (pixels) and a zoom (scroll lines).
    pub fn adjust(&mut self, drag_x: f32, drag_y: f32, zoom: f32) {
        self.phi += drag_x * 0.005;
        self.theta = (self.theta - drag_y * 0.005).clamp(0.01, std::f32::consts::PI - 0.01);
        self.radius = (self.radius - zoom * 0.5).clamp(Self::MIN_RADIUS, Self::MAX_RADIUS);
    }
}

impl Default for CameraOrbit {
    fn default() -> Self {
        Self {
            radius: 10.0,
            theta: 170.0_f32.to_radians(),
            phi: 90.0_f32.to_radians(),
        }
    }
}

/// Everything needed to build and run the viewer.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Pool capacity.
    pub particle_count: usize,
    /// Window title.
    pub title: String,
    /// Initial window size in logical pixels.
    pub window_size: (u32, u32),
    /// Sprite texture for the particles.
    pub particle_texture: PathBuf,
    /// Backdrop texture.
    pub background_texture: PathBuf,
    /// Optional WGSL override for the particle pipeline.
    pub particle_shader: Option<PathBuf>,
    /// Optional WGSL override for the background pipeline.
    pub background_shader: Option<PathBuf>,
    /// Simulated seconds per frame.
    pub time_step: f32,
    /// Camera placement.
    pub camera: CameraOrbit,
    /// Fill the pool as soon as the window opens.
    pub emit_on_start: bool,
    /// Seed for the spawn RNG; entropy when `None`.
    pub seed: Option<u64>,
}

impl SceneConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    pub fn with_particle_texture(mut self, path: impl Into<PathBuf>) -> Self {
        self.particle_texture = path.into();
        self
    }

    pub fn with_background_texture(mut self, path: impl Into<PathBuf>) -> Self {
        self.background_texture = path.into();
        self
    }

    pub fn with_particle_shader(mut self, path: impl Into<PathBuf>) -> Self {
        self.particle_shader = Some(path.into());
        self
    }

    pub fn with_background_shader(mut self, path: impl Into<PathBuf>) -> Self {
        self.background_shader = Some(path.into());
        self
    }

    /// Set the simulated seconds per frame.
    pub fn with_time_step(mut self, step: f32) -> Self {
        self.time_step = step;
        self
    }

    pub fn with_camera(mut self, camera: CameraOrbit) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_emit_on_start(mut self, emit: bool) -> Self {
        self.emit_on_start = emit;
        self
    }

    /// Make the spawn sequence reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject settings the viewer cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(AppError::Config(format!(
                "time step must be positive, got {}",
                self.time_step
            )));
        }
        if self.window_size.0 == 0 || self.window_size.1 == 0 {
            return Err(AppError::Config(format!(
                "window size must be non-zero, got {}x{}",
                self.window_size.0, self.window_size.1
            )));
        }
        if !(self.camera.radius.is_finite() && self.camera.radius > 0.0) {
            return Err(AppError::Config(format!(
                "camera radius must be positive, got {}",
                self.camera.radius
            )));
        }
        Ok(())
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            particle_count: 1_000,
            title: "Particle System".to_string(),
            window_size: (720, 720),
            particle_texture: PathBuf::from("texture/Fire.jpg"),
            background_texture: PathBuf::from("texture/metal.png"),
            particle_shader: None,
            background_shader: None,
            time_step: FIXED_STEP,
            camera: CameraOrbit::default(),
            emit_on_start: false,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SceneConfig::default();
        assert_eq!(config.time_step, 0.01);
        assert_eq!(config.window_size, (720, 720));
        assert!(!config.emit_on_start);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = SceneConfig::new()
            .with_particle_count(42)
            .with_title("t")
            .with_particle_shader("p.wgsl")
            .with_seed(7)
            .with_emit_on_start(true);
        assert_eq!(config.particle_count, 42);
        assert_eq!(config.title, "t");
        assert_eq!(config.particle_shader, Some(PathBuf::from("p.wgsl")));
        assert_eq!(config.seed, Some(7));
        assert!(config.emit_on_start);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(SceneConfig::new().with_time_step(0.0).validate().is_err());
        assert!(SceneConfig::new().with_time_step(f32::NAN).validate().is_err());
        assert!(SceneConfig::new().with_window_size(0, 10).validate().is_err());
    }

    #[test]
    fn test_orbit_adjust_clamps() {
        let mut orbit = CameraOrbit::default();
        orbit.adjust(0.0, 0.0, 1000.0);
        assert_eq!(orbit.radius, CameraOrbit::MIN_RADIUS);
        orbit.adjust(0.0, 0.0, -1000.0);
        assert_eq!(orbit.radius, CameraOrbit::MAX_RADIUS);
        orbit.adjust(0.0, -100_000.0, 0.0);
        assert!(orbit.theta < std::f32::consts::PI);
    }
}
