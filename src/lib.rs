//! # Embers
//!
//! A fixed-capacity particle fountain rendered with wgpu.
//!
//! A pool of particles is spawned on the upper half of a small sphere, pushed
//! upward, pulled back along -Z, and faded to grey as its lifetime runs out.
//! Expired particles are respawned in place, so the pool never grows or
//! shrinks after the first emit.
//!
//! ## Quick Start
//!
//! ```no_run
//! use embers::prelude::*;
//!
//! fn main() -> Result<(), AppError> {
//!     embers::run(SceneConfig::new().with_particle_count(2_000).with_emit_on_start(true))
//! }
//! ```
//!
//! ## Headless use
//!
//! The simulation is plain CPU code and needs no window:
//!
//! ```
//! use embers::{ParticleDraw, ParticleSystem};
//!
//! let mut system = ParticleSystem::seeded(100, 42).unwrap();
//! system.emit();
//! for _ in 0..500 {
//!     system.update(0.01);
//! }
//! assert!(system.particles().iter().all(|p| p.lifetime > 0.0));
//!
//! let mut draws: Vec<ParticleDraw> = Vec::new();
//! system.render(&mut draws);
//! assert_eq!(draws.len(), 100);
//! ```
//!
//! ## Modules
//!
//! - [`particle`] - the particle record and its integration step
//! - [`spawn`] - spawn distribution and the [`SpawnSource`] randomness seam
//! - [`system`] - the pool: emit, update, render
//! - [`render`] - what the pool hands a renderer per particle
//! - [`camera`] - spherical and cartesian look-at camera
//! - [`gpu`] - wgpu context, particle and background pipelines
//! - [`app`] - window, input and the frame loop

pub mod app;
pub mod camera;
pub mod config;
pub mod error;
pub mod gpu;
pub mod input;
pub mod particle;
pub mod render;
pub mod shader;
pub mod spawn;
pub mod system;
pub mod textures;
pub mod time;

pub use app::run;
pub use camera::{Camera, CameraMode};
pub use config::{CameraOrbit, SceneConfig};
pub use error::{AppError, CameraError, GpuError, PoolError, ShaderError, TextureError};
pub use glam::{Mat4, Vec2, Vec3, Vec4};
pub use particle::Particle;
pub use render::{DrawSubmitter, ParticleDraw};
pub use spawn::SpawnSource;
pub use system::ParticleSystem;
pub use textures::{AddressMode, FilterMode, TextureConfig};

/// Common imports.
pub mod prelude {
    pub use crate::camera::{Camera, CameraMode};
    pub use crate::config::{CameraOrbit, SceneConfig};
    pub use crate::error::AppError;
    pub use crate::input::{Actions, Input};
    pub use crate::particle::Particle;
    pub use crate::render::{DrawSubmitter, ParticleDraw};
    pub use crate::spawn::SpawnSource;
    pub use crate::system::ParticleSystem;
    pub use crate::textures::{AddressMode, FilterMode, TextureConfig};
    pub use crate::time::FrameClock;
    pub use crate::{Vec2, Vec3, Vec4};
}
