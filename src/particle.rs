//! Per-particle state.
//!
//! A [`Particle`] is a plain value with no identity beyond its index in the
//! pool. Every field is overwritten on respawn, and `color` is re-derived from
//! `lifetime` on every update.

use glam::{Vec3, Vec4};

/// Constant drift applied to every particle after respawn.
pub const ACCELERATION: Vec3 = Vec3::new(0.0, 0.0, -2.8);

/// Range of the radius used for the spherical velocity sample.
pub const SPEED_RANGE: (f32, f32) = (0.5, 12.5);
/// Range the z component of velocity is redrawn from.
pub const THRUST_RANGE: (f32, f32) = (2.5, 12.0);
/// Red channel range at spawn.
pub const RED_RANGE: (f32, f32) = (0.8, 1.0);
/// Green channel range at spawn.
pub const GREEN_RANGE: (f32, f32) = (0.4, 0.6);
/// Blue channel range at spawn.
pub const BLUE_RANGE: (f32, f32) = (0.0, 0.2);
/// Sprite size range at spawn.
pub const SIZE_RANGE: (f32, f32) = (0.01, 0.03);
/// Lifetime range at spawn, in seconds.
pub const LIFETIME_RANGE: (f32, f32) = (2.0, 3.0);

/// A single ember.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// World-space position.
    pub position: Vec3,
    /// Velocity in units per second.
    pub velocity: Vec3,
    /// Constant acceleration, set on respawn.
    pub acceleration: Vec3,
    /// RGBA color.
    pub color: Vec4,
    /// Sprite scale.
    pub size: f32,
    /// Seconds left before respawn.
    pub lifetime: f32,
}

impl Particle {
    /// Advance this particle by `dt` seconds.
    ///
    /// Integrates velocity then position, burns lifetime and recomputes the
    /// fade color. Returns `true` when the particle has expired and needs a
    /// respawn.
    #[inline]
    pub fn integrate(&mut self, dt: f32) -> bool {
        self.velocity += self.acceleration * dt;
        self.position += self.velocity * dt;
        self.lifetime -= dt;
        self.color = fade_color(self.lifetime);
        self.lifetime <= 0.0
    }

    /// Whether the particle's color still holds the spawn-time ember hue.
    ///
    /// True only between a respawn and the next update.
    pub fn is_fresh(&self) -> bool {
        self.color.w == 1.0 && self.color != fade_color(self.lifetime)
    }
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            color: Vec4::ONE,
            size: 0.0,
            lifetime: 0.0,
        }
    }
}

/// Lifetime fade: greyscale intensity `lifetime / 2`, alpha `lifetime / 4`.
///
/// This replaces the ember hue chosen at respawn, so the warm colors are only
/// visible for the single frame after a particle is (re)spawned.
#[inline]
pub fn fade_color(lifetime: f32) -> Vec4 {
    let life_ratio = lifetime / 2.0;
    Vec4::new(life_ratio, life_ratio, life_ratio, lifetime / 4.0)
}
