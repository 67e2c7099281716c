//! Randomness for particle respawn.
//!
//! All randomness in the simulation flows through [`SpawnSource`]. Any
//! [`rand::Rng`] is a spawn source; tests can implement the trait directly to
//! script the exact values a respawn sees.

use std::f32::consts::TAU;

use glam::{Vec3, Vec4};
use rand::Rng;

use crate::particle::{
    Particle, ACCELERATION, BLUE_RANGE, GREEN_RANGE, LIFETIME_RANGE, RED_RANGE, SIZE_RANGE,
    SPEED_RANGE, THRUST_RANGE,
};

/// Source of uniformly distributed floats.
pub trait SpawnSource {
    /// Uniform f32 in `[min, max]`.
    fn random_range(&mut self, min: f32, max: f32) -> f32;

    /// Uniform point on the surface of a sphere of given radius.
    ///
    /// Draws the azimuth first, then the cosine of the polar angle.
    fn random_on_sphere(&mut self, radius: f32) -> Vec3 {
        let theta = self.random_range(0.0, TAU);
        let cos_phi = self.random_range(-1.0, 1.0);
        let sin_phi = (1.0 - cos_phi * cos_phi).max(0.0).sqrt();

        Vec3::new(
            radius * sin_phi * theta.cos(),
            radius * sin_phi * theta.sin(),
            radius * cos_phi,
        )
    }
}

impl<R: Rng + ?Sized> SpawnSource for R {
    #[inline]
    fn random_range(&mut self, min: f32, max: f32) -> f32 {
        self.gen_range(min..=max)
    }
}

#[inline]
fn draw<S: SpawnSource + ?Sized>(source: &mut S, range: (f32, f32)) -> f32 {
    source.random_range(range.0, range.1)
}

/// Give `p` a fresh randomized state.
///
/// The velocity is sampled on a sphere of random radius until its z component
/// is positive, then z is thrown away and redrawn from a narrower thrust
/// range. Only x and y keep the spherical sample.
pub fn respawn<S: SpawnSource + ?Sized>(p: &mut Particle, source: &mut S) {
    p.position = Vec3::ZERO;
    p.acceleration = ACCELERATION;

    let mut velocity = loop {
        let radius = draw(source, SPEED_RANGE);
        let v = source.random_on_sphere(radius);
        if v.z > 0.0 {
            break v;
        }
    };
    velocity.z = draw(source, THRUST_RANGE);
    p.velocity = velocity;

    p.color = Vec4::new(
        draw(source, RED_RANGE),
        draw(source, GREEN_RANGE),
        draw(source, BLUE_RANGE),
        1.0,
    );
    p.size = draw(source, SIZE_RANGE);
    p.lifetime = draw(source, LIFETIME_RANGE);
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::VecDeque;

    /// Returns `min + t * (max - min)` for scripted fractions `t`, then 0.5.
    pub(crate) struct Scripted {
        pub fractions: VecDeque<f32>,
    }

    impl Scripted {
        pub(crate) fn new(fractions: &[f32]) -> Self {
            Self {
                fractions: fractions.iter().copied().collect(),
            }
        }
    }

    impl SpawnSource for Scripted {
        fn random_range(&mut self, min: f32, max: f32) -> f32 {
            let t = self.fractions.pop_front().unwrap_or(0.5);
            min + t * (max - min)
        }
    }

    #[test]
    fn test_random_on_sphere_radius() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..100 {
            let v = rng.random_on_sphere(3.0);
            assert!((v.length() - 3.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_respawn_ranges() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut p = Particle::default();
        for _ in 0..1000 {
            respawn(&mut p, &mut rng);
            assert_eq!(p.position, Vec3::ZERO);
            assert_eq!(p.acceleration, ACCELERATION);
            assert!((2.0..=3.0).contains(&p.lifetime));
            assert!((0.01..=0.03).contains(&p.size));
            assert!((2.5..=12.0).contains(&p.velocity.z));
            assert!((0.8..=1.0).contains(&p.color.x));
            assert!((0.4..=0.6).contains(&p.color.y));
            assert!((0.0..=0.2).contains(&p.color.z));
            assert_eq!(p.color.w, 1.0);
        }
    }

    #[test]
    fn test_respawn_rejects_downward_samples() {
        // First sphere sample points straight down (cos_phi = -1), second straight up.
        let mut source = Scripted::new(&[0.5, 0.0, 0.0, 0.5, 0.0, 1.0]);
        let mut p = Particle::default();
        respawn(&mut p, &mut source);

        // Second attempt: radius 6.5, theta 0, cos_phi 1 -> lateral components vanish
        assert!(p.velocity.x.abs() < 1e-5);
        assert!(p.velocity.y.abs() < 1e-5);
        // z redrawn at the midpoint of the thrust range
        assert!((p.velocity.z - 7.25).abs() < 1e-6);
        // Remaining draws fall back to midpoints
        assert!((p.lifetime - 2.5).abs() < 1e-6);
    }
}
