//! The particle pool.
//!
//! [`ParticleSystem`] owns a fixed-capacity pool of [`Particle`]s. Storage is
//! reserved once at construction; particles are materialized by
//! [`emit`](ParticleSystem::emit), integrated in place by
//! [`update`](ParticleSystem::update), and revived in place when they expire.
//! Nothing is ever removed, so a particle's index is its identity for the
//! whole run.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::error::PoolError;
use crate::particle::Particle;
use crate::render::{DrawSubmitter, ParticleDraw};
use crate::spawn::{self, SpawnSource};

/// Fixed-capacity ember pool.
///
/// # Example
///
/// ```
/// use embers::ParticleSystem;
///
/// let mut system = ParticleSystem::new(100).unwrap();
/// system.emit();
/// system.update(0.01);
/// assert_eq!(system.particles().len(), 100);
/// ```
#[derive(Debug)]
pub struct ParticleSystem<R = SmallRng> {
    particles: Vec<Particle>,
    capacity: usize,
    rng: R,
}

impl ParticleSystem<SmallRng> {
    /// Create a pool seeded from OS entropy.
    pub fn new(capacity: usize) -> Result<Self, PoolError> {
        Self::with_rng(capacity, SmallRng::from_entropy())
    }

    /// Create a pool with a fixed seed.
    pub fn seeded(capacity: usize, seed: u64) -> Result<Self, PoolError> {
        Self::with_rng(capacity, SmallRng::seed_from_u64(seed))
    }
}

impl<R: SpawnSource> ParticleSystem<R> {
    /// Create a pool that draws all its randomness from `rng`.
    ///
    /// Reserves room for `capacity` particles up front; the pool stays empty
    /// until the first [`emit`](Self::emit).
    pub fn with_rng(capacity: usize, rng: R) -> Result<Self, PoolError> {
        let mut particles = Vec::new();
        particles
            .try_reserve_exact(capacity)
            .map_err(|source| PoolError::Allocation { capacity, source })?;

        Ok(Self {
            particles,
            capacity,
            rng,
        })
    }

    /// Refill the whole pool with freshly spawned particles.
    ///
    /// Discards the state of any live particles.
    pub fn emit(&mut self) {
        self.particles.clear();
        self.particles.resize(self.capacity, Particle::default());
        for p in &mut self.particles {
            spawn::respawn(p, &mut self.rng);
        }
        log::debug!("emitted {} particles", self.capacity);
    }

    /// Respawn the particle at `index`. Out-of-range indices are ignored.
    pub fn respawn(&mut self, index: usize) {
        if let Some(p) = self.particles.get_mut(index) {
            spawn::respawn(p, &mut self.rng);
        }
    }

    /// Advance every particle by `dt` seconds.
    ///
    /// A particle whose lifetime runs out is respawned within the same call,
    /// so no particle is ever observed with a non-positive lifetime.
    pub fn update(&mut self, dt: f32) {
        for p in &mut self.particles {
            if p.integrate(dt) {
                // Respawn after the fade so the revived particle shows its
                // ember hue until the next update.
                spawn::respawn(p, &mut self.rng);
            }
        }
    }
}

impl<R> ParticleSystem<R> {
    /// Submit one draw per particle, in pool order.
    ///
    /// Every particle is submitted regardless of lifetime; there is no
    /// sorting and no culling.
    pub fn render<S: DrawSubmitter + ?Sized>(&self, submitter: &mut S) {
        for p in &self.particles {
            submitter.submit(ParticleDraw::from(p));
        }
    }

    /// Configured capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The pool, in index order. Empty until the first emit.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of materialized particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the pool has not been emitted yet (or has zero capacity).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spawn::tests::Scripted;
    use glam::{Vec3, Vec4};

    #[test]
    fn test_new_is_empty() {
        let system = ParticleSystem::seeded(64, 0).unwrap();
        assert!(system.is_empty());
        assert_eq!(system.capacity(), 64);
    }

    #[test]
    fn test_emit_fills_pool() {
        let mut system = ParticleSystem::seeded(64, 0).unwrap();
        system.emit();
        assert_eq!(system.len(), 64);
        for p in system.particles() {
            assert!((2.0..=3.0).contains(&p.lifetime));
            assert_eq!(p.color.w, 1.0);
        }
    }

    #[test]
    fn test_emit_does_not_reallocate() {
        let mut system = ParticleSystem::seeded(32, 0).unwrap();
        system.emit();
        let ptr = system.particles().as_ptr();
        system.emit();
        system.update(0.01);
        assert_eq!(system.particles().as_ptr(), ptr);
    }

    #[test]
    fn test_emit_twice_rerandomizes() {
        let mut system = ParticleSystem::seeded(16, 3).unwrap();
        system.emit();
        let first = system.particles().to_vec();
        system.emit();
        assert_eq!(system.len(), 16);
        assert_ne!(first, system.particles());
    }

    #[test]
    fn test_midpoint_emit() {
        // Everything at its midpoint except cos(phi), which must be positive
        // for the velocity sample to be accepted.
        let source = Scripted::new(&[0.5, 0.5, 0.75]);
        let mut system = ParticleSystem::with_rng(1, source).unwrap();
        system.emit();

        let p = system.particles()[0];
        assert_eq!(p.position, Vec3::ZERO);
        assert!((p.lifetime - 2.5).abs() < 1e-6);
        assert!((p.size - 0.02).abs() < 1e-6);
        assert!((p.velocity.z - 7.25).abs() < 1e-6);
        assert!((p.color - Vec4::new(0.9, 0.5, 0.1, 1.0)).abs().max_element() < 1e-6);

        // radius 6.5, theta = PI, cos_phi = 0.5
        let lateral = 6.5 * (1.0f32 - 0.25).sqrt();
        assert!((p.velocity.x + lateral).abs() < 1e-4);
        assert!(p.velocity.y.abs() < 1e-4);
    }

    #[test]
    fn test_update_greyscale_fade() {
        let mut system = ParticleSystem::seeded(128, 11).unwrap();
        system.emit();
        system.update(0.01);
        for p in system.particles() {
            assert_eq!(p.color.x, p.color.y);
            assert_eq!(p.color.y, p.color.z);
            assert_eq!(p.color.w, p.lifetime / 4.0);
        }
    }

    #[test]
    fn test_expired_particle_respawns_same_call() {
        let mut system = ParticleSystem::seeded(4, 5).unwrap();
        system.emit();
        system.particles[2].lifetime = 0.005;

        system.update(0.01);

        let p = system.particles()[2];
        assert!((2.0..=3.0).contains(&p.lifetime));
        assert_eq!(p.position, Vec3::ZERO);
        assert!(p.is_fresh());
    }

    #[test]
    fn test_respawn_single_index() {
        let mut system = ParticleSystem::seeded(3, 9).unwrap();
        system.emit();
        system.update(0.5);
        let before = system.particles().to_vec();

        system.respawn(1);
        system.respawn(99);

        assert_eq!(system.particles()[0], before[0]);
        assert_ne!(system.particles()[1], before[1]);
        assert_eq!(system.particles()[2], before[2]);
        assert_eq!(system.particles()[1].position, Vec3::ZERO);
    }

    #[test]
    fn test_render_order() {
        let mut system = ParticleSystem::seeded(10, 2).unwrap();
        system.emit();
        system.update(0.2);

        let mut draws: Vec<ParticleDraw> = Vec::new();
        system.render(&mut draws);

        assert_eq!(draws.len(), 10);
        for (draw, p) in draws.iter().zip(system.particles()) {
            assert_eq!(draw.offset, p.position.to_array());
            assert_eq!(draw.size, p.size);
            assert_eq!(draw.color, p.color.to_array());
        }
    }

    #[test]
    fn test_render_before_emit_submits_nothing() {
        let system = ParticleSystem::seeded(10, 2).unwrap();
        let mut draws: Vec<ParticleDraw> = Vec::new();
        system.render(&mut draws);
        assert!(draws.is_empty());
    }

    #[test]
    fn test_zero_capacity() {
        let mut system = ParticleSystem::seeded(0, 0).unwrap();
        system.emit();
        system.update(0.01);
        assert!(system.is_empty());
    }

    #[test]
    fn test_allocation_failure() {
        let result = ParticleSystem::seeded(usize::MAX, 0);
        assert!(matches!(result, Err(PoolError::Allocation { .. })));
    }
}
