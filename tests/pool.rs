//! Integration tests for the particle pool through the public API.

use embers::particle::{fade_color, LIFETIME_RANGE};
use embers::{Particle, ParticleDraw, ParticleSystem};

// ============================================================================
// Steady state
// ============================================================================

#[test]
fn test_long_run_keeps_pool_alive() {
    let mut system = ParticleSystem::seeded(100, 7).unwrap();
    system.emit();

    for _ in 0..500 {
        system.update(0.01);
        assert_eq!(system.len(), 100);
        for p in system.particles() {
            assert!(p.lifetime > 0.0);
            assert!(p.lifetime <= LIFETIME_RANGE.1);
        }
    }
}

#[test]
fn test_non_respawned_particles_are_grey() {
    let mut system = ParticleSystem::seeded(200, 11).unwrap();
    system.emit();
    system.update(0.01);

    for p in system.particles() {
        // Freshly revived particles keep their ember hue for one frame
        if p.is_fresh() {
            continue;
        }
        assert_eq!(p.color, fade_color(p.lifetime));
    }
}

#[test]
fn test_positions_stay_finite() {
    let mut system = ParticleSystem::seeded(50, 3).unwrap();
    system.emit();
    for _ in 0..2_000 {
        system.update(0.01);
    }
    assert!(system
        .particles()
        .iter()
        .all(|p| p.position.is_finite() && p.velocity.is_finite()));
}

// ============================================================================
// Determinism
// ============================================================================

fn snapshot(seed: u64) -> Vec<Particle> {
    let mut system = ParticleSystem::seeded(64, seed).unwrap();
    system.emit();
    for _ in 0..300 {
        system.update(0.01);
    }
    system.particles().to_vec()
}

#[test]
fn test_same_seed_same_run() {
    assert_eq!(snapshot(5), snapshot(5));
}

#[test]
fn test_different_seed_different_run() {
    assert_ne!(snapshot(5), snapshot(6));
}

// ============================================================================
// Emit and render
// ============================================================================

#[test]
fn test_emit_twice_keeps_capacity() {
    let mut system = ParticleSystem::seeded(32, 1).unwrap();
    system.emit();
    let first = system.particles().to_vec();
    system.emit();
    assert_eq!(system.len(), 32);
    assert_ne!(first, system.particles());
}

#[test]
fn test_render_matches_pool_order() {
    let mut system = ParticleSystem::seeded(20, 2).unwrap();
    system.emit();
    system.update(0.01);

    let mut draws: Vec<ParticleDraw> = Vec::new();
    system.render(&mut draws);

    let expected: Vec<ParticleDraw> = system.particles().iter().map(ParticleDraw::from).collect();
    assert_eq!(draws, expected);
}

#[test]
fn test_update_before_emit_is_noop() {
    let mut system = ParticleSystem::seeded(10, 0).unwrap();
    system.update(0.01);
    assert!(system.is_empty());
}
