/*
 * Integration tests for the pairwise collision core: conservation laws,
 * pair deduplication, and the documented two-body scenario.
 */

use glam::DVec2;
use molsim::{PairOutcome, Particle, Simulation, SimulationParams};

fn momentum(particles: &[Particle]) -> DVec2 {
    particles
        .iter()
        .fold(DVec2::ZERO, |acc, p| acc + p.velocity * p.mass)
}

fn kinetic_energy(particles: &[Particle]) -> f64 {
    particles
        .iter()
        .map(|p| 0.5 * p.mass * p.velocity.length_squared())
        .sum()
}

// Two particles with masses 1 and 4 (radii 1 and 2), approaching head-on
// with a slight overlap. Resolution must conserve momentum and kinetic
// energy and leave the pair separating.
#[test]
fn mass_weighted_two_body_scenario() {
    let mut a = Particle::new(DVec2::new(10.0, 10.0), DVec2::new(5.0, 0.0), 1.0);
    let mut b = Particle::new(DVec2::new(12.9, 10.0), DVec2::new(-1.0, 0.0), 2.0);
    assert_eq!(a.mass, 1.0);
    assert_eq!(b.mass, 4.0);

    let momentum_before = momentum(&[a.clone(), b.clone()]);
    let energy_before = kinetic_energy(&[a.clone(), b.clone()]);

    let outcome = a.collide_with(&mut b);
    assert_eq!(outcome, PairOutcome::Resolved);

    let momentum_after = momentum(&[a.clone(), b.clone()]);
    assert!(
        (momentum_after - momentum_before).length() < 1e-12,
        "momentum drifted from {:?} to {:?}",
        momentum_before,
        momentum_after
    );

    let energy_after = kinetic_energy(&[a.clone(), b.clone()]);
    assert!(
        (energy_after - energy_before).abs() < 1e-12,
        "kinetic energy drifted from {} to {}",
        energy_before,
        energy_after
    );

    // Post-resolution the pair must be receding along the contact normal
    let normal = (a.position - b.position).normalize();
    let dp = (a.velocity - b.velocity).dot(normal);
    assert!(dp >= 0.0, "pair still approaching after resolution: dp={}", dp);

    // And sit exactly tangent after the positional correction
    let gap = (b.position - a.position).length();
    assert!((gap - 3.0).abs() < 1e-12, "expected tangency at 3.0, got {}", gap);
}

// The general impulse 2*dp/(m1+m2) must reduce to dp for equal masses:
// a head-on equal-mass collision exchanges the normal velocities.
#[test]
fn equal_mass_impulse_reduces_to_velocity_exchange() {
    let mut a = Particle::new(DVec2::new(0.0, 0.0), DVec2::new(3.0, 0.0), 1.0);
    let mut b = Particle::new(DVec2::new(1.8, 0.0), DVec2::new(-2.0, 0.0), 1.0);

    assert_eq!(a.collide_with(&mut b), PairOutcome::Resolved);
    assert!((a.velocity.x - -2.0).abs() < 1e-12);
    assert!((b.velocity.x - 3.0).abs() < 1e-12);
}

#[test]
fn overlap_converges_to_tangency_in_one_resolution() {
    // Overlapping by 0.7 along a diagonal
    let mut a = Particle::new(DVec2::new(0.0, 0.0), DVec2::new(0.0, 0.0), 1.0);
    let offset = DVec2::new(1.0, 1.0).normalize() * 1.3;
    let mut b = Particle::new(offset, DVec2::new(0.0, 0.0), 1.0);

    a.collide_with(&mut b);
    let gap = (b.position - a.position).length();
    assert!((gap - 2.0).abs() < 1e-12, "expected tangency at 2.0, got {}", gap);
}

// Three particles mutually within each other's neighborhood must produce
// exactly 3 examined pairs in one step, not 6.
#[test]
fn mutual_triplet_is_resolved_pairwise_exactly_once() -> molsim::Result<()> {
    let params = SimulationParams {
        container_width: 100.0,
        container_height: 100.0,
        num_particles: 3,
        min_radius: 1.0,
        max_radius: 2.0,
        min_speed: 0.0,
        max_speed: 1.0,
        cell_size: Some(50.0),
        seed: Some(3),
        ..SimulationParams::default()
    };
    let mut sim = Simulation::new(params)?;

    // Tight triangle around (26, 25.5), every pair overlapping, drifting
    // towards its centroid so the contacts are approaching.
    sim.particles = vec![
        Particle::new(DVec2::new(25.0, 25.0), DVec2::new(0.2, 0.1), 1.5),
        Particle::new(DVec2::new(27.0, 25.0), DVec2::new(-0.2, 0.1), 1.5),
        Particle::new(DVec2::new(26.0, 26.5), DVec2::new(0.0, -0.2), 1.5),
    ];

    let momentum_before = momentum(&sim.particles);
    let stats = sim.step(0);

    assert_eq!(stats.wall_hits, 0);
    assert_eq!(
        stats.pairs_examined, 3,
        "each unordered pair must be examined exactly once"
    );
    assert!(stats.collisions >= 1, "approaching contacts must resolve");
    assert!(stats.collisions <= 3);

    // With no wall contact the step conserves total momentum
    let momentum_after = momentum(&sim.particles);
    assert!(
        (momentum_after - momentum_before).length() < 1e-12,
        "momentum drifted from {:?} to {:?}",
        momentum_before,
        momentum_after
    );
    Ok(())
}

// A dense seeded population: every step keeps pair bookkeeping consistent
// and never examines a pair twice.
#[test]
fn dense_population_steps_remain_consistent() -> molsim::Result<()> {
    let params = SimulationParams {
        container_width: 300.0,
        container_height: 300.0,
        num_particles: 150,
        min_radius: 2.0,
        max_radius: 4.0,
        min_speed: 0.5,
        max_speed: 3.0,
        seed: Some(99),
        ..SimulationParams::default()
    };
    let mut sim = Simulation::new(params)?;

    for step in 0..200 {
        let stats = sim.step(step * 16);
        // An unordered pair can contribute at most one resolution
        assert!(stats.collisions <= stats.pairs_examined);
        for p in &sim.particles {
            assert!(p.position.x.is_finite() && p.position.y.is_finite());
            assert!(p.velocity.x.is_finite() && p.velocity.y.is_finite());
        }
    }
    Ok(())
}
