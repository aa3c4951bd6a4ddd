/*
 * Particle Module
 *
 * This module defines the Particle struct and its behavior.
 * Each particle is a circular body that:
 * 1. Integrates its position from its velocity once per step
 * 2. Resolves elastic collisions against other particles pairwise
 * 3. Tracks a transient collision flag for rendering
 */

use glam::DVec2;
use rand::Rng;

// Below this squared separation a pair has no well-defined contact normal
// and is skipped for the step rather than amplifying numerical noise.
pub const DEGENERATE_DIST_SQ: f64 = 1e-12;

// Speeds below this are treated as "at rest" when rescaling velocity.
const REST_SPEED: f64 = 1e-6;

// Outcome of a pairwise contact check, reported for step diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairOutcome {
    // No overlap between the two bodies
    Clear,
    // Overlapping but separation too small for a contact normal
    Degenerate,
    // Overlap separated positionally, velocities already receding
    Separating,
    // Overlap separated and an impulse exchanged
    Resolved,
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub position: DVec2,
    pub velocity: DVec2,
    pub radius: f64,
    pub mass: f64,
    pub colliding: bool,
}

impl Particle {
    // Mass is proportional to area; equal radii give the equal-mass case.
    pub fn new(position: DVec2, velocity: DVec2, radius: f64) -> Self {
        Self {
            position,
            velocity,
            radius,
            mass: radius * radius,
            colliding: false,
        }
    }

    // Advance the position by one step. The multiplier scales the
    // displacement only; the stored velocity is never altered by it.
    pub fn integrate(&mut self, speed_multiplier: f64) {
        self.colliding = false;
        self.position += self.velocity * speed_multiplier;
    }

    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    // Rescale the velocity to the given magnitude, keeping its direction.
    // A particle at rest gets a random direction instead.
    pub fn set_speed<R: Rng>(&mut self, new_speed: f64, rng: &mut R) {
        let current = self.speed();
        if current > REST_SPEED {
            self.velocity *= new_speed / current;
        } else {
            let angle = rng.gen_range(0.0..std::f64::consts::TAU);
            self.velocity = DVec2::new(angle.cos(), angle.sin()) * new_speed;
        }
    }

    // Resolve a potential collision against another particle.
    //
    // The contact normal points from the other body towards this one.
    // Overlapping pairs are first displaced by half the overlap each along
    // the normal, so the pair ends exactly tangent. An impulse is exchanged
    // only when the pair is approaching (dp < 0); receding pairs would
    // otherwise be pulled back together. The impulse is the mass-weighted
    // elastic form 2*dp/(m1+m2), which reduces to dp for equal masses.
    pub fn collide_with(&mut self, other: &mut Particle) -> PairOutcome {
        let delta = self.position - other.position;
        let distance_sq = delta.length_squared();
        let min_dist = self.radius + other.radius;

        if distance_sq >= min_dist * min_dist {
            return PairOutcome::Clear;
        }
        if distance_sq <= DEGENERATE_DIST_SQ {
            return PairOutcome::Degenerate;
        }

        let distance = distance_sq.sqrt();
        let normal = delta / distance;

        // Positional correction to exact tangency; residual penetration
        // would inject energy at the next contact check.
        let half_overlap = (min_dist - distance) / 2.0;
        self.position += normal * half_overlap;
        other.position -= normal * half_overlap;

        self.colliding = true;
        other.colliding = true;

        let dp = (self.velocity - other.velocity).dot(normal);
        if dp >= 0.0 {
            return PairOutcome::Separating;
        }

        let impulse = 2.0 * dp / (self.mass + other.mass);
        self.velocity -= normal * (impulse * other.mass);
        other.velocity += normal * (impulse * self.mass);
        PairOutcome::Resolved
    }
}
