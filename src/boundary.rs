/*
 * Boundary Module
 *
 * This module defines the boundary policies governing particle-wall
 * interaction. A policy is selected once per simulation run and evaluated
 * every step:
 * - Reflect: independent-axis reflection at the four container edges
 * - Partition: reflecting internal vertical wall that expires after a timer
 * - Thermal: thermostatted hot/cold side walls, insulating top/bottom
 * - Shear: moving top wall that imposes its tangential velocity
 *
 * Time-dependent behavior (partition timer, speed ramp) is recomputed from
 * elapsed time each step as a PolicyState, never accumulated.
 */

use glam::DVec2;
use rand::Rng;

use crate::error::{Error, Result};
use crate::params::SimulationParams;
use crate::particle::Particle;

// Thermostatted bounces never drop below this speed, so a near-resting
// particle cannot get stuck against a wall.
const MIN_THERMAL_SPEED: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryPolicy {
    Reflect,
    Partition(PartitionWall),
    Thermal(ThermalWalls),
    Shear(ShearWall),
}

// Internal vertical wall segment that reflects particles from both sides
// while elapsed time is below its duration, then becomes permeable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartitionWall {
    pub x: f64,
    pub thickness: f64,
    pub duration_ms: u64,
}

// Hot left wall and cold right wall; each contact redirects the particle
// inward and resets its speed to a jittered per-wall target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalWalls {
    pub hot_speed: f64,
    pub cold_speed: f64,
    pub jitter: f64,
}

// No-slip moving wall along the y = 0 edge driving a Couette flow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShearWall {
    pub wall_speed: f64,
}

// Global integration multiplier interpolated over a warm-up window.
// Applied to displacement only; stored velocities are never scaled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedRamp {
    pub initial_multiplier: f64,
    pub final_multiplier: f64,
    pub duration_ms: u64,
}

// Per-step policy inputs derived purely from elapsed time and configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicyState {
    pub speed_multiplier: f64,
    pub partition_active: bool,
}

impl Default for PolicyState {
    fn default() -> Self {
        Self {
            speed_multiplier: 1.0,
            partition_active: false,
        }
    }
}

impl PolicyState {
    pub fn at(elapsed_ms: u64, params: &SimulationParams) -> Self {
        let speed_multiplier = match &params.ramp {
            None => 1.0,
            Some(ramp) if ramp.duration_ms == 0 || elapsed_ms >= ramp.duration_ms => {
                ramp.final_multiplier
            }
            Some(ramp) => {
                let fraction = elapsed_ms as f64 / ramp.duration_ms as f64;
                ramp.initial_multiplier
                    + (ramp.final_multiplier - ramp.initial_multiplier) * fraction
            }
        };

        let partition_active = match &params.policy {
            BoundaryPolicy::Partition(wall) => elapsed_ms < wall.duration_ms,
            _ => false,
        };

        Self {
            speed_multiplier,
            partition_active,
        }
    }
}

impl BoundaryPolicy {
    // Apply the policy to one post-move particle. Returns true when the
    // particle touched a wall or the active partition this step.
    pub fn apply<R: Rng>(
        &self,
        particle: &mut Particle,
        extent: DVec2,
        state: &PolicyState,
        rng: &mut R,
    ) -> bool {
        match self {
            BoundaryPolicy::Reflect => reflect_edges(particle, extent),
            BoundaryPolicy::Partition(wall) => {
                let mut hit = reflect_edges(particle, extent);
                if state.partition_active {
                    hit |= wall.deflect(particle);
                }
                hit
            }
            BoundaryPolicy::Thermal(walls) => walls.apply(particle, extent, rng),
            BoundaryPolicy::Shear(wall) => wall.apply(particle, extent),
        }
    }

    pub fn validate(&self, width: f64) -> Result<()> {
        match self {
            BoundaryPolicy::Reflect => Ok(()),
            BoundaryPolicy::Partition(wall) => wall.validate(width),
            BoundaryPolicy::Thermal(walls) => walls.validate(),
            BoundaryPolicy::Shear(wall) => {
                if !wall.wall_speed.is_finite() {
                    return Err(Error::InvalidParam("shear wall speed must be finite".into()));
                }
                Ok(())
            }
        }
    }
}

// Independent-axis reflection at the four container edges. The reflected
// component is forced to point inward and the position is clamped onto the
// boundary, so a particle can neither gain speed nor stick outside.
fn reflect_edges(particle: &mut Particle, extent: DVec2) -> bool {
    let mut hit = false;

    if particle.position.x <= particle.radius {
        particle.velocity.x = particle.velocity.x.abs();
        particle.position.x = particle.radius;
        hit = true;
    } else if particle.position.x >= extent.x - particle.radius {
        particle.velocity.x = -particle.velocity.x.abs();
        particle.position.x = extent.x - particle.radius;
        hit = true;
    }

    if particle.position.y <= particle.radius {
        particle.velocity.y = particle.velocity.y.abs();
        particle.position.y = particle.radius;
        hit = true;
    } else if particle.position.y >= extent.y - particle.radius {
        particle.velocity.y = -particle.velocity.y.abs();
        particle.position.y = extent.y - particle.radius;
        hit = true;
    }

    if hit {
        particle.colliding = true;
    }
    hit
}

impl PartitionWall {
    pub fn left_face(&self) -> f64 {
        self.x - self.thickness / 2.0
    }

    pub fn right_face(&self) -> f64 {
        self.x + self.thickness / 2.0
    }

    // Whether a circle at horizontal position x intrudes into the wall band
    pub fn overlaps(&self, x: f64, radius: f64) -> bool {
        x + radius > self.left_face() && x - radius < self.right_face()
    }

    // Reflect a particle crossing the wall from either side. The previous
    // position is estimated from the current velocity, so a particle that
    // was already past the line is not deflected back.
    fn deflect(&self, particle: &mut Particle) -> bool {
        let left = self.left_face();
        let right = self.right_face();
        let prev_x = particle.position.x - particle.velocity.x;

        if particle.velocity.x > 0.0
            && particle.position.x + particle.radius >= left
            && particle.position.x < left
        {
            if prev_x + particle.radius < left {
                particle.position.x = left - particle.radius;
                particle.velocity.x = -particle.velocity.x;
                particle.colliding = true;
                return true;
            }
        } else if particle.velocity.x < 0.0
            && particle.position.x - particle.radius <= right
            && particle.position.x > right
        {
            if prev_x - particle.radius > right {
                particle.position.x = right + particle.radius;
                particle.velocity.x = -particle.velocity.x;
                particle.colliding = true;
                return true;
            }
        }

        false
    }

    fn validate(&self, width: f64) -> Result<()> {
        if !self.thickness.is_finite() || self.thickness <= 0.0 {
            return Err(Error::InvalidParam(
                "partition thickness must be finite and > 0".into(),
            ));
        }
        if !self.x.is_finite() || self.left_face() <= 0.0 || self.right_face() >= width {
            return Err(Error::InvalidParam(format!(
                "partition at x={} does not fit inside a container of width {}",
                self.x, width
            )));
        }
        Ok(())
    }
}

impl ThermalWalls {
    fn apply<R: Rng>(&self, particle: &mut Particle, extent: DVec2, rng: &mut R) -> bool {
        let mut hit = false;

        // Hot left wall: redirect inward, then re-thermostat the speed
        if particle.position.x <= particle.radius {
            particle.velocity.x = particle.velocity.x.abs();
            let target = rng.gen_range(
                self.hot_speed * (1.0 - self.jitter)..=self.hot_speed * (1.0 + self.jitter),
            );
            particle.set_speed(target.max(MIN_THERMAL_SPEED), rng);
            particle.position.x = particle.radius;
            hit = true;
        } else if particle.position.x >= extent.x - particle.radius {
            // Cold right wall
            particle.velocity.x = -particle.velocity.x.abs();
            let target = rng.gen_range(
                self.cold_speed * (1.0 - self.jitter)..=self.cold_speed * (1.0 + self.jitter),
            );
            particle.set_speed(target.max(MIN_THERMAL_SPEED), rng);
            particle.position.x = extent.x - particle.radius;
            hit = true;
        }

        // Insulating top and bottom walls
        if particle.position.y <= particle.radius {
            particle.velocity.y = particle.velocity.y.abs();
            particle.position.y = particle.radius;
            hit = true;
        } else if particle.position.y >= extent.y - particle.radius {
            particle.velocity.y = -particle.velocity.y.abs();
            particle.position.y = extent.y - particle.radius;
            hit = true;
        }

        if hit {
            particle.colliding = true;
        }
        hit
    }

    fn validate(&self) -> Result<()> {
        if !self.hot_speed.is_finite() || self.hot_speed <= 0.0 {
            return Err(Error::InvalidParam("hot wall speed must be > 0".into()));
        }
        if !self.cold_speed.is_finite() || self.cold_speed <= 0.0 {
            return Err(Error::InvalidParam("cold wall speed must be > 0".into()));
        }
        if !self.jitter.is_finite() || !(0.0..1.0).contains(&self.jitter) {
            return Err(Error::InvalidParam(
                "thermal jitter must lie in [0, 1)".into(),
            ));
        }
        Ok(())
    }
}

impl ShearWall {
    fn apply(&self, particle: &mut Particle, extent: DVec2) -> bool {
        let mut hit = false;

        if particle.position.x <= particle.radius {
            particle.velocity.x = particle.velocity.x.abs();
            particle.position.x = particle.radius;
            hit = true;
        } else if particle.position.x >= extent.x - particle.radius {
            particle.velocity.x = -particle.velocity.x.abs();
            particle.position.x = extent.x - particle.radius;
            hit = true;
        }

        // Moving wall at y = 0: reflect the normal component, overwrite the
        // tangential component with the wall's own velocity (no slip)
        if particle.position.y <= particle.radius {
            particle.velocity.y = particle.velocity.y.abs();
            particle.velocity.x = self.wall_speed;
            particle.position.y = particle.radius;
            hit = true;
        } else if particle.position.y >= extent.y - particle.radius {
            particle.velocity.y = -particle.velocity.y.abs();
            particle.position.y = extent.y - particle.radius;
            hit = true;
        }

        if hit {
            particle.colliding = true;
        }
        hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn particle(x: f64, y: f64, vx: f64, vy: f64, radius: f64) -> Particle {
        Particle::new(DVec2::new(x, y), DVec2::new(vx, vy), radius)
    }

    fn extent() -> DVec2 {
        DVec2::new(100.0, 100.0)
    }

    #[test]
    fn reflect_clamps_and_redirects_without_speed_change() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut p = particle(-0.5, 50.0, -3.0, 4.0, 1.0);
        let before = p.speed();
        let state = PolicyState::default();
        let hit = BoundaryPolicy::Reflect.apply(&mut p, extent(), &state, &mut rng);
        assert!(hit);
        assert_eq!(p.position.x, 1.0);
        assert!(p.velocity.x > 0.0);
        assert!((p.speed() - before).abs() < 1e-12);
        assert!(p.colliding);
    }

    #[test]
    fn interior_particle_is_untouched() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut p = particle(50.0, 50.0, 3.0, -2.0, 1.0);
        let state = PolicyState::default();
        let hit = BoundaryPolicy::Reflect.apply(&mut p, extent(), &state, &mut rng);
        assert!(!hit);
        assert!(!p.colliding);
    }

    #[test]
    fn partition_deflects_from_the_left_only_while_active() {
        let wall = PartitionWall {
            x: 50.0,
            thickness: 4.0,
            duration_ms: 1000,
        };
        let policy = BoundaryPolicy::Partition(wall);
        let mut rng = StdRng::seed_from_u64(1);

        // Active: crossing the left face flips the velocity back
        let mut p = particle(47.5, 50.0, 2.0, 0.0, 1.0);
        let active = PolicyState {
            speed_multiplier: 1.0,
            partition_active: true,
        };
        assert!(policy.apply(&mut p, extent(), &active, &mut rng));
        assert_eq!(p.position.x, wall.left_face() - 1.0);
        assert!(p.velocity.x < 0.0);

        // Expired: the same approach passes through untouched
        let mut p = particle(47.5, 50.0, 2.0, 0.0, 1.0);
        let expired = PolicyState {
            speed_multiplier: 1.0,
            partition_active: false,
        };
        assert!(!policy.apply(&mut p, extent(), &expired, &mut rng));
        assert_eq!(p.velocity.x, 2.0);
    }

    #[test]
    fn partition_ignores_particles_already_past_the_line() {
        let wall = PartitionWall {
            x: 50.0,
            thickness: 4.0,
            duration_ms: 1000,
        };
        // Sits just left of the face but was already straddling it last step
        let mut p = particle(47.5, 50.0, 0.4, 0.0, 1.0);
        assert!(!wall.deflect(&mut p));
        assert_eq!(p.velocity.x, 0.4);
    }

    #[test]
    fn thermal_hot_wall_resets_speed_into_target_band() {
        let walls = ThermalWalls {
            hot_speed: 5.0,
            cold_speed: 1.0,
            jitter: 0.2,
        };
        let policy = BoundaryPolicy::Thermal(walls);
        let mut rng = StdRng::seed_from_u64(42);
        let state = PolicyState::default();

        let mut p = particle(0.5, 50.0, -0.05, 0.0, 1.0);
        assert!(policy.apply(&mut p, extent(), &state, &mut rng));
        assert!(p.velocity.x > 0.0, "must leave the hot wall");
        let speed = p.speed();
        assert!(
            (4.0..=6.0).contains(&speed),
            "speed {} outside hot target band",
            speed
        );
    }

    #[test]
    fn thermal_cold_wall_resets_speed_into_target_band() {
        let walls = ThermalWalls {
            hot_speed: 5.0,
            cold_speed: 1.0,
            jitter: 0.2,
        };
        let policy = BoundaryPolicy::Thermal(walls);
        let mut rng = StdRng::seed_from_u64(42);
        let state = PolicyState::default();

        let mut p = particle(99.5, 50.0, 4.0, 0.0, 1.0);
        assert!(policy.apply(&mut p, extent(), &state, &mut rng));
        assert!(p.velocity.x < 0.0, "must leave the cold wall");
        let speed = p.speed();
        assert!(
            (0.8..=1.2).contains(&speed),
            "speed {} outside cold target band",
            speed
        );
    }

    #[test]
    fn shear_wall_imposes_tangential_velocity() {
        let policy = BoundaryPolicy::Shear(ShearWall { wall_speed: 10.0 });
        let mut rng = StdRng::seed_from_u64(1);
        let state = PolicyState::default();

        let mut p = particle(50.0, 0.5, -0.3, -0.2, 1.0);
        assert!(policy.apply(&mut p, extent(), &state, &mut rng));
        assert_eq!(p.velocity.x, 10.0);
        assert!(p.velocity.y > 0.0);
        assert_eq!(p.position.y, 1.0);
    }

    #[test]
    fn partition_must_fit_inside_the_container() {
        let wall = PartitionWall {
            x: 1.0,
            thickness: 4.0,
            duration_ms: 1000,
        };
        assert!(BoundaryPolicy::Partition(wall).validate(100.0).is_err());
    }
}
