/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct holding the full,
 * immutable configuration of a simulation run: container extent,
 * population, radius and speed ranges, grid cell size, the boundary
 * policy variant, and the optional warm-up speed ramp.
 *
 * Malformed configurations are rejected by validate() before a run
 * starts; there is no recovery mid-run.
 */

use crate::boundary::{BoundaryPolicy, PartitionWall, ShearWall, SpeedRamp, ThermalWalls};
use crate::error::{Error, Result};

// Safety factor on the derived cell size, keeping diameter and per-step
// displacement inside one cell with room for float drift.
const CELL_SIZE_MARGIN: f64 = 1.1;

#[derive(Debug, Clone)]
pub struct SimulationParams {
    pub container_width: f64,
    pub container_height: f64,
    pub num_particles: usize,
    pub min_radius: f64,
    pub max_radius: f64,
    // Initial speed magnitude range; direction is uniform random
    pub min_speed: f64,
    pub max_speed: f64,
    // Grid cell size override; derived from radius and speed bounds if None
    pub cell_size: Option<f64>,
    pub policy: BoundaryPolicy,
    pub ramp: Option<SpeedRamp>,
    // Fixed RNG seed for reproducible runs; None seeds from entropy
    pub seed: Option<u64>,
    pub show_debug: bool,
    pub pause_simulation: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            container_width: 1920.0,
            container_height: 1080.0,
            num_particles: 2500,
            min_radius: 1.0,
            max_radius: 5.0,
            min_speed: 0.0,
            max_speed: 5.0,
            cell_size: None,
            policy: BoundaryPolicy::Reflect,
            ramp: None,
            seed: None,
            show_debug: false,
            pause_simulation: false,
        }
    }
}

impl SimulationParams {
    // Free elastic motion in a reflecting box
    pub fn reflect_demo() -> Self {
        Self::default()
    }

    // Gas released from both sides of a temporary central wall
    pub fn partition_demo() -> Self {
        Self {
            policy: BoundaryPolicy::Partition(PartitionWall {
                x: 960.0,
                thickness: 4.0,
                duration_ms: 15_000,
            }),
            ..Self::default()
        }
    }

    // Heat conduction between a hot and a cold wall
    pub fn thermal_demo() -> Self {
        Self {
            num_particles: 1000,
            min_radius: 2.0,
            max_radius: 4.0,
            min_speed: 0.08,
            max_speed: 0.12,
            policy: BoundaryPolicy::Thermal(ThermalWalls {
                hot_speed: 5.0,
                cold_speed: 1.0,
                jitter: 0.2,
            }),
            ..Self::default()
        }
    }

    // Couette flow driven by a moving top wall
    pub fn shear_demo() -> Self {
        Self {
            num_particles: 5000,
            min_radius: 2.0,
            max_radius: 5.0,
            min_speed: 0.0,
            max_speed: 0.5,
            policy: BoundaryPolicy::Shear(ShearWall { wall_speed: 10.0 }),
            ..Self::default()
        }
    }

    // Gradual warm-up from near standstill to double speed
    pub fn ramp_demo() -> Self {
        Self {
            ramp: Some(SpeedRamp {
                initial_multiplier: 0.001,
                final_multiplier: 2.0,
                duration_ms: 1_000_000,
            }),
            ..Self::default()
        }
    }

    // Cell size actually used by the grid: the configured override, or a
    // size derived so neither a diameter nor a per-step displacement can
    // span more than one cell.
    pub fn grid_cell_size(&self) -> f64 {
        match self.cell_size {
            Some(size) => size,
            None => {
                let max_multiplier = self
                    .ramp
                    .map_or(1.0, |r| r.initial_multiplier.max(r.final_multiplier));
                (2.0 * self.max_radius).max(self.max_speed * max_multiplier) * CELL_SIZE_MARGIN
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.container_width.is_finite() || self.container_width <= 0.0 {
            return Err(Error::InvalidParam("container width must be > 0".into()));
        }
        if !self.container_height.is_finite() || self.container_height <= 0.0 {
            return Err(Error::InvalidParam("container height must be > 0".into()));
        }
        if self.num_particles == 0 {
            return Err(Error::InvalidParam("particle count must be > 0".into()));
        }
        if !self.min_radius.is_finite() || self.min_radius <= 0.0 {
            return Err(Error::InvalidParam("minimum radius must be > 0".into()));
        }
        if !self.max_radius.is_finite() || self.max_radius < self.min_radius {
            return Err(Error::InvalidParam(
                "radius range must satisfy 0 < min <= max".into(),
            ));
        }
        if self.container_width <= 2.0 * self.max_radius
            || self.container_height <= 2.0 * self.max_radius
        {
            return Err(Error::InvalidParam(
                "container must be larger than one particle diameter".into(),
            ));
        }
        if !self.min_speed.is_finite() || self.min_speed < 0.0 {
            return Err(Error::InvalidParam("minimum speed must be >= 0".into()));
        }
        if !self.max_speed.is_finite() || self.max_speed < self.min_speed {
            return Err(Error::InvalidParam(
                "speed range must satisfy 0 <= min <= max".into(),
            ));
        }
        if let Some(size) = self.cell_size {
            if !size.is_finite() || size <= 0.0 {
                return Err(Error::InvalidParam("cell size must be > 0".into()));
            }
            if size < 2.0 * self.max_radius {
                return Err(Error::InvalidParam(format!(
                    "cell size {} is below the maximum particle diameter {}",
                    size,
                    2.0 * self.max_radius
                )));
            }
        }
        if let Some(ramp) = &self.ramp {
            if !ramp.initial_multiplier.is_finite()
                || !ramp.final_multiplier.is_finite()
                || ramp.initial_multiplier <= 0.0
                || ramp.final_multiplier <= 0.0
            {
                return Err(Error::InvalidParam(
                    "ramp multipliers must be finite and > 0".into(),
                ));
            }
        }
        self.policy.validate(self.container_width)
    }

    // Parameter ranges for UI sliders
    pub fn get_num_particles_range() -> std::ops::RangeInclusive<usize> {
        10..=10000
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::PolicyState;

    #[test]
    fn presets_are_valid() {
        for params in [
            SimulationParams::reflect_demo(),
            SimulationParams::partition_demo(),
            SimulationParams::thermal_demo(),
            SimulationParams::shear_demo(),
            SimulationParams::ramp_demo(),
        ] {
            params.validate().expect("preset must validate");
        }
    }

    #[test]
    fn zero_particles_rejected() {
        let params = SimulationParams {
            num_particles: 0,
            ..SimulationParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn inverted_radius_range_rejected() {
        let params = SimulationParams {
            min_radius: 5.0,
            max_radius: 1.0,
            ..SimulationParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn non_positive_cell_size_rejected() {
        let params = SimulationParams {
            cell_size: Some(0.0),
            ..SimulationParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn undersized_cell_rejected() {
        // A cell smaller than one diameter would miss contacts
        let params = SimulationParams {
            cell_size: Some(5.0),
            ..SimulationParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn derived_cell_size_covers_diameter_and_step() {
        let params = SimulationParams::default();
        let size = params.grid_cell_size();
        assert!(size >= 2.0 * params.max_radius);
        assert!(size >= params.max_speed);
    }

    #[test]
    fn derived_cell_size_accounts_for_the_ramp() {
        let params = SimulationParams::ramp_demo();
        assert!(params.grid_cell_size() >= params.max_speed * 2.0);
    }

    #[test]
    fn policy_state_interpolates_the_ramp() {
        let params = SimulationParams {
            ramp: Some(SpeedRamp {
                initial_multiplier: 1.0,
                final_multiplier: 3.0,
                duration_ms: 1000,
            }),
            ..SimulationParams::default()
        };
        assert_eq!(PolicyState::at(0, &params).speed_multiplier, 1.0);
        assert_eq!(PolicyState::at(500, &params).speed_multiplier, 2.0);
        assert_eq!(PolicyState::at(1000, &params).speed_multiplier, 3.0);
        assert_eq!(PolicyState::at(90_000, &params).speed_multiplier, 3.0);
    }

    #[test]
    fn policy_state_without_ramp_is_unit() {
        let params = SimulationParams::default();
        assert_eq!(PolicyState::at(12_345, &params).speed_multiplier, 1.0);
    }

    #[test]
    fn policy_state_tracks_partition_expiry() {
        let params = SimulationParams::partition_demo();
        assert!(PolicyState::at(0, &params).partition_active);
        assert!(PolicyState::at(14_999, &params).partition_active);
        assert!(!PolicyState::at(15_000, &params).partition_active);
    }
}
