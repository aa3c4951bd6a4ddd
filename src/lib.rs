/*
 * Molecular Motion Simulation - Module Definitions
 *
 * This file defines the module structure for the particle simulation.
 * The core (particles, spatial grid, boundary policies, step
 * orchestration) is render-agnostic; the nannou-facing glue lives in
 * app, renderer, and ui.
 */

// Re-export key components for easier access
pub use boundary::{BoundaryPolicy, PartitionWall, PolicyState, ShearWall, SpeedRamp, ThermalWalls};
pub use error::{Error, Result};
pub use params::SimulationParams;
pub use particle::{PairOutcome, Particle};
pub use sim::{Simulation, StepStats};
pub use spatial_grid::SpatialGrid;

// Define modules
pub mod app;
pub mod boundary;
pub mod debug;
pub mod error;
pub mod palette;
pub mod params;
pub mod particle;
pub mod renderer;
pub mod sim;
pub mod spatial_grid;
pub mod ui;
