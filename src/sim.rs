/*
 * Simulation Module
 *
 * This module orchestrates one discrete time step over the particle
 * population:
 * 1. Compute the per-step policy state from elapsed time
 * 2. For every particle: integrate, apply the boundary policy, insert
 *    into the spatial grid
 * 3. Resolve every unique close-contact pair exactly once against the
 *    fully rebuilt grid
 *
 * The population is a dense vector with stable indices, so a pair is
 * identified by (min(i, j), max(i, j)) and deduplicated per step.
 */

use std::collections::HashSet;

use glam::DVec2;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::boundary::{BoundaryPolicy, PolicyState};
use crate::error::{Error, Result};
use crate::params::SimulationParams;
use crate::particle::{PairOutcome, Particle};
use crate::spatial_grid::SpatialGrid;

// Placement retries per particle before giving up on a clear spot
const PLACEMENT_ATTEMPTS: usize = 20;

// Per-step counters consumed by the debug overlay and by tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepStats {
    pub wall_hits: usize,
    pub pairs_examined: usize,
    pub collisions: usize,
    pub degenerate_pairs: usize,
    pub speed_multiplier: f64,
    pub partition_active: bool,
}

impl Default for StepStats {
    fn default() -> Self {
        Self {
            wall_hits: 0,
            pairs_examined: 0,
            collisions: 0,
            degenerate_pairs: 0,
            speed_multiplier: 1.0,
            partition_active: false,
        }
    }
}

pub struct Simulation {
    pub params: SimulationParams,
    pub particles: Vec<Particle>,
    grid: SpatialGrid,
    rng: StdRng,
    // Reused across steps to avoid reallocation
    processed_pairs: HashSet<(usize, usize)>,
}

impl Simulation {
    pub fn new(params: SimulationParams) -> Result<Self> {
        params.validate()?;

        let mut rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let particles = spawn_particles(&params, &mut rng)?;
        let grid = SpatialGrid::new(
            params.container_width,
            params.container_height,
            params.grid_cell_size(),
        );

        info!(
            "simulation ready: {} particles in {}x{}, {}x{} grid cells of {:.1}",
            particles.len(),
            params.container_width,
            params.container_height,
            grid.cols,
            grid.rows,
            grid.cell_size
        );

        Ok(Self {
            params,
            particles,
            grid,
            rng,
            processed_pairs: HashSet::new(),
        })
    }

    pub fn extent(&self) -> DVec2 {
        DVec2::new(self.params.container_width, self.params.container_height)
    }

    // Advance the simulation by one step at the given elapsed wall time.
    pub fn step(&mut self, elapsed_ms: u64) -> StepStats {
        let state = PolicyState::at(elapsed_ms, &self.params);
        let extent = self.extent();
        let mut stats = StepStats {
            speed_multiplier: state.speed_multiplier,
            partition_active: state.partition_active,
            ..StepStats::default()
        };

        // Move, bounce, and re-index every particle before any pair is
        // resolved, so collision math always runs against the complete
        // post-move grid.
        self.grid.clear();
        for (index, particle) in self.particles.iter_mut().enumerate() {
            particle.integrate(state.speed_multiplier);
            if self
                .params
                .policy
                .apply(particle, extent, &state, &mut self.rng)
            {
                stats.wall_hits += 1;
            }
            self.grid.insert(index, particle.position);
        }

        // Resolve each unordered neighbor pair at most once; resolving a
        // pair twice would double-apply the impulse.
        self.processed_pairs.clear();
        for i in 0..self.particles.len() {
            let position = self.particles[i].position;
            for j in self.grid.nearby_indices(i, position) {
                let key = (i.min(j), i.max(j));
                if !self.processed_pairs.insert(key) {
                    continue;
                }
                stats.pairs_examined += 1;

                let (first, second) = pair_mut(&mut self.particles, i, j);
                match first.collide_with(second) {
                    PairOutcome::Resolved => stats.collisions += 1,
                    PairOutcome::Degenerate => stats.degenerate_pairs += 1,
                    PairOutcome::Clear | PairOutcome::Separating => {}
                }
            }
        }

        if stats.degenerate_pairs > 0 {
            warn!(
                "{} coincident pairs skipped this step",
                stats.degenerate_pairs
            );
        }

        stats
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.particles
            .iter()
            .map(|p| 0.5 * p.mass * p.velocity.length_squared())
            .sum()
    }

    pub fn momentum(&self) -> DVec2 {
        self.particles
            .iter()
            .fold(DVec2::ZERO, |acc, p| acc + p.velocity * p.mass)
    }
}

// Mutable references to two distinct particles of the population.
fn pair_mut(particles: &mut [Particle], i: usize, j: usize) -> (&mut Particle, &mut Particle) {
    debug_assert_ne!(i, j);
    if i < j {
        let (head, tail) = particles.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = particles.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}

fn spawn_particles(params: &SimulationParams, rng: &mut StdRng) -> Result<Vec<Particle>> {
    let mut particles = Vec::with_capacity(params.num_particles);

    for _ in 0..params.num_particles {
        let radius = rng.gen_range(params.min_radius..=params.max_radius);
        let position = place_clear_of_partition(params, radius, rng)?;

        let speed = rng.gen_range(params.min_speed..=params.max_speed);
        let angle = rng.gen_range(0.0..std::f64::consts::TAU);
        let velocity = DVec2::new(angle.cos(), angle.sin()) * speed;

        particles.push(Particle::new(position, velocity, radius));
    }

    Ok(particles)
}

// Random in-bounds position, resampled while it would overlap a partition
// that is active at the start of the run.
fn place_clear_of_partition(
    params: &SimulationParams,
    radius: f64,
    rng: &mut StdRng,
) -> Result<DVec2> {
    let active_partition = match &params.policy {
        BoundaryPolicy::Partition(wall) if wall.duration_ms > 0 => Some(*wall),
        _ => None,
    };

    for _ in 0..PLACEMENT_ATTEMPTS {
        let x = rng.gen_range(radius..=(params.container_width - radius));
        let y = rng.gen_range(radius..=(params.container_height - radius));

        match active_partition {
            Some(wall) if wall.overlaps(x, radius) => continue,
            _ => return Ok(DVec2::new(x, y)),
        }
    }

    Err(Error::Placement(format!(
        "no spot clear of the partition for radius {} after {} attempts",
        radius, PLACEMENT_ATTEMPTS
    )))
}
