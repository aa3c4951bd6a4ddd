/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that contains performance
 * metrics and per-step simulation counters to be displayed in the UI.
 */

use std::time::Duration;

use crate::sim::StepStats;

// Debug information to display
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub wall_hits: usize,
    pub collisions: usize,
    pub pairs_examined: usize,
    pub degenerate_pairs: usize,
    pub speed_multiplier: f64,
    pub partition_active: bool,
}

impl Default for DebugInfo {
    fn default() -> Self {
        Self {
            fps: 0.0,
            frame_time: Duration::ZERO,
            wall_hits: 0,
            collisions: 0,
            pairs_examined: 0,
            degenerate_pairs: 0,
            speed_multiplier: 1.0,
            partition_active: false,
        }
    }
}

impl DebugInfo {
    // Copy the latest step counters into the overlay state
    pub fn record(&mut self, stats: &StepStats) {
        self.wall_hits = stats.wall_hits;
        self.collisions = stats.collisions;
        self.pairs_examined = stats.pairs_examined;
        self.degenerate_pairs = stats.degenerate_pairs;
        self.speed_multiplier = stats.speed_multiplier;
        self.partition_active = stats.partition_active;
    }
}
