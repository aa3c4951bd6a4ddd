/*
 * Application Module
 *
 * This module defines the main application model and logic for the
 * particle simulation. It owns the simulation core, the UI state, and
 * the simulation clock, which only advances while the run is unpaused.
 */

use std::time::Duration;

use log::warn;
use nannou::prelude::*;
use nannou_egui::Egui;

use crate::debug::DebugInfo;
use crate::params::SimulationParams;
use crate::renderer;
use crate::sim::{Simulation, StepStats};
use crate::ui::{self, VariantChoice};

// Main model for the application
pub struct Model {
    pub sim: Simulation,
    // UI-editable copy of the configuration; applied on reset
    pub params: SimulationParams,
    pub variant: VariantChoice,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    // Elapsed simulation time, frozen while paused
    pub sim_time: Duration,
    pub last_stats: StepStats,
}

// Initialize the model
pub fn model(app: &App) -> Model {
    // Get the primary monitor's dimensions
    let monitor = app.primary_monitor().expect("Failed to get primary monitor");
    let monitor_size = monitor.size();

    // Calculate window size based on monitor size (80% of monitor size)
    let window_width = monitor_size.width as f32 * 0.8;
    let window_height = monitor_size.height as f32 * 0.8;

    // Create the main window with dynamic size
    let window_id = app
        .new_window()
        .title("Molecular Motion Simulation")
        .size(window_width as u32, window_height as u32)
        .view(renderer::view)
        .raw_event(raw_window_event)
        .build()
        .unwrap();

    // Get the window
    let window = app.window(window_id).unwrap();

    // Create the UI
    let egui = Egui::from_window(&window);

    let variant = VariantChoice::Reflect;
    let params = variant.preset();
    let sim = Simulation::new(params.clone()).expect("default configuration must be valid");

    Model {
        sim,
        params,
        variant,
        egui,
        debug_info: DebugInfo::default(),
        sim_time: Duration::ZERO,
        last_stats: StepStats::default(),
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    // Update debug info
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    let (reset_requested, variant_changed) = ui::update_ui(
        &mut model.egui,
        &mut model.params,
        &mut model.variant,
        &model.debug_info,
    );

    if variant_changed {
        // Swap in the scenario preset, keeping the session flags
        let show_debug = model.params.show_debug;
        let pause_simulation = model.params.pause_simulation;
        model.params = model.variant.preset();
        model.params.show_debug = show_debug;
        model.params.pause_simulation = pause_simulation;
    }

    if reset_requested
        || variant_changed
        || model.params.num_particles != model.sim.params.num_particles
    {
        rebuild_simulation(model);
    }

    // Only advance the simulation if it is not paused
    if !model.params.pause_simulation {
        model.sim_time += update.since_last;
        let elapsed_ms = model.sim_time.as_millis() as u64;

        let stats = model.sim.step(elapsed_ms);
        model.last_stats = stats;
        model.debug_info.record(&stats);
    }
}

// Rebuild the simulation from the UI-edited configuration
fn rebuild_simulation(model: &mut Model) {
    match Simulation::new(model.params.clone()) {
        Ok(sim) => {
            model.sim = sim;
            model.sim_time = Duration::ZERO;
            model.last_stats = StepStats::default();
        }
        Err(err) => warn!("reset rejected: {}", err),
    }
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
