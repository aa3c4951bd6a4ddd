/*
 * UI Module
 *
 * This module contains functions for creating and updating the user
 * interface using nannou_egui. It provides the scenario picker, the
 * population slider, and the debug overlay text.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::SimulationParams;

// The five boundary scenarios selectable from the UI. A scenario is fixed
// for a run; switching rebuilds the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantChoice {
    Reflect,
    Partition,
    Thermal,
    Shear,
    Ramp,
}

impl VariantChoice {
    pub fn all() -> [VariantChoice; 5] {
        [
            VariantChoice::Reflect,
            VariantChoice::Partition,
            VariantChoice::Thermal,
            VariantChoice::Shear,
            VariantChoice::Ramp,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            VariantChoice::Reflect => "Reflecting walls",
            VariantChoice::Partition => "Temporary partition",
            VariantChoice::Thermal => "Thermal walls",
            VariantChoice::Shear => "Shear flow",
            VariantChoice::Ramp => "Speed ramp",
        }
    }

    pub fn preset(self) -> SimulationParams {
        match self {
            VariantChoice::Reflect => SimulationParams::reflect_demo(),
            VariantChoice::Partition => SimulationParams::partition_demo(),
            VariantChoice::Thermal => SimulationParams::thermal_demo(),
            VariantChoice::Shear => SimulationParams::shear_demo(),
            VariantChoice::Ramp => SimulationParams::ramp_demo(),
        }
    }
}

// Update the UI and return whether a reset was requested and whether the
// scenario selection changed.
pub fn update_ui(
    egui: &mut Egui,
    params: &mut SimulationParams,
    variant: &mut VariantChoice,
    debug_info: &DebugInfo,
) -> (bool, bool) {
    let mut reset_requested = false;
    let previous_variant = *variant;

    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Scenario", |ui| {
                for choice in VariantChoice::all() {
                    ui.radio_value(variant, choice, choice.label());
                }
            });

            ui.collapsing("Population", |ui| {
                ui.add(
                    egui::Slider::new(
                        &mut params.num_particles,
                        SimulationParams::get_num_particles_range(),
                    )
                    .text("Number of Particles"),
                );

                if ui.button("Reset Particles").clicked() {
                    reset_requested = true;
                }
            });

            ui.checkbox(&mut params.show_debug, "Show Debug Info");
            ui.checkbox(&mut params.pause_simulation, "Pause Simulation");

            ui.separator();
            ui.label(format!("FPS: {:.1}", debug_info.fps));
            ui.label(format!("Collisions/step: {}", debug_info.collisions));
        });

    (reset_requested, *variant != previous_variant)
}

// Draw debug information on the screen
pub fn draw_debug_info(
    draw: &nannou::Draw,
    debug_info: &DebugInfo,
    window_rect: nannou::geom::Rect,
    num_particles: usize,
) {
    let margin = 20.0;
    let line_height = 20.0;
    let panel_width = 240.0;
    let panel_height = line_height * 8.0 + margin;
    let panel_x = window_rect.left() + panel_width / 2.0;
    let panel_y = window_rect.top() - panel_height / 2.0;

    // Background panel in the top-left corner
    draw.rect()
        .x_y(panel_x, panel_y)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let text_x = window_rect.left() + margin;
    let text_y = window_rect.top() - margin;

    let debug_texts = [
        format!("FPS: {:.1}", debug_info.fps),
        format!(
            "Frame time: {:.2} ms",
            debug_info.frame_time.as_secs_f64() * 1000.0
        ),
        format!("Particles: {}", num_particles),
        format!("Wall hits/step: {}", debug_info.wall_hits),
        format!("Pairs examined/step: {}", debug_info.pairs_examined),
        format!("Collisions/step: {}", debug_info.collisions),
        format!("Speed multiplier: {:.3}", debug_info.speed_multiplier),
        format!(
            "Partition: {}",
            if debug_info.partition_active {
                "active"
            } else {
                "off"
            }
        ),
    ];

    for (i, text) in debug_texts.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);

        draw.text(text)
            .x_y(text_x + 80.0, y)
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
