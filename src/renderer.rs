/*
 * Renderer Module
 *
 * This module handles the rendering of the particle simulation.
 * It draws the container walls, the active partition, and one circle per
 * particle. Thermal runs color particles by speed; all other runs flash
 * the collision color on contact.
 */

use nannou::prelude::*;

use crate::app::Model;
use crate::boundary::BoundaryPolicy;
use crate::palette;
use crate::ui;

// Maps simulation space ([0, width] x [0, height], y down) onto the
// window, centered and uniformly scaled.
struct Viewport {
    scale: f32,
    half_width: f32,
    half_height: f32,
}

impl Viewport {
    fn new(container_width: f64, container_height: f64, window_rect: Rect) -> Self {
        let width = container_width as f32;
        let height = container_height as f32;
        let scale = (window_rect.w() / width).min(window_rect.h() / height);
        Self {
            scale,
            half_width: width / 2.0,
            half_height: height / 2.0,
        }
    }

    fn to_screen(&self, x: f64, y: f64) -> Point2 {
        pt2(
            (x as f32 - self.half_width) * self.scale,
            (self.half_height - y as f32) * self.scale,
        )
    }
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let params = &model.sim.params;

    // Thermal runs use a dark background so the speed palette reads well
    let dark_background = matches!(params.policy, BoundaryPolicy::Thermal(_));
    if dark_background {
        draw.background().color(rgb(20u8, 20, 20));
    } else {
        draw.background().color(WHITE);
    }

    let window_rect = app.window_rect();
    let viewport = Viewport::new(params.container_width, params.container_height, window_rect);

    draw_walls(&draw, model, &viewport);

    if model.last_stats.partition_active {
        if let BoundaryPolicy::Partition(wall) = &params.policy {
            let top = viewport.to_screen(wall.x, 0.0);
            let bottom = viewport.to_screen(wall.x, params.container_height);
            draw.line()
                .start(top)
                .end(bottom)
                .weight((wall.thickness as f32 * viewport.scale).max(1.0))
                .color(rgb(0u8, 255, 0));
        }
    }

    for particle in &model.sim.particles {
        let color = particle_color(&params.policy, particle.speed(), particle.colliding);
        draw.ellipse()
            .xy(viewport.to_screen(particle.position.x, particle.position.y))
            .radius((particle.radius as f32 * viewport.scale).max(1.0))
            .color(rgb(color[0], color[1], color[2]));
    }

    if params.show_debug {
        ui::draw_debug_info(
            &draw,
            &model.debug_info,
            window_rect,
            model.sim.particles.len(),
        );
    }

    draw.to_frame(app, &frame).unwrap();

    // Draw the egui UI
    model.egui.draw_to_frame(&frame).unwrap();
}

fn particle_color(policy: &BoundaryPolicy, speed: f64, colliding: bool) -> [u8; 3] {
    match policy {
        // Thermal diagnostics: palette spans the cold and hot wall targets
        BoundaryPolicy::Thermal(walls) => {
            palette::speed_color(speed, walls.cold_speed, walls.hot_speed)
        }
        _ => {
            if colliding {
                [255, 0, 0]
            } else {
                [0, 0, 255]
            }
        }
    }
}

fn draw_walls(draw: &Draw, model: &Model, viewport: &Viewport) {
    let params = &model.sim.params;
    let width = params.container_width;
    let height = params.container_height;

    let top_left = viewport.to_screen(0.0, 0.0);
    let top_right = viewport.to_screen(width, 0.0);
    let bottom_left = viewport.to_screen(0.0, height);
    let bottom_right = viewport.to_screen(width, height);

    match &params.policy {
        BoundaryPolicy::Thermal(_) => {
            // Hot left wall, cold right wall, grey insulating lids
            draw.line()
                .start(top_left)
                .end(bottom_left)
                .weight(5.0)
                .color(rgb(255u8, 50, 0));
            draw.line()
                .start(top_right)
                .end(bottom_right)
                .weight(5.0)
                .color(rgb(0u8, 100, 255));
            draw.line()
                .start(top_left)
                .end(top_right)
                .weight(5.0)
                .color(rgb(150u8, 150, 150));
            draw.line()
                .start(bottom_left)
                .end(bottom_right)
                .weight(5.0)
                .color(rgb(150u8, 150, 150));
        }
        BoundaryPolicy::Shear(_) => {
            // Highlight the moving wall
            draw.line()
                .start(top_left)
                .end(top_right)
                .weight(5.0)
                .color(rgb(100u8, 100, 100));
            for (start, end) in [
                (top_left, bottom_left),
                (top_right, bottom_right),
                (bottom_left, bottom_right),
            ] {
                draw.line().start(start).end(end).weight(2.0).color(BLACK);
            }
        }
        _ => {
            let container = Rect::from_corners(bottom_left, top_right);
            draw.rect()
                .xy(container.xy())
                .wh(container.wh())
                .no_fill()
                .stroke_weight(2.0)
                .stroke(BLACK);
        }
    }
}
