/*
 * Molecular Motion Simulation
 *
 * This application simulates a 2D population of circular particles
 * undergoing elastic collisions with each other and with the container
 * boundaries. Five boundary scenarios share one engine:
 * 1. Reflecting walls
 * 2. Temporary internal partition
 * 3. Thermal (hot/cold) walls
 * 4. Shear flow with a moving wall
 * 5. Gradual speed ramp
 */

use molsim::app;

fn main() {
    env_logger::init();

    nannou::app(app::model).update(app::update).run();
}
