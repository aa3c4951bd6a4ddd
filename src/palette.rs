/*
 * Palette Module
 *
 * Speed-to-color mapping for thermal diagnostics: a three-segment linear
 * blend across blue, green, yellow, and red over a configured speed range.
 */

const BLUE: [u8; 3] = [0, 0, 255];
const GREEN: [u8; 3] = [0, 255, 0];
const YELLOW: [u8; 3] = [255, 255, 0];
const RED: [u8; 3] = [255, 0, 0];

fn lerp_color(from: [u8; 3], to: [u8; 3], t: f64) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    let mut out = [0u8; 3];
    for channel in 0..3 {
        out[channel] =
            (from[channel] as f64 + (to[channel] as f64 - from[channel] as f64) * t) as u8;
    }
    out
}

// Map a speed onto the blue->green->yellow->red palette, clamped to the
// given range. A degenerate range maps everything to green.
pub fn speed_color(speed: f64, min_speed: f64, max_speed: f64) -> [u8; 3] {
    if max_speed <= min_speed {
        return GREEN;
    }
    let normalized = ((speed - min_speed) / (max_speed - min_speed)).clamp(0.0, 1.0);

    if normalized < 0.33 {
        lerp_color(BLUE, GREEN, normalized / 0.33)
    } else if normalized < 0.66 {
        lerp_color(GREEN, YELLOW, (normalized - 0.33) / 0.33)
    } else {
        lerp_color(YELLOW, RED, (normalized - 0.66) / 0.34)
    }
}
