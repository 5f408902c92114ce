//! White-to-red gradient driven by each bar's value within its frame.

/// Relative intensity of `value` within `[min, max]`, in `[0, 1]`.
///
/// When `max == min` every bar is equally (un)interesting, so intensity is
/// defined as 0 rather than dividing by zero.
pub fn intensity(value: f64, min: f64, max: f64) -> f64 {
    if max <= min {
        0.0
    } else {
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    }
}

/// Maps an intensity to an RGB triple on the white-to-red gradient: the red
/// channel stays saturated while green and blue fade with intensity.
pub fn gradient_rgb(intensity: f64) -> (u8, u8, u8) {
    let fade = (255.0 * (1.0 - intensity.clamp(0.0, 1.0))).round() as u8;
    (255, fade, fade)
}
