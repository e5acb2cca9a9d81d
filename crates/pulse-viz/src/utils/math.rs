//! Range mapping helpers shared by the engine and the visual modes.

/// Linearly maps `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// The input is clamped to its domain first, so the output never leaves
/// the target range. A zero-width input domain maps to `out_min`.
pub fn map_clamped(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    let span = in_max - in_min;
    if span.abs() <= f32::EPSILON || value.is_nan() {
        return out_min;
    }
    let (lo, hi) = if in_min < in_max {
        (in_min, in_max)
    } else {
        (in_max, in_min)
    };
    let t = (value.clamp(lo, hi) - in_min) / span;
    out_min + (out_max - out_min) * t
}

/// Maps a 0-255 amplitude onto `[out_min, out_max]`
pub fn map_amp(amp: f32, out_min: f32, out_max: f32) -> f32 {
    map_clamped(amp, 0.0, pulse_viz_api::MAX_AMPLITUDE, out_min, out_max)
}

/// Fraction `i / n` for a discrete position, as a float
pub fn fraction(i: usize, n: usize) -> f32 {
    if n == 0 {
        0.0
    } else {
        i as f32 / n as f32
    }
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
