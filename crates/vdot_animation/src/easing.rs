//! Easing helpers
//!
//! Pure functions that split one global progress value into per-segment
//! factors. A glyph with `n` strokes grows stroke `i` only while progress is
//! inside `[i/n, (i+1)/n]`, giving a staggered draw-in.

use std::f32::consts::PI;

/// Progress left over once segment `i` of `n` has started, floored at zero
pub fn clamped_remainder(progress: f32, i: usize, n: usize) -> f32 {
    (progress - i as f32 / n as f32).max(0.0)
}

/// Segment `i`'s share of `progress` across `n` equal segments
///
/// Zero until progress reaches `i/n`, linear inside the segment, saturating
/// at 1 once progress passes `(i+1)/n`.
pub fn segment_share(progress: f32, i: usize, n: usize) -> f32 {
    let n_f = n as f32;
    (1.0 / n_f).min(clamped_remainder(progress, i, n)) * n_f
}

/// Sine envelope: 0 at 0, 1 at 0.5, back to 0 at 1
pub fn envelope(progress: f32) -> f32 {
    (progress * PI).sin()
}
