//! Window function implementations

use std::f32::consts::PI;

/// Periodic Hann window of `size` coefficients.
///
/// Periodic windows divide by `size` rather than `size - 1`, so that
/// overlapping frames tile without a duplicated endpoint.
pub fn hann_window(size: usize) -> Vec<f32> {
    let n = size as f32;
    (0..size)
        .map(|i| 0.5 - 0.5 * (2.0 * PI * i as f32 / n).cos())
        .collect()
}
