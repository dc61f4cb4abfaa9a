//! Statistical and spectral analysis functions

/// Samples at or below this magnitude are treated as exact zeros
pub const ZERO_CROSSING_THRESHOLD: f32 = 1e-10;

/// Arithmetic mean, 0.0 for an empty slice
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Population standard deviation (divides by N), 0.0 for an empty slice
pub fn std_dev(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }

    let mu = mean(data);
    let variance = data.iter().map(|x| (x - mu) * (x - mu)).sum::<f64>() / data.len() as f64;
    variance.sqrt()
}

/// Compute RMS (Root Mean Square)
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }

    let sum_sq: f64 = samples.iter().map(|&s| s as f64 * s as f64).sum();
    (sum_sq / samples.len() as f64).sqrt() as f32
}

/// Zero-crossing rate of one frame.
///
/// Adjacent samples are compared by sign bit after near-zero values are
/// snapped to zero, so zero counts as positive. The count is divided by the
/// frame length.
pub fn zero_crossing_rate(frame: &[f32]) -> f32 {
    if frame.is_empty() {
        return 0.0;
    }

    let negative = |s: f32| s.abs() > ZERO_CROSSING_THRESHOLD && s < 0.0;
    let crossings = frame
        .windows(2)
        .filter(|w| negative(w[0]) != negative(w[1]))
        .count();

    crossings as f32 / frame.len() as f32
}

/// Compute spectral centroid (brightness measure).
///
/// Returns 0.0 for a silent frame.
pub fn spectral_centroid(magnitudes: &[f32], frequencies: &[f32]) -> f32 {
    let total: f64 = magnitudes.iter().map(|&m| m as f64).sum();
    if total < f32::MIN_POSITIVE as f64 {
        return 0.0;
    }

    let weighted: f64 = magnitudes
        .iter()
        .zip(frequencies)
        .map(|(&m, &f)| m as f64 * f as f64)
        .sum();

    (weighted / total) as f32
}

/// Compute spectral rolloff: the lowest frequency at which the cumulative
/// magnitude reaches `percentile` of the frame total
pub fn spectral_rolloff(magnitudes: &[f32], frequencies: &[f32], percentile: f32) -> f32 {
    let total: f64 = magnitudes.iter().map(|&m| m as f64).sum();
    let threshold = percentile as f64 * total;

    let mut cumulative = 0.0f64;
    for (&m, &f) in magnitudes.iter().zip(frequencies) {
        cumulative += m as f64;
        if cumulative >= threshold {
            return f;
        }
    }

    frequencies.last().copied().unwrap_or(0.0)
}

/// Whether bin `i` is a local maximum along the spectrum.
///
/// A bin must be strictly greater than its lower neighbour and at least as
/// large as its upper neighbour; edge bins compare against themselves.
pub fn is_local_max(values: &[f32], i: usize) -> bool {
    let current = values[i];
    let below = if i == 0 { current } else { values[i - 1] };
    let above = values.get(i + 1).copied().unwrap_or(current);
    current > below && current >= above
}
