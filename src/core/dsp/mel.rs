//! Mel filterbank, decibel scaling and the DCT used for cepstral analysis
//!
//! The filterbank uses the Slaney mel scale (linear below 1 kHz, logarithmic
//! above) with triangular filters normalized to unit area.

use std::f64::consts::PI;

/// Floor applied before taking logarithms
pub const AMIN: f32 = 1e-10;

/// Dynamic range kept by [`power_to_db`]
pub const TOP_DB: f32 = 80.0;

const F_SP: f64 = 200.0 / 3.0;
const MIN_LOG_HZ: f64 = 1000.0;
const MIN_LOG_MEL: f64 = MIN_LOG_HZ / F_SP;

fn log_step() -> f64 {
    6.4f64.ln() / 27.0
}

/// Convert frequency in Hz to the Slaney mel scale
pub fn hz_to_mel(hz: f64) -> f64 {
    if hz >= MIN_LOG_HZ {
        MIN_LOG_MEL + (hz / MIN_LOG_HZ).ln() / log_step()
    } else {
        hz / F_SP
    }
}

/// Convert a Slaney mel value back to Hz
pub fn mel_to_hz(mel: f64) -> f64 {
    if mel >= MIN_LOG_MEL {
        MIN_LOG_HZ * (log_step() * (mel - MIN_LOG_MEL)).exp()
    } else {
        F_SP * mel
    }
}

/// Triangular mel filterbank (`n_mels` x `n_fft / 2 + 1`)
#[derive(Debug, Clone)]
pub struct MelFilterbank {
    filters: Vec<Vec<f32>>,
    n_bins: usize,
}

impl MelFilterbank {
    pub fn new(n_mels: usize, n_fft: usize, sample_rate: u32, fmin: f32, fmax: f32) -> Self {
        let n_bins = n_fft / 2 + 1;
        let nyquist = sample_rate as f64 / 2.0;

        let fft_freqs: Vec<f64> = (0..n_bins)
            .map(|k| k as f64 * nyquist / (n_bins - 1).max(1) as f64)
            .collect();

        // n_mels + 2 edge frequencies evenly spaced on the mel axis
        let mel_min = hz_to_mel(fmin as f64);
        let mel_max = hz_to_mel(fmax as f64);
        let mel_f: Vec<f64> = (0..n_mels + 2)
            .map(|i| mel_to_hz(mel_min + (mel_max - mel_min) * i as f64 / (n_mels + 1) as f64))
            .collect();

        let filters = (0..n_mels)
            .map(|m| {
                let lower_width = mel_f[m + 1] - mel_f[m];
                let upper_width = mel_f[m + 2] - mel_f[m + 1];
                let enorm = 2.0 / (mel_f[m + 2] - mel_f[m]);

                fft_freqs
                    .iter()
                    .map(|&f| {
                        let lower = (f - mel_f[m]) / lower_width;
                        let upper = (mel_f[m + 2] - f) / upper_width;
                        (lower.min(upper).max(0.0) * enorm) as f32
                    })
                    .collect()
            })
            .collect();

        Self { filters, n_bins }
    }

    pub fn num_mels(&self) -> usize {
        self.filters.len()
    }

    pub fn num_bins(&self) -> usize {
        self.n_bins
    }

    pub fn filters(&self) -> &[Vec<f32>] {
        &self.filters
    }

    /// Project one power spectrum onto the mel bands
    pub fn apply(&self, power_spectrum: &[f32]) -> Vec<f32> {
        self.filters
            .iter()
            .map(|filter| {
                filter
                    .iter()
                    .zip(power_spectrum)
                    .map(|(&w, &p)| w * p)
                    .sum()
            })
            .collect()
    }
}

/// Convert a power matrix to decibels (reference 1.0).
///
/// Values are floored at [`AMIN`] and the whole matrix is clamped to
/// [`TOP_DB`] below its maximum.
pub fn power_to_db(matrix: &[Vec<f32>]) -> Vec<Vec<f32>> {
    let db: Vec<Vec<f32>> = matrix
        .iter()
        .map(|row| row.iter().map(|&p| 10.0 * p.max(AMIN).log10()).collect())
        .collect();

    let max_db = db
        .iter()
        .flat_map(|row| row.iter().copied())
        .fold(f32::NEG_INFINITY, f32::max);
    let floor = max_db - TOP_DB;

    db.into_iter()
        .map(|row| row.into_iter().map(|v| v.max(floor)).collect())
        .collect()
}

/// Orthonormal DCT-II, returning the first `n_coefficients` outputs
pub fn dct_ortho(input: &[f32], n_coefficients: usize) -> Vec<f32> {
    let n = input.len();
    if n == 0 {
        return vec![0.0; n_coefficients];
    }

    let n_f = n as f64;
    (0..n_coefficients)
        .map(|k| {
            let sum: f64 = input
                .iter()
                .enumerate()
                .map(|(i, &x)| x as f64 * (PI * k as f64 * (2.0 * i as f64 + 1.0) / (2.0 * n_f)).cos())
                .sum();
            let scale = if k == 0 { (1.0 / n_f).sqrt() } else { (2.0 / n_f).sqrt() };
            (sum * scale) as f32
        })
        .collect()
}
