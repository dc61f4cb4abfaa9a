// src/core/analysis/spectral.rs
//
// Frame-wise spectral shape descriptors: centroid, rolloff and octave-band
// contrast between spectral peaks and valleys.

use crate::core::dsp::stats::{spectral_centroid, spectral_rolloff};
use crate::core::dsp::{power_to_db, Spectrogram};

use super::FeatureComputationError;

/// Spectral contrast parameters
#[derive(Debug, Clone, Copy)]
pub struct ContrastParams {
    /// Upper edge of the first band, in Hz
    pub fmin: f32,
    /// Number of octave bands above the first (one residual band is added)
    pub n_bands: usize,
    /// Fraction of each band averaged as peak and valley
    pub quantile: f32,
}

impl Default for ContrastParams {
    fn default() -> Self {
        Self {
            fmin: 200.0,
            n_bands: 6,
            quantile: 0.02,
        }
    }
}

/// Spectral centroid of every frame, in Hz
pub fn centroid_track(spec: &Spectrogram) -> Vec<f64> {
    let freqs = spec.bin_frequencies();
    spec.frames()
        .iter()
        .map(|frame| spectral_centroid(frame, &freqs) as f64)
        .collect()
}

/// Spectral rolloff of every frame, in Hz
pub fn rolloff_track(spec: &Spectrogram, percentile: f32) -> Vec<f64> {
    let freqs = spec.bin_frequencies();
    spec.frames()
        .iter()
        .map(|frame| spectral_rolloff(frame, &freqs, percentile) as f64)
        .collect()
}

/// Inclusive bin range of one contrast band plus the bins used for sorting
struct ContrastBand {
    first: usize,
    /// Last bin included in the peak/valley statistics
    last_sorted: usize,
    /// Number of peak/valley bins averaged
    quantile_bins: usize,
}

/// Spectral contrast in dB, one row per band (`n_bands + 1` rows), one
/// column per frame.
///
/// Fails when a band's lower edge reaches Nyquist, which happens for
/// low sample rates with the default six octaves above 200 Hz.
pub fn spectral_contrast(
    spec: &Spectrogram,
    params: &ContrastParams,
) -> Result<Vec<Vec<f32>>, FeatureComputationError> {
    let bands = contrast_bands(spec, params)?;
    let n_frames = spec.num_frames();

    let mut peaks = vec![vec![0.0f32; n_frames]; bands.len()];
    let mut valleys = vec![vec![0.0f32; n_frames]; bands.len()];

    for (k, band) in bands.iter().enumerate() {
        for (t, frame) in spec.frames().iter().enumerate() {
            let mut sorted = frame[band.first..=band.last_sorted].to_vec();
            sorted.sort_by(|a, b| a.total_cmp(b));

            let q = band.quantile_bins;
            valleys[k][t] = sorted[..q].iter().sum::<f32>() / q as f32;
            peaks[k][t] = sorted[sorted.len() - q..].iter().sum::<f32>() / q as f32;
        }
    }

    let peaks_db = power_to_db(&peaks);
    let valleys_db = power_to_db(&valleys);

    Ok(peaks_db
        .iter()
        .zip(&valleys_db)
        .map(|(p, v)| p.iter().zip(v).map(|(a, b)| a - b).collect())
        .collect())
}

fn contrast_bands(
    spec: &Spectrogram,
    params: &ContrastParams,
) -> Result<Vec<ContrastBand>, FeatureComputationError> {
    let nyquist = spec.sample_rate() as f32 / 2.0;
    let n_bands = params.n_bands;

    // [0, fmin, 2 fmin, 4 fmin, ...]
    let mut edges = vec![0.0f32; n_bands + 2];
    for (k, edge) in edges.iter_mut().skip(1).enumerate() {
        *edge = params.fmin * 2f32.powi(k as i32);
    }

    if edges[..=n_bands].iter().any(|&f| f >= nyquist) {
        return Err(FeatureComputationError::BandExceedsNyquist {
            fmin: params.fmin,
            n_bands,
            sample_rate: spec.sample_rate(),
        });
    }

    let freqs = spec.bin_frequencies();
    let last_bin = spec.num_bins() - 1;

    (0..=n_bands)
        .map(|k| {
            let (f_low, f_high) = (edges[k], edges[k + 1]);
            let mut in_band = freqs
                .iter()
                .enumerate()
                .filter(|(_, f)| **f >= f_low && **f <= f_high)
                .map(|(i, _)| i);

            let first = in_band.next().ok_or(FeatureComputationError::EmptyBand { band: k })?;
            let mut last = in_band.last().unwrap_or(first);

            // Bands overlap by one bin at their lower edge
            let first = if k > 0 { first.saturating_sub(1) } else { first };
            if k == n_bands {
                last = last_bin;
            }

            let band_bins = last - first + 1;
            // Every band but the residual one drops its top bin from the statistics
            let last_sorted = if k < n_bands { last.saturating_sub(1) } else { last };

            let quantile_bins = ((params.quantile as f64 * band_bins as f64).round_ties_even() as usize).max(1);
            if last_sorted < first || quantile_bins > last_sorted - first + 1 {
                return Err(FeatureComputationError::EmptyBand { band: k });
            }

            Ok(ContrastBand {
                first,
                last_sorted,
                quantile_bins,
            })
        })
        .collect()
}
