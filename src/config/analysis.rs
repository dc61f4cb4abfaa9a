// src/config/analysis.rs
//
// Frame and feature parameters for the acoustic analysis pipeline.

use serde::{Deserialize, Serialize};

use crate::core::decoder::DEFAULT_MAX_DURATION_SECS;

/// Parameters shared by every feature computation.
///
/// The classifier thresholds assume the default framing (2048-sample FFT,
/// 512 hop); other values shift every feature statistic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// FFT size and frame length, in samples
    pub n_fft: usize,
    /// Distance between consecutive frames, in samples
    pub hop_length: usize,
    /// Audio beyond this duration is ignored
    pub max_duration_secs: f64,
    /// Lowest pitch candidate, in Hz
    pub pitch_fmin: f32,
    /// Highest pitch candidate, in Hz (capped at Nyquist)
    pub pitch_fmax: f32,
    /// Pitch candidates must exceed this fraction of the frame maximum
    pub pitch_threshold: f32,
    /// Energy fraction defining the spectral rolloff
    pub rolloff_percent: f32,
    /// Number of cepstral coefficients
    pub n_mfcc: usize,
    /// Number of mel bands feeding the cepstrum
    pub n_mels: usize,
    /// Lower edge of the first spectral-contrast octave, in Hz
    pub contrast_fmin: f32,
    /// Number of spectral-contrast octave bands (plus one residual band)
    pub contrast_bands: usize,
    /// Fraction of each band averaged for peaks and valleys
    pub contrast_quantile: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            n_fft: 2048,
            hop_length: 512,
            max_duration_secs: DEFAULT_MAX_DURATION_SECS,
            pitch_fmin: 150.0,
            pitch_fmax: 4000.0,
            pitch_threshold: 0.1,
            rolloff_percent: 0.85,
            n_mfcc: 13,
            n_mels: 128,
            contrast_fmin: 200.0,
            contrast_bands: 6,
            contrast_quantile: 0.02,
        }
    }
}

impl AnalysisConfig {
    pub fn with_max_duration(mut self, secs: f64) -> Self {
        self.max_duration_secs = secs;
        self
    }
}
