// src/core/analysis/features.rs
//
// Scalar variability statistics computed once per waveform.

use log::debug;
use serde::Serialize;
use thiserror::Error;

use crate::config::AnalysisConfig;
use crate::core::decoder::Waveform;
use crate::core::dsp::stats::{mean, std_dev};
use crate::core::dsp::Spectrogram;
use crate::detection::ScoredFeature;

use super::mfcc::{analyze_mfcc, MfccParams};
use super::pitch::{analyze_pitch, PitchParams};
use super::spectral::{centroid_track, rolloff_track, spectral_contrast, ContrastParams};
use super::temporal::{rms_track, zero_crossing_track};

/// Errors raised while computing features from a decoded waveform
#[derive(Debug, Error)]
pub enum FeatureComputationError {
    #[error("waveform contains no samples")]
    EmptySignal,

    #[error("invalid framing: n_fft={n_fft}, hop_length={hop_length}")]
    InvalidFraming { n_fft: usize, hop_length: usize },

    #[error(
        "spectral contrast band edge exceeds Nyquist: fmin={fmin} Hz with {n_bands} bands at {sample_rate} Hz"
    )]
    BandExceedsNyquist {
        fmin: f32,
        n_bands: usize,
        sample_rate: u32,
    },

    #[error("spectral contrast band {band} contains too few bins")]
    EmptyBand { band: usize },

    #[error("{feature} evaluated to a non-finite value")]
    NonFinite { feature: &'static str },
}

/// Variability statistics of one waveform
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FeatureVector {
    pub pitch_std: f64,
    pub zcr_mean: f64,
    pub zcr_std: f64,
    pub spectral_centroid_std: f64,
    /// Diagnostic only
    pub spectral_rolloff_std: f64,
    /// Diagnostic only
    pub mfcc_std: f64,
    pub rms_std: f64,
    pub contrast_std: f64,
}

impl FeatureVector {
    /// Value fed to the classifier for a scored feature
    pub fn scoring_value(&self, feature: ScoredFeature) -> f64 {
        match feature {
            ScoredFeature::Pitch => self.pitch_std,
            ScoredFeature::ZeroCrossingRate => self.zcr_std,
            ScoredFeature::SpectralCentroid => self.spectral_centroid_std,
            ScoredFeature::Energy => self.rms_std,
            ScoredFeature::SpectralContrast => self.contrast_std,
        }
    }

    fn named(&self) -> [(&'static str, f64); 8] {
        [
            ("pitch_std", self.pitch_std),
            ("zcr_mean", self.zcr_mean),
            ("zcr_std", self.zcr_std),
            ("spectral_centroid_std", self.spectral_centroid_std),
            ("spectral_rolloff_std", self.spectral_rolloff_std),
            ("mfcc_std", self.mfcc_std),
            ("rms_std", self.rms_std),
            ("contrast_std", self.contrast_std),
        ]
    }

    fn ensure_finite(self) -> Result<Self, FeatureComputationError> {
        match self.named().iter().find(|(_, value)| !value.is_finite()) {
            Some((feature, _)) => Err(FeatureComputationError::NonFinite { feature: *feature }),
            None => Ok(self),
        }
    }
}

/// Computes a [`FeatureVector`] with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct FeatureExtractor {
    config: AnalysisConfig,
}

impl FeatureExtractor {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Extract every statistic from the waveform.
    ///
    /// The magnitude spectrogram is computed once and shared by the pitch,
    /// centroid, rolloff, MFCC and contrast computations.
    pub fn extract(&self, waveform: &Waveform) -> Result<FeatureVector, FeatureComputationError> {
        let samples = waveform.samples();
        if samples.is_empty() {
            return Err(FeatureComputationError::EmptySignal);
        }

        let cfg = &self.config;
        if cfg.n_fft < 2 || cfg.hop_length == 0 {
            return Err(FeatureComputationError::InvalidFraming {
                n_fft: cfg.n_fft,
                hop_length: cfg.hop_length,
            });
        }

        let sample_rate = waveform.sample_rate();
        let spec = Spectrogram::compute(samples, sample_rate, cfg.n_fft, cfg.hop_length);

        let pitch = analyze_pitch(
            &spec,
            &PitchParams {
                fmin: cfg.pitch_fmin,
                fmax: cfg.pitch_fmax,
                threshold: cfg.pitch_threshold,
            },
        );

        let zcr = zero_crossing_track(samples, cfg.n_fft, cfg.hop_length);
        let rms = rms_track(samples, cfg.n_fft, cfg.hop_length);

        let mfcc = analyze_mfcc(
            &spec,
            &MfccParams {
                num_coefficients: cfg.n_mfcc,
                num_mel_bands: cfg.n_mels,
            },
        );

        let contrast = spectral_contrast(
            &spec,
            &ContrastParams {
                fmin: cfg.contrast_fmin,
                n_bands: cfg.contrast_bands,
                quantile: cfg.contrast_quantile,
            },
        )?;
        let band_stds: Vec<f64> = contrast
            .iter()
            .map(|band| {
                let values: Vec<f64> = band.iter().map(|&c| c as f64).collect();
                std_dev(&values)
            })
            .collect();

        let features = FeatureVector {
            pitch_std: pitch.std_dev(),
            zcr_mean: mean(&zcr),
            zcr_std: std_dev(&zcr),
            spectral_centroid_std: std_dev(&centroid_track(&spec)),
            spectral_rolloff_std: std_dev(&rolloff_track(&spec, cfg.rolloff_percent)),
            mfcc_std: mfcc.mean_std(),
            rms_std: std_dev(&rms),
            contrast_std: mean(&band_stds),
        };

        debug!(
            "Features ({} frames, {:.0}% voiced): pitch_std={:.2} zcr_mean={:.4} zcr_std={:.4} \
             centroid_std={:.2} rolloff_std={:.2} mfcc_std={:.3} rms_std={:.4} contrast_std={:.3}",
            spec.num_frames(),
            pitch.voiced_ratio() * 100.0,
            features.pitch_std,
            features.zcr_mean,
            features.zcr_std,
            features.spectral_centroid_std,
            features.spectral_rolloff_std,
            features.mfcc_std,
            features.rms_std,
            features.contrast_std,
        );

        features.ensure_finite()
    }
}
