// src/core/analysis/mfcc.rs
//
// Mel-frequency cepstral coefficients over the shared magnitude spectrogram.

use crate::core::dsp::stats::std_dev;
use crate::core::dsp::{dct_ortho, power_to_db, MelFilterbank, Spectrogram};

/// MFCC analysis parameters
#[derive(Debug, Clone)]
pub struct MfccParams {
    pub num_coefficients: usize,
    pub num_mel_bands: usize,
}

impl Default for MfccParams {
    fn default() -> Self {
        Self {
            num_coefficients: 13,
            num_mel_bands: 128,
        }
    }
}

/// MFCC analysis results
#[derive(Debug, Clone, Default)]
pub struct MfccAnalysis {
    /// One trajectory per coefficient, one value per frame
    pub coefficients: Vec<Vec<f32>>,
}

impl MfccAnalysis {
    /// Standard deviation of each coefficient over time
    pub fn coefficient_std(&self) -> Vec<f64> {
        self.coefficients
            .iter()
            .map(|track| {
                let values: Vec<f64> = track.iter().map(|&c| c as f64).collect();
                std_dev(&values)
            })
            .collect()
    }

    /// Mean of the per-coefficient standard deviations
    pub fn mean_std(&self) -> f64 {
        let stds = self.coefficient_std();
        if stds.is_empty() {
            return 0.0;
        }
        stds.iter().sum::<f64>() / stds.len() as f64
    }
}

/// Analyze MFCC features
pub fn analyze_mfcc(spec: &Spectrogram, params: &MfccParams) -> MfccAnalysis {
    let nyquist = spec.sample_rate() as f32 / 2.0;
    let filterbank = MelFilterbank::new(
        params.num_mel_bands,
        spec.fft_size(),
        spec.sample_rate(),
        0.0,
        nyquist,
    );

    let mel_power: Vec<Vec<f32>> = spec
        .power_frames()
        .iter()
        .map(|frame| filterbank.apply(frame))
        .collect();
    let mel_db = power_to_db(&mel_power);

    let per_frame: Vec<Vec<f32>> = mel_db
        .iter()
        .map(|frame| dct_ortho(frame, params.num_coefficients))
        .collect();

    let coefficients = (0..params.num_coefficients)
        .map(|c| per_frame.iter().map(|frame| frame[c]).collect())
        .collect();

    MfccAnalysis { coefficients }
}
