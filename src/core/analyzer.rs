// src/core/analyzer.rs
//
// High-level voice analysis API with builder pattern.
// Decoding and feature failures never reach the caller: they are logged and
// replaced by the fallback verdict.

use log::{debug, error};
use thiserror::Error;

use crate::config::AnalysisConfig;
use crate::detection::ClassificationResult;

use super::analysis::{FeatureComputationError, FeatureExtractor, FeatureVector};
use super::classifier::{decide, evaluate};
use super::decoder::{decode_bytes, DecodeError, Waveform};

/// Any failure inside the analysis pipeline
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("decoding failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("feature extraction failed: {0}")]
    Features(#[from] FeatureComputationError),
}

/// Result of one analysis
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// The full pipeline ran
    Analyzed {
        result: ClassificationResult,
        features: FeatureVector,
    },
    /// The pipeline failed and the fallback verdict was substituted
    Fallback {
        result: ClassificationResult,
        reason: String,
    },
}

impl AnalysisOutcome {
    pub fn result(&self) -> &ClassificationResult {
        match self {
            AnalysisOutcome::Analyzed { result, .. } | AnalysisOutcome::Fallback { result, .. } => result,
        }
    }

    pub fn into_result(self) -> ClassificationResult {
        match self {
            AnalysisOutcome::Analyzed { result, .. } | AnalysisOutcome::Fallback { result, .. } => result,
        }
    }

    pub fn features(&self) -> Option<&FeatureVector> {
        match self {
            AnalysisOutcome::Analyzed { features, .. } => Some(features),
            AnalysisOutcome::Fallback { .. } => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, AnalysisOutcome::Fallback { .. })
    }

    fn from_error(err: AnalysisError) -> Self {
        error!("Voice analysis failed, using fallback verdict: {}", err);
        AnalysisOutcome::Fallback {
            result: ClassificationResult::fallback(),
            reason: err.to_string(),
        }
    }
}

/// Builder for VoiceAnalyzer configuration
pub struct AnalyzerBuilder {
    config: AnalysisConfig,
}

impl AnalyzerBuilder {
    pub fn new() -> Self {
        Self {
            config: AnalysisConfig::default(),
        }
    }

    pub fn config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    pub fn max_duration(mut self, secs: f64) -> Self {
        self.config.max_duration_secs = secs;
        self
    }

    pub fn fft_size(mut self, n_fft: usize) -> Self {
        self.config.n_fft = n_fft;
        self
    }

    pub fn hop_length(mut self, hop: usize) -> Self {
        self.config.hop_length = hop;
        self
    }

    pub fn build(self) -> VoiceAnalyzer {
        VoiceAnalyzer {
            extractor: FeatureExtractor::new(self.config),
        }
    }
}

impl Default for AnalyzerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode, extract and classify in one call
#[derive(Debug, Clone, Default)]
pub struct VoiceAnalyzer {
    extractor: FeatureExtractor,
}

impl VoiceAnalyzer {
    /// Create analyzer with default configuration
    pub fn new() -> Self {
        AnalyzerBuilder::new().build()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    pub fn config(&self) -> &AnalysisConfig {
        self.extractor.config()
    }

    /// Analyze encoded audio bytes
    pub fn analyze_bytes(&self, bytes: &[u8]) -> AnalysisOutcome {
        match self.try_analyze_bytes(bytes) {
            Ok(outcome) => outcome,
            Err(err) => AnalysisOutcome::from_error(err),
        }
    }

    /// Analyze an already decoded waveform
    pub fn analyze_waveform(&self, waveform: &Waveform) -> AnalysisOutcome {
        match self.try_analyze_waveform(waveform) {
            Ok(outcome) => outcome,
            Err(err) => AnalysisOutcome::from_error(err.into()),
        }
    }

    fn try_analyze_bytes(&self, bytes: &[u8]) -> Result<AnalysisOutcome, AnalysisError> {
        let waveform = decode_bytes(bytes, self.config().max_duration_secs)?;
        Ok(self.try_analyze_waveform(&waveform)?)
    }

    fn try_analyze_waveform(&self, waveform: &Waveform) -> Result<AnalysisOutcome, FeatureComputationError> {
        let features = self.extractor.extract(waveform)?;
        let indicators = evaluate(&features);
        for indicator in &indicators {
            debug!(
                "  {:<18} {:.2} {}",
                indicator.feature.name(),
                indicator.score,
                indicator.label.unwrap_or("")
            );
        }

        Ok(AnalysisOutcome::Analyzed {
            result: decide(&indicators),
            features,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::{Classification, FALLBACK_EXPLANATION};
    use crate::testgen::{encode_wav, monotone_speech_like, sine_wave, varied_speech_like};

    #[test]
    fn test_empty_input_falls_back() {
        let outcome = VoiceAnalyzer::new().analyze_bytes(&[]);
        assert!(outcome.is_fallback());
        assert!(outcome.result().is_fallback());
        assert_eq!(outcome.result().explanation, FALLBACK_EXPLANATION);
    }

    #[test]
    fn test_garbage_input_falls_back() {
        let outcome = VoiceAnalyzer::new().analyze_bytes(b"this is not audio at all, just some text");
        assert!(outcome.is_fallback());
        assert_eq!(outcome.result().classification, Classification::Human);
        assert_eq!(outcome.result().confidence, 0.55);
    }

    #[test]
    fn test_low_sample_rate_falls_back() {
        let wav = encode_wav(&sine_wave(300.0, 8000, 1.0, 0.5), 8000, 1).unwrap();
        let outcome = VoiceAnalyzer::new().analyze_bytes(&wav);
        assert!(outcome.is_fallback());
    }

    #[test]
    fn test_monotone_tone_is_ai_generated() {
        let wav = encode_wav(&monotone_speech_like(44100, 5.0), 44100, 1).unwrap();
        let outcome = VoiceAnalyzer::new().analyze_bytes(&wav);
        assert!(!outcome.is_fallback());
        assert_eq!(outcome.result().classification, Classification::AiGenerated);
    }

    #[test]
    fn test_varied_signal_is_human() {
        let wav = encode_wav(&varied_speech_like(44100, 5.0), 44100, 1).unwrap();
        let outcome = VoiceAnalyzer::new().analyze_bytes(&wav);
        assert!(outcome.features().is_some());
        assert_eq!(outcome.result().classification, Classification::Human);
    }

    #[test]
    fn test_analysis_is_deterministic_and_bounded() {
        let analyzer = VoiceAnalyzer::new();
        let wav = encode_wav(&varied_speech_like(22050, 2.0), 22050, 2).unwrap();
        let first = analyzer.analyze_bytes(&wav);
        let second = analyzer.analyze_bytes(&wav);
        assert_eq!(first, second);

        let confidence = first.result().confidence;
        assert!((0.0..=1.0).contains(&confidence));
    }

    #[test]
    fn test_zero_framing_falls_back() {
        let wav = encode_wav(&sine_wave(300.0, 22050, 1.0, 0.5), 22050, 1).unwrap();
        for analyzer in [
            VoiceAnalyzer::builder().fft_size(0).build(),
            VoiceAnalyzer::builder().hop_length(0).build(),
        ] {
            let outcome = analyzer.analyze_bytes(&wav);
            assert!(outcome.is_fallback());
            assert_eq!(outcome.result().confidence, 0.55);
        }
    }

    #[test]
    fn test_builder_caps_duration() {
        let analyzer = VoiceAnalyzer::builder().max_duration(1.0).build();
        assert_eq!(analyzer.config().max_duration_secs, 1.0);

        let wave = Waveform::new(sine_wave(440.0, 16000, 1.0, 0.5), 16000).unwrap();
        assert!(!analyzer.analyze_waveform(&wave).is_fallback());
    }

    #[test]
    fn test_analyzer_is_shareable() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<VoiceAnalyzer>();
    }
}
