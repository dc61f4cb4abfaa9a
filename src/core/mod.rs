//! Core decoding, feature extraction and classification

pub mod analysis;
pub mod analyzer;
pub mod classifier;
pub mod decoder;
pub mod dsp;

pub use analysis::{FeatureComputationError, FeatureExtractor, FeatureVector};
pub use analyzer::{AnalysisError, AnalysisOutcome, AnalyzerBuilder, VoiceAnalyzer};
pub use classifier::{classify, decide, evaluate, FeatureRule, RULES};
pub use decoder::{decode_bytes, DecodeError, Waveform, DEFAULT_MAX_DURATION_SECS};
pub use dsp::Spectrogram;
