//! VoiceCheckr - Detect AI-generated speech
//!
//! Classifies a speech recording as `AI_GENERATED` or `HUMAN` from how much
//! its acoustic features vary over time. Synthetic speech tends to hold pitch,
//! loudness and brightness unnaturally steady.
//!
//! ## Pipeline
//!
//! 1. **Decode**: encoded bytes to a mono waveform at the native rate, capped at 30 s
//! 2. **Extract**: pitch, zero-crossing rate, spectral centroid, RMS energy and
//!    spectral contrast variability (plus rolloff and MFCC for diagnostics)
//! 3. **Classify**: a fixed rule table turns each feature into an AI-likelihood
//!    indicator; the mean decides the verdict
//!
//! Any failure along the way yields a conservative `HUMAN` verdict with
//! confidence 0.55 instead of an error.
//!
//! ## Module Structure
//!
//! - `core` - Decoding, DSP, feature extraction and classification
//! - `detection` - Verdict types
//! - `config` - Analysis and server configuration
//! - `server` - HTTP API
//! - `cli` - Command-line interface
//! - `testgen` - Synthetic test signals
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use voicecheckr::VoiceAnalyzer;
//!
//! let bytes = std::fs::read("sample.mp3")?;
//! let outcome = VoiceAnalyzer::new().analyze_bytes(&bytes);
//! let result = outcome.result();
//!
//! println!("{} ({:.0}%): {}", result.classification, result.confidence * 100.0, result.explanation);
//! ```
//!
//! ## Scoring Rules
//!
//! | Feature             | Threshold | Below | At or above |
//! |---------------------|-----------|-------|-------------|
//! | Pitch std (Hz)      | 50 / 100  | 0.80 / 0.50 | 0.20  |
//! | ZCR std             | 0.02      | 0.70  | 0.30        |
//! | Centroid std (Hz)   | 200       | 0.75  | 0.25        |
//! | RMS std             | 0.02      | 0.70  | 0.30        |
//! | Contrast std (dB)   | 5         | 0.65  | 0.35        |

// Decoding and analysis
pub mod core;

// Command-line interface
pub mod cli;

// Analysis and server configuration
pub mod config;

// Verdict types
pub mod detection;

// HTTP API
pub mod server;

// Synthetic signals for tests and demos
pub mod testgen;

// Re-export commonly used types at crate root for convenience
pub use config::{AnalysisConfig, ServerConfig};
pub use self::core::{AnalysisOutcome, AnalyzerBuilder, FeatureVector, VoiceAnalyzer, Waveform};
pub use detection::{Classification, ClassificationResult};
pub use server::VoiceServer;
