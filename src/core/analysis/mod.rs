//! Acoustic feature analysis
//!
//! Each submodule turns a waveform or its magnitude spectrogram into a
//! frame-wise trajectory:
//! - Pitch tracking (parabolic-interpolated spectral peaks)
//! - Zero-crossing rate and RMS energy
//! - Spectral centroid, rolloff and octave-band contrast
//! - MFCC
//!
//! [`FeatureExtractor`] reduces the trajectories to a [`FeatureVector`].

mod features;
mod mfcc;
mod pitch;
mod spectral;
mod temporal;

pub use features::{FeatureComputationError, FeatureExtractor, FeatureVector};
pub use mfcc::{analyze_mfcc, MfccAnalysis, MfccParams};
pub use pitch::{analyze_pitch, PitchAnalysis, PitchParams};
pub use spectral::{centroid_track, rolloff_track, spectral_contrast, ContrastParams};
pub use temporal::{rms_track, zero_crossing_track};
