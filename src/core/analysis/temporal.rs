// src/core/analysis/temporal.rs
//
// Time-domain frame trajectories: zero-crossing rate and RMS energy.

use crate::core::dsp::stats::{rms, zero_crossing_rate};
use crate::core::dsp::{centered_frames, PadMode};

/// Frame-wise zero-crossing rate.
///
/// Frames are centered with edge padding, so the first and last frames do
/// not see artificial crossings at the signal boundary.
pub fn zero_crossing_track(samples: &[f32], frame_length: usize, hop_length: usize) -> Vec<f64> {
    centered_frames(samples, frame_length, hop_length, PadMode::Edge)
        .iter()
        .map(|frame| zero_crossing_rate(frame) as f64)
        .collect()
}

/// Frame-wise RMS energy with zero-padded centered frames
pub fn rms_track(samples: &[f32], frame_length: usize, hop_length: usize) -> Vec<f64> {
    centered_frames(samples, frame_length, hop_length, PadMode::Zero)
        .iter()
        .map(|frame| rms(frame) as f64)
        .collect()
}
