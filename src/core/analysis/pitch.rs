// src/core/analysis/pitch.rs
//
// Spectral peak pitch tracking.
// Each frame's pitch is the strongest interpolated local maximum of the
// magnitude spectrum inside the pitch band.

use crate::core::dsp::stats::{is_local_max, std_dev};
use crate::core::dsp::Spectrogram;

/// Pitch tracking parameters
#[derive(Debug, Clone, Copy)]
pub struct PitchParams {
    pub fmin: f32,
    pub fmax: f32,
    /// Candidates must exceed this fraction of the frame's peak magnitude
    pub threshold: f32,
}

impl Default for PitchParams {
    fn default() -> Self {
        Self {
            fmin: 150.0,
            fmax: 4000.0,
            threshold: 0.1,
        }
    }
}

/// Pitch contour over the voiced frames of a signal
#[derive(Debug, Clone, Default)]
pub struct PitchAnalysis {
    /// One positive pitch per frame where a candidate was found, in Hz
    pub pitches: Vec<f32>,
    /// Total frames examined
    pub frames_analyzed: usize,
}

impl PitchAnalysis {
    /// Standard deviation of the detected pitches, 0.0 when none were found
    pub fn std_dev(&self) -> f64 {
        let values: Vec<f64> = self.pitches.iter().map(|&p| p as f64).collect();
        std_dev(&values)
    }

    pub fn voiced_ratio(&self) -> f32 {
        if self.frames_analyzed == 0 {
            return 0.0;
        }
        self.pitches.len() as f32 / self.frames_analyzed as f32
    }
}

/// Track pitch across all frames of a magnitude spectrogram
pub fn analyze_pitch(spec: &Spectrogram, params: &PitchParams) -> PitchAnalysis {
    let freqs = spec.bin_frequencies();
    let nyquist = spec.sample_rate() as f32 / 2.0;
    let fmin = params.fmin.max(0.0);
    let fmax = params.fmax.min(nyquist);
    let bin_to_hz = spec.sample_rate() as f32 / spec.fft_size() as f32;

    let pitches = spec
        .frames()
        .iter()
        .filter_map(|frame| frame_pitch(frame, &freqs, fmin, fmax, params.threshold, bin_to_hz))
        .collect();

    PitchAnalysis {
        pitches,
        frames_analyzed: spec.num_frames(),
    }
}

/// Pitch of a single frame, if any candidate bin yields a positive value
fn frame_pitch(
    frame: &[f32],
    freqs: &[f32],
    fmin: f32,
    fmax: f32,
    threshold: f32,
    bin_to_hz: f32,
) -> Option<f32> {
    let frame_max = frame.iter().copied().fold(0.0f32, f32::max);
    let reference = threshold * frame_max;
    let last = frame.len().saturating_sub(1);

    // Non-candidate bins carry zero magnitude, so the running best starts there
    let mut best_mag = 0.0f32;
    let mut best_pitch = 0.0f32;

    for (i, &magnitude) in frame.iter().enumerate() {
        if freqs[i] < fmin || freqs[i] >= fmax {
            continue;
        }
        if magnitude <= reference || !is_local_max(frame, i) {
            continue;
        }

        let (shift, dskew) = if i == 0 || i == last {
            (0.0, 0.0)
        } else {
            parabolic_offset(frame[i - 1], magnitude, frame[i + 1])
        };

        let mag = magnitude + dskew;
        if mag > best_mag {
            best_mag = mag;
            best_pitch = (i as f32 + shift) * bin_to_hz;
        }
    }

    (best_pitch > 0.0).then_some(best_pitch)
}

/// Parabolic interpolation around a peak: (bin offset, magnitude correction)
fn parabolic_offset(below: f32, center: f32, above: f32) -> (f32, f32) {
    let avg = 0.5 * (above - below);
    let mut curvature = 2.0 * center - above - below;
    if curvature.abs() < f32::MIN_POSITIVE {
        curvature += 1.0;
    }
    let shift = avg / curvature;
    (shift, 0.5 * avg * shift)
}
