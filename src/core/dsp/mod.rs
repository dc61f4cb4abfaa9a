//! Digital Signal Processing utilities
//!
//! Framing follows the centered convention: the signal is padded by half a
//! frame on both sides so that frame `t` is centered on sample `t * hop`.

pub mod fft;
pub mod mel;
pub mod stats;
pub mod windows;

pub use fft::FftProcessor;
pub use mel::{dct_ortho, power_to_db, MelFilterbank};
pub use windows::hann_window;

/// How the signal is extended before centered framing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadMode {
    /// Pad with zeros
    Zero,
    /// Repeat the first/last sample
    Edge,
}

/// Pad `samples` by `pad` on both sides
pub fn pad_center(samples: &[f32], pad: usize, mode: PadMode) -> Vec<f32> {
    let (left, right) = match mode {
        PadMode::Zero => (0.0, 0.0),
        PadMode::Edge => (
            samples.first().copied().unwrap_or(0.0),
            samples.last().copied().unwrap_or(0.0),
        ),
    };

    let mut padded = Vec::with_capacity(samples.len() + 2 * pad);
    padded.resize(pad, left);
    padded.extend_from_slice(samples);
    padded.resize(samples.len() + 2 * pad, right);
    padded
}

/// Number of centered frames for a signal of `len` samples
pub fn centered_frame_count(len: usize, frame_length: usize, hop_length: usize) -> usize {
    let padded = len + 2 * (frame_length / 2);
    if padded < frame_length || hop_length == 0 {
        return 0;
    }
    1 + (padded - frame_length) / hop_length
}

/// Split a signal into centered, overlapping frames
pub fn centered_frames(
    samples: &[f32],
    frame_length: usize,
    hop_length: usize,
    mode: PadMode,
) -> Vec<Vec<f32>> {
    let num_frames = centered_frame_count(samples.len(), frame_length, hop_length);
    let padded = pad_center(samples, frame_length / 2, mode);

    (0..num_frames)
        .map(|t| {
            let start = t * hop_length;
            padded[start..start + frame_length].to_vec()
        })
        .collect()
}

/// Magnitude spectrogram of a mono signal, one spectrum per frame
#[derive(Debug, Clone)]
pub struct Spectrogram {
    frames: Vec<Vec<f32>>,
    sample_rate: u32,
    fft_size: usize,
}

impl Spectrogram {
    /// Centered STFT with a periodic Hann window and zero padding
    pub fn compute(samples: &[f32], sample_rate: u32, fft_size: usize, hop_size: usize) -> Self {
        let mut fft = FftProcessor::new(fft_size);
        let frames = centered_frames(samples, fft_size, hop_size, PadMode::Zero)
            .iter()
            .map(|frame| fft.magnitude_spectrum(frame))
            .collect();

        Self {
            frames,
            sample_rate,
            fft_size,
        }
    }

    /// Per-frame magnitude spectra
    pub fn frames(&self) -> &[Vec<f32>] {
        &self.frames
    }

    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn num_bins(&self) -> usize {
        self.fft_size / 2 + 1
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Center frequency of every bin in Hz
    pub fn bin_frequencies(&self) -> Vec<f32> {
        let resolution = self.sample_rate as f32 / self.fft_size as f32;
        (0..self.num_bins()).map(|k| k as f32 * resolution).collect()
    }

    /// Per-frame power spectra (squared magnitudes)
    pub fn power_frames(&self) -> Vec<Vec<f32>> {
        self.frames
            .iter()
            .map(|frame| frame.iter().map(|m| m * m).collect())
            .collect()
    }
}
