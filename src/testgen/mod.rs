// src/testgen/mod.rs
//
// Synthetic test signal generation for voicecheckr.
// Produces deterministic signals and encodes them as in-memory WAV buffers,
// so tests and demos never depend on external audio files.

use std::f32::consts::PI;
use std::io::Cursor;

use anyhow::{Context, Result};
use hound::{SampleFormat, WavSpec, WavWriter};

/// Steady sine tone
pub fn sine_wave(frequency: f32, sample_rate: u32, duration_secs: f32, amplitude: f32) -> Vec<f32> {
    let n = (duration_secs * sample_rate as f32) as usize;
    (0..n)
        .map(|i| amplitude * (2.0 * PI * frequency * i as f32 / sample_rate as f32).sin())
        .collect()
}

/// Linear frequency sweep from `start_hz` to `end_hz`
pub fn linear_chirp(
    start_hz: f32,
    end_hz: f32,
    sample_rate: u32,
    duration_secs: f32,
    amplitude: f32,
) -> Vec<f32> {
    let n = (duration_secs * sample_rate as f32) as usize;
    let sweep_rate = (end_hz - start_hz) / duration_secs;
    (0..n)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            let phase = 2.0 * PI * (start_hz * t + 0.5 * sweep_rate * t * t);
            amplitude * phase.sin()
        })
        .collect()
}

/// Multiply a signal by an on/off gate, mimicking syllables separated by pauses
pub fn gate(samples: &[f32], sample_rate: u32, on_secs: f32, off_secs: f32) -> Vec<f32> {
    let on = (on_secs * sample_rate as f32) as usize;
    let period = on + (off_secs * sample_rate as f32) as usize;
    if period == 0 {
        return samples.to_vec();
    }

    samples
        .iter()
        .enumerate()
        .map(|(i, &s)| if i % period < on { s } else { 0.0 })
        .collect()
}

/// Deterministic white noise from a fixed seed (xorshift32)
pub fn white_noise(sample_rate: u32, duration_secs: f32, amplitude: f32, seed: u32) -> Vec<f32> {
    let n = (duration_secs * sample_rate as f32) as usize;
    let mut state = seed.max(1);
    (0..n)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            amplitude * (state as f32 / u32::MAX as f32 * 2.0 - 1.0)
        })
        .collect()
}

/// Voice-like test signal: a gated sweep across the speech pitch range.
///
/// Pitch, loudness and brightness all move, so every variability feature
/// lands well above its synthetic-speech threshold.
pub fn varied_speech_like(sample_rate: u32, duration_secs: f32) -> Vec<f32> {
    let sweep = linear_chirp(150.0, 1500.0, sample_rate, duration_secs, 0.6);
    gate(&sweep, sample_rate, 0.25, 0.15)
}

/// Monotone test signal: a constant-level tone with no pitch movement
pub fn monotone_speech_like(sample_rate: u32, duration_secs: f32) -> Vec<f32> {
    sine_wave(220.0, sample_rate, duration_secs, 0.3)
}

/// Encode interleaved samples as a 16-bit PCM WAV file held in memory
pub fn encode_wav(samples: &[f32], sample_rate: u32, channels: u16) -> Result<Vec<u8>> {
    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut bytes = Vec::new();
    {
        let mut writer = WavWriter::new(Cursor::new(&mut bytes), spec)
            .context("Failed to create WAV writer")?;
        for &s in samples {
            let value = (s.clamp(-1.0, 1.0) * i16::MAX as f32).round() as i16;
            writer.write_sample(value).context("Failed to write WAV sample")?;
        }
        writer.finalize().context("Failed to finalize WAV data")?;
    }

    Ok(bytes)
}
