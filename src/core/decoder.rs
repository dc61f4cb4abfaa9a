// src/core/decoder.rs
//
// In-memory audio decoding into a capped mono waveform.
// Uses Symphonia for format-agnostic decoding.

use std::io::Cursor;

use log::debug;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use thiserror::Error;

/// Default cap on decoded audio, in seconds
pub const DEFAULT_MAX_DURATION_SECS: f64 = 30.0;

/// Errors raised while turning encoded bytes into a waveform
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to probe audio format - may be corrupted or unsupported: {0}")]
    Probe(#[source] SymphoniaError),

    #[error("no supported audio track found")]
    NoTrack,

    #[error("audio track does not specify a sample rate")]
    MissingSampleRate,

    #[error("failed to decode audio: {0}")]
    Codec(#[source] SymphoniaError),

    #[error("no audio samples decoded")]
    Empty,
}

/// Decoded mono audio at its native sample rate
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    samples: Vec<f32>,
    sample_rate: u32,
    source_channels: usize,
    codec_name: String,
}

impl Waveform {
    /// Build a waveform from mono samples.
    ///
    /// Fails with [`DecodeError::Empty`] when there are no samples.
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Result<Self, DecodeError> {
        if samples.is_empty() || sample_rate == 0 {
            return Err(DecodeError::Empty);
        }
        Ok(Self {
            samples,
            sample_rate,
            source_channels: 1,
            codec_name: "raw".to_string(),
        })
    }

    /// Mono samples normalized to [-1.0, 1.0]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Channel count of the encoded source before down-mixing
    pub fn source_channels(&self) -> usize {
        self.source_channels
    }

    pub fn codec_name(&self) -> &str {
        &self.codec_name
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Decode an encoded buffer into a mono waveform of at most `max_duration_secs`.
///
/// The native sample rate is preserved; the tail beyond the cap is dropped.
pub fn decode_bytes(bytes: &[u8], max_duration_secs: f64) -> Result<Waveform, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    let source = Cursor::new(bytes.to_vec());
    let mss = MediaSourceStream::new(Box::new(source), Default::default());

    let mut hint = Hint::new();
    hint.with_extension("mp3");

    let meta_opts = MetadataOptions::default();
    let fmt_opts = FormatOptions::default();

    let mut probed = symphonia::default::get_probe()
        .format(&hint, mss, &fmt_opts, &meta_opts)
        .map_err(DecodeError::Probe)?;

    let track = probed
        .format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(DecodeError::NoTrack)?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or(DecodeError::MissingSampleRate)?;
    let codec_name = format!("{:?}", track.codec_params.codec);

    let max_frames = (max_duration_secs.max(0.0) * sample_rate as f64) as usize;

    let dec_opts = DecoderOptions::default();
    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &dec_opts)
        .map_err(DecodeError::Codec)?;

    let mut mono: Vec<f32> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;
    let mut source_channels = 1;

    while mono.len() < max_frames {
        let packet = match probed.format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break
            }
            Err(SymphoniaError::ResetRequired) => {
                decoder.reset();
                continue;
            }
            Err(e) => return Err(DecodeError::Codec(e)),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(buf) => buf,
            Err(SymphoniaError::DecodeError(msg)) => {
                debug!("Skipping undecodable packet: {}", msg);
                continue;
            }
            Err(e) => return Err(DecodeError::Codec(e)),
        };

        let spec = *decoded.spec();
        let channels = spec.channels.count().max(1);
        source_channels = channels;

        let buf = sample_buf.get_or_insert_with(|| SampleBuffer::new(decoded.capacity() as u64, spec));
        if buf.capacity() < decoded.capacity() * channels {
            *buf = SampleBuffer::new(decoded.capacity() as u64, spec);
        }
        buf.copy_interleaved_ref(decoded);

        downmix_into(buf.samples(), channels, &mut mono);
    }

    mono.truncate(max_frames);

    if mono.is_empty() {
        return Err(DecodeError::Empty);
    }

    debug!(
        "Decoded {} samples at {} Hz ({} channel(s), {})",
        mono.len(),
        sample_rate,
        source_channels,
        codec_name
    );

    Ok(Waveform {
        samples: mono,
        sample_rate,
        source_channels,
        codec_name,
    })
}

/// Average interleaved channels into mono samples
fn downmix_into(interleaved: &[f32], channels: usize, mono: &mut Vec<f32>) {
    if channels == 1 {
        mono.extend_from_slice(interleaved);
        return;
    }

    mono.extend(
        interleaved
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testgen::{encode_wav, sine_wave};

    #[test]
    fn test_downmix_stereo() {
        let mut mono = Vec::new();
        downmix_into(&[0.5, -0.5, 0.3, 0.1], 2, &mut mono);
        assert_eq!(mono.len(), 2);
        assert!((mono[0] - 0.0).abs() < 0.001);
        assert!((mono[1] - 0.2).abs() < 0.001);
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert!(matches!(decode_bytes(&[], 30.0), Err(DecodeError::Empty)));
    }

    #[test]
    fn test_garbage_input_fails_to_probe() {
        let garbage = b"this is definitely not an audio file, just some text".repeat(20);
        assert!(decode_bytes(&garbage, 30.0).is_err());
    }

    #[test]
    fn test_decode_wav_preserves_rate() {
        let samples = sine_wave(440.0, 16000, 1.0, 0.5);
        let bytes = encode_wav(&samples, 16000, 1).unwrap();

        let waveform = decode_bytes(&bytes, 30.0).unwrap();
        assert_eq!(waveform.sample_rate(), 16000);
        assert_eq!(waveform.len(), 16000);
        assert_eq!(waveform.source_channels(), 1);
    }

    #[test]
    fn test_decode_truncates_to_cap() {
        let samples = sine_wave(220.0, 8000, 3.0, 0.5);
        let bytes = encode_wav(&samples, 8000, 1).unwrap();

        let waveform = decode_bytes(&bytes, 1.5).unwrap();
        assert_eq!(waveform.len(), 12000);
        assert!((waveform.duration_secs() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_decode_stereo_downmixes() {
        let left = sine_wave(300.0, 8000, 0.5, 0.5);
        let interleaved: Vec<f32> = left.iter().flat_map(|&s| [s, -s]).collect();
        let bytes = encode_wav(&interleaved, 8000, 2).unwrap();

        let waveform = decode_bytes(&bytes, 30.0).unwrap();
        assert_eq!(waveform.source_channels(), 2);
        assert_eq!(waveform.len(), 4000);
        // Opposite-phase channels cancel out
        assert!(waveform.samples().iter().all(|s| s.abs() < 1e-3));
    }

    // 77 frames of MPEG-1 Layer III, mono, 44.1 kHz
    const TONE_MP3: &[u8] = include_bytes!("../../tests/fixtures/tone.mp3");

    #[test]
    fn test_decode_mp3_preserves_rate() {
        let waveform = decode_bytes(TONE_MP3, 30.0).unwrap();
        assert_eq!(waveform.sample_rate(), 44100);
        assert_eq!(waveform.source_channels(), 1);
        assert!(waveform.duration_secs() > 1.9);
        assert!(waveform.samples().iter().any(|s| s.abs() > 1e-4));
    }

    #[test]
    fn test_decode_mp3_truncates_to_cap() {
        let waveform = decode_bytes(TONE_MP3, 1.0).unwrap();
        assert_eq!(waveform.sample_rate(), 44100);
        assert_eq!(waveform.len(), 44100);
    }

    #[test]
    fn test_waveform_rejects_empty() {
        assert!(Waveform::new(vec![], 16000).is_err());
        assert!(Waveform::new(vec![0.0; 10], 16000).is_ok());
    }
}
