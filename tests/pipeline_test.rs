// tests/pipeline_test.rs
//
// End-to-end tests of decode, feature extraction and classification.

mod test_utils;

use rayon::prelude::*;

use test_utils::*;
use voicecheckr::core::{classify, decode_bytes, AnalysisOutcome, DecodeError};
use voicecheckr::detection::{Classification, FALLBACK_EXPLANATION, HUMAN_EXPLANATION};
use voicecheckr::testgen::{encode_wav, sine_wave};
use voicecheckr::{FeatureVector, VoiceAnalyzer};

fn features(pitch: f64, zcr: f64, centroid: f64, rms: f64, contrast: f64) -> FeatureVector {
    FeatureVector {
        pitch_std: pitch,
        zcr_std: zcr,
        spectral_centroid_std: centroid,
        rms_std: rms,
        contrast_std: contrast,
        ..Default::default()
    }
}

#[test]
fn test_synthetic_feature_profile() {
    let result = classify(&features(30.0, 0.01, 100.0, 0.01, 3.0));
    assert_eq!(result.classification, Classification::AiGenerated);
    assert_eq!(result.confidence, 0.72);
}

#[test]
fn test_natural_feature_profile() {
    let result = classify(&features(150.0, 0.05, 400.0, 0.05, 8.0));
    assert_eq!(result.classification, Classification::Human);
    assert_eq!(result.confidence, 0.72);
    assert_eq!(result.explanation, HUMAN_EXPLANATION);
}

#[test]
fn test_garbage_bytes_fall_back() {
    let outcome = VoiceAnalyzer::new().analyze_bytes(&garbage_bytes());
    let result = outcome.result();
    assert!(outcome.is_fallback());
    assert_eq!(result.classification, Classification::Human);
    assert_eq!(result.confidence, 0.55);
    assert_eq!(result.explanation, FALLBACK_EXPLANATION);
}

#[test]
fn test_truncated_wav_does_not_panic() {
    let wav = monotone_wav(1.0);
    for cut in [4, 12, 44, 100] {
        let outcome = VoiceAnalyzer::new().analyze_bytes(&wav[..cut]);
        let confidence = outcome.result().confidence;
        assert!((0.0..=1.0).contains(&confidence));
    }
}

#[test]
fn test_decode_caps_duration_without_resampling() {
    let wav = monotone_wav(5.0);
    let waveform = decode_bytes(&wav, 2.0).unwrap();
    assert_eq!(waveform.sample_rate(), SAMPLE_RATE);
    assert_eq!(waveform.len(), 2 * SAMPLE_RATE as usize);
}

#[test]
fn test_decode_empty_input() {
    assert!(matches!(decode_bytes(&[], 30.0), Err(DecodeError::Empty)));
}

#[test]
fn test_mp3_decodes_at_native_rate() {
    let waveform = decode_bytes(tone_mp3(), 30.0).unwrap();
    assert_eq!(waveform.sample_rate(), 44100);
    assert!(waveform.len() > 44100);

    let capped = decode_bytes(tone_mp3(), 0.5).unwrap();
    assert_eq!(capped.len(), 22050);
}

#[test]
fn test_mp3_is_analyzed() {
    match VoiceAnalyzer::new().analyze_bytes(tone_mp3()) {
        AnalysisOutcome::Analyzed { result, features } => {
            assert!(features.rms_std.is_finite());
            assert!(result.confidence >= 0.5 && result.confidence <= 1.0);
            assert_ne!(result.explanation, FALLBACK_EXPLANATION);
        }
        other => panic!("expected analysis, got {:?}", other),
    }
}

#[test]
fn test_stereo_is_downmixed_by_averaging() {
    // Left and right cancel exactly
    let tone = sine_wave(440.0, 16000, 1.0, 0.5);
    let interleaved: Vec<f32> = tone.iter().flat_map(|&s| [s, -s]).collect();
    let wav = encode_wav(&interleaved, 16000, 2).unwrap();

    let waveform = decode_bytes(&wav, 30.0).unwrap();
    assert_eq!(waveform.source_channels(), 2);
    assert_eq!(waveform.len(), 16000);
    assert!(waveform.samples().iter().all(|s| s.abs() < 1e-6));
}

#[test]
fn test_silence_scores_as_synthetic() {
    let wav = encode_wav(&vec![0.0; 32000], 16000, 1).unwrap();
    match VoiceAnalyzer::new().analyze_bytes(&wav) {
        AnalysisOutcome::Analyzed { result, features } => {
            assert_eq!(features.pitch_std, 0.0);
            assert_eq!(features.rms_std, 0.0);
            assert_eq!(result.classification, Classification::AiGenerated);
            assert_eq!(result.confidence, 0.72);
            assert_eq!(
                result.explanation,
                "Unnatural pitch consistency detected, Robotic speech patterns"
            );
        }
        other => panic!("expected analysis, got {:?}", other),
    }
}

#[test]
fn test_end_to_end_verdicts() {
    let analyzer = VoiceAnalyzer::new();
    assert_eq!(
        analyzer.analyze_bytes(&monotone_wav(5.0)).result().classification,
        Classification::AiGenerated
    );
    assert_eq!(
        analyzer.analyze_bytes(&varied_wav(5.0)).result().classification,
        Classification::Human
    );
}

#[test]
fn test_concurrent_analyses_are_identical() {
    let analyzer = VoiceAnalyzer::new();
    let wav = varied_wav(2.0);
    let expected = analyzer.analyze_bytes(&wav);

    let outcomes: Vec<AnalysisOutcome> = (0..8)
        .into_par_iter()
        .map(|_| analyzer.analyze_bytes(&wav))
        .collect();
    assert!(outcomes.iter().all(|o| *o == expected));
}
