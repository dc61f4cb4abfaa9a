// src/core/classifier.rs
//
// Rule-based verdict from the feature vector.
// Each scoring feature maps to an AI-likelihood indicator through a fixed
// table of half-open bands; the verdict is the mean indicator.

use crate::detection::{Classification, ClassificationResult, IndicatorScore, ScoredFeature, HUMAN_EXPLANATION};

use super::analysis::FeatureVector;

/// Labels containing this marker never appear in an AI explanation
const NATURAL_MARKER: &str = "Natural";

/// Maximum number of labels joined into an AI explanation
const MAX_EXPLANATION_LABELS: usize = 2;

/// Indicators above this mean classify as AI-generated
const AI_THRESHOLD: f64 = 0.5;

/// `value < upper` selects this band
#[derive(Debug, Clone, Copy)]
pub struct Band {
    pub upper: f64,
    pub score: f64,
    pub label: Option<&'static str>,
}

/// Scoring rule for one feature
#[derive(Debug, Clone, Copy)]
pub struct FeatureRule {
    pub feature: ScoredFeature,
    /// Checked in order; the first band whose upper bound exceeds the value wins
    pub bands: &'static [Band],
    /// Used when no band matches
    pub otherwise: (f64, Option<&'static str>),
}

impl FeatureRule {
    pub fn score(&self, value: f64) -> IndicatorScore {
        let (score, label) = self
            .bands
            .iter()
            .find(|band| value < band.upper)
            .map(|band| (band.score, band.label))
            .unwrap_or(self.otherwise);
        IndicatorScore::new(self.feature, score, label)
    }
}

/// Rules in extraction order
pub const RULES: [FeatureRule; 5] = [
    FeatureRule {
        feature: ScoredFeature::Pitch,
        bands: &[
            Band {
                upper: 50.0,
                score: 0.8,
                label: Some("Unnatural pitch consistency detected"),
            },
            Band {
                upper: 100.0,
                score: 0.5,
                label: Some("Moderate pitch variation"),
            },
        ],
        otherwise: (0.2, Some("Natural pitch variation")),
    },
    FeatureRule {
        feature: ScoredFeature::ZeroCrossingRate,
        bands: &[Band {
            upper: 0.02,
            score: 0.7,
            label: Some("Robotic speech patterns"),
        }],
        otherwise: (0.3, None),
    },
    FeatureRule {
        feature: ScoredFeature::SpectralCentroid,
        bands: &[Band {
            upper: 200.0,
            score: 0.75,
            label: Some("Low spectral dynamics"),
        }],
        otherwise: (0.25, None),
    },
    FeatureRule {
        feature: ScoredFeature::Energy,
        bands: &[Band {
            upper: 0.02,
            score: 0.7,
            label: Some("Uniform energy distribution"),
        }],
        otherwise: (0.3, None),
    },
    FeatureRule {
        feature: ScoredFeature::SpectralContrast,
        bands: &[Band {
            upper: 5.0,
            score: 0.65,
            label: Some("Flat tonal quality"),
        }],
        otherwise: (0.35, None),
    },
];

/// Score every feature against the rule table
pub fn evaluate(features: &FeatureVector) -> Vec<IndicatorScore> {
    RULES
        .iter()
        .map(|rule| rule.score(features.scoring_value(rule.feature)))
        .collect()
}

/// Turn indicator scores into a verdict.
///
/// An empty slice yields the fallback result.
pub fn decide(indicators: &[IndicatorScore]) -> ClassificationResult {
    if indicators.is_empty() {
        return ClassificationResult::fallback();
    }

    let ai_probability = indicators.iter().map(|i| i.score).sum::<f64>() / indicators.len() as f64;

    if ai_probability > AI_THRESHOLD {
        let explanation = indicators
            .iter()
            .filter_map(|i| i.label)
            .filter(|label| !label.contains(NATURAL_MARKER))
            .take(MAX_EXPLANATION_LABELS)
            .collect::<Vec<_>>()
            .join(", ");
        ClassificationResult::new(Classification::AiGenerated, ai_probability, explanation)
    } else {
        ClassificationResult::new(Classification::Human, 1.0 - ai_probability, HUMAN_EXPLANATION)
    }
}

/// Classify a feature vector
pub fn classify(features: &FeatureVector) -> ClassificationResult {
    decide(&evaluate(features))
}
