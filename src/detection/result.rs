//! Classification result types

use std::fmt;

use serde::{Deserialize, Serialize};

/// Explanation used when analysis succeeds and the speech looks natural
pub const HUMAN_EXPLANATION: &str = "Natural speech characteristics and human-like variations detected";

/// Explanation used when the pipeline could not complete
pub const FALLBACK_EXPLANATION: &str =
    "Unable to analyze audio features completely, defaulting to human classification";

/// Confidence reported with the fallback result
pub const FALLBACK_CONFIDENCE: f64 = 0.55;

/// Binary verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    AiGenerated,
    Human,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::AiGenerated => "AI_GENERATED",
            Classification::Human => "HUMAN",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Classification::AiGenerated => "✗",
            Classification::Human => "✓",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Features that take part in scoring, in extraction order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoredFeature {
    Pitch,
    ZeroCrossingRate,
    SpectralCentroid,
    Energy,
    SpectralContrast,
}

impl ScoredFeature {
    pub fn name(&self) -> &'static str {
        match self {
            ScoredFeature::Pitch => "pitch",
            ScoredFeature::ZeroCrossingRate => "zcr",
            ScoredFeature::SpectralCentroid => "spectral-centroid",
            ScoredFeature::Energy => "energy",
            ScoredFeature::SpectralContrast => "spectral-contrast",
        }
    }
}

/// AI-likelihood contribution of one feature
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorScore {
    pub feature: ScoredFeature,
    /// Likelihood in [0, 1] that the feature value comes from synthetic speech
    pub score: f64,
    pub label: Option<&'static str>,
}

impl IndicatorScore {
    pub fn new(feature: ScoredFeature, score: f64, label: Option<&'static str>) -> Self {
        Self {
            feature,
            score: score.clamp(0.0, 1.0),
            label,
        }
    }
}

/// Final verdict handed back to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub classification: Classification,
    /// Confidence in [0, 1], rounded to two decimals
    pub confidence: f64,
    pub explanation: String,
}

impl ClassificationResult {
    pub fn new(classification: Classification, confidence: f64, explanation: impl Into<String>) -> Self {
        Self {
            classification,
            confidence: round2(confidence.clamp(0.0, 1.0)),
            explanation: explanation.into(),
        }
    }

    /// Safe default returned whenever analysis cannot complete
    pub fn fallback() -> Self {
        Self::new(Classification::Human, FALLBACK_CONFIDENCE, FALLBACK_EXPLANATION)
    }

    pub fn is_fallback(&self) -> bool {
        *self == Self::fallback()
    }
}

/// Round to two decimals, ties to even
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
