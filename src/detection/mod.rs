//! Detection module for voicecheckr

mod result;

pub use result::{
    round2, Classification, ClassificationResult, IndicatorScore, ScoredFeature,
    FALLBACK_CONFIDENCE, FALLBACK_EXPLANATION, HUMAN_EXPLANATION,
};
