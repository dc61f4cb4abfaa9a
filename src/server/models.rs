// src/server/models.rs
//
// JSON request and response bodies of the voice detection API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::detection::{Classification, ClassificationResult};

/// Only accepted value of `audioFormat` (case-insensitive)
pub const SUPPORTED_FORMAT: &str = "mp3";

/// Languages accepted by the detection endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    Tamil,
    English,
    Hindi,
    Malayalam,
    Telugu,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::Tamil,
        Language::English,
        Language::Hindi,
        Language::Malayalam,
        Language::Telugu,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Tamil => "Tamil",
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Malayalam => "Malayalam",
            Language::Telugu => "Telugu",
        }
    }

    /// Comma-separated list used in validation messages
    pub fn supported_list() -> String {
        Self::ALL.iter().map(Language::as_str).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for names outside [`Language::ALL`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    /// Exact, case-sensitive match
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|lang| lang.as_str() == s)
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

fn default_audio_format() -> String {
    SUPPORTED_FORMAT.to_string()
}

/// Body of `POST /api/voice-detection`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceDetectionRequest {
    pub language: String,
    #[serde(default = "default_audio_format")]
    pub audio_format: String,
    pub audio_base64: String,
}

/// Successful detection response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceDetectionResponse {
    pub status: String,
    pub language: String,
    pub classification: Classification,
    pub confidence_score: f64,
    pub explanation: String,
}

impl VoiceDetectionResponse {
    pub fn success(language: Language, result: ClassificationResult) -> Self {
        Self {
            status: "success".to_string(),
            language: language.to_string(),
            classification: result.classification,
            confidence_score: result.confidence,
            explanation: result.explanation,
        }
    }
}

/// Body of every error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: String,
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }
}
