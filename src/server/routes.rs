// src/server/routes.rs
//
// Request handlers. Validation runs in a fixed order: API key, language,
// audio format, base64 payload.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::{error, info, warn};
use serde_json::{json, Value};

use super::audit::AnalysisRecord;
use super::error::ApiError;
use super::models::{Language, VoiceDetectionRequest, VoiceDetectionResponse, SUPPORTED_FORMAT};
use super::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Standard base64 with line breaks and other ASCII whitespace ignored
fn decode_payload(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let compact: Vec<u8> = encoded
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    STANDARD.decode(compact)
}

pub(super) async fn root() -> Json<Value> {
    Json(json!({ "message": "AI Voice Detection API v1.0" }))
}

pub(super) async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": "voice-detection-api" }))
}

pub(super) async fn voice_detection(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<VoiceDetectionRequest>,
) -> Result<Json<VoiceDetectionResponse>, ApiError> {
    let api_key = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok());
    if api_key != Some(&*state.api_key) {
        warn!("Rejected request with missing or invalid API key");
        return Err(ApiError::Unauthorized);
    }

    let language: Language = request.language.parse().map_err(|_| {
        warn!("Rejected unsupported language {:?}", request.language);
        ApiError::InvalidLanguage
    })?;

    if request.audio_format.to_lowercase() != SUPPORTED_FORMAT {
        warn!("Rejected audio format {:?}", request.audio_format);
        return Err(ApiError::UnsupportedFormat);
    }

    let audio = decode_payload(&request.audio_base64).map_err(|e| {
        warn!("Rejected malformed base64 payload: {}", e);
        ApiError::InvalidBase64
    })?;

    let analyzer = state.analyzer.clone();
    let outcome = tokio::task::spawn_blocking(move || analyzer.analyze_bytes(&audio))
        .await
        .map_err(|e| {
            error!("Analysis task failed: {}", e);
            ApiError::Internal(e.to_string())
        })?;
    let result = outcome.into_result();

    let record = AnalysisRecord::new(language, &result);
    state.audit.record(&record).map_err(|e| {
        error!("Voice detection error: {}", e);
        ApiError::Internal(e.to_string())
    })?;

    info!(
        "{} analysis {}: {} ({:.2})",
        language, record.id, result.classification, result.confidence
    );

    Ok(Json(VoiceDetectionResponse::success(language, result)))
}
