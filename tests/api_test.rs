// tests/api_test.rs
//
// HTTP API tests against a server bound to an ephemeral port.

mod test_utils;

use reqwest::StatusCode;
use serde_json::{json, Value};

use test_utils::*;
use voicecheckr::config::{AuditConfig, ServerConfig, DEFAULT_API_KEY};
use voicecheckr::detection::{FALLBACK_EXPLANATION, HUMAN_EXPLANATION};
use voicecheckr::Classification;

async fn post_detection(server: &TestServer, api_key: Option<&str>, body: Value) -> (StatusCode, Value) {
    let client = reqwest::Client::new();
    let mut request = client.post(server.url("/api/voice-detection")).json(&body);
    if let Some(key) = api_key {
        request = request.header("x-api-key", key);
    }
    let response = request.send().await.expect("request failed");
    let status = response.status();
    let body = response.json::<Value>().await.unwrap_or(Value::Null);
    (status, body)
}

fn detection_body(language: &str, format: &str, audio: &[u8]) -> Value {
    json!({
        "language": language,
        "audioFormat": format,
        "audioBase64": to_base64(audio),
    })
}

#[tokio::test]
async fn test_root_and_health() {
    let server = spawn_server().await;

    for path in ["/api", "/api/"] {
        let body: Value = reqwest::get(server.url(path)).await.unwrap().json().await.unwrap();
        assert_eq!(body, json!({ "message": "AI Voice Detection API v1.0" }));
    }

    let body: Value = reqwest::get(server.url("/api/health")).await.unwrap().json().await.unwrap();
    assert_eq!(body, json!({ "status": "healthy", "service": "voice-detection-api" }));
}

#[tokio::test]
async fn test_missing_api_key_is_unauthorized() {
    let server = spawn_server().await;
    let (status, body) = post_detection(&server, None, detection_body("English", "mp3", &monotone_wav(1.0))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "status": "error", "message": "Invalid API key or malformed request" }));
    assert!(server.audit.is_empty());
}

#[tokio::test]
async fn test_api_key_checked_before_language() {
    let server = spawn_server().await;
    let (status, _) = post_detection(&server, Some("wrong-key"), detection_body("French", "wav", b"!!")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_language() {
    let server = spawn_server().await;
    let (status, body) =
        post_detection(&server, Some(DEFAULT_API_KEY), detection_body("French", "mp3", &monotone_wav(1.0))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(
        body["message"],
        "Invalid language. Must be one of: Tamil, English, Hindi, Malayalam, Telugu"
    );
}

#[tokio::test]
async fn test_unsupported_format() {
    let server = spawn_server().await;
    let (status, body) =
        post_detection(&server, Some(DEFAULT_API_KEY), detection_body("Tamil", "wav", &monotone_wav(1.0))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Only MP3 format is supported");
}

#[tokio::test]
async fn test_invalid_base64() {
    let server = spawn_server().await;
    let body = json!({
        "language": "Hindi",
        "audioFormat": "mp3",
        "audioBase64": "this is *not* base64!",
    });
    let (status, body) = post_detection(&server, Some(DEFAULT_API_KEY), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid base64 encoding");
    assert!(server.audit.is_empty());
}

#[tokio::test]
async fn test_garbage_audio_falls_back_for_every_language() {
    let server = spawn_server().await;

    for language in ["Tamil", "English", "Hindi", "Malayalam", "Telugu"] {
        let (status, body) =
            post_detection(&server, Some(DEFAULT_API_KEY), detection_body(language, "mp3", &garbage_bytes())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["language"], language);
        assert_eq!(body["classification"], "HUMAN");
        assert_eq!(body["confidenceScore"], 0.55);
        assert_eq!(body["explanation"], FALLBACK_EXPLANATION);
    }

    assert_eq!(server.audit.len(), 5);
}

#[tokio::test]
async fn test_monotone_audio_is_ai_generated_and_audited() {
    let server = spawn_server().await;
    let (status, body) =
        post_detection(&server, Some(DEFAULT_API_KEY), detection_body("Malayalam", "MP3", &monotone_wav(5.0))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["classification"], "AI_GENERATED");
    let confidence = body["confidenceScore"].as_f64().unwrap();
    assert!(confidence > 0.5 && confidence <= 1.0);

    let records = server.audit.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].language, "Malayalam");
    assert_eq!(records[0].classification, Classification::AiGenerated);
    assert_eq!(records[0].confidence, confidence);
}

#[tokio::test]
async fn test_varied_audio_is_human_with_default_format() {
    let server = spawn_server().await;
    let body = json!({
        "language": "English",
        "audioBase64": to_base64(&varied_wav(5.0)),
    });
    let (status, body) = post_detection(&server, Some(DEFAULT_API_KEY), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["classification"], "HUMAN");
    assert_eq!(body["explanation"], HUMAN_EXPLANATION);
}

#[tokio::test]
async fn test_mp3_upload_is_analyzed() {
    let server = spawn_server().await;
    let (status, body) =
        post_detection(&server, Some(DEFAULT_API_KEY), detection_body("Telugu", "mp3", tone_mp3())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_ne!(body["explanation"], FALLBACK_EXPLANATION);
    assert_eq!(server.audit.len(), 1);
}

#[tokio::test]
async fn test_upload_longer_than_cap_is_accepted() {
    let server = spawn_server().await;
    // 45 s of 16-bit audio encodes to well over 2 MB of base64
    let body = detection_body("English", "mp3", &monotone_wav(45.0));
    assert!(body["audioBase64"].as_str().unwrap().len() > 2 * 1024 * 1024);

    let (status, body) = post_detection(&server, Some(DEFAULT_API_KEY), body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["classification"], "AI_GENERATED");
}

#[tokio::test]
async fn test_body_over_configured_limit_is_rejected() {
    let server = spawn_server_with(ServerConfig {
        max_body_bytes: 16 * 1024,
        audit: AuditConfig::Memory,
        ..Default::default()
    })
    .await;
    let (status, _) =
        post_detection(&server, Some(DEFAULT_API_KEY), detection_body("English", "mp3", &monotone_wav(1.0))).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(server.audit.is_empty());
}

#[tokio::test]
async fn test_line_wrapped_base64_is_accepted() {
    let server = spawn_server().await;
    let encoded = to_base64(&monotone_wav(2.0));
    let wrapped = encoded
        .as_bytes()
        .chunks(76)
        .map(|line| std::str::from_utf8(line).unwrap())
        .collect::<Vec<_>>()
        .join("\r\n");
    let body = json!({
        "language": "Hindi",
        "audioFormat": "mp3",
        "audioBase64": wrapped,
    });

    let (status, body) = post_detection(&server, Some(DEFAULT_API_KEY), body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["classification"], "AI_GENERATED");
}

#[tokio::test]
async fn test_malformed_json_is_client_error() {
    let server = spawn_server().await;
    let response = reqwest::Client::new()
        .post(server.url("/api/voice-detection"))
        .header("x-api-key", DEFAULT_API_KEY)
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_cors_preflight_allows_credentials() {
    let server = spawn_server().await;
    let response = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, server.url("/api/voice-detection"))
        .header("origin", "https://client.example")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "x-api-key, content-type")
        .send()
        .await
        .unwrap();

    assert!(response.status().is_success());
    let headers = response.headers();
    assert_eq!(headers.get("access-control-allow-origin").unwrap(), "https://client.example");
    assert_eq!(headers.get("access-control-allow-credentials").unwrap(), "true");
    assert_eq!(headers.get("access-control-allow-methods").unwrap(), "POST");
}
