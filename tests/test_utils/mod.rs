#![allow(dead_code)]

use std::path::PathBuf;
use std::process::Command;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tokio::net::TcpListener;

use voicecheckr::config::{AuditConfig, ServerConfig, DEFAULT_API_KEY};
use voicecheckr::server::{MemorySink, VoiceServer};
use voicecheckr::testgen::{encode_wav, monotone_speech_like, varied_speech_like};

pub const SAMPLE_RATE: u32 = 22050;

pub fn get_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_voicecheckr"))
}

pub fn run_voicecheckr() -> Command {
    let mut cmd = Command::new(get_binary_path());
    cmd.env("RUST_LOG", "warn");
    cmd
}

/// Steady tone that every scoring rule flags as synthetic
pub fn monotone_wav(secs: f32) -> Vec<u8> {
    encode_wav(&monotone_speech_like(SAMPLE_RATE, secs), SAMPLE_RATE, 1).expect("encode monotone wav")
}

/// Gated sweep with speech-like variability
pub fn varied_wav(secs: f32) -> Vec<u8> {
    encode_wav(&varied_speech_like(SAMPLE_RATE, secs), SAMPLE_RATE, 1).expect("encode varied wav")
}

/// Two seconds of a steady tone as MPEG-1 Layer III, mono, 44.1 kHz
pub fn tone_mp3() -> &'static [u8] {
    include_bytes!("../fixtures/tone.mp3")
}

pub fn to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Bytes no audio demuxer recognizes
pub fn garbage_bytes() -> Vec<u8> {
    b"definitely not an audio stream, just plain text repeated. ".repeat(20)
}

/// Running API server backed by an in-memory audit sink
pub struct TestServer {
    pub base_url: String,
    pub audit: Arc<MemorySink>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Start a server on an ephemeral port with the default API key
pub async fn spawn_server() -> TestServer {
    spawn_server_with(ServerConfig {
        bind_address: "127.0.0.1:0".to_string(),
        api_key: DEFAULT_API_KEY.to_string(),
        audit: AuditConfig::Memory,
        ..Default::default()
    })
    .await
}

/// Start a server with a custom configuration, always auditing to memory
pub async fn spawn_server_with(config: ServerConfig) -> TestServer {
    let audit = Arc::new(MemorySink::new());
    let server = VoiceServer::with_sink(config, audit.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(server.serve(listener));

    TestServer {
        base_url: format!("http://{}", addr),
        audit,
    }
}
