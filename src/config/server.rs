// src/config/server.rs
//
// Runtime settings for the HTTP service.

use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::AnalysisConfig;

/// API key accepted when none is configured
pub const DEFAULT_API_KEY: &str = "sk_test_voice_detection_2026";

/// Default listen address
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8001";

/// Largest accepted request body, enough for several minutes of MP3 as base64
pub const DEFAULT_MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Where analysis records are written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditConfig {
    /// Append JSON lines to a file
    JsonLines(PathBuf),
    /// Keep records in process memory
    Memory,
}

impl AuditConfig {
    /// Default audit log location under the user data directory
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("voicecheckr")
            .join("voice_analyses.jsonl")
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self::JsonLines(Self::default_path())
    }
}

/// HTTP service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address, e.g. `0.0.0.0:8001` or `:8001`
    pub bind_address: String,
    /// Value expected in the `x-api-key` header
    pub api_key: String,
    /// Allowed CORS origins; `*` allows any
    pub cors_origins: Vec<String>,
    /// Request body limit in bytes
    pub max_body_bytes: usize,
    pub audit: AuditConfig,
    pub analysis: AnalysisConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            cors_origins: vec!["*".to_string()],
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            audit: AuditConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Parse the bind address; a bare `:port` listens on all interfaces
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        let addr = if self.bind_address.starts_with(':') {
            format!("0.0.0.0{}", self.bind_address)
        } else {
            self.bind_address.clone()
        };
        addr.parse()
    }

    /// Whether any origin may call the API
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o.trim() == "*")
    }
}

/// Split a comma-separated origin list
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect()
}
