//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{
    parse_origins, AnalysisConfig, AuditConfig, ServerConfig, DEFAULT_API_KEY,
    DEFAULT_BIND_ADDRESS, DEFAULT_MAX_BODY_BYTES,
};
use crate::core::DEFAULT_MAX_DURATION_SECS;

#[derive(Parser, Debug)]
#[command(name = "voicecheckr")]
#[command(version, about = "Detect AI-generated speech from acoustic variability features")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP detection API
    Serve(ServeArgs),
    /// Analyze local audio files
    Analyze(AnalyzeArgs),
}

#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    /// Listen address (`host:port` or `:port`)
    #[arg(long, env = "VOICECHECKR_BIND", default_value = DEFAULT_BIND_ADDRESS)]
    pub bind: String,

    /// Key expected in the x-api-key header
    #[arg(long, env = "VOICECHECKR_API_KEY", default_value = DEFAULT_API_KEY, hide_env_values = true)]
    pub api_key: String,

    /// Comma-separated allowed CORS origins, `*` for any
    #[arg(long, env = "CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Largest accepted request body in bytes
    #[arg(long, env = "VOICECHECKR_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,

    /// JSON-lines audit log path
    #[arg(long, env = "VOICECHECKR_AUDIT_LOG")]
    pub audit_log: Option<PathBuf>,

    /// Keep audit records in memory instead of on disk
    #[arg(long, conflicts_with = "audit_log")]
    pub memory_audit: bool,
}

impl ServeArgs {
    pub fn to_config(&self) -> ServerConfig {
        let audit = if self.memory_audit {
            AuditConfig::Memory
        } else {
            AuditConfig::JsonLines(self.audit_log.clone().unwrap_or_else(AuditConfig::default_path))
        };

        ServerConfig {
            bind_address: self.bind.clone(),
            api_key: self.api_key.clone(),
            cors_origins: parse_origins(&self.cors_origins),
            max_body_bytes: self.max_body_bytes,
            audit,
            analysis: AnalysisConfig::default(),
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct AnalyzeArgs {
    /// Audio files or directories
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Emit JSON instead of the colored report
    #[arg(long)]
    pub json: bool,

    /// Show feature values
    #[arg(short, long)]
    pub verbose: bool,

    /// Seconds of audio analyzed per file
    #[arg(long, default_value_t = DEFAULT_MAX_DURATION_SECS)]
    pub max_duration: f64,
}
