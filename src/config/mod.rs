//! Configuration module for voicecheckr

mod analysis;
mod server;

pub use analysis::AnalysisConfig;
pub use server::{
    parse_origins, AuditConfig, ServerConfig, DEFAULT_API_KEY, DEFAULT_BIND_ADDRESS,
    DEFAULT_MAX_BODY_BYTES,
};
