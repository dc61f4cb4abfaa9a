// src/main.rs
use anyhow::Result;
use clap::Parser;

use voicecheckr::cli::{self, Cli};

fn main() -> Result<()> {
    // RUST_LOG overrides the default filter
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    cli::run(Cli::parse())
}
