// src/cli/mod.rs
//
// Command-line interface module

mod args;
mod output;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colorful::Colorful;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use log::{info, warn};
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::core::{AnalysisOutcome, VoiceAnalyzer};
use crate::detection::ClassificationResult;
use crate::server::VoiceServer;

pub use args::{AnalyzeArgs, Cli, Command, ServeArgs};
pub use output::{format_json, print_report, print_summary, FileReport};

/// Extensions picked up when walking directories
pub const AUDIO_EXTENSIONS: [&str; 7] = ["mp3", "wav", "flac", "ogg", "m4a", "aac", "opus"];

/// Dispatch a parsed command line
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Serve(args) => run_serve(&args),
        Command::Analyze(args) => run_analyze(&args),
    }
}

/// Start the HTTP API on a multi-threaded runtime
pub fn run_serve(args: &ServeArgs) -> Result<()> {
    let config = args.to_config();
    info!("Audit sink: {:?}", config.audit);
    let server = VoiceServer::new(config)?;

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(server.run())
}

/// Analyze local files in parallel and print the results
pub fn run_analyze(args: &AnalyzeArgs) -> Result<()> {
    let files = collect_audio_files(&args.paths);
    if files.is_empty() {
        println!("{}", "No audio files found!".red());
        return Ok(());
    }

    let analyzer = VoiceAnalyzer::builder().max_duration(args.max_duration).build();

    let progress = if args.json {
        ProgressBar::hidden()
    } else {
        println!("Found {} audio file(s)\n", files.len());
        ProgressBar::new(files.len() as u64)
    };
    progress.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
            .context("Invalid progress template")?
            .progress_chars("#>-"),
    );

    let reports: Vec<FileReport> = files
        .par_iter()
        .progress_with(progress.clone())
        .map(|path| FileReport {
            path: path.clone(),
            outcome: analyze_file(&analyzer, path),
        })
        .collect();
    progress.finish_and_clear();

    if args.json {
        println!("{}", format_json(&reports)?);
    } else {
        for report in &reports {
            print_report(report, args.verbose);
        }
        print_summary(&reports);
    }

    Ok(())
}

/// Read and analyze one file; unreadable files take the fallback path
pub fn analyze_file(analyzer: &VoiceAnalyzer, path: &Path) -> AnalysisOutcome {
    match fs::read(path) {
        Ok(bytes) => analyzer.analyze_bytes(&bytes),
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            AnalysisOutcome::Fallback {
                result: ClassificationResult::fallback(),
                reason: format!("failed to read file: {}", e),
            }
        }
    }
}

fn has_audio_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| AUDIO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Expand files and directories into a sorted list of audio files
pub fn collect_audio_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            // Explicitly named files are analyzed regardless of extension
            files.push(path.clone());
        } else if path.is_dir() {
            files.extend(
                WalkDir::new(path)
                    .follow_links(true)
                    .into_iter()
                    .filter_map(|e| e.ok())
                    .filter(|e| e.file_type().is_file() && has_audio_extension(e.path()))
                    .map(|e| e.into_path()),
            );
        } else {
            warn!("Skipping missing path {}", path.display());
        }
    }

    files.sort();
    files.dedup();
    files
}
