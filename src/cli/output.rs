//! Output formatting for CLI results

use std::path::{Path, PathBuf};

use colorful::Colorful;
use serde::Serialize;

use crate::core::{AnalysisOutcome, FeatureVector};
use crate::detection::{Classification, ClassificationResult};

/// Analysis of one file
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: AnalysisOutcome,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    file: &'a Path,
    #[serde(flatten)]
    result: &'a ClassificationResult,
    fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    features: Option<&'a FeatureVector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
}

impl FileReport {
    fn to_json(&self) -> JsonReport<'_> {
        let reason = match &self.outcome {
            AnalysisOutcome::Fallback { reason, .. } => Some(reason.as_str()),
            AnalysisOutcome::Analyzed { .. } => None,
        };
        JsonReport {
            file: &self.path,
            result: self.outcome.result(),
            fallback: self.outcome.is_fallback(),
            features: self.outcome.features(),
            reason,
        }
    }
}

/// Print a colored report for one file
pub fn print_report(report: &FileReport, verbose: bool) {
    let result = report.outcome.result();
    let verdict = format!("{} {}", result.classification.symbol(), result.classification);
    let verdict = match result.classification {
        Classification::AiGenerated => verdict.red().bold(),
        Classification::Human => verdict.green().bold(),
    };

    println!("{}", report.path.display().to_string().cyan());
    println!("  {} (confidence: {:.0}%)", verdict, result.confidence * 100.0);
    println!("  {}", result.explanation.clone().dim());

    if let AnalysisOutcome::Fallback { reason, .. } = &report.outcome {
        println!("  {}", format!("Analysis incomplete: {}", reason).yellow());
    }

    if verbose {
        if let Some(features) = report.outcome.features() {
            println!("\n  Features:");
            println!("    Pitch std:             {:.2} Hz", features.pitch_std);
            println!("    ZCR mean / std:        {:.4} / {:.4}", features.zcr_mean, features.zcr_std);
            println!("    Spectral centroid std: {:.2} Hz", features.spectral_centroid_std);
            println!("    Spectral rolloff std:  {:.2} Hz", features.spectral_rolloff_std);
            println!("    MFCC std:              {:.3}", features.mfcc_std);
            println!("    RMS std:               {:.4}", features.rms_std);
            println!("    Spectral contrast std: {:.3} dB", features.contrast_std);
        }
    }
    println!();
}

/// Print a summary line after a batch
pub fn print_summary(reports: &[FileReport]) {
    let ai = reports
        .iter()
        .filter(|r| r.outcome.result().classification == Classification::AiGenerated)
        .count();
    let fallback = reports.iter().filter(|r| r.outcome.is_fallback()).count();
    let human = reports.len() - ai;

    println!(
        "{} file(s): {} AI-generated, {} human ({} incomplete)",
        reports.len(),
        ai.to_string().red(),
        human.to_string().green(),
        fallback
    );
}

/// Serialize reports as a JSON array
pub fn format_json(reports: &[FileReport]) -> serde_json::Result<String> {
    let items: Vec<JsonReport<'_>> = reports.iter().map(FileReport::to_json).collect();
    serde_json::to_string_pretty(&items)
}
