//! Results processing and output.
//!
//! - `stats` reduces samples to descriptive statistics
//! - `compare` turns per-pattern totals into the grouped vs singles verdict
//! - `BenchmarkPrinter` writes the console report
//! - `export_json` writes a machine-readable report

pub mod compare;
pub mod format;
pub mod live;
pub mod printer;
pub mod stats;

pub use compare::{ComparativeAnalyzer, Comparison, Verdict, DEFAULT_NORMALIZATION_DIVISOR};
pub use format::{format_bytes, format_duration, format_stats_line, format_verdict};
pub use live::LiveProgressReporter;
pub use printer::BenchmarkPrinter;
pub use stats::{compute_stats, compute_stats_ns, percentile, Statistics};

use crate::bench::{AccessPattern, PatternKind, RunReport};
use crate::config::{BenchConfig, PlotLayout};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

/// JSON-serializable benchmark report
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    pub metadata: ReportMetadata,
    pub patterns: Vec<PatternJson>,
    pub skipped: Vec<SkippedJson>,
    pub comparison: Comparison,
}

/// Report metadata
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub timestamp: String,
    pub platform: String,
    pub version: String,
    pub file: String,
    pub file_size: u64,
    #[serde(flatten)]
    pub layout: PlotLayout,
    pub iterations: usize,
    pub normalization_divisor: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub no_cache: bool,
    pub cache_disabled: bool,
}

/// JSON-serializable per-pattern result
#[derive(Debug, Clone, Serialize)]
pub struct PatternJson {
    pub kind: PatternKind,
    pub label: String,
    pub pattern: AccessPattern,
    pub parameters: HashMap<String, String>,
    pub sample_count: usize,
    pub short_reads: usize,
    pub stats: Option<Statistics>,
    pub raw_samples_ns: Vec<u64>,
}

/// A pattern that produced no result
#[derive(Debug, Clone, Serialize)]
pub struct SkippedJson {
    pub kind: PatternKind,
    pub reason: String,
}

impl JsonReport {
    /// Build the report for a finished run.
    pub fn from_run(report: &RunReport, config: &BenchConfig) -> Self {
        let patterns = report
            .results
            .values()
            .map(|result| PatternJson {
                kind: result.kind,
                label: result.label.clone(),
                pattern: result.pattern,
                parameters: result.pattern.parameters(),
                sample_count: result.sample_count(),
                short_reads: result.short_reads(),
                stats: compute_stats(&result.samples),
                raw_samples_ns: result.durations_ns(),
            })
            .collect();

        let skipped = report
            .skipped
            .iter()
            .map(|s| SkippedJson {
                kind: s.kind,
                reason: s.reason.clone(),
            })
            .collect();

        Self {
            metadata: ReportMetadata {
                timestamp: chrono::Utc::now().to_rfc3339(),
                platform: format!("{} {}", std::env::consts::OS, std::env::consts::ARCH),
                version: env!("CARGO_PKG_VERSION").to_string(),
                file: config.path.display().to_string(),
                file_size: report.file_size,
                layout: report.layout,
                iterations: config.iterations,
                normalization_divisor: config.normalization_divisor,
                seed: report.seed,
                no_cache: config.no_cache,
                cache_disabled: report.cache_disabled,
            },
            patterns,
            skipped,
            comparison: report.comparison,
        }
    }
}

/// Export results to JSON file
pub fn export_json(report: &RunReport, config: &BenchConfig, path: &Path) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&JsonReport::from_run(report, config))?;
    std::fs::write(path, json)?;
    Ok(())
}
