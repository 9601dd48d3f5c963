//! Grouped versus singles comparison.
//!
//! Estimates the cost of serving one plot under each layout:
//!
//! ```text
//! grouped = grouped_scan_ms / N + large_sequential_ms / D
//! singles = singles_scan_ms / N + single_sequential_ms / D
//! ```
//!
//! `D` defaults to 32, a factor carried over from the partition layout of the
//! scanning workload. It is not derived from any other parameter.

use crate::bench::{BenchmarkResult, PatternKind};
use std::collections::BTreeMap;

/// Divisor applied to the sequential partition reads.
pub const DEFAULT_NORMALIZATION_DIVISOR: f64 = 32.0;

/// Outcome of the comparison.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(tag = "kind", content = "ratio", rename_all = "snake_case")]
pub enum Verdict {
    /// `singles / grouped`; above 1.0 the grouped layout wins.
    Speedup(f64),
    /// `grouped / singles`, reported when the grouped total is zero.
    Slowdown(f64),
    /// Both totals are zero.
    Indeterminate,
}

impl Verdict {
    /// Compare per-plot totals in milliseconds.
    pub fn from_totals(grouped_ms: f64, singles_ms: f64) -> Self {
        if grouped_ms > 0.0 {
            Self::Speedup(singles_ms / grouped_ms)
        } else if singles_ms > 0.0 {
            Self::Slowdown(grouped_ms / singles_ms)
        } else {
            Self::Indeterminate
        }
    }
}

/// Comparison values derived from one run.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Comparison {
    /// Total grouped scan time (first read includes the seek).
    pub grouped_scan_ms: f64,
    /// Total singles scan time.
    pub singles_scan_ms: f64,
    /// Total whole-group sequential read time.
    pub grouped_large_sequential_ms: f64,
    /// Total single-plot sequential read time.
    pub singles_sequential_ms: f64,
    /// Estimated per-plot cost with a grouped layout.
    pub grouped_total_avg_ms: f64,
    /// Estimated per-plot cost with one plot per location.
    pub singles_total_avg_ms: f64,
    /// Which layout wins, and by how much.
    pub verdict: Verdict,
}

/// Turns per-pattern results into a [`Comparison`].
#[derive(Debug, Clone, Copy)]
pub struct ComparativeAnalyzer {
    group_size: usize,
    divisor: f64,
}

impl ComparativeAnalyzer {
    /// Create an analyzer for groups of `group_size` plots.
    pub fn new(group_size: usize) -> Self {
        Self::with_divisor(group_size, DEFAULT_NORMALIZATION_DIVISOR)
    }

    /// Create an analyzer with a custom sequential divisor.
    pub fn with_divisor(group_size: usize, divisor: f64) -> Self {
        Self {
            group_size,
            divisor,
        }
    }

    /// Compare using the results of a run. Missing patterns count as zero.
    pub fn analyze(&self, results: &BTreeMap<PatternKind, BenchmarkResult>) -> Comparison {
        let total_ms = |kind: PatternKind| {
            results
                .get(&kind)
                .map_or(0.0, |r| r.total_nanos() as f64 / 1_000_000.0)
        };

        self.compare(
            total_ms(PatternKind::GroupedScan),
            total_ms(PatternKind::SinglesScan),
            total_ms(PatternKind::LargeSequential),
            total_ms(PatternKind::SingleSequential),
        )
    }

    /// Compare using raw millisecond totals.
    pub fn compare(
        &self,
        grouped_scan_ms: f64,
        singles_scan_ms: f64,
        grouped_large_sequential_ms: f64,
        singles_sequential_ms: f64,
    ) -> Comparison {
        let n = self.group_size as f64;
        let grouped_total_avg_ms = grouped_scan_ms / n + grouped_large_sequential_ms / self.divisor;
        let singles_total_avg_ms = singles_scan_ms / n + singles_sequential_ms / self.divisor;

        Comparison {
            grouped_scan_ms,
            singles_scan_ms,
            grouped_large_sequential_ms,
            singles_sequential_ms,
            grouped_total_avg_ms,
            singles_total_avg_ms,
            verdict: Verdict::from_totals(grouped_total_avg_ms, singles_total_avg_ms),
        }
    }
}
