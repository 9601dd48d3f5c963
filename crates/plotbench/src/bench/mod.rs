//! Benchmark definitions and execution.

mod pattern;
mod runner;
mod sampler;
mod suite;

pub use pattern::{
    grouped_scan, random_seeks, sequential_large, singles_scan, stride_seeks, AccessPattern,
    PatternError,
};
pub use runner::{BenchmarkRunner, RunError, RunReport, SkippedPattern};
pub use sampler::{Sample, Sampler};
pub use suite::{create_suite, PlannedPattern};

/// The five benchmark slots filled by a run.
///
/// Ordered as they execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// One seek, then `N` sequential scans.
    GroupedScan,
    /// `N` random seek + scan operations.
    SinglesScan,
    /// Partition walk across a grouped layout.
    StrideScan,
    /// Whole-group partition read in one transfer.
    LargeSequential,
    /// Single-plot partition read in one transfer.
    SingleSequential,
}

impl PatternKind {
    /// Every kind, in execution order.
    pub const ALL: [Self; 5] = [
        Self::GroupedScan,
        Self::SinglesScan,
        Self::StrideScan,
        Self::LargeSequential,
        Self::SingleSequential,
    ];

    /// Get the display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::GroupedScan => "Grouped scan",
            Self::SinglesScan => "Singles scan",
            Self::StrideScan => "Stride scan",
            Self::LargeSequential => "Large sequential",
            Self::SingleSequential => "Single sequential",
        }
    }
}

impl std::fmt::Display for PatternKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Samples collected for one pattern across all iterations.
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    /// Which slot this result fills.
    pub kind: PatternKind,
    /// The pattern that produced the samples.
    pub pattern: AccessPattern,
    /// Human-readable label including parameters.
    pub label: String,
    /// Size of the file the samples were taken from.
    pub file_size: u64,
    /// Samples in chronological order.
    pub samples: Vec<Sample>,
}

impl BenchmarkResult {
    /// Create an empty result.
    pub fn new(kind: PatternKind, pattern: AccessPattern, label: String, file_size: u64) -> Self {
        Self {
            kind,
            pattern,
            label,
            file_size,
            samples: Vec::new(),
        }
    }

    /// Append the samples of one iteration.
    pub fn extend(&mut self, samples: impl IntoIterator<Item = Sample>) {
        self.samples.extend(samples);
    }

    /// Get the number of samples.
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Sum of all sample durations in nanoseconds.
    pub fn total_nanos(&self) -> u64 {
        self.samples.iter().map(|s| s.nanos).sum()
    }

    /// Number of samples whose read came back short.
    pub fn short_reads(&self) -> usize {
        self.samples.iter().filter(|s| s.short_read).count()
    }

    /// Raw durations in nanoseconds.
    pub fn durations_ns(&self) -> Vec<u64> {
        self.samples.iter().map(|s| s.nanos).collect()
    }
}
