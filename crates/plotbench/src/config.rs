//! Configuration types for the benchmark.

use std::path::PathBuf;

use crate::results::DEFAULT_NORMALIZATION_DIVISOR;

/// Entries spanned by one partition range of a plot (2^28).
pub const PARTITION_SPAN_ENTRIES: u64 = 1 << 28;

/// Partitions per plot.
pub const PARTITIONS_PER_PLOT: u64 = 512;

/// Size of one proof fragment entry on disk.
pub const BYTES_PER_ENTRY: usize = 4;

/// Default number of plots scanned as one group.
pub const DEFAULT_GROUP_SIZE: usize = 64;

/// Default number of proof fragment entries read per scan.
pub const DEFAULT_SCAN_ELEMENTS: usize = 8192;

/// Default number of iterations per pattern.
pub const DEFAULT_ITERATIONS: usize = 1;

/// Configuration for a benchmark run.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// File to read.
    pub path: PathBuf,
    /// Number of plots in a group (`N`).
    pub group_size: usize,
    /// Proof fragment entries read per scan.
    pub scan_elements: usize,
    /// How many times each pattern is repeated.
    pub iterations: usize,
    /// Ask the platform to bypass the page cache and read-ahead.
    pub no_cache: bool,
    /// Seed for offset generation. `None` draws a fresh one.
    pub seed: Option<u64>,
    /// Divisor applied to sequential totals in the comparison.
    pub normalization_divisor: f64,
    /// Enable colored output.
    pub color: bool,
    /// Verbose output.
    pub verbose: bool,
    /// Where to write the JSON report, if anywhere.
    pub json: Option<PathBuf>,
}

impl BenchConfig {
    /// Create a new configuration with defaults.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            group_size: DEFAULT_GROUP_SIZE,
            scan_elements: DEFAULT_SCAN_ELEMENTS,
            iterations: DEFAULT_ITERATIONS,
            no_cache: false,
            seed: None,
            normalization_divisor: DEFAULT_NORMALIZATION_DIVISOR,
            color: false,
            verbose: false,
            json: None,
        }
    }

    /// Derived pattern parameters for this configuration.
    pub fn layout(&self) -> PlotLayout {
        PlotLayout::new(self.group_size, self.scan_elements)
    }
}

/// Pattern parameters derived from the group size and scan size.
///
/// A grouped layout stores the same partition range of `N` plots next to
/// each other, so walking one partition across the group means jumping by
/// `N * scan_bytes` between reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct PlotLayout {
    /// Plots per group (`N`).
    pub group_size: usize,
    /// Proof fragment entries per scan.
    pub scan_elements: usize,
    /// Bytes per scan (`scan_elements * BYTES_PER_ENTRY`).
    pub scan_bytes: usize,
    /// Entries in one partition.
    pub entries_per_partition: u64,
    /// Scans needed to cover one partition (at least 1).
    pub jumps_across_groups: usize,
    /// Distance in bytes between consecutive partition reads in a group.
    pub jump_distance: u64,
}

impl PlotLayout {
    /// Derive the layout for `group_size` plots scanning `scan_elements` entries.
    pub fn new(group_size: usize, scan_elements: usize) -> Self {
        let entries_per_partition = PARTITION_SPAN_ENTRIES / PARTITIONS_PER_PLOT;
        let scan_bytes = scan_elements.saturating_mul(BYTES_PER_ENTRY);
        let jumps = match scan_elements {
            0 => 1,
            n => entries_per_partition / n as u64,
        };
        let jumps_across_groups = usize::try_from(jumps).unwrap_or(usize::MAX).max(1);
        let jump_distance = (group_size as u64).saturating_mul(scan_bytes as u64);

        Self {
            group_size,
            scan_elements,
            scan_bytes,
            entries_per_partition,
            jumps_across_groups,
            jump_distance,
        }
    }

    /// Bytes read by the large sequential transfer (whole group, one partition).
    pub fn large_sequential_bytes(&self) -> usize {
        self.group_size
            .saturating_mul(self.scan_bytes)
            .saturating_mul(self.jumps_across_groups)
    }

    /// Bytes read by the single-plot sequential transfer (one partition).
    pub fn single_sequential_bytes(&self) -> usize {
        self.scan_bytes.saturating_mul(self.jumps_across_groups)
    }
}

impl Default for PlotLayout {
    fn default() -> Self {
        Self::new(DEFAULT_GROUP_SIZE, DEFAULT_SCAN_ELEMENTS)
    }
}
