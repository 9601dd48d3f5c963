//! Statistics computation for benchmark results.

// Allow numeric casts in this module - percentile ranks go through f64 and
// back to an index.
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use crate::bench::Sample;

/// Summary of one pattern's samples.
///
/// Latencies are in microseconds, the total in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Statistics {
    /// Number of samples.
    pub count: usize,
    /// Arithmetic mean.
    pub mean_us: f64,
    /// Middle sample, or the mean of the two middle samples.
    pub median_us: f64,
    /// Fastest sample.
    pub min_us: f64,
    /// Slowest sample.
    pub max_us: f64,
    /// 95th percentile (nearest rank).
    pub p95_us: f64,
    /// Sum of all samples.
    pub total_ms: f64,
    /// Sum of all samples, exact.
    pub total_ns: u64,
}

/// Compute statistics for a sequence of samples.
///
/// Returns `None` for an empty sequence ("no samples").
pub fn compute_stats(samples: &[Sample]) -> Option<Statistics> {
    let nanos: Vec<u64> = samples.iter().map(|s| s.nanos).collect();
    compute_stats_ns(&nanos)
}

/// Compute statistics from raw nanosecond durations.
pub fn compute_stats_ns(nanos: &[u64]) -> Option<Statistics> {
    if nanos.is_empty() {
        return None;
    }

    let count = nanos.len();
    let total_ns: u64 = nanos.iter().sum();

    let mut sorted = nanos.to_vec();
    sorted.sort_unstable();

    let median_ns = if count % 2 == 1 {
        sorted[count / 2] as f64
    } else {
        (sorted[count / 2 - 1] as f64 + sorted[count / 2] as f64) / 2.0
    };

    Some(Statistics {
        count,
        mean_us: ns_to_us(total_ns as f64 / count as f64),
        median_us: ns_to_us(median_ns),
        min_us: ns_to_us(sorted[0] as f64),
        max_us: ns_to_us(sorted[count - 1] as f64),
        p95_us: ns_to_us(percentile(&sorted, 95.0) as f64),
        total_ms: total_ns as f64 / 1_000_000.0,
        total_ns,
    })
}

/// Nearest-rank percentile of ascending `sorted` data.
///
/// Picks index `ceil(p / 100 * n) - 1`, clamped to the valid range, so the
/// result is always one of the samples. Returns 0 for empty input.
pub fn percentile(sorted: &[u64], p: f64) -> u64 {
    match sorted.len() {
        0 => 0,
        1 => sorted[0],
        n => {
            let rank = (p / 100.0 * n as f64).ceil() as i64 - 1;
            let idx = rank.clamp(0, n as i64 - 1) as usize;
            sorted[idx]
        }
    }
}

fn ns_to_us(ns: f64) -> f64 {
    ns / 1000.0
}
