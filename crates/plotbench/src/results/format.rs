//! Number formatting utilities.

use crate::results::{Statistics, Verdict};
use std::time::Duration;

/// One-line summary of a pattern's statistics.
///
/// Example: `Grouped scan: samples=64, mean=91.20µs, median=12.04µs, min=9.11µs,
/// max=4210.55µs, p95≈210.43µs, total=5.84ms`
pub fn format_stats_line(name: &str, stats: Option<&Statistics>) -> String {
    match stats {
        None => format!("{name}: no samples"),
        Some(s) => format!(
            "{name}: samples={}, mean={:.2}µs, median={:.2}µs, min={:.2}µs, max={:.2}µs, p95≈{:.2}µs, total={:.2}ms",
            s.count, s.mean_us, s.median_us, s.min_us, s.max_us, s.p95_us, s.total_ms
        ),
    }
}

/// Final comparison line.
pub fn format_verdict(verdict: Verdict) -> String {
    match verdict {
        Verdict::Speedup(ratio) => format!("Speedup (singles / grouped): {ratio:.2}x"),
        Verdict::Slowdown(ratio) => format!("Slowdown (grouped / singles): {ratio:.2}x"),
        Verdict::Indeterminate => "Speedup (singles / grouped): n/a (no timings)".to_string(),
    }
}

/// Format a byte count with a binary unit.
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    match bytes {
        b if b >= GB => format!("{:.1} GiB", b as f64 / GB as f64),
        b if b >= MB => format!("{:.1} MiB", b as f64 / MB as f64),
        b if b >= KB => format!("{:.1} KiB", b as f64 / KB as f64),
        b => format!("{b} B"),
    }
}

/// Format duration as human-readable latency.
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();

    if nanos >= 1_000_000_000 {
        format!("{:.2} s", duration.as_secs_f64())
    } else if nanos >= 1_000_000 {
        format!("{:.2} ms", nanos as f64 / 1_000_000.0)
    } else if nanos >= 1_000 {
        format!("{:.2} us", nanos as f64 / 1_000.0)
    } else {
        format!("{nanos} ns")
    }
}
