//! Console report printer.

use crate::bench::{PatternKind, RunReport};
use crate::config::{BenchConfig, PlotLayout};
use crate::results::format::{format_bytes, format_stats_line, format_verdict};
use crate::results::{compute_stats, Comparison, Statistics, Verdict};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Table};
use owo_colors::OwoColorize;
use std::path::Path;

/// Formats and prints benchmark results.
pub struct BenchmarkPrinter {
    /// Whether color output is enabled.
    color: bool,
}

impl BenchmarkPrinter {
    /// Create a new printer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Print the run parameters before any pattern executes.
    pub fn print_banner(&self, config: &BenchConfig, layout: &PlotLayout) {
        println!();
        if self.color {
            println!("{}: {}", "plotbench".cyan().bold(), config.path.display());
        } else {
            println!("plotbench: {}", config.path.display());
        }
        println!("Number of plots in group: {}", layout.group_size);
        println!("Proof fragment scan size: {} elements", layout.scan_elements);
        println!("Number of entries per partition: {}", layout.entries_per_partition);
        println!("Calculated scan size: {} bytes", layout.scan_bytes);
        println!("Jumps across groups: {}", layout.jumps_across_groups);
        println!("Jump distance between groups: {} bytes", layout.jump_distance);
        println!("Iterations: {}", config.iterations);
    }

    /// Print the opened file's size.
    pub fn print_file(&self, path: &Path, file_size: u64) {
        println!(
            "file: {}, size={} bytes ({})",
            path.display(),
            file_size,
            format_bytes(file_size)
        );
        println!();
    }

    /// Print one pattern's statistics line.
    pub fn print_result(&self, label: &str, stats: Option<&Statistics>) {
        let line = format_stats_line(label, stats);
        if self.color {
            match line.split_once(':') {
                Some((name, rest)) => println!("{}:{}", name.bold(), rest),
                None => println!("{line}"),
            }
        } else {
            println!("{line}");
        }
    }

    /// Report a pattern that could not run.
    pub fn print_skip(&self, name: &str, reason: &str) {
        if self.color {
            eprintln!("{} {}: {}", "skipping".yellow(), name.to_lowercase(), reason);
        } else {
            eprintln!("skipping {}: {}", name.to_lowercase(), reason);
        }
    }

    /// Print the per-pattern summary table and the comparison.
    pub fn print_summary(&self, report: &RunReport) {
        println!();
        if self.color {
            println!("{}", "Final durations".bold());
        } else {
            println!("Final durations:");
        }

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec!["Pattern", "Samples", "Mean (ns)", "Total (ms)"]);
        for kind in PatternKind::ALL {
            let Some(stats) = report.results.get(&kind).and_then(|r| compute_stats(&r.samples))
            else {
                continue;
            };
            table.add_row(vec![
                kind.name().to_string(),
                stats.count.to_string(),
                format!("{:.2}", stats.mean_us * 1000.0),
                format!("{:.2}", stats.total_ms),
            ]);
        }
        println!("{table}");
        println!();

        self.print_comparison(&report.comparison);
    }

    /// Print the grouped versus singles verdict.
    pub fn print_comparison(&self, cmp: &Comparison) {
        println!("Grouped scan first seek time per read: {:.2} ms", cmp.grouped_scan_ms);
        println!("Singles scan first seek time per read: {:.2} ms", cmp.singles_scan_ms);
        println!(
            "Grouped large sequential read time: {:.2} ms",
            cmp.grouped_large_sequential_ms
        );
        println!("Singles sequential read time: {:.2} ms", cmp.singles_sequential_ms);
        println!("Overall grouped average time: {:.2} ms", cmp.grouped_total_avg_ms);
        println!("Overall singles average time: {:.2} ms", cmp.singles_total_avg_ms);

        let verdict = format_verdict(cmp.verdict);
        if self.color {
            match cmp.verdict {
                Verdict::Speedup(r) if r >= 1.0 => println!("{}", verdict.green().bold()),
                Verdict::Speedup(_) | Verdict::Slowdown(_) => {
                    println!("{}", verdict.yellow().bold());
                }
                Verdict::Indeterminate => println!("{}", verdict.dimmed()),
            }
        } else {
            println!("{verdict}");
        }
    }
}
