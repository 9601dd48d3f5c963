//! Benchmark suite configuration.
//!
//! Turns a [`PlotLayout`] into the five concrete patterns a run executes.

use crate::bench::{AccessPattern, PatternKind};
use crate::config::PlotLayout;

/// A pattern scheduled for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedPattern {
    /// Slot the results are stored under.
    pub kind: PatternKind,
    /// Pattern to execute.
    pub pattern: AccessPattern,
    /// Label used in the report.
    pub label: String,
}

/// Create the patterns for `layout`, in execution order.
pub fn create_suite(layout: &PlotLayout) -> Vec<PlannedPattern> {
    let n = layout.group_size;
    let scan = layout.scan_bytes;
    let reads = layout.jumps_across_groups;
    let large = layout.large_sequential_bytes();
    let single = layout.single_sequential_bytes();

    vec![
        PlannedPattern {
            kind: PatternKind::GroupedScan,
            pattern: AccessPattern::GroupedScan { n, scan_size: scan },
            label: format!("Grouped scan: N={n}, chunk={scan}B"),
        },
        PlannedPattern {
            kind: PatternKind::SinglesScan,
            pattern: AccessPattern::SinglesScan { n, scan_size: scan },
            label: format!("Singles scan: N random seeks, chunk={scan}B"),
        },
        PlannedPattern {
            kind: PatternKind::StrideScan,
            // The initial read counts as one of the `reads`
            pattern: AccessPattern::StrideSeeks {
                jumps: reads - 1,
                stride: layout.jump_distance,
                block_size: scan,
            },
            label: format!(
                "Stride scan: reads={reads}, stride={}B, chunk={scan}B",
                layout.jump_distance
            ),
        },
        PlannedPattern {
            kind: PatternKind::LargeSequential,
            pattern: AccessPattern::SequentialLarge { total_bytes: large },
            label: format!("Large sequential: {large}B"),
        },
        PlannedPattern {
            kind: PatternKind::SingleSequential,
            pattern: AccessPattern::SequentialLarge { total_bytes: single },
            label: format!("Single sequential: {single}B"),
        },
    ]
}
