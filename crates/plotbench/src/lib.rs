//! Seek and read latency microbenchmark for proof-of-space plot scanning.
//!
//! Measures how long a target file takes to serve five access patterns and
//! reduces the timings to one verdict: is it cheaper to scan a group of `N`
//! plots with one seek followed by sequential reads, or to pay a full seek
//! for every plot?
//!
//! - **Grouped scan**: one seek, then `N` sequential reads of `scan_size` bytes
//! - **Singles scan**: `N` independent random seek + read operations
//! - **Stride scan**: fixed-distance jumps across partition-sized regions
//! - **Large / single sequential**: one contiguous transfer
//!
//! # Usage
//!
//! ```text
//! plotbench [OPTIONS] <FILE>
//!
//! Arguments:
//!   <FILE>  Path to the file to read (e.g. a plot file)
//!
//! Options:
//!   -n, --group-size <N>                     Plots in a group (default: 64)
//!   -s, --proof-fragment-scan-size <ELEMS>   Elements per fragment scan (default: 8192)
//!   -t, --num-tests <N>                      Iterations per pattern (default: 1)
//!       --no-cache                           Disable page cache and read-ahead for the fd
//!       --seed <SEED>                        Seed for reproducible offsets
//!       --normalization-divisor <D>          Sequential read divisor (default: 32)
//!       --json <PATH>                        Export results as JSON
//!       --color / --no-color                 Force colored output on or off
//!   -v, --verbose                            Verbose output
//! ```

pub mod bench;
pub mod cli;
pub mod config;
pub mod io;
pub mod platform;
pub mod results;

pub use bench::{
    AccessPattern, BenchmarkResult, BenchmarkRunner, PatternError, PatternKind, RunError,
    RunReport, Sample, Sampler,
};
pub use cli::Cli;
pub use config::{BenchConfig, PlotLayout};
pub use io::{BlockReader, FileReader, MemoryReader, OffsetSource, RandomOffsets, ScriptedOffsets};
pub use results::{ComparativeAnalyzer, Comparison, Statistics, Verdict};
