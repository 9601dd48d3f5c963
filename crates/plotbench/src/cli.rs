//! Command-line interface.

use crate::config::{BenchConfig, DEFAULT_GROUP_SIZE, DEFAULT_ITERATIONS, DEFAULT_SCAN_ELEMENTS};
use crate::results::DEFAULT_NORMALIZATION_DIVISOR;
use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;

/// Seek versus sequential read latency benchmark for grouped plot layouts.
///
/// Compares scanning `N` plots with one seek followed by sequential reads
/// against `N` independent seeks, using real reads against FILE.
#[derive(Parser, Debug)]
#[command(name = "plotbench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// File to read from (e.g. a plot file or a raw device).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Number of plots in a group.
    #[arg(
        short = 'n',
        long,
        value_name = "N",
        default_value_t = DEFAULT_GROUP_SIZE,
        env = "PLOTBENCH_GROUP_SIZE"
    )]
    pub group_size: usize,

    /// Proof fragment entries read per scan (4 bytes each).
    #[arg(
        short = 's',
        long = "proof-fragment-scan-size",
        value_name = "ELEMENTS",
        default_value_t = DEFAULT_SCAN_ELEMENTS,
        env = "PLOTBENCH_SCAN_SIZE"
    )]
    pub scan_elements: usize,

    /// Number of iterations per pattern.
    #[arg(
        short = 't',
        long = "num-tests",
        value_name = "N",
        default_value_t = DEFAULT_ITERATIONS,
        env = "PLOTBENCH_NUM_TESTS"
    )]
    pub iterations: usize,

    /// Disable the page cache and read-ahead for the benchmark file.
    #[arg(long)]
    pub no_cache: bool,

    /// Seed for the random offsets. A fresh seed is drawn and logged if omitted.
    #[arg(long, env = "PLOTBENCH_SEED")]
    pub seed: Option<u64>,

    /// Divisor applied to the sequential read totals in the comparison.
    #[arg(
        long,
        value_name = "D",
        default_value_t = DEFAULT_NORMALIZATION_DIVISOR,
        env = "PLOTBENCH_NORMALIZATION_DIVISOR"
    )]
    pub normalization_divisor: f64,

    /// Export results to JSON file.
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, conflicts_with = "color")]
    pub no_color: bool,

    /// Force colored output (even when not a TTY).
    #[arg(long, conflicts_with = "no_color")]
    pub color: bool,

    /// Verbose output.
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Cli {
    /// Validate arguments and build configuration.
    ///
    /// The file itself is not checked here; failing to open it is reported
    /// by the run with its own exit code.
    pub fn into_config(self) -> Result<BenchConfig> {
        if self.group_size == 0 {
            bail!("Group size must be at least 1");
        }
        if self.scan_elements == 0 {
            bail!("Proof fragment scan size must be at least 1");
        }
        if self.iterations == 0 {
            bail!("Number of tests must be at least 1");
        }
        if !(self.normalization_divisor.is_finite() && self.normalization_divisor > 0.0) {
            bail!(
                "Normalization divisor must be a positive number, got {}",
                self.normalization_divisor
            );
        }

        // --color forces it on, --no-color forces it off
        let color = self.color || (!self.no_color && supports_color());

        let mut config = BenchConfig::new(self.file);
        config.group_size = self.group_size;
        config.scan_elements = self.scan_elements;
        config.iterations = self.iterations;
        config.no_cache = self.no_cache;
        config.seed = self.seed;
        config.normalization_divisor = self.normalization_divisor;
        config.color = color;
        config.verbose = self.verbose;
        config.json = self.json;

        Ok(config)
    }
}

/// Check if the terminal supports colors.
fn supports_color() -> bool {
    // https://no-color.org/
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }

    #[cfg(unix)]
    {
        use std::os::unix::io::AsRawFd;
        // SAFETY: isatty only inspects the descriptor.
        unsafe { libc::isatty(std::io::stdout().as_raw_fd()) != 0 }
    }

    #[cfg(not(unix))]
    {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("plotbench").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["plot.bin", "--no-color"]).into_config().unwrap();
        assert_eq!(config.path, PathBuf::from("plot.bin"));
        assert_eq!(config.group_size, 64);
        assert_eq!(config.scan_elements, 8192);
        assert_eq!(config.iterations, 1);
        assert!(!config.no_cache);
        assert!(!config.color);
        assert_eq!(config.seed, None);
        assert!(!config.verbose);
        assert!((config.normalization_divisor - 32.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_short_flags() {
        let config = parse(&[
            "-n", "4", "-s", "1024", "-t", "3", "--no-cache", "--seed", "9", "-v", "plot.bin",
        ])
        .into_config()
        .unwrap();
        assert_eq!(config.group_size, 4);
        assert_eq!(config.scan_elements, 1024);
        assert_eq!(config.layout().scan_bytes, 4096);
        assert_eq!(config.iterations, 3);
        assert!(config.no_cache);
        assert_eq!(config.seed, Some(9));
        assert!(config.verbose);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(parse(&["plot.bin", "-n", "0"]).into_config().is_err());
        assert!(parse(&["plot.bin", "-s", "0"]).into_config().is_err());
        assert!(parse(&["plot.bin", "-t", "0"]).into_config().is_err());
        assert!(
            parse(&["plot.bin", "--normalization-divisor", "0"])
                .into_config()
                .is_err()
        );
        assert!(Cli::try_parse_from(["plotbench"]).is_err());
        assert!(Cli::try_parse_from(["plotbench", "plot.bin", "--color", "--no-color"]).is_err());
    }

    #[test]
    fn test_color_flag_forces_color() {
        let config = parse(&["plot.bin", "--color"]).into_config().unwrap();
        assert!(config.color);
    }
}
