//! plotbench - seek versus sequential read latency benchmark.

// Use mimalloc for reduced allocation latency (enabled by default).
// Disable with `--no-default-features` if debugging allocator issues.
#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::Parser;
use plotbench::{
    bench::{BenchmarkRunner, RunError},
    cli::Cli,
    results::{export_json, BenchmarkPrinter},
};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Exit code when the target file cannot be opened.
const EXIT_OPEN_FAILED: i32 = 2;

fn main() -> Result<()> {
    let config = Cli::parse()
        .into_config()
        .context("Failed to create benchmark config")?;

    // Log lines go through indicatif so they don't clobber progress bars.
    // RUST_LOG wins over --verbose.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config.verbose {
            EnvFilter::new("info")
        } else {
            EnvFilter::new("warn")
        }
    });

    let indicatif_layer = IndicatifLayer::new();
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(indicatif_layer.get_stderr_writer()),
        )
        .with(indicatif_layer)
        .with(filter)
        .init();

    let json_output = config.json.clone();

    let runner = BenchmarkRunner::new(config.clone());
    let report = match runner.run() {
        Ok(report) => report,
        Err(e @ (RunError::Open { .. } | RunError::Metadata { .. })) => {
            eprintln!("{e}");
            std::process::exit(EXIT_OPEN_FAILED);
        }
    };

    BenchmarkPrinter::new(config.color).print_summary(&report);

    if let Some(path) = json_output {
        export_json(&report, &config, &path).context("Failed to export JSON")?;
        println!("Results exported to: {}", path.display());
    }

    Ok(())
}
