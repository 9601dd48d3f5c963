//! Benchmark execution runner.

use crate::bench::{create_suite, BenchmarkResult, PatternKind, Sampler};
use crate::config::{BenchConfig, PlotLayout};
use crate::io::{BlockReader, FileReader, OffsetSource, RandomOffsets};
use crate::platform;
use crate::results::{
    compute_stats, BenchmarkPrinter, ComparativeAnalyzer, Comparison, LiveProgressReporter,
    Statistics,
};
use std::collections::BTreeMap;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Failure that stops a run before any pattern executes.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The target file could not be opened.
    #[error("cannot open file: {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The target file's size could not be determined.
    #[error("cannot stat file: {}: {source}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A pattern that produced no result.
#[derive(Debug, Clone)]
pub struct SkippedPattern {
    pub kind: PatternKind,
    pub reason: String,
}

/// Everything a run measured.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Size of the file the run read from.
    pub file_size: u64,
    /// Derived parameters the patterns were built from.
    pub layout: PlotLayout,
    /// Results of the patterns that completed.
    pub results: BTreeMap<PatternKind, BenchmarkResult>,
    /// Patterns that failed or did not fit the file.
    pub skipped: Vec<SkippedPattern>,
    /// Grouped versus singles comparison.
    pub comparison: Comparison,
    /// Seed the offsets were drawn from, when known.
    pub seed: Option<u64>,
    /// Whether the page cache was successfully disabled for the run.
    pub cache_disabled: bool,
}

impl RunReport {
    /// Statistics for one pattern, `None` if it was skipped or has no samples.
    pub fn stats(&self, kind: PatternKind) -> Option<Statistics> {
        self.results
            .get(&kind)
            .and_then(|r| compute_stats(&r.samples))
    }

    /// Total number of samples across all patterns.
    pub fn total_samples(&self) -> usize {
        self.results.values().map(BenchmarkResult::sample_count).sum()
    }
}

/// Runs the benchmark suite against one file.
pub struct BenchmarkRunner {
    config: BenchConfig,
    printer: BenchmarkPrinter,
}

impl BenchmarkRunner {
    /// Create a new benchmark runner.
    pub fn new(config: BenchConfig) -> Self {
        let printer = BenchmarkPrinter::new(config.color);
        Self { config, printer }
    }

    /// Open the configured file and run every pattern against it.
    ///
    /// The descriptor is closed when this returns, on every path.
    pub fn run(&self) -> Result<RunReport, RunError> {
        let path = &self.config.path;
        let file = File::open(path).map_err(|source| RunError::Open {
            path: path.clone(),
            source,
        })?;
        let mut reader = FileReader::from_file(file).map_err(|source| RunError::Metadata {
            path: path.clone(),
            source,
        })?;

        self.printer.print_banner(&self.config, &self.config.layout());
        self.printer.print_file(path, reader.file_size());

        let cache_disabled = self.config.no_cache && self.disable_cache(&reader);

        let mut offsets = match self.config.seed {
            Some(seed) => RandomOffsets::from_seed(seed),
            None => RandomOffsets::from_entropy(),
        };
        tracing::info!("Offset seed: {} (pass --seed to reproduce)", offsets.seed());

        let mut report = self.run_with(&mut reader, &mut offsets, &Sampler::new());
        report.seed = Some(offsets.seed());
        report.cache_disabled = cache_disabled;
        Ok(report)
    }

    fn disable_cache(&self, reader: &FileReader) -> bool {
        match platform::disable_cache(reader.file()) {
            Ok(()) => {
                tracing::info!(
                    "Page cache and read-ahead disabled for {}",
                    self.config.path.display()
                );
                true
            }
            Err(e) => {
                tracing::warn!("Could not disable page cache: {e}");
                false
            }
        }
    }

    /// Run every pattern against an already opened reader.
    ///
    /// A failing pattern is reported and skipped. Samples it gathered in
    /// earlier iterations are discarded. With `no_cache` set, the reader's
    /// cache is dropped before every iteration.
    pub fn run_with<R, O>(&self, reader: &mut R, offsets: &mut O, sampler: &Sampler) -> RunReport
    where
        R: BlockReader + ?Sized,
        O: OffsetSource + ?Sized,
    {
        let layout = self.config.layout();
        let file_size = reader.file_size();
        let iterations = self.config.iterations;
        let mut results = BTreeMap::new();
        let mut skipped = Vec::new();
        let mut keep_cold = self.config.no_cache;

        tracing::debug!(
            "Running {} patterns x {} iterations on {} bytes",
            PatternKind::ALL.len(),
            iterations,
            file_size
        );

        for planned in create_suite(&layout) {
            tracing::debug!("{}: {:?}", planned.kind, planned.pattern.parameters());

            let mut result =
                BenchmarkResult::new(planned.kind, planned.pattern, planned.label, file_size);
            let progress =
                LiveProgressReporter::new(planned.kind.name(), iterations, self.config.color);
            let mut failure = None;

            for iteration in 0..iterations {
                if keep_cold && let Err(e) = reader.drop_cache() {
                    tracing::warn!("Could not drop page cache, later reads may be warm: {e}");
                    keep_cold = false;
                }
                match planned.pattern.run(reader, offsets, sampler) {
                    Ok(samples) => {
                        let elapsed = samples.iter().map(|s| s.nanos).sum();
                        result.extend(samples);
                        progress.tick(Duration::from_nanos(elapsed));
                    }
                    Err(e) => {
                        tracing::debug!(
                            "{} failed on iteration {}: {e}",
                            planned.kind,
                            iteration + 1
                        );
                        failure = Some(e);
                        break;
                    }
                }
            }
            progress.finish();

            if let Some(e) = failure {
                let reason = e.to_string();
                if !e.is_sizing() {
                    tracing::warn!("{} aborted: {reason}", planned.kind);
                }
                self.printer.print_skip(planned.kind.name(), &reason);
                skipped.push(SkippedPattern {
                    kind: planned.kind,
                    reason,
                });
                continue;
            }

            if result.short_reads() > 0 {
                tracing::warn!(
                    "{}: {} of {} reads came back short",
                    planned.kind,
                    result.short_reads(),
                    result.sample_count()
                );
            }
            self.printer
                .print_result(&result.label, compute_stats(&result.samples).as_ref());
            results.insert(planned.kind, result);
        }

        let analyzer = ComparativeAnalyzer::with_divisor(
            self.config.group_size,
            self.config.normalization_divisor,
        );
        let comparison = analyzer.analyze(&results);

        RunReport {
            file_size,
            layout,
            results,
            skipped,
            comparison,
            seed: None,
            cache_disabled: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{IoOp, MemoryReader, ScriptedOffsets};
    use crate::results::Verdict;

    const MIB: usize = 1024 * 1024;

    /// N=4, 4096-byte scans.
    fn small_config() -> BenchConfig {
        let mut config = BenchConfig::new(PathBuf::from("unused"));
        config.group_size = 4;
        config.scan_elements = 1024;
        config
    }

    /// Reader whose reads always fail.
    struct BrokenReader {
        size: u64,
    }

    impl BlockReader for BrokenReader {
        fn file_size(&self) -> u64 {
            self.size
        }

        fn seek_to(&mut self, _offset: u64) -> io::Result<()> {
            Ok(())
        }

        fn read_into(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("device went away"))
        }
    }

    #[test]
    fn test_all_patterns_fit() {
        let runner = BenchmarkRunner::new(small_config());
        let mut reader = MemoryReader::with_size(10 * MIB);
        let mut offsets = ScriptedOffsets::new(vec![0]);

        let report = runner.run_with(&mut reader, &mut offsets, &Sampler::new());

        assert!(report.skipped.is_empty());
        assert_eq!(report.results.len(), 5);
        assert_eq!(report.results[&PatternKind::GroupedScan].sample_count(), 4);
        assert_eq!(report.results[&PatternKind::SinglesScan].sample_count(), 4);
        assert_eq!(report.results[&PatternKind::StrideScan].sample_count(), 512);
        assert_eq!(report.results[&PatternKind::LargeSequential].sample_count(), 1);
        assert_eq!(report.results[&PatternKind::SingleSequential].sample_count(), 1);
        assert_eq!(report.total_samples(), 4 + 4 + 512 + 1 + 1);
        assert_eq!(report.file_size, 10 * MIB as u64);
    }

    #[test]
    fn test_iterations_concatenate() {
        let mut config = small_config();
        config.iterations = 3;
        let runner = BenchmarkRunner::new(config);
        let mut reader = MemoryReader::with_size(10 * MIB);
        let mut offsets = ScriptedOffsets::default();

        let report = runner.run_with(&mut reader, &mut offsets, &Sampler::new());

        assert_eq!(report.results[&PatternKind::GroupedScan].sample_count(), 12);
        assert_eq!(report.stats(PatternKind::SinglesScan).map(|s| s.count), Some(12));
    }

    #[test]
    fn test_no_cache_drops_cache_before_every_iteration() {
        let mut config = small_config();
        config.iterations = 2;
        config.no_cache = true;
        let runner = BenchmarkRunner::new(config);
        let mut reader = MemoryReader::with_size(10 * MIB);
        let mut offsets = ScriptedOffsets::default();

        runner.run_with(&mut reader, &mut offsets, &Sampler::new());

        assert_eq!(reader.cache_drops(), 5 * 2);
        // Each drop comes right before an iteration's first seek
        let ops = reader.ops();
        for (i, op) in ops.iter().enumerate() {
            if *op == IoOp::DropCache {
                assert!(matches!(ops.get(i + 1), Some(IoOp::Seek(_))), "{ops:?}");
            }
        }
    }

    #[test]
    fn test_cache_left_alone_by_default() {
        let runner = BenchmarkRunner::new(small_config());
        let mut reader = MemoryReader::with_size(10 * MIB);

        runner.run_with(&mut reader, &mut ScriptedOffsets::default(), &Sampler::new());

        assert_eq!(reader.cache_drops(), 0);
    }

    #[test]
    fn test_small_file_skips_large_patterns() {
        let runner = BenchmarkRunner::new(small_config());
        let mut reader = MemoryReader::with_size(MIB);
        let mut offsets = ScriptedOffsets::default();

        let report = runner.run_with(&mut reader, &mut offsets, &Sampler::new());

        let kinds: Vec<_> = report.results.keys().copied().collect();
        assert_eq!(kinds, vec![PatternKind::GroupedScan, PatternKind::SinglesScan]);
        let skipped: Vec<_> = report.skipped.iter().map(|s| s.kind).collect();
        assert_eq!(
            skipped,
            vec![
                PatternKind::StrideScan,
                PatternKind::LargeSequential,
                PatternKind::SingleSequential
            ]
        );
        assert!(report.skipped[0].reason.contains("file too small"));
        assert!(report.stats(PatternKind::StrideScan).is_none());
    }

    #[test]
    fn test_io_errors_skip_every_pattern_without_panicking() {
        let runner = BenchmarkRunner::new(small_config());
        let mut reader = BrokenReader {
            size: 10 * MIB as u64,
        };
        let mut offsets = ScriptedOffsets::default();

        let report = runner.run_with(&mut reader, &mut offsets, &Sampler::new());

        assert!(report.results.is_empty());
        assert_eq!(report.skipped.len(), 5);
        assert!(report.skipped[0].reason.contains("device went away"));
        assert_eq!(report.comparison.verdict, Verdict::Indeterminate);
    }

    #[test]
    fn test_run_reports_open_failure() {
        let mut config = small_config();
        config.path = PathBuf::from("/nonexistent/plotbench/plot.bin");
        let runner = BenchmarkRunner::new(config);

        let err = runner.run().unwrap_err();
        assert!(matches!(err, RunError::Open { .. }));
        assert!(err.to_string().starts_with("cannot open file: "));
    }
}
