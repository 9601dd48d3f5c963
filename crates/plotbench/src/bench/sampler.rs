//! Per-operation timing.

use quanta::Clock;
use std::io;

/// Wall-clock cost of exactly one I/O operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Sample {
    /// Elapsed time in nanoseconds.
    pub nanos: u64,
    /// Bytes the operation returned.
    pub bytes_read: usize,
    /// The operation returned fewer bytes than requested.
    pub short_read: bool,
}

/// Times single I/O operations with a monotonic clock.
#[derive(Debug, Clone)]
pub struct Sampler {
    clock: Clock,
}

impl Sampler {
    /// Create a sampler backed by the calibrated high-resolution clock.
    pub fn new() -> Self {
        Self::with_clock(Clock::new())
    }

    /// Create a sampler with a specific clock (e.g. `Clock::mock()` in tests).
    pub fn with_clock(clock: Clock) -> Self {
        Self { clock }
    }

    /// Run `op` and time it.
    ///
    /// `op` performs one seek + read or one read and returns the number of
    /// bytes read. Errors from `op` are returned without a sample.
    pub fn sample<F>(&self, requested: usize, op: F) -> io::Result<Sample>
    where
        F: FnOnce() -> io::Result<usize>,
    {
        let start = self.clock.now();
        let result = op();
        let end = self.clock.now();

        let bytes_read = result?;
        let elapsed = end.saturating_duration_since(start);

        Ok(Sample {
            nanos: u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX),
            bytes_read,
            short_read: bytes_read < requested,
        })
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new()
    }
}
