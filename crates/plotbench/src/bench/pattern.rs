//! Access pattern generators.
//!
//! Each generator checks that the file can hold its byte span, then drives
//! the [`Sampler`] through its reads and returns the samples in the order the
//! reads happened.

use crate::bench::{Sample, Sampler};
use crate::io::{BlockReader, OffsetSource};
use std::collections::HashMap;
use std::io;

/// Error produced by a single pattern. Never fatal to the whole run.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    /// The file is smaller than the pattern's byte span.
    #[error("file too small for {pattern} (need >= {required} bytes, have {file_size})")]
    Sizing {
        pattern: &'static str,
        required: u64,
        file_size: u64,
    },
    /// The pattern's byte span does not fit in 64 bits.
    #[error("byte span of {pattern} overflows")]
    SpanOverflow { pattern: &'static str },
    /// A seek or read failed.
    #[error("I/O error during {pattern}: {source}")]
    Io {
        pattern: &'static str,
        #[source]
        source: io::Error,
    },
}

impl PatternError {
    /// Whether this is a configuration problem rather than an I/O failure.
    pub fn is_sizing(&self) -> bool {
        matches!(self, Self::Sizing { .. } | Self::SpanOverflow { .. })
    }
}

/// One benchmark strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AccessPattern {
    /// `count` independent random seek + read of `block_size` bytes.
    RandomSeeks { count: usize, block_size: usize },
    /// One random start, then `jumps` seeks spaced `stride` bytes apart.
    StrideSeeks {
        jumps: usize,
        stride: u64,
        block_size: usize,
    },
    /// One seek and one contiguous read of `total_bytes`.
    SequentialLarge { total_bytes: usize },
    /// One seek, then `n` back-to-back reads of `scan_size` bytes.
    GroupedScan { n: usize, scan_size: usize },
    /// `n` independent random seek + read of `scan_size` bytes.
    SinglesScan { n: usize, scan_size: usize },
}

impl AccessPattern {
    /// Short name used in messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RandomSeeks { .. } => "random seeks",
            Self::StrideSeeks { .. } => "stride pattern",
            Self::SequentialLarge { .. } => "sequential read",
            Self::GroupedScan { .. } => "grouped sequential read",
            Self::SinglesScan { .. } => "singles scan",
        }
    }

    /// Parameters for display.
    pub fn parameters(&self) -> HashMap<String, String> {
        let mut params = HashMap::new();
        match *self {
            Self::RandomSeeks { count, block_size } => {
                params.insert("count".to_string(), count.to_string());
                params.insert("block_size".to_string(), format!("{block_size}B"));
            }
            Self::StrideSeeks {
                jumps,
                stride,
                block_size,
            } => {
                params.insert("jumps".to_string(), jumps.to_string());
                params.insert("stride".to_string(), format!("{stride}B"));
                params.insert("block_size".to_string(), format!("{block_size}B"));
            }
            Self::SequentialLarge { total_bytes } => {
                params.insert("total_bytes".to_string(), format!("{total_bytes}B"));
            }
            Self::GroupedScan { n, scan_size } | Self::SinglesScan { n, scan_size } => {
                params.insert("n".to_string(), n.to_string());
                params.insert("scan_size".to_string(), format!("{scan_size}B"));
            }
        }
        params
    }

    /// Bytes of the file the pattern must be able to address.
    ///
    /// `None` if the span overflows `u64`.
    pub fn required_span(&self) -> Option<u64> {
        match *self {
            Self::RandomSeeks { block_size, .. } => Some(block_size as u64),
            Self::StrideSeeks {
                jumps,
                stride,
                block_size,
            } => (jumps as u64)
                .checked_mul(stride)
                .and_then(|s| s.checked_add(block_size as u64)),
            Self::SequentialLarge { total_bytes } => Some(total_bytes as u64),
            Self::GroupedScan { n, scan_size } => (n as u64).checked_mul(scan_size as u64),
            Self::SinglesScan { scan_size, .. } => Some(scan_size as u64),
        }
    }

    /// Number of samples a successful run produces.
    pub fn expected_samples(&self) -> usize {
        match *self {
            Self::RandomSeeks { count, .. } => count,
            Self::StrideSeeks { jumps, .. } => jumps + 1,
            Self::SequentialLarge { .. } => 1,
            Self::GroupedScan { n, .. } | Self::SinglesScan { n, .. } => n,
        }
    }

    /// Run the pattern once.
    pub fn run<R, O>(
        &self,
        reader: &mut R,
        offsets: &mut O,
        sampler: &Sampler,
    ) -> Result<Vec<Sample>, PatternError>
    where
        R: BlockReader + ?Sized,
        O: OffsetSource + ?Sized,
    {
        match *self {
            Self::RandomSeeks { count, block_size } => {
                random_seeks(reader, offsets, sampler, count, block_size)
            }
            Self::StrideSeeks {
                jumps,
                stride,
                block_size,
            } => stride_seeks(reader, offsets, sampler, jumps, stride, block_size),
            Self::SequentialLarge { total_bytes } => {
                sequential_large(reader, offsets, sampler, total_bytes)
            }
            Self::GroupedScan { n, scan_size } => {
                grouped_scan(reader, offsets, sampler, n, scan_size)
            }
            Self::SinglesScan { n, scan_size } => {
                singles_scan(reader, offsets, sampler, n, scan_size)
            }
        }
    }
}

/// `count` random seek + read operations of `block_size` bytes.
pub fn random_seeks<R, O>(
    reader: &mut R,
    offsets: &mut O,
    sampler: &Sampler,
    count: usize,
    block_size: usize,
) -> Result<Vec<Sample>, PatternError>
where
    R: BlockReader + ?Sized,
    O: OffsetSource + ?Sized,
{
    const PATTERN: &str = "random seeks";
    let max_offset = max_start(reader, PATTERN, Some(block_size as u64))?;
    let mut buffer = vec![0u8; block_size];
    let mut samples = Vec::with_capacity(count);

    for _ in 0..count {
        let offset = offsets.next_offset(max_offset);
        let sample = seek_and_read(reader, sampler, PATTERN, offset, &mut buffer)?;
        samples.push(sample);
    }

    Ok(samples)
}

/// One read at a random start, then `jumps` reads spaced `stride` bytes apart.
pub fn stride_seeks<R, O>(
    reader: &mut R,
    offsets: &mut O,
    sampler: &Sampler,
    jumps: usize,
    stride: u64,
    block_size: usize,
) -> Result<Vec<Sample>, PatternError>
where
    R: BlockReader + ?Sized,
    O: OffsetSource + ?Sized,
{
    const PATTERN: &str = "stride pattern";
    let span = AccessPattern::StrideSeeks {
        jumps,
        stride,
        block_size,
    }
    .required_span();
    let max_offset = max_start(reader, PATTERN, span)?;
    let start = offsets.next_offset(max_offset);
    let mut buffer = vec![0u8; block_size];
    let mut samples = Vec::with_capacity(jumps + 1);

    samples.push(seek_and_read(reader, sampler, PATTERN, start, &mut buffer)?);
    for i in 1..=jumps as u64 {
        // Bounded by the span check above
        let offset = start + i * stride;
        samples.push(seek_and_read(reader, sampler, PATTERN, offset, &mut buffer)?);
    }

    Ok(samples)
}

/// A single seek and contiguous read of `total_bytes`.
pub fn sequential_large<R, O>(
    reader: &mut R,
    offsets: &mut O,
    sampler: &Sampler,
    total_bytes: usize,
) -> Result<Vec<Sample>, PatternError>
where
    R: BlockReader + ?Sized,
    O: OffsetSource + ?Sized,
{
    const PATTERN: &str = "sequential read";
    let max_offset = max_start(reader, PATTERN, Some(total_bytes as u64))?;
    let start = offsets.next_offset(max_offset);
    let mut buffer = vec![0u8; total_bytes];

    let sample = seek_and_read(reader, sampler, PATTERN, start, &mut buffer)?;
    Ok(vec![sample])
}

/// One seek, then `n` sequential reads of `scan_size` bytes.
///
/// The seek is charged to the first sample only.
pub fn grouped_scan<R, O>(
    reader: &mut R,
    offsets: &mut O,
    sampler: &Sampler,
    n: usize,
    scan_size: usize,
) -> Result<Vec<Sample>, PatternError>
where
    R: BlockReader + ?Sized,
    O: OffsetSource + ?Sized,
{
    const PATTERN: &str = "grouped sequential read";
    let span = (n as u64).checked_mul(scan_size as u64);
    let max_offset = max_start(reader, PATTERN, span)?;
    let mut samples = Vec::with_capacity(n);
    if n == 0 {
        return Ok(samples);
    }

    let start = offsets.next_offset(max_offset);
    let mut buffer = vec![0u8; scan_size];
    samples.push(seek_and_read(reader, sampler, PATTERN, start, &mut buffer)?);

    for _ in 1..n {
        let sample = sampler
            .sample(scan_size, || reader.read_into(&mut buffer))
            .map_err(|source| PatternError::Io {
                pattern: PATTERN,
                source,
            })?;
        if sample.short_read {
            tracing::warn!(
                "short read {} bytes during grouped scan (wanted {})",
                sample.bytes_read,
                scan_size
            );
        }
        samples.push(sample);
    }

    Ok(samples)
}

/// `n` random seeks of `scan_size` bytes, with no shared locality.
pub fn singles_scan<R, O>(
    reader: &mut R,
    offsets: &mut O,
    sampler: &Sampler,
    n: usize,
    scan_size: usize,
) -> Result<Vec<Sample>, PatternError>
where
    R: BlockReader + ?Sized,
    O: OffsetSource + ?Sized,
{
    random_seeks(reader, offsets, sampler, n, scan_size)
}

/// Largest valid start offset for a pattern spanning `span` bytes.
fn max_start<R>(reader: &R, pattern: &'static str, span: Option<u64>) -> Result<u64, PatternError>
where
    R: BlockReader + ?Sized,
{
    let required = span.ok_or(PatternError::SpanOverflow { pattern })?;
    let file_size = reader.file_size();
    file_size
        .checked_sub(required)
        .ok_or(PatternError::Sizing {
            pattern,
            required,
            file_size,
        })
}

/// Seek to `offset` and fill `buffer` with one read, as a single sample.
fn seek_and_read<R>(
    reader: &mut R,
    sampler: &Sampler,
    pattern: &'static str,
    offset: u64,
    buffer: &mut [u8],
) -> Result<Sample, PatternError>
where
    R: BlockReader + ?Sized,
{
    let requested = buffer.len();
    let sample = sampler
        .sample(requested, || {
            reader.seek_to(offset)?;
            reader.read_into(buffer)
        })
        .map_err(|source| PatternError::Io { pattern, source })?;

    if sample.short_read {
        tracing::warn!(
            "short read {} bytes at offset {} during {} (wanted {})",
            sample.bytes_read,
            offset,
            pattern,
            requested
        );
    }

    Ok(sample)
}
