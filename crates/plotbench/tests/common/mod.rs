//! Common test utilities for plotbench integration tests.

use plotbench::BenchConfig;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

pub const KIB: usize = 1024;
pub const MIB: usize = 1024 * KIB;

/// Create a temporary file of exactly `size` bytes.
#[allow(dead_code)] // Not every test binary uses it
pub fn sized_file(size: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    let pattern = b"0123456789ABCDEF";
    let content: Vec<u8> = (0..size).map(|i| pattern[i % pattern.len()]).collect();
    file.write_all(&content).unwrap();
    file.flush().unwrap();
    file
}

/// Configuration with N=4 and 4096-byte scans (1024 entries).
#[allow(dead_code)] // Not every test binary uses it
pub fn small_config(path: PathBuf) -> BenchConfig {
    let mut config = BenchConfig::new(path);
    config.group_size = 4;
    config.scan_elements = 1024;
    config.seed = Some(42);
    config
}
