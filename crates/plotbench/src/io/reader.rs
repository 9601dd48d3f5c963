//! Read-only block access over files and memory.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Blocking seek and read against a fixed-size byte store.
///
/// Each call maps to exactly one operation on the underlying store: `read_into`
/// issues a single read and may return fewer bytes than requested.
pub trait BlockReader {
    /// Size of the store in bytes. Does not change while the reader is alive.
    fn file_size(&self) -> u64;

    /// Move the read position to `offset` bytes from the start.
    fn seek_to(&mut self, offset: u64) -> io::Result<()>;

    /// Read into `buf` from the current position, advancing it.
    fn read_into(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Evict anything earlier reads left in the page cache.
    fn drop_cache(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A read-only file opened for benchmarking.
#[derive(Debug)]
pub struct FileReader {
    file: File,
    file_size: u64,
}

impl FileReader {
    /// Open `path` read-only and capture its size.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        Self::from_file(file)
    }

    /// Wrap an already opened file.
    pub fn from_file(file: File) -> io::Result<Self> {
        let file_size = file.metadata()?.len();
        Ok(Self { file, file_size })
    }

    /// The underlying descriptor, for platform cache control.
    pub fn file(&self) -> &File {
        &self.file
    }
}

impl BlockReader for FileReader {
    fn file_size(&self) -> u64 {
        self.file_size
    }

    fn seek_to(&mut self, offset: u64) -> io::Result<()> {
        self.file.seek(SeekFrom::Start(offset)).map(|_| ())
    }

    fn read_into(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }

    fn drop_cache(&mut self) -> io::Result<()> {
        crate::platform::drop_cache(&self.file).map_err(io::Error::other)
    }
}

/// One operation observed by a [`MemoryReader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOp {
    /// Seek to an absolute offset.
    Seek(u64),
    /// Read starting at `offset`, returning `len` bytes.
    Read { offset: u64, len: usize },
    /// Page cache eviction.
    DropCache,
}

/// In-memory backing store that records every operation.
///
/// Optionally advances a mocked [`quanta`] clock on each seek and read so
/// tests can check exactly which operations a sample covered.
pub struct MemoryReader {
    data: Vec<u8>,
    position: u64,
    ops: Vec<IoOp>,
    max_read: Option<usize>,
    latency: Option<MockLatency>,
}

struct MockLatency {
    mock: Arc<quanta::Mock>,
    seek: Duration,
    read: Duration,
}

impl MemoryReader {
    /// Create a reader over `data`.
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            position: 0,
            ops: Vec::new(),
            max_read: None,
            latency: None,
        }
    }

    /// Create a reader over `size` bytes of a repeating byte pattern.
    pub fn with_size(size: usize) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let data = (0..size).map(|i| (i % 251) as u8).collect();
        Self::new(data)
    }

    /// Cap every read at `max` bytes to simulate short reads.
    #[must_use]
    pub fn with_max_read(mut self, max: usize) -> Self {
        self.max_read = Some(max);
        self
    }

    /// Advance `mock` by `seek` on every seek and by `read` on every read.
    #[must_use]
    pub fn with_latency(mut self, mock: Arc<quanta::Mock>, seek: Duration, read: Duration) -> Self {
        self.latency = Some(MockLatency { mock, seek, read });
        self
    }

    /// Operations performed so far, in order.
    pub fn ops(&self) -> &[IoOp] {
        &self.ops
    }

    /// Offsets of every seek performed so far.
    pub fn seek_offsets(&self) -> Vec<u64> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                IoOp::Seek(offset) => Some(*offset),
                IoOp::Read { .. } | IoOp::DropCache => None,
            })
            .collect()
    }

    /// Number of cache evictions requested so far.
    pub fn cache_drops(&self) -> usize {
        self.ops.iter().filter(|op| **op == IoOp::DropCache).count()
    }
}

impl BlockReader for MemoryReader {
    fn file_size(&self) -> u64 {
        self.data.len() as u64
    }

    fn seek_to(&mut self, offset: u64) -> io::Result<()> {
        if let Some(latency) = &self.latency {
            latency.mock.increment(latency.seek);
        }
        self.position = offset;
        self.ops.push(IoOp::Seek(offset));
        Ok(())
    }

    fn read_into(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if let Some(latency) = &self.latency {
            latency.mock.increment(latency.read);
        }
        let offset = self.position;
        let start = usize::try_from(offset)
            .unwrap_or(usize::MAX)
            .min(self.data.len());
        let mut len = buf.len().min(self.data.len() - start);
        if let Some(max) = self.max_read {
            len = len.min(max);
        }
        buf[..len].copy_from_slice(&self.data[start..start + len]);
        self.position = offset + len as u64;
        self.ops.push(IoOp::Read { offset, len });
        Ok(len)
    }

    fn drop_cache(&mut self) -> io::Result<()> {
        self.ops.push(IoOp::DropCache);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_memory_reader_records_ops() {
        let mut reader = MemoryReader::with_size(100);
        let mut buf = [0u8; 10];

        reader.seek_to(40).unwrap();
        assert_eq!(reader.read_into(&mut buf).unwrap(), 10);
        assert_eq!(reader.read_into(&mut buf).unwrap(), 10);

        assert_eq!(
            reader.ops(),
            &[
                IoOp::Seek(40),
                IoOp::Read { offset: 40, len: 10 },
                IoOp::Read { offset: 50, len: 10 },
            ]
        );
        assert_eq!(reader.seek_offsets(), vec![40]);
        assert_eq!(buf[0], 50);
    }

    #[test]
    fn test_memory_reader_short_reads() {
        let mut reader = MemoryReader::with_size(100).with_max_read(3);
        let mut buf = [0u8; 10];
        assert_eq!(reader.read_into(&mut buf).unwrap(), 3);

        // Past the end behaves like EOF
        reader.seek_to(98).unwrap();
        let mut reader = reader.with_max_read(usize::MAX);
        assert_eq!(reader.read_into(&mut buf).unwrap(), 2);
        reader.seek_to(500).unwrap();
        assert_eq!(reader.read_into(&mut buf).unwrap(), 0);
    }

    #[test]
    fn test_file_reader_reads_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"0123456789").unwrap();
        tmp.flush().unwrap();

        let mut reader = FileReader::open(tmp.path()).unwrap();
        assert_eq!(reader.file_size(), 10);

        let mut buf = [0u8; 4];
        reader.seek_to(3).unwrap();
        assert_eq!(reader.read_into(&mut buf).unwrap(), 4);
        assert_eq!(&buf, b"3456");
    }

    #[test]
    fn test_file_reader_open_missing() {
        let err = FileReader::open(Path::new("/nonexistent/plotbench/file.bin")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
