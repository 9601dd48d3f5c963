//! Linux cache control via `posix_fadvise`.

use super::{any_succeeded, CacheControlError};
use std::fs::File;
use std::io;
use std::os::fd::AsRawFd;

const FADV_RANDOM: &str = "posix_fadvise(POSIX_FADV_RANDOM)";
const FADV_DONTNEED: &str = "posix_fadvise(POSIX_FADV_DONTNEED)";

pub(super) fn disable_cache(file: &File) -> Result<(), CacheControlError> {
    let fd = file.as_raw_fd();
    any_succeeded([
        // No read-ahead: every read pays for its own positioning
        fadvise(fd, libc::POSIX_FADV_RANDOM, FADV_RANDOM),
        fadvise(fd, libc::POSIX_FADV_DONTNEED, FADV_DONTNEED),
    ])
}

/// DONTNEED is a one-shot eviction, not a descriptor mode.
pub(super) fn drop_cache(file: &File) -> Result<(), CacheControlError> {
    fadvise(file.as_raw_fd(), libc::POSIX_FADV_DONTNEED, FADV_DONTNEED)
}

fn fadvise(
    fd: libc::c_int,
    advice: libc::c_int,
    op: &'static str,
) -> Result<(), CacheControlError> {
    // SAFETY: `fd` is borrowed from a live `File`; offset 0 with length 0
    // covers the whole file and touches no memory.
    let ret = unsafe { libc::posix_fadvise(fd, 0, 0, advice) };
    // posix_fadvise returns the error number instead of setting errno
    if ret == 0 {
        Ok(())
    } else {
        Err(CacheControlError::Failed {
            op,
            source: io::Error::from_raw_os_error(ret),
        })
    }
}
