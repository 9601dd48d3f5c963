//! macOS cache control via `fcntl`.

use super::{any_succeeded, CacheControlError};
use std::fs::File;
use std::io;
use std::os::fd::AsRawFd;

pub(super) fn disable_cache(file: &File) -> Result<(), CacheControlError> {
    let fd = file.as_raw_fd();
    any_succeeded([
        fcntl_off(fd, libc::F_NOCACHE, 1, "fcntl(F_NOCACHE)"),
        fcntl_off(fd, libc::F_RDAHEAD, 0, "fcntl(F_RDAHEAD)"),
    ])
}

fn fcntl_off(
    fd: libc::c_int,
    cmd: libc::c_int,
    arg: libc::c_int,
    op: &'static str,
) -> Result<(), CacheControlError> {
    // SAFETY: `fd` is borrowed from a live `File` and both commands take a
    // plain integer argument.
    let ret = unsafe { libc::fcntl(fd, cmd, arg) };
    if ret == -1 {
        Err(CacheControlError::Failed {
            op,
            source: io::Error::last_os_error(),
        })
    } else {
        Ok(())
    }
}
