//! Platform page cache control.
//!
//! Cold-read numbers are only meaningful when the kernel is not serving the
//! reads from memory or prefetching ahead of them.

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;

use std::fs::File;
use std::io;

/// Failure to change caching behavior for a descriptor.
#[derive(Debug, thiserror::Error)]
pub enum CacheControlError {
    /// No cache control is available on this platform.
    #[error("cache control is not supported on {0}")]
    Unsupported(&'static str),
    /// The platform call failed.
    #[error("{op} failed: {source}")]
    Failed {
        op: &'static str,
        #[source]
        source: io::Error,
    },
}

/// Disable page caching and read-ahead for reads through `file`.
///
/// Every call is attempted and each failure is logged. An error is returned
/// only when none of them took effect.
///
/// On Linux this only evicts what is cached right now; call [`drop_cache`]
/// again before each measurement to keep reads cold.
pub fn disable_cache(file: &File) -> Result<(), CacheControlError> {
    #[cfg(target_os = "linux")]
    {
        linux::disable_cache(file)
    }
    #[cfg(target_os = "macos")]
    {
        macos::disable_cache(file)
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    {
        let _ = file;
        Err(CacheControlError::Unsupported(std::env::consts::OS))
    }
}

/// Evict pages of `file` that reads since [`disable_cache`] brought in.
///
/// A no-op on macOS, where `F_NOCACHE` keeps applying to the descriptor.
pub fn drop_cache(file: &File) -> Result<(), CacheControlError> {
    #[cfg(target_os = "linux")]
    {
        linux::drop_cache(file)
    }
    #[cfg(target_os = "macos")]
    {
        let _ = file;
        Ok(())
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    {
        let _ = file;
        Err(CacheControlError::Unsupported(std::env::consts::OS))
    }
}

/// Succeeds if at least one call did, warning about each one that failed.
///
/// Returns the last failure when all of them failed.
#[cfg_attr(not(any(target_os = "linux", target_os = "macos")), allow(dead_code))]
fn any_succeeded<I>(results: I) -> Result<(), CacheControlError>
where
    I: IntoIterator<Item = Result<(), CacheControlError>>,
{
    let mut last_error = None;
    let mut succeeded = false;
    for result in results {
        match result {
            Ok(()) => succeeded = true,
            Err(e) => {
                tracing::warn!("{e}");
                last_error = Some(e);
            }
        }
    }

    match last_error {
        Some(e) if !succeeded => Err(e),
        _ => Ok(()),
    }
}
