use std::path::PathBuf;
use thiserror::Error;

/// Typed errors for engine operations.
/// The CLI wraps these in `anyhow` at the top level; inside the engine the
/// variants matter because callers react differently to each: a vanished
/// path is a success, a permission problem skips one entry, an out-of-scope
/// path is rejected before anything is touched.
#[derive(Debug, Error)]
pub enum CleanError {
    /// File system operation failed
    #[error("I/O error at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Permission denied accessing a path
    #[error("permission denied: '{path}'")]
    PermissionDenied { path: PathBuf },

    /// Secure-delete target is not a regular file
    #[error("not a regular file: '{path}'")]
    NotAFile { path: PathBuf },

    /// Path lies outside the permitted cleanup scope
    #[error("path is outside the cleanup scope: '{path}'")]
    OutOfScope { path: PathBuf },

    /// Path was not surfaced by a prior scan or the privacy registry
    #[error("path was not reported by a scan: '{path}'")]
    UnknownPath { path: PathBuf },

    /// Scan configuration resolves to no roots at all
    #[error("no scan roots configured")]
    NoRoots,
}

impl CleanError {
    /// Wrap an `io::Error` with the path it occurred at, mapping permission
    /// problems to their own variant.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::PermissionDenied {
            CleanError::PermissionDenied { path }
        } else {
            CleanError::Io { path, source }
        }
    }
}
