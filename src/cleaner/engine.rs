use std::path::Path;
use tracing::info;

use crate::common::errors::CleanError;
use crate::common::scope::CleanupScope;
use crate::common::CancelToken;
use crate::privacy::registry::{is_registered, PrivacySpec};
use crate::scanner::ScanResult;
use crate::shredder;

/// Report from one cleanup call. The byte count accumulates incrementally:
/// a failure late in a batch never throws away what was already freed.
#[derive(Debug, Default)]
pub struct CleanReport {
    pub bytes_freed: u64,
    pub files_removed: u64,
    pub failures: Vec<String>,
}

/// Orchestrates scan → selection → deletion for the cache and privacy
/// flows. Holds only the read-only scope; every call is a self-contained
/// unit of work and no inventory survives between calls — callers pass the
/// snapshot they obtained from `scan`/`locate`.
pub struct Coordinator<'a> {
    scope: &'a CleanupScope,
}

impl<'a> Coordinator<'a> {
    pub fn new(scope: &'a CleanupScope) -> Self {
        Self { scope }
    }

    /// Ordinary deletion of a cache path surfaced by `inventory`.
    ///
    /// Rejected before any filesystem mutation when the path was not part
    /// of the scan or lies outside the user scope. A path that vanished
    /// since the scan is a zero-byte success.
    pub fn clean_cache(
        &self,
        inventory: &ScanResult,
        path: &Path,
    ) -> Result<CleanReport, CleanError> {
        if !inventory.contains_path(path) {
            return Err(CleanError::UnknownPath {
                path: path.to_path_buf(),
            });
        }
        self.scope.check(path)?;

        let report = shredder::delete_any(path)?;
        info!(
            "cleaned {}: {} bytes, {} files, {} failures",
            path.display(),
            report.bytes_freed,
            report.files_removed,
            report.failures.len()
        );
        Ok(CleanReport {
            bytes_freed: report.bytes_freed,
            files_removed: report.files_removed,
            failures: report.failures,
        })
    }

    /// Remove a privacy item, ordinarily or securely per the flag.
    ///
    /// The path must resolve to (or under) a registry entry; anything else
    /// is rejected as an unknown path before touching the filesystem.
    pub fn clean_privacy(
        &self,
        registry: &[PrivacySpec],
        path: &Path,
        secure: bool,
        cancel: &CancelToken,
    ) -> Result<CleanReport, CleanError> {
        if !is_registered(registry, path) {
            return Err(CleanError::UnknownPath {
                path: path.to_path_buf(),
            });
        }
        self.scope.check(path)?;

        if !secure {
            let report = shredder::delete_any(path)?;
            return Ok(CleanReport {
                bytes_freed: report.bytes_freed,
                files_removed: report.files_removed,
                failures: report.failures,
            });
        }

        let meta = path.symlink_metadata().ok();
        let existed = meta.is_some();
        let is_dir = meta.map(|m| m.is_dir()).unwrap_or(false);

        if is_dir {
            let report = shredder::secure_delete_dir(path, cancel)?;
            Ok(CleanReport {
                bytes_freed: report.bytes_freed,
                files_removed: report.files_shredded,
                failures: report
                    .failures
                    .into_iter()
                    .map(|f| format!("{}: {}", f.path.display(), f.error))
                    .collect(),
            })
        } else {
            let bytes = shredder::secure_delete_file(path)?;
            Ok(CleanReport {
                bytes_freed: bytes,
                files_removed: u64::from(existed),
                failures: Vec::new(),
            })
        }
    }
}
