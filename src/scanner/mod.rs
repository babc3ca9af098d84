pub mod classify;
pub mod roots;
pub mod walker;

pub use classify::{Category, Classifier};
pub use roots::{default_roots, RootKind, RootSpec};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, warn};

use crate::common::errors::CleanError;
use crate::common::scope::normalize;
use crate::common::CancelToken;

/// One reclaimable cache found by a scan. An immutable snapshot: size and
/// file count are consistent as of one traversal and never updated live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheItem {
    pub path: PathBuf,
    /// Total bytes owned by this item, recursively for directories.
    pub size: u64,
    /// Number of regular files under this item.
    pub file_count: u64,
    pub category: Category,
}

/// Complete scan results. Totals always equal the sums over `items`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// When the scan was performed
    pub timestamp: chrono::DateTime<chrono::Utc>,

    /// How long the scan took in seconds
    pub duration_secs: f64,

    /// Items in discovery order
    pub items: Vec<CacheItem>,

    /// Sum of item sizes in bytes
    pub total_size: u64,

    /// Sum of item file counts
    pub total_files: u64,

    /// Per-entry errors absorbed during the scan
    pub errors: Vec<String>,
}

impl ScanResult {
    pub fn new() -> Self {
        Self {
            timestamp: chrono::Utc::now(),
            duration_secs: 0.0,
            items: Vec::new(),
            total_size: 0,
            total_files: 0,
            errors: Vec::new(),
        }
    }

    /// Recalculate totals from items
    pub fn recalculate(&mut self) {
        self.total_size = self.items.iter().map(|i| i.size).sum();
        self.total_files = self.items.iter().map(|i| i.file_count).sum();
    }

    /// Whether a path equals, or descends from, a reported item. Used to
    /// validate cleanup targets against this snapshot.
    pub fn contains_path(&self, path: &Path) -> bool {
        let resolved = normalize(path);
        self.items.iter().any(|item| {
            let item_path = normalize(&item.path);
            resolved == item_path || resolved.starts_with(&item_path)
        })
    }
}

impl Default for ScanResult {
    fn default() -> Self {
        Self::new()
    }
}

/// A discovered candidate awaiting its stats pass.
struct Candidate {
    path: PathBuf,
    category: Category,
}

/// Scan the configured roots and return an inventory of cache items.
///
/// Discovery is sequential and deterministic: roots in declared order,
/// children of per-child roots in name order, duplicates removed by
/// canonical path. The stats pass runs in parallel but reassembles in
/// discovery order, so two scans of an unmodified tree produce identical
/// results. Missing roots are skipped silently; unreadable entries are
/// recorded in `errors` and never abort the scan. Cancellation is honored
/// at item boundaries.
pub fn scan(
    classifier: &Classifier,
    roots: &[RootSpec],
    cancel: &CancelToken,
) -> Result<ScanResult, CleanError> {
    if roots.is_empty() {
        return Err(CleanError::NoRoots);
    }

    let start = Instant::now();
    let mut result = ScanResult::new();
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut candidates: Vec<Candidate> = Vec::new();

    for root in roots {
        if cancel.is_cancelled() {
            break;
        }

        for path in roots::expand_pattern(&root.pattern) {
            if path.symlink_metadata().is_err() {
                debug!("skipping missing root: {}", path.display());
                continue;
            }
            if !seen.insert(normalize(&path)) {
                // Already reachable via an earlier root.
                continue;
            }

            match &root.kind {
                RootKind::Aggregate(declared) => {
                    let category = classifier.classify(&path).unwrap_or(*declared);
                    candidates.push(Candidate { path, category });
                }
                RootKind::PerChild => {
                    let entries = match std::fs::read_dir(&path) {
                        Ok(entries) => entries,
                        Err(e) => {
                            warn!("cannot enumerate {}: {}", path.display(), e);
                            result
                                .errors
                                .push(format!("cannot enumerate {}: {}", path.display(), e));
                            continue;
                        }
                    };

                    let mut children: Vec<PathBuf> = Vec::new();
                    for entry in entries {
                        match entry {
                            Ok(entry) => children.push(entry.path()),
                            Err(e) => {
                                warn!("cannot read entry under {}: {}", path.display(), e);
                                result.errors.push(format!(
                                    "cannot read entry under {}: {}",
                                    path.display(),
                                    e
                                ));
                            }
                        }
                    }
                    children.sort();

                    for child in children {
                        if !seen.insert(normalize(&child)) {
                            continue;
                        }
                        // The container was explicitly enumerated, so a
                        // child matching no finer rule still gets reported.
                        let category = classifier
                            .classify(&child)
                            .unwrap_or(Category::Uncategorized);
                        candidates.push(Candidate {
                            path: child,
                            category,
                        });
                    }
                }
            }
        }
    }

    // Stats pass: embarrassingly parallel, order preserved by indexed collect.
    let measured: Vec<(Candidate, walker::DirStats)> = candidates
        .into_par_iter()
        .map(|candidate| {
            if cancel.is_cancelled() {
                return (candidate, walker::DirStats::default());
            }
            let stats = walker::dir_stats(&candidate.path);
            (candidate, stats)
        })
        .collect();

    for (candidate, stats) in measured {
        result.errors.extend(stats.errors);
        if stats.size == 0 {
            continue;
        }
        result.items.push(CacheItem {
            path: candidate.path,
            size: stats.size,
            file_count: stats.file_count,
            category: candidate.category,
        });
    }

    result.recalculate();
    result.duration_secs = start.elapsed().as_secs_f64();
    Ok(result)
}
