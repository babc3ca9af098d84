//! DoD 5220.22-M style secure deletion.
//!
//! A regular file is overwritten in three full-length passes — all-zero,
//! all-one, cryptographically random — with a durability flush after every
//! pass (a pass that only reaches the page cache proves nothing), then
//! truncated to zero and unlinked. Directories are shredded bottom-up,
//! best-effort per file: one failed file never aborts its siblings, and only
//! files that completed every pass count toward bytes freed.

use rand::Rng;
use rayon::prelude::*;
use std::fs::{self, File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::common::errors::CleanError;
use crate::common::CancelToken;

const CHUNK_SIZE: usize = 64 * 1024;

/// Outcome of a recursive secure delete.
#[derive(Debug, Default)]
pub struct ShredReport {
    /// Bytes reclaimed by files that completed all passes and were unlinked.
    pub bytes_freed: u64,
    /// Files fully shredded and removed.
    pub files_shredded: u64,
    /// Per-file failures; these files were left in place.
    pub failures: Vec<ShredFailure>,
    /// True when cancellation stopped the operation before completion.
    /// Files listed in `failures` with a cancellation note were NOT
    /// securely erased.
    pub cancelled: bool,
}

#[derive(Debug)]
pub struct ShredFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of an ordinary (non-secure) recursive delete.
#[derive(Debug, Default)]
pub struct DeleteReport {
    pub bytes_freed: u64,
    pub files_removed: u64,
    pub failures: Vec<String>,
}

/// Securely erase a single file, returning the bytes freed.
///
/// A missing path is a success with zero bytes: the goal — absence — is
/// already achieved. Symbolic links are unlinked directly, never overwritten
/// through. Zero-length files skip the passes but are still unlinked. On any
/// mid-pass failure the file is left in place (not unlinked) so the caller
/// can retry or inspect it.
pub fn secure_delete_file(path: &Path) -> Result<u64, CleanError> {
    let meta = match path.symlink_metadata() {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(CleanError::io(path, e)),
    };

    if meta.file_type().is_symlink() {
        fs::remove_file(path).map_err(|e| CleanError::io(path, e))?;
        // The link itself holds no recoverable content; its target survives.
        return Ok(0);
    }
    if meta.is_dir() {
        return Err(CleanError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    let size = meta.len();
    if size == 0 {
        fs::remove_file(path).map_err(|e| CleanError::io(path, e))?;
        return Ok(0);
    }

    shred_passes(path, size).map_err(|e| CleanError::io(path, e))?;
    fs::remove_file(path).map_err(|e| CleanError::io(path, e))?;
    debug!("shredded {} ({} bytes)", path.display(), size);
    Ok(size)
}

/// Recursively secure-delete a directory tree, bottom-up.
///
/// Best-effort per file, never atomic-all-or-nothing. Files are shredded in
/// parallel across a bounded pool, but the pass sequence within any single
/// file stays strictly sequential. Cancellation is honored at file
/// boundaries only; files skipped by cancellation are reported as not
/// securely erased.
pub fn secure_delete_dir(path: &Path, cancel: &CancelToken) -> Result<ShredReport, CleanError> {
    let mut report = ShredReport::default();

    let meta = match path.symlink_metadata() {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(report),
        Err(e) => return Err(CleanError::io(path, e)),
    };

    // A single file target degrades gracefully to the single-file erase.
    if !meta.is_dir() {
        match secure_delete_file(path) {
            Ok(bytes) => {
                report.bytes_freed = bytes;
                report.files_shredded = 1;
            }
            Err(e) => report.failures.push(ShredFailure {
                path: path.to_path_buf(),
                error: e.to_string(),
            }),
        }
        return Ok(report);
    }

    // Inventory pass: collect files and links, record unreadable subtrees.
    let mut targets: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(path).follow_links(false).into_iter() {
        match entry {
            Ok(entry) if !entry.file_type().is_dir() => {
                targets.push(entry.path().to_path_buf());
            }
            Ok(_) => {}
            Err(e) => {
                let at = e
                    .path()
                    .map(|p| p.to_path_buf())
                    .unwrap_or_else(|| path.to_path_buf());
                report.failures.push(ShredFailure {
                    path: at,
                    error: e.to_string(),
                });
            }
        }
    }

    // Shred files in parallel; per-file pass ordering stays sequential
    // inside secure_delete_file.
    let outcomes: Vec<Result<u64, ShredFailure>> = targets
        .par_iter()
        .map(|file| {
            if cancel.is_cancelled() {
                return Err(ShredFailure {
                    path: file.clone(),
                    error: "cancelled before secure erase".to_string(),
                });
            }
            secure_delete_file(file).map_err(|e| ShredFailure {
                path: file.clone(),
                error: e.to_string(),
            })
        })
        .collect();

    for outcome in outcomes {
        match outcome {
            Ok(bytes) => {
                report.bytes_freed += bytes;
                report.files_shredded += 1;
            }
            Err(failure) => {
                warn!("shred failure at {}: {}", failure.path.display(), failure.error);
                report.failures.push(failure);
            }
        }
    }

    report.cancelled = cancel.is_cancelled();
    if report.cancelled {
        return Ok(report);
    }

    // Remove now-empty directories bottom-up; directories still holding
    // failed files refuse removal and are simply left behind.
    for entry in WalkDir::new(path)
        .follow_links(false)
        .contents_first(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if entry.file_type().is_dir() {
            let _ = fs::remove_dir(entry.path());
        }
    }

    Ok(report)
}

/// Ordinary delete with incremental byte accounting. Missing paths are a
/// zero-byte success; per-file failures are recorded and do not abort the
/// rest of the tree. The byte count only ever grows — a late failure never
/// discards what was already freed.
pub fn delete_any(path: &Path) -> Result<DeleteReport, CleanError> {
    let mut report = DeleteReport::default();

    let meta = match path.symlink_metadata() {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(report),
        Err(e) => return Err(CleanError::io(path, e)),
    };

    if !meta.is_dir() {
        let size = if meta.file_type().is_file() { meta.len() } else { 0 };
        fs::remove_file(path).map_err(|e| CleanError::io(path, e))?;
        report.bytes_freed = size;
        report.files_removed = 1;
        return Ok(report);
    }

    for entry in WalkDir::new(path)
        .follow_links(false)
        .contents_first(true)
        .into_iter()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                report.failures.push(e.to_string());
                continue;
            }
        };

        if entry.file_type().is_dir() {
            let _ = fs::remove_dir(entry.path());
            continue;
        }

        let size = if entry.file_type().is_file() {
            entry.metadata().map(|m| m.len()).unwrap_or(0)
        } else {
            0
        };
        match fs::remove_file(entry.path()) {
            Ok(()) => {
                report.bytes_freed += size;
                report.files_removed += 1;
            }
            Err(e) => {
                report
                    .failures
                    .push(format!("{}: {}", entry.path().display(), e));
            }
        }
    }

    Ok(report)
}

/// Storage surface the pass sequence writes to. `File` in production; tests
/// substitute an in-memory recorder to verify ordering and flushing.
trait PassTarget {
    fn rewind(&mut self) -> std::io::Result<()>;
    fn write_chunk(&mut self, buf: &[u8]) -> std::io::Result<()>;
    /// Push the pass to durable storage. A pass that only reaches the page
    /// cache proves nothing.
    fn flush_durable(&mut self) -> std::io::Result<()>;
}

impl PassTarget for File {
    fn rewind(&mut self) -> std::io::Result<()> {
        self.seek(SeekFrom::Start(0)).map(|_| ())
    }

    fn write_chunk(&mut self, buf: &[u8]) -> std::io::Result<()> {
        self.write_all(buf)
    }

    fn flush_durable(&mut self) -> std::io::Result<()> {
        self.sync_all()
    }
}

/// The full pass sequence on an open file, then truncate. Unlinking is the
/// caller's job so a failed pass leaves evidence in place.
fn shred_passes(path: &Path, size: u64) -> std::io::Result<()> {
    let mut file = OpenOptions::new().read(true).write(true).open(path)?;
    run_passes(&mut file, size)?;
    file.set_len(0)?;
    file.sync_all()?;
    Ok(())
}

/// Zero, then one, then random. Each pass covers the full length and is
/// flushed before the next begins.
fn run_passes(target: &mut impl PassTarget, size: u64) -> std::io::Result<()> {
    overwrite_with_pattern(target, size, 0x00)?;
    overwrite_with_pattern(target, size, 0xFF)?;
    overwrite_with_random(target, size)?;
    Ok(())
}

/// One fixed-pattern pass over the full length, flushed to durable storage.
fn overwrite_with_pattern(
    target: &mut impl PassTarget,
    size: u64,
    pattern: u8,
) -> std::io::Result<()> {
    target.rewind()?;
    let buffer = vec![pattern; CHUNK_SIZE];
    let mut remaining = size;

    while remaining > 0 {
        let chunk = (remaining as usize).min(CHUNK_SIZE);
        target.write_chunk(&buffer[..chunk])?;
        remaining -= chunk as u64;
    }

    target.flush_durable()?;
    Ok(())
}

/// One cryptographically random pass over the full length, flushed.
fn overwrite_with_random(target: &mut impl PassTarget, size: u64) -> std::io::Result<()> {
    target.rewind()?;
    let mut rng = rand::thread_rng();
    let mut buffer = vec![0u8; CHUNK_SIZE];
    let mut remaining = size;

    while remaining > 0 {
        let chunk = (remaining as usize).min(CHUNK_SIZE);
        rng.fill(&mut buffer[..chunk]);
        target.write_chunk(&buffer[..chunk])?;
        remaining -= chunk as u64;
    }

    target.flush_durable()?;
    Ok(())
}
