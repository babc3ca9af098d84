use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// One traversal entry: the path, whether it is a directory, and its size.
/// Sizes are logical file lengths; directories and special files are zero.
#[derive(Debug, Clone)]
pub struct WalkedEntry {
    pub path: PathBuf,
    pub is_dir: bool,
    pub size: u64,
}

/// Lazily walk a directory tree. Each call produces an independent, finite
/// traversal that is safe to stop early. Symbolic links are never followed,
/// so a link pointing outside the root can never drag the walk out of it.
/// Per-entry failures are yielded as `Err` so the consumer can record them
/// and continue with siblings.
pub fn walk(root: &Path) -> impl Iterator<Item = Result<WalkedEntry, walkdir::Error>> {
    WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .map(|entry| {
            entry.map(|entry| {
                let is_dir = entry.file_type().is_dir();
                let size = if entry.file_type().is_file() {
                    entry.metadata().map(|m| m.len()).unwrap_or(0)
                } else {
                    // Directories, symlinks, devices, sockets: zero.
                    0
                };
                WalkedEntry {
                    path: entry.path().to_path_buf(),
                    is_dir,
                    size,
                }
            })
        })
}

/// Aggregate traversal statistics for one item.
#[derive(Debug, Clone, Default)]
pub struct DirStats {
    /// Recursive sum of regular-file sizes.
    pub size: u64,
    /// Number of regular files under the path.
    pub file_count: u64,
    /// Per-entry failures, recorded instead of aborting.
    pub errors: Vec<String>,
}

/// Compute the recursive size and file count of a path. Works for regular
/// files too (a file is its own one-entry tree). An unreadable subtree
/// contributes an error string, never an abort.
pub fn dir_stats(path: &Path) -> DirStats {
    let mut stats = DirStats::default();

    for entry in walk(path) {
        match entry {
            Ok(entry) => {
                // Symlinks and special files carry zero size; only regular
                // files count toward the file tally.
                if !entry.is_dir && is_regular_file(&entry.path) {
                    stats.size += entry.size;
                    stats.file_count += 1;
                }
            }
            Err(e) => {
                debug!("walk error under {}: {}", path.display(), e);
                stats.errors.push(e.to_string());
            }
        }
    }

    stats
}

fn is_regular_file(path: &Path) -> bool {
    path.symlink_metadata()
        .map(|m| m.file_type().is_file())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn stats_sum_regular_files_recursively() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("a.bin"), vec![0u8; 100]).unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("sub/b.bin"), vec![0u8; 50]).unwrap();

        let stats = dir_stats(tmp.path());
        assert_eq!(stats.size, 150);
        assert_eq!(stats.file_count, 2);
        assert!(stats.errors.is_empty());
    }

    #[test]
    fn stats_of_single_file() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("only.bin");
        fs::write(&file, vec![7u8; 42]).unwrap();

        let stats = dir_stats(&file);
        assert_eq!(stats.size, 42);
        assert_eq!(stats.file_count, 1);
    }

    #[cfg(unix)]
    #[test]
    fn outward_symlink_is_not_traversed() {
        let outside = tempfile::tempdir().unwrap();
        fs::write(outside.path().join("secret.bin"), vec![1u8; 4096]).unwrap();

        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("own.bin"), vec![0u8; 10]).unwrap();
        std::os::unix::fs::symlink(outside.path(), root.path().join("escape")).unwrap();

        let stats = dir_stats(root.path());
        // Only the file physically inside the root is counted.
        assert_eq!(stats.size, 10);
        assert_eq!(stats.file_count, 1);

        let visited: Vec<_> = walk(root.path())
            .filter_map(|e| e.ok())
            .map(|e| e.path)
            .collect();
        assert!(visited.iter().all(|p| !p.starts_with(outside.path())));
        assert!(!visited.iter().any(|p| p.ends_with("secret.bin")));
    }

    #[cfg(unix)]
    #[test]
    fn broken_symlink_is_tolerated() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("real.bin"), vec![0u8; 8]).unwrap();
        std::os::unix::fs::symlink("/nonexistent/target", tmp.path().join("dangling")).unwrap();

        let stats = dir_stats(tmp.path());
        assert_eq!(stats.size, 8);
        assert_eq!(stats.file_count, 1);
    }

    #[test]
    fn walk_is_restartable() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("f.bin"), vec![0u8; 5]).unwrap();

        let first: Vec<_> = walk(tmp.path()).filter_map(|e| e.ok()).map(|e| e.path).collect();
        let second: Vec<_> = walk(tmp.path()).filter_map(|e| e.ok()).map(|e| e.path).collect();
        assert_eq!(first, second);
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_subtree_is_recorded_not_fatal() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("ok.bin"), vec![0u8; 16]).unwrap();
        let locked = tmp.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join("hidden.bin"), vec![0u8; 32]).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Root bypasses permission checks; skip the assertion there.
        let denied = fs::read_dir(&locked).is_err();
        let stats = dir_stats(tmp.path());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        if denied {
            assert_eq!(stats.size, 16);
            assert_eq!(stats.file_count, 1);
            assert!(!stats.errors.is_empty());
        }
    }
}
