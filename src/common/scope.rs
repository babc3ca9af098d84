use std::path::{Path, PathBuf};

use super::errors::CleanError;

/// Paths that must NEVER be deleted under any circumstances.
/// This is a critical safety net against bugs in scan targets.
const PROTECTED_SYSTEM_PATHS: &[&str] = &[
    "/",
    "/bin",
    "/boot",
    "/dev",
    "/etc",
    "/home",
    "/lib",
    "/opt",
    "/proc",
    "/root",
    "/sbin",
    "/usr",
    "/var",
    "/Applications",
    "/Library",
    "/System",
    "/Users",
    "/Volumes",
    "/private",
];

/// Directories under home that must never be deleted entirely
const PROTECTED_HOME_DIRS: &[&str] = &[
    "Desktop",
    "Documents",
    "Downloads",
    "Pictures",
    "Music",
    "Movies",
    "Videos",
    ".ssh",
    ".gnupg",
];

/// The permitted deletion scope: everything the engine is allowed to touch
/// must sit strictly inside one of the allowed roots and must not be one of
/// the protected locations. Built once at startup and passed by reference.
#[derive(Debug, Clone)]
pub struct CleanupScope {
    allowed: Vec<PathBuf>,
    protected: Vec<PathBuf>,
}

impl CleanupScope {
    /// Scope for the current user: home directory, platform cache directory
    /// and the system temp directory.
    pub fn for_current_user() -> Self {
        let mut allowed = Vec::new();
        if let Some(home) = dirs::home_dir() {
            allowed.push(home);
        }
        if let Some(cache) = dirs::cache_dir() {
            allowed.push(cache);
        }
        allowed.push(std::env::temp_dir());
        Self::with_roots(allowed)
    }

    /// Scope confined to explicit roots. Used by tests and by callers that
    /// want a tighter sandbox than the whole home directory.
    pub fn with_roots(roots: Vec<PathBuf>) -> Self {
        let allowed: Vec<PathBuf> = roots.into_iter().map(|r| normalize(&r)).collect();

        let mut protected: Vec<PathBuf> = PROTECTED_SYSTEM_PATHS
            .iter()
            .map(PathBuf::from)
            .collect();

        // The allowed roots themselves are containers, not targets.
        protected.extend(allowed.iter().cloned());

        if let Some(home) = dirs::home_dir() {
            let home = normalize(&home);
            for dir in PROTECTED_HOME_DIRS {
                protected.push(home.join(dir));
            }
            protected.push(home);
        }

        Self { allowed, protected }
    }

    /// Validate a deletion target. Rejection happens before any filesystem
    /// mutation; a rejected path is never partially cleaned.
    pub fn check(&self, path: &Path) -> Result<(), CleanError> {
        let resolved = normalize(path);

        if self.protected.iter().any(|p| *p == resolved) {
            return Err(CleanError::OutOfScope {
                path: path.to_path_buf(),
            });
        }

        if self
            .allowed
            .iter()
            .any(|root| resolved.starts_with(root) && resolved != *root)
        {
            Ok(())
        } else {
            Err(CleanError::OutOfScope {
                path: path.to_path_buf(),
            })
        }
    }

    /// Convenience predicate form of [`check`](Self::check).
    pub fn contains(&self, path: &Path) -> bool {
        self.check(path).is_ok()
    }
}

/// Resolve a path to its canonical, symlink-free form. Falls back to
/// canonicalizing the parent when the leaf does not exist yet, and to the
/// raw path when nothing resolves — the scope check then fails closed.
pub fn normalize(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    if let (Some(parent), Some(name)) = (path.parent(), path.file_name()) {
        if let Ok(parent) = parent.canonicalize() {
            return parent.join(name);
        }
    }
    path.to_path_buf()
}
