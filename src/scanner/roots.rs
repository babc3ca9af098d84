use std::path::PathBuf;

use super::classify::Category;

/// Granularity of a scan root. This table is the explicit answer to "which
/// directory level is *the* cache root": Aggregate roots are reported as a
/// single item at the root path, PerChild roots report each immediate child
/// as its own item. Nothing deeper is ever reported separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootKind {
    /// The whole tree is one logical cache of the given category.
    Aggregate(Category),
    /// Each immediate child is classified independently; children matching
    /// no rule fall back to `Uncategorized` because the container itself was
    /// explicitly enumerated.
    PerChild,
}

/// A scan root defines where to look and at which level to report findings.
#[derive(Debug, Clone)]
pub struct RootSpec {
    pub name: String,
    /// Path template; `~` expands to the home directory, `*` globs.
    pub pattern: String,
    pub kind: RootKind,
}

impl RootSpec {
    pub fn new(name: &str, pattern: impl Into<String>, kind: RootKind) -> Self {
        Self {
            name: name.to_string(),
            pattern: pattern.into(),
            kind,
        }
    }
}

/// The platform-appropriate scan root table, resolved lazily at scan time.
/// Entries whose paths do not exist on this machine are skipped silently, so
/// locations for all supported platforms can coexist in one declared order.
pub fn default_roots() -> Vec<RootSpec> {
    let mut roots = Vec::new();

    // Specific application caches first — they carry their own category and
    // win the de-duplication pass against the generic container roots below.
    for (name, pattern, category) in [
        ("Chrome Cache", "~/.cache/google-chrome", Category::BrowserCache),
        ("Chromium Cache", "~/.cache/chromium", Category::BrowserCache),
        ("Firefox Cache", "~/.cache/mozilla", Category::BrowserCache),
        ("Chrome Cache", "~/Library/Caches/Google/Chrome", Category::BrowserCache),
        ("Firefox Cache", "~/Library/Caches/Firefox", Category::BrowserCache),
        (
            "Chrome Cache",
            "~/AppData/Local/Google/Chrome/User Data/Default/Cache",
            Category::BrowserCache,
        ),
        (
            "Edge Cache",
            "~/AppData/Local/Microsoft/Edge/User Data/Default/Cache",
            Category::BrowserCache,
        ),
        ("pip Cache", "~/.cache/pip", Category::PackageCache),
        ("npm Cache", "~/.npm/_cacache", Category::PackageCache),
        ("Cargo Registry Cache", "~/.cargo/registry/cache", Category::PackageCache),
        ("Homebrew Cache", "~/Library/Caches/Homebrew", Category::PackageCache),
        ("Gradle Cache", "~/.gradle/caches", Category::BuildCache),
        (
            "Xcode DerivedData",
            "~/Library/Developer/Xcode/DerivedData",
            Category::BuildCache,
        ),
        ("Thumbnail Cache", "~/.cache/thumbnails", Category::Thumbnails),
        ("User Logs", "~/Library/Logs", Category::Logs),
        ("User State Logs", "~/.local/state", Category::Logs),
    ] {
        roots.push(RootSpec::new(name, pattern, RootKind::Aggregate(category)));
    }

    // Generic containers: one item per immediate child, classified by rule.
    if let Some(cache_dir) = dirs::cache_dir() {
        roots.push(RootSpec::new(
            "User Cache Directory",
            cache_dir.to_string_lossy().to_string(),
            RootKind::PerChild,
        ));
    }

    roots.push(RootSpec::new(
        "System Temp",
        std::env::temp_dir().to_string_lossy().to_string(),
        RootKind::Aggregate(Category::TempFiles),
    ));

    roots
}

/// Expand `~` and glob patterns into concrete absolute paths, in a stable
/// order. Missing paths are kept (the scanner skips them) but glob patterns
/// only yield what actually exists.
pub fn expand_pattern(pattern: &str) -> Vec<PathBuf> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"));
    let resolved = if let Some(rest) = pattern.strip_prefix("~/") {
        home.join(rest).to_string_lossy().to_string()
    } else if pattern == "~" {
        home.to_string_lossy().to_string()
    } else {
        pattern.to_string()
    };

    if resolved.contains('*') {
        let mut matches: Vec<PathBuf> = glob::glob(&resolved)
            .map(|paths| paths.filter_map(|p| p.ok()).collect())
            .unwrap_or_default();
        matches.sort();
        matches
    } else {
        vec![PathBuf::from(resolved)]
    }
}
