use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Cache category classification. A closed set: every reported item carries
/// exactly one of these tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    BrowserCache,
    PackageCache,
    BuildCache,
    AppCache,
    Thumbnails,
    Logs,
    TempFiles,
    /// Fallback for a path that is explicitly enumerated as a scan root but
    /// matches no finer rule.
    Uncategorized,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::BrowserCache => write!(f, "Browser Cache"),
            Category::PackageCache => write!(f, "Package Cache"),
            Category::BuildCache => write!(f, "Build Cache"),
            Category::AppCache => write!(f, "App Cache"),
            Category::Thumbnails => write!(f, "Thumbnails"),
            Category::Logs => write!(f, "Logs"),
            Category::TempFiles => write!(f, "Temporary Files"),
            Category::Uncategorized => write!(f, "Uncategorized"),
        }
    }
}

/// How a rule matches a candidate path.
#[derive(Debug, Clone)]
enum Pattern {
    /// Path equals the prefix or descends from it. Specific: resolved from
    /// the user's home/cache directories once at startup.
    Prefix(PathBuf),
    /// Final path component equals the name. Generic: "any folder literally
    /// named cache".
    Component(&'static str),
    /// Final path component ends with the suffix (file extensions).
    Suffix(&'static str),
}

#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Pattern,
    category: Category,
}

/// Ordered first-match-wins classifier. Rule order is precedence order:
/// specific prefix rules are installed ahead of generic component rules, so
/// a named application cache wins over "the folder happens to be called
/// cache". Pure: no filesystem access after construction.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    rules: Vec<Rule>,
}

/// Application cache locations relative to the home directory, tried before
/// any generic rule. Entries for all supported platforms coexist; paths that
/// do not exist on this machine simply never come up.
const HOME_PREFIX_RULES: &[(&str, Category)] = &[
    // Browsers
    (".cache/google-chrome", Category::BrowserCache),
    (".cache/chromium", Category::BrowserCache),
    (".cache/mozilla", Category::BrowserCache),
    (".config/BraveSoftware/Brave-Browser/Default/Cache", Category::BrowserCache),
    ("Library/Caches/Google/Chrome", Category::BrowserCache),
    ("Library/Caches/com.apple.Safari", Category::BrowserCache),
    ("Library/Caches/Firefox", Category::BrowserCache),
    ("AppData/Local/Google/Chrome/User Data/Default/Cache", Category::BrowserCache),
    ("AppData/Local/Microsoft/Edge/User Data/Default/Cache", Category::BrowserCache),
    // Package managers
    (".cache/pip", Category::PackageCache),
    (".npm/_cacache", Category::PackageCache),
    (".cargo/registry/cache", Category::PackageCache),
    (".cargo/registry/src", Category::PackageCache),
    (".m2/repository", Category::PackageCache),
    (".conda/pkgs", Category::PackageCache),
    ("Library/Caches/Homebrew", Category::PackageCache),
    ("Library/Caches/pip", Category::PackageCache),
    ("Library/Caches/Yarn", Category::PackageCache),
    // Build tools
    (".gradle/caches", Category::BuildCache),
    (".cache/bazel", Category::BuildCache),
    ("Library/Developer/Xcode/DerivedData", Category::BuildCache),
    // Thumbnails
    (".cache/thumbnails", Category::Thumbnails),
    (".thumbnails", Category::Thumbnails),
    ("AppData/Local/Microsoft/Windows/Explorer", Category::Thumbnails),
];

/// Generic final-component rules, evaluated after every prefix rule.
const COMPONENT_RULES: &[(&str, Category)] = &[
    ("node_modules", Category::BuildCache),
    ("thumbnails", Category::Thumbnails),
    (".thumbnails", Category::Thumbnails),
    ("cache", Category::AppCache),
    ("Cache", Category::AppCache),
    ("caches", Category::AppCache),
    ("Caches", Category::AppCache),
    (".cache", Category::AppCache),
    ("Cache_Data", Category::AppCache),
    ("logs", Category::Logs),
    ("log", Category::Logs),
    ("Logs", Category::Logs),
    ("tmp", Category::TempFiles),
    ("temp", Category::TempFiles),
    ("Temp", Category::TempFiles),
];

const SUFFIX_RULES: &[(&str, Category)] = &[(".log", Category::Logs)];

impl Classifier {
    /// The built-in rule table, resolved against this user's home directory.
    pub fn with_default_rules() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"));
        let mut rules = Vec::new();

        for (rel, category) in HOME_PREFIX_RULES {
            rules.push(Rule {
                pattern: Pattern::Prefix(home.join(rel)),
                category: *category,
            });
        }
        for (name, category) in COMPONENT_RULES {
            rules.push(Rule {
                pattern: Pattern::Component(name),
                category: *category,
            });
        }
        for (suffix, category) in SUFFIX_RULES {
            rules.push(Rule {
                pattern: Pattern::Suffix(suffix),
                category: *category,
            });
        }

        Self { rules }
    }

    /// Extra prefix rule, highest precedence among equals of its kind.
    /// Used by tests and by callers scanning non-default roots.
    pub fn with_prefix_rule(mut self, prefix: PathBuf, category: Category) -> Self {
        self.rules.insert(
            0,
            Rule {
                pattern: Pattern::Prefix(prefix),
                category,
            },
        );
        self
    }

    /// Map a path to a category. First matching rule wins; `None` means the
    /// path is not a cache item and is excluded from scan results entirely.
    pub fn classify(&self, path: &Path) -> Option<Category> {
        let name = path.file_name().map(|n| n.to_string_lossy());
        for rule in &self.rules {
            let hit = match &rule.pattern {
                Pattern::Prefix(prefix) => path.starts_with(prefix),
                Pattern::Component(component) => {
                    name.as_deref() == Some(component)
                }
                Pattern::Suffix(suffix) => name
                    .as_deref()
                    .map(|n| n.ends_with(suffix))
                    .unwrap_or(false),
            };
            if hit {
                return Some(rule.category);
            }
        }
        None
    }
}
