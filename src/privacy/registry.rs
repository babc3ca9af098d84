use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::common::scope::normalize;
use crate::scanner::roots::expand_pattern;

/// A known privacy-sensitive location: a human-readable name plus a path
/// template (`~` expansion, optional glob for per-profile paths).
#[derive(Debug, Clone)]
pub struct PrivacySpec {
    pub name: &'static str,
    pub template: &'static str,
}

/// Snapshot of one privacy-relevant location at evaluation time. If
/// `exists` is false nothing about size or contents is implied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrivacyItem {
    pub name: String,
    pub path: PathBuf,
    pub exists: bool,
}

/// The built-in registry, in presentation order. Declared order is stable —
/// the UI shows these in the same sequence every time, not alphabetically.
pub fn default_registry() -> Vec<PrivacySpec> {
    let mut specs = vec![
        PrivacySpec {
            name: "Shell History (bash)",
            template: "~/.bash_history",
        },
        PrivacySpec {
            name: "Shell History (zsh)",
            template: "~/.zsh_history",
        },
        PrivacySpec {
            name: "Git Credentials",
            template: "~/.git-credentials",
        },
        PrivacySpec {
            name: "Netrc Credentials",
            template: "~/.netrc",
        },
        PrivacySpec {
            name: "SSH Known Hosts",
            template: "~/.ssh/known_hosts",
        },
    ];

    if cfg!(target_os = "macos") {
        specs.extend([
            PrivacySpec {
                name: "Safari History",
                template: "~/Library/Safari/History.db",
            },
            PrivacySpec {
                name: "Chrome Browsing History",
                template: "~/Library/Application Support/Google/Chrome/Default/History",
            },
            PrivacySpec {
                name: "Firefox Browsing History",
                template: "~/Library/Application Support/Firefox/Profiles/*.default*/places.sqlite",
            },
            PrivacySpec {
                name: "Recent Items",
                template: "~/Library/Application Support/com.apple.sharedfilelist",
            },
        ]);
    } else if cfg!(target_os = "windows") {
        specs.extend([
            PrivacySpec {
                name: "Chrome Browsing History",
                template: "~/AppData/Local/Google/Chrome/User Data/Default/History",
            },
            PrivacySpec {
                name: "Edge Browsing History",
                template: "~/AppData/Local/Microsoft/Edge/User Data/Default/History",
            },
            PrivacySpec {
                name: "Recent Files",
                template: "~/AppData/Roaming/Microsoft/Windows/Recent",
            },
            PrivacySpec {
                name: "Clipboard History",
                template: "~/AppData/Local/Microsoft/Windows/Clipboard",
            },
        ]);
    } else {
        specs.extend([
            PrivacySpec {
                name: "Chrome Browsing History",
                template: "~/.config/google-chrome/Default/History",
            },
            PrivacySpec {
                name: "Firefox Browsing History",
                template: "~/.mozilla/firefox/*.default*/places.sqlite",
            },
            PrivacySpec {
                name: "Recently Used Files",
                template: "~/.local/share/recently-used.xbel",
            },
            PrivacySpec {
                name: "Thumbnail Cache",
                template: "~/.cache/thumbnails",
            },
        ]);
    }

    specs
}

/// Resolve one template to concrete paths. A glob yields every match in
/// sorted order (one per browser profile, say); a glob with no matches
/// keeps the literal expanded pattern so the UI can still show the
/// location, with `exists = false` downstream.
pub fn resolve_template(template: &str) -> Vec<PathBuf> {
    let expanded = expand_pattern(template);
    if !expanded.is_empty() {
        return expanded;
    }
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"));
    let literal = match template.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None => PathBuf::from(template),
    };
    vec![literal]
}

/// Evaluate the registry. Existence checks only — no recursion, no size
/// computation — so this stays fast enough for interactive display. The
/// result is recomputed fully on every call and never cached. A spec whose
/// glob matches several paths contributes one item per match.
pub fn locate(registry: &[PrivacySpec]) -> Vec<PrivacyItem> {
    let mut items = Vec::new();
    for spec in registry {
        for path in resolve_template(spec.template) {
            let exists = path.symlink_metadata().is_ok();
            items.push(PrivacyItem {
                name: spec.name.to_string(),
                path,
                exists,
            });
        }
    }
    items
}

/// Whether a path resolves to (or under) one of the registry's locations.
/// Gate for `clean_privacy`: arbitrary caller-supplied paths are refused.
pub fn is_registered(registry: &[PrivacySpec], path: &Path) -> bool {
    let resolved = normalize(path);
    registry.iter().any(|spec| {
        resolve_template(spec.template).iter().any(|candidate| {
            let registered = normalize(candidate);
            resolved == registered || resolved.starts_with(&registered)
        })
    })
}
