use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// diskscrub — a privacy-first disk hygiene utility
#[derive(Parser, Debug)]
#[command(
    name = "diskscrub",
    version,
    about = "Scan for reclaimable caches and privacy artifacts, then remove them",
    long_about = "diskscrub discovers reclaimable cache data and privacy-sensitive\n\
                  artifacts, reports their size and category, and removes them —\n\
                  optionally with a DoD 5220.22-M style multi-pass secure overwrite.",
    after_help = "EXAMPLES:\n  \
        diskscrub scan                         Scan the default cache locations\n  \
        diskscrub scan --format json           Machine-readable inventory\n  \
        diskscrub clean ~/.cache/pip           Delete a scanned cache ordinarily\n  \
        diskscrub shred ~/old-secrets.db       Multi-pass secure erase of a file\n  \
        diskscrub privacy list                 Show known privacy-sensitive paths\n  \
        diskscrub privacy clean PATH --secure  Securely remove a privacy item"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode — minimal output
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan for reclaimable cache data
    Scan {
        /// Scan these roots instead of the built-in table (repeatable)
        #[arg(long, value_name = "PATH")]
        root: Vec<PathBuf>,

        /// Show per-item file counts and categories
        #[arg(long)]
        detailed: bool,
    },

    /// Delete a cache path surfaced by a scan (ordinary delete)
    Clean {
        /// Path to remove; must match a scanned item
        path: PathBuf,

        /// Scan these roots instead of the built-in table (repeatable)
        #[arg(long, value_name = "PATH")]
        root: Vec<PathBuf>,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Securely erase a file or directory (DoD 5220.22-M style)
    Shred {
        /// File or directory to erase
        path: PathBuf,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Inspect or clean privacy-sensitive locations
    Privacy {
        #[command(subcommand)]
        action: PrivacyAction,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand, Debug)]
pub enum PrivacyAction {
    /// List known privacy-sensitive paths and whether they exist
    List,

    /// Remove a privacy item from the registry
    Clean {
        /// Path to remove; must match a registry entry
        path: PathBuf,

        /// Multi-pass secure overwrite instead of ordinary delete
        #[arg(long)]
        secure: bool,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Human,
    Json,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
