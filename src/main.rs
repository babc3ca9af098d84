use anyhow::{bail, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use diskscrub::cleaner::Coordinator;
use diskscrub::cli::args::{Cli, Commands, CompletionShell, OutputFormat, PrivacyAction};
use diskscrub::cli::output;
use diskscrub::common::format::{format_path, format_size};
use diskscrub::common::{CancelToken, CleanupScope};
use diskscrub::privacy;
use diskscrub::scanner::{self, Category, Classifier, RootKind, RootSpec};
use diskscrub::shredder;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("diskscrub=debug")
            .init();
    }

    match cli.command {
        Commands::Scan { ref root, detailed } => cmd_scan(&cli, root, detailed),

        Commands::Clean {
            ref path,
            ref root,
            yes,
        } => cmd_clean(&cli, path, root, yes),

        Commands::Shred { ref path, yes } => cmd_shred(&cli, path, yes),

        Commands::Privacy { ref action } => match action {
            PrivacyAction::List => cmd_privacy_list(&cli),
            PrivacyAction::Clean { path, secure, yes } => {
                cmd_privacy_clean(&cli, path, *secure, *yes)
            }
        },

        Commands::Completions { shell } => {
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            let shell = match shell {
                CompletionShell::Bash => clap_complete::Shell::Bash,
                CompletionShell::Zsh => clap_complete::Shell::Zsh,
                CompletionShell::Fish => clap_complete::Shell::Fish,
            };
            clap_complete::generate(shell, &mut cmd, "diskscrub", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Root table for this invocation: explicit overrides or the built-ins.
fn resolve_roots(overrides: &[PathBuf]) -> Vec<RootSpec> {
    if overrides.is_empty() {
        scanner::default_roots()
    } else {
        overrides
            .iter()
            .map(|p| {
                RootSpec::new(
                    "Custom Root",
                    p.to_string_lossy().to_string(),
                    RootKind::Aggregate(Category::Uncategorized),
                )
            })
            .collect()
    }
}

/// Scope for this invocation: the overrides' parents when roots were given
/// explicitly, otherwise the current user's profile scope.
fn resolve_scope(overrides: &[PathBuf]) -> CleanupScope {
    if overrides.is_empty() {
        CleanupScope::for_current_user()
    } else {
        let parents = overrides
            .iter()
            .filter_map(|p| p.parent().map(|parent| parent.to_path_buf()))
            .collect();
        CleanupScope::with_roots(parents)
    }
}

fn run_scan(cli: &Cli, roots: &[RootSpec]) -> Result<scanner::ScanResult> {
    let classifier = Classifier::with_default_rules();
    let cancel = CancelToken::new();

    let spinner = if cli.format == OutputFormat::Human && !cli.quiet {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.set_message("Scanning cache locations...");
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let result = scanner::scan(&classifier, roots, &cancel)?;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    Ok(result)
}

fn cmd_scan(cli: &Cli, overrides: &[PathBuf], detailed: bool) -> Result<()> {
    let roots = resolve_roots(overrides);
    let result = run_scan(cli, &roots)?;

    match cli.format {
        OutputFormat::Json => output::print_scan_json(&result)?,
        OutputFormat::Human => output::print_scan(&result, detailed),
    }
    Ok(())
}

fn cmd_clean(cli: &Cli, path: &PathBuf, overrides: &[PathBuf], yes: bool) -> Result<()> {
    let roots = resolve_roots(overrides);
    let inventory = run_scan(cli, &roots)?;
    let scope = resolve_scope(overrides);
    let coordinator = Coordinator::new(&scope);

    if !confirm(
        &format!("Delete {}? This cannot be undone.", format_path(path)),
        yes,
    )? {
        println!("Aborted.");
        return Ok(());
    }

    let report = coordinator.clean_cache(&inventory, path)?;
    if !cli.quiet {
        output::print_clean_report(&report);
    }
    Ok(())
}

fn cmd_shred(cli: &Cli, path: &PathBuf, yes: bool) -> Result<()> {
    let scope = CleanupScope::for_current_user();
    scope.check(path)?;

    let meta = match path.symlink_metadata() {
        Ok(meta) => Some(meta),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => bail!("cannot stat {}: {}", path.display(), e),
    };

    if !confirm(
        &format!(
            "{} {}? Contents will be unrecoverable.",
            "Securely erase".red().bold(),
            format_path(path)
        ),
        yes,
    )? {
        println!("Aborted.");
        return Ok(());
    }

    let cancel = CancelToken::new();
    match meta {
        Some(meta) if meta.is_dir() => {
            let report = shredder::secure_delete_dir(path, &cancel)?;
            if !cli.quiet {
                output::print_shred_report(&report);
            }
        }
        _ => {
            let bytes = shredder::secure_delete_file(path)?;
            if !cli.quiet {
                println!("{} securely erased", format_size(bytes).green().bold());
            }
        }
    }
    Ok(())
}

fn cmd_privacy_list(cli: &Cli) -> Result<()> {
    let registry = privacy::default_registry();
    let items = privacy::locate(&registry);

    match cli.format {
        OutputFormat::Json => output::print_privacy_json(&items)?,
        OutputFormat::Human => output::print_privacy(&items),
    }
    Ok(())
}

fn cmd_privacy_clean(cli: &Cli, path: &PathBuf, secure: bool, yes: bool) -> Result<()> {
    let registry = privacy::default_registry();
    let scope = CleanupScope::for_current_user();
    let coordinator = Coordinator::new(&scope);
    let cancel = CancelToken::new();

    let verb = if secure { "Securely erase" } else { "Delete" };
    if !confirm(&format!("{} {}?", verb, format_path(path)), yes)? {
        println!("Aborted.");
        return Ok(());
    }

    let report = coordinator.clean_privacy(&registry, path, secure, &cancel)?;
    if !cli.quiet {
        output::print_clean_report(&report);
    }
    Ok(())
}

/// Ask for confirmation on stdin unless `--yes` was given.
fn confirm(prompt: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}
