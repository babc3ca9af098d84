use anyhow::Result;
use colored::*;

use crate::cleaner::CleanReport;
use crate::common::format::{format_count, format_path, format_size, format_size_colored};
use crate::privacy::PrivacyItem;
use crate::scanner::ScanResult;
use crate::shredder::ShredReport;

/// Render a scan inventory as a human table.
pub fn print_scan(result: &ScanResult, detailed: bool) {
    if result.items.is_empty() {
        println!("{}", "Nothing reclaimable found.".green());
    } else {
        println!();
        println!("{}", "Reclaimable caches".bold().underline());
        println!();
        for item in &result.items {
            if detailed {
                println!(
                    "  {:>10}  {:<16}  {}  ({})",
                    format_size_colored(item.size),
                    item.category.to_string().cyan(),
                    format_path(&item.path),
                    format_count(item.file_count).dimmed(),
                );
            } else {
                println!(
                    "  {:>10}  {}",
                    format_size_colored(item.size),
                    format_path(&item.path),
                );
            }
        }
        println!();
        println!(
            "  {} in {} across {} items ({:.1}s)",
            format_size(result.total_size).bold(),
            format_count(result.total_files),
            result.items.len(),
            result.duration_secs,
        );
    }

    for error in &result.errors {
        eprintln!("  {} {}", "warning:".yellow(), error);
    }
}

/// Render a scan inventory as JSON.
pub fn print_scan_json(result: &ScanResult) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}

/// Render the privacy registry evaluation.
pub fn print_privacy(items: &[PrivacyItem]) {
    println!();
    println!("{}", "Privacy-sensitive locations".bold().underline());
    println!();
    for item in items {
        let marker = if item.exists {
            "present".yellow()
        } else {
            "absent ".dimmed()
        };
        println!("  [{}]  {:<28}  {}", marker, item.name, format_path(&item.path));
    }
    println!();
}

pub fn print_privacy_json(items: &[PrivacyItem]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(items)?);
    Ok(())
}

/// Summarize a cleanup call.
pub fn print_clean_report(report: &CleanReport) {
    println!(
        "{} freed ({} removed)",
        format_size(report.bytes_freed).green().bold(),
        format_count(report.files_removed),
    );
    for failure in &report.failures {
        eprintln!("  {} {}", "failed:".red(), failure);
    }
}

/// Summarize a recursive secure erase.
pub fn print_shred_report(report: &ShredReport) {
    println!(
        "{} securely erased ({} shredded)",
        format_size(report.bytes_freed).green().bold(),
        format_count(report.files_shredded),
    );
    if report.cancelled {
        eprintln!(
            "  {} operation cancelled; remaining files were NOT securely erased",
            "warning:".yellow()
        );
    }
    for failure in &report.failures {
        eprintln!(
            "  {} {}: {}",
            "failed:".red(),
            format_path(&failure.path),
            failure.error
        );
    }
}
