//! End-of-run summary printed to stdout

use crate::logging::LOG_FILE_NAME;
use chrono::{DateTime, Local};
use colored::Colorize;
use loam_core::{MigrationConfig, RunReport};
use std::fmt::Write;

/// How many warnings or errors are listed before the rest are elided
const LISTED_ITEMS: usize = 5;

pub fn render_summary(
    report: &RunReport,
    config: &MigrationConfig,
    finished: DateTime<Local>,
) -> String {
    let rule = "=".repeat(60);
    let mut out = String::new();

    let _ = writeln!(out, "\n{rule}\n{}\n{rule}", "MIGRATION SUMMARY".bold());
    let _ = writeln!(out, "Source directory: {}", config.source_root.display());
    let _ = writeln!(out, "Output directory: {}", config.output_root.display());
    let _ = writeln!(out, "Completed at: {}", finished.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out);
    let _ = writeln!(out, "Files processed: {}", report.files_processed);
    let _ = writeln!(out, "Stub pages created: {}", report.stubs_created);
    let _ = writeln!(out, "Assets copied: {}", report.assets_copied);
    let _ = writeln!(out, "Warnings: {}", report.warnings.len());
    let _ = writeln!(out, "Errors: {}", report.errors.len());

    if config.verbose && !report.warnings.is_empty() {
        list_items(&mut out, "Warnings", "warnings", &report.warnings);
    }
    if !report.errors.is_empty() {
        list_items(&mut out, "Errors", "errors", &report.errors);
    }

    let _ = writeln!(out);
    if report.has_errors() {
        let _ = writeln!(
            out,
            "{}",
            "Migration completed with errors. Check the log file for details.".yellow()
        );
    } else {
        let _ = writeln!(out, "{}", "Migration completed successfully!".green());
    }
    let _ = writeln!(out, "Log file: {LOG_FILE_NAME}");
    out
}

fn list_items(out: &mut String, heading: &str, noun: &str, items: &[String]) {
    let _ = writeln!(out, "\n{heading}:");
    for item in items.iter().take(LISTED_ITEMS) {
        let _ = writeln!(out, "  - {item}");
    }
    if items.len() > LISTED_ITEMS {
        let _ = writeln!(out, "  ... and {} more {noun}", items.len() - LISTED_ITEMS);
    }
}
