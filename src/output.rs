//! CLI output formatting for a migration run.
//!
//! Entities lead with a positional index and their name; filesystem paths
//! follow as indented context lines. Paths under the gallery directory are
//! shown relative to it.
//!
//! # Output Format
//!
//! ```text
//! Captions
//!     Source: photos.dat
//!     Source: photos.dat.0
//!     41 captions
//!
//! Pages
//! 001 gallery_01 (25 photos)
//!     Output: gallery_01
//! 002 gallery_02 (5 photos)
//!     Output: gallery_02
//!
//! Migrated 30 images (12 captioned) into 2 pages
//! ```
//!
//! # Architecture
//!
//! [`format_run_output`] returns `Vec<String>` for testability and
//! [`print_run_output`] writes it to stdout. Formatting is pure: no I/O, no
//! side effects.

use crate::migrate::MigrationReport;
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Positional index + name + photo count.
///
/// ```text
/// 001 gallery_01 (25 photos)
/// ```
fn entity_header(index: usize, name: &str, photos: usize) -> String {
    format!("{} {} ({})", format_index(index), name, plural(photos, "photo"))
}

/// `1 page`, `2 pages`.
fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

/// `path` relative to `root` when it lives underneath it.
fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

// ============================================================================
// Run output
// ============================================================================

/// Format the result of a migration of the gallery at `source`.
///
/// `warnings` is the number of diagnostics reported during the run.
pub fn format_run_output(report: &MigrationReport, source: &Path, warnings: usize) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Captions".to_string());
    for file in &report.metadata_files {
        lines.push(format!("{}Source: {}", indent(1), display_path(file, source)));
    }
    lines.push(format!("{}{}", indent(1), plural(report.captions, "caption")));

    lines.push(String::new());
    lines.push("Pages".to_string());
    if report.pages.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for page in &report.pages {
        let name = page
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        lines.push(entity_header(page.number, &name, page.images));
        lines.push(format!(
            "{}Output: {}",
            indent(1),
            display_path(&page.path, source)
        ));
    }

    lines.push(String::new());
    let mut summary = format!(
        "Migrated {} ({} captioned) into {}",
        plural(report.images_written(), "image"),
        report.captioned,
        plural(report.pages.len(), "page")
    );
    if warnings > 0 {
        summary.push_str(&format!(", {}", plural(warnings, "warning")));
    }
    lines.push(summary);

    lines
}

/// Print run output to stdout.
pub fn print_run_output(report: &MigrationReport, source: &Path, warnings: usize) {
    for line in format_run_output(report, source, warnings) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
