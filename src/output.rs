//! Persistence and console echo for the summary document.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::Summary;

/// Directory the production run writes into.
pub const OUT_DIR: &str = "/out";
/// File name of the summary document inside the output directory.
pub const SUMMARY_FILE: &str = "summary.json";

/// Writes `summary` as 2-space-indented UTF-8 JSON to `dir/summary.json`
/// and prints the same document to stdout between banner lines.
///
/// The directory and any missing parents are created if absent. Writes are
/// best-effort: no fsync, no retry.
pub fn write_summary(dir: &Path, summary: &Summary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary).context("failed to serialize summary")?;

    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    let path = dir.join(SUMMARY_FILE);
    fs::write(&path, &json).with_context(|| format!("failed to write {}", path.display()))?;

    println!("\n=== Trip Summary ===");
    println!("{}", json);
    println!("\nSummary successfully written to {}", path.display());

    Ok(())
}
