//! Report output

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use teamcore_battle::CoreReport;

/// Write a report as pretty printed JSON
pub fn write_report(path: impl AsRef<Path>, report: &CoreReport) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(report).context("Failed to serialize core report")?;

    fs::write(path, json).with_context(|| format!("Failed to write report to {}", path.display()))?;
    tracing::info!(path = %path.display(), members = report.core.len(), "report written");
    Ok(())
}

/// Read back a report written by [`write_report`]
pub fn read_report(path: impl AsRef<Path>) -> Result<CoreReport> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read report {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Failed to parse report {}", path.display()))
}
