//! Output formatting module
//!
//! Handles:
//! - Human-readable run summary
//! - JSON output of the full report

use anyhow::Result;
use std::fmt::Write as _;

use crate::models::{StampReport, StepOutcome};

/// Format the report for a terminal
pub fn format_human(report: &StampReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Commit id: {}", report.commit_id);
    if !report.commit_id.is_resolved() {
        let _ = writeln!(out, "  (fallback value, the VCS did not report a revision)");
    }
    let _ = writeln!(out, "Property:    {}", describe(&report.property));
    let _ = writeln!(out, "Source file: {}", describe(&report.source_file));
    out
}

/// Serialize the report as pretty JSON
pub fn format_json(report: &StampReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

fn describe(outcome: &StepOutcome) -> String {
    match outcome {
        StepOutcome::Disabled => "disabled".to_string(),
        StepOutcome::Published { name } => format!("published as '{}'", name),
        StepOutcome::Created { path } => format!("created {}", path.display()),
        StepOutcome::Edited { path } => format!("updated {}", path.display()),
        StepOutcome::Skipped { reason } => format!("skipped ({})", reason),
        StepOutcome::Failed { error } => format!("failed ({})", error),
    }
}
