//! Validation report artifact and its renderings.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{Criterion, ValidationResult, ValidationSummary};
use crate::error::Result;

/// Everything one validation run produced, keyed by the ticket digest.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub report_id: Uuid,
    /// SHA256 of the ticket snapshot that was validated.
    pub ticket_digest: String,
    pub title: String,
    pub validated_at: DateTime<Utc>,
    pub duration_ms: u64,
    /// One result per criterion, in registration order.
    pub results: Vec<ValidationResult>,
    pub summary: ValidationSummary,
}

impl ValidationReport {
    /// Result for `criterion`, if registered.
    pub fn result(&self, criterion: Criterion) -> Option<&ValidationResult> {
        self.results.iter().find(|r| r.criterion() == criterion)
    }

    /// Every blocker, paired with the criterion that raised it.
    pub fn blockers(&self) -> Vec<(Criterion, &str)> {
        self.results
            .iter()
            .flat_map(|r| r.blockers().iter().map(move |b| (r.criterion(), b.as_str())))
            .collect()
    }
}

fn verdict(passed: bool) -> &'static str {
    if passed {
        "PASS"
    } else {
        "FAIL"
    }
}

/// Plain-text rendering for terminals.
pub fn render_report_text(report: &ValidationReport) -> String {
    let s = &report.summary;
    let mut out = format!(
        "{} {:.0}%: {}\n{} of {} validators passed, {} with blockers, {} issue(s)\n\n",
        verdict(s.passed),
        s.overall_score * 100.0,
        report.title,
        s.passed_validators,
        s.total_validators,
        s.critical_issues,
        s.total_issues,
    );
    for r in &report.results {
        out.push_str(&format!(
            "[{}] {:<18} {:>4.0}%  {}\n",
            verdict(r.passed()),
            r.criterion().as_str(),
            r.score() * 100.0,
            r.message()
        ));
        for b in r.blockers() {
            out.push_str(&format!("      blocker: {b}\n"));
        }
        for i in r.issues() {
            out.push_str(&format!("      - {i}\n"));
        }
    }
    out
}

/// Markdown rendering for PR comments and ticket sidebars.
pub fn render_report_md(report: &ValidationReport) -> String {
    let s = &report.summary;
    let mut out = String::new();
    out.push_str(&format!("# Validation: {}\n\n", report.title));
    out.push_str(&format!(
        "- verdict: **{}**\n- overall score: {:.1}%\n- validators passed: {}/{}\n- critical issues: {}\n- issues: {}\n\n",
        verdict(s.passed),
        s.overall_score * 100.0,
        s.passed_validators,
        s.total_validators,
        s.critical_issues,
        s.total_issues,
    ));

    out.push_str("| criterion | score | weight | result |\n|---|---|---|---|\n");
    for r in &report.results {
        out.push_str(&format!(
            "| {} | {:.0}% | {:.1} | {} |\n",
            r.criterion(),
            r.score() * 100.0,
            r.weight(),
            verdict(r.passed())
        ));
    }

    let blockers = report.blockers();
    if !blockers.is_empty() {
        out.push_str("\n## Blockers\n");
        for (criterion, b) in blockers {
            out.push_str(&format!("- `{criterion}`: {b}\n"));
        }
    }

    let issues: Vec<(Criterion, &String)> = report
        .results
        .iter()
        .flat_map(|r| r.issues().iter().map(move |i| (r.criterion(), i)))
        .collect();
    if !issues.is_empty() {
        out.push_str("\n## Issues\n");
        for (criterion, i) in issues {
            out.push_str(&format!("- `{criterion}`: {i}\n"));
        }
    }
    out
}

/// Write the report as pretty JSON.
pub fn write_report_json(path: &Path, report: &ValidationReport) -> Result<()> {
    let content = serde_json::to_string_pretty(report)?;
    std::fs::write(path, content)?;
    Ok(())
}
