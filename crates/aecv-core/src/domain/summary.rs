//! Weighted aggregate over a batch of validation results.

use serde::{Deserialize, Serialize};

use crate::domain::ValidationResult;

/// Engine-level verdict for one validation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// `Σ weighted_score / Σ weight`, or 0 when there is nothing to weigh.
    pub overall_score: f64,
    /// `overall_score >= pass_threshold`.
    pub passed: bool,
    pub total_validators: usize,
    pub passed_validators: usize,
    pub failed_validators: usize,
    /// Results with at least one blocker.
    pub critical_issues: usize,
    /// Non-blocking issues across all results.
    pub total_issues: usize,
}

/// Aggregate `results` against the engine-level `pass_threshold`.
///
/// Results from validators that failed to run are included at score 0, so
/// their weight still counts toward the denominator.
pub fn summarize(results: &[ValidationResult], pass_threshold: f64) -> ValidationSummary {
    let total_weight: f64 = results.iter().map(ValidationResult::weight).sum();
    let weighted: f64 = results.iter().map(ValidationResult::weighted_score).sum();

    let overall_score = if results.is_empty() || total_weight <= 0.0 {
        0.0
    } else {
        (weighted / total_weight).clamp(0.0, 1.0)
    };

    let passed_validators = results.iter().filter(|r| r.passed()).count();

    ValidationSummary {
        overall_score,
        passed: overall_score >= pass_threshold,
        total_validators: results.len(),
        passed_validators,
        failed_validators: results.len() - passed_validators,
        critical_issues: results.iter().filter(|r| r.has_blockers()).count(),
        total_issues: results.iter().map(|r| r.issues().len()).sum(),
    }
}
