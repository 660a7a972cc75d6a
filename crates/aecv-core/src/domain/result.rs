//! Immutable outcome of one validator run.

use serde::Serialize;

use crate::domain::Criterion;
use crate::error::{Result, ValidationError};

/// Outcome of a single validator invocation.
///
/// # Invariants
///
/// Enforced by [`ValidationResult::new`]:
/// - `score`, `weight` and `pass_threshold` lie in `[0.0, 1.0]`
/// - `message` is non-empty
/// - `weighted_score == score * weight`
/// - `passed == (score >= pass_threshold)`
///
/// Fields are read-only after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    criterion: Criterion,
    score: f64,
    weight: f64,
    weighted_score: f64,
    pass_threshold: f64,
    passed: bool,
    issues: Vec<String>,
    blockers: Vec<String>,
    message: String,
}

impl ValidationResult {
    pub fn new(
        criterion: Criterion,
        score: f64,
        weight: f64,
        pass_threshold: f64,
        issues: Vec<String>,
        blockers: Vec<String>,
        message: impl Into<String>,
    ) -> Result<Self> {
        let message = message.into();
        check_unit("score", score)?;
        check_unit("weight", weight)?;
        check_unit("pass_threshold", pass_threshold)?;
        if message.trim().is_empty() {
            return Err(ValidationError::InvalidInput(format!(
                "{criterion} result message must not be empty"
            )));
        }

        Ok(Self {
            criterion,
            score,
            weight,
            weighted_score: score * weight,
            pass_threshold,
            passed: score >= pass_threshold,
            issues,
            blockers,
            message,
        })
    }

    /// Failing result for a validator that could not complete.
    ///
    /// Score is 0 and the reason is recorded both as an issue and a blocker.
    /// Weight and threshold are clamped into range so this never fails. The
    /// result is always failing, even under a zero pass threshold.
    pub fn could_not_complete(
        criterion: Criterion,
        weight: f64,
        pass_threshold: f64,
        reason: &str,
    ) -> Self {
        let finding = format!("{criterion} validator could not complete: {reason}");
        let weight = clamp_unit(weight);
        let pass_threshold = clamp_unit(pass_threshold);
        Self {
            criterion,
            score: 0.0,
            weight,
            weighted_score: 0.0,
            pass_threshold,
            passed: false,
            issues: vec![finding.clone()],
            blockers: vec![finding],
            message: format!("{criterion} validation failed to run"),
        }
    }

    pub fn criterion(&self) -> Criterion {
        self.criterion
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn weighted_score(&self) -> f64 {
        self.weighted_score
    }

    pub fn pass_threshold(&self) -> f64 {
        self.pass_threshold
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    /// Non-blocking findings, in discovery order.
    pub fn issues(&self) -> &[String] {
        &self.issues
    }

    /// Findings severe enough to fail the ticket outright.
    pub fn blockers(&self) -> &[String] {
        &self.blockers
    }

    pub fn has_blockers(&self) -> bool {
        !self.blockers.is_empty()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

pub(crate) fn check_unit(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidInput(format!(
            "{name} {value} outside [0, 1]"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(score: f64, weight: f64, threshold: f64) -> Result<ValidationResult> {
        ValidationResult::new(
            Criterion::Scope,
            score,
            weight,
            threshold,
            vec![],
            vec![],
            "ok",
        )
    }

    #[test]
    fn test_weighted_score_is_derived() {
        let r = result(0.5, 0.6, 0.6).unwrap();
        assert_eq!(r.weighted_score(), 0.5 * 0.6);
        assert!(!r.passed());
    }

    #[test]
    fn test_passed_at_exact_threshold() {
        let r = result(0.6, 0.6, 0.6).unwrap();
        assert!(r.passed());
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        assert!(result(1.01, 0.5, 0.5).is_err());
        assert!(result(-0.1, 0.5, 0.5).is_err());
        assert!(result(0.5, 1.5, 0.5).is_err());
        assert!(result(0.5, 0.5, -1.0).is_err());
        assert!(result(f64::NAN, 0.5, 0.5).is_err());
    }

    #[test]
    fn test_rejects_empty_message() {
        let err = ValidationResult::new(Criterion::Clarity, 0.5, 0.5, 0.5, vec![], vec![], "  ")
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidInput(_)));
    }

    #[test]
    fn test_could_not_complete_records_blocker() {
        let r = ValidationResult::could_not_complete(Criterion::Clarity, 0.8, 0.7, "boom");
        assert_eq!(r.score(), 0.0);
        assert!(!r.passed());
        assert_eq!(r.weight(), 0.8);
        assert_eq!(r.issues().len(), 1);
        assert!(r.blockers()[0].contains("could not complete"));
    }

    #[test]
    fn test_could_not_complete_clamps_bad_config() {
        let r = ValidationResult::could_not_complete(Criterion::Scope, 1.7, f64::NAN, "bad");
        assert_eq!(r.weight(), 1.0);
        assert_eq!(r.pass_threshold(), 0.0);
        assert_eq!(r.weighted_score(), 0.0);
        assert!(!r.passed());
    }
}
