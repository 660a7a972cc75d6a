//! Structured observability hooks for validation runs.
//!
//! This module provides:
//! - A ticket-scoped tracing span via [`validation_span`]
//! - Emission functions for the run lifecycle: start, per-validator outcome, finish
//!
//! Nothing in the engine depends on these events; they exist for operators.

use tracing::{debug, info, warn, Span};

use crate::domain::{Criterion, ValidationSummary};

/// Span tagged with the (shortened) ticket digest.
///
/// Attach it to the validation future with `Instrument::instrument` so
/// spawned validator tasks inherit it.
///
/// # Example
///
/// ```ignore
/// let span = validation_span("9f86d08...");
/// engine.validate(&ticket).instrument(span).await;
/// ```
pub fn validation_span(ticket_digest: &str) -> Span {
    let short = ticket_digest.get(..12).unwrap_or(ticket_digest);
    tracing::info_span!("aecv.validation", ticket = %short)
}

/// Emit event: validation fanned out to `validators` validators.
pub fn emit_validation_started(title: &str, validators: usize) {
    info!(event = "validation.started", title = %title, validators = validators);
}

/// Emit event: one validator produced a result.
pub fn emit_validator_completed(criterion: Criterion, score: f64, passed: bool, blockers: usize) {
    debug!(
        event = "validator.completed",
        criterion = %criterion,
        score = score,
        passed = passed,
        blockers = blockers,
    );
}

/// Emit event: a validator errored, panicked or timed out (warning level).
pub fn emit_validator_failed(criterion: Criterion, error: &dyn std::fmt::Display) {
    warn!(event = "validator.failed", criterion = %criterion, error = %error);
}

/// Emit event: all validators finished and the summary was computed.
pub fn emit_validation_finished(summary: &ValidationSummary, duration_ms: u64) {
    info!(
        event = "validation.finished",
        overall_score = summary.overall_score,
        passed = summary.passed,
        failed_validators = summary.failed_validators,
        critical_issues = summary.critical_issues,
        duration_ms = duration_ms,
    );
}
