//! Validator contract and the shared scoring lifecycle.
//!
//! Concrete validators implement [`Validator::evaluate`] to produce a
//! [`Scorecard`]; the provided [`Validator::validate`] applies the pass rule,
//! synthesizes a message, and builds the [`ValidationResult`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::result::check_unit;
use crate::domain::{Criterion, Ticket, ValidationResult};
use crate::error::{Result, ValidationError};

/// Fixed per-validator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawValidatorConfig")]
pub struct ValidatorConfig {
    weight: f64,
    pass_threshold: f64,
}

#[derive(Deserialize)]
struct RawValidatorConfig {
    weight: f64,
    pass_threshold: f64,
}

impl TryFrom<RawValidatorConfig> for ValidatorConfig {
    type Error = ValidationError;

    fn try_from(raw: RawValidatorConfig) -> Result<Self> {
        Self::new(raw.weight, raw.pass_threshold)
    }
}

impl ValidatorConfig {
    /// Fails fast when either value lies outside `[0, 1]`.
    pub fn new(weight: f64, pass_threshold: f64) -> Result<Self> {
        check_unit("weight", weight).map_err(config_error)?;
        check_unit("pass_threshold", pass_threshold).map_err(config_error)?;
        Ok(Self {
            weight,
            pass_threshold,
        })
    }

    /// Standard configuration for `criterion`.
    pub fn default_for(criterion: Criterion) -> Self {
        let (weight, pass_threshold) = criterion.default_config();
        Self {
            weight,
            pass_threshold,
        }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn pass_threshold(&self) -> f64 {
        self.pass_threshold
    }
}

fn config_error(err: ValidationError) -> ValidationError {
    match err {
        ValidationError::InvalidInput(msg) => ValidationError::InvalidConfig(msg),
        other => other,
    }
}

/// Raw output of a criterion-specific scoring routine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scorecard {
    pub score: f64,
    pub issues: Vec<String>,
    pub blockers: Vec<String>,
}

impl Scorecard {
    pub fn new(score: f64) -> Self {
        Self {
            score,
            ..Self::default()
        }
    }

    pub fn issue(&mut self, finding: impl Into<String>) {
        self.issues.push(finding.into());
    }

    pub fn blocker(&mut self, finding: impl Into<String>) {
        self.blockers.push(finding.into());
    }

    /// Clamp the score into `[0, 1]`.
    pub fn clamped(mut self) -> Self {
        self.score = self.score.clamp(0.0, 1.0);
        self
    }
}

/// Rounds to four decimals so accumulated partial credit compares cleanly
/// against thresholds. Out-of-range values are left for the result
/// constructor to reject.
fn normalize_score(score: f64) -> f64 {
    (score * 10_000.0).round() / 10_000.0
}

/// Default human-readable message for a scored criterion.
pub fn default_message(criterion: Criterion, card: &Scorecard, passed: bool, threshold: f64) -> String {
    let pct = card.score * 100.0;
    if !card.blockers.is_empty() {
        format!(
            "{criterion} failed with {} blocker(s) and {} issue(s) (score {pct:.0}%)",
            card.blockers.len(),
            card.issues.len(),
        )
    } else if !passed {
        format!(
            "{criterion} below threshold: {pct:.0}% < {:.0}% ({} issue(s))",
            threshold * 100.0,
            card.issues.len(),
        )
    } else if card.issues.is_empty() {
        format!("{criterion} passed (score {pct:.0}%)")
    } else {
        format!(
            "{criterion} passed with {} issue(s) (score {pct:.0}%)",
            card.issues.len()
        )
    }
}

/// A pluggable scoring criterion.
///
/// Implementations hold only their fixed configuration, so a single
/// instance can serve overlapping `validate` calls.
#[async_trait]
pub trait Validator: Send + Sync {
    fn criterion(&self) -> Criterion;

    fn config(&self) -> ValidatorConfig;

    fn weight(&self) -> f64 {
        self.config().weight()
    }

    fn pass_threshold(&self) -> f64 {
        self.config().pass_threshold()
    }

    /// Criterion-specific scoring. Errors propagate to the engine.
    async fn evaluate(&self, ticket: &Ticket) -> Result<Scorecard>;

    fn message(&self, card: &Scorecard, passed: bool) -> String {
        default_message(self.criterion(), card, passed, self.pass_threshold())
    }

    async fn validate(&self, ticket: &Ticket) -> Result<ValidationResult> {
        let mut card = self.evaluate(ticket).await?;
        card.score = normalize_score(card.score);

        let passed = card.score >= self.pass_threshold();
        let message = self.message(&card, passed);
        let Scorecard {
            score,
            issues,
            blockers,
        } = card;

        ValidationResult::new(
            self.criterion(),
            score,
            self.weight(),
            self.pass_threshold(),
            issues,
            blockers,
            message,
        )
    }
}
