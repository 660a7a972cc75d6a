//! Validation engine: concurrent fan-out over the registered validators.
//!
//! [`ValidationEngine::validate`] runs every validator as its own tokio task
//! and gathers the results back into registration order. A validator that
//! errors, panics or exceeds the configured time bound is recorded as a
//! failing result for its criterion; the batch always completes.

use std::any::Any;
use std::collections::HashSet;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use futures::FutureExt;
use tokio::task::JoinSet;
use tracing::Instrument;
use uuid::Uuid;

use crate::analysis::TextAnalyzer;
use crate::config::EngineConfig;
use crate::domain::result::check_unit;
use crate::domain::{summarize, Criterion, Ticket, ValidationResult, ValidationSummary};
use crate::error::{Result, ValidationError};
use crate::obs;
use crate::report::ValidationReport;
use crate::validator::Validator;
use crate::validators::standard_validator;

/// Orchestrates one validator per [`Criterion`].
pub struct ValidationEngine {
    validators: Vec<Arc<dyn Validator>>,
    pass_threshold: f64,
    validator_timeout: Option<Duration>,
}

impl ValidationEngine {
    /// Register `validators` with the default engine settings.
    ///
    /// Fails unless there is exactly one validator per criterion and every
    /// validator's weight and threshold lie in `[0, 1]`.
    pub fn new(validators: Vec<Arc<dyn Validator>>) -> Result<Self> {
        Self::with_settings(validators, &EngineConfig::default())
    }

    /// The seven standard validators with default configuration.
    pub fn standard() -> Self {
        let validators = Criterion::ALL
            .iter()
            .map(|&c| standard_validator(c, EngineConfig::default().validator_config(c), None))
            .collect();
        Self {
            validators,
            pass_threshold: crate::config::DEFAULT_PASS_THRESHOLD,
            validator_timeout: None,
        }
    }

    /// Standard validators with `config` overrides applied.
    pub fn from_config(
        config: &EngineConfig,
        analyzer: Option<Arc<dyn TextAnalyzer>>,
    ) -> Result<Self> {
        let mut builder = Self::builder().with_config(config.clone());
        if let Some(analyzer) = analyzer {
            builder = builder.with_analyzer(analyzer);
        }
        builder.build()
    }

    pub fn builder() -> ValidationEngineBuilder {
        ValidationEngineBuilder::default()
    }

    fn with_settings(validators: Vec<Arc<dyn Validator>>, config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        check_registry(&validators)?;
        Ok(Self {
            validators,
            pass_threshold: config.pass_threshold,
            validator_timeout: config.validator_timeout(),
        })
    }

    /// Registered validators, in registration order.
    pub fn validators(&self) -> &[Arc<dyn Validator>] {
        &self.validators
    }

    pub fn pass_threshold(&self) -> f64 {
        self.pass_threshold
    }

    pub fn validator_timeout(&self) -> Option<Duration> {
        self.validator_timeout
    }

    /// Run every validator against `ticket` concurrently.
    ///
    /// Always returns one result per registered validator, in registration
    /// order, regardless of individual failures.
    pub async fn validate(&self, ticket: &Ticket) -> Vec<ValidationResult> {
        obs::emit_validation_started(&ticket.title, self.validators.len());

        let ticket = Arc::new(ticket.clone());
        let mut join_set = JoinSet::new();
        for (idx, validator) in self.validators.iter().enumerate() {
            let validator = Arc::clone(validator);
            let ticket = Arc::clone(&ticket);
            let timeout = self.validator_timeout;
            join_set.spawn(
                async move { (idx, run_isolated(validator, ticket, timeout).await) }
                    .in_current_span(),
            );
        }

        let mut slots: Vec<Option<ValidationResult>> = vec![None; self.validators.len()];
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((idx, result)) => slots[idx] = Some(result),
                // Panics are caught inside the task; this is cancellation.
                Err(e) => tracing::warn!(event = "validator.join_error", error = %e),
            }
        }

        self.validators
            .iter()
            .zip(slots)
            .map(|(validator, slot)| {
                slot.unwrap_or_else(|| {
                    let reason = "validator task was cancelled";
                    obs::emit_validator_failed(validator.criterion(), &reason);
                    failure_result(validator.as_ref(), reason)
                })
            })
            .collect()
    }

    /// Weighted aggregate of `results` against the engine pass threshold.
    pub fn summary(&self, results: &[ValidationResult]) -> ValidationSummary {
        summarize(results, self.pass_threshold)
    }

    /// Validate and package the outcome with the ticket digest and timing.
    pub async fn validate_report(&self, ticket: &Ticket) -> Result<ValidationReport> {
        let ticket_digest = ticket.digest()?;
        let span = obs::validation_span(&ticket_digest);

        async move {
            let started = Instant::now();
            let results = self.validate(ticket).await;
            let summary = self.summary(&results);
            let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
            obs::emit_validation_finished(&summary, duration_ms);

            Ok(ValidationReport {
                report_id: Uuid::new_v4(),
                ticket_digest,
                title: ticket.title.clone(),
                validated_at: Utc::now(),
                duration_ms,
                results,
                summary,
            })
        }
        .instrument(span)
        .await
    }
}

/// Run one validator, converting errors, panics and timeouts into a failing
/// result for its criterion.
async fn run_isolated(
    validator: Arc<dyn Validator>,
    ticket: Arc<Ticket>,
    timeout: Option<Duration>,
) -> ValidationResult {
    let criterion = validator.criterion();
    let guarded = AssertUnwindSafe(validator.validate(&ticket)).catch_unwind();

    let outcome = match timeout {
        Some(limit) => match tokio::time::timeout(limit, guarded).await {
            Ok(outcome) => outcome,
            Err(_) => Ok(Err(ValidationError::Scoring {
                criterion,
                reason: format!("timed out after {}ms", limit.as_millis()),
            })),
        },
        None => guarded.await,
    };

    match outcome {
        Ok(Ok(result)) => {
            obs::emit_validator_completed(
                criterion,
                result.score(),
                result.passed(),
                result.blockers().len(),
            );
            result
        }
        Ok(Err(e)) => {
            obs::emit_validator_failed(criterion, &e);
            failure_result(validator.as_ref(), &e.to_string())
        }
        Err(payload) => {
            let reason = panic_reason(payload.as_ref());
            obs::emit_validator_failed(criterion, &reason);
            failure_result(validator.as_ref(), &reason)
        }
    }
}

fn failure_result(validator: &dyn Validator, reason: &str) -> ValidationResult {
    ValidationResult::could_not_complete(
        validator.criterion(),
        validator.weight(),
        validator.pass_threshold(),
        reason,
    )
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("panicked: {msg}")
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("panicked: {msg}")
    } else {
        "panicked".to_string()
    }
}

fn check_registry(validators: &[Arc<dyn Validator>]) -> Result<()> {
    let mut seen = HashSet::new();
    for v in validators {
        let criterion = v.criterion();
        if !seen.insert(criterion) {
            return Err(ValidationError::Registry(format!(
                "duplicate validator for {criterion}"
            )));
        }
        check_unit("weight", v.weight()).map_err(|e| {
            ValidationError::InvalidConfig(format!("{criterion} validator: {e}"))
        })?;
        check_unit("pass_threshold", v.pass_threshold()).map_err(|e| {
            ValidationError::InvalidConfig(format!("{criterion} validator: {e}"))
        })?;
    }

    let missing: Vec<&str> = Criterion::ALL
        .iter()
        .filter(|c| !seen.contains(*c))
        .map(|c| c.as_str())
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::Registry(format!(
            "missing validators for: {}",
            missing.join(", ")
        )));
    }
    Ok(())
}

/// Builds a [`ValidationEngine`] from the standard validators.
#[derive(Default)]
pub struct ValidationEngineBuilder {
    config: EngineConfig,
    analyzer: Option<Arc<dyn TextAnalyzer>>,
    replacements: Vec<Arc<dyn Validator>>,
}

impl ValidationEngineBuilder {
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Text analyzer handed to the clarity validator.
    pub fn with_analyzer(mut self, analyzer: Arc<dyn TextAnalyzer>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.validator_timeout_ms =
            Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn with_pass_threshold(mut self, pass_threshold: f64) -> Self {
        self.config.pass_threshold = pass_threshold;
        self
    }

    /// Use `validator` in place of the standard one for its criterion.
    pub fn replace(mut self, validator: Arc<dyn Validator>) -> Self {
        self.replacements.push(validator);
        self
    }

    pub fn build(self) -> Result<ValidationEngine> {
        let mut validators: Vec<Arc<dyn Validator>> = Criterion::ALL
            .iter()
            .map(|&c| standard_validator(c, self.config.validator_config(c), self.analyzer.clone()))
            .collect();

        for replacement in self.replacements {
            let criterion = replacement.criterion();
            if let Some(slot) = validators.iter_mut().find(|v| v.criterion() == criterion) {
                *slot = replacement;
            }
        }

        ValidationEngine::with_settings(validators, &self.config)
    }
}
