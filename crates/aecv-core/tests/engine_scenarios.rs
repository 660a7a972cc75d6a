use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use aecv_core::{
    Criterion, Result, Scorecard, Ticket, TicketType, ValidationEngine, ValidationError,
    ValidationResult, Validator, ValidatorConfig,
};
use async_trait::async_trait;
use tokio::time::sleep;

fn minimal_ticket() -> Ticket {
    Ticket::new("Fix bug")
}

fn well_formed_ticket() -> Ticket {
    Ticket::new("Implement user authentication with OAuth")
        .with_type(TicketType::Feature)
        .with_description(
            "Users need to sign in with their Google or GitHub account using OAuth 2.0 \
             so they do not have to manage another password.",
        )
        .with_criterion(
            "When the user clicks Sign in with Google, then the app redirects to the Google consent screen",
        )
        .with_criterion(
            "When OAuth login succeeds, then the system creates a session and displays the dashboard",
        )
        .with_criterion(
            "When the OAuth provider returns an error, then the login page shows an error message",
        )
        .with_assumption("Google and GitHub OAuth apps are already registered")
        .with_assumption("Sessions expire after 24 hours")
}

fn result_for(results: &[ValidationResult], criterion: Criterion) -> &ValidationResult {
    results
        .iter()
        .find(|r| r.criterion() == criterion)
        .expect("criterion present")
}

fn assert_result_invariants(results: &[ValidationResult]) {
    for r in results {
        assert!((0.0..=1.0).contains(&r.score()), "{:?}", r);
        assert!((0.0..=1.0).contains(&r.weight()), "{:?}", r);
        assert!((r.weighted_score() - r.score() * r.weight()).abs() < 1e-12);
        assert!(!r.message().is_empty());
    }
}

// ---- Scenarios ----

#[tokio::test]
async fn minimal_ticket_fails() {
    let engine = ValidationEngine::standard();
    let results = engine.validate(&minimal_ticket()).await;
    assert_eq!(results.len(), 7);
    assert_result_invariants(&results);

    let completeness = result_for(&results, Criterion::Completeness);
    assert!(completeness.has_blockers());
    assert!(!completeness.passed());

    let testability = result_for(&results, Criterion::Testability);
    assert_eq!(testability.score(), 0.0);
    assert!(testability.has_blockers());

    let summary = engine.summary(&results);
    assert!(!summary.passed);
    assert!(summary.critical_issues >= 3);
}

#[tokio::test]
async fn well_formed_ticket_passes() {
    let engine = ValidationEngine::standard();
    let results = engine.validate(&well_formed_ticket()).await;
    assert_result_invariants(&results);

    assert!(result_for(&results, Criterion::Completeness).score() > 0.7);
    assert!(result_for(&results, Criterion::Testability).score() > 0.6);

    let summary = engine.summary(&results);
    assert!(summary.passed, "{:?}", summary);
    assert!(summary.overall_score >= 0.7);
    assert_eq!(summary.critical_issues, 0);
}

#[tokio::test]
async fn contradictory_criteria_reported_by_consistency() {
    let ticket = Ticket::new("Feature toggle for beta banner")
        .with_type(TicketType::Feature)
        .with_criterion("Feature must always be enabled")
        .with_criterion("Feature should never show to users");
    let results = ValidationEngine::standard().validate(&ticket).await;
    let consistency = result_for(&results, Criterion::Consistency);
    assert!(!consistency.issues().is_empty());
    assert!(consistency.issues().iter().any(|i| i.contains("never")));
}

#[tokio::test]
async fn too_many_criteria_blocked_by_scope() {
    let mut ticket = Ticket::new("Rebuild the settings page").with_type(TicketType::Task);
    for _ in 0..15 {
        ticket = ticket.with_criterion("Settings page saves the form");
    }
    let results = ValidationEngine::standard().validate(&ticket).await;
    let scope = result_for(&results, Criterion::Scope);
    assert!(scope
        .issues()
        .iter()
        .any(|i| i.to_lowercase().contains("excessive")));
    assert!(scope.has_blockers());
}

#[tokio::test]
async fn weighted_scores_match_registered_weights() {
    let engine = ValidationEngine::standard();
    let results = engine.validate(&well_formed_ticket()).await;
    let expected = [
        (Criterion::Completeness, 1.0),
        (Criterion::Testability, 0.9),
        (Criterion::Clarity, 0.8),
        (Criterion::Feasibility, 0.7),
        (Criterion::Consistency, 0.8),
        (Criterion::ContextAlignment, 0.7),
        (Criterion::Scope, 0.6),
    ];
    for (criterion, weight) in expected {
        let r = result_for(&results, criterion);
        assert_eq!(r.weight(), weight);
        assert_eq!(r.weighted_score(), r.score() * weight);
    }
}

#[tokio::test]
async fn validation_is_idempotent() {
    let engine = ValidationEngine::standard();
    let ticket = well_formed_ticket();
    let first = engine.validate(&ticket).await;
    let second = engine.validate(&ticket).await;
    assert_eq!(first, second);
    assert_eq!(engine.summary(&first), engine.summary(&second));
}

#[tokio::test]
async fn summary_counts_are_consistent() {
    let engine = ValidationEngine::standard();
    for ticket in [minimal_ticket(), well_formed_ticket()] {
        let results = engine.validate(&ticket).await;
        let summary = engine.summary(&results);
        assert_eq!(summary.total_validators, 7);
        assert_eq!(
            summary.passed_validators + summary.failed_validators,
            summary.total_validators
        );
        assert!((0.0..=1.0).contains(&summary.overall_score));
        let issues: usize = results.iter().map(|r| r.issues().len()).sum();
        assert_eq!(summary.total_issues, issues);
    }
}

// ---- Fault isolation ----

struct ErroringValidator;

#[async_trait]
impl Validator for ErroringValidator {
    fn criterion(&self) -> Criterion {
        Criterion::Feasibility
    }

    fn config(&self) -> ValidatorConfig {
        ValidatorConfig::default_for(Criterion::Feasibility)
    }

    async fn evaluate(&self, _ticket: &Ticket) -> Result<Scorecard> {
        Err(ValidationError::Scoring {
            criterion: Criterion::Feasibility,
            reason: "estimation service unreachable".to_string(),
        })
    }
}

struct PanickingValidator;

#[async_trait]
impl Validator for PanickingValidator {
    fn criterion(&self) -> Criterion {
        Criterion::Clarity
    }

    fn config(&self) -> ValidatorConfig {
        ValidatorConfig::default_for(Criterion::Clarity)
    }

    async fn evaluate(&self, _ticket: &Ticket) -> Result<Scorecard> {
        panic!("analyzer exploded");
    }
}

struct HangingValidator;

#[async_trait]
impl Validator for HangingValidator {
    fn criterion(&self) -> Criterion {
        Criterion::Clarity
    }

    fn config(&self) -> ValidatorConfig {
        ValidatorConfig::default_for(Criterion::Clarity)
    }

    async fn evaluate(&self, _ticket: &Ticket) -> Result<Scorecard> {
        sleep(Duration::from_secs(3600)).await;
        Ok(Scorecard::new(1.0))
    }
}

#[tokio::test]
async fn erroring_validator_is_isolated() {
    let engine = ValidationEngine::builder()
        .replace(Arc::new(ErroringValidator))
        .build()
        .unwrap();
    let ticket = well_formed_ticket();
    let results = engine.validate(&ticket).await;
    assert_eq!(results.len(), 7);
    assert_result_invariants(&results);

    let failed = result_for(&results, Criterion::Feasibility);
    assert_eq!(failed.score(), 0.0);
    assert!(!failed.passed());
    assert_eq!(failed.weight(), 0.7);
    assert!(failed.blockers()[0].contains("estimation service unreachable"));
    assert_eq!(failed.issues().len(), 1);

    let baseline = ValidationEngine::standard().validate(&ticket).await;
    for (a, b) in results.iter().zip(&baseline) {
        if a.criterion() != Criterion::Feasibility {
            assert_eq!(a, b);
        }
    }
}

#[tokio::test]
async fn panicking_validator_is_isolated() {
    let engine = ValidationEngine::builder()
        .replace(Arc::new(PanickingValidator))
        .build()
        .unwrap();
    let results = engine.validate(&well_formed_ticket()).await;
    assert_eq!(results.len(), 7);
    let failed = result_for(&results, Criterion::Clarity);
    assert_eq!(failed.score(), 0.0);
    assert!(failed.blockers()[0].contains("analyzer exploded"));
    assert_eq!(
        results.iter().filter(|r| r.has_blockers()).count(),
        1,
        "only the panicking criterion should block"
    );
}

#[tokio::test]
async fn failed_validator_weight_counts_toward_overall() {
    let engine = ValidationEngine::builder()
        .replace(Arc::new(ErroringValidator))
        .build()
        .unwrap();
    let results = engine.validate(&well_formed_ticket()).await;
    let summary = engine.summary(&results);
    let total_weight: f64 = results.iter().map(|r| r.weight()).sum();
    let weighted: f64 = results.iter().map(|r| r.weighted_score()).sum();
    assert!((summary.overall_score - weighted / total_weight).abs() < 1e-12);
    assert!((total_weight - 5.5).abs() < 1e-9);
}

#[tokio::test(start_paused = true)]
async fn hung_validator_times_out() {
    let engine = ValidationEngine::builder()
        .replace(Arc::new(HangingValidator))
        .with_timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    let results = engine.validate(&well_formed_ticket()).await;
    assert_eq!(results.len(), 7);
    let failed = result_for(&results, Criterion::Clarity);
    assert!(!failed.passed());
    assert!(failed.blockers()[0].contains("timed out after 50ms"));
}

// ---- Concurrency ----

#[derive(Default)]
struct InFlight {
    now: AtomicUsize,
    max: AtomicUsize,
}

struct SlowValidator {
    criterion: Criterion,
    in_flight: Arc<InFlight>,
}

#[async_trait]
impl Validator for SlowValidator {
    fn criterion(&self) -> Criterion {
        self.criterion
    }

    fn config(&self) -> ValidatorConfig {
        ValidatorConfig::default_for(self.criterion)
    }

    async fn evaluate(&self, _ticket: &Ticket) -> Result<Scorecard> {
        let now = self.in_flight.now.fetch_add(1, Ordering::SeqCst) + 1;
        self.in_flight.max.fetch_max(now, Ordering::SeqCst);
        sleep(Duration::from_millis(20)).await;
        self.in_flight.now.fetch_sub(1, Ordering::SeqCst);
        Ok(Scorecard::new(0.5))
    }
}

fn slow_engine(in_flight: &Arc<InFlight>) -> ValidationEngine {
    let validators = Criterion::ALL
        .iter()
        .map(|&criterion| {
            Arc::new(SlowValidator {
                criterion,
                in_flight: Arc::clone(in_flight),
            }) as Arc<dyn Validator>
        })
        .collect();
    ValidationEngine::new(validators).unwrap()
}

#[tokio::test]
async fn validators_run_concurrently() {
    let in_flight = Arc::new(InFlight::default());
    let engine = slow_engine(&in_flight);
    let results = engine.validate(&minimal_ticket()).await;
    assert_eq!(results.len(), 7);
    assert!(
        in_flight.max.load(Ordering::SeqCst) > 1,
        "expected concurrent validators, max_in_flight={}",
        in_flight.max.load(Ordering::SeqCst)
    );
}

#[tokio::test]
async fn overlapping_validate_calls_share_validators() {
    let engine = ValidationEngine::standard();
    let minimal = minimal_ticket();
    let well_formed = well_formed_ticket();
    let batches = futures::future::join_all([
        engine.validate(&minimal),
        engine.validate(&well_formed),
        engine.validate(&minimal),
    ])
    .await;
    assert_eq!(batches[0], batches[2]);
    assert_ne!(batches[0], batches[1]);
    assert_eq!(batches[1], engine.validate(&well_formed).await);
}

// ---- Report ----

#[tokio::test]
async fn report_carries_digest_and_summary() {
    let engine = ValidationEngine::standard();
    let ticket = well_formed_ticket();
    let report = engine.validate_report(&ticket).await.unwrap();
    assert_eq!(report.ticket_digest, ticket.digest().unwrap());
    assert_eq!(report.results.len(), 7);
    assert_eq!(report.summary, engine.summary(&report.results));
    assert!(report.blockers().is_empty());
    assert!(report.result(Criterion::Scope).is_some());
}
