//! AECV Core Library
//!
//! Multi-criteria validation for generated ticket specifications. Seven
//! validators score a [`Ticket`] snapshot concurrently and the
//! [`ValidationEngine`] folds their results into a weighted verdict.
//!
//! ```rust,ignore
//! use aecv_core::{Ticket, TicketType, ValidationEngine};
//!
//! let engine = ValidationEngine::standard();
//! let ticket = Ticket::new("Implement user authentication with OAuth")
//!     .with_type(TicketType::Feature)
//!     .with_criterion("When the user signs in, then the dashboard displays");
//! let results = engine.validate(&ticket).await;
//! let summary = engine.summary(&results);
//! ```

pub mod analysis;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod obs;
pub mod report;
pub mod telemetry;
mod text;
pub mod validator;
pub mod validators;

pub use analysis::{HeuristicAnalyzer, TextAnalysis, TextAnalyzer};
pub use config::{EngineConfig, DEFAULT_PASS_THRESHOLD};
pub use domain::{
    summarize, ApiSnapshot, Criterion, RepositoryContext, Ticket, TicketType, ValidationResult,
    ValidationSummary,
};
pub use engine::{ValidationEngine, ValidationEngineBuilder};
pub use error::{Result, ValidationError};
pub use report::{render_report_md, render_report_text, write_report_json, ValidationReport};
pub use telemetry::init_tracing;
pub use validator::{default_message, Scorecard, Validator, ValidatorConfig};
pub use validators::{
    standard_validator, ClarityValidator, CompletenessValidator, ConsistencyValidator,
    ContextAlignmentValidator, FeasibilityValidator, ScopeValidator, TestabilityValidator,
};

/// AECV version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
