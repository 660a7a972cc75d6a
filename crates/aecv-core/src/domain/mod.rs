//! Domain models for AECV.
//!
//! - `Ticket`: read-only snapshot under validation
//! - `Criterion`: the seven fixed validation dimensions
//! - `ValidationResult`: outcome of one validator run
//! - `ValidationSummary`: weighted aggregate across all validators

pub mod criterion;
pub mod result;
pub mod summary;
pub mod ticket;

pub use criterion::Criterion;
pub use result::ValidationResult;
pub use summary::{summarize, ValidationSummary};
pub use ticket::{ApiSnapshot, RepositoryContext, Ticket, TicketType};
