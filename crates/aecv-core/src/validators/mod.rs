//! The seven standard validators.

pub mod clarity;
pub mod completeness;
pub mod consistency;
pub mod context_alignment;
pub mod feasibility;
pub mod scope;
pub mod testability;

use std::sync::Arc;

pub use clarity::ClarityValidator;
pub use completeness::CompletenessValidator;
pub use consistency::ConsistencyValidator;
pub use context_alignment::ContextAlignmentValidator;
pub use feasibility::FeasibilityValidator;
pub use scope::ScopeValidator;
pub use testability::TestabilityValidator;

use crate::analysis::TextAnalyzer;
use crate::domain::Criterion;
use crate::validator::{Validator, ValidatorConfig};

/// Build the standard validator for `criterion`.
pub fn standard_validator(
    criterion: Criterion,
    config: ValidatorConfig,
    analyzer: Option<Arc<dyn TextAnalyzer>>,
) -> Arc<dyn Validator> {
    match criterion {
        Criterion::Completeness => Arc::new(CompletenessValidator::new(config)),
        Criterion::Testability => Arc::new(TestabilityValidator::new(config)),
        Criterion::Clarity => {
            let clarity = ClarityValidator::new(config);
            match analyzer {
                Some(a) => Arc::new(clarity.with_analyzer(a)),
                None => Arc::new(clarity),
            }
        }
        Criterion::Feasibility => Arc::new(FeasibilityValidator::new(config)),
        Criterion::Consistency => Arc::new(ConsistencyValidator::new(config)),
        Criterion::ContextAlignment => Arc::new(ContextAlignmentValidator::new(config)),
        Criterion::Scope => Arc::new(ScopeValidator::new(config)),
    }
}
