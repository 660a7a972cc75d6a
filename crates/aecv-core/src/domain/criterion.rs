//! The closed set of validation criteria.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One of the seven fixed validation dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    Completeness,
    Testability,
    Clarity,
    Feasibility,
    Consistency,
    ContextAlignment,
    Scope,
}

impl Criterion {
    /// Every criterion, in standard registration order.
    pub const ALL: [Criterion; 7] = [
        Criterion::Completeness,
        Criterion::Testability,
        Criterion::Clarity,
        Criterion::Feasibility,
        Criterion::Consistency,
        Criterion::ContextAlignment,
        Criterion::Scope,
    ];

    /// Stable snake_case tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Criterion::Completeness => "completeness",
            Criterion::Testability => "testability",
            Criterion::Clarity => "clarity",
            Criterion::Feasibility => "feasibility",
            Criterion::Consistency => "consistency",
            Criterion::ContextAlignment => "context_alignment",
            Criterion::Scope => "scope",
        }
    }

    /// Default `(weight, pass_threshold)` for the standard validator.
    pub fn default_config(&self) -> (f64, f64) {
        match self {
            Criterion::Completeness => (1.0, 0.9),
            Criterion::Testability => (0.9, 0.8),
            Criterion::Clarity => (0.8, 0.7),
            Criterion::Feasibility => (0.7, 0.7),
            Criterion::Consistency => (0.8, 0.7),
            Criterion::ContextAlignment => (0.7, 0.7),
            Criterion::Scope => (0.6, 0.6),
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Criterion {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Criterion::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s.trim())
            .ok_or_else(|| ValidationError::InvalidInput(format!("unknown criterion: {s}")))
    }
}
