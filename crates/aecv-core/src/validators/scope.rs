//! Scope: is this one ticket's worth of work?

use async_trait::async_trait;

use crate::domain::{Criterion, Ticket};
use crate::error::Result;
use crate::text::Normalized;
use crate::validator::{Scorecard, Validator, ValidatorConfig};

const BASELINE: f64 = 0.7;
const IDEAL_RANGE_BONUS: f64 = 0.2;
const SINGLE_CRITERION_PENALTY: f64 = 0.1;
const OVERSIZED_PENALTY: f64 = 0.2;
const BROAD_PHRASE_PENALTY: f64 = 0.1;
const MANY_PATHS_PENALTY: f64 = 0.1;

const IDEAL_MIN: usize = 2;
const IDEAL_MAX: usize = 6;
const OVERSIZED: usize = 8;
const MUST_SPLIT: usize = 12;
const MANY_PATHS: usize = 10;

const BROAD_SCOPE_PHRASES: &[&str] = &[
    "entire system",
    "entire codebase",
    "entire application",
    "whole application",
    "whole system",
    "all modules",
    "all features",
    "all services",
    "complete refactor",
    "complete rewrite",
    "full rewrite",
    "across the board",
];

#[derive(Debug, Clone)]
pub struct ScopeValidator {
    config: ValidatorConfig,
}

impl ScopeValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }
}

impl Default for ScopeValidator {
    fn default() -> Self {
        Self::new(ValidatorConfig::default_for(Criterion::Scope))
    }
}

#[async_trait]
impl Validator for ScopeValidator {
    fn criterion(&self) -> Criterion {
        Criterion::Scope
    }

    fn config(&self) -> ValidatorConfig {
        self.config
    }

    async fn evaluate(&self, ticket: &Ticket) -> Result<Scorecard> {
        let count = ticket.acceptance_criteria.len();
        if count == 0 {
            let mut card = Scorecard::new(0.0);
            card.blocker("Cannot assess scope without acceptance criteria");
            return Ok(card);
        }

        let mut card = Scorecard::new(BASELINE);
        if count == 1 {
            card.score -= SINGLE_CRITERION_PENALTY;
            card.issue("Only one acceptance criterion; scope may be too narrow");
        } else if (IDEAL_MIN..=IDEAL_MAX).contains(&count) {
            card.score += IDEAL_RANGE_BONUS;
        } else if count > OVERSIZED {
            card.score -= OVERSIZED_PENALTY;
            card.issue(format!(
                "Excessive number of acceptance criteria ({count}); consider narrowing scope"
            ));
        }
        if count > MUST_SPLIT {
            card.blocker(format!(
                "{count} acceptance criteria is too many for one ticket; split it"
            ));
        }

        let text = Normalized::new(&ticket.combined_text());
        for phrase in text.matches(BROAD_SCOPE_PHRASES) {
            card.score -= BROAD_PHRASE_PENALTY;
            card.issue(format!("Broad scope language: \"{phrase}\""));
        }

        if ticket.repo_paths.len() > MANY_PATHS {
            card.score -= MANY_PATHS_PENALTY;
            card.issue(format!(
                "Touches {} repository paths; change may be too wide",
                ticket.repo_paths.len()
            ));
        }

        Ok(card.clamped())
    }
}
