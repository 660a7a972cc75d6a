//! Feasibility: does the ticket ask for something that cannot be built?

use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;

use crate::domain::{Criterion, Ticket};
use crate::error::Result;
use crate::validator::{Scorecard, Validator, ValidatorConfig};

const BASELINE: f64 = 0.9;
const IMPOSSIBILITY_PENALTY: f64 = 0.3;
const SCOPE_CREEP_PENALTY: f64 = 0.1;
const MAX_CRITERIA: usize = 10;
const BLOCKER_FLOOR: f64 = 0.5;

/// Claims no real system can honour, matched against lowercased text.
const IMPOSSIBILITY_PATTERNS: &[(&str, &str)] = &[
    (r"100\s*%\s*(uptime|availability)", "100% uptime"),
    (r"100\s*%\s*accura(te|cy)", "100% accuracy"),
    (r"\binfinite(ly)?\s+(storage|scal\w*|capacity)", "infinite storage or scale"),
    (r"\bunlimited\s+(storage|bandwidth|users|requests)", "unlimited resources"),
    (r"\bzero\s+latency\b", "zero latency"),
    (r"\bnever\s+(fails?|goes\s+down|crash(es)?)\b", "a system that never fails"),
];

fn impossibility_patterns() -> &'static [(Regex, &'static str)] {
    static PATTERNS: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        IMPOSSIBILITY_PATTERNS
            .iter()
            .filter_map(|(pattern, label)| Regex::new(pattern).ok().map(|re| (re, *label)))
            .collect()
    })
}

#[derive(Debug, Clone)]
pub struct FeasibilityValidator {
    config: ValidatorConfig,
}

impl FeasibilityValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }
}

impl Default for FeasibilityValidator {
    fn default() -> Self {
        Self::new(ValidatorConfig::default_for(Criterion::Feasibility))
    }
}

#[async_trait]
impl Validator for FeasibilityValidator {
    fn criterion(&self) -> Criterion {
        Criterion::Feasibility
    }

    fn config(&self) -> ValidatorConfig {
        self.config
    }

    async fn evaluate(&self, ticket: &Ticket) -> Result<Scorecard> {
        let text = ticket.combined_text().to_lowercase();
        let mut card = Scorecard::new(BASELINE);

        for (re, label) in impossibility_patterns() {
            if re.is_match(&text) {
                card.score -= IMPOSSIBILITY_PENALTY;
                card.issue(format!("Unrealistic requirement: {label}"));
            }
        }

        let count = ticket.acceptance_criteria.len();
        if count > MAX_CRITERIA {
            card.score -= SCOPE_CREEP_PENALTY;
            card.issue(format!(
                "{count} acceptance criteria suggests scope creep (more than {MAX_CRITERIA})"
            ));
        }

        let mut card = card.clamped();
        if card.score < BLOCKER_FLOOR {
            card.blocker("Ticket contains requirements that are not technically feasible");
        }
        Ok(card)
    }
}
