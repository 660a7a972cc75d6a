//! Consistency: does the ticket contradict itself?

use async_trait::async_trait;

use crate::domain::{Criterion, Ticket};
use crate::error::Result;
use crate::text::Normalized;
use crate::validator::{Scorecard, Validator, ValidatorConfig};

/// Terms that should not appear together anywhere in one ticket.
const CONFLICTING_TERMS: &[(&str, &str)] = &[
    ("always", "never"),
    ("must", "optional"),
    ("required", "optional"),
    ("public", "private"),
    ("read-only", "editable"),
];

/// Opposite actions, with the inflections matched for each.
const OPPOSITE_VERBS: &[(&[&str], &[&str])] = &[
    (
        &["enable", "enables", "enabled", "enabling"],
        &["disable", "disables", "disabled", "disabling"],
    ),
    (
        &["show", "shows", "showed", "shown", "showing"],
        &["hide", "hides", "hid", "hidden", "hiding"],
    ),
    (
        &["allow", "allows", "allowed", "allowing"],
        &["prevent", "prevents", "prevented", "preventing"],
    ),
    (
        &["create", "creates", "created", "creating"],
        &["delete", "deletes", "deleted", "deleting"],
    ),
];

const PENALTY_PER_CONTRADICTION: f64 = 0.2;
const MAX_TOLERATED: usize = 2;

#[derive(Debug, Clone)]
pub struct ConsistencyValidator {
    config: ValidatorConfig,
}

impl ConsistencyValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }
}

impl Default for ConsistencyValidator {
    fn default() -> Self {
        Self::new(ValidatorConfig::default_for(Criterion::Consistency))
    }
}

/// Contradictions found in the ticket, one message each.
fn find_contradictions(ticket: &Ticket) -> Vec<String> {
    let mut found = Vec::new();

    let all = Normalized::new(&ticket.full_text());
    for (a, b) in CONFLICTING_TERMS {
        if all.contains(a) && all.contains(b) {
            found.push(format!("Conflicting terms \"{a}\" and \"{b}\" both appear"));
        }
    }

    let criteria: Vec<Normalized> = ticket
        .acceptance_criteria
        .iter()
        .map(|c| Normalized::new(c))
        .collect();
    for i in 0..criteria.len() {
        for j in (i + 1)..criteria.len() {
            for (verb, opposite) in OPPOSITE_VERBS {
                let (left, right) = (&criteria[i], &criteria[j]);
                if (left.contains_any(verb) && right.contains_any(opposite))
                    || (left.contains_any(opposite) && right.contains_any(verb))
                {
                    found.push(format!(
                        "Criteria {} and {} conflict (\"{}\" vs \"{}\")",
                        i + 1,
                        j + 1,
                        verb[0],
                        opposite[0]
                    ));
                }
            }
        }
    }

    found
}

#[async_trait]
impl Validator for ConsistencyValidator {
    fn criterion(&self) -> Criterion {
        Criterion::Consistency
    }

    fn config(&self) -> ValidatorConfig {
        self.config
    }

    async fn evaluate(&self, ticket: &Ticket) -> Result<Scorecard> {
        let contradictions = find_contradictions(ticket);
        let count = contradictions.len();

        let mut card = Scorecard::new(1.0 - PENALTY_PER_CONTRADICTION * count as f64).clamped();
        card.issues = contradictions;
        if count > MAX_TOLERATED {
            card.blocker(format!(
                "{count} contradictions found; resolve them before implementation"
            ));
        }
        Ok(card)
    }
}
