//! Completeness: are all the sections a ticket needs actually filled in?

use async_trait::async_trait;

use crate::domain::{Criterion, Ticket};
use crate::error::Result;
use crate::validator::{Scorecard, Validator, ValidatorConfig};

const MIN_TITLE_LEN: usize = 10;

/// Awards partial credit per section. Missing title, type, or acceptance
/// criteria are blockers regardless of the credit earned elsewhere.
#[derive(Debug, Clone)]
pub struct CompletenessValidator {
    config: ValidatorConfig,
}

impl CompletenessValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }
}

impl Default for CompletenessValidator {
    fn default() -> Self {
        Self::new(ValidatorConfig::default_for(Criterion::Completeness))
    }
}

#[async_trait]
impl Validator for CompletenessValidator {
    fn criterion(&self) -> Criterion {
        Criterion::Completeness
    }

    fn config(&self) -> ValidatorConfig {
        self.config
    }

    async fn evaluate(&self, ticket: &Ticket) -> Result<Scorecard> {
        let mut card = Scorecard::default();

        let title = ticket.title.trim();
        if title.is_empty() {
            card.blocker("Missing title");
        } else if title.chars().count() < MIN_TITLE_LEN {
            card.score += 0.1;
            card.issue(format!(
                "Title is too short to be descriptive ({} chars, expected at least {MIN_TITLE_LEN})",
                title.chars().count()
            ));
        } else {
            card.score += 0.2;
        }

        if ticket.ticket_type.is_some() {
            card.score += 0.15;
        } else {
            card.blocker("Missing ticket type");
        }

        match ticket.acceptance_criteria.len() {
            0 => card.blocker("No acceptance criteria defined"),
            1 => {
                card.score += 0.1;
                card.issue("Only 1 acceptance criterion; add at least 3");
            }
            2 => {
                card.score += 0.2;
                card.issue("Only 2 acceptance criteria; add at least 3");
            }
            _ => card.score += 0.3,
        }

        if ticket.description_text().is_some() || !ticket.assumptions.is_empty() {
            card.score += 0.15;
        } else {
            card.issue("No description or assumptions provided");
        }

        if ticket.repo_paths.is_empty() {
            card.issue("No repository paths identified");
        } else {
            card.score += 0.1;
        }

        if ticket.repository_context.is_some() {
            card.score += 0.1;
        } else {
            card.issue("No repository context attached");
        }

        Ok(card.clamped())
    }
}
