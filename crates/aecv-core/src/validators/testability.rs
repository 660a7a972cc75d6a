//! Testability: can each acceptance criterion be turned into a test?

use async_trait::async_trait;

use crate::domain::{Criterion, Ticket, TicketType};
use crate::error::Result;
use crate::text::Normalized;
use crate::validator::{Scorecard, Validator, ValidatorConfig};

/// Words that indicate an observable, checkable outcome.
const MEASURABLE_WORDS: &[&str] = &[
    "when", "then", "given", "should", "must", "will", "displays", "shows", "returns",
    "creates", "updates", "deletes", "saves", "sends", "receives", "redirects", "validates",
    "contains", "appears", "rejects", "responds",
];

/// Words that describe a feeling rather than a result.
const VAGUE_WORDS: &[&str] = &[
    "better", "improved", "properly", "correctly", "appropriate", "appropriately", "nice",
    "good", "fast", "user-friendly", "intuitive", "seamless", "seamlessly", "efficient",
    "optimal", "easy",
];

const VAGUE_PENALTY: f64 = 0.1;
const NARRATIVE_BONUS: f64 = 0.1;
const NARRATIVE_CAP: f64 = 0.3;
const MIN_DESCRIPTION_LEN: usize = 50;
const BLOCKER_FLOOR: f64 = 0.4;

#[derive(Debug, Clone)]
pub struct TestabilityValidator {
    config: ValidatorConfig,
}

impl TestabilityValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }
}

impl Default for TestabilityValidator {
    fn default() -> Self {
        Self::new(ValidatorConfig::default_for(Criterion::Testability))
    }
}

/// `when ... then`, optionally preceded by `given`.
fn has_narrative_shape(text: &Normalized) -> bool {
    text.position("when")
        .and_then(|when| text.position_after("then", when + 1))
        .is_some()
}

#[async_trait]
impl Validator for TestabilityValidator {
    fn criterion(&self) -> Criterion {
        Criterion::Testability
    }

    fn config(&self) -> ValidatorConfig {
        self.config
    }

    async fn evaluate(&self, ticket: &Ticket) -> Result<Scorecard> {
        let criteria = &ticket.acceptance_criteria;
        if criteria.is_empty() {
            let mut card = Scorecard::new(0.0);
            card.blocker("No acceptance criteria to test");
            return Ok(card);
        }

        let mut card = Scorecard::default();
        let mut measurable = 0usize;
        let mut vague_hits = 0usize;
        let mut narratives = 0usize;

        for (idx, criterion) in criteria.iter().enumerate() {
            let text = Normalized::new(criterion);
            if text.contains_any(MEASURABLE_WORDS) {
                measurable += 1;
            } else {
                card.issue(format!(
                    "Criterion {} has no measurable outcome: \"{}\"",
                    idx + 1,
                    criterion.trim()
                ));
            }

            let vague = text.matches(VAGUE_WORDS);
            if !vague.is_empty() {
                vague_hits += vague.len();
                card.issue(format!(
                    "Criterion {} uses vague language: {}",
                    idx + 1,
                    vague.join(", ")
                ));
            }

            if has_narrative_shape(&text) {
                narratives += 1;
            }
        }

        let ratio = measurable as f64 / criteria.len() as f64;
        if ratio >= 0.8 {
            card.score += 0.5;
        } else if ratio >= 0.5 {
            card.score += 0.3;
        } else {
            card.issue(format!(
                "Only {measurable} of {} criteria are measurable",
                criteria.len()
            ));
        }

        card.score -= VAGUE_PENALTY * vague_hits as f64;
        card.score += (NARRATIVE_BONUS * narratives as f64).min(NARRATIVE_CAP);

        if matches!(ticket.ticket_type, Some(TicketType::Feature | TicketType::Bug)) {
            card.score += 0.1;
        }

        match ticket.description_text() {
            Some(d) if d.chars().count() > MIN_DESCRIPTION_LEN => card.score += 0.1,
            _ => card.issue("Description is too short to give testers context"),
        }

        let mut card = card.clamped();
        if card.score < BLOCKER_FLOOR {
            card.blocker(format!(
                "Acceptance criteria are not testable (score {:.0}%)",
                card.score * 100.0
            ));
        }
        Ok(card)
    }
}
