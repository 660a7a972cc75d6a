//! Context alignment: do the suggested paths fit the attached repository?

use async_trait::async_trait;

use crate::domain::{Criterion, Ticket};
use crate::error::Result;
use crate::validator::{default_message, Scorecard, Validator, ValidatorConfig};

const BASELINE: f64 = 0.8;
const NO_PATHS_PENALTY: f64 = 0.3;
const INVALID_PATH_PENALTY: f64 = 0.1;
const STALE_SNAPSHOT_PENALTY: f64 = 0.1;
const WELL_MAPPED_BONUS: f64 = 0.2;
const WELL_MAPPED_MIN: usize = 3;

/// Vacuously passes when the ticket carries no repository context.
#[derive(Debug, Clone)]
pub struct ContextAlignmentValidator {
    config: ValidatorConfig,
}

impl ContextAlignmentValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }
}

impl Default for ContextAlignmentValidator {
    fn default() -> Self {
        Self::new(ValidatorConfig::default_for(Criterion::ContextAlignment))
    }
}

/// Why `path` cannot be a repository-relative path, if it can't.
fn path_problem(path: &str) -> Option<&'static str> {
    let path = path.trim();
    if path.is_empty() {
        return Some("empty path");
    }
    let bytes = path.as_bytes();
    let has_drive = bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':';
    if path.starts_with('/') || path.starts_with('\\') || has_drive {
        return Some("absolute path");
    }
    if path.split(['/', '\\']).any(|segment| segment == "..") {
        return Some("parent directory traversal");
    }
    None
}

#[async_trait]
impl Validator for ContextAlignmentValidator {
    fn criterion(&self) -> Criterion {
        Criterion::ContextAlignment
    }

    fn config(&self) -> ValidatorConfig {
        self.config
    }

    async fn evaluate(&self, ticket: &Ticket) -> Result<Scorecard> {
        let Some(context) = &ticket.repository_context else {
            return Ok(Scorecard::new(1.0));
        };

        let mut card = Scorecard::new(BASELINE);

        if ticket.repo_paths.is_empty() {
            card.score -= NO_PATHS_PENALTY;
            card.issue(format!(
                "No repository paths suggested for {}",
                context.repository
            ));
        }

        let mut valid = 0usize;
        for path in &ticket.repo_paths {
            match path_problem(path) {
                Some(problem) => {
                    card.score -= INVALID_PATH_PENALTY;
                    card.issue(format!("Invalid repository path \"{path}\": {problem}"));
                }
                None => valid += 1,
            }
        }
        if valid >= WELL_MAPPED_MIN {
            card.score += WELL_MAPPED_BONUS;
        }

        if let (Some(snapshot), Some(head)) = (&ticket.api_snapshot, &context.commit_sha) {
            if snapshot.commit_sha != *head {
                card.score -= STALE_SNAPSHOT_PENALTY;
                card.issue(format!(
                    "API snapshot was taken at {} but repository context is at {head}",
                    snapshot.commit_sha
                ));
            }
        }

        Ok(card.clamped())
    }

    fn message(&self, card: &Scorecard, passed: bool) -> String {
        if card.score >= 1.0 && card.issues.is_empty() {
            return format!("{} passed (no misaligned paths)", self.criterion());
        }
        default_message(self.criterion(), card, passed, self.pass_threshold())
    }
}
