//! Read-only ticket snapshot consumed by validators.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::Result;

/// Declared ticket type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketType {
    Feature,
    Bug,
    Task,
}

/// Repository the ticket is meant to be implemented in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryContext {
    /// Repository identifier, e.g. `"org/repo"`.
    pub repository: String,
    /// Branch the context was captured from.
    #[serde(default)]
    pub branch: Option<String>,
    /// Commit the file tree was analyzed at.
    #[serde(default)]
    pub commit_sha: Option<String>,
}

/// API/code snapshot metadata captured alongside the ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSnapshot {
    /// Commit the snapshot was taken at.
    pub commit_sha: String,
    /// Number of API endpoints discovered.
    #[serde(default)]
    pub endpoint_count: usize,
}

/// A generated ticket specification (AEC).
///
/// Validators never mutate a ticket; the engine shares one snapshot across
/// all concurrent validator tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "type")]
    pub ticket_type: Option<TicketType>,
    #[serde(default)]
    pub acceptance_criteria: Vec<String>,
    #[serde(default)]
    pub assumptions: Vec<String>,
    #[serde(default)]
    pub repo_paths: Vec<String>,
    #[serde(default)]
    pub repository_context: Option<RepositoryContext>,
    #[serde(default)]
    pub api_snapshot: Option<ApiSnapshot>,
}

impl Ticket {
    /// Create a ticket with only a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            ticket_type: None,
            acceptance_criteria: Vec::new(),
            assumptions: Vec::new(),
            repo_paths: Vec::new(),
            repository_context: None,
            api_snapshot: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_type(mut self, ticket_type: TicketType) -> Self {
        self.ticket_type = Some(ticket_type);
        self
    }

    pub fn with_criterion(mut self, criterion: impl Into<String>) -> Self {
        self.acceptance_criteria.push(criterion.into());
        self
    }

    pub fn with_assumption(mut self, assumption: impl Into<String>) -> Self {
        self.assumptions.push(assumption.into());
        self
    }

    pub fn with_repo_path(mut self, path: impl Into<String>) -> Self {
        self.repo_paths.push(path.into());
        self
    }

    pub fn with_repository_context(mut self, context: RepositoryContext) -> Self {
        self.repository_context = Some(context);
        self
    }

    pub fn with_api_snapshot(mut self, snapshot: ApiSnapshot) -> Self {
        self.api_snapshot = Some(snapshot);
        self
    }

    /// Non-blank description, if any.
    pub fn description_text(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    /// Title, description and acceptance criteria joined by newlines.
    pub fn combined_text(&self) -> String {
        let mut parts: Vec<&str> = vec![self.title.as_str()];
        if let Some(d) = self.description_text() {
            parts.push(d);
        }
        parts.extend(self.acceptance_criteria.iter().map(String::as_str));
        parts.join("\n")
    }

    /// [`Ticket::combined_text`] plus assumptions.
    pub fn full_text(&self) -> String {
        let mut text = self.combined_text();
        for a in &self.assumptions {
            text.push('\n');
            text.push_str(a);
        }
        text
    }

    /// SHA256 hex digest of the snapshot's JSON form.
    pub fn digest(&self) -> Result<String> {
        let bytes = serde_json::to_vec(self)?;
        Ok(hex::encode(Sha256::digest(&bytes)))
    }
}
