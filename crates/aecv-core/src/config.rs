//! Engine configuration.
//!
//! ```toml
//! pass_threshold = 0.7
//! validator_timeout_ms = 5000
//!
//! [validators.scope]
//! weight = 0.5
//! pass_threshold = 0.6
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::result::check_unit;
use crate::domain::Criterion;
use crate::error::{Result, ValidationError};
use crate::validator::ValidatorConfig;

/// Default engine-level pass threshold for the overall score.
pub const DEFAULT_PASS_THRESHOLD: f64 = 0.7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Overall score required for the ticket to pass.
    pub pass_threshold: f64,
    /// Upper bound on a single validator run. `None` waits indefinitely.
    pub validator_timeout_ms: Option<u64>,
    /// Per-criterion overrides; unlisted criteria keep their defaults.
    pub validators: BTreeMap<Criterion, ValidatorConfig>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pass_threshold: DEFAULT_PASS_THRESHOLD,
            validator_timeout_ms: None,
            validators: BTreeMap::new(),
        }
    }
}

impl EngineConfig {
    /// Load from `path`: TOML for `.toml` files, JSON otherwise.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("toml"));
        if is_toml {
            Self::from_toml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        check_unit("pass_threshold", self.pass_threshold)
            .map_err(|e| ValidationError::InvalidConfig(e.to_string()))?;
        if self.validator_timeout_ms == Some(0) {
            return Err(ValidationError::InvalidConfig(
                "validator_timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Effective configuration for `criterion`.
    pub fn validator_config(&self, criterion: Criterion) -> ValidatorConfig {
        self.validators
            .get(&criterion)
            .copied()
            .unwrap_or_else(|| ValidatorConfig::default_for(criterion))
    }

    pub fn validator_timeout(&self) -> Option<Duration> {
        self.validator_timeout_ms.map(Duration::from_millis)
    }

    pub fn with_override(mut self, criterion: Criterion, config: ValidatorConfig) -> Self {
        self.validators.insert(criterion, config);
        self
    }
}
