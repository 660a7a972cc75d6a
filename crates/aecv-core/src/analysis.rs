//! Text-analysis port used by the clarity validator.
//!
//! Any component that can grade free text implements [`TextAnalyzer`]; a
//! language model adapter is the usual production choice. The built-in
//! [`HeuristicAnalyzer`] needs no external service and is what the clarity
//! validator uses when nothing else is configured.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::text::{self, Normalized};

/// Qualitative judgment of a block of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnalysis {
    /// Clarity score in `[0, 1]`.
    pub score: f64,
    #[serde(default)]
    pub vague_phrases: Vec<String>,
    #[serde(default)]
    pub ambiguous_statements: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl TextAnalysis {
    /// Reject analyses whose score is not a finite value in `[0, 1]`.
    pub fn checked(self) -> Result<Self> {
        if self.score.is_finite() && (0.0..=1.0).contains(&self.score) {
            Ok(self)
        } else {
            Err(ValidationError::Analysis(format!(
                "analysis score {} outside [0, 1]",
                self.score
            )))
        }
    }
}

/// Injectable text-analysis capability.
#[async_trait]
pub trait TextAnalyzer: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    async fn analyze(&self, text: &str) -> Result<TextAnalysis>;
}

const VAGUE_PHRASES: &[&str] = &[
    "etc", "and so on", "and more", "somehow", "as needed", "tbd", "various", "maybe",
    "probably", "stuff", "things", "some kind of",
];

const AMBIGUOUS_MARKERS: &[&str] = &[
    "and or", "if possible", "as appropriate", "where applicable", "might", "could",
];

const SPECIFICITY_KEYWORDS: &[&str] = &[
    "must", "should", "when", "then", "exactly", "specifically", "within", "at least",
    "at most", "only", "returns", "displays", "shows", "creates", "redirects", "error",
    "seconds", "minutes", "hours",
];

/// Word-count, digit and keyword heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicAnalyzer;

impl HeuristicAnalyzer {
    /// Synchronous form of [`TextAnalyzer::analyze`]; never fails.
    pub fn assess(&self, input: &str) -> TextAnalysis {
        let word_count = text::words(input).len();
        let normalized = Normalized::new(input);

        let mut score = 0.4;
        if word_count >= 20 {
            score += 0.2;
        }
        if word_count >= 50 {
            score += 0.1;
        }

        let has_numbers = text::has_digit(input);
        if has_numbers {
            score += 0.1;
        }

        match normalized.matches(SPECIFICITY_KEYWORDS).len() {
            0 => {}
            1 | 2 => score += 0.1,
            _ => score += 0.2,
        }

        let vague_phrases: Vec<String> = normalized
            .matches(VAGUE_PHRASES)
            .into_iter()
            .map(str::to_string)
            .collect();

        let ambiguous_statements: Vec<String> = input
            .split(['\n', '.', ';', '?', '!'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter(|s| Normalized::new(s).contains_any(AMBIGUOUS_MARKERS))
            .map(str::to_string)
            .collect();

        score -= 0.1 * (vague_phrases.len() + ambiguous_statements.len()) as f64;

        let mut suggestions = Vec::new();
        if word_count < 20 {
            suggestions.push("Add detail describing the expected behavior".to_string());
        }
        if !has_numbers {
            suggestions.push("Quantify expectations with concrete numbers or limits".to_string());
        }
        if !vague_phrases.is_empty() {
            suggestions.push("Replace vague phrases with specific requirements".to_string());
        }
        if !ambiguous_statements.is_empty() {
            suggestions.push("Resolve statements that allow more than one reading".to_string());
        }

        TextAnalysis {
            score: score.clamp(0.0, 1.0),
            vague_phrases,
            ambiguous_statements,
            suggestions,
        }
    }
}

#[async_trait]
impl TextAnalyzer for HeuristicAnalyzer {
    fn name(&self) -> &str {
        "heuristic"
    }

    async fn analyze(&self, text: &str) -> Result<TextAnalysis> {
        Ok(self.assess(text))
    }
}
