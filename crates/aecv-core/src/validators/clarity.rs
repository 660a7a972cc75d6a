//! Clarity: is the ticket written so that only one reading is possible?

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::analysis::{HeuristicAnalyzer, TextAnalysis, TextAnalyzer};
use crate::domain::{Criterion, Ticket};
use crate::error::Result;
use crate::validator::{Scorecard, Validator, ValidatorConfig};

const BLOCKER_FLOOR: f64 = 0.4;

/// Delegates judgment to a [`TextAnalyzer`], falling back to the built-in
/// heuristic when none is configured or the analyzer fails.
#[derive(Clone)]
pub struct ClarityValidator {
    config: ValidatorConfig,
    analyzer: Option<Arc<dyn TextAnalyzer>>,
}

impl ClarityValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self {
            config,
            analyzer: None,
        }
    }

    pub fn with_analyzer(mut self, analyzer: Arc<dyn TextAnalyzer>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    async fn analyze(&self, text: &str) -> TextAnalysis {
        let Some(analyzer) = &self.analyzer else {
            return HeuristicAnalyzer.assess(text);
        };
        match analyzer.analyze(text).await.and_then(TextAnalysis::checked) {
            Ok(analysis) => analysis,
            Err(e) => {
                warn!(
                    event = "clarity.analyzer_fallback",
                    analyzer = %analyzer.name(),
                    error = %e,
                );
                HeuristicAnalyzer.assess(text)
            }
        }
    }
}

impl Default for ClarityValidator {
    fn default() -> Self {
        Self::new(ValidatorConfig::default_for(Criterion::Clarity))
    }
}

impl std::fmt::Debug for ClarityValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClarityValidator")
            .field("config", &self.config)
            .field("analyzer", &self.analyzer.as_ref().map(|a| a.name().to_string()))
            .finish()
    }
}

#[async_trait]
impl Validator for ClarityValidator {
    fn criterion(&self) -> Criterion {
        Criterion::Clarity
    }

    fn config(&self) -> ValidatorConfig {
        self.config
    }

    async fn evaluate(&self, ticket: &Ticket) -> Result<Scorecard> {
        let analysis = self.analyze(&ticket.full_text()).await;

        let mut card = Scorecard::new(analysis.score);
        for phrase in &analysis.vague_phrases {
            card.issue(format!("Vague phrase: \"{phrase}\""));
        }
        for statement in &analysis.ambiguous_statements {
            card.issue(format!("Ambiguous statement: \"{statement}\""));
        }
        for suggestion in &analysis.suggestions {
            card.issue(format!("Suggestion: {suggestion}"));
        }

        if card.score < BLOCKER_FLOOR {
            card.blocker(format!(
                "Ticket text is too unclear to act on (score {:.0}%)",
                card.score * 100.0
            ));
        }
        Ok(card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    struct StubAnalyzer {
        outcome: std::result::Result<f64, String>,
    }

    #[async_trait]
    impl TextAnalyzer for StubAnalyzer {
        fn name(&self) -> &str {
            "stub"
        }

        async fn analyze(&self, _text: &str) -> Result<TextAnalysis> {
            match &self.outcome {
                Ok(score) => Ok(TextAnalysis {
                    score: *score,
                    vague_phrases: vec!["somehow".to_string()],
                    ambiguous_statements: vec![],
                    suggestions: vec!["Say how".to_string()],
                }),
                Err(e) => Err(ValidationError::Analysis(e.clone())),
            }
        }
    }

    fn with_stub(outcome: std::result::Result<f64, String>) -> ClarityValidator {
        ClarityValidator::default().with_analyzer(Arc::new(StubAnalyzer { outcome }))
    }

    #[tokio::test]
    async fn test_standalone_uses_heuristic() {
        let r = ClarityValidator::default()
            .validate(&Ticket::new("Fix bug"))
            .await
            .unwrap();
        assert!((r.score() - 0.4).abs() < 1e-9);
        assert!(!r.has_blockers());
        assert!(r.issues().iter().any(|i| i.starts_with("Suggestion:")));
    }

    #[tokio::test]
    async fn test_injected_analyzer_drives_score() {
        let r = with_stub(Ok(0.95)).validate(&Ticket::new("Fix bug")).await.unwrap();
        assert_eq!(r.score(), 0.95);
        assert!(r.passed());
        assert_eq!(
            r.issues(),
            &["Vague phrase: \"somehow\"".to_string(), "Suggestion: Say how".to_string()]
        );
    }

    #[tokio::test]
    async fn test_low_analyzer_score_is_blocker() {
        let r = with_stub(Ok(0.2)).validate(&Ticket::new("Fix bug")).await.unwrap();
        assert!(r.has_blockers());
    }

    #[tokio::test]
    async fn test_analyzer_failure_falls_back() {
        let failing = with_stub(Err("model unavailable".to_string()));
        let heuristic = ClarityValidator::default();
        let ticket = Ticket::new("Fix bug");
        assert_eq!(
            failing.validate(&ticket).await.unwrap().score(),
            heuristic.validate(&ticket).await.unwrap().score()
        );
    }

    #[tokio::test]
    async fn test_out_of_range_analysis_falls_back() {
        let r = with_stub(Ok(4.0)).validate(&Ticket::new("Fix bug")).await.unwrap();
        assert!((r.score() - 0.4).abs() < 1e-9);
    }
}
