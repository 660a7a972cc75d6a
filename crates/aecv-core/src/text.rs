//! Word-level text helpers shared by the rule-based validators.

/// Lowercased word tokens. Hyphens and apostrophes inside a word are kept,
/// so `read-only` and `user-friendly` stay single tokens.
pub(crate) fn words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '-' || c == '\''))
        .map(|w| w.trim_matches(|c| c == '-' || c == '\''))
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Space-delimited token stream used for whole-phrase matching.
#[derive(Debug, Clone)]
pub(crate) struct Normalized(String);

impl Normalized {
    pub(crate) fn new(text: &str) -> Self {
        Self(format!(" {} ", words(text).join(" ")))
    }

    /// Whole-word (or whole-phrase) containment.
    pub(crate) fn contains(&self, phrase: &str) -> bool {
        self.0.contains(&format!(" {phrase} "))
    }

    pub(crate) fn contains_any(&self, phrases: &[&str]) -> bool {
        phrases.iter().any(|p| self.contains(p))
    }

    /// Phrases from `list` present in the text, in list order.
    pub(crate) fn matches<'a>(&self, list: &[&'a str]) -> Vec<&'a str> {
        list.iter().copied().filter(|p| self.contains(p)).collect()
    }

    /// Index of the first token equal to `word`.
    pub(crate) fn position(&self, word: &str) -> Option<usize> {
        self.0.split_whitespace().position(|w| w == word)
    }

    /// Index of the first token equal to `word` at or after token `from`.
    pub(crate) fn position_after(&self, word: &str, from: usize) -> Option<usize> {
        self.0
            .split_whitespace()
            .enumerate()
            .skip(from)
            .find_map(|(idx, w)| (w == word).then_some(idx))
    }
}

pub(crate) fn has_digit(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_split_punctuation_and_keep_hyphens() {
        assert_eq!(
            words("The form is READ-ONLY, (mostly)."),
            vec!["the", "form", "is", "read-only", "mostly"]
        );
    }

    #[test]
    fn test_contains_is_whole_word() {
        let n = Normalized::new("Shows the enabled toggle");
        assert!(n.contains("shows"));
        assert!(n.contains("the enabled"));
        assert!(!n.contains("show"));
        assert!(!n.contains("enable"));
    }

    #[test]
    fn test_position_and_matches() {
        let n = Normalized::new("Given a user, when they log in, then it works");
        assert_eq!(n.position("given"), Some(0));
        assert!(n.position("when") < n.position("then"));
        assert_eq!(n.matches(&["then", "never", "when"]), vec!["then", "when"]);
    }

    #[test]
    fn test_position_after_skips_earlier_tokens() {
        let n = Normalized::new("then a when b then c");
        assert_eq!(n.position_after("then", 0), Some(0));
        assert_eq!(n.position_after("then", 3), Some(4));
        assert_eq!(n.position_after("when", 3), None);
    }
}
