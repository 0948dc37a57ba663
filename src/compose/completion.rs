//! Suggestion filtering for interactive prompts.

/// A completion candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// Text inserted when the suggestion is accepted.
    pub text: String,
    /// Extra text shown beside the suggestion.
    pub description: String,
}

impl Suggestion {
    /// Creates a suggestion.
    pub fn new(text: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            description: description.into(),
        }
    }
}

/// Supplies suggestions for the word being typed.
pub trait Completer {
    /// Candidates matching `word`, in display order.
    fn complete(&self, word: &str) -> Vec<Suggestion>;
}

/// Returns true if every character of `needle` appears in `haystack` in order.
///
/// Both sides are compared as given; callers fold case beforehand.
pub fn fuzzy_match(haystack: &str, needle: &str) -> bool {
    let mut chars = haystack.chars();
    needle.chars().all(|c| chars.any(|h| h == c))
}

/// Case-insensitive prefix filter on suggestion text.
pub fn filter_prefix(candidates: &[Suggestion], query: &str) -> Vec<Suggestion> {
    if query.is_empty() {
        return candidates.to_vec();
    }
    let query = query.to_uppercase();
    candidates
        .iter()
        .filter(|s| s.text.to_uppercase().starts_with(&query))
        .cloned()
        .collect()
}

/// Case-insensitive subsequence filter on suggestion text or description.
pub fn filter_fuzzy(candidates: &[Suggestion], query: &str) -> Vec<Suggestion> {
    if query.is_empty() {
        return candidates.to_vec();
    }
    let query = query.to_uppercase();
    candidates
        .iter()
        .filter(|s| {
            fuzzy_match(&s.text.to_uppercase(), &query)
                || fuzzy_match(&s.description.to_uppercase(), &query)
        })
        .cloned()
        .collect()
}

/// Completes by case-insensitive prefix.
#[derive(Debug, Clone, Default)]
pub struct PrefixCompleter {
    candidates: Vec<Suggestion>,
}

impl PrefixCompleter {
    /// Creates a completer over `candidates`; an empty list completes nothing.
    pub fn new(candidates: Vec<Suggestion>) -> Self {
        Self { candidates }
    }
}

impl Completer for PrefixCompleter {
    fn complete(&self, word: &str) -> Vec<Suggestion> {
        filter_prefix(&self.candidates, word)
    }
}

/// Completes by fuzzy subsequence over text and description.
#[derive(Debug, Clone, Default)]
pub struct FuzzyCompleter {
    candidates: Vec<Suggestion>,
}

impl FuzzyCompleter {
    /// Creates a completer over `candidates`.
    pub fn new(candidates: Vec<Suggestion>) -> Self {
        Self { candidates }
    }
}

impl Completer for FuzzyCompleter {
    fn complete(&self, word: &str) -> Vec<Suggestion> {
        filter_fuzzy(&self.candidates, word)
    }
}

/// The word before the cursor: text after the last whitespace.
pub fn word_before_cursor(line: &str) -> &str {
    line.rsplit(char::is_whitespace).next().unwrap_or("")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn types() -> Vec<Suggestion> {
        vec![
            Suggestion::new("feat", "A new feature"),
            Suggestion::new("fix", "A bug fix"),
        ]
    }

    #[test]
    fn fuzzy_matches_description() {
        let found = filter_fuzzy(&types(), "bg");
        assert_eq!(found, vec![Suggestion::new("fix", "A bug fix")]);
    }

    #[test]
    fn fuzzy_matches_key() {
        let found = filter_fuzzy(&types(), "ft");
        assert_eq!(found, vec![Suggestion::new("feat", "A new feature")]);
    }

    #[test]
    fn fuzzy_is_case_insensitive() {
        let found = filter_fuzzy(&types(), "FEA");
        assert_eq!(found[0].text, "feat");
    }

    #[test]
    fn fuzzy_requires_order() {
        assert!(fuzzy_match("FEAT", "FT"));
        assert!(!fuzzy_match("FEAT", "TF"));
        assert!(fuzzy_match("anything", ""));
    }

    #[test]
    fn prefix_is_case_insensitive() {
        let scopes = vec![Suggestion::new("scope1", ""), Suggestion::new("core", "")];
        assert_eq!(
            filter_prefix(&scopes, "SC"),
            vec![Suggestion::new("scope1", "")]
        );
    }

    #[test]
    fn empty_candidate_set() {
        assert!(PrefixCompleter::default().complete("any").is_empty());
    }

    #[test]
    fn word_before_cursor_takes_last_word() {
        assert_eq!(word_before_cursor("fix the bu"), "bu");
        assert_eq!(word_before_cursor("feat"), "feat");
        assert_eq!(word_before_cursor("trailing "), "");
    }

    proptest! {
        #[test]
        fn filters_keep_candidate_order(
            texts in proptest::collection::vec("[a-zA-Z]{1,8}", 0..12),
            query in "[a-zA-Z]{0,3}",
        ) {
            let candidates: Vec<Suggestion> =
                texts.iter().map(|t| Suggestion::new(t.clone(), "")).collect();
            for filtered in [filter_prefix(&candidates, &query), filter_fuzzy(&candidates, &query)] {
                let mut rest = candidates.iter();
                for kept in &filtered {
                    prop_assert!(rest.any(|c| c == kept));
                }
            }
        }

        #[test]
        fn prefix_matches_are_fuzzy_matches(
            texts in proptest::collection::vec("[a-z]{1,8}", 0..12),
            query in "[a-z]{0,3}",
        ) {
            let candidates: Vec<Suggestion> =
                texts.iter().map(|t| Suggestion::new(t.clone(), "")).collect();
            let fuzzy = filter_fuzzy(&candidates, &query);
            for kept in filter_prefix(&candidates, &query) {
                prop_assert!(fuzzy.contains(&kept));
            }
        }
    }
}
