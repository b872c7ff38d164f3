//! Fixed keyword sets used for matching
//!
//! Matching is substring presence over lowercased text: each keyword counts
//! at most once, regardless of repetition or word boundaries.

/// Named, ordered list of lowercase keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordSet {
    /// Set name used in logs
    pub name: &'static str,

    /// Lowercase keywords
    pub keywords: &'static [&'static str],
}

impl KeywordSet {
    /// Count distinct keywords present in `text`
    ///
    /// `text` is expected to be lowercased already.
    pub fn count_matches(&self, text: &str) -> usize {
        self.keywords
            .iter()
            .filter(|keyword| text.contains(*keyword))
            .count()
    }

    /// Keywords present in `text`, in set order
    pub fn matches<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'static str> + 'a {
        self.keywords
            .iter()
            .copied()
            .filter(move |keyword| text.contains(keyword))
    }
}

/// Keywords signalling urgency
pub static URGENT: KeywordSet = KeywordSet {
    name: "urgent",
    keywords: &[
        "urgent",
        "asap",
        "emergency",
        "critical",
        "important",
        "deadline",
        "due",
    ],
};

/// Keywords signalling routine work
pub static MEDIUM: KeywordSet = KeywordSet {
    name: "medium",
    keywords: &["meeting", "review", "update", "check", "follow up"],
};

/// Keywords signalling deferrable work
pub static LOW: KeywordSet = KeywordSet {
    name: "low",
    keywords: &["research", "read", "learn", "organize", "clean"],
};

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("urgent: fix critical bug", 2)]
    #[case("urgent urgent urgent", 1)]
    #[case("asap emergency, important deadline due", 5)]
    #[case("overdue report", 1)]
    #[case("plain task", 0)]
    #[case("", 0)]
    fn test_urgent_counts(#[case] text: &str, #[case] expected: usize) {
        assert_eq!(URGENT.count_matches(text), expected);
    }

    #[test]
    fn test_multi_word_keyword() {
        assert_eq!(MEDIUM.count_matches("follow up with vendor"), 1);
        assert_eq!(MEDIUM.count_matches("follow-up with vendor"), 0);
    }

    #[test]
    fn test_substring_without_word_boundaries() {
        // "already" contains "read"
        assert_eq!(LOW.count_matches("already done"), 1);
    }

    #[test]
    fn test_matching_is_case_sensitive_on_input() {
        assert_eq!(URGENT.count_matches("URGENT"), 0);
        assert_eq!(URGENT.count_matches("urgent"), 1);
    }

    #[test]
    fn test_matches_in_set_order() {
        let found: Vec<_> = URGENT.matches("due asap urgent").collect();
        assert_eq!(found, vec!["urgent", "asap", "due"]);
    }

    #[test]
    fn test_sets_are_lowercase() {
        for set in [&URGENT, &MEDIUM, &LOW] {
            for keyword in set.keywords {
                assert_eq!(*keyword, keyword.to_lowercase(), "set {}", set.name);
            }
        }
    }
}
