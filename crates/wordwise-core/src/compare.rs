//! Text comparison by shared vocabulary.
//!
//! The common longest word is taken from the intersection of both texts'
//! distinct words, never from each text's own longest word: two texts whose
//! longest words differ may still share a long word.

use std::collections::{HashMap, HashSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analyzer::{AnalysisReport, Analyzer};
use crate::tokenize::word_len;

/// Result of comparing two texts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ComparisonReport {
    /// Absolute difference between the two word counts.
    pub word_count_difference: usize,
    /// Longest word present in both texts (case-insensitive), spelled as it
    /// first appears in the left text. Empty when the texts share no words.
    pub common_longest_word: String,
    /// Analysis of the left text.
    pub left: AnalysisReport,
    /// Analysis of the right text.
    pub right: AnalysisReport,
}

/// Compare two texts with the given analyzer.
///
/// Length is measured on the word as written, since lowercasing can change
/// it. Among shared words of maximal length, the one whose lowercase form
/// sorts first wins, so the result does not depend on hash iteration order.
#[tracing::instrument(skip_all, fields(left_len = left.len(), right_len = right.len()))]
pub fn compare(analyzer: &Analyzer, left: &str, right: &str) -> ComparisonReport {
    let left_report = analyzer.analyze(left);
    let right_report = analyzer.analyze(right);

    // Lowercase key -> first spelling seen in the left text.
    let mut left_words: HashMap<String, &str> = HashMap::new();
    for word in analyzer.tokenize(left) {
        left_words.entry(word.to_lowercase()).or_insert(word);
    }
    let right_words: HashSet<String> = analyzer
        .tokenize(right)
        .into_iter()
        .map(str::to_lowercase)
        .collect();

    let common_longest_word = left_words
        .iter()
        .filter(|(key, _)| right_words.contains(key.as_str()))
        .max_by(|(key_a, word_a), (key_b, word_b)| {
            word_len(word_a)
                .cmp(&word_len(word_b))
                .then_with(|| key_b.cmp(key_a))
        })
        .map(|(_, spelling)| (*spelling).to_string())
        .unwrap_or_default();

    ComparisonReport {
        word_count_difference: left_report.word_count.abs_diff(right_report.word_count),
        common_longest_word,
        left: left_report,
        right: right_report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::FrequencyMode;
    use crate::tokenize::SeparatorSet;

    fn analyzer() -> Analyzer {
        Analyzer::new(SeparatorSet::Basic, FrequencyMode::Raw)
    }

    #[test]
    fn equal_counts_single_letter_overlap() {
        let report = compare(&analyzer(), "a b c", "b c d");
        assert_eq!(report.word_count_difference, 0);
        assert!(["b", "c"].contains(&report.common_longest_word.as_str()));
        // Ties resolve to the lexicographically smallest word.
        assert_eq!(report.common_longest_word, "b");
    }

    #[test]
    fn finds_shared_longest_word() {
        let report = compare(&analyzer(), "cat dog elephant", "elephant runs fast");
        assert_eq!(report.word_count_difference, 0);
        assert_eq!(report.common_longest_word, "elephant");
    }

    #[test]
    fn no_overlap_is_empty() {
        let report = compare(&analyzer(), "x", "y");
        assert_eq!(report.word_count_difference, 0);
        assert_eq!(report.common_longest_word, "");
    }

    #[test]
    fn difference_is_absolute() {
        let a = compare(&analyzer(), "one", "one two three");
        let b = compare(&analyzer(), "one two three", "one");
        assert_eq!(a.word_count_difference, 2);
        assert_eq!(b.word_count_difference, 2);
    }

    #[test]
    fn independent_longest_words_are_not_reported() {
        // Each side's longest word is unique to it; only "fox" is shared.
        let report = compare(
            &analyzer(),
            "the quick brown fox",
            "a fox jumped extraordinarily",
        );
        assert_eq!(report.left.longest_word, "quick");
        assert_eq!(report.right.longest_word, "extraordinarily");
        assert_eq!(report.common_longest_word, "fox");
    }

    #[test]
    fn matching_ignores_case() {
        let report = compare(&analyzer(), "The Elephant sleeps", "an ELEPHANT wakes");
        assert_eq!(report.common_longest_word, "Elephant");
    }

    #[test]
    fn empty_sides() {
        let report = compare(&analyzer(), "", "words here");
        assert_eq!(report.word_count_difference, 2);
        assert_eq!(report.common_longest_word, "");
        assert_eq!(report.left, AnalysisReport::default());

        let report = compare(&analyzer(), "", "");
        assert_eq!(report, ComparisonReport::default());
    }

    #[test]
    fn separator_set_applies_to_both_sides() {
        let basic = compare(&analyzer(), "hello!", "hello");
        assert_eq!(basic.common_longest_word, "");

        let extended = Analyzer::new(SeparatorSet::Extended, FrequencyMode::Raw);
        let report = compare(&extended, "hello!", "hello");
        assert_eq!(report.common_longest_word, "hello");
    }

    #[test]
    fn deterministic_across_runs() {
        let left = "ab cd ef gh ij";
        let right = "ij gh ef cd ab";
        let first = compare(&analyzer(), left, right);
        for _ in 0..10 {
            assert_eq!(compare(&analyzer(), left, right), first);
        }
        assert_eq!(first.common_longest_word, "ab");
    }

    #[test]
    fn length_is_measured_as_written() {
        // "İİİ" lowercases to six chars but is only three long.
        let report = compare(&analyzer(), "İİİ abcd", "İİİ abcd");
        assert_eq!(report.common_longest_word, "abcd");
    }
}
