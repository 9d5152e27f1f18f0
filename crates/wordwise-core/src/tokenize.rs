//! Word tokenization over a configurable separator set.
//!
//! A word is a maximal non-empty run of characters that are not separators.
//! Which characters separate words is an explicit choice: the two sets give
//! different counts and longest words on punctuation-heavy text.

use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Whitespace plus period and comma.
const BASIC_SEPARATORS: &[char] = &[' ', '\t', '\n', '\r', '.', ','];

/// The basic set plus `!`, `?`, `;` and `:`.
const EXTENDED_SEPARATORS: &[char] = &[' ', '\t', '\n', '\r', '.', ',', '!', '?', ';', ':'];

/// Which characters delimit words.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum SeparatorSet {
    /// Space, tab, newline, carriage return, period, comma.
    #[default]
    Basic,
    /// The basic set plus `!`, `?`, `;`, `:`.
    Extended,
}

impl SeparatorSet {
    /// All separator sets, in declaration order.
    pub const ALL: [Self; 2] = [Self::Basic, Self::Extended];

    /// Returns the set's configuration name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Extended => "extended",
        }
    }

    /// The characters in this set.
    pub const fn chars(&self) -> &'static [char] {
        match self {
            Self::Basic => BASIC_SEPARATORS,
            Self::Extended => EXTENDED_SEPARATORS,
        }
    }

    /// Whether `ch` ends a word under this set.
    pub fn is_separator(&self, ch: char) -> bool {
        self.chars().contains(&ch)
    }
}

impl std::fmt::Display for SeparatorSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeparatorSet {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|set| set.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownSeparatorSet {
                name: s.to_string(),
                available: Self::ALL.map(|set| set.as_str()).join(", "),
            })
    }
}

/// Split `text` into words, discarding the empty pieces between adjacent
/// separators.
pub fn tokenize(text: &str, separators: SeparatorSet) -> Vec<&str> {
    text.split(|c: char| separators.is_separator(c))
        .filter(|w| !w.is_empty())
        .collect()
}

/// Length of a word in characters.
pub fn word_len(word: &str) -> usize {
    word.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace_runs() {
        assert_eq!(
            tokenize("  the\tcat\n\nsat  ", SeparatorSet::Basic),
            vec!["the", "cat", "sat"]
        );
    }

    #[test]
    fn basic_set_keeps_exclamation_inside_words() {
        let words = tokenize("Hello, world! Bye.", SeparatorSet::Basic);
        assert_eq!(words, vec!["Hello", "world!", "Bye"]);
    }

    #[test]
    fn extended_set_splits_on_punctuation() {
        let words = tokenize("wait;what?yes:no!", SeparatorSet::Extended);
        assert_eq!(words, vec!["wait", "what", "yes", "no"]);
    }

    #[test]
    fn all_separators_yield_nothing() {
        assert!(tokenize(" .,\r\n\t", SeparatorSet::Basic).is_empty());
        assert!(tokenize("!?;: ", SeparatorSet::Extended).is_empty());
    }

    #[test]
    fn empty_input() {
        assert!(tokenize("", SeparatorSet::Basic).is_empty());
    }

    #[test]
    fn hyphens_and_apostrophes_stay_in_words() {
        let words = tokenize("don't re-run", SeparatorSet::Extended);
        assert_eq!(words, vec!["don't", "re-run"]);
    }

    #[test]
    fn word_len_counts_chars_not_bytes() {
        assert_eq!(word_len("анализатора"), 11);
        assert_eq!(word_len("cat"), 3);
    }

    #[test]
    fn parses_names() {
        assert_eq!("basic".parse::<SeparatorSet>().unwrap(), SeparatorSet::Basic);
        assert_eq!(
            "Extended".parse::<SeparatorSet>().unwrap(),
            SeparatorSet::Extended
        );
    }

    #[test]
    fn unknown_name_lists_choices() {
        let err = "semicolons".parse::<SeparatorSet>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("semicolons"));
        assert!(msg.contains("basic, extended"));
    }

    #[test]
    fn extended_is_a_superset_of_basic() {
        for ch in SeparatorSet::Basic.chars() {
            assert!(SeparatorSet::Extended.is_separator(*ch));
        }
    }
}
