//! Word and character analysis.
//!
//! [`Analyzer`] is configured once with a [`SeparatorSet`] and a
//! [`FrequencyMode`] and holds no other state: every call is a pure function
//! of its input, so repeated calls on the same text give identical results.
//!
//! Empty text is not an error. It produces the zero report
//! (`0` words, empty longest word, `0` total length).

use std::collections::HashMap;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::tokenize::{self, SeparatorSet};

/// Which characters a frequency tally counts, and how.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum FrequencyMode {
    /// Every non-whitespace character, exactly as written.
    #[default]
    Raw,
    /// Letters and digits only, lowercased before counting.
    AlnumLowercase,
}

impl FrequencyMode {
    /// All modes, in declaration order.
    pub const ALL: [Self; 2] = [Self::Raw, Self::AlnumLowercase];

    /// Returns the mode's configuration name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::AlnumLowercase => "alnum-lowercase",
        }
    }

    /// Keys a character is counted under; empty when this mode skips it.
    ///
    /// Lowercasing can expand to several characters (`'İ'` becomes `i` plus
    /// a combining dot); only the alphanumeric ones are kept, so each
    /// qualifying character is counted once.
    fn keys(self, ch: char) -> impl Iterator<Item = char> {
        let (raw, lower) = match self {
            Self::Raw if !ch.is_whitespace() => (Some(ch), None),
            Self::AlnumLowercase if ch.is_alphanumeric() => (None, Some(ch.to_lowercase())),
            _ => (None, None),
        };
        raw.into_iter()
            .chain(lower.into_iter().flatten().filter(|c| c.is_alphanumeric()))
    }
}

impl std::fmt::Display for FrequencyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrequencyMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownFrequencyMode {
                name: s.to_string(),
                available: Self::ALL.map(|mode| mode.as_str()).join(", "),
            })
    }
}

/// Word-level statistics for one text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisReport {
    /// Number of words.
    pub word_count: usize,
    /// The longest word; the first one wins when several share the maximum
    /// length. Empty when there are no words.
    pub longest_word: String,
    /// Sum of all word lengths, in characters.
    pub total_word_length: usize,
}

/// Occurrence count per distinct character.
///
/// Iteration order is unspecified. Use [`CharacterFrequency::by_count`] for a
/// stable, display-ready ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct CharacterFrequency(HashMap<char, usize>);

impl CharacterFrequency {
    /// Count for `ch`, or 0 if it never occurred.
    pub fn get(&self, ch: char) -> usize {
        self.0.get(&ch).copied().unwrap_or(0)
    }

    /// Number of distinct characters.
    pub fn unique(&self) -> usize {
        self.0.len()
    }

    /// Total number of counted characters.
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    /// Whether nothing was counted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries sorted by descending count, then by character.
    pub fn by_count(&self) -> Vec<(char, usize)> {
        let mut entries: Vec<(char, usize)> = self.0.iter().map(|(&c, &n)| (c, n)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        entries
    }
}

/// Tally characters of the raw text (not its words) under `mode`.
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn character_frequency(text: &str, mode: FrequencyMode) -> CharacterFrequency {
    let mut counts: HashMap<char, usize> = HashMap::new();
    for key in text.chars().flat_map(|ch| mode.keys(ch)) {
        *counts.entry(key).or_insert(0) += 1;
    }
    CharacterFrequency(counts)
}

/// A single analysis to run via [`Analyzer::run`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum AnalysisKind {
    /// Number of words.
    WordCount,
    /// The longest word.
    LongestWord,
    /// Character frequency under the analyzer's mode.
    #[serde(rename = "char-frequency")]
    #[cfg_attr(feature = "clap", value(name = "char-frequency"))]
    CharacterFrequency,
    /// Number of characters in the raw text.
    TextLength,
    /// Sum of word lengths.
    #[serde(rename = "total-length")]
    #[cfg_attr(feature = "clap", value(name = "total-length"))]
    TotalWordLength,
}

impl AnalysisKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::WordCount,
        Self::LongestWord,
        Self::CharacterFrequency,
        Self::TextLength,
        Self::TotalWordLength,
    ];

    /// Returns the kind's name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WordCount => "word-count",
            Self::LongestWord => "longest-word",
            Self::CharacterFrequency => "char-frequency",
            Self::TextLength => "text-length",
            Self::TotalWordLength => "total-length",
        }
    }
}

impl std::fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownAnalysisKind {
                name: s.to_string(),
                available: Self::ALL.map(|kind| kind.as_str()).join(", "),
            })
    }
}

/// Result of a single [`AnalysisKind`], one variant per kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum Analysis {
    /// Number of words.
    WordCount(usize),
    /// The longest word.
    LongestWord(String),
    /// Character frequency.
    #[serde(rename = "char-frequency")]
    CharacterFrequency(CharacterFrequency),
    /// Number of characters in the raw text.
    TextLength(usize),
    /// Sum of word lengths.
    #[serde(rename = "total-length")]
    TotalWordLength(usize),
}

impl Analysis {
    /// The kind that produced this result.
    pub const fn kind(&self) -> AnalysisKind {
        match self {
            Self::WordCount(_) => AnalysisKind::WordCount,
            Self::LongestWord(_) => AnalysisKind::LongestWord,
            Self::CharacterFrequency(_) => AnalysisKind::CharacterFrequency,
            Self::TextLength(_) => AnalysisKind::TextLength,
            Self::TotalWordLength(_) => AnalysisKind::TotalWordLength,
        }
    }
}

/// Stateless text analyzer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Analyzer {
    separators: SeparatorSet,
    frequency_mode: FrequencyMode,
}

impl Analyzer {
    /// Create an analyzer with explicit separator set and frequency mode.
    pub const fn new(separators: SeparatorSet, frequency_mode: FrequencyMode) -> Self {
        Self {
            separators,
            frequency_mode,
        }
    }

    /// The configured separator set.
    pub const fn separators(&self) -> SeparatorSet {
        self.separators
    }

    /// The configured frequency mode.
    pub const fn frequency_mode(&self) -> FrequencyMode {
        self.frequency_mode
    }

    /// Split `text` into words under the configured separator set.
    pub fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        tokenize::tokenize(text, self.separators)
    }

    /// Count words, find the longest one, and sum word lengths.
    #[tracing::instrument(skip_all, fields(text_len = text.len(), separators = %self.separators))]
    pub fn analyze(&self, text: &str) -> AnalysisReport {
        let mut report = AnalysisReport::default();
        let mut longest_len = 0;

        for word in self.tokenize(text) {
            let len = tokenize::word_len(word);
            report.word_count += 1;
            report.total_word_length += len;
            // Strictly greater: the first word of a given length is kept.
            if len > longest_len {
                longest_len = len;
                report.longest_word = word.to_string();
            }
        }

        report
    }

    /// Tally characters using the configured frequency mode.
    pub fn character_frequency(&self, text: &str) -> CharacterFrequency {
        character_frequency(text, self.frequency_mode)
    }

    /// Run one analysis and return its tagged result.
    pub fn run(&self, text: &str, kind: AnalysisKind) -> Analysis {
        match kind {
            AnalysisKind::WordCount => Analysis::WordCount(self.analyze(text).word_count),
            AnalysisKind::LongestWord => Analysis::LongestWord(self.analyze(text).longest_word),
            AnalysisKind::CharacterFrequency => {
                Analysis::CharacterFrequency(self.character_frequency(text))
            }
            AnalysisKind::TextLength => Analysis::TextLength(tokenize::word_len(text)),
            AnalysisKind::TotalWordLength => {
                Analysis::TotalWordLength(self.analyze(text).total_word_length)
            }
        }
    }
}
