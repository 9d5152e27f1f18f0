//! The recording analysis engine.
//!
//! [`Engine`] pairs an [`Analyzer`] with a [`HistoryStore`] and a
//! [`StatisticsStore`]. [`Engine::analyze`] is the recording path: each
//! non-empty analysis appends a summary to history and its word count to
//! statistics. Frequency and comparison calls are read-only.
//!
//! An `Engine` is `Send + Sync`; share it behind an `Arc` to serve
//! concurrent callers.

use crate::analyzer::{
    Analysis, AnalysisKind, AnalysisReport, Analyzer, CharacterFrequency, FrequencyMode,
};
use crate::compare::{self, ComparisonReport};
use crate::config::Config;
use crate::error::ConfigResult;
use crate::store::{
    DEFAULT_HISTORY_CAPACITY, DEFAULT_STATISTICS_CAPACITY, HistoryStore, StatisticsStore,
    StatisticsSummary,
};
use crate::tokenize::SeparatorSet;

/// Settings needed to build an [`Engine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Separator set for tokenization.
    pub separators: SeparatorSet,
    /// Character-frequency mode.
    pub frequency_mode: FrequencyMode,
    /// Maximum number of history entries.
    pub history_capacity: usize,
    /// Maximum number of statistics entries.
    pub statistics_capacity: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            separators: SeparatorSet::default(),
            frequency_mode: FrequencyMode::default(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            statistics_capacity: DEFAULT_STATISTICS_CAPACITY,
        }
    }
}

impl From<&Config> for EngineOptions {
    fn from(config: &Config) -> Self {
        Self {
            separators: config.separators,
            frequency_mode: config.frequency_mode,
            history_capacity: config.history_capacity,
            statistics_capacity: config.statistics_capacity,
        }
    }
}

/// Analyzer plus bounded history and statistics.
#[derive(Debug)]
pub struct Engine {
    analyzer: Analyzer,
    history: HistoryStore,
    statistics: StatisticsStore,
}

impl Engine {
    /// Build an engine, validating both capacities up front.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::InvalidCapacity`] if either capacity is
    /// zero. Nothing is constructed in that case.
    pub fn new(options: EngineOptions) -> ConfigResult<Self> {
        let history = HistoryStore::new("history", options.history_capacity)?;
        let statistics = StatisticsStore::new("statistics", options.statistics_capacity)?;
        tracing::debug!(
            separators = %options.separators,
            frequency_mode = %options.frequency_mode,
            history_capacity = options.history_capacity,
            statistics_capacity = options.statistics_capacity,
            "engine created"
        );
        Ok(Self {
            analyzer: Analyzer::new(options.separators, options.frequency_mode),
            history,
            statistics,
        })
    }

    /// Build an engine from loaded configuration.
    pub fn from_config(config: &Config) -> ConfigResult<Self> {
        Self::new(EngineOptions::from(config))
    }

    /// The engine's analyzer.
    pub const fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    /// The history store.
    pub const fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// The statistics store.
    pub const fn statistics(&self) -> &StatisticsStore {
        &self.statistics
    }

    /// Analyze `text` and record the result.
    ///
    /// Empty text returns the zero report and records nothing.
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    pub fn analyze(&self, text: &str) -> AnalysisReport {
        let report = self.analyzer.analyze(text);
        if !text.is_empty() {
            self.history.add(summarize(&report));
            self.statistics.add(report.word_count);
        }
        report
    }

    /// Tally characters with the configured frequency mode.
    pub fn character_frequency(&self, text: &str) -> CharacterFrequency {
        self.analyzer.character_frequency(text)
    }

    /// Run a single analysis kind without recording it.
    pub fn run(&self, text: &str, kind: AnalysisKind) -> Analysis {
        self.analyzer.run(text, kind)
    }

    /// Compare two texts without recording them.
    pub fn compare(&self, left: &str, right: &str) -> ComparisonReport {
        compare::compare(&self.analyzer, left, right)
    }

    /// Summary of the current statistics snapshot.
    pub fn statistics_summary(&self) -> StatisticsSummary {
        StatisticsSummary::from_counts(&self.statistics.get_all())
    }
}

/// One-line history entry for an analysis.
pub fn summarize(report: &AnalysisReport) -> String {
    format!(
        "words: {}, longest: '{}'",
        report.word_count, report.longest_word
    )
}
