//! Core library for wordwise.
//!
//! Bounded, stateful text analysis: word counting, longest-word detection,
//! character-frequency tallying and text comparison, plus capped rolling
//! logs of past analyses and their word counts.
//!
//! # Modules
//!
//! - [`tokenize`] - Word splitting over a configurable separator set
//! - [`analyzer`] - Word statistics, character frequency, tagged analyses
//! - [`compare`] - Shared-vocabulary comparison of two texts
//! - [`store`] - Fixed-capacity FIFO logs (history and statistics)
//! - [`engine`] - Analyzer plus stores; the recording entry point
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use wordwise_core::{Engine, EngineOptions};
//!
//! let engine = Engine::new(EngineOptions::default()).expect("default capacities are valid");
//! let report = engine.analyze("The quick brown fox");
//! assert_eq!(report.word_count, 4);
//! assert_eq!(engine.history().get_all(), vec!["words: 4, longest: 'quick'"]);
//! ```
#![deny(unsafe_code)]

pub mod analyzer;
pub mod compare;
pub mod config;
pub mod engine;
pub mod error;
pub mod store;
pub mod tokenize;

pub use analyzer::{
    Analysis, AnalysisKind, AnalysisReport, Analyzer, CharacterFrequency, FrequencyMode,
    character_frequency,
};
pub use compare::{ComparisonReport, compare};
pub use config::{Config, ConfigLoader, ConfigSources, DEFAULT_MAX_INPUT_BYTES, LogLevel};
pub use engine::{Engine, EngineOptions};
pub use error::{ConfigError, ConfigResult};
pub use store::{BoundedLog, HistoryStore, StatisticsStore, StatisticsSummary};
pub use tokenize::{SeparatorSet, tokenize};
