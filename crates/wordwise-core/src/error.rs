//! Error types for wordwise-core.
//!
//! Analysis itself never fails: every string has a well-defined result.
//! The only errors are configuration errors, raised once at construction
//! time and never recovered from mid-operation.

use thiserror::Error;

/// Errors that can occur when loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// A bounded store was configured with a capacity of zero.
    #[error("{store} capacity must be at least 1 (got {capacity})")]
    InvalidCapacity {
        /// Which store was misconfigured ("history" or "statistics").
        store: &'static str,
        /// The rejected capacity.
        capacity: usize,
    },

    /// An unknown character-frequency mode was provided.
    #[error("unknown frequency mode: {name}. Use: {available}")]
    UnknownFrequencyMode {
        /// The mode name that was requested.
        name: String,
        /// Comma-separated list of available mode names.
        available: String,
    },

    /// An unknown separator set was provided.
    #[error("unknown separator set: {name}. Use: {available}")]
    UnknownSeparatorSet {
        /// The separator set name that was requested.
        name: String,
        /// Comma-separated list of available separator set names.
        available: String,
    },

    /// An unknown analysis kind was provided.
    #[error("unknown analysis kind: {name}. Use: {available}")]
    UnknownAnalysisKind {
        /// The kind name that was requested.
        name: String,
        /// Comma-separated list of available kind names.
        available: String,
    },
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;
