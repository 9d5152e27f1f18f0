//! Fixed-capacity, insertion-ordered logs.
//!
//! [`BoundedLog`] keeps the most recent `capacity` items. Adding to a full log
//! evicts the oldest item first (FIFO; reads never affect eviction order).
//!
//! Each log owns one mutex. `add`, `clear` and the snapshot taken by
//! `get_all` are each a single critical section, so concurrent callers never
//! observe a half-evicted log. There is no lock shared between logs.

use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Default number of analysis summaries kept in history.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Default number of word counts kept in statistics.
pub const DEFAULT_STATISTICS_CAPACITY: usize = 100;

/// Rolling log of human-readable analysis summaries.
pub type HistoryStore = BoundedLog<String>;

/// Rolling log of word counts.
pub type StatisticsStore = BoundedLog<usize>;

/// A thread-safe FIFO log holding at most `capacity` items.
#[derive(Debug)]
pub struct BoundedLog<T> {
    name: &'static str,
    capacity: NonZeroUsize,
    items: Mutex<VecDeque<T>>,
}

impl<T: Clone> BoundedLog<T> {
    /// Create an empty log.
    ///
    /// `name` identifies the log in errors and traces.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCapacity`] when `capacity` is zero.
    pub fn new(name: &'static str, capacity: usize) -> ConfigResult<Self> {
        let capacity = NonZeroUsize::new(capacity).ok_or(ConfigError::InvalidCapacity {
            store: name,
            capacity,
        })?;
        Ok(Self {
            name,
            capacity,
            items: Mutex::new(VecDeque::with_capacity(capacity.get())),
        })
    }

    /// Append `item`, evicting the oldest item first if the log is full.
    pub fn add(&self, item: T) {
        let mut items = self.lock();
        if items.len() >= self.capacity.get() {
            items.pop_front();
            tracing::debug!(store = self.name, capacity = self.capacity.get(), "evicted oldest entry");
        }
        items.push_back(item);
    }

    /// Copy of the current contents, oldest first.
    ///
    /// Later `add` or `clear` calls do not change a returned snapshot.
    pub fn get_all(&self) -> Vec<T> {
        self.lock().iter().cloned().collect()
    }

    /// Remove every item. Capacity is unchanged.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of items currently held.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the log holds no items.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Maximum number of items held.
    pub const fn capacity(&self) -> usize {
        self.capacity.get()
    }

    // push_back/pop_front/clear cannot leave the deque inconsistent, so a
    // poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, VecDeque<T>> {
        self.items.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Aggregate view of a statistics snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StatisticsSummary {
    /// Number of word counts in the snapshot.
    pub samples: usize,
    /// Sum of all word counts.
    pub total: usize,
    /// Smallest word count (0 when empty).
    pub min: usize,
    /// Largest word count (0 when empty).
    pub max: usize,
    /// Mean word count, rounded to one decimal (0.0 when empty).
    pub mean: f64,
}

impl StatisticsSummary {
    /// Summarize a list of word counts.
    pub fn from_counts(counts: &[usize]) -> Self {
        if counts.is_empty() {
            return Self::default();
        }
        let total: usize = counts.iter().sum();
        Self {
            samples: counts.len(),
            total,
            min: counts.iter().copied().min().unwrap_or(0),
            max: counts.iter().copied().max().unwrap_or(0),
            mean: round1(total as f64 / counts.len() as f64),
        }
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
