//! Configuration types for the tokenizer and the analyzers.
//!
//! These are plain builder structs with no CLI framework dependencies, so
//! they can be built in code or deserialized from a JSON file.
//!
//! # Example
//!
//! ```rust
//! use chatlens::config::{AnalysisConfig, Granularity};
//!
//! let config = AnalysisConfig::new()
//!     .with_stop_words(false)
//!     .with_length_granularity(Granularity::Week)
//!     .with_top_words(10);
//!
//! assert_eq!(config.top_words, 10);
//! ```

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Configuration for transcript tokenization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Keep system messages in the tokenizer output (default: false).
    ///
    /// The index drops them regardless; this only affects what
    /// [`parse_transcript`](crate::parsing::parse_transcript) returns.
    pub keep_system_messages: bool,
}

impl TokenizerConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether system messages are returned by the tokenizer.
    #[must_use]
    pub fn with_keep_system_messages(mut self, keep: bool) -> Self {
        self.keep_system_messages = keep;
        self
    }
}

/// Bucket size for the message-length trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// `YYYY-MM` buckets
    #[default]
    Month,
    /// `YYYY-Www` buckets
    Week,
}

/// Configuration for the statistics engine and lexical analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Drop the bilingual stop-word list and system-noise tokens (default: true)
    pub filter_stop_words: bool,

    /// Length of each participant's word-frequency list (default: 20)
    pub top_words: usize,

    /// Length of the chat-wide word-frequency list (default: 50)
    pub global_top_words: usize,

    /// Maximum words reported per participant by the vocabulary comparison (default: 10)
    pub unique_words_limit: usize,

    /// Bucket size for the message-length trend (default: month)
    pub length_granularity: Granularity,

    /// Messages longer than this many characters are not sentiment-scored (default: 200)
    pub sentiment_max_chars: usize,

    /// "Today" for streak activity. `None` uses the local current date.
    pub reference_date: Option<NaiveDate>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            filter_stop_words: true,
            top_words: 20,
            global_top_words: 50,
            unique_words_limit: 10,
            length_granularity: Granularity::Month,
            sentiment_max_chars: 200,
            reference_date: None,
        }
    }
}

impl AnalysisConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables stop-word filtering.
    #[must_use]
    pub fn with_stop_words(mut self, enabled: bool) -> Self {
        self.filter_stop_words = enabled;
        self
    }

    /// Sets the per-participant word list length.
    #[must_use]
    pub fn with_top_words(mut self, n: usize) -> Self {
        self.top_words = n;
        self
    }

    /// Sets the chat-wide word list length.
    #[must_use]
    pub fn with_global_top_words(mut self, n: usize) -> Self {
        self.global_top_words = n;
        self
    }

    /// Sets the vocabulary comparison limit.
    #[must_use]
    pub fn with_unique_words_limit(mut self, n: usize) -> Self {
        self.unique_words_limit = n;
        self
    }

    /// Sets the message-length trend granularity.
    #[must_use]
    pub fn with_length_granularity(mut self, granularity: Granularity) -> Self {
        self.length_granularity = granularity;
        self
    }

    /// Sets the sentiment length cutoff.
    #[must_use]
    pub fn with_sentiment_max_chars(mut self, n: usize) -> Self {
        self.sentiment_max_chars = n;
        self
    }

    /// Pins "today" for streak evaluation.
    #[must_use]
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    /// Resolves the reference date, falling back to the local date.
    pub fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }
}
