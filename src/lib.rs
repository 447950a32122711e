//! # Chatlens
//!
//! A Rust library for parsing exported chat transcripts and computing
//! conversation analytics over them.
//!
//! ## Overview
//!
//! Chatlens reads the plain-text export of a messaging app, where each
//! message starts with a timestamped line in one of three layouts:
//! - **Bracketed slash**: `[1/2/2024, 10:00:00] Alice: Hello`
//! - **Dash**: `1/2/24, 10:00 - Alice: Hello`
//! - **Bracketed ISO**: `[2024-02-01, 10:00:00] Alice: Hello`
//!
//! Lines that match none of them continue the previous message. Platform
//! events (joins, calls, encryption notices) are classified as system
//! messages and excluded from every analyzer.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatlens::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let index = ChatIndex::from_transcript(
//!         "[1/2/2024, 10:00:00] Alice: Hello\n[1/2/2024, 10:05:00] Bob: Hi Alice",
//!     )?;
//!
//!     let report = ChatReport::build(&index, &AnalysisConfig::new(), Some(&LexiconScorer::new()));
//!     assert_eq!(report.metadata.total_participants, 2);
//!     assert_eq!(report.response_times.get("Bob").map(|r| r.samples), Some(1));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parsing`] - line grammars, timestamp resolution and the tokenizer
//!   - [`TranscriptParser`](parsing::TranscriptParser), [`parse_transcript`](parsing::parse_transcript)
//! - [`classify`] - system and media message detection
//! - [`index`] - [`ChatIndex`]: sorted timeline, participant records, lookups, cache
//! - [`stats`] - response times, conversations, streaks, trends, health, sentiment
//! - [`lexical`] - words, emoji and laughter
//! - [`report`] - [`ChatReport`](report::ChatReport), every analyzer in one value
//! - [`core`] - [`FilterConfig`](core::FilterConfig) and report writers
//! - [`config`] - [`TokenizerConfig`](config::TokenizerConfig), [`AnalysisConfig`](config::AnalysisConfig)
//! - [`error`] - [`ChatlensError`], [`Result`]
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod classify;
pub mod config;
pub mod core;
pub mod error;
pub mod frequency;
pub mod index;
pub mod lexical;
pub mod message;
pub mod parsing;
pub mod report;
pub mod stats;

// Re-export the main types at the crate root for convenience
pub use error::{ChatlensError, Result};
pub use index::ChatIndex;
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatlens::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Message;

    pub use crate::error::{ChatlensError, Result};

    // Parsing
    pub use crate::parsing::{TranscriptParser, parse_transcript};

    // Configuration
    pub use crate::config::{AnalysisConfig, Granularity, TokenizerConfig};

    // Index and analyzers
    pub use crate::index::{ChatIndex, ChatMetadata, ParticipantRecord, ParticipantSummary};
    pub use crate::report::ChatReport;
    pub use crate::stats::{LexiconScorer, SentimentError, SentimentScorer};

    // Filtering
    pub use crate::core::filter::{FilterConfig, apply_filters};

    // Output
    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, write_json};
}
