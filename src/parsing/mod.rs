//! Transcript parsing: grammar detection, timestamp resolution, tokenization.
//!
//! - [`grammar`] - line grammars and the priority-ordered matcher
//! - [`timestamp`] - date/time field resolution
//! - [`tokenizer`] - multi-line message assembly

pub mod grammar;
pub mod timestamp;
pub mod tokenizer;

pub use grammar::{Grammar, LineCaptures, LineMatch, match_line};
pub use timestamp::resolve_timestamp;
pub use tokenizer::{TranscriptParser, parse_transcript};
