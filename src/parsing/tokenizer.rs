//! Line-by-line transcript tokenizer.
//!
//! Each line is matched against the grammars in priority order. A matching
//! line flushes the in-progress message and starts a new one; any other
//! non-blank line is a continuation of the in-progress message. Lines before
//! the first message are header noise and are dropped. Blank lines neither
//! start nor end a message.

use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use tracing::{debug, trace};

use crate::Message;
use crate::classify::{is_media_line, is_system_content};
use crate::config::TokenizerConfig;
use crate::error::{ChatlensError, Result};

use super::grammar::{Grammar, GrammarSet, LineMatch};
use super::timestamp::resolve_timestamp;

/// Parser for exported chat transcripts.
///
/// # Example
///
/// ```rust
/// use chatlens::parsing::TranscriptParser;
///
/// let parser = TranscriptParser::new();
/// let messages = parser.parse_str(
///     "[1/2/2024, 10:00:00] Alice: Hello\n[1/2/2024, 10:05:00] Bob: Hi Alice",
/// )?;
/// assert_eq!(messages.len(), 2);
/// # Ok::<(), chatlens::ChatlensError>(())
/// ```
pub struct TranscriptParser {
    config: TokenizerConfig,
}

impl TranscriptParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: TokenizerConfig::default(),
        }
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: TokenizerConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Reads and parses a transcript file.
    pub fn parse(&self, path: &Path) -> Result<Vec<Message>> {
        let content = fs::read_to_string(path)?;
        self.parse_str(&content)
    }

    /// Parses transcript text.
    ///
    /// Fails with [`ChatlensError::EmptyInput`] on blank input,
    /// [`ChatlensError::MalformedTimestamp`] on the first message line whose
    /// date or time does not resolve, and [`ChatlensError::NoMessagesFound`]
    /// if no line starts a message.
    pub fn parse_str(&self, input: &str) -> Result<Vec<Message>> {
        if input.trim().is_empty() {
            return Err(ChatlensError::EmptyInput);
        }

        let grammars = GrammarSet::shared();
        let mut records: Vec<Message> = Vec::new();
        let mut current: Option<Pending> = None;
        let mut scanned = 0usize;
        let mut grammar_hits = [0usize; Grammar::PRIORITY.len()];

        for (idx, raw) in input.lines().enumerate() {
            if raw.trim().is_empty() {
                continue;
            }
            scanned += 1;

            let line = raw.trim_start_matches(['\u{FEFF}', '\u{200E}', '\u{200F}']);

            match grammars.match_line(line) {
                LineMatch::Matched { grammar, captures } => {
                    trace!(line = idx + 1, grammar = grammar.name(), "message line");
                    if let Some(slot) = Grammar::PRIORITY.iter().position(|&g| g == grammar) {
                        grammar_hits[slot] += 1;
                    }

                    let timestamp = resolve_timestamp(captures.date, captures.time)
                        .map_err(|reason| ChatlensError::malformed_timestamp(idx + 1, raw, reason))?;

                    if let Some(done) = current.take() {
                        records.push(done.finish());
                    }
                    current = Some(Pending {
                        timestamp,
                        participant: captures.participant.to_string(),
                        content: captures.content.to_string(),
                        is_media: is_media_line(captures.content),
                    });
                }
                LineMatch::Unmatched => match current.as_mut() {
                    Some(pending) => pending.continue_with(line.trim_end()),
                    None => trace!(line = idx + 1, "header noise"),
                },
            }
        }

        if let Some(done) = current.take() {
            records.push(done.finish());
        }

        if records.is_empty() {
            return Err(ChatlensError::NoMessagesFound { lines: scanned });
        }

        let system = records.iter().filter(|m| m.is_system).count();
        debug!(
            records = records.len(),
            system,
            bracketed_slash = grammar_hits[0],
            dash = grammar_hits[1],
            bracketed_iso = grammar_hits[2],
            "tokenized transcript"
        );

        if !self.config.keep_system_messages {
            records.retain(|m| !m.is_system);
        }

        Ok(records)
    }
}

impl Default for TranscriptParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses transcript text with the default configuration.
pub fn parse_transcript(input: &str) -> Result<Vec<Message>> {
    TranscriptParser::new().parse_str(input)
}

/// A message still accepting continuation lines.
struct Pending {
    timestamp: NaiveDateTime,
    participant: String,
    content: String,
    is_media: bool,
}

impl Pending {
    /// Appends a continuation line. The media flag can only go false -> true.
    fn continue_with(&mut self, line: &str) {
        self.content.push('\n');
        self.content.push_str(line);
        if !self.is_media && is_media_line(line) {
            self.is_media = true;
        }
    }

    fn finish(self) -> Message {
        let is_system = is_system_content(&self.content);
        Message {
            timestamp: self.timestamp,
            participant: self.participant,
            content: self.content,
            is_system,
            is_media: self.is_media,
        }
    }
}
