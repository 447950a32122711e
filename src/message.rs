//! Normalized message type produced by the transcript parser.
//!
//! A [`Message`] is immutable once the tokenizer has assembled it: the
//! timestamp is resolved to second precision, multi-line content is joined
//! with `\n`, and the classifier has decided the `is_system` / `is_media`
//! flags.
//!
//! # Example
//!
//! ```
//! use chatlens::Message;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 2, 1)
//!     .unwrap()
//!     .and_hms_opt(10, 0, 0)
//!     .unwrap();
//! let msg = Message::new(ts, "Alice", "Hello!");
//!
//! assert_eq!(msg.participant(), "Alice");
//! assert!(!msg.is_system());
//! assert!(!msg.is_media());
//! ```

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// A single chat message.
///
/// Transcripts carry no timezone information, so timestamps are wall-clock
/// [`NaiveDateTime`] values exactly as written in the export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// When the message was sent (second precision).
    pub timestamp: NaiveDateTime,

    /// Display name of the author, trimmed. Matched exactly, never fuzzily.
    pub participant: String,

    /// Text content. May contain newlines; may be empty for media-only messages.
    pub content: String,

    /// Platform event (join, call, encryption notice...). Excluded from analytics.
    #[serde(default)]
    pub is_system: bool,

    /// Media-omission placeholder or attachment marker was present.
    #[serde(default)]
    pub is_media: bool,
}

impl Message {
    /// Creates a regular (non-system, non-media) message.
    pub fn new(
        timestamp: NaiveDateTime,
        participant: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            participant: participant.into(),
            content: content.into(),
            is_system: false,
            is_media: false,
        }
    }

    /// Builder method to set the system flag.
    #[must_use]
    pub fn with_system(mut self, is_system: bool) -> Self {
        self.is_system = is_system;
        self
    }

    /// Builder method to set the media flag.
    #[must_use]
    pub fn with_media(mut self, is_media: bool) -> Self {
        self.is_media = is_media;
        self
    }

    /// Returns the timestamp.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Returns the participant name.
    pub fn participant(&self) -> &str {
        &self.participant
    }

    /// Returns the content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns `true` for platform-generated events.
    pub fn is_system(&self) -> bool {
        self.is_system
    }

    /// Returns `true` for media-only messages.
    pub fn is_media(&self) -> bool {
        self.is_media
    }

    /// Calendar date of the message.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Hour of day, `0..24`.
    pub fn hour(&self) -> usize {
        self.timestamp.hour() as usize
    }

    /// Day of week, `0..7` with Sunday = 0.
    pub fn weekday(&self) -> usize {
        self.timestamp.weekday().num_days_from_sunday() as usize
    }

    /// Fixed-width `YYYY-MM` bucket key.
    pub fn month_key(&self) -> String {
        format!("{:04}-{:02}", self.timestamp.year(), self.timestamp.month())
    }

    /// Fixed-width `YYYY-Www` bucket key.
    ///
    /// `week = ceil((days_since_jan1 + jan1_weekday + 1) / 7)` where the
    /// weekday counts from Sunday = 0.
    pub fn week_key(&self) -> String {
        let date = self.date();
        let days_since_jan1 = date.ordinal0();
        let jan1_weekday = NaiveDate::from_yo_opt(date.year(), 1)
            .map(|d| d.weekday().num_days_from_sunday())
            .unwrap_or(0);
        let week = (days_since_jan1 + jan1_weekday + 1).div_ceil(7);
        format!("{:04}-W{:02}", date.year(), week)
    }

    /// Whitespace-delimited word count.
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }

    /// Count of ASCII letters only.
    pub fn letter_count(&self) -> usize {
        self.content.chars().filter(char::is_ascii_alphabetic).count()
    }

    /// Length in Unicode scalar values.
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_builder() {
        let msg = Message::new(at(2024, 1, 1), "Alice", "<Media omitted>").with_media(true);
        assert!(msg.is_media());
        assert!(!msg.is_system());
        assert_eq!(msg.content(), "<Media omitted>");
    }

    #[test]
    fn test_weekday_sunday_zero() {
        // 2024-01-07 is a Sunday
        assert_eq!(Message::new(at(2024, 1, 7), "A", "x").weekday(), 0);
        assert_eq!(Message::new(at(2024, 1, 8), "A", "x").weekday(), 1);
    }

    #[test]
    fn test_month_key_zero_padded() {
        assert_eq!(Message::new(at(2024, 3, 9), "A", "x").month_key(), "2024-03");
    }

    #[test]
    fn test_week_key() {
        // 2024-01-01 is a Monday (weekday 1): ceil((0 + 1 + 1) / 7) = 1
        assert_eq!(Message::new(at(2024, 1, 1), "A", "x").week_key(), "2024-W01");
        // 2024-01-06 Saturday: ceil((5 + 1 + 1) / 7) = 1
        assert_eq!(Message::new(at(2024, 1, 6), "A", "x").week_key(), "2024-W01");
        // 2024-01-07 Sunday: ceil((6 + 1 + 1) / 7) = 2
        assert_eq!(Message::new(at(2024, 1, 7), "A", "x").week_key(), "2024-W02");
    }

    #[test]
    fn test_counts() {
        let msg = Message::new(at(2024, 1, 1), "A", "Héllo  wörld 42");
        assert_eq!(msg.word_count(), 3);
        assert_eq!(msg.letter_count(), 8);
        assert_eq!(msg.char_count(), 15);
    }

    #[test]
    fn test_serde_roundtrip_defaults_flags() {
        let json = r#"{"timestamp":"2024-01-01T12:00:00","participant":"A","content":"hi"}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert!(!msg.is_system);
        assert!(!msg.is_media);
    }
}
