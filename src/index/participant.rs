//! Per-participant cumulative counters.

use serde::Serialize;

use crate::Message;
use crate::frequency::{Count, FrequencyTable};
use crate::lexical::emoji::emojis;

/// Minimum alphabetic characters before a message can count as all-caps.
pub const ALL_CAPS_MIN_LETTERS: usize = 5;

/// Uppercase share above which a message counts as all-caps.
pub const ALL_CAPS_RATIO: f64 = 0.7;

/// Counters for one participant, owned by the [`ChatIndex`](super::ChatIndex).
///
/// Created the first time a participant's message is indexed and never
/// removed. Sequences are in timeline (timestamp) order.
#[derive(Debug, Clone, Default)]
pub struct ParticipantRecord {
    pub name: String,
    pub message_count: usize,
    pub word_count: usize,
    pub letter_count: usize,
    pub emoji_count: usize,
    pub media_count: usize,
    /// Words per message
    pub word_lengths: Vec<usize>,
    /// Characters per message
    pub char_lengths: Vec<usize>,
    pub emojis: FrequencyTable,
    /// Response latencies in milliseconds
    pub response_times: Vec<i64>,
    pub conversations_started: usize,
    pub question_count: usize,
    pub exclamation_count: usize,
    pub all_caps_count: usize,
    pub burst_count: usize,
}

impl ParticipantRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Folds one message into the counters.
    pub fn record(&mut self, msg: &Message) {
        let words = msg.word_count();
        let letters = msg.letter_count();

        self.message_count += 1;
        self.word_count += words;
        self.letter_count += letters;
        self.word_lengths.push(words);
        self.char_lengths.push(msg.char_count());

        for emoji in emojis(&msg.content) {
            self.emojis.add(emoji);
            self.emoji_count += 1;
        }

        if msg.is_media {
            self.media_count += 1;
        }
        if msg.content.contains('?') {
            self.question_count += 1;
        }
        if msg.content.contains('!') {
            self.exclamation_count += 1;
        }
        if is_all_caps(&msg.content) {
            self.all_caps_count += 1;
        }
    }

    pub fn average_words(&self) -> f64 {
        ratio(self.word_count, self.message_count)
    }

    pub fn average_letters(&self) -> f64 {
        ratio(self.letter_count, self.message_count)
    }

    pub fn average_chars(&self) -> f64 {
        ratio(self.char_lengths.iter().sum(), self.message_count)
    }

    /// Mean response latency in ms, `None` without samples.
    pub fn average_response_ms(&self) -> Option<f64> {
        if self.response_times.is_empty() {
            return None;
        }
        let sum: i64 = self.response_times.iter().sum();
        Some(sum as f64 / self.response_times.len() as f64)
    }

    /// Most used emojis, ties in first-seen order.
    pub fn top_emojis(&self, n: usize) -> Vec<Count> {
        self.emojis.top(n)
    }
}

/// `true` if the text has at least [`ALL_CAPS_MIN_LETTERS`] alphabetic
/// characters and more than [`ALL_CAPS_RATIO`] of them are uppercase.
pub fn is_all_caps(text: &str) -> bool {
    let (letters, upper) = text
        .chars()
        .filter(|c| c.is_alphabetic())
        .fold((0usize, 0usize), |(l, u), c| {
            (l + 1, u + usize::from(c.is_uppercase()))
        });
    letters >= ALL_CAPS_MIN_LETTERS && upper as f64 / letters as f64 > ALL_CAPS_RATIO
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Serializable digest of a [`ParticipantRecord`].
#[derive(Debug, Clone, Serialize)]
pub struct ParticipantSummary {
    pub name: String,
    pub messages: usize,
    /// Share of all indexed messages, 0-100
    pub message_share: f64,
    pub words: usize,
    pub letters: usize,
    pub emojis: usize,
    pub media: usize,
    pub average_words: f64,
    pub average_chars: f64,
    pub longest_message_words: usize,
    pub questions: usize,
    pub exclamations: usize,
    pub all_caps: usize,
    pub bursts: usize,
    pub conversations_started: usize,
    pub top_emojis: Vec<Count>,
}

impl ParticipantSummary {
    pub fn from_record(record: &ParticipantRecord, total_messages: usize) -> Self {
        Self {
            name: record.name.clone(),
            messages: record.message_count,
            message_share: ratio(record.message_count, total_messages) * 100.0,
            words: record.word_count,
            letters: record.letter_count,
            emojis: record.emoji_count,
            media: record.media_count,
            average_words: record.average_words(),
            average_chars: record.average_chars(),
            longest_message_words: record.word_lengths.iter().copied().max().unwrap_or(0),
            questions: record.question_count,
            exclamations: record.exclamation_count,
            all_caps: record.all_caps_count,
            bursts: record.burst_count,
            conversations_started: record.conversations_started,
            top_emojis: record.top_emojis(5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn msg(content: &str) -> Message {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        Message::new(ts, "Alice", content)
    }

    #[test]
    fn test_all_caps_threshold() {
        assert!(is_all_caps("HELLO"));
        assert!(is_all_caps("WHAT is THIS")); // 8 of 10 upper
        assert!(!is_all_caps("HEY")); // too short
        assert!(!is_all_caps("HELlo")); // 60%
        assert!(!is_all_caps("HELLO world")); // 50%
        assert!(is_all_caps("ПРИВЕТ"));
    }

    #[test]
    fn test_record_counters() {
        let mut record = ParticipantRecord::new("Alice");
        record.record(&msg("Hi there? 😂😂"));
        record.record(&msg("WOW THAT IS GREAT!"));
        record.record(&msg("<Media omitted>").with_media(true));

        assert_eq!(record.message_count, 3);
        assert_eq!(record.word_lengths, vec![3, 4, 2]);
        assert_eq!(record.question_count, 1);
        assert_eq!(record.exclamation_count, 1);
        assert_eq!(record.all_caps_count, 1);
        assert_eq!(record.media_count, 1);
        assert_eq!(record.emoji_count, 2);
        assert_eq!(record.emojis.get("😂"), 2);
    }

    #[test]
    fn test_average_response_none_without_samples() {
        let mut record = ParticipantRecord::new("Bob");
        assert!(record.average_response_ms().is_none());
        record.response_times.extend([1000, 3000]);
        assert_eq!(record.average_response_ms(), Some(2000.0));
    }

    #[test]
    fn test_summary_share() {
        let mut record = ParticipantRecord::new("Alice");
        record.record(&msg("one"));
        let summary = ParticipantSummary::from_record(&record, 4);
        assert!((summary.message_share - 25.0).abs() < f64::EPSILON);
    }
}
