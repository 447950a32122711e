//! Derived analyzers over a [`ChatIndex`].
//!
//! Every analyzer is a pure function of the index. The `ChatIndex` methods
//! defined here memoize them in the index cache, so repeated report builds
//! over one index compute each result once.
//!
//! | Analyzer | Module | Cached accessor |
//! |----------|--------|-----------------|
//! | Response times | [`response`] | [`ChatIndex::response_times`] |
//! | Conversation lengths | [`conversations`] | [`ChatIndex::conversation_lengths`] |
//! | Initiators | [`conversations`] | [`ChatIndex::initiator_patterns`] |
//! | Activity histograms | [`temporal`] | [`ChatIndex::activity`] |
//! | Peak time | [`temporal`] | [`ChatIndex::peak_time`] |
//! | Activity trend | [`temporal`] | [`ChatIndex::activity_trend`] |
//! | Question / length trends | [`temporal`] | [`ChatIndex::question_trend`], [`ChatIndex::length_trend`] |
//! | Streaks | [`streaks`] | [`ChatIndex::streaks`] |
//! | Relationship health | [`health`] | [`ChatIndex::relationship_health`] |
//! | Sentiment | [`sentiment`] | not cached, depends on the scorer |

pub mod conversations;
pub mod health;
pub mod response;
pub mod sentiment;
pub mod streaks;
pub mod temporal;

use std::rc::Rc;

use chrono::NaiveDate;

use crate::Message;
use crate::config::Granularity;
use crate::index::{ChatIndex, ParticipantSummary};

pub use conversations::{ConversationLengthReport, InitiatorReport, InitiatorShare};
pub use health::{HealthLabel, HealthScore, RelationshipHealth};
pub use response::{ResponseTimeReport, ResponseTimeStats};
pub use sentiment::{LexiconScorer, SentimentError, SentimentReport, SentimentScorer};
pub use streaks::{Streak, StreakReport};
pub use temporal::{ActivityReport, ActivityTrend, LengthBucket, PeakTime, QuestionBucket, TrendDirection};

/// Gaps strictly longer than this start a new conversation.
pub const CONVERSATION_GAP_MS: i64 = 2 * 60 * 60 * 1000;

/// Replies must arrive strictly within this window to count.
pub const RESPONSE_WINDOW_MS: i64 = 24 * 60 * 60 * 1000;

/// Milliseconds from `a` to `b`.
pub fn gap_ms(a: &Message, b: &Message) -> i64 {
    (b.timestamp - a.timestamp).num_milliseconds()
}

/// Shared by starter detection, conversation lengths and initiators.
pub fn is_conversation_boundary(prev: &Message, next: &Message) -> bool {
    gap_ms(prev, next) > CONVERSATION_GAP_MS
}

impl ChatIndex {
    pub fn response_times(&self) -> Rc<ResponseTimeReport> {
        self.cache()
            .get_or_compute("response_times", || response::response_report(self))
    }

    pub fn conversation_lengths(&self) -> Rc<ConversationLengthReport> {
        self.cache()
            .get_or_compute("conversation_lengths", || conversations::conversation_lengths(self))
    }

    pub fn initiator_patterns(&self) -> Rc<InitiatorReport> {
        self.cache()
            .get_or_compute("initiator_patterns", || conversations::initiator_patterns(self))
    }

    pub fn activity(&self) -> Rc<ActivityReport> {
        self.cache().get_or_compute("activity", || temporal::activity(self))
    }

    pub fn peak_time(&self) -> Rc<PeakTime> {
        self.cache().get_or_compute("peak_time", || temporal::peak_time(self))
    }

    pub fn activity_trend(&self) -> Rc<ActivityTrend> {
        self.cache()
            .get_or_compute("activity_trend", || temporal::activity_trend(self))
    }

    pub fn question_trend(&self) -> Rc<Vec<QuestionBucket>> {
        self.cache()
            .get_or_compute("question_trend", || temporal::question_trend(self))
    }

    pub fn length_trend(&self, granularity: Granularity) -> Rc<Vec<LengthBucket>> {
        let key = match granularity {
            Granularity::Month => "length_trend:month",
            Granularity::Week => "length_trend:week",
        };
        self.cache()
            .get_or_compute(key, || temporal::length_trend(self, granularity))
    }

    /// Streaks relative to `today`; each reference date is cached separately.
    pub fn streaks(&self, today: NaiveDate) -> Rc<StreakReport> {
        let key = format!("streaks:{today}");
        self.cache().get_or_compute(&key, || streaks::streaks(self, today))
    }

    pub fn relationship_health(&self) -> Rc<RelationshipHealth> {
        self.cache()
            .get_or_compute("relationship_health", || health::relationship_health(self))
    }

    /// One summary per participant, first-appearance order.
    pub fn summaries(&self) -> Rc<Vec<ParticipantSummary>> {
        self.cache().get_or_compute("summaries", || {
            let total = self.metadata().total_messages;
            self.participants()
                .iter()
                .map(|record| ParticipantSummary::from_record(record, total))
                .collect()
        })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::Message;

    /// 2024-01-01 at `hour:minute`.
    pub fn at(hour: u32, minute: u32) -> NaiveDateTime {
        day(2024, 1, 1, hour, minute)
    }

    pub fn day(year: i32, month: u32, d: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, d)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    pub fn msg(name: &str, timestamp: NaiveDateTime) -> Message {
        Message::new(timestamp, name, "hello")
    }

    pub fn text(name: &str, timestamp: NaiveDateTime, content: &str) -> Message {
        Message::new(timestamp, name, content)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{at, msg};
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn test_boundary_is_strictly_above_two_hours() {
        let a = msg("A", at(8, 0));
        assert!(!is_conversation_boundary(&a, &msg("B", at(10, 0))));
        let later = msg("B", at(10, 0) + TimeDelta::milliseconds(1));
        assert!(is_conversation_boundary(&a, &later));
    }

    #[test]
    fn test_cached_accessors_reuse_results() {
        let index = ChatIndex::build(vec![msg("A", at(9, 0)), msg("B", at(9, 5))]);
        let first = index.response_times();
        let second = index.response_times();
        assert!(Rc::ptr_eq(&first, &second));
        assert!(index.cache().contains("response_times"));
        assert_eq!(index.summaries().len(), 2);
    }

    #[test]
    fn test_length_trend_keys_by_granularity() {
        let index = ChatIndex::build(vec![msg("A", at(9, 0))]);
        index.length_trend(Granularity::Month);
        index.length_trend(Granularity::Week);
        assert!(index.cache().contains("length_trend:month"));
        assert!(index.cache().contains("length_trend:week"));
    }
}
