//! One serializable aggregate of every analyzer.
//!
//! # Example
//!
//! ```rust
//! use chatlens::ChatIndex;
//! use chatlens::config::AnalysisConfig;
//! use chatlens::report::ChatReport;
//! use chatlens::stats::LexiconScorer;
//!
//! let index = ChatIndex::from_transcript(
//!     "[1/2/2024, 10:00:00] Alice: Hello, great news!\n[1/2/2024, 10:05:00] Bob: Hi Alice",
//! )?;
//! let report = ChatReport::build(&index, &AnalysisConfig::new(), Some(&LexiconScorer::new()));
//!
//! assert_eq!(report.participants.len(), 2);
//! assert!(report.sentiment.available);
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```

use serde::Serialize;
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::frequency::Count;
use crate::index::{ChatIndex, ChatMetadata, ParticipantSummary};
use crate::lexical::emoji::emoji_frequency;
use crate::lexical::{
    LaughReport, ParticipantWords, UniqueVocabulary, global_words, unique_vocabulary,
    words_by_participant,
};
use crate::stats::sentiment::{SentimentReport, SentimentScorer, sentiment};
use crate::stats::{
    ActivityReport, ActivityTrend, ConversationLengthReport, InitiatorReport, LengthBucket,
    PeakTime, QuestionBucket, RelationshipHealth, ResponseTimeReport, StreakReport,
};

#[derive(Debug, Clone, Serialize)]
pub struct ChatReport {
    pub metadata: ChatMetadata,
    pub participants: Vec<ParticipantSummary>,
    pub response_times: ResponseTimeReport,
    pub conversations: ConversationLengthReport,
    pub initiators: InitiatorReport,
    pub activity: ActivityReport,
    pub peak_time: PeakTime,
    pub activity_trend: ActivityTrend,
    pub streaks: StreakReport,
    pub question_trend: Vec<QuestionBucket>,
    pub length_trend: Vec<LengthBucket>,
    pub relationship_health: RelationshipHealth,
    pub sentiment: SentimentReport,
    pub words: Vec<ParticipantWords>,
    pub global_words: Vec<Count>,
    pub emojis: Vec<Count>,
    /// Only for two-person chats
    pub unique_vocabulary: Option<UniqueVocabulary>,
    pub laughs: LaughReport,
}

impl ChatReport {
    /// Runs every analyzer over `index`.
    ///
    /// Sentiment is reported as unavailable when `scorer` is `None`; nothing
    /// else depends on it.
    pub fn build(
        index: &ChatIndex,
        config: &AnalysisConfig,
        scorer: Option<&dyn SentimentScorer>,
    ) -> Self {
        let filter = config.filter_stop_words;

        let unique_vocabulary = match index.participant_names().as_slice() {
            [first, second] => {
                unique_vocabulary(index, first, second, filter, config.unique_words_limit).ok()
            }
            _ => None,
        };

        let report = Self {
            metadata: index.metadata().clone(),
            participants: index.summaries().to_vec(),
            response_times: (*index.response_times()).clone(),
            conversations: (*index.conversation_lengths()).clone(),
            initiators: (*index.initiator_patterns()).clone(),
            activity: (*index.activity()).clone(),
            peak_time: *index.peak_time(),
            activity_trend: *index.activity_trend(),
            streaks: (*index.streaks(config.today())).clone(),
            question_trend: index.question_trend().to_vec(),
            length_trend: index.length_trend(config.length_granularity).to_vec(),
            relationship_health: (*index.relationship_health()).clone(),
            sentiment: sentiment(index, scorer, config.sentiment_max_chars),
            words: words_by_participant(index, filter, config.top_words),
            global_words: global_words(index, filter, config.global_top_words),
            emojis: emoji_frequency(index.messages()).top(config.global_top_words),
            unique_vocabulary,
            laughs: (*index.laughs()).clone(),
        };

        debug!(
            participants = report.participants.len(),
            conversations = report.conversations.total_conversations,
            "built chat report"
        );

        report
    }

    pub fn participant(&self, name: &str) -> Option<&ParticipantSummary> {
        self.participants.iter().find(|p| p.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::test_support::{day, text};
    use chrono::NaiveDate;

    fn config() -> AnalysisConfig {
        AnalysisConfig::new().with_reference_date(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap())
    }

    #[test]
    fn test_two_person_report() {
        let index = ChatIndex::build(vec![
            text("Alice", day(2024, 1, 1, 9, 0), "pizza tonight? 🍕"),
            text("Bob", day(2024, 1, 1, 9, 10), "sure, sushi tomorrow haha"),
            text("Alice", day(2024, 1, 2, 20, 0), "pizza again"),
        ]);
        let report = ChatReport::build(&index, &config(), None);

        assert_eq!(report.metadata.total_messages, 3);
        assert_eq!(report.participant("Bob").unwrap().messages, 1);
        assert!(report.relationship_health.is_applicable());
        assert!(!report.sentiment.available);
        assert_eq!(report.streaks.current, 2);
        assert_eq!(report.emojis[0].key, "🍕");
        assert_eq!(report.global_words[0], Count { key: "pizza".into(), count: 2 });
        let unique = report.unique_vocabulary.unwrap();
        assert_eq!(unique.second_only, ["sure", "sushi", "tomorrow", "haha"]);
        assert_eq!(report.laughs.total_laughs, 1);
    }

    #[test]
    fn test_group_report_has_no_pair_metrics() {
        let index = ChatIndex::build(vec![
            text("A", day(2024, 1, 1, 9, 0), "one"),
            text("B", day(2024, 1, 1, 9, 1), "two"),
            text("C", day(2024, 1, 1, 9, 2), "three"),
        ]);
        let report = ChatReport::build(&index, &config(), None);
        assert!(report.unique_vocabulary.is_none());
        assert!(!report.relationship_health.is_applicable());
    }

    #[test]
    fn test_empty_index_report() {
        let report = ChatReport::build(&ChatIndex::build(Vec::new()), &config(), None);
        assert!(report.participants.is_empty());
        assert_eq!(report.conversations.total_conversations, 0);
        assert_eq!(report.streaks.longest, 0);
    }
}
