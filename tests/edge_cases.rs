//! Edge case tests for chatlens
//!
//! Boundary conditions of the tokenizer, the thresholds shared by the
//! analyzers, and degenerate inputs.

use chatlens::config::AnalysisConfig;
use chatlens::prelude::*;
use chatlens::stats::sentiment::{SentimentError, sentiment};
use chatlens::stats::{CONVERSATION_GAP_MS, RESPONSE_WINDOW_MS, TrendDirection};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 10)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

fn line(ts: NaiveDateTime, name: &str, text: &str) -> String {
    format!("[{}] {}: {}", ts.format("%-d/%-m/%Y, %H:%M:%S"), name, text)
}

// =========================================================================
// Tokenizer
// =========================================================================

#[test]
fn test_byte_order_mark_and_direction_marks() {
    let input = "\u{FEFF}[1/2/2024, 10:00:00] Alice: hi\n\u{200E}[1/2/2024, 10:01:00] Bob: hey";
    let messages = parse_transcript(input).unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].participant, "Bob");
}

#[test]
fn test_windows_line_endings() {
    let input = "[1/2/2024, 10:00:00] Alice: hi\r\nsecond line\r\n[1/2/2024, 10:01:00] Bob: hey\r\n";
    let messages = parse_transcript(input).unwrap();
    assert_eq!(messages[0].content, "hi\nsecond line");
    assert_eq!(messages[1].content, "hey");
}

#[test]
fn test_blank_lines_inside_message_are_skipped() {
    let input = "[1/2/2024, 10:00:00] Alice: first\n\n\nstill first";
    let messages = parse_transcript(input).unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].content, "first\nstill first");
}

#[test]
fn test_media_flag_set_by_continuation() {
    let input = "[1/2/2024, 10:00:00] Alice: look\nIMG-001.jpg (file attached)";
    let messages = parse_transcript(input).unwrap();
    assert!(messages[0].is_media);
}

#[test]
fn test_colon_in_content_stays_in_content() {
    let messages = parse_transcript("[1/2/2024, 10:00:00] Alice: time: 10:30").unwrap();
    assert_eq!(messages[0].participant, "Alice");
    assert_eq!(messages[0].content, "time: 10:30");
}

#[test]
fn test_only_system_messages() {
    let input = "[1/2/2024, 10:00:00] Alice: Missed voice call\n[1/2/2024, 10:01:00] Bob: This message was deleted";
    let messages = parse_transcript(input).unwrap();
    assert!(messages.is_empty());

    let index = ChatIndex::build(messages);
    assert!(index.is_empty());
    let report = ChatReport::build(&index, &AnalysisConfig::new(), Some(&LexiconScorer::new()));
    assert_eq!(report.peak_time.confidence, 0.0);
    assert!(!report.activity_trend.computable);
    assert_eq!(report.sentiment.scored, 0);
}

#[test]
fn test_unicode_participants_are_exact() {
    let input = "[1/2/2024, 10:00:00] Иван: Привет\n[1/2/2024, 10:01:00] иван: привет";
    let index = ChatIndex::from_transcript(input).unwrap();
    assert_eq!(index.participant_names(), ["Иван", "иван"]);
}

// =========================================================================
// Thresholds
// =========================================================================

#[test]
fn test_response_window_is_exclusive() {
    let t0 = at(0, 0, 0);
    let exactly = t0 + TimeDelta::milliseconds(RESPONSE_WINDOW_MS);
    let input = format!(
        "{}\n{}",
        line(t0, "Alice", "ping"),
        line(exactly, "Bob", "pong")
    );
    let index = ChatIndex::from_transcript(&input).unwrap();
    assert!(index.participant("Bob").unwrap().response_times.is_empty());

    let just_under = exactly - TimeDelta::seconds(1);
    let input = format!(
        "{}\n{}",
        line(t0, "Alice", "ping"),
        line(just_under, "Bob", "pong")
    );
    let index = ChatIndex::from_transcript(&input).unwrap();
    assert_eq!(
        index.participant("Bob").unwrap().response_times,
        vec![RESPONSE_WINDOW_MS - 1000]
    );
}

#[test]
fn test_two_hour_gap_is_same_conversation_everywhere() {
    let t0 = at(8, 0, 0);
    let gap = TimeDelta::milliseconds(CONVERSATION_GAP_MS);
    let input = [
        line(t0, "Alice", "one"),
        line(t0 + gap, "Bob", "two"),
        line(t0 + gap + gap + TimeDelta::seconds(1), "Alice", "three"),
    ]
    .join("\n");
    let index = ChatIndex::from_transcript(&input).unwrap();

    let starters: usize = index.participants().iter().map(|p| p.conversations_started).sum();
    assert_eq!(starters, 2);
    assert_eq!(index.conversation_lengths().total_conversations, 2);
    assert_eq!(index.initiator_patterns().total_conversations, 2);
}

#[test]
fn test_burst_spans_conversations() {
    let input = [
        line(at(1, 0, 0), "Alice", "late night"),
        line(at(9, 0, 0), "Alice", "morning"),
        line(at(9, 0, 30), "Alice", "anyone?"),
    ]
    .join("\n");
    let index = ChatIndex::from_transcript(&input).unwrap();
    assert_eq!(index.participant("Alice").unwrap().burst_count, 2);
}

#[test]
fn test_all_caps_threshold() {
    let input = [
        line(at(9, 0, 0), "Alice", "HELLO"),
        line(at(9, 1, 0), "Alice", "HEY"),
        line(at(9, 2, 0), "Alice", "HELLo there"),
    ]
    .join("\n");
    let index = ChatIndex::from_transcript(&input).unwrap();
    // "HEY" has too few letters, "HELLo there" is 4/10 uppercase
    assert_eq!(index.participant("Alice").unwrap().all_caps_count, 1);
}

// =========================================================================
// Degenerate analyzers
// =========================================================================

#[test]
fn test_single_message_chat() {
    let index = ChatIndex::from_transcript("[1/2/2024, 10:00:00] Alice: alone").unwrap();
    let trend = index.activity_trend();
    assert!(!trend.computable);
    assert_eq!(trend.direction, TrendDirection::Stable);
    assert_eq!(index.conversation_lengths().total_conversations, 1);
    assert!(!index.relationship_health().is_applicable());
    assert_eq!(index.response_times().overall_average_ms, 0.0);
}

#[test]
fn test_sentiment_scorer_always_failing() {
    let index = ChatIndex::from_transcript("[1/2/2024, 10:00:00] Alice: hi\n[1/2/2024, 10:01:00] Bob: yo")
        .unwrap();
    let broken = |_: &str| -> std::result::Result<f64, SentimentError> { Err(SentimentError::NotReady) };
    let report = sentiment(&index, Some(&broken), 200);
    assert!(report.available);
    assert_eq!(report.failures, 2);
    assert_eq!(report.average_score, 0.0);
    assert_eq!(report.counts.neutral, 2);
}

#[test]
fn test_long_message_excluded_from_sentiment() {
    let pasted = "great ".repeat(40);
    let input = format!(
        "[1/2/2024, 10:00:00] Alice: {}\n[1/2/2024, 10:01:00] Bob: terrible",
        pasted.trim_end()
    );
    let index = ChatIndex::from_transcript(&input).unwrap();
    let report = sentiment(&index, Some(&LexiconScorer::new()), 200);
    assert_eq!(report.skipped_long, 1);
    assert_eq!(report.scored, 1);
    assert_eq!(report.counts.positive, 0);
    assert_eq!(report.counts.negative, 1);
    assert!(report.participants[0].most_positive.is_empty());
}

#[test]
fn test_stop_word_toggle() {
    let index = ChatIndex::from_transcript("[1/2/2024, 10:00:00] Alice: the cat and the hat").unwrap();
    let with = ChatReport::build(&index, &AnalysisConfig::new(), None);
    let without = ChatReport::build(&index, &AnalysisConfig::new().with_stop_words(false), None);
    assert_eq!(with.global_words.len(), 2);
    assert_eq!(without.global_words[0].key, "the");
    assert_eq!(without.global_words[0].count, 2);
}
