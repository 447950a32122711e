//! Conversation segmentation: starters, turns, bursts and initiators.
//!
//! A conversation boundary is a gap strictly greater than
//! [`CONVERSATION_GAP_MS`](super::CONVERSATION_GAP_MS) between consecutive
//! messages. Starter detection, conversation lengths and initiator patterns
//! all derive from [`conversation_spans`], so a given gap is classified the
//! same way everywhere.

use std::ops::Range;

use serde::Serialize;

use crate::Message;
use crate::index::ChatIndex;

use super::is_conversation_boundary;

/// Conversations with at most this many turns are short.
pub const SHORT_MAX_TURNS: usize = 5;
/// Conversations with at most this many turns (and more than short) are medium.
pub const MEDIUM_MAX_TURNS: usize = 15;

/// Splits a sorted timeline into conversations.
pub fn conversation_spans(timeline: &[&Message]) -> Vec<Range<usize>> {
    if timeline.is_empty() {
        return Vec::new();
    }

    let mut spans = Vec::new();
    let mut start = 0;
    for i in 1..timeline.len() {
        if is_conversation_boundary(timeline[i - 1], timeline[i]) {
            spans.push(start..i);
            start = i;
        }
    }
    spans.push(start..timeline.len());
    spans
}

/// Timeline positions of conversation-starting messages.
///
/// The first message is always a starter.
pub fn starter_positions(timeline: &[&Message]) -> Vec<usize> {
    conversation_spans(timeline)
        .into_iter()
        .map(|span| span.start)
        .collect()
}

/// Timeline positions of messages whose predecessor has the same author.
pub fn burst_positions(timeline: &[&Message]) -> Vec<usize> {
    (1..timeline.len())
        .filter(|&i| timeline[i].participant == timeline[i - 1].participant)
        .collect()
}

/// Number of speaker runs in a conversation.
pub fn count_turns(conversation: &[&Message]) -> usize {
    match conversation.first() {
        None => 0,
        Some(_) => {
            1 + conversation
                .windows(2)
                .filter(|pair| pair[0].participant != pair[1].participant)
                .count()
        }
    }
}

/// Turn-count distribution over all conversations.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversationLengthReport {
    pub total_conversations: usize,
    /// At most 5 turns
    pub short: usize,
    /// 6 to 15 turns
    pub medium: usize,
    /// 16 turns or more
    pub long: usize,
    pub average_turns: f64,
    pub max_turns: usize,
    pub average_messages: f64,
}

pub fn conversation_lengths(index: &ChatIndex) -> ConversationLengthReport {
    let timeline = index.sorted_messages();
    let spans = conversation_spans(&timeline);
    if spans.is_empty() {
        return ConversationLengthReport::default();
    }

    let mut report = ConversationLengthReport {
        total_conversations: spans.len(),
        ..ConversationLengthReport::default()
    };
    let mut turn_sum = 0usize;

    for span in &spans {
        let turns = count_turns(&timeline[span.clone()]);
        turn_sum += turns;
        report.max_turns = report.max_turns.max(turns);
        match turns {
            0..=SHORT_MAX_TURNS => report.short += 1,
            t if t <= MEDIUM_MAX_TURNS => report.medium += 1,
            _ => report.long += 1,
        }
    }

    report.average_turns = turn_sum as f64 / spans.len() as f64;
    report.average_messages = timeline.len() as f64 / spans.len() as f64;
    report
}

/// How often one participant opened a conversation.
#[derive(Debug, Clone, Serialize)]
pub struct InitiatorShare {
    pub name: String,
    pub initiated: usize,
    /// Share of all conversations, 0-100
    pub percentage: f64,
}

/// Who opens conversations.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InitiatorReport {
    pub total_conversations: usize,
    /// Participant order as in the index
    pub participants: Vec<InitiatorShare>,
}

pub fn initiator_patterns(index: &ChatIndex) -> InitiatorReport {
    let timeline = index.sorted_messages();
    let starters = starter_positions(&timeline);
    let total = starters.len();

    let participants = index
        .participants()
        .iter()
        .map(|record| {
            let initiated = starters
                .iter()
                .filter(|&&pos| timeline[pos].participant == record.name)
                .count();
            InitiatorShare {
                name: record.name.clone(),
                initiated,
                percentage: if total == 0 {
                    0.0
                } else {
                    initiated as f64 / total as f64 * 100.0
                },
            }
        })
        .collect();

    InitiatorReport {
        total_conversations: total,
        participants,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::test_support::{at, msg};
    use chrono::TimeDelta;

    #[test]
    fn test_exactly_two_hours_is_not_a_boundary() {
        let t0 = at(8, 0);
        let messages = [
            msg("Alice", t0),
            msg("Bob", t0 + TimeDelta::hours(2)),
            msg("Alice", t0 + TimeDelta::hours(4) + TimeDelta::seconds(1)),
        ];
        let timeline: Vec<&Message> = messages.iter().collect();
        assert_eq!(conversation_spans(&timeline), vec![0..2, 2..3]);
        assert_eq!(starter_positions(&timeline), vec![0, 2]);
    }

    #[test]
    fn test_turns() {
        let messages = [
            msg("Alice", at(9, 0)),
            msg("Alice", at(9, 1)),
            msg("Bob", at(9, 2)),
            msg("Alice", at(9, 3)),
        ];
        let timeline: Vec<&Message> = messages.iter().collect();
        assert_eq!(count_turns(&timeline), 3);
        assert_eq!(count_turns(&[]), 0);
    }

    #[test]
    fn test_bursts_cross_conversation_boundaries() {
        let messages = [
            msg("Alice", at(1, 0)),
            msg("Alice", at(9, 0)),
            msg("Bob", at(9, 1)),
            msg("Bob", at(9, 2)),
            msg("Bob", at(9, 3)),
        ];
        let timeline: Vec<&Message> = messages.iter().collect();
        assert_eq!(burst_positions(&timeline), vec![1, 3, 4]);
    }
}
