//! Two-person relationship health score.
//!
//! Only defined for chats with exactly two participants. The overall score
//! weighs reciprocity (who sends how much), responsiveness and engagement
//! (words per message).

use serde::Serialize;

use crate::index::ChatIndex;

use super::RESPONSE_WINDOW_MS;

const RECIPROCITY_WEIGHT: f64 = 0.4;
const RESPONSE_WEIGHT: f64 = 0.3;
const ENGAGEMENT_WEIGHT: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthLabel {
    Excellent,
    Good,
    Fair,
    NeedsAttention,
}

impl HealthLabel {
    pub fn from_score(score: i64) -> Self {
        match score {
            s if s >= 80 => HealthLabel::Excellent,
            s if s >= 60 => HealthLabel::Good,
            s if s >= 40 => HealthLabel::Fair,
            _ => HealthLabel::NeedsAttention,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthScore {
    /// Weighted total, rounded
    pub overall: i64,
    pub label: HealthLabel,
    pub reciprocity: f64,
    pub response: f64,
    pub engagement: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RelationshipHealth {
    Scored(HealthScore),
    NotApplicable { participants: usize },
}

impl RelationshipHealth {
    pub fn score(&self) -> Option<&HealthScore> {
        match self {
            RelationshipHealth::Scored(score) => Some(score),
            RelationshipHealth::NotApplicable { .. } => None,
        }
    }

    pub fn is_applicable(&self) -> bool {
        matches!(self, RelationshipHealth::Scored(_))
    }
}

/// `100 - |first - total/2| / total * 100`, floored at 0.
pub fn reciprocity_score(first: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let deviation = (first as f64 - total as f64 / 2.0).abs();
    (100.0 - deviation / total as f64 * 100.0).max(0.0)
}

/// `100 - avg / 24h * 100`, floored at 0. No samples scores 0.
pub fn response_score(average_ms: Option<f64>) -> f64 {
    average_ms.map_or(0.0, |avg| {
        (100.0 - avg / RESPONSE_WINDOW_MS as f64 * 100.0).max(0.0)
    })
}

/// Ramp up to 5 words, plateau to 20, decay to zero at 50.
pub fn engagement_score(average_words: f64) -> f64 {
    if average_words <= 0.0 || average_words >= 50.0 {
        0.0
    } else if average_words < 5.0 {
        average_words / 5.0 * 100.0
    } else if average_words <= 20.0 {
        100.0
    } else {
        100.0 - (average_words - 20.0) / 30.0 * 100.0
    }
}

pub fn relationship_health(index: &ChatIndex) -> RelationshipHealth {
    let participants = index.participants();
    let [first, second] = participants else {
        return RelationshipHealth::NotApplicable {
            participants: participants.len(),
        };
    };

    let total = first.message_count + second.message_count;
    let reciprocity = reciprocity_score(first.message_count, total);
    let response = (response_score(first.average_response_ms())
        + response_score(second.average_response_ms()))
        / 2.0;
    let average_words = if total == 0 {
        0.0
    } else {
        (first.word_count + second.word_count) as f64 / total as f64
    };
    let engagement = engagement_score(average_words);

    let overall = (RECIPROCITY_WEIGHT * reciprocity
        + RESPONSE_WEIGHT * response
        + ENGAGEMENT_WEIGHT * engagement)
        .round() as i64;

    RelationshipHealth::Scored(HealthScore {
        overall,
        label: HealthLabel::from_score(overall),
        reciprocity,
        response,
        engagement,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::test_support::{at, msg, text};

    #[test]
    fn test_not_applicable_unless_two() {
        let one = ChatIndex::build(vec![msg("A", at(9, 0))]);
        assert_eq!(
            relationship_health(&one),
            RelationshipHealth::NotApplicable { participants: 1 }
        );
        let three = ChatIndex::build(vec![
            msg("A", at(9, 0)),
            msg("B", at(9, 1)),
            msg("C", at(9, 2)),
        ]);
        assert!(!relationship_health(&three).is_applicable());
        assert!(!relationship_health(&ChatIndex::build(Vec::new())).is_applicable());
    }

    #[test]
    fn test_component_formulas() {
        assert_eq!(reciprocity_score(5, 10), 100.0);
        assert_eq!(reciprocity_score(10, 10), 50.0);
        assert_eq!(response_score(Some(0.0)), 100.0);
        assert_eq!(response_score(Some(RESPONSE_WINDOW_MS as f64 * 2.0)), 0.0);
        assert_eq!(response_score(None), 0.0);
        assert_eq!(engagement_score(2.5), 50.0);
        assert_eq!(engagement_score(12.0), 100.0);
        assert_eq!(engagement_score(35.0), 50.0);
        assert_eq!(engagement_score(60.0), 0.0);
    }

    #[test]
    fn test_balanced_fast_chat_is_excellent() {
        let index = ChatIndex::build(vec![
            text("A", at(9, 0), "how was the trip yesterday evening"),
            text("B", at(9, 1), "it was great thanks for asking me"),
            text("A", at(9, 2), "glad to hear that my friend"),
            text("B", at(9, 3), "we should go there together soon"),
        ]);
        let health = relationship_health(&index);
        let score = health.score().unwrap();
        assert_eq!(score.reciprocity, 100.0);
        assert_eq!(score.engagement, 100.0);
        assert!(score.response > 99.0);
        assert_eq!(score.label, HealthLabel::Excellent);
    }

    #[test]
    fn test_participant_without_replies_scores_zero_response() {
        let index = ChatIndex::build(vec![
            text("A", at(9, 0), "are you there today"),
            text("B", at(9, 1), "yes I am here now"),
        ]);
        assert!(index.participant("A").unwrap().response_times.is_empty());

        let score = relationship_health(&index).score().cloned().unwrap();
        assert_eq!(score.response, response_score(Some(60_000.0)) / 2.0);
        assert!(score.response < 50.0);
    }

    #[test]
    fn test_labels() {
        assert_eq!(HealthLabel::from_score(80), HealthLabel::Excellent);
        assert_eq!(HealthLabel::from_score(79), HealthLabel::Good);
        assert_eq!(HealthLabel::from_score(40), HealthLabel::Fair);
        assert_eq!(HealthLabel::from_score(39), HealthLabel::NeedsAttention);
    }
}
