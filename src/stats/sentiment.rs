//! Sentiment aggregation over an injected scorer.
//!
//! The engine never scores text itself: callers pass a [`SentimentScorer`]
//! (the CLI uses [`LexiconScorer`]). Raw scores are divided by 10 and clamped
//! to `[-1, 1]`. A failing call is logged and counted as a 0.0 score; a
//! missing scorer yields a report with `available == false`.
//!
//! Messages longer than the configured character limit are treated as pasted
//! or forwarded text and never reach the scorer.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDateTime;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::ChatlensError;
use crate::index::ChatIndex;

/// Raw scores are divided by this before clamping.
pub const RAW_SCORE_SCALE: f64 = 10.0;

/// Scores within `±NEUTRAL_BAND` are neutral.
pub const NEUTRAL_BAND: f64 = 0.05;

/// Highest and lowest messages kept per participant.
pub const EXTREMES_PER_PARTICIPANT: usize = 5;

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("scorer failed: {0}")]
    Failed(String),

    #[error("scorer is not ready")]
    NotReady,
}

impl From<SentimentError> for ChatlensError {
    fn from(err: SentimentError) -> Self {
        ChatlensError::sentiment_unavailable(err.to_string())
    }
}

/// Scores one message. Returns an unbounded signed magnitude, typically
/// within about ±10.
pub trait SentimentScorer {
    fn score(&self, text: &str) -> Result<f64, SentimentError>;
}

impl<F> SentimentScorer for F
where
    F: Fn(&str) -> Result<f64, SentimentError>,
{
    fn score(&self, text: &str) -> Result<f64, SentimentError> {
        self(text)
    }
}

/// Maps a raw score into `[-1, 1]`. Non-finite input maps to 0.
pub fn normalize(raw: f64) -> f64 {
    if raw.is_finite() {
        (raw / RAW_SCORE_SCALE).clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentCategory {
    Positive,
    Negative,
    Neutral,
}

impl SentimentCategory {
    pub fn from_score(score: f64) -> Self {
        if score > NEUTRAL_BAND {
            SentimentCategory::Positive
        } else if score < -NEUTRAL_BAND {
            SentimentCategory::Negative
        } else {
            SentimentCategory::Neutral
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl CategoryCounts {
    fn add(&mut self, category: SentimentCategory) {
        match category {
            SentimentCategory::Positive => self.positive += 1,
            SentimentCategory::Negative => self.negative += 1,
            SentimentCategory::Neutral => self.neutral += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredMessage {
    pub timestamp: NaiveDateTime,
    pub participant: String,
    pub content: String,
    /// Normalized, `[-1, 1]`
    pub score: f64,
    pub category: SentimentCategory,
}

/// One `YYYY-MM` bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentBucket {
    pub period: String,
    pub messages: usize,
    pub average_score: f64,
    pub counts: CategoryCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticipantSentiment {
    pub name: String,
    pub messages: usize,
    pub average_score: f64,
    pub counts: CategoryCounts,
    /// Highest first, ties in input order
    pub most_positive: Vec<ScoredMessage>,
    /// Lowest first, ties in input order
    pub most_negative: Vec<ScoredMessage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SentimentReport {
    /// `false` when no scorer was supplied
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unavailable_reason: Option<String>,
    pub scored: usize,
    /// Excluded for exceeding the character limit
    pub skipped_long: usize,
    /// Scorer errors, each counted as a 0.0 score
    pub failures: usize,
    pub average_score: f64,
    pub counts: CategoryCounts,
    /// Ascending by period
    pub monthly: Vec<SentimentBucket>,
    /// Index participant order
    pub participants: Vec<ParticipantSentiment>,
}

impl SentimentReport {
    fn unavailable(reason: &ChatlensError) -> Self {
        Self {
            available: false,
            unavailable_reason: Some(reason.to_string()),
            ..Self::default()
        }
    }
}

fn mean(sum: f64, n: usize) -> f64 {
    if n == 0 { 0.0 } else { sum / n as f64 }
}

/// Scores every message up to `max_chars` in input order and aggregates the
/// results. Media placeholders are scored like any other text.
pub fn sentiment(
    index: &ChatIndex,
    scorer: Option<&dyn SentimentScorer>,
    max_chars: usize,
) -> SentimentReport {
    let Some(scorer) = scorer else {
        return SentimentReport::unavailable(&ChatlensError::sentiment_unavailable(
            "no scorer configured",
        ));
    };

    let mut report = SentimentReport {
        available: true,
        ..SentimentReport::default()
    };
    let mut scored: Vec<ScoredMessage> = Vec::new();

    for msg in index.messages() {
        if msg.char_count() > max_chars {
            report.skipped_long += 1;
            continue;
        }

        let score = match scorer.score(&msg.content) {
            Ok(raw) => normalize(raw),
            Err(err) => {
                report.failures += 1;
                let err = ChatlensError::from(err);
                warn!(participant = %msg.participant, error = %err, "sentiment scoring failed");
                0.0
            }
        };

        scored.push(ScoredMessage {
            timestamp: msg.timestamp,
            participant: msg.participant.clone(),
            content: msg.content.clone(),
            score,
            category: SentimentCategory::from_score(score),
        });
    }

    report.scored = scored.len();
    report.average_score = mean(scored.iter().map(|s| s.score).sum(), scored.len());
    for s in &scored {
        report.counts.add(s.category);
    }
    report.monthly = monthly_buckets(&scored);
    report.participants = per_participant(index, &scored);

    debug!(
        scored = report.scored,
        skipped_long = report.skipped_long,
        failures = report.failures,
        "sentiment aggregated"
    );

    report
}

fn monthly_buckets(scored: &[ScoredMessage]) -> Vec<SentimentBucket> {
    let mut buckets: BTreeMap<String, (f64, CategoryCounts)> = BTreeMap::new();
    for s in scored {
        let entry = buckets
            .entry(s.timestamp.format("%Y-%m").to_string())
            .or_default();
        entry.0 += s.score;
        entry.1.add(s.category);
    }

    buckets
        .into_iter()
        .map(|(period, (sum, counts))| SentimentBucket {
            period,
            messages: counts.total(),
            average_score: mean(sum, counts.total()),
            counts,
        })
        .collect()
}

fn per_participant(index: &ChatIndex, scored: &[ScoredMessage]) -> Vec<ParticipantSentiment> {
    let mut grouped: HashMap<&str, Vec<&ScoredMessage>> = HashMap::new();
    for s in scored {
        grouped.entry(s.participant.as_str()).or_default().push(s);
    }

    index
        .participants()
        .iter()
        .map(|record| {
            let own = grouped.remove(record.name.as_str()).unwrap_or_default();
            let mut counts = CategoryCounts::default();
            for s in &own {
                counts.add(s.category);
            }

            let mut highest = own.clone();
            highest.sort_by(|a, b| b.score.total_cmp(&a.score));
            let mut lowest = own.clone();
            lowest.sort_by(|a, b| a.score.total_cmp(&b.score));

            ParticipantSentiment {
                name: record.name.clone(),
                messages: own.len(),
                average_score: mean(own.iter().map(|s| s.score).sum(), own.len()),
                counts,
                most_positive: highest
                    .into_iter()
                    .take(EXTREMES_PER_PARTICIPANT)
                    .cloned()
                    .collect(),
                most_negative: lowest
                    .into_iter()
                    .take(EXTREMES_PER_PARTICIPANT)
                    .cloned()
                    .collect(),
            }
        })
        .collect()
}

// =============================================================================
// Built-in lexicon scorer
// =============================================================================

/// AFINN-style word weights, -5..=5.
const LEXICON: &[(&str, i32)] = &[
    ("love", 3),
    ("loved", 3),
    ("lovely", 3),
    ("like", 2),
    ("good", 3),
    ("great", 3),
    ("awesome", 4),
    ("amazing", 4),
    ("excellent", 3),
    ("fantastic", 4),
    ("wonderful", 4),
    ("happy", 3),
    ("glad", 3),
    ("nice", 3),
    ("cool", 1),
    ("fun", 4),
    ("funny", 4),
    ("thanks", 2),
    ("thank", 2),
    ("beautiful", 3),
    ("best", 3),
    ("perfect", 3),
    ("congrats", 2),
    ("congratulations", 2),
    ("yay", 2),
    ("haha", 3),
    ("lol", 3),
    ("miss", -2),
    ("bad", -3),
    ("worse", -3),
    ("worst", -3),
    ("terrible", -3),
    ("awful", -3),
    ("horrible", -3),
    ("hate", -3),
    ("sad", -2),
    ("angry", -3),
    ("annoyed", -2),
    ("annoying", -2),
    ("upset", -2),
    ("sorry", -1),
    ("tired", -2),
    ("sick", -2),
    ("boring", -3),
    ("stupid", -2),
    ("wrong", -2),
    ("problem", -2),
    ("fail", -2),
    ("failed", -2),
    ("cry", -1),
    ("ugh", -2),
    ("damn", -4),
    ("no", -1),
];

/// Sums the weights of known lowercase words.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    weights: HashMap<&'static str, i32>,
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self {
            weights: LEXICON.iter().copied().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> Result<f64, SentimentError> {
        let total: i32 = text
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .filter(|w| !w.is_empty())
            .map(|w| self.weights.get(w.to_lowercase().as_str()).copied().unwrap_or(0))
            .sum();
        Ok(f64::from(total))
    }
}
