//! Response-time attribution.
//!
//! For every message, the first later message from a *different*
//! participant is its reply. If that reply came within
//! [`RESPONSE_WINDOW_MS`](super::RESPONSE_WINDOW_MS) the latency is a
//! sample for the replier. Participants only reachable after intervening
//! same-author messages are never credited.

use serde::Serialize;

use crate::Message;
use crate::index::ChatIndex;

use super::{RESPONSE_WINDOW_MS, gap_ms};

/// One attributed latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseSample {
    /// Timeline position of the replying message
    pub responder: usize,
    /// Latency in milliseconds, always `< RESPONSE_WINDOW_MS`
    pub millis: i64,
}

/// Attributes response samples over a timestamp-sorted timeline.
pub fn attribute(timeline: &[&Message]) -> Vec<ResponseSample> {
    let n = timeline.len();
    if n < 2 {
        return Vec::new();
    }

    // next_other[i]: first j > i whose author differs from timeline[i]'s
    let mut next_other: Vec<Option<usize>> = vec![None; n];
    for i in (0..n - 1).rev() {
        next_other[i] = if timeline[i + 1].participant == timeline[i].participant {
            next_other[i + 1]
        } else {
            Some(i + 1)
        };
    }

    next_other
        .iter()
        .enumerate()
        .filter_map(|(i, next)| {
            let j = (*next)?;
            let millis = gap_ms(timeline[i], timeline[j]);
            (millis < RESPONSE_WINDOW_MS).then_some(ResponseSample {
                responder: j,
                millis,
            })
        })
        .collect()
}

/// Latency statistics for one participant.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseTimeStats {
    pub name: String,
    pub samples: usize,
    pub average_ms: f64,
    pub median_ms: f64,
    pub fastest_ms: i64,
    pub slowest_ms: i64,
}

/// Latency statistics for every participant.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseTimeReport {
    pub participants: Vec<ResponseTimeStats>,
    /// Mean over all samples of all participants, 0 without samples
    pub overall_average_ms: f64,
}

impl ResponseTimeReport {
    pub fn get(&self, name: &str) -> Option<&ResponseTimeStats> {
        self.participants.iter().find(|p| p.name == name)
    }
}

/// Summarizes the samples stored on each participant record.
pub fn response_report(index: &ChatIndex) -> ResponseTimeReport {
    let mut all: Vec<i64> = Vec::new();

    let participants = index
        .participants()
        .iter()
        .map(|record| {
            let mut sorted = record.response_times.clone();
            sorted.sort_unstable();
            all.extend_from_slice(&sorted);

            ResponseTimeStats {
                name: record.name.clone(),
                samples: sorted.len(),
                average_ms: record.average_response_ms().unwrap_or(0.0),
                median_ms: median(&sorted),
                fastest_ms: sorted.first().copied().unwrap_or(0),
                slowest_ms: sorted.last().copied().unwrap_or(0),
            }
        })
        .collect();

    let overall_average_ms = if all.is_empty() {
        0.0
    } else {
        all.iter().sum::<i64>() as f64 / all.len() as f64
    };

    ResponseTimeReport {
        participants,
        overall_average_ms,
    }
}

fn median(sorted: &[i64]) -> f64 {
    match sorted.len() {
        0 => 0.0,
        n if n % 2 == 1 => sorted[n / 2] as f64,
        n => (sorted[n / 2 - 1] + sorted[n / 2]) as f64 / 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::test_support::{at, msg};

    #[test]
    fn test_first_other_participant_only() {
        let messages = [
            msg("Alice", at(10, 0)),
            msg("Alice", at(10, 1)),
            msg("Bob", at(10, 5)),
            msg("Carol", at(10, 6)),
        ];
        let timeline: Vec<&Message> = messages.iter().collect();
        let samples = attribute(&timeline);

        // Alice@10:00 -> Bob, Alice@10:01 -> Bob, Bob -> Carol. Carol has no reply.
        assert_eq!(
            samples,
            vec![
                ResponseSample { responder: 2, millis: 5 * 60_000 },
                ResponseSample { responder: 2, millis: 4 * 60_000 },
                ResponseSample { responder: 3, millis: 60_000 },
            ]
        );
    }

    #[test]
    fn test_window_is_exclusive() {
        let start = at(10, 0);
        let messages = [
            msg("Alice", start),
            msg("Bob", start + chrono::TimeDelta::hours(24)),
            msg("Alice", start + chrono::TimeDelta::hours(48) - chrono::TimeDelta::seconds(1)),
        ];
        let timeline: Vec<&Message> = messages.iter().collect();
        let samples = attribute(&timeline);
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].responder, 2);
    }

    #[test]
    fn test_never_self_attributed() {
        let messages = [msg("Alice", at(10, 0)), msg("Alice", at(10, 1))];
        let timeline: Vec<&Message> = messages.iter().collect();
        assert!(attribute(&timeline).is_empty());
    }

    #[test]
    fn test_median() {
        assert_eq!(median(&[]), 0.0);
        assert_eq!(median(&[1, 3, 9]), 3.0);
        assert_eq!(median(&[1, 3]), 2.0);
    }
}
