//! Time-of-day, weekday and long-range trend analyzers.

use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeDelta};
use serde::Serialize;

use crate::config::Granularity;
use crate::index::ChatIndex;

/// Hours in the 7x24 peak matrix.
const MATRIX_CELLS: f64 = 168.0;

/// Spans shorter than this are split at the midpoint.
pub const TREND_WINDOW_SPLIT_DAYS: i64 = 60;

/// Window length compared at each end of longer spans.
pub const TREND_EDGE_DAYS: i64 = 30;

/// Percentage change beyond which a trend is not stable.
pub const TREND_THRESHOLD_PERCENT: f64 = 10.0;

// =============================================================================
// Activity histograms
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub messages: usize,
}

/// Hour, weekday and per-date message counts.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityReport {
    pub hourly: [usize; 24],
    /// Sunday = 0
    pub weekday: [usize; 7],
    /// Ascending by date
    pub daily: Vec<DailyCount>,
    /// First date with the highest count
    pub busiest_day: Option<DailyCount>,
}

pub fn activity(index: &ChatIndex) -> ActivityReport {
    let daily: Vec<DailyCount> = index
        .date_counts()
        .map(|(date, messages)| DailyCount { date, messages })
        .collect();

    let busiest_day = daily
        .iter()
        .fold(None::<&DailyCount>, |best, day| match best {
            Some(b) if b.messages >= day.messages => Some(b),
            _ => Some(day),
        })
        .cloned();

    ActivityReport {
        hourly: index.hour_counts(),
        weekday: index.weekday_counts(),
        daily,
        busiest_day,
    }
}

// =============================================================================
// Peak time
// =============================================================================

/// The busiest weekday/hour cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeakTime {
    /// Sunday = 0
    pub weekday: usize,
    pub hour: usize,
    pub messages: usize,
    /// `min(peak / mean_cell * 20, 100)`, 0 when there are no messages
    pub confidence: f64,
}

pub fn peak_time(index: &ChatIndex) -> PeakTime {
    let mut matrix = [[0usize; 24]; 7];
    for msg in index.messages() {
        matrix[msg.weekday()][msg.hour()] += 1;
    }

    let mut peak = PeakTime {
        weekday: 0,
        hour: 0,
        messages: 0,
        confidence: 0.0,
    };
    for (day, row) in matrix.iter().enumerate() {
        for (hour, &count) in row.iter().enumerate() {
            if count > peak.messages {
                peak.weekday = day;
                peak.hour = hour;
                peak.messages = count;
            }
        }
    }

    let average = index.metadata().total_messages as f64 / MATRIX_CELLS;
    if average > 0.0 {
        peak.confidence = (peak.messages as f64 / average * 20.0).min(100.0);
    }
    peak
}

// =============================================================================
// Activity trend
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

/// Early-versus-late messages per day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActivityTrend {
    pub first_period_average: f64,
    pub second_period_average: f64,
    /// 0 when not computable
    pub change_percent: f64,
    /// `false` when the first period averaged zero messages per day
    pub computable: bool,
    pub direction: TrendDirection,
}

impl ActivityTrend {
    fn flat() -> Self {
        Self {
            first_period_average: 0.0,
            second_period_average: 0.0,
            change_percent: 0.0,
            computable: false,
            direction: TrendDirection::Stable,
        }
    }
}

pub fn activity_trend(index: &ChatIndex) -> ActivityTrend {
    let (Some(first), Some(last)) = (index.metadata().first_message, index.metadata().last_message)
    else {
        return ActivityTrend::flat();
    };

    let span = last - first;
    let (first_count, second_count, days) = if span < TimeDelta::days(TREND_WINDOW_SPLIT_DAYS) {
        let midpoint = first + span / 2;
        let early = index.messages().iter().filter(|m| m.timestamp < midpoint).count();
        let half_days = (span.num_seconds() as f64 / 86_400.0 / 2.0).max(1.0);
        (early, index.messages().len() - early, half_days)
    } else {
        let early_end = first + TimeDelta::days(TREND_EDGE_DAYS);
        let late_start = last - TimeDelta::days(TREND_EDGE_DAYS);
        let early = index.messages().iter().filter(|m| m.timestamp < early_end).count();
        let late = index.messages().iter().filter(|m| m.timestamp > late_start).count();
        (early, late, TREND_EDGE_DAYS as f64)
    };

    let first_avg = first_count as f64 / days;
    let second_avg = second_count as f64 / days;

    if first_avg == 0.0 {
        return ActivityTrend {
            first_period_average: first_avg,
            second_period_average: second_avg,
            ..ActivityTrend::flat()
        };
    }

    let change = (second_avg - first_avg) / first_avg * 100.0;
    let direction = if change > TREND_THRESHOLD_PERCENT {
        TrendDirection::Increasing
    } else if change < -TREND_THRESHOLD_PERCENT {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    };

    ActivityTrend {
        first_period_average: first_avg,
        second_period_average: second_avg,
        change_percent: change,
        computable: true,
        direction,
    }
}

// =============================================================================
// Bucketed trends
// =============================================================================

/// Share of messages containing `?` in one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionBucket {
    /// `YYYY-MM`
    pub period: String,
    pub messages: usize,
    pub questions: usize,
    /// 0-100
    pub percentage: f64,
}

/// Monthly question-asking rate, ascending by period.
pub fn question_trend(index: &ChatIndex) -> Vec<QuestionBucket> {
    let mut buckets: BTreeMap<String, (usize, usize)> = BTreeMap::new();
    for msg in index.messages() {
        let entry = buckets.entry(msg.month_key()).or_default();
        entry.0 += 1;
        entry.1 += usize::from(msg.content.contains('?'));
    }

    buckets
        .into_iter()
        .map(|(period, (messages, questions))| QuestionBucket {
            period,
            messages,
            questions,
            percentage: questions as f64 / messages as f64 * 100.0,
        })
        .collect()
}

/// Average message size in one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LengthBucket {
    /// `YYYY-MM` or `YYYY-Www`
    pub period: String,
    pub messages: usize,
    pub average_words: f64,
    pub average_letters: f64,
}

/// Average words and letters per message, ascending by period.
pub fn length_trend(index: &ChatIndex, granularity: Granularity) -> Vec<LengthBucket> {
    let mut buckets: BTreeMap<String, (usize, usize, usize)> = BTreeMap::new();
    for msg in index.messages() {
        let key = match granularity {
            Granularity::Month => msg.month_key(),
            Granularity::Week => msg.week_key(),
        };
        let entry = buckets.entry(key).or_default();
        entry.0 += 1;
        entry.1 += msg.word_count();
        entry.2 += msg.letter_count();
    }

    buckets
        .into_iter()
        .map(|(period, (messages, words, letters))| LengthBucket {
            period,
            messages,
            average_words: words as f64 / messages as f64,
            average_letters: letters as f64 / messages as f64,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::test_support::{day, msg, text};

    #[test]
    fn test_peak_time_first_max_wins() {
        // 2024-01-07 is a Sunday, 2024-01-08 a Monday
        let index = ChatIndex::build(vec![
            msg("A", day(2024, 1, 8, 9, 0)),
            msg("A", day(2024, 1, 8, 9, 5)),
            msg("B", day(2024, 1, 7, 20, 0)),
            msg("B", day(2024, 1, 7, 20, 1)),
        ]);
        let peak = peak_time(&index);
        assert_eq!((peak.weekday, peak.hour, peak.messages), (0, 20, 2));
        // average = 4 / 168, 2 / avg * 20 = 1680 -> capped
        assert_eq!(peak.confidence, 100.0);
    }

    #[test]
    fn test_peak_time_empty() {
        let peak = peak_time(&ChatIndex::build(Vec::new()));
        assert_eq!(peak.messages, 0);
        assert_eq!(peak.confidence, 0.0);
    }

    #[test]
    fn test_trend_midpoint_split() {
        // 10 day span: 1 message early, 3 late
        let index = ChatIndex::build(vec![
            msg("A", day(2024, 1, 1, 0, 0)),
            msg("A", day(2024, 1, 8, 0, 0)),
            msg("A", day(2024, 1, 9, 0, 0)),
            msg("A", day(2024, 1, 11, 0, 0)),
        ]);
        let trend = activity_trend(&index);
        assert!(trend.computable);
        assert!((trend.change_percent - 200.0).abs() < 1e-9);
        assert_eq!(trend.direction, TrendDirection::Increasing);
    }

    #[test]
    fn test_trend_edge_windows() {
        let mut messages = vec![msg("A", day(2024, 1, 1, 0, 0)), msg("A", day(2024, 1, 2, 0, 0))];
        messages.push(msg("A", day(2024, 3, 15, 0, 0))); // middle, ignored
        messages.push(msg("A", day(2024, 6, 1, 0, 0)));
        let trend = activity_trend(&ChatIndex::build(messages));
        assert!((trend.first_period_average - 2.0 / 30.0).abs() < 1e-9);
        assert!((trend.change_percent + 50.0).abs() < 1e-9);
        assert_eq!(trend.direction, TrendDirection::Decreasing);
    }

    #[test]
    fn test_trend_single_instant() {
        let index = ChatIndex::build(vec![msg("A", day(2024, 1, 1, 0, 0))]);
        let trend = activity_trend(&index);
        // zero span: midpoint equals the only timestamp, nothing is early
        assert!(!trend.computable);
        assert_eq!(trend.change_percent, 0.0);
        assert_eq!(trend.direction, TrendDirection::Stable);
    }

    #[test]
    fn test_question_trend_sorted() {
        let index = ChatIndex::build(vec![
            text("A", day(2024, 2, 1, 9, 0), "why?"),
            text("A", day(2024, 1, 1, 9, 0), "ok"),
            text("A", day(2024, 1, 2, 9, 0), "really?"),
        ]);
        let trend = question_trend(&index);
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].period, "2024-01");
        assert_eq!(trend[0].percentage, 50.0);
        assert_eq!(trend[1].percentage, 100.0);
    }

    #[test]
    fn test_length_trend_weekly() {
        let index = ChatIndex::build(vec![
            text("A", day(2024, 1, 1, 9, 0), "one two"),
            text("A", day(2024, 1, 7, 9, 0), "three"),
        ]);
        let weekly = length_trend(&index, Granularity::Week);
        assert_eq!(weekly.len(), 2);
        assert_eq!(weekly[0].period, "2024-W01");
        assert_eq!(weekly[0].average_words, 2.0);
        assert_eq!(weekly[1].average_letters, 5.0);

        let monthly = length_trend(&index, Granularity::Month);
        assert_eq!(monthly.len(), 1);
        assert_eq!(monthly[0].average_words, 1.5);
    }

    #[test]
    fn test_busiest_day_first_wins() {
        let index = ChatIndex::build(vec![
            msg("A", day(2024, 1, 1, 9, 0)),
            msg("A", day(2024, 1, 2, 9, 0)),
        ]);
        let report = activity(&index);
        assert_eq!(
            report.busiest_day.map(|d| d.date),
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
    }
}
