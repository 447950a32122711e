//! Consecutive-day activity streaks.

use chrono::NaiveDate;
use serde::Serialize;

use crate::index::ChatIndex;

/// Runs shorter than this are not reported as streaks.
pub const MIN_STREAK_DAYS: usize = 2;

/// A maximal run of consecutive active days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Streak {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StreakReport {
    /// Longest run over all runs, including single days
    pub longest: usize,
    /// Length of the most recent run if it ends today or yesterday, else 0
    pub current: usize,
    pub active_days: usize,
    /// Runs of at least two days, chronological
    pub streaks: Vec<Streak>,
}

/// Finds runs over sorted, distinct active dates.
pub fn find_runs(dates: &[NaiveDate]) -> Vec<Streak> {
    let mut runs: Vec<Streak> = Vec::new();
    for &date in dates {
        match runs.last_mut() {
            Some(run) if (date - run.end).num_days() == 1 => {
                run.end = date;
                run.days += 1;
            }
            _ => runs.push(Streak {
                start: date,
                end: date,
                days: 1,
            }),
        }
    }
    runs
}

/// Computes streaks from distinct active dates relative to `today`.
pub fn streaks_for_dates(dates: &[NaiveDate], today: NaiveDate) -> StreakReport {
    let runs = find_runs(dates);

    let longest = runs.iter().map(|r| r.days).max().unwrap_or(0);
    let current = runs
        .last()
        .filter(|r| {
            let since = (today - r.end).num_days();
            since == 0 || since == 1
        })
        .map_or(0, |r| r.days);

    StreakReport {
        longest,
        current,
        active_days: dates.len(),
        streaks: runs
            .into_iter()
            .filter(|r| r.days >= MIN_STREAK_DAYS)
            .collect(),
    }
}

pub fn streaks(index: &ChatIndex, today: NaiveDate) -> StreakReport {
    let dates: Vec<NaiveDate> = index.date_counts().map(|(d, _)| d).collect();
    streaks_for_dates(&dates, today)
}
