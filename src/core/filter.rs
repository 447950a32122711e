//! Filter messages by date range and participant before (re)building an index.
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Messages on or after date |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Messages on or before date |
//! | Participant | [`with_participant`](FilterConfig::with_participant) | Messages from one participant |
//!
//! # Example
//!
//! ```
//! use chatlens::core::filter::{FilterConfig, apply_filters};
//! use chatlens::Message;
//! use chrono::NaiveDate;
//!
//! # fn main() -> chatlens::Result<()> {
//! let at = |m, d| NaiveDate::from_ymd_opt(2024, m, d).unwrap().and_hms_opt(12, 0, 0).unwrap();
//! let messages = vec![
//!     Message::new(at(1, 1), "Alice", "Old"),
//!     Message::new(at(6, 15), "Alice", "New"),
//! ];
//!
//! let config = FilterConfig::new()
//!     .with_date_from("2024-06-01")?
//!     .with_date_to("2024-12-31")?;
//!
//! let filtered = apply_filters(messages, &config);
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].content, "New");
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Date bounds are inclusive whole days
//! - Participant matching is exact, like every other participant lookup
//! - Multiple filters are combined with AND logic

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::Message;
use crate::error::ChatlensError;

/// Configuration for filtering messages by date and participant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Include only messages on or after this timestamp.
    pub after: Option<NaiveDateTime>,

    /// Include only messages on or before this timestamp.
    pub before: Option<NaiveDateTime>,

    /// Include only messages from this participant (exact match).
    pub participant: Option<String>,
}

impl FilterConfig {
    /// Creates a new empty filter configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self, ChatlensError> {
        let date = parse_filter_date(date_str)?;
        self.after = Some(date.and_time(NaiveTime::MIN));
        Ok(self)
    }

    /// Sets the end date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self, ChatlensError> {
        let date = parse_filter_date(date_str)?;
        let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
        self.before = Some(date.and_time(end_of_day));
        Ok(self)
    }

    /// Sets the participant filter.
    #[must_use]
    pub fn with_participant(mut self, name: impl Into<String>) -> Self {
        self.participant = Some(name.into());
        self
    }

    /// Sets the start timestamp directly.
    #[must_use]
    pub fn with_after(mut self, dt: NaiveDateTime) -> Self {
        self.after = Some(dt);
        self
    }

    /// Sets the end timestamp directly.
    #[must_use]
    pub fn with_before(mut self, dt: NaiveDateTime) -> Self {
        self.before = Some(dt);
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.after.is_some() || self.before.is_some() || self.participant.is_some()
    }

    /// Returns `true` if date filters are active.
    pub fn has_date_filter(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    /// Returns `true` if `msg` passes every active filter.
    pub fn matches(&self, msg: &Message) -> bool {
        if let Some(ref name) = self.participant {
            if msg.participant != *name {
                return false;
            }
        }
        if self.after.is_some_and(|after| msg.timestamp < after) {
            return false;
        }
        if self.before.is_some_and(|before| msg.timestamp > before) {
            return false;
        }
        true
    }
}

fn parse_filter_date(date_str: &str) -> Result<NaiveDate, ChatlensError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| ChatlensError::invalid_date(date_str))
}

/// Filters a collection of messages, keeping those that match every active filter.
///
/// If no filters are active, returns the original messages unchanged.
pub fn apply_filters(messages: Vec<Message>, config: &FilterConfig) -> Vec<Message> {
    if !config.is_active() {
        return messages;
    }

    messages.into_iter().filter(|msg| config.matches(msg)).collect()
}
