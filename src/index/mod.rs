//! Indexed data model over a parsed transcript.
//!
//! A [`ChatIndex`] is built once per analysis from a message sequence:
//!
//! 1. System messages are dropped and the rest are ordered by timestamp
//!    (stable, so ties keep input order). This timeline is shared by every
//!    time-ordered analyzer.
//! 2. Participant records are created lazily and fed each message.
//! 3. Response times, conversation starters and bursts are attributed.
//! 4. Hour-of-day, day-of-week and calendar-date lookups are filled.
//! 5. Metadata (time range, counts) is computed.
//!
//! There is no incremental update path: a date-range refilter builds a fresh
//! index ([`ChatIndex::refilter`]) and [`ChatIndex::reload`] replaces
//! everything, including the result cache.
//!
//! # Example
//!
//! ```rust
//! use chatlens::ChatIndex;
//!
//! let index = ChatIndex::from_transcript(
//!     "[1/2/2024, 10:00:00] Alice: Hello\n[1/2/2024, 10:05:00] Bob: Hi Alice",
//! )?;
//!
//! assert_eq!(index.metadata().total_messages, 2);
//! assert_eq!(index.participant("Bob")?.response_times, vec![300_000]);
//! assert_eq!(index.participant("Alice")?.conversations_started, 1);
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```

pub mod cache;
pub mod participant;

use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::debug;

use crate::Message;
use crate::core::filter::{FilterConfig, apply_filters};
use crate::error::{ChatlensError, Result};
use crate::parsing::parse_transcript;
use crate::stats::{conversations, response};

pub use cache::ComputeCache;
pub use participant::{ParticipantRecord, ParticipantSummary};

/// Range and size of the indexed messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChatMetadata {
    /// Earliest non-system timestamp
    pub first_message: Option<NaiveDateTime>,
    /// Latest non-system timestamp
    pub last_message: Option<NaiveDateTime>,
    pub total_messages: usize,
    pub total_participants: usize,
}

/// Messages plus lookup structures and a memoization cache.
#[derive(Debug)]
pub struct ChatIndex {
    /// Non-system messages in input order
    messages: Vec<Message>,
    /// Positions into `messages`, sorted by timestamp
    timeline: Vec<usize>,
    participants: Vec<ParticipantRecord>,
    lookup: HashMap<String, usize>,
    by_hour: [Vec<usize>; 24],
    by_weekday: [Vec<usize>; 7],
    by_date: BTreeMap<NaiveDate, Vec<usize>>,
    metadata: ChatMetadata,
    cache: ComputeCache,
}

impl ChatIndex {
    /// Builds an index from parsed messages. System messages are dropped.
    pub fn build(messages: Vec<Message>) -> Self {
        let messages: Vec<Message> = messages.into_iter().filter(|m| !m.is_system).collect();

        let mut timeline: Vec<usize> = (0..messages.len()).collect();
        timeline.sort_by_key(|&i| messages[i].timestamp);

        let mut index = Self {
            messages,
            timeline,
            participants: Vec::new(),
            lookup: HashMap::new(),
            by_hour: std::array::from_fn(|_| Vec::new()),
            by_weekday: std::array::from_fn(|_| Vec::new()),
            by_date: BTreeMap::new(),
            metadata: ChatMetadata::default(),
            cache: ComputeCache::new(),
        };

        index.populate_participants();
        index.attribute_sequences();
        index.populate_lookups();
        index.compute_metadata();

        debug!(
            messages = index.metadata.total_messages,
            participants = index.metadata.total_participants,
            days = index.by_date.len(),
            "built chat index"
        );

        index
    }

    /// Parses a transcript and builds an index from it.
    pub fn from_transcript(input: &str) -> Result<Self> {
        Ok(Self::build(parse_transcript(input)?))
    }

    /// Replaces the whole dataset and clears every cached result.
    pub fn reload(&mut self, messages: Vec<Message>) {
        *self = Self::build(messages);
    }

    /// Builds a fresh index over the messages passing `filter`.
    pub fn refilter(&self, filter: &FilterConfig) -> Self {
        Self::build(apply_filters(self.messages.clone(), filter))
    }

    fn participant_slot(&mut self, name: &str) -> usize {
        if let Some(&slot) = self.lookup.get(name) {
            return slot;
        }
        let slot = self.participants.len();
        self.participants.push(ParticipantRecord::new(name));
        self.lookup.insert(name.to_string(), slot);
        slot
    }

    fn populate_participants(&mut self) {
        for pos in 0..self.timeline.len() {
            let msg_idx = self.timeline[pos];
            let name = self.messages[msg_idx].participant.clone();
            let slot = self.participant_slot(&name);
            self.participants[slot].record(&self.messages[msg_idx]);
        }
    }

    fn attribute_sequences(&mut self) {
        let timeline: Vec<&Message> = self.timeline.iter().map(|&i| &self.messages[i]).collect();

        let samples = response::attribute(&timeline);
        let starters = conversations::starter_positions(&timeline);
        let bursts = conversations::burst_positions(&timeline);

        let slot_of = |pos: usize| self.lookup[&timeline[pos].participant];
        let sample_slots: Vec<(usize, i64)> =
            samples.iter().map(|s| (slot_of(s.responder), s.millis)).collect();
        let starter_slots: Vec<usize> = starters.into_iter().map(slot_of).collect();
        let burst_slots: Vec<usize> = bursts.into_iter().map(slot_of).collect();

        for (slot, millis) in sample_slots {
            self.participants[slot].response_times.push(millis);
        }
        for slot in starter_slots {
            self.participants[slot].conversations_started += 1;
        }
        for slot in burst_slots {
            self.participants[slot].burst_count += 1;
        }
    }

    fn populate_lookups(&mut self) {
        for (i, msg) in self.messages.iter().enumerate() {
            self.by_hour[msg.hour()].push(i);
            self.by_weekday[msg.weekday()].push(i);
            self.by_date.entry(msg.date()).or_default().push(i);
        }
    }

    fn compute_metadata(&mut self) {
        self.metadata = ChatMetadata {
            first_message: self.messages.iter().map(|m| m.timestamp).min(),
            last_message: self.messages.iter().map(|m| m.timestamp).max(),
            total_messages: self.messages.len(),
            total_participants: self.participants.len(),
        };
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Non-system messages in input order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Non-system messages in timestamp order.
    pub fn timeline(&self) -> impl ExactSizeIterator<Item = &Message> + DoubleEndedIterator {
        self.timeline.iter().map(|&i| &self.messages[i])
    }

    /// The timeline collected into a slice-friendly vector.
    pub fn sorted_messages(&self) -> Vec<&Message> {
        self.timeline().collect()
    }

    /// Participant records in first-appearance (timeline) order.
    pub fn participants(&self) -> &[ParticipantRecord] {
        &self.participants
    }

    /// Participant names in first-appearance order.
    pub fn participant_names(&self) -> Vec<&str> {
        self.participants.iter().map(|p| p.name.as_str()).collect()
    }

    /// Looks up a participant by exact display name.
    pub fn participant(&self, name: &str) -> Result<&ParticipantRecord> {
        self.lookup
            .get(name)
            .map(|&slot| &self.participants[slot])
            .ok_or_else(|| ChatlensError::unsupported_participant(name))
    }

    /// Non-system messages of one participant, input order.
    pub fn messages_from<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Message> + 'a {
        self.messages.iter().filter(move |m| m.participant == name)
    }

    /// Messages sent during `hour` (0-23). Out-of-range hours yield nothing.
    pub fn messages_at_hour(&self, hour: usize) -> impl Iterator<Item = &Message> {
        self.by_hour
            .get(hour)
            .into_iter()
            .flatten()
            .map(|&i| &self.messages[i])
    }

    /// Messages sent on `weekday` (0-6, Sunday = 0).
    pub fn messages_on_weekday(&self, weekday: usize) -> impl Iterator<Item = &Message> {
        self.by_weekday
            .get(weekday)
            .into_iter()
            .flatten()
            .map(|&i| &self.messages[i])
    }

    /// Messages sent on a calendar date.
    pub fn messages_on(&self, date: NaiveDate) -> impl Iterator<Item = &Message> {
        self.by_date
            .get(&date)
            .into_iter()
            .flatten()
            .map(|&i| &self.messages[i])
    }

    /// Message counts per hour of day.
    pub fn hour_counts(&self) -> [usize; 24] {
        std::array::from_fn(|h| self.by_hour[h].len())
    }

    /// Message counts per day of week, Sunday = 0.
    pub fn weekday_counts(&self) -> [usize; 7] {
        std::array::from_fn(|d| self.by_weekday[d].len())
    }

    /// Distinct active dates, ascending, with message counts.
    pub fn date_counts(&self) -> impl Iterator<Item = (NaiveDate, usize)> + '_ {
        self.by_date.iter().map(|(d, v)| (*d, v.len()))
    }

    pub fn metadata(&self) -> &ChatMetadata {
        &self.metadata
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Memoized computation keyed by name.
    pub fn cache(&self) -> &ComputeCache {
        &self.cache
    }
}
