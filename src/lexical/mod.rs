//! Text-level analyzers: emoji, words and laughter.

pub mod emoji;
pub mod laughs;
pub mod words;

use std::rc::Rc;

use crate::index::ChatIndex;

pub use laughs::{LaughReport, ParticipantLaughs, laugh_patterns};
pub use words::{
    ParticipantWords, UniqueVocabulary, global_words, participant_words, unique_vocabulary,
    word_frequency, words_by_participant,
};

impl ChatIndex {
    pub fn laughs(&self) -> Rc<LaughReport> {
        self.cache().get_or_compute("laughs", || laugh_patterns(self))
    }
}
