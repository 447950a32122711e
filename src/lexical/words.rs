//! Word extraction, frequency tables and vocabulary comparison.
//!
//! Extraction strips URLs, lowercases, turns everything except word
//! characters, apostrophes and hyphens into spaces and splits on whitespace.
//! Tokens of two characters or fewer, numbers and leftover URL pieces are
//! always dropped. Stop words (English and Russian) and export noise such as
//! "omitted" are dropped only when filtering is on.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::Message;
use crate::error::Result;
use crate::frequency::{Count, FrequencyTable};
use crate::index::ChatIndex;

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://\S+|www\.\S+").expect("url pattern is valid"));

static NON_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w'\-]+").expect("non-word pattern is valid"));

/// Tokens this short (in chars) are never counted.
const MAX_DROPPED_LEN: usize = 2;

const URL_FRAGMENTS: &[&str] = &["http", "https", "www", "com", "org", "net", "html"];

const NOISE_TOKENS: &[&str] = &[
    "omitted",
    "attached",
    "media",
    "image",
    "video",
    "audio",
    "sticker",
    "gif",
    "document",
    "deleted",
    "null",
    "медиафайлов",
];

const STOP_WORDS: &[&str] = &[
    // English
    "the", "and", "for", "are", "but", "not", "you", "all", "any", "can", "had", "her", "was",
    "one", "our", "out", "has", "have", "him", "his", "how", "its", "may", "who", "did", "get",
    "got", "let", "she", "too", "use", "that", "this", "with", "from", "they", "will", "would",
    "there", "their", "what", "about", "which", "when", "make", "like", "just", "than", "then",
    "them", "been", "were", "said", "each", "into", "your", "also", "some", "could", "more",
    "very", "what's", "i'm", "it's", "don't", "i'll", "you're", "can't", "yes", "yeah", "okay",
    // Russian
    "что", "это", "как", "так", "все", "она", "они", "его", "только", "было", "меня", "тебя",
    "мне", "тебе", "уже", "вот", "еще", "ещё", "нет", "для", "если", "или", "когда", "даже",
    "там", "тут", "где", "был", "была", "будет", "может", "чтобы", "очень", "вас", "нас",
    "него", "неё", "над", "под", "про", "без", "при", "чем", "чего", "кто", "ну", "да",
];

static STOP_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOP_WORDS.iter().chain(NOISE_TOKENS).copied().collect());

/// Lowercased candidate tokens of `text`, before any filtering.
pub fn tokenize(text: &str) -> Vec<String> {
    let without_urls = URL_RE.replace_all(text, " ");
    let lowered = without_urls.to_lowercase();
    NON_WORD_RE
        .replace_all(&lowered, " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Whether a lowercased token is counted.
pub fn is_countable(token: &str, filter_stop_words: bool) -> bool {
    if token.chars().count() <= MAX_DROPPED_LEN {
        return false;
    }
    if token.chars().all(char::is_numeric) || URL_FRAGMENTS.contains(&token) {
        return false;
    }
    !(filter_stop_words && STOP_SET.contains(token))
}

/// Countable words of `text`, in order.
pub fn words(text: &str, filter_stop_words: bool) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .filter(|t| is_countable(t, filter_stop_words))
        .collect()
}

/// Word histogram over `messages`, keys in first-seen order.
pub fn word_frequency<'a>(
    messages: impl IntoIterator<Item = &'a Message>,
    filter_stop_words: bool,
) -> FrequencyTable {
    let mut table = FrequencyTable::new();
    for msg in messages {
        for word in words(&msg.content, filter_stop_words) {
            table.add(&word);
        }
    }
    table
}

/// Top words of one participant.
///
/// # Errors
///
/// Returns [`ChatlensError::UnsupportedParticipant`](crate::ChatlensError::UnsupportedParticipant)
/// for a name not in the index.
pub fn participant_words(
    index: &ChatIndex,
    name: &str,
    filter_stop_words: bool,
    limit: usize,
) -> Result<Vec<Count>> {
    let record = index.participant(name)?;
    Ok(word_frequency(index.messages_from(&record.name), filter_stop_words).top(limit))
}

/// Top words over every participant.
pub fn global_words(index: &ChatIndex, filter_stop_words: bool, limit: usize) -> Vec<Count> {
    word_frequency(index.messages(), filter_stop_words).top(limit)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParticipantWords {
    pub name: String,
    pub words: Vec<Count>,
}

/// Top words for every participant, index order.
pub fn words_by_participant(
    index: &ChatIndex,
    filter_stop_words: bool,
    limit: usize,
) -> Vec<ParticipantWords> {
    index
        .participants()
        .iter()
        .map(|record| ParticipantWords {
            name: record.name.clone(),
            words: word_frequency(index.messages_from(&record.name), filter_stop_words)
                .top(limit),
        })
        .collect()
}

/// Words used by one participant but never by the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UniqueVocabulary {
    pub first: String,
    pub second: String,
    pub first_only: Vec<String>,
    pub second_only: Vec<String>,
}

/// Compares the vocabularies of two participants.
///
/// Each side lists at most `limit` words, in first-used order.
///
/// # Errors
///
/// Returns [`ChatlensError::UnsupportedParticipant`](crate::ChatlensError::UnsupportedParticipant)
/// if either name is not in the index.
pub fn unique_vocabulary(
    index: &ChatIndex,
    first: &str,
    second: &str,
    filter_stop_words: bool,
    limit: usize,
) -> Result<UniqueVocabulary> {
    index.participant(first)?;
    index.participant(second)?;

    let a = word_frequency(index.messages_from(first), filter_stop_words);
    let b = word_frequency(index.messages_from(second), filter_stop_words);

    let only = |own: &FrequencyTable, other: &FrequencyTable| -> Vec<String> {
        own.keys()
            .filter(|w| !other.contains(w))
            .take(limit)
            .map(str::to_string)
            .collect()
    };

    Ok(UniqueVocabulary {
        first: first.to_string(),
        second: second.to_string(),
        first_only: only(&a, &b),
        second_only: only(&b, &a),
    })
}
