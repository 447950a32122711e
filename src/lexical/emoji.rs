//! Emoji extraction.
//!
//! An emoji is any `Extended_Pictographic` code point. Multi-code-point
//! sequences (ZWJ families, flags with pictographic parts) count once per
//! pictographic code point.

use std::sync::LazyLock;

use regex::Regex;

use crate::Message;
use crate::frequency::FrequencyTable;

static EMOJI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{Extended_Pictographic}").expect("emoji pattern is valid"));

/// Iterates over the emoji code points in `text`.
pub fn emojis(text: &str) -> impl Iterator<Item = &str> {
    EMOJI_RE.find_iter(text).map(|m| m.as_str())
}

/// Counts emoji code points in `text`.
pub fn emoji_count(text: &str) -> usize {
    EMOJI_RE.find_iter(text).count()
}

/// Emoji histogram over `messages`, keys in first-seen order.
pub fn emoji_frequency<'a>(messages: impl IntoIterator<Item = &'a Message>) -> FrequencyTable {
    let mut table = FrequencyTable::new();
    for msg in messages {
        for emoji in emojis(&msg.content) {
            table.add(emoji);
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emoji_count() {
        assert_eq!(emoji_count("Hello 👋 World 🌍"), 2);
        assert_eq!(emoji_count("no emoji here 123 #"), 0);
        assert_eq!(emoji_count("🔥🔥🔥"), 3);
    }

    #[test]
    fn test_emojis_iter() {
        let found: Vec<&str> = emojis("ok 😂 fine ❤").collect();
        assert_eq!(found, ["😂", "❤"]);
    }

    #[test]
    fn test_emoji_frequency() {
        let ts = chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let messages = [
            Message::new(ts, "A", "😂 ok"),
            Message::new(ts, "B", "🔥😂😂"),
        ];
        let top = emoji_frequency(&messages).top(2);
        assert_eq!(top[0].key, "😂");
        assert_eq!(top[0].count, 3);
        assert_eq!(top[1].key, "🔥");
    }
}
