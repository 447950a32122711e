//! Laughter detection.
//!
//! A fixed set of English and Russian patterns is run against every message.
//! Patterns are not exclusive: one message can hit several of them, and every
//! match of a pattern counts as a hit.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::Message;
use crate::frequency::Count;
use crate::index::ChatIndex;

const PATTERNS: &[(&str, &str)] = &[
    ("haha", r"(?i)(?:ha){2,}"),
    ("hehe", r"(?i)(?:he){2,}"),
    ("lol", r"(?i)\blo+l\b"),
    ("lmao", r"(?i)\blma+o+\b"),
    ("rofl", r"(?i)\brofl\b"),
    ("xd", r"(?i)\bxd+\b"),
    ("хаха", r"(?i)(?:ха){2,}"),
    ("ахах", r"(?i)(?:ах){2,}"),
    ("ржу", r"(?i)\bржу"),
    ("лол", r"(?i)\bлол\b"),
];

static LAUGH_RES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    PATTERNS
        .iter()
        .map(|&(name, pattern)| (name, Regex::new(pattern).expect("laugh pattern is valid")))
        .collect()
});

/// Names of the patterns matching `text`, in pattern order.
pub fn matched_patterns(text: &str) -> impl Iterator<Item = &'static str> + '_ {
    LAUGH_RES
        .iter()
        .filter(move |(_, re)| re.is_match(text))
        .map(|(name, _)| *name)
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticipantLaughs {
    pub name: String,
    /// Pattern hits
    pub laughs: usize,
    /// Messages with at least one hit
    pub laughing_messages: usize,
    /// `laughing_messages / messages * 100`
    pub rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LaughReport {
    pub total_laughs: usize,
    /// Every pattern in fixed order, including zero counts
    pub patterns: Vec<Count>,
    pub participants: Vec<ParticipantLaughs>,
}

/// Returns `(hits, laughing messages, messages)`.
fn tally<'a>(
    messages: impl IntoIterator<Item = &'a Message>,
    per_pattern: &mut [usize],
) -> (usize, usize, usize) {
    let (mut hits, mut laughing, mut total) = (0, 0, 0);
    for msg in messages {
        total += 1;
        let mut any = false;
        for (slot, (_, re)) in LAUGH_RES.iter().enumerate() {
            let found = re.find_iter(&msg.content).count();
            per_pattern[slot] += found;
            hits += found;
            any |= found > 0;
        }
        laughing += usize::from(any);
    }
    (hits, laughing, total)
}

pub fn laugh_patterns(index: &ChatIndex) -> LaughReport {
    let mut per_pattern = vec![0usize; LAUGH_RES.len()];

    let participants = index
        .participants()
        .iter()
        .map(|record| {
            let (laughs, laughing_messages, messages) =
                tally(index.messages_from(&record.name), &mut per_pattern);
            ParticipantLaughs {
                name: record.name.clone(),
                laughs,
                laughing_messages,
                rate: if messages == 0 {
                    0.0
                } else {
                    laughing_messages as f64 / messages as f64 * 100.0
                },
            }
        })
        .collect::<Vec<_>>();

    let patterns = LAUGH_RES
        .iter()
        .zip(per_pattern)
        .map(|((name, _), count)| Count {
            key: (*name).to_string(),
            count,
        })
        .collect();

    LaughReport {
        total_laughs: participants.iter().map(|p| p.laughs).sum(),
        patterns,
        participants,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::test_support::{at, text};

    #[test]
    fn test_matched_patterns() {
        assert_eq!(matched_patterns("hahaha").collect::<Vec<_>>(), ["haha"]);
        assert_eq!(matched_patterns("LOL that's funny").collect::<Vec<_>>(), ["lol"]);
        assert_eq!(matched_patterns("ахаха").collect::<Vec<_>>(), ["хаха", "ахах"]);
        assert_eq!(matched_patterns("xDD").collect::<Vec<_>>(), ["xd"]);
        assert_eq!(matched_patterns("ha, hello, lollipop").count(), 0);
    }

    #[test]
    fn test_every_match_is_a_hit() {
        let index = ChatIndex::build(vec![
            text("A", at(9, 0), "haha lol haha"),
            text("A", at(9, 1), "serious"),
            text("B", at(9, 2), "ржунимагу"),
            text("B", at(9, 3), "lol ok lol"),
        ]);
        let report = laugh_patterns(&index);
        assert_eq!(report.total_laughs, 6);
        assert_eq!(report.patterns[0], Count { key: "haha".into(), count: 2 });
        assert_eq!(report.patterns[2], Count { key: "lol".into(), count: 3 });
        assert_eq!(report.participants[0].laughs, 3);
        assert_eq!(report.participants[0].laughing_messages, 1);
        assert_eq!(report.participants[0].rate, 50.0);
        assert_eq!(report.participants[1].laughs, 3);
        assert_eq!(report.participants[1].laughing_messages, 2);
    }
}
