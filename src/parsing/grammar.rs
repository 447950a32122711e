//! Timestamp-line grammars.
//!
//! Exports vary by locale and platform. Every message-starting line is one
//! of the [`Grammar`] variants, tried in the fixed order of
//! [`Grammar::PRIORITY`]; the first grammar that matches wins for that line.
//!
//! Supported shapes:
//! - Bracketed slash: `[15/01/2024, 10:30:45 PM] Sender: Message`
//! - Dash: `15/01/2024, 10:30 - Sender: Message`
//! - Bracketed ISO: `[2024-01-15, 10:30:45] Sender: Message`

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A message-line grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grammar {
    /// `[D/M/Y, H:MM[:SS][ AM|PM]] Name: Content`
    BracketedSlash,
    /// `D/M/Y, H:MM[:SS][ AM|PM] - Name: Content`
    Dash,
    /// `[Y-M-D, H:MM[:SS][ AM|PM]] Name: Content`
    BracketedIso,
}

impl Grammar {
    /// Order in which grammars are tried against each line.
    pub const PRIORITY: [Grammar; 3] = [Grammar::BracketedSlash, Grammar::Dash, Grammar::BracketedIso];

    /// Returns the line regex for this grammar.
    ///
    /// Capture groups: 1 = date, 2 = time, 3 = participant, 4 = content.
    pub fn pattern(self) -> &'static str {
        match self {
            Grammar::BracketedSlash => {
                r"^\[(\d{1,2}/\d{1,2}/\d{2,4}),\s*(\d{1,2}:\d{2}(?::\d{2})?(?:\s?[APap][Mm])?)\]\s*([^:]+):\s?(.*)$"
            }
            Grammar::Dash => {
                r"^(\d{1,2}/\d{1,2}/\d{2,4}),\s*(\d{1,2}:\d{2}(?::\d{2})?(?:\s?[APap][Mm])?)\s-\s([^:]+):\s?(.*)$"
            }
            Grammar::BracketedIso => {
                r"^\[(\d{4}-\d{1,2}-\d{1,2}),\s*(\d{1,2}:\d{2}(?::\d{2})?(?:\s?[APap][Mm])?)\]\s*([^:]+):\s?(.*)$"
            }
        }
    }

    /// Human-readable name, used in logs.
    pub fn name(self) -> &'static str {
        match self {
            Grammar::BracketedSlash => "bracketed-slash",
            Grammar::Dash => "dash",
            Grammar::BracketedIso => "bracketed-iso",
        }
    }
}

/// Raw captures of a message-starting line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCaptures<'a> {
    pub date: &'a str,
    pub time: &'a str,
    /// Trimmed participant name
    pub participant: &'a str,
    /// Trimmed first line of content
    pub content: &'a str,
}

/// Result of matching one transcript line against the grammar list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineMatch<'a> {
    Matched {
        grammar: Grammar,
        captures: LineCaptures<'a>,
    },
    Unmatched,
}

impl LineMatch<'_> {
    /// Returns `true` if the line starts a new message.
    pub fn is_match(&self) -> bool {
        matches!(self, LineMatch::Matched { .. })
    }
}

/// Compiled grammars in priority order.
pub struct GrammarSet {
    matchers: Vec<(Grammar, Regex)>,
}

static GRAMMARS: LazyLock<GrammarSet> = LazyLock::new(GrammarSet::compile);

impl GrammarSet {
    fn compile() -> Self {
        let matchers = Grammar::PRIORITY
            .iter()
            .map(|&g| (g, Regex::new(g.pattern()).expect("grammar patterns are valid")))
            .collect();
        Self { matchers }
    }

    /// Returns the shared compiled grammar set.
    pub fn shared() -> &'static GrammarSet {
        &GRAMMARS
    }

    /// Matches a line against each grammar in priority order.
    pub fn match_line<'a>(&self, line: &'a str) -> LineMatch<'a> {
        for (grammar, regex) in &self.matchers {
            if let Some(caps) = regex.captures(line) {
                let field = |i: usize| caps.get(i).map_or("", |m| m.as_str());
                return LineMatch::Matched {
                    grammar: *grammar,
                    captures: LineCaptures {
                        date: field(1),
                        time: field(2),
                        participant: field(3).trim(),
                        content: field(4).trim(),
                    },
                };
            }
        }
        LineMatch::Unmatched
    }
}

/// Matches a line using the shared grammar set.
pub fn match_line(line: &str) -> LineMatch<'_> {
    GrammarSet::shared().match_line(line)
}
