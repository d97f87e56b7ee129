//! Bounded keyword-sequence matching over a run of sibling nodes.
//!
//! SQL constructs place their keyword groups a short distance from the name
//! they bind, so scans are windowed: an unbounded scan would happily pick up
//! a keyword from the next, unrelated statement.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::tree::SyntaxNode;

/// Default number of non-whitespace siblings scanned for a sequence's first keyword.
pub const DEFAULT_WINDOW: usize = 10;

/// Default number of sibling positions allowed between consecutive keywords.
pub const DEFAULT_GAP: usize = 3;

/// Lookahead bounds used by [`matches`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lookahead {
    /// Budget for locating the first keyword. Whitespace is free. Comments
    /// are tolerated before the first keyword and each one consumes a unit
    /// of budget; any other token ends the scan.
    #[serde(default = "default_window")]
    pub window: usize,
    /// Maximum distance, in sibling positions, from one matched keyword to the
    /// next. Only whitespace may sit in between.
    #[serde(default = "default_gap")]
    pub gap: usize,
}

impl Default for Lookahead {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            gap: DEFAULT_GAP,
        }
    }
}

fn default_window() -> usize {
    DEFAULT_WINDOW
}

fn default_gap() -> usize {
    DEFAULT_GAP
}

/// Ordered, case-insensitive keywords that together open one construct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct KeywordSequence {
    words: Vec<String>,
}

impl KeywordSequence {
    /// Creates a sequence. Words are stored upper-cased.
    #[must_use]
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().to_ascii_uppercase())
                .collect(),
        }
    }

    /// The empty sequence, which matches everywhere.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Keywords in order.
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// True for the empty sequence.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl fmt::Display for KeywordSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.words.join(" "))
    }
}

/// Does `sequence` start within the window beginning at `start`?
///
/// An empty sequence always matches.
#[must_use]
pub fn matches(
    start: usize,
    siblings: &[SyntaxNode],
    sequence: &KeywordSequence,
    lookahead: Lookahead,
) -> bool {
    match_span(start, siblings, sequence, lookahead).is_some()
}

/// Like [`matches`], returning the sibling range from the first to the last
/// matched keyword. The empty sequence yields the empty range at `start`.
#[must_use]
pub fn match_span(
    start: usize,
    siblings: &[SyntaxNode],
    sequence: &KeywordSequence,
    lookahead: Lookahead,
) -> Option<Range<usize>> {
    let Some((first, rest)) = sequence.words().split_first() else {
        return Some(start..start);
    };

    let begin = find_first(start, siblings, first, lookahead.window)?;
    let mut previous = begin;
    for word in rest {
        previous = find_next(previous, siblings, word, lookahead.gap)?;
    }
    Some(begin..previous + 1)
}

/// Picks the candidate whose sequence matches first in source order.
///
/// Ties keep candidate order.
pub fn classify<'c, T>(
    start: usize,
    siblings: &[SyntaxNode],
    candidates: impl IntoIterator<Item = (T, &'c KeywordSequence)>,
    lookahead: Lookahead,
) -> Option<T> {
    candidates
        .into_iter()
        .filter_map(|(tag, seq)| {
            match_span(start, siblings, seq, lookahead).map(|span| (span.start, tag))
        })
        .min_by_key(|(position, _)| *position)
        .map(|(_, tag)| tag)
}

/// Index of the first keyword child equal to `word`.
#[must_use]
pub fn find_keyword(nodes: &[SyntaxNode], word: &str) -> Option<usize> {
    nodes.iter().position(|n| n.is_keyword(word))
}

/// True when the keyword children of `nodes`, read in order and ignoring
/// everything else, contain `sequence` as a contiguous run.
#[must_use]
pub fn keyword_run_contains(nodes: &[SyntaxNode], sequence: &KeywordSequence) -> bool {
    if sequence.is_empty() {
        return true;
    }
    let keywords: Vec<&SyntaxNode> = nodes
        .iter()
        .filter(|n| n.kind() == crate::tree::NodeKind::Keyword)
        .collect();
    keywords.windows(sequence.words().len()).any(|window| {
        window
            .iter()
            .zip(sequence.words())
            .all(|(node, word)| node.is_keyword(word))
    })
}

fn find_first(start: usize, siblings: &[SyntaxNode], word: &str, window: usize) -> Option<usize> {
    let mut budget = window;
    for (i, node) in siblings.iter().enumerate().skip(start) {
        if node.kind().is_whitespace() {
            continue;
        }
        if budget == 0 {
            return None;
        }
        budget -= 1;
        if node.is_keyword(word) {
            return Some(i);
        }
        if !node.kind().is_comment() {
            return None;
        }
    }
    None
}

fn find_next(previous: usize, siblings: &[SyntaxNode], word: &str, gap: usize) -> Option<usize> {
    for (i, node) in siblings.iter().enumerate().skip(previous + 1).take(gap) {
        if node.is_keyword(word) {
            return Some(i);
        }
        if !node.kind().is_whitespace() {
            return None;
        }
    }
    None
}
