//! Line tokenizer for diary entries.

use super::patterns::PatternConfig;
use std::io::{self, BufRead};
use std::ops::Range;

/// The check state of a todo line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoState {
    /// The state text equals the configured checked marker.
    Checked,
    /// The state text equals the configured empty marker.
    Empty,
    /// The state text equals neither marker.
    Unrecognized,
}

/// One classified line of an entry.
///
/// `span` is the byte range of the whole pattern match within `line`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A structural header line.
    Section {
        line: String,
        span: Range<usize>,
        name: String,
    },
    /// A checklist line.
    Todo {
        line: String,
        span: Range<usize>,
        name: String,
        state: TodoState,
    },
    /// Anything else.
    Plain { line: String },
}

impl Token {
    /// The raw line this token was produced from.
    pub fn line(&self) -> &str {
        match self {
            Token::Section { line, .. } | Token::Todo { line, .. } | Token::Plain { line } => line,
        }
    }
}

/// A lazy, single-pass tokenizer over the lines of one entry.
///
/// Each input item is one line without its trailing newline. Reading may fail,
/// so items are results; the error type of the underlying lines is passed
/// through untouched.
///
/// # Examples
///
/// ```
/// use diary::journal_core::{EntryTokenizer, PatternConfig, TodoMarkers, Token};
///
/// let patterns = PatternConfig::new(
///     r"^#+\s*(?P<name>.+)$",
///     r"\[(?P<state>.)\]\s*(?P<name>.*)$",
///     "[{state}] {name}",
///     TodoMarkers::new("x", " "),
/// )
/// .unwrap();
///
/// let entry = "## Monday\nslept well\n";
/// let tokens: Vec<Token> = EntryTokenizer::from_reader(&patterns, entry.as_bytes())
///     .collect::<std::io::Result<_>>()
///     .unwrap();
///
/// assert!(matches!(tokens[0], Token::Section { .. }));
/// assert!(matches!(tokens[1], Token::Plain { .. }));
/// ```
pub struct EntryTokenizer<'a, I> {
    patterns: &'a PatternConfig,
    lines: I,
}

impl<'a, I> EntryTokenizer<'a, I> {
    pub fn new(patterns: &'a PatternConfig, lines: I) -> Self {
        Self { patterns, lines }
    }
}

impl<'a, R: BufRead> EntryTokenizer<'a, io::Lines<R>> {
    /// Tokenizes a reader line by line; `\n` and `\r\n` endings are stripped.
    pub fn from_reader(patterns: &'a PatternConfig, reader: R) -> Self {
        Self::new(patterns, reader.lines())
    }
}

impl<I, S, E> Iterator for EntryTokenizer<'_, I>
where
    I: Iterator<Item = Result<S, E>>,
    S: Into<String>,
{
    type Item = Result<Token, E>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        Some(line.map(|line| self.patterns.classify(line.into())))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.lines.size_hint()
    }
}
