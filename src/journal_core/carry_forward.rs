//! Seeding a new entry from a previous one.
//!
//! Sections are copied verbatim, todos are rewritten to the empty state and
//! everything else is dropped. Each output line depends only on its own
//! input line.

use super::patterns::PatternConfig;
use super::tokenizer::Token;
use std::io::{self, Write};

/// What a carry-forward run kept and dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CarryForwardSummary {
    pub sections: usize,
    pub todos: usize,
    pub dropped: usize,
}

impl CarryForwardSummary {
    /// Number of lines written.
    pub fn written(&self) -> usize {
        self.sections + self.todos
    }
}

/// Transforms one token into its carried-forward line, if it survives.
///
/// # Examples
///
/// ```
/// use diary::journal_core::{carry_token, PatternConfig, TodoMarkers};
///
/// let patterns = PatternConfig::new(
///     r"^#+\s*(?P<name>.+)$",
///     r"\[(?P<state>.)\]\s*(?P<name>.*)$",
///     "[{state}] {name}",
///     TodoMarkers::new("x", " "),
/// )
/// .unwrap();
///
/// let token = patterns.classify("- [x] buy milk".to_string());
/// assert_eq!(carry_token(&patterns, token).as_deref(), Some("- [ ] buy milk"));
/// ```
pub fn carry_token(patterns: &PatternConfig, token: Token) -> Option<String> {
    match token {
        Token::Section { line, .. } => Some(line),
        Token::Todo {
            line, span, name, ..
        } => {
            let replacement = patterns
                .replacement()
                .render(&name, patterns.markers().empty());
            let mut out = String::with_capacity(line.len() + replacement.len());
            out.push_str(&line[..span.start]);
            out.push_str(&replacement);
            out.push_str(&line[span.end..]);
            Some(out)
        }
        Token::Plain { .. } => None,
    }
}

/// Writes the carried-forward form of `tokens` to `out`, one line per
/// surviving token, each terminated by `\n`.
///
/// Stops at the first read or write error.
pub fn carry_forward<I, E, W>(
    patterns: &PatternConfig,
    tokens: I,
    out: &mut W,
) -> Result<CarryForwardSummary, E>
where
    I: IntoIterator<Item = Result<Token, E>>,
    E: From<io::Error>,
    W: Write + ?Sized,
{
    let mut summary = CarryForwardSummary::default();

    for token in tokens {
        let token = token?;
        match &token {
            Token::Section { .. } => summary.sections += 1,
            Token::Todo { .. } => summary.todos += 1,
            Token::Plain { .. } => summary.dropped += 1,
        }
        if let Some(line) = carry_token(patterns, token) {
            out.write_all(line.as_bytes())?;
            out.write_all(b"\n")?;
        }
    }

    Ok(summary)
}
