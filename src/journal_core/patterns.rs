//! Markup recognition.
//!
//! `PatternConfig` bundles the two user-supplied regular expressions with the
//! todo replacement template and state markers. It is built once at startup
//! and only read afterwards.

use super::template::ReplacementTemplate;
use super::tokenizer::{TodoState, Token};
use crate::constants::{FALLBACK_EMPTY_MARKER, GROUP_NAME, GROUP_STATE};
use crate::errors::ConfigError;
use regex::{Captures, Regex};
use std::ops::Range;

/// The literal state markers of a todo line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoMarkers {
    checked: String,
    empty: String,
}

impl TodoMarkers {
    /// Creates the markers. An empty `empty` marker becomes a single space.
    pub fn new(checked: impl Into<String>, empty: impl Into<String>) -> Self {
        let empty = empty.into();
        Self {
            checked: checked.into(),
            empty: if empty.is_empty() {
                FALLBACK_EMPTY_MARKER.to_string()
            } else {
                empty
            },
        }
    }

    pub fn checked(&self) -> &str {
        &self.checked
    }

    pub fn empty(&self) -> &str {
        &self.empty
    }

    fn state_of(&self, marker: &str) -> TodoState {
        if marker == self.checked {
            TodoState::Checked
        } else if marker == self.empty {
            TodoState::Empty
        } else {
            TodoState::Unrecognized
        }
    }
}

/// Compiled markup configuration shared by the tokenizer and carry-forward.
///
/// # Examples
///
/// ```
/// use diary::journal_core::{PatternConfig, TodoMarkers, Token, TodoState};
///
/// let patterns = PatternConfig::new(
///     r"^#+\s*(?P<name>.+)$",
///     r"\[(?P<state>.)\]\s*(?P<name>.*)$",
///     "[{state}] {name}",
///     TodoMarkers::new("x", " "),
/// )
/// .unwrap();
///
/// match patterns.classify("- [x] buy milk".to_string()) {
///     Token::Todo { name, state, .. } => {
///         assert_eq!(name, "buy milk");
///         assert_eq!(state, TodoState::Checked);
///     }
///     other => panic!("unexpected token {:?}", other),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PatternConfig {
    section: Regex,
    todo: Regex,
    replacement: ReplacementTemplate,
    markers: TodoMarkers,
}

impl PatternConfig {
    /// Compiles and validates the markup settings.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a pattern does not compile, lacks one of its
    /// required named groups, or if the replacement template is malformed.
    pub fn new(
        section_pattern: &str,
        todo_pattern: &str,
        todo_replacement: &str,
        markers: TodoMarkers,
    ) -> Result<Self, ConfigError> {
        let section = compile("section_pattern", section_pattern, &[GROUP_NAME])?;
        let todo = compile("todo_pattern", todo_pattern, &[GROUP_NAME, GROUP_STATE])?;
        let replacement = ReplacementTemplate::parse(todo_replacement)?;

        Ok(Self {
            section,
            todo,
            replacement,
            markers,
        })
    }

    /// Classifies a single line, newline already stripped.
    ///
    /// The section pattern is tried first; a line matching both patterns is a
    /// section. Either pattern may match anywhere in the line.
    pub fn classify(&self, line: String) -> Token {
        let section = self
            .section
            .captures(&line)
            .map(|caps| (match_span(&caps), group_text(&caps, GROUP_NAME)));
        if let Some((span, name)) = section {
            return Token::Section { line, span, name };
        }

        let todo = self.todo.captures(&line).map(|caps| {
            let state = self.markers.state_of(&group_text(&caps, GROUP_STATE));
            (match_span(&caps), group_text(&caps, GROUP_NAME), state)
        });
        if let Some((span, name, state)) = todo {
            return Token::Todo {
                line,
                span,
                name,
                state,
            };
        }

        Token::Plain { line }
    }

    pub fn replacement(&self) -> &ReplacementTemplate {
        &self.replacement
    }

    pub fn markers(&self) -> &TodoMarkers {
        &self.markers
    }
}

fn compile(
    setting: &'static str,
    pattern: &str,
    groups: &[&'static str],
) -> Result<Regex, ConfigError> {
    let regex =
        Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern { setting, source })?;

    for &group in groups {
        if !regex.capture_names().flatten().any(|name| name == group) {
            return Err(ConfigError::MissingGroup { setting, group });
        }
    }
    Ok(regex)
}

fn match_span(caps: &Captures<'_>) -> Range<usize> {
    caps.get(0).map_or(0..0, |m| m.range())
}

// An optional group that did not take part in the match reads as "".
fn group_text(caps: &Captures<'_>, group: &str) -> String {
    caps.name(group)
        .map_or_else(String::new, |m| m.as_str().to_string())
}
