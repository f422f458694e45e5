//! The todo replacement template.
//!
//! Templates use brace placeholders: `{name}` and `{state}` are substituted,
//! `{{` and `}}` stand for literal braces. Anything else inside braces is
//! rejected when the template is parsed, so rendering itself cannot fail.

use crate::constants::{GROUP_NAME, GROUP_STATE};
use crate::errors::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Name,
    State,
}

/// A parsed `todo_replacement` template.
///
/// # Examples
///
/// ```
/// use diary::journal_core::ReplacementTemplate;
///
/// let template = ReplacementTemplate::parse("[{state}] {name}").unwrap();
/// assert_eq!(template.render("buy milk", " "), "[ ] buy milk");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl ReplacementTemplate {
    /// Parses a template, rejecting unknown placeholders and unbalanced braces.
    pub fn parse(template: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidTemplate {
            template: template.to_string(),
            reason,
        };

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut field = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some('{') | None => {
                                return Err(invalid("unclosed '{'".to_string()));
                            }
                            Some(c) => field.push(c),
                        }
                    }
                    let segment = match field.as_str() {
                        GROUP_NAME => Segment::Name,
                        GROUP_STATE => Segment::State,
                        other => {
                            return Err(invalid(format!(
                                "unknown placeholder {{{other}}}, only {{name}} and {{state}} are available"
                            )));
                        }
                    };
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(segment);
                }
                '}' => {
                    return Err(invalid("a single '}' must be written as '}}'".to_string()));
                }
                c => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: template.to_string(),
            segments,
        })
    }

    /// Renders the template with the given todo name and state marker.
    pub fn render(&self, name: &str, state: &str) -> String {
        let mut out = String::with_capacity(self.source.len() + name.len() + state.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Name => out.push_str(name),
                Segment::State => out.push_str(state),
            }
        }
        out
    }

    /// The template as it was configured.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_both_fields() {
        let template = ReplacementTemplate::parse("- [{state}] {name}").unwrap();
        assert_eq!(template.render("call mom", " "), "- [ ] call mom");
    }

    #[test]
    fn test_fields_may_repeat_or_be_omitted() {
        let template = ReplacementTemplate::parse("{name}/{name}").unwrap();
        assert_eq!(template.render("a", "x"), "a/a");

        let template = ReplacementTemplate::parse("TODO").unwrap();
        assert_eq!(template.render("a", "x"), "TODO");
    }

    #[test]
    fn test_escaped_braces() {
        let template = ReplacementTemplate::parse("{{{state}}} {name}").unwrap();
        assert_eq!(template.render("x", " "), "{ } x");
    }

    #[test]
    fn test_unknown_placeholder_is_rejected() {
        let result = ReplacementTemplate::parse("[{status}] {name}");
        match result {
            Err(ConfigError::InvalidTemplate { reason, .. }) => {
                assert!(reason.contains("{status}"));
            }
            _ => panic!("Expected InvalidTemplate error"),
        }
    }

    #[test]
    fn test_unbalanced_braces_are_rejected() {
        assert!(ReplacementTemplate::parse("[{state] {name}").is_err());
        assert!(ReplacementTemplate::parse("[{state}] {name").is_err());
        assert!(ReplacementTemplate::parse("state}").is_err());
    }

    #[test]
    fn test_as_str_keeps_source() {
        let template = ReplacementTemplate::parse("[{state}] {name}").unwrap();
        assert_eq!(template.as_str(), "[{state}] {name}");
    }
}
