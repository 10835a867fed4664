//! Parser error types.

use crate::lexer::{Span, TokenKind};

/// A parse error.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// The error message.
    pub message: String,
    /// The location of the error.
    pub span: Span,
    /// Expected tokens (if applicable).
    pub expected: Option<String>,
    /// The actual token found.
    pub found: Option<TokenKind>,
    /// The full expected-set, populated only on the tracked reparse pass.
    pub expected_set: Vec<String>,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            expected: None,
            found: None,
            expected_set: Vec::new(),
        }
    }

    /// Creates an "unexpected token" error.
    #[must_use]
    pub fn unexpected(expected: impl Into<String>, found: TokenKind, span: Span) -> Self {
        let expected_str: String = expected.into();
        Self {
            message: format!("Unexpected token: expected {expected_str}, found {found:?}"),
            span,
            expected: Some(expected_str),
            found: Some(found),
            expected_set: Vec::new(),
        }
    }

    /// Creates an "unexpected end of input" error.
    #[must_use]
    pub fn unexpected_eof(expected: impl Into<String>, span: Span) -> Self {
        let expected_str: String = expected.into();
        Self {
            message: format!("Unexpected end of input: expected {expected_str}"),
            span,
            expected: Some(expected_str),
            found: Some(TokenKind::Eof),
            expected_set: Vec::new(),
        }
    }

    /// Attaches a fully-tracked expected-set, gathered during the reparse
    /// pass. Mirrors the "expected: A | B | C" diagnostic from the
    /// tracked parse.
    #[must_use]
    pub fn with_expected_set(mut self, expected_set: Vec<String>) -> Self {
        self.expected_set = expected_set;
        self
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at position {}..{}",
            self.message, self.span.start, self.span.end
        )?;
        if !self.expected_set.is_empty() {
            write!(f, " (expected: {})", self.expected_set.join(" | "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_token_message() {
        let err = ParseError::unexpected("SELECT", TokenKind::Eof, Span::new(0, 0));
        assert!(err.message.contains("SELECT"));
    }

    #[test]
    fn test_display_includes_position() {
        let err = ParseError::new("bad token", Span::new(3, 7));
        assert_eq!(format!("{err}"), "bad token at position 3..7");
    }

    #[test]
    fn test_with_expected_set() {
        let err = ParseError::unexpected("identifier", TokenKind::Eof, Span::new(0, 0))
            .with_expected_set(vec!["SELECT".to_string(), "INSERT".to_string()]);
        assert_eq!(format!("{err}"), "Unexpected token: expected identifier, found Eof at position 0..0 (expected: SELECT | INSERT)");
    }
}
