//! Parse error types for Stratiform.

use crate::span::Span;

/// A parse error with the span of the offending input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    /// The span in the input where the error occurred.
    pub span: Span,
    /// The error message.
    pub message: String,
    /// The kind of parse error.
    pub kind: ParseErrorKind,
}

/// The kind of parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Invalid character or unterminated string literal.
    LexerError,
    /// Unexpected token, or a construct the grammar does not allow.
    SyntaxError,
}

impl ParseError {
    pub fn lexer(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            kind: ParseErrorKind::LexerError,
        }
    }

    pub fn syntax(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            kind: ParseErrorKind::SyntaxError,
        }
    }
}
