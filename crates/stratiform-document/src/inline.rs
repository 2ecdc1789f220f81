//! Resolution of string literals containing inline references.
//!
//! A literal body is split into plain-text runs and `{{ name }}` markers,
//! scanning left to right. The result takes one of three shapes:
//!
//! - no marker at all: [`Value::Literal`] of the body,
//! - exactly one marker and nothing else: [`Value::Reference`],
//! - anything else: an empty-delimiter [`Value::Join`] of the segments,
//!   without empty text runs.

use tracing::trace;

use crate::identifier::normalize;
use crate::value::Value;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InlineError {
    #[error("string literal is not enclosed in double quotes")]
    Unquoted,
    #[error("malformed inline reference: {defect}")]
    MalformedMarker {
        /// Byte offset of the defect in the unquoted body.
        offset: usize,
        defect: MarkerDefect,
    },
}

impl InlineError {
    /// Byte offset of the defect in the quoted literal, if there is one.
    pub fn offset_in_literal(&self) -> Option<usize> {
        match self {
            InlineError::Unquoted => None,
            InlineError::MalformedMarker { offset, .. } => Some(offset + 1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MarkerDefect {
    #[error("`{{{{` must be followed by a space")]
    MissingOpeningSpace,
    #[error("empty reference name")]
    EmptyReference,
    #[error("nested `{{{{` inside a reference")]
    NestedMarker,
    #[error("expected ` }}}}` after the reference name")]
    ExpectedClose,
    #[error("`}}}}` without a matching `{{{{`")]
    UnmatchedClose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Text(&'a str),
    Marker(&'a str),
}

impl Segment<'_> {
    fn to_value(self) -> Value {
        match self {
            Segment::Text(text) => Value::literal(text),
            Segment::Marker(name) => Value::Reference(normalize(name)),
        }
    }
}

enum Delimiter {
    Open(usize),
    Close(usize),
}

/// Resolve a quoted string literal into a [`Value`].
pub fn resolve(literal: &str) -> Result<Value, InlineError> {
    let body = unquote(literal)?;
    let segments = scan(body)?;
    let value = match segments.as_slice() {
        [] => Value::literal(""),
        [Segment::Text(text)] => Value::literal(*text),
        [Segment::Marker(name)] => Value::Reference(normalize(name)),
        _ => Value::concat(segments.iter().copied().map(Segment::to_value).collect()),
    };
    trace!(literal, ?value, "resolved string literal");
    Ok(value)
}

/// Strip exactly one leading and one trailing double quote.
pub fn unquote(literal: &str) -> Result<&str, InlineError> {
    literal
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or(InlineError::Unquoted)
}

fn scan(body: &str) -> Result<Vec<Segment<'_>>, InlineError> {
    let mut segments = Vec::new();
    let mut text_start = 0;
    while let Some(delimiter) = next_delimiter(body, text_start) {
        match delimiter {
            Delimiter::Close(at) => return Err(malformed(at, MarkerDefect::UnmatchedClose)),
            Delimiter::Open(at) => {
                if at > text_start {
                    segments.push(Segment::Text(&body[text_start..at]));
                }
                let (name, end) = marker(body, at)?;
                segments.push(Segment::Marker(name));
                text_start = end;
            }
        }
    }
    if text_start < body.len() {
        segments.push(Segment::Text(&body[text_start..]));
    }
    Ok(segments)
}

fn next_delimiter(body: &str, from: usize) -> Option<Delimiter> {
    let rest = &body[from..];
    let open = rest.find(OPEN).map(|i| i + from);
    let close = rest.find(CLOSE).map(|i| i + from);
    match (open, close) {
        (Some(open), Some(close)) if close < open => Some(Delimiter::Close(close)),
        (Some(open), _) => Some(Delimiter::Open(open)),
        (None, Some(close)) => Some(Delimiter::Close(close)),
        (None, None) => None,
    }
}

/// Parse the marker whose `{{` starts at `at`. Returns the reference name
/// and the offset just past the closing `}}`.
fn marker(body: &str, at: usize) -> Result<(&str, usize), InlineError> {
    let after_open = at + OPEN.len();
    if !body[after_open..].starts_with(' ') {
        return Err(malformed(at, MarkerDefect::MissingOpeningSpace));
    }
    let name_start = after_open + 1;
    let name_len = body[name_start..]
        .find(|c: char| c.is_whitespace() || c == '{' || c == '}')
        .unwrap_or(body.len() - name_start);
    let name_end = name_start + name_len;

    if body[name_end..].starts_with('{') {
        return Err(malformed(name_end, MarkerDefect::NestedMarker));
    }
    if name_len == 0 {
        return Err(malformed(at, MarkerDefect::EmptyReference));
    }
    if !body[name_end..].starts_with(" }}") {
        return Err(malformed(name_end, MarkerDefect::ExpectedClose));
    }
    Ok((&body[name_start..name_end], name_end + 3))
}

fn malformed(offset: usize, defect: MarkerDefect) -> InlineError {
    InlineError::MalformedMarker { offset, defect }
}
