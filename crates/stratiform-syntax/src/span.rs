use core::ops::Range;

use crate::error::ParseError;

/// A byte range in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Offsets past `u32::MAX` saturate; [`ensure_addressable`] rejects such
    /// inputs before any span is built.
    pub(crate) fn from_offsets(start: usize, end: usize) -> Self {
        Self {
            start: u32::try_from(start).unwrap_or(u32::MAX),
            end: u32::try_from(end).unwrap_or(u32::MAX),
        }
    }

    pub fn as_str<'a>(&self, input: &'a str) -> &'a str {
        &input[self.start as usize..self.end as usize]
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// A span covering `len` bytes at `offset` bytes past the start of this span.
    pub fn subspan(&self, offset: u32, len: u32) -> Self {
        let start = (self.start + offset).min(self.end);
        Self {
            start,
            end: (start + len).min(self.end),
        }
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::from_offsets(range.start, range.end)
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.start as usize..span.end as usize
    }
}

/// Spans store `u32` offsets, so longer inputs cannot be parsed.
pub(crate) fn ensure_addressable(len: usize) -> Result<(), ParseError> {
    if u32::try_from(len).is_err() {
        return Err(ParseError::lexer(
            Span::new(0, 0),
            format!(
                "input of {len} bytes is too large: at most {} bytes are supported",
                u32::MAX
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge() {
        let merged = Span::new(4, 8).merge(Span::new(2, 6));
        assert_eq!(merged, Span::new(2, 8));
    }

    #[test]
    fn test_subspan_is_clamped() {
        let span = Span::new(10, 20);
        assert_eq!(span.subspan(2, 3), Span::new(12, 15));
        assert_eq!(span.subspan(8, 5), Span::new(18, 20));
        assert_eq!(span.subspan(30, 1), Span::new(20, 20));
    }

    #[test]
    fn test_offsets_past_u32_saturate() {
        let span = Span::from_offsets(usize::MAX, usize::MAX);
        assert_eq!(span, Span::new(u32::MAX, u32::MAX));
        assert_eq!(Span::from(3..7), Span::new(3, 7));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_ensure_addressable() {
        assert!(ensure_addressable(u32::MAX as usize).is_ok());
        let err = ensure_addressable(u32::MAX as usize + 1).unwrap_err();
        assert_eq!(err.kind, crate::error::ParseErrorKind::LexerError);
        assert!(err.message.starts_with("input of 4294967296 bytes is too large"));
    }

    #[test]
    fn test_as_str() {
        let input = "version \"1\";";
        assert_eq!(Span::new(8, 11).as_str(input), "\"1\"");
    }
}
