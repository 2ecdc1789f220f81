//! Token-level parsers for Stratiform source text.
//!
//! Whitespace and `#` line comments are trivia and never produce tokens.
//! String tokens keep their surrounding quotes; unquoting and inline
//! reference handling happen later in the translation layer.

use core::fmt::{self, Display};

use winnow::{
    Parser,
    ascii::till_line_ending,
    combinator::{alt, repeat},
    error::{ContextError, ErrMode},
    stream::{LocatingSlice, Location, Stream},
    token::{one_of, take_while},
};

use crate::ast::StringLiteral;
use crate::error::ParseError;
use crate::span::{Span, ensure_addressable};

pub(crate) type Input<'i> = LocatingSlice<&'i str>;
pub(crate) type PResult<O> = Result<O, ErrMode<ContextError>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Keyword, reference name, or property name: `[A-Za-z_][A-Za-z0-9_]*`
    Word,
    /// Double-quoted string literal, quotes included.
    Str,
    LBrace,
    RBrace,
    Colon,
    Equals,
    Semicolon,
    Eof,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Word => write!(f, "identifier"),
            TokenKind::Str => write!(f, "string literal"),
            TokenKind::LBrace => write!(f, "`{{`"),
            TokenKind::RBrace => write!(f, "`}}`"),
            TokenKind::Colon => write!(f, "`:`"),
            TokenKind::Equals => write!(f, "`=`"),
            TokenKind::Semicolon => write!(f, "`;`"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// A word borrowed from the source, with its span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Word<'i> {
    pub text: &'i str,
    pub span: Span,
}

/// Tokenize the whole input. The returned vector always ends with an `Eof` token.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    ensure_addressable(source.len())?;
    let mut input = Input::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = next_token(&mut input)?;
        tokens.push(token);
        if token.kind == TokenKind::Eof {
            return Ok(tokens);
        }
    }
}

/// Skip trivia and lex one token. Input that starts no token is a lexer error.
pub(crate) fn next_token(input: &mut Input<'_>) -> Result<Token, ParseError> {
    skip_trivia(input);
    let start = input.current_token_start();
    if input.eof_offset() == 0 {
        return Ok(Token::new(TokenKind::Eof, Span::from(start..start)));
    }
    let checkpoint = input.checkpoint();
    token.parse_next(input).map_err(|_| {
        input.reset(&checkpoint);
        lexer_error(input)
    })
}

fn token(input: &mut Input<'_>) -> PResult<Token> {
    alt((
        word.value(TokenKind::Word),
        string_literal.value(TokenKind::Str),
        '{'.value(TokenKind::LBrace),
        '}'.value(TokenKind::RBrace),
        ':'.value(TokenKind::Colon),
        '='.value(TokenKind::Equals),
        ';'.value(TokenKind::Semicolon),
    ))
    .with_span()
    .map(|(kind, range)| Token::new(kind, Span::from(range)))
    .parse_next(input)
}

/// The error for input at which [`token`] fails.
fn lexer_error(input: &Input<'_>) -> ParseError {
    let start = input.current_token_start();
    let rest = input.peek_finish();
    match rest.chars().next() {
        Some('"') => {
            let len = rest.find(['\n', '\r']).unwrap_or(rest.len());
            ParseError::lexer(
                Span::from(start..start + len),
                "unterminated string literal",
            )
        }
        Some(other) => ParseError::lexer(
            Span::from(start..start + other.len_utf8()),
            format!("unexpected character `{other}`"),
        ),
        None => ParseError::lexer(Span::from(start..start), "unexpected end of input"),
    }
}

pub(crate) fn skip_trivia(input: &mut Input<'_>) {
    // Zero repetitions always succeed.
    let _: PResult<()> = repeat(
        0..,
        alt((
            take_while(1.., char::is_whitespace).void(),
            ('#', till_line_ending).void(),
        )),
    )
    .parse_next(input);
}

/// Consume `expected` if it is the next character.
pub(crate) fn eat(input: &mut Input<'_>, expected: char) -> bool {
    if input.peek_token() == Some(expected) {
        let _ = input.next_token();
        true
    } else {
        false
    }
}

pub(crate) fn word<'i>(input: &mut Input<'i>) -> PResult<Word<'i>> {
    (
        one_of(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
    )
        .take()
        .with_span()
        .map(|(text, range)| Word {
            text,
            span: Span::from(range),
        })
        .parse_next(input)
}

/// A string literal on one line. There are no escape sequences.
pub(crate) fn string_literal(input: &mut Input<'_>) -> PResult<StringLiteral> {
    (
        '"',
        take_while(0.., |c: char| !matches!(c, '"' | '\n' | '\r')),
        '"',
    )
        .take()
        .with_span()
        .map(|(raw, range)| StringLiteral::new(raw, Span::from(range)))
        .parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn test_punctuation_and_words() {
        assert_eq!(
            kinds("vpc main_vpc { cidr_block = \"10.0.0.0/16\"; }"),
            vec![
                TokenKind::Word,
                TokenKind::Word,
                TokenKind::LBrace,
                TokenKind::Word,
                TokenKind::Equals,
                TokenKind::Str,
                TokenKind::Semicolon,
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_string_span_includes_quotes() {
        let input = "description \"a {{ b }} c\";";
        let tokens = tokenize(input).unwrap();
        assert_eq!(tokens[1].kind, TokenKind::Str);
        assert_eq!(tokens[1].span.as_str(input), "\"a {{ b }} c\"");
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            kinds("# leading comment\nversion # trailing\n\"x\";"),
            vec![
                TokenKind::Word,
                TokenKind::Str,
                TokenKind::Semicolon,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_word_spans() {
        let input = "  route_table rt2";
        let tokens = tokenize(input).unwrap();
        assert_eq!(tokens[0].span, Span::new(2, 13));
        assert_eq!(tokens[1].span.as_str(input), "rt2");
        assert_eq!(tokens[2], Token::new(TokenKind::Eof, Span::new(17, 17)));
    }

    #[test]
    fn test_unterminated_string() {
        let err = tokenize("version \"2010-09-09;\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::LexerError);
        assert_eq!(err.message, "unterminated string literal");
        assert_eq!(err.span, Span::new(8, 20));
    }

    #[test]
    fn test_unterminated_string_at_end_of_input() {
        let err = tokenize("description \"open").unwrap_err();
        assert_eq!(err.span, Span::new(12, 17));
    }

    #[test]
    fn test_unexpected_character() {
        let err = tokenize("version @").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::LexerError);
        assert_eq!(err.message, "unexpected character `@`");
        assert_eq!(err.span, Span::new(8, 9));
    }

    #[test]
    fn test_empty_input_is_eof() {
        assert_eq!(kinds("  \n\t"), vec![TokenKind::Eof]);
    }
}
