use std::io;
use std::path::PathBuf;

use stratiform_cfn::TranslateError;
use stratiform_syntax::{ParseError, Span};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Translate(#[from] TranslateError),
}

impl Error {
    /// Source span the error points at, if it comes from the input text.
    pub fn span(&self) -> Option<Span> {
        match self {
            Error::Io { .. } => None,
            Error::Parse(err) => Some(err.span),
            Error::Translate(err) => Some(err.span()),
        }
    }
}
