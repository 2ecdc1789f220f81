use stratiform_document::{BuildError, InlineError, LogicalId, SectionKey};
use stratiform_syntax::{Span, StringLiteral};

/// A fatal translation error. The first one aborts the run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    #[error("unrecognized parameter type `{keyword}`: expected `string`, `number`, or `cidr`")]
    UnknownParameterType { keyword: String, span: Span },

    #[error("{source}")]
    MalformedString {
        #[source]
        source: InlineError,
        /// The defect inside the literal, or the whole literal.
        span: Span,
    },

    #[error("duplicate logical id `{logical_id}`: already declared in `{existing}`")]
    DuplicateLogicalId {
        logical_id: LogicalId,
        existing: SectionKey,
        span: Span,
    },

    #[error("{source}")]
    Build {
        #[source]
        source: BuildError,
        span: Span,
    },
}

impl TranslateError {
    /// Span of the construct or literal that failed.
    pub fn span(&self) -> Span {
        match self {
            TranslateError::UnknownParameterType { span, .. }
            | TranslateError::MalformedString { span, .. }
            | TranslateError::DuplicateLogicalId { span, .. }
            | TranslateError::Build { span, .. } => *span,
        }
    }

    pub(crate) fn malformed(source: InlineError, literal: &StringLiteral) -> Self {
        let span = match source.offset_in_literal() {
            Some(offset) => literal.span.subspan(offset as u32, 2),
            None => literal.span,
        };
        TranslateError::MalformedString { source, span }
    }

    pub(crate) fn build(source: BuildError, span: Span) -> Self {
        match source {
            BuildError::DuplicateLogicalId {
                logical_id,
                existing,
            } => TranslateError::DuplicateLogicalId {
                logical_id,
                existing,
                span,
            },
            source => TranslateError::Build { source, span },
        }
    }
}
