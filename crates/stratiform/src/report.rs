//! Annotated source reports for errors and warnings.
//!
//! [`ErrorReport`] is a renderer-independent description of a diagnostic;
//! [`format_report`] renders it with annotate-snippets.

use std::borrow::Cow;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};
use stratiform_cfn::{TranslateError, UnresolvedReference};
use stratiform_document::InlineError;
use stratiform_syntax::Span;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub title: Cow<'static, str>,
    pub severity: Severity,
    /// Primary location. `None` for errors with no source position.
    pub span: Option<Span>,
    /// Label under the primary span.
    pub label: Option<Cow<'static, str>>,
    pub help: Option<Cow<'static, str>>,
}

impl ErrorReport {
    pub fn error(title: impl Into<Cow<'static, str>>, span: Option<Span>) -> Self {
        Self {
            title: title.into(),
            severity: Severity::Error,
            span,
            label: None,
            help: None,
        }
    }

    pub fn warning(title: impl Into<Cow<'static, str>>, span: Span) -> Self {
        Self {
            title: title.into(),
            severity: Severity::Warning,
            span: Some(span),
            label: None,
            help: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<Cow<'static, str>>) -> Self {
        self.help = Some(help.into());
        self
    }
}

pub fn report_error(error: &Error) -> ErrorReport {
    let report = ErrorReport::error(error.to_string(), error.span());
    match error {
        Error::Io { .. } | Error::Parse(_) => report,
        Error::Translate(err) => match err {
            TranslateError::UnknownParameterType { .. } => report
                .with_label("unrecognized type")
                .with_help("use `string`, `number`, or `cidr`"),
            TranslateError::MalformedString { source, .. } => match source {
                InlineError::Unquoted => report,
                InlineError::MalformedMarker { .. } => report
                    .with_label("malformed here")
                    .with_help("inline references are written as `{{ name }}`"),
            },
            TranslateError::DuplicateLogicalId { existing, .. } => report
                .with_label("declared again here")
                .with_help(format!(
                    "logical ids share one namespace across `Parameters` and `Resources`; \
                     rename this one or the entry in `{existing}`"
                )),
            TranslateError::Build { .. } => report,
        },
    }
}

pub fn report_unresolved(reference: &UnresolvedReference) -> ErrorReport {
    ErrorReport::warning(
        format!(
            "reference to undeclared `{}` in `{}`",
            reference.logical_id, reference.location
        ),
        reference.span,
    )
    .with_label("no parameter or resource has this logical id")
}

/// Render `report` against `source`. `path` is shown as the file name.
pub fn format_report(report: &ErrorReport, source: &str, path: &str, styled: bool) -> String {
    let level = match report.severity {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    };
    let span = clamp(report.span.unwrap_or_default(), source);

    let mut annotation = AnnotationKind::Primary.span(span.clone());
    if let Some(label) = &report.label {
        annotation = annotation.label(label.as_ref());
    }
    let mut groups: Vec<Group<'_>> = vec![
        level.primary_title(report.title.as_ref()).element(
            Snippet::source(source)
                .line_start(1)
                .path(path)
                .annotation(annotation),
        ),
    ];
    if let Some(help) = &report.help {
        groups.push(
            Level::HELP.primary_title(help.as_ref()).element(
                Snippet::source(source)
                    .line_start(1)
                    .path(path)
                    .annotation(AnnotationKind::Context.span(span)),
            ),
        );
    }

    let renderer = if styled {
        Renderer::styled()
    } else {
        Renderer::plain()
    };
    renderer.render(&groups).to_string()
}

/// Render an error. I/O errors have no source to show.
pub fn format_error(error: &Error, source: &str, path: &str, styled: bool) -> String {
    match error {
        Error::Io { .. } => format!("error: {error}"),
        _ => format_report(&report_error(error), source, path, styled),
    }
}

fn clamp(span: Span, source: &str) -> core::ops::Range<usize> {
    let start = (span.start as usize).min(source.len());
    let end = (span.end as usize).min(source.len()).max(start);
    start..end
}
