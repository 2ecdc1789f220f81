//! Source text to output document, in one call.

use std::fs;
use std::path::Path;

use stratiform_cfn::{UnresolvedReference, translate, unresolved_references};
use stratiform_document::OutputDocument;
use stratiform_syntax::{Template, parse};
use tracing::debug;

use crate::error::Error;

/// A parsed template together with its translation.
#[derive(Debug, Clone)]
pub struct Translation {
    pub template: Template,
    pub document: OutputDocument,
}

impl Translation {
    pub fn unresolved_references(&self) -> Vec<UnresolvedReference> {
        unresolved_references(&self.template, &self.document)
    }
}

pub fn translate_source(source: &str) -> Result<Translation, Error> {
    let template = parse(source)?;
    debug!(items = template.items.len(), "parsed template");
    let document = translate(&template)?;
    Ok(Translation { template, document })
}

pub fn read_source(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and translate the file at `path`.
pub fn translate_file(path: &Path) -> Result<Translation, Error> {
    let source = read_source(path)?;
    translate_source(&source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_stops_before_translation() {
        let err = translate_source("resources { bucket b {} }").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_translate_error_propagates() {
        let err = translate_source(r#"parameters { p: flag = "x"; }"#).unwrap_err();
        assert!(matches!(err, Error::Translate(_)));
        assert_eq!(err.span().map(|s| (s.start, s.end)), Some((16, 20)));
    }

    #[test]
    fn test_missing_file() {
        let err = translate_file(Path::new("/nonexistent/template.stf")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().starts_with("failed to read `/nonexistent/template.stf`"));
    }
}
