use std::io;

use serde::Serialize;
use serde::ser::Error as _;
use serde_json::ser::{CompactFormatter, PrettyFormatter, Serializer};
use stratiform_document::OutputDocument;

use crate::config::{Config, OutputStyle};

/// Write `document` as JSON to `writer`, laid out per `config`.
pub fn to_writer<W: io::Write>(
    writer: W,
    document: &OutputDocument,
    config: &Config,
) -> serde_json::Result<()> {
    match config.style {
        OutputStyle::Pretty { indent } => {
            let indent = " ".repeat(indent);
            let formatter = PrettyFormatter::with_indent(indent.as_bytes());
            let mut serializer = Serializer::with_formatter(writer, formatter);
            document.serialize(&mut serializer)
        }
        OutputStyle::Compact => {
            let mut serializer = Serializer::with_formatter(writer, CompactFormatter);
            document.serialize(&mut serializer)
        }
    }
}

/// Render `document` as a JSON string.
pub fn to_string(document: &OutputDocument, config: &Config) -> serde_json::Result<String> {
    let mut buffer = Vec::with_capacity(256);
    to_writer(&mut buffer, document, config)?;
    String::from_utf8(buffer).map_err(serde_json::Error::custom)
}

/// Convert `document` to a [`serde_json::Value`], keeping key order.
pub fn document_to_value(document: &OutputDocument) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use stratiform_syntax::parse;

    use crate::translate;

    fn document(input: &str) -> OutputDocument {
        translate(&parse(input).unwrap()).unwrap()
    }

    #[test]
    fn test_pretty_default_indent() {
        let doc = document(r#"version "2010-09-09"; parameters { env: string = "dev"; }"#);
        assert_eq!(
            to_string(&doc, &Config::default()).unwrap(),
            r#"{
  "AWSTemplateFormatVersion": "2010-09-09",
  "Parameters": {
    "Env": {
      "Type": "String",
      "Default": "dev"
    }
  }
}"#
        );
    }

    #[test]
    fn test_custom_indent() {
        let doc = document(r#"description "d";"#);
        assert_eq!(
            to_string(&doc, &Config::pretty(4)).unwrap(),
            "{\n    \"Description\": \"d\"\n}"
        );
    }

    #[test]
    fn test_compact() {
        let doc = document(r#"description "{{ env }}";"#);
        assert_eq!(
            to_string(&doc, &Config::compact()).unwrap(),
            r#"{"Description":{"Ref":"Env"}}"#
        );
    }

    #[test]
    fn test_non_ascii_text_is_kept() {
        let doc = document(r#"description "réseau ✓ {{ env }}";"#);
        assert_eq!(
            to_string(&doc, &Config::compact()).unwrap(),
            r#"{"Description":{"Fn::Join":["",["réseau ✓ ",{"Ref":"Env"}]]}}"#
        );
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(
            to_string(&OutputDocument::default(), &Config::compact()).unwrap(),
            "{}"
        );
    }

    #[test]
    fn test_value_keeps_key_order() {
        let doc = document(
            r#"
            resources {
                route_table zeta { name = "z"; description = "z"; vpc_id = "v"; }
                route_table alpha { name = "a"; description = "a"; vpc_id = "v"; }
            }
            version "2010-09-09";
            "#,
        );
        let value = document_to_value(&doc).unwrap();
        let top = value.as_object().unwrap();
        assert_eq!(
            top.keys().collect::<Vec<_>>(),
            vec!["Resources", "AWSTemplateFormatVersion"]
        );
        assert_eq!(
            top["Resources"].as_object().unwrap().keys().collect::<Vec<_>>(),
            vec!["Zeta", "Alpha"]
        );
    }
}
