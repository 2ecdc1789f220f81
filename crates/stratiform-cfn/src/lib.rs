//! CloudFormation translation for Stratiform templates.
//!
//! [`translate`] walks a parsed [`Template`](stratiform_syntax::Template)
//! and applies one mapping rule per construct kind (see [`mapping`]),
//! feeding a [`DocumentBuilder`](stratiform_document::DocumentBuilder).
//! [`to_string`] renders the finished document as JSON.

mod check;
mod config;
mod error;
mod format;
pub mod mapping;
mod translate;

pub use check::{UnresolvedReference, unresolved_references};
pub use config::{Config, OutputStyle};
pub use error::TranslateError;
pub use format::{document_to_value, to_string, to_writer};
pub use translate::{CloudFormationVisitor, translate};
