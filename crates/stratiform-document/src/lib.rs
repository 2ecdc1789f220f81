//! Output document model for Stratiform translations.
//!
//! The pieces, leaf first:
//!
//! - [`identifier`]: reference name to logical id normalization.
//! - [`inline`]: string literal to [`Value`] resolution (`{{ name }}` markers).
//! - [`document`]: the ordered [`OutputDocument`] and its entries.
//! - [`builder`]: the only way to populate an [`OutputDocument`].
//!
//! Serialization preserves insertion order of every mapping.

pub mod builder;
pub mod document;
pub mod identifier;
pub mod inline;
mod ser;
pub mod value;

pub use builder::{BuildError, DocumentBuilder, Scalar};
pub use document::{
    OutputDocument, Parameter, ParameterConstraint, ParameterType, Properties, PropertyValue,
    Resource, ResourceType, SectionKey,
};
pub use identifier::{LogicalId, normalize};
pub use inline::{InlineError, MarkerDefect, resolve, unquote};
pub use value::Value;
