//! Syntax layer of the Stratiform DSL.
//!
//! [`parse`] turns source text into a [`Template`], a closed tree of typed
//! constructs. [`walk`] drives a [`TemplateVisitor`] over that tree in source
//! declaration order.

pub mod ast;
pub mod error;
pub mod lexer;
mod parser;
pub mod span;
pub mod visitor;

pub use ast::*;
pub use error::{ParseError, ParseErrorKind};
pub use parser::parse;
pub use span::Span;
pub use visitor::{TemplateVisitor, walk};
