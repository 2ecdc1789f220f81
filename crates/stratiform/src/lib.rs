pub mod error;
pub mod pipeline;
pub mod report;

pub use stratiform_cfn as cfn;
pub use stratiform_document as document;
pub use stratiform_syntax as syntax;

pub use error::Error;
pub use pipeline::{Translation, read_source, translate_file, translate_source};
