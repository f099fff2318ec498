pub mod document;
pub mod error;
pub mod graph;
pub mod id;
pub mod load;
pub mod validate;
pub mod wasm;

pub use error::LoadError;
pub use validate::{
    validate_document, validate_file, Diagnostic, NodeKind, ValidationReport, Validator,
    ValidatorOptions,
};
