//! Validation phase: generic document tree → `ValidationReport`.
//!
//! Rules run in a fixed order (top level, app, workflow, nodes, edges) and the
//! report keeps that order. Schema problems are always reported, never returned
//! as `Err`.

pub mod node_rules;
pub mod report;
pub mod structural;
pub mod topology;

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::LoadError;

pub use node_rules::NodeKind;
pub use report::{Diagnostic, ValidationReport};

/// Languages a `code` node may declare unless configured otherwise.
pub const DEFAULT_CODE_LANGUAGES: [&str; 2] = ["python3", "javascript"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorOptions {
    /// Accepted values for a code node's `code_language`.
    pub code_languages: Vec<String>,
    /// Append cycle and reachability warnings after the edge checks.
    pub topology_checks: bool,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        ValidatorOptions {
            code_languages: DEFAULT_CODE_LANGUAGES.iter().map(|l| l.to_string()).collect(),
            topology_checks: false,
        }
    }
}

/// Stateless between calls: each `validate` builds its own report, so one
/// validator can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    options: ValidatorOptions,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ValidatorOptions) -> Self {
        Validator { options }
    }

    pub fn validate(&self, document: &Value) -> ValidationReport {
        let _span = tracing::debug_span!("validate").entered();
        let mut report = ValidationReport::default();

        structural::validate_structural(document, &self.options, &mut report);

        debug!(
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            "validation finished"
        );
        report
    }
}

/// Validate a document with default options.
pub fn validate_document(document: &Value) -> ValidationReport {
    Validator::new().validate(document)
}

/// Load a DSL file and validate it. Load failures short-circuit before any rule runs.
pub fn validate_file(
    path: &Path,
    options: &ValidatorOptions,
) -> Result<ValidationReport, LoadError> {
    let document = crate::load::load_file(path)?;
    Ok(Validator::with_options(options.clone()).validate(&document))
}
