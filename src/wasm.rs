//! WASM entry points for browser use.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::load::{self, Format};
use crate::validate::{ValidationReport, Validator};

/// Validate workflow DSL text (YAML or JSON).
/// Returns `{ status: "checked", report }` or `{ status: "load_error", message }`.
#[wasm_bindgen]
pub fn validate_workflow(source: &str) -> JsValue {
    let result = validate_workflow_inner(source);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

/// Generate one node id.
#[wasm_bindgen]
pub fn generate_node_id() -> String {
    crate::id::generate_id()
}

fn validate_workflow_inner(source: &str) -> ValidateResult {
    // JSON is a subset of YAML, so one parser covers both.
    match load::parse_str(source, Format::Yaml) {
        Ok(document) => ValidateResult::Checked {
            report: Validator::new().validate(&document),
        },
        Err(e) => ValidateResult::LoadError {
            message: e.to_string(),
        },
    }
}

#[derive(Serialize)]
#[serde(tag = "status")]
enum ValidateResult {
    #[serde(rename = "checked")]
    Checked { report: ValidationReport },
    #[serde(rename = "load_error")]
    LoadError { message: String },
}
