//! Integration tests for node iteration and per-type node rules.

#[allow(dead_code)]
mod helpers;

use dsl_validator::{validate_document, Validator, ValidatorOptions};
use helpers::*;
use serde_json::json;

// =============================================================================
// Node iteration
// =============================================================================

#[test]
fn node_without_id_is_skipped_entirely() {
    let doc = document_with_graph(
        vec![
            start_node("start"),
            json!({ "data": { "type": "llm" } }),
            json!({ "id": "", "data": { "type": "code" } }),
            end_node("end"),
        ],
        vec![edge("start", "end")],
    );
    let report = validate_document(&doc);
    assert_eq!(
        report.error_messages(),
        vec!["Node at index 1 missing 'id'", "Node at index 2 missing 'id'"]
    );
}

#[test]
fn duplicate_id_reported_once_and_both_nodes_checked() {
    let doc = document_with_graph(
        vec![
            start_node("start"),
            node("dup", json!({ "type": "if-else" })),
            node("dup", json!({ "type": "if-else" })),
            end_node("end"),
        ],
        vec![edge("start", "dup"), edge("dup", "end")],
    );
    let report = validate_document(&doc);
    assert_eq!(count_errors(&report, "G002"), 1);
    assert_eq!(
        report.error_messages(),
        vec![
            "If-else node dup missing 'conditions'",
            "Duplicate node ID: dup",
            "If-else node dup missing 'conditions'",
        ]
    );
}

#[test]
fn node_without_data_or_type() {
    let doc = document_with_graph(
        vec![
            start_node("start"),
            json!({ "id": "a" }),
            node("b", json!({ "title": "untyped" })),
            end_node("end"),
        ],
        vec![],
    );
    let report = validate_document(&doc);
    assert_eq!(
        report.error_messages(),
        vec!["Node a missing 'data'", "Node b missing type"]
    );
}

#[test]
fn node_with_missing_data_still_resolves_edges() {
    let doc = document_with_graph(
        vec![start_node("start"), json!({ "id": "a" }), end_node("end")],
        vec![edge("start", "a"), edge("a", "end")],
    );
    let report = validate_document(&doc);
    assert_eq!(report.error_messages(), vec!["Node a missing 'data'"]);
}

#[test]
fn unknown_node_types_are_accepted() {
    let report = validate_document(&document_with_node(node(
        "kr",
        json!({ "type": "knowledge-retrieval" }),
    )));
    assert!(report.is_valid(), "{:?}", report.errors);
    assert_eq!(report.warnings.len(), 2);
}

#[test]
fn missing_start_reported_once_regardless_of_node_count() {
    let nodes = (0..5)
        .map(|i| node(&format!("n{}", i), json!({ "type": "template-transform" })))
        .chain(std::iter::once(end_node("end")))
        .collect();
    let report = validate_document(&document_with_graph(nodes, vec![]));
    assert_eq!(
        report.error_messages(),
        vec!["Workflow must have at least one 'start' node"]
    );
}

#[test]
fn empty_graph_needs_start_and_end() {
    let report = validate_document(&document_with_graph(vec![], vec![]));
    assert_eq!(
        report.error_messages(),
        vec![
            "Workflow must have at least one 'start' node",
            "Workflow must have at least one 'end' node",
        ]
    );
}

#[test]
fn numeric_ids_are_accepted() {
    let doc = document_with_graph(
        vec![
            json!({ "id": 1716000000001u64, "data": { "type": "start", "variables": [] } }),
            json!({ "id": 1716000000002u64, "data": { "type": "end", "outputs": [] } }),
        ],
        vec![json!({ "source": 1716000000001u64, "target": "1716000000002" })],
    );
    let report = validate_document(&doc);
    assert!(report.is_valid(), "{:?}", report.errors);
    assert!(report.warnings.is_empty());
}

// =============================================================================
// start / end
// =============================================================================

#[test]
fn start_variables_need_name_and_type() {
    let doc = document_with_graph(
        vec![
            node(
                "start",
                json!({ "type": "start", "variables": [
                    { "variable": "query", "type": "text-input" },
                    { "variable": "topic" },
                    { "type": "number" },
                ] }),
            ),
            end_node("end"),
        ],
        vec![edge("start", "end")],
    );
    let report = validate_document(&doc);
    assert_eq!(
        report.error_messages(),
        vec![
            "Variable 'topic' in start node start missing 'type'",
            "Variable in start node start missing 'variable' name",
        ]
    );
    assert_eq!(
        report.warning_messages(),
        vec!["End node end has no outputs defined"]
    );
}

#[test]
fn end_outputs_need_name_and_selector() {
    let doc = document_with_graph(
        vec![
            start_node("start"),
            node(
                "end",
                json!({ "type": "end", "outputs": [
                    { "variable": "result" },
                    { "value_selector": ["llm", "text"] },
                    {},
                ] }),
            ),
        ],
        vec![edge("start", "end")],
    );
    let report = validate_document(&doc);
    assert_eq!(
        report.error_messages(),
        vec![
            "Output 'result' in end node end missing 'value_selector'",
            "Output in end node end missing 'variable' name",
            "Output in end node end missing 'variable' name",
            "Output '?' in end node end missing 'value_selector'",
        ]
    );
}

#[test]
fn empty_variable_and_output_lists_are_fine() {
    let doc = document_with_graph(
        vec![
            node("start", json!({ "type": "start", "variables": [] })),
            node("end", json!({ "type": "end", "outputs": [] })),
        ],
        vec![edge("start", "end")],
    );
    let report = validate_document(&doc);
    assert!(report.is_valid());
    assert!(report.warnings.is_empty());
}

// =============================================================================
// llm
// =============================================================================

#[test]
fn llm_requires_model_and_prompt() {
    let report = validate_document(&document_with_node(node("llm", json!({ "type": "llm" }))));
    assert_eq!(
        report.error_messages(),
        vec![
            "LLM node llm missing 'model' configuration",
            "LLM node llm missing 'prompt_template'",
        ]
    );
}

#[test]
fn llm_model_sub_fields() {
    let report = validate_document(&document_with_node(node(
        "llm",
        json!({
            "type": "llm",
            "model": { "provider": "openai" },
            "prompt_template": [{ "role": "system", "text": "Be brief." }],
        }),
    )));
    assert_eq!(
        report.error_messages(),
        vec!["LLM node llm model missing 'name'", "LLM node llm model missing 'mode'"]
    );
}

#[test]
fn llm_empty_prompt_is_a_warning() {
    let report = validate_document(&document_with_node(node(
        "llm",
        json!({
            "type": "llm",
            "model": { "provider": "openai", "name": "gpt-4o", "mode": "chat" },
            "prompt_template": "",
        }),
    )));
    assert!(report.is_valid());
    assert_has_warning(&report, "N010");
}

// =============================================================================
// code
// =============================================================================

#[test]
fn code_requires_code_and_language() {
    let report = validate_document(&document_with_node(node("code", json!({ "type": "code" }))));
    assert_eq!(
        report.error_messages(),
        vec!["Code node code missing 'code'", "Code node code missing 'code_language'"]
    );
    assert_has_warning(&report, "N013");
}

#[test]
fn code_with_unknown_language_errors_even_when_complete() {
    let report = validate_document(&document_with_node(node(
        "code",
        json!({
            "type": "code",
            "code": "def main(): return {}",
            "code_language": "ruby",
            "outputs": { "result": { "type": "string" } },
        }),
    )));
    assert_eq!(
        report.error_messages(),
        vec!["Code node code has invalid code_language: ruby"]
    );
}

#[test]
fn code_language_null_is_invalid() {
    let report = validate_document(&document_with_node(node(
        "code",
        json!({ "type": "code", "code": "x", "code_language": null, "outputs": {} }),
    )));
    assert_eq!(
        report.error_messages(),
        vec!["Code node code has invalid code_language: None"]
    );
}

#[test]
fn configured_languages_replace_defaults() {
    let doc = document_with_node(node(
        "code",
        json!({ "type": "code", "code": "x", "code_language": "python3", "outputs": {} }),
    ));
    let validator = Validator::with_options(ValidatorOptions {
        code_languages: vec!["javascript".into()],
        ..ValidatorOptions::default()
    });
    let report = validator.validate(&doc);
    assert_has_error(&report, "N012");
}

// =============================================================================
// variable-aggregator / if-else
// =============================================================================

#[test]
fn aggregator_rules() {
    let report = validate_document(&document_with_node(node(
        "agg",
        json!({ "type": "variable-aggregator" }),
    )));
    assert_eq!(
        report.error_messages(),
        vec![
            "Variable aggregator node agg missing 'variables'",
            "Variable aggregator node agg missing 'output_type'",
        ]
    );

    let report = validate_document(&document_with_node(node(
        "agg",
        json!({ "type": "variable-aggregator", "variables": [], "output_type": "string" }),
    )));
    assert!(report.is_valid());
    assert!(report
        .warning_messages()
        .contains(&"Variable aggregator node agg has empty variables list"));
}

#[test]
fn if_else_rules() {
    let report = validate_document(&document_with_node(node(
        "branch",
        json!({ "type": "if-else", "conditions": [] }),
    )));
    assert!(report.is_valid());
    assert!(report
        .warning_messages()
        .contains(&"If-else node branch has empty conditions list"));

    let report = validate_document(&document_with_node(node(
        "branch",
        json!({ "type": "if-else", "conditions": [
            {
                "variable_selector": ["start", "q"],
                "comparison_operator": "contains",
                "value": "x",
            },
        ] }),
    )));
    assert!(report.is_valid());
    assert_eq!(report.warnings.len(), 2);
}
