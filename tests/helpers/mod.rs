use dsl_validator::ValidationReport;
use serde_json::{json, Value};

// =============================================================================
// Document builders
// =============================================================================

pub fn node(id: &str, data: Value) -> Value {
    json!({ "id": id, "data": data })
}

pub fn start_node(id: &str) -> Value {
    node(id, json!({ "type": "start", "title": "Start" }))
}

pub fn end_node(id: &str) -> Value {
    node(id, json!({ "type": "end", "title": "End" }))
}

pub fn edge(source: &str, target: &str) -> Value {
    json!({ "id": format!("{}-{}", source, target), "source": source, "target": target })
}

/// A full document around the given graph.
pub fn document_with_graph(nodes: Vec<Value>, edges: Vec<Value>) -> Value {
    json!({
        "kind": "app",
        "version": "0.1.5",
        "app": { "name": "x", "mode": "workflow" },
        "workflow": { "graph": { "nodes": nodes, "edges": edges } },
    })
}

/// The smallest valid workflow: start → end.
pub fn minimal_document() -> Value {
    document_with_graph(
        vec![start_node("start"), end_node("end")],
        vec![edge("start", "end")],
    )
}

/// start → `middle` → end, for testing a single node of interest.
pub fn document_with_node(middle: Value) -> Value {
    let id = middle["id"].as_str().unwrap_or("middle").to_string();
    document_with_graph(
        vec![start_node("start"), middle, end_node("end")],
        vec![edge("start", &id), edge(&id, "end")],
    )
}

// =============================================================================
// Assertions
// =============================================================================

pub fn assert_has_error(report: &ValidationReport, code: &str) {
    assert!(
        report.errors.iter().any(|e| e.code == code),
        "Expected error {}, got: {:?}",
        code,
        report.errors
    );
}

pub fn assert_no_error(report: &ValidationReport, code: &str) {
    assert!(
        !report.errors.iter().any(|e| e.code == code),
        "Did not expect error {}, but got: {:?}",
        code,
        report.errors
    );
}

pub fn assert_has_warning(report: &ValidationReport, code: &str) {
    assert!(
        report.warnings.iter().any(|w| w.code == code),
        "Expected warning {}, got: {:?}",
        code,
        report.warnings
    );
}

pub fn count_errors(report: &ValidationReport, code: &str) -> usize {
    report.errors.iter().filter(|e| e.code == code).count()
}
