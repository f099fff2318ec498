//! Document-level structural rules.
//!
//! Codes: `D0xx` top level, `A0xx` app section, `W0xx` workflow and graph
//! shape, `G0xx` node iteration, `E0xx` edge endpoints.

use std::collections::HashSet;

use serde_json::Value;
use tracing::trace;

use super::node_rules::{self, NodeKind};
use super::report::ValidationReport;
use super::topology;
use super::ValidatorOptions;
use crate::document::{id_text, render, Fields};

const TOP_LEVEL_FIELDS: [&str; 4] = ["kind", "version", "app", "workflow"];
const APP_FIELDS: [&str; 2] = ["name", "mode"];

/// Run all structural rules against the document root.
pub fn validate_structural(
    document: &Value,
    options: &ValidatorOptions,
    report: &mut ValidationReport,
) {
    let root = Fields::of(document);

    d001_top_level_fields(root, report);
    d002_kind_is_app(root, report);

    if let Some(app) = root.get("app") {
        validate_app(Fields::of(app), report);
    }

    if let Some(workflow) = root.get("workflow") {
        validate_workflow(Fields::of(workflow), options, report);
    }
}

fn d001_top_level_fields(root: Fields<'_>, report: &mut ValidationReport) {
    for field in TOP_LEVEL_FIELDS {
        if !root.has(field) {
            report.error(
                "D001",
                format!("Missing required top-level field: {}", field),
                None,
            );
        }
    }
}

fn d002_kind_is_app(root: Fields<'_>, report: &mut ValidationReport) {
    let kind = root.get("kind");
    if kind.and_then(Value::as_str) != Some("app") {
        report.error(
            "D002",
            format!("Invalid 'kind' value: expected 'app', got '{}'", render(kind)),
            None,
        );
    }
}

fn validate_app(app: Fields<'_>, report: &mut ValidationReport) {
    for field in APP_FIELDS {
        if !app.has(field) {
            report.error("A001", format!("Missing required app field: {}", field), None);
        }
    }

    if let Some(mode) = app.get("mode") {
        if mode.as_str() != Some("workflow") {
            report.error(
                "A002",
                format!(
                    "Invalid app mode: expected 'workflow', got '{}'",
                    render(Some(mode))
                ),
                None,
            );
        }
    }
}

fn validate_workflow(
    workflow: Fields<'_>,
    options: &ValidatorOptions,
    report: &mut ValidationReport,
) {
    let Some(graph) = workflow.get("graph") else {
        report.error("W001", "Missing required workflow field: graph", None);
        return;
    };
    let graph = Fields::of(graph);

    let Some(nodes) = graph.get("nodes") else {
        report.error("W002", "Missing 'nodes' in graph", None);
        return;
    };
    let Some(edges) = graph.get("edges") else {
        report.error("W003", "Missing 'edges' in graph", None);
        return;
    };

    let nodes = sequence(nodes, "nodes", report);
    let node_ids = validate_nodes(nodes, options, report);

    let edges = sequence(edges, "edges", report);
    validate_edges(edges, &node_ids, report);

    if options.topology_checks {
        topology::validate_topology(nodes, edges, report);
    }
}

fn sequence<'a>(value: &'a Value, field: &str, report: &mut ValidationReport) -> &'a [Value] {
    match value {
        Value::Array(items) => items.as_slice(),
        _ => {
            report.error("W004", format!("'{}' in graph must be a list", field), None);
            &[]
        }
    }
}

/// Visit nodes in order and return the set of declared ids.
///
/// A node without an id is skipped entirely. A duplicate id is reported but the
/// node is still checked against its type's rules.
fn validate_nodes(
    nodes: &[Value],
    options: &ValidatorOptions,
    report: &mut ValidationReport,
) -> HashSet<String> {
    let mut node_ids = HashSet::new();
    let mut has_start = false;
    let mut has_end = false;

    for (index, node) in nodes.iter().enumerate() {
        let node = Fields::of(node);

        let Some(id) = node.truthy("id") else {
            report.error("G001", format!("Node at index {} missing 'id'", index), None);
            continue;
        };
        let id = id_text(id);

        if !node_ids.insert(id.clone()) {
            report.error("G002", format!("Duplicate node ID: {}", id), Some(id.as_str()));
        }

        let Some(data) = node.get("data") else {
            report.error("G003", format!("Node {} missing 'data'", id), Some(id.as_str()));
            continue;
        };
        let data = Fields::of(data);

        let Some(tag) = data.truthy("type") else {
            report.error("G004", format!("Node {} missing type", id), Some(id.as_str()));
            continue;
        };

        let Some(kind) = tag.as_str().and_then(NodeKind::from_tag) else {
            trace!(node_id = %id, node_type = %tag, "no rules for node type");
            continue;
        };

        match kind {
            NodeKind::Start => has_start = true,
            NodeKind::End => has_end = true,
            _ => {}
        }

        trace!(node_id = %id, node_type = kind.tag(), "checking node");
        node_rules::validate_node_data(kind, &id, data, options, report);
    }

    if !has_start {
        report.error("G005", "Workflow must have at least one 'start' node", None);
    }
    if !has_end {
        report.error("G006", "Workflow must have at least one 'end' node", None);
    }

    node_ids
}

fn validate_edges(edges: &[Value], node_ids: &HashSet<String>, report: &mut ValidationReport) {
    for (index, edge) in edges.iter().enumerate() {
        let edge = Fields::of(edge);
        validate_endpoint(index, edge, "source", node_ids, report);
        validate_endpoint(index, edge, "target", node_ids, report);
    }
}

fn validate_endpoint(
    index: usize,
    edge: Fields<'_>,
    end: &str,
    node_ids: &HashSet<String>,
    report: &mut ValidationReport,
) {
    match edge.truthy(end) {
        None => report.error(
            "E001",
            format!("Edge at index {} missing '{}'", index, end),
            None,
        ),
        Some(value) => {
            let id = id_text(value);
            if !node_ids.contains(&id) {
                report.error(
                    "E002",
                    format!("Edge references non-existent {} node: {}", end, id),
                    None,
                );
            }
        }
    }
}
