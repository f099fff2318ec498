//! Optional topology lints (`T0xx`). Warnings only.

use serde_json::Value;

use super::report::ValidationReport;
use crate::graph::WorkflowGraph;

pub fn validate_topology(nodes: &[Value], edges: &[Value], report: &mut ValidationReport) {
    let graph = WorkflowGraph::build(nodes, edges);

    t001_no_cycles(&graph, report);
    t002_reachable_from_start(&graph, report);
}

fn t001_no_cycles(graph: &WorkflowGraph, report: &mut ValidationReport) {
    if graph.is_cyclic() {
        report.warning("T001", "Workflow graph contains a cycle", None);
    }
}

fn t002_reachable_from_start(graph: &WorkflowGraph, report: &mut ValidationReport) {
    // Missing start nodes are already an error.
    if graph.start_nodes().is_empty() {
        return;
    }
    for id in graph.unreachable_from_start() {
        report.warning(
            "T002",
            format!("Node {} is not reachable from any 'start' node", id),
            Some(id),
        );
    }
}
