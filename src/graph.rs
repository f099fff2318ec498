//! petgraph-based directed graph over a workflow's declared nodes and edges.
//!
//! Built leniently: nodes without an id, repeated ids and edges with a dangling
//! endpoint are left out. Those are reported by the structural rules.

use std::collections::{HashMap, HashSet};

use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Bfs;
use serde_json::Value;

use crate::document::{id_text, Fields};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub id: String,
    pub node_type: Option<String>,
}

pub struct WorkflowGraph {
    pub graph: DiGraph<GraphNode, ()>,
    pub node_indices: HashMap<String, NodeIndex>,
}

impl WorkflowGraph {
    pub fn build(nodes: &[Value], edges: &[Value]) -> Self {
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();

        for node in nodes {
            let node = Fields::of(node);
            let Some(id) = node.truthy("id").map(id_text) else {
                continue;
            };
            if node_indices.contains_key(&id) {
                continue;
            }
            let node_type = node
                .get("data")
                .and_then(|data| Fields::of(data).get("type"))
                .and_then(Value::as_str)
                .map(str::to_string);
            let idx = graph.add_node(GraphNode {
                id: id.clone(),
                node_type,
            });
            node_indices.insert(id, idx);
        }

        for edge in edges {
            let edge = Fields::of(edge);
            let source = edge.truthy("source").map(id_text);
            let target = edge.truthy("target").map(id_text);
            let (Some(source), Some(target)) = (source, target) else {
                continue;
            };
            if let (Some(&s), Some(&t)) = (node_indices.get(&source), node_indices.get(&target)) {
                graph.add_edge(s, t, ());
            }
        }

        WorkflowGraph {
            graph,
            node_indices,
        }
    }

    pub fn is_cyclic(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// Ids of nodes whose type is `start`, in declaration order.
    pub fn start_nodes(&self) -> Vec<&str> {
        self.graph
            .node_indices()
            .filter(|&idx| self.graph[idx].node_type.as_deref() == Some("start"))
            .map(|idx| self.graph[idx].id.as_str())
            .collect()
    }

    /// Ids of nodes not reachable from any start node, in declaration order.
    pub fn unreachable_from_start(&self) -> Vec<&str> {
        let mut reachable = HashSet::new();
        for start in self.start_nodes() {
            let Some(&idx) = self.node_indices.get(start) else {
                continue;
            };
            let mut bfs = Bfs::new(&self.graph, idx);
            while let Some(nx) = bfs.next(&self.graph) {
                reachable.insert(nx);
            }
        }

        self.graph
            .node_indices()
            .filter(|idx| !reachable.contains(idx))
            .map(|idx| self.graph[idx].id.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(id: &str, node_type: &str) -> Value {
        json!({"id": id, "data": {"type": node_type}})
    }

    #[test]
    fn skips_dangling_edges_and_repeated_ids() {
        let nodes = vec![node("a", "start"), node("b", "end"), node("a", "llm"), json!({})];
        let edges = vec![
            json!({"source": "a", "target": "b"}),
            json!({"source": "a", "target": "ghost"}),
            json!({"source": "a"}),
        ];
        let graph = WorkflowGraph::build(&nodes, &edges);
        assert_eq!(graph.graph.node_count(), 2);
        assert_eq!(graph.graph.edge_count(), 1);
        assert_eq!(graph.start_nodes(), vec!["a"]);
        assert!(graph.unreachable_from_start().is_empty());
    }

    #[test]
    fn empty_graph_has_no_cycle() {
        let graph = WorkflowGraph::build(&[], &[]);
        assert!(!graph.is_cyclic());
        assert!(graph.start_nodes().is_empty());
    }
}
