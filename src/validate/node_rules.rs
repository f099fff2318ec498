//! Per-node-type field rules (`N0xx`).
//!
//! Only the node kinds listed in `NodeKind` have rules. Other `type` tags are
//! accepted as-is so newer node kinds do not fail validation.

use serde_json::Value;

use super::report::ValidationReport;
use super::ValidatorOptions;
use crate::document::{entries, is_truthy, render, Fields};

const LLM_MODEL_FIELDS: [&str; 3] = ["provider", "name", "mode"];
const CODE_FIELDS: [&str; 2] = ["code", "code_language"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Start,
    End,
    Llm,
    Code,
    VariableAggregator,
    IfElse,
}

impl NodeKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "start" => Some(NodeKind::Start),
            "end" => Some(NodeKind::End),
            "llm" => Some(NodeKind::Llm),
            "code" => Some(NodeKind::Code),
            "variable-aggregator" => Some(NodeKind::VariableAggregator),
            "if-else" => Some(NodeKind::IfElse),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            NodeKind::Start => "start",
            NodeKind::End => "end",
            NodeKind::Llm => "llm",
            NodeKind::Code => "code",
            NodeKind::VariableAggregator => "variable-aggregator",
            NodeKind::IfElse => "if-else",
        }
    }
}

/// Check a node's `data` map against the rules for its kind.
pub fn validate_node_data(
    kind: NodeKind,
    node_id: &str,
    data: Fields<'_>,
    options: &ValidatorOptions,
    report: &mut ValidationReport,
) {
    match kind {
        NodeKind::Start => validate_start(node_id, data, report),
        NodeKind::End => validate_end(node_id, data, report),
        NodeKind::Llm => validate_llm(node_id, data, report),
        NodeKind::Code => validate_code(node_id, data, options, report),
        NodeKind::VariableAggregator => validate_aggregator(node_id, data, report),
        NodeKind::IfElse => validate_if_else(node_id, data, report),
    }
}

/// Name of a variable entry for messages, `?` when it has none.
fn entry_name(entry: Fields<'_>) -> String {
    match entry.get("variable") {
        Some(name) => render(Some(name)),
        None => "?".to_string(),
    }
}

fn validate_start(node_id: &str, data: Fields<'_>, report: &mut ValidationReport) {
    let id = Some(node_id);
    let Some(variables) = data.get("variables") else {
        report.warning(
            "N001",
            format!("Start node {} has no variables defined", node_id),
            id,
        );
        return;
    };

    for variable in entries(variables) {
        let variable = Fields::of(variable);
        if !variable.has("variable") {
            report.error(
                "N002",
                format!("Variable in start node {} missing 'variable' name", node_id),
                id,
            );
        }
        if !variable.has("type") {
            report.error(
                "N003",
                format!(
                    "Variable '{}' in start node {} missing 'type'",
                    entry_name(variable),
                    node_id
                ),
                id,
            );
        }
    }
}

fn validate_end(node_id: &str, data: Fields<'_>, report: &mut ValidationReport) {
    let id = Some(node_id);
    let Some(outputs) = data.get("outputs") else {
        report.warning(
            "N004",
            format!("End node {} has no outputs defined", node_id),
            id,
        );
        return;
    };

    for output in entries(outputs) {
        let output = Fields::of(output);
        if !output.has("variable") {
            report.error(
                "N005",
                format!("Output in end node {} missing 'variable' name", node_id),
                id,
            );
        }
        if !output.has("value_selector") {
            report.error(
                "N006",
                format!(
                    "Output '{}' in end node {} missing 'value_selector'",
                    entry_name(output),
                    node_id
                ),
                id,
            );
        }
    }
}

fn validate_llm(node_id: &str, data: Fields<'_>, report: &mut ValidationReport) {
    let id = Some(node_id);
    match data.get("model") {
        None => report.error(
            "N007",
            format!("LLM node {} missing 'model' configuration", node_id),
            id,
        ),
        Some(model) => {
            let model = Fields::of(model);
            for field in LLM_MODEL_FIELDS {
                if !model.has(field) {
                    report.error(
                        "N008",
                        format!("LLM node {} model missing '{}'", node_id, field),
                        id,
                    );
                }
            }
        }
    }

    match data.get("prompt_template") {
        None => report.error(
            "N009",
            format!("LLM node {} missing 'prompt_template'", node_id),
            id,
        ),
        Some(template) if !is_truthy(template) => report.warning(
            "N010",
            format!("LLM node {} has empty prompt_template", node_id),
            id,
        ),
        Some(_) => {}
    }
}

fn validate_code(
    node_id: &str,
    data: Fields<'_>,
    options: &ValidatorOptions,
    report: &mut ValidationReport,
) {
    let id = Some(node_id);
    for field in CODE_FIELDS {
        if !data.has(field) {
            report.error(
                "N011",
                format!("Code node {} missing '{}'", node_id, field),
                id,
            );
        }
    }

    if let Some(language) = data.get("code_language") {
        if !is_known_language(language, &options.code_languages) {
            report.error(
                "N012",
                format!(
                    "Code node {} has invalid code_language: {}",
                    node_id,
                    render(Some(language))
                ),
                id,
            );
        }
    }

    if !data.has("outputs") {
        report.warning(
            "N013",
            format!("Code node {} has no outputs defined", node_id),
            id,
        );
    }
}

fn is_known_language(language: &Value, known: &[String]) -> bool {
    language
        .as_str()
        .is_some_and(|l| known.iter().any(|k| k == l))
}

fn validate_aggregator(node_id: &str, data: Fields<'_>, report: &mut ValidationReport) {
    let id = Some(node_id);
    match data.get("variables") {
        None => report.error(
            "N014",
            format!("Variable aggregator node {} missing 'variables'", node_id),
            id,
        ),
        Some(variables) if !is_truthy(variables) => report.warning(
            "N015",
            format!("Variable aggregator node {} has empty variables list", node_id),
            id,
        ),
        Some(_) => {}
    }

    if !data.has("output_type") {
        report.error(
            "N016",
            format!("Variable aggregator node {} missing 'output_type'", node_id),
            id,
        );
    }
}

fn validate_if_else(node_id: &str, data: Fields<'_>, report: &mut ValidationReport) {
    let id = Some(node_id);
    match data.get("conditions") {
        None => report.error(
            "N017",
            format!("If-else node {} missing 'conditions'", node_id),
            id,
        ),
        Some(conditions) if !is_truthy(conditions) => report.warning(
            "N018",
            format!("If-else node {} has empty conditions list", node_id),
            id,
        ),
        Some(_) => {}
    }
}
