use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, LabelSelectorRequirement};

/// `key:value` pairs in key order.
pub fn print_match_labels(labels: &BTreeMap<String, String>) -> String {
    labels
        .iter()
        .map(|(k, v)| format!("{k}:{v}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Match expressions in input order; unknown operators are skipped.
pub fn print_label_selector_requirement(requirements: &[LabelSelectorRequirement]) -> String {
    requirements
        .iter()
        .filter_map(|r| {
            let values = r.values.as_deref().unwrap_or_default().join(", ");
            match r.operator.as_str() {
                "In" => Some(format!("{} in [{}]", r.key, values)),
                "NotIn" => Some(format!("{} not in [{}]", r.key, values)),
                "Exists" => Some(format!("{} exists", r.key)),
                "DoesNotExist" => Some(format!("{} does not exist", r.key)),
                _ => None,
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Full selector text; `*` selects everything.
pub fn print_selector(selector: Option<&LabelSelector>) -> String {
    let mut parts = Vec::new();
    if let Some(selector) = selector {
        if let Some(labels) = selector.match_labels.as_ref().filter(|l| !l.is_empty()) {
            parts.push(print_match_labels(labels));
        }
        if let Some(exprs) = selector.match_expressions.as_ref().filter(|e| !e.is_empty()) {
            let printed = print_label_selector_requirement(exprs);
            if !printed.is_empty() {
                parts.push(printed);
            }
        }
    }

    if parts.is_empty() {
        "*".to_string()
    } else {
        parts.join(", ")
    }
}
