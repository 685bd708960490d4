use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, LabelSelectorRequirement};
use kube::ResourceExt;

use super::Options;
use crate::component::{Quadrant, QuadrantPosition};
use crate::error::{PrintError, ResultExt};
use crate::store::Key;
use crate::utils::json_field;

/// Pod phase counts for the pods a workload selects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PodStatusCount {
    pub running: usize,
    pub waiting: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl PodStatusCount {
    fn record(&mut self, phase: &str) {
        match phase {
            "Running" => self.running += 1,
            "Pending" => self.waiting += 1,
            "Succeeded" => self.succeeded += 1,
            "Failed" => self.failed += 1,
            _ => {}
        }
    }

    pub fn quadrant(&self) -> Quadrant {
        let mut quadrant = Quadrant::new("Status");
        quadrant.set(QuadrantPosition::Nw, "Running", self.running);
        quadrant.set(QuadrantPosition::Ne, "Waiting", self.waiting);
        quadrant.set(QuadrantPosition::Sw, "Succeeded", self.succeeded);
        quadrant.set(QuadrantPosition::Se, "Failed", self.failed);
        quadrant
    }
}

pub trait PodStatusSource: Send + Sync {
    fn pod_status(
        &self,
        namespace: Option<&str>,
        selector: Option<&LabelSelector>,
        options: &Options,
    ) -> Result<PodStatusCount, PrintError>;
}

/// Counts pod phases from the object store. Pods must satisfy both the
/// match labels and the match expressions; an empty selector selects no pods.
#[derive(Debug, Clone, Default)]
pub struct StorePodStatus;

impl PodStatusSource for StorePodStatus {
    #[tracing::instrument(skip_all, fields(namespace = ?namespace))]
    fn pod_status(
        &self,
        namespace: Option<&str>,
        selector: Option<&LabelSelector>,
        options: &Options,
    ) -> Result<PodStatusCount, PrintError> {
        let mut count = PodStatusCount::default();
        let Some(selector) = selector.filter(|s| !is_empty_selector(s)) else {
            return Ok(count);
        };

        let mut key = Key::new("v1", "Pod").namespace(namespace);
        if let Some(labels) = selector.match_labels.as_ref().filter(|l| !l.is_empty()) {
            key = key.selector(labels.clone());
        }
        let expressions = selector.match_expressions.as_deref().unwrap_or_default();
        for pod in options.object_store().list(&key).context("list pods")? {
            if !matches_expressions(expressions, pod.labels()) {
                continue;
            }
            let phase = json_field(&pod.data, &["status", "phase"]).and_then(|p| p.as_str());
            count.record(phase.unwrap_or_default());
        }

        Ok(count)
    }
}

fn is_empty_selector(selector: &LabelSelector) -> bool {
    selector.match_labels.as_ref().map_or(true, BTreeMap::is_empty)
        && selector.match_expressions.as_ref().map_or(true, Vec::is_empty)
}

/// Unknown operators never match.
fn matches_expressions(expressions: &[LabelSelectorRequirement], labels: &BTreeMap<String, String>) -> bool {
    expressions.iter().all(|req| {
        let value = labels.get(&req.key);
        let values = req.values.as_deref().unwrap_or_default();
        match req.operator.as_str() {
            "In" => value.is_some_and(|v| values.contains(v)),
            "NotIn" => value.map_or(true, |v| !values.contains(v)),
            "Exists" => value.is_some(),
            "DoesNotExist" => value.is_none(),
            _ => false,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printers::testing::{dynamic, options_with_store, typed};
    use crate::store::MemoryStore;
    use k8s_openapi::serde_json::json;

    fn pod(name: &str, app: &str, phase: &str) -> kube::api::DynamicObject {
        dynamic(json!({
            "apiVersion": "v1",
            "kind": "Pod",
            "metadata": {"name": name, "namespace": "default", "labels": {"app": app}},
            "status": {"phase": phase}
        }))
    }

    #[test]
    fn test_store_pod_status() {
        let store = MemoryStore::new();
        store.insert(pod("a", "web", "Running")).unwrap();
        store.insert(pod("b", "web", "Running")).unwrap();
        store.insert(pod("c", "web", "Pending")).unwrap();
        store.insert(pod("d", "db", "Failed")).unwrap();

        let selector = LabelSelector {
            match_labels: Some(BTreeMap::from([("app".to_string(), "web".to_string())])),
            ..Default::default()
        };
        let count = StorePodStatus
            .pod_status(Some("default"), Some(&selector), &options_with_store(store))
            .unwrap();
        assert_eq!(
            count,
            PodStatusCount {
                running: 2,
                waiting: 1,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_store_pod_status_with_expressions() {
        let store = MemoryStore::new();
        store.insert(pod("a", "web", "Running")).unwrap();
        store.insert(pod("b", "api", "Failed")).unwrap();
        store.insert(pod("c", "db", "Running")).unwrap();

        let selector: LabelSelector = typed(json!({
            "matchExpressions": [{"key": "app", "operator": "In", "values": ["web", "api"]}]
        }));
        let count = StorePodStatus
            .pod_status(Some("default"), Some(&selector), &options_with_store(store))
            .unwrap();
        assert_eq!(
            count,
            PodStatusCount {
                running: 1,
                failed: 1,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_matches_expressions() {
        let labels = BTreeMap::from([("app".to_string(), "web".to_string())]);
        let req = |key: &str, operator: &str, values: &[&str]| LabelSelectorRequirement {
            key: key.to_string(),
            operator: operator.to_string(),
            values: Some(values.iter().map(|v| v.to_string()).collect()),
        };

        assert!(matches_expressions(&[], &labels));
        assert!(matches_expressions(&[req("app", "NotIn", &["db"])], &labels));
        assert!(matches_expressions(&[req("tier", "DoesNotExist", &[])], &labels));
        assert!(!matches_expressions(&[req("app", "Exists", &[]), req("tier", "Exists", &[])], &labels));
        assert!(!matches_expressions(&[req("app", "Gt", &["1"])], &labels));
    }

    #[test]
    fn test_empty_selector_selects_nothing() {
        let store = MemoryStore::new();
        store.insert(pod("a", "web", "Running")).unwrap();
        let count = StorePodStatus
            .pod_status(Some("default"), None, &options_with_store(store))
            .unwrap();
        assert_eq!(count, PodStatusCount::default());
    }

    #[test]
    fn test_quadrant() {
        let quadrant = PodStatusCount {
            running: 3,
            failed: 1,
            ..Default::default()
        }
        .quadrant();
        assert_eq!(quadrant.get(QuadrantPosition::Nw).unwrap().value, "3");
        assert_eq!(quadrant.get(QuadrantPosition::Se).unwrap().label, "Failed");
    }
}
