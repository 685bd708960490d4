use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use k8s_openapi::List;

use super::object::Object;
use super::printer::{list_table, require, PrintHandler};
use super::selector::print_selector;
use super::Options;
use crate::component::{Component, Summary, TableRow};
use crate::error::PrintError;
use crate::utils::{age, labels, optional_number};

#[derive(Debug, Clone, Default)]
pub struct DeploymentListPrinter;

impl PrintHandler for DeploymentListPrinter {
    type Object = List<Deployment>;

    #[tracing::instrument(skip_all)]
    fn print(&self, list: Option<&List<Deployment>>, options: &Options) -> Result<Component, PrintError> {
        let list = require(list, "deployment list")?;
        let columns = ["Name", "Labels", "Status", "Age", "Containers", "Selector"];
        list_table("Deployments", "We couldn't find any deployments!", &columns, &list.items, |d| {
            let spec = d.spec.as_ref();
            let containers = spec
                .map(|s| {
                    s.template
                        .spec
                        .iter()
                        .flat_map(|p| &p.containers)
                        .map(|c| c.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .unwrap_or_default();
            Ok(TableRow::new()
                .with("Name", options.object_link(d))
                .with("Labels", labels(&d.metadata))
                .with("Status", Component::text(ready_status(d)))
                .with("Age", age(&d.metadata))
                .with("Containers", Component::text(containers))
                .with("Selector", Component::text(print_selector(spec.map(|s| &s.selector)))))
        })
    }
}

/// `available/desired`, with desired defaulting to one replica.
fn ready_status(d: &Deployment) -> String {
    let desired = d.spec.as_ref().and_then(|s| s.replicas).unwrap_or(1);
    let available = d
        .status
        .as_ref()
        .and_then(|s| s.available_replicas)
        .unwrap_or(0);
    format!("{available}/{desired}")
}

fn int_or_string(value: Option<&IntOrString>) -> String {
    match value {
        Some(IntOrString::Int(i)) => i.to_string(),
        Some(IntOrString::String(s)) => s.clone(),
        None => "25%".to_string(),
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeploymentPrinter;

impl PrintHandler for DeploymentPrinter {
    type Object = Deployment;

    #[tracing::instrument(skip_all, fields(name = ?deployment.map(|d| &d.metadata.name)))]
    fn print(&self, deployment: Option<&Deployment>, options: &Options) -> Result<Component, PrintError> {
        let d = require(deployment, "deployment")?;
        let mut object = Object::new(d)?;

        let mut config = Summary::new("Configuration");
        if let Some(spec) = d.spec.as_ref() {
            let strategy = spec.strategy.as_ref();
            let kind = strategy
                .and_then(|s| s.type_.clone())
                .unwrap_or_else(|| "RollingUpdate".to_string());
            let rolling_update = kind == "RollingUpdate";
            config.add("Deployment Strategy", Component::text(kind));
            if rolling_update {
                let rolling = strategy.and_then(|s| s.rolling_update.as_ref());
                let surge = int_or_string(rolling.and_then(|r| r.max_surge.as_ref()));
                let unavailable = int_or_string(rolling.and_then(|r| r.max_unavailable.as_ref()));
                config.add(
                    "Rolling Update Strategy",
                    Component::text(format!("Max Surge {surge}, Max Unavailable {unavailable}")),
                );
            }
            config.add("Selectors", Component::text(print_selector(Some(&spec.selector))));
            config.add("Min Ready Seconds", Component::text(spec.min_ready_seconds.unwrap_or(0).to_string()));
            config.add("Revision History Limit", optional_number(spec.revision_history_limit));
            config.add("Replicas", Component::text(spec.replicas.unwrap_or(1).to_string()));
            object.enable_pod_template(&spec.template);
        }
        object.register_config(config);

        let status = d.status.clone().unwrap_or_default();
        let mut summary = Summary::new("Status");
        summary.add("Available Replicas", Component::text(status.available_replicas.unwrap_or(0).to_string()));
        summary.add("Ready Replicas", Component::text(status.ready_replicas.unwrap_or(0).to_string()));
        summary.add("Total Replicas", Component::text(status.replicas.unwrap_or(0).to_string()));
        summary.add(
            "Unavailable Replicas",
            Component::text(status.unavailable_replicas.unwrap_or(0).to_string()),
        );
        summary.add("Updated Replicas", Component::text(status.updated_replicas.unwrap_or(0).to_string()));
        object.register_summary(summary);

        object.enable_conditions();
        object.enable_events();
        object.to_component(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printers::testing::{options, typed};
    use k8s_openapi::serde_json::{json, Value};

    fn deployment(strategy: Value) -> Deployment {
        typed(json!({
            "apiVersion": "apps/v1",
            "kind": "Deployment",
            "metadata": {"name": "web", "namespace": "default", "uid": "uid-web"},
            "spec": {
                "replicas": 3,
                "strategy": strategy,
                "selector": {"matchLabels": {"app": "web"}},
                "template": {
                    "metadata": {"labels": {"app": "web"}},
                    "spec": {"containers": [
                        {"name": "nginx", "image": "nginx"},
                        {"name": "sidecar", "image": "envoy"}
                    ]}
                }
            },
            "status": {
                "replicas": 3,
                "availableReplicas": 2,
                "conditions": [{
                    "type": "Available",
                    "status": "True",
                    "lastUpdateTime": "2024-01-01T00:00:00Z"
                }]
            }
        }))
    }

    #[test]
    fn test_nil_list() {
        assert!(DeploymentListPrinter.print(None, &options()).is_err());
    }

    #[test]
    fn test_nil_object() {
        assert!(DeploymentPrinter.print(None, &options()).is_err());
    }

    #[test]
    fn test_list() {
        let list = List {
            items: vec![deployment(json!({}))],
            metadata: Default::default(),
        };
        let component = DeploymentListPrinter.print(Some(&list), &options()).unwrap();
        let table = component.as_table().unwrap();
        let row = &table.rows[0];
        assert_eq!(row.get("Status"), Some(&Component::text("2/3")));
        assert_eq!(row.get("Containers"), Some(&Component::text("nginx, sidecar")));
        assert_eq!(row.get("Selector"), Some(&Component::text("app:web")));
    }

    #[test]
    fn test_object_rolling_update() {
        let d = deployment(json!({
            "type": "RollingUpdate",
            "rollingUpdate": {"maxSurge": 1, "maxUnavailable": "50%"}
        }));
        let component = DeploymentPrinter.print(Some(&d), &options()).unwrap();
        let layout = component.as_flex_layout().unwrap();

        let config = layout.find_summary("Configuration").unwrap();
        assert_eq!(
            config.section("Rolling Update Strategy"),
            Some(&Component::text("Max Surge 1, Max Unavailable 50%"))
        );
        assert_eq!(config.section("Revision History Limit"), Some(&Component::text("<not set>")));

        let status = layout.find_summary("Status").unwrap();
        assert_eq!(status.section("Available Replicas"), Some(&Component::text("2")));
        assert_eq!(layout.find_table("Conditions").unwrap().rows.len(), 1);
    }

    #[test]
    fn test_object_recreate() {
        let d = deployment(json!({"type": "Recreate"}));
        let component = DeploymentPrinter.print(Some(&d), &options()).unwrap();
        let config = component
            .as_flex_layout()
            .unwrap()
            .find_summary("Configuration")
            .unwrap()
            .clone();
        assert_eq!(config.section("Deployment Strategy"), Some(&Component::text("Recreate")));
        assert!(config.section("Rolling Update Strategy").is_none());
    }
}
