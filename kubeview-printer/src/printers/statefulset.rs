use std::sync::Arc;

use k8s_openapi::api::apps::v1::StatefulSet;
use k8s_openapi::List;

use super::object::Object;
use super::printer::{list_table, require, PrintHandler};
use super::selector::print_selector;
use super::workload::{PodStatusSource, StorePodStatus};
use super::Options;
use crate::component::{Component, Summary, TableRow};
use crate::error::{PrintError, ResultExt};
use crate::utils::{age, labels};

#[derive(Debug, Clone, Default)]
pub struct StatefulSetListPrinter;

impl PrintHandler for StatefulSetListPrinter {
    type Object = List<StatefulSet>;

    #[tracing::instrument(skip_all)]
    fn print(&self, list: Option<&List<StatefulSet>>, options: &Options) -> Result<Component, PrintError> {
        let list = require(list, "stateful set list")?;
        let columns = ["Name", "Labels", "Desired", "Current", "Age", "Selector"];
        list_table("Stateful Sets", "We couldn't find any stateful sets!", &columns, &list.items, |sts| {
            let spec = sts.spec.as_ref();
            let desired = spec.and_then(|s| s.replicas).unwrap_or(1);
            let current = sts.status.as_ref().map(|s| s.replicas).unwrap_or_default();
            Ok(TableRow::new()
                .with("Name", options.object_link(sts))
                .with("Labels", labels(&sts.metadata))
                .with("Desired", Component::text(desired.to_string()))
                .with("Current", Component::text(current.to_string()))
                .with("Age", age(&sts.metadata))
                .with("Selector", Component::text(print_selector(spec.map(|s| &s.selector)))))
        })
    }
}

/// Stateful set view. Pod phases come from the injected [`PodStatusSource`].
pub struct StatefulSetPrinter {
    pod_status: Arc<dyn PodStatusSource>,
}

impl StatefulSetPrinter {
    pub fn new(pod_status: Arc<dyn PodStatusSource>) -> Self {
        Self { pod_status }
    }
}

impl Default for StatefulSetPrinter {
    fn default() -> Self {
        Self::new(Arc::new(StorePodStatus))
    }
}

impl PrintHandler for StatefulSetPrinter {
    type Object = StatefulSet;

    #[tracing::instrument(skip_all, fields(name = ?sts.map(|s| &s.metadata.name)))]
    fn print(&self, sts: Option<&StatefulSet>, options: &Options) -> Result<Component, PrintError> {
        let sts = require(sts, "stateful set")?;
        let mut object = Object::new(sts)?;

        let mut config = Summary::new("Configuration");
        if let Some(spec) = sts.spec.as_ref() {
            let strategy = spec
                .update_strategy
                .as_ref()
                .and_then(|s| s.type_.clone())
                .unwrap_or_else(|| "RollingUpdate".to_string());
            config.add("Update Strategy", Component::text(strategy));
            config.add("Selectors", Component::text(print_selector(Some(&spec.selector))));

            let current = sts.status.as_ref().map(|s| s.replicas).unwrap_or_default();
            let desired = spec.replicas.unwrap_or(1);
            config.add(
                "Replicas",
                Component::text(format!("{current} current / {desired} desired")),
            );

            let policy = spec
                .pod_management_policy
                .clone()
                .unwrap_or_else(|| "OrderedReady".to_string());
            config.add("Pod Management Policy", Component::text(policy));
            object.enable_pod_template(&spec.template);
        }
        object.register_config(config);

        let selector = sts.spec.as_ref().map(|s| &s.selector);
        let count = self
            .pod_status
            .pod_status(sts.metadata.namespace.as_deref(), selector, options)
            .context("count stateful set pods")?;
        object.register_summary(count.quadrant());

        object.enable_conditions();
        object.enable_events();
        object.to_component(options)
    }
}
