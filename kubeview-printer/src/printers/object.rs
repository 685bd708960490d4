use k8s_openapi::api::batch::v1::JobTemplateSpec;
use k8s_openapi::api::core::v1::PodTemplateSpec;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::serde_json::{self, Value};
use serde::Serialize;

use super::conditions::{create_conditions_table, DEFAULT_CONDITION_COLUMNS};
use super::event::object_events_table;
use super::job_template::job_template_section;
use super::pod_template::pod_template_section;
use super::Options;
use crate::component::{
    Component, FlexItem, FlexLayout, FlexSection, Labels, Summary, WIDTH_FULL, WIDTH_HALF,
};
use crate::error::{PrintError, ResultExt};
use crate::utils::age;

type ItemFn<'a> = Box<dyn FnOnce(&Options) -> Result<Component, PrintError> + 'a>;

/// One lazily built item of an object view.
pub struct ItemDescriptor<'a> {
    pub width: u8,
    func: ItemFn<'a>,
}

impl<'a> ItemDescriptor<'a> {
    pub fn new<F>(width: u8, func: F) -> Self
    where
        F: FnOnce(&Options) -> Result<Component, PrintError> + 'a,
    {
        Self {
            width,
            func: Box::new(func),
        }
    }
}

/// Accumulates the sections of a single object's view.
pub struct Object<'a> {
    kind: &'static str,
    meta: &'a ObjectMeta,
    value: Value,
    config: Option<Summary>,
    status: Option<Component>,
    groups: Vec<Vec<ItemDescriptor<'a>>>,
    pod_template: Option<&'a PodTemplateSpec>,
    job_template: Option<&'a JobTemplateSpec>,
    events: bool,
    conditions: bool,
}

impl<'a> Object<'a> {
    pub fn new<K>(object: &'a K) -> Result<Self, PrintError>
    where
        K: k8s_openapi::Resource + k8s_openapi::Metadata<Ty = ObjectMeta> + Serialize,
    {
        Ok(Self {
            kind: K::KIND,
            meta: object.metadata(),
            value: serde_json::to_value(object)?,
            config: None,
            status: None,
            groups: Vec::new(),
            pod_template: None,
            job_template: None,
            events: false,
            conditions: false,
        })
    }

    pub fn register_config(&mut self, config: Summary) {
        self.config = Some(config);
    }

    /// Status view shown next to the configuration.
    pub fn register_summary(&mut self, status: impl Into<Component>) {
        self.status = Some(status.into());
    }

    /// Adds a group of items rendered as one layout section.
    pub fn register_items(&mut self, items: Vec<ItemDescriptor<'a>>) {
        self.groups.push(items);
    }

    pub fn enable_pod_template(&mut self, template: &'a PodTemplateSpec) {
        self.pod_template = Some(template);
    }

    pub fn enable_job_template(&mut self, template: &'a JobTemplateSpec) {
        self.job_template = Some(template);
    }

    pub fn enable_events(&mut self) {
        self.events = true;
    }

    pub fn enable_conditions(&mut self) {
        self.conditions = true;
    }

    #[tracing::instrument(skip_all, fields(kind = self.kind, name = ?self.meta.name))]
    pub fn to_component(self, options: &Options) -> Result<Component, PrintError> {
        let name = self.meta.name.clone().unwrap_or_default();
        let mut layout = FlexLayout::new(format!("{} {}", self.kind, name));

        let plugin = match options.dash_config.plugin_printer() {
            Some(printer) => Some(printer.print(&self.value).map_err(PrintError::Plugin)?),
            None => None,
        };

        let mut config = self.config;
        let mut status = self.status;
        let mut extra_status = None;
        if let Some(plugin) = &plugin {
            if !plugin.config.is_empty() {
                config
                    .get_or_insert_with(|| Summary::new("Configuration"))
                    .sections
                    .extend(plugin.config.iter().cloned());
            }
            if !plugin.status.is_empty() {
                match &mut status {
                    Some(Component::Summary(summary)) => {
                        summary.sections.extend(plugin.status.iter().cloned())
                    }
                    other => {
                        let mut summary = Summary::new("Status");
                        summary.sections.extend(plugin.status.iter().cloned());
                        if other.is_none() {
                            *other = Some(summary.into());
                        } else {
                            extra_status = Some(summary);
                        }
                    }
                }
            }
        }

        let mut top = FlexSection::new();
        if let Some(config) = config {
            top.push(FlexItem::new(WIDTH_HALF, config));
        }
        if let Some(status) = status {
            top.push(FlexItem::new(WIDTH_HALF, status));
        }
        if let Some(extra) = extra_status {
            top.push(FlexItem::new(WIDTH_HALF, extra));
        }
        layout.add_section(top);

        layout.add_section(vec![FlexItem::new(
            WIDTH_FULL,
            metadata_summary(self.meta, options)?,
        )]);

        if let Some(template) = self.pod_template {
            layout.add_section(pod_template_section(template, options).context("print pod template")?);
        }
        if let Some(template) = self.job_template {
            layout.add_section(job_template_section(template, options).context("print job template")?);
        }

        for group in self.groups {
            let section = group
                .into_iter()
                .map(|item| -> Result<FlexItem, PrintError> {
                    Ok(FlexItem::new(item.width, (item.func)(options)?))
                })
                .collect::<Result<FlexSection, PrintError>>()
                .context(format!("print {} items", self.kind))?;
            layout.add_section(section);
        }

        if let Some(plugin) = plugin {
            layout.add_section(plugin.items);
        }

        if self.conditions {
            let table = create_conditions_table(Some(&self.value), "Type", DEFAULT_CONDITION_COLUMNS)
                .context("print conditions")?;
            layout.add_section(vec![FlexItem::new(WIDTH_FULL, table)]);
        }

        if self.events {
            let table = object_events_table(self.meta, options).context("print events")?;
            layout.add_section(vec![FlexItem::new(WIDTH_FULL, table)]);
        }

        Ok(layout.into())
    }
}

fn metadata_summary(meta: &ObjectMeta, options: &Options) -> Result<Summary, PrintError> {
    let mut summary = Summary::new("Metadata");
    summary.add("Age", age(meta));

    if let Some(labels) = meta.labels.as_ref().filter(|l| !l.is_empty()) {
        summary.add("Labels", Labels::new(Some(labels)));
    }
    if let Some(annotations) = meta.annotations.as_ref().filter(|a| !a.is_empty()) {
        summary.add("Annotations", Labels::new(Some(annotations)));
    }
    for owner in meta.owner_references.iter().flatten() {
        let link = options
            .link
            .for_owner(meta.namespace.as_deref(), owner)
            .context("link owner")?;
        summary.add("Controlled By", link);
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{table_cols, SummarySection, Table};
    use crate::error::BoxError;
    use crate::plugin::{PluginPrinter, PrintResponse};
    use crate::printers::testing::{options, typed};
    use crate::printers::DashConfig;
    use crate::link::PathLinkGenerator;
    use crate::store::MemoryStore;
    use k8s_openapi::api::core::v1::ConfigMap;
    use k8s_openapi::serde_json::json;
    use std::sync::Arc;

    fn config_map() -> ConfigMap {
        typed(json!({
            "apiVersion": "v1",
            "kind": "ConfigMap",
            "metadata": {
                "name": "settings",
                "namespace": "default",
                "labels": {"app": "web"},
                "ownerReferences": [{
                    "apiVersion": "apps/v1",
                    "kind": "Deployment",
                    "name": "web",
                    "uid": "1"
                }]
            }
        }))
    }

    struct StaticPlugin;

    impl PluginPrinter for StaticPlugin {
        fn print(&self, object: &Value) -> Result<PrintResponse, BoxError> {
            assert_eq!(object["metadata"]["name"], json!("settings"));
            Ok(PrintResponse {
                config: vec![SummarySection::new("Plugin", Component::text("config"))],
                status: vec![SummarySection::new("Plugin", Component::text("status"))],
                items: vec![FlexItem::new(WIDTH_FULL, Component::text("extra"))],
            })
        }
    }

    struct FailingPlugin;

    impl PluginPrinter for FailingPlugin {
        fn print(&self, _object: &Value) -> Result<PrintResponse, BoxError> {
            Err("boom".into())
        }
    }

    fn plugin_options(plugin: impl PluginPrinter + 'static) -> Options {
        let config = DashConfig::new(Arc::new(MemoryStore::new())).with_plugin_printer(Arc::new(plugin));
        Options::new(config, PathLinkGenerator)
    }

    #[test]
    fn test_layout_order() {
        let cm = config_map();
        let mut object = Object::new(&cm).unwrap();
        let mut config = Summary::new("Configuration");
        config.add("Immutable", Component::text("false"));
        object.register_config(config);
        object.register_items(vec![ItemDescriptor::new(WIDTH_FULL, |_| {
            Ok(Table::new("Data", "empty", table_cols(&["Key"])).into())
        })]);

        let component = object.to_component(&options()).unwrap();
        let layout = component.as_flex_layout().unwrap();
        assert_eq!(layout.title, "ConfigMap settings");
        assert_eq!(layout.sections.len(), 3);
        assert_eq!(layout.sections[0][0].width, WIDTH_HALF);
        assert!(layout.find_summary("Configuration").is_some());

        let metadata = layout.find_summary("Metadata").unwrap();
        assert!(metadata.section("Labels").is_some());
        let owner = metadata.section("Controlled By").unwrap().as_link().unwrap();
        assert_eq!(owner.reference, "/overview/namespace/default/workloads/deployments/web");

        assert!(layout.find_table("Data").is_some());
    }

    #[test]
    fn test_item_error_aborts() {
        let cm = config_map();
        let mut object = Object::new(&cm).unwrap();
        object.register_items(vec![ItemDescriptor::new(WIDTH_FULL, |_| {
            Err(PrintError::NilObject("item"))
        })]);

        let err = object.to_component(&options()).unwrap_err();
        assert_eq!(err.to_string(), "print ConfigMap items: item is nil");
    }

    #[test]
    fn test_plugin_sections_merged() {
        let cm = config_map();
        let mut object = Object::new(&cm).unwrap();
        object.register_config(Summary::new("Configuration"));
        object.register_summary(Summary::new("Status"));

        let component = object.to_component(&plugin_options(StaticPlugin)).unwrap();
        let layout = component.as_flex_layout().unwrap();
        let config = layout.find_summary("Configuration").unwrap();
        assert_eq!(config.section("Plugin"), Some(&Component::text("config")));
        let status = layout.find_summary("Status").unwrap();
        assert_eq!(status.section("Plugin"), Some(&Component::text("status")));
        assert!(layout.views().any(|v| *v == Component::text("extra")));
    }

    #[test]
    fn test_plugin_error() {
        let cm = config_map();
        let object = Object::new(&cm).unwrap();
        let err = object.to_component(&plugin_options(FailingPlugin)).unwrap_err();
        assert_eq!(err.to_string(), "plugin manager print: boom");
    }

    #[test]
    fn test_conditions_and_events() {
        let cm = config_map();
        let mut object = Object::new(&cm).unwrap();
        object.enable_conditions();
        object.enable_events();

        let component = object.to_component(&options()).unwrap();
        let layout = component.as_flex_layout().unwrap();
        assert!(layout.find_table("Conditions").unwrap().is_empty());
        assert!(layout.find_table("Events").unwrap().is_empty());
    }
}
