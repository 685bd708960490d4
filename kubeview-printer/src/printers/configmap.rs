use k8s_openapi::api::core::v1::ConfigMap;
use k8s_openapi::List;

use super::object::{ItemDescriptor, Object};
use super::printer::{list_table, require, PrintHandler};
use super::Options;
use crate::component::{table_cols, Component, Summary, Table, TableRow, WIDTH_FULL};
use crate::error::PrintError;
use crate::utils::{age, labels};

fn data_count(cm: &ConfigMap) -> usize {
    cm.data.as_ref().map(|d| d.len()).unwrap_or(0)
        + cm.binary_data.as_ref().map(|d| d.len()).unwrap_or(0)
}

#[derive(Debug, Clone, Default)]
pub struct ConfigMapListPrinter;

impl PrintHandler for ConfigMapListPrinter {
    type Object = List<ConfigMap>;

    #[tracing::instrument(skip_all)]
    fn print(&self, list: Option<&List<ConfigMap>>, options: &Options) -> Result<Component, PrintError> {
        let list = require(list, "config map list")?;
        let columns = ["Name", "Labels", "Data", "Age"];
        list_table("Config Maps", "We couldn't find any config maps!", &columns, &list.items, |cm| {
            Ok(TableRow::new()
                .with("Name", options.object_link(cm))
                .with("Labels", labels(&cm.metadata))
                .with("Data", Component::text(data_count(cm).to_string()))
                .with("Age", age(&cm.metadata)))
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigMapPrinter;

impl PrintHandler for ConfigMapPrinter {
    type Object = ConfigMap;

    #[tracing::instrument(skip_all, fields(name = ?cm.map(|c| &c.metadata.name)))]
    fn print(&self, cm: Option<&ConfigMap>, options: &Options) -> Result<Component, PrintError> {
        let cm = require(cm, "config map")?;
        let mut object = Object::new(cm)?;

        let mut config = Summary::new("Configuration");
        config.add("Data", Component::text(data_count(cm).to_string()));
        if let Some(immutable) = cm.immutable {
            config.add("Immutable", Component::text(immutable.to_string()));
        }
        object.register_config(config);

        let mut items = vec![ItemDescriptor::new(WIDTH_FULL, |_| {
            let mut table = Table::new("Data", "Config map has no data!", table_cols(&["Key", "Value"]));
            for (key, value) in cm.data.iter().flatten() {
                table.add(
                    TableRow::new()
                        .with("Key", Component::text(key.clone()))
                        .with("Value", Component::text(value.clone())),
                );
            }
            Ok(table.into())
        })];

        if let Some(binary) = cm.binary_data.as_ref().filter(|b| !b.is_empty()) {
            items.push(ItemDescriptor::new(WIDTH_FULL, move |_| {
                let mut table = Table::new("Binary Data", "Config map has no binary data!", table_cols(&["Key", "Size"]));
                for (key, value) in binary {
                    table.add(
                        TableRow::new()
                            .with("Key", Component::text(key.clone()))
                            .with("Size", Component::text(format!("{} bytes", value.0.len()))),
                    );
                }
                Ok(table.into())
            }));
        }
        object.register_items(items);

        object.to_component(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printers::testing::{options, typed};
    use k8s_openapi::serde_json::json;

    fn config_map() -> ConfigMap {
        typed(json!({
            "apiVersion": "v1",
            "kind": "ConfigMap",
            "metadata": {"name": "settings", "namespace": "default", "labels": {"app": "web"}},
            "data": {"mode": "prod", "level": "debug"},
            "binaryData": {"blob": "aGVsbG8="}
        }))
    }

    #[test]
    fn test_nil_list() {
        assert!(ConfigMapListPrinter.print(None, &options()).is_err());
    }

    #[test]
    fn test_nil_object() {
        let err = ConfigMapPrinter.print(None, &options()).unwrap_err();
        assert_eq!(err.to_string(), "config map is nil");
    }

    #[test]
    fn test_list() {
        let list = List {
            items: vec![config_map()],
            metadata: Default::default(),
        };
        let component = ConfigMapListPrinter.print(Some(&list), &options()).unwrap();
        let table = component.as_table().unwrap();
        assert_eq!(table.column_names(), vec!["Name", "Labels", "Data", "Age"]);
        assert_eq!(table.rows[0].get("Data"), Some(&Component::text("3")));
    }

    #[test]
    fn test_list_item_without_namespace_is_plain_name() {
        let orphan: ConfigMap = typed(json!({
            "apiVersion": "v1",
            "kind": "ConfigMap",
            "metadata": {"name": "a"}
        }));
        let list = List {
            items: vec![orphan, config_map()],
            metadata: Default::default(),
        };
        let component = ConfigMapListPrinter.print(Some(&list), &options()).unwrap();
        let table = component.as_table().unwrap();
        assert_eq!(table.rows[0].get("Name"), Some(&Component::text("a")));
        assert!(table.rows[1].get("Name").unwrap().as_link().is_some());
    }

    #[test]
    fn test_empty_list() {
        let list = List::<ConfigMap> {
            items: vec![],
            metadata: Default::default(),
        };
        let component = ConfigMapListPrinter.print(Some(&list), &options()).unwrap();
        let table = component.as_table().unwrap();
        assert!(table.is_empty());
        assert_eq!(table.placeholder, "We couldn't find any config maps!");
    }

    #[test]
    fn test_object() {
        let component = ConfigMapPrinter.print(Some(&config_map()), &options()).unwrap();
        let layout = component.as_flex_layout().unwrap();

        let data = layout.find_table("Data").unwrap();
        assert_eq!(data.rows.len(), 2);
        assert_eq!(data.rows[0].get("Key"), Some(&Component::text("level")));

        let binary = layout.find_table("Binary Data").unwrap();
        assert_eq!(binary.rows[0].get("Size"), Some(&Component::text("5 bytes")));
    }

    #[test]
    fn test_object_without_data() {
        let cm: ConfigMap = typed(json!({
            "apiVersion": "v1",
            "kind": "ConfigMap",
            "metadata": {"name": "empty", "namespace": "default"}
        }));
        let component = ConfigMapPrinter.print(Some(&cm), &options()).unwrap();
        let layout = component.as_flex_layout().unwrap();
        assert!(layout.find_table("Data").unwrap().is_empty());
        assert!(layout.find_table("Binary Data").is_none());
    }
}
