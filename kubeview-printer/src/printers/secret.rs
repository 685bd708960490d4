use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::List;

use super::object::{ItemDescriptor, Object};
use super::printer::{list_table, require, PrintHandler};
use super::Options;
use crate::component::{table_cols, Component, Summary, Table, TableRow, WIDTH_FULL};
use crate::error::PrintError;
use crate::utils::{age, labels};

const DEFAULT_SECRET_TYPE: &str = "Opaque";

fn secret_type(secret: &Secret) -> String {
    secret
        .type_
        .clone()
        .unwrap_or_else(|| DEFAULT_SECRET_TYPE.to_string())
}

/// Keys of `data` and `stringData`; values are never printed.
fn secret_keys(secret: &Secret) -> Vec<&str> {
    let mut keys: Vec<&str> = secret
        .data
        .iter()
        .flat_map(|d| d.keys())
        .chain(secret.string_data.iter().flat_map(|d| d.keys()))
        .map(String::as_str)
        .collect();
    keys.sort_unstable();
    keys.dedup();
    keys
}

#[derive(Debug, Clone, Default)]
pub struct SecretListPrinter;

impl PrintHandler for SecretListPrinter {
    type Object = List<Secret>;

    #[tracing::instrument(skip_all)]
    fn print(&self, list: Option<&List<Secret>>, options: &Options) -> Result<Component, PrintError> {
        let list = require(list, "secret list")?;
        let columns = ["Name", "Labels", "Type", "Data", "Age"];
        list_table("Secrets", "We couldn't find any secrets!", &columns, &list.items, |secret| {
            Ok(TableRow::new()
                .with("Name", options.object_link(secret))
                .with("Labels", labels(&secret.metadata))
                .with("Type", Component::text(secret_type(secret)))
                .with("Data", Component::text(secret_keys(secret).len().to_string()))
                .with("Age", age(&secret.metadata)))
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct SecretPrinter;

impl PrintHandler for SecretPrinter {
    type Object = Secret;

    #[tracing::instrument(skip_all, fields(name = ?secret.map(|s| &s.metadata.name)))]
    fn print(&self, secret: Option<&Secret>, options: &Options) -> Result<Component, PrintError> {
        let secret = require(secret, "secret")?;
        let mut object = Object::new(secret)?;

        let mut config = Summary::new("Configuration");
        config.add("Type", Component::text(secret_type(secret)));
        object.register_config(config);

        object.register_items(vec![ItemDescriptor::new(WIDTH_FULL, |_| {
            let mut table = Table::new("Data", "Secret has no data!", table_cols(&["Key"]));
            for key in secret_keys(secret) {
                table.add(TableRow::new().with("Key", Component::text(key)));
            }
            Ok(table.into())
        })]);

        object.to_component(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printers::testing::{options, typed};
    use k8s_openapi::serde_json::json;

    fn secret() -> Secret {
        typed(json!({
            "apiVersion": "v1",
            "kind": "Secret",
            "metadata": {"name": "db-creds", "namespace": "default"},
            "data": {"username": "YWRtaW4=", "password": "c2VjcmV0"}
        }))
    }

    #[test]
    fn test_nil_list() {
        assert!(SecretListPrinter.print(None, &options()).is_err());
    }

    #[test]
    fn test_nil_object() {
        assert!(SecretPrinter.print(None, &options()).is_err());
    }

    #[test]
    fn test_list() {
        let list = List {
            items: vec![secret()],
            metadata: Default::default(),
        };
        let component = SecretListPrinter.print(Some(&list), &options()).unwrap();
        let row = &component.as_table().unwrap().rows[0];
        assert_eq!(row.get("Type"), Some(&Component::text("Opaque")));
        assert_eq!(row.get("Data"), Some(&Component::text("2")));
    }

    #[test]
    fn test_object_hides_values() {
        let component = SecretPrinter.print(Some(&secret()), &options()).unwrap();
        let layout = component.as_flex_layout().unwrap();

        let data = layout.find_table("Data").unwrap();
        assert_eq!(data.column_names(), vec!["Key"]);
        assert_eq!(data.rows[0].get("Key"), Some(&Component::text("password")));
        assert_eq!(data.rows[1].get("Key"), Some(&Component::text("username")));

        let rendered = k8s_openapi::serde_json::to_string(&component).unwrap();
        assert!(!rendered.contains("c2VjcmV0"));
    }
}
