use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::serde_json::{self, Value};
use kube::api::DynamicObject;

use crate::component::{Component, TableRow};
use crate::error::PrintError;
use crate::printers::printer::list_table;
use crate::structs::ObjectType;
use crate::utils::{age, labels};

/// Renders objects no handler claims. Only list-shaped objects produce a
/// table; anything else renders nothing.
#[derive(Debug, Clone, Default)]
pub struct DefaultPrinter;

impl DefaultPrinter {
    #[tracing::instrument(skip_all, fields(name = ?object.metadata.name))]
    pub fn print(&self, object: &DynamicObject) -> Result<Option<Component>, PrintError> {
        let value = serde_json::to_value(object)?;
        let items = match value.get("items") {
            Some(Value::Array(items)) if !items.is_empty() => items,
            _ => {
                tracing::debug!("object has no items, nothing to render");
                return Ok(None);
            }
        };

        let title = ObjectType::from_dynamic(object)
            .map(|t| format!("{}.{}", t.version(), t.kind))
            .unwrap_or_else(|| "Items".to_string());

        let table = list_table(&title, "There are no items!", &["Name", "Labels", "Age"], items, |item| {
            let meta = item
                .get("metadata")
                .cloned()
                .map(serde_json::from_value::<ObjectMeta>)
                .transpose()?
                .unwrap_or_default();
            Ok(TableRow::new()
                .with("Name", Component::text(meta.name.clone().unwrap_or_default()))
                .with("Labels", labels(&meta))
                .with("Age", age(&meta)))
        })?;

        Ok(Some(table))
    }
}
