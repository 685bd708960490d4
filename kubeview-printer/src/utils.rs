use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, Time};
use k8s_openapi::serde_json::{self, from_value, to_value};
use kube::api::DynamicObject;
use serde::de::DeserializeOwned;

use crate::component::{Component, Labels, Timestamp};
use crate::error::PrintError;
use crate::structs::ObjectType;

pub fn pad_key(n: usize) -> String {
    format!("{:020}", n)
}

/// Decodes an unstructured object into a generated Kubernetes type.
pub fn dynamic_to_typed<T: DeserializeOwned>(obj: &DynamicObject) -> Result<T, PrintError> {
    let object_type = ObjectType::from_dynamic(obj).unwrap_or_else(|| ObjectType::new("", ""));
    let value = to_value(obj)?;
    from_value(value).map_err(|source| PrintError::Decode {
        object_type,
        source,
    })
}

/// Creation age cell, or `<unknown>` when the object has no timestamp.
pub fn age(meta: &ObjectMeta) -> Component {
    time_cell(meta.creation_timestamp.as_ref())
}

pub fn time_cell(time: Option<&Time>) -> Component {
    match time {
        Some(t) => Timestamp::from(t).into(),
        None => Component::text("<unknown>"),
    }
}

pub fn labels(meta: &ObjectMeta) -> Component {
    Labels::new(meta.labels.as_ref()).into()
}

pub fn optional_number(n: Option<impl ToString>) -> Component {
    n.map(|n| Component::text(n.to_string()))
        .unwrap_or_else(|| Component::text("<not set>"))
}

pub fn json_field<'a>(value: &'a serde_json::Value, path: &[&str]) -> Option<&'a serde_json::Value> {
    path.iter().try_fold(value, |cur, key| cur.get(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::core::v1::ConfigMap;
    use k8s_openapi::serde_json::json;

    #[test]
    fn test_dynamic_to_typed() {
        let obj: DynamicObject = serde_json::from_value(json!({
            "apiVersion": "v1",
            "kind": "ConfigMap",
            "metadata": {"name": "settings", "namespace": "default"},
            "data": {"key": "value"}
        }))
        .unwrap();

        let cm: ConfigMap = dynamic_to_typed(&obj).unwrap();
        assert_eq!(cm.metadata.name.as_deref(), Some("settings"));
        assert_eq!(cm.data.unwrap().get("key").map(String::as_str), Some("value"));
    }

    #[test]
    fn test_age_without_timestamp() {
        assert_eq!(age(&ObjectMeta::default()), Component::text("<unknown>"));
    }

    #[test]
    fn test_json_field() {
        let value = json!({"spec": {"template": {"name": "x"}}});
        assert_eq!(json_field(&value, &["spec", "template", "name"]), Some(&json!("x")));
        assert_eq!(json_field(&value, &["spec", "missing"]), None);
    }
}
