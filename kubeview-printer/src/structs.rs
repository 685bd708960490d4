use std::fmt;

use kube::api::DynamicObject;
use serde::{Deserialize, Serialize};

/// Concrete type of an object: its `apiVersion` and `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectType {
    pub api_version: String,
    pub kind: String,
}

impl ObjectType {
    pub fn new(api_version: &str, kind: &str) -> Self {
        Self {
            api_version: api_version.to_string(),
            kind: kind.to_string(),
        }
    }

    /// Type of a generated Kubernetes resource, `List<T>` included.
    pub fn of<K: k8s_openapi::Resource>() -> Self {
        Self::new(K::API_VERSION, K::KIND)
    }

    /// Type read from the object's type metadata, if it carries any.
    pub fn from_dynamic(obj: &DynamicObject) -> Option<Self> {
        obj.types
            .as_ref()
            .filter(|t| !t.kind.is_empty())
            .map(|t| Self::new(&t.api_version, &t.kind))
    }

    pub fn group(&self) -> &str {
        self.api_version
            .rsplit_once('/')
            .map(|(group, _)| group)
            .unwrap_or("")
    }

    pub fn version(&self) -> &str {
        self.api_version
            .rsplit_once('/')
            .map(|(_, version)| version)
            .unwrap_or(&self.api_version)
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, Kind={}", self.api_version, self.kind)
    }
}
