//! Read-only object lookups used to resolve related objects while printing.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use kube::api::DynamicObject;
use kube::runtime::reflector::Store;
use kube::ResourceExt;
use serde::Deserialize;

use crate::structs::ObjectType;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("poisoned store lock")]
    Poisoned,

    #[error("no store is watching {0}")]
    NotWatched(ObjectType),

    #[error("object has no apiVersion/kind")]
    MissingType,

    #[error("unable to load objects: {0}")]
    Load(#[from] serde_yaml::Error),
}

/// Lookup key: type plus optional namespace, name and label selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    pub object_type: ObjectType,
    pub namespace: Option<String>,
    pub name: Option<String>,
    pub selector: Option<BTreeMap<String, String>>,
}

impl Key {
    pub fn new(api_version: &str, kind: &str) -> Self {
        Self {
            object_type: ObjectType::new(api_version, kind),
            namespace: None,
            name: None,
            selector: None,
        }
    }

    pub fn namespace(mut self, namespace: Option<&str>) -> Self {
        self.namespace = namespace.map(str::to_string);
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn selector(mut self, selector: BTreeMap<String, String>) -> Self {
        self.selector = Some(selector);
        self
    }

    /// Type is compared by the caller; this checks namespace, name and labels.
    fn matches_object(&self, obj: &DynamicObject) -> bool {
        if let Some(ns) = &self.namespace {
            if obj.metadata.namespace.as_deref() != Some(ns.as_str()) {
                return false;
            }
        }
        if let Some(name) = &self.name {
            if obj.metadata.name.as_deref() != Some(name.as_str()) {
                return false;
            }
        }
        match &self.selector {
            Some(selector) => {
                let labels = obj.labels();
                selector.iter().all(|(k, v)| labels.get(k) == Some(v))
            }
            None => true,
        }
    }
}

pub trait ObjectStore: Send + Sync {
    fn list(&self, key: &Key) -> Result<Vec<DynamicObject>, StoreError>;

    fn get(&self, key: &Key) -> Result<Option<DynamicObject>, StoreError> {
        Ok(self.list(key)?.into_iter().next())
    }
}

/// Objects held in memory, for embedders that already have them and for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: RwLock<HashMap<ObjectType, Vec<DynamicObject>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, obj: DynamicObject) -> Result<(), StoreError> {
        let object_type = ObjectType::from_dynamic(&obj).ok_or(StoreError::MissingType)?;
        let mut objects = self.objects.write().map_err(|_| StoreError::Poisoned)?;
        objects.entry(object_type).or_default().push(obj);
        Ok(())
    }

    /// Loads a multi-document YAML stream, one object per document.
    pub fn from_yaml(input: &str) -> Result<Self, StoreError> {
        let store = Self::new();
        for doc in serde_yaml::Deserializer::from_str(input) {
            let obj = DynamicObject::deserialize(doc)?;
            store.insert(obj)?;
        }
        Ok(store)
    }
}

impl ObjectStore for MemoryStore {
    fn list(&self, key: &Key) -> Result<Vec<DynamicObject>, StoreError> {
        let objects = self.objects.read().map_err(|_| StoreError::Poisoned)?;
        Ok(objects
            .get(&key.object_type)
            .map(|objs| {
                objs.iter()
                    .filter(|o| key.matches_object(o))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

/// Reads from kube reflector stores fed by the dashboard's watchers.
#[derive(Default)]
pub struct ReflectorStore {
    stores: RwLock<HashMap<ObjectType, Store<DynamicObject>>>,
}

impl ReflectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, object_type: ObjectType, store: Store<DynamicObject>) -> Result<(), StoreError> {
        let mut stores = self.stores.write().map_err(|_| StoreError::Poisoned)?;
        stores.insert(object_type, store);
        Ok(())
    }
}

impl ObjectStore for ReflectorStore {
    #[tracing::instrument(skip(self), fields(kind = %key.object_type.kind))]
    fn list(&self, key: &Key) -> Result<Vec<DynamicObject>, StoreError> {
        let stores = self.stores.read().map_err(|_| StoreError::Poisoned)?;
        let store = stores
            .get(&key.object_type)
            .ok_or_else(|| StoreError::NotWatched(key.object_type.clone()))?;

        Ok(store
            .state()
            .into_iter()
            .filter(|o| key.matches_object(o))
            .map(|o| (*o).clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::serde_json::json;
    use kube::api::ApiResource;
    use kube::runtime::reflector::store::Writer;
    use kube::runtime::watcher::Event;

    fn pod(name: &str, ns: &str, app: &str) -> DynamicObject {
        k8s_openapi::serde_json::from_value(json!({
            "apiVersion": "v1",
            "kind": "Pod",
            "metadata": {"name": name, "namespace": ns, "labels": {"app": app}},
        }))
        .unwrap()
    }

    #[test]
    fn test_memory_store_filters() {
        let store = MemoryStore::new();
        store.insert(pod("a", "default", "web")).unwrap();
        store.insert(pod("b", "default", "db")).unwrap();
        store.insert(pod("c", "other", "web")).unwrap();

        let key = Key::new("v1", "Pod").namespace(Some("default"));
        assert_eq!(store.list(&key).unwrap().len(), 2);

        let key = key.selector(BTreeMap::from([("app".to_string(), "web".to_string())]));
        let found = store.list(&key).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].metadata.name.as_deref(), Some("a"));

        let key = Key::new("v1", "Pod").namespace(Some("other")).name("c");
        assert!(store.get(&key).unwrap().is_some());

        assert!(store.list(&Key::new("v1", "Secret")).unwrap().is_empty());
    }

    #[test]
    fn test_memory_store_rejects_untyped_objects() {
        let store = MemoryStore::new();
        let obj: DynamicObject =
            k8s_openapi::serde_json::from_value(json!({"metadata": {"name": "x"}})).unwrap();
        assert!(matches!(store.insert(obj), Err(StoreError::MissingType)));
    }

    #[test]
    fn test_memory_store_from_yaml() {
        let store = MemoryStore::from_yaml(
            "apiVersion: v1\nkind: Pod\nmetadata:\n  name: a\n  namespace: default\n---\napiVersion: v1\nkind: Secret\nmetadata:\n  name: s\n  namespace: default\n",
        )
        .unwrap();
        assert_eq!(store.list(&Key::new("v1", "Pod")).unwrap().len(), 1);
        assert_eq!(store.list(&Key::new("v1", "Secret")).unwrap().len(), 1);
    }

    #[test]
    fn test_reflector_store() {
        let ar = ApiResource::erase::<k8s_openapi::api::core::v1::Pod>(&());
        let mut writer: Writer<DynamicObject> = Writer::new(ar);
        writer.apply_watcher_event(&Event::Apply(pod("a", "default", "web")));

        let store = ReflectorStore::new();
        store
            .register(ObjectType::new("v1", "Pod"), writer.as_reader())
            .unwrap();

        let found = store.list(&Key::new("v1", "Pod").namespace(Some("default"))).unwrap();
        assert_eq!(found.len(), 1);

        let err = store.list(&Key::new("v1", "Secret")).unwrap_err();
        assert!(matches!(err, StoreError::NotWatched(_)));
    }
}
