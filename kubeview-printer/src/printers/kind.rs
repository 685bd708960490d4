use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

use kube::api::DynamicObject;

use super::clusterrole::{ClusterRoleListPrinter, ClusterRolePrinter};
use super::clusterrolebinding::{ClusterRoleBindingListPrinter, ClusterRoleBindingPrinter};
use super::configmap::{ConfigMapListPrinter, ConfigMapPrinter};
use super::cronjob::{CronJobListPrinter, CronJobPrinter};
use super::default::DefaultPrinter;
use super::deployment::{DeploymentListPrinter, DeploymentPrinter};
use super::event::EventListPrinter;
use super::job::{JobListPrinter, JobPrinter};
use super::mutatingwebhook::{MutatingWebhookListPrinter, MutatingWebhookPrinter};
use super::printer::{Dispatch, PrintHandler};
use super::role::{RoleListPrinter, RolePrinter};
use super::rolebinding::{RoleBindingListPrinter, RoleBindingPrinter};
use super::secret::{SecretListPrinter, SecretPrinter};
use super::serviceaccount::{ServiceAccountListPrinter, ServiceAccountPrinter};
use super::statefulset::{StatefulSetListPrinter, StatefulSetPrinter};
use super::validatingwebhook::{ValidatingWebhookListPrinter, ValidatingWebhookPrinter};
use super::Options;
use crate::component::Component;
use crate::error::{PrintError, RegistryError};
use crate::structs::ObjectType;

/// Prints objects through the handler registered for their type.
///
/// The table is filled while building and only read afterwards, so a
/// `Resource` can be shared between threads.
pub struct Resource {
    handlers: HashMap<ObjectType, Box<dyn Dispatch>>,
    fallback: DefaultPrinter,
    options: Options,
}

impl Resource {
    pub fn new(options: Options) -> Self {
        Self {
            handlers: HashMap::new(),
            fallback: DefaultPrinter,
            options,
        }
    }

    /// Registry holding every built-in handler.
    pub fn with_default_handlers(options: Options) -> Result<Self, RegistryError> {
        let mut resource = Self::new(options);

        resource.register(ConfigMapListPrinter)?;
        resource.register(ConfigMapPrinter)?;
        resource.register(SecretListPrinter)?;
        resource.register(SecretPrinter)?;
        resource.register(ServiceAccountListPrinter)?;
        resource.register(ServiceAccountPrinter)?;
        resource.register(RoleListPrinter)?;
        resource.register(RolePrinter)?;
        resource.register(ClusterRoleListPrinter)?;
        resource.register(ClusterRolePrinter)?;
        resource.register(RoleBindingListPrinter)?;
        resource.register(RoleBindingPrinter)?;
        resource.register(ClusterRoleBindingListPrinter)?;
        resource.register(ClusterRoleBindingPrinter)?;
        resource.register(StatefulSetListPrinter)?;
        resource.register(StatefulSetPrinter::default())?;
        resource.register(DeploymentListPrinter)?;
        resource.register(DeploymentPrinter)?;
        resource.register(JobListPrinter)?;
        resource.register(JobPrinter)?;
        resource.register(CronJobListPrinter)?;
        resource.register(CronJobPrinter)?;
        resource.register(EventListPrinter)?;
        resource.register(MutatingWebhookListPrinter)?;
        resource.register(MutatingWebhookPrinter)?;
        resource.register(ValidatingWebhookListPrinter)?;
        resource.register(ValidatingWebhookPrinter)?;

        Ok(resource)
    }

    /// Adds a handler for `H::Object`. Each type takes one handler.
    pub fn register<H>(&mut self, handler: H) -> Result<(), RegistryError>
    where
        H: PrintHandler + 'static,
    {
        let object_type = ObjectType::of::<H::Object>();
        match self.handlers.entry(object_type) {
            Entry::Occupied(e) => Err(RegistryError::DuplicateHandler(e.key().clone())),
            Entry::Vacant(e) => {
                tracing::trace!(object_type = %e.key(), "registered print handler");
                e.insert(Box::new(handler));
                Ok(())
            }
        }
    }

    pub fn is_registered(&self, object_type: &ObjectType) -> bool {
        self.handlers.contains_key(object_type)
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Prints `object`. `None` means there is nothing to render.
    #[tracing::instrument(skip_all, fields(name = ?object.metadata.name))]
    pub fn print(&self, object: &DynamicObject) -> Result<Option<Component>, PrintError> {
        let handler = ObjectType::from_dynamic(object)
            .and_then(|object_type| self.handlers.get(&object_type).map(|h| (object_type, h)));

        match handler {
            Some((object_type, handler)) => {
                tracing::debug!(%object_type, "dispatching to print handler");
                handler.dispatch(object, &self.options).map(Some)
            }
            None => self.fallback.print(object),
        }
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<String> = self.handlers.keys().map(ToString::to_string).collect();
        types.sort();
        f.debug_struct("Resource").field("handlers", &types).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printers::testing::{dynamic, options};
    use k8s_openapi::api::core::v1::ConfigMap;
    use k8s_openapi::serde_json::json;

    struct NameOnly;

    impl PrintHandler for NameOnly {
        type Object = ConfigMap;

        fn print(&self, object: Option<&ConfigMap>, _options: &Options) -> Result<Component, PrintError> {
            let cm = object.ok_or(PrintError::NilObject("config map"))?;
            Ok(Component::text(cm.metadata.name.clone().unwrap_or_default()))
        }
    }

    #[test]
    fn test_register_duplicate() {
        let mut resource = Resource::new(options());
        resource.register(NameOnly).unwrap();
        let err = resource.register(NameOnly).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateHandler(ObjectType::new("v1", "ConfigMap")));
    }

    #[test]
    fn test_default_handlers_register_once() {
        let resource = Resource::with_default_handlers(options()).unwrap();
        assert!(resource.is_registered(&ObjectType::new("v1", "ConfigMap")));
        assert!(resource.is_registered(&ObjectType::new("v1", "ConfigMapList")));
        assert!(resource.is_registered(&ObjectType::new("v1", "EventList")));
        assert!(!resource.is_registered(&ObjectType::new("v1", "Event")));

        let mut resource = resource;
        assert!(resource.register(NameOnly).is_err());
    }

    #[test]
    fn test_print_dispatches_on_type() {
        let mut resource = Resource::new(options());
        resource.register(NameOnly).unwrap();

        let obj = dynamic(json!({
            "apiVersion": "v1",
            "kind": "ConfigMap",
            "metadata": {"name": "settings", "namespace": "default"}
        }));
        assert_eq!(resource.print(&obj).unwrap(), Some(Component::text("settings")));
    }

    #[test]
    fn test_unregistered_type_uses_default() {
        let resource = Resource::new(options());
        let obj = dynamic(json!({
            "apiVersion": "v1",
            "kind": "ConfigMap",
            "metadata": {"name": "settings", "namespace": "default"}
        }));
        assert_eq!(resource.print(&obj).unwrap(), None);

        let list = dynamic(json!({
            "apiVersion": "v1",
            "kind": "ConfigMapList",
            "metadata": {},
            "items": [{"metadata": {"name": "settings"}}]
        }));
        let table = resource.print(&list).unwrap().unwrap();
        assert_eq!(table.as_table().unwrap().title, "v1.ConfigMapList");
    }

    #[test]
    fn test_missing_type_metadata_uses_default() {
        let mut resource = Resource::new(options());
        resource.register(NameOnly).unwrap();
        let obj = dynamic(json!({"metadata": {"name": "settings"}}));
        assert_eq!(resource.print(&obj).unwrap(), None);
    }

    #[test]
    fn test_decode_error() {
        let mut resource = Resource::new(options());
        resource.register(NameOnly).unwrap();
        let obj = dynamic(json!({
            "apiVersion": "v1",
            "kind": "ConfigMap",
            "metadata": {"name": "settings"},
            "data": "not a map"
        }));
        assert!(matches!(resource.print(&obj), Err(PrintError::Decode { .. })));
    }
}
