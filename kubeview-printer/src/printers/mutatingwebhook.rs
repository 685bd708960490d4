use k8s_openapi::api::admissionregistration::v1::MutatingWebhookConfiguration;
use k8s_openapi::List;

use super::object::Object;
use super::printer::{list_table, require, PrintHandler};
use super::webhook::{webhook_items, WebhookView};
use super::Options;
use crate::component::{Component, TableRow};
use crate::error::PrintError;
use crate::utils::age;

#[derive(Debug, Clone, Default)]
pub struct MutatingWebhookListPrinter;

impl PrintHandler for MutatingWebhookListPrinter {
    type Object = List<MutatingWebhookConfiguration>;

    #[tracing::instrument(skip_all)]
    fn print(
        &self,
        list: Option<&List<MutatingWebhookConfiguration>>,
        options: &Options,
    ) -> Result<Component, PrintError> {
        let list = require(list, "mutating webhook configuration list")?;
        list_table(
            "Mutating Webhook Configurations",
            "We couldn't find any mutating webhook configurations!",
            &["Name", "Webhooks", "Age"],
            &list.items,
            |config| {
                let webhooks = config.webhooks.as_ref().map(Vec::len).unwrap_or(0);
                Ok(TableRow::new()
                    .with("Name", options.object_link(config))
                    .with("Webhooks", Component::text(webhooks.to_string()))
                    .with("Age", age(&config.metadata)))
            },
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct MutatingWebhookPrinter;

impl PrintHandler for MutatingWebhookPrinter {
    type Object = MutatingWebhookConfiguration;

    #[tracing::instrument(skip_all, fields(name = ?config.map(|c| &c.metadata.name)))]
    fn print(
        &self,
        config: Option<&MutatingWebhookConfiguration>,
        options: &Options,
    ) -> Result<Component, PrintError> {
        let config = require(config, "mutating webhook configuration")?;
        let mut object = Object::new(config)?;
        for webhook in config.webhooks.iter().flatten() {
            object.register_items(webhook_items(WebhookView::from(webhook)));
        }
        object.to_component(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printers::testing::{options, typed};
    use k8s_openapi::serde_json::json;

    fn configuration() -> MutatingWebhookConfiguration {
        typed(json!({
            "apiVersion": "admissionregistration.k8s.io/v1",
            "kind": "MutatingWebhookConfiguration",
            "metadata": {"name": "sidecar-injector"},
            "webhooks": [{
                "name": "inject.example.com",
                "admissionReviewVersions": ["v1"],
                "sideEffects": "None",
                "reinvocationPolicy": "IfNeeded",
                "clientConfig": {"service": {"name": "injector", "namespace": "mesh"}},
                "rules": [{
                    "apiGroups": [""],
                    "apiVersions": ["v1"],
                    "resources": ["pods"],
                    "operations": ["CREATE"],
                    "scope": "Namespaced"
                }]
            }]
        }))
    }

    #[test]
    fn test_nil_list() {
        assert!(MutatingWebhookListPrinter.print(None, &options()).is_err());
    }

    #[test]
    fn test_nil_object() {
        assert!(MutatingWebhookPrinter.print(None, &options()).is_err());
    }

    #[test]
    fn test_list() {
        let list = List {
            items: vec![configuration()],
            metadata: Default::default(),
        };
        let component = MutatingWebhookListPrinter.print(Some(&list), &options()).unwrap();
        let row = &component.as_table().unwrap().rows[0];
        assert_eq!(row.get("Webhooks"), Some(&Component::text("1")));
        assert_eq!(
            row.get("Name").unwrap().as_link().unwrap().reference,
            "/cluster-overview/admission-control/mutating-webhook-configurations/sidecar-injector"
        );
    }

    #[test]
    fn test_object() {
        let component = MutatingWebhookPrinter.print(Some(&configuration()), &options()).unwrap();
        let layout = component.as_flex_layout().unwrap();

        let summary = layout.find_summary("inject.example.com").unwrap();
        assert_eq!(summary.section("Reinvocation Policy"), Some(&Component::text("IfNeeded")));

        let rules = layout.find_table("Rules").unwrap();
        assert_eq!(rules.rows[0].get("Scope"), Some(&Component::text("Namespaced")));
        assert_eq!(rules.rows[0].get("API Groups"), Some(&Component::text("")));
    }
}
