use k8s_openapi::api::admissionregistration::v1::ValidatingWebhookConfiguration;
use k8s_openapi::List;

use super::object::Object;
use super::printer::{list_table, require, PrintHandler};
use super::webhook::{webhook_items, WebhookView};
use super::Options;
use crate::component::{Component, TableRow};
use crate::error::PrintError;
use crate::utils::age;

#[derive(Debug, Clone, Default)]
pub struct ValidatingWebhookListPrinter;

impl PrintHandler for ValidatingWebhookListPrinter {
    type Object = List<ValidatingWebhookConfiguration>;

    #[tracing::instrument(skip_all)]
    fn print(
        &self,
        list: Option<&List<ValidatingWebhookConfiguration>>,
        options: &Options,
    ) -> Result<Component, PrintError> {
        let list = require(list, "validating webhook configuration list")?;
        list_table(
            "Validating Webhook Configurations",
            "We couldn't find any validating webhook configurations!",
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
pub struct ValidatingWebhookPrinter;

impl PrintHandler for ValidatingWebhookPrinter {
    type Object = ValidatingWebhookConfiguration;

    #[tracing::instrument(skip_all, fields(name = ?config.map(|c| &c.metadata.name)))]
    fn print(
        &self,
        config: Option<&ValidatingWebhookConfiguration>,
        options: &Options,
    ) -> Result<Component, PrintError> {
        let config = require(config, "validating webhook configuration")?;
        let mut object = Object::new(config)?;
        for webhook in config.webhooks.iter().flatten() {
            object.register_items(webhook_items(WebhookView::from(webhook)));
        }
        object.to_component(options)
    }
}
