//! Pieces shared by the mutating and validating webhook configuration printers.

use k8s_openapi::api::admissionregistration::v1::{
    MutatingWebhook, RuleWithOperations, ValidatingWebhook, WebhookClientConfig,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;

use super::format::{print_optional_list, print_string_list};
use super::object::ItemDescriptor;
use super::selector::print_selector;
use super::Options;
use crate::component::{table_cols, Code, Component, Summary, Table, TableRow, WIDTH_HALF};
use crate::error::{PrintError, ResultExt};

/// Fields common to both webhook kinds. `reinvocation_policy` is only set
/// for mutating webhooks.
pub(crate) struct WebhookView<'a> {
    pub name: &'a str,
    pub client_config: &'a WebhookClientConfig,
    pub failure_policy: Option<&'a str>,
    pub match_policy: Option<&'a str>,
    pub namespace_selector: Option<&'a LabelSelector>,
    pub object_selector: Option<&'a LabelSelector>,
    pub reinvocation_policy: Option<Option<&'a str>>,
    pub rules: Option<&'a Vec<RuleWithOperations>>,
    pub side_effects: &'a str,
    pub timeout_seconds: Option<i32>,
    pub admission_review_versions: &'a [String],
}

impl<'a> From<&'a MutatingWebhook> for WebhookView<'a> {
    fn from(w: &'a MutatingWebhook) -> Self {
        Self {
            name: &w.name,
            client_config: &w.client_config,
            failure_policy: w.failure_policy.as_deref(),
            match_policy: w.match_policy.as_deref(),
            namespace_selector: w.namespace_selector.as_ref(),
            object_selector: w.object_selector.as_ref(),
            reinvocation_policy: Some(w.reinvocation_policy.as_deref()),
            rules: w.rules.as_ref(),
            side_effects: &w.side_effects,
            timeout_seconds: w.timeout_seconds,
            admission_review_versions: &w.admission_review_versions,
        }
    }
}

impl<'a> From<&'a ValidatingWebhook> for WebhookView<'a> {
    fn from(w: &'a ValidatingWebhook) -> Self {
        Self {
            name: &w.name,
            client_config: &w.client_config,
            failure_policy: w.failure_policy.as_deref(),
            match_policy: w.match_policy.as_deref(),
            namespace_selector: w.namespace_selector.as_ref(),
            object_selector: w.object_selector.as_ref(),
            reinvocation_policy: None,
            rules: w.rules.as_ref(),
            side_effects: &w.side_effects,
            timeout_seconds: w.timeout_seconds,
            admission_review_versions: &w.admission_review_versions,
        }
    }
}

fn client(config: &WebhookClientConfig, options: &Options) -> Result<Component, PrintError> {
    if let Some(service) = config.service.as_ref() {
        let mut text = format!("{}/{}", service.namespace, service.name);
        if let Some(port) = service.port {
            text.push_str(&format!(":{port}"));
        }
        if let Some(path) = service.path.as_deref() {
            text.push_str(path);
        }
        let link = options
            .link
            .for_object("v1", "Service", &service.name, Some(&service.namespace), &text)
            .context(format!("link webhook service {}", service.name))?;
        return Ok(link.into());
    }
    Ok(Component::text(config.url.clone().unwrap_or_else(|| "<none>".to_string())))
}

pub(crate) fn webhook_summary(webhook: &WebhookView<'_>, options: &Options) -> Result<Summary, PrintError> {
    let mut summary = Summary::new(webhook.name);
    summary.add("Client", client(webhook.client_config, options)?);
    if let Some(ca) = webhook.client_config.ca_bundle.as_ref() {
        summary.add("CA Bundle", Code::new(String::from_utf8_lossy(&ca.0)));
    }
    summary.add("Failure Policy", Component::text(webhook.failure_policy.unwrap_or("Fail")));
    summary.add("Match Policy", Component::text(webhook.match_policy.unwrap_or("Equivalent")));
    summary.add("Namespace Selector", Component::text(print_selector(webhook.namespace_selector)));
    summary.add("Object Selector", Component::text(print_selector(webhook.object_selector)));
    if let Some(policy) = webhook.reinvocation_policy {
        summary.add("Reinvocation Policy", Component::text(policy.unwrap_or("Never")));
    }
    summary.add("Side Effects", Component::text(webhook.side_effects));
    summary.add("Timeout", Component::text(format!("{}s", webhook.timeout_seconds.unwrap_or(10))));
    summary.add(
        "Admission Review Versions",
        print_string_list(webhook.admission_review_versions)?,
    );
    Ok(summary)
}

pub(crate) fn rules_table(rules: Option<&Vec<RuleWithOperations>>) -> Result<Table, PrintError> {
    let columns = ["API Groups", "API Versions", "Resources", "Operations", "Scope"];
    let mut table = Table::new("Rules", "There are no rules!", table_cols(&columns));
    for rule in rules.into_iter().flatten() {
        table.add(
            TableRow::new()
                .with("API Groups", print_optional_list(rule.api_groups.as_ref())?)
                .with("API Versions", print_optional_list(rule.api_versions.as_ref())?)
                .with("Resources", print_optional_list(rule.resources.as_ref())?)
                .with("Operations", print_optional_list(rule.operations.as_ref())?)
                .with("Scope", Component::text(rule.scope.as_deref().unwrap_or("*"))),
        );
    }
    Ok(table)
}

/// Summary and rules table of one webhook, side by side.
pub(crate) fn webhook_items<'a>(webhook: WebhookView<'a>) -> Vec<ItemDescriptor<'a>> {
    let rules = webhook.rules;
    vec![
        ItemDescriptor::new(WIDTH_HALF, move |options| Ok(webhook_summary(&webhook, options)?.into())),
        ItemDescriptor::new(WIDTH_HALF, move |_| Ok(rules_table(rules)?.into())),
    ]
}
