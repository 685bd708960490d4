use k8s_openapi::api::rbac::v1::{PolicyRule, Role};
use k8s_openapi::List;

use super::format::{print_optional_list, print_string_list};
use super::object::{ItemDescriptor, Object};
use super::printer::{list_table, require, PrintHandler};
use super::Options;
use crate::component::{table_cols, Component, Table, TableRow, WIDTH_FULL};
use crate::error::PrintError;
use crate::utils::age;

/// `resource.group` pairs, as `kubectl describe` prints them.
fn qualified_resources(rule: &PolicyRule) -> Vec<String> {
    let groups = rule.api_groups.as_deref().unwrap_or_default();
    let mut out = Vec::new();
    for resource in rule.resources.iter().flatten() {
        if groups.is_empty() {
            out.push(resource.clone());
        }
        for group in groups {
            if group.is_empty() {
                out.push(resource.clone());
            } else {
                out.push(format!("{resource}.{group}"));
            }
        }
    }
    out
}

/// Policy rules table shared by roles and cluster roles.
pub(crate) fn policy_rules_table(rules: Option<&Vec<PolicyRule>>) -> Result<Table, PrintError> {
    let columns = ["Resources", "Non-Resource URLs", "Resource Names", "Verbs"];
    let mut table = Table::new("Policy Rules", "There are no policy rules!", table_cols(&columns));
    for rule in rules.into_iter().flatten() {
        table.add(
            TableRow::new()
                .with("Resources", print_string_list(&qualified_resources(rule))?)
                .with("Non-Resource URLs", print_optional_list(rule.non_resource_urls.as_ref())?)
                .with("Resource Names", print_optional_list(rule.resource_names.as_ref())?)
                .with("Verbs", print_string_list(&rule.verbs)?),
        );
    }
    table.sort("Resources", false);
    Ok(table)
}

#[derive(Debug, Clone, Default)]
pub struct RoleListPrinter;

impl PrintHandler for RoleListPrinter {
    type Object = List<Role>;

    #[tracing::instrument(skip_all)]
    fn print(&self, list: Option<&List<Role>>, options: &Options) -> Result<Component, PrintError> {
        let list = require(list, "role list")?;
        list_table("Roles", "We couldn't find any roles!", &["Name", "Age"], &list.items, |role| {
            Ok(TableRow::new()
                .with("Name", options.object_link(role))
                .with("Age", age(&role.metadata)))
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct RolePrinter;

impl PrintHandler for RolePrinter {
    type Object = Role;

    #[tracing::instrument(skip_all, fields(name = ?role.map(|r| &r.metadata.name)))]
    fn print(&self, role: Option<&Role>, options: &Options) -> Result<Component, PrintError> {
        let role = require(role, "role")?;
        let mut object = Object::new(role)?;
        object.register_items(vec![ItemDescriptor::new(WIDTH_FULL, |_| {
            Ok(policy_rules_table(role.rules.as_ref())?.into())
        })]);
        object.to_component(options)
    }
}
