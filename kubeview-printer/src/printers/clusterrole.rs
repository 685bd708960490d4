use k8s_openapi::api::rbac::v1::ClusterRole;
use k8s_openapi::List;

use super::format::print_string_list;
use super::object::{ItemDescriptor, Object};
use super::printer::{list_table, require, PrintHandler};
use super::role::policy_rules_table;
use super::selector::print_selector;
use super::Options;
use crate::component::{Component, Summary, TableRow, WIDTH_FULL};
use crate::error::PrintError;
use crate::utils::{age, labels};

#[derive(Debug, Clone, Default)]
pub struct ClusterRoleListPrinter;

impl PrintHandler for ClusterRoleListPrinter {
    type Object = List<ClusterRole>;

    #[tracing::instrument(skip_all)]
    fn print(&self, list: Option<&List<ClusterRole>>, options: &Options) -> Result<Component, PrintError> {
        let list = require(list, "cluster role list")?;
        let columns = ["Name", "Labels", "Age"];
        list_table("Cluster Roles", "We couldn't find any cluster roles!", &columns, &list.items, |role| {
            Ok(TableRow::new()
                .with("Name", options.object_link(role))
                .with("Labels", labels(&role.metadata))
                .with("Age", age(&role.metadata)))
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClusterRolePrinter;

impl PrintHandler for ClusterRolePrinter {
    type Object = ClusterRole;

    #[tracing::instrument(skip_all, fields(name = ?role.map(|r| &r.metadata.name)))]
    fn print(&self, role: Option<&ClusterRole>, options: &Options) -> Result<Component, PrintError> {
        let role = require(role, "cluster role")?;
        let mut object = Object::new(role)?;

        if let Some(aggregation) = role.aggregation_rule.as_ref() {
            let selectors = aggregation
                .cluster_role_selectors
                .iter()
                .flatten()
                .map(|s| print_selector(Some(s)))
                .collect::<Vec<_>>();
            let mut config = Summary::new("Configuration");
            config.add("Aggregation Selectors", print_string_list(&selectors)?);
            object.register_config(config);
        }

        object.register_items(vec![ItemDescriptor::new(WIDTH_FULL, |_| {
            Ok(policy_rules_table(role.rules.as_ref())?.into())
        })]);
        object.to_component(options)
    }
}
