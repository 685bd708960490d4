use k8s_openapi::api::rbac::v1::{RoleBinding, RoleRef, Subject};
use k8s_openapi::List;

use super::object::{ItemDescriptor, Object};
use super::printer::{list_table, require, PrintHandler};
use super::Options;
use crate::component::{table_cols, Component, Summary, Table, TableRow, WIDTH_FULL};
use crate::error::{PrintError, ResultExt};
use crate::utils::{age, labels};

/// Link to the role a binding refers to. Roles live in the binding's
/// namespace; cluster roles have none.
pub(crate) fn role_ref_link(
    role_ref: &RoleRef,
    namespace: Option<&str>,
    options: &Options,
) -> Result<Component, PrintError> {
    let api_version = if role_ref.api_group.is_empty() {
        "rbac.authorization.k8s.io/v1".to_string()
    } else {
        format!("{}/v1", role_ref.api_group)
    };
    let namespace = if role_ref.kind == "ClusterRole" { None } else { namespace };
    let link = options
        .link
        .for_object(&api_version, &role_ref.kind, &role_ref.name, namespace, &role_ref.name)
        .context(format!("link {} {}", role_ref.kind, role_ref.name))?;
    Ok(link.into())
}

fn subject_name(subject: &Subject, namespace: Option<&str>, options: &Options) -> Result<Component, PrintError> {
    if subject.kind != "ServiceAccount" {
        return Ok(Component::text(subject.name.clone()));
    }
    let namespace = subject.namespace.as_deref().or(namespace);
    let link = options
        .link
        .for_object("v1", "ServiceAccount", &subject.name, namespace, &subject.name)
        .context(format!("link service account {}", subject.name))?;
    Ok(link.into())
}

/// Subjects table shared by role bindings and cluster role bindings.
pub(crate) fn subjects_table(
    subjects: Option<&Vec<Subject>>,
    namespace: Option<&str>,
    options: &Options,
) -> Result<Table, PrintError> {
    let mut table = Table::new("Subjects", "There are no subjects!", table_cols(&["Kind", "Name", "Namespace"]));
    for subject in subjects.into_iter().flatten() {
        table.add(
            TableRow::new()
                .with("Kind", Component::text(subject.kind.clone()))
                .with("Name", subject_name(subject, namespace, options)?)
                .with("Namespace", Component::text(subject.namespace.clone().unwrap_or_default())),
        );
    }
    Ok(table)
}

pub(crate) fn binding_config(role_ref: &RoleRef, namespace: Option<&str>, options: &Options) -> Result<Summary, PrintError> {
    let mut config = Summary::new("Configuration");
    config.add("Role Kind", Component::text(role_ref.kind.clone()));
    config.add("Role Name", role_ref_link(role_ref, namespace, options)?);
    Ok(config)
}

#[derive(Debug, Clone, Default)]
pub struct RoleBindingListPrinter;

impl PrintHandler for RoleBindingListPrinter {
    type Object = List<RoleBinding>;

    #[tracing::instrument(skip_all)]
    fn print(&self, list: Option<&List<RoleBinding>>, options: &Options) -> Result<Component, PrintError> {
        let list = require(list, "role binding list")?;
        let columns = ["Name", "Labels", "Role kind", "Role name", "Age"];
        list_table("Role Bindings", "We couldn't find any role bindings!", &columns, &list.items, |rb| {
            let namespace = rb.metadata.namespace.as_deref();
            Ok(TableRow::new()
                .with("Name", options.object_link(rb))
                .with("Labels", labels(&rb.metadata))
                .with("Role kind", Component::text(rb.role_ref.kind.clone()))
                .with("Role name", role_ref_link(&rb.role_ref, namespace, options)?)
                .with("Age", age(&rb.metadata)))
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct RoleBindingPrinter;

impl PrintHandler for RoleBindingPrinter {
    type Object = RoleBinding;

    #[tracing::instrument(skip_all, fields(name = ?rb.map(|r| &r.metadata.name)))]
    fn print(&self, rb: Option<&RoleBinding>, options: &Options) -> Result<Component, PrintError> {
        let rb = require(rb, "role binding")?;
        let namespace = rb.metadata.namespace.as_deref();
        let mut object = Object::new(rb)?;

        object.register_config(binding_config(&rb.role_ref, namespace, options)?);
        object.register_items(vec![ItemDescriptor::new(WIDTH_FULL, move |options| {
            Ok(subjects_table(rb.subjects.as_ref(), namespace, options)?.into())
        })]);

        object.to_component(options)
    }
}
