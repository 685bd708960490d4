use k8s_openapi::api::rbac::v1::ClusterRoleBinding;
use k8s_openapi::List;

use super::object::{ItemDescriptor, Object};
use super::printer::{list_table, require, PrintHandler};
use super::rolebinding::{binding_config, role_ref_link, subjects_table};
use super::Options;
use crate::component::{Component, TableRow, WIDTH_FULL};
use crate::error::PrintError;
use crate::utils::{age, labels};

#[derive(Debug, Clone, Default)]
pub struct ClusterRoleBindingListPrinter;

impl PrintHandler for ClusterRoleBindingListPrinter {
    type Object = List<ClusterRoleBinding>;

    #[tracing::instrument(skip_all)]
    fn print(&self, list: Option<&List<ClusterRoleBinding>>, options: &Options) -> Result<Component, PrintError> {
        let list = require(list, "cluster role binding list")?;
        let columns = ["Name", "Labels", "Role kind", "Role name", "Age"];
        list_table(
            "Cluster Role Bindings",
            "We couldn't find any cluster role bindings!",
            &columns,
            &list.items,
            |crb| {
                Ok(TableRow::new()
                    .with("Name", options.object_link(crb))
                    .with("Labels", labels(&crb.metadata))
                    .with("Role kind", Component::text(crb.role_ref.kind.clone()))
                    .with("Role name", role_ref_link(&crb.role_ref, None, options)?)
                    .with("Age", age(&crb.metadata)))
            },
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClusterRoleBindingPrinter;

impl PrintHandler for ClusterRoleBindingPrinter {
    type Object = ClusterRoleBinding;

    #[tracing::instrument(skip_all, fields(name = ?crb.map(|c| &c.metadata.name)))]
    fn print(&self, crb: Option<&ClusterRoleBinding>, options: &Options) -> Result<Component, PrintError> {
        let crb = require(crb, "cluster role binding")?;
        let mut object = Object::new(crb)?;

        object.register_config(binding_config(&crb.role_ref, None, options)?);
        object.register_items(vec![ItemDescriptor::new(WIDTH_FULL, |options| {
            Ok(subjects_table(crb.subjects.as_ref(), None, options)?.into())
        })]);

        object.to_component(options)
    }
}
