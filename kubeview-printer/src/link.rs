//! Links from printed cells to the dashboard page of another object.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;

use crate::component::Link;

#[derive(thiserror::Error, Debug)]
pub enum LinkError {
    #[error("cannot link to {kind} without a name")]
    MissingName { kind: String },

    #[error("cannot link to namespaced {kind} {name} without a namespace")]
    MissingNamespace { kind: String, name: String },
}

/// Builds dashboard links; injected through [`crate::printers::Options`].
pub trait LinkGenerator: Send + Sync {
    fn for_object(
        &self,
        api_version: &str,
        kind: &str,
        name: &str,
        namespace: Option<&str>,
        text: &str,
    ) -> Result<Link, LinkError>;

    /// Owners live in the namespace of the object that references them.
    fn for_owner(&self, namespace: Option<&str>, owner: &OwnerReference) -> Result<Link, LinkError> {
        self.for_object(
            &owner.api_version,
            &owner.kind,
            &owner.name,
            namespace,
            &owner.name,
        )
    }
}

/// Maps kinds onto the dashboard's URL layout.
#[derive(Debug, Clone, Default)]
pub struct PathLinkGenerator;

enum Section {
    Namespaced(&'static str),
    Cluster(&'static str),
}

fn section_for(kind: &str) -> Option<Section> {
    use Section::*;
    Some(match kind {
        "Pod" => Namespaced("workloads/pods"),
        "Deployment" => Namespaced("workloads/deployments"),
        "StatefulSet" => Namespaced("workloads/stateful-sets"),
        "DaemonSet" => Namespaced("workloads/daemon-sets"),
        "ReplicaSet" => Namespaced("workloads/replica-sets"),
        "Job" => Namespaced("workloads/jobs"),
        "CronJob" => Namespaced("workloads/cron-jobs"),
        "Service" => Namespaced("discovery-and-load-balancing/services"),
        "Ingress" => Namespaced("discovery-and-load-balancing/ingresses"),
        "ConfigMap" => Namespaced("config-and-storage/config-maps"),
        "Secret" => Namespaced("config-and-storage/secrets"),
        "ServiceAccount" => Namespaced("config-and-storage/service-accounts"),
        "PersistentVolumeClaim" => Namespaced("config-and-storage/persistent-volume-claims"),
        "Role" => Namespaced("rbac/roles"),
        "RoleBinding" => Namespaced("rbac/role-bindings"),
        "Event" => Namespaced("events"),
        "ClusterRole" => Cluster("rbac/cluster-roles"),
        "ClusterRoleBinding" => Cluster("rbac/cluster-role-bindings"),
        "Namespace" => Cluster("namespaces"),
        "Node" => Cluster("nodes"),
        "PersistentVolume" => Cluster("storage/persistent-volumes"),
        "StorageClass" => Cluster("storage/storage-classes"),
        "CustomResourceDefinition" => Cluster("custom-resource-definitions"),
        "MutatingWebhookConfiguration" => {
            Cluster("admission-control/mutating-webhook-configurations")
        }
        "ValidatingWebhookConfiguration" => {
            Cluster("admission-control/validating-webhook-configurations")
        }
        _ => return None,
    })
}

impl LinkGenerator for PathLinkGenerator {
    fn for_object(
        &self,
        api_version: &str,
        kind: &str,
        name: &str,
        namespace: Option<&str>,
        text: &str,
    ) -> Result<Link, LinkError> {
        if name.is_empty() {
            return Err(LinkError::MissingName {
                kind: kind.to_string(),
            });
        }
        let namespace = namespace.filter(|ns| !ns.is_empty());

        let path = match (section_for(kind), namespace) {
            (Some(Section::Cluster(section)), _) => format!("/cluster-overview/{section}/{name}"),
            (Some(Section::Namespaced(section)), Some(ns)) => {
                format!("/overview/namespace/{ns}/{section}/{name}")
            }
            (Some(Section::Namespaced(_)), None) => {
                return Err(LinkError::MissingNamespace {
                    kind: kind.to_string(),
                    name: name.to_string(),
                })
            }
            (None, Some(ns)) => format!(
                "/overview/namespace/{ns}/custom-resources/{}/{}/{name}",
                kind.to_lowercase(),
                api_version,
            ),
            (None, None) => format!(
                "/cluster-overview/custom-resources/{}/{}/{name}",
                kind.to_lowercase(),
                api_version,
            ),
        };

        Ok(Link::new(text, path))
    }
}
