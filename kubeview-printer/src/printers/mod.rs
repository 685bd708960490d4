pub mod clusterrole;
pub mod clusterrolebinding;
pub mod conditions;
pub mod configmap;
pub mod cronjob;
pub mod default;
pub mod deployment;
pub mod event;
pub mod format;
pub mod job;
pub mod mutatingwebhook;
pub mod object;
pub mod role;
pub mod rolebinding;
pub mod secret;
pub mod selector;
pub mod serviceaccount;
pub mod statefulset;
pub mod validatingwebhook;
pub mod workload;

mod job_template;
mod kind;
mod options;
mod pod_template;
mod printer;
mod webhook;

#[cfg(test)]
pub(crate) mod testing;

pub use conditions::{create_conditions_table, DEFAULT_CONDITION_COLUMNS};
pub use format::print_string_list;
pub use kind::Resource;
pub use object::{ItemDescriptor, Object};
pub use options::{DashConfig, Options};
pub use printer::PrintHandler;
pub use selector::{print_label_selector_requirement, print_match_labels, print_selector};
pub use workload::{PodStatusCount, PodStatusSource, StorePodStatus};
