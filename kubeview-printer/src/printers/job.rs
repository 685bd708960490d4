use k8s_openapi::api::batch::v1::Job;
use k8s_openapi::List;

use super::object::Object;
use super::printer::{list_table, require, PrintHandler};
use super::selector::print_selector;
use super::Options;
use crate::component::{Component, Summary, TableRow};
use crate::error::PrintError;
use crate::utils::{age, labels, optional_number, time_cell};

#[derive(Debug, Clone, Default)]
pub struct JobListPrinter;

impl PrintHandler for JobListPrinter {
    type Object = List<Job>;

    #[tracing::instrument(skip_all)]
    fn print(&self, list: Option<&List<Job>>, options: &Options) -> Result<Component, PrintError> {
        let list = require(list, "job list")?;
        let columns = ["Name", "Labels", "Completions", "Succeeded", "Age"];
        list_table("Jobs", "We couldn't find any jobs!", &columns, &list.items, |job| {
            let succeeded = job.status.as_ref().and_then(|s| s.succeeded).unwrap_or(0);
            Ok(TableRow::new()
                .with("Name", options.object_link(job))
                .with("Labels", labels(&job.metadata))
                .with("Completions", optional_number(job.spec.as_ref().and_then(|s| s.completions)))
                .with("Succeeded", Component::text(succeeded.to_string()))
                .with("Age", age(&job.metadata)))
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct JobPrinter;

impl PrintHandler for JobPrinter {
    type Object = Job;

    #[tracing::instrument(skip_all, fields(name = ?job.map(|j| &j.metadata.name)))]
    fn print(&self, job: Option<&Job>, options: &Options) -> Result<Component, PrintError> {
        let job = require(job, "job")?;
        let mut object = Object::new(job)?;

        let mut config = Summary::new("Configuration");
        if let Some(spec) = job.spec.as_ref() {
            config.add("Back Off Limit", optional_number(spec.backoff_limit));
            config.add("Completions", optional_number(spec.completions));
            config.add("Parallelism", optional_number(spec.parallelism));
            config.add("Active Deadline Seconds", optional_number(spec.active_deadline_seconds));
            if let Some(selector) = spec.selector.as_ref() {
                config.add("Selectors", Component::text(print_selector(Some(selector))));
            }
            object.enable_pod_template(&spec.template);
        }
        object.register_config(config);

        let status = job.status.clone().unwrap_or_default();
        let mut summary = Summary::new("Status");
        summary.add("Started", time_cell(status.start_time.as_ref()));
        if let Some(completed) = status.completion_time.as_ref() {
            summary.add("Completed", time_cell(Some(completed)));
        }
        summary.add("Succeeded", Component::text(status.succeeded.unwrap_or(0).to_string()));
        summary.add("Active", Component::text(status.active.unwrap_or(0).to_string()));
        summary.add("Failed", Component::text(status.failed.unwrap_or(0).to_string()));
        object.register_summary(summary);

        object.enable_conditions();
        object.enable_events();
        object.to_component(options)
    }
}
