use k8s_openapi::api::batch::v1::CronJob;
use k8s_openapi::List;

use super::object::Object;
use super::printer::{list_table, require, PrintHandler};
use super::Options;
use crate::component::{Component, Summary, TableRow};
use crate::error::PrintError;
use crate::utils::{age, labels, optional_number, time_cell};

fn suspended(cron_job: &CronJob) -> bool {
    cron_job
        .spec
        .as_ref()
        .and_then(|s| s.suspend)
        .unwrap_or(false)
}

#[derive(Debug, Clone, Default)]
pub struct CronJobListPrinter;

impl PrintHandler for CronJobListPrinter {
    type Object = List<CronJob>;

    #[tracing::instrument(skip_all)]
    fn print(&self, list: Option<&List<CronJob>>, options: &Options) -> Result<Component, PrintError> {
        let list = require(list, "cron job list")?;
        let columns = ["Name", "Labels", "Schedule", "Suspend", "Last Schedule", "Age"];
        list_table("Cron Jobs", "We couldn't find any cron jobs!", &columns, &list.items, |cj| {
            let schedule = cj.spec.as_ref().map(|s| s.schedule.clone()).unwrap_or_default();
            let last = cj.status.as_ref().and_then(|s| s.last_schedule_time.as_ref());
            Ok(TableRow::new()
                .with("Name", options.object_link(cj))
                .with("Labels", labels(&cj.metadata))
                .with("Schedule", Component::text(schedule))
                .with("Suspend", Component::text(suspended(cj).to_string()))
                .with("Last Schedule", time_cell(last))
                .with("Age", age(&cj.metadata)))
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct CronJobPrinter;

impl PrintHandler for CronJobPrinter {
    type Object = CronJob;

    #[tracing::instrument(skip_all, fields(name = ?cron_job.map(|c| &c.metadata.name)))]
    fn print(&self, cron_job: Option<&CronJob>, options: &Options) -> Result<Component, PrintError> {
        let cj = require(cron_job, "cron job")?;
        let mut object = Object::new(cj)?;

        let mut config = Summary::new("Configuration");
        if let Some(spec) = cj.spec.as_ref() {
            config.add("Schedule", Component::text(spec.schedule.clone()));
            let policy = spec
                .concurrency_policy
                .clone()
                .unwrap_or_else(|| "Allow".to_string());
            config.add("Concurrency Policy", Component::text(policy));
            config.add("Suspend", Component::text(suspended(cj).to_string()));
            config.add("Starting Deadline Seconds", optional_number(spec.starting_deadline_seconds));
            config.add(
                "Successful Job History Limit",
                optional_number(spec.successful_jobs_history_limit),
            );
            config.add("Failed Job History Limit", optional_number(spec.failed_jobs_history_limit));
            object.enable_job_template(&spec.job_template);
        }
        object.register_config(config);

        let status = cj.status.clone().unwrap_or_default();
        let mut summary = Summary::new("Status");
        summary.add("Active", Component::text(status.active.map(|a| a.len()).unwrap_or(0).to_string()));
        summary.add("Last Schedule", time_cell(status.last_schedule_time.as_ref()));
        summary.add("Last Successful", time_cell(status.last_successful_time.as_ref()));
        object.register_summary(summary);

        object.enable_events();
        object.to_component(options)
    }
}
