use k8s_openapi::api::batch::v1::JobTemplateSpec;

use super::pod_template::pod_template_section;
use super::Options;
use crate::component::{FlexItem, FlexSection, Labels, Summary, WIDTH_FULL};
use crate::error::PrintError;
use crate::utils::optional_number;

/// Job template summary followed by the pod template it wraps.
pub fn job_template_section(
    template: &JobTemplateSpec,
    options: &Options,
) -> Result<FlexSection, PrintError> {
    let mut summary = Summary::new("Job Template");
    let labels = template.metadata.as_ref().and_then(|m| m.labels.as_ref());
    summary.add("Labels", Labels::new(labels));

    let Some(spec) = template.spec.as_ref() else {
        return Ok(vec![FlexItem::new(WIDTH_FULL, summary)]);
    };
    summary.add("Completions", optional_number(spec.completions));
    summary.add("Parallelism", optional_number(spec.parallelism));
    summary.add("Backoff Limit", optional_number(spec.backoff_limit));
    summary.add("Active Deadline Seconds", optional_number(spec.active_deadline_seconds));

    let mut section = vec![FlexItem::new(WIDTH_FULL, summary)];
    section.extend(pod_template_section(&spec.template, options)?);
    Ok(section)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Component;
    use crate::printers::testing::{options, typed};
    use k8s_openapi::serde_json::json;

    #[test]
    fn test_job_template_section() {
        let template: JobTemplateSpec = typed(json!({
            "metadata": {"labels": {"job": "backup"}},
            "spec": {
                "completions": 1,
                "template": {
                    "spec": {"containers": [{"name": "backup", "image": "busybox"}]}
                }
            }
        }));

        let section = job_template_section(&template, &options()).unwrap();
        assert_eq!(section.len(), 3);

        let job = section[0].view.as_summary().unwrap();
        assert_eq!(job.section("Completions"), Some(&Component::text("1")));
        assert_eq!(job.section("Parallelism"), Some(&Component::text("<not set>")));
        assert_eq!(section[1].view.as_summary().unwrap().title, "Pod Template");
    }

    #[test]
    fn test_job_template_without_spec() {
        let section = job_template_section(&JobTemplateSpec::default(), &options()).unwrap();
        assert_eq!(section.len(), 1);
    }
}
