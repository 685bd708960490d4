use k8s_openapi::api::core::v1::{Container, PodTemplateSpec};

use super::format::yaml_code;
use super::Options;
use crate::component::{
    table_cols, Code, Component, FlexItem, FlexSection, Labels, Summary, Table, TableRow,
    WIDTH_FULL, WIDTH_HALF,
};
use crate::error::PrintError;

/// Pod template summary followed by one summary per container.
pub fn pod_template_section(
    template: &PodTemplateSpec,
    options: &Options,
) -> Result<FlexSection, PrintError> {
    let mut summary = Summary::new("Pod Template");
    let labels = template.metadata.as_ref().and_then(|m| m.labels.as_ref());
    summary.add("Labels", Labels::new(labels));

    let Some(spec) = template.spec.as_ref() else {
        return Ok(vec![FlexItem::new(WIDTH_FULL, summary)]);
    };
    if let Some(sa) = spec.service_account_name.as_deref() {
        summary.add("Service Account", Component::text(sa));
    }
    let mut section = vec![FlexItem::new(WIDTH_FULL, summary)];

    for container in spec.init_containers.iter().flatten() {
        let view = container_summary("Init Container", container, options)?;
        section.push(FlexItem::new(WIDTH_HALF, view));
    }
    for container in &spec.containers {
        let view = container_summary("Container", container, options)?;
        section.push(FlexItem::new(WIDTH_HALF, view));
    }

    Ok(section)
}

#[tracing::instrument(skip(container, options), fields(container = %container.name))]
fn container_summary(
    prefix: &str,
    container: &Container,
    options: &Options,
) -> Result<Summary, PrintError> {
    let mut summary = Summary::new(format!("{prefix} {}", container.name));
    let image = container.image.as_deref().unwrap_or_default();
    summary.add("Image", Component::text(image));

    let ports = container
        .ports
        .iter()
        .flatten()
        .map(|p| format!("{}/{}", p.container_port, p.protocol.as_deref().unwrap_or("TCP")))
        .collect::<Vec<_>>();
    if !ports.is_empty() {
        summary.add("Ports", Component::text(ports.join(", ")));
    }

    if let Some(command) = container.command.as_ref().filter(|c| !c.is_empty()) {
        summary.add("Command", Code::new(command.join(" ")));
    }
    if let Some(args) = container.args.as_ref().filter(|a| !a.is_empty()) {
        summary.add("Args", Code::new(args.join(" ")));
    }
    if let Some(env) = container.env.as_ref().filter(|e| !e.is_empty()) {
        summary.add("Environment", yaml_code(env)?);
    }

    let mounts = container.volume_mounts.as_deref().unwrap_or_default();
    if !mounts.is_empty() {
        let mut table = Table::new(
            "Volume Mounts",
            "There are no volume mounts!",
            table_cols(&["Name", "Mount Path", "Read Only"]),
        );
        for mount in mounts {
            table.add(
                TableRow::new()
                    .with("Name", Component::text(mount.name.clone()))
                    .with("Mount Path", Component::text(mount.mount_path.clone()))
                    .with(
                        "Read Only",
                        Component::text(mount.read_only.unwrap_or(false).to_string()),
                    ),
            );
        }
        summary.add("Volume Mounts", table);
    }

    if let (Some(cache), false) = (options.dash_config.manifest_cache(), image.is_empty()) {
        match cache.get_image_manifest(image) {
            Ok(manifest) => {
                summary.add("Image Manifest", Code::new(manifest.manifest));
                summary.add("Image Configuration", Code::new(manifest.configuration));
            }
            Err(e) => tracing::warn!(image, error = %e, "unable to load image manifest"),
        }
    }

    Ok(summary)
}
