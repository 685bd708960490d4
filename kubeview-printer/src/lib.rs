use std::sync::Arc;

use k8s_openapi::serde_json;
use kube::api::DynamicObject;

use crate::config::Settings;
use crate::error::{BoxError, PrintError};
use crate::manifest::ManifestFetcher;
use crate::printers::{DashConfig, Resource};
use crate::store::ObjectStore;

cfg_if::cfg_if! {
    if #[cfg(feature = "telemetry")] {
        use kubeview_telemetry as logging;
    } else {
        mod log;
        use log as logging;
    }
}

pub mod component;
pub mod config;
pub mod error;
pub mod link;
pub mod manifest;
pub mod plugin;
pub mod printers;
pub mod store;
pub mod structs;

mod utils;

/// Installs the tracing subscriber described by `settings`. Later calls are no-ops.
pub fn init_logging(settings: &Settings) -> Result<(), BoxError> {
    std::fs::create_dir_all(&settings.log.dir)?;
    logging::setup_logger(
        &settings.log.dir,
        &settings.log.level,
        &settings.telemetry_endpoint,
    )
}

pub fn shutdown_logging() {
    logging::shutdown();
}

/// Printer collaborators for `settings`. The image manifest cache is only
/// attached when a fetcher is given and manifests are turned on.
pub fn dash_config<F>(settings: &Settings, store: Arc<dyn ObjectStore>, fetcher: Option<F>) -> DashConfig
where
    F: ManifestFetcher + 'static,
{
    let config = DashConfig::new(store);
    match fetcher.and_then(|f| settings.manifest_cache(f)) {
        Some(cache) => config.with_manifest_cache(cache),
        None => config,
    }
}

/// Prints one YAML or JSON document and returns the component as JSON, or
/// `null` when nothing could be rendered.
#[tracing::instrument(skip_all)]
pub fn print_document(resource: &Resource, input: &str) -> Result<String, PrintError> {
    let object: DynamicObject = serde_yaml::from_str(input)?;
    let component = resource.print(&object)?;
    Ok(serde_json::to_string(&component)?)
}
