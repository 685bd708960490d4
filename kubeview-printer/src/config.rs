use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use crate::manifest::{ImageManifestCache, ManifestFetcher};

#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("read settings {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse settings: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub dir: PathBuf,
    /// `EnvFilter` directive, e.g. `info` or `kubeview_printer=debug`.
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            dir: std::env::temp_dir(),
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct Settings {
    pub log: LogSettings,
    pub telemetry_endpoint: String,
    pub image_manifests: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log: LogSettings::default(),
            telemetry_endpoint: "http://localhost:4317".to_string(),
            image_manifests: true,
        }
    }
}

impl Settings {
    /// Empty input gives the defaults.
    pub fn from_yaml(input: &str) -> Result<Self, SettingsError> {
        if input.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(input)?)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let input = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&input)
    }

    /// Cache backed by `fetcher`, or `None` when image manifests are turned off.
    pub fn manifest_cache(
        &self,
        fetcher: impl ManifestFetcher + 'static,
    ) -> Option<Arc<ImageManifestCache>> {
        self.image_manifests
            .then(|| Arc::new(ImageManifestCache::new(fetcher)))
    }
}
