//! Container image manifests, fetched once per image and kept for the life
//! of the cache.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use k8s_openapi::serde_json;
use serde::Deserialize;

#[derive(thiserror::Error, Debug)]
pub enum ManifestError {
    #[error("fetch manifest for {reference}: {message}")]
    Fetch { reference: String, message: String },

    #[error("serialize image configuration: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// What a registry returns for one image reference.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FetchedManifest {
    pub manifest: String,
    pub configuration: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageManifest {
    pub manifest: String,
    pub configuration: String,
}

/// Talks to the container registry. Implementations own transport, auth and
/// timeouts.
pub trait ManifestFetcher: Send + Sync {
    fn fetch(&self, reference: &str) -> Result<FetchedManifest, ManifestError>;
}

/// Image references without a transport are registry references.
pub fn image_reference(image: &str) -> String {
    if image.contains("://") {
        image.to_string()
    } else {
        format!("docker://{image}")
    }
}

/// Manifests read ahead of time from a YAML map keyed by image.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct FileFetcher {
    manifests: HashMap<String, FetchedManifest>,
}

impl FileFetcher {
    pub fn from_yaml(input: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(input)
    }
}

impl ManifestFetcher for FileFetcher {
    fn fetch(&self, reference: &str) -> Result<FetchedManifest, ManifestError> {
        let image = reference.strip_prefix("docker://").unwrap_or(reference);
        self.manifests
            .get(reference)
            .or_else(|| self.manifests.get(image))
            .cloned()
            .ok_or_else(|| ManifestError::Fetch {
                reference: reference.to_string(),
                message: "not in manifest file".to_string(),
            })
    }
}

pub struct ImageManifestCache {
    fetcher: Box<dyn ManifestFetcher>,
    entries: Mutex<HashMap<String, ImageManifest>>,
}

impl ImageManifestCache {
    pub fn new(fetcher: impl ManifestFetcher + 'static) -> Self {
        Self {
            fetcher: Box::new(fetcher),
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached manifest, fetching it on a miss.
    ///
    /// The lock is held across the fetch, so lookups are serialized. Failed
    /// fetches are not cached.
    #[tracing::instrument(skip(self))]
    pub fn get_image_manifest(&self, image: &str) -> Result<ImageManifest, ManifestError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(found) = entries.get(image) {
            return Ok(found.clone());
        }

        let reference = image_reference(image);
        let fetched = self.fetcher.fetch(&reference)?;
        let manifest = ImageManifest {
            manifest: fetched.manifest,
            configuration: serde_json::to_string_pretty(&fetched.configuration)?,
        };
        tracing::debug!(image, "cached image manifest");
        entries.insert(image.to_string(), manifest.clone());

        Ok(manifest)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for ImageManifestCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageManifestCache")
            .field("entries", &self.len())
            .finish()
    }
}
