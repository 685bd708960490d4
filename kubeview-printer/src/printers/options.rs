use std::sync::Arc;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

use crate::component::Component;
use crate::link::LinkGenerator;
use crate::manifest::ImageManifestCache;
use crate::plugin::PluginPrinter;
use crate::store::ObjectStore;

/// Dashboard collaborators shared by every print call.
pub struct DashConfig {
    store: Arc<dyn ObjectStore>,
    plugin_printer: Option<Arc<dyn PluginPrinter>>,
    manifest_cache: Option<Arc<ImageManifestCache>>,
}

impl DashConfig {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self {
            store,
            plugin_printer: None,
            manifest_cache: None,
        }
    }

    pub fn with_plugin_printer(mut self, printer: Arc<dyn PluginPrinter>) -> Self {
        self.plugin_printer = Some(printer);
        self
    }

    pub fn with_manifest_cache(mut self, cache: Arc<ImageManifestCache>) -> Self {
        self.manifest_cache = Some(cache);
        self
    }

    pub fn object_store(&self) -> &dyn ObjectStore {
        self.store.as_ref()
    }

    pub fn plugin_printer(&self) -> Option<&dyn PluginPrinter> {
        self.plugin_printer.as_deref()
    }

    pub fn manifest_cache(&self) -> Option<&ImageManifestCache> {
        self.manifest_cache.as_deref()
    }
}

/// Per-call context threaded through every printer.
#[derive(Clone)]
pub struct Options {
    pub dash_config: Arc<DashConfig>,
    pub link: Arc<dyn LinkGenerator>,
}

impl Options {
    pub fn new(dash_config: DashConfig, link: impl LinkGenerator + 'static) -> Self {
        Self {
            dash_config: Arc::new(dash_config),
            link: Arc::new(link),
        }
    }

    pub fn object_store(&self) -> &dyn ObjectStore {
        self.dash_config.object_store()
    }

    /// Name cell linking to the object's own page, or plain text when no
    /// link can be built for it.
    pub fn object_link<K>(&self, object: &K) -> Component
    where
        K: k8s_openapi::Metadata<Ty = ObjectMeta>,
    {
        let meta = object.metadata();
        let name = meta.name.as_deref().unwrap_or_default();
        match self
            .link
            .for_object(K::API_VERSION, K::KIND, name, meta.namespace.as_deref(), name)
        {
            Ok(link) => link.into(),
            Err(e) => {
                tracing::debug!(kind = K::KIND, name, "unlinked name cell: {e}");
                Component::text(name)
            }
        }
    }
}
