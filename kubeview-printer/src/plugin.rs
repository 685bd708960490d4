//! Seam to the plugin system: plugins may add sections to any object view.

use k8s_openapi::serde_json::Value;

use crate::component::{FlexItem, SummarySection};
use crate::error::BoxError;

/// Extra content contributed by plugins for one object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrintResponse {
    pub config: Vec<SummarySection>,
    pub status: Vec<SummarySection>,
    pub items: Vec<FlexItem>,
}

impl PrintResponse {
    pub fn is_empty(&self) -> bool {
        self.config.is_empty() && self.status.is_empty() && self.items.is_empty()
    }
}

pub trait PluginPrinter: Send + Sync {
    /// `object` is the unstructured form of the object being printed.
    fn print(&self, object: &Value) -> Result<PrintResponse, BoxError>;
}
