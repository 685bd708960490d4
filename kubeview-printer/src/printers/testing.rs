//! Fixtures shared by the printer tests.

use std::sync::Arc;

use k8s_openapi::serde_json::{self, Value};
use kube::api::DynamicObject;
use serde::de::DeserializeOwned;

use crate::link::PathLinkGenerator;
use crate::printers::{DashConfig, Options};
use crate::store::MemoryStore;

pub fn options() -> Options {
    options_with_store(MemoryStore::new())
}

pub fn options_with_store(store: MemoryStore) -> Options {
    Options::new(DashConfig::new(Arc::new(store)), PathLinkGenerator)
}

pub fn dynamic(value: Value) -> DynamicObject {
    serde_json::from_value(value).unwrap()
}

pub fn typed<T: DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).unwrap()
}
