use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
use serde::Serialize;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    pub value: String,
    pub is_markdown: bool,
}

impl Text {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_markdown: false,
        }
    }

    pub fn markdown(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_markdown: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Link {
    pub text: String,
    #[serde(rename = "ref")]
    pub reference: String,
}

impl Link {
    pub fn new(text: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            reference: reference.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Labels {
    pub labels: BTreeMap<String, String>,
}

impl Labels {
    pub fn new(labels: Option<&BTreeMap<String, String>>) -> Self {
        Self {
            labels: labels.cloned().unwrap_or_default(),
        }
    }
}

/// Seconds since the Unix epoch; the frontend renders relative ages.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Timestamp {
    pub timestamp: i64,
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(ts: DateTime<Utc>) -> Self {
        Self {
            timestamp: ts.timestamp(),
        }
    }
}

impl From<&Time> for Timestamp {
    fn from(t: &Time) -> Self {
        t.0.into()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Code {
    pub value: String,
}

impl Code {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}
