use k8s_openapi::serde_json;

use crate::link::LinkError;
use crate::manifest::ManifestError;
use crate::store::StoreError;
use crate::structs::ObjectType;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while turning an object into a component.
#[derive(thiserror::Error, Debug)]
pub enum PrintError {
    /// The object handed to a printer was absent.
    #[error("{0} is nil")]
    NilObject(&'static str),

    /// A field had an unexpected JSON type.
    #[error("unable to read {field}: expected {expected}")]
    TypeCoercion {
        field: String,
        expected: &'static str,
    },

    /// The object could not be decoded into the handler's type.
    #[error("decode {object_type}: {source}")]
    Decode {
        object_type: ObjectType,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid json path {path}: {message}")]
    JsonPath { path: String, message: String },

    #[error(transparent)]
    Link(#[from] LinkError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("plugin manager print: {0}")]
    Plugin(#[source] BoxError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// Collaborator failure annotated with what was being printed.
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<PrintError>,
    },
}

/// Registration failures, raised while the handler table is built.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("type {0} already has a print handler")]
    DuplicateHandler(ObjectType),
}

pub trait ResultExt<T> {
    /// Wraps the error with a description of the failed step.
    fn context<C: Into<String>>(self, context: C) -> Result<T, PrintError>;
}

impl<T, E: Into<PrintError>> ResultExt<T> for Result<T, E> {
    fn context<C: Into<String>>(self, context: C) -> Result<T, PrintError> {
        self.map_err(|e| PrintError::Context {
            context: context.into(),
            source: Box::new(e.into()),
        })
    }
}
