use kube::api::DynamicObject;
use rayon::prelude::*;
use serde::de::DeserializeOwned;

use crate::component::{table_cols, Component, Table, TableRow};
use crate::error::PrintError;
use crate::printers::Options;
use crate::utils::dynamic_to_typed;

/// Prints one concrete Kubernetes type.
///
/// The registry keys a handler by the type of [`PrintHandler::Object`], so a
/// handler can only ever be invoked with the object it was written for.
/// `None` models an absent object and must be rejected with
/// [`PrintError::NilObject`].
pub trait PrintHandler: Send + Sync {
    type Object: k8s_openapi::Resource + DeserializeOwned;

    fn print(&self, object: Option<&Self::Object>, options: &Options) -> Result<Component, PrintError>;
}

/// Object-safe view of a [`PrintHandler`], fed with unstructured objects.
pub(crate) trait Dispatch: Send + Sync {
    fn dispatch(&self, object: &DynamicObject, options: &Options) -> Result<Component, PrintError>;
}

impl<H: PrintHandler> Dispatch for H {
    fn dispatch(&self, object: &DynamicObject, options: &Options) -> Result<Component, PrintError> {
        let typed: H::Object = dynamic_to_typed(object)?;
        self.print(Some(&typed), options)
    }
}

/// Builds a list table, one row per item. Rows are built in parallel; their
/// order follows `items`.
pub(crate) fn list_table<T, F>(
    title: &str,
    placeholder: &str,
    columns: &[&str],
    items: &[T],
    build_row: F,
) -> Result<Component, PrintError>
where
    T: Sync,
    F: Fn(&T) -> Result<TableRow, PrintError> + Sync + Send,
{
    let rows = items
        .par_iter()
        .map(build_row)
        .collect::<Result<Vec<_>, _>>()?;

    let mut table = Table::new(title, placeholder, table_cols(columns));
    for row in rows {
        table.add(row);
    }
    Ok(table.into())
}

pub(crate) fn require<'a, T>(object: Option<&'a T>, what: &'static str) -> Result<&'a T, PrintError> {
    object.ok_or(PrintError::NilObject(what))
}
