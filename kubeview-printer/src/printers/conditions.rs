use chrono::{DateTime, Utc};
use k8s_openapi::serde_json::Value;
use serde_json_path::JsonPath;

use crate::component::{table_cols, Component, Table, TableRow, Timestamp};
use crate::error::PrintError;

pub const CONDITIONS_TITLE: &str = "Conditions";
pub const CONDITIONS_PLACEHOLDER: &str = "There are no conditions!";

/// Column label and the JSON path read from each condition.
pub type ConditionColumn = (&'static str, &'static str);

pub const DEFAULT_CONDITION_COLUMNS: &[ConditionColumn] = &[
    ("Type", "$.type"),
    ("Reason", "$.reason"),
    ("Status", "$.status"),
    ("Message", "$.message"),
    ("Last Update", "$.lastUpdateTime"),
    ("Last Transition", "$.lastTransitionTime"),
];

/// Builds a table from `status.conditions` of an unstructured object.
///
/// A missing status or missing conditions give an empty table. A status
/// that is not a map, or conditions that are not a list, are errors.
pub fn create_conditions_table(
    object: Option<&Value>,
    sort_key: &str,
    columns: &[ConditionColumn],
) -> Result<Table, PrintError> {
    let object = object.ok_or(PrintError::NilObject("object"))?;

    let names: Vec<&str> = columns.iter().map(|(label, _)| *label).collect();
    let mut table = Table::new(CONDITIONS_TITLE, CONDITIONS_PLACEHOLDER, table_cols(&names));

    let Some(status) = object.get("status") else {
        return Ok(table);
    };
    let status = status.as_object().ok_or_else(|| PrintError::TypeCoercion {
        field: "status".to_string(),
        expected: "map",
    })?;

    let conditions = match status.get("conditions") {
        None | Some(Value::Null) => return Ok(table),
        Some(Value::Array(conditions)) => conditions,
        Some(_) => {
            return Err(PrintError::TypeCoercion {
                field: "status.conditions".to_string(),
                expected: "list",
            })
        }
    };

    let paths = columns
        .iter()
        .map(|(label, path)| {
            JsonPath::parse(path)
                .map(|p| (*label, p))
                .map_err(|e| PrintError::JsonPath {
                    path: path.to_string(),
                    message: e.to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    for condition in conditions {
        let row = paths.iter().fold(TableRow::new(), |row, (label, path)| {
            let cell = path
                .query(condition)
                .all()
                .first()
                .map(|v| condition_cell(v))
                .unwrap_or_else(|| Component::text(""));
            row.with(label, cell)
        });
        table.add(row);
    }

    table.sort(sort_key, false);
    Ok(table)
}

fn condition_cell(value: &Value) -> Component {
    match value {
        Value::String(s) => match DateTime::parse_from_rfc3339(s) {
            Ok(ts) => Timestamp::from(ts.with_timezone(&Utc)).into(),
            Err(_) => Component::text(s.clone()),
        },
        Value::Null => Component::text(""),
        other => Component::text(other.to_string()),
    }
}
