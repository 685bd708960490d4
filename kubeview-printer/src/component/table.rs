use std::collections::BTreeMap;

use serde::Serialize;

use super::Component;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TableColumn {
    pub name: String,
    pub accessor: String,
}

/// Columns whose accessor is the column name itself.
pub fn table_cols(names: &[&str]) -> Vec<TableColumn> {
    names
        .iter()
        .map(|n| TableColumn {
            name: n.to_string(),
            accessor: n.to_string(),
        })
        .collect()
}

/// Action offered on a single row, posted back to the dashboard.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridAction {
    pub name: String,
    pub action_path: String,
    pub payload: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub cells: BTreeMap<String, Component>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub grid_actions: Vec<GridAction>,
}

impl TableRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: &str, cell: impl Into<Component>) -> Self {
        self.cells.insert(column.to_string(), cell.into());
        self
    }

    pub fn with_action(mut self, action: GridAction) -> Self {
        self.grid_actions.push(action);
        self
    }

    pub fn get(&self, column: &str) -> Option<&Component> {
        self.cells.get(column)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Table {
    pub title: String,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<TableRow>,
    pub placeholder: String,
}

impl Table {
    pub fn new(title: impl Into<String>, placeholder: impl Into<String>, columns: Vec<TableColumn>) -> Self {
        Self {
            title: title.into(),
            columns,
            rows: Vec::new(),
            placeholder: placeholder.into(),
        }
    }

    pub fn add(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Stable sort on the rendered value of `column`; rows missing the cell sort first.
    pub fn sort(&mut self, column: &str, reverse: bool) {
        self.rows.sort_by(|a, b| {
            let a = a.get(column).map(Component::sort_value).unwrap_or_default();
            let b = b.get(column).map(Component::sort_value).unwrap_or_default();
            if reverse {
                b.cmp(&a)
            } else {
                a.cmp(&b)
            }
        });
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}
