//! View components emitted by the printers.
//!
//! Components are plain data: the frontend renders them from their serialized
//! form, `{"type": "<kind>", "config": {...}}`.

mod layout;
mod summary;
mod table;
mod text;

pub use layout::{FlexItem, FlexLayout, FlexSection, WIDTH_FULL, WIDTH_HALF};
pub use summary::{Quadrant, QuadrantPosition, QuadrantValue, Summary, SummarySection};
pub use table::{table_cols, GridAction, Table, TableColumn, TableRow};
pub use text::{Code, Labels, Link, Text, Timestamp};

use serde::Serialize;

use crate::utils::pad_key;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "config", rename_all = "camelCase")]
pub enum Component {
    Text(Text),
    Link(Link),
    Labels(Labels),
    Timestamp(Timestamp),
    Code(Code),
    Table(Table),
    Summary(Summary),
    Quadrant(Quadrant),
    FlexLayout(FlexLayout),
}

impl Component {
    pub fn text(value: impl Into<String>) -> Self {
        Component::Text(Text::new(value))
    }

    pub fn markdown(value: impl Into<String>) -> Self {
        Component::Text(Text::markdown(value))
    }

    /// String used when ordering table rows by this cell.
    pub fn sort_value(&self) -> String {
        match self {
            Component::Text(t) => t.value.clone(),
            Component::Link(l) => l.text.clone(),
            Component::Labels(l) => l
                .labels
                .iter()
                .map(|(k, v)| format!("{k}:{v}"))
                .collect::<Vec<_>>()
                .join(","),
            Component::Timestamp(t) => pad_key(t.timestamp.max(0) as usize),
            Component::Code(c) => c.value.clone(),
            Component::Table(t) => t.title.clone(),
            Component::Summary(s) => s.title.clone(),
            Component::Quadrant(q) => q.title.clone(),
            Component::FlexLayout(f) => f.title.clone(),
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Component::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_link(&self) -> Option<&Link> {
        match self {
            Component::Link(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Component::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_summary(&self) -> Option<&Summary> {
        match self {
            Component::Summary(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_quadrant(&self) -> Option<&Quadrant> {
        match self {
            Component::Quadrant(q) => Some(q),
            _ => None,
        }
    }

    pub fn as_flex_layout(&self) -> Option<&FlexLayout> {
        match self {
            Component::FlexLayout(f) => Some(f),
            _ => None,
        }
    }
}

impl From<Text> for Component {
    fn from(t: Text) -> Self {
        Component::Text(t)
    }
}

impl From<Link> for Component {
    fn from(l: Link) -> Self {
        Component::Link(l)
    }
}

impl From<Labels> for Component {
    fn from(l: Labels) -> Self {
        Component::Labels(l)
    }
}

impl From<Timestamp> for Component {
    fn from(t: Timestamp) -> Self {
        Component::Timestamp(t)
    }
}

impl From<Code> for Component {
    fn from(c: Code) -> Self {
        Component::Code(c)
    }
}

impl From<Table> for Component {
    fn from(t: Table) -> Self {
        Component::Table(t)
    }
}

impl From<Summary> for Component {
    fn from(s: Summary) -> Self {
        Component::Summary(s)
    }
}

impl From<Quadrant> for Component {
    fn from(q: Quadrant) -> Self {
        Component::Quadrant(q)
    }
}

impl From<FlexLayout> for Component {
    fn from(f: FlexLayout) -> Self {
        Component::FlexLayout(f)
    }
}
