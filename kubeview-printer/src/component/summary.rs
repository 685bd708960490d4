use serde::Serialize;

use super::Component;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SummarySection {
    pub header: String,
    pub content: Component,
}

impl SummarySection {
    pub fn new(header: impl Into<String>, content: impl Into<Component>) -> Self {
        Self {
            header: header.into(),
            content: content.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Summary {
    pub title: String,
    pub sections: Vec<SummarySection>,
}

impl Summary {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    pub fn add(&mut self, header: impl Into<String>, content: impl Into<Component>) {
        self.sections.push(SummarySection::new(header, content));
    }

    pub fn section(&self, header: &str) -> Option<&Component> {
        self.sections
            .iter()
            .find(|s| s.header == header)
            .map(|s| &s.content)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuadrantPosition {
    Nw,
    Ne,
    Sw,
    Se,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QuadrantValue {
    pub position: QuadrantPosition,
    pub value: String,
    pub label: String,
}

/// Four labelled numeric cells.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Quadrant {
    pub title: String,
    pub values: Vec<QuadrantValue>,
}

impl Quadrant {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            values: Vec::with_capacity(4),
        }
    }

    pub fn set(&mut self, position: QuadrantPosition, label: impl Into<String>, value: impl ToString) {
        self.values.retain(|v| v.position != position);
        self.values.push(QuadrantValue {
            position,
            value: value.to_string(),
            label: label.into(),
        });
    }

    pub fn get(&self, position: QuadrantPosition) -> Option<&QuadrantValue> {
        self.values.iter().find(|v| v.position == position)
    }
}
