use serde::Serialize;

use super::Component;

pub const WIDTH_FULL: u8 = 24;
pub const WIDTH_HALF: u8 = 12;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FlexItem {
    pub width: u8,
    pub view: Component,
}

impl FlexItem {
    pub fn new(width: u8, view: impl Into<Component>) -> Self {
        Self {
            width,
            view: view.into(),
        }
    }
}

pub type FlexSection = Vec<FlexItem>;

/// Ordered sections of sized items; layout itself happens in the frontend.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FlexLayout {
    pub title: String,
    pub sections: Vec<FlexSection>,
}

impl FlexLayout {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    /// Adds a section; empty sections are dropped.
    pub fn add_section(&mut self, section: FlexSection) {
        if !section.is_empty() {
            self.sections.push(section);
        }
    }

    /// Every view in layout order.
    pub fn views(&self) -> impl Iterator<Item = &Component> {
        self.sections.iter().flatten().map(|item| &item.view)
    }

    pub fn find_table(&self, title: &str) -> Option<&crate::component::Table> {
        self.views()
            .filter_map(Component::as_table)
            .find(|t| t.title == title)
    }

    pub fn find_summary(&self, title: &str) -> Option<&crate::component::Summary> {
        self.views()
            .filter_map(Component::as_summary)
            .find(|s| s.title == title)
    }
}
