//! Reusable item-name suggestions (collection `items_disponibles`).

use serde::{Deserialize, Serialize};

use crate::item::Section;

/// A `(name, section)` suggestion for the item picker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AvailableItemName {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "seccion")]
    pub section: Section,
}

impl AvailableItemName {
    pub fn new(name: impl Into<String>, section: Section) -> Self {
        Self {
            name: name.into(),
            section,
        }
    }

    /// Same entry, ignoring case and surrounding whitespace in the name.
    pub fn same_entry(&self, name: &str, section: Section) -> bool {
        self.section == section && self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }
}
