use serde::{Deserialize, Serialize};

use inventario_app::{ExportOffer, Navigation};
use inventario_inventory::{Condition, ItemDraft, Section, Venue};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Default, Deserialize)]
pub struct ListVenuesQuery {
    #[serde(default)]
    pub q: String,
}

/// Add-item form, field names as in the `items` rows.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    #[serde(rename = "seccion")]
    pub section: Section,
    #[serde(rename = "nombre", default)]
    pub name: String,
    #[serde(rename = "cantidad", default = "default_quantity")]
    pub quantity: i64,
    #[serde(rename = "estado", default)]
    pub condition: Option<Condition>,
    /// Free-text name, registered as a new suggestion when unknown.
    #[serde(default)]
    pub custom: bool,
}

fn default_quantity() -> i64 {
    1
}

impl AddItemRequest {
    pub fn into_draft(self) -> ItemDraft {
        ItemDraft {
            section: Some(self.section),
            name: self.name,
            quantity: self.quantity,
            condition: self.condition,
            custom: self.custom,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ManualLocationRequest {
    pub value: String,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct SubmitVenueResponse {
    pub navigation: Navigation,
    pub redirect: String,
}

impl From<Navigation> for SubmitVenueResponse {
    fn from(navigation: Navigation) -> Self {
        Self {
            redirect: navigation.path(),
            navigation,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CompleteInventoryResponse {
    pub venue: Venue,
    pub export_offer: ExportOffer,
}

#[derive(Debug, Serialize)]
pub struct ReferenceListsResponse {
    pub escenarios: Vec<String>,
    pub comunas: Vec<String>,
    pub barrios: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct LocationResponse {
    pub value: String,
}
