use serde::Serialize;

use inventario_core::VenueId;

/// Where the UI goes after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "to", content = "venue_id", rename_all = "snake_case")]
pub enum Navigation {
    Home,
    NewVenue,
    Venue(VenueId),
}

impl Navigation {
    pub fn path(&self) -> String {
        match self {
            Navigation::Home => "/".to_string(),
            Navigation::NewVenue => "/nuevo-escenario".to_string(),
            Navigation::Venue(id) => format!("/escenario/{id}"),
        }
    }
}
