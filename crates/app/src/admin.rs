//! Admin overview: every venue with its items, read-only.

use serde::Serialize;

use inventario_core::VenueId;
use inventario_infra::InventoryStore;
use inventario_inventory::{Section, VenueStatus, VenueWithItems};

use crate::errors::WorkflowError;
use crate::navigation::Navigation;

const LOAD_FAILED: &str = "Error cargando los datos";

/// One card of the overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueSummary {
    pub id: VenueId,
    pub name: String,
    pub district: String,
    pub address: String,
    pub neighborhood: String,
    pub administrator: String,
    pub status: VenueStatus,
    /// `"name: quantity"` lines.
    pub inmuebles: Vec<String>,
    pub muebles: Vec<String>,
    pub link: String,
}

#[derive(Debug, Clone, Default)]
pub struct AdminOverview {
    venues: Vec<VenueWithItems>,
    error: Option<String>,
}

impl AdminOverview {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, store: &dyn InventoryStore) -> Result<(), WorkflowError> {
        self.error = None;
        match store.list_venues_with_items().await {
            Ok(venues) => {
                self.venues = venues;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load admin overview");
                self.venues.clear();
                self.error = Some(LOAD_FAILED.to_string());
                Err(WorkflowError::store_failure(&e, LOAD_FAILED))
            }
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn venues(&self) -> &[VenueWithItems] {
        &self.venues
    }

    pub fn summaries(&self) -> Vec<VenueSummary> {
        self.venues.iter().map(summarize).collect()
    }
}

fn summarize(row: &VenueWithItems) -> VenueSummary {
    let lines = |section: Section| -> Vec<String> {
        row.items
            .iter()
            .filter(|item| item.section == section)
            .map(|item| format!("{}: {}", item.name, item.quantity))
            .collect()
    };
    let venue = &row.venue;
    VenueSummary {
        id: venue.id,
        name: venue.details.name.clone(),
        district: venue.details.district.clone(),
        address: venue.details.address.clone(),
        neighborhood: venue.details.neighborhood.clone(),
        administrator: venue.details.administrator.clone(),
        status: venue.status,
        inmuebles: lines(Section::Inmuebles),
        muebles: lines(Section::Muebles),
        link: Navigation::Venue(venue.id).path(),
    }
}
