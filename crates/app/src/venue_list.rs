//! Home page: all venues with a client-side search box.

use inventario_infra::InventoryStore;
use inventario_inventory::{Venue, VenueQuery};

use crate::errors::WorkflowError;
use crate::navigation::Navigation;

const LOAD_FAILED: &str = "Error al cargar los escenarios";

#[derive(Debug, Clone, Default)]
pub struct VenueListView {
    venues: Vec<Venue>,
    query: String,
    loading: bool,
    error: Option<String>,
}

impl VenueListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch every venue (newest first). Runs once when the page mounts.
    pub async fn load(&mut self, store: &dyn InventoryStore) -> Result<(), WorkflowError> {
        self.loading = true;
        self.error = None;
        let result = store.list_venues().await;
        self.loading = false;

        match result {
            Ok(venues) => {
                tracing::debug!(count = venues.len(), "venues loaded");
                self.venues = venues;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load venues");
                self.venues.clear();
                self.error = Some(LOAD_FAILED.to_string());
                Err(WorkflowError::store_failure(&e, LOAD_FAILED))
            }
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn all(&self) -> &[Venue] {
        &self.venues
    }

    /// Venues matching the search box. Empty while a load error is shown.
    pub fn visible(&self) -> Vec<&Venue> {
        if self.error.is_some() {
            return Vec::new();
        }
        let query = VenueQuery::new(&self.query);
        query.filter(&self.venues).collect()
    }

    pub fn link(venue: &Venue) -> Navigation {
        Navigation::Venue(venue.id)
    }

    pub fn new_venue_link() -> Navigation {
        Navigation::NewVenue
    }
}
