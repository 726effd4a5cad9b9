//! "Nuevo escenario" page.

use inventario_infra::{InventoryStore, optional};
use inventario_inventory::{Eligibility, NewVenue, VenueDetails, VenueField, reference};

use crate::autocomplete::AutocompleteInput;
use crate::errors::WorkflowError;
use crate::geolocation::{GeoLocationCapture, PositionSource};
use crate::navigation::Navigation;

#[derive(Debug, Clone)]
pub struct NewVenueForm {
    pub name: AutocompleteInput,
    pub district: AutocompleteInput,
    pub neighborhood: AutocompleteInput,
    pub location: GeoLocationCapture,
    /// Free-text fields; the autocomplete and location fields live above.
    details: VenueDetails,
    submitting: bool,
    error: Option<String>,
}

impl Default for NewVenueForm {
    fn default() -> Self {
        Self::new()
    }
}

impl NewVenueForm {
    pub fn new() -> Self {
        Self {
            name: AutocompleteInput::new(reference::options(reference::ESCENARIOS_DEPORTIVOS)),
            district: AutocompleteInput::new(reference::options(reference::COMUNAS)),
            neighborhood: AutocompleteInput::new(reference::options(reference::BARRIOS)),
            location: GeoLocationCapture::default(),
            details: VenueDetails::default(),
            submitting: false,
            error: None,
        }
    }

    /// Set any field as if typed into its input.
    pub fn set_field(&mut self, field: VenueField, value: impl Into<String>) {
        let value = value.into();
        match field {
            VenueField::Name => self.name.input(value),
            VenueField::District => self.district.input(value),
            VenueField::Neighborhood => self.neighborhood.input(value),
            VenueField::Geolocation => {
                self.location.manual_entry(&value);
            }
            other => self.details.set(other, value),
        }
    }

    pub fn set_eligibility(&mut self, eligibility: Eligibility) {
        self.details.eligibility = Some(eligibility);
    }

    pub async fn capture_location(&mut self, source: &dyn PositionSource) -> Option<String> {
        self.location.request(source).await
    }

    /// Current values of every input.
    pub fn draft(&self) -> VenueDetails {
        let mut details = self.details.clone();
        details.name = self.name.value().to_string();
        details.district = self.district.value().to_string();
        details.neighborhood = self.neighborhood.value().to_string();
        details.geolocation = self.location.value().to_string();
        details
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Create the venue, or jump to the existing one with the same name.
    pub async fn submit(&mut self, store: &dyn InventoryStore) -> Result<Navigation, WorkflowError> {
        self.error = None;
        let result = self.try_submit(store).await;
        if let Err(e) = &result {
            self.error = Some(e.message.clone());
        }
        result
    }

    async fn try_submit(&mut self, store: &dyn InventoryStore) -> Result<Navigation, WorkflowError> {
        let details = self
            .draft()
            .validated()
            .map_err(|e| WorkflowError::from_domain(&e))?;

        self.submitting = true;
        let existing = optional(store.find_venue_by_name(&details.name).await);
        let existing = match existing {
            Ok(found) => found,
            Err(e) => {
                self.submitting = false;
                tracing::warn!(error = %e, "duplicate venue lookup failed");
                return Err(WorkflowError::from_store("verificar el escenario", &e));
            }
        };

        if let Some(venue) = existing {
            self.submitting = false;
            tracing::info!(venue_id = %venue.id, "venue already exists, redirecting");
            return Ok(Navigation::Venue(venue.id));
        }

        let inserted = store.insert_venue(&NewVenue::pending(details)).await;
        self.submitting = false;
        match inserted {
            Ok(venue) => {
                tracing::info!(venue_id = %venue.id, "venue created");
                Ok(Navigation::Home)
            }
            Err(e) => {
                tracing::warn!(error = %e, "venue insert failed");
                Err(WorkflowError::from_store("crear el escenario", &e))
            }
        }
    }
}
