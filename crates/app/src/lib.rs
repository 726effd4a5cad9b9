//! `inventario-app`: the client-side inventory workflow.
//!
//! Each view is a plain state struct driven by UI events. Async operations
//! take the store handle explicitly and keep their own error boundary: a
//! failure becomes one display string on the view and an `Err` for callers
//! that need to branch on it; nothing here panics or retries.

pub mod admin;
pub mod autocomplete;
pub mod errors;
pub mod geolocation;
pub mod navigation;
pub mod venue_editor;
pub mod venue_form;
pub mod venue_list;

use inventario_infra::InventoryStore;

pub use admin::{AdminOverview, VenueSummary};
pub use autocomplete::AutocompleteInput;
pub use errors::{FailureKind, WorkflowError};
pub use geolocation::{GeoLocationCapture, PositionError, PositionOptions, PositionSource};
pub use navigation::Navigation;
pub use venue_editor::{EditorSnapshot, ExportOffer, VenueEditor};
pub use venue_form::NewVenueForm;
pub use venue_list::VenueListView;

/// One-time startup step: make sure the available-names collection exists.
///
/// Failure is logged and otherwise ignored.
pub async fn bootstrap(store: &dyn InventoryStore) {
    match store.ensure_catalog().await {
        Ok(()) => tracing::info!("available item names collection ready"),
        Err(e) => tracing::warn!(error = %e, "failed to initialize available item names"),
    }
}
