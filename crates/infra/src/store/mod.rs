//! Remote data client abstraction.
//!
//! The hosted store owns persistence and consistency; this layer only maps
//! typed operations onto its three collections (`escenarios`, `items`,
//! `items_disponibles`). Every call is one independent round trip.

pub mod in_memory;
pub mod postgrest;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use inventario_core::{ItemId, VenueId};
use inventario_inventory::{
    AvailableItemName, Item, NewItem, NewVenue, Section, Venue, VenueStatus, VenueWithItems,
};

pub use in_memory::{InMemoryInventoryStore, StoreOp};
pub use postgrest::PostgrestStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A single-row operation matched nothing. A normal negative result for
    /// lookups.
    #[error("no matching row")]
    NoRows,

    /// The store rejected the write (foreign key, unique or check constraint).
    #[error("constraint violation: {0}")]
    Constraint(String),

    #[error("store error {status} ({code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("network error: {0}")]
    Transport(String),

    #[error("invalid store response: {0}")]
    Decode(String),
}

impl StoreError {
    pub fn is_no_rows(&self) -> bool {
        matches!(self, StoreError::NoRows)
    }
}

/// Lift a single-row lookup into `Option`, treating `NoRows` as `None`.
pub fn optional<T>(result: StoreResult<T>) -> StoreResult<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(StoreError::NoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Typed operations against the hosted store.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// All venues, newest (highest id) first.
    async fn list_venues(&self) -> StoreResult<Vec<Venue>>;

    async fn get_venue(&self, id: VenueId) -> StoreResult<Venue>;

    /// Case-insensitive exact match on the venue name.
    async fn find_venue_by_name(&self, name: &str) -> StoreResult<Venue>;

    async fn insert_venue(&self, venue: &NewVenue) -> StoreResult<Venue>;

    /// Overwrite the editable fields of `venue`. Status is left untouched.
    async fn update_venue(&self, venue: &Venue) -> StoreResult<Venue>;

    async fn set_venue_status(&self, id: VenueId, status: VenueStatus) -> StoreResult<Venue>;

    /// Every venue with its items embedded.
    async fn list_venues_with_items(&self) -> StoreResult<Vec<VenueWithItems>>;

    async fn list_items(&self, venue_id: VenueId) -> StoreResult<Vec<Item>>;

    /// Returns the inserted row(s).
    async fn insert_item(&self, item: &NewItem) -> StoreResult<Vec<Item>>;

    /// `NoRows` if nothing was deleted.
    async fn delete_item(&self, id: ItemId) -> StoreResult<()>;

    async fn list_available_names(&self, section: Section) -> StoreResult<Vec<AvailableItemName>>;

    /// Case-insensitive lookup of a `(name, section)` pair.
    async fn find_available_name(
        &self,
        name: &str,
        section: Section,
    ) -> StoreResult<AvailableItemName>;

    async fn insert_available_name(
        &self,
        entry: &AvailableItemName,
    ) -> StoreResult<AvailableItemName>;

    /// Idempotent "create if not exists" for the available-names collection.
    async fn ensure_catalog(&self) -> StoreResult<()>;
}

#[async_trait]
impl<S> InventoryStore for Arc<S>
where
    S: InventoryStore + ?Sized,
{
    async fn list_venues(&self) -> StoreResult<Vec<Venue>> {
        (**self).list_venues().await
    }

    async fn get_venue(&self, id: VenueId) -> StoreResult<Venue> {
        (**self).get_venue(id).await
    }

    async fn find_venue_by_name(&self, name: &str) -> StoreResult<Venue> {
        (**self).find_venue_by_name(name).await
    }

    async fn insert_venue(&self, venue: &NewVenue) -> StoreResult<Venue> {
        (**self).insert_venue(venue).await
    }

    async fn update_venue(&self, venue: &Venue) -> StoreResult<Venue> {
        (**self).update_venue(venue).await
    }

    async fn set_venue_status(&self, id: VenueId, status: VenueStatus) -> StoreResult<Venue> {
        (**self).set_venue_status(id, status).await
    }

    async fn list_venues_with_items(&self) -> StoreResult<Vec<VenueWithItems>> {
        (**self).list_venues_with_items().await
    }

    async fn list_items(&self, venue_id: VenueId) -> StoreResult<Vec<Item>> {
        (**self).list_items(venue_id).await
    }

    async fn insert_item(&self, item: &NewItem) -> StoreResult<Vec<Item>> {
        (**self).insert_item(item).await
    }

    async fn delete_item(&self, id: ItemId) -> StoreResult<()> {
        (**self).delete_item(id).await
    }

    async fn list_available_names(&self, section: Section) -> StoreResult<Vec<AvailableItemName>> {
        (**self).list_available_names(section).await
    }

    async fn find_available_name(
        &self,
        name: &str,
        section: Section,
    ) -> StoreResult<AvailableItemName> {
        (**self).find_available_name(name, section).await
    }

    async fn insert_available_name(
        &self,
        entry: &AvailableItemName,
    ) -> StoreResult<AvailableItemName> {
        (**self).insert_available_name(entry).await
    }

    async fn ensure_catalog(&self) -> StoreResult<()> {
        (**self).ensure_catalog().await
    }
}
