//! In-memory store for tests/dev.
//!
//! Mirrors the hosted store's observable behavior: ids are assigned on
//! insert, single-row operations report `NoRows`, item inserts check the
//! venue foreign key. It also records calls per operation and can be told to
//! fail specific operations, so workflows can be tested against both paths.

use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;

use inventario_core::{ItemId, VenueId};
use inventario_inventory::{
    reference, AvailableItemName, Item, NewItem, NewVenue, Section, Venue, VenueStatus,
    VenueWithItems,
};

use super::{InventoryStore, StoreError, StoreResult};

/// One variant per `InventoryStore` method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    ListVenues,
    GetVenue,
    FindVenueByName,
    InsertVenue,
    UpdateVenue,
    SetVenueStatus,
    ListVenuesWithItems,
    ListItems,
    InsertItem,
    DeleteItem,
    ListAvailableNames,
    FindAvailableName,
    InsertAvailableName,
    EnsureCatalog,
}

#[derive(Debug, Default)]
struct State {
    /// Insertion order; listed newest first.
    venues: Vec<Venue>,
    items: Vec<Item>,
    names: Vec<AvailableItemName>,
    next_item_id: i64,
    catalog_ready: bool,
}

#[derive(Debug, Default)]
pub struct InMemoryInventoryStore {
    state: RwLock<State>,
    calls: RwLock<HashMap<StoreOp, usize>>,
    failing: RwLock<HashSet<StoreOp>>,
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose available-names collection holds the static reference lists.
    pub fn seeded() -> Self {
        let store = Self::new();
        {
            let mut state = store.write();
            state.names.extend(reference::seed_catalog());
            state.catalog_ready = true;
        }
        store
    }

    /// Make every subsequent call of `op` fail with a transport error.
    pub fn fail_on(&self, op: StoreOp) {
        self.failing
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(op);
    }

    pub fn recover(&self, op: StoreOp) {
        self.failing
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&op);
    }

    /// Number of times `op` was invoked (including failed invocations).
    pub fn calls(&self, op: StoreOp) -> usize {
        self.calls
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&op)
            .copied()
            .unwrap_or(0)
    }

    /// Snapshot of the available-names collection.
    pub fn available_names(&self) -> Vec<AvailableItemName> {
        self.read().names.clone()
    }

    /// Snapshot of every stored item.
    pub fn items(&self) -> Vec<Item> {
        self.read().items.clone()
    }

    pub fn catalog_ready(&self) -> bool {
        self.read().catalog_ready
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn enter(&self, op: StoreOp) -> StoreResult<()> {
        *self
            .calls
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(op)
            .or_insert(0) += 1;

        let failing = self
            .failing
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&op);
        if failing {
            return Err(StoreError::Transport(format!("simulated failure in {op:?}")));
        }
        Ok(())
    }
}

#[async_trait]
impl InventoryStore for InMemoryInventoryStore {
    async fn list_venues(&self) -> StoreResult<Vec<Venue>> {
        self.enter(StoreOp::ListVenues)?;
        Ok(self.read().venues.iter().rev().cloned().collect())
    }

    async fn get_venue(&self, id: VenueId) -> StoreResult<Venue> {
        self.enter(StoreOp::GetVenue)?;
        self.read()
            .venues
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or(StoreError::NoRows)
    }

    async fn find_venue_by_name(&self, name: &str) -> StoreResult<Venue> {
        self.enter(StoreOp::FindVenueByName)?;
        let needle = name.to_lowercase();
        self.read()
            .venues
            .iter()
            .find(|v| v.details.name.to_lowercase() == needle)
            .cloned()
            .ok_or(StoreError::NoRows)
    }

    async fn insert_venue(&self, venue: &NewVenue) -> StoreResult<Venue> {
        self.enter(StoreOp::InsertVenue)?;
        let row = Venue {
            id: VenueId::new(),
            details: venue.details.clone(),
            status: venue.status,
            created_at: Some(Utc::now()),
        };
        self.write().venues.push(row.clone());
        Ok(row)
    }

    async fn update_venue(&self, venue: &Venue) -> StoreResult<Venue> {
        self.enter(StoreOp::UpdateVenue)?;
        let mut state = self.write();
        let row = state
            .venues
            .iter_mut()
            .find(|v| v.id == venue.id)
            .ok_or(StoreError::NoRows)?;
        row.details = venue.details.clone();
        Ok(row.clone())
    }

    async fn set_venue_status(&self, id: VenueId, status: VenueStatus) -> StoreResult<Venue> {
        self.enter(StoreOp::SetVenueStatus)?;
        let mut state = self.write();
        let row = state
            .venues
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or(StoreError::NoRows)?;
        row.status = status;
        Ok(row.clone())
    }

    async fn list_venues_with_items(&self) -> StoreResult<Vec<VenueWithItems>> {
        self.enter(StoreOp::ListVenuesWithItems)?;
        let state = self.read();
        Ok(state
            .venues
            .iter()
            .rev()
            .map(|venue| VenueWithItems {
                venue: venue.clone(),
                items: state
                    .items
                    .iter()
                    .filter(|i| i.venue_id == venue.id)
                    .cloned()
                    .collect(),
            })
            .collect())
    }

    async fn list_items(&self, venue_id: VenueId) -> StoreResult<Vec<Item>> {
        self.enter(StoreOp::ListItems)?;
        Ok(self
            .read()
            .items
            .iter()
            .filter(|i| i.venue_id == venue_id)
            .cloned()
            .collect())
    }

    async fn insert_item(&self, item: &NewItem) -> StoreResult<Vec<Item>> {
        self.enter(StoreOp::InsertItem)?;
        let mut state = self.write();
        if !state.venues.iter().any(|v| v.id == item.venue_id) {
            return Err(StoreError::Constraint(
                "insert or update on table \"items\" violates foreign key constraint \"items_escenario_id_fkey\""
                    .to_string(),
            ));
        }
        state.next_item_id += 1;
        let row = item.clone().into_item(ItemId::new(state.next_item_id));
        state.items.push(row.clone());
        Ok(vec![row])
    }

    async fn delete_item(&self, id: ItemId) -> StoreResult<()> {
        self.enter(StoreOp::DeleteItem)?;
        let mut state = self.write();
        let before = state.items.len();
        state.items.retain(|i| i.id != id);
        if state.items.len() == before {
            return Err(StoreError::NoRows);
        }
        Ok(())
    }

    async fn list_available_names(&self, section: Section) -> StoreResult<Vec<AvailableItemName>> {
        self.enter(StoreOp::ListAvailableNames)?;
        Ok(self
            .read()
            .names
            .iter()
            .filter(|n| n.section == section)
            .cloned()
            .collect())
    }

    async fn find_available_name(
        &self,
        name: &str,
        section: Section,
    ) -> StoreResult<AvailableItemName> {
        self.enter(StoreOp::FindAvailableName)?;
        self.read()
            .names
            .iter()
            .find(|n| n.same_entry(name, section))
            .cloned()
            .ok_or(StoreError::NoRows)
    }

    async fn insert_available_name(
        &self,
        entry: &AvailableItemName,
    ) -> StoreResult<AvailableItemName> {
        self.enter(StoreOp::InsertAvailableName)?;
        self.write().names.push(entry.clone());
        Ok(entry.clone())
    }

    async fn ensure_catalog(&self) -> StoreResult<()> {
        self.enter(StoreOp::EnsureCatalog)?;
        self.write().catalog_ready = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventario_inventory::{Condition, Eligibility, Quantity, VenueDetails};

    fn new_venue(name: &str) -> NewVenue {
        NewVenue::pending(VenueDetails {
            name: name.into(),
            district: "Comuna 3".into(),
            eligibility: Some(Eligibility::No),
            ..VenueDetails::default()
        })
    }

    fn new_item(venue_id: VenueId, name: &str) -> NewItem {
        NewItem {
            venue_id,
            section: Section::Muebles,
            name: name.into(),
            quantity: Quantity::new(2).unwrap(),
            condition: Condition::Regular,
        }
    }

    #[tokio::test]
    async fn venues_are_listed_newest_first() {
        let store = InMemoryInventoryStore::new();
        let a = store.insert_venue(&new_venue("A")).await.unwrap();
        let b = store.insert_venue(&new_venue("B")).await.unwrap();

        let ids: Vec<_> = store.list_venues().await.unwrap().into_iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![b.id, a.id]);
    }

    #[tokio::test]
    async fn name_lookup_ignores_case_and_reports_no_rows() {
        let store = InMemoryInventoryStore::new();
        let created = store.insert_venue(&new_venue("Cancha X")).await.unwrap();

        let found = store.find_venue_by_name("cancha x").await.unwrap();
        assert_eq!(found.id, created.id);

        let missing = store.find_venue_by_name("Cancha Y").await.unwrap_err();
        assert!(missing.is_no_rows());
    }

    #[tokio::test]
    async fn item_insert_requires_existing_venue() {
        let store = InMemoryInventoryStore::new();
        let err = store.insert_item(&new_item(VenueId::new(), "Silla")).await.unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));
    }

    #[tokio::test]
    async fn item_ids_are_assigned_and_delete_reports_missing_rows() {
        let store = InMemoryInventoryStore::new();
        let venue = store.insert_venue(&new_venue("A")).await.unwrap();

        let first = store.insert_item(&new_item(venue.id, "Silla")).await.unwrap();
        let second = store.insert_item(&new_item(venue.id, "Mesa")).await.unwrap();
        assert_ne!(first[0].id, second[0].id);

        store.delete_item(first[0].id).await.unwrap();
        assert!(store.delete_item(first[0].id).await.unwrap_err().is_no_rows());
        assert_eq!(store.list_items(venue.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_keeps_status_and_status_update_keeps_details() {
        let store = InMemoryInventoryStore::new();
        let venue = store.insert_venue(&new_venue("A")).await.unwrap();

        let completed = store
            .set_venue_status(venue.id, VenueStatus::Completed)
            .await
            .unwrap();
        assert_eq!(completed.details, venue.details);

        let mut edited = venue.clone();
        edited.details.name = "A renamed".into();
        let stored = store.update_venue(&edited).await.unwrap();
        assert_eq!(stored.details.name, "A renamed");
        assert_eq!(stored.status, VenueStatus::Completed);
    }

    #[tokio::test]
    async fn seeded_store_serves_reference_names() {
        let store = InMemoryInventoryStore::seeded();
        let names = store.list_available_names(Section::Inmuebles).await.unwrap();
        assert_eq!(names.len(), reference::INMUEBLES.len());
        assert!(store.find_available_name("graderías", Section::Inmuebles).await.is_ok());
        assert!(store
            .find_available_name("Graderías", Section::Muebles)
            .await
            .unwrap_err()
            .is_no_rows());
    }

    #[tokio::test]
    async fn injected_failures_are_counted_and_recoverable() {
        let store = InMemoryInventoryStore::new();
        store.fail_on(StoreOp::ListVenues);
        assert!(matches!(store.list_venues().await, Err(StoreError::Transport(_))));
        store.recover(StoreOp::ListVenues);
        assert!(store.list_venues().await.is_ok());
        assert_eq!(store.calls(StoreOp::ListVenues), 2);
    }
}
