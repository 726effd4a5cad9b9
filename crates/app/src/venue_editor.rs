//! Venue detail page: metadata editor and inventory editor.
//!
//! Inventory editing and metadata editing are independent toggles. Every
//! async operation settles into `error` on failure and leaves the rest of the
//! local state as it was before the call.

use serde::Serialize;

use inventario_core::{ItemId, VenueId};
use inventario_infra::{
    ActExporter, ExportedDocument, InventoryStore, StoreError, TemplateRef, optional,
};
use inventario_inventory::{
    AvailableItemName, Condition, Item, ItemDraft, NewItem, Section, Venue, VenueDetails,
    VenueStatus,
};

use crate::errors::WorkflowError;

const SAVED_MESSAGE: &str = "Inventario guardado exitosamente";
const LOAD_ITEMS: &str = "cargar los items";

/// Confirmation raised after the inventory is saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportOffer {
    pub venue_id: VenueId,
    pub template: TemplateRef,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionItems {
    pub section: Section,
    pub items: Vec<Item>,
}

/// Render-ready view of the editor.
#[derive(Debug, Clone, Serialize)]
pub struct EditorSnapshot {
    pub venue: Venue,
    pub sections: Vec<SectionItems>,
    pub editing_inventory: bool,
    pub editing_metadata: bool,
    /// False when the item fetch failed and `sections` are empty placeholders.
    pub items_loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_offer: Option<ExportOffer>,
}

#[derive(Debug, Clone)]
pub struct VenueEditor {
    venue: Venue,
    items: Vec<Item>,
    /// Set when `open` could not fetch the items.
    items_failure: Option<StoreError>,
    editing_inventory: bool,
    /// Present while metadata editing is on.
    metadata_draft: Option<VenueDetails>,
    draft: ItemDraft,
    available_names: Vec<String>,
    saving: bool,
    error: Option<String>,
    export_offer: Option<ExportOffer>,
}

impl VenueEditor {
    /// Load the venue and its items.
    ///
    /// A missing venue is an error; a failed item fetch is logged and the
    /// page opens with an empty list. `items_loaded` reports false and
    /// `export` refuses until the editor is reopened.
    pub async fn open(store: &dyn InventoryStore, id: VenueId) -> Result<Self, WorkflowError> {
        let venue = load_venue(store, id).await?;
        match store.list_items(id).await {
            Ok(items) => Ok(Self::from_parts(venue, items)),
            Err(e) => {
                tracing::warn!(venue_id = %id, error = %e, "failed to load items");
                let mut editor = Self::from_parts(venue, Vec::new());
                editor.items_failure = Some(e);
                Ok(editor)
            }
        }
    }

    /// Like `open`, but a failed item fetch is an error.
    pub async fn open_with_items(
        store: &dyn InventoryStore,
        id: VenueId,
    ) -> Result<Self, WorkflowError> {
        let venue = load_venue(store, id).await?;
        let items = store
            .list_items(id)
            .await
            .map_err(|e| WorkflowError::from_store(LOAD_ITEMS, &e))?;
        Ok(Self::from_parts(venue, items))
    }

    pub fn from_parts(venue: Venue, items: Vec<Item>) -> Self {
        Self {
            venue,
            items,
            items_failure: None,
            editing_inventory: false,
            metadata_draft: None,
            draft: ItemDraft::default(),
            available_names: Vec::new(),
            saving: false,
            error: None,
            export_offer: None,
        }
    }

    pub fn venue(&self) -> &Venue {
        &self.venue
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn items_loaded(&self) -> bool {
        self.items_failure.is_none()
    }

    pub fn items_in(&self, section: Section) -> impl Iterator<Item = &Item> + '_ {
        self.items.iter().filter(move |item| item.section == section)
    }

    pub fn draft(&self) -> &ItemDraft {
        &self.draft
    }

    pub fn available_names(&self) -> &[String] {
        &self.available_names
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn is_editing_inventory(&self) -> bool {
        self.editing_inventory
    }

    pub fn is_editing_metadata(&self) -> bool {
        self.metadata_draft.is_some()
    }

    pub fn export_offer(&self) -> Option<&ExportOffer> {
        self.export_offer.as_ref()
    }

    pub fn dismiss_export_offer(&mut self) {
        self.export_offer = None;
    }

    pub fn toggle_inventory_editing(&mut self) {
        self.editing_inventory = !self.editing_inventory;
    }

    /// Entering copies the current venue into the draft; leaving discards it.
    pub fn toggle_metadata_editing(&mut self) {
        self.metadata_draft = match self.metadata_draft {
            Some(_) => None,
            None => Some(self.venue.details.clone()),
        };
    }

    pub fn metadata_draft(&self) -> Option<&VenueDetails> {
        self.metadata_draft.as_ref()
    }

    pub fn metadata_draft_mut(&mut self) -> Option<&mut VenueDetails> {
        self.metadata_draft.as_mut()
    }

    /// Replace the whole metadata draft, turning metadata editing on.
    pub fn edit_metadata(&mut self, details: VenueDetails) {
        self.metadata_draft = Some(details);
    }

    /// Overwrite the venue with the draft and adopt the row the store returns.
    pub async fn save_metadata(&mut self, store: &dyn InventoryStore) -> Result<(), WorkflowError> {
        self.error = None;
        let mut candidate = self.venue.clone();
        if let Some(draft) = &self.metadata_draft {
            candidate.details = draft.clone();
        }

        self.saving = true;
        let result = store.update_venue(&candidate).await;
        self.saving = false;

        match result {
            Ok(saved) => {
                tracing::info!(venue_id = %saved.id, "venue metadata saved");
                self.venue = saved;
                self.metadata_draft = None;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(venue_id = %self.venue.id, error = %e, "venue update failed");
                self.settle(Err(WorkflowError::from_store("guardar el escenario", &e)))
            }
        }
    }

    /// Start a blank draft in `section` and load its known item names.
    pub async fn select_section(&mut self, store: &dyn InventoryStore, section: Section) {
        self.draft = ItemDraft::blank_in(section);
        self.available_names.clear();

        match store.list_available_names(section).await {
            Ok(entries) => {
                for entry in entries {
                    self.remember_name(&entry.name);
                }
            }
            Err(e) => {
                tracing::warn!(section = %section, error = %e, "failed to load available item names");
            }
        }
    }

    /// Switch between the picker and a free-text name. Clears the name.
    pub fn set_custom(&mut self, custom: bool) {
        self.draft.custom = custom;
        self.draft.name.clear();
    }

    pub fn set_item_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_quantity(&mut self, quantity: i64) {
        self.draft.quantity = quantity;
    }

    pub fn set_condition(&mut self, condition: Condition) {
        self.draft.condition = Some(condition);
    }

    /// Replace the add-item form in one step.
    pub fn set_draft(&mut self, draft: ItemDraft) {
        self.draft = draft;
    }

    /// Validate the draft and store it as a new item.
    ///
    /// Custom names are registered in the available-names collection first,
    /// unless an entry with the same name and section already exists.
    pub async fn add_item(&mut self, store: &dyn InventoryStore) -> Result<Vec<Item>, WorkflowError> {
        self.error = None;
        let item = match self.draft.validate(self.venue.id) {
            Ok(item) => item,
            Err(e) => return self.settle(Err(WorkflowError::from_domain(&e))),
        };

        self.saving = true;
        let result = persist_item(store, &item, self.draft.custom).await;
        self.saving = false;

        let rows = self.settle(result)?;
        tracing::info!(venue_id = %self.venue.id, count = rows.len(), "item added");
        self.items.extend(rows.iter().cloned());
        self.remember_name(&item.name);
        self.draft = ItemDraft::blank_in(item.section);
        Ok(rows)
    }

    /// Delete one item. The list is untouched unless the store confirms.
    pub async fn remove_item(
        &mut self,
        store: &dyn InventoryStore,
        id: ItemId,
    ) -> Result<(), WorkflowError> {
        self.error = None;
        match store.delete_item(id).await {
            Ok(()) => {
                tracing::info!(venue_id = %self.venue.id, item_id = %id, "item removed");
                self.items.retain(|item| item.id != id);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(item_id = %id, error = %e, "item delete failed");
                self.settle(Err(WorkflowError::from_store("eliminar el item", &e)))
            }
        }
    }

    /// Mark the inventory completed and offer the act export.
    pub async fn save_inventory(
        &mut self,
        store: &dyn InventoryStore,
    ) -> Result<ExportOffer, WorkflowError> {
        self.error = None;
        self.saving = true;
        let result = store
            .set_venue_status(self.venue.id, VenueStatus::Completed)
            .await;
        self.saving = false;

        match result {
            Ok(saved) => {
                tracing::info!(venue_id = %saved.id, "inventory completed");
                let offer = ExportOffer {
                    venue_id: saved.id,
                    template: TemplateRef::default(),
                    message: SAVED_MESSAGE.to_string(),
                };
                self.venue = saved;
                self.editing_inventory = false;
                self.export_offer = Some(offer.clone());
                Ok(offer)
            }
            Err(e) => {
                tracing::warn!(venue_id = %self.venue.id, error = %e, "inventory save failed");
                self.settle(Err(WorkflowError::from_store("guardar el inventario", &e)))
            }
        }
    }

    /// Render the act for the current venue and items.
    ///
    /// Consumes the pending export offer (its template, or the default one).
    /// On failure the offer is put back. Refused when the items never loaded.
    pub fn export(&mut self, exporter: &dyn ActExporter) -> Result<ExportedDocument, WorkflowError> {
        self.error = None;
        if let Some(e) = &self.items_failure {
            let err = WorkflowError::from_store(LOAD_ITEMS, e);
            return self.settle(Err(err));
        }
        let offer = self.export_offer.take();
        let template = offer
            .as_ref()
            .map(|o| o.template.clone())
            .unwrap_or_default();

        match exporter.export(&self.venue, &self.items, &template) {
            Ok(doc) => {
                tracing::info!(venue_id = %self.venue.id, file = %doc.file_name, "act exported");
                Ok(doc)
            }
            Err(e) => {
                tracing::warn!(venue_id = %self.venue.id, error = %e, "act export failed");
                self.export_offer = offer;
                self.settle(Err(WorkflowError::from_export(&e)))
            }
        }
    }

    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            venue: self.venue.clone(),
            sections: Section::ALL
                .into_iter()
                .map(|section| SectionItems {
                    section,
                    items: self.items_in(section).cloned().collect(),
                })
                .collect(),
            editing_inventory: self.editing_inventory,
            editing_metadata: self.is_editing_metadata(),
            items_loaded: self.items_loaded(),
            export_offer: self.export_offer.clone(),
        }
    }

    fn remember_name(&mut self, name: &str) {
        let known = self
            .available_names
            .iter()
            .any(|n| n.to_lowercase() == name.to_lowercase());
        if !known {
            self.available_names.push(name.to_string());
        }
    }

    fn settle<T>(&mut self, result: Result<T, WorkflowError>) -> Result<T, WorkflowError> {
        if let Err(e) = &result {
            self.error = Some(e.message.clone());
        }
        result
    }
}

async fn load_venue(store: &dyn InventoryStore, id: VenueId) -> Result<Venue, WorkflowError> {
    match store.get_venue(id).await {
        Ok(venue) => Ok(venue),
        Err(StoreError::NoRows) => Err(WorkflowError::not_found("Escenario no encontrado")),
        Err(e) => Err(WorkflowError::from_store("cargar el escenario", &e)),
    }
}

async fn persist_item(
    store: &dyn InventoryStore,
    item: &NewItem,
    custom: bool,
) -> Result<Vec<Item>, WorkflowError> {
    if custom {
        let existing = optional(store.find_available_name(&item.name, item.section).await)
            .map_err(|e| WorkflowError::from_store("verificar el item", &e))?;
        if existing.is_none() {
            store
                .insert_available_name(&AvailableItemName::new(&item.name, item.section))
                .await
                .map_err(|e| WorkflowError::from_store("registrar el item", &e))?;
            tracing::debug!(name = %item.name, section = %item.section, "custom item name registered");
        }
    }

    store
        .insert_item(item)
        .await
        .map_err(|e| WorkflowError::from_store("agregar el item", &e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn venue() -> Venue {
        Venue {
            id: VenueId::new(),
            details: VenueDetails {
                name: "Cancha X".into(),
                ..VenueDetails::default()
            },
            status: VenueStatus::Pending,
            created_at: None,
        }
    }

    fn item(venue_id: VenueId, id: i64, section: Section) -> Item {
        NewItem {
            venue_id,
            section,
            name: format!("item {id}"),
            quantity: inventario_inventory::Quantity::new(1).unwrap(),
            condition: Condition::Bueno,
        }
        .into_item(ItemId::new(id))
    }

    #[test]
    fn toggles_are_independent() {
        let mut editor = VenueEditor::from_parts(venue(), Vec::new());
        editor.toggle_inventory_editing();
        editor.toggle_metadata_editing();
        assert!(editor.is_editing_inventory());
        assert!(editor.is_editing_metadata());

        editor.toggle_inventory_editing();
        assert!(!editor.is_editing_inventory());
        assert!(editor.is_editing_metadata());
    }

    #[test]
    fn cancelling_metadata_edit_discards_draft() {
        let mut editor = VenueEditor::from_parts(venue(), Vec::new());
        editor.toggle_metadata_editing();
        editor.metadata_draft_mut().unwrap().name = "Otro".into();
        editor.toggle_metadata_editing();
        editor.toggle_metadata_editing();
        assert_eq!(editor.metadata_draft().unwrap().name, "Cancha X");
    }

    #[test]
    fn custom_toggle_clears_name() {
        let mut editor = VenueEditor::from_parts(venue(), Vec::new());
        editor.set_item_name("Silla");
        editor.set_custom(true);
        assert_eq!(editor.draft().name, "");
        assert!(editor.draft().custom);
    }

    #[test]
    fn snapshot_groups_items_by_section() {
        let v = venue();
        let items = vec![
            item(v.id, 1, Section::Muebles),
            item(v.id, 2, Section::Inmuebles),
            item(v.id, 3, Section::Muebles),
        ];
        let editor = VenueEditor::from_parts(v, items);
        let snap = editor.snapshot();

        assert_eq!(snap.sections[0].section, Section::Inmuebles);
        assert_eq!(snap.sections[0].items.len(), 1);
        assert_eq!(snap.sections[1].items.len(), 2);
        assert!(snap.export_offer.is_none());
    }
}
