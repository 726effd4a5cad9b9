use std::sync::Arc;

use inventario_infra::{ActExporter, InventoryStore, PlainTextActExporter};

/// Handles shared by every request.
#[derive(Clone)]
pub struct AppServices {
    pub store: Arc<dyn InventoryStore>,
    pub exporter: Arc<dyn ActExporter>,
}

impl AppServices {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self {
            store,
            exporter: Arc::new(PlainTextActExporter),
        }
    }

    pub fn store(&self) -> &dyn InventoryStore {
        self.store.as_ref()
    }
}
