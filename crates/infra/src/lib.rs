//! Infrastructure layer: remote store client, config, external services.

pub mod config;
pub mod export;
pub mod store;

pub use config::{ApiConfig, ConfigError, StoreConfig};
pub use export::{ActExporter, ExportError, ExportedDocument, PlainTextActExporter, TemplateRef};
pub use store::{
    InMemoryInventoryStore, InventoryStore, PostgrestStore, StoreError, StoreOp, StoreResult,
    optional,
};
