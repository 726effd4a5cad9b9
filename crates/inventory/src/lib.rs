//! Venue inventory domain module.
//!
//! This crate contains the data model and the pure rules of the inventory
//! workflow (validation, search filtering, geolocation formatting, static
//! reference lists). No IO, no HTTP, no storage.

pub mod catalog;
pub mod geo;
pub mod item;
pub mod reference;
pub mod search;
pub mod venue;

mod serde_helpers;

pub use catalog::AvailableItemName;
pub use geo::Coordinates;
pub use item::{Condition, Item, ItemDraft, NewItem, Quantity, Section};
pub use search::VenueQuery;
pub use venue::{Eligibility, NewVenue, Venue, VenueDetails, VenueField, VenueStatus, VenueWithItems};
