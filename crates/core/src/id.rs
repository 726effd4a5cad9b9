//! Strongly-typed identifiers.
//!
//! Both identifiers are assigned by the remote store; the client never invents
//! them except in the in-memory store used for development and tests.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of a venue ("escenario").
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VenueId(Uuid);

impl VenueId {
    /// Create a new identifier.
    ///
    /// Uses UUIDv7 (time-ordered), so ordering by id follows creation order.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

}

impl Default for VenueId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for VenueId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for VenueId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid =
            Uuid::from_str(s).map_err(|e| DomainError::invalid_id(format!("VenueId: {}", e)))?;
        Ok(Self(uuid))
    }
}

/// Identifier of an inventory item row (store-assigned serial).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(i64);

impl ItemId {
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ItemId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .trim()
            .parse::<i64>()
            .map_err(|e| DomainError::invalid_id(format!("ItemId: {}", e)))?;
        Ok(Self(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn venue_id_round_trips_through_display() {
        let id = VenueId::new();
        let parsed: VenueId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn invalid_ids_are_rejected() {
        assert!(matches!("nope".parse::<VenueId>(), Err(DomainError::InvalidId(_))));
        assert!(matches!("12a".parse::<ItemId>(), Err(DomainError::InvalidId(_))));
    }

    #[test]
    fn item_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&ItemId::new(42)).unwrap();
        assert_eq!(json, "42");
    }
}
