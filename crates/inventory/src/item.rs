use serde::{Deserialize, Serialize};

use inventario_core::{DomainError, DomainResult, ItemId, VenueId};

/// Item category. Closed two-value set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Section {
    /// Immovable assets (fields, stands, lighting...).
    Inmuebles,
    /// Movable assets (goals, benches, balls...).
    Muebles,
}

impl Section {
    pub const ALL: [Section; 2] = [Section::Inmuebles, Section::Muebles];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Inmuebles => "Inmuebles",
            Section::Muebles => "Muebles",
        }
    }
}

impl core::fmt::Display for Section {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Section {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inmuebles" => Ok(Section::Inmuebles),
            "muebles" => Ok(Section::Muebles),
            other => Err(DomainError::validation(format!(
                "sección desconocida: {other}"
            ))),
        }
    }
}

/// Physical condition of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    Bueno,
    Regular,
    Malo,
}

impl Condition {
    pub const ALL: [Condition; 3] = [Condition::Bueno, Condition::Regular, Condition::Malo];

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Bueno => "Bueno",
            Condition::Regular => "Regular",
            Condition::Malo => "Malo",
        }
    }
}

impl core::str::FromStr for Condition {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bueno" => Ok(Condition::Bueno),
            "regular" => Ok(Condition::Regular),
            "malo" => Ok(Condition::Malo),
            other => Err(DomainError::validation(format!("estado desconocido: {other}"))),
        }
    }
}

/// Positive item count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Quantity(u32);

impl Quantity {
    pub fn new(raw: i64) -> DomainResult<Self> {
        if raw < 1 {
            return Err(DomainError::validation(
                "la cantidad debe ser un número entero positivo",
            ));
        }
        u32::try_from(raw)
            .map(Self)
            .map_err(|_| DomainError::validation("la cantidad es demasiado grande"))
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for Quantity {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Quantity::new(value)
    }
}

impl From<Quantity> for i64 {
    fn from(value: Quantity) -> Self {
        i64::from(value.0)
    }
}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// An item row (collection `items`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    #[serde(rename = "escenario_id")]
    pub venue_id: VenueId,
    #[serde(rename = "seccion")]
    pub section: Section,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "cantidad")]
    pub quantity: Quantity,
    /// Rows written before conditions were tracked have none.
    #[serde(rename = "estado", default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
}

/// Insert payload for an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    #[serde(rename = "escenario_id")]
    pub venue_id: VenueId,
    #[serde(rename = "seccion")]
    pub section: Section,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "cantidad")]
    pub quantity: Quantity,
    #[serde(rename = "estado")]
    pub condition: Condition,
}

impl NewItem {
    /// The stored row this payload becomes once the store assigns `id`.
    pub fn into_item(self, id: ItemId) -> Item {
        Item {
            id,
            venue_id: self.venue_id,
            section: self.section,
            name: self.name,
            quantity: self.quantity,
            condition: Some(self.condition),
        }
    }
}

/// Add-item form state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    pub section: Option<Section>,
    pub name: String,
    /// Raw numeric input; checked on submit.
    pub quantity: i64,
    pub condition: Option<Condition>,
    /// Free-text name instead of a picker choice.
    pub custom: bool,
}

impl Default for ItemDraft {
    fn default() -> Self {
        Self {
            section: None,
            name: String::new(),
            quantity: 1,
            condition: None,
            custom: false,
        }
    }
}

impl ItemDraft {
    /// A blank draft that keeps the chosen section.
    pub fn blank_in(section: Section) -> Self {
        Self {
            section: Some(section),
            ..Self::default()
        }
    }

    /// Check all required fields and build the insert payload.
    pub fn validate(&self, venue_id: VenueId) -> DomainResult<NewItem> {
        let section = self
            .section
            .ok_or_else(|| DomainError::validation("seleccione una sección"))?;
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("ingrese el nombre del item"));
        }
        let quantity = Quantity::new(self.quantity)?;
        let condition = self
            .condition
            .ok_or_else(|| DomainError::validation("seleccione el estado del item"))?;

        Ok(NewItem {
            venue_id,
            section,
            name: name.to_string(),
            quantity,
            condition,
        })
    }
}
