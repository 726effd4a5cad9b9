use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use inventario_core::{DomainError, DomainResult, VenueId};

use crate::item::Item;
use crate::serde_helpers::null_default;

/// Inventory lifecycle of a venue.
///
/// The only transition is `Pending -> Completed`, triggered by saving the
/// inventory. Nothing in this workspace writes `Pending` to an existing venue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VenueStatus {
    #[default]
    #[serde(rename = "pendiente")]
    Pending,
    #[serde(rename = "completado")]
    Completed,
}

impl VenueStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VenueStatus::Pending => "pendiente",
            VenueStatus::Completed => "completado",
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, VenueStatus::Completed)
    }
}

/// "Susceptible de administración" flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Eligibility {
    #[serde(rename = "Si", alias = "Sí")]
    Yes,
    #[serde(rename = "No")]
    No,
}

impl Eligibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Eligibility::Yes => "Si",
            Eligibility::No => "No",
        }
    }

    /// Lenient parse used for stored rows and form input.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "si" | "sí" | "yes" | "true" => Some(Eligibility::Yes),
            "no" | "false" => Some(Eligibility::No),
            _ => None,
        }
    }
}

fn lenient_eligibility<'de, D>(deserializer: D) -> Result<Option<Eligibility>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Eligibility::parse))
}

/// Editable text fields of a venue, addressable by the forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VenueField {
    Name,
    District,
    Neighborhood,
    Address,
    AdministeringEntity,
    Administrator,
    Phone,
    Email,
    Geolocation,
}

impl VenueField {
    pub const ALL: [VenueField; 9] = [
        VenueField::Name,
        VenueField::District,
        VenueField::Neighborhood,
        VenueField::Address,
        VenueField::AdministeringEntity,
        VenueField::Administrator,
        VenueField::Phone,
        VenueField::Email,
        VenueField::Geolocation,
    ];

    /// Label shown next to the input.
    pub fn label(&self) -> &'static str {
        match self {
            VenueField::Name => "Nombre del Escenario",
            VenueField::District => "Comuna",
            VenueField::Neighborhood => "Barrio",
            VenueField::Address => "Dirección",
            VenueField::AdministeringEntity => "Entidad administra",
            VenueField::Administrator => "Administrador",
            VenueField::Phone => "Celular",
            VenueField::Email => "Email",
            VenueField::Geolocation => "Georeferenciación",
        }
    }
}

/// Venue attributes, without identity or lifecycle.
///
/// This is both the creation-form draft and the metadata-editor draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueDetails {
    #[serde(rename = "nombre", default, deserialize_with = "null_default")]
    pub name: String,
    #[serde(rename = "comuna", default, deserialize_with = "null_default")]
    pub district: String,
    #[serde(rename = "barrio", default, deserialize_with = "null_default")]
    pub neighborhood: String,
    #[serde(rename = "direccion", default, deserialize_with = "null_default")]
    pub address: String,
    #[serde(rename = "entidad_administra", default, deserialize_with = "null_default")]
    pub administering_entity: String,
    #[serde(rename = "administrador", default, deserialize_with = "null_default")]
    pub administrator: String,
    #[serde(rename = "celular", default, deserialize_with = "null_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_default")]
    pub email: String,
    #[serde(rename = "georeferenciacion", default, deserialize_with = "null_default")]
    pub geolocation: String,
    #[serde(
        rename = "susceptible_administracion",
        default,
        deserialize_with = "lenient_eligibility"
    )]
    pub eligibility: Option<Eligibility>,
}

impl VenueDetails {
    pub fn get(&self, field: VenueField) -> &str {
        match field {
            VenueField::Name => &self.name,
            VenueField::District => &self.district,
            VenueField::Neighborhood => &self.neighborhood,
            VenueField::Address => &self.address,
            VenueField::AdministeringEntity => &self.administering_entity,
            VenueField::Administrator => &self.administrator,
            VenueField::Phone => &self.phone,
            VenueField::Email => &self.email,
            VenueField::Geolocation => &self.geolocation,
        }
    }

    pub fn set(&mut self, field: VenueField, value: impl Into<String>) {
        let slot = match field {
            VenueField::Name => &mut self.name,
            VenueField::District => &mut self.district,
            VenueField::Neighborhood => &mut self.neighborhood,
            VenueField::Address => &mut self.address,
            VenueField::AdministeringEntity => &mut self.administering_entity,
            VenueField::Administrator => &mut self.administrator,
            VenueField::Phone => &mut self.phone,
            VenueField::Email => &mut self.email,
            VenueField::Geolocation => &mut self.geolocation,
        };
        *slot = value.into();
    }

    /// Check every field is filled in and return a trimmed copy.
    ///
    /// Fails on the first missing field in form order.
    pub fn validated(&self) -> DomainResult<VenueDetails> {
        let mut out = VenueDetails::default();
        for field in VenueField::ALL {
            let value = self.get(field).trim();
            if value.is_empty() {
                return Err(DomainError::validation(format!(
                    "el campo \"{}\" es obligatorio",
                    field.label()
                )));
            }
            out.set(field, value);
        }
        out.eligibility = Some(self.eligibility.ok_or_else(|| {
            DomainError::validation("indique si el escenario es susceptible de administración")
        })?);
        Ok(out)
    }
}

/// A venue row as stored remotely (collection `escenarios`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    pub id: VenueId,
    #[serde(flatten)]
    pub details: VenueDetails,
    #[serde(rename = "estado", default, deserialize_with = "null_default")]
    pub status: VenueStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Insert payload for a venue. Always starts `pendiente`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVenue {
    #[serde(flatten)]
    pub details: VenueDetails,
    #[serde(rename = "estado")]
    pub status: VenueStatus,
}

impl NewVenue {
    pub fn pending(details: VenueDetails) -> Self {
        Self {
            details,
            status: VenueStatus::Pending,
        }
    }
}

/// A venue together with its items (embedded select).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueWithItems {
    #[serde(flatten)]
    pub venue: Venue,
    #[serde(default, deserialize_with = "null_default")]
    pub items: Vec<Item>,
}
