//! Inventory act export.
//!
//! The document generator is an external capability; this module defines the
//! seam and ships a plain-text renderer used by default.

use std::fmt::Write as _;

use serde::Serialize;
use thiserror::Error;

use inventario_inventory::{Item, Section, Venue};

pub const DEFAULT_TEMPLATE: &str = "acta-inventario";

/// Name of the template the act is rendered with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TemplateRef(String);

impl TemplateRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TemplateRef {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExportError {
    #[error("the inventory of this venue has not been completed")]
    NotCompleted,

    #[error("unknown template: {0}")]
    UnknownTemplate(String),

    #[error("failed to render document: {0}")]
    Render(String),
}

pub trait ActExporter: Send + Sync {
    fn export(
        &self,
        venue: &Venue,
        items: &[Item],
        template: &TemplateRef,
    ) -> Result<ExportedDocument, ExportError>;
}

/// Renders the act as UTF-8 text, one block per section.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextActExporter;

impl ActExporter for PlainTextActExporter {
    fn export(
        &self,
        venue: &Venue,
        items: &[Item],
        template: &TemplateRef,
    ) -> Result<ExportedDocument, ExportError> {
        if template.as_str() != DEFAULT_TEMPLATE {
            return Err(ExportError::UnknownTemplate(template.as_str().to_string()));
        }
        if !venue.status.is_completed() {
            return Err(ExportError::NotCompleted);
        }

        let text = render(venue, items).map_err(|e| ExportError::Render(e.to_string()))?;
        Ok(ExportedDocument {
            file_name: format!("{}-{}.txt", DEFAULT_TEMPLATE, slug(&venue.details.name)),
            content_type: "text/plain; charset=utf-8",
            bytes: text.into_bytes(),
        })
    }
}

fn render(venue: &Venue, items: &[Item]) -> Result<String, std::fmt::Error> {
    let d = &venue.details;
    let mut out = String::new();

    writeln!(out, "ACTA DE INVENTARIO")?;
    writeln!(out, "Escenario: {}", d.name)?;
    writeln!(out, "Comuna: {}", d.district)?;
    writeln!(out, "Barrio: {}", d.neighborhood)?;
    writeln!(out, "Dirección: {}", d.address)?;
    writeln!(out, "Entidad administra: {}", d.administering_entity)?;
    writeln!(out, "Administrador: {}", d.administrator)?;
    writeln!(out, "Celular: {}", d.phone)?;
    writeln!(out, "Email: {}", d.email)?;
    writeln!(out, "Georeferenciación: {}", d.geolocation)?;
    writeln!(
        out,
        "Susceptible de administración: {}",
        d.eligibility.map(|e| e.as_str()).unwrap_or("-")
    )?;
    writeln!(out, "Estado: {}", venue.status.as_str())?;

    for section in Section::ALL {
        writeln!(out)?;
        writeln!(out, "{}", section.as_str().to_uppercase())?;
        let mut any = false;
        for item in items.iter().filter(|i| i.section == section) {
            any = true;
            match item.condition {
                Some(c) => writeln!(out, "- {}: {} ({})", item.name, item.quantity, c.as_str())?,
                None => writeln!(out, "- {}: {}", item.name, item.quantity)?,
            }
        }
        if !any {
            writeln!(out, "(sin items)")?;
        }
    }

    Ok(out)
}

fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.trim().chars() {
        if ch.is_alphanumeric() {
            out.extend(ch.to_lowercase());
        } else if !out.ends_with('-') && !out.is_empty() {
            out.push('-');
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    if out.is_empty() {
        out.push_str("escenario");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventario_core::{ItemId, VenueId};
    use inventario_inventory::{Condition, Quantity, VenueDetails, VenueStatus};

    fn venue(status: VenueStatus) -> Venue {
        Venue {
            id: VenueId::new(),
            details: VenueDetails {
                name: "Cancha La Base #2".into(),
                ..VenueDetails::default()
            },
            status,
            created_at: None,
        }
    }

    fn item(venue_id: VenueId, section: Section, name: &str, condition: Option<Condition>) -> Item {
        Item {
            id: ItemId::new(1),
            venue_id,
            section,
            name: name.into(),
            quantity: Quantity::new(3).unwrap(),
            condition,
        }
    }

    #[test]
    fn completed_venue_renders_both_sections() {
        let v = venue(VenueStatus::Completed);
        let items = vec![
            item(v.id, Section::Muebles, "Bancas", Some(Condition::Malo)),
            item(v.id, Section::Muebles, "Balones", None),
        ];
        let doc = PlainTextActExporter
            .export(&v, &items, &TemplateRef::default())
            .unwrap();
        let text = String::from_utf8(doc.bytes).unwrap();

        assert_eq!(doc.file_name, "acta-inventario-cancha-la-base-2.txt");
        assert!(text.contains("Escenario: Cancha La Base #2"));
        assert!(text.contains("INMUEBLES\n(sin items)"));
        assert!(text.contains("- Bancas: 3 (Malo)"));
        assert!(text.contains("- Balones: 3\n"));
    }

    #[test]
    fn pending_venue_is_refused() {
        let err = PlainTextActExporter
            .export(&venue(VenueStatus::Pending), &[], &TemplateRef::default())
            .unwrap_err();
        assert_eq!(err, ExportError::NotCompleted);
    }

    #[test]
    fn unknown_template_is_refused() {
        let err = PlainTextActExporter
            .export(&venue(VenueStatus::Completed), &[], &TemplateRef::new("otro"))
            .unwrap_err();
        assert!(matches!(err, ExportError::UnknownTemplate(_)));
    }
}
