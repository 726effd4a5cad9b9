use thiserror::Error;

use inventario_core::DomainError;
use inventario_infra::{ExportError, StoreError};

/// Coarse category of a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Missing or malformed input; no store call was made.
    Validation,
    NotFound,
    /// The store rejected the write.
    Conflict,
    /// Network, server or decoding failure.
    Store,
}

/// A failed workflow operation and the message shown for it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct WorkflowError {
    pub kind: FailureKind,
    pub message: String,
}

impl WorkflowError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Validation,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::NotFound,
            message: message.into(),
        }
    }

    /// `action` completes "Error al ..." (e.g. "agregar el item").
    pub fn from_store(action: &str, err: &StoreError) -> Self {
        Self::store_failure(err, format!("Error al {action}: {}", user_message(err)))
    }

    /// Categorize `err` but show a fixed page-level message.
    pub fn store_failure(err: &StoreError, message: impl Into<String>) -> Self {
        let kind = match err {
            StoreError::NoRows => FailureKind::NotFound,
            StoreError::Constraint(_) => FailureKind::Conflict,
            _ => FailureKind::Store,
        };
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn from_export(err: &ExportError) -> Self {
        match err {
            ExportError::NotCompleted => Self {
                kind: FailureKind::Conflict,
                message: "El inventario aún no ha sido guardado".to_string(),
            },
            ExportError::UnknownTemplate(name) => {
                Self::validation(format!("Plantilla desconocida: {name}"))
            }
            ExportError::Render(_) => Self {
                kind: FailureKind::Store,
                message: "Error al generar el acta".to_string(),
            },
        }
    }

    pub fn from_domain(err: &DomainError) -> Self {
        Self::validation(format!("Por favor completa el formulario: {}", err.detail()))
    }
}

/// Spanish rendering of a store failure.
pub fn user_message(err: &StoreError) -> String {
    match err {
        StoreError::NoRows => "no se encontró el registro".to_string(),
        StoreError::Constraint(msg) => format!("el almacén rechazó el cambio ({msg})"),
        StoreError::Api { message, .. } if !message.is_empty() => message.clone(),
        StoreError::Api { status, .. } => format!("el servidor respondió {status}"),
        StoreError::Transport(_) => "no se pudo conectar con el servidor".to_string(),
        StoreError::Decode(_) => "respuesta inválida del servidor".to_string(),
    }
}
