//! Location capture for the venue form.
//!
//! The host environment's position API sits behind [`PositionSource`]; the
//! capture control turns a position into a map link, or accepts the value
//! typed by hand.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use inventario_inventory::geo::{self, Coordinates};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    /// Oldest cached position the host may return.
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("permission denied")]
    PermissionDenied,
    #[error("position unavailable")]
    PositionUnavailable,
    #[error("timed out")]
    Timeout,
    #[error("geolocation unsupported")]
    Unsupported,
    #[error("{0}")]
    Other(String),
}

impl PositionError {
    pub fn user_message(&self) -> String {
        match self {
            PositionError::PermissionDenied => {
                "Permiso de ubicación denegado. Habilítalo en el navegador o ingresa la ubicación manualmente."
                    .to_string()
            }
            PositionError::PositionUnavailable => {
                "La información de ubicación no está disponible.".to_string()
            }
            PositionError::Timeout => {
                "Se agotó el tiempo de espera para obtener la ubicación.".to_string()
            }
            PositionError::Unsupported => {
                "La geolocalización no está soportada en este navegador".to_string()
            }
            PositionError::Other(msg) => format!("Error al obtener la ubicación: {msg}"),
        }
    }
}

/// Host capability that reports the current position.
#[async_trait]
pub trait PositionSource: Send + Sync {
    async fn current_position(&self, options: &PositionOptions)
    -> Result<Coordinates, PositionError>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoLocationCapture {
    value: String,
    loading: bool,
    error: Option<String>,
    options: PositionOptions,
}

impl GeoLocationCapture {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            value: initial.into(),
            ..Self::default()
        }
    }

    pub fn with_options(mut self, options: PositionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Ask the host for the current position.
    ///
    /// On success the map link replaces the value and is returned. On failure
    /// the value is kept, an inline message is set, and `None` is returned.
    pub async fn request(&mut self, source: &dyn PositionSource) -> Option<String> {
        self.loading = true;
        self.error = None;

        let outcome = source.current_position(&self.options).await;
        self.loading = false;

        match outcome {
            Ok(coords) => {
                self.value = geo::map_link(coords);
                Some(self.value.clone())
            }
            Err(e) => {
                tracing::warn!(error = %e, "geolocation request failed");
                self.error = Some(e.user_message());
                None
            }
        }
    }

    /// Typed input: coordinates become a map link, anything else is kept.
    pub fn manual_entry(&mut self, text: &str) -> &str {
        self.error = None;
        self.value = geo::normalize_manual_entry(text);
        &self.value
    }
}
