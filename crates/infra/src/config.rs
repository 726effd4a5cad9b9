//! Configuration loading and representation.
//!
//! Everything comes from environment variables; the binary may load a `.env`
//! file first. Lookups go through a closure so tests never touch the process
//! environment.

use std::net::SocketAddr;

use reqwest::Url;
use thiserror::Error;

pub const STORE_URL_VAR: &str = "SUPABASE_URL";
pub const STORE_KEY_VAR: &str = "SUPABASE_ANON_KEY";
pub const BIND_ADDR_VAR: &str = "INVENTARIO_BIND_ADDR";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Endpoint and access key of the hosted store.
#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    base_url: Url,
    api_key: String,
}

impl core::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl StoreConfig {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let mut raw = base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url = Url::parse(&raw)
            .map_err(|e| ConfigError::Invalid(format!("{STORE_URL_VAR}: {e}")))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "{STORE_URL_VAR}: unsupported scheme {}",
                base_url.scheme()
            )));
        }

        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(ConfigError::Invalid(format!("{STORE_KEY_VAR} is empty")));
        }

        Ok(Self { base_url, api_key })
    }

    /// `Ok(None)` when either variable is unset.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Option<Self>, ConfigError> {
        match (lookup(STORE_URL_VAR), lookup(STORE_KEY_VAR)) {
            (Some(url), Some(key)) => Self::new(&url, key).map(Some),
            _ => Ok(None),
        }
    }

    /// Always ends with `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

/// HTTP surface settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw = lookup(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw
            .trim()
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("{BIND_ADDR_VAR}={raw}: {e}")))?;
        Ok(Self { bind_addr })
    }
}
