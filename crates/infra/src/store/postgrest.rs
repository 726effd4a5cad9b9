//! PostgREST-backed store (hosted relational datastore REST interface).
//!
//! Each method issues exactly one HTTP request against
//! `{base_url}/rest/v1/{collection}`. Writes ask for the affected rows back
//! (`Prefer: return=representation`) so callers always see the stored state.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use inventario_core::{ItemId, VenueId};
use inventario_inventory::{
    AvailableItemName, Item, NewItem, NewVenue, Section, Venue, VenueStatus, VenueWithItems,
};

use crate::config::{ConfigError, StoreConfig};

use super::{InventoryStore, StoreError, StoreResult};

const VENUES: &str = "escenarios";
const ITEMS: &str = "items";
const AVAILABLE_NAMES: &str = "items_disponibles";
const ENSURE_CATALOG_RPC: &str = "create_items_disponibles_if_not_exists";

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
const RETURN_REPRESENTATION: &str = "return=representation";

/// PostgREST reports "zero (or many) rows for a single-object request" with this code.
const NO_ROWS_CODE: &str = "PGRST116";

#[derive(Debug, Deserialize)]
struct PostgrestErrorBody {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PostgrestStore {
    http: Client,
    rest_url: Url,
}

impl PostgrestStore {
    pub fn new(config: &StoreConfig) -> Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(config.api_key())
            .map_err(|_| ConfigError::Invalid("store key is not a valid header value".into()))?;
        key.set_sensitive(true);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key()))
            .map_err(|_| ConfigError::Invalid("store key is not a valid header value".into()))?;
        bearer.set_sensitive(true);
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ConfigError::Invalid(format!("failed to build http client: {e}")))?;

        let rest_url = config
            .base_url()
            .join("rest/v1/")
            .map_err(|e| ConfigError::Invalid(format!("invalid store url: {e}")))?;

        Ok(Self { http, rest_url })
    }

    fn url(&self, path: &str) -> StoreResult<Url> {
        self.rest_url
            .join(path)
            .map_err(|e| StoreError::Transport(format!("invalid request url: {e}")))
    }

    async fn fetch<T: DeserializeOwned>(&self, op: &'static str, req: RequestBuilder) -> StoreResult<T> {
        tracing::debug!(op, "store request");
        let resp = req
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        decode(op, resp).await
    }

    /// Single-row write: an empty representation means nothing matched.
    async fn fetch_one<T: DeserializeOwned>(&self, op: &'static str, req: RequestBuilder) -> StoreResult<T> {
        let rows: Vec<T> = self.fetch(op, req).await?;
        rows.into_iter().next().ok_or(StoreError::NoRows)
    }
}

async fn decode<T: DeserializeOwned>(op: &'static str, resp: Response) -> StoreResult<T> {
    let status = resp.status();
    let body = resp
        .bytes()
        .await
        .map_err(|e| StoreError::Transport(e.to_string()))?;

    if !status.is_success() {
        let err = error_from_body(status, &body);
        if !err.is_no_rows() {
            tracing::warn!(op, %status, error = %err, "store request failed");
        }
        return Err(err);
    }

    serde_json::from_slice(&body).map_err(|e| StoreError::Decode(format!("{op}: {e}")))
}

fn error_from_body(status: StatusCode, body: &[u8]) -> StoreError {
    let parsed: Option<PostgrestErrorBody> = serde_json::from_slice(body).ok();
    let Some(parsed) = parsed else {
        return StoreError::Api {
            status: status.as_u16(),
            code: String::new(),
            message: String::from_utf8_lossy(body).into_owned(),
        };
    };

    let code = parsed.code.unwrap_or_default();
    let mut message = parsed.message.unwrap_or_default();
    if let Some(details) = parsed.details.filter(|d| !d.is_empty()) {
        message = format!("{message} ({details})");
    }
    if let Some(hint) = parsed.hint.filter(|h| !h.is_empty()) {
        message = format!("{message}; {hint}");
    }

    if code == NO_ROWS_CODE {
        StoreError::NoRows
    } else if code.starts_with("23") {
        // Postgres class 23: integrity constraint violation.
        StoreError::Constraint(message)
    } else {
        StoreError::Api {
            status: status.as_u16(),
            code,
            message,
        }
    }
}

/// `eq.` filter value.
fn eq(value: impl core::fmt::Display) -> String {
    format!("eq.{value}")
}

/// Case-insensitive exact match on a text column.
///
/// `ilike` with its pattern characters escaped. PostgREST rewrites `*` to `%`
/// inside `ilike` values, so values containing `*` use an anchored `imatch`
/// with every ASCII punctuation character escaped instead.
fn exact_name_filter(value: &str) -> String {
    if value.contains('*') {
        let mut escaped = String::with_capacity(value.len() * 2);
        for ch in value.chars() {
            if ch.is_ascii_punctuation() {
                escaped.push('\\');
            }
            escaped.push(ch);
        }
        return format!("imatch.^{escaped}$");
    }

    let mut escaped = String::with_capacity(value.len() + 6);
    for ch in value.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    format!("ilike.{escaped}")
}

#[async_trait]
impl InventoryStore for PostgrestStore {
    async fn list_venues(&self) -> StoreResult<Vec<Venue>> {
        let req = self
            .http
            .get(self.url(VENUES)?)
            .query(&[("select", "*"), ("order", "id.desc")]);
        self.fetch("list_venues", req).await
    }

    async fn get_venue(&self, id: VenueId) -> StoreResult<Venue> {
        let req = self
            .http
            .get(self.url(VENUES)?)
            .header(ACCEPT, SINGLE_OBJECT)
            .query(&[("select", "*".to_string()), ("id", eq(id))]);
        self.fetch("get_venue", req).await
    }

    async fn find_venue_by_name(&self, name: &str) -> StoreResult<Venue> {
        // `limit=1` rather than a single-object request: duplicate names that
        // already exist must still resolve to a venue.
        let req = self.http.get(self.url(VENUES)?).query(&[
            ("select", "*".to_string()),
            ("nombre", exact_name_filter(name)),
            ("limit", "1".to_string()),
        ]);
        self.fetch_one("find_venue_by_name", req).await
    }

    async fn insert_venue(&self, venue: &NewVenue) -> StoreResult<Venue> {
        let req = self
            .http
            .post(self.url(VENUES)?)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&[venue]);
        self.fetch_one("insert_venue", req).await.map_err(|e| match e {
            StoreError::NoRows => StoreError::Decode("insert returned no rows".into()),
            other => other,
        })
    }

    async fn update_venue(&self, venue: &Venue) -> StoreResult<Venue> {
        let req = self
            .http
            .patch(self.url(VENUES)?)
            .header("Prefer", RETURN_REPRESENTATION)
            .query(&[("id", eq(venue.id))])
            .json(&venue.details);
        self.fetch_one("update_venue", req).await
    }

    async fn set_venue_status(&self, id: VenueId, status: VenueStatus) -> StoreResult<Venue> {
        let req = self
            .http
            .patch(self.url(VENUES)?)
            .header("Prefer", RETURN_REPRESENTATION)
            .query(&[("id", eq(id))])
            .json(&serde_json::json!({ "estado": status }));
        self.fetch_one("set_venue_status", req).await
    }

    async fn list_venues_with_items(&self) -> StoreResult<Vec<VenueWithItems>> {
        let req = self
            .http
            .get(self.url(VENUES)?)
            .query(&[("select", "*,items(*)"), ("order", "id.desc")]);
        self.fetch("list_venues_with_items", req).await
    }

    async fn list_items(&self, venue_id: VenueId) -> StoreResult<Vec<Item>> {
        let req = self.http.get(self.url(ITEMS)?).query(&[
            ("select", "*".to_string()),
            ("escenario_id", eq(venue_id)),
            ("order", "id.asc".to_string()),
        ]);
        self.fetch("list_items", req).await
    }

    async fn insert_item(&self, item: &NewItem) -> StoreResult<Vec<Item>> {
        let req = self
            .http
            .post(self.url(ITEMS)?)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&[item]);
        self.fetch("insert_item", req).await
    }

    async fn delete_item(&self, id: ItemId) -> StoreResult<()> {
        let req = self
            .http
            .delete(self.url(ITEMS)?)
            .header("Prefer", RETURN_REPRESENTATION)
            .query(&[("id", eq(id))]);
        let _: Item = self.fetch_one("delete_item", req).await?;
        Ok(())
    }

    async fn list_available_names(&self, section: Section) -> StoreResult<Vec<AvailableItemName>> {
        let req = self.http.get(self.url(AVAILABLE_NAMES)?).query(&[
            ("select", "nombre,seccion".to_string()),
            ("seccion", eq(section)),
            ("order", "nombre.asc".to_string()),
        ]);
        self.fetch("list_available_names", req).await
    }

    async fn find_available_name(
        &self,
        name: &str,
        section: Section,
    ) -> StoreResult<AvailableItemName> {
        let req = self.http.get(self.url(AVAILABLE_NAMES)?).query(&[
            ("select", "nombre,seccion".to_string()),
            ("nombre", exact_name_filter(name.trim())),
            ("seccion", eq(section)),
            ("limit", "1".to_string()),
        ]);
        self.fetch_one("find_available_name", req).await
    }

    async fn insert_available_name(
        &self,
        entry: &AvailableItemName,
    ) -> StoreResult<AvailableItemName> {
        let req = self
            .http
            .post(self.url(AVAILABLE_NAMES)?)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&[entry]);
        self.fetch_one("insert_available_name", req).await.map_err(|e| match e {
            StoreError::NoRows => StoreError::Decode("insert returned no rows".into()),
            other => other,
        })
    }

    async fn ensure_catalog(&self) -> StoreResult<()> {
        let url = self.url(&format!("rpc/{ENSURE_CATALOG_RPC}"))?;
        tracing::debug!(op = "ensure_catalog", "store request");
        let resp = self
            .http
            .post(url)
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let body = resp
            .bytes()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        Err(error_from_body(status, &body))
    }
}
