use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use inventario_app::{FailureKind, WorkflowError};
use inventario_core::{ItemId, VenueId};
use inventario_inventory::Section;

pub fn workflow_error_to_response(err: WorkflowError) -> axum::response::Response {
    match err.kind {
        FailureKind::Validation => json_error(StatusCode::BAD_REQUEST, "validation_error", err.message),
        FailureKind::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", err.message),
        FailureKind::Conflict => json_error(StatusCode::CONFLICT, "conflict", err.message),
        FailureKind::Store => json_error(StatusCode::BAD_GATEWAY, "store_error", err.message),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn parse_venue_id(s: &str) -> Result<VenueId, axum::response::Response> {
    s.parse()
        .map_err(|_| json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid venue id"))
}

pub fn parse_item_id(s: &str) -> Result<ItemId, axum::response::Response> {
    s.parse()
        .map_err(|_| json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid item id"))
}

pub fn parse_section(s: &str) -> Result<Section, axum::response::Response> {
    s.parse().map_err(|_| {
        json_error(
            StatusCode::BAD_REQUEST,
            "invalid_section",
            "section must be one of: Inmuebles, Muebles",
        )
    })
}
