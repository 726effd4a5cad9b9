use axum::{routing::post, Json, Router};

use inventario_app::GeoLocationCapture;

use crate::app::dto;

pub fn router() -> Router {
    Router::new().route("/manual", post(manual_entry))
}

/// Normalize a hand-typed location the same way the form does.
pub async fn manual_entry(Json(body): Json<dto::ManualLocationRequest>) -> Json<dto::LocationResponse> {
    let mut capture = GeoLocationCapture::default();
    let value = capture.manual_entry(&body.value).to_string();
    Json(dto::LocationResponse { value })
}
