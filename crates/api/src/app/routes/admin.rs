use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use inventario_app::AdminOverview;

use crate::app::errors;
use crate::app::services::AppServices;

pub async fn overview(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    let mut overview = AdminOverview::new();
    match overview.load(services.store()).await {
        Ok(()) => (StatusCode::OK, Json(overview.summaries())).into_response(),
        Err(e) => errors::workflow_error_to_response(e),
    }
}
