use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use inventario_app::WorkflowError;
use inventario_inventory::reference;

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(reference_lists))
        .route("/:section", get(available_names))
}

/// Static option lists behind the creation form's autocomplete inputs.
pub async fn reference_lists() -> Json<dto::ReferenceListsResponse> {
    Json(dto::ReferenceListsResponse {
        escenarios: reference::options(reference::ESCENARIOS_DEPORTIVOS),
        comunas: reference::options(reference::COMUNAS),
        barrios: reference::options(reference::BARRIOS),
    })
}

pub async fn available_names(
    Extension(services): Extension<Arc<AppServices>>,
    Path(section): Path<String>,
) -> axum::response::Response {
    let section = match errors::parse_section(&section) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.store().list_available_names(section).await {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(e) => {
            tracing::warn!(section = %section, error = %e, "failed to load available item names");
            errors::workflow_error_to_response(WorkflowError::from_store(
                "cargar los items disponibles",
                &e,
            ))
        }
    }
}
