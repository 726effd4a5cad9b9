use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, post},
    Json, Router,
};

use inventario_app::VenueEditor;

use crate::app::{dto, errors};
use crate::app::services::AppServices;

/// Mounted under `/venues`.
pub fn router() -> Router {
    Router::new()
        .route("/:id/items", post(add_item))
        .route("/:id/items/:item_id", delete(remove_item))
}

pub async fn add_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::AddItemRequest>,
) -> axum::response::Response {
    let id = match errors::parse_venue_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    let mut editor = match VenueEditor::open(services.store(), id).await {
        Ok(editor) => editor,
        Err(e) => return errors::workflow_error_to_response(e),
    };
    editor.set_draft(body.into_draft());

    match editor.add_item(services.store()).await {
        Ok(rows) => (StatusCode::CREATED, Json(rows)).into_response(),
        Err(e) => errors::workflow_error_to_response(e),
    }
}

pub async fn remove_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path((id, item_id)): Path<(String, String)>,
) -> axum::response::Response {
    let id = match errors::parse_venue_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let item_id = match errors::parse_item_id(&item_id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    let mut editor = match VenueEditor::open_with_items(services.store(), id).await {
        Ok(editor) => editor,
        Err(e) => return errors::workflow_error_to_response(e),
    };

    // Items of other venues are not reachable through this path.
    if !editor.items().iter().any(|item| item.id == item_id) {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "Item no encontrado");
    }

    match editor.remove_item(services.store(), item_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::workflow_error_to_response(e),
    }
}
