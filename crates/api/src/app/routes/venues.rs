use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use inventario_app::{Navigation, NewVenueForm, VenueEditor, VenueListView};
use inventario_inventory::{VenueDetails, VenueField};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_venues).post(create_venue))
        .route("/:id", get(get_venue).put(update_venue))
        .route("/:id/complete", post(complete_inventory))
        .route("/:id/export", get(export_act))
}

pub async fn list_venues(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::ListVenuesQuery>,
) -> axum::response::Response {
    let mut view = VenueListView::new();
    if let Err(e) = view.load(services.store()).await {
        return errors::workflow_error_to_response(e);
    }
    view.set_query(query.q);

    (StatusCode::OK, Json(view.visible())).into_response()
}

/// Submit the creation form. An existing venue with the same name is
/// returned instead of creating a duplicate.
pub async fn create_venue(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<VenueDetails>,
) -> axum::response::Response {
    let mut form = NewVenueForm::new();
    for field in VenueField::ALL {
        form.set_field(field, body.get(field));
    }
    if let Some(eligibility) = body.eligibility {
        form.set_eligibility(eligibility);
    }

    match form.submit(services.store()).await {
        Ok(nav @ Navigation::Venue(_)) => {
            (StatusCode::OK, Json(dto::SubmitVenueResponse::from(nav))).into_response()
        }
        Ok(nav) => (StatusCode::CREATED, Json(dto::SubmitVenueResponse::from(nav))).into_response(),
        Err(e) => errors::workflow_error_to_response(e),
    }
}

pub async fn get_venue(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match errors::parse_venue_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match VenueEditor::open(services.store(), id).await {
        Ok(editor) => (StatusCode::OK, Json(editor.snapshot())).into_response(),
        Err(e) => errors::workflow_error_to_response(e),
    }
}

/// Overwrite the venue's fields with the request body.
pub async fn update_venue(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<VenueDetails>,
) -> axum::response::Response {
    let id = match errors::parse_venue_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    let mut editor = match VenueEditor::open(services.store(), id).await {
        Ok(editor) => editor,
        Err(e) => return errors::workflow_error_to_response(e),
    };
    editor.edit_metadata(body);

    match editor.save_metadata(services.store()).await {
        Ok(()) => (StatusCode::OK, Json(editor.venue())).into_response(),
        Err(e) => errors::workflow_error_to_response(e),
    }
}

pub async fn complete_inventory(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match errors::parse_venue_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    let mut editor = match VenueEditor::open(services.store(), id).await {
        Ok(editor) => editor,
        Err(e) => return errors::workflow_error_to_response(e),
    };

    match editor.save_inventory(services.store()).await {
        Ok(export_offer) => (
            StatusCode::OK,
            Json(dto::CompleteInventoryResponse {
                venue: editor.venue().clone(),
                export_offer,
            }),
        )
            .into_response(),
        Err(e) => errors::workflow_error_to_response(e),
    }
}

/// Download the inventory act. Only completed venues can be exported.
pub async fn export_act(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match errors::parse_venue_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    let mut editor = match VenueEditor::open_with_items(services.store(), id).await {
        Ok(editor) => editor,
        Err(e) => return errors::workflow_error_to_response(e),
    };

    match editor.export(services.exporter.as_ref()) {
        Ok(doc) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, doc.content_type.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", doc.file_name),
                ),
            ],
            doc.bytes,
        )
            .into_response(),
        Err(e) => errors::workflow_error_to_response(e),
    }
}
