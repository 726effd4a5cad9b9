use axum::{Router, routing::get};

pub mod admin;
pub mod catalog;
pub mod geolocation;
pub mod items;
pub mod system;
pub mod venues;

/// Router for every workflow endpoint.
pub fn router() -> Router {
    Router::new()
        .nest("/venues", venues::router().merge(items::router()))
        .nest("/catalog", catalog::router())
        .nest("/geolocation", geolocation::router())
        .route("/admin", get(admin::overview))
}
