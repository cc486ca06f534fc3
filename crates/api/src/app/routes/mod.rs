use axum::{routing::get, Router};

pub mod categories;
pub mod events;
pub mod system;

/// Router for the public `/api` endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/categories", get(categories::list_categories))
        .nest("/events", events::router())
}
