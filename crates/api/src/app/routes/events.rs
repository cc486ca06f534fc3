use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use hope_core::EventId;

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(search_events))
        .route("/:id", get(get_event))
}

pub async fn search_events(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::EventSearchQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(e) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", e.body_text());
        }
    };

    let criteria = match query.into_criteria() {
        Ok(c) => c,
        Err(e) => return errors::domain_error_to_response(e),
    };

    tracing::debug!(clauses = criteria.clauses().len(), "searching events");

    match services.events().find_events(&criteria).await {
        Ok(events) => (StatusCode::OK, Json(events)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_event(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: EventId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.events().find_event_by_id(id).await {
        Ok(Some(event)) => (StatusCode::OK, Json(event)).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "event not found"),
        Err(e) => errors::store_error_to_response(e),
    }
}
