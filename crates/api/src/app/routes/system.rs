use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Landing page data: store title and the category navigation.
pub async fn home(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.engine.categories() {
        Ok(categories) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "title": services.store_title,
                "categories": categories.iter().map(dto::category_to_json).collect::<Vec<_>>(),
            })),
        )
            .into_response(),
        Err(e) => errors::query_error_to_response(e),
    }
}

pub async fn not_found() -> axum::response::Response {
    errors::json_error(StatusCode::NOT_FOUND, "not_found", "page not found")
}
