use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use serde_json::json;

use storefront_catalog::QueryError;

/// Where the browse view sends shoppers after a rejected search.
pub const CATALOG_PATH: &str = "/products";

pub fn query_error_to_response(err: QueryError) -> axum::response::Response {
    match err {
        QueryError::EmptySearchTerm => (
            StatusCode::SEE_OTHER,
            [(header::LOCATION, CATALOG_PATH)],
            axum::Json(json!({
                "error": "empty_search_term",
                "message": err.to_string(),
            })),
        )
            .into_response(),
        QueryError::Store(e) => {
            tracing::error!(error = %e, "catalog store failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", e.to_string())
        }
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
