use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use storefront_catalog::QueryRequest;
use storefront_core::ProductId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products))
        .route("/:id", get(get_product))
}

/// Catalog browse: `?q=&category=a,b&sort=price|rating|name|category&direction=asc|desc`.
pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<HashMap<String, String>>,
) -> axum::response::Response {
    let request = QueryRequest::from_params(&params);
    match services.engine.execute(&request) {
        Ok(result) => (StatusCode::OK, Json(dto::query_result_to_json(&result))).into_response(),
        Err(e) => errors::query_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let product_id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id"),
    };
    match services.engine.product_detail(product_id) {
        Ok(Some(product)) => (StatusCode::OK, Json(dto::product_to_json(&product))).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
        Err(e) => errors::query_error_to_response(e),
    }
}
