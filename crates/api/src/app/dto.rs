use serde_json::{json, Value};

use storefront_catalog::{Category, Product, QueryResult};

pub fn category_to_json(c: &Category) -> Value {
    json!({
        "id": c.id.to_string(),
        "name": c.name,
        "friendly_name": c.friendly_name,
        "display_name": c.display_name(),
    })
}

pub fn product_to_json(p: &Product) -> Value {
    json!({
        "id": p.id.to_string(),
        "sku": p.sku,
        "name": p.name,
        "description": p.description,
        "category": p.category.as_ref().map(category_to_json),
        "price": p.price.minor_units(),
        "price_display": p.price.to_string(),
        "rating": p.rating.map(|r| r.value()),
        "has_sizes": p.has_sizes,
        "image_url": p.image_url,
        "image": p.image,
    })
}

/// Browse payload: results plus the state needed to restore the filter and
/// sort controls.
pub fn query_result_to_json(result: &QueryResult) -> Value {
    json!({
        "products": result.products.iter().map(product_to_json).collect::<Vec<_>>(),
        "search_term": result.search_term,
        "current_categories": result.current_categories.iter().map(category_to_json).collect::<Vec<_>>(),
        "current_sorting": result.current_sorting,
    })
}
