use std::sync::Arc;

use storefront_catalog::{CatalogQueryEngine, CategoryStore, ProductStore};
use storefront_infra::config::AppConfig;
use storefront_infra::fixtures::FixtureError;
use storefront_infra::read_model::{InMemoryCategoryStore, InMemoryProductStore};

pub type SharedEngine = CatalogQueryEngine<Arc<dyn ProductStore>, Arc<dyn CategoryStore>>;

/// Everything a handler needs; shared across requests behind an `Arc`.
pub struct AppServices {
    pub engine: SharedEngine,
    pub store_title: String,
}

impl AppServices {
    pub fn new(
        products: Arc<dyn ProductStore>,
        categories: Arc<dyn CategoryStore>,
        store_title: impl Into<String>,
    ) -> Self {
        Self {
            engine: CatalogQueryEngine::new(products, categories),
            store_title: store_title.into(),
        }
    }
}

/// Seed in-memory read models from the configured fixture and wire the engine.
pub fn build_services(config: &AppConfig) -> Result<AppServices, FixtureError> {
    let products = Arc::new(InMemoryProductStore::new());
    let categories = Arc::new(InMemoryCategoryStore::new());

    if let Some(path) = &config.catalog_fixtures {
        tracing::info!(path = %path.display(), "loading catalog fixtures");
    } else {
        tracing::info!("no CATALOG_FIXTURES set; seeding demo catalog");
    }
    config.load_catalog()?.seed(&products, &categories)?;

    Ok(AppServices::new(products, categories, config.store_title.clone()))
}
