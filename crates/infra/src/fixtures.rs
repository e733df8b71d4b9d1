//! Catalog fixtures: JSON documents used to seed the in-memory read models.
//!
//! ```json
//! {
//!   "categories": [{ "name": "jeans", "friendly_name": "Jeans" }],
//!   "products": [{
//!     "sku": "pp5001340155", "name": "Slim Jeans", "description": "...",
//!     "category": "jeans", "price": 4999, "rating": 4.2,
//!     "has_sizes": true, "image_url": null, "image": "slim.jpg"
//!   }]
//! }
//! ```
//!
//! Products reference categories by name; prices are in minor units.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use storefront_catalog::{Category, Price, Product, Rating, StoreError};
use storefront_core::DomainError;

use crate::read_model::{InMemoryCategoryStore, InMemoryProductStore};

const DEMO_CATALOG: &str = include_str!("../fixtures/demo_catalog.json");

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read fixture file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse fixture: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate category name in fixture: {0}")]
    DuplicateCategory(String),

    #[error("product {product:?} references unknown category {category:?}")]
    UnknownCategory { product: String, category: String },

    #[error("invalid fixture record: {0}")]
    Invalid(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryFixture {
    pub name: String,
    #[serde(default)]
    pub friendly_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductFixture {
    #[serde(default)]
    pub sku: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    pub price: u64,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub has_sizes: Option<bool>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogFixture {
    #[serde(default)]
    pub categories: Vec<CategoryFixture>,
    #[serde(default)]
    pub products: Vec<ProductFixture>,
}

/// Counts of records written by [`CatalogFixture::seed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub categories: usize,
    pub products: usize,
}

impl CatalogFixture {
    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, FixtureError> {
        let json = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Small built-in clothing catalog used when no fixture file is configured.
    pub fn demo() -> Result<Self, FixtureError> {
        Self::from_json(DEMO_CATALOG)
    }

    /// Validate the whole document, then write it into the stores. Nothing is
    /// written if any record is invalid.
    pub fn seed(
        &self,
        products: &InMemoryProductStore,
        categories: &InMemoryCategoryStore,
    ) -> Result<SeedSummary, FixtureError> {
        let mut by_name: HashMap<&str, Category> = HashMap::new();
        let mut ordered = Vec::with_capacity(self.categories.len());
        for fixture in &self.categories {
            let mut category = Category::new(fixture.name.clone())?;
            category.friendly_name = fixture.friendly_name.clone();
            if by_name.insert(fixture.name.as_str(), category.clone()).is_some() {
                return Err(FixtureError::DuplicateCategory(fixture.name.clone()));
            }
            ordered.push(category);
        }

        let mut built = Vec::with_capacity(self.products.len());
        for fixture in &self.products {
            built.push(fixture.build(&by_name)?);
        }

        for category in ordered {
            categories.insert(category)?;
        }
        for product in built {
            products.insert(product)?;
        }

        let summary = SeedSummary {
            categories: self.categories.len(),
            products: self.products.len(),
        };
        info!(
            categories = summary.categories,
            products = summary.products,
            "seeded catalog read models"
        );
        Ok(summary)
    }
}

impl ProductFixture {
    fn build(&self, categories: &HashMap<&str, Category>) -> Result<Product, FixtureError> {
        let mut product = Product::new(
            self.name.clone(),
            self.description.clone(),
            Price::from_minor_units(self.price),
        )?;

        if let Some(name) = &self.category {
            let category = categories
                .get(name.as_str())
                .ok_or_else(|| FixtureError::UnknownCategory {
                    product: self.name.clone(),
                    category: name.clone(),
                })?;
            product = product.in_category(category.clone());
        }
        if let Some(rating) = self.rating {
            product = product.with_rating(Rating::new(rating)?);
        }

        if let Some(sku) = &self.sku {
            product = product.with_sku(sku.clone());
        }
        product.has_sizes = self.has_sizes;
        Ok(product.with_image(self.image_url.clone(), self.image.clone()))
    }
}
