//! In-memory product and category collaborators for the query engine.

use std::collections::HashSet;

use storefront_catalog::{Category, CategoryStore, Product, ProductStore, StoreError};
use storefront_core::{CategoryId, ProductId};

use crate::read_model::store::{InMemoryReadModelStore, ReadModelStore};

/// Product catalog read model. Listing order is insertion order.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    inner: InMemoryReadModelStore<ProductId, Product>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, product: Product) -> Result<(), StoreError> {
        self.inner.upsert(product.id, product)
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.inner.clear()
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        self.inner.len()
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        self.inner.is_empty()
    }
}

impl ProductStore for InMemoryProductStore {
    fn list_all(&self) -> Result<Vec<Product>, StoreError> {
        self.inner.list()
    }

    fn filter_by_category_names(&self, names: &[String]) -> Result<Vec<Product>, StoreError> {
        let wanted: HashSet<&str> = names.iter().map(String::as_str).collect();
        self.inner
            .select(|p| p.category_name().is_some_and(|n| wanted.contains(n)))
    }

    fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        self.inner.get(&id)
    }
}

/// Category read model. Inserting a category whose name is already taken by
/// another id is rejected.
#[derive(Debug, Default)]
pub struct InMemoryCategoryStore {
    inner: InMemoryReadModelStore<CategoryId, Category>,
}

impl InMemoryCategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, category: Category) -> Result<(), StoreError> {
        let (id, name) = (category.id, category.name.clone());
        let inserted = self
            .inner
            .upsert_unless(id, category, |c| c.name == name && c.id != id)?;
        if !inserted {
            return Err(StoreError::Backend(format!("duplicate category name: {name}")));
        }
        Ok(())
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.inner.clear()
    }
}

impl CategoryStore for InMemoryCategoryStore {
    fn find_by_names(&self, names: &[String]) -> Result<Vec<Category>, StoreError> {
        let wanted: HashSet<&str> = names.iter().map(String::as_str).collect();
        self.inner.select(|c| wanted.contains(c.name.as_str()))
    }

    fn list_all(&self) -> Result<Vec<Category>, StoreError> {
        self.inner.list()
    }
}
