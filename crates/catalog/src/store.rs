//! Read-only storage collaborators used by the query engine.

use std::sync::Arc;

use thiserror::Error;

use storefront_core::ProductId;

use crate::{Category, Product};

/// Storage-level failure. Passed through the engine unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store backend error: {0}")]
    Backend(String),
}

/// Read access to the product catalog.
///
/// Implementations must return products in a stable order (the order used when
/// no sort key is requested).
pub trait ProductStore: Send + Sync {
    fn list_all(&self) -> Result<Vec<Product>, StoreError>;

    /// Products whose category name is one of `names`. Products without a
    /// category never match.
    fn filter_by_category_names(&self, names: &[String]) -> Result<Vec<Product>, StoreError>;

    fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError>;
}

/// Read access to categories.
pub trait CategoryStore: Send + Sync {
    /// Categories whose name is one of `names`, each at most once. Unknown
    /// names are skipped.
    fn find_by_names(&self, names: &[String]) -> Result<Vec<Category>, StoreError>;

    fn list_all(&self) -> Result<Vec<Category>, StoreError>;
}

impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    fn list_all(&self) -> Result<Vec<Product>, StoreError> {
        (**self).list_all()
    }

    fn filter_by_category_names(&self, names: &[String]) -> Result<Vec<Product>, StoreError> {
        (**self).filter_by_category_names(names)
    }

    fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        (**self).get(id)
    }
}

impl<S> CategoryStore for Arc<S>
where
    S: CategoryStore + ?Sized,
{
    fn find_by_names(&self, names: &[String]) -> Result<Vec<Category>, StoreError> {
        (**self).find_by_names(names)
    }

    fn list_all(&self) -> Result<Vec<Category>, StoreError> {
        (**self).list_all()
    }
}
