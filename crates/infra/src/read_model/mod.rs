//! Disposable read-model storage backing the catalog collaborators.

pub mod catalog;
pub mod store;

pub use catalog::{InMemoryCategoryStore, InMemoryProductStore};
pub use store::{InMemoryReadModelStore, ReadModelStore};
