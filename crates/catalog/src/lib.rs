//! Catalog domain module.
//!
//! Products, categories and the query engine that turns browse parameters
//! (search term, category filter, sort key and direction) into one ordered,
//! filtered view of the catalog. Everything here is deterministic domain logic;
//! storage is reached only through the [`ProductStore`] and [`CategoryStore`]
//! traits.

pub mod category;
pub mod engine;
pub mod product;
pub mod query;
pub mod sorting;
pub mod store;

pub use category::Category;
pub use engine::{CatalogQueryEngine, QueryError, QueryResult};
pub use product::{Price, Product, Rating};
pub use query::{QueryRequest, SortDirection, SortKey, SortSpec};
pub use store::{CategoryStore, ProductStore, StoreError};
pub use storefront_core::{CategoryId, ProductId};
