//! Catalog query engine.
//!
//! Composes the browse dimensions over the store collaborators:
//!
//! 1. reject a present-but-empty search term before touching storage
//! 2. category filter (products) plus category echo (categories), two calls
//! 3. search filter over name OR description, case-insensitive
//! 4. stable sort by the resolved key and direction
//!
//! The engine holds no mutable state; one instance can serve concurrent
//! requests.

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use storefront_core::{Entity, ProductId};

use crate::query::QueryRequest;
use crate::sorting::sort_products;
use crate::store::{CategoryStore, ProductStore, StoreError};
use crate::{Category, Product};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// `q` was supplied with no value. Recoverable: show the unfiltered
    /// catalog with this message.
    #[error("You didn't enter any search criteria!")]
    EmptySearchTerm,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Filtered, ordered catalog view plus the state needed to redraw the
/// browse controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub products: Vec<Product>,
    pub search_term: Option<String>,
    pub current_categories: Vec<Category>,
    pub current_sorting: String,
}

#[derive(Debug, Clone)]
pub struct CatalogQueryEngine<P, C> {
    products: P,
    categories: C,
}

impl<P, C> CatalogQueryEngine<P, C>
where
    P: ProductStore,
    C: CategoryStore,
{
    pub fn new(products: P, categories: C) -> Self {
        Self { products, categories }
    }

    pub fn execute(&self, request: &QueryRequest) -> Result<QueryResult, QueryError> {
        let search_term = match request.search.as_deref() {
            Some("") => {
                warn!("empty search term supplied");
                return Err(QueryError::EmptySearchTerm);
            }
            other => other,
        };

        let current_sorting = request.sort_token();

        let (mut products, current_categories) = match request.categories.as_deref() {
            Some(names) => {
                let products = self.products.filter_by_category_names(names)?;
                let categories = self.categories.find_by_names(names)?;
                debug!(
                    requested = names.len(),
                    matched_categories = categories.len(),
                    products = products.len(),
                    "applied category filter"
                );
                (products, categories)
            }
            None => (self.products.list_all()?, Vec::new()),
        };

        dedup_by_identity(&mut products);

        if let Some(term) = search_term {
            let needle = term.to_lowercase();
            products.retain(|p| p.matches_term(&needle));
            debug!(term, products = products.len(), "applied search filter");
        }

        if let Some(spec) = request.sort_spec() {
            sort_products(&mut products, spec);
            debug!(key = spec.key.as_str(), direction = spec.direction.as_str(), "sorted products");
        }

        Ok(QueryResult {
            products,
            search_term: search_term.map(str::to_string),
            current_categories,
            current_sorting,
        })
    }

    pub fn product_detail(&self, id: ProductId) -> Result<Option<Product>, QueryError> {
        Ok(self.products.get(id)?)
    }

    /// All categories, for navigation menus.
    pub fn categories(&self) -> Result<Vec<Category>, QueryError> {
        Ok(self.categories.list_all()?)
    }
}

fn dedup_by_identity(products: &mut Vec<Product>) {
    let mut seen = HashSet::with_capacity(products.len());
    products.retain(|p| seen.insert(*p.id()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::query::{SortDirection, SortKey};
    use crate::Price;

    #[derive(Default)]
    struct VecProductStore {
        items: Vec<Product>,
        calls: AtomicUsize,
        fail: bool,
    }

    impl VecProductStore {
        fn check(&self) -> Result<(), StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(StoreError::Unavailable("down".to_string()));
            }
            Ok(())
        }
    }

    impl ProductStore for VecProductStore {
        fn list_all(&self) -> Result<Vec<Product>, StoreError> {
            self.check()?;
            Ok(self.items.clone())
        }

        fn filter_by_category_names(&self, names: &[String]) -> Result<Vec<Product>, StoreError> {
            self.check()?;
            Ok(self
                .items
                .iter()
                .filter(|p| p.category_name().is_some_and(|n| names.iter().any(|x| x == n)))
                .cloned()
                .collect())
        }

        fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
            self.check()?;
            Ok(self.items.iter().find(|p| p.id == id).cloned())
        }
    }

    #[derive(Default)]
    struct VecCategoryStore {
        items: Vec<Category>,
        calls: AtomicUsize,
    }

    impl CategoryStore for VecCategoryStore {
        fn find_by_names(&self, names: &[String]) -> Result<Vec<Category>, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .items
                .iter()
                .filter(|c| names.contains(&c.name))
                .cloned()
                .collect())
        }

        fn list_all(&self) -> Result<Vec<Category>, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.items.clone())
        }
    }

    struct Fixture {
        products: Arc<VecProductStore>,
        categories: Arc<VecCategoryStore>,
        engine: CatalogQueryEngine<Arc<VecProductStore>, Arc<VecCategoryStore>>,
    }

    fn fixture(items: Vec<Product>, categories: Vec<Category>) -> Fixture {
        let products = Arc::new(VecProductStore {
            items,
            ..Default::default()
        });
        let categories = Arc::new(VecCategoryStore {
            items: categories,
            ..Default::default()
        });
        let engine = CatalogQueryEngine::new(products.clone(), categories.clone());
        Fixture {
            products,
            categories,
            engine,
        }
    }

    fn product(name: &str, description: &str) -> Product {
        Product::new(name, description, Price::from_minor_units(1000)).unwrap()
    }

    fn names(result: &QueryResult) -> Vec<&str> {
        result.products.iter().map(|p| p.name.as_str()).collect()
    }

    fn clothing_catalog() -> (Vec<Product>, Vec<Category>) {
        let clothing = Category::new("Clothing").unwrap();
        let shoes = Category::new("Shoes").unwrap();
        let products = vec![
            product("Blue Shirt", "warm").in_category(clothing.clone()),
            product("Hat", "has a shirt logo").in_category(shoes.clone()),
            product("Pants", "cotton").in_category(clothing.clone()),
            product("Boot", "leather, shirt not included"),
        ];
        (products, vec![clothing, shoes])
    }

    #[test]
    fn empty_request_returns_whole_catalog_in_store_order() {
        let items = vec![product("banana", ""), product("Apple", ""), product("cherry", "")];
        let f = fixture(items, vec![]);

        let result = f.engine.execute(&QueryRequest::new()).unwrap();

        assert_eq!(names(&result), vec!["banana", "Apple", "cherry"]);
        assert!(result.current_categories.is_empty());
        assert_eq!(result.search_term, None);
        assert_eq!(result.current_sorting, "None_None");
    }

    #[test]
    fn name_desc_sort_is_case_insensitive() {
        let items = vec![product("banana", ""), product("Apple", ""), product("cherry", "")];
        let f = fixture(items, vec![]);

        let req = QueryRequest::new().sorted_by(SortKey::Name, Some(SortDirection::Desc));
        let result = f.engine.execute(&req).unwrap();

        assert_eq!(names(&result), vec!["cherry", "banana", "Apple"]);
        assert_eq!(result.current_sorting, "name_desc");
    }

    #[test]
    fn category_filter_echoes_only_existing_categories() {
        let (items, categories) = clothing_catalog();
        let f = fixture(items, categories);

        let req = QueryRequest::new().with_categories(["Clothing", "Books"]);
        let result = f.engine.execute(&req).unwrap();

        assert_eq!(names(&result), vec!["Blue Shirt", "Pants"]);
        let echoed: Vec<&str> = result.current_categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(echoed, vec!["Clothing"]);
    }

    #[test]
    fn requested_category_is_echoed_even_without_products() {
        let empty = Category::new("Books").unwrap();
        let f = fixture(vec![product("Blue Shirt", "")], vec![empty]);

        let result = f.engine.execute(&QueryRequest::new().with_categories(["Books"])).unwrap();

        assert!(result.products.is_empty());
        assert_eq!(result.current_categories.len(), 1);
        assert_eq!(result.current_categories[0].name, "Books");
    }

    #[test]
    fn empty_search_term_short_circuits_without_store_calls() {
        let (items, categories) = clothing_catalog();
        let f = fixture(items, categories);

        let req = QueryRequest::new()
            .with_search("")
            .with_categories(["Clothing"])
            .sorted_by(SortKey::Price, None);
        let err = f.engine.execute(&req).unwrap_err();

        assert_eq!(err, QueryError::EmptySearchTerm);
        assert_eq!(err.to_string(), "You didn't enter any search criteria!");
        assert_eq!(f.products.calls.load(Ordering::SeqCst), 0);
        assert_eq!(f.categories.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn whitespace_search_term_is_a_real_filter() {
        let f = fixture(
            vec![product("Hat", "wool"), product("Blue Shirt", "warm"), product("Socks", "two pack")],
            vec![],
        );

        let result = f.engine.execute(&QueryRequest::new().with_search("  ")).unwrap();

        assert!(result.products.is_empty());
        assert_eq!(result.search_term.as_deref(), Some("  "));

        let result = f.engine.execute(&QueryRequest::new().with_search(" ")).unwrap();
        assert_eq!(names(&result), vec!["Blue Shirt", "Socks"]);
    }

    #[test]
    fn search_matches_name_or_description() {
        let (items, categories) = clothing_catalog();
        let f = fixture(items, categories);

        let result = f.engine.execute(&QueryRequest::new().with_search("SHIRT")).unwrap();

        assert_eq!(names(&result), vec!["Blue Shirt", "Hat", "Boot"]);
        assert_eq!(result.search_term.as_deref(), Some("SHIRT"));
    }

    #[test]
    fn category_and_search_compose_as_intersection() {
        let (items, categories) = clothing_catalog();
        let f = fixture(items, categories);

        let req = QueryRequest::new()
            .with_search("shirt")
            .with_categories(["Clothing"]);
        let result = f.engine.execute(&req).unwrap();

        assert_eq!(names(&result), vec!["Blue Shirt"]);
    }

    #[test]
    fn sorting_applies_after_filters() {
        let (items, categories) = clothing_catalog();
        let f = fixture(items, categories);

        let req = QueryRequest::new()
            .with_categories(["Clothing"])
            .sorted_by(SortKey::Name, Some(SortDirection::Desc));
        let result = f.engine.execute(&req).unwrap();

        assert_eq!(names(&result), vec!["Pants", "Blue Shirt"]);
    }

    #[test]
    fn duplicate_products_from_store_are_dropped() {
        let hat = product("Hat", "");
        let f = fixture(vec![hat.clone(), product("Scarf", ""), hat], vec![]);

        let result = f.engine.execute(&QueryRequest::new()).unwrap();

        assert_eq!(names(&result), vec!["Hat", "Scarf"]);
    }

    #[test]
    fn store_failures_propagate_unchanged() {
        let products = Arc::new(VecProductStore {
            fail: true,
            ..Default::default()
        });
        let engine = CatalogQueryEngine::new(products, Arc::new(VecCategoryStore::default()));

        let err = engine.execute(&QueryRequest::new()).unwrap_err();

        assert_eq!(err, QueryError::Store(StoreError::Unavailable("down".to_string())));
    }

    #[test]
    fn product_detail_looks_up_by_id() {
        let hat = product("Hat", "");
        let id = hat.id;
        let f = fixture(vec![hat], vec![]);

        assert_eq!(f.engine.product_detail(id).unwrap().map(|p| p.name), Some("Hat".to_string()));
        assert_eq!(f.engine.product_detail(ProductId::new()).unwrap(), None);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn catalog_strategy() -> impl Strategy<Value = Vec<(String, String, u64, usize)>> {
            prop::collection::vec(
                ("[A-Za-z]{1,8}", "[a-z ]{0,16}", 0u64..10_000, 0usize..4),
                0..24,
            )
        }

        fn build(rows: Vec<(String, String, u64, usize)>) -> Fixture {
            let categories: Vec<Category> = ["alpha", "beta", "gamma"]
                .into_iter()
                .map(|n| Category::new(n).unwrap())
                .collect();
            let items = rows
                .into_iter()
                .map(|(name, description, price, cat)| {
                    let p = Product::new(name, description, Price::from_minor_units(price)).unwrap();
                    match categories.get(cat) {
                        Some(c) => p.in_category(c.clone()),
                        None => p,
                    }
                })
                .collect();
            fixture(items, categories)
        }

        fn request_strategy() -> impl Strategy<Value = QueryRequest> {
            (
                prop::option::of("[a-z]{1,3}"),
                prop::option::of(prop::collection::vec("alpha|beta|gamma|delta", 0..3)),
                prop::option::of(prop::sample::select(SortKey::ALL.to_vec())),
                prop::option::of(prop::sample::select(vec![SortDirection::Asc, SortDirection::Desc])),
            )
                .prop_map(|(search, categories, sort, direction)| QueryRequest {
                    search,
                    categories,
                    sort,
                    direction: sort.and(direction),
                })
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Same request against an unchanged store yields the same result.
            #[test]
            fn execute_is_idempotent(catalog in catalog_strategy(), req in request_strategy()) {
                let f = build(catalog);
                let first = f.engine.execute(&req).unwrap();
                let second = f.engine.execute(&req).unwrap();
                prop_assert_eq!(first, second);
            }

            /// Results satisfy every supplied filter and contain no duplicates.
            #[test]
            fn results_are_a_filtered_subset(catalog in catalog_strategy(), req in request_strategy()) {
                let f = build(catalog);
                let all = f.products.list_all().unwrap();
                let result = f.engine.execute(&req).unwrap();

                let mut seen = HashSet::new();
                for p in &result.products {
                    prop_assert!(seen.insert(p.id));
                    prop_assert!(all.iter().any(|q| q.id == p.id));
                    if let Some(names) = &req.categories {
                        prop_assert!(p.category_name().is_some_and(|n| names.iter().any(|x| x == n)));
                    }
                    if let Some(term) = &req.search {
                        prop_assert!(p.matches_term(&term.to_lowercase()));
                    }
                }

                let expected = all
                    .iter()
                    .filter(|p| match &req.categories {
                        Some(names) => p.category_name().is_some_and(|n| names.iter().any(|x| x == n)),
                        None => true,
                    })
                    .filter(|p| match &req.search {
                        Some(term) => p.matches_term(&term.to_lowercase()),
                        None => true,
                    })
                    .count();
                prop_assert_eq!(result.products.len(), expected);
            }

            /// Adjacent products respect the requested order.
            #[test]
            fn results_are_sorted(catalog in catalog_strategy(), req in request_strategy()) {
                let f = build(catalog);
                let result = f.engine.execute(&req).unwrap();
                if let Some(spec) = req.sort_spec() {
                    for pair in result.products.windows(2) {
                        prop_assert_ne!(
                            crate::sorting::compare_products(&pair[0], &pair[1], spec),
                            core::cmp::Ordering::Greater
                        );
                    }
                }
            }
        }
    }
}
