//! Comparators for each sortable product field.

use core::cmp::{Ordering, Reverse};

use crate::query::{SortDirection, SortKey, SortSpec};
use crate::Product;

pub type Comparator = fn(&Product, &Product) -> Ordering;

impl SortKey {
    pub fn comparator(self) -> Comparator {
        match self {
            SortKey::Price => compare_price,
            SortKey::Rating => compare_rating,
            SortKey::Name => compare_name,
            SortKey::Category => compare_category,
        }
    }
}

/// Case-insensitive: "Apple" sorts before "banana".
pub fn compare_name(a: &Product, b: &Product) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

pub fn compare_price(a: &Product, b: &Product) -> Ordering {
    a.price.cmp(&b.price)
}

/// Unrated products go after rated ones.
pub fn compare_rating(a: &Product, b: &Product) -> Ordering {
    missing_last(a.rating.as_ref(), b.rating.as_ref(), |x, y| x.total_cmp(y))
}

/// Uncategorised products go after categorised ones.
pub fn compare_category(a: &Product, b: &Product) -> Ordering {
    missing_last(a.category_name(), b.category_name(), |x, y| x.cmp(y))
}

fn missing_last<T>(a: Option<T>, b: Option<T>, cmp: impl FnOnce(T, T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn compare_products(a: &Product, b: &Product, spec: SortSpec) -> Ordering {
    let ord = (spec.key.comparator())(a, b);
    match spec.direction {
        SortDirection::Asc => ord,
        SortDirection::Desc => ord.reverse(),
    }
}

/// Stable in-place sort; ties keep their incoming order.
///
/// Name sorts lower-case each name once rather than on every comparison.
pub fn sort_products(products: &mut [Product], spec: SortSpec) {
    match (spec.key, spec.direction) {
        (SortKey::Name, SortDirection::Asc) => {
            products.sort_by_cached_key(|p| p.name.to_lowercase());
        }
        (SortKey::Name, SortDirection::Desc) => {
            products.sort_by_cached_key(|p| Reverse(p.name.to_lowercase()));
        }
        _ => products.sort_by(|a, b| compare_products(a, b, spec)),
    }
}
