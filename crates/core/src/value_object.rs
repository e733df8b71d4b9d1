//! Value object trait: equality by value, not identity.
//!
//! Prices and ratings have no identity of their own: two prices of 1999 pence
//! are the same price wherever they appear.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "change" one,
/// build a new value. In the catalog:
///
/// - `Price { minor_units: 1999 }` is a value object
/// - `Product { id: ProductId(...), .. }` is an entity
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// struct Price(u64);
///
/// impl ValueObject for Price {}
///
/// assert_eq!(Price(1999), Price(1999));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {
    /// Validate the value's own invariants.
    ///
    /// Constructors call this before handing the value out; the default
    /// accepts everything.
    fn validate(&self) -> crate::DomainResult<()> {
        Ok(())
    }
}
