//! Entity trait: identity that survives attribute changes.

/// Catalog records compared by identifier rather than by attribute values.
pub trait Entity {
    /// Strongly-typed identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Two records describe the same entity when their identifiers match,
    /// regardless of any other field.
    fn same_identity(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
