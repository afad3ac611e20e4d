//! Modelling traits: entities (identity) and value objects (equality by value).

/// Something with a stable identity that survives state changes.
///
/// An inventory row keeps its id while its quantity moves; a student keeps
/// theirs while the uniform status changes.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values. A stock
/// key `(school, item type, size)` is a value object; the inventory row it
/// identifies is an entity.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
