//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Tools, projects, cost centers and crews are read-only inputs supplied by callers;
/// this trait lets generic lookups find them by id.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Find the first entity in `items` with the given id.
pub fn find_by_id<'a, E: Entity>(items: &'a [E], id: &E::Id) -> Option<&'a E> {
    items.iter().find(|item| item.id() == id)
}
