//! Trait seams between the generic engine and concrete entity families.

use std::fmt::Debug;

/// Identity of a persisted spec entry.
///
/// Keys are whatever uniquely names an entity within its family: a
/// backend-assigned integer id for scheduled jobs, a human-chosen name for
/// record APIs. Merge results are ordered ascending by this key.
pub trait Keyed {
    /// Key type. `Ord` drives the merge map and the output ordering.
    type Key: Ord + Clone + Debug;

    /// The entry's key.
    fn key(&self) -> Self::Key;
}

/// Structural equality over user-editable fields only.
///
/// Used to decide whether a defaulted (not explicitly configured) entry has
/// been modified and must be promoted into the persisted document. Live and
/// telemetry fields never participate.
pub trait EditEq {
    /// `true` iff all user-editable fields are equal.
    fn edit_eq(&self, other: &Self) -> bool;
}

/// A live-observed runtime state for one entity.
///
/// Live state is read-only: it is reported by an external system and never
/// written back. Its only roles in the merge are (a) naming the entity it
/// belongs to and (b) synthesizing the spec a user would get by default.
pub trait LiveState {
    /// The persisted spec type this observation corresponds to.
    type Spec: Keyed + Clone;

    /// Key of the entity this observation belongs to.
    fn key(&self) -> <Self::Spec as Keyed>::Key;

    /// Derive the default spec for an entity that has no persisted entry.
    fn to_default_spec(&self) -> Self::Spec;
}
