//! Permission-set (ACL) data model
//!
//! A per-entity set of permission flags granted to a principal class
//! (World / Authenticated). Tables expose all five actions; views are
//! read-only and expose only `Read` and `Schema`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One grantable API action.
///
/// Declaration order is the storage order: serialized flag lists are sorted
/// by this ordering and carry no duplicates.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PermissionFlag {
    /// Create new records.
    Create,
    /// Read and list records.
    Read,
    /// Update existing records.
    Update,
    /// Delete records.
    Delete,
    /// Read the entity's schema.
    Schema,
}

impl PermissionFlag {
    /// Whether this flag can be granted on the given entity kind.
    #[inline]
    #[must_use]
    pub fn allowed_for(self, kind: EntityKind) -> bool {
        kind.allowed_flags().contains(&self)
    }
}

/// Kind of schema entity a record API is backed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A real table; all actions are grantable.
    Table,
    /// A read-only view; only `Read` and `Schema` are grantable.
    View,
}

impl EntityKind {
    /// Flags grantable on this entity kind.
    #[must_use]
    pub fn allowed_flags(self) -> &'static [PermissionFlag] {
        match self {
            Self::Table => &[
                PermissionFlag::Create,
                PermissionFlag::Read,
                PermissionFlag::Update,
                PermissionFlag::Delete,
                PermissionFlag::Schema,
            ],
            Self::View => &[PermissionFlag::Read, PermissionFlag::Schema],
        }
    }
}

/// An ordered, duplicate-free set of permission flags.
///
/// Value-semantic: [`toggle`](Self::toggle) returns a new set and never
/// mutates the receiver. Serializes to/from an ordered flag list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(BTreeSet<PermissionFlag>);

impl PermissionSet {
    /// Empty set.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or remove a flag, returning the resulting set.
    ///
    /// Idempotent: toggling a present flag on (or an absent flag off) is a
    /// no-op.
    #[must_use]
    pub fn toggle(&self, flag: PermissionFlag, enabled: bool) -> Self {
        let mut flags = self.0.clone();
        if enabled {
            flags.insert(flag);
        } else {
            flags.remove(&flag);
        }
        Self(flags)
    }

    /// Whether the flag is granted.
    #[inline]
    #[must_use]
    pub fn contains(&self, flag: PermissionFlag) -> bool {
        self.0.contains(&flag)
    }

    /// Drop every flag not grantable on the given entity kind.
    #[must_use]
    pub fn restrict(&self, kind: EntityKind) -> Self {
        Self(
            self.0
                .iter()
                .copied()
                .filter(|flag| flag.allowed_for(kind))
                .collect(),
        )
    }

    /// Flags in storage order.
    pub fn iter(&self) -> impl Iterator<Item = PermissionFlag> + '_ {
        self.0.iter().copied()
    }

    /// Number of granted flags.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no flags are granted.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<PermissionFlag> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = PermissionFlag>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PermissionFlag::{Create, Delete, Read, Schema, Update};

    #[test]
    fn toggle_adds_and_removes() {
        let set = PermissionSet::new().toggle(Read, true);
        assert!(set.contains(Read));

        let set: PermissionSet = [Read, Schema].into_iter().collect();
        let set = set.toggle(Read, false);
        assert!(!set.contains(Read));
        assert!(set.contains(Schema));
    }

    #[test]
    fn toggle_is_idempotent() {
        let set = PermissionSet::new().toggle(Read, true);
        assert_eq!(set, set.toggle(Read, true));

        let removed = set.toggle(Schema, false);
        assert_eq!(removed, set);
    }

    #[test]
    fn toggle_leaves_receiver_untouched() {
        let set = PermissionSet::new().toggle(Read, true);
        let _bigger = set.toggle(Update, true);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn serializes_as_ordered_flag_list() {
        let set: PermissionSet = [Schema, Create, Read].into_iter().collect();
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json, serde_json::json!(["CREATE", "READ", "SCHEMA"]));
    }

    #[test]
    fn deserializes_with_duplicates_collapsed() {
        let set: PermissionSet = serde_json::from_str(r#"["READ", "READ", "SCHEMA"]"#).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn views_only_expose_read_and_schema() {
        let set: PermissionSet = [Create, Read, Update, Delete, Schema].into_iter().collect();
        let restricted = set.restrict(EntityKind::View);

        assert_eq!(
            restricted.iter().collect::<Vec<_>>(),
            vec![Read, Schema]
        );
        assert_eq!(set.restrict(EntityKind::Table), set);
    }

    #[test]
    fn flag_allowed_for_kind() {
        assert!(Create.allowed_for(EntityKind::Table));
        assert!(!Create.allowed_for(EntityKind::View));
        assert!(Read.allowed_for(EntityKind::View));
        assert!(Schema.allowed_for(EntityKind::View));
    }
}
