//! Record-API exposure rules
//!
//! A [`RecordApiConfig`] exposes one table or view through the record API,
//! keyed by a human-chosen `name` with the backing `table_name` as a
//! secondary lookup key. Coarse access is granted through permission-flag
//! sets; finer access through named SQL boolean predicates per action.

use std::fmt;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::acl::{EntityKind, PermissionSet};

/// SQLite conflict resolution strategy employed on record collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConflictResolutionStrategy {
    /// Abort the statement, keep prior changes.
    Abort,
    /// Roll back the enclosing transaction.
    Rollback,
    /// Fail the statement, keep already-applied row changes.
    Fail,
    /// Skip the conflicting row.
    Ignore,
    /// Replace the conflicting row.
    Replace,
}

impl fmt::Display for ConflictResolutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Abort => "Abort",
            Self::Rollback => "Rollback",
            Self::Fail => "Fail",
            Self::Ignore => "Ignore",
            Self::Replace => "Replace",
        };
        f.write_str(label)
    }
}

/// API action guarded by an access rule slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordAction {
    /// Record creation.
    Create,
    /// Record read/list.
    Read,
    /// Record update.
    Update,
    /// Record deletion.
    Delete,
    /// Schema access.
    Schema,
}

impl RecordAction {
    /// Actions that carry an access-rule slot on the given entity kind.
    #[must_use]
    pub fn applicable_to(kind: EntityKind) -> &'static [RecordAction] {
        match kind {
            EntityKind::Table => &[
                Self::Read,
                Self::Create,
                Self::Update,
                Self::Delete,
                Self::Schema,
            ],
            EntityKind::View => &[Self::Read, Self::Schema],
        }
    }
}

/// Exposure rules for one table or view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordApiConfig {
    /// Public API name; display and uniqueness key.
    pub name: String,

    /// Backing table or view. One table may carry more than one config;
    /// lookups by table pick the first match.
    pub table_name: String,

    /// Flags granted to anyone.
    #[serde(skip_serializing_if = "PermissionSet::is_empty")]
    pub acl_world: PermissionSet,

    /// Flags granted to authenticated users.
    #[serde(skip_serializing_if = "PermissionSet::is_empty")]
    pub acl_authenticated: PermissionSet,

    /// SQL predicate gating record read/list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_access_rule: Option<String>,

    /// SQL predicate gating record creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_access_rule: Option<String>,

    /// SQL predicate gating record updates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_access_rule: Option<String>,

    /// SQL predicate gating record deletion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_access_rule: Option<String>,

    /// SQL predicate gating schema access.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_access_rule: Option<String>,

    /// Conflict resolution strategy; `None` leaves the backend default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflict_resolution: Option<ConflictResolutionStrategy>,

    /// Auto-fill missing user id columns from the caller's auth context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autofill_missing_user_id_columns: Option<bool>,

    /// Allow realtime subscriptions on this API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_subscriptions: Option<bool>,

    /// Foreign-key columns exposable via `?expand=`.
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub expand: BTreeSet<String>,

    /// Columns hidden from the API.
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub excluded_columns: BTreeSet<String>,
}

impl RecordApiConfig {
    /// Fresh config for a table not yet exposed: API name defaults to the
    /// table name, everything else inaccessible.
    #[must_use]
    pub fn new_for_table(table_name: impl Into<String>) -> Self {
        let table_name = table_name.into();
        Self {
            name: table_name.clone(),
            table_name,
            ..Self::default()
        }
    }

    /// Access rule for the given action.
    #[must_use]
    pub fn access_rule(&self, action: RecordAction) -> Option<&str> {
        match action {
            RecordAction::Create => self.create_access_rule.as_deref(),
            RecordAction::Read => self.read_access_rule.as_deref(),
            RecordAction::Update => self.update_access_rule.as_deref(),
            RecordAction::Delete => self.delete_access_rule.as_deref(),
            RecordAction::Schema => self.schema_access_rule.as_deref(),
        }
    }

    /// Set or clear the access rule for the given action.
    pub fn set_access_rule(&mut self, action: RecordAction, rule: Option<String>) {
        let slot = match action {
            RecordAction::Create => &mut self.create_access_rule,
            RecordAction::Read => &mut self.read_access_rule,
            RecordAction::Update => &mut self.update_access_rule,
            RecordAction::Delete => &mut self.delete_access_rule,
            RecordAction::Schema => &mut self.schema_access_rule,
        };
        *slot = rule;
    }

    /// All populated `(action, rule)` pairs.
    pub fn access_rules(&self) -> impl Iterator<Item = (RecordAction, &str)> {
        [
            RecordAction::Read,
            RecordAction::Create,
            RecordAction::Update,
            RecordAction::Delete,
            RecordAction::Schema,
        ]
        .into_iter()
        .filter_map(|action| self.access_rule(action).map(|rule| (action, rule)))
    }
}
