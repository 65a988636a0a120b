//! The persisted config document
//!
//! [`ConfigDocument`] is an immutable value: every mutation returns a new
//! instance and the caller's reference stays valid and unmodified. The
//! collections are persistent vectors, so "copying" a document is structural
//! sharing rather than a deep clone.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::job::SystemJobSpec;
use crate::record_api::RecordApiConfig;

/// Persisted aggregate holding system-job overrides and record-API configs.
///
/// Owned externally by the config store; this model only produces new
/// copies. The backend replaces the whole document atomically on write, so
/// editing one section must pass every other section through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigDocument {
    /// Explicit overrides for scheduled system jobs.
    pub system_jobs: Vector<SystemJobSpec>,

    /// Record-API exposure rules.
    pub record_apis: Vector<RecordApiConfig>,
}

impl ConfigDocument {
    /// Empty document.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the system-jobs section, returning a new document.
    #[must_use]
    pub fn with_system_jobs(&self, jobs: impl IntoIterator<Item = SystemJobSpec>) -> Self {
        let mut next = self.clone();
        next.system_jobs = jobs.into_iter().collect();
        next
    }

    /// Insert or replace a record-API config, returning a new document.
    ///
    /// Scans for an entry with the same `name`: replaces it in place when
    /// found, appends otherwise. Document length never grows on replace.
    #[must_use]
    pub fn upsert_record_api(&self, api: RecordApiConfig) -> Self {
        let mut next = self.clone();
        match next.record_apis.iter().position(|a| a.name == api.name) {
            Some(index) => next.record_apis = next.record_apis.update(index, api),
            None => next.record_apis.push_back(api),
        }
        next
    }

    /// Remove every record-API config backed by `table_name`.
    ///
    /// Deliberately removes all matches rather than the first: a table may
    /// have accumulated duplicate configs (see
    /// [`find_record_api`](Self::find_record_api)) and removal must not
    /// leave an orphan behind.
    #[must_use]
    pub fn remove_record_apis(&self, table_name: &str) -> Self {
        let mut next = self.clone();
        next.record_apis.retain(|api| api.table_name != table_name);
        next
    }

    /// All record-API configs backed by `table_name`.
    pub fn record_apis_for_table<'a, 'b>(
        &'a self,
        table_name: &'b str,
    ) -> impl Iterator<Item = &'a RecordApiConfig> + use<'a, 'b> {
        self.record_apis
            .iter()
            .filter(move |api| api.table_name == table_name)
    }

    /// Whether any record API is backed by `table_name`.
    #[must_use]
    pub fn has_record_apis(&self, table_name: &str) -> bool {
        self.record_apis_for_table(table_name).next().is_some()
    }

    /// First record-API config backed by `table_name`.
    ///
    /// Multiple configs per table are a known limitation, not an error: the
    /// first match is picked deterministically and a warning is logged.
    #[must_use]
    pub fn find_record_api(&self, table_name: &str) -> Option<&RecordApiConfig> {
        let mut matches = self.record_apis_for_table(table_name);
        let first = matches.next()?;
        if matches.next().is_some() {
            tracing::warn!(
                table_name,
                "multiple record API configs for one table; picking the first"
            );
        }
        Some(first)
    }
}
