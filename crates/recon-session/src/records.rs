//! Record-API edit sessions
//!
//! A [`RecordApiSession`] owns the loaded base document and performs
//! copy-on-write upserts and removals against it. Field edits happen on a
//! [`RecordApiDraft`], which enforces the entity-kind permission restriction
//! and is vetted against the injected SQL validator before any write.

use recon_model::{ConfigDocument, EntityKind, PermissionFlag, RecordAction, RecordApiConfig};

use crate::client::{ConfigStore, SqlPredicateValidator};
use crate::error::SessionError;

/// Wire name of the access-rule slot for an action.
fn rule_field(action: RecordAction) -> &'static str {
    match action {
        RecordAction::Create => "createAccessRule",
        RecordAction::Read => "readAccessRule",
        RecordAction::Update => "updateAccessRule",
        RecordAction::Delete => "deleteAccessRule",
        RecordAction::Schema => "schemaAccessRule",
    }
}

/// Editable draft of one record-API config.
///
/// Opened from an existing config (first match for the table) or freshly
/// defaulted when the table is not yet exposed.
#[derive(Debug, Clone)]
pub struct RecordApiDraft {
    kind: EntityKind,
    exists: bool,
    config: RecordApiConfig,
}

impl RecordApiDraft {
    fn new(kind: EntityKind, table_name: &str, existing: Option<RecordApiConfig>) -> Self {
        let exists = existing.is_some();
        let config = existing.unwrap_or_else(|| RecordApiConfig::new_for_table(table_name));
        Self {
            kind,
            exists,
            config,
        }
    }

    /// Entity kind the backing table/view has.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Whether the table already had a config when the draft was opened.
    #[inline]
    #[must_use]
    pub fn exists(&self) -> bool {
        self.exists
    }

    /// Current draft state.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &RecordApiConfig {
        &self.config
    }

    /// Rename the API.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.config.name = name.into();
    }

    /// Toggle a flag in the World ACL.
    pub fn toggle_world(
        &mut self,
        flag: PermissionFlag,
        enabled: bool,
    ) -> Result<(), SessionError> {
        self.check_flag(flag, "aclWorld")?;
        self.config.acl_world = self.config.acl_world.toggle(flag, enabled);
        Ok(())
    }

    /// Toggle a flag in the Authenticated ACL.
    pub fn toggle_authenticated(
        &mut self,
        flag: PermissionFlag,
        enabled: bool,
    ) -> Result<(), SessionError> {
        self.check_flag(flag, "aclAuthenticated")?;
        self.config.acl_authenticated = self.config.acl_authenticated.toggle(flag, enabled);
        Ok(())
    }

    /// Set or clear an access rule. The SQL itself is vetted at submit time.
    pub fn set_access_rule(
        &mut self,
        action: RecordAction,
        rule: Option<String>,
    ) -> Result<(), SessionError> {
        if !RecordAction::applicable_to(self.kind).contains(&action) {
            return Err(SessionError::validation(
                rule_field(action),
                format!("action {action:?} is not applicable to a {:?}", self.kind),
            ));
        }
        self.config.set_access_rule(action, rule);
        Ok(())
    }

    /// Set the conflict resolution strategy (`None` = backend default).
    pub fn set_conflict_resolution(
        &mut self,
        strategy: Option<recon_model::ConflictResolutionStrategy>,
    ) {
        self.config.conflict_resolution = strategy;
    }

    fn check_flag(&self, flag: PermissionFlag, field: &'static str) -> Result<(), SessionError> {
        if flag.allowed_for(self.kind) {
            Ok(())
        } else {
            Err(SessionError::validation(
                field,
                format!("{flag:?} cannot be granted on a {:?}", self.kind),
            ))
        }
    }

    /// Vet the whole draft; write-back is blocked until this passes.
    pub fn validate<V>(&self, sql: &V) -> Result<(), SessionError>
    where
        V: SqlPredicateValidator + ?Sized,
    {
        if self.config.name.trim().is_empty() {
            return Err(SessionError::validation("name", "API name missing"));
        }

        // Configs loaded from the document may predate the view restriction.
        let world = self.config.acl_world.restrict(self.kind);
        if world != self.config.acl_world {
            return Err(SessionError::validation(
                "aclWorld",
                "grants actions not available on this entity kind",
            ));
        }
        let authenticated = self.config.acl_authenticated.restrict(self.kind);
        if authenticated != self.config.acl_authenticated {
            return Err(SessionError::validation(
                "aclAuthenticated",
                "grants actions not available on this entity kind",
            ));
        }

        for (action, rule) in self.config.access_rules() {
            sql.validate(rule)
                .map_err(|reason| SessionError::validation(rule_field(action), reason))?;
        }

        Ok(())
    }
}

/// Edit session for record-API configs of one backend.
///
/// Operations require a loaded base document; without one there is nothing
/// to copy-on-write from, so they fail with
/// [`SessionError::MissingBaseDocument`] before mutating anything.
#[derive(Debug)]
pub struct RecordApiSession<S, V> {
    store: S,
    sql: V,
    base: Option<ConfigDocument>,
}

impl<S, V> RecordApiSession<S, V>
where
    S: ConfigStore,
    V: SqlPredicateValidator,
{
    /// New session with no document loaded yet.
    #[must_use]
    pub fn new(store: S, sql: V) -> Self {
        Self {
            store,
            sql,
            base: None,
        }
    }

    /// Fetch the base document from the store.
    pub async fn load(&mut self) -> Result<&ConfigDocument, SessionError> {
        let document = self.store.fetch().await?;
        Ok(self.base.insert(document))
    }

    /// The loaded base document, if any.
    #[inline]
    #[must_use]
    pub fn base(&self) -> Option<&ConfigDocument> {
        self.base.as_ref()
    }

    fn require_base(&self) -> Result<&ConfigDocument, SessionError> {
        self.base.as_ref().ok_or(SessionError::MissingBaseDocument)
    }

    /// Open a draft for the given table: the first matching config when one
    /// exists (multiplicity beyond one is logged, not an error), or a fresh
    /// default otherwise.
    pub fn draft_for(
        &self,
        kind: EntityKind,
        table_name: &str,
    ) -> Result<RecordApiDraft, SessionError> {
        let base = self.require_base()?;
        let existing = base.find_record_api(table_name).cloned();
        Ok(RecordApiDraft::new(kind, table_name, existing))
    }

    /// Validate the draft, upsert it into the base document, and write the
    /// result. The new document becomes the session's base on success; on
    /// failure the previous base and the draft are preserved.
    pub async fn submit(&mut self, draft: &RecordApiDraft) -> Result<(), SessionError> {
        let base = self.require_base()?;
        draft.validate(&self.sql)?;

        let next = base.upsert_record_api(draft.config().clone());
        self.store.store(&next).await?;
        tracing::debug!(api = %draft.config().name, "record API config submitted");
        self.base = Some(next);
        Ok(())
    }

    /// Remove every config backed by `table_name` and write the result.
    pub async fn disable(&mut self, table_name: &str) -> Result<(), SessionError> {
        let base = self.require_base()?;

        let next = base.remove_record_apis(table_name);
        self.store.store(&next).await?;
        tracing::debug!(table_name, "record API configs removed");
        self.base = Some(next);
        Ok(())
    }
}
