//! Editable proxy entries with provenance
//!
//! Provides [`Proxy`], the in-memory wrapper joining a persisted spec, its
//! pre-edit snapshot, and optional live status for one entity.

use crate::traits::EditEq;

/// One editable entry produced by the merge.
///
/// # Invariants
/// - `is_default == true` iff no persisted spec with this key existed at
///   merge time (the spec was synthesized purely from live state)
/// - `initial` is an immutable snapshot taken at merge time; only `current`
///   is ever mutated
///
/// A proxy lives for exactly one edit session: created by
/// [`merge`](crate::merge), mutated through [`current_mut`](Self::current_mut),
/// and discarded once the session is committed via
/// [`extract`](crate::extract) or abandoned.
#[derive(Debug, Clone, PartialEq)]
pub struct Proxy<S, L> {
    is_default: bool,
    initial: S,
    current: S,
    live: Option<L>,
}

impl<S: Clone, L> Proxy<S, L> {
    /// Create a proxy for a spec that was present in the persisted document.
    #[inline]
    #[must_use]
    pub fn explicit(spec: S) -> Self {
        Self {
            is_default: false,
            initial: spec.clone(),
            current: spec,
            live: None,
        }
    }

    /// Create a proxy synthesized purely from live state.
    #[inline]
    #[must_use]
    pub fn synthesized(default_spec: S) -> Self {
        Self {
            is_default: true,
            initial: default_spec.clone(),
            current: default_spec,
            live: None,
        }
    }
}

impl<S, L> Proxy<S, L> {
    /// Whether this entry was absent from the persisted document at merge time.
    #[inline]
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.is_default
    }

    /// Pre-edit snapshot, used only for equality comparison.
    #[inline]
    #[must_use]
    pub fn initial(&self) -> &S {
        &self.initial
    }

    /// The spec as currently edited.
    #[inline]
    #[must_use]
    pub fn current(&self) -> &S {
        &self.current
    }

    /// Mutable access for the edit session.
    #[inline]
    pub fn current_mut(&mut self) -> &mut S {
        &mut self.current
    }

    /// Live runtime state, if the external system reported any.
    ///
    /// `None` for stale persisted entries whose entity the live source no
    /// longer knows about; such entries remain editable without telemetry.
    #[inline]
    #[must_use]
    pub fn live(&self) -> Option<&L> {
        self.live.as_ref()
    }

    /// Attach a live observation. Called once, during the merge.
    #[inline]
    pub fn attach_live(&mut self, live: L) {
        self.live = Some(live);
    }
}

impl<S: EditEq, L> Proxy<S, L> {
    /// Whether the user has diverged from the pre-edit snapshot.
    #[inline]
    #[must_use]
    pub fn is_modified(&self) -> bool {
        !self.initial.edit_eq(&self.current)
    }

    /// Whether extraction must include this entry.
    ///
    /// Explicit entries are always re-persisted, even when reverted to equal
    /// their initial value, to preserve explicit authorship. Defaulted
    /// entries are included only once touched.
    #[inline]
    #[must_use]
    pub fn should_persist(&self) -> bool {
        !self.is_default || self.is_modified()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct TestSpec {
        id: i64,
        enabled: bool,
    }

    impl EditEq for TestSpec {
        fn edit_eq(&self, other: &Self) -> bool {
            self.id == other.id && self.enabled == other.enabled
        }
    }

    fn spec(id: i64) -> TestSpec {
        TestSpec { id, enabled: true }
    }

    #[test]
    fn explicit_proxy_is_not_default() {
        let proxy: Proxy<TestSpec, ()> = Proxy::explicit(spec(1));
        assert!(!proxy.is_default());
        assert_eq!(proxy.initial(), proxy.current());
        assert!(proxy.live().is_none());
    }

    #[test]
    fn synthesized_proxy_is_default() {
        let proxy: Proxy<TestSpec, ()> = Proxy::synthesized(spec(1));
        assert!(proxy.is_default());
        assert_eq!(proxy.initial(), proxy.current());
    }

    #[test]
    fn edit_marks_modified() {
        let mut proxy: Proxy<TestSpec, ()> = Proxy::synthesized(spec(1));
        assert!(!proxy.is_modified());

        proxy.current_mut().enabled = false;
        assert!(proxy.is_modified());
        assert!(proxy.should_persist());
    }

    #[test]
    fn revert_clears_modified() {
        let mut proxy: Proxy<TestSpec, ()> = Proxy::synthesized(spec(1));
        proxy.current_mut().enabled = false;
        proxy.current_mut().enabled = true;
        assert!(!proxy.is_modified());
        assert!(!proxy.should_persist());
    }

    #[test]
    fn explicit_persists_even_when_unmodified() {
        let proxy: Proxy<TestSpec, ()> = Proxy::explicit(spec(1));
        assert!(!proxy.is_modified());
        assert!(proxy.should_persist());
    }

    #[test]
    fn attach_live_exposes_state() {
        let mut proxy: Proxy<TestSpec, u32> = Proxy::explicit(spec(1));
        proxy.attach_live(7);
        assert_eq!(proxy.live(), Some(&7));
    }
}
