//! Merge and extraction
//!
//! [`merge`] joins a persisted collection with a live snapshot into proxies;
//! [`extract`] is its inverse, producing the collection to persist.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::proxy::Proxy;
use crate::traits::{EditEq, Keyed, LiveState};

/// Merge a persisted collection with a live-observed collection.
///
/// Produces exactly one proxy per distinct key appearing in either source,
/// ordered ascending by key:
///
/// - a key present in `persisted` yields an explicit proxy
///   (`is_default == false`), regardless of whether live state exists
/// - a key present only in `live` yields a defaulted proxy synthesized via
///   [`LiveState::to_default_spec`]
/// - live state is attached to the proxy whenever reported; persisted
///   entries the live source no longer knows about keep `live == None`
///
/// Output ordering matters only for display; extraction is per-entry and
/// order-independent.
#[must_use]
pub fn merge<L>(persisted: Vec<L::Spec>, live: Vec<L>) -> Vec<Proxy<L::Spec, L>>
where
    L: LiveState,
{
    let mut by_key: BTreeMap<<L::Spec as Keyed>::Key, Proxy<L::Spec, L>> = BTreeMap::new();

    for spec in persisted {
        by_key.insert(spec.key(), Proxy::explicit(spec));
    }

    for state in live {
        let entry = match by_key.entry(state.key()) {
            Entry::Occupied(occupied) => occupied.into_mut(),
            Entry::Vacant(vacant) => vacant.insert(Proxy::synthesized(state.to_default_spec())),
        };
        entry.attach_live(state);
    }

    by_key.into_values().collect()
}

/// Compute the collection that should be persisted.
///
/// Includes `current` for every proxy that was already explicit, plus every
/// defaulted proxy the user touched (promotion). Untouched defaults are
/// dropped so the persisted document never balloons with entries the live
/// source happens to report.
#[must_use]
pub fn extract<S, L>(proxies: &[Proxy<S, L>]) -> Vec<S>
where
    S: EditEq + Clone,
{
    proxies
        .iter()
        .filter(|proxy| proxy.should_persist())
        .map(|proxy| proxy.current().clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct TestSpec {
        id: i64,
        schedule: String,
        disabled: bool,
    }

    impl Keyed for TestSpec {
        type Key = i64;

        fn key(&self) -> i64 {
            self.id
        }
    }

    impl EditEq for TestSpec {
        fn edit_eq(&self, other: &Self) -> bool {
            self.id == other.id
                && self.schedule == other.schedule
                && self.disabled == other.disabled
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct TestLive {
        id: i64,
        schedule: String,
        enabled: bool,
    }

    impl LiveState for TestLive {
        type Spec = TestSpec;

        fn key(&self) -> i64 {
            self.id
        }

        fn to_default_spec(&self) -> TestSpec {
            TestSpec {
                id: self.id,
                schedule: self.schedule.clone(),
                disabled: !self.enabled,
            }
        }
    }

    fn spec(id: i64, schedule: &str) -> TestSpec {
        TestSpec {
            id,
            schedule: schedule.to_string(),
            disabled: false,
        }
    }

    fn live(id: i64, schedule: &str) -> TestLive {
        TestLive {
            id,
            schedule: schedule.to_string(),
            enabled: true,
        }
    }

    #[test]
    fn merge_one_proxy_per_distinct_key() {
        let proxies = merge(
            vec![spec(1, "@daily"), spec(3, "@hourly")],
            vec![live(1, "@daily"), live(2, "@weekly")],
        );

        let keys: Vec<i64> = proxies.iter().map(|p| p.current().id).collect();
        assert_eq!(keys, vec![1, 2, 3]);
    }

    #[test]
    fn merge_tags_provenance() {
        let proxies = merge(vec![spec(1, "@daily")], vec![live(1, "@daily"), live(2, "@weekly")]);

        assert!(!proxies[0].is_default());
        assert!(proxies[1].is_default());
    }

    #[test]
    fn merge_attaches_live_to_explicit_entries() {
        let proxies = merge(vec![spec(1, "@daily")], vec![live(1, "0 0 * * * *")]);

        assert_eq!(proxies[0].live(), Some(&live(1, "0 0 * * * *")));
        // The persisted spec wins over the live schedule.
        assert_eq!(proxies[0].current().schedule, "@daily");
    }

    #[test]
    fn merge_retains_stale_persisted_entries() {
        let proxies = merge(vec![spec(9, "@daily")], vec![live(1, "@hourly")]);

        let stale = proxies.iter().find(|p| p.current().id == 9).unwrap();
        assert!(!stale.is_default());
        assert!(stale.live().is_none());
    }

    #[test]
    fn merge_default_spec_inverts_enabled() {
        let mut observed = live(2, "@weekly");
        observed.enabled = false;

        let proxies = merge(vec![], vec![observed]);
        assert!(proxies[0].current().disabled);
    }

    #[test]
    fn extract_drops_untouched_defaults() {
        let proxies = merge(vec![spec(1, "@daily")], vec![live(1, "@daily"), live(2, "@weekly")]);

        let extracted = extract(&proxies);
        assert_eq!(extracted, vec![spec(1, "@daily")]);
    }

    #[test]
    fn extract_promotes_touched_defaults() {
        let mut proxies = merge(vec![], vec![live(2, "@weekly")]);
        proxies[0].current_mut().disabled = true;

        let extracted = extract(&proxies);
        assert_eq!(extracted.len(), 1);
        assert_eq!(extracted[0].id, 2);
        assert!(extracted[0].disabled);
    }

    #[test]
    fn extract_keeps_reverted_explicit_entries() {
        let mut proxies = merge::<TestLive>(vec![spec(1, "@daily")], vec![]);
        proxies[0].current_mut().disabled = true;
        proxies[0].current_mut().disabled = false;

        assert_eq!(extract(&proxies), vec![spec(1, "@daily")]);
    }

    #[test]
    fn merge_extract_round_trip_is_idempotent() {
        let persisted = vec![spec(1, "@daily"), spec(4, "@monthly")];
        let snapshot = vec![live(1, "@daily"), live(2, "@weekly"), live(4, "@monthly")];

        let first = extract(&merge(persisted, snapshot.clone()));
        let second = extract(&merge(first.clone(), snapshot));
        assert_eq!(first, second);
    }
}
