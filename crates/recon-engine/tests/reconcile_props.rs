//! Property tests for the reconciliation algebra.

use std::collections::BTreeSet;

use proptest::prelude::*;
use recon_engine::{extract, merge, EditEq, Keyed, LiveState};

#[derive(Debug, Clone, PartialEq)]
struct Spec {
    id: i64,
    schedule: String,
    disabled: bool,
}

impl Keyed for Spec {
    type Key = i64;

    fn key(&self) -> i64 {
        self.id
    }
}

impl EditEq for Spec {
    fn edit_eq(&self, other: &Self) -> bool {
        self.id == other.id && self.schedule == other.schedule && self.disabled == other.disabled
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Live {
    id: i64,
    schedule: String,
    enabled: bool,
}

impl LiveState for Live {
    type Spec = Spec;

    fn key(&self) -> i64 {
        self.id
    }

    fn to_default_spec(&self) -> Spec {
        Spec {
            id: self.id,
            schedule: self.schedule.clone(),
            disabled: !self.enabled,
        }
    }
}

fn spec_strategy() -> impl Strategy<Value = Spec> {
    (0i64..32, "[a-z@ *]{0,12}", any::<bool>()).prop_map(|(id, schedule, disabled)| Spec {
        id,
        schedule,
        disabled,
    })
}

fn live_strategy() -> impl Strategy<Value = Live> {
    (0i64..32, "[a-z@ *]{0,12}", any::<bool>()).prop_map(|(id, schedule, enabled)| Live {
        id,
        schedule,
        enabled,
    })
}

/// Generated collections are deduplicated by key, matching the inputs the
/// engine actually receives (one config entry / one live report per entity).
fn dedup_specs(specs: Vec<Spec>) -> Vec<Spec> {
    let mut seen = BTreeSet::new();
    specs.into_iter().filter(|s| seen.insert(s.id)).collect()
}

fn dedup_live(live: Vec<Live>) -> Vec<Live> {
    let mut seen = BTreeSet::new();
    live.into_iter().filter(|l| seen.insert(l.id)).collect()
}

proptest! {
    #[test]
    fn merge_completeness(
        persisted in prop::collection::vec(spec_strategy(), 0..16),
        live in prop::collection::vec(live_strategy(), 0..16),
    ) {
        let persisted = dedup_specs(persisted);
        let live = dedup_live(live);

        let expected: BTreeSet<i64> = persisted
            .iter()
            .map(|s| s.id)
            .chain(live.iter().map(|l| l.id))
            .collect();

        let proxies = merge(persisted, live);
        let keys: Vec<i64> = proxies.iter().map(|p| p.current().id).collect();

        // Exactly one proxy per distinct id, ascending.
        prop_assert_eq!(keys.len(), expected.len());
        prop_assert_eq!(keys, expected.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn merge_default_tagging(
        persisted in prop::collection::vec(spec_strategy(), 0..16),
        live in prop::collection::vec(live_strategy(), 0..16),
    ) {
        let persisted = dedup_specs(persisted);
        let live = dedup_live(live);
        let persisted_keys: BTreeSet<i64> = persisted.iter().map(|s| s.id).collect();

        for proxy in merge(persisted, live) {
            prop_assert_eq!(
                proxy.is_default(),
                !persisted_keys.contains(&proxy.current().id)
            );
        }
    }

    #[test]
    fn extraction_minimality(
        persisted in prop::collection::vec(spec_strategy(), 0..16),
        live in prop::collection::vec(live_strategy(), 0..16),
    ) {
        let persisted = dedup_specs(persisted);
        let live = dedup_live(live);

        // No edits anywhere: extraction returns exactly the explicit entries.
        let mut expected = persisted.clone();
        expected.sort_by_key(|s| s.id);

        let extracted = extract(&merge(persisted, live));
        prop_assert_eq!(extracted, expected);
    }

    #[test]
    fn extraction_idempotence(
        persisted in prop::collection::vec(spec_strategy(), 0..16),
        live in prop::collection::vec(live_strategy(), 0..16),
    ) {
        let persisted = dedup_specs(persisted);
        let live = dedup_live(live);

        let first = extract(&merge(persisted, live.clone()));
        let second = extract(&merge(first.clone(), live));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn promotion_includes_flipped_defaults(
        live in prop::collection::vec(live_strategy(), 1..16),
    ) {
        let live = dedup_live(live);
        let flipped = live[0].id;

        let mut proxies = merge(Vec::new(), live);
        for proxy in &mut proxies {
            if proxy.current().id == flipped {
                let disabled = proxy.current().disabled;
                proxy.current_mut().disabled = !disabled;
            }
        }

        let extracted = extract(&proxies);
        prop_assert!(extracted.iter().any(|s| s.id == flipped));
        prop_assert_eq!(extracted.len(), 1);
    }
}
