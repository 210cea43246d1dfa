use super::*;

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::collections::{HashMap, HashSet};

fn validate_map(m: &IntLongMap) {
    let capacity = m.capacity();
    assert_eq!(m.slots.keys.len(), capacity);
    assert_eq!(m.slots.values.len(), capacity);

    let occupied = m.slots.keys.iter().filter(|k| k.is_some()).count();
    assert_eq!(occupied, m.size(), "size must match occupied slot count");

    assert!(m.size() <= capacity, "size {} exceeds capacity {capacity}", m.size());

    let mut seen = HashSet::new();
    for (idx, key) in m.slots.keys.iter().enumerate() {
        let Some(key) = *key else {
            assert_eq!(m.slots.values[idx], None, "empty slot {idx} holds a value");
            continue;
        };
        assert!(seen.insert(key), "duplicate key {key}");

        let mut i = m.slots.hash(key);
        while i != idx {
            assert!(
                m.slots.keys[i].is_some(),
                "hole at slot {i} on probe chain of key {key}"
            );
            i = (i + 1) % capacity;
        }
    }
}

fn key_strategy() -> impl Strategy<Value = Option<i32>> {
    // Mostly a narrow range so that updates and collisions are common.
    prop_oneof![
        1 => Just(None),
        20 => (-64i32..64).prop_map(Some),
        4 => any::<i32>().prop_map(Some),
    ]
}

#[derive(Arbitrary, Clone, Debug)]
enum Op {
    #[proptest(weight = 3)]
    Put(
        #[proptest(strategy = "key_strategy()")] Option<i32>,
        Option<i64>,
    ),
    Get(#[proptest(strategy = "key_strategy()")] Option<i32>),
}

fn config_strategy() -> impl Strategy<Value = Config> {
    let load_factor = prop_oneof![Just(1.0), Just(0.5), 0.05f64..=1.0];
    (1usize..=32, load_factor)
        .prop_map(|(capacity, load_factor)| Config::new().capacity(capacity).load_factor(load_factor))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(config in config_strategy(), ops in prop::collection::vec(any::<Op>(), 0..=2000)) {
        let mut t = config.build().unwrap();
        let mut m: HashMap<i32, Option<i64>> = HashMap::new();

        for op in ops {
            match op {
                Op::Put(None, value) => {
                    let capacity = t.capacity();
                    prop_assert_eq!(t.put(None, value), Err(Error::NullKey));
                    prop_assert_eq!(t.capacity(), capacity);
                }
                Op::Put(Some(key), value) => {
                    let old_t = t.put(key, value).unwrap();
                    let old_m = m.insert(key, value).flatten();
                    prop_assert_eq!(old_t, old_m);
                }
                Op::Get(None) => {
                    prop_assert_eq!(t.get(None), Err(Error::NullKey));
                }
                Op::Get(Some(key)) => {
                    let got_t = t.get(key).unwrap();
                    let got_m = m.get(&key).copied().flatten();
                    prop_assert_eq!(got_t, got_m);
                }
            }

            prop_assert_eq!(t.size(), m.len());
        }

        validate_map(&t);
        for (key, value) in &m {
            prop_assert_eq!(t.get(*key).unwrap(), *value);
        }
    }

    #[test]
    fn prop_construct_valid(config in config_strategy()) {
        let t = config.build().unwrap();
        prop_assert_eq!(t.size(), 0);
        prop_assert_eq!(t.capacity(), config.capacity);
        validate_map(&t);
    }

    #[test]
    fn prop_growth_distinct_keys(config in config_strategy(), keys in prop::collection::hash_set(any::<i32>(), 0..=500)) {
        let mut t = config.build().unwrap();
        let initial = t.capacity();

        for (i, key) in keys.iter().enumerate() {
            prop_assert_eq!(t.put(*key, i as i64).unwrap(), None);
        }

        prop_assert_eq!(t.size(), keys.len());
        prop_assert!(t.capacity() >= initial);
        prop_assert_eq!(t.capacity() % initial, 0);
        prop_assert!((t.capacity() / initial).is_power_of_two());
        validate_map(&t);

        for (i, key) in keys.iter().enumerate() {
            prop_assert_eq!(t.get(*key).unwrap(), Some(i as i64));
        }
    }

    #[test]
    fn prop_miss_on_fresh_map(config in config_strategy(), key in any::<i32>()) {
        let t = config.build().unwrap();
        prop_assert_eq!(t.get(key).unwrap(), None);
    }
}

#[test]
fn exhaustive_colliding_insert_order() {
    // All keys share home slot 0 at capacity 8, so each insertion order
    // builds a different chain.
    let keys = [0, 8, 16, 24, 32, 40];

    fn for_each_permutation(items: &mut [i32], k: usize, f: &mut impl FnMut(&[i32])) {
        if k == items.len() {
            f(&*items);
            return;
        }
        for i in k..items.len() {
            items.swap(k, i);
            for_each_permutation(items, k + 1, f);
            items.swap(k, i);
        }
    }

    let mut items = keys;
    for_each_permutation(&mut items, 0, &mut |perm: &[i32]| {
        let mut t = IntLongMap::with_capacity_and_load_factor(8, 1.0).unwrap();
        for (i, k) in perm.iter().enumerate() {
            assert_eq!(t.put(*k, i as i64).unwrap(), None);
        }
        validate_map(&t);
        for (i, k) in perm.iter().enumerate() {
            assert_eq!(t.get(*k).unwrap(), Some(i as i64));
        }
        assert_eq!(t.get(48).unwrap(), None);
    });
}
