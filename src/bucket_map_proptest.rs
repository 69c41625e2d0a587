#![cfg(test)]

// Property tests for BucketMap kept inside the crate so they can check the
// bucket layout directly.

use crate::hash::bucket_index;
use crate::BucketMap;
use hashbrown::HashMap;
use proptest::prelude::*;
use std::collections::BTreeSet;

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Set(usize, i32),
    Get(usize),
    Has(String),
    Remove(usize),
    Mutate(usize, i32),
    Clear,
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=24).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let has_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            6 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Set(i, v)),
            2 => idx.clone().prop_map(OpI::Get),
            2 => prop_oneof![has_pool.prop_map(|s: String| s), "[a-z]{0,5}".prop_map(|s| s)]
                .prop_map(OpI::Has),
            2 => idx.clone().prop_map(OpI::Remove),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => Just(OpI::Clear),
            1 => Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Load factors start at 1/buckets, the smallest ceiling the config accepts.
fn arb_config() -> impl Strategy<Value = (usize, f64)> {
    (1usize..=8).prop_flat_map(|buckets| {
        let floor = 1.0 / buckets as f64;
        let lf = prop_oneof![Just(1.0), Just(floor), floor..=1.0];
        (Just(buckets), lf)
    })
}

// Property: State-machine equivalence against hashbrown::HashMap.
// Invariants exercised across random operation sequences:
// - `set` overwrites existing keys in place and reports the old value.
// - `get`/`has` parity with the model; `remove` succeeds iff the key is live.
// - `len` parity and load factor at or under the ceiling after each op.
// - Bucket count only ever doubles from its initial value, never shrinks.
// - Enumeration yields each live key exactly once, in layout order.
proptest! {
    #![proptest_config(ProptestConfig { cases: 96, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine(((buckets, lf), (pool, ops)) in (arb_config(), arb_scenario())) {
        let mut sut: BucketMap<i32> = BucketMap::with_buckets(buckets, lf).unwrap();
        let mut model: HashMap<String, i32> = HashMap::new();
        let mut last_count = sut.bucket_count();

        for op in ops {
            match op {
                OpI::Set(i, v) => {
                    let k = &pool[i];
                    let prev = sut.set(k.as_str(), v);
                    prop_assert_eq!(prev, model.insert(k.clone(), v));
                }
                OpI::Get(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.get(k), model.get(k));
                }
                OpI::Has(k) => {
                    prop_assert_eq!(sut.has(&k), model.contains_key(&k));
                }
                OpI::Remove(i) => {
                    let k = &pool[i];
                    let expected = model.remove(k).is_some();
                    prop_assert_eq!(sut.remove(k), expected);
                    prop_assert!(!sut.has(k));
                }
                OpI::Mutate(i, d) => {
                    let k = &pool[i];
                    match (sut.get_mut(k), model.get_mut(k)) {
                        (Some(a), Some(b)) => {
                            *a = a.wrapping_add(d);
                            *b = b.wrapping_add(d);
                        }
                        (None, None) => {}
                        (a, b) => prop_assert!(false, "get_mut mismatch: {:?} vs {:?}", a, b),
                    }
                }
                OpI::Clear => {
                    sut.clear();
                    model.clear();
                    prop_assert_eq!(sut.bucket_count(), last_count);
                }
                OpI::Iterate => {
                    let seen: BTreeSet<&str> = sut.keys().collect();
                    let expected: BTreeSet<&str> = model.keys().map(String::as_str).collect();
                    prop_assert_eq!(seen, expected);
                    let mut prev_bucket = 0;
                    for (k, v) in sut.entries() {
                        prop_assert_eq!(Some(v), model.get(k));
                        let b = bucket_index(k, sut.bucket_count());
                        prop_assert!(b >= prev_bucket, "walk went backwards at {:?}", k);
                        prev_bucket = b;
                    }
                }
            }

            let count = sut.bucket_count();
            prop_assert!(count >= last_count, "bucket count shrank");
            prop_assert_eq!(count % buckets, 0);
            prop_assert!((count / buckets).is_power_of_two());
            last_count = count;

            prop_assert_eq!(sut.len(), model.len());
            prop_assert!(sut.load_factor() <= lf, "load {} over {}", sut.load_factor(), lf);
            sut.assert_consistent();
        }
    }
}

// Property: Inserting N distinct keys keeps every one retrievable with its
// last value, whatever the initial shape, and forces growth when N is large.
proptest! {
    #![proptest_config(ProptestConfig { cases: 32, .. ProptestConfig::default() })]
    #[test]
    fn prop_resize_preserves_data(
        (buckets, lf) in arb_config(),
        keys in proptest::collection::btree_set("[a-zA-Z0-9]{1,8}", 40..200),
    ) {
        let mut m = BucketMap::with_buckets(buckets, lf).unwrap();
        let start = m.bucket_count();
        for (i, k) in keys.iter().enumerate() {
            m.set(k.as_str(), i);
        }
        for (i, k) in keys.iter().enumerate() {
            m.set(k.as_str(), i * 2);
        }
        prop_assert_eq!(m.len(), keys.len());
        prop_assert!(m.bucket_count() >= start * 4, "expected at least two doublings");
        for (i, k) in keys.iter().enumerate() {
            prop_assert_eq!(m.get(k), Some(&(i * 2)));
        }
        m.assert_consistent();
    }
}

// Property: Enumeration is stable between calls with no mutation in between.
proptest! {
    #[test]
    fn prop_enumeration_is_repeatable(keys in proptest::collection::vec("[a-z]{0,4}", 0..60)) {
        let m: BucketMap<usize> = keys.iter().cloned().zip(0..).collect();
        let a: Vec<(&str, &usize)> = m.entries().collect();
        let b: Vec<(&str, &usize)> = m.entries().collect();
        prop_assert_eq!(&a, &b);
        let ks: Vec<&str> = m.keys().collect();
        prop_assert_eq!(ks, a.iter().map(|(k, _)| *k).collect::<Vec<_>>());
    }
}
