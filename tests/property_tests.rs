// CacheTable property tests.
//
// Property 1: construction and capacity law for any valid dimensions.
// Property 2: model check against a per-bucket FIFO reference.
//  - Model: one Vec per bucket of (key, value, insertion sequence).
//  - set on a present key replaces the value only; on an absent key it
//    appends, or replaces the entry with the lowest sequence when full.
//  - Invariant after every step: len matches, every pool key reads back
//    exactly as the model says, len <= capacity, load == len / capacity.
// Property 3: an 8-bit clock (which compacts constantly) is observably
//   identical to a 64-bit clock over the same operations.
use proptest::prelude::*;

use cachetable::hash::bucket_index;
use cachetable::CacheTable;

#[derive(Debug, Clone)]
enum Op {
    Set(usize, i32),
    Get(usize),
    Delete(usize),
}

fn op_strategy(pool: usize) -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..pool, any::<i32>()).prop_map(|(k, v)| Op::Set(k, v)),
        1 => (0..pool).prop_map(Op::Get),
        1 => (0..pool).prop_map(Op::Delete),
    ]
}

fn key(k: usize) -> String {
    format!("key{}", k)
}

struct Model {
    buckets: Vec<Vec<(String, i32, u64)>>,
    bucket_capacity: usize,
    seq: u64,
}

impl Model {
    fn new(bucket_count: usize, bucket_capacity: usize) -> Self {
        Self {
            buckets: vec![Vec::new(); bucket_count],
            bucket_capacity,
            seq: 0,
        }
    }

    fn chain(&mut self, key: &str) -> &mut Vec<(String, i32, u64)> {
        let index = bucket_index(key, self.buckets.len());
        &mut self.buckets[index]
    }

    fn set(&mut self, key: &str, value: i32) {
        let seq = self.seq;
        let bucket_capacity = self.bucket_capacity;
        let chain = self.chain(key);
        if let Some(entry) = chain.iter_mut().find(|e| e.0 == key) {
            entry.1 = value;
            return;
        }
        if chain.len() == bucket_capacity {
            let oldest = (0..chain.len()).min_by_key(|&i| chain[i].2).unwrap();
            chain.remove(oldest);
        }
        chain.push((key.to_string(), value, seq));
        self.seq += 1;
    }

    fn get(&mut self, key: &str) -> Option<i32> {
        self.chain(key).iter().find(|e| e.0 == key).map(|e| e.1)
    }

    fn delete(&mut self, key: &str) -> Option<i32> {
        let chain = self.chain(key);
        let pos = chain.iter().position(|e| e.0 == key)?;
        Some(chain.remove(pos).1)
    }

    fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }
}

// Property 1: capacity law.
proptest! {
    #[test]
    fn prop_capacity_is_product(buckets in 1usize..64, slots in 1usize..64, preallocate in any::<bool>()) {
        let table: CacheTable<u8> = CacheTable::new(buckets, slots, preallocate).unwrap();
        prop_assert_eq!(table.capacity(), buckets * slots);
        prop_assert_eq!(table.len(), 0);
    }

    #[test]
    fn prop_zero_dimension_fails(n in 0usize..64, zero_buckets in any::<bool>()) {
        let result = if zero_buckets {
            CacheTable::<u8>::new(0, n, true)
        } else {
            CacheTable::<u8>::new(n, 0, false)
        };
        prop_assert!(result.unwrap_err().is_construction());
    }
}

// Property 2: model check.
proptest! {
    #[test]
    fn prop_matches_fifo_model(
        buckets in 1usize..=4,
        slots in 1usize..=4,
        preallocate in any::<bool>(),
        ops in proptest::collection::vec(op_strategy(24), 1..300),
    ) {
        let mut table: CacheTable<i32> = CacheTable::new(buckets, slots, preallocate).unwrap();
        let mut model = Model::new(buckets, slots);

        for op in ops {
            match op {
                Op::Set(k, v) => {
                    let key = key(k);
                    let before = table.len();
                    let existed = table.contains_key(&key);
                    prop_assert!(table.set(&key, v));
                    model.set(&key, v);
                    if existed {
                        prop_assert_eq!(table.len(), before);
                    }
                }
                Op::Get(k) => {
                    let key = key(k);
                    prop_assert_eq!(table.get(&key).map(|e| *e.value()), model.get(&key));
                }
                Op::Delete(k) => {
                    let key = key(k);
                    let before = table.len();
                    let removed = table.delete(&key).map(|e| e.into_value());
                    let expected = model.delete(&key);
                    prop_assert_eq!(removed, expected);
                    if expected.is_none() {
                        prop_assert_eq!(table.len(), before);
                    }
                    prop_assert!(table.get(&key).is_none());
                }
            }

            prop_assert_eq!(table.len(), model.len());
            prop_assert!(table.len() <= table.capacity());
            prop_assert_eq!(table.load(), table.len() as f64 / table.capacity() as f64);
            prop_assert_eq!(table.iter().count(), table.len());
        }

        for k in 0..24 {
            let key = key(k);
            prop_assert_eq!(table.get(&key).map(|e| *e.value()), model.get(&key));
        }
    }
}

// Property 3: clock width is unobservable.
proptest! {
    #[test]
    fn prop_narrow_clock_equivalent(
        buckets in 1usize..=4,
        slots in 1usize..=4,
        ops in proptest::collection::vec(op_strategy(32), 1..600),
    ) {
        let mut narrow: CacheTable<i32, u8> = CacheTable::with_timestamp(buckets, slots, true).unwrap();
        let mut wide: CacheTable<i32, u64> = CacheTable::new(buckets, slots, false).unwrap();

        for op in ops {
            match op {
                Op::Set(k, v) => {
                    narrow.set(&key(k), v);
                    wide.set(&key(k), v);
                }
                Op::Get(k) => {
                    prop_assert_eq!(
                        narrow.get(&key(k)).map(|e| *e.value()),
                        wide.get(&key(k)).map(|e| *e.value())
                    );
                }
                Op::Delete(k) => {
                    prop_assert_eq!(
                        narrow.delete(&key(k)).map(|e| e.into_value()),
                        wide.delete(&key(k)).map(|e| e.into_value())
                    );
                }
            }
            prop_assert_eq!(narrow.len(), wide.len());
            prop_assert!(narrow.clock() < 128);
        }
    }
}
