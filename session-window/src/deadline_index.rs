//! Denormalized index from session end-time to the keys with a window ending
//! there, so a watermark flush can find expiring keys without scanning every key
//! in the operator (SPEC_FULL.md §3 "Deadline index").
//!
//! This is pure bookkeeping: it is never the source of truth for a window's
//! existence, only a secondary lookup maintained alongside every mutation to a
//! [`crate::window_map::WindowMap`]. SPEC_FULL.md §9 is explicit that it must be
//! maintained at mutation sites, not recomputed lazily — doing otherwise would
//! reintroduce the per-key scan this index exists to avoid.

use std::collections::BTreeMap;

use smallvec::SmallVec;

/// Most end-times have exactly one key registered; `SmallVec<[K; 4]>` avoids a
/// heap allocation for that common case while still handling the rare collision
/// where several keys' sessions happen to end at the same instant.
type Bucket<K> = SmallVec<[K; 4]>;

#[derive(Debug, Clone)]
pub struct DeadlineIndex<K> {
    by_end: BTreeMap<i64, Bucket<K>>,
}

impl<K> Default for DeadlineIndex<K> {
    fn default() -> Self {
        DeadlineIndex {
            by_end: BTreeMap::new(),
        }
    }
}

impl<K: PartialEq + Clone> DeadlineIndex<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `key` as having a window ending at `end`.
    pub fn register(&mut self, end: i64, key: &K) {
        let bucket = self.by_end.entry(end).or_default();
        if !bucket.contains(key) {
            bucket.push(key.clone());
        }
    }

    /// Removes `key`'s registration at `end`. Panics if it was not registered —
    /// an invariant violation (SPEC_FULL.md §7, §8 invariant 2).
    pub fn unregister(&mut self, end: i64, key: &K) {
        let empty_after = {
            let bucket = self.by_end.get_mut(&end).unwrap_or_else(|| {
                panic!("deadline_index: no bucket at end {end} to unregister key from")
            });
            let pos = bucket.iter().position(|k| k == key).unwrap_or_else(|| {
                panic!("deadline_index: key not registered at end {end}")
            });
            bucket.swap_remove(pos);
            bucket.is_empty()
        };
        if empty_after {
            self.by_end.remove(&end);
        }
    }

    /// Every distinct end-time strictly below `watermark`, ascending, without
    /// mutating the index. [`Flush`](crate::flush::Flush) snapshots the keys
    /// registered across this prefix once, then removes entries one at a time
    /// as it actually emits them, so that dropping it early leaves untouched
    /// entries exactly where they were.
    pub fn ends_below(&self, watermark: i64) -> Vec<i64> {
        self.by_end.range(..watermark).map(|(&end, _)| end).collect()
    }

    /// The keys registered at `end`, in no particular order. Empty if `end`
    /// has no bucket.
    pub fn keys_at(&self, end: i64) -> &[K] {
        self.by_end.get(&end).map(Bucket::as_slice).unwrap_or(&[])
    }

    /// Whether `key` is registered at `end`. Used by invariant checks (debug
    /// builds and tests), not on the steady-state hot path.
    pub fn contains(&self, end: i64, key: &K) -> bool {
        self.by_end
            .get(&end)
            .is_some_and(|bucket| bucket.contains(key))
    }

    /// Number of distinct end-times with at least one key registered.
    pub fn len(&self) -> usize {
        self.by_end.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_end.is_empty()
    }
}
