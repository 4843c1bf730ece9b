//! The per-key ordered collection of open session windows.
//!
//! SPEC_FULL.md §4.1 describes a source implementation that stores windows in a
//! `TreeMap<Interval, A>` whose comparator declares any two *overlapping*
//! intervals equal — a deliberately non-transitive relation, safe only because it
//! is never used for anything but a bounded "does something overlap this probe"
//! search. That comparator cannot be expressed as `Ord` without violating its
//! contract (transitivity, substitutability), so per the recommended redesign in
//! §4.1/§9 this implementation keys the map by `end` instead and implements the
//! overlap search as an explicit range query.
//!
//! Because windows for a single key are invariantly pairwise non-overlapping with
//! `end` strictly increasing alongside `start` (§3 "Per-key state" / §8 invariant
//! 1), a `BTreeMap<i64, Window<A>>` ordered by `end` lets [`WindowMap::overlapping`]
//! find every window overlapping a probe with a single bounded range scan starting
//! at the first `end >= probe.start` — the same guarantee the source's `lower-key`
//! tail traversal was built to provide, without needing one.

use std::collections::BTreeMap;

use smallvec::SmallVec;

use crate::interval::Interval;

/// A single open session window: its span plus the accumulator absorbing events
/// that land in it.
#[derive(Debug, Clone)]
pub struct Window<A> {
    pub interval: Interval,
    pub accumulator: A,
}

/// Ordered, non-overlapping windows for one grouping key.
#[derive(Debug, Clone)]
pub struct WindowMap<A> {
    by_end: BTreeMap<i64, Window<A>>,
}

impl<A> Default for WindowMap<A> {
    fn default() -> Self {
        WindowMap {
            by_end: BTreeMap::new(),
        }
    }
}

impl<A> WindowMap<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.by_end.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_end.len()
    }

    /// `end` keys of every window overlapping `probe`, in ascending order.
    ///
    /// At most two, per SPEC_FULL.md §4.2.1: all stored intervals have length
    /// `>= max_gap` and are pairwise non-overlapping, and `probe` has length
    /// `<= max_gap`, so it can bridge at most one gap.
    pub fn overlapping(&self, probe: Interval) -> SmallVec<[i64; 2]> {
        let mut found = SmallVec::new();
        for (&end, window) in self.by_end.range(probe.start..) {
            if window.interval.start > probe.end {
                // Starts only increase from here on (non-overlap invariant), so
                // nothing further in the range can overlap either.
                break;
            }
            if window.interval.overlaps(&probe) {
                found.push(end);
            }
        }
        found
    }

    /// Inserts a brand-new window. Panics if a window already ends at
    /// `interval.end` — that would mean an overlap search missed an entry, an
    /// invariant violation (SPEC_FULL.md §7).
    pub fn insert_new(&mut self, interval: Interval, accumulator: A) {
        let prior = self.by_end.insert(
            interval.end,
            Window {
                interval,
                accumulator,
            },
        );
        assert!(
            prior.is_none(),
            "window_map: insert_new found an existing window ending at {}",
            interval.end
        );
    }

    /// Removes and returns the window ending at `end`. Panics if absent — callers
    /// only ever remove ends they just observed via `overlapping`.
    pub fn remove(&mut self, end: i64) -> Window<A> {
        self.by_end
            .remove(&end)
            .unwrap_or_else(|| panic!("window_map: no window ends at {end}"))
    }

    /// Windows in ascending `end` order.
    pub fn iter(&self) -> impl Iterator<Item = (&i64, &Window<A>)> {
        self.by_end.iter()
    }
}
