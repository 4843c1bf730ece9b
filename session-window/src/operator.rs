//! The session-window operator itself (SPEC_FULL.md §4.2): owns per-key window
//! maps and the deadline index, implements event ingestion and hands out a
//! resumable flush sequence on watermark advance.

use std::fmt::Debug;
use std::hash::Hash;

use fnv::FnvHashMap;
use tracing::{debug, trace};

use crate::aggregate::Aggregator;
use crate::config::SessionConfig;
use crate::deadline_index::DeadlineIndex;
use crate::error::SessionError;
use crate::flush::Flush;
use crate::interval::Interval;
use crate::window_map::WindowMap;

/// Owns all operator state for one input partition. Single-threaded, no
/// internal synchronization (SPEC_FULL.md §5) — concurrent calls from more
/// than one thread are undefined behavior, same as the upstream host's contract.
pub struct SessionWindow<T, K, Agg: Aggregator<T>> {
    pub(crate) config: SessionConfig<T, K, Agg>,
    pub(crate) windows: FnvHashMap<K, WindowMap<Agg::Accumulator>>,
    pub(crate) deadlines: DeadlineIndex<K>,
    pub(crate) watermark: i64,
}

impl<T, K, Agg> SessionWindow<T, K, Agg>
where
    K: Eq + Hash + Clone + Debug,
    Agg: Aggregator<T>,
{
    pub fn new(config: SessionConfig<T, K, Agg>) -> Self {
        SessionWindow {
            config,
            windows: FnvHashMap::default(),
            deadlines: DeadlineIndex::new(),
            watermark: i64::MIN,
        }
    }

    /// The current watermark threshold. Events strictly before this are late
    /// and get dropped on arrival.
    pub fn watermark(&self) -> i64 {
        self.watermark
    }

    /// How many keys currently have at least one open window.
    pub fn open_key_count(&self) -> usize {
        self.windows.len()
    }

    /// Routes one event into the correct window, creating, extending, or
    /// merging as SPEC_FULL.md §4.2.1 dictates. Never emits.
    pub fn on_event(&mut self, event: T) {
        let t = (self.config.event_time_fn)(&event);
        if t < self.watermark {
            trace!(event_time = t, watermark = self.watermark, "dropping late event");
            return;
        }

        let key = (self.config.key_fn)(&event);
        let probe = Interval::event(t, self.config.max_gap);
        let window_map = self.windows.entry(key.clone()).or_default();
        let hits = window_map.overlapping(probe);

        match hits.as_slice() {
            [] => {
                let mut acc = self.config.aggregator.new_accumulator();
                self.config.aggregator.accumulate(&mut acc, &event);
                window_map.insert_new(probe, acc);
                self.deadlines.register(probe.end, &key);
                trace!(?key, start = probe.start, end = probe.end, "created window");
            }
            &[only] => {
                let window = window_map.remove(only);
                if window.interval.covers(&probe) {
                    let mut acc = window.accumulator;
                    self.config.aggregator.accumulate(&mut acc, &event);
                    window_map.insert_new(window.interval, acc);
                } else {
                    let new_interval = window.interval.union(&probe);
                    let mut acc = window.accumulator;
                    self.config.aggregator.accumulate(&mut acc, &event);
                    window_map.insert_new(new_interval, acc);
                    if new_interval.end != only {
                        self.deadlines.unregister(only, &key);
                        self.deadlines.register(new_interval.end, &key);
                        debug!(?key, old_end = only, new_end = new_interval.end, "extended window");
                    }
                }
            }
            &[lower, upper] => {
                let left = window_map.remove(lower);
                let right = window_map.remove(upper);
                let new_interval = left.interval.union(&right.interval);
                let mut acc = self.config.aggregator.combine(left.accumulator, right.accumulator);
                self.config.aggregator.accumulate(&mut acc, &event);
                window_map.insert_new(new_interval, acc);
                self.deadlines.unregister(lower, &key);
                self.deadlines.unregister(upper, &key);
                self.deadlines.register(new_interval.end, &key);
                debug!(?key, start = new_interval.start, end = new_interval.end, "merged windows");
            }
            _ => unreachable!(
                "window_map::overlapping returned more than two hits for key {key:?}; \
                 that can only happen if stored windows overlap each other"
            ),
        }

        #[cfg(debug_assertions)]
        if let Err(e) = self.check_key_invariants(&key) {
            panic!("{e}");
        }
    }

    /// Advances the watermark and returns a lazy, resumable sequence of every
    /// session whose window is now known complete (SPEC_FULL.md §4.2.2, §5).
    ///
    /// An earlier-or-equal watermark is a no-op: the returned [`Flush`] yields
    /// nothing. Dropping the `Flush` before it is exhausted leaves whatever it
    /// had not yet visited untouched, to be picked up by a later flush.
    pub fn on_watermark(&mut self, watermark: i64) -> Flush<'_, T, K, Agg> {
        if watermark <= self.watermark {
            debug!(requested = watermark, current = self.watermark, "ignoring non-advancing watermark");
            return Flush::empty(self);
        }
        self.watermark = watermark;
        Flush::new(self, watermark)
    }

    /// Checks SPEC_FULL.md §8 invariant 1 (pairwise non-overlap, gap `>= 1`) for
    /// one key's window map. Runs after every mutating event in debug builds;
    /// also usable directly from tests.
    pub fn check_key_invariants(&self, key: &K) -> Result<(), SessionError> {
        let Some(window_map) = self.windows.get(key) else {
            return Ok(());
        };
        let mut prev: Option<Interval> = None;
        for (&end, window) in window_map.iter() {
            debug_assert_eq!(window.interval.end, end);
            if let Some(prev) = prev {
                if window.interval.start <= prev.end {
                    return Err(SessionError::OverlappingWindows {
                        key: format!("{key:?}"),
                        a: prev,
                        b: window.interval,
                    });
                }
            }
            if !self.deadlines.contains(end, key) {
                return Err(SessionError::DeadlineIndexMismatch {
                    key: format!("{key:?}"),
                    end,
                });
            }
            prev = Some(window.interval);
        }
        Ok(())
    }

    /// Checks SPEC_FULL.md §8 invariants 1–3 across the whole operator. Not on
    /// the hot path; intended for tests and debug tooling.
    pub fn check_invariants(&self) -> Result<(), SessionError> {
        for key in self.windows.keys() {
            self.check_key_invariants(key)?;
            if self.windows.get(key).is_some_and(WindowMap::is_empty) {
                return Err(SessionError::StaleKeyEntry {
                    key: format!("{key:?}"),
                });
            }
        }
        Ok(())
    }
}
