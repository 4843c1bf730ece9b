//! The resumable emission sequence handed back by [`crate::operator::SessionWindow::on_watermark`].
//!
//! SPEC_FULL.md §5 requires watermark flush to be lazy and restartable from its
//! current position (but not from the beginning) so a backpressured downstream
//! channel can pull sessions a few at a time. `Flush` is an `Iterator`, so the
//! host drives it with `next()` or `by_ref().take(n)`; dropping it mid-iteration
//! leaves every window it had not yet visited exactly where it was, to be picked
//! up by the next `on_watermark` call at or above the same threshold.

use std::collections::{HashSet, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;

use tracing::info;

use crate::aggregate::Aggregator;
use crate::operator::SessionWindow;
use crate::session::Session;
use crate::window_map::WindowMap;

/// Cursor over the keys and windows a single `on_watermark` call made eligible
/// for emission.
///
/// Built once, up front, as the ordered set of keys with at least one window
/// ending below the new watermark (SPEC_FULL.md §4.2.2 step 3); each call to
/// `next` then pops the earliest still-expired window off the *current* key's
/// map, following SPEC_FULL.md §9's "emission cursor" shape: a key plus an
/// iterator position inside that key, not a pre-computed list of sessions.
pub struct Flush<'a, T, K, Agg: Aggregator<T>> {
    operator: &'a mut SessionWindow<T, K, Agg>,
    watermark: i64,
    pending_keys: VecDeque<K>,
    current_key: Option<K>,
}

impl<'a, T, K, Agg> Flush<'a, T, K, Agg>
where
    K: Eq + Hash + Clone + Debug,
    Agg: Aggregator<T>,
{
    /// Snapshots every key with a window ending strictly below `watermark`.
    pub(crate) fn new(operator: &'a mut SessionWindow<T, K, Agg>, watermark: i64) -> Self {
        let mut seen = HashSet::new();
        let mut pending_keys = VecDeque::new();
        for end in operator.deadlines.ends_below(watermark) {
            for key in operator.deadlines.keys_at(end) {
                if seen.insert(key.clone()) {
                    pending_keys.push_back(key.clone());
                }
            }
        }
        Flush {
            operator,
            watermark,
            pending_keys,
            current_key: None,
        }
    }

    /// A `Flush` that yields nothing, for a non-advancing watermark (§4.2.2 step 1).
    pub(crate) fn empty(operator: &'a mut SessionWindow<T, K, Agg>) -> Self {
        Flush {
            operator,
            watermark: i64::MIN,
            pending_keys: VecDeque::new(),
            current_key: None,
        }
    }
}

impl<'a, T, K, Agg> Iterator for Flush<'a, T, K, Agg>
where
    K: Eq + Hash + Clone + Debug,
    Agg: Aggregator<T>,
{
    type Item = Session<K, Agg::Result>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current_key.is_none() {
                self.current_key = self.pending_keys.pop_front();
            }
            let key = self.current_key.clone()?;

            let earliest_end = self
                .operator
                .windows
                .get(&key)
                .and_then(|wm| wm.iter().next().map(|(&end, _)| end));

            let Some(end) = earliest_end else {
                self.current_key = None;
                continue;
            };

            if end >= self.watermark {
                // This key's remaining windows are not yet expired; later keys
                // in `pending_keys` may still have work.
                self.current_key = None;
                continue;
            }

            let window = self
                .operator
                .windows
                .get_mut(&key)
                .expect("key observed present above")
                .remove(end);
            self.operator.deadlines.unregister(end, &key);

            let now_empty = self
                .operator
                .windows
                .get(&key)
                .is_some_and(WindowMap::is_empty);
            if now_empty {
                self.operator.windows.remove(&key);
            }

            info!(?key, start = window.interval.start, end, "flushed session");
            let result = self.operator.config.aggregator.finish(window.accumulator);
            return Some(Session::new(key, window.interval.start, end, result));
        }
    }
}
