//! A half-open-in-spirit, closed-in-representation span of event time.
//!
//! `Interval` backs every session window. Its `end` field doubles as the sort key
//! for [`crate::window_map::WindowMap`] — see that module for why equality by
//! *overlap* (used only as a probe, never stored as a map key) is kept separate
//! from the `Ord` implementation derived here.

use serde::{Deserialize, Serialize};

/// A closed span `[start, end]` of event-time coordinates.
///
/// `start <= end` is an invariant of every live `Interval`; nothing here enforces
/// it beyond construction, since both fields are only ever produced by
/// [`Interval::new`], [`Interval::point`], or [`Interval::union`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: i64,
    pub end: i64,
}

impl Interval {
    /// Builds `[start, end]`. Panics if `end < start`; every caller in this crate
    /// derives `end` from `start` by addition or by `union`, so this should never
    /// trigger outside a bug.
    pub fn new(start: i64, end: i64) -> Self {
        debug_assert!(end >= start, "interval end {end} before start {start}");
        Interval { start, end }
    }

    /// A zero-width interval `[t, t]`, used when `max_gap == 0`.
    pub fn point(t: i64) -> Self {
        Interval { start: t, end: t }
    }

    /// The event interval `[t, t + max_gap]`, saturating on overflow rather than
    /// panicking (see SPEC_FULL.md §4.2.1 / §9).
    pub fn event(t: i64, max_gap: i64) -> Self {
        Interval {
            start: t,
            end: t.saturating_add(max_gap),
        }
    }

    /// Whether `self` and `other`, as closed intervals, share at least one point.
    /// Touching endpoints count as overlap (`end == start` is overlap, not gap).
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.end >= other.start && other.end >= self.start
    }

    /// `self` entirely contains `other`.
    pub fn covers(&self, other: &Interval) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// The smallest interval containing both `self` and `other`. Not meaningful
    /// unless the two already overlap or are adjacent; callers only ever union
    /// intervals they've already established overlap.
    pub fn union(&self, other: &Interval) -> Interval {
        Interval {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}
