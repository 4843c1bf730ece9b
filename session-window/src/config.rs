//! The single configuration record fixed at operator construction
//! (SPEC_FULL.md §4.4 / §6). No environment variables, no files, no CLI surface
//! at this layer — those are a concern of whatever embeds this crate.

use thiserror::Error;

use crate::aggregate::Aggregator;

/// Rejected at construction: SPEC_FULL.md §4.2.1 only defines `max_gap >= 0`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_gap must be >= 0, got {0}")]
    NegativeMaxGap(i64),
}

/// Bundles the gap threshold and the caller-supplied event/key projections and
/// aggregator. Built once via [`SessionConfig::new`] and immutable for the
/// lifetime of the operator that owns it.
pub struct SessionConfig<T, K, Agg: Aggregator<T>> {
    pub(crate) max_gap: i64,
    pub(crate) event_time_fn: Box<dyn Fn(&T) -> i64>,
    pub(crate) key_fn: Box<dyn Fn(&T) -> K>,
    pub(crate) aggregator: Agg,
}

impl<T, K, Agg: Aggregator<T>> SessionConfig<T, K, Agg> {
    /// `max_gap == 0` is accepted (single-event sessions, §4.2.1); negative gaps
    /// are rejected since the spec defines no semantics for them.
    pub fn new(
        max_gap: i64,
        event_time_fn: impl Fn(&T) -> i64 + 'static,
        key_fn: impl Fn(&T) -> K + 'static,
        aggregator: Agg,
    ) -> Result<Self, ConfigError> {
        if max_gap < 0 {
            return Err(ConfigError::NegativeMaxGap(max_gap));
        }
        Ok(SessionConfig {
            max_gap,
            event_time_fn: Box::new(event_time_fn),
            key_fn: Box::new(key_fn),
            aggregator,
        })
    }
}
