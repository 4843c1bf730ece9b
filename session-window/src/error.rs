//! The one fatal condition this crate can reach on its own.
//!
//! Every other error kind named in SPEC_FULL.md §7 (late event, watermark
//! regression) is a silent, expected policy, not an `Err`. Only an invariant
//! violation — a bug, not a runtime condition a host should plan to recover
//! from — gets a named type, following `manish59-grit`'s habit of a small
//! `thiserror` enum per crate rather than a generic catch-all.

use thiserror::Error;

/// An internal consistency check failed. SPEC_FULL.md §4.2.3 / §7 treat this as
/// job-fatal: the operator has no way to repair its own state, so
/// [`crate::operator::SessionWindow`] panics with this error's `Display` rather
/// than returning it to keep running, and a host that wants the panic message
/// structured can catch it and downcast the payload.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Two stored intervals for the same key were found to overlap.
    #[error("key {key:?}: intervals {a:?} and {b:?} overlap")]
    OverlappingWindows {
        key: String,
        a: crate::interval::Interval,
        b: crate::interval::Interval,
    },

    /// A window claims to end at a time the deadline index has no record of, or
    /// vice versa.
    #[error("key {key:?}: deadline index disagrees with window map at end {end}")]
    DeadlineIndexMismatch { key: String, end: i64 },

    /// A per-key map was found empty but the key still had a top-level entry.
    #[error("key {key:?}: empty window map left behind in the top-level map")]
    StaleKeyEntry { key: String },
}
