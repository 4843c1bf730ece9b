//! The unit emitted by a watermark flush.

use serde::{Deserialize, Serialize};

/// A completed session window for one key, emitted exactly once
/// (SPEC_FULL.md §4.2.2).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session<K, R> {
    pub key: K,
    pub start: i64,
    pub end: i64,
    pub result: R,
}

impl<K, R> Session<K, R> {
    pub fn new(key: K, start: i64, end: i64, result: R) -> Self {
        Session {
            key,
            start,
            end,
            result,
        }
    }
}
