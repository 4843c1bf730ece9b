//! A session-window aggregation operator for an event-time stream processor.
//!
//! For each grouping key derived from incoming events, [`SessionWindow`] maintains
//! a dynamic collection of session windows — intervals of event time within which
//! consecutive events for that key arrive no further apart than a configured
//! `max_gap` — and emits, once a watermark proves a session complete, a single
//! aggregated [`Session`] per window.
//!
//! This crate is a single stateful, single-threaded operator, not a runtime: the
//! distributed job scheduler, DAG executor, source/sink connectors, wire
//! serialization, and any higher-level fluent streaming API are all out of scope
//! and belong to whatever host embeds this operator.
//!
//! # Example
//!
//! ```
//! use session_window::{Aggregator, Count, SessionConfig, SessionWindow};
//!
//! let config = SessionConfig::new(
//!     10,
//!     |event: &(&str, i64)| event.1,
//!     |event: &(&str, i64)| event.0.to_string(),
//!     Count,
//! ).unwrap();
//! let mut operator = SessionWindow::new(config);
//!
//! operator.on_event(("a", 1));
//! operator.on_event(("a", 5));
//! operator.on_event(("a", 8));
//!
//! let sessions: Vec<_> = operator.on_watermark(1000).collect();
//! assert_eq!(sessions.len(), 1);
//! assert_eq!(sessions[0].start, 1);
//! assert_eq!(sessions[0].end, 18);
//! assert_eq!(sessions[0].result, 3);
//! ```

#![forbid(unsafe_code)]

pub mod aggregate;
pub mod config;
pub mod deadline_index;
pub mod error;
pub mod flush;
pub mod interval;
pub mod operator;
pub mod session;
pub mod window_map;

pub use aggregate::{Aggregator, Count};
pub use config::{ConfigError, SessionConfig};
pub use error::SessionError;
pub use flush::Flush;
pub use interval::Interval;
pub use operator::SessionWindow;
pub use session::Session;
