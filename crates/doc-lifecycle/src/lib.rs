//! Asynchronous document lifecycle tracking
//!
//! A submitted document is processed by an external backend; this crate
//! polls that backend's status oracle until the job reaches a terminal
//! outcome, bounded by a wall-clock timeout. Trackers are independent
//! tasks with no shared mutable state; a dual-document validation runs
//! two of them concurrently and joins fail-fast.

pub mod provider;
pub mod tracker;

pub use provider::{ProviderError, StatusProvider};
pub use tracker::{CompletedDocument, TrackError, Tracker, TrackerConfig};
