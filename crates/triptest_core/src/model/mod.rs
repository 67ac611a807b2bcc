//! Domain model for the packing board and the trip planner.
//!
//! # Responsibility
//! - Define canonical records persisted by the stores.
//! - Define validated input shapes accepted by store mutations.
//!
//! # Invariants
//! - Every entity is identified by a stable UUID v4.
//! - Text fields are trimmed and never blank on constructed entities.
//! - Category and bucket values always belong to their closed sets.

pub mod packing;
pub mod planner;
pub mod validation;

/// Current wall clock as Unix epoch milliseconds.
pub(crate) fn now_epoch_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
