//! Persistence boundary: key-value surfaces and the snapshot adapter.
//!
//! # Responsibility
//! - Define the durable surface contract and its SQLite/in-memory backends.
//! - Absorb every storage failure so store callers never see one.
//!
//! # Invariants
//! - Snapshots are whole JSON documents, never deltas.
//! - Unreadable or mis-shaped snapshots load as empty state.

pub mod kv_repo;
pub mod snapshot;
