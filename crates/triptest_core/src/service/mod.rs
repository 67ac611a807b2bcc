//! Session stores and use-case services.
//!
//! # Responsibility
//! - Own in-memory collections and keep their snapshots in sync.
//! - Orchestrate the bulk import flow on top of the packing store.
//!
//! # Invariants
//! - Stores accept only validated input types.
//! - Storage failures are reported through `StoreWrite::persist`, never raised.

pub mod import_service;
pub mod packing_store;
pub mod planner_store;

use crate::repo::snapshot::PersistOutcome;

/// Value produced by a store mutation plus the outcome of its write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreWrite<T> {
    pub value: T,
    pub persist: PersistOutcome,
}

impl<T> StoreWrite<T> {
    pub fn new(value: T, persist: PersistOutcome) -> Self {
        Self { value, persist }
    }

    pub fn into_value(self) -> T {
        self.value
    }
}
