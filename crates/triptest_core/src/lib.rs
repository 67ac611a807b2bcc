//! Core state and algorithms for TripTest.
//! This crate is the single source of truth for packing and planner invariants.

pub mod calendar;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use calendar::date_grid::{
    date_key, end_of_month, month_grid, month_grid_with_counts, month_label, parse_date_key,
    shift_month, short_date_label, start_of_month, CalendarDay, GridCell, WEEKDAY_LABELS,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::packing::{BucketId, CategoryId, ItemId, NewPackingItem, PackingItem};
pub use model::planner::{
    EventId, NewTripEvent, NewTripReminder, ReminderId, TripEvent, TripReminder,
};
pub use model::validation::ValidationError;
pub use repo::kv_repo::{
    KeyValueSurface, MemoryKeyValueSurface, SqliteKeyValueSurface, SurfaceError, SurfaceMode,
};
pub use repo::snapshot::PersistOutcome;
pub use service::import_service::{
    import_from_file, import_from_str, import_payload, validate_import_payload, ImportFailure,
    ImportReport, ImportValidationError,
};
pub use service::packing_store::{BucketView, PackingStore, PACKING_ITEMS_KEY};
pub use service::planner_store::{PlannerSnapshot, TripPlannerStore, TRIP_PLANNER_KEY};
pub use service::StoreWrite;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
