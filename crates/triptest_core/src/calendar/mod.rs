//! Calendar helpers for the trip planner views.
//!
//! Pure functions over `chrono::NaiveDate`; nothing here touches storage.

pub mod date_grid;
