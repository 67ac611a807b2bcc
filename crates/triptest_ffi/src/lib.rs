//! Flutter-facing bridge for TripTest core.

pub mod api;
