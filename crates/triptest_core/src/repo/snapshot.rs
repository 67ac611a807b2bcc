//! Best-effort JSON snapshot load/save over a `KeyValueSurface`.
//!
//! # Invariants
//! - `load_snapshot` never fails; every failure path yields `T::default()`.
//! - `save_snapshot` never fails; failures are reported as `PersistFailed`.
//! - Neither function retries.

use super::kv_repo::KeyValueSurface;
use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::hash::Hash;

/// Result of one best-effort write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    Persisted,
    /// Durable copy is stale; in-memory state stays authoritative.
    PersistFailed(String),
}

impl PersistOutcome {
    pub fn is_persisted(&self) -> bool {
        matches!(self, Self::Persisted)
    }
}

/// Reads `key` and decodes it, falling back to `T::default()`.
///
/// `decode` receives parsed JSON and returns `None` when the shape is wrong.
pub fn load_snapshot<T, S, F>(surface: &S, key: &str, decode: F) -> T
where
    T: Default,
    S: KeyValueSurface + ?Sized,
    F: FnOnce(Value) -> Option<T>,
{
    let raw = match surface.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("event=snapshot_load module=repo status=empty key={key}");
            return T::default();
        }
        Err(err) => {
            warn!(
                "event=snapshot_load module=repo status=fallback key={key} reason=surface_error error={err}"
            );
            return T::default();
        }
    };

    let parsed = match serde_json::from_str::<Value>(&raw) {
        Ok(value) => value,
        Err(err) => {
            warn!(
                "event=snapshot_load module=repo status=fallback key={key} reason=invalid_json error={err}"
            );
            return T::default();
        }
    };

    match decode(parsed) {
        Some(value) => value,
        None => {
            warn!("event=snapshot_load module=repo status=fallback key={key} reason=shape_mismatch");
            T::default()
        }
    }
}

/// Serializes `value` and writes it under `key`.
pub fn save_snapshot<T, S>(surface: &S, key: &str, value: &T) -> PersistOutcome
where
    T: Serialize + ?Sized,
    S: KeyValueSurface + ?Sized,
{
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(err) => {
            warn!(
                "event=snapshot_save module=repo status=error key={key} error_code=serialize_failed error={err}"
            );
            return PersistOutcome::PersistFailed(err.to_string());
        }
    };

    match surface.write(key, &raw) {
        Ok(()) => {
            debug!(
                "event=snapshot_save module=repo status=ok key={key} bytes={}",
                raw.len()
            );
            PersistOutcome::Persisted
        }
        Err(err) => {
            warn!(
                "event=snapshot_save module=repo status=error key={key} error_code=write_failed error={err}"
            );
            PersistOutcome::PersistFailed(err.to_string())
        }
    }
}

/// Decodes each array element independently, dropping the ones that fail.
///
/// Returns `None` when `value` is not an array.
pub fn decode_each<T, F>(value: Value, mut decode: F) -> Option<Vec<T>>
where
    F: FnMut(Value) -> Option<T>,
{
    let Value::Array(elements) = value else {
        return None;
    };
    let total = elements.len();
    let kept: Vec<T> = elements.into_iter().filter_map(&mut decode).collect();
    if kept.len() != total {
        warn!(
            "event=snapshot_decode module=repo status=partial kept={} dropped={}",
            kept.len(),
            total - kept.len()
        );
    }
    Some(kept)
}

/// Keeps the first record for every key and drops later repeats.
pub fn keep_first_by<T, K, F>(records: Vec<T>, mut key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let total = records.len();
    let mut seen = HashSet::with_capacity(total);
    let kept: Vec<T> = records
        .into_iter()
        .filter(|record| seen.insert(key(record)))
        .collect();
    if kept.len() != total {
        warn!(
            "event=snapshot_decode module=repo status=duplicate kept={} dropped={}",
            kept.len(),
            total - kept.len()
        );
    }
    kept
}
