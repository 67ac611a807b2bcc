//! Durable key-value surface contracts and implementations.
//!
//! # Responsibility
//! - Provide whole-document read/write of string values by key.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Writes replace the full value for a key; there are no partial updates.
//! - Implementations report failures; swallowing them is the adapter's job.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Failure of the durable surface itself.
#[derive(Debug)]
pub enum SurfaceError {
    /// Backing storage could not be reached at all.
    Unavailable(String),
    /// Storage rejected the write (quota, read-only, ...).
    WriteRejected(String),
    Db(DbError),
}

impl Display for SurfaceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(reason) => write!(f, "storage unavailable: {reason}"),
            Self::WriteRejected(reason) => write!(f, "storage write rejected: {reason}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SurfaceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) | Self::WriteRejected(_) => None,
        }
    }
}

impl From<DbError> for SurfaceError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SurfaceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Whole-document key-value storage.
pub trait KeyValueSurface {
    fn read(&self, key: &str) -> SurfaceResult<Option<String>>;
    fn write(&self, key: &str, value: &str) -> SurfaceResult<()>;
}

impl<S: KeyValueSurface + ?Sized> KeyValueSurface for &S {
    fn read(&self, key: &str) -> SurfaceResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> SurfaceResult<()> {
        (**self).write(key, value)
    }
}

/// SQLite-backed surface over the `kv_entries` table.
pub struct SqliteKeyValueSurface<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueSurface<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueSurface for SqliteKeyValueSurface<'_> {
    fn read(&self, key: &str) -> SurfaceResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> SurfaceResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Availability of a `MemoryKeyValueSurface`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceMode {
    /// Reads and writes succeed.
    #[default]
    Available,
    /// Reads succeed, writes are rejected (storage full, private mode).
    ReadOnly,
    /// Every call fails.
    Unavailable,
}

/// Process-local surface.
///
/// The bridge switches one to `SurfaceMode::Unavailable` when the database
/// cannot be opened; tests use `set_mode` to drive the same degraded paths.
#[derive(Debug, Default)]
pub struct MemoryKeyValueSurface {
    entries: RefCell<BTreeMap<String, String>>,
    mode: RefCell<SurfaceMode>,
}

impl MemoryKeyValueSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_mode(&self, mode: SurfaceMode) {
        *self.mode.borrow_mut() = mode;
    }

    /// Stores raw text without going through a store, e.g. corrupt fixtures.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl KeyValueSurface for MemoryKeyValueSurface {
    fn read(&self, key: &str) -> SurfaceResult<Option<String>> {
        if *self.mode.borrow() == SurfaceMode::Unavailable {
            return Err(SurfaceError::Unavailable("memory surface disabled".to_string()));
        }
        Ok(self.raw(key))
    }

    fn write(&self, key: &str, value: &str) -> SurfaceResult<()> {
        match *self.mode.borrow() {
            SurfaceMode::Available => {
                self.insert_raw(key, value);
                Ok(())
            }
            SurfaceMode::ReadOnly => Err(SurfaceError::WriteRejected(
                "memory surface is read-only".to_string(),
            )),
            SurfaceMode::Unavailable => Err(SurfaceError::Unavailable(
                "memory surface disabled".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyValueSurface, MemoryKeyValueSurface, SurfaceError, SurfaceMode};

    #[test]
    fn memory_surface_modes_gate_reads_and_writes() {
        let surface = MemoryKeyValueSurface::new();
        surface.write("k", "v1").unwrap();

        surface.set_mode(SurfaceMode::ReadOnly);
        assert!(matches!(
            surface.write("k", "v2"),
            Err(SurfaceError::WriteRejected(_))
        ));
        assert_eq!(surface.read("k").unwrap().as_deref(), Some("v1"));

        surface.set_mode(SurfaceMode::Unavailable);
        assert!(matches!(surface.read("k"), Err(SurfaceError::Unavailable(_))));
    }
}
