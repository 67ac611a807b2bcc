//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose packing board, trip planner and calendar operations to Dart via FRB.
//! - Map core results into flat envelopes the UI can render directly.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - One packing store and one planner store live for the whole process;
//!   storage failures never fail a call, they only clear `persisted`.

use chrono::{Local, NaiveDate};
use log::warn;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock, PoisonError};
use triptest_core::db::open_db;
use triptest_core::{
    core_version as core_version_inner, date_key, import_from_file, import_from_str,
    init_logging as init_logging_inner, month_grid_with_counts, month_label, parse_date_key,
    ping as ping_inner, shift_month, short_date_label, BucketId, CalendarDay, CategoryId,
    ImportReport, KeyValueSurface, MemoryKeyValueSurface, NewPackingItem, NewTripEvent,
    NewTripReminder, PackingItem, PackingStore, PersistOutcome, SqliteKeyValueSurface,
    SurfaceError, SurfaceMode, TripEvent, TripPlannerStore, TripReminder, WEEKDAY_LABELS,
};
use uuid::Uuid;

const DB_FILE_NAME: &str = "triptest.sqlite3";
const DB_PATH_ENV: &str = "TRIPTEST_DB_PATH";
static SESSION: OnceLock<Bridge> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and an error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Selectable option for category and bucket pickers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceItem {
    /// Wire identifier, e.g. `living-room`.
    pub id: String,
    pub label: String,
}

/// Packing item as shown on a board card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackingItemView {
    pub item_id: String,
    pub name: String,
    pub category: String,
    pub category_label: String,
    pub bucket: String,
    pub created_at_ms: i64,
}

/// One board column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketColumn {
    pub bucket: String,
    pub label: String,
    pub description: String,
    pub items: Vec<PackingItemView>,
}

/// Full packing board response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackingBoardResponse {
    /// Always three columns in board order.
    pub columns: Vec<BucketColumn>,
    /// `false` when the latest change could not be saved.
    pub persisted: bool,
}

/// Generic action response envelope for mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryActionResponse {
    /// Whether the mutation was applied.
    pub ok: bool,
    /// Created or targeted entity ID.
    pub entity_id: Option<String>,
    /// `false` when the change is applied but could not be saved.
    pub persisted: bool,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl EntryActionResponse {
    fn applied(message: &str, entity_id: Option<String>, persist: &PersistOutcome) -> Self {
        let persisted = persist.is_persisted();
        let message = if persisted {
            message.to_string()
        } else {
            format!("{message} Changes could not be saved.")
        };
        Self {
            ok: true,
            entity_id,
            persisted,
            message,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            entity_id: None,
            persisted: false,
            message: message.into(),
        }
    }
}

/// Import result for the import status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportResponse {
    pub ok: bool,
    pub added: u32,
    pub message: String,
}

impl From<ImportReport> for ImportResponse {
    fn from(report: ImportReport) -> Self {
        Self {
            ok: report.is_success(),
            added: u32::try_from(report.added).unwrap_or(u32::MAX),
            message: report.message(),
        }
    }
}

/// Reminder row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderView {
    pub reminder_id: String,
    pub text: String,
    pub due_date: Option<String>,
    /// `Mar 5` style label for `due_date`.
    pub due_label: Option<String>,
    pub completed: bool,
    pub created_at_ms: i64,
}

/// Event row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventView {
    pub event_id: String,
    pub title: String,
    pub date: String,
    pub date_label: String,
    pub note: Option<String>,
    pub created_at_ms: i64,
}

/// Reminders and events response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerResponse {
    pub reminders: Vec<ReminderView>,
    pub events: Vec<EventView>,
    /// `false` when the latest change could not be saved.
    pub persisted: bool,
}

/// One calendar grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDayView {
    pub date_key: String,
    pub day: u32,
    pub is_current_month: bool,
    pub event_count: u32,
}

/// Calendar month response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMonthResponse {
    /// `YYYY-MM-DD` of the first day of the shown month; feed back as anchor.
    pub month_key: String,
    pub label: String,
    pub weekday_labels: Vec<String>,
    /// Whole weeks, Sunday first.
    pub days: Vec<CalendarDayView>,
}

/// Category picker options in display order.
#[flutter_rust_bridge::frb(sync)]
pub fn packing_categories() -> Vec<ChoiceItem> {
    CategoryId::ALL
        .into_iter()
        .map(|category| ChoiceItem {
            id: category.as_str().to_string(),
            label: category.label().to_string(),
        })
        .collect()
}

/// Bucket picker options in board order.
#[flutter_rust_bridge::frb(sync)]
pub fn packing_bucket_choices() -> Vec<ChoiceItem> {
    BucketId::ALL
        .into_iter()
        .map(|bucket| ChoiceItem {
            id: bucket.as_str().to_string(),
            label: bucket.label().to_string(),
        })
        .collect()
}

/// Loads the packing board grouped by bucket.
#[flutter_rust_bridge::frb(sync)]
pub fn packing_board() -> PackingBoardResponse {
    bridge().packing_board()
}

/// Adds one item from the packing form.
///
/// `category` and `bucket` are wire identifiers (`kitchen`, `take-away`, ...).
#[flutter_rust_bridge::frb(sync)]
pub fn packing_add_item(name: String, category: String, bucket: String) -> EntryActionResponse {
    bridge().packing_add_item(&name, &category, &bucket)
}

/// Moves an item to another bucket, e.g. after a drag-and-drop.
#[flutter_rust_bridge::frb(sync)]
pub fn packing_move_item(item_id: String, bucket: String) -> EntryActionResponse {
    bridge().packing_move_item(&item_id, &bucket)
}

/// Imports items from JSON text already read by the host.
#[flutter_rust_bridge::frb(sync)]
pub fn packing_import_json(text: String) -> ImportResponse {
    bridge().packing_import_json(&text)
}

/// Imports items from a JSON file path chosen by the user.
///
/// # FFI contract
/// - Blocking file read; call off the UI thread for large files.
#[flutter_rust_bridge::frb(sync)]
pub fn packing_import_file(path: String) -> ImportResponse {
    bridge().packing_import_file(&path)
}

/// Clears the whole packing board.
#[flutter_rust_bridge::frb(sync)]
pub fn packing_reset() -> EntryActionResponse {
    bridge().packing_reset()
}

/// Loads reminders and events.
#[flutter_rust_bridge::frb(sync)]
pub fn planner_snapshot() -> PlannerResponse {
    bridge().planner_snapshot()
}

#[flutter_rust_bridge::frb(sync)]
pub fn planner_add_reminder(text: String, due_date: Option<String>) -> EntryActionResponse {
    bridge().planner_add_reminder(&text, due_date.as_deref())
}

#[flutter_rust_bridge::frb(sync)]
pub fn planner_toggle_reminder(reminder_id: String) -> EntryActionResponse {
    bridge().planner_toggle_reminder(&reminder_id)
}

#[flutter_rust_bridge::frb(sync)]
pub fn planner_remove_reminder(reminder_id: String) -> EntryActionResponse {
    bridge().planner_remove_reminder(&reminder_id)
}

#[flutter_rust_bridge::frb(sync)]
pub fn planner_add_event(title: String, date: String, note: Option<String>) -> EntryActionResponse {
    bridge().planner_add_event(&title, &date, note.as_deref())
}

#[flutter_rust_bridge::frb(sync)]
pub fn planner_remove_event(event_id: String) -> EntryActionResponse {
    bridge().planner_remove_event(&event_id)
}

/// Clears reminders and events.
#[flutter_rust_bridge::frb(sync)]
pub fn planner_reset() -> EntryActionResponse {
    bridge().planner_reset()
}

/// Builds the calendar month grid with event counts.
///
/// Input semantics:
/// - `anchor`: any date key inside the base month; `None` or unparseable
///   input means today (local time).
/// - `month_offset`: months to move from the anchor (`-1` = Prev, `1` = Next).
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_month(anchor: Option<String>, month_offset: i32) -> CalendarMonthResponse {
    let base = anchor
        .as_deref()
        .and_then(parse_date_key)
        .unwrap_or_else(|| Local::now().date_naive());
    bridge().calendar_month(base, month_offset)
}

fn bridge() -> &'static Bridge {
    SESSION.get_or_init(|| Bridge::open(&resolve_db_path()))
}

fn resolve_db_path() -> PathBuf {
    if let Ok(raw) = std::env::var(DB_PATH_ENV) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    std::env::temp_dir().join(DB_FILE_NAME)
}

/// Storage behind one session store.
enum SessionSurface {
    Sqlite(Connection),
    /// Database could not be opened; reads and writes fail and the
    /// in-memory store is the only copy for the rest of the session.
    Detached(MemoryKeyValueSurface),
}

impl SessionSurface {
    fn open(db_path: &Path, store: &str) -> Self {
        match open_db(db_path) {
            Ok(conn) => Self::Sqlite(conn),
            Err(err) => {
                warn!(
                    "event=ffi_storage module=ffi status=fallback store={store} surface=memory error={err}"
                );
                let surface = MemoryKeyValueSurface::new();
                surface.set_mode(SurfaceMode::Unavailable);
                Self::Detached(surface)
            }
        }
    }
}

impl KeyValueSurface for SessionSurface {
    fn read(&self, key: &str) -> Result<Option<String>, SurfaceError> {
        match self {
            Self::Sqlite(conn) => SqliteKeyValueSurface::new(conn).read(key),
            Self::Detached(surface) => surface.read(key),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SurfaceError> {
        match self {
            Self::Sqlite(conn) => SqliteKeyValueSurface::new(conn).write(key, value),
            Self::Detached(surface) => surface.write(key, value),
        }
    }
}

/// Session stores shared by every exported call.
struct Bridge {
    packing: Mutex<PackingStore<SessionSurface>>,
    planner: Mutex<TripPlannerStore<SessionSurface>>,
}

impl Bridge {
    fn open(db_path: &Path) -> Self {
        Self {
            packing: Mutex::new(PackingStore::open(SessionSurface::open(db_path, "packing"))),
            planner: Mutex::new(TripPlannerStore::open(SessionSurface::open(
                db_path, "planner",
            ))),
        }
    }

    fn with_packing<T>(&self, f: impl FnOnce(&mut PackingStore<SessionSurface>) -> T) -> T {
        let mut store = self.packing.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut store)
    }

    fn with_planner<T>(&self, f: impl FnOnce(&mut TripPlannerStore<SessionSurface>) -> T) -> T {
        let mut store = self.planner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut store)
    }

    fn packing_board(&self) -> PackingBoardResponse {
        self.with_packing(|store| PackingBoardResponse {
            columns: store
                .buckets()
                .into_iter()
                .map(|column| BucketColumn {
                    bucket: column.bucket.as_str().to_string(),
                    label: column.label.to_string(),
                    description: column.description.to_string(),
                    items: column.items.into_iter().map(to_item_view).collect(),
                })
                .collect(),
            persisted: last_write_saved(store.last_persist()),
        })
    }

    fn packing_add_item(&self, name: &str, category: &str, bucket: &str) -> EntryActionResponse {
        let input = match NewPackingItem::from_wire(name, category, bucket) {
            Ok(input) => input,
            Err(err) => return EntryActionResponse::failure(err.to_string()),
        };
        let write = self.with_packing(|store| store.add_item(input));
        EntryActionResponse::applied(
            "Item added.",
            Some(write.value.id.to_string()),
            &write.persist,
        )
    }

    fn packing_move_item(&self, item_id: &str, bucket: &str) -> EntryActionResponse {
        let id = match parse_id(item_id) {
            Ok(id) => id,
            Err(message) => return EntryActionResponse::failure(message),
        };
        let Some(bucket) = BucketId::parse(bucket) else {
            return EntryActionResponse::failure(format!("unknown bucket `{bucket}`"));
        };
        let write = self.with_packing(|store| store.move_item(id, bucket));
        if write.value {
            EntryActionResponse::applied("Item moved.", Some(id.to_string()), &write.persist)
        } else {
            EntryActionResponse::applied("No matching item.", None, &write.persist)
        }
    }

    fn packing_import_json(&self, text: &str) -> ImportResponse {
        self.with_packing(|store| import_from_str(store, text)).into()
    }

    fn packing_import_file(&self, path: &str) -> ImportResponse {
        self.with_packing(|store| import_from_file(store, path)).into()
    }

    fn packing_reset(&self) -> EntryActionResponse {
        let write = self.with_packing(|store| store.reset());
        EntryActionResponse::applied("Packing board cleared.", None, &write.persist)
    }

    fn planner_snapshot(&self) -> PlannerResponse {
        self.with_planner(|store| PlannerResponse {
            reminders: store.reminders().iter().map(to_reminder_view).collect(),
            events: store.events().iter().map(to_event_view).collect(),
            persisted: last_write_saved(store.last_persist()),
        })
    }

    fn planner_add_reminder(&self, text: &str, due_date: Option<&str>) -> EntryActionResponse {
        let input = match NewTripReminder::new(text, due_date) {
            Ok(input) => input,
            Err(err) => return EntryActionResponse::failure(err.to_string()),
        };
        let write = self.with_planner(|store| store.add_reminder(input));
        EntryActionResponse::applied(
            "Reminder added.",
            Some(write.value.id.to_string()),
            &write.persist,
        )
    }

    fn planner_toggle_reminder(&self, reminder_id: &str) -> EntryActionResponse {
        let id = match parse_id(reminder_id) {
            Ok(id) => id,
            Err(message) => return EntryActionResponse::failure(message),
        };
        let write = self.with_planner(|store| store.toggle_reminder(id));
        let message = match write.value {
            Some(true) => "Reminder completed.",
            Some(false) => "Reminder reopened.",
            None => "No matching reminder.",
        };
        let entity_id = write.value.map(|_| id.to_string());
        EntryActionResponse::applied(message, entity_id, &write.persist)
    }

    fn planner_remove_reminder(&self, reminder_id: &str) -> EntryActionResponse {
        let id = match parse_id(reminder_id) {
            Ok(id) => id,
            Err(message) => return EntryActionResponse::failure(message),
        };
        let write = self.with_planner(|store| store.remove_reminder(id));
        if write.value {
            EntryActionResponse::applied("Reminder removed.", Some(id.to_string()), &write.persist)
        } else {
            EntryActionResponse::applied("No matching reminder.", None, &write.persist)
        }
    }

    fn planner_add_event(&self, title: &str, date: &str, note: Option<&str>) -> EntryActionResponse {
        let input = match NewTripEvent::new(title, date, note) {
            Ok(input) => input,
            Err(err) => return EntryActionResponse::failure(err.to_string()),
        };
        let write = self.with_planner(|store| store.add_event(input));
        EntryActionResponse::applied(
            "Event added.",
            Some(write.value.id.to_string()),
            &write.persist,
        )
    }

    fn planner_remove_event(&self, event_id: &str) -> EntryActionResponse {
        let id = match parse_id(event_id) {
            Ok(id) => id,
            Err(message) => return EntryActionResponse::failure(message),
        };
        let write = self.with_planner(|store| store.remove_event(id));
        if write.value {
            EntryActionResponse::applied("Event removed.", Some(id.to_string()), &write.persist)
        } else {
            EntryActionResponse::applied("No matching event.", None, &write.persist)
        }
    }

    fn planner_reset(&self) -> EntryActionResponse {
        let write = self.with_planner(|store| store.reset());
        EntryActionResponse::applied("Planner cleared.", None, &write.persist)
    }

    fn calendar_month(&self, base: NaiveDate, month_offset: i32) -> CalendarMonthResponse {
        let month = shift_month(base, month_offset);
        let counts = self.with_planner(|store| store.events_by_date());
        CalendarMonthResponse {
            month_key: date_key(month),
            label: month_label(month),
            weekday_labels: WEEKDAY_LABELS.iter().map(|day| day.to_string()).collect(),
            days: month_grid_with_counts(month, &counts)
                .into_iter()
                .map(to_day_view)
                .collect(),
        }
    }
}

fn last_write_saved(outcome: Option<&PersistOutcome>) -> bool {
    outcome.map_or(true, PersistOutcome::is_persisted)
}

fn parse_id(raw: &str) -> Result<Uuid, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid id `{}`", raw.trim()))
}

fn to_item_view(item: &PackingItem) -> PackingItemView {
    PackingItemView {
        item_id: item.id.to_string(),
        name: item.name.clone(),
        category: item.category.as_str().to_string(),
        category_label: item.category.label().to_string(),
        bucket: item.bucket.as_str().to_string(),
        created_at_ms: item.created_at,
    }
}

fn to_reminder_view(reminder: &TripReminder) -> ReminderView {
    ReminderView {
        reminder_id: reminder.id.to_string(),
        text: reminder.text.clone(),
        due_date: reminder.due_date.clone(),
        due_label: reminder.due_date.as_deref().map(short_date_label),
        completed: reminder.completed,
        created_at_ms: reminder.created_at,
    }
}

fn to_event_view(event: &TripEvent) -> EventView {
    EventView {
        event_id: event.id.to_string(),
        title: event.title.clone(),
        date: event.date.clone(),
        date_label: short_date_label(&event.date),
        note: event.note.clone(),
        created_at_ms: event.created_at,
    }
}

fn to_day_view(day: CalendarDay) -> CalendarDayView {
    CalendarDayView {
        date_key: day.date_key,
        day: day.day,
        is_current_month: day.is_current_month,
        event_count: u32::try_from(day.event_count).unwrap_or(u32::MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::{calendar_month, core_version, init_logging, packing_categories, ping, Bridge};
    use chrono::NaiveDate;

    fn temp_bridge() -> (tempfile::TempDir, Bridge) {
        let dir = tempfile::tempdir().expect("temp dir");
        let bridge = Bridge::open(&dir.path().join("ffi.sqlite3"));
        (dir, bridge)
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn categories_are_listed_in_display_order() {
        let categories = packing_categories();
        assert_eq!(categories.len(), 8);
        assert_eq!(categories[2].id, "living-room");
        assert_eq!(categories[2].label, "Living Room");
    }

    #[test]
    fn added_item_moves_between_board_columns() {
        let (_dir, bridge) = temp_bridge();
        let added = bridge.packing_add_item(" Camera ", "personal", "keep");
        assert!(added.ok, "{}", added.message);
        assert!(added.persisted);
        let item_id = added.entity_id.expect("item id");

        let moved = bridge.packing_move_item(&item_id, "take-away");
        assert!(moved.ok, "{}", moved.message);

        let board = bridge.packing_board();
        assert!(board.persisted);
        assert!(board.columns[0].items.is_empty());
        assert_eq!(board.columns[2].bucket, "take-away");
        assert_eq!(board.columns[2].items[0].name, "Camera");
        assert_eq!(board.columns[2].items[0].item_id, item_id);
    }

    #[test]
    fn items_survive_a_new_session_on_the_same_file() {
        let (dir, bridge) = temp_bridge();
        bridge.packing_add_item("Lamp", "living-room", "give-away");
        drop(bridge);

        let reopened = Bridge::open(&dir.path().join("ffi.sqlite3"));
        let board = reopened.packing_board();
        assert_eq!(board.columns[1].items.len(), 1);
        assert_eq!(board.columns[1].items[0].category_label, "Living Room");
    }

    #[test]
    fn unopenable_database_keeps_changes_for_the_session() {
        let dir = tempfile::tempdir().expect("temp dir");
        let bridge = Bridge::open(&dir.path().join("missing").join("sub").join("ffi.sqlite3"));

        let added = bridge.packing_add_item("Camera", "personal", "keep");
        assert!(added.ok, "{}", added.message);
        assert!(!added.persisted);
        assert_eq!(added.message, "Item added. Changes could not be saved.");

        let board = bridge.packing_board();
        assert!(!board.persisted);
        assert_eq!(board.columns[0].items.len(), 1);
        assert_eq!(board.columns[0].items[0].name, "Camera");

        let event = bridge.planner_add_event("Flight", "2024-3-5", None);
        assert!(event.ok, "{}", event.message);
        assert!(!event.persisted);
        let base = NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date");
        let month = bridge.calendar_month(base, 0);
        let day = month
            .days
            .iter()
            .find(|day| day.date_key == "2024-03-05")
            .expect("day present");
        assert_eq!(day.event_count, 1);
    }

    #[test]
    fn add_item_rejects_unknown_category_and_blank_name() {
        let (_dir, bridge) = temp_bridge();
        assert!(!bridge.packing_add_item("Rug", "garage", "keep").ok);
        assert!(!bridge.packing_add_item("   ", "room", "keep").ok);
        assert!(!bridge.packing_move_item("not-a-uuid", "keep").ok);
        assert!(bridge.packing_board().columns.iter().all(|c| c.items.is_empty()));
    }

    #[test]
    fn import_json_reports_counts_and_failures() {
        let (_dir, bridge) = temp_bridge();
        let ok = bridge.packing_import_json(
            r#"[{"name":"Spoon","category":"kitchen","bucket":"take-away"}]"#,
        );
        assert!(ok.ok);
        assert_eq!(ok.added, 1);
        assert_eq!(ok.message, "Imported 1 item.");

        let bad = bridge.packing_import_json("{]");
        assert!(!bad.ok);
        assert_eq!(bad.message, "Unable to read JSON file.");

        let reset = bridge.packing_reset();
        assert!(reset.ok);
        assert!(bridge.packing_board().columns.iter().all(|c| c.items.is_empty()));
    }

    #[test]
    fn planner_roundtrip_through_bridge() {
        let (_dir, bridge) = temp_bridge();
        let reminder = bridge.planner_add_reminder("Passport", Some("2024-03-04"));
        let reminder_id = reminder.entity_id.expect("reminder id");
        let event = bridge.planner_add_event("Flight", "2024-03-05", Some("  "));
        assert!(event.ok, "{}", event.message);

        let toggled = bridge.planner_toggle_reminder(&reminder_id);
        assert_eq!(toggled.message, "Reminder completed.");

        let snapshot = bridge.planner_snapshot();
        assert_eq!(snapshot.reminders[0].due_label.as_deref(), Some("Mar 4"));
        assert!(snapshot.reminders[0].completed);
        assert_eq!(snapshot.events[0].date_label, "Mar 5");
        assert_eq!(snapshot.events[0].note, None);

        assert!(!bridge.planner_add_event("Hotel", "soon", None).ok);
        assert!(bridge.planner_remove_reminder(&reminder_id).ok);
        assert!(bridge.planner_snapshot().reminders.is_empty());
    }

    #[test]
    fn calendar_month_counts_events_and_navigates() {
        let (_dir, bridge) = temp_bridge();
        bridge.planner_add_event("Flight", "2024-03-05", None);
        bridge.planner_add_event("Hotel", "2024-03-05", None);

        let base = NaiveDate::from_ymd_opt(2024, 2, 14).expect("valid date");
        let month = bridge.calendar_month(base, 1);

        assert_eq!(month.label, "March 2024");
        assert_eq!(month.month_key, "2024-03-01");
        assert_eq!(month.days.len() % 7, 0);
        let day = month
            .days
            .iter()
            .find(|day| day.date_key == "2024-03-05")
            .expect("day present");
        assert_eq!(day.event_count, 2);
        assert!(day.is_current_month);
    }

    #[test]
    fn calendar_month_export_falls_back_to_today_for_bad_anchor() {
        let month = calendar_month(Some("garbage".to_string()), 0);
        assert_eq!(month.weekday_labels[0], "Sun");
        assert!(!month.days.is_empty());
        assert_eq!(month.days.len() % 7, 0);
    }
}
