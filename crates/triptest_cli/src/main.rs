//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `triptest_core` linkage and storage bootstrap from a terminal.
//! - Optionally import a packing JSON file, then print the board and the
//!   current month grid.
//!
//! Usage: `triptest_cli [items.json]`. Storage path comes from
//! `TRIPTEST_DB_PATH`, defaulting to the temp directory.

use chrono::Local;
use std::path::PathBuf;
use std::process::ExitCode;
use triptest_core::db::open_db;
use triptest_core::{
    date_key, import_from_file, month_grid_with_counts, month_label, PackingStore,
    SqliteKeyValueSurface, TripPlannerStore, WEEKDAY_LABELS,
};

const DB_FILE_NAME: &str = "triptest.sqlite3";

fn main() -> ExitCode {
    println!("triptest_core ping={}", triptest_core::ping());
    println!("triptest_core version={}", triptest_core::core_version());

    let db_path = resolve_db_path();
    let conn = match open_db(&db_path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("cannot open {}: {err}", db_path.display());
            return ExitCode::FAILURE;
        }
    };

    let mut packing = PackingStore::open(SqliteKeyValueSurface::new(&conn));
    if let Some(path) = std::env::args_os().nth(1) {
        let report = import_from_file(&mut packing, &path);
        println!("{}", report.message());
        if let Some(failure) = &report.failure {
            eprintln!("import failed: {failure}");
            return ExitCode::FAILURE;
        }
    }

    for column in packing.buckets() {
        println!("\n{} ({})", column.label, column.items.len());
        for item in column.items {
            println!("  - {} [{}]", item.name, item.category.label());
        }
    }

    let planner = TripPlannerStore::open(SqliteKeyValueSurface::new(&conn));
    let today = Local::now().date_naive();
    println!("\n{}", month_label(today));
    println!("{}", WEEKDAY_LABELS.map(|day| format!("{day:>4}")).concat());
    let days = month_grid_with_counts(today, &planner.events_by_date());
    for week in days.chunks(7) {
        let row: String = week
            .iter()
            .map(|day| {
                let marker = if day.event_count > 0 { '*' } else { ' ' };
                if day.is_current_month {
                    format!("{:>3}{marker}", day.day)
                } else {
                    "    ".to_string()
                }
            })
            .collect();
        println!("{row}");
    }
    println!("today={}", date_key(today));

    ExitCode::SUCCESS
}

fn resolve_db_path() -> PathBuf {
    match std::env::var("TRIPTEST_DB_PATH") {
        Ok(raw) if !raw.trim().is_empty() => PathBuf::from(raw.trim()),
        _ => std::env::temp_dir().join(DB_FILE_NAME),
    }
}
