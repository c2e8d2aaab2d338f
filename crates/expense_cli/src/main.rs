//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `expense_core` linkage and storage bootstrap end to end.
//! - Print a deterministic summary of the stored expenses.
//!
//! Usage: `expense_cli [DB_PATH] [LOG_DIR]`. Without a path, or with
//! `:memory:`, an in-memory database is used, which always reports zero
//! records. With `LOG_DIR`, core events are written to rolling log files
//! there.

use expense_core::db::{open_db, open_db_in_memory};
use expense_core::{
    default_log_level, format_amount, init_logging, ExpenseStore, KvExpenseRepository,
    SqliteKvStore,
};
use std::path::Path;
use std::process::ExitCode;

const IN_MEMORY_DB: &str = ":memory:";

fn main() -> ExitCode {
    println!("expense_core ping={}", expense_core::ping());
    println!("expense_core version={}", expense_core::core_version());

    let mut args = std::env::args().skip(1);
    let db_path = args.next();
    let log_dir = args.next();

    match start_logging(log_dir.as_deref()).and_then(|()| run(db_path)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("expense_cli error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn start_logging(log_dir: Option<&str>) -> Result<(), String> {
    let Some(log_dir) = log_dir else {
        return Ok(());
    };
    // init_logging only takes absolute directories.
    let log_dir = std::env::current_dir()
        .map_err(|err| format!("logging init failed: {err}"))?
        .join(Path::new(log_dir));
    init_logging(default_log_level(), &log_dir.to_string_lossy())
        .map_err(|err| format!("logging init failed: {err}"))
}

fn run(db_path: Option<String>) -> Result<(), String> {
    let conn = match db_path.as_deref() {
        Some(path) if path != IN_MEMORY_DB => open_db(path),
        _ => open_db_in_memory(),
    }
    .map_err(|err| format!("db open failed: {err}"))?;
    let kv = SqliteKvStore::try_new(&conn).map_err(|err| format!("kv init failed: {err}"))?;
    let store = ExpenseStore::open(KvExpenseRepository::new(kv));

    let summary = store.summary();
    println!("expenses count={}", store.len());
    println!("expenses total={}", format_amount(summary.display_total()));
    for share in summary.shares() {
        println!(
            "category name={} value={} percent={:.1}",
            share.name,
            format_amount(share.value),
            share.percent
        );
    }
    Ok(())
}
