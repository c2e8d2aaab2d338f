use chrono::NaiveDate;
use expense_core::db::migrations::latest_version;
use expense_core::db::{open_db, open_db_in_memory, DbError};
use expense_core::{
    Category, Expense, ExpenseDraft, ExpenseRepository, ExpenseStore, KeyValueStore, KvError,
    KvExpenseRepository, MemoryKvStore, SqliteKvStore, EXPENSES_STORAGE_KEY,
};
use rusqlite::Connection;

fn sample(title: &str, amount: &str, on: &str) -> Expense {
    Expense::from_draft(
        &ExpenseDraft::new(title, amount)
            .with_date(NaiveDate::parse_from_str(on, "%Y-%m-%d").unwrap()),
    )
    .unwrap()
}

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'kv_entries'
            );",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn sqlite_kv_store_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteKvStore::try_new(&conn) {
        Err(KvError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn sqlite_kv_store_get_and_overwrite() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKvStore::try_new(&conn).unwrap();

    assert_eq!(kv.get("theme").unwrap(), None);
    kv.set("theme", "dark").unwrap();
    kv.set("theme", "light").unwrap();
    assert_eq!(kv.get("theme").unwrap().as_deref(), Some("light"));

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn repository_saves_json_array_under_fixed_key() {
    let kv = MemoryKvStore::new();
    let repo = KvExpenseRepository::new(&kv);
    let coffee = sample("Coffee", "3.50", "2024-01-02");

    repo.save(std::slice::from_ref(&coffee)).unwrap();

    let raw = kv.get(EXPENSES_STORAGE_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let items = value.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], coffee.id.as_str());
    assert_eq!(items[0]["amount"], 3.5);
    assert_eq!(items[0]["date"], "2024-01-02");
    assert_eq!(repo.load(), vec![coffee]);
}

#[test]
fn absent_or_malformed_value_loads_as_empty() {
    let kv = MemoryKvStore::new();
    let repo = KvExpenseRepository::new(&kv);
    assert!(repo.load().is_empty());

    kv.set(EXPENSES_STORAGE_KEY, "{not json").unwrap();
    assert!(repo.load().is_empty());

    kv.set(EXPENSES_STORAGE_KEY, r#"{"id":"1"}"#).unwrap();
    assert!(repo.load().is_empty());
}

#[test]
fn invalid_records_are_skipped_on_load() {
    let kv = MemoryKvStore::new();
    kv.set(
        EXPENSES_STORAGE_KEY,
        r#"[
            {"id":"1","title":"Coffee","amount":3.5,"category":"Food","date":"2024-01-02","notes":""},
            {"id":"2","title":"","amount":2,"category":"Transport","date":"2024-01-01","notes":""},
            {"id":"3","title":"Refund","amount":-5,"category":"Other","date":"2024-01-01"}
        ]"#,
    )
    .unwrap();

    let loaded = KvExpenseRepository::new(&kv).load();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id.as_str(), "1");
}

#[test]
fn undecodable_record_does_not_discard_valid_ones() {
    let kv = MemoryKvStore::new();
    kv.set(
        EXPENSES_STORAGE_KEY,
        r#"[
            {"id":"1","title":"Rent","amount":900,"category":"Utilities","date":"2024-01-02","notes":""},
            {"id":"2","title":"Gift","amount":25,"category":"Shopping","date":"","notes":""},
            {"id":"3","title":"Lottery","amount":2,"category":"Gambling","date":"2024-01-01"},
            {"id":"4","amount":4,"category":"Food","date":"2024-01-01"}
        ]"#,
    )
    .unwrap();

    let mut store = ExpenseStore::open(KvExpenseRepository::new(&kv));
    assert_eq!(store.len(), 1);
    assert_eq!(store.list()[0].title, "Rent");

    store
        .add(
            &ExpenseDraft::new("Coffee", "3.50")
                .with_date(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()),
        )
        .unwrap();

    let reloaded = KvExpenseRepository::new(&kv).load();
    assert_eq!(reloaded.len(), 2);
    assert!(reloaded.iter().any(|expense| expense.id.as_str() == "1"));
}

#[test]
fn custom_key_isolates_lists() {
    let kv = MemoryKvStore::new();
    let work = KvExpenseRepository::with_key(&kv, "workExpenses");
    let home = KvExpenseRepository::new(&kv);

    work.save(&[sample("Taxi", "18", "2024-02-01")]).unwrap();

    assert_eq!(work.key(), "workExpenses");
    assert_eq!(work.load().len(), 1);
    assert!(home.load().is_empty());
}

#[test]
fn file_backed_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("expenses.sqlite3");

    let id = {
        let conn = open_db(&path).unwrap();
        let kv = SqliteKvStore::try_new(&conn).unwrap();
        let mut store = ExpenseStore::open(KvExpenseRepository::new(kv));
        let draft = ExpenseDraft::new("Electricity", "64.20")
            .with_category(Category::Utilities)
            .with_date(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        let id = store.add(&draft).unwrap();
        id
    };

    let conn = open_db(&path).unwrap();
    let kv = SqliteKvStore::try_new(&conn).unwrap();
    let store = ExpenseStore::open(KvExpenseRepository::new(kv));

    assert_eq!(store.len(), 1);
    let reloaded = store.get(&id).unwrap();
    assert_eq!(reloaded.title, "Electricity");
    assert_eq!(reloaded.category, Category::Utilities);
    assert_eq!(reloaded.amount, 64.2);
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}
