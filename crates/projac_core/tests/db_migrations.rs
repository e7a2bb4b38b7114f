use projac_core::db::migrations::latest_version;
use projac_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "areas");
    assert_table_exists(&conn, "sub_areas");
    assert_table_exists(&conn, "researchers");
    assert_table_exists(&conn, "funding_agencies");
    assert_table_exists(&conn, "projects");
    assert_table_exists(&conn, "researcher_projects");
    assert_table_exists(&conn, "amounts_raised");
    assert_table_exists(&conn, "academic_outputs");
}

#[test]
fn agency_link_column_exists_after_migrations() {
    let conn = open_db_in_memory().unwrap();

    let mut stmt = conn.prepare("PRAGMA table_info(amounts_raised);").unwrap();
    let mut rows = stmt.query([]).unwrap();
    let mut found = false;
    while let Some(row) = rows.next().unwrap() {
        let column: String = row.get(1).unwrap();
        if column == "agency_uuid" {
            found = true;
        }
    }
    assert!(found, "amounts_raised.agency_uuid should exist");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("projac.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "projects");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
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

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table `{table}` should exist");
}
