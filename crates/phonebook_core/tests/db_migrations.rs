use phonebook_core::db::migrations::latest_version;
use phonebook_core::db::{
    open_db, open_db_in_memory, seed_defaults, DbError, DEFAULT_CONTACT_COUNT, DEFAULT_TAG_COUNT,
};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "tags");
    assert_table_exists(&conn, "contacts");
}

#[test]
fn first_open_seeds_default_catalog_and_contacts() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(row_count(&conn, "tags"), DEFAULT_TAG_COUNT as i64);
    assert_eq!(row_count(&conn, "contacts"), DEFAULT_CONTACT_COUNT as i64);

    let names: Vec<String> = {
        let mut stmt = conn.prepare("SELECT name FROM tags ORDER BY id;").unwrap();
        let rows = stmt.query_map([], |row| row.get(0)).unwrap();
        rows.collect::<Result<_, _>>().unwrap()
    };
    assert_eq!(
        names,
        vec!["Mobile", "Home", "Family", "Work", "Office", "Emergency"]
    );

    let orphaned: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM contacts c LEFT JOIN tags t ON t.id = c.tag_id WHERE t.id IS NULL;",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(orphaned, 0);
}

#[test]
fn seeding_twice_does_not_duplicate_rows() {
    let mut conn = open_db_in_memory().unwrap();

    assert_eq!(seed_defaults(&mut conn).unwrap(), 0);
    assert_eq!(seed_defaults(&mut conn).unwrap(), 0);
    assert_eq!(row_count(&conn, "tags"), DEFAULT_TAG_COUNT as i64);
    assert_eq!(row_count(&conn, "contacts"), DEFAULT_CONTACT_COUNT as i64);
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("phonebook.sqlite3");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_eq!(row_count(&conn_second, "tags"), DEFAULT_TAG_COUNT as i64);
    assert_eq!(
        row_count(&conn_second, "contacts"),
        DEFAULT_CONTACT_COUNT as i64
    );
}

#[test]
fn deleted_sample_contact_is_not_revived_on_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("phonebook.sqlite3");

    let conn = open_db(&path).unwrap();
    conn.execute("DELETE FROM contacts WHERE id = 1;", []).unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(
        row_count(&conn, "contacts"),
        DEFAULT_CONTACT_COUNT as i64 - 1
    );
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

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

fn row_count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
    .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
