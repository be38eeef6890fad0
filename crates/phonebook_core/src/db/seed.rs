//! Default tag catalog and sample contacts inserted on first initialization.
//!
//! # Invariants
//! - A table is seeded only if it has never held a row (no `sqlite_sequence`
//!   entry), so re-running the seed is a no-op and permanently deleted sample
//!   contacts are never revived.
//! - Seed rows use fixed ids so sample contacts bind to the default tags.

use super::DbResult;
use log::info;
use rusqlite::{params, Connection, TransactionBehavior};

/// Fixed seed row for the `tags` table: `(id, icon, name)`.
pub(crate) const DEFAULT_TAGS: &[(i64, &str, &str)] = &[
    (1, "baseline_phone_android_24", "Mobile"),
    (2, "baseline_home_24", "Home"),
    (3, "baseline_family_restroom_24", "Family"),
    (4, "baseline_work_24", "Work"),
    (5, "baseline_office_24", "Office"),
    (6, "baseline_local_hospital_24", "Emergency"),
];

/// Fixed seed row for the `contacts` table: `(id, name, content, tag_id)`.
///
/// All flags start cleared.
const DEFAULT_CONTACTS: &[(i64, &str, &str, i64)] = &[
    (1, "John", "0927866309", 1),
    (2, "Wick", "0835532054", 2),
    (3, "Bensin", "0888889999", 3),
    (4, "Diesel", "0875822468", 4),
    (5, "Erdal", "0819119111", 5),
    (6, "Hospital", "027745555", 6),
];

/// Number of tags in the default catalog.
pub const DEFAULT_TAG_COUNT: usize = DEFAULT_TAGS.len();
/// Number of sample contacts inserted on first initialization.
pub const DEFAULT_CONTACT_COUNT: usize = DEFAULT_CONTACTS.len();

/// Inserts default tags and sample contacts into never-populated tables.
///
/// Safe to call on every open; returns the number of rows inserted.
pub fn seed_defaults(conn: &mut Connection) -> DbResult<usize> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let mut inserted = 0;

    if !table_ever_populated(&tx, "tags")? {
        for (id, icon, name) in DEFAULT_TAGS {
            inserted += tx.execute(
                "INSERT OR IGNORE INTO tags (id, icon, name) VALUES (?1, ?2, ?3);",
                params![id, icon, name],
            )?;
        }
    }

    if !table_ever_populated(&tx, "contacts")? {
        for (id, name, content, tag_id) in DEFAULT_CONTACTS {
            inserted += tx.execute(
                "INSERT OR IGNORE INTO contacts (
                    id,
                    name,
                    content,
                    can_be_checked_off,
                    is_checked_off,
                    tag_id,
                    in_trash,
                    is_favorite
                ) VALUES (?1, ?2, ?3, 0, 0, ?4, 0, 0);",
                params![id, name, content, tag_id],
            )?;
        }
    }

    tx.commit()?;

    if inserted > 0 {
        info!("event=db_seed module=db status=ok inserted_rows={inserted}");
    }
    Ok(inserted)
}

fn table_ever_populated(conn: &Connection, table: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_sequence WHERE name = ?1);",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
