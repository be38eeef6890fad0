//! Contact repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and lifecycle (trash/restore/favorite/delete) APIs over the
//!   `contacts` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Inserts never carry a caller-chosen identity.
//! - Updates never rewrite `in_trash`; trash state moves only through
//!   `set_in_trash`.
//! - Lists are returned in id (insertion) order.

use crate::model::contact::ContactId;
use crate::repo::records::{ContactRecord, ContactUpdate, NewContactRecord};
use crate::repo::{bool_to_int, ensure_table_ready, int_to_bool, RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const CONTACT_SELECT_SQL: &str = "SELECT
    id,
    name,
    content,
    can_be_checked_off,
    is_checked_off,
    tag_id,
    in_trash,
    is_favorite
FROM contacts";

const CONTACT_COLUMNS: &[&str] = &[
    "id",
    "name",
    "content",
    "can_be_checked_off",
    "is_checked_off",
    "tag_id",
    "in_trash",
    "is_favorite",
];

/// Query options for listing contacts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactListQuery {
    /// `Some(flag)` restricts to rows with `in_trash = flag`.
    pub in_trash: Option<bool>,
    /// Restricts to rows with `is_favorite = 1`.
    pub favorites_only: bool,
}

impl ContactListQuery {
    /// Every row regardless of trash or favorite state.
    pub fn all() -> Self {
        Self::default()
    }

    /// Rows not in trash.
    pub fn active() -> Self {
        Self {
            in_trash: Some(false),
            favorites_only: false,
        }
    }

    /// Rows in trash.
    pub fn trashed() -> Self {
        Self {
            in_trash: Some(true),
            favorites_only: false,
        }
    }
}

/// Repository interface for contact persistence.
pub trait ContactRepository {
    fn insert_contact(&self, record: &NewContactRecord) -> RepoResult<ContactId>;
    fn update_contact(&self, record: &ContactUpdate) -> RepoResult<()>;
    fn get_contact(&self, id: ContactId) -> RepoResult<Option<ContactRecord>>;
    fn list_contacts(&self, query: &ContactListQuery) -> RepoResult<Vec<ContactRecord>>;
    fn set_in_trash(&self, id: ContactId, in_trash: bool) -> RepoResult<()>;
    fn set_favorite(&self, id: ContactId, is_favorite: bool) -> RepoResult<()>;
    /// Removes the row permanently.
    fn delete_contact(&self, id: ContactId) -> RepoResult<()>;
}

/// SQLite-backed contact repository.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, "contacts", CONTACT_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn insert_contact(&self, record: &NewContactRecord) -> RepoResult<ContactId> {
        self.conn.execute(
            "INSERT INTO contacts (
                name,
                content,
                can_be_checked_off,
                is_checked_off,
                tag_id,
                in_trash,
                is_favorite
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                record.name.as_str(),
                record.content.as_str(),
                bool_to_int(record.can_be_checked_off),
                bool_to_int(record.is_checked_off),
                record.tag_id,
                bool_to_int(record.in_trash),
                bool_to_int(record.is_favorite),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_contact(&self, record: &ContactUpdate) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE contacts
             SET
                name = ?1,
                content = ?2,
                can_be_checked_off = ?3,
                is_checked_off = ?4,
                tag_id = ?5,
                is_favorite = ?6
             WHERE id = ?7;",
            params![
                record.name.as_str(),
                record.content.as_str(),
                bool_to_int(record.can_be_checked_off),
                bool_to_int(record.is_checked_off),
                record.tag_id,
                bool_to_int(record.is_favorite),
                record.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(record.id));
        }

        Ok(())
    }

    fn get_contact(&self, id: ContactId) -> RepoResult<Option<ContactRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_contact_row(row)?));
        }

        Ok(None)
    }

    fn list_contacts(&self, query: &ContactListQuery) -> RepoResult<Vec<ContactRecord>> {
        let mut sql = format!("{CONTACT_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(in_trash) = query.in_trash {
            sql.push_str(" AND in_trash = ?");
            bind_values.push(Value::Integer(bool_to_int(in_trash)));
        }

        if query.favorites_only {
            sql.push_str(" AND is_favorite = 1");
        }

        sql.push_str(" ORDER BY id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut contacts = Vec::new();

        while let Some(row) = rows.next()? {
            contacts.push(parse_contact_row(row)?);
        }

        Ok(contacts)
    }

    fn set_in_trash(&self, id: ContactId, in_trash: bool) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE contacts SET in_trash = ?1 WHERE id = ?2;",
            params![bool_to_int(in_trash), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn set_favorite(&self, id: ContactId, is_favorite: bool) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE contacts SET is_favorite = ?1 WHERE id = ?2;",
            params![bool_to_int(is_favorite), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_contact(&self, id: ContactId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM contacts WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_contact_row(row: &Row<'_>) -> RepoResult<ContactRecord> {
    Ok(ContactRecord {
        id: row.get("id")?,
        name: row.get("name")?,
        content: row.get("content")?,
        can_be_checked_off: int_to_bool(
            row.get("can_be_checked_off")?,
            "contacts.can_be_checked_off",
        )?,
        is_checked_off: int_to_bool(row.get("is_checked_off")?, "contacts.is_checked_off")?,
        tag_id: row.get("tag_id")?,
        in_trash: int_to_bool(row.get("in_trash")?, "contacts.in_trash")?,
        is_favorite: int_to_bool(row.get("is_favorite")?, "contacts.is_favorite")?,
    })
}
