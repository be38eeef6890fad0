//! Tag catalog repository.
//!
//! The catalog is seeded at first initialization and read-only afterwards,
//! so this contract exposes reads only.

use crate::model::tag::TagId;
use crate::repo::records::TagRecord;
use crate::repo::{ensure_table_ready, RepoResult};
use rusqlite::{Connection, Row};

const TAG_COLUMNS: &[&str] = &["id", "icon", "name"];

/// Repository interface for the tag catalog.
pub trait TagRepository {
    /// Returns every tag ordered by id.
    fn list_tags(&self) -> RepoResult<Vec<TagRecord>>;
    fn get_tag(&self, id: TagId) -> RepoResult<Option<TagRecord>>;
}

/// SQLite-backed tag repository.
pub struct SqliteTagRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTagRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, "tags", TAG_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl TagRepository for SqliteTagRepository<'_> {
    fn list_tags(&self) -> RepoResult<Vec<TagRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, icon, name FROM tags ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut tags = Vec::new();
        while let Some(row) = rows.next()? {
            tags.push(parse_tag_row(row)?);
        }
        Ok(tags)
    }

    fn get_tag(&self, id: TagId) -> RepoResult<Option<TagRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, icon, name FROM tags WHERE id = ?1;")?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_tag_row(row)?));
        }
        Ok(None)
    }
}

fn parse_tag_row(row: &Row<'_>) -> RepoResult<TagRecord> {
    Ok(TagRecord {
        id: row.get("id")?,
        icon: row.get("icon")?,
        name: row.get("name")?,
    })
}
