//! Persisted record shapes for the `tags` and `contacts` tables.
//!
//! These mirror table columns one to one. Insert and update shapes are split
//! so an insert can never carry an identity and an update never rewrites the
//! trash flag.

use crate::model::contact::ContactId;
use crate::model::tag::TagId;

/// One row of the `tags` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    pub id: TagId,
    pub icon: String,
    pub name: String,
}

/// One row of the `contacts` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRecord {
    pub id: ContactId,
    pub name: String,
    pub content: String,
    pub can_be_checked_off: bool,
    pub is_checked_off: bool,
    pub tag_id: TagId,
    pub in_trash: bool,
    pub is_favorite: bool,
}

/// Insert-shaped contact row; identity is assigned by storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContactRecord {
    pub name: String,
    pub content: String,
    pub can_be_checked_off: bool,
    pub is_checked_off: bool,
    pub tag_id: TagId,
    /// Always `false` when produced by the mapper.
    pub in_trash: bool,
    pub is_favorite: bool,
}

/// Update-shaped contact row carrying an existing identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactUpdate {
    pub id: ContactId,
    pub name: String,
    pub content: String,
    pub can_be_checked_off: bool,
    pub is_checked_off: bool,
    pub tag_id: TagId,
    pub is_favorite: bool,
}
