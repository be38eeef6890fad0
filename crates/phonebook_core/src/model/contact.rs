//! Contact domain model.
//!
//! # Responsibility
//! - Define the canonical in-memory contact shape.
//! - Provide the ordering used by every sorted projection.
//!
//! # Invariants
//! - `id == NEW_CONTACT_ID` only for staged, never-saved contacts.
//! - `is_checked_off == None` means the contact cannot be checked off.

use crate::model::tag::Tag;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Stable integer identity of a contact row.
pub type ContactId = i64;

/// Identity carried by a contact that has not been persisted yet.
pub const NEW_CONTACT_ID: ContactId = -1;

/// Contact as seen by the controller and the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    /// Phone number, stored verbatim.
    pub content: String,
    /// Legacy tri-state flag; `None` when the contact cannot be checked off.
    pub is_checked_off: Option<bool>,
    pub is_favorite: bool,
    pub is_in_trash: bool,
    pub tag: Tag,
}

impl Contact {
    /// Creates a blank staged contact bound to `tag`.
    pub fn new_entry(tag: Tag) -> Self {
        Self {
            id: NEW_CONTACT_ID,
            name: String::new(),
            content: String::new(),
            is_checked_off: None,
            is_favorite: false,
            is_in_trash: false,
            tag,
        }
    }

    /// Returns whether this contact has never been saved.
    pub fn is_new(&self) -> bool {
        self.id == NEW_CONTACT_ID
    }

    /// Total display order: case-insensitive name, then exact name, then id.
    pub fn cmp_by_name(&self, other: &Self) -> Ordering {
        self.name
            .to_lowercase()
            .cmp(&other.name.to_lowercase())
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl Default for Contact {
    fn default() -> Self {
        Self::new_entry(Tag::default_tag())
    }
}

#[cfg(test)]
mod tests {
    use super::{Contact, NEW_CONTACT_ID};
    use std::cmp::Ordering;

    fn named(id: i64, name: &str) -> Contact {
        Contact {
            id,
            name: name.to_string(),
            ..Contact::default()
        }
    }

    #[test]
    fn default_entry_is_new_and_bound_to_mobile() {
        let entry = Contact::default();
        assert_eq!(entry.id, NEW_CONTACT_ID);
        assert!(entry.is_new());
        assert_eq!(entry.tag.name, "Mobile");
        assert_eq!(entry.is_checked_off, None);
    }

    #[test]
    fn name_order_ignores_case_and_breaks_ties_by_id() {
        assert_eq!(named(2, "alice").cmp_by_name(&named(1, "Bob")), Ordering::Less);
        assert_eq!(named(1, "Ann").cmp_by_name(&named(2, "Ann")), Ordering::Less);
        assert_eq!(named(3, "Ann").cmp_by_name(&named(2, "Ann")), Ordering::Greater);
    }
}
