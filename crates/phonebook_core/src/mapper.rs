//! Mapping between persisted record shapes and domain shapes.
//!
//! # Responsibility
//! - Join a contact record with its tag record into a domain `Contact`.
//! - Project the legacy checked-off columns into `Option<bool>` and back.
//! - Produce insert- or update-shaped records from a domain `Contact`.
//!
//! # Invariants
//! - A contact whose tag id has no matching tag is a data-integrity error;
//!   no default tag is ever substituted.
//! - Batch mapping preserves input order and stops at the first failure.

use crate::model::contact::{Contact, ContactId};
use crate::model::tag::{Tag, TagId};
use crate::repo::records::{ContactRecord, ContactUpdate, NewContactRecord, TagRecord};
use log::error;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Data-integrity failure raised while joining contacts with tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// The tag lookup has no entry for the contact's stored tag id.
    MissingTag {
        contact_id: ContactId,
        tag_id: TagId,
    },
    /// A tag was supplied but its id differs from the stored tag id.
    TagMismatch {
        contact_id: ContactId,
        expected_tag_id: TagId,
        actual_tag_id: TagId,
    },
}

impl Display for MapError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTag { contact_id, tag_id } => write!(
                f,
                "tag {tag_id} referenced by contact {contact_id} was not found"
            ),
            Self::TagMismatch {
                contact_id,
                expected_tag_id,
                actual_tag_id,
            } => write!(
                f,
                "contact {contact_id} references tag {expected_tag_id} but was joined with tag {actual_tag_id}"
            ),
        }
    }
}

impl Error for MapError {}

/// Output of [`to_persisted`]: which write a domain contact turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistedContact {
    Insert(NewContactRecord),
    Update(ContactUpdate),
}

/// Converts one tag record into a domain tag.
pub fn map_tag(record: &TagRecord) -> Tag {
    Tag::new(record.id, record.name.as_str(), record.icon.as_str())
}

/// Converts tag records into domain tags, preserving order.
pub fn map_tags(records: &[TagRecord]) -> Vec<Tag> {
    records.iter().map(map_tag).collect()
}

/// Builds a `tag id -> record` lookup for [`map_contacts`].
pub fn index_tags(records: &[TagRecord]) -> HashMap<TagId, TagRecord> {
    records
        .iter()
        .map(|record| (record.id, record.clone()))
        .collect()
}

/// Joins one contact record with its resolved tag record.
///
/// # Errors
/// - `MapError::TagMismatch` when `tag.id != record.tag_id`.
pub fn to_domain(record: &ContactRecord, tag: &TagRecord) -> Result<Contact, MapError> {
    if tag.id != record.tag_id {
        let err = MapError::TagMismatch {
            contact_id: record.id,
            expected_tag_id: record.tag_id,
            actual_tag_id: tag.id,
        };
        error!(
            "event=contact_map module=mapper status=error error_code=tag_mismatch contact_id={} tag_id={} joined_tag_id={}",
            record.id, record.tag_id, tag.id
        );
        return Err(err);
    }

    let is_checked_off = if record.can_be_checked_off {
        Some(record.is_checked_off)
    } else {
        None
    };

    Ok(Contact {
        id: record.id,
        name: record.name.clone(),
        content: record.content.clone(),
        is_checked_off,
        is_favorite: record.is_favorite,
        is_in_trash: record.in_trash,
        tag: map_tag(tag),
    })
}

/// Maps contact records against a tag lookup in one pass.
///
/// # Errors
/// - `MapError::MissingTag` for the first record whose tag is absent; the
///   remaining records are not mapped.
pub fn map_contacts(
    records: &[ContactRecord],
    tags_by_id: &HashMap<TagId, TagRecord>,
) -> Result<Vec<Contact>, MapError> {
    records
        .iter()
        .map(|record| {
            let tag = tags_by_id.get(&record.tag_id).ok_or_else(|| {
                error!(
                    "event=contact_map module=mapper status=error error_code=missing_tag contact_id={} tag_id={}",
                    record.id, record.tag_id
                );
                MapError::MissingTag {
                    contact_id: record.id,
                    tag_id: record.tag_id,
                }
            })?;
            to_domain(record, tag)
        })
        .collect()
}

/// Converts a domain contact into the record shape its save requires.
///
/// New contacts become inserts with the trash flag cleared; saved contacts
/// become updates keyed by their id.
pub fn to_persisted(contact: &Contact) -> PersistedContact {
    let can_be_checked_off = contact.is_checked_off.is_some();
    let is_checked_off = contact.is_checked_off.unwrap_or(false);

    if contact.is_new() {
        PersistedContact::Insert(NewContactRecord {
            name: contact.name.clone(),
            content: contact.content.clone(),
            can_be_checked_off,
            is_checked_off,
            tag_id: contact.tag.id,
            in_trash: false,
            is_favorite: contact.is_favorite,
        })
    } else {
        PersistedContact::Update(ContactUpdate {
            id: contact.id,
            name: contact.name.clone(),
            content: contact.content.clone(),
            can_be_checked_off,
            is_checked_off,
            tag_id: contact.tag.id,
            is_favorite: contact.is_favorite,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{index_tags, map_contacts, to_domain, to_persisted, MapError, PersistedContact};
    use crate::model::contact::{Contact, NEW_CONTACT_ID};
    use crate::model::tag::Tag;
    use crate::repo::records::{ContactRecord, TagRecord};

    fn work_tag() -> TagRecord {
        TagRecord {
            id: 4,
            icon: "baseline_work_24".to_string(),
            name: "Work".to_string(),
        }
    }

    fn record(id: i64, tag_id: i64) -> ContactRecord {
        ContactRecord {
            id,
            name: format!("contact {id}"),
            content: "0800".to_string(),
            can_be_checked_off: false,
            is_checked_off: true,
            tag_id,
            in_trash: false,
            is_favorite: false,
        }
    }

    #[test]
    fn cannot_be_checked_off_projects_to_none() {
        let contact = to_domain(&record(1, 4), &work_tag()).unwrap();
        assert_eq!(contact.is_checked_off, None);
        assert_eq!(contact.tag.name, "Work");
    }

    #[test]
    fn can_be_checked_off_carries_stored_flag() {
        let mut stored = record(1, 4);
        stored.can_be_checked_off = true;
        stored.is_checked_off = false;
        let contact = to_domain(&stored, &work_tag()).unwrap();
        assert_eq!(contact.is_checked_off, Some(false));
    }

    #[test]
    fn joining_with_wrong_tag_is_rejected() {
        let err = to_domain(&record(7, 2), &work_tag()).unwrap_err();
        assert!(matches!(
            err,
            MapError::TagMismatch {
                contact_id: 7,
                expected_tag_id: 2,
                actual_tag_id: 4
            }
        ));
    }

    #[test]
    fn batch_keeps_order_and_stops_on_missing_tag() {
        let tags = index_tags(&[work_tag()]);
        let mapped = map_contacts(&[record(3, 4), record(1, 4), record(2, 4)], &tags).unwrap();
        let ids: Vec<i64> = mapped.iter().map(|contact| contact.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);

        let err = map_contacts(&[record(1, 4), record(2, 9)], &tags).unwrap_err();
        assert_eq!(
            err,
            MapError::MissingTag {
                contact_id: 2,
                tag_id: 9
            }
        );
    }

    #[test]
    fn new_contact_becomes_insert_with_trash_cleared() {
        let contact = Contact {
            name: "Ada".to_string(),
            is_checked_off: Some(true),
            is_in_trash: true,
            tag: Tag::new(4, "Work", "baseline_work_24"),
            ..Contact::default()
        };
        assert_eq!(contact.id, NEW_CONTACT_ID);

        match to_persisted(&contact) {
            PersistedContact::Insert(insert) => {
                assert!(!insert.in_trash);
                assert!(insert.can_be_checked_off);
                assert!(insert.is_checked_off);
                assert_eq!(insert.tag_id, 4);
            }
            other => panic!("expected insert, got {other:?}"),
        }
    }

    #[test]
    fn saved_contact_becomes_update_with_same_id() {
        let contact = to_domain(&record(5, 4), &work_tag()).unwrap();
        match to_persisted(&contact) {
            PersistedContact::Update(update) => {
                assert_eq!(update.id, 5);
                assert!(!update.can_be_checked_off);
                assert!(!update.is_checked_off);
            }
            other => panic!("expected update, got {other:?}"),
        }
    }
}
