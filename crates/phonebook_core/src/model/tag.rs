//! Tag (contact category) domain model.

use crate::db::seed::DEFAULT_TAGS;
use serde::{Deserialize, Serialize};

/// Stable integer identity of a tag row.
pub type TagId = i64;

/// Named category with an icon reference, attached to every contact.
///
/// Tags are seeded once and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    /// Icon resource name resolved by the presentation layer.
    pub icon: String,
}

impl Tag {
    pub fn new(id: TagId, name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            icon: icon.into(),
        }
    }

    /// Returns the first tag of the built-in catalog (`Mobile`).
    pub fn default_tag() -> Self {
        let (id, icon, name) = DEFAULT_TAGS[0];
        Self::new(id, name, icon)
    }
}

impl Default for Tag {
    fn default() -> Self {
        Self::default_tag()
    }
}
