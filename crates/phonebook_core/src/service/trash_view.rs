//! Trash-view tab filter and batch dialog actions.
//!
//! Unknown tab indexes or dialog names are programming faults in the caller
//! and are rejected with `ServiceError::InvalidIntent` instead of guessed.

use crate::model::contact::Contact;
use crate::service::contact_service::ServiceError;
use serde::{Deserialize, Serialize};

/// Tab of the trash view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrashFilter {
    /// Contacts that cannot be checked off.
    Regular,
    /// Contacts that carry a checked-off flag.
    Hidden,
}

impl TrashFilter {
    /// Tabs in display order; the index is what `try_from` accepts.
    pub const TABS: [TrashFilter; 2] = [TrashFilter::Regular, TrashFilter::Hidden];

    pub fn label(self) -> &'static str {
        match self {
            Self::Regular => "REGULAR",
            Self::Hidden => "HIDE",
        }
    }

    pub fn matches(self, contact: &Contact) -> bool {
        match self {
            Self::Regular => contact.is_checked_off.is_none(),
            Self::Hidden => contact.is_checked_off.is_some(),
        }
    }
}

impl TryFrom<usize> for TrashFilter {
    type Error = ServiceError;

    fn try_from(tab_index: usize) -> Result<Self, Self::Error> {
        Self::TABS
            .get(tab_index)
            .copied()
            .ok_or_else(|| {
                ServiceError::InvalidIntent(format!("trash tab not supported: {tab_index}"))
            })
    }
}

/// Batch action confirmed from the trash view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrashAction {
    Restore,
    DeleteForever,
}

impl TrashAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Restore => "restore",
            Self::DeleteForever => "delete_forever",
        }
    }

    /// Confirmation dialog title.
    pub fn title(self) -> &'static str {
        match self {
            Self::Restore => "Restore contacts",
            Self::DeleteForever => "Delete contacts forever",
        }
    }

    /// Confirmation dialog body.
    pub fn text(self) -> &'static str {
        match self {
            Self::Restore => "Are you sure you want to restore selected contacts?",
            Self::DeleteForever => {
                "Are you sure you want to delete selected contacts permanently?"
            }
        }
    }
}

impl TryFrom<&str> for TrashAction {
    type Error = ServiceError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "restore" => Ok(Self::Restore),
            "delete_forever" => Ok(Self::DeleteForever),
            other => Err(ServiceError::InvalidIntent(format!(
                "trash dialog not supported: `{other}`"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{TrashAction, TrashFilter};
    use crate::model::contact::Contact;
    use crate::service::contact_service::ServiceError;

    #[test]
    fn tab_index_maps_to_filter_and_rejects_unknown() {
        assert_eq!(TrashFilter::try_from(0_usize).unwrap(), TrashFilter::Regular);
        assert_eq!(TrashFilter::try_from(1_usize).unwrap(), TrashFilter::Hidden);
        let err = TrashFilter::try_from(2_usize).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidIntent(_)));
    }

    #[test]
    fn filter_splits_on_checked_off_presence() {
        let plain = Contact::default();
        let checkable = Contact {
            is_checked_off: Some(false),
            ..Contact::default()
        };
        assert!(TrashFilter::Regular.matches(&plain));
        assert!(!TrashFilter::Regular.matches(&checkable));
        assert!(TrashFilter::Hidden.matches(&checkable));
    }

    #[test]
    fn dialog_names_roundtrip_and_unknown_fails_fast() {
        for action in [TrashAction::Restore, TrashAction::DeleteForever] {
            assert_eq!(TrashAction::try_from(action.as_str()).unwrap(), action);
            assert!(!action.title().is_empty());
        }
        assert!(matches!(
            TrashAction::try_from("archive"),
            Err(ServiceError::InvalidIntent(_))
        ));
    }
}
