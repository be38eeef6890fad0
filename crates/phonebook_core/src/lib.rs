//! Core domain logic for the PhoneBook contact book.
//! This crate is the single source of truth for contact lifecycle invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod mapper;
pub mod model;
pub mod repo;
pub mod routing;
pub mod service;
pub mod session;

pub use config::PhonebookConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use mapper::{MapError, PersistedContact};
pub use model::contact::{Contact, ContactId, NEW_CONTACT_ID};
pub use model::tag::{Tag, TagId};
pub use repo::contact_repo::{ContactListQuery, ContactRepository, SqliteContactRepository};
pub use repo::records::{ContactRecord, ContactUpdate, NewContactRecord, TagRecord};
pub use repo::tag_repo::{SqliteTagRepository, TagRepository};
pub use repo::{RepoError, RepoResult};
pub use routing::{Router, Screen};
pub use service::contact_service::{
    BatchFailure, BatchReport, ContactController, ServiceError, ServiceResult, SubscriptionId,
    ViewState,
};
pub use service::trash_view::{TrashAction, TrashFilter};
pub use session::{PhonebookSession, SqliteContactController};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
