//! Root composition object wiring the controller to navigation.
//!
//! # Responsibility
//! - Own exactly one `ContactController` and one `Router`.
//! - Translate screen-level actions into controller intents plus the screen
//!   transition that follows them.
//!
//! # Invariants
//! - A failed intent never changes the current screen.

use crate::model::contact::ContactId;
use crate::repo::contact_repo::{ContactRepository, SqliteContactRepository};
use crate::repo::tag_repo::{SqliteTagRepository, TagRepository};
use crate::routing::{Router, Screen};
use crate::service::contact_service::{ContactController, ServiceResult, ViewState};
use rusqlite::Connection;
use std::sync::Arc;

/// Controller backed by SQLite repositories borrowing one connection.
pub type SqliteContactController<'conn> =
    ContactController<SqliteContactRepository<'conn>, SqliteTagRepository<'conn>>;

/// Application session: controller state plus current screen.
pub struct PhonebookSession<C: ContactRepository, T: TagRepository> {
    controller: ContactController<C, T>,
    router: Router,
}

impl<'conn> PhonebookSession<SqliteContactRepository<'conn>, SqliteTagRepository<'conn>> {
    /// Builds a session over a migrated connection.
    pub fn open(conn: &'conn Connection) -> ServiceResult<Self> {
        let controller = ContactController::try_new(
            SqliteContactRepository::try_new(conn)?,
            SqliteTagRepository::try_new(conn)?,
        )?;
        Ok(Self::new(controller))
    }
}

impl<C: ContactRepository, T: TagRepository> PhonebookSession<C, T> {
    pub fn new(controller: ContactController<C, T>) -> Self {
        Self {
            controller,
            router: Router::new(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.router.current()
    }

    pub fn state(&self) -> Arc<ViewState> {
        self.controller.state()
    }

    pub fn controller(&self) -> &ContactController<C, T> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut ContactController<C, T> {
        &mut self.controller
    }

    /// Bottom-navigation or drawer selection.
    pub fn select_screen(&mut self, screen: Screen) {
        self.router.navigate_to(screen);
    }

    /// "New contact" action: blank entry, then the editor.
    pub fn create_new_contact(&mut self) {
        self.controller.start_new_contact();
        self.router.navigate_to(Screen::SaveContact);
    }

    /// Contact tap in a list: load it, then the editor.
    pub fn open_contact(&mut self, id: ContactId) -> ServiceResult<()> {
        self.controller.edit_contact(id)?;
        self.router.navigate_to(Screen::SaveContact);
        Ok(())
    }

    /// Save action in the editor; returns to the contacts list.
    pub fn save_entry(&mut self) -> ServiceResult<ContactId> {
        let id = self.controller.save_entry()?;
        self.router.navigate_to(Screen::ContactsList);
        Ok(id)
    }

    /// Confirmed "move to trash" in the editor; returns to the contacts list.
    pub fn trash_entry(&mut self) -> ServiceResult<()> {
        self.controller.move_entry_to_trash()?;
        self.router.navigate_to(Screen::ContactsList);
        Ok(())
    }

    /// Back action. Leaving the editor discards the staged entry.
    pub fn back(&mut self) -> Screen {
        if self.router.current() == Screen::SaveContact {
            self.controller.start_new_contact();
        }
        self.router.back()
    }
}
