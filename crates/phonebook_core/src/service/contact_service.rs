//! Contact view-state controller.
//!
//! # Responsibility
//! - Own the read projections (active, trash, favorites, tags), the staged
//!   edit entry and the trash-view selection.
//! - Expose every contact mutation intent; this is the single path from a
//!   UI to storage.
//! - Publish an immutable `ViewState` snapshot to observers after each change.
//!
//! # Invariants
//! - Projections are reloaded from storage and published before a mutating
//!   intent returns; a failed write leaves the published state untouched.
//! - Trashed contacts never appear in `contacts` or `favorites`.
//! - Batch restore/delete isolates per-item failures and clears the
//!   selection only after every item has resolved.
//! - Calls are serialized through `&mut self`, so writes to one contact are
//!   applied in submission order.

use crate::mapper::{
    index_tags, map_contacts, map_tags, to_domain, to_persisted, MapError, PersistedContact,
};
use crate::model::contact::{Contact, ContactId};
use crate::model::tag::{Tag, TagId};
use crate::repo::contact_repo::{ContactListQuery, ContactRepository};
use crate::repo::tag_repo::TagRepository;
use crate::repo::{RepoError, RepoResult};
use crate::service::trash_view::{TrashAction, TrashFilter};
use log::{debug, info, warn};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by controller intents.
#[derive(Debug)]
pub enum ServiceError {
    /// Persisted contact references a tag that does not exist.
    DataIntegrity(MapError),
    /// Storage-layer failure.
    Repo(RepoError),
    /// Target contact does not exist.
    NotFound(ContactId),
    /// Contact is already in trash.
    AlreadyInTrash(ContactId),
    /// Contact is expected in trash but is not.
    NotInTrash(ContactId),
    /// Operation needs a saved contact but the entry was never saved.
    UnsavedEntry,
    /// Selected tag is not part of the catalog.
    TagNotFound(TagId),
    /// UI sent a selection this controller does not recognize.
    InvalidIntent(String),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DataIntegrity(err) => write!(f, "data integrity violation: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "contact not found: {id}"),
            Self::AlreadyInTrash(id) => write!(f, "contact already in trash: {id}"),
            Self::NotInTrash(id) => write!(f, "contact is not in trash: {id}"),
            Self::UnsavedEntry => write!(f, "contact entry has not been saved yet"),
            Self::TagNotFound(id) => write!(f, "tag not found in catalog: {id}"),
            Self::InvalidIntent(details) => write!(f, "invalid intent: {details}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DataIntegrity(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<MapError> for ServiceError {
    fn from(value: MapError) -> Self {
        Self::DataIntegrity(value)
    }
}

/// One failed item of a batch restore/delete.
#[derive(Debug)]
pub struct BatchFailure {
    pub id: ContactId,
    pub error: ServiceError,
}

/// Per-item outcome of a batch restore/delete.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Ids whose write was committed, in request order.
    pub succeeded: Vec<ContactId>,
    /// Ids whose write failed, in request order.
    pub failed: Vec<BatchFailure>,
}

impl BatchReport {
    /// Returns whether every item succeeded.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn failed_ids(&self) -> Vec<ContactId> {
        self.failed.iter().map(|failure| failure.id).collect()
    }
}

/// Immutable snapshot of everything a UI renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// Contacts not in trash, in display order.
    pub contacts: Vec<Contact>,
    /// Contacts in trash, in display order.
    pub trash: Vec<Contact>,
    /// Favorite contacts not in trash, in display order.
    pub favorites: Vec<Contact>,
    /// Tag catalog ordered by id.
    pub tags: Vec<Tag>,
    /// Contact being created or edited.
    pub entry: Contact,
    /// Contacts selected in the trash view.
    pub selected: BTreeSet<ContactId>,
}

impl ViewState {
    /// Trash contacts visible under the given trash-view tab.
    pub fn trash_filtered(&self, filter: TrashFilter) -> Vec<&Contact> {
        self.trash
            .iter()
            .filter(|contact| filter.matches(contact))
            .collect()
    }

    pub fn is_selected(&self, id: ContactId) -> bool {
        self.selected.contains(&id)
    }

    /// Whether batch trash actions should be offered.
    pub fn has_selection(&self) -> bool {
        !self.selected.is_empty()
    }

    /// Tag used for fresh entries: the first catalog tag.
    pub fn default_tag(&self) -> Tag {
        self.tags.first().cloned().unwrap_or_default()
    }
}

/// Handle returned by [`ContactController::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&ViewState)>;

/// View-state controller over contact and tag repositories.
pub struct ContactController<C: ContactRepository, T: TagRepository> {
    contacts: C,
    tags: T,
    state: Arc<ViewState>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl<C: ContactRepository, T: TagRepository> ContactController<C, T> {
    /// Creates a controller and loads the initial projections.
    ///
    /// # Errors
    /// - `DataIntegrity` when a stored contact references a missing tag.
    /// - `Repo` on storage failure.
    pub fn try_new(contacts: C, tags: T) -> ServiceResult<Self> {
        let (contact_list, tag_list) = load_catalog(&contacts, &tags)?;
        let default_tag = tag_list.first().cloned().unwrap_or_default();
        let state = project(
            contact_list,
            tag_list,
            Contact::new_entry(default_tag),
            BTreeSet::new(),
        );

        Ok(Self {
            contacts,
            tags,
            state: Arc::new(state),
            observers: Vec::new(),
            next_subscription: 0,
        })
    }

    /// Returns the latest published snapshot.
    pub fn state(&self) -> Arc<ViewState> {
        Arc::clone(&self.state)
    }

    /// Registers an observer called with every newly published snapshot.
    pub fn subscribe(&mut self, observer: impl FnMut(&ViewState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes an observer; returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(current, _)| *current != id);
        self.observers.len() != before
    }

    /// Reloads every projection from storage and publishes it.
    pub fn refresh(&mut self) -> ServiceResult<()> {
        let entry = self.state.entry.clone();
        let selected = self.state.selected.clone();
        self.reload(entry, selected)
    }

    /// Resets the entry to a blank contact bound to the default tag.
    pub fn start_new_contact(&mut self) {
        let mut next = (*self.state).clone();
        next.entry = Contact::new_entry(next.default_tag());
        self.publish(next);
    }

    /// Loads a stored contact into the entry for editing.
    ///
    /// # Errors
    /// - `NotFound` when no contact has `id`; the entry is left unchanged.
    /// - `DataIntegrity` when its tag is missing.
    pub fn edit_contact(&mut self, id: ContactId) -> ServiceResult<()> {
        let record = self
            .contacts
            .get_contact(id)?
            .ok_or(ServiceError::NotFound(id))?;
        let tag = self
            .tags
            .get_tag(record.tag_id)?
            .ok_or(MapError::MissingTag {
                contact_id: record.id,
                tag_id: record.tag_id,
            })?;
        let contact = to_domain(&record, &tag)?;

        let mut next = (*self.state).clone();
        next.entry = contact;
        self.publish(next);
        Ok(())
    }

    /// Replaces the entry with an edited copy. Nothing is persisted.
    pub fn change_entry(&mut self, entry: Contact) {
        let mut next = (*self.state).clone();
        next.entry = entry;
        self.publish(next);
    }

    /// Rebinds the entry to a catalog tag.
    ///
    /// # Errors
    /// - `TagNotFound` when `tag_id` is not in the catalog.
    pub fn select_tag(&mut self, tag_id: TagId) -> ServiceResult<()> {
        let tag = self
            .state
            .tags
            .iter()
            .find(|tag| tag.id == tag_id)
            .cloned()
            .ok_or(ServiceError::TagNotFound(tag_id))?;

        let mut next = (*self.state).clone();
        next.entry.tag = tag;
        self.publish(next);
        Ok(())
    }

    /// Persists the entry (insert for new, update otherwise) and clears it.
    ///
    /// Returns the saved contact id.
    ///
    /// # Errors
    /// - Storage failures are returned and the entry is kept for retry.
    pub fn save_entry(&mut self) -> ServiceResult<ContactId> {
        let (id, mode) = match to_persisted(&self.state.entry) {
            PersistedContact::Insert(record) => (self.contacts.insert_contact(&record), "insert"),
            PersistedContact::Update(record) => {
                let id = record.id;
                (self.contacts.update_contact(&record).map(|()| id), "update")
            }
        };
        let id = log_write("contact_save", mode, id)?;

        let entry = Contact::new_entry(self.state.default_tag());
        let selected = self.state.selected.clone();
        self.reload(entry, selected)?;
        Ok(id)
    }

    /// Flips the favorite flag of a stored contact and persists it.
    ///
    /// Returns the new favorite value.
    pub fn toggle_favorite(&mut self, id: ContactId) -> ServiceResult<bool> {
        let record = self
            .contacts
            .get_contact(id)?
            .ok_or(ServiceError::NotFound(id))?;
        let is_favorite = !record.is_favorite;
        log_write(
            "contact_favorite",
            if is_favorite { "set" } else { "clear" },
            self.contacts.set_favorite(id, is_favorite).map(|()| id),
        )?;

        self.refresh()?;
        Ok(is_favorite)
    }

    /// Soft-deletes a stored contact.
    ///
    /// # Errors
    /// - `NotFound`, `AlreadyInTrash`, or a storage failure.
    pub fn move_to_trash(&mut self, id: ContactId) -> ServiceResult<()> {
        let record = self
            .contacts
            .get_contact(id)?
            .ok_or(ServiceError::NotFound(id))?;
        if record.in_trash {
            return Err(ServiceError::AlreadyInTrash(id));
        }
        log_write(
            "contact_trash",
            "move",
            self.contacts.set_in_trash(id, true).map(|()| id),
        )?;

        self.refresh()
    }

    /// Soft-deletes the contact currently in the entry and clears the entry.
    ///
    /// # Errors
    /// - `UnsavedEntry` when the entry was never saved.
    pub fn move_entry_to_trash(&mut self) -> ServiceResult<()> {
        if self.state.entry.is_new() {
            return Err(ServiceError::UnsavedEntry);
        }
        self.move_to_trash(self.state.entry.id)?;
        self.start_new_contact();
        Ok(())
    }

    /// Adds or removes a contact from the trash-view selection.
    ///
    /// Returns whether the contact is selected afterwards.
    pub fn toggle_selection(&mut self, id: ContactId) -> bool {
        let mut next = (*self.state).clone();
        let selected = if next.selected.remove(&id) {
            false
        } else {
            next.selected.insert(id)
        };
        self.publish(next);
        selected
    }

    /// Restores trashed contacts one by one.
    ///
    /// Items that are missing or not in trash fail individually. The listed
    /// ids leave the selection once every item has resolved.
    pub fn restore_contacts(&mut self, ids: &[ContactId]) -> ServiceResult<BatchReport> {
        let report = self.run_batch("contact_restore", ids, |contacts, id| {
            let record = contacts
                .get_contact(id)?
                .ok_or(ServiceError::NotFound(id))?;
            if !record.in_trash {
                return Err(ServiceError::NotInTrash(id));
            }
            contacts.set_in_trash(id, false)?;
            Ok(())
        });
        self.finish_batch(ids, report)
    }

    /// Permanently removes contacts one by one.
    pub fn delete_contacts_forever(&mut self, ids: &[ContactId]) -> ServiceResult<BatchReport> {
        let report = self.run_batch("contact_delete", ids, |contacts, id| {
            contacts.delete_contact(id)?;
            Ok(())
        });
        self.finish_batch(ids, report)
    }

    /// Restores every selected contact.
    pub fn restore_selected(&mut self) -> ServiceResult<BatchReport> {
        let ids: Vec<ContactId> = self.state.selected.iter().copied().collect();
        self.restore_contacts(&ids)
    }

    /// Permanently removes every selected contact.
    pub fn delete_selected_forever(&mut self) -> ServiceResult<BatchReport> {
        let ids: Vec<ContactId> = self.state.selected.iter().copied().collect();
        self.delete_contacts_forever(&ids)
    }

    /// Runs the batch behind a confirmed trash-view dialog.
    pub fn confirm_trash_action(&mut self, action: TrashAction) -> ServiceResult<BatchReport> {
        match action {
            TrashAction::Restore => self.restore_selected(),
            TrashAction::DeleteForever => self.delete_selected_forever(),
        }
    }

    fn run_batch(
        &self,
        event: &str,
        ids: &[ContactId],
        apply: impl Fn(&C, ContactId) -> ServiceResult<()>,
    ) -> BatchReport {
        let mut report = BatchReport::default();
        for &id in ids {
            match apply(&self.contacts, id) {
                Ok(()) => report.succeeded.push(id),
                Err(error) => {
                    warn!(
                        "event={event} module=service status=error contact_id={id} error={error}"
                    );
                    report.failed.push(BatchFailure { id, error });
                }
            }
        }
        info!(
            "event={} module=service status=ok requested={} succeeded={} failed={}",
            event,
            ids.len(),
            report.succeeded.len(),
            report.failed.len()
        );
        report
    }

    fn finish_batch(
        &mut self,
        ids: &[ContactId],
        report: BatchReport,
    ) -> ServiceResult<BatchReport> {
        let mut selected = self.state.selected.clone();
        for id in ids {
            selected.remove(id);
        }
        let entry = self.state.entry.clone();
        self.reload(entry, selected)?;
        Ok(report)
    }

    fn reload(&mut self, entry: Contact, selected: BTreeSet<ContactId>) -> ServiceResult<()> {
        let (contact_list, tag_list) = load_catalog(&self.contacts, &self.tags)?;
        self.publish(project(contact_list, tag_list, entry, selected));
        Ok(())
    }

    fn publish(&mut self, next: ViewState) {
        self.state = Arc::new(next);
        let state = Arc::clone(&self.state);
        for (_, observer) in self.observers.iter_mut() {
            observer(state.as_ref());
        }
        debug!(
            "event=view_publish module=service status=ok contacts={} trash={} favorites={} selected={}",
            state.contacts.len(),
            state.trash.len(),
            state.favorites.len(),
            state.selected.len()
        );
    }
}

fn load_catalog<C: ContactRepository, T: TagRepository>(
    contacts: &C,
    tags: &T,
) -> ServiceResult<(Vec<Contact>, Vec<Tag>)> {
    let tag_records = tags.list_tags()?;
    let contact_records = contacts.list_contacts(&ContactListQuery::all())?;
    let mapped = map_contacts(&contact_records, &index_tags(&tag_records))?;
    Ok((mapped, map_tags(&tag_records)))
}

fn project(
    all: Vec<Contact>,
    tags: Vec<Tag>,
    entry: Contact,
    selected: BTreeSet<ContactId>,
) -> ViewState {
    let (mut trash, mut contacts): (Vec<Contact>, Vec<Contact>) =
        all.into_iter().partition(|contact| contact.is_in_trash);
    contacts.sort_by(Contact::cmp_by_name);
    trash.sort_by(Contact::cmp_by_name);
    let favorites = contacts
        .iter()
        .filter(|contact| contact.is_favorite)
        .cloned()
        .collect();

    ViewState {
        contacts,
        trash,
        favorites,
        tags,
        entry,
        selected,
    }
}

fn log_write(event: &str, mode: &str, result: RepoResult<ContactId>) -> ServiceResult<ContactId> {
    match result {
        Ok(id) => {
            info!("event={event} module=service status=ok mode={mode} contact_id={id}");
            Ok(id)
        }
        Err(err) => {
            warn!("event={event} module=service status=error mode={mode} error={err}");
            Err(err.into())
        }
    }
}
