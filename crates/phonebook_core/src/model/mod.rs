//! Domain model for the contact book.
//!
//! # Responsibility
//! - Define the in-memory shapes used by the controller and callers.
//! - Keep persisted column details out of domain types.
//!
//! # Invariants
//! - Every `Contact` carries a resolved `Tag`, never a bare tag id.
//! - `NEW_CONTACT_ID` marks a staged contact that has not been saved yet.

pub mod contact;
pub mod tag;
