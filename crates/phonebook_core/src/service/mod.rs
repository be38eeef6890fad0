//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate mapper and repository calls into UI-facing intents.
//! - Keep UI layers decoupled from storage details.

pub mod contact_service;
pub mod trash_view;
