//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `phonebook_core` linkage and store bootstrap end to end.
//! - Print the seeded projections in a deterministic layout.
//!
//! Usage: `phonebook_cli [config.json]`

use phonebook_core::{PhonebookConfig, PhonebookSession};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("phonebook_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => PhonebookConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => PhonebookConfig::default(),
    };
    config.init_logging()?;

    let conn = config.open_store()?;
    let session = PhonebookSession::open(&conn)?;
    let state = session.state();

    println!("phonebook_core version={}", phonebook_core::core_version());
    println!(
        "screen={} contacts={} favorites={} trash={} tags={}",
        session.screen().as_str(),
        state.contacts.len(),
        state.favorites.len(),
        state.trash.len(),
        state.tags.len()
    );
    for contact in &state.contacts {
        let favorite = if contact.is_favorite { " *" } else { "" };
        println!(
            "  [{}] {} {} ({}){}",
            contact.id, contact.name, contact.content, contact.tag.name, favorite
        );
    }
    log::info!(
        "event=cli_smoke module=cli status=ok contacts={}",
        state.contacts.len()
    );
    Ok(())
}
