//! Terminal output helpers: error styling and entry tables.

use chrono::{DateTime, Local, Utc};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Table};
use owo_colors::OwoColorize;

use localvault_core::Entry;

/// Print a styled error line to stderr.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "error:".red().bold(), message);
}

/// Print a one-line status message unless quiet.
pub fn status(quiet: bool, message: &str) {
    if !quiet {
        println!("{}", message);
    }
}

/// First 8 characters of a UUID, enough to address entries in a vault.
pub fn short_id(id: &uuid::Uuid) -> String {
    id.to_string().chars().take(8).collect()
}

/// Render a timestamp in the local timezone.
pub fn local_time(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Render entries as a table. Secrets are never included.
pub fn entries_table<'a>(entries: impl Iterator<Item = &'a Entry>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["ID", "Title", "Username", "Updated"]);
    for entry in entries {
        table.add_row(vec![
            Cell::new(short_id(&entry.id)),
            Cell::new(&entry.title),
            Cell::new(&entry.username),
            Cell::new(local_time(entry.updated_at)),
        ]);
    }
    table
}
