//! Entry commands: add, list, show, edit, remove.
//!
//! Each command is a single unlock-operate-lock cycle; the session never
//! outlives the process.

use serde_json::json;

use localvault_core::crypto::generate_password;
use localvault_core::document::{EntryUpdate, NewEntry};
use localvault_core::{JsonFileStore, SessionManager};

use crate::cli::{AddArgs, Cli, EditArgs, ListArgs, RemoveArgs, ShowArgs};
use crate::config::open_manager;
use crate::helpers::{confirm, prompt_passphrase, resolve_entry_id};
use crate::output::{entries_table, local_time, short_id, status};

fn unlock(cli: &Cli, account: &str) -> anyhow::Result<SessionManager<JsonFileStore>> {
    let mut mgr = open_manager(cli)?;
    let passphrase = prompt_passphrase(&format!("Passphrase for '{}'", account))?;
    mgr.unlock(account, &passphrase)?;
    Ok(mgr)
}

pub fn handle_add(cli: &Cli, args: &AddArgs) -> anyhow::Result<()> {
    let secret = match (&args.secret, args.generate) {
        (Some(secret), None) => secret.clone(),
        (None, Some(length)) => generate_password(length)?,
        (None, None) => prompt_passphrase("Secret value")?.to_string(),
        (Some(_), Some(_)) => {
            return Err(anyhow::anyhow!("--secret and --generate are mutually exclusive"))
        }
    };

    let mut mgr = unlock(cli, &args.account)?;
    let id = mgr.mutate(|doc| {
        doc.add_entry(NewEntry {
            title: args.title.clone(),
            username: args.username.clone(),
            secret,
            notes: args.notes.clone(),
        })
    })?;

    status(
        cli.quiet,
        &format!("Added entry '{}' ({}).", args.title, short_id(&id)),
    );
    Ok(())
}

pub fn handle_list(cli: &Cli, args: &ListArgs) -> anyhow::Result<()> {
    let mut mgr = unlock(cli, &args.account)?;
    let filter = args.filter.as_deref();

    if args.json {
        let entries = mgr.with_document(|doc| {
            doc.entries(filter)
                .map(|e| {
                    json!({
                        "id": e.id,
                        "title": e.title,
                        "username": e.username,
                        "notes": e.notes,
                        "createdAt": e.created_at,
                        "updatedAt": e.updated_at,
                    })
                })
                .collect::<Vec<_>>()
        })?;
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    let (table, shown, total) = mgr.with_document(|doc| {
        (
            entries_table(doc.entries(filter)),
            doc.entries(filter).count(),
            doc.len(),
        )
    })?;

    if total == 0 {
        status(cli.quiet, &format!("No entries yet in '{}'.", args.account));
        return Ok(());
    }
    if shown == 0 {
        status(cli.quiet, "No entries match the filter.");
        return Ok(());
    }
    println!("{}", table);
    Ok(())
}

pub fn handle_show(cli: &Cli, args: &ShowArgs) -> anyhow::Result<()> {
    let mut mgr = unlock(cli, &args.account)?;

    let entry = mgr.with_document(|doc| {
        let id = resolve_entry_id(doc, &args.id)?;
        doc.entry(id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("No entry matches id '{}'", args.id))
    })??;

    println!("Title:    {}", entry.title);
    println!("Username: {}", entry.username);
    if args.reveal {
        println!("Secret:   {}", entry.secret);
    } else {
        println!("Secret:   ******** (use --reveal to print)");
    }
    if !entry.notes.is_empty() {
        println!("Notes:    {}", entry.notes);
    }
    println!("Created:  {}", local_time(entry.created_at));
    println!("Updated:  {}", local_time(entry.updated_at));
    Ok(())
}

pub fn handle_edit(cli: &Cli, args: &EditArgs) -> anyhow::Result<()> {
    let secret = match (&args.secret, args.generate) {
        (Some(secret), None) => Some(secret.clone()),
        (None, Some(length)) => Some(generate_password(length)?),
        (None, None) => None,
        (Some(_), Some(_)) => {
            return Err(anyhow::anyhow!("--secret and --generate are mutually exclusive"))
        }
    };

    if args.title.is_none() && args.username.is_none() && secret.is_none() && args.notes.is_none() {
        return Err(anyhow::anyhow!("Nothing to change; pass at least one field"));
    }

    let mut mgr = unlock(cli, &args.account)?;
    let id = mgr.with_document(|doc| resolve_entry_id(doc, &args.id))??;
    mgr.mutate(|doc| {
        doc.update_entry(
            id,
            EntryUpdate {
                title: args.title.clone(),
                username: args.username.clone(),
                secret,
                notes: args.notes.clone(),
            },
        )
    })?;

    status(cli.quiet, &format!("Updated entry {}.", short_id(&id)));
    Ok(())
}

pub fn handle_remove(cli: &Cli, args: &RemoveArgs) -> anyhow::Result<()> {
    let mut mgr = unlock(cli, &args.account)?;
    let (id, title) = mgr.with_document(|doc| {
        let id = resolve_entry_id(doc, &args.id)?;
        let title = doc
            .entry(id)
            .map(|e| e.title.clone())
            .unwrap_or_default();
        anyhow::Ok((id, title))
    })??;

    if !confirm(&format!("Delete entry '{}'?", title), args.yes)? {
        status(cli.quiet, "Aborted.");
        return Ok(());
    }

    mgr.mutate(|doc| doc.remove_entry(id))?;
    status(cli.quiet, &format!("Removed entry '{}'.", title));
    Ok(())
}
