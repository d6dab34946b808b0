//! Account lifecycle commands: list, create, delete, rotate.

use crate::cli::{Cli, CreateArgs, DeleteArgs, RotateArgs};
use crate::config::open_manager;
use crate::helpers::{confirm, prompt_new_passphrase, prompt_passphrase};
use crate::output::status;

pub fn handle_accounts(cli: &Cli) -> anyhow::Result<()> {
    let mgr = open_manager(cli)?;
    let accounts = mgr.list_accounts()?;

    if accounts.is_empty() {
        status(cli.quiet, "No accounts yet. Create one with `localvault create <name>`.");
        return Ok(());
    }
    for name in accounts {
        println!("{}", name);
    }
    Ok(())
}

pub fn handle_create(cli: &Cli, args: &CreateArgs) -> anyhow::Result<()> {
    let mut mgr = open_manager(cli)?;
    let passphrase = prompt_new_passphrase("Master passphrase")?;

    mgr.create_account(&args.name, &passphrase)?;
    status(
        cli.quiet,
        &format!(
            "Created account '{}'. Keep the passphrase safe - it cannot be recovered.",
            args.name
        ),
    );
    Ok(())
}

pub fn handle_delete(cli: &Cli, args: &DeleteArgs) -> anyhow::Result<()> {
    let mut mgr = open_manager(cli)?;

    let question = format!(
        "Delete account '{}' and its encrypted data? This cannot be undone.",
        args.name
    );
    if !confirm(&question, args.yes)? {
        status(cli.quiet, "Aborted.");
        return Ok(());
    }

    mgr.delete_account(&args.name)?;
    status(cli.quiet, &format!("Deleted account '{}'.", args.name));
    Ok(())
}

pub fn handle_rotate(cli: &Cli, args: &RotateArgs) -> anyhow::Result<()> {
    let mut mgr = open_manager(cli)?;
    let old = prompt_passphrase("Current master passphrase")?;
    let new = prompt_new_passphrase("New master passphrase")?;

    mgr.rotate(&args.name, &old, &new)?;
    status(
        cli.quiet,
        &format!("Master passphrase updated for '{}'.", args.name),
    );
    Ok(())
}
