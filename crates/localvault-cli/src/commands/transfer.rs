//! Export and import of sealed account records.
//!
//! Both sides move ciphertext only; nothing here requires or touches a
//! passphrase.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use chrono::{SecondsFormat, Utc};

use localvault_core::ExportRecord;

use crate::cli::{Cli, ExportArgs, ImportArgs};
use crate::config::open_manager;
use crate::helpers::confirm;
use crate::output::status;

fn default_export_path(account: &str) -> PathBuf {
    let stamp = Utc::now()
        .to_rfc3339_opts(SecondsFormat::Secs, true)
        .replace(':', "-");
    PathBuf::from(format!("localvault-{}-export-{}.json", account, stamp))
}

pub fn handle_export(cli: &Cli, args: &ExportArgs) -> anyhow::Result<()> {
    let mgr = open_manager(cli)?;
    let export = mgr.export_account(&args.name)?;

    let path = args
        .out
        .clone()
        .unwrap_or_else(|| default_export_path(&args.name));
    let json = serde_json::to_string_pretty(&export)?;
    fs::write(&path, json)
        .with_context(|| format!("Failed to write export to {}", path.display()))?;

    status(
        cli.quiet,
        &format!(
            "Exported '{}' to {}. The file is encrypted; the passphrase is still required to open it.",
            args.name,
            path.display()
        ),
    );
    Ok(())
}

pub fn handle_import(cli: &Cli, args: &ImportArgs) -> anyhow::Result<()> {
    let json = fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let export: ExportRecord = serde_json::from_str(&json)
        .with_context(|| format!("{} is not a vault export", args.file.display()))?;

    let mut mgr = open_manager(cli)?;

    let mut overwrite = args.overwrite;
    if !overwrite && mgr.list_accounts()?.iter().any(|n| n == &export.account_name) {
        let question = format!(
            "Account '{}' already exists. Overwrite its encrypted data?",
            export.account_name
        );
        if !confirm(&question, false)? {
            status(cli.quiet, "Aborted.");
            return Ok(());
        }
        overwrite = true;
    }

    mgr.import_account(&export, overwrite)?;
    status(
        cli.quiet,
        &format!("Imported account '{}'.", export.account_name),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_export_path_shape() {
        let path = default_export_path("work");
        let name = path.to_string_lossy();
        assert!(name.starts_with("localvault-work-export-"));
        assert!(name.ends_with(".json"));
        assert!(!name.contains(':'));
    }
}
