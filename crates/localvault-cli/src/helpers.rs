//! Input helpers: passphrase prompts, confirmations, entry id lookup.

use dialoguer::{Confirm, Password};
use uuid::Uuid;
use zeroize::Zeroizing;

use localvault_core::crypto::validate_passphrase;
use localvault_core::VaultDocument;

/// Prompt for an existing passphrase, or read LOCALVAULT_PASSPHRASE.
pub fn prompt_passphrase(prompt: &str) -> anyhow::Result<Zeroizing<String>> {
    if let Ok(value) = std::env::var("LOCALVAULT_PASSPHRASE") {
        if !value.trim().is_empty() {
            return Ok(Zeroizing::new(value));
        }
    }
    Password::new()
        .with_prompt(prompt)
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read passphrase: {}", e))
}

/// Prompt for a new passphrase with confirmation, enforcing the policy,
/// or read LOCALVAULT_PASSPHRASE.
pub fn prompt_new_passphrase(prompt: &str) -> anyhow::Result<Zeroizing<String>> {
    if let Ok(value) = std::env::var("LOCALVAULT_PASSPHRASE") {
        if !value.trim().is_empty() {
            validate_passphrase(&value)
                .map_err(|e| anyhow::anyhow!("Passphrase does not meet requirements: {}", e))?;
            return Ok(Zeroizing::new(value));
        }
    }
    loop {
        let passphrase = Password::new()
            .with_prompt(prompt)
            .with_confirmation("Confirm passphrase", "Passphrases do not match")
            .interact()
            .map(Zeroizing::new)
            .map_err(|e| anyhow::anyhow!("Failed to read passphrase: {}", e))?;
        if let Err(err) = validate_passphrase(&passphrase) {
            eprintln!("Passphrase does not meet requirements: {}", err);
            continue;
        }
        return Ok(passphrase);
    }
}

/// Ask a yes/no question unless `assume_yes` short-circuits it.
pub fn confirm(prompt: &str, assume_yes: bool) -> anyhow::Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read confirmation: {}", e))
}

/// Resolve a full UUID or a unique id prefix against the document.
pub fn resolve_entry_id(document: &VaultDocument, needle: &str) -> anyhow::Result<Uuid> {
    if let Ok(id) = Uuid::parse_str(needle) {
        return Ok(id);
    }

    let needle = needle.to_lowercase();
    let matches: Vec<Uuid> = document
        .entries(None)
        .map(|e| e.id)
        .filter(|id| id.to_string().starts_with(&needle))
        .collect();

    match matches.as_slice() {
        [id] => Ok(*id),
        [] => Err(anyhow::anyhow!("No entry matches id '{}'", needle)),
        _ => Err(anyhow::anyhow!(
            "Id prefix '{}' is ambiguous ({} matches); use more characters",
            needle,
            matches.len()
        )),
    }
}
