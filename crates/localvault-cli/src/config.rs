//! Vault directory resolution.

use std::path::PathBuf;

use anyhow::Context;

use localvault_core::{JsonFileStore, SessionConfig, SessionManager};

use crate::cli::Cli;

/// Resolve the directory holding account blobs:
/// `--vault-dir` / `LOCALVAULT_DIR`, falling back to the platform data
/// directory (e.g. `~/.local/share/localvault`).
pub fn resolve_vault_dir(cli: &Cli) -> anyhow::Result<PathBuf> {
    if let Some(dir) = &cli.vault_dir {
        return Ok(dir.clone());
    }
    let base = dirs::data_dir()
        .context("Could not determine a data directory; pass --vault-dir or set LOCALVAULT_DIR")?;
    Ok(base.join("localvault"))
}

/// Build the engine over the resolved vault directory.
pub fn open_manager(cli: &Cli) -> anyhow::Result<SessionManager<JsonFileStore>> {
    let dir = resolve_vault_dir(cli)?;
    let store = JsonFileStore::new(&dir)
        .with_context(|| format!("Failed to open vault directory {}", dir.display()))?;
    Ok(SessionManager::new(store, SessionConfig::default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Commands;

    fn cli_with_dir(dir: Option<PathBuf>) -> Cli {
        Cli {
            vault_dir: dir,
            command: Commands::Accounts,
            quiet: true,
        }
    }

    #[test]
    fn test_explicit_vault_dir_wins() {
        let dir = tempfile::tempdir().unwrap();
        let cli = cli_with_dir(Some(dir.path().to_path_buf()));
        assert_eq!(resolve_vault_dir(&cli).unwrap(), dir.path());
    }

    #[test]
    fn test_open_manager_creates_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("vaults");
        let cli = cli_with_dir(Some(nested.clone()));
        let mgr = open_manager(&cli).unwrap();
        assert!(nested.is_dir());
        assert!(mgr.list_accounts().unwrap().is_empty());
    }
}
