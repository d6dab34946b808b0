//! File-backed blob store: one JSON record per account.
//!
//! Records live as `<name>.json` inside a single directory. Overwrites go
//! through a temp file in the same directory followed by an atomic rename,
//! so a crashed or failed write leaves the previous record intact.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::blob::AccountRecord;
use crate::error::{Result, VaultError};

use super::BlobStore;

/// A `BlobStore` over a directory of JSON record files.
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Directory this store reads and writes.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, name: &str) -> Result<PathBuf> {
        validate_account_name(name)?;
        Ok(self.dir.join(format!("{}.json", name)))
    }
}

/// Reject names that would escape the store directory or produce
/// surprising filenames.
fn validate_account_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(VaultError::InvalidInput(
            "Account name cannot be empty".to_string(),
        ));
    }
    if name.starts_with('.') || name.contains(['/', '\\', '\0']) {
        return Err(VaultError::InvalidInput(format!(
            "Account name contains unsupported characters: {}",
            name
        )));
    }
    Ok(())
}

impl BlobStore for JsonFileStore {
    fn load(&self, name: &str) -> Result<Option<AccountRecord>> {
        let path = self.record_path(name)?;
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let record = serde_json::from_slice(&bytes)
            .map_err(|e| VaultError::MalformedBlob(format!("record is not valid JSON: {}", e)))?;
        Ok(Some(record))
    }

    fn save(&mut self, name: &str, record: &AccountRecord) -> Result<()> {
        let path = self.record_path(name)?;
        let json = serde_json::to_vec_pretty(record)?;

        // Write to a sibling temp file, then rename over the target. The
        // previous record survives any failure before the rename commits.
        let mut tmp = NamedTempFile::new_in(&self.dir)
            .map_err(|e| VaultError::PersistFailed(format!("temp file creation failed: {}", e)))?;
        tmp.write_all(&json)
            .and_then(|_| tmp.flush())
            .map_err(|e| VaultError::PersistFailed(format!("record write failed: {}", e)))?;
        tmp.persist(&path)
            .map_err(|e| VaultError::PersistFailed(format!("record rename failed: {}", e)))?;
        Ok(())
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        let path = self.record_path(name)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(VaultError::AccountNotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for dir_entry in std::fs::read_dir(&self.dir)? {
            let path = dir_entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}
