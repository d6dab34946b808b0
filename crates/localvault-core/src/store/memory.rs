//! In-memory blob store.
//!
//! Backs tests and embedders that manage durability themselves. Records
//! are cloned in and out so callers never alias the stored value.

use std::collections::HashMap;

use crate::blob::AccountRecord;
use crate::error::{Result, VaultError};

use super::BlobStore;

/// A `BlobStore` over a plain `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: HashMap<String, AccountRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryStore {
    fn load(&self, name: &str) -> Result<Option<AccountRecord>> {
        Ok(self.records.get(name).cloned())
    }

    fn save(&mut self, name: &str, record: &AccountRecord) -> Result<()> {
        self.records.insert(name.to_string(), record.clone());
        Ok(())
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        self.records
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| VaultError::AccountNotFound(name.to_string()))
    }

    fn list(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.records.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record() -> AccountRecord {
        AccountRecord {
            salt: "c2FsdA==".to_string(),
            nonce: "bm9uY2U=".to_string(),
            ciphertext: "Y2lwaGVydGV4dA==".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_save_load_round_trip() {
        let mut store = MemoryStore::new();
        let rec = record();

        store.save("work", &rec).unwrap();
        assert_eq!(store.load("work").unwrap(), Some(rec));
        assert_eq!(store.load("missing").unwrap(), None);
    }

    #[test]
    fn test_list_sorted() {
        let mut store = MemoryStore::new();
        store.save("work", &record()).unwrap();
        store.save("home", &record()).unwrap();

        assert_eq!(store.list().unwrap(), vec!["home", "work"]);
    }

    #[test]
    fn test_delete() {
        let mut store = MemoryStore::new();
        store.save("work", &record()).unwrap();

        store.delete("work").unwrap();
        assert!(!store.contains("work").unwrap());

        let result = store.delete("work");
        assert!(matches!(result, Err(VaultError::AccountNotFound(_))));
    }
}
