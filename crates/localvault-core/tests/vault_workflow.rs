//! End-to-end engine workflows: account lifecycle, session discipline,
//! rotation, auto-lock, and persistence-failure handling.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use localvault_core::document::{EntryUpdate, NewEntry};
use localvault_core::store::BlobStore;
use localvault_core::{
    AccountRecord, JsonFileStore, MemoryStore, Result, SessionConfig, SessionManager, VaultError,
};

/// Fast KDF settings for tests; the floor is still enforced.
fn test_config() -> SessionConfig {
    SessionConfig {
        auto_lock_after: Duration::from_secs(300),
        kdf_iterations: 100_000,
    }
}

fn manager() -> SessionManager<MemoryStore> {
    SessionManager::new(MemoryStore::new(), test_config())
}

fn mail_entry() -> NewEntry {
    NewEntry {
        title: "Mail".to_string(),
        username: "a@b.com".to_string(),
        secret: "pw1".to_string(),
        notes: String::new(),
    }
}

#[test]
fn test_create_unlock_add_lock_unlock_list() {
    let mut mgr = manager();
    mgr.create_account("work", "Sup3rSecret!").unwrap();

    mgr.unlock("work", "Sup3rSecret!").unwrap();
    mgr.mutate(|doc| doc.add_entry(mail_entry())).unwrap();
    mgr.lock();
    assert!(!mgr.is_unlocked());

    mgr.unlock("work", "Sup3rSecret!").unwrap();
    let entries = mgr
        .with_document(|doc| {
            doc.entries(None)
                .map(|e| (e.title.clone(), e.secret.clone()))
                .collect::<Vec<_>>()
        })
        .unwrap();

    assert_eq!(entries, vec![("Mail".to_string(), "pw1".to_string())]);
}

#[test]
fn test_wrong_passphrase_leaves_blob_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path()).unwrap();
    let mut mgr = SessionManager::new(store, test_config());
    mgr.create_account("work", "Sup3rSecret!").unwrap();

    let blob_path = dir.path().join("work.json");
    let before = std::fs::read(&blob_path).unwrap();

    let result = mgr.unlock("work", "wrong");
    assert!(matches!(result, Err(VaultError::UnlockFailed)));
    assert!(!mgr.is_unlocked());

    let after = std::fs::read(&blob_path).unwrap();
    assert_eq!(before, after, "failed unlock must not modify the blob");
}

#[test]
fn test_corrupted_record_is_indistinguishable_from_wrong_passphrase() {
    let mut mgr = manager();
    mgr.create_account("work", "Sup3rSecret!").unwrap();

    // Flip a ciphertext byte in the stored record
    let mut export = mgr.export_account("work").unwrap();
    let mut raw = {
        use base64::engine::general_purpose::STANDARD;
        use base64::Engine;
        STANDARD.decode(&export.blob.ciphertext).unwrap()
    };
    raw[0] ^= 0x01;
    export.blob.ciphertext = {
        use base64::engine::general_purpose::STANDARD;
        use base64::Engine;
        STANDARD.encode(&raw)
    };
    mgr.import_account(&export, true).unwrap();

    let result = mgr.unlock("work", "Sup3rSecret!");
    assert!(matches!(result, Err(VaultError::UnlockFailed)));
}

#[test]
fn test_mutations_advance_updated_at_and_refresh_nonce() {
    let mut mgr = manager();
    mgr.create_account("work", "Sup3rSecret!").unwrap();
    let created = mgr.export_account("work").unwrap().blob;

    mgr.unlock("work", "Sup3rSecret!").unwrap();
    mgr.mutate(|doc| doc.add_entry(mail_entry())).unwrap();

    let mutated = mgr.export_account("work").unwrap().blob;
    assert_eq!(mutated.created_at, created.created_at);
    assert!(mutated.updated_at >= created.updated_at);
    assert_ne!(mutated.nonce, created.nonce);
    assert_ne!(mutated.ciphertext, created.ciphertext);
    // Salt only changes on rotation
    assert_eq!(mutated.salt, created.salt);
}

#[test]
fn test_update_and_remove_round_trip_through_storage() {
    let mut mgr = manager();
    mgr.create_account("work", "Sup3rSecret!").unwrap();
    mgr.unlock("work", "Sup3rSecret!").unwrap();

    let id = mgr.mutate(|doc| doc.add_entry(mail_entry())).unwrap();
    mgr.mutate(|doc| {
        doc.update_entry(
            id,
            EntryUpdate {
                secret: Some("pw2".to_string()),
                ..Default::default()
            },
        )
    })
    .unwrap();

    mgr.lock();
    mgr.unlock("work", "Sup3rSecret!").unwrap();
    let secret = mgr
        .with_document(|doc| doc.entry(id).map(|e| e.secret.clone()))
        .unwrap();
    assert_eq!(secret.as_deref(), Some("pw2"));

    mgr.mutate(|doc| doc.remove_entry(id)).unwrap();
    mgr.lock();
    mgr.unlock("work", "Sup3rSecret!").unwrap();
    assert_eq!(mgr.with_document(|doc| doc.len()).unwrap(), 0);
}

#[test]
fn test_rotation_changes_envelope_preserves_content() {
    let mut mgr = manager();
    mgr.create_account("work", "old123456").unwrap();
    mgr.unlock("work", "old123456").unwrap();
    mgr.mutate(|doc| doc.add_entry(mail_entry())).unwrap();
    let before = mgr.export_account("work").unwrap().blob;

    mgr.rotate("work", "old123456", "newpass789").unwrap();
    assert!(!mgr.is_unlocked(), "rotation locks the active session");

    let after = mgr.export_account("work").unwrap().blob;
    assert_ne!(after.salt, before.salt);
    assert_ne!(after.nonce, before.nonce);
    assert_ne!(after.ciphertext, before.ciphertext);
    assert_eq!(after.created_at, before.created_at);

    // Old passphrase no longer opens the vault
    let result = mgr.unlock("work", "old123456");
    assert!(matches!(result, Err(VaultError::UnlockFailed)));

    // New passphrase yields the same document
    mgr.unlock("work", "newpass789").unwrap();
    let entries = mgr
        .with_document(|doc| {
            doc.entries(None)
                .map(|e| (e.title.clone(), e.username.clone(), e.secret.clone()))
                .collect::<Vec<_>>()
        })
        .unwrap();
    assert_eq!(
        entries,
        vec![("Mail".to_string(), "a@b.com".to_string(), "pw1".to_string())]
    );
}

#[test]
fn test_rotation_with_wrong_old_passphrase_fails_cleanly() {
    let mut mgr = manager();
    mgr.create_account("work", "old123456").unwrap();
    let before = mgr.export_account("work").unwrap().blob;

    let result = mgr.rotate("work", "not-the-passphrase", "newpass789");
    assert!(matches!(result, Err(VaultError::UnlockFailed)));

    // Blob unchanged; old passphrase still works
    let after = mgr.export_account("work").unwrap().blob;
    assert_eq!(before, after);
    mgr.unlock("work", "old123456").unwrap();
}

#[test]
fn test_at_most_one_unlocked_session() {
    let mut mgr = manager();
    mgr.create_account("personal", "Passphrase1").unwrap();
    mgr.create_account("work", "Passphrase2").unwrap();

    mgr.unlock("personal", "Passphrase1").unwrap();
    mgr.mutate(|doc| doc.add_entry(mail_entry())).unwrap();
    assert_eq!(mgr.current_account(), Some("personal"));

    // Unlocking work implicitly locks personal
    mgr.unlock("work", "Passphrase2").unwrap();
    assert_eq!(mgr.current_account(), Some("work"));
    assert_eq!(mgr.with_document(|doc| doc.len()).unwrap(), 0);

    // A failed unlock locks the prior session too (fully transition or
    // remain Locked, never half-initialized)
    let result = mgr.unlock("personal", "wrong-passphrase");
    assert!(matches!(result, Err(VaultError::UnlockFailed)));
    assert_eq!(mgr.current_account(), None);
}

#[test]
fn test_auto_lock_after_inactivity() {
    let mut mgr = SessionManager::new(
        MemoryStore::new(),
        SessionConfig {
            auto_lock_after: Duration::from_millis(50),
            kdf_iterations: 100_000,
        },
    );
    mgr.create_account("work", "Sup3rSecret!").unwrap();
    mgr.unlock("work", "Sup3rSecret!").unwrap();

    std::thread::sleep(Duration::from_millis(80));

    // First touch after expiry reports the forced transition
    let result = mgr.mutate(|doc| doc.add_entry(mail_entry()));
    assert!(matches!(result, Err(VaultError::SessionTimedOut)));

    // Afterwards the manager is simply locked
    let result = mgr.with_document(|doc| doc.len());
    assert!(matches!(result, Err(VaultError::NoSession)));

    // Unlocking again restores access
    mgr.unlock("work", "Sup3rSecret!").unwrap();
    assert_eq!(mgr.with_document(|doc| doc.len()).unwrap(), 0);
}

#[test]
fn test_activity_defers_auto_lock() {
    let mut mgr = SessionManager::new(
        MemoryStore::new(),
        SessionConfig {
            auto_lock_after: Duration::from_millis(120),
            kdf_iterations: 100_000,
        },
    );
    mgr.create_account("work", "Sup3rSecret!").unwrap();
    mgr.unlock("work", "Sup3rSecret!").unwrap();

    // Keep touching inside the window; total elapsed exceeds the timeout
    for _ in 0..4 {
        std::thread::sleep(Duration::from_millis(50));
        mgr.touch().unwrap();
    }
    assert!(mgr.is_unlocked());
}

/// Store wrapper that fails writes on demand, for PersistFailed paths.
struct FlakyStore {
    inner: MemoryStore,
    fail_saves: Arc<AtomicBool>,
}

impl FlakyStore {
    fn new() -> (Self, Arc<AtomicBool>) {
        let fail_saves = Arc::new(AtomicBool::new(false));
        let store = Self {
            inner: MemoryStore::new(),
            fail_saves: Arc::clone(&fail_saves),
        };
        (store, fail_saves)
    }
}

impl BlobStore for FlakyStore {
    fn load(&self, name: &str) -> Result<Option<AccountRecord>> {
        self.inner.load(name)
    }

    fn save(&mut self, name: &str, record: &AccountRecord) -> Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(VaultError::PersistFailed("disk full".to_string()));
        }
        self.inner.save(name, record)
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        self.inner.delete(name)
    }

    fn list(&self) -> Result<Vec<String>> {
        self.inner.list()
    }
}

#[test]
fn test_persist_failure_keeps_mutation_in_memory_and_is_retryable() {
    let (store, fail_saves) = FlakyStore::new();
    let mut mgr = SessionManager::new(store, test_config());
    mgr.create_account("work", "Sup3rSecret!").unwrap();
    mgr.unlock("work", "Sup3rSecret!").unwrap();
    let before = mgr.export_account("work").unwrap().blob;

    fail_saves.store(true, Ordering::SeqCst);
    let result = mgr.mutate(|doc| doc.add_entry(mail_entry()));
    assert!(matches!(result, Err(VaultError::PersistFailed(_))));

    // The in-memory document reflects the mutation...
    assert_eq!(mgr.with_document(|doc| doc.len()).unwrap(), 1);
    // ...while the durable blob is untouched, not partially written
    assert_eq!(mgr.export_account("work").unwrap().blob, before);

    // Retrying (an empty mutation re-seals the current document) persists it
    fail_saves.store(false, Ordering::SeqCst);
    mgr.mutate(|_| Ok(())).unwrap();

    mgr.lock();
    mgr.unlock("work", "Sup3rSecret!").unwrap();
    assert_eq!(mgr.with_document(|doc| doc.len()).unwrap(), 1);
}

#[test]
fn test_unsaved_mutation_is_discarded_on_lock() {
    let (store, fail_saves) = FlakyStore::new();
    let mut mgr = SessionManager::new(store, test_config());
    mgr.create_account("work", "Sup3rSecret!").unwrap();
    mgr.unlock("work", "Sup3rSecret!").unwrap();

    fail_saves.store(true, Ordering::SeqCst);
    let result = mgr.mutate(|doc| doc.add_entry(mail_entry()));
    assert!(matches!(result, Err(VaultError::PersistFailed(_))));

    // Lock before any retry: no durable record exists, so the mutation
    // is gone after the next unlock.
    mgr.lock();
    fail_saves.store(false, Ordering::SeqCst);
    mgr.unlock("work", "Sup3rSecret!").unwrap();
    assert_eq!(mgr.with_document(|doc| doc.len()).unwrap(), 0);
}
