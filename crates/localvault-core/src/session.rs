//! Session lifecycle: unlock, mutation, auto-lock, and rotation.
//!
//! [`SessionManager`] owns the single active unlocked session and is the
//! sole mutator of its document, which makes the per-account
//! mutual-exclusion discipline a borrow-checker fact: every mutating
//! operation takes `&mut self` and runs to completion before the next.
//!
//! State machine: **Locked** (no session) and **Unlocked** (session live
//! with key + document). Every operation on an unlocked session either
//! fully transitions or leaves the prior state untouched; an abandoned
//! unlock or rotation never leaves a half-initialized session.
//!
//! The inactivity deadline is checked on entry to every session
//! operation: an expired session is discarded (key and document zeroized
//! on drop) and the call reports `SessionTimedOut`. Any successful
//! session operation counts as qualifying activity and resets the
//! deadline.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use zeroize::Zeroizing;

use crate::blob::{AccountBlob, AccountRecord, ExportRecord};
use crate::crypto::kdf::SALT_LEN;
use crate::crypto::{
    derive_key, open, random_bytes, seal, validate_passphrase, DerivedKey, DEFAULT_ITERATIONS,
};
use crate::document::VaultDocument;
use crate::error::{Result, VaultError};
use crate::store::BlobStore;

/// Tunable knobs for the engine.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Inactivity window after which the session is force-locked.
    pub auto_lock_after: Duration,

    /// PBKDF2 iteration count used for every derivation.
    pub kdf_iterations: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            // Matches the original ten-minute auto-logout
            auto_lock_after: Duration::from_secs(10 * 60),
            kdf_iterations: DEFAULT_ITERATIONS,
        }
    }
}

/// The transient unlocked state for one account.
///
/// Exclusively owns the derived key and the decrypted document for its
/// lifetime; both are zeroized when the session is dropped.
struct Session {
    account: String,
    key: DerivedKey,
    salt: [u8; SALT_LEN],
    document: VaultDocument,
    /// `created_at` of the account blob, preserved across re-seals
    blob_created_at: DateTime<Utc>,
    deadline: Instant,
}

/// The engine: at most one unlocked session, backed by a [`BlobStore`].
pub struct SessionManager<S: BlobStore> {
    store: S,
    config: SessionConfig,
    session: Option<Session>,
}

impl<S: BlobStore> SessionManager<S> {
    pub fn new(store: S, config: SessionConfig) -> Self {
        Self {
            store,
            config,
            session: None,
        }
    }

    /// Account name of the active session, if unlocked.
    pub fn current_account(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.account.as_str())
    }

    /// Whether a session is live and its deadline has not passed.
    pub fn is_unlocked(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| Instant::now() < s.deadline)
    }

    // --- Account lifecycle ---

    /// Create a new account: fresh salt, derived key, empty document
    /// sealed and persisted. Returns the new portable record.
    ///
    /// # Errors
    ///
    /// `AccountExists` if the name is taken; overwriting requires the
    /// collaborator to delete explicitly first. `InvalidInput` if the
    /// passphrase fails the policy.
    pub fn create_account(&mut self, name: &str, passphrase: &str) -> Result<AccountRecord> {
        validate_passphrase(passphrase)?;
        if self.store.contains(name)? {
            return Err(VaultError::AccountExists(name.to_string()));
        }

        let salt = random_bytes::<SALT_LEN>()?;
        let key = derive_key(passphrase, &salt, self.config.kdf_iterations)?;

        let document = VaultDocument::new();
        let payload = Zeroizing::new(serde_json::to_vec(&document)?);
        let (nonce, ciphertext) = seal(&key, &payload)?;

        let now = Utc::now();
        let record = AccountBlob {
            salt,
            nonce,
            ciphertext,
            created_at: now,
            updated_at: now,
        }
        .encode();
        self.store.save(name, &record)?;
        Ok(record)
    }

    /// Unlock an account, installing it as the active session.
    ///
    /// Any previously unlocked session is locked first; no two sessions
    /// ever coexist. On failure the manager remains Locked.
    ///
    /// # Errors
    ///
    /// `UnlockFailed` on wrong passphrase or corrupted blob, without
    /// distinguishing the two. `AccountNotFound` if no such account.
    pub fn unlock(&mut self, name: &str, passphrase: &str) -> Result<()> {
        self.lock();

        let record = self
            .store
            .load(name)
            .map_err(collapse_unlock_cause)?
            .ok_or_else(|| VaultError::AccountNotFound(name.to_string()))?;
        let blob = AccountBlob::decode(&record).map_err(collapse_unlock_cause)?;

        let key = derive_key(passphrase, &blob.salt, self.config.kdf_iterations)?;
        let payload = open(&key, &blob.nonce, &blob.ciphertext).map_err(collapse_unlock_cause)?;
        let document: VaultDocument =
            serde_json::from_slice(&payload).map_err(|_| VaultError::UnlockFailed)?;

        self.session = Some(Session {
            account: name.to_string(),
            key,
            salt: blob.salt,
            document,
            blob_created_at: blob.created_at,
            deadline: Instant::now() + self.config.auto_lock_after,
        });
        Ok(())
    }

    /// Lock the active session, if any. Key and document are dropped and
    /// zeroized; an unsaved in-memory mutation (after `PersistFailed`) is
    /// discarded, since no durable record of it exists.
    pub fn lock(&mut self) {
        self.session = None;
    }

    /// Register qualifying activity, pushing the inactivity deadline out.
    ///
    /// # Errors
    ///
    /// `SessionTimedOut` if the deadline already passed (the session is
    /// discarded), `NoSession` if locked.
    pub fn touch(&mut self) -> Result<()> {
        self.active_session().map(|_| ())
    }

    // --- Document access ---

    /// Apply `f` to the decrypted document, then re-seal the whole
    /// document with a fresh nonce under the session key and atomically
    /// overwrite the account blob.
    ///
    /// # Errors
    ///
    /// If `f` fails, nothing is persisted and the document is unchanged.
    /// If persistence fails, the in-memory document still reflects the
    /// mutation and `PersistFailed` is returned so the caller can retry
    /// (an empty mutation suffices); the durable blob is never left
    /// partially written.
    pub fn mutate<T>(&mut self, f: impl FnOnce(&mut VaultDocument) -> Result<T>) -> Result<T> {
        self.expire_if_idle()?;
        let deadline = Instant::now() + self.config.auto_lock_after;
        let session = match self.session.as_mut() {
            Some(session) => session,
            None => return Err(VaultError::NoSession),
        };
        session.deadline = deadline;

        let value = f(&mut session.document)?;

        let payload = Zeroizing::new(serde_json::to_vec(&session.document)?);
        let (nonce, ciphertext) = seal(&session.key, &payload)?;
        let blob = AccountBlob {
            salt: session.salt,
            nonce,
            ciphertext,
            created_at: session.blob_created_at,
            updated_at: Utc::now(),
        };
        self.store.save(&session.account, &blob.encode())?;
        Ok(value)
    }

    /// Read the decrypted document. Counts as qualifying activity.
    pub fn with_document<T>(&mut self, f: impl FnOnce(&VaultDocument) -> T) -> Result<T> {
        let session = self.active_session()?;
        Ok(f(&session.document))
    }

    // --- Rotation ---

    /// Re-encrypt an account under a new passphrase.
    ///
    /// Derives the old key from the stored salt, opens the blob, then
    /// generates a brand-new salt, derives the new key, and seals with a
    /// fresh nonce. Only then is the blob overwritten; the old blob stays
    /// valid until the new one is fully written. `created_at` is
    /// preserved, `updated_at` refreshed.
    ///
    /// If this account is currently unlocked its session is locked first;
    /// the in-memory key would be stale after rotation.
    ///
    /// # Errors
    ///
    /// `UnlockFailed` if the old passphrase does not open the blob.
    pub fn rotate(&mut self, name: &str, old_passphrase: &str, new_passphrase: &str) -> Result<()> {
        validate_passphrase(new_passphrase)?;
        if self.current_account() == Some(name) {
            self.lock();
        }

        let record = self
            .store
            .load(name)
            .map_err(collapse_unlock_cause)?
            .ok_or_else(|| VaultError::AccountNotFound(name.to_string()))?;
        let blob = AccountBlob::decode(&record).map_err(collapse_unlock_cause)?;

        let old_key = derive_key(old_passphrase, &blob.salt, self.config.kdf_iterations)?;
        let payload =
            open(&old_key, &blob.nonce, &blob.ciphertext).map_err(collapse_unlock_cause)?;

        let salt = random_bytes::<SALT_LEN>()?;
        let new_key = derive_key(new_passphrase, &salt, self.config.kdf_iterations)?;
        let (nonce, ciphertext) = seal(&new_key, &payload)?;

        let rotated = AccountBlob {
            salt,
            nonce,
            ciphertext,
            created_at: blob.created_at,
            updated_at: Utc::now(),
        };
        self.store.save(name, &rotated.encode())
    }

    // --- Portability and administration ---

    /// Export an account's sealed record for backup or transfer. The
    /// ciphertext is never opened.
    pub fn export_account(&self, name: &str) -> Result<ExportRecord> {
        let blob = self
            .store
            .load(name)?
            .ok_or_else(|| VaultError::AccountNotFound(name.to_string()))?;
        Ok(ExportRecord {
            account_name: name.to_string(),
            blob,
        })
    }

    /// Import a previously exported record.
    ///
    /// The record must decode structurally (`MalformedBlob` otherwise);
    /// no cryptographic verification happens here, and no merge: an
    /// existing account of the same name is overwritten only when the
    /// collaborator has confirmed via `overwrite`.
    pub fn import_account(&mut self, export: &ExportRecord, overwrite: bool) -> Result<()> {
        AccountBlob::decode(&export.blob)?;
        if !overwrite && self.store.contains(&export.account_name)? {
            return Err(VaultError::AccountExists(export.account_name.clone()));
        }
        self.store.save(&export.account_name, &export.blob)
    }

    /// Delete an account and its blob. Locks the account's session first
    /// if it is the active one.
    pub fn delete_account(&mut self, name: &str) -> Result<()> {
        if self.current_account() == Some(name) {
            self.lock();
        }
        self.store.delete(name)
    }

    /// List all account names known to the store.
    pub fn list_accounts(&self) -> Result<Vec<String>> {
        self.store.list()
    }

    // --- Internals ---

    /// Discard the session and report `SessionTimedOut` if the
    /// inactivity deadline has passed.
    fn expire_if_idle(&mut self) -> Result<()> {
        if self
            .session
            .as_ref()
            .is_some_and(|s| Instant::now() >= s.deadline)
        {
            // Key and document are zeroized as the session drops
            self.session = None;
            return Err(VaultError::SessionTimedOut);
        }
        Ok(())
    }

    /// Fetch the active session, enforcing the inactivity deadline and
    /// resetting it (qualifying activity).
    fn active_session(&mut self) -> Result<&mut Session> {
        self.expire_if_idle()?;
        let deadline = Instant::now() + self.config.auto_lock_after;
        match self.session.as_mut() {
            Some(session) => {
                session.deadline = deadline;
                Ok(session)
            }
            None => Err(VaultError::NoSession),
        }
    }
}

/// Collapse unlock-path failures so wrong-passphrase and corruption are
/// indistinguishable to the caller. Everything else passes through.
fn collapse_unlock_cause(error: VaultError) -> VaultError {
    match error {
        VaultError::AuthenticationFailed | VaultError::MalformedBlob(_) => VaultError::UnlockFailed,
        other => other,
    }
}
