//! Persistence abstraction for account blobs.
//!
//! The engine addresses storage only by account name and only through the
//! [`BlobStore`] trait: an opaque key-value store of portable account
//! records. The engine never assumes transactional atomicity across
//! separate accounts; each `save` must be all-or-nothing for its own
//! record.
//!
//! Backends:
//! - [`MemoryStore`]: in-process map, used by tests and embedders
//! - [`JsonFileStore`]: one JSON record file per account, atomic overwrite

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::blob::AccountRecord;
use crate::error::Result;

/// Opaque key-value persistence for account records.
///
/// Implementations must ensure:
/// - `save` overwrites all-or-nothing; a failed write never leaves a
///   partial or corrupt record behind
/// - records are returned byte-for-byte as stored (no normalization)
/// - a single writer per account (the engine enforces this process-wide)
pub trait BlobStore: Send {
    /// Load the record for an account, or `None` if it does not exist.
    fn load(&self, name: &str) -> Result<Option<AccountRecord>>;

    /// Atomically create or overwrite the record for an account.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::PersistFailed` if the write cannot complete;
    /// the previous record (if any) must remain intact in that case.
    fn save(&mut self, name: &str, record: &AccountRecord) -> Result<()>;

    /// Remove the record for an account.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::AccountNotFound` if no such record exists.
    fn delete(&mut self, name: &str) -> Result<()>;

    /// List all account names, sorted.
    fn list(&self) -> Result<Vec<String>>;

    /// Whether a record exists for the account.
    fn contains(&self, name: &str) -> Result<bool> {
        Ok(self.load(name)?.is_some())
    }
}
