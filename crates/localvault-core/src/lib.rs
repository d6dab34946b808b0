//! # LocalVault Core
//!
//! Core engine for LocalVault - a local, single-user, passphrase-protected
//! secret vault.
//!
//! This crate provides the cryptographic envelope and session-lifecycle
//! engine, independent of any presentation layer:
//!
//! - **crypto**: key derivation, authenticated encryption, passphrase policy
//! - **blob**: the durable account record format (salt, nonce, ciphertext)
//! - **document**: the decrypted in-memory vault and its entry operations
//! - **session**: the single unlocked session, auto-lock, and rotation
//! - **store**: the opaque key-value persistence abstraction
//!
//! ## Security model
//!
//! - The vault document is encrypted at rest with AES-256-GCM under a key
//!   derived from the user's passphrase (PBKDF2-HMAC-SHA256).
//! - Key material and decrypted documents live only in volatile memory,
//!   owned by the active session, and are zeroized on lock.
//! - A forgotten passphrase is unrecoverable by design.

pub mod blob;
pub mod crypto;
pub mod document;
pub mod error;
pub mod session;
pub mod store;

pub use blob::{AccountBlob, AccountRecord, ExportRecord};
pub use document::{Entry, EntryUpdate, NewEntry, VaultDocument};
pub use error::{Result, VaultError};
pub use session::{SessionConfig, SessionManager};
pub use store::{BlobStore, JsonFileStore, MemoryStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
