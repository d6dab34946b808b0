//! Error types for LocalVault core operations.
//!
//! This module defines the error taxonomy for the engine. Errors are
//! descriptive at the core level; the CLI layer maps these to
//! user-friendly messages.
//!
//! Two rules hold everywhere:
//! - No error path ever carries raw key material or plaintext secrets.
//! - Cryptographic and codec failures never partially apply: either the
//!   full operation succeeds and the new state is installed, or the prior
//!   state is retained untouched.

use thiserror::Error;
use uuid::Uuid;

/// Result type alias for LocalVault operations.
pub type Result<T> = std::result::Result<T, VaultError>;

/// Core error type for LocalVault operations.
#[derive(Debug, Error)]
pub enum VaultError {
    /// Malformed parameters, rejected before any crypto runs
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// AEAD verification failed: wrong passphrase or tampered ciphertext.
    /// The two causes are deliberately indistinguishable (no oracle for
    /// passphrase guessing).
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// Unlock failed: wrong passphrase or corrupted vault.
    /// Session-level wrapper that hides whether derivation, decoding, or
    /// decryption was at fault.
    #[error("Incorrect passphrase or corrupted vault")]
    UnlockFailed,

    /// Structurally broken persisted record. Recoverable only by restoring
    /// from an export.
    #[error("Malformed account blob: {0}")]
    MalformedBlob(String),

    /// Account already exists and overwrite was not confirmed
    #[error("Account already exists: {0}")]
    AccountExists(String),

    /// Account not found by name
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Entry not found by ID
    #[error("Entry not found: {0}")]
    EntryNotFound(Uuid),

    /// Underlying store write failed. The in-memory mutation is kept and
    /// the operation is retryable.
    #[error("Persistence failed: {0}")]
    PersistFailed(String),

    /// The session expired from inactivity and has been locked.
    /// A forced-state-transition notification rather than a failure.
    #[error("Session timed out")]
    SessionTimedOut,

    /// An operation requiring an unlocked session was called while locked
    #[error("No unlocked session")]
    NoSession,

    /// Encryption or key derivation error
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}
