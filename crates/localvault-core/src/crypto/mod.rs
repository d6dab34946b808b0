//! Cryptographic operations for LocalVault.
//!
//! This module provides key derivation and authenticated encryption using
//! well-audited libraries:
//! - **PBKDF2-HMAC-SHA256**: deliberately slow, salted key derivation
//! - **AES-256-GCM**: authenticated encryption with a fresh 96-bit nonce
//!   per seal
//!
//! ## Security Model
//!
//! - Passphrase-derived keys, never stored; the salt lives in the account
//!   blob, the key only in the active session's memory.
//! - Sensitive data zeroized from memory on drop.
//! - Decryption failure does not reveal whether the passphrase was wrong
//!   or the ciphertext was tampered with.
//!
//! ## Threat Model
//!
//! We defend against:
//! - Theft of the encrypted account blob
//! - Offline brute-force attacks on the passphrase
//!
//! We do NOT defend against:
//! - Compromised OS / keylogger
//! - Access to an unlocked session / memory

pub mod envelope;
pub mod generate;
pub mod kdf;
pub mod passphrase;

pub use envelope::{open, seal, NONCE_LEN};
pub use generate::generate_password;
pub use kdf::{derive_key, DerivedKey, DEFAULT_ITERATIONS, MIN_ITERATIONS, SALT_LEN};
pub use passphrase::validate_passphrase;

use crate::error::{Result, VaultError};

/// Fill a fixed-size buffer from the OS CSPRNG.
///
/// Used for salts and nonces; both must be unpredictable and, for nonces,
/// unique per encryption under a given key.
pub(crate) fn random_bytes<const N: usize>() -> Result<[u8; N]> {
    let mut bytes = [0u8; N];
    getrandom::getrandom(&mut bytes)
        .map_err(|e| VaultError::Crypto(format!("OS random source failed: {}", e)))?;
    Ok(bytes)
}
