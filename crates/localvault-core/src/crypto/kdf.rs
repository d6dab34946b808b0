//! Key derivation using PBKDF2-HMAC-SHA256.
//!
//! This module derives encryption keys from passphrases using an
//! iterated, salted derivation to make offline brute-force attacks
//! computationally expensive.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::ZeroizeOnDrop;

use crate::error::{Result, VaultError};

/// Length of the per-account salt in bytes.
pub const SALT_LEN: usize = 16;

/// Length of the derived key in bytes (256 bits for AES-256-GCM).
pub const KEY_LEN: usize = 32;

/// Default PBKDF2 iteration count.
///
/// The count is a tunable parameter rather than a constant baked into the
/// algorithm so it can be raised as hardware improves.
pub const DEFAULT_ITERATIONS: u32 = 250_000;

/// Hard floor for the iteration count. Anything lower is rejected as
/// `InvalidInput` before any derivation runs.
pub const MIN_ITERATIONS: u32 = 100_000;

/// A cryptographic key derived from a passphrase.
///
/// This type ensures that key material is securely zeroized from memory
/// when dropped, reducing the window of exposure.
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    /// The raw key bytes (zeroized on drop)
    key: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Create a new DerivedKey from raw bytes.
    ///
    /// # Security
    ///
    /// The caller is responsible for ensuring the bytes come from a secure source.
    pub(crate) fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self { key: bytes }
    }

    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate encryption operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive an encryption key from a passphrase using PBKDF2-HMAC-SHA256.
///
/// # Arguments
///
/// * `passphrase` - The passphrase to derive from
/// * `salt` - Random per-account salt (stored in the account blob)
/// * `iterations` - PBKDF2 iteration count, at least [`MIN_ITERATIONS`]
///
/// # Security
///
/// - Same passphrase + salt + iterations always produces the same key
/// - Different salt produces a different key (salt must be stored with
///   the blob; it changes only on passphrase rotation)
/// - Deliberately slow: cost scales linearly with the iteration count
///
/// # Errors
///
/// Returns `VaultError::InvalidInput` if the passphrase is empty or the
/// iteration count is below the floor.
pub fn derive_key(passphrase: &str, salt: &[u8; SALT_LEN], iterations: u32) -> Result<DerivedKey> {
    if passphrase.is_empty() {
        return Err(VaultError::InvalidInput(
            "Passphrase cannot be empty".to_string(),
        ));
    }

    if iterations < MIN_ITERATIONS {
        return Err(VaultError::InvalidInput(format!(
            "Iteration count must be at least {} (got {})",
            MIN_ITERATIONS, iterations
        )));
    }

    let mut key_bytes = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(passphrase.as_bytes(), salt, iterations, &mut key_bytes);

    Ok(DerivedKey::from_bytes(key_bytes))
}
