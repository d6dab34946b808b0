//! Authenticated encryption of the vault document.
//!
//! `seal` and `open` wrap AES-256-GCM. Every seal generates a fresh random
//! 96-bit nonce from the OS CSPRNG; the nonce must never repeat under the
//! same key, and a fresh one is drawn on every call, including every
//! re-encryption after a mutation.
//!
//! `open` verifies the GCM tag before returning any plaintext. A failed
//! verification is the sole mechanism by which "wrong passphrase" and
//! "corrupted blob" are detected, and the two are indistinguishable to the
//! caller.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use zeroize::Zeroizing;

use super::kdf::DerivedKey;
use crate::error::{Result, VaultError};

/// Length of the AES-GCM nonce in bytes (96 bits).
pub const NONCE_LEN: usize = 12;

/// Encrypt a plaintext payload under the given key.
///
/// Returns the freshly generated nonce together with the ciphertext; the
/// GCM authentication tag is appended to the ciphertext. Both must be
/// stored in the account blob for `open` to succeed later.
///
/// # Errors
///
/// Returns `VaultError::Crypto` if the OS random source or the cipher
/// itself fails (both exceptional).
pub fn seal(key: &DerivedKey, plaintext: &[u8]) -> Result<([u8; NONCE_LEN], Vec<u8>)> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
    let nonce = super::random_bytes::<NONCE_LEN>()?;

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|_| VaultError::Crypto("AEAD encryption failed".to_string()))?;

    Ok((nonce, ciphertext))
}

/// Decrypt and verify a sealed payload.
///
/// The returned buffer is zeroized when dropped; callers should keep it
/// alive no longer than needed.
///
/// # Errors
///
/// Returns `VaultError::AuthenticationFailed` on any bit-level tampering
/// of the ciphertext, nonce, or tag, and equally on a key derived from
/// the wrong passphrase. No further distinction is made.
pub fn open(
    key: &DerivedKey,
    nonce: &[u8; NONCE_LEN],
    ciphertext: &[u8],
) -> Result<Zeroizing<Vec<u8>>> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));

    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map(Zeroizing::new)
        .map_err(|_| VaultError::AuthenticationFailed)
}
