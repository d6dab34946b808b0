//! Random password generation.
//!
//! Generates entry secrets from a fixed printable character set using the
//! OS CSPRNG, with rejection sampling so every character is equally
//! likely.

use crate::error::{Result, VaultError};

/// Characters eligible for generated passwords.
const CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+[]{}<>?";

/// Longest password this generator will produce.
const MAX_LENGTH: usize = 256;

/// Generate a random password of `length` characters.
///
/// # Errors
///
/// Returns `VaultError::InvalidInput` if `length` is zero or above
/// [`MAX_LENGTH`], and `VaultError::Crypto` if the OS random source fails.
pub fn generate_password(length: usize) -> Result<String> {
    if length == 0 || length > MAX_LENGTH {
        return Err(VaultError::InvalidInput(format!(
            "Password length must be between 1 and {} (got {})",
            MAX_LENGTH, length
        )));
    }

    // Reject bytes above the largest multiple of the charset size to keep
    // the distribution uniform.
    let limit = (u8::MAX as usize + 1) - ((u8::MAX as usize + 1) % CHARSET.len());

    let mut out = String::with_capacity(length);
    let mut buf = [0u8; 64];
    while out.len() < length {
        getrandom::getrandom(&mut buf)
            .map_err(|e| VaultError::Crypto(format!("OS random source failed: {}", e)))?;
        for &byte in &buf {
            if out.len() == length {
                break;
            }
            if (byte as usize) < limit {
                out.push(CHARSET[byte as usize % CHARSET.len()] as char);
            }
        }
    }

    Ok(out)
}
