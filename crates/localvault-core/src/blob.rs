//! The durable account blob format and its codec.
//!
//! One blob exists per account name. Binary fields are carried base64
//! encoded inside a structured record so a blob serializes to a single
//! JSON document for persistence and export/import.
//!
//! Decoding validates structure only (field presence, base64
//! well-formedness, fixed lengths); cryptographic verification happens
//! exclusively in [`crate::crypto::envelope::open`].

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::crypto::{NONCE_LEN, SALT_LEN};
use crate::error::{Result, VaultError};

/// Minimum length of a well-formed ciphertext: the GCM tag alone.
const MIN_CIPHERTEXT_LEN: usize = 16;

/// The decoded, binary form of an account's durable record.
///
/// `ciphertext`, `nonce`, and `updated_at` are replaced wholesale on every
/// successful mutation or rotation; `salt` changes only on rotation;
/// `created_at` never changes after account creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountBlob {
    /// Per-account KDF salt
    pub salt: [u8; SALT_LEN],

    /// AEAD nonce for the current ciphertext, fresh per encryption
    pub nonce: [u8; NONCE_LEN],

    /// Sealed vault document, GCM tag included
    pub ciphertext: Vec<u8>,

    /// When the account was created (immutable origin)
    pub created_at: DateTime<Utc>,

    /// When the blob was last re-sealed (monotonic update)
    pub updated_at: DateTime<Utc>,
}

/// The portable, text-safe form of an [`AccountBlob`].
///
/// Field names and encodings match the persisted schema:
/// `{ salt, nonce, ciphertext (base64), createdAt, updatedAt (ISO-8601) }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    pub salt: String,
    pub nonce: String,
    pub ciphertext: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The export/import envelope: an account name together with its sealed
/// record. The ciphertext never leaves its envelope during export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRecord {
    pub account_name: String,
    pub blob: AccountRecord,
}

impl AccountBlob {
    /// Encode into the portable record form.
    pub fn encode(&self) -> AccountRecord {
        AccountRecord {
            salt: STANDARD.encode(self.salt),
            nonce: STANDARD.encode(self.nonce),
            ciphertext: STANDARD.encode(&self.ciphertext),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Decode a portable record back into binary form.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::MalformedBlob` if any field is not valid
    /// base64 or has the wrong length. A blob that decodes cleanly may
    /// still fail authentication later; that is not this layer's concern.
    pub fn decode(record: &AccountRecord) -> Result<Self> {
        let salt = decode_fixed::<SALT_LEN>("salt", &record.salt)?;
        let nonce = decode_fixed::<NONCE_LEN>("nonce", &record.nonce)?;

        let ciphertext = STANDARD
            .decode(&record.ciphertext)
            .map_err(|_| VaultError::MalformedBlob("ciphertext is not valid base64".to_string()))?;
        if ciphertext.len() < MIN_CIPHERTEXT_LEN {
            return Err(VaultError::MalformedBlob(format!(
                "ciphertext too short: {} bytes",
                ciphertext.len()
            )));
        }

        Ok(Self {
            salt,
            nonce,
            ciphertext,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

fn decode_fixed<const N: usize>(field: &str, value: &str) -> Result<[u8; N]> {
    let bytes = STANDARD
        .decode(value)
        .map_err(|_| VaultError::MalformedBlob(format!("{} is not valid base64", field)))?;
    bytes.try_into().map_err(|bytes: Vec<u8>| {
        VaultError::MalformedBlob(format!(
            "{} has wrong length: expected {} bytes, got {}",
            field,
            N,
            bytes.len()
        ))
    })
}
