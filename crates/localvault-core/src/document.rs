//! The decrypted in-memory vault document.
//!
//! A `VaultDocument` is an ordered list of credential entries. It exists
//! only while a session is unlocked, is owned exclusively by that session,
//! and is never persisted in plaintext. Entry secrets are zeroized when
//! the document is dropped.
//!
//! The document is single-writer: the session manager is its sole mutator,
//! so no entry is ever observable partially mutated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Result, VaultError};

/// A single credential entry.
///
/// `id` is immutable and unique within the document for its lifetime.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Opaque unique identifier, assigned at creation
    #[zeroize(skip)]
    pub id: Uuid,

    /// Display title (e.g., "Mail")
    pub title: String,

    /// Username or email for the credential
    pub username: String,

    /// The secret value itself (zeroized on drop)
    pub secret: String,

    /// Free-form notes
    pub notes: String,

    /// When this entry was created
    #[zeroize(skip)]
    pub created_at: DateTime<Utc>,

    /// When this entry was last modified
    #[zeroize(skip)]
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Debug for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entry")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("username", &self.username)
            .field("secret", &"[REDACTED]")
            .field("notes", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Fields for a new entry; the document assigns id and timestamps.
#[derive(Debug, Clone, Default)]
pub struct NewEntry {
    pub title: String,
    pub username: String,
    pub secret: String,
    pub notes: String,
}

/// Partial update for an existing entry. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct EntryUpdate {
    pub title: Option<String>,
    pub username: Option<String>,
    pub secret: Option<String>,
    pub notes: Option<String>,
}

/// The ordered collection of entries for one unlocked account.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultDocument {
    entries: Vec<Entry>,
}

impl VaultDocument {
    /// Create an empty document (the state of a freshly created account).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new entry, assigning a fresh unique id and stamping both
    /// timestamps with the current time.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::InvalidInput` if the title is blank.
    pub fn add_entry(&mut self, new: NewEntry) -> Result<Uuid> {
        if new.title.trim().is_empty() {
            return Err(VaultError::InvalidInput(
                "Entry title cannot be empty".to_string(),
            ));
        }

        let now = Utc::now();
        let id = Uuid::new_v4();
        self.entries.push(Entry {
            id,
            title: new.title,
            username: new.username,
            secret: new.secret,
            notes: new.notes,
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    /// Apply a partial update to the entry with the given id and bump its
    /// `updated_at` timestamp.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::EntryNotFound` if no entry has that id.
    pub fn update_entry(&mut self, id: Uuid, update: EntryUpdate) -> Result<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(VaultError::EntryNotFound(id))?;

        if let Some(title) = update.title {
            if title.trim().is_empty() {
                return Err(VaultError::InvalidInput(
                    "Entry title cannot be empty".to_string(),
                ));
            }
            entry.title = title;
        }
        if let Some(username) = update.username {
            entry.username = username;
        }
        if let Some(secret) = update.secret {
            // Wipe the replaced secret rather than leaving it for the allocator
            entry.secret.zeroize();
            entry.secret = secret;
        }
        if let Some(notes) = update.notes {
            entry.notes.zeroize();
            entry.notes = notes;
        }

        entry.updated_at = Utc::now();
        Ok(())
    }

    /// Remove the entry with the given id.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::EntryNotFound` if no entry has that id.
    pub fn remove_entry(&mut self, id: Uuid) -> Result<()> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(VaultError::EntryNotFound(id))?;
        // Entry is zeroized by its Drop impl
        self.entries.remove(index);
        Ok(())
    }

    /// Get an entry by id.
    pub fn entry(&self, id: Uuid) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Iterate over entries, optionally filtered.
    ///
    /// The filter is a case-insensitive substring match against title or
    /// username; `None` or an empty filter yields all entries in insertion
    /// order. The iterator is lazy and can be recreated at any time.
    pub fn entries(&self, filter: Option<&str>) -> impl Iterator<Item = &Entry> {
        let needle = filter
            .map(|f| f.trim().to_lowercase())
            .filter(|f| !f.is_empty());

        self.entries.iter().filter(move |e| match &needle {
            None => true,
            Some(needle) => {
                e.title.to_lowercase().contains(needle)
                    || e.username.to_lowercase().contains(needle)
            }
        })
    }

    /// Number of entries in the document.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the document has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
