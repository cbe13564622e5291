//! The credential store facade.
//!
//! [`CredentialStore`] translates `(tag, label, operation)` triples, via
//! queries built by [`crate::query::build_query`], into vault calls, and
//! vault status codes into [`KeystoreError`] values. It owns no state beyond
//! the vault handle: every query is built, used once, and discarded.
//!
//! Values cross this boundary as UTF-8 strings and are stored as raw bytes.
//! The facade imposes no structure on them and does not encrypt them;
//! encryption of the plaintext is the caller's responsibility.

use zeroize::Zeroize;

use crate::attrs::{AttrKey, AttrValue, AttributeQuery, Operation};
use crate::error::{KeystoreError, Result};
use crate::query::build_query;
use crate::status::VaultStatus;
use crate::vault::{platform_vault, SecureVault};

/// Facade over the platform secure vault.
///
/// Explicitly constructed; callers hold the handle and can inject any
/// [`SecureVault`] implementation: the in-memory backend in tests, the
/// platform backend in production.
///
/// # Example
///
/// ```rust
/// use latchkey_keystore::attrs::Operation;
/// use latchkey_keystore::query::{self, build_query};
/// use latchkey_keystore::store::CredentialStore;
/// use latchkey_keystore::vault::MemoryVault;
///
/// # fn example() -> latchkey_keystore::error::Result<()> {
/// let store = CredentialStore::new(MemoryVault::new());
/// let identity = query::ENCRYPTION_KEY;
///
/// let add = build_query(identity.tag, identity.label, Operation::Add)?;
/// store.add("wrapped-key-material", &add)?;
///
/// let read = build_query(identity.tag, identity.label, Operation::Read)?;
/// assert_eq!(store.read(&read)?.as_deref(), Some("wrapped-key-material"));
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
pub struct CredentialStore {
    vault: Box<dyn SecureVault>,
}

impl CredentialStore {
    /// Create a store over the given vault backend.
    pub fn new(vault: impl SecureVault + 'static) -> Self {
        Self {
            vault: Box::new(vault),
        }
    }

    /// Create a store over the best vault backend for the current platform.
    pub fn with_platform_vault() -> Self {
        Self {
            vault: platform_vault(),
        }
    }

    /// Store `value` under the item the query addresses.
    ///
    /// The query is copied and the value's bytes are inserted under
    /// `ValueData`; the original query stays payload-free so it can be
    /// reused for the pre-delete. A best-effort remove runs first so that
    /// re-adding an existing identity succeeds instead of tripping the
    /// vault's duplicate rejection; its failure (usually "not found") is
    /// logged and discarded, never propagated.
    ///
    /// # Errors
    ///
    /// Returns [`KeystoreError::VaultStatus`] if the vault rejects the add.
    //
    // TODO: encrypt the payload with the key stored under
    // `query::ENCRYPTION_KEY` and park the IV under `query::IV_DATA` before
    // handing bytes to the vault; values are currently stored as given.
    pub fn add(&self, value: &str, query: &AttributeQuery) -> Result<()> {
        let mut augmented = query.clone();
        augmented.insert(AttrKey::ValueData, AttrValue::Bytes(value.as_bytes().to_vec()));

        if let Err(err) = self.remove(query) {
            tracing::debug!(label = label_of(query), %err, "pre-delete before add discarded");
        }

        let status = self.vault.add(&augmented);
        if !status.is_success() {
            return Err(KeystoreError::VaultStatus { status });
        }

        tracing::info!(label = label_of(query), "stored credential item");
        Ok(())
    }

    /// Read the item the query addresses back as a string.
    ///
    /// Returns `None` when the stored bytes are not valid UTF-8.
    ///
    /// # Errors
    ///
    /// Returns [`KeystoreError::VaultStatus`] if the vault reports any
    /// non-success status (including not-found), and
    /// [`KeystoreError::DataValidation`] if the vault hands back something
    /// other than a byte payload.
    pub fn read(&self, query: &AttributeQuery) -> Result<Option<String>> {
        let (status, payload) = self.vault.lookup(query);
        if !status.is_success() {
            return Err(KeystoreError::VaultStatus { status });
        }

        let bytes = match payload {
            Some(AttrValue::Bytes(bytes)) => bytes,
            Some(_) => {
                return Err(KeystoreError::DataValidation {
                    reason: "vault returned a non-byte payload".into(),
                });
            }
            None => {
                return Err(KeystoreError::DataValidation {
                    reason: "vault returned no payload for a data-returning query".into(),
                });
            }
        };

        tracing::debug!(label = label_of(query), len = bytes.len(), "read credential item");

        match String::from_utf8(bytes) {
            Ok(text) => Ok(Some(text)),
            Err(err) => {
                let mut bytes = err.into_bytes();
                bytes.zeroize();
                Ok(None)
            }
        }
    }

    /// Update the item the query addresses.
    ///
    /// Not implemented: the call performs no vault operation and succeeds
    /// unconditionally. Declared so the public contract is complete; an
    /// update scheme needs a design owner before it gets behavior.
    pub fn update(&self, query: &AttributeQuery, _attributes: &AttributeQuery) -> Result<()> {
        tracing::warn!(
            label = label_of(query),
            "credential update is not implemented; request ignored"
        );
        Ok(())
    }

    /// Remove every item the query addresses.
    ///
    /// # Errors
    ///
    /// Returns [`KeystoreError::VaultStatus`] if the vault reports any
    /// non-success status (including not-found).
    pub fn remove(&self, query: &AttributeQuery) -> Result<()> {
        let status = self.vault.delete(query);
        if !status.is_success() {
            return Err(KeystoreError::VaultStatus { status });
        }

        tracing::info!(label = label_of(query), "removed credential item");
        Ok(())
    }

    /// Whether an item matching the query exists.
    ///
    /// # Errors
    ///
    /// Returns [`KeystoreError::VaultStatus`] for any status other than
    /// success or not-found.
    pub fn contains(&self, query: &AttributeQuery) -> Result<bool> {
        let (status, _payload) = self.vault.lookup(query);
        if status.is_success() {
            Ok(true)
        } else if status == VaultStatus::ITEM_NOT_FOUND {
            Ok(false)
        } else {
            Err(KeystoreError::VaultStatus { status })
        }
    }

    /// Remove the items named by position-paired `labels` and `tags`.
    ///
    /// Mismatched list lengths abort before any removal. Otherwise the pairs
    /// are swept in order and the first build or removal failure stops the
    /// sweep; removals that already happened stick (no rollback). All
    /// failures are downgraded to `false`; callers needing the reason must
    /// use [`CredentialStore::remove`] directly.
    pub fn clear(&self, labels: &[&str], tags: &[&str]) -> bool {
        if labels.len() != tags.len() {
            let err = KeystoreError::DataValidation {
                reason: format!(
                    "clear expects matching label/tag lists, got {} labels and {} tags",
                    labels.len(),
                    tags.len()
                ),
            };
            tracing::error!(%err, "clear aborted before any removal");
            return false;
        }

        for i in 0..labels.len() {
            let query = match build_query(tags[i], labels[i], Operation::Remove) {
                Ok(query) => query,
                Err(err) => {
                    tracing::error!(label = labels[i], %err, "clear stopped: bad removal query");
                    return false;
                }
            };
            if let Err(err) = self.remove(&query) {
                tracing::error!(label = labels[i], %err, "clear stopped: removal failed");
                return false;
            }
        }

        tracing::info!(count = labels.len(), "cleared credential items");
        true
    }
}

/// Label attribute of a query, for log fields.
fn label_of(query: &AttributeQuery) -> &str {
    match query.get(AttrKey::Label) {
        Some(AttrValue::Str(label)) => label,
        _ => "<unlabeled>",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
