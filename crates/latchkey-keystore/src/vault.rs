//! The platform vault collaborator.
//!
//! This module defines the [`SecureVault`] trait (the opaque key/value
//! vault the facade talks to) and the backends that implement it:
//!
//! - **macOS**: [`KeychainVault`], Keychain Services via `security-framework`
//! - **Fallback / tests**: [`MemoryVault`], an in-process store that mimics
//!   the native vault contract (attribute matching, duplicate rejection,
//!   not-found statuses) but keeps items in plain process memory
//!
//! The vault does the hard work of protecting the data. Backends here only
//! translate between [`AttributeQuery`] and the platform's own addressing,
//! and map platform errors into [`VaultStatus`] codes.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use zeroize::Zeroize;

use crate::attrs::{AttrKey, AttrValue, AttributeQuery};
use crate::status::VaultStatus;

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// The platform secure-storage service, addressed by attribute queries.
///
/// All calls are synchronous and blocking; a call either returns a status or
/// blocks until the vault responds. Implementations must be `Send + Sync`.
pub trait SecureVault: Send + Sync {
    /// Store the query's `ValueData` payload under its matching attributes.
    fn add(&self, query: &AttributeQuery) -> VaultStatus;

    /// Find the single item matching the query. The payload is returned only
    /// when the query sets `ReturnData`.
    fn lookup(&self, query: &AttributeQuery) -> (VaultStatus, Option<AttrValue>);

    /// Delete every item matching the query.
    fn delete(&self, query: &AttributeQuery) -> VaultStatus;
}

impl<V: SecureVault + ?Sized> SecureVault for std::sync::Arc<V> {
    fn add(&self, query: &AttributeQuery) -> VaultStatus {
        (**self).add(query)
    }

    fn lookup(&self, query: &AttributeQuery) -> (VaultStatus, Option<AttrValue>) {
        (**self).lookup(query)
    }

    fn delete(&self, query: &AttributeQuery) -> VaultStatus {
        (**self).delete(query)
    }
}

impl<V: SecureVault + ?Sized> SecureVault for Box<V> {
    fn add(&self, query: &AttributeQuery) -> VaultStatus {
        (**self).add(query)
    }

    fn lookup(&self, query: &AttributeQuery) -> (VaultStatus, Option<AttrValue>) {
        (**self).lookup(query)
    }

    fn delete(&self, query: &AttributeQuery) -> VaultStatus {
        (**self).delete(query)
    }
}

// ---------------------------------------------------------------------------
// In-memory backend
// ---------------------------------------------------------------------------

/// One stored item: its matching attributes plus the raw payload.
struct StoredItem {
    attrs: BTreeMap<AttrKey, AttrValue>,
    value: Vec<u8>,
}

impl StoredItem {
    /// An item matches a query when every matching attribute the query
    /// names is present on the item with an equal value. Attributes the
    /// query does not name are ignored; a read query without a
    /// key-type still finds an item added with one.
    fn matches(&self, query: &AttributeQuery) -> bool {
        query.matching_attrs().all(|(key, value)| self.attrs.get(&key) == Some(value))
    }
}

impl Drop for StoredItem {
    fn drop(&mut self) {
        self.value.zeroize();
    }
}

/// In-process vault backend.
///
/// Mimics the native vault's observable contract (subset attribute
/// matching, duplicate rejection on add, not-found misses, and
/// `ReturnData`-gated payload return) without any of its protection.
/// Contents live in plain process memory and vanish with the process, so
/// this backend is for tests and for platforms without a native secure
/// store.
#[derive(Default)]
pub struct MemoryVault {
    items: Mutex<Vec<StoredItem>>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items currently stored.
    pub fn len(&self) -> usize {
        self.items.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SecureVault for MemoryVault {
    fn add(&self, query: &AttributeQuery) -> VaultStatus {
        let Some(AttrValue::Bytes(value)) = query.get(AttrKey::ValueData) else {
            return VaultStatus::PARAM;
        };

        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        if items.iter().any(|item| item.matches(query)) {
            return VaultStatus::DUPLICATE_ITEM;
        }

        items.push(StoredItem {
            attrs: query
                .matching_attrs()
                .map(|(key, value)| (key, value.clone()))
                .collect(),
            value: value.clone(),
        });
        VaultStatus::SUCCESS
    }

    fn lookup(&self, query: &AttributeQuery) -> (VaultStatus, Option<AttrValue>) {
        let items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        match items.iter().find(|item| item.matches(query)) {
            None => (VaultStatus::ITEM_NOT_FOUND, None),
            Some(item) => {
                let wants_data =
                    matches!(query.get(AttrKey::ReturnData), Some(AttrValue::Bool(true)));
                if wants_data {
                    (VaultStatus::SUCCESS, Some(AttrValue::Bytes(item.value.clone())))
                } else {
                    (VaultStatus::SUCCESS, None)
                }
            }
        }
    }

    fn delete(&self, query: &AttributeQuery) -> VaultStatus {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        let before = items.len();
        items.retain(|item| !item.matches(query));

        if items.len() == before {
            VaultStatus::ITEM_NOT_FOUND
        } else {
            VaultStatus::SUCCESS
        }
    }
}

// ---------------------------------------------------------------------------
// macOS Keychain Services
// ---------------------------------------------------------------------------

/// Keychain Services backend via the `security-framework` crate.
///
/// The query's application tag maps to the generic-password service name
/// and its label to the account name; framework error codes pass through as
/// [`VaultStatus`] values (the enumerations share the same code space).
///
/// Keychain Services overwrites on a duplicate write, while the vault
/// contract reports duplicates, so `add` probes for an existing item first.
#[cfg(target_os = "macos")]
pub struct KeychainVault;

#[cfg(target_os = "macos")]
impl KeychainVault {
    pub fn new() -> Self {
        Self
    }

    /// Pull the (service, account) pair out of a query. `None` when the tag
    /// or label attribute is missing or mistyped.
    fn service_account(query: &AttributeQuery) -> Option<(String, String)> {
        let service = match query.get(AttrKey::ApplicationTag)? {
            AttrValue::Bytes(bytes) => String::from_utf8(bytes.clone()).ok()?,
            _ => return None,
        };
        let account = match query.get(AttrKey::Label)? {
            AttrValue::Str(label) => label.clone(),
            _ => return None,
        };
        Some((service, account))
    }
}

#[cfg(target_os = "macos")]
impl Default for KeychainVault {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_os = "macos")]
impl SecureVault for KeychainVault {
    fn add(&self, query: &AttributeQuery) -> VaultStatus {
        use security_framework::passwords::{get_generic_password, set_generic_password};

        let Some((service, account)) = Self::service_account(query) else {
            return VaultStatus::PARAM;
        };
        let Some(AttrValue::Bytes(value)) = query.get(AttrKey::ValueData) else {
            return VaultStatus::PARAM;
        };

        match get_generic_password(&service, &account) {
            Ok(_) => return VaultStatus::DUPLICATE_ITEM,
            Err(e) if e.code() == VaultStatus::ITEM_NOT_FOUND.0 => {}
            Err(e) => return VaultStatus(e.code()),
        }

        match set_generic_password(&service, &account, value) {
            Ok(()) => VaultStatus::SUCCESS,
            Err(e) => VaultStatus(e.code()),
        }
    }

    fn lookup(&self, query: &AttributeQuery) -> (VaultStatus, Option<AttrValue>) {
        use security_framework::passwords::get_generic_password;

        let Some((service, account)) = Self::service_account(query) else {
            return (VaultStatus::PARAM, None);
        };

        match get_generic_password(&service, &account) {
            Ok(data) => {
                let wants_data =
                    matches!(query.get(AttrKey::ReturnData), Some(AttrValue::Bool(true)));
                if wants_data {
                    (VaultStatus::SUCCESS, Some(AttrValue::Bytes(data)))
                } else {
                    (VaultStatus::SUCCESS, None)
                }
            }
            Err(e) => (VaultStatus(e.code()), None),
        }
    }

    fn delete(&self, query: &AttributeQuery) -> VaultStatus {
        use security_framework::passwords::delete_generic_password;

        let Some((service, account)) = Self::service_account(query) else {
            return VaultStatus::PARAM;
        };

        match delete_generic_password(&service, &account) {
            Ok(()) => VaultStatus::SUCCESS,
            Err(e) => VaultStatus(e.code()),
        }
    }
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

/// Returns the best available vault backend for the current platform.
///
/// - **macOS**: [`KeychainVault`] (Keychain Services)
/// - **Other platforms**: [`MemoryVault`] (ephemeral, process-local)
///
/// Callers should not need to know which backend is in use.
pub fn platform_vault() -> Box<dyn SecureVault> {
    #[cfg(target_os = "macos")]
    {
        tracing::info!("using Keychain Services as the secure vault backend");
        Box::new(KeychainVault::new())
    }
    #[cfg(not(target_os = "macos"))]
    {
        tracing::info!("no native secure store on this platform, using the in-memory vault");
        Box::new(MemoryVault::new())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
