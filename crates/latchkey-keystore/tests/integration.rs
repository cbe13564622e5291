//! Integration tests for the latchkey-keystore crate.
//!
//! These tests exercise the full facade lifecycle against the in-memory
//! vault backend: query construction, add/read/remove round-trips,
//! idempotent adds, the positional clear sweep, and status mapping.

use latchkey_keystore::attrs::{AttrKey, AttrValue, AttributeQuery, Operation};
use latchkey_keystore::query::{self, build_query};
use latchkey_keystore::store::CredentialStore;
use latchkey_keystore::vault::{MemoryVault, SecureVault};
use latchkey_keystore::{KeystoreError, VaultStatus};

/// Create a test store over a fresh in-memory vault.
fn test_store() -> CredentialStore {
    CredentialStore::new(MemoryVault::new())
}

fn read_back(store: &CredentialStore, tag: &str, label: &str) -> Option<String> {
    let read = build_query(tag, label, Operation::Read).unwrap();
    store.read(&read).unwrap()
}

// ═══════════════════════════════════════════════════════════════════════
//  Item lifecycle
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn item_add_read_remove() {
    let store = test_store();
    let identity = query::ENCRYPTION_KEY;

    // Add.
    let add = build_query(identity.tag, identity.label, Operation::Add).unwrap();
    store.add("wrapped-key-material", &add).unwrap();

    // Read.
    let value = read_back(&store, identity.tag, identity.label);
    assert_eq!(value.as_deref(), Some("wrapped-key-material"));

    // Remove.
    let remove = build_query(identity.tag, identity.label, Operation::Remove).unwrap();
    store.remove(&remove).unwrap();

    // Verify gone.
    let read = build_query(identity.tag, identity.label, Operation::Read).unwrap();
    let result = store.read(&read);
    assert!(matches!(
        result,
        Err(KeystoreError::VaultStatus {
            status: VaultStatus::ITEM_NOT_FOUND
        })
    ));
}

#[test]
fn item_add_is_idempotent() {
    let store = test_store();
    let identity = query::SALT;

    let add = build_query(identity.tag, identity.label, Operation::Add).unwrap();
    store.add("first-salt", &add).unwrap();

    // A second add for the same identity must not trip duplicate rejection;
    // the read observes the second value.
    store.add("second-salt", &add).unwrap();

    let value = read_back(&store, identity.tag, identity.label);
    assert_eq!(value.as_deref(), Some("second-salt"));
}

#[test]
fn items_are_isolated_per_identity() {
    let store = test_store();

    for (identity, value) in [
        (query::ENCRYPTION_KEY, "key"),
        (query::IV_DATA, "iv"),
        (query::SALT, "salt"),
    ] {
        let add = build_query(identity.tag, identity.label, Operation::Add).unwrap();
        store.add(value, &add).unwrap();
    }

    assert_eq!(read_back(&store, query::ENCRYPTION_KEY.tag, query::ENCRYPTION_KEY.label).as_deref(), Some("key"));
    assert_eq!(read_back(&store, query::IV_DATA.tag, query::IV_DATA.label).as_deref(), Some("iv"));
    assert_eq!(read_back(&store, query::SALT.tag, query::SALT.label).as_deref(), Some("salt"));
}

#[test]
fn update_succeeds_without_touching_the_item() {
    let store = test_store();
    let identity = query::IV_DATA;

    let add = build_query(identity.tag, identity.label, Operation::Add).unwrap();
    store.add("original-iv", &add).unwrap();

    let update = build_query(identity.tag, identity.label, Operation::Update).unwrap();
    let mut attributes = AttributeQuery::new();
    attributes.insert(AttrKey::ValueData, AttrValue::Bytes(b"new-iv".to_vec()));
    store.update(&update, &attributes).unwrap();

    assert_eq!(read_back(&store, identity.tag, identity.label).as_deref(), Some("original-iv"));
}

// ═══════════════════════════════════════════════════════════════════════
//  Query construction
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn add_and_remove_address_the_same_item() {
    let identity = query::ENCRYPTION_KEY;
    let add = build_query(identity.tag, identity.label, Operation::Add).unwrap();
    let remove = build_query(identity.tag, identity.label, Operation::Remove).unwrap();

    for key in [
        AttrKey::Class,
        AttrKey::Accessible,
        AttrKey::ApplicationTag,
        AttrKey::Synchronizable,
        AttrKey::Label,
    ] {
        assert_eq!(add.get(key), remove.get(key), "mismatch on {key}");
    }
}

#[test]
fn empty_tag_fails_validation() {
    let result = build_query("", "Encryption Key", Operation::Read);
    assert!(matches!(result, Err(KeystoreError::DataValidation { .. })));
}

// ═══════════════════════════════════════════════════════════════════════
//  Clear sweep
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn clear_removes_all_builtin_identities() {
    let store = test_store();

    for identity in query::ALL_IDENTITIES {
        let add = build_query(identity.tag, identity.label, Operation::Add).unwrap();
        store.add("value", &add).unwrap();
    }

    assert!(store.clear(&query::all_labels(), &query::all_tags()));

    for identity in query::ALL_IDENTITIES {
        let read = build_query(identity.tag, identity.label, Operation::Read).unwrap();
        assert!(store.read(&read).is_err());
    }
}

#[test]
fn clear_with_mismatched_lists_removes_nothing() {
    let store = test_store();
    let identity = query::SALT;

    let add = build_query(identity.tag, identity.label, Operation::Add).unwrap();
    store.add("salt", &add).unwrap();

    // 2 labels, 3 tags.
    let ok = store.clear(
        &[query::ENCRYPTION_KEY.label, query::IV_DATA.label],
        &query::all_tags(),
    );
    assert!(!ok);

    // The stored item survived.
    assert_eq!(read_back(&store, identity.tag, identity.label).as_deref(), Some("salt"));
}

#[test]
fn clear_failure_mid_sweep_leaves_later_items_untouched() {
    use std::sync::Arc;

    /// Fails deletes for one tag, delegates everything else.
    struct FailingDelete {
        inner: Arc<MemoryVault>,
        fail_tag: &'static str,
    }

    impl SecureVault for FailingDelete {
        fn add(&self, query: &AttributeQuery) -> VaultStatus {
            self.inner.add(query)
        }

        fn lookup(&self, query: &AttributeQuery) -> (VaultStatus, Option<AttrValue>) {
            self.inner.lookup(query)
        }

        fn delete(&self, query: &AttributeQuery) -> VaultStatus {
            if let Some(AttrValue::Bytes(tag)) = query.get(AttrKey::ApplicationTag) {
                if tag.as_slice() == self.fail_tag.as_bytes() {
                    return VaultStatus::INTERNAL_COMPONENT;
                }
            }
            self.inner.delete(query)
        }
    }

    let inner = Arc::new(MemoryVault::new());
    let store = CredentialStore::new(FailingDelete {
        inner: inner.clone(),
        fail_tag: query::IV_DATA.tag,
    });
    let probe = CredentialStore::new(inner.clone());

    for identity in query::ALL_IDENTITIES {
        let mut add = build_query(identity.tag, identity.label, Operation::Add).unwrap();
        add.insert(AttrKey::ValueData, AttrValue::Bytes(b"value".to_vec()));
        assert!(inner.add(&add).is_success());
    }

    assert!(!store.clear(&query::all_labels(), &query::all_tags()));

    // First identity removed, second and third still present.
    let first = build_query(query::ENCRYPTION_KEY.tag, query::ENCRYPTION_KEY.label, Operation::Read).unwrap();
    assert!(probe.read(&first).is_err());
    assert_eq!(read_back(&probe, query::IV_DATA.tag, query::IV_DATA.label).as_deref(), Some("value"));
    assert_eq!(read_back(&probe, query::SALT.tag, query::SALT.label).as_deref(), Some("value"));
}

// ═══════════════════════════════════════════════════════════════════════
//  Status mapping
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn not_found_error_describes_the_failure() {
    let store = test_store();
    let read = build_query(query::SALT.tag, query::SALT.label, Operation::Read).unwrap();

    let err = store.read(&read).unwrap_err();
    assert!(err.to_string().contains("cannot be found"));
}

#[test]
fn describe_covers_mapped_and_unmapped_codes() {
    assert!(VaultStatus::DUPLICATE_ITEM.describe().contains("already exists"));
    assert!(VaultStatus::AUTH_FAILED.describe().contains("not correct"));
    assert_eq!(VaultStatus(-31337).describe(), "Error");
}
