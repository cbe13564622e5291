//! Query construction and the fixed item identities.
//!
//! Every vault call is addressed by an [`AttributeQuery`] built here. The
//! builder emits the same five base attributes (class, accessibility,
//! application tag, synchronizable flag, label) for every operation, so an
//! item written by an add can later be found by a read and removed by a
//! remove with nothing more than its `(tag, label)` pair.
//!
//! Three identities are defined as process-wide constants: the wrapped
//! encryption key, its initialization-vector data, and the key-derivation
//! salt. The aggregator accessors [`all_labels`] and [`all_tags`] stay
//! index-aligned; [`crate::store::CredentialStore::clear`] zips them by
//! position.

use crate::attrs::{
    Accessibility, AttrKey, AttrValue, AttributeQuery, ItemClass, KeyClass, KeyType, Operation,
};
use crate::error::{KeystoreError, Result};

// ---------------------------------------------------------------------------
// Fixed identities
// ---------------------------------------------------------------------------

/// A `(tag, label)` pair naming one logical vault item.
///
/// The tag is a reverse-DNS service identifier; the label distinguishes
/// items within a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemIdentity {
    pub tag: &'static str,
    pub label: &'static str,
}

/// Identity of the wrapped data-encryption key.
pub const ENCRYPTION_KEY: ItemIdentity = ItemIdentity {
    tag: "io.latchkey.encryption-key",
    label: "Encryption Key",
};

/// Identity of the initialization-vector material.
pub const IV_DATA: ItemIdentity = ItemIdentity {
    tag: "io.latchkey.iv-data",
    label: "Initialization Vector",
};

/// Identity of the key-derivation salt.
pub const SALT: ItemIdentity = ItemIdentity {
    tag: "io.latchkey.salt",
    label: "Salt",
};

/// All built-in identities, in canonical order.
pub const ALL_IDENTITIES: [ItemIdentity; 3] = [ENCRYPTION_KEY, IV_DATA, SALT];

/// Labels of the built-in identities. Index-aligned with [`all_tags`].
pub fn all_labels() -> [&'static str; 3] {
    [ENCRYPTION_KEY.label, IV_DATA.label, SALT.label]
}

/// Tags of the built-in identities. Index-aligned with [`all_labels`].
pub fn all_tags() -> [&'static str; 3] {
    [ENCRYPTION_KEY.tag, IV_DATA.tag, SALT.tag]
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Item class for every query this facade builds.
const QUERY_CLASS: ItemClass = ItemClass::Key;

/// Accessibility policy for every query. Items stay readable after the first
/// unlock and never leave the device.
const QUERY_ACCESSIBILITY: Accessibility = Accessibility::AfterFirstUnlockThisDeviceOnly;

/// Declared algorithm for add/remove queries. Not derived from input.
const QUERY_KEY_TYPE: KeyType = KeyType::Aes;

/// Declared key class for add/remove queries. Not derived from input.
const QUERY_KEY_CLASS: KeyClass = KeyClass::Symmetric;

/// Build the attribute query addressing the item `(tag, label)` for the
/// given operation.
///
/// Every operation gets the five base attributes. `Add` and `Remove`
/// additionally carry the fixed key-type/key-class pair, deliberately the
/// same for both, so a remove addresses exactly what an add wrote. `Read`
/// instead requests the stored payload back. `Update` gets the base match
/// attributes only (the update operation itself is not implemented, see
/// [`crate::store::CredentialStore::update`]).
///
/// Pure function of its inputs; performs no vault call.
///
/// # Errors
///
/// Returns [`KeystoreError::DataValidation`] if `tag` is empty.
pub fn build_query(tag: &str, label: &str, operation: Operation) -> Result<AttributeQuery> {
    if tag.is_empty() {
        return Err(KeystoreError::DataValidation {
            reason: "application tag must not be empty".into(),
        });
    }

    let mut query = AttributeQuery::new();
    query.insert(AttrKey::Class, AttrValue::Str(QUERY_CLASS.as_str().into()));
    query.insert(
        AttrKey::Accessible,
        AttrValue::Str(QUERY_ACCESSIBILITY.as_str().into()),
    );
    query.insert(
        AttrKey::ApplicationTag,
        AttrValue::Bytes(tag.as_bytes().to_vec()),
    );
    query.insert(AttrKey::Synchronizable, AttrValue::Bool(false));
    query.insert(AttrKey::Label, AttrValue::Str(label.into()));

    match operation {
        Operation::Add | Operation::Remove => {
            query.insert(AttrKey::KeyType, AttrValue::Str(QUERY_KEY_TYPE.as_str().into()));
            query.insert(
                AttrKey::KeyClass,
                AttrValue::Str(QUERY_KEY_CLASS.as_str().into()),
            );
        }
        Operation::Read => {
            query.insert(AttrKey::ReturnData, AttrValue::Bool(true));
        }
        Operation::Update => {}
    }

    Ok(query)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
