//! Attribute model for vault queries.
//!
//! A vault item is addressed by a dictionary of attributes. This module makes
//! that dictionary strongly typed: keys come from the closed [`AttrKey`]
//! enumeration and values from the [`AttrValue`] tagged union, so an invalid
//! key or a key/value pair the vault has never heard of cannot be built at
//! all.
//!
//! Queries carry secret payloads (the `ValueData` attribute holds the raw
//! credential bytes on an add), so [`AttributeQuery`] zeroizes its values
//! when dropped.

use std::collections::BTreeMap;
use std::fmt;

use zeroize::Zeroize;

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

/// The closed set of attribute keys understood by the vault.
///
/// `ReturnData` and `ValueData` parameterize a call without identifying an
/// item; every other key is a *matching attribute* that addresses the item
/// itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttrKey {
    /// Item class (see [`ItemClass`]).
    Class,
    /// Accessibility policy (see [`Accessibility`]).
    Accessible,
    /// Reverse-DNS service tag, byte-encoded.
    ApplicationTag,
    /// Human-readable label distinguishing items within a tag.
    Label,
    /// Whether the item may sync to other devices.
    Synchronizable,
    /// Declared key algorithm (see [`KeyType`]).
    KeyType,
    /// Declared key class (see [`KeyClass`]).
    KeyClass,
    /// Request the stored payload back on a lookup.
    ReturnData,
    /// The payload handed to the vault on an add.
    ValueData,
}

impl AttrKey {
    /// Canonical wire name of this key.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Accessible => "accessible",
            Self::ApplicationTag => "application-tag",
            Self::Label => "label",
            Self::Synchronizable => "synchronizable",
            Self::KeyType => "key-type",
            Self::KeyClass => "key-class",
            Self::ReturnData => "return-data",
            Self::ValueData => "value-data",
        }
    }

    /// Whether this key participates in item matching (as opposed to
    /// parameterizing a single call).
    pub fn identifies_item(self) -> bool {
        !matches!(self, Self::ReturnData | Self::ValueData)
    }
}

impl fmt::Display for AttrKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// An attribute value: string, boolean, or raw byte sequence.
#[derive(Clone, PartialEq, Eq, Zeroize)]
pub enum AttrValue {
    Str(String),
    Bool(bool),
    Bytes(Vec<u8>),
}

/// `Bytes` may hold credential payloads, so the debug form shows only the
/// length.
impl fmt::Debug for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Bytes(b) => write!(f, "Bytes(<{} bytes>)", b.len()),
        }
    }
}

// ---------------------------------------------------------------------------
// Fixed attribute constants
// ---------------------------------------------------------------------------

/// Vault item class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemClass {
    GenericPassword,
    Key,
}

impl ItemClass {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GenericPassword => "generic-password",
            Self::Key => "key",
        }
    }
}

/// When the vault allows an item to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessibility {
    WhenUnlocked,
    AfterFirstUnlock,
    WhenUnlockedThisDeviceOnly,
    AfterFirstUnlockThisDeviceOnly,
    WhenPasscodeSetThisDeviceOnly,
}

impl Accessibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::WhenUnlocked => "when-unlocked",
            Self::AfterFirstUnlock => "after-first-unlock",
            Self::WhenUnlockedThisDeviceOnly => "when-unlocked-this-device-only",
            Self::AfterFirstUnlockThisDeviceOnly => "after-first-unlock-this-device-only",
            Self::WhenPasscodeSetThisDeviceOnly => "when-passcode-set-this-device-only",
        }
    }
}

/// Declared key algorithm for key-class items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyType {
    Aes,
    Rsa,
    Ec,
}

impl KeyType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Aes => "aes",
            Self::Rsa => "rsa",
            Self::Ec => "ec",
        }
    }
}

/// Declared key class for key-class items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyClass {
    Symmetric,
    Public,
    Private,
}

impl KeyClass {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Symmetric => "symmetric",
            Self::Public => "public",
            Self::Private => "private",
        }
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// The vault operation a query is built for. Selects which attribute subset
/// the builder emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Read,
    Update,
    Remove,
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// An attribute dictionary addressing one vault item.
///
/// Built fresh per operation, handed to exactly one vault call, then
/// discarded. Values are zeroized on drop because `ValueData` carries
/// credential payloads.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttributeQuery {
    attrs: BTreeMap<AttrKey, AttrValue>,
}

impl AttributeQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an attribute, returning the previous value for the key if any.
    pub fn insert(&mut self, key: AttrKey, value: AttrValue) -> Option<AttrValue> {
        self.attrs.insert(key, value)
    }

    pub fn get(&self, key: AttrKey) -> Option<&AttrValue> {
        self.attrs.get(&key)
    }

    pub fn contains(&self, key: AttrKey) -> bool {
        self.attrs.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// All attributes, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (AttrKey, &AttrValue)> + '_ {
        self.attrs.iter().map(|(k, v)| (*k, v))
    }

    /// Only the attributes that identify the item; `ReturnData` and
    /// `ValueData` are filtered out.
    pub fn matching_attrs(&self) -> impl Iterator<Item = (AttrKey, &AttrValue)> + '_ {
        self.iter().filter(|(k, _)| k.identifies_item())
    }
}

impl Drop for AttributeQuery {
    fn drop(&mut self) {
        for value in self.attrs.values_mut() {
            value.zeroize();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
