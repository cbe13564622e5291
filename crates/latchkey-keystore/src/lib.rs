//! Platform secure-storage facade for Latchkey.
//!
//! This crate is a thin, strongly-typed front over the operating system's
//! secure credential vault. It builds attribute queries addressing one
//! credential item at a time, performs a single vault operation per query,
//! and translates the vault's status codes into a two-variant error type.
//! The vault itself (key wrapping, encryption at rest, access control)
//! belongs to the platform and sits behind the [`vault::SecureVault`] trait.
//!
//! # Modules
//!
//! - [`attrs`] — typed attribute keys, values, and query dictionaries.
//! - [`query`] — query construction and the fixed item identities.
//! - [`status`] — vault status codes and their descriptions.
//! - [`vault`] — the vault collaborator trait and platform backends.
//! - [`store`] — the credential store facade (add/read/update/remove/clear).
//! - [`error`] — unified error types.
//!
//! # Quick Start
//!
//! ```rust
//! use latchkey_keystore::attrs::Operation;
//! use latchkey_keystore::query::{self, build_query};
//! use latchkey_keystore::store::CredentialStore;
//! use latchkey_keystore::vault::MemoryVault;
//!
//! # fn main() -> latchkey_keystore::error::Result<()> {
//! let store = CredentialStore::new(MemoryVault::new());
//! let identity = query::SALT;
//!
//! // Write, read back, remove.
//! let add = build_query(identity.tag, identity.label, Operation::Add)?;
//! store.add("base64-salt", &add)?;
//!
//! let read = build_query(identity.tag, identity.label, Operation::Read)?;
//! assert_eq!(store.read(&read)?.as_deref(), Some("base64-salt"));
//!
//! let remove = build_query(identity.tag, identity.label, Operation::Remove)?;
//! store.remove(&remove)?;
//! # Ok(())
//! # }
//! ```

pub mod attrs;
pub mod error;
pub mod query;
pub mod status;
pub mod store;
pub mod vault;

// Re-export the most commonly used types at the crate root for convenience.
pub use attrs::{AttrKey, AttrValue, AttributeQuery, Operation};
pub use error::{KeystoreError, Result};
pub use query::{build_query, ItemIdentity, ENCRYPTION_KEY, IV_DATA, SALT};
pub use status::VaultStatus;
pub use store::CredentialStore;
pub use vault::{platform_vault, MemoryVault, SecureVault};
