//! Keystore error types.
//!
//! Every public operation in this crate surfaces failures through
//! [`KeystoreError`]. There are exactly two kinds: the vault said no (a
//! non-success status code), or caller-supplied data failed validation.
//! Errors carry a human-readable description only: no stack trace, no
//! retry hint.

use crate::status::VaultStatus;

/// Unified error type for the Latchkey keystore facade.
#[derive(Debug, thiserror::Error)]
pub enum KeystoreError {
    /// The vault returned a non-success status. The display form carries the
    /// fixed description for the code.
    #[error("vault operation failed: {status}")]
    VaultStatus { status: VaultStatus },

    /// Caller-supplied data could not be converted to the required byte
    /// encoding, a vault payload had the wrong representation, or paired
    /// input lists mismatched in length.
    #[error("data validation failed: {reason}")]
    DataValidation { reason: String },
}

/// Convenience alias used throughout the keystore crate.
pub type Result<T> = std::result::Result<T, KeystoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vault_status_error_carries_description() {
        let err = KeystoreError::VaultStatus {
            status: VaultStatus::ITEM_NOT_FOUND,
        };
        let rendered = err.to_string();

        assert!(rendered.contains("cannot be found"));
        assert!(rendered.contains("-25300"));
    }

    #[test]
    fn data_validation_error_carries_reason() {
        let err = KeystoreError::DataValidation {
            reason: "application tag must not be empty".into(),
        };
        assert!(err.to_string().contains("application tag"));
    }
}
