//! Vault status codes and their human-readable descriptions.
//!
//! The platform vault reports every operation's outcome as a signed 32-bit
//! status code from a fixed external enumeration. [`VaultStatus`] wraps that
//! code and names the values the facade distinguishes; [`VaultStatus::describe`]
//! is a pure lookup from code to a fixed sentence for logs and error
//! messages. Descriptions are informational; callers must not parse them.

use std::fmt;

/// A status code returned by the platform vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VaultStatus(pub i32);

impl VaultStatus {
    pub const SUCCESS: Self = Self(0);
    pub const UNIMPLEMENTED: Self = Self(-4);
    pub const IO: Self = Self(-36);
    pub const FILE_ALREADY_OPEN: Self = Self(-49);
    pub const PARAM: Self = Self(-50);
    pub const ALLOCATE: Self = Self(-108);
    pub const USER_CANCELED: Self = Self(-128);
    pub const BAD_REQUEST: Self = Self(-909);
    pub const INTERNAL_COMPONENT: Self = Self(-2070);
    pub const NOT_AVAILABLE: Self = Self(-25291);
    pub const READ_ONLY: Self = Self(-25292);
    pub const AUTH_FAILED: Self = Self(-25293);
    pub const NO_SUCH_VAULT: Self = Self(-25294);
    pub const INVALID_VAULT: Self = Self(-25295);
    pub const DUPLICATE_VAULT: Self = Self(-25296);
    pub const DUPLICATE_CALLBACK: Self = Self(-25297);
    pub const INVALID_CALLBACK: Self = Self(-25298);
    pub const DUPLICATE_ITEM: Self = Self(-25299);
    pub const ITEM_NOT_FOUND: Self = Self(-25300);
    pub const BUFFER_TOO_SMALL: Self = Self(-25301);
    pub const DATA_TOO_LARGE: Self = Self(-25302);
    pub const NO_SUCH_ATTR: Self = Self(-25303);
    pub const INVALID_ITEM_REF: Self = Self(-25304);
    pub const INVALID_SEARCH_REF: Self = Self(-25305);
    pub const NO_SUCH_CLASS: Self = Self(-25306);
    pub const NO_DEFAULT_VAULT: Self = Self(-25307);
    pub const INTERACTION_NOT_ALLOWED: Self = Self(-25308);
    pub const READ_ONLY_ATTR: Self = Self(-25309);
    pub const DECODE: Self = Self(-26275);
    pub const CERTIFICATE_EXPIRED: Self = Self(-67818);

    pub const fn is_success(self) -> bool {
        self.0 == Self::SUCCESS.0
    }

    /// Fixed sentence for this status code. Unmapped codes fall back to the
    /// generic `"Error"` string.
    pub fn describe(self) -> &'static str {
        match self {
            Self::SUCCESS => "No error.",
            Self::UNIMPLEMENTED => "Function or operation not implemented.",
            Self::IO => "I/O error.",
            Self::FILE_ALREADY_OPEN => "File already open with write permission.",
            Self::PARAM => "One or more parameters passed to the function were not valid.",
            Self::ALLOCATE => "Failed to allocate memory.",
            Self::USER_CANCELED => "User canceled the operation.",
            Self::BAD_REQUEST => "Bad parameter or invalid state for operation.",
            Self::INTERNAL_COMPONENT => "An internal component experienced an error.",
            Self::NOT_AVAILABLE => "No vault is available. You may need to restart your device.",
            Self::READ_ONLY => "The vault is read only.",
            Self::AUTH_FAILED => "The user name or passphrase you entered is not correct.",
            Self::NO_SUCH_VAULT => "The specified vault could not be found.",
            Self::INVALID_VAULT => "The specified vault is not a valid vault.",
            Self::DUPLICATE_VAULT => "A vault with the same name already exists.",
            Self::DUPLICATE_CALLBACK => "The specified callback function is already installed.",
            Self::INVALID_CALLBACK => "The specified callback function is not valid.",
            Self::DUPLICATE_ITEM => "The specified item already exists in the vault.",
            Self::ITEM_NOT_FOUND => "The specified item cannot be found in the vault.",
            Self::BUFFER_TOO_SMALL => {
                "There is not enough memory available to use the specified item."
            }
            Self::DATA_TOO_LARGE => {
                "This item contains information which is too large to be stored."
            }
            Self::NO_SUCH_ATTR => "The specified attribute does not exist.",
            Self::INVALID_ITEM_REF => {
                "The specified item is no longer valid. It may have been deleted from the vault."
            }
            Self::INVALID_SEARCH_REF => "Unable to search the current vault.",
            Self::NO_SUCH_CLASS => "The specified item does not appear to be a valid vault item.",
            Self::NO_DEFAULT_VAULT => "A default vault could not be found.",
            Self::INTERACTION_NOT_ALLOWED => "User interaction is not allowed.",
            Self::READ_ONLY_ATTR => "The specified attribute could not be modified.",
            Self::DECODE => "Unable to decode the provided data.",
            Self::CERTIFICATE_EXPIRED => "The certificate has expired.",
            _ => "Error",
        }
    }
}

impl fmt::Display for VaultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (status {})", self.describe(), self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
