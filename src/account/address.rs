use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use thiserror::Error;

/// Length in bytes of an account identifier
pub const ACCOUNT_ID_LEN: usize = 20;

const HEX_PREFIX: &str = "0x";

#[derive(Error, Debug)]
pub enum AddressError {
    #[error("Invalid address format: {0}")]
    InvalidFormat(String),

    #[error("Invalid address length: expected {expected} hex digits, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("Invalid hex encoding: {0}")]
    InvalidHex(String),
}

/// Opaque identifier naming a ledger participant
///
/// The all-zero value is a reserved sentinel: it can never hold balance
/// and is rejected as a recipient, spender, or burn target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId([u8; ACCOUNT_ID_LEN]);

impl AccountId {
    /// The reserved sentinel identifier
    pub const ZERO: AccountId = AccountId([0u8; ACCOUNT_ID_LEN]);

    /// Create an account ID from raw bytes
    pub fn from_bytes(bytes: [u8; ACCOUNT_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; ACCOUNT_ID_LEN] {
        &self.0
    }

    /// Check whether this is the reserved sentinel
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Generate a random account ID
    pub fn random() -> Self {
        let mut bytes = [0u8; ACCOUNT_ID_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Derive an account ID from external identity material
    /// (a public key, a session principal, any stable byte string)
    pub fn derive(material: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"account:");
        hasher.update(material);
        let digest = hasher.finalize();
        let mut bytes = [0u8; ACCOUNT_ID_LEN];
        bytes.copy_from_slice(&digest[..ACCOUNT_ID_LEN]);
        Self(bytes)
    }

    /// Parse an account ID from its text form: "0x" followed by 40 hex digits
    pub fn parse(s: &str) -> Result<Self, AddressError> {
        if s.is_empty() {
            return Err(AddressError::InvalidFormat("address cannot be empty".into()));
        }

        let digits = s.strip_prefix(HEX_PREFIX).ok_or_else(|| {
            AddressError::InvalidFormat(format!("expected '{}' prefix", HEX_PREFIX))
        })?;

        if digits.len() != ACCOUNT_ID_LEN * 2 {
            return Err(AddressError::InvalidLength {
                expected: ACCOUNT_ID_LEN * 2,
                got: digits.len(),
            });
        }

        let decoded = hex::decode(digits).map_err(|e| AddressError::InvalidHex(e.to_string()))?;

        let mut bytes = [0u8; ACCOUNT_ID_LEN];
        bytes.copy_from_slice(&decoded);
        Ok(Self(bytes))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", HEX_PREFIX, hex::encode(self.0))
    }
}
