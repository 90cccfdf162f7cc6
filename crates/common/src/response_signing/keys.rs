//! Ed25519 key pair generation and key identifier handling.
//!
//! Keys travel as lowercase hex of the raw 32-byte values: the private key is
//! the Ed25519 seed, never a PKCS#8 or PEM document.

use std::fmt;

use chrono::{DateTime, Datelike, Utc};
use ed25519_dalek::SigningKey;
use error_stack::{Report, ResultExt};
use rand::rngs::OsRng;
use rand::RngCore;

use crate::constants::ED25519_KEY_LENGTH;
use crate::error::IoProofError;

use super::discovery::KeyEntry;

#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    /// Hex of the 32-byte public key.
    pub public_key: String,
    /// Hex of the 32-byte seed.
    pub private_key: String,
    pub key_id: String,
}

impl KeyPair {
    /// Generates a fresh key pair labelled with the current `YYYY-MM`.
    ///
    /// # Errors
    ///
    /// Returns [`IoProofError::Randomness`] if the OS random source is unavailable.
    /// Callers should treat this as fatal.
    pub fn generate() -> Result<Self, Report<IoProofError>> {
        Self::generate_with_key_id(current_key_id())
    }

    /// Generates a fresh key pair with an explicit `YYYY-MM` key id.
    ///
    /// # Errors
    ///
    /// Returns [`IoProofError::Configuration`] if `key_id` is not a canonical
    /// `YYYY-MM` label, or [`IoProofError::Randomness`] if the OS random source
    /// is unavailable.
    pub fn generate_with_key_id(key_id: impl Into<String>) -> Result<Self, Report<IoProofError>> {
        let key_id = key_id.into();
        if !is_canonical_key_id(&key_id) {
            return Err(Report::new(IoProofError::Configuration {
                message: format!("Key id '{key_id}' is not of the form YYYY-MM"),
            }));
        }

        let mut seed = [0u8; ED25519_KEY_LENGTH];
        OsRng
            .try_fill_bytes(&mut seed)
            .change_context(IoProofError::Randomness {
                message: "Failed to read from the OS random source".into(),
            })?;

        let signing_key = SigningKey::from_bytes(&seed);
        Ok(Self::from_signing_key(&signing_key, key_id))
    }

    #[must_use]
    pub fn from_signing_key(signing_key: &SigningKey, key_id: impl Into<String>) -> Self {
        Self {
            public_key: hex::encode(signing_key.verifying_key().as_bytes()),
            private_key: hex::encode(signing_key.to_bytes()),
            key_id: key_id.into(),
        }
    }

    /// Rebuilds a key pair from a hex seed, deriving the public half.
    ///
    /// # Errors
    ///
    /// Returns [`IoProofError::Configuration`] if the hex is malformed or not 32 bytes.
    pub fn from_private_key_hex(
        private_key_hex: &str,
        key_id: impl Into<String>,
    ) -> Result<Self, Report<IoProofError>> {
        let seed = decode_key_hex(private_key_hex, "private key")?;
        Ok(Self::from_signing_key(&SigningKey::from_bytes(&seed), key_id))
    }

    /// Publication entry for this key.
    #[must_use]
    pub fn key_entry(&self) -> KeyEntry {
        KeyEntry {
            kid: self.key_id.clone(),
            public_key: self.public_key.clone(),
        }
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .field("key_id", &self.key_id)
            .finish()
    }
}

/// Decodes a hex string into a 32-byte key.
///
/// # Errors
///
/// Returns [`IoProofError::Configuration`] on non-hex input or a length other than 32 bytes.
pub fn decode_key_hex(
    key_hex: &str,
    what: &str,
) -> Result<[u8; ED25519_KEY_LENGTH], Report<IoProofError>> {
    let bytes = hex::decode(key_hex).change_context(IoProofError::Configuration {
        message: format!("Invalid {what} hex"),
    })?;

    let len = bytes.len();
    bytes.try_into().map_err(|_| {
        Report::new(IoProofError::Configuration {
            message: format!("{what} must be {ED25519_KEY_LENGTH} bytes, got {len}"),
        })
    })
}

/// Key id for the calendar month containing `at`, as `YYYY-MM`.
#[must_use]
pub fn key_id_for(at: DateTime<Utc>) -> String {
    format!("{:04}-{:02}", at.year(), at.month())
}

#[must_use]
pub fn current_key_id() -> String {
    key_id_for(Utc::now())
}

/// Checks the canonical `YYYY-MM` rotation label.
///
/// Key generation and rotation enforce this shape; signing and verification
/// accept any key id.
#[must_use]
pub fn is_canonical_key_id(key_id: &str) -> bool {
    let Some((year, month)) = key_id.split_once('-') else {
        return false;
    };
    if year.len() != 4 || month.len() != 2 {
        return false;
    }
    if !year.bytes().all(|b| b.is_ascii_digit()) || !month.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    matches!(month.parse::<u8>(), Ok(1..=12))
}
