//! Discovery document served at `/.well-known/ioproof.json`.
//!
//! Publishes the provider's active public keys so verifiers can check
//! `X-IOProof-Sig` headers. Entries keep the order the caller supplies;
//! rotation history is implied by that order.

use error_stack::{Report, ResultExt};
use serde::{Deserialize, Serialize};

use crate::constants::{DIRECTORY_VERSION, SIGNATURE_ALGORITHM};
use crate::error::IoProofError;

use super::verification::{verify_signing_parts, SignatureHeaders};

/// A key as supplied by the operator: id plus hex public key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEntry {
    pub kid: String,
    pub public_key: String,
}

impl KeyEntry {
    #[must_use]
    pub fn new(kid: impl Into<String>, public_key: impl Into<String>) -> Self {
        Self {
            kid: kid.into(),
            public_key: public_key.into(),
        }
    }
}

/// A published key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryKey {
    pub kid: String,
    pub algorithm: String,
    pub public_key: String,
}

/// Main discovery document returned by `.well-known/ioproof.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WellKnownDirectory {
    /// Version of the discovery document format
    pub version: String,
    pub keys: Vec<DirectoryKey>,
}

impl WellKnownDirectory {
    /// Wraps the given keys, tagging each with the `ed25519` algorithm.
    ///
    /// Key material is not validated here.
    #[must_use]
    pub fn new(keys: &[KeyEntry]) -> Self {
        Self {
            version: DIRECTORY_VERSION.to_string(),
            keys: keys
                .iter()
                .map(|entry| DirectoryKey {
                    kid: entry.kid.clone(),
                    algorithm: SIGNATURE_ALGORITHM.to_string(),
                    public_key: entry.public_key.clone(),
                })
                .collect(),
        }
    }

    /// Parses a fetched discovery document.
    ///
    /// # Errors
    ///
    /// Returns [`IoProofError::Serialization`] if the body is not a valid document.
    pub fn from_json(body: &str) -> Result<Self, Report<IoProofError>> {
        serde_json::from_str(body).change_context(IoProofError::Serialization {
            message: "Failed to parse discovery document".into(),
        })
    }

    /// Renders the document as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`IoProofError::Serialization`] if serialization fails.
    pub fn to_json(&self) -> Result<String, Report<IoProofError>> {
        serde_json::to_string(self).change_context(IoProofError::Serialization {
            message: "Failed to serialize discovery document".into(),
        })
    }

    /// First published key with the given id.
    #[must_use]
    pub fn find(&self, kid: &str) -> Option<&DirectoryKey> {
        self.keys.iter().find(|key| key.kid == kid)
    }

    /// Verifies captured signature headers against the published key they name.
    ///
    /// Returns `None` when no key with that id is published, since the
    /// signature can then be neither confirmed nor refuted. Keys published
    /// under another algorithm never verify.
    #[must_use]
    pub fn verify_headers(
        &self,
        request_hash: &str,
        response_hash: &str,
        headers: &SignatureHeaders,
    ) -> Option<bool> {
        let key = self.find(&headers.key_id)?;
        if key.algorithm != SIGNATURE_ALGORITHM {
            return Some(false);
        }
        Some(verify_signing_parts(
            &key.public_key,
            request_hash,
            response_hash,
            &headers.timestamp,
            &headers.signature,
        ))
    }
}

/// Builds the discovery document for the given active keys.
#[must_use]
pub fn build_well_known(keys: &[KeyEntry]) -> WellKnownDirectory {
    WellKnownDirectory::new(keys)
}
