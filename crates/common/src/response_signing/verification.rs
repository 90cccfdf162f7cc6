//! Signature verification.
//!
//! Verification is total: malformed hex, malformed base64, wrong lengths,
//! invalid curve points and bad signatures all come back as `false`.

use base64::{engine::general_purpose, Engine};
use ed25519_dalek::{Signature, Verifier as Ed25519Verifier, VerifyingKey};
use error_stack::{Report, ResultExt};
use http::header::{HeaderMap, HeaderName};

use crate::constants::{HEADER_X_IOPROOF_KEY_ID, HEADER_X_IOPROOF_SIG, HEADER_X_IOPROOF_SIG_TS};
use crate::error::IoProofError;
use crate::message::canonicalize;

use super::keys::decode_key_hex;
use super::signing::SigningResult;

/// Verifies a base64 signature over `message` with a hex-encoded public key.
#[must_use]
pub fn verify_signature(public_key_hex: &str, message: &str, signature_b64: &str) -> bool {
    match parse_verifying_key(public_key_hex) {
        Some(key) => verify_with_key(&key, message, signature_b64),
        None => false,
    }
}

/// Rebuilds the canonical message from its parts and verifies it.
#[must_use]
pub fn verify_signing_parts(
    public_key_hex: &str,
    request_hash: &str,
    response_hash: &str,
    timestamp: &str,
    signature_b64: &str,
) -> bool {
    let message = canonicalize(request_hash, response_hash, timestamp);
    verify_signature(public_key_hex, message.as_str(), signature_b64)
}

fn parse_verifying_key(public_key_hex: &str) -> Option<VerifyingKey> {
    let bytes: [u8; 32] = hex::decode(public_key_hex).ok()?.try_into().ok()?;
    VerifyingKey::from_bytes(&bytes).ok()
}

fn verify_with_key(key: &VerifyingKey, message: &str, signature_b64: &str) -> bool {
    let Ok(signature_bytes) = general_purpose::STANDARD.decode(signature_b64) else {
        return false;
    };
    let Ok(signature) = Signature::from_slice(&signature_bytes) else {
        return false;
    };
    key.verify(message.as_bytes(), &signature).is_ok()
}

/// A verifier bound to one public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseVerifier {
    key: VerifyingKey,
}

impl ResponseVerifier {
    #[must_use]
    pub fn new(key: VerifyingKey) -> Self {
        Self { key }
    }

    /// Builds a verifier from a hex-encoded 32-byte public key.
    ///
    /// # Errors
    ///
    /// Returns [`IoProofError::Configuration`] if the hex is malformed, the
    /// length is wrong, or the bytes are not a valid Ed25519 point.
    pub fn from_public_key_hex(public_key_hex: &str) -> Result<Self, Report<IoProofError>> {
        let bytes = decode_key_hex(public_key_hex, "public key")?;
        let key = VerifyingKey::from_bytes(&bytes).change_context(IoProofError::Configuration {
            message: "Public key is not a valid Ed25519 point".into(),
        })?;
        Ok(Self::new(key))
    }

    #[must_use]
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.key.as_bytes())
    }

    #[must_use]
    pub fn verify(&self, message: &str, signature_b64: &str) -> bool {
        verify_with_key(&self.key, message, signature_b64)
    }

    #[must_use]
    pub fn verify_parts(
        &self,
        request_hash: &str,
        response_hash: &str,
        timestamp: &str,
        signature_b64: &str,
    ) -> bool {
        let message = canonicalize(request_hash, response_hash, timestamp);
        self.verify(message.as_str(), signature_b64)
    }
}

/// Signature headers captured from a signed response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeaders {
    pub signature: String,
    pub timestamp: String,
    pub key_id: String,
}

impl SignatureHeaders {
    /// Extracts the three signature headers. Returns `None` unless all three
    /// are present and valid UTF-8.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let get = |name: HeaderName| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };

        Some(Self {
            signature: get(HEADER_X_IOPROOF_SIG)?,
            timestamp: get(HEADER_X_IOPROOF_SIG_TS)?,
            key_id: get(HEADER_X_IOPROOF_KEY_ID)?,
        })
    }
}

impl From<&SigningResult> for SignatureHeaders {
    fn from(result: &SigningResult) -> Self {
        Self {
            signature: result.signature.clone(),
            timestamp: result.timestamp.clone(),
            key_id: result.key_id.clone(),
        }
    }
}
