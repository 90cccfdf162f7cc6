//! Response signing.
//!
//! A [`ResponseSigner`] binds a request body to the response body produced for
//! it: both bodies are hashed, combined with a millisecond timestamp into the
//! canonical message, and signed with Ed25519. Ed25519 has no signing nonce,
//! so a fixed key, bodies and timestamp always give the same signature.

use std::fmt;

use base64::{engine::general_purpose, Engine};
use ed25519_dalek::{Signer as Ed25519Signer, SigningKey};
use error_stack::{Report, ResultExt};
use http::header::{HeaderMap, HeaderName, HeaderValue};

use crate::constants::{HEADER_X_IOPROOF_KEY_ID, HEADER_X_IOPROOF_SIG, HEADER_X_IOPROOF_SIG_TS};
use crate::error::IoProofError;
use crate::hasher::sha256_hex;
use crate::message::{canonicalize, current_timestamp, SignableMessage};

use super::keys::decode_key_hex;

/// Output of a single signing operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningResult {
    /// Standard base64 of the 64-byte signature.
    pub signature: String,
    pub timestamp: String,
    pub key_id: String,
    pub request_hash: String,
    pub response_hash: String,
    pub message: SignableMessage,
}

impl SigningResult {
    /// Header name/value pairs to attach to the response.
    #[must_use]
    pub fn headers(&self) -> [(HeaderName, &str); 3] {
        [
            (HEADER_X_IOPROOF_SIG, self.signature.as_str()),
            (HEADER_X_IOPROOF_SIG_TS, self.timestamp.as_str()),
            (HEADER_X_IOPROOF_KEY_ID, self.key_id.as_str()),
        ]
    }

    /// Builds the signature headers as a [`HeaderMap`].
    ///
    /// # Errors
    ///
    /// Returns [`IoProofError::Signing`] if a value is not a legal header value,
    /// which can only happen for a key id containing control characters.
    pub fn header_map(&self) -> Result<HeaderMap, Report<IoProofError>> {
        let mut map = HeaderMap::with_capacity(3);
        for (name, value) in self.headers() {
            let value = HeaderValue::from_str(value).change_context(IoProofError::Signing {
                message: format!("Invalid value for header {name}"),
            })?;
            map.insert(name, value);
        }
        Ok(map)
    }
}

/// Holds an Ed25519 private key and a key id, and signs request/response pairs.
///
/// The key is read-only after construction, so one signer can be shared
/// across threads.
#[derive(Clone)]
pub struct ResponseSigner {
    key: SigningKey,
    key_id: String,
}

impl ResponseSigner {
    #[must_use]
    pub fn new(key: SigningKey, key_id: impl Into<String>) -> Self {
        Self {
            key,
            key_id: key_id.into(),
        }
    }

    /// Builds a signer from a hex-encoded 32-byte seed.
    ///
    /// # Errors
    ///
    /// Returns [`IoProofError::Configuration`] if the hex is malformed or the
    /// decoded seed is not exactly 32 bytes.
    pub fn from_private_key_hex(
        private_key_hex: &str,
        key_id: impl Into<String>,
    ) -> Result<Self, Report<IoProofError>> {
        let seed = decode_key_hex(private_key_hex, "private key")?;
        let signer = Self::new(SigningKey::from_bytes(&seed), key_id);
        log::info!("Response signer ready for key id '{}'", signer.key_id);
        Ok(signer)
    }

    #[must_use]
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Hex of the public counterpart of the signing key.
    #[must_use]
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.key.verifying_key().as_bytes())
    }

    /// Signs a request/response pair stamped with the current time.
    ///
    /// The clock is read exactly once; the same string goes into the message
    /// and the result.
    pub fn sign(
        &self,
        request_body: impl AsRef<[u8]>,
        response_body: impl AsRef<[u8]>,
    ) -> SigningResult {
        let timestamp = current_timestamp();
        self.sign_with_timestamp(request_body, response_body, &timestamp)
    }

    /// Signs a request/response pair with a caller-supplied timestamp.
    ///
    /// The timestamp is used verbatim and must already be in
    /// `YYYY-MM-DDTHH:MM:SS.mmmZ` form for other SDKs to reproduce the message.
    pub fn sign_with_timestamp(
        &self,
        request_body: impl AsRef<[u8]>,
        response_body: impl AsRef<[u8]>,
        timestamp: &str,
    ) -> SigningResult {
        let request_hash = sha256_hex(request_body);
        let response_hash = sha256_hex(response_body);
        let message = canonicalize(&request_hash, &response_hash, timestamp);
        let signature = self.sign_message(&message);

        log::debug!(
            "Signed response with key id '{}' at {} (request {}, response {})",
            self.key_id,
            timestamp,
            request_hash,
            response_hash
        );

        SigningResult {
            signature,
            timestamp: timestamp.to_string(),
            key_id: self.key_id.clone(),
            request_hash,
            response_hash,
            message,
        }
    }

    /// Signs an already canonicalized message, returning standard base64.
    #[must_use]
    pub fn sign_message(&self, message: &SignableMessage) -> String {
        let signature = self.key.sign(message.as_bytes());
        general_purpose::STANDARD.encode(signature.to_bytes())
    }
}

impl fmt::Debug for ResponseSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseSigner")
            .field("key_id", &self.key_id)
            .field("public_key", &self.public_key_hex())
            .finish_non_exhaustive()
    }
}

/// One-shot signing with an explicit timestamp, for reproducible output.
///
/// # Errors
///
/// Returns [`IoProofError::Configuration`] if the private key hex is invalid.
pub fn sign_with_timestamp(
    private_key_hex: &str,
    key_id: &str,
    request_body: impl AsRef<[u8]>,
    response_body: impl AsRef<[u8]>,
    timestamp: &str,
) -> Result<SigningResult, Report<IoProofError>> {
    let seed = decode_key_hex(private_key_hex, "private key")?;
    let signer = ResponseSigner::new(SigningKey::from_bytes(&seed), key_id);
    Ok(signer.sign_with_timestamp(request_body, response_body, timestamp))
}
