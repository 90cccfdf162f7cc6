//! Cross-language conformance vector.
//!
//! The Node.js, Python and Go SDKs ship the same fixture. Any conforming
//! implementation must reproduce every field byte for byte.

use error_stack::Report;

use crate::error::IoProofError;
use crate::hasher::sha256_hex;
use crate::message::canonicalize;
use crate::response_signing::{verify_signature, ResponseSigner};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConformanceVector {
    pub private_key: &'static str,
    pub public_key: &'static str,
    pub key_id: &'static str,
    pub request_body: &'static str,
    pub response_body: &'static str,
    pub timestamp: &'static str,
    pub request_hash: &'static str,
    pub response_hash: &'static str,
    pub message: &'static str,
    pub signature: &'static str,
}

pub const CROSS_LANGUAGE_VECTOR: ConformanceVector = ConformanceVector {
    private_key: "4c830864429505b175ea2fd113367a2b0671a24bd78a827fa24377c66d66b64f",
    public_key: "24ab368303288a10e15205fa54f15d0761b7cd3363bb017a2d4afaec1db14703",
    key_id: "test-2026",
    request_body: r#"{"model":"gpt-4o","messages":[{"role":"user","content":"Hello"}]}"#,
    response_body: r#"{"choices":[{"message":{"content":"Hi there!"}}]}"#,
    timestamp: "2026-01-15T12:00:00.000Z",
    request_hash: "32b417167ac89a4a2469d959dcedebf471e94058668ae4c3dc4c84a8c80fbb02",
    response_hash: "018600114fec1d6995a43c74c6c26b97a4f65bd7a8d6afaf55af8fcd9deabfbf",
    message: "ioproof:v1:32b417167ac89a4a2469d959dcedebf471e94058668ae4c3dc4c84a8c80fbb02|018600114fec1d6995a43c74c6c26b97a4f65bd7a8d6afaf55af8fcd9deabfbf|2026-01-15T12:00:00.000Z",
    signature: "kz5LDmarkNtpwNa4up0Yvb+1+r/C7QIKr7R3WPvDEtdl5TQQp9bj7bG4LvcLRi+Lan1jEv0KugLC6q3ZVbnXCg==",
};

impl ConformanceVector {
    /// Recomputes every derived field and compares it with the fixture.
    ///
    /// # Errors
    ///
    /// Returns [`IoProofError::Configuration`] if the fixture key is unusable
    /// and [`IoProofError::Signing`] naming the first field that diverges.
    pub fn check(&self) -> Result<(), Report<IoProofError>> {
        let signer = ResponseSigner::from_private_key_hex(self.private_key, self.key_id)?;

        let request_hash = sha256_hex(self.request_body);
        let response_hash = sha256_hex(self.response_body);
        let message = canonicalize(&request_hash, &response_hash, self.timestamp);
        let result =
            signer.sign_with_timestamp(self.request_body, self.response_body, self.timestamp);

        let checks = [
            ("public key", signer.public_key_hex(), self.public_key),
            ("request hash", request_hash, self.request_hash),
            ("response hash", response_hash, self.response_hash),
            ("message", message.into_string(), self.message),
            ("signature", result.signature, self.signature),
        ];
        for (field, actual, expected) in checks {
            if actual != expected {
                return Err(Report::new(IoProofError::Signing {
                    message: format!("{field} mismatch: expected {expected}, got {actual}"),
                }));
            }
        }

        if !verify_signature(self.public_key, self.message, self.signature) {
            return Err(Report::new(IoProofError::Signing {
                message: "fixture signature does not verify".into(),
            }));
        }
        Ok(())
    }
}
