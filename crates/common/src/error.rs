//! Error types for IOProof signing.
//!
//! Errors are carried in [`error_stack::Report`] so each layer can add context
//! without losing the original cause. Verification failures are deliberately
//! absent: the verifier answers `false` instead of erroring.

use derive_more::{Display, Error};
use http::StatusCode;

#[derive(Debug, Display, Error)]
pub enum IoProofError {
    /// Invalid key material or settings. Fatal at startup.
    #[display("Configuration error: {message}")]
    Configuration { message: String },

    /// Failure while producing a signature for a response.
    #[display("Signing error: {message}")]
    Signing { message: String },

    /// The operating system could not supply secure randomness.
    #[display("Randomness error: {message}")]
    Randomness { message: String },

    #[display("Serialization error: {message}")]
    Serialization { message: String },
}

impl IoProofError {
    /// HTTP status an integration should use when rendering this error.
    ///
    /// Every variant is a provider-side fault, so this is always 500.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    /// Whether the error must abort initialization rather than degrade a single response.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Configuration { .. } | Self::Randomness { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IoProofError::Configuration {
            message: "bad key".into(),
        };
        assert_eq!(err.to_string(), "Configuration error: bad key");

        let err = IoProofError::Signing {
            message: "header".into(),
        };
        assert_eq!(err.to_string(), "Signing error: header");
    }

    #[test]
    fn test_fatal_classification() {
        assert!(IoProofError::Configuration {
            message: String::new()
        }
        .is_fatal());
        assert!(IoProofError::Randomness {
            message: String::new()
        }
        .is_fatal());
        assert!(!IoProofError::Signing {
            message: String::new()
        }
        .is_fatal());
    }

    #[test]
    fn test_status_code() {
        let errors = [
            IoProofError::Configuration {
                message: "key".into(),
            },
            IoProofError::Signing {
                message: "header".into(),
            },
            IoProofError::Randomness {
                message: "os".into(),
            },
            IoProofError::Serialization {
                message: "json".into(),
            },
        ];
        for err in errors {
            assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR, "{err}");
        }
    }
}
