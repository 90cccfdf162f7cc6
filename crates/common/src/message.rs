//! Canonical signable message construction.
//!
//! Every SDK signs exactly `ioproof:v1:<request_hash>|<response_hash>|<timestamp>`.
//! Inputs are concatenated as given: hashes must already be 64 lowercase hex
//! characters and the timestamp must be `YYYY-MM-DDTHH:MM:SS.mmmZ`.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::constants::{MESSAGE_PREFIX, MESSAGE_SEPARATOR};

/// The exact string that gets signed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SignableMessage(String);

impl SignableMessage {
    #[must_use]
    pub fn new(request_hash: &str, response_hash: &str, timestamp: &str) -> Self {
        Self(format!(
            "{MESSAGE_PREFIX}{request_hash}{MESSAGE_SEPARATOR}{response_hash}{MESSAGE_SEPARATOR}{timestamp}"
        ))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// UTF-8 bytes handed to the signature primitive.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SignableMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SignableMessage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Builds the signable message from two digests and a timestamp.
#[must_use]
pub fn canonicalize(request_hash: &str, response_hash: &str, timestamp: &str) -> SignableMessage {
    SignableMessage::new(request_hash, response_hash, timestamp)
}

/// Formats an instant with millisecond precision and a literal `Z` suffix.
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Reads the clock once and formats the result.
#[must_use]
pub fn current_timestamp() -> String {
    format_timestamp(Utc::now())
}
