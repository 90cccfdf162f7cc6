//! Key rotation for response signing.
//!
//! Rotation is in-memory: it produces the new key pair and the list of keys
//! to publish. Storing the private key is left to the operator.

use error_stack::Report;

use crate::error::IoProofError;

use super::discovery::KeyEntry;
use super::keys::{current_key_id, KeyPair};

#[derive(Debug, Clone)]
pub struct KeyRotation {
    pub key_pair: KeyPair,
    pub previous_kid: Option<String>,
    /// Keys to publish, oldest first.
    pub active_keys: Vec<KeyEntry>,
}

/// Generates a new key and the active key list that follows from it.
///
/// `kid` defaults to the current `YYYY-MM`. The current key stays published
/// alongside the new one unless it carries the same id.
///
/// # Errors
///
/// Returns [`IoProofError::Configuration`] if `kid` is not a `YYYY-MM` label,
/// or [`IoProofError::Randomness`] if a key cannot be generated.
pub fn rotate_key(
    current: Option<&KeyEntry>,
    kid: Option<String>,
) -> Result<KeyRotation, Report<IoProofError>> {
    let new_kid = kid.unwrap_or_else(current_key_id);
    let key_pair = KeyPair::generate_with_key_id(new_kid)?;

    let active_keys = match current {
        Some(prev) if prev.kid != key_pair.key_id => vec![prev.clone(), key_pair.key_entry()],
        _ => vec![key_pair.key_entry()],
    };

    log::info!(
        "Rotated signing key to '{}' ({} active)",
        key_pair.key_id,
        active_keys.len()
    );

    Ok(KeyRotation {
        previous_kid: current.map(|prev| prev.kid.clone()),
        key_pair,
        active_keys,
    })
}

/// Removes `kid` from the active keys.
///
/// # Errors
///
/// Returns [`IoProofError::Configuration`] if that would leave no active key.
pub fn deactivate_key(
    active_keys: &[KeyEntry],
    kid: &str,
) -> Result<Vec<KeyEntry>, Report<IoProofError>> {
    let remaining: Vec<KeyEntry> = active_keys
        .iter()
        .filter(|entry| entry.kid != kid)
        .cloned()
        .collect();

    if remaining.is_empty() {
        return Err(Report::new(IoProofError::Configuration {
            message: "Cannot deactivate the last active key".into(),
        }));
    }

    Ok(remaining)
}
