//! Response signing utilities.
//!
//! This module provides Ed25519 signing of request/response pairs, signature
//! verification, key generation and rotation, and the `.well-known` discovery
//! document that publishes verification keys.

pub mod discovery;
pub mod endpoints;
pub mod keys;
pub mod rotation;
pub mod signing;
pub mod verification;

pub use discovery::*;
pub use endpoints::*;
pub use keys::*;
pub use rotation::*;
pub use signing::*;
pub use verification::*;
