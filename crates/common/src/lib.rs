//! Common functionality for IOProof provider signing.
//!
//! This crate binds an HTTP request to the response produced for it with an
//! Ed25519 signature that any IOProof SDK can reproduce and verify.
//!
//! # Modules
//!
//! - [`conformance`]: Cross-language test vector shared with the other SDKs
//! - [`constants`]: Header names, discovery path and protocol literals
//! - [`error`]: Error types and error handling utilities
//! - [`hasher`]: SHA-256 content digests
//! - [`logging`]: Logger installation
//! - [`message`]: Canonical signable message and timestamp formatting
//! - [`response_signing`]: Signing, verification, keys, rotation and discovery
//! - [`settings`]: Configuration management and validation
//! - [`test_support`]: Testing utilities

pub mod conformance;
pub mod constants;
pub mod error;
pub mod hasher;
pub mod logging;
pub mod message;
pub mod response_signing;
pub mod settings;
