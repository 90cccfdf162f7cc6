//! CLI error types.

use derive_more::{Display, Error};

#[derive(Debug, Display, Error)]
pub enum CliError {
    /// Missing or invalid key configuration
    #[display("Configuration error: {message}")]
    Config { message: String },
    /// Key pair generation failed
    #[display("Key generation failed")]
    KeyGeneration,
    /// Local sign/verify round trip failed
    #[display("Signature test failed: {message}")]
    SelfTest { message: String },
    /// Writing output failed
    #[display("IO error")]
    Io,
}
