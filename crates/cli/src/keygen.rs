//! Key pair generation.

use std::io::Write;

use error_stack::{Report, ResultExt};
use ioproof_common::response_signing::KeyPair;

use crate::error::CliError;

/// Generate a key pair and print it as configuration assignments.
pub fn generate_and_display(out: &mut impl Write) -> Result<(), Report<CliError>> {
    let key_pair = KeyPair::generate().change_context(CliError::KeyGeneration)?;
    write_key_pair(out, &key_pair).change_context(CliError::Io)
}

/// Write the three `IOPROOF_*` lines for a key pair.
pub fn write_key_pair(out: &mut impl Write, key_pair: &KeyPair) -> std::io::Result<()> {
    writeln!(out, "IOPROOF_PRIVATE_KEY={}", key_pair.private_key)?;
    writeln!(out, "IOPROOF_PUBLIC_KEY={}", key_pair.public_key)?;
    writeln!(out, "IOPROOF_KEY_ID={}", key_pair.key_id)
}
