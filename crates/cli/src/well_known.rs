//! Discovery document output.

use std::io::Write;

use error_stack::{Report, ResultExt};
use ioproof_common::settings::Settings;

use crate::error::CliError;

/// Print the `.well-known/ioproof.json` body for the configured keys.
pub fn display(out: &mut impl Write, settings: &Settings) -> Result<(), Report<CliError>> {
    let directory = settings.directory().change_context(CliError::Config {
        message: "Failed to build discovery document".into(),
    })?;
    let json = serde_json::to_string_pretty(&directory).change_context(CliError::Io)?;
    writeln!(out, "{json}").change_context(CliError::Io)
}
