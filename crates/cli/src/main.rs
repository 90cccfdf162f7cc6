//! IOProof provider CLI.
//!
//! This tool provides commands for:
//! - Generating Ed25519 signing keys
//! - Checking configured keys with a local sign/verify round trip
//! - Printing the `.well-known/ioproof.json` discovery document

use std::io::{self, Write};

use clap::{Parser, Subcommand};
use error_stack::{Report, ResultExt};
use ioproof_common::logging::init_logging;
use ioproof_common::settings::Settings;
use log::LevelFilter;

mod error;
mod keygen;
mod well_known;

use error::CliError;

#[derive(Parser)]
#[command(name = "ioproof")]
#[command(about = "IOProof provider signing CLI")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Generate a new Ed25519 keypair
    Keygen,

    /// Verify signing works with your current keys
    Test {
        #[arg(long, env = "IOPROOF_PRIVATE_KEY", hide_env_values = true)]
        private_key: Option<String>,

        #[arg(long, env = "IOPROOF_PUBLIC_KEY")]
        public_key: Option<String>,

        #[arg(long, env = "IOPROOF_KEY_ID", default_value = "test")]
        key_id: String,
    },

    /// Print the discovery document for the configured keys
    WellKnown,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    if let Err(e) = init_logging(level) {
        eprintln!("Failed to initialize logging: {e}");
    }

    if let Err(report) = run(cli, &mut io::stdout().lock()) {
        eprintln!("Error: {report:?}");
        std::process::exit(1);
    }
}

fn run(cli: Cli, out: &mut impl Write) -> Result<(), Report<CliError>> {
    match cli.command.unwrap_or(Commands::Keygen) {
        Commands::Keygen => keygen::generate_and_display(out),
        Commands::Test {
            private_key,
            public_key,
            key_id,
        } => self_test::run(
            out,
            &self_test::TestKeys {
                private_key,
                public_key,
                key_id,
            },
        ),
        Commands::WellKnown => {
            let settings = Settings::from_env().change_context(CliError::Config {
                message: "Failed to load IOPROOF_* settings".into(),
            })?;
            well_known::display(out, &settings)
        }
    }
}
