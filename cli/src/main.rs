// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Tally CLI
//!
//! Entry point for the `tally` binary. Parses CLI arguments, initializes
//! logging and dispatches to the subcommand handlers.
//!
//! - `keygen`  : generate a keypair
//! - `address` : derive the PEM address of a secret key
//! - `sign`    : declare and sign a transfer envelope
//! - `mint`    : declare a mint envelope
//! - `verify`  : validate an envelope (exit 0 valid, 1 invalid, 2 error)
//! - `show`    : print an envelope's canonical form and hash
//! - `version` : print build version information

mod cli;
mod commands;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;

use cli::{Commands, TallyCli};
use commands::Verdict;
use logging::LogFormat;

fn main() -> Result<ExitCode> {
    let cli = TallyCli::parse();
    logging::init_logging(
        "tally_cli=info,tally_protocol=warn",
        LogFormat::from_str_lossy(&cli.log_format),
    );

    match cli.command {
        Commands::Keygen => print(commands::keygen()?),
        Commands::Address(args) => print(commands::address(&args.key)?),
        Commands::Sign(args) => emit(
            commands::sign(&args.key.key, &args.to, args.amount)?,
            args.output.as_deref(),
        )?,
        Commands::Mint(args) => emit(
            commands::mint(&args.to, args.amount)?,
            args.output.as_deref(),
        )?,
        Commands::Verify(args) => {
            let outcome = commands::verify(&args.envelope);
            match &outcome {
                Ok(verdict) => println!("{verdict}"),
                Err(err) => eprintln!("Error: {err:?}"),
            }
            return Ok(ExitCode::from(verify_status(&outcome)));
        }
        Commands::Show(args) => print(commands::show(&args.envelope)?),
        Commands::Version => print(commands::version()),
    }

    Ok(ExitCode::SUCCESS)
}

/// Exit status for `tally verify`. An unprocessable transaction gets its own
/// code so scripts can tell it apart from a forged one.
fn verify_status(outcome: &Result<Verdict>) -> u8 {
    match outcome {
        Ok(Verdict::Valid) => 0,
        Ok(Verdict::Invalid) => 1,
        Err(_) => 2,
    }
}

fn print(text: String) {
    println!("{}", text.trim_end());
}

/// Writes `text` to `output` when given, stdout otherwise.
fn emit(text: String, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, format!("{text}\n"))
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "envelope written");
        }
        None => print(text),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_exit_codes_are_distinct() {
        assert_eq!(verify_status(&Ok(Verdict::Valid)), 0);
        assert_eq!(verify_status(&Ok(Verdict::Invalid)), 1);
        assert_eq!(
            verify_status(&Err(anyhow::anyhow!("transaction must be signed"))),
            2
        );
    }
}
