//! # CLI Interface
//!
//! Defines the command-line argument structure for `tally` using `clap`
//! derive. Seven subcommands: `keygen`, `address`, `sign`, `mint`,
//! `verify`, `show` and `version`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tally transaction wallet.
///
/// Generates keys, signs transfers, issues mint records and validates
/// transaction envelopes. Nothing is stored: keys are printed and passed back
/// in, envelopes are read from and written to files or stdout.
#[derive(Parser, Debug)]
#[command(
    name = "tally",
    about = "Sign and validate Tally transactions",
    version,
    propagate_version = true
)]
pub struct TallyCli {
    /// Log output format: `pretty` or `json`.
    #[arg(long, global = true, env = "TALLY_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a fresh keypair and print its secret and address.
    Keygen,
    /// Print the PEM address belonging to a secret key.
    Address(KeyArgs),
    /// Declare and sign a transfer from the key's own address.
    Sign(SignArgs),
    /// Declare a mint (no sender, no signature).
    Mint(MintArgs),
    /// Validate an envelope. Prints `valid` or `invalid`.
    ///
    /// Exits 0 when valid, 1 when invalid, and 2 when the envelope cannot
    /// be validated at all (unsigned, or an undecodable sender).
    Verify(EnvelopeArgs),
    /// Print an envelope's human form, JSON export and hash.
    Show(EnvelopeArgs),
    /// Print version information and exit.
    Version,
}

#[derive(Parser, Debug)]
pub struct KeyArgs {
    /// Hex-encoded 32-byte secp256k1 secret key.
    ///
    /// Prefer the environment variable over the flag so the key stays out
    /// of shell history.
    #[arg(long, short = 'k', env = "TALLY_SIGNING_KEY", hide_env_values = true)]
    pub key: String,
}

#[derive(Parser, Debug)]
pub struct SignArgs {
    #[command(flatten)]
    pub key: KeyArgs,

    /// File holding the recipient's PEM address.
    #[arg(long)]
    pub to: PathBuf,

    /// Amount to transfer. Negative values are accepted as-is.
    #[arg(long, allow_negative_numbers = true)]
    pub amount: i64,

    /// Write the envelope here instead of stdout.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct MintArgs {
    /// File holding the recipient's PEM address.
    #[arg(long)]
    pub to: PathBuf,

    #[arg(long, allow_negative_numbers = true)]
    pub amount: i64,

    /// Write the envelope here instead of stdout.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct EnvelopeArgs {
    /// Path to a JSON transaction envelope.
    pub envelope: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        // Ensures the derive macros produce a valid CLI definition.
        TallyCli::command().debug_assert();
    }

    #[test]
    fn parses_negative_amount() {
        let cli = TallyCli::try_parse_from([
            "tally", "mint", "--to", "bob.pem", "--amount", "-5",
        ])
        .unwrap();
        match cli.command {
            Commands::Mint(args) => assert_eq!(args.amount, -5),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn verify_takes_positional_path() {
        let cli = TallyCli::try_parse_from(["tally", "verify", "tx.json"]).unwrap();
        match cli.command {
            Commands::Verify(args) => assert_eq!(args.envelope, PathBuf::from("tx.json")),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
