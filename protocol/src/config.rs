//! # Protocol Configuration & Constants
//!
//! Every literal that ends up inside a hash, a signature, or a JSON export
//! lives here. Changing any of them changes the digest of every transaction
//! ever signed, which invalidates every signature ever produced. Treat this
//! file as append-only.

use k256::pkcs8::LineEnding;

// ---------------------------------------------------------------------------
// Protocol Version
// ---------------------------------------------------------------------------

/// Crate-level protocol version string.
pub const PROTOCOL_VERSION: &str = "0.1.0";

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// ECDSA over secp256k1. Same curve as Bitcoin, so every hardware wallet
/// on the planet already speaks it.
pub const SIGNING_ALGORITHM: &str = "ECDSA-secp256k1-SHA256";

/// Name of the curve backing every address.
pub const CURVE_NAME: &str = "secp256k1";

/// Secret scalar length in bytes.
pub const SECRET_KEY_LENGTH: usize = 32;

/// SHA-256 output length. Transaction hashes are always this long.
pub const HASH_OUTPUT_LENGTH: usize = 32;

/// Upper bound on a DER-encoded secp256k1 signature: two 33-byte integers
/// plus tag/length overhead.
pub const MAX_DER_SIGNATURE_LENGTH: usize = 72;

/// Address PEM blocks are always written with LF line endings. CRLF would
/// give the same key a second address, and a second transaction hash.
pub const ADDRESS_PEM_LINE_ENDING: LineEnding = LineEnding::LF;

// ---------------------------------------------------------------------------
// Canonical Form
// ---------------------------------------------------------------------------

/// Label preceding the amount in the canonical string. The double "m" is
/// load-bearing: it is baked into every digest ever produced.
pub const CANONICAL_AMOUNT_LABEL: &str = "Ammount";

/// Label preceding the sender.
pub const CANONICAL_SENDER_LABEL: &str = "From";

/// Label preceding the recipient.
pub const CANONICAL_RECIPIENT_LABEL: &str = "To";

/// How an absent sender (mint transaction) renders in the canonical string.
pub const MINT_SENDER_RENDERING: &str = "None";

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Number of hex characters of an address digest shown in log lines.
/// Full PEM blocks in logs are unreadable, so we log a fingerprint instead.
pub const ADDRESS_FINGERPRINT_HEX_CHARS: usize = 16;
