//! SDK error type.

use solana_sdk::pubkey::Pubkey;

/// All errors returned by the Tool-LP SDK.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // ── Address derivation ───────────────────────────────────────────────────
    /// No bump in `0..=255` produced an off-curve address for the seeds.
    #[error("No valid bump seed found for program {program_id}")]
    DerivationExhausted { program_id: Pubkey },

    /// An identifier supplied as text or raw bytes is not a 32-byte pubkey.
    #[error("Invalid address for `{field}`: {reason}")]
    InvalidAddress { field: &'static str, reason: String },

    // ── Submission ───────────────────────────────────────────────────────────
    /// The RPC node rejected the transaction or could not be reached.
    #[error("Transaction submission failed: {0}")]
    Submission(#[from] solana_client::client_error::ClientError),

    // ── Instruction data ─────────────────────────────────────────────────────
    /// Raw instruction bytes could not be decoded.
    #[error("Instruction data parse error at offset {offset}: {reason}")]
    ParseError { offset: usize, reason: String },

    // ── Validation ───────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Convenience alias so every module can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;
