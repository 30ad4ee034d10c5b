//! Parameter and result types for the public API.

use solana_sdk::{pubkey::Pubkey, signature::Signature};

use crate::address::{parse_address, TOKEN_PROGRAM_ID};
use crate::error::{Error, Result};

// ─── Pool identity ────────────────────────────────────────────────────────────

/// The identifiers that locate a CP-swap pool.
///
/// Mint order matters: `token_0_mint` / `token_1_mint` must be given in the
/// order the pool was created with, otherwise the derived pool address points
/// at an account that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolIdentity {
    /// The pool's AMM config account.
    pub config:          Pubkey,
    pub token_0_mint:    Pubkey,
    pub token_1_mint:    Pubkey,
    /// Token program owning `token_0_mint` (SPL Token or Token-2022).
    pub token_0_program: Pubkey,
    /// Token program owning `token_1_mint` (SPL Token or Token-2022).
    pub token_1_program: Pubkey,
}

impl PoolIdentity {
    pub fn new(
        config:          Pubkey,
        token_0_mint:    Pubkey,
        token_1_mint:    Pubkey,
        token_0_program: Pubkey,
        token_1_program: Pubkey,
    ) -> Result<Self> {
        if token_0_mint == token_1_mint {
            return Err(Error::InvalidArgument(format!(
                "token_0_mint and token_1_mint must differ (both are {token_0_mint})"
            )));
        }
        Ok(Self { config, token_0_mint, token_1_mint, token_0_program, token_1_program })
    }

    /// Pool whose mints are both owned by the classic SPL Token program.
    pub fn with_spl_token(config: Pubkey, token_0_mint: Pubkey, token_1_mint: Pubkey) -> Result<Self> {
        Self::new(config, token_0_mint, token_1_mint, TOKEN_PROGRAM_ID, TOKEN_PROGRAM_ID)
    }

    /// Parse all five identifiers from base-58 strings.
    pub fn parse(
        config:          &str,
        token_0_mint:    &str,
        token_1_mint:    &str,
        token_0_program: &str,
        token_1_program: &str,
    ) -> Result<Self> {
        Self::new(
            parse_address("config", config)?,
            parse_address("token_0_mint", token_0_mint)?,
            parse_address("token_1_mint", token_1_mint)?,
            parse_address("token_0_program", token_0_program)?,
            parse_address("token_1_program", token_1_program)?,
        )
    }
}

// ─── Derived addresses ────────────────────────────────────────────────────────

/// Every PDA and ATA the withdraw instruction references.
///
/// Fully determined by a [`PoolIdentity`], the CP-swap program id, and the
/// owner. Built by [`crate::address::derive_addresses`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedAddressSet {
    pub authority:             Pubkey,
    pub pool:                  Pubkey,
    pub lp_mint:               Pubkey,
    pub vault_0:               Pubkey,
    pub vault_1:               Pubkey,
    pub owner_lp_account:      Pubkey,
    pub owner_token_0_account: Pubkey,
    pub owner_token_1_account: Pubkey,
}

// ─── Withdraw ─────────────────────────────────────────────────────────────────

/// Amounts for a `proxy_withdraw` call.
///
/// No client-side checks are made on the minimums; the CP-swap program
/// enforces them when the instruction executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WithdrawRequest {
    /// LP tokens to burn.
    pub lp_token_amount:        u64,
    /// Reject the withdrawal if fewer token-0 units would be returned.
    pub minimum_token_0_amount: u64,
    /// Reject the withdrawal if fewer token-1 units would be returned.
    pub minimum_token_1_amount: u64,
}

/// How a transaction is handed to the RPC node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitOptions {
    /// Skip the node's preflight simulation.
    pub skip_preflight: bool,
    /// Wait for the client's commitment level before returning.
    pub confirm:        bool,
}

impl Default for SubmitOptions {
    fn default() -> Self {
        Self { skip_preflight: false, confirm: true }
    }
}

/// Result of [`crate::ToolLpClient::withdraw`].
#[derive(Debug, Clone)]
pub struct WithdrawResult {
    pub signature: Signature,
    pub addresses: DerivedAddressSet,
    pub request:   WithdrawRequest,
}
