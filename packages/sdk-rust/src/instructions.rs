//! Low-level instruction builders.
//!
//! Each function constructs a [`solana_sdk::instruction::Instruction`] ready
//! for signing and submission.  Account order mirrors the Anchor
//! `#[derive(Accounts)]` struct of the proxy program's `proxy_withdraw`
//! exactly, which in turn mirrors CP-swap's own `withdraw`.
//!
//! Anchor instruction discriminators: `sha256("global:{name}")[..8]`.

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use crate::address::{
    derive_addresses, COMPUTE_BUDGET_PROGRAM_ID, MEMO_PROGRAM_ID, TOKEN_2022_PROGRAM_ID,
    TOKEN_PROGRAM_ID,
};
use crate::error::{Error, Result};
use crate::types::{DerivedAddressSet, PoolIdentity, WithdrawRequest};

/// Compute-unit ceiling the reference client requests for a withdraw.
pub const DEFAULT_COMPUTE_UNIT_LIMIT: u32 = 400_000;

/// Discriminator (8) + lp_token_amount (8) + minimum_token_0 (8) + minimum_token_1 (8).
pub const WITHDRAW_DATA_LEN: usize = 32;

/// Number of accounts `proxy_withdraw` takes.
pub const WITHDRAW_ACCOUNTS_LEN: usize = 15;

/// `ComputeBudgetInstruction::SetComputeUnitLimit` tag.
const SET_COMPUTE_UNIT_LIMIT_TAG: u8 = 2;

// ─── Discriminator ────────────────────────────────────────────────────────────

pub(crate) fn disc(name: &str) -> [u8; 8] {
    let preimage = format!("global:{name}");
    let h = solana_sdk::hash::hash(preimage.as_bytes());
    let mut d = [0u8; 8];
    d.copy_from_slice(&h.to_bytes()[..8]);
    d
}

// ─── proxy_withdraw payload ──────────────────────────────────────────────────

/// Encode the 32-byte `proxy_withdraw` payload.
pub fn withdraw_data(request: &WithdrawRequest) -> Vec<u8> {
    let mut data = Vec::with_capacity(WITHDRAW_DATA_LEN);
    data.extend_from_slice(&disc("proxy_withdraw"));
    data.extend_from_slice(&request.lp_token_amount.to_le_bytes());
    data.extend_from_slice(&request.minimum_token_0_amount.to_le_bytes());
    data.extend_from_slice(&request.minimum_token_1_amount.to_le_bytes());
    data
}

/// Decode a `proxy_withdraw` payload back into its amounts.
pub fn decode_withdraw_data(data: &[u8]) -> Result<WithdrawRequest> {
    if data.len() != WITHDRAW_DATA_LEN {
        return Err(Error::ParseError {
            offset: data.len().min(WITHDRAW_DATA_LEN),
            reason: format!("withdraw data is {} bytes; expected {WITHDRAW_DATA_LEN}", data.len()),
        });
    }
    if data[..8] != disc("proxy_withdraw") {
        return Err(Error::ParseError {
            offset: 0,
            reason: "discriminator is not proxy_withdraw".into(),
        });
    }
    Ok(WithdrawRequest {
        lp_token_amount:        read_u64(data, 8)?,
        minimum_token_0_amount: read_u64(data, 16)?,
        minimum_token_1_amount: read_u64(data, 24)?,
    })
}

fn read_u64(data: &[u8], offset: usize) -> Result<u64> {
    data.get(offset..offset + 8)
        .and_then(|b| b.try_into().ok())
        .map(u64::from_le_bytes)
        .ok_or_else(|| Error::ParseError { offset, reason: "slice error (u64)".into() })
}

// ─── proxy_withdraw ───────────────────────────────────────────────────────────

/// Build the `proxy_withdraw` instruction.
///
/// `addresses` must come from [`derive_addresses`] for the same `pool`,
/// `owner` and `cp_swap_program`; nothing here re-derives or reorders them.
pub fn proxy_withdraw_ix(
    program_id:      &Pubkey,
    cp_swap_program: &Pubkey,
    owner:           &Pubkey,
    pool:            &PoolIdentity,
    addresses:       &DerivedAddressSet,
    request:         &WithdrawRequest,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*cp_swap_program,      false),
            AccountMeta::new_readonly(*owner,                true),   // signer
            AccountMeta::new_readonly(addresses.authority,   false),
            AccountMeta::new(addresses.pool,                  false),  // mut (lp_supply)
            AccountMeta::new(addresses.owner_lp_account,      false),  // mut (burn)
            AccountMeta::new(addresses.owner_token_0_account, false),  // mut
            AccountMeta::new(addresses.owner_token_1_account, false),  // mut
            AccountMeta::new(addresses.vault_0,               false),  // mut
            AccountMeta::new(addresses.vault_1,               false),  // mut
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID,      false),
            AccountMeta::new_readonly(TOKEN_2022_PROGRAM_ID, false),
            AccountMeta::new_readonly(pool.token_0_mint,     false),
            AccountMeta::new_readonly(pool.token_1_mint,     false),
            AccountMeta::new(addresses.lp_mint,              false),  // mut (supply)
            AccountMeta::new_readonly(MEMO_PROGRAM_ID,       false),
        ],
        data: withdraw_data(request),
    }
}

// ─── compute budget ───────────────────────────────────────────────────────────

/// Build a `SetComputeUnitLimit` instruction for the compute-budget program.
pub fn set_compute_unit_limit_ix(units: u32) -> Instruction {
    let mut data = vec![SET_COMPUTE_UNIT_LIMIT_TAG];
    data.extend_from_slice(&units.to_le_bytes());
    Instruction {
        program_id: COMPUTE_BUDGET_PROGRAM_ID,
        accounts:   vec![],
        data,
    }
}

// ─── Full withdraw ────────────────────────────────────────────────────────────

/// Derive every address and build the instruction list for one withdraw.
///
/// With `compute_unit_limit = Some(n)` a `SetComputeUnitLimit(n)` instruction
/// is placed first; the withdraw instruction itself is unchanged.
pub fn withdraw_instructions(
    program_id:         &Pubkey,
    cp_swap_program:    &Pubkey,
    owner:              &Pubkey,
    pool:               &PoolIdentity,
    request:            &WithdrawRequest,
    compute_unit_limit: Option<u32>,
) -> Result<Vec<Instruction>> {
    let addresses = derive_addresses(pool, owner, cp_swap_program)?;
    let withdraw = proxy_withdraw_ix(program_id, cp_swap_program, owner, pool, &addresses, request);
    log::debug!(
        "built proxy_withdraw for pool {}: lp={} min0={} min1={}",
        addresses.pool,
        request.lp_token_amount,
        request.minimum_token_0_amount,
        request.minimum_token_1_amount,
    );

    let mut ixs = Vec::with_capacity(2);
    if let Some(units) = compute_unit_limit {
        ixs.push(set_compute_unit_limit_ix(units));
    }
    ixs.push(withdraw);
    Ok(ixs)
}
