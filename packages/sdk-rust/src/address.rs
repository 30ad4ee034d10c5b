//! Program-derived and associated-token address derivation.
//!
//! Every address the `proxy_withdraw` instruction references is computed
//! here, exactly as the Raydium CP-swap program and the Associated Token
//! Account program compute them on-chain. Nothing in this module performs
//! I/O or keeps state.

use solana_sdk::{pubkey, pubkey::Pubkey};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::types::{DerivedAddressSet, PoolIdentity};

// ─── Well-known program IDs ───────────────────────────────────────────────────

/// Tool-LP proxy program (receives `proxy_withdraw`).
pub const TOOL_LP_PROGRAM_ID: Pubkey = pubkey!("DduTe3VFPwWGN2EBh8FZ1GSnXe7VFotp1A8eej7qwgX2");

/// Raydium CP-swap program, mainnet-beta.
pub const CP_SWAP_PROGRAM_ID: Pubkey = pubkey!("CPMMoo8L3F4NbTegBCKVNunggL7H1ZpdTHKxQB5qKP1C");

/// Raydium CP-swap program, devnet.
pub const CP_SWAP_DEVNET_PROGRAM_ID: Pubkey = pubkey!("CPMDWBwJDtYax9qW7AyRuVC19Cc4L4Vcy4n2BHAbHkCW");

pub const TOKEN_PROGRAM_ID: Pubkey = pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");
pub const TOKEN_2022_PROGRAM_ID: Pubkey = pubkey!("TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb");
pub const ATA_PROGRAM_ID: Pubkey = pubkey!("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");
pub const MEMO_PROGRAM_ID: Pubkey = pubkey!("MemoSq4gqABAXKb96qnH8TysNcWxMyWCqXgDLGmfcHr");
pub const COMPUTE_BUDGET_PROGRAM_ID: Pubkey = pubkey!("ComputeBudget111111111111111111111111111111");

// ─── PDA seeds (mirror the CP-swap program's constants) ──────────────────────

pub const AUTH_SEED:          &[u8] = b"vault_and_lp_mint_auth_seed";
pub const POOL_SEED:          &[u8] = b"pool";
pub const POOL_LP_MINT_SEED:  &[u8] = b"pool_lp_mint";
pub const POOL_VAULT_SEED:    &[u8] = b"pool_vault";

// ─── Parsing ──────────────────────────────────────────────────────────────────

/// Parse a base-58 address, naming `field` in the error.
pub fn parse_address(field: &'static str, value: &str) -> Result<Pubkey> {
    Pubkey::from_str(value.trim()).map_err(|e| Error::InvalidAddress {
        field,
        reason: format!("'{value}' is not a base-58 pubkey ({e})"),
    })
}

/// Interpret raw bytes as an address; anything but exactly 32 bytes fails.
pub fn parse_address_bytes(field: &'static str, bytes: &[u8]) -> Result<Pubkey> {
    let raw: [u8; 32] = bytes.try_into().map_err(|_| Error::InvalidAddress {
        field,
        reason: format!("expected 32 bytes, got {}", bytes.len()),
    })?;
    Ok(Pubkey::from(raw))
}

// ─── PDA derivation helpers ───────────────────────────────────────────────────

/// Search bumps 255 → 0 for the first off-curve address under `program_id`.
pub fn find_program_address(seeds: &[&[u8]], program_id: &Pubkey) -> Result<(Pubkey, u8)> {
    Pubkey::try_find_program_address(seeds, program_id)
        .ok_or(Error::DerivationExhausted { program_id: *program_id })
}

/// Derive the CP-swap authority PDA that owns every vault and LP mint.
pub fn derive_authority(cp_swap_program: &Pubkey) -> Result<(Pubkey, u8)> {
    find_program_address(&[AUTH_SEED], cp_swap_program)
}

/// Derive the pool-state PDA for a config and an ordered mint pair.
pub fn derive_pool(
    config:          &Pubkey,
    token_0_mint:    &Pubkey,
    token_1_mint:    &Pubkey,
    cp_swap_program: &Pubkey,
) -> Result<(Pubkey, u8)> {
    find_program_address(
        &[POOL_SEED, config.as_ref(), token_0_mint.as_ref(), token_1_mint.as_ref()],
        cp_swap_program,
    )
}

/// Derive the pool's LP mint.
pub fn derive_lp_mint(pool: &Pubkey, cp_swap_program: &Pubkey) -> Result<(Pubkey, u8)> {
    find_program_address(&[POOL_LP_MINT_SEED, pool.as_ref()], cp_swap_program)
}

/// Derive the pool's token vault for `mint`.
pub fn derive_vault(pool: &Pubkey, mint: &Pubkey, cp_swap_program: &Pubkey) -> Result<(Pubkey, u8)> {
    find_program_address(&[POOL_VAULT_SEED, pool.as_ref(), mint.as_ref()], cp_swap_program)
}

/// Derive the Associated Token Account for an owner + mint under `token_program`.
pub fn derive_ata(owner: &Pubkey, mint: &Pubkey, token_program: &Pubkey) -> Result<Pubkey> {
    find_program_address(
        &[owner.as_ref(), token_program.as_ref(), mint.as_ref()],
        &ATA_PROGRAM_ID,
    )
    .map(|(ata, _)| ata)
}

/// Derive every address a withdraw from `pool` by `owner` needs.
///
/// The owner's LP account is always an SPL Token account: CP-swap LP mints
/// are created under the classic token program regardless of the pair.
pub fn derive_addresses(
    pool:            &PoolIdentity,
    owner:           &Pubkey,
    cp_swap_program: &Pubkey,
) -> Result<DerivedAddressSet> {
    let (authority, _) = derive_authority(cp_swap_program)?;
    let (pool_addr, _) = derive_pool(
        &pool.config,
        &pool.token_0_mint,
        &pool.token_1_mint,
        cp_swap_program,
    )?;
    let (lp_mint, _) = derive_lp_mint(&pool_addr, cp_swap_program)?;
    let (vault_0, _) = derive_vault(&pool_addr, &pool.token_0_mint, cp_swap_program)?;
    let (vault_1, _) = derive_vault(&pool_addr, &pool.token_1_mint, cp_swap_program)?;

    let set = DerivedAddressSet {
        authority,
        pool: pool_addr,
        lp_mint,
        vault_0,
        vault_1,
        owner_lp_account:      derive_ata(owner, &lp_mint, &TOKEN_PROGRAM_ID)?,
        owner_token_0_account: derive_ata(owner, &pool.token_0_mint, &pool.token_0_program)?,
        owner_token_1_account: derive_ata(owner, &pool.token_1_mint, &pool.token_1_program)?,
    };
    log::debug!("derived addresses for pool {}: {set:?}", set.pool);
    Ok(set)
}
