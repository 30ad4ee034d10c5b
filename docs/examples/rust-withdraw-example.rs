//! Tool-LP Rust SDK — integration example
//!
//! Demonstrates: address derivation, an offline instruction preview, and a
//! proxied CP-swap withdrawal.
//!
//! # Setup
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! tool-lp-sdk = { path = "../packages/sdk-rust" }
//! solana-sdk  = "2.1"
//! tokio       = { version = "1", features = ["full"] }
//! ```
//!
//! # Environment
//!
//! ```bash
//! export SOLANA_RPC_URL="https://api.mainnet-beta.solana.com"
//! export OWNER_KEYPAIR_PATH="$HOME/.config/solana/id.json"
//! ```

use std::str::FromStr;

use solana_sdk::{
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair, Signer},
};
use tool_lp_sdk::{
    address::{derive_addresses, CP_SWAP_PROGRAM_ID},
    instructions::decode_withdraw_data,
    PoolIdentity, SubmitOptions, ToolLpClient, WithdrawRequest,
};

// ─── Raydium CP-swap SOL/USDC pool (mainnet-beta) ────────────────────────────

const AMM_CONFIG: &str = "D4FPEruKEHrG5TenZ2mpDGEfu1iUvTiqBxvpU8HLBvC2";
const WSOL_MINT:  &str = "So11111111111111111111111111111111111111112";
const USDC_MINT:  &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

// ─── Helpers ──────────────────────────────────────────────────────────────────

fn rpc_url() -> String {
    std::env::var("SOLANA_RPC_URL")
        .unwrap_or_else(|_| "https://api.mainnet-beta.solana.com".into())
}

fn load_keypair() -> Keypair {
    let path = std::env::var("OWNER_KEYPAIR_PATH")
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            format!("{home}/.config/solana/id.json")
        });
    read_keypair_file(&path)
        .unwrap_or_else(|e| panic!("Failed to load keypair from {path}: {e}"))
}

fn sol_usdc() -> PoolIdentity {
    PoolIdentity::with_spl_token(
        Pubkey::from_str(AMM_CONFIG).unwrap(),
        Pubkey::from_str(WSOL_MINT).unwrap(),
        Pubkey::from_str(USDC_MINT).unwrap(),
    )
    .expect("distinct mints")
}

// ─── Example 1: Derive addresses ──────────────────────────────────────────────

/// Every PDA and ATA the withdraw touches. Pure computation, no RPC.
fn example_addresses(owner: &Pubkey) {
    println!("\n── Derived addresses: SOL/USDC ──────────────────────────────");

    let set = derive_addresses(&sol_usdc(), owner, &CP_SWAP_PROGRAM_ID)
        .expect("derivation failed");

    println!("  Authority:     {}", set.authority);
    println!("  Pool:          {}", set.pool);
    println!("  LP mint:       {}", set.lp_mint);
    println!("  Vault 0:       {}", set.vault_0);
    println!("  Vault 1:       {}", set.vault_1);
    println!("  Owner LP:      {}", set.owner_lp_account);
    println!("  Owner token 0: {}", set.owner_token_0_account);
    println!("  Owner token 1: {}", set.owner_token_1_account);
}

// ─── Example 2: Preview the instructions ──────────────────────────────────────

/// Build the compute-budget + proxy_withdraw pair without sending it.
fn example_preview(client: &ToolLpClient, owner: &Pubkey, request: &WithdrawRequest) {
    println!("\n── Preview: proxy_withdraw ──────────────────────────────────");

    let ixs = client
        .build_withdraw(owner, &sol_usdc(), request)
        .expect("build failed");

    for ix in &ixs {
        println!("  {} ({} accounts, {} data bytes)", ix.program_id, ix.accounts.len(), ix.data.len());
    }
    let decoded = decode_withdraw_data(&ixs[ixs.len() - 1].data).expect("decode failed");
    println!("  Decoded:       {decoded:?}");
}

// ─── Example 3: Withdraw ──────────────────────────────────────────────────────

/// Burn LP tokens and receive SOL + USDC. Requires LP tokens in the owner's ATA.
async fn example_withdraw(client: &ToolLpClient, payer: &Keypair, request: WithdrawRequest) {
    println!("\n── Withdraw: SOL/USDC ───────────────────────────────────────");

    let options = SubmitOptions { skip_preflight: true, confirm: true };
    match client.withdraw(payer, &sol_usdc(), request, options).await {
        Ok(result) => {
            println!("  Signature: {}", result.signature);
            println!("  Pool:      {}", result.addresses.pool);
        }
        Err(e) => println!("  Withdraw failed: {e}"),
    }
}

// ─── Main ─────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    let client = ToolLpClient::new(rpc_url());
    let payer  = load_keypair();

    let request = WithdrawRequest {
        lp_token_amount:        12_570_000,
        minimum_token_0_amount: 100_000,
        minimum_token_1_amount: 100_000,
    };

    println!("Tool-LP Rust SDK example");
    println!("Owner pubkey: {}", payer.pubkey());
    println!("Proxy:        {}", client.program_id());

    // ── Offline ───────────────────────────────────────────────────────────
    example_addresses(&payer.pubkey());
    example_preview(&client, &payer.pubkey(), &request);

    // ── Write operation (requires LP tokens) ──────────────────────────────
    // Uncomment to execute on-chain:
    // example_withdraw(&client, &payer, request).await;
}
