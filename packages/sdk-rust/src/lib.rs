//! Tool-LP Rust SDK
//!
//! Builds and submits `proxy_withdraw` instructions that pull liquidity out
//! of a Raydium CP-swap pool through the Tool-LP proxy program.
//! Every PDA and associated token account is derived locally, so a withdraw
//! needs nothing but the pool's config, its two mints and their token programs.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tool_lp_sdk::{PoolIdentity, SubmitOptions, ToolLpClient, WithdrawRequest};
//! use solana_sdk::{pubkey::Pubkey, signature::{Keypair, Signer}};
//! use std::str::FromStr;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ToolLpClient::mainnet();
//!     let keypair = Keypair::new(); // use your funded keypair
//!
//!     let pool = PoolIdentity::with_spl_token(
//!         Pubkey::from_str("D4FPEruKEHrG5TenZ2mpDGEfu1iUvTiqBxvpU8HLBvC2")?, // AMM config
//!         Pubkey::from_str("So11111111111111111111111111111111111111112")?,  // token 0
//!         Pubkey::from_str("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v")?, // token 1
//!     )?;
//!
//!     // 1. Inspect what will be signed — no network I/O
//!     let request = WithdrawRequest {
//!         lp_token_amount:        12_570_000,
//!         minimum_token_0_amount: 100_000,
//!         minimum_token_1_amount: 100_000,
//!     };
//!     let ixs = client.build_withdraw(&keypair.pubkey(), &pool, &request)?;
//!     println!("{} instruction(s)", ixs.len());
//!
//!     // 2. Submit
//!     let result = client.withdraw(&keypair, &pool, request, SubmitOptions::default()).await?;
//!     println!("Withdrawn! tx: {}", result.signature);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Feature Overview
//!
//! | Item | Description |
//! |------|-------------|
//! | [`address::derive_addresses`] | Every PDA / ATA a withdraw touches |
//! | [`instructions::proxy_withdraw_ix`] | The 15-account `proxy_withdraw` instruction |
//! | [`instructions::set_compute_unit_limit_ix`] | Compute-budget prefix |
//! | [`ToolLpClient::build_withdraw`] | Full instruction list, offline |
//! | [`ToolLpClient::withdraw`] | Build, sign and submit |

pub mod address;
pub mod client;
pub mod error;
pub mod instructions;
pub mod types;

pub use client::ToolLpClient;
pub use error::{Error, Result};
pub use types::*;
