use proptest::prelude::*;
use solana_sdk::{
    instruction::AccountMeta,
    pubkey,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};
use tool_lp_sdk::{
    address::{
        derive_addresses, derive_ata, derive_pool, CP_SWAP_PROGRAM_ID, MEMO_PROGRAM_ID,
        TOKEN_2022_PROGRAM_ID, TOKEN_PROGRAM_ID, TOOL_LP_PROGRAM_ID,
    },
    instructions::{
        decode_withdraw_data, proxy_withdraw_ix, withdraw_instructions, WITHDRAW_ACCOUNTS_LEN,
    },
    Error, PoolIdentity, SubmitOptions, ToolLpClient, WithdrawRequest,
};

// Raydium CP-swap SOL/USDC pool on mainnet-beta.
const AMM_CONFIG: Pubkey = pubkey!("D4FPEruKEHrG5TenZ2mpDGEfu1iUvTiqBxvpU8HLBvC2");
const WSOL: Pubkey = pubkey!("So11111111111111111111111111111111111111112");
const USDC: Pubkey = pubkey!("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v");
const OWNER: Pubkey = pubkey!("4WbU9nksassGissHNW7bSXZrYDsLKrjSDE7WxnLWfys1");

const DISCRIMINATOR: [u8; 8] = [0x76, 0x0c, 0xa3, 0x4d, 0x46, 0x0f, 0x43, 0xfc];

fn sol_usdc() -> PoolIdentity {
    PoolIdentity::with_spl_token(AMM_CONFIG, WSOL, USDC).unwrap()
}

#[test]
fn sol_usdc_addresses_match_mainnet() {
    let set = derive_addresses(&sol_usdc(), &OWNER, &CP_SWAP_PROGRAM_ID).unwrap();
    assert_eq!(set.authority, pubkey!("GpMZbSM2GgvTKHJirzeGfMFoaZ8UR2X7F4v8vHTvxFbL"));
    assert_eq!(set.pool, pubkey!("7JuwJuNU88gurFnyWeiyGKbFmExMWcmRZntn9imEzdny"));
    assert_eq!(set.lp_mint, pubkey!("Ff68JGeEiUEF859B2xEaPX82vuFeuwxqoxGNHTZPAuKR"));
    assert_eq!(set.vault_0, pubkey!("7VLUXrnSSDo9BfCa4NWaQs68g7ddDY1sdXBKW6Xswj9Y"));
    assert_eq!(set.vault_1, pubkey!("3rzbbW5Q8MA7sCaowf28hNgACNPecdS2zceWy7Ptzua9"));
    assert_eq!(set.owner_lp_account, pubkey!("7L4jyvHto5gLsScHvD4d1rgKtTkznyi71JhiLyfpQoGJ"));
    assert_eq!(set.owner_token_0_account, pubkey!("DfM8V7Tz8GzUNLn75JHXMcG5XLq1zrGqCgMTD3cmpC2f"));
    assert_eq!(set.owner_token_1_account, pubkey!("CbwFHR6gaz7aT8ejudaULbqtnNPpMpfNF9bpFsRK9TjW"));
}

#[test]
fn swapping_mints_moves_the_pool() {
    let (forward, _) = derive_pool(&AMM_CONFIG, &WSOL, &USDC, &CP_SWAP_PROGRAM_ID).unwrap();
    let (reverse, _) = derive_pool(&AMM_CONFIG, &USDC, &WSOL, &CP_SWAP_PROGRAM_ID).unwrap();
    assert_ne!(forward, reverse);
    assert_eq!(reverse, pubkey!("9dTkMoBDn31NKzLcXerzC4iVeNRixtvPV5BzMrc7VTTT"));
}

#[test]
fn identical_mints_are_rejected() {
    let err = PoolIdentity::with_spl_token(AMM_CONFIG, WSOL, WSOL).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn malformed_identifier_is_rejected() {
    let tok = TOKEN_PROGRAM_ID.to_string();
    let err = PoolIdentity::parse(
        &AMM_CONFIG.to_string(), "0OIl", &USDC.to_string(), &tok, &tok,
    ).unwrap_err();
    assert!(matches!(err, Error::InvalidAddress { field: "token_0_mint", .. }));
}

#[test]
fn withdraw_scenario_account_order_and_payload() {
    let pool = sol_usdc();
    let request = WithdrawRequest {
        lp_token_amount:        12_570_000,
        minimum_token_0_amount: 100_000,
        minimum_token_1_amount: 100_000,
    };
    let ixs = withdraw_instructions(
        &TOOL_LP_PROGRAM_ID, &CP_SWAP_PROGRAM_ID, &OWNER, &pool, &request, None,
    ).unwrap();
    assert_eq!(ixs.len(), 1);
    let ix = &ixs[0];
    let set = derive_addresses(&pool, &OWNER, &CP_SWAP_PROGRAM_ID).unwrap();

    assert_eq!(ix.program_id, TOOL_LP_PROGRAM_ID);
    assert_eq!(ix.accounts.len(), WITHDRAW_ACCOUNTS_LEN);
    assert_eq!(
        ix.accounts,
        vec![
            AccountMeta::new_readonly(CP_SWAP_PROGRAM_ID, false),
            AccountMeta::new_readonly(OWNER, true),
            AccountMeta::new_readonly(set.authority, false),
            AccountMeta::new(set.pool, false),
            AccountMeta::new(set.owner_lp_account, false),
            AccountMeta::new(set.owner_token_0_account, false),
            AccountMeta::new(set.owner_token_1_account, false),
            AccountMeta::new(set.vault_0, false),
            AccountMeta::new(set.vault_1, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(TOKEN_2022_PROGRAM_ID, false),
            AccountMeta::new_readonly(WSOL, false),
            AccountMeta::new_readonly(USDC, false),
            AccountMeta::new(set.lp_mint, false),
            AccountMeta::new_readonly(MEMO_PROGRAM_ID, false),
        ]
    );

    assert_eq!(ix.data.len(), 32);
    assert_eq!(ix.data[..8], DISCRIMINATOR);
    assert_eq!(ix.data[8..16], 12_570_000u64.to_le_bytes());
    assert_eq!(ix.data[16..24], 100_000u64.to_le_bytes());
    assert_eq!(ix.data[24..32], 100_000u64.to_le_bytes());
}

#[test]
fn token_2022_side_uses_its_own_ata() {
    let pool = PoolIdentity::new(AMM_CONFIG, WSOL, USDC, TOKEN_PROGRAM_ID, TOKEN_2022_PROGRAM_ID)
        .unwrap();
    let set = derive_addresses(&pool, &OWNER, &CP_SWAP_PROGRAM_ID).unwrap();
    assert_eq!(set.owner_token_1_account, derive_ata(&OWNER, &USDC, &TOKEN_2022_PROGRAM_ID).unwrap());
    // LP account stays on the classic token program.
    assert_eq!(
        set.owner_lp_account,
        pubkey!("7L4jyvHto5gLsScHvD4d1rgKtTkznyi71JhiLyfpQoGJ"),
    );
}

#[test]
fn payload_round_trips_boundary_values() {
    for v in [0, 1, u64::MAX] {
        let request = WithdrawRequest {
            lp_token_amount:        v,
            minimum_token_0_amount: v,
            minimum_token_1_amount: v,
        };
        let ix = withdraw_instructions(
            &TOOL_LP_PROGRAM_ID, &CP_SWAP_PROGRAM_ID, &OWNER, &sol_usdc(), &request, None,
        ).unwrap();
        assert_eq!(decode_withdraw_data(&ix[0].data).unwrap(), request);
    }
}

#[tokio::test]
async fn unreachable_rpc_surfaces_submission_error() {
    let client = ToolLpClient::new("http://127.0.0.1:1");
    let payer = Keypair::new();
    let err = client
        .withdraw(
            &payer,
            &sol_usdc(),
            WithdrawRequest { lp_token_amount: 1, ..Default::default() },
            SubmitOptions { skip_preflight: true, confirm: false },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Submission(_)), "unexpected error: {err}");

    // Building for the same payer still works offline.
    let ixs = client
        .build_withdraw(&payer.pubkey(), &sol_usdc(), &WithdrawRequest::default())
        .unwrap();
    assert_eq!(ixs.len(), 2);
}

fn any_pubkey() -> impl Strategy<Value = Pubkey> {
    any::<[u8; 32]>().prop_map(Pubkey::from)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn derivation_is_deterministic_and_off_curve(
        config in any_pubkey(),
        mint_0 in any_pubkey(),
        mint_1 in any_pubkey(),
        owner in any_pubkey(),
    ) {
        prop_assume!(mint_0 != mint_1);
        let pool = PoolIdentity::with_spl_token(config, mint_0, mint_1).unwrap();
        let first = derive_addresses(&pool, &owner, &CP_SWAP_PROGRAM_ID).unwrap();
        let second = derive_addresses(&pool, &owner, &CP_SWAP_PROGRAM_ID).unwrap();
        prop_assert_eq!(first, second);
        for addr in [
            first.authority, first.pool, first.lp_mint, first.vault_0, first.vault_1,
            first.owner_lp_account, first.owner_token_0_account, first.owner_token_1_account,
        ] {
            prop_assert!(!addr.is_on_curve());
        }
    }

    #[test]
    fn mint_order_changes_pool(
        config in any_pubkey(),
        mint_0 in any_pubkey(),
        mint_1 in any_pubkey(),
    ) {
        prop_assume!(mint_0 != mint_1);
        let (ab, _) = derive_pool(&config, &mint_0, &mint_1, &CP_SWAP_PROGRAM_ID).unwrap();
        let (ba, _) = derive_pool(&config, &mint_1, &mint_0, &CP_SWAP_PROGRAM_ID).unwrap();
        prop_assert_ne!(ab, ba);
    }

    #[test]
    fn account_order_ignores_construction_order(
        lp in any::<u64>(),
        min_0 in any::<u64>(),
        min_1 in any::<u64>(),
    ) {
        let request = WithdrawRequest {
            lp_token_amount: lp, minimum_token_0_amount: min_0, minimum_token_1_amount: min_1,
        };
        // Same values, fields written in a different order.
        let shuffled = WithdrawRequest {
            minimum_token_1_amount: min_1, lp_token_amount: lp, minimum_token_0_amount: min_0,
        };
        let pool = sol_usdc();
        let set = derive_addresses(&pool, &OWNER, &CP_SWAP_PROGRAM_ID).unwrap();
        let a = proxy_withdraw_ix(&TOOL_LP_PROGRAM_ID, &CP_SWAP_PROGRAM_ID, &OWNER, &pool, &set, &request);
        let b = proxy_withdraw_ix(&TOOL_LP_PROGRAM_ID, &CP_SWAP_PROGRAM_ID, &OWNER, &pool, &set, &shuffled);
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(decode_withdraw_data(&a.data).unwrap(), request);
    }
}
