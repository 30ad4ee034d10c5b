//! [`ToolLpClient`] — the main entry point for withdraw integrations.

use solana_client::{nonblocking::rpc_client::RpcClient, rpc_config::RpcSendTransactionConfig};
use solana_sdk::{
    commitment_config::CommitmentConfig,
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};

use crate::{
    address::{derive_addresses, CP_SWAP_DEVNET_PROGRAM_ID, CP_SWAP_PROGRAM_ID, TOOL_LP_PROGRAM_ID},
    error::Result,
    instructions::{proxy_withdraw_ix, set_compute_unit_limit_ix, DEFAULT_COMPUTE_UNIT_LIMIT},
    types::{PoolIdentity, SubmitOptions, WithdrawRequest, WithdrawResult},
};

// ─── Constants ────────────────────────────────────────────────────────────────

const DEVNET_RPC:  &str = "https://api.devnet.solana.com";
const MAINNET_RPC: &str = "https://api.mainnet-beta.solana.com";

// ─── Client ───────────────────────────────────────────────────────────────────

/// Async Tool-LP client for Solana.
///
/// Building instructions never touches the network; only [`submit`] and
/// [`withdraw`] do.
///
/// ```rust,no_run
/// # use tool_lp_sdk::{PoolIdentity, SubmitOptions, ToolLpClient, WithdrawRequest};
/// # use solana_sdk::{pubkey::Pubkey, signature::Keypair};
/// # use std::str::FromStr;
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ToolLpClient::mainnet();
/// let owner  = Keypair::new(); // use a funded keypair holding LP tokens
/// let pool = PoolIdentity::with_spl_token(
///     Pubkey::from_str("D4FPEruKEHrG5TenZ2mpDGEfu1iUvTiqBxvpU8HLBvC2")?,
///     Pubkey::from_str("So11111111111111111111111111111111111111112")?,
///     Pubkey::from_str("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v")?,
/// )?;
/// let result = client.withdraw(&owner, &pool, WithdrawRequest {
///     lp_token_amount:        12_570_000,
///     minimum_token_0_amount: 100_000,
///     minimum_token_1_amount: 100_000,
/// }, SubmitOptions::default()).await?;
/// println!("Withdrawn! tx: {}", result.signature);
/// # Ok(())
/// # }
/// ```
///
/// [`submit`]: ToolLpClient::submit
/// [`withdraw`]: ToolLpClient::withdraw
pub struct ToolLpClient {
    rpc_url:            String,
    program_id:         Pubkey,
    cp_swap_program:    Pubkey,
    compute_unit_limit: Option<u32>,
    commitment:         CommitmentConfig,
}

impl ToolLpClient {
    /// Create a client pointing at any RPC endpoint, targeting mainnet CP-swap.
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url:            rpc_url.into(),
            program_id:         TOOL_LP_PROGRAM_ID,
            cp_swap_program:    CP_SWAP_PROGRAM_ID,
            compute_unit_limit: Some(DEFAULT_COMPUTE_UNIT_LIMIT),
            commitment:         CommitmentConfig::confirmed(),
        }
    }

    /// Pre-configured client for Solana devnet (devnet CP-swap deployment).
    pub fn devnet() -> Self {
        Self::new(DEVNET_RPC).with_cp_swap_program(CP_SWAP_DEVNET_PROGRAM_ID)
    }

    /// Pre-configured client for Solana mainnet-beta.
    pub fn mainnet() -> Self {
        Self::new(MAINNET_RPC)
    }

    /// Override the proxy program ID (useful for locally deployed programs in tests).
    pub fn with_program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = program_id;
        self
    }

    /// Override the CP-swap program the PDAs are derived under.
    pub fn with_cp_swap_program(mut self, cp_swap_program: Pubkey) -> Self {
        self.cp_swap_program = cp_swap_program;
        self
    }

    /// `None` sends the withdraw without a compute-budget instruction.
    pub fn with_compute_unit_limit(mut self, units: Option<u32>) -> Self {
        self.compute_unit_limit = units;
        self
    }

    pub fn with_commitment(mut self, commitment: CommitmentConfig) -> Self {
        self.commitment = commitment;
        self
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    pub fn cp_swap_program(&self) -> &Pubkey {
        &self.cp_swap_program
    }

    // ── Instruction building ──────────────────────────────────────────────────

    /// Build the instruction list for a withdraw by `owner`. No RPC calls.
    pub fn build_withdraw(
        &self,
        owner:   &Pubkey,
        pool:    &PoolIdentity,
        request: &WithdrawRequest,
    ) -> Result<Vec<Instruction>> {
        crate::instructions::withdraw_instructions(
            &self.program_id,
            &self.cp_swap_program,
            owner,
            pool,
            request,
            self.compute_unit_limit,
        )
    }

    // ── Write operations ──────────────────────────────────────────────────────

    /// Burn `request.lp_token_amount` LP tokens and receive both pool tokens.
    ///
    /// The payer is also the owner of the LP and token accounts.
    pub async fn withdraw(
        &self,
        payer:   &Keypair,
        pool:    &PoolIdentity,
        request: WithdrawRequest,
        options: SubmitOptions,
    ) -> Result<WithdrawResult> {
        let owner = payer.pubkey();
        let addresses = derive_addresses(pool, &owner, &self.cp_swap_program)?;

        let mut ixs = Vec::with_capacity(2);
        if let Some(units) = self.compute_unit_limit {
            ixs.push(set_compute_unit_limit_ix(units));
        }
        ixs.push(proxy_withdraw_ix(
            &self.program_id,
            &self.cp_swap_program,
            &owner,
            pool,
            &addresses,
            &request,
        ));

        let signature = self.submit(&ixs, payer, options).await?;
        Ok(WithdrawResult { signature, addresses, request })
    }

    /// Sign `instructions` with `payer` and send them.
    ///
    /// Returns the signature once the node accepts the transaction, or once it
    /// reaches the client's commitment when `options.confirm` is set. Any RPC
    /// failure comes back as [`crate::Error::Submission`].
    pub async fn submit(
        &self,
        instructions: &[Instruction],
        payer:        &Keypair,
        options:      SubmitOptions,
    ) -> Result<Signature> {
        let rpc = self.rpc();
        let blockhash = rpc.get_latest_blockhash().await?;
        let tx = Transaction::new_signed_with_payer(
            instructions,
            Some(&payer.pubkey()),
            &[payer],
            blockhash,
        );

        if options.skip_preflight {
            log::warn!("preflight simulation skipped; failures surface only on-chain");
        }
        let config = RpcSendTransactionConfig {
            skip_preflight:       options.skip_preflight,
            preflight_commitment: Some(self.commitment.commitment),
            ..RpcSendTransactionConfig::default()
        };

        log::info!("submitting {} instruction(s) to {}", instructions.len(), self.rpc_url);
        let sig = if options.confirm {
            rpc.send_and_confirm_transaction_with_spinner_and_config(&tx, self.commitment, config)
                .await?
        } else {
            rpc.send_transaction_with_config(&tx, config).await?
        };
        log::info!("transaction accepted: {sig}");
        Ok(sig)
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    fn rpc(&self) -> RpcClient {
        RpcClient::new_with_commitment(self.rpc_url.clone(), self.commitment)
    }
}
