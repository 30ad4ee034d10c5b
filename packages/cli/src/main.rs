mod config;

use anyhow::{anyhow, Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use serde_json::json;
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair, Signer},
};
use tool_lp_sdk::{
    address::{derive_addresses, parse_address},
    instructions::{decode_withdraw_data, DEFAULT_COMPUTE_UNIT_LIMIT},
    DerivedAddressSet, PoolIdentity, SubmitOptions, ToolLpClient, WithdrawRequest,
};

use config::PoolFile;

// ─── Program constants ────────────────────────────────────────────────────────

const TOOL_LP_PROGRAM_ID: &str = "DduTe3VFPwWGN2EBh8FZ1GSnXe7VFotp1A8eej7qwgX2";
const CP_SWAP_PROGRAM_ID: &str = "CPMMoo8L3F4NbTegBCKVNunggL7H1ZpdTHKxQB5qKP1C";
/// SPL Token program (well-known, never changes)
const TOKEN_PROGRAM_ID: &str   = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";

/// Expand `~/` to `$HOME/` in keypair paths.
fn expand_home(path: &str) -> String {
    if path.starts_with("~/") {
        format!("{}{}", std::env::var("HOME").unwrap_or_default(), &path[1..])
    } else {
        path.to_string()
    }
}

fn load_keypair(path: &str) -> Result<Keypair> {
    let expanded = expand_home(path);
    read_keypair_file(&expanded)
        .map_err(|e| anyhow!(
            "Cannot load keypair from '{}': {}\n  \
             Set TOOL_LP_KEYPAIR or pass --keypair to specify a different path.",
            expanded, e
        ))
}

// ─── Version banner ───────────────────────────────────────────────────────────

fn print_banner() {
    let ver = env!("CARGO_PKG_VERSION");
    println!();
    println!("  Tool-LP  v{ver}  ·  CP-swap liquidity withdrawal on Solana");
    println!("  {}", "─".repeat(62));
    println!("  Proxy     {TOOL_LP_PROGRAM_ID}");
    println!("  CP-swap   {CP_SWAP_PROGRAM_ID}");
    println!("  Network   Solana mainnet-beta");
    println!();
}

// ─── CLI definition ───────────────────────────────────────────────────────────

/// Tool-LP — withdraw liquidity from Raydium CP-swap pools via the Tool-LP proxy.
///
/// Every command supports --json for machine-readable output.
/// Global options can also be set via environment variables:
///   TOOL_LP_RPC_URL  — Solana JSON-RPC endpoint
///   TOOL_LP_KEYPAIR  — path to owner Ed25519 keypair JSON
#[derive(Parser)]
#[command(
    name    = "tool-lp",
    version = env!("CARGO_PKG_VERSION"),
    about   = "Derive CP-swap pool addresses and withdraw liquidity through the Tool-LP proxy program.",
    after_help = "\
ENVIRONMENT:
  TOOL_LP_RPC_URL          Solana JSON-RPC endpoint  [default: https://api.mainnet-beta.solana.com]
  TOOL_LP_KEYPAIR          Path to Ed25519 keypair JSON  [default: ~/.config/solana/id.json]
  TOOL_LP_PROGRAM_ID       Proxy program id
  TOOL_LP_CP_SWAP_PROGRAM  CP-swap program id (use CPMDWBwJDtYax9qW7AyRuVC19Cc4L4Vcy4n2BHAbHkCW on devnet)
  RUST_LOG                 Log filter  [default: info]

QUICK START:
  tool-lp addresses --config <CFG> --token0 <MINT0> --token1 <MINT1>
  tool-lp withdraw  --pool-file pool.toml --lp-amount 12570000 --min-token0 100000 --min-token1 100000"
)]
struct Cli {
    /// Solana JSON-RPC endpoint
    #[arg(
        long,
        global     = true,
        value_name = "URL",
        default_value = "https://api.mainnet-beta.solana.com",
        env = "TOOL_LP_RPC_URL"
    )]
    rpc_url: String,

    /// Path to the owner's Ed25519 keypair JSON file
    #[arg(
        long,
        global     = true,
        value_name = "PATH",
        default_value = "~/.config/solana/id.json",
        env = "TOOL_LP_KEYPAIR"
    )]
    keypair: String,

    /// Tool-LP proxy program that receives `proxy_withdraw`
    #[arg(
        long,
        global     = true,
        value_name = "PUBKEY",
        default_value = TOOL_LP_PROGRAM_ID,
        env = "TOOL_LP_PROGRAM_ID"
    )]
    program_id: String,

    /// Raydium CP-swap program the pool PDAs are derived under
    #[arg(
        long,
        global     = true,
        value_name = "PUBKEY",
        default_value = CP_SWAP_PROGRAM_ID,
        env = "TOOL_LP_CP_SWAP_PROGRAM"
    )]
    cp_swap_program: String,

    /// Output machine-readable JSON instead of human-readable text
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Identifies a CP-swap pool, either by flags or by a TOML file.
#[derive(Args)]
struct PoolArgs {
    /// TOML file with `config`, `token_0_mint`, `token_1_mint`
    /// and optional `token_0_program` / `token_1_program`
    #[arg(long, value_name = "PATH", conflicts_with_all = ["config", "token0", "token1"])]
    pool_file: Option<String>,

    /// The pool's AMM config account
    #[arg(long, value_name = "PUBKEY", required_unless_present = "pool_file")]
    config: Option<String>,

    /// Token 0 mint, in the order the pool was created with
    #[arg(long, value_name = "MINT", required_unless_present = "pool_file")]
    token0: Option<String>,

    /// Token 1 mint, in the order the pool was created with
    #[arg(long, value_name = "MINT", required_unless_present = "pool_file")]
    token1: Option<String>,

    /// Token program owning token 0 (SPL Token or Token-2022)
    #[arg(long, value_name = "PROGRAM", default_value = TOKEN_PROGRAM_ID)]
    token0_program: String,

    /// Token program owning token 1 (SPL Token or Token-2022)
    #[arg(long, value_name = "PROGRAM", default_value = TOKEN_PROGRAM_ID)]
    token1_program: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every PDA and token account a withdraw would touch
    ///
    /// Pure derivation — no RPC calls, no transaction.
    #[command(
        after_help = "\
EXAMPLES:
  tool-lp addresses --config D4FPEruKEHrG5TenZ2mpDGEfu1iUvTiqBxvpU8HLBvC2 \\
    --token0 So11111111111111111111111111111111111111112 \\
    --token1 EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v

  # Derive for another wallet without loading a keypair
  tool-lp addresses --pool-file pool.toml --owner <PUBKEY> --json"
    )]
    Addresses {
        #[command(flatten)]
        pool: PoolArgs,

        /// Owner whose token accounts to derive (defaults to the keypair's pubkey)
        #[arg(long, value_name = "PUBKEY")]
        owner: Option<String>,
    },

    /// Burn LP tokens and withdraw both pool tokens
    ///
    /// The minimums are passed through unchanged; CP-swap rejects the
    /// transaction on-chain if either cannot be met.
    #[command(
        after_help = "\
EXAMPLES:
  # Withdraw 12 570 000 LP units with 100 000-unit floors on both sides
  tool-lp withdraw --pool-file pool.toml --lp-amount 12570000 \\
    --min-token0 100000 --min-token1 100000

  # Inspect the instructions without sending
  tool-lp withdraw --pool-file pool.toml --lp-amount 12570000 --dry-run

  # Fire and forget, skipping preflight simulation
  tool-lp withdraw --pool-file pool.toml --lp-amount 12570000 --skip-preflight --no-confirm

NOTES:
  Amounts are in atomic units. A compute-budget instruction requesting
  400 000 units is prepended unless --compute-units 0 is given."
    )]
    Withdraw {
        #[command(flatten)]
        pool: PoolArgs,

        /// LP tokens to burn (atomic units)
        #[arg(long, value_name = "AMOUNT")]
        lp_amount: u64,

        /// Minimum token 0 to accept (atomic units)
        #[arg(long, value_name = "AMOUNT", default_value_t = 0)]
        min_token0: u64,

        /// Minimum token 1 to accept (atomic units)
        #[arg(long, value_name = "AMOUNT", default_value_t = 0)]
        min_token1: u64,

        /// Compute-unit limit to request; 0 omits the compute-budget instruction
        #[arg(long, value_name = "UNITS", default_value_t = DEFAULT_COMPUTE_UNIT_LIMIT)]
        compute_units: u32,

        /// Skip the RPC node's preflight simulation
        #[arg(long, default_value_t = false)]
        skip_preflight: bool,

        /// Return as soon as the node accepts the transaction
        #[arg(long, default_value_t = false)]
        no_confirm: bool,

        /// Build and print the instructions without sending anything
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if std::env::args().len() == 1 {
        print_banner();
        Cli::command().print_long_help().ok();
        println!();
        return Ok(());
    }

    let cli = Cli::parse();

    match &cli.command {
        Commands::Addresses { pool, owner } => {
            cmd_addresses(&cli, pool, owner.as_deref())?;
        }
        Commands::Withdraw {
            pool, lp_amount, min_token0, min_token1,
            compute_units, skip_preflight, no_confirm, dry_run,
        } => {
            let request = WithdrawRequest {
                lp_token_amount:        *lp_amount,
                minimum_token_0_amount: *min_token0,
                minimum_token_1_amount: *min_token1,
            };
            let options = SubmitOptions { skip_preflight: *skip_preflight, confirm: !*no_confirm };
            cmd_withdraw(&cli, pool, request, *compute_units, options, *dry_run).await?;
        }
    }

    Ok(())
}

// ─── addresses ────────────────────────────────────────────────────────────────

fn cmd_addresses(cli: &Cli, pool_args: &PoolArgs, owner: Option<&str>) -> Result<()> {
    let pool = resolve_pool(pool_args)?;
    let owner = match owner {
        Some(o) => parse_address("owner", o)?,
        None    => load_keypair(&cli.keypair)?.pubkey(),
    };
    let cp_swap = parse_address("cp_swap_program", &cli.cp_swap_program)?;
    let set = derive_addresses(&pool, &owner, &cp_swap)?;

    if cli.json {
        println!("{}", json!({
            "status":  "ok",
            "command": "addresses",
            "owner":   owner.to_string(),
            "cp_swap_program": cp_swap.to_string(),
            "addresses": addresses_json(&set),
        }));
    } else {
        println!("─── Derived Addresses ────────────────────────────────────────────");
        println!("  Owner            {owner}");
        println!("  CP-swap program  {cp_swap}");
        print_addresses(&set);
    }
    Ok(())
}

// ─── withdraw ─────────────────────────────────────────────────────────────────

async fn cmd_withdraw(
    cli: &Cli,
    pool_args: &PoolArgs,
    request: WithdrawRequest,
    compute_units: u32,
    options: SubmitOptions,
    dry_run: bool,
) -> Result<()> {
    if request.lp_token_amount == 0 {
        return Err(anyhow!("--lp-amount must be > 0."));
    }

    let pool   = resolve_pool(pool_args)?;
    let payer  = load_keypair(&cli.keypair)?;
    let client = ToolLpClient::new(cli.rpc_url.clone())
        .with_program_id(parse_address("program_id", &cli.program_id)?)
        .with_cp_swap_program(parse_address("cp_swap_program", &cli.cp_swap_program)?)
        .with_compute_unit_limit((compute_units > 0).then_some(compute_units));

    log::info!("owner {}  rpc {}", payer.pubkey(), cli.rpc_url);

    if dry_run {
        let ixs = client.build_withdraw(&payer.pubkey(), &pool, &request)?;
        return print_dry_run(cli.json, &ixs);
    }

    let result = client
        .withdraw(&payer, &pool, request, options)
        .await
        .context("proxy_withdraw transaction failed")?;

    if cli.json {
        println!("{}", json!({
            "status":       "ok",
            "command":      "withdraw",
            "lp_amount":    request.lp_token_amount,
            "min_token0":   request.minimum_token_0_amount,
            "min_token1":   request.minimum_token_1_amount,
            "confirmed":    options.confirm,
            "addresses":    addresses_json(&result.addresses),
            "tx":           result.signature.to_string(),
        }));
    } else {
        println!("─── Liquidity Withdrawn ──────────────────────────────────────────");
        println!("  Pool             {}", result.addresses.pool);
        println!("  LP burnt         {:>20}", request.lp_token_amount);
        println!("  Min token 0      {:>20}", request.minimum_token_0_amount);
        println!("  Min token 1      {:>20}", request.minimum_token_1_amount);
        println!("  Transaction      {}", result.signature);
        if !options.confirm {
            println!();
            println!("  Sent without waiting for confirmation — check the signature on an explorer.");
        }
    }
    Ok(())
}

fn print_dry_run(json_output: bool, ixs: &[Instruction]) -> Result<()> {
    let withdraw = ixs.last().ok_or_else(|| anyhow!("no instructions were built"))?;
    let decoded = decode_withdraw_data(&withdraw.data)?;

    if json_output {
        let list: Vec<_> = ixs.iter().map(|ix| json!({
            "program_id": ix.program_id.to_string(),
            "accounts": ix.accounts.iter().map(|m| json!({
                "pubkey":      m.pubkey.to_string(),
                "is_signer":   m.is_signer,
                "is_writable": m.is_writable,
            })).collect::<Vec<_>>(),
            "data": hex(&ix.data),
        })).collect();
        println!("{}", json!({
            "status":       "ok",
            "command":      "withdraw",
            "dry_run":      true,
            "instructions": list,
            "decoded": {
                "lp_token_amount":        decoded.lp_token_amount,
                "minimum_token_0_amount": decoded.minimum_token_0_amount,
                "minimum_token_1_amount": decoded.minimum_token_1_amount,
            },
        }));
        return Ok(());
    }

    println!("─── Withdraw (dry run) ───────────────────────────────────────────");
    for (i, ix) in ixs.iter().enumerate() {
        println!("  Instruction #{i}  program {}", ix.program_id);
        for (j, m) in ix.accounts.iter().enumerate() {
            let flags = match (m.is_signer, m.is_writable) {
                (true, true)   => "signer, mut",
                (true, false)  => "signer",
                (false, true)  => "mut",
                (false, false) => "",
            };
            println!("    {j:>2}  {:<44}  {flags}", m.pubkey.to_string());
        }
        println!("    data {}", hex(&ix.data));
    }
    println!();
    println!("  LP amount        {:>20}", decoded.lp_token_amount);
    println!("  Min token 0      {:>20}", decoded.minimum_token_0_amount);
    println!("  Min token 1      {:>20}", decoded.minimum_token_1_amount);
    println!();
    println!("  Nothing was sent. Drop --dry-run to submit.");
    Ok(())
}

// ─── Shared utilities ─────────────────────────────────────────────────────────

fn resolve_pool(args: &PoolArgs) -> Result<PoolIdentity> {
    if let Some(path) = &args.pool_file {
        return PoolFile::load(&expand_home(path))?.identity();
    }
    let (Some(config), Some(token0), Some(token1)) = (&args.config, &args.token0, &args.token1) else {
        return Err(anyhow!("pass --pool-file or all of --config, --token0, --token1"));
    };
    PoolIdentity::parse(config, token0, token1, &args.token0_program, &args.token1_program)
        .context("invalid pool description")
}

fn addresses_json(set: &DerivedAddressSet) -> serde_json::Value {
    json!({
        "authority":             set.authority.to_string(),
        "pool":                  set.pool.to_string(),
        "lp_mint":               set.lp_mint.to_string(),
        "vault_0":               set.vault_0.to_string(),
        "vault_1":               set.vault_1.to_string(),
        "owner_lp_account":      set.owner_lp_account.to_string(),
        "owner_token_0_account": set.owner_token_0_account.to_string(),
        "owner_token_1_account": set.owner_token_1_account.to_string(),
    })
}

fn print_addresses(set: &DerivedAddressSet) {
    let rows: [(&str, &Pubkey); 8] = [
        ("Authority",       &set.authority),
        ("Pool",            &set.pool),
        ("LP mint",         &set.lp_mint),
        ("Vault 0",         &set.vault_0),
        ("Vault 1",         &set.vault_1),
        ("Owner LP ATA",    &set.owner_lp_account),
        ("Owner token 0",   &set.owner_token_0_account),
        ("Owner token 1",   &set.owner_token_1_account),
    ];
    for (label, key) in rows {
        println!("  {label:<16} {key}");
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
