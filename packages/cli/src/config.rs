//! Pool description loaded from a TOML file (`--pool-file`).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tool_lp_sdk::{address::TOKEN_PROGRAM_ID, PoolIdentity};

/// One CP-swap pool, addresses as base-58 strings.
///
/// ```toml
/// config = "D4FPEruKEHrG5TenZ2mpDGEfu1iUvTiqBxvpU8HLBvC2"
/// token_0_mint = "So11111111111111111111111111111111111111112"
/// token_1_mint = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v"
/// # token programs default to SPL Token
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolFile {
    pub config:          String,
    pub token_0_mint:    String,
    pub token_1_mint:    String,
    #[serde(default)]
    pub token_0_program: Option<String>,
    #[serde(default)]
    pub token_1_program: Option<String>,
}

impl PoolFile {
    /// Load a pool description from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read pool file: {path}"))?;
        Self::from_toml(&text).with_context(|| format!("Failed to parse pool file: {path}"))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Validate every address and build the SDK's pool identity.
    pub fn identity(&self) -> Result<PoolIdentity> {
        let default_program = TOKEN_PROGRAM_ID.to_string();
        Ok(PoolIdentity::parse(
            &self.config,
            &self.token_0_mint,
            &self.token_1_mint,
            self.token_0_program.as_deref().unwrap_or(&default_program),
            self.token_1_program.as_deref().unwrap_or(&default_program),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tool_lp_sdk::address::TOKEN_2022_PROGRAM_ID;

    const SOL_USDC: &str = r#"
        config = "D4FPEruKEHrG5TenZ2mpDGEfu1iUvTiqBxvpU8HLBvC2"
        token_0_mint = "So11111111111111111111111111111111111111112"
        token_1_mint = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v"
    "#;

    #[test]
    fn token_programs_default_to_spl_token() {
        let pool = PoolFile::from_toml(SOL_USDC).unwrap().identity().unwrap();
        assert_eq!(pool.token_0_program, TOKEN_PROGRAM_ID);
        assert_eq!(pool.token_1_program, TOKEN_PROGRAM_ID);
        assert_eq!(pool.token_0_mint.to_string(), "So11111111111111111111111111111111111111112");
    }

    #[test]
    fn explicit_token_2022_program() {
        let text = format!("{SOL_USDC}\ntoken_1_program = \"{TOKEN_2022_PROGRAM_ID}\"\n");
        let pool = PoolFile::from_toml(&text).unwrap().identity().unwrap();
        assert_eq!(pool.token_1_program, TOKEN_2022_PROGRAM_ID);
    }

    #[test]
    fn bad_address_names_the_field() {
        let text = SOL_USDC.replace("So11111111111111111111111111111111111111112", "nope");
        let err = PoolFile::from_toml(&text).unwrap().identity().unwrap_err();
        assert!(err.to_string().contains("token_0_mint"), "{err}");
    }

    #[test]
    fn missing_mint_fails_to_parse() {
        assert!(PoolFile::from_toml("config = \"x\"").is_err());
    }
}
