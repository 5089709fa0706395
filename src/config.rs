//! Configuration loading and validation

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub rpc: RpcConfig,
    pub trading: TradingConfig,
    #[serde(default)]
    pub program: ProgramConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcConfig {
    #[serde(default = "default_rpc_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Commitment level used for account reads and confirmation
    #[serde(default = "default_commitment")]
    pub commitment: String,
    /// Looser commitment retried once when a bonding curve is not yet
    /// visible at the primary level (replication lag on fresh curves)
    #[serde(default = "default_fallback_commitment")]
    pub fallback_commitment: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TradingConfig {
    /// Slippage tolerance in percent applied to the buy cost bound
    #[serde(default = "default_slippage_percent")]
    pub slippage_percent: u64,
    /// Compute unit price attached to every transaction, in micro-lamports
    #[serde(default = "default_priority_fee")]
    pub priority_fee_micro_lamports: u64,
}

/// Program addresses, overridable for forks or local validators
#[derive(Debug, Clone, Deserialize)]
pub struct ProgramConfig {
    /// Market program id (base58). Empty means the mainnet default.
    #[serde(default)]
    pub pump_program_id: String,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            pump_program_id: String::new(),
        }
    }
}

// Default value functions
fn default_rpc_endpoint() -> String {
    std::env::var("RPC_ENDPOINT").unwrap_or_else(|_| "https://api.mainnet-beta.solana.com".into())
}

fn default_timeout_ms() -> u64 {
    30000
}

fn default_commitment() -> String {
    "confirmed".into()
}

fn default_fallback_commitment() -> String {
    "processed".into()
}

fn default_slippage_percent() -> u64 {
    1
}

fn default_priority_fee() -> u64 {
    100000
}

impl Config {
    /// Load configuration from file and environment variables
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let settings = config::Config::builder()
            // Start with defaults
            .set_default("rpc.endpoint", default_rpc_endpoint())?
            .set_default("rpc.timeout_ms", default_timeout_ms() as i64)?
            .set_default("rpc.commitment", default_commitment())?
            .set_default("rpc.fallback_commitment", default_fallback_commitment())?
            .set_default("trading.slippage_percent", default_slippage_percent() as i64)?
            .set_default(
                "trading.priority_fee_micro_lamports",
                default_priority_fee() as i64,
            )?
            // Load from file if exists
            .add_source(config::File::from(path).required(false))
            // Override with environment variables (prefix TRADER_)
            .add_source(
                config::Environment::with_prefix("TRADER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let config: Config = settings
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.rpc.endpoint.is_empty() {
            anyhow::bail!("rpc.endpoint must not be empty");
        }

        for (name, level) in [
            ("commitment", &self.rpc.commitment),
            ("fallback_commitment", &self.rpc.fallback_commitment),
        ] {
            if !matches!(level.as_str(), "processed" | "confirmed" | "finalized") {
                anyhow::bail!(
                    "rpc.{} must be one of processed/confirmed/finalized, got '{}'",
                    name,
                    level
                );
            }
        }

        if self.trading.slippage_percent > 100 {
            anyhow::bail!("trading.slippage_percent cannot exceed 100");
        }

        if !self.program.pump_program_id.is_empty()
            && self
                .program
                .pump_program_id
                .parse::<solana_sdk::pubkey::Pubkey>()
                .is_err()
        {
            anyhow::bail!(
                "program.pump_program_id is not a valid address: {}",
                self.program.pump_program_id
            );
        }

        Ok(())
    }

    /// Get masked configuration for display (hide API keys in the endpoint)
    pub fn masked_display(&self) -> String {
        format!(
            r#"Configuration:
  RPC:
    endpoint: {}
    timeout: {}ms
    commitment: {} (fallback: {})
  Trading:
    slippage: {}%
    priority_fee: {} micro-lamports
"#,
            mask_url(&self.rpc.endpoint),
            self.rpc.timeout_ms,
            self.rpc.commitment,
            self.rpc.fallback_commitment,
            self.trading.slippage_percent,
            self.trading.priority_fee_micro_lamports,
        )
    }
}

/// Mask URL for display (hide API keys in query params)
fn mask_url(url: &str) -> String {
    if let Some(idx) = url.find('?') {
        format!("{}?***", &url[..idx])
    } else {
        url.to_string()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc: RpcConfig {
                endpoint: default_rpc_endpoint(),
                timeout_ms: default_timeout_ms(),
                commitment: default_commitment(),
                fallback_commitment: default_fallback_commitment(),
            },
            trading: TradingConfig {
                slippage_percent: default_slippage_percent(),
                priority_fee_micro_lamports: default_priority_fee(),
            },
            program: ProgramConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.trading.slippage_percent, 1);
        assert_eq!(config.rpc.commitment, "confirmed");
        assert_eq!(config.rpc.fallback_commitment, "processed");
    }

    #[test]
    fn test_validate_rejects_bad_commitment() {
        let mut config = Config::default();
        config.rpc.commitment = "strongest".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_program_override() {
        let mut config = Config::default();
        config.program.pump_program_id = "not-an-address".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_mask_url() {
        assert_eq!(
            mask_url("https://api.example.com?key=secret"),
            "https://api.example.com?***"
        );
        assert_eq!(
            mask_url("https://api.example.com"),
            "https://api.example.com"
        );
    }
}
