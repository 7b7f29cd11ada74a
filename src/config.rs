//! Network and retry configuration.
//!
//! Everything the minter needs to know about its environment is passed in
//! through these values; nothing is read from process-wide state except by
//! the explicit [`LedgerConfig::from_env`] constructor.

use crate::error::{Result, SdkError};
use crate::retry::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Public test network endpoint
pub const DEVNET_ENDPOINT: &str = "https://api.devnet.ecoswapchain.io";

/// Local development endpoint
pub const LOCAL_ENDPOINT: &str = "http://localhost:8899";

/// Environment variable overriding the ledger endpoint
pub const ENDPOINT_ENV: &str = "ECOSWAP_LEDGER_URL";

/// Environment variable overriding the commitment level
pub const COMMITMENT_ENV: &str = "ECOSWAP_COMMITMENT";

/// Consistency level requested from the ledger for reads and submissions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitmentLevel {
    Processed,
    Confirmed,
    /// Only state the ledger will never roll back
    #[default]
    Finalized,
}

impl CommitmentLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommitmentLevel::Processed => "processed",
            CommitmentLevel::Confirmed => "confirmed",
            CommitmentLevel::Finalized => "finalized",
        }
    }
}

impl fmt::Display for CommitmentLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommitmentLevel {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "processed" => Ok(CommitmentLevel::Processed),
            "confirmed" => Ok(CommitmentLevel::Confirmed),
            "finalized" => Ok(CommitmentLevel::Finalized),
            other => Err(SdkError::InvalidParameter(format!(
                "Unknown commitment level: {}",
                other
            ))),
        }
    }
}

/// Ledger connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    pub endpoint: String,
    #[serde(default)]
    pub commitment: CommitmentLevel,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_timeout_seconds() -> u64 {
    30
}

impl LedgerConfig {
    /// Create a new configuration
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            commitment: CommitmentLevel::default(),
            timeout_seconds: default_timeout_seconds(),
        }
    }

    /// Create configuration for the public test network
    pub fn devnet() -> Self {
        Self::new(DEVNET_ENDPOINT)
    }

    /// Create configuration for local development
    pub fn local() -> Self {
        Self::new(LOCAL_ENDPOINT)
    }

    /// Devnet defaults overridden by `ECOSWAP_LEDGER_URL` / `ECOSWAP_COMMITMENT`
    pub fn from_env() -> Result<Self> {
        let mut config = match std::env::var(ENDPOINT_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::devnet(),
        };
        if let Ok(level) = std::env::var(COMMITMENT_ENV) {
            config.commitment = level.parse()?;
        }
        Ok(config)
    }

    pub fn with_commitment(mut self, commitment: CommitmentLevel) -> Self {
        self.commitment = commitment;
        self
    }

    pub fn with_timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self::devnet()
    }
}

/// Everything a [`crate::minter::Minter`] is built from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MintConfig {
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub retry: RetryPolicy,
}

impl MintConfig {
    pub fn new(ledger: LedgerConfig, retry: RetryPolicy) -> Self {
        Self { ledger, retry }
    }
}
