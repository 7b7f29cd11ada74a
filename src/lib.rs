//! # EcoSwapChain mint SDK
//!
//! Mints marketplace tokens for physical goods on the EcoSwapChain ledger
//! and only reports success once the new asset can be read back.
//!
//! ## Features
//!
//! - Signed asset-creation transactions (secp256k1 ECDSA)
//! - Confirmation polling with a pluggable retry policy
//! - Structured progress events for every phase and attempt
//! - JSON-RPC ledger client and an in-memory ledger for tests
//! - Base58 rendering of addresses and transaction hashes
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ecoswap_sdk::config::MintConfig;
//! use ecoswap_sdk::crypto::KeyPair;
//! use ecoswap_sdk::minter::Minter;
//! use ecoswap_sdk::types::{AssetMetadata, MintRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let minter = Minter::from_config(&MintConfig::default())?;
//!
//!     let signer = KeyPair::generate()?;
//!     let metadata = AssetMetadata::new(
//!         "Bamboo bicycle",
//!         "ECO",
//!         "https://meta.ecoswapchain.io/bicycle.json",
//!     )?;
//!
//!     let outcome = minter.mint(MintRequest::new(&signer, metadata)).await?;
//!     println!("{} in {}", outcome.asset_address, outcome.transaction_hash);
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod crypto;
pub mod error;
pub mod minter;
pub mod retry;
pub mod types;

// Re-export commonly used items at crate root
pub use client::{InMemoryLedger, LedgerClient, RpcLedgerClient};
pub use config::{CommitmentLevel, LedgerConfig, MintConfig};
pub use crypto::{AssetKeypair, KeyPair};
pub use error::{MintError, Result, SdkError};
pub use minter::{EventLog, MintEvent, MintObserver, MintPhase, Minter};
pub use retry::{Backoff, RetryPolicy};
pub use types::{AssetAddress, AssetMetadata, AssetRecord, MintOutcome, MintRequest};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the SDK (sets up logging if enabled)
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .try_init();
}
