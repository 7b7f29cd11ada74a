use thiserror::Error;

use crate::types::primitives::AssetAddress;

#[derive(Error, Debug)]
pub enum SdkError {
    #[error("Cryptographic error: {0}")]
    Crypto(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("JSON-RPC error: {code}: {message}")]
    JsonRpc { code: i32, message: String },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("Malformed asset record: {0}")]
    MalformedAssetRecord(String),

    #[error("Ledger rejected transaction: {0}")]
    Rejected(String),

    #[error("Hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),

    #[error("Base58 decode error: {0}")]
    Base58Decode(#[from] bs58::decode::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = core::result::Result<T, SdkError>;

/// Failure of a mint-and-verify operation.
///
/// The two variants differ in what the caller may safely do next:
/// after `Submission` nothing was created and the whole mint can be retried;
/// after `ConfirmationTimeout` the asset may exist, so the caller should
/// re-query `asset_address` before minting again.
#[derive(Error, Debug)]
pub enum MintError {
    #[error("Mint submission failed: {source}")]
    Submission {
        #[source]
        source: SdkError,
    },

    #[error("Asset {asset_address} not confirmed after {attempts} attempts: {last_error}")]
    ConfirmationTimeout {
        asset_address: AssetAddress,
        transaction_hash: String,
        attempts: u32,
        #[source]
        last_error: SdkError,
    },
}

impl MintError {
    /// Whether the asset might exist on the ledger despite the failure.
    pub fn outcome_unknown(&self) -> bool {
        matches!(self, MintError::ConfirmationTimeout { .. })
    }

    /// The asset address generated before submission, if it was ever sent.
    pub fn asset_address(&self) -> Option<&AssetAddress> {
        match self {
            MintError::Submission { .. } => None,
            MintError::ConfirmationTimeout { asset_address, .. } => Some(asset_address),
        }
    }
}
