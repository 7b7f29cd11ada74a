//! Canonical text encoding for ledger identifiers.
//!
//! Signatures and addresses are rendered as base58 (Bitcoin alphabet) for
//! display and storage.

use crate::error::{Result, SdkError};

/// Encode raw bytes as base58 text
pub fn encode_base58(bytes: &[u8]) -> String {
    bs58::encode(bytes).into_string()
}

/// Decode base58 text into raw bytes
pub fn decode_base58(text: &str) -> Result<Vec<u8>> {
    Ok(bs58::decode(text).into_vec()?)
}

/// Decode base58 text into a fixed-size array
pub fn decode_base58_array<const N: usize>(text: &str) -> Result<[u8; N]> {
    let bytes = decode_base58(text)?;
    let len = bytes.len();
    bytes.try_into().map_err(|_| {
        SdkError::InvalidParameter(format!("Expected {} decoded bytes, got {}", N, len))
    })
}
