use crate::crypto::KeyPair;
use crate::error::{Result, SdkError};
use crate::types::primitives::{AssetAddress, PublicKey};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Descriptive metadata attached to a minted asset.
///
/// `uri` points at an off-ledger metadata document; its reachability and
/// contents are the metadata service's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetMetadata {
    name: String,
    symbol: String,
    uri: String,
}

impl AssetMetadata {
    /// Create metadata, requiring every field to be non-empty
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        uri: impl Into<String>,
    ) -> Result<Self> {
        let metadata = Self {
            name: name.into(),
            symbol: symbol.into(),
            uri: uri.into(),
        };
        for (field, value) in [
            ("name", &metadata.name),
            ("symbol", &metadata.symbol),
            ("uri", &metadata.uri),
        ] {
            if value.trim().is_empty() {
                return Err(SdkError::InvalidParameter(format!(
                    "Asset {} must not be empty",
                    field
                )));
            }
        }
        Ok(metadata)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }
}

/// Input to a mint: who signs and what is minted
pub struct MintRequest<'a> {
    pub signer: &'a KeyPair,
    pub metadata: AssetMetadata,
}

impl<'a> MintRequest<'a> {
    pub fn new(signer: &'a KeyPair, metadata: AssetMetadata) -> Self {
        Self { signer, metadata }
    }
}

/// Result of a confirmed mint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintOutcome {
    /// Address of the created asset, base58
    pub asset_address: String,
    /// Signature of the creation transaction, base58
    pub transaction_hash: String,
}

/// The ledger's view of an asset.
///
/// Only `mint_address` is required; everything else is informational.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub mint_address: AssetAddress,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<PublicKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<u64>,
}

impl AssetRecord {
    /// Minimal record for an address
    pub fn new(mint_address: AssetAddress) -> Self {
        Self {
            mint_address,
            name: None,
            symbol: None,
            uri: None,
            owner: None,
            slot: None,
        }
    }

    /// Decode a record returned for `expected`.
    ///
    /// Anything that is not an object carrying the queried `mint_address`
    /// is rejected.
    pub fn decode(value: Value, expected: &AssetAddress) -> Result<Self> {
        if value.is_null() {
            return Err(SdkError::AssetNotFound(expected.to_string()));
        }
        if !value.is_object() {
            return Err(SdkError::MalformedAssetRecord(format!(
                "expected object, got {}",
                value
            )));
        }
        let record: AssetRecord = serde_json::from_value(value)
            .map_err(|e| SdkError::MalformedAssetRecord(e.to_string()))?;
        if &record.mint_address != expected {
            return Err(SdkError::MalformedAssetRecord(format!(
                "record is for {}, queried {}",
                record.mint_address, expected
            )));
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn address() -> AssetAddress {
        AssetAddress::from_bytes([3u8; 33])
    }

    #[test]
    fn test_metadata_requires_all_fields() {
        assert!(AssetMetadata::new("Bamboo chair", "ECO", "https://meta/1.json").is_ok());
        assert!(AssetMetadata::new("", "ECO", "https://meta/1.json").is_err());
        assert!(AssetMetadata::new("Bamboo chair", "  ", "https://meta/1.json").is_err());
        assert!(AssetMetadata::new("Bamboo chair", "ECO", "").is_err());
    }

    #[test]
    fn test_metadata_uri_not_validated() {
        let metadata = AssetMetadata::new("Chair", "ECO", "not a url").unwrap();
        assert_eq!(metadata.uri(), "not a url");
    }

    #[test]
    fn test_decode_full_record() {
        let value = json!({
            "mint_address": address().to_base58(),
            "name": "Chair",
            "symbol": "ECO",
            "uri": "https://meta/1.json",
            "slot": 42
        });
        let record = AssetRecord::decode(value, &address()).unwrap();
        assert_eq!(record.mint_address, address());
        assert_eq!(record.slot, Some(42));
        assert_eq!(record.name.as_deref(), Some("Chair"));
    }

    #[test]
    fn test_decode_null_is_not_found() {
        assert!(matches!(
            AssetRecord::decode(Value::Null, &address()),
            Err(SdkError::AssetNotFound(_))
        ));
    }

    #[test]
    fn test_decode_missing_mint_address() {
        let value = json!({ "name": "Chair" });
        assert!(matches!(
            AssetRecord::decode(value, &address()),
            Err(SdkError::MalformedAssetRecord(_))
        ));
    }

    #[test]
    fn test_decode_wrong_shape() {
        assert!(matches!(
            AssetRecord::decode(json!(["not", "an", "object"]), &address()),
            Err(SdkError::MalformedAssetRecord(_))
        ));
        assert!(matches!(
            AssetRecord::decode(json!(true), &address()),
            Err(SdkError::MalformedAssetRecord(_))
        ));
    }

    #[test]
    fn test_decode_address_mismatch() {
        let other = AssetAddress::from_bytes([4u8; 33]);
        let value = json!({ "mint_address": other.to_base58() });
        assert!(matches!(
            AssetRecord::decode(value, &address()),
            Err(SdkError::MalformedAssetRecord(_))
        ));
    }
}
