use crate::crypto::encoding::{decode_base58, decode_base58_array, encode_base58};
use crate::error::{Result, SdkError};
use k256::ecdsa::VerifyingKey;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Length of a compressed secp256k1 public key
pub const PUBLIC_KEY_LENGTH: usize = 33;

/// Length of a recoverable signature: R (32) || S (32) || recovery_id (1)
pub const SIGNATURE_LENGTH: usize = 65;

/// 65-byte signature format: R (32) || S (32) || recovery_id (1)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature([u8; SIGNATURE_LENGTH]);

impl Signature {
    /// Create a new signature from bytes
    pub fn new(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Create from an arbitrary slice, checking the length
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; SIGNATURE_LENGTH] = bytes.try_into().map_err(|_| {
            SdkError::InvalidParameter(format!(
                "Signature must be {} bytes, got {}",
                SIGNATURE_LENGTH,
                bytes.len()
            ))
        })?;
        Ok(Self(arr))
    }

    /// Get the signature bytes
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.0
    }

    /// Canonical text form used as the transaction hash
    pub fn to_base58(&self) -> String {
        encode_base58(&self.0)
    }

    /// Parse the canonical text form
    pub fn from_base58(text: &str) -> Result<Self> {
        Self::from_slice(&decode_base58(text)?)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_base58())
    }
}

impl Serialize for Signature {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_base58())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Signature, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Signature::from_base58(&s).map_err(serde::de::Error::custom)
    }
}

/// 33-byte compressed secp256k1 public key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; PUBLIC_KEY_LENGTH]);

impl PublicKey {
    /// Create a new public key from bytes, rejecting points not on the curve
    pub fn new(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Result<Self> {
        VerifyingKey::from_sec1_bytes(&bytes)
            .map_err(|e| SdkError::Crypto(format!("Invalid public key: {}", e)))?;
        Ok(Self(bytes))
    }

    /// Create from a k256 verifying key
    pub fn from_verifying_key(key: &VerifyingKey) -> Result<Self> {
        let encoded = key.to_encoded_point(true);
        let bytes: [u8; PUBLIC_KEY_LENGTH] = encoded
            .as_bytes()
            .try_into()
            .map_err(|_| SdkError::Crypto("Unexpected public key encoding".to_string()))?;
        Ok(Self(bytes))
    }

    /// Get the public key bytes
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.0
    }

    /// Convert to a k256 verifying key
    pub fn to_verifying_key(&self) -> Result<VerifyingKey> {
        VerifyingKey::from_sec1_bytes(&self.0)
            .map_err(|e| SdkError::Crypto(format!("Invalid public key: {}", e)))
    }

    pub fn to_base58(&self) -> String {
        encode_base58(&self.0)
    }

    pub fn from_base58(text: &str) -> Result<Self> {
        Self::new(decode_base58_array(text)?)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_base58())
    }
}

impl Serialize for PublicKey {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_base58())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D>(deserializer: D) -> std::result::Result<PublicKey, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PublicKey::from_base58(&s).map_err(serde::de::Error::custom)
    }
}

/// Ledger address of a minted asset.
///
/// Generated locally before submission, so it is known even when
/// confirmation never succeeds. Treated as opaque bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetAddress([u8; PUBLIC_KEY_LENGTH]);

impl AssetAddress {
    pub fn from_bytes(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Derive the address owned by an asset public key
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        Self(*public_key.as_bytes())
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.0
    }

    pub fn to_base58(&self) -> String {
        encode_base58(&self.0)
    }

    pub fn from_base58(text: &str) -> Result<Self> {
        Ok(Self(decode_base58_array(text)?))
    }
}

impl fmt::Display for AssetAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_base58())
    }
}

impl FromStr for AssetAddress {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_base58(s)
    }
}

impl Serialize for AssetAddress {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_base58())
    }
}

impl<'de> Deserialize<'de> for AssetAddress {
    fn deserialize<D>(deserializer: D) -> std::result::Result<AssetAddress, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        AssetAddress::from_base58(&s).map_err(serde::de::Error::custom)
    }
}
