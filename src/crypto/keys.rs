use crate::crypto::signing::public_key_from_secret;
use crate::error::{Result, SdkError};
use crate::types::primitives::{AssetAddress, PublicKey};
use k256::ecdsa::SigningKey;
use rand::RngCore;

/// Key pair structure containing secret and public keys
pub struct KeyPair {
    secret_key: SigningKey,
    public_key: PublicKey,
}

impl KeyPair {
    /// Generate a new random key pair
    pub fn generate() -> Result<Self> {
        let mut rng = rand::thread_rng();
        let mut bytes = [0u8; 32];
        // out-of-range scalars are redrawn
        for _ in 0..8 {
            rng.fill_bytes(&mut bytes);
            if let Ok(key_pair) = Self::from_secret_bytes(&bytes) {
                return Ok(key_pair);
            }
        }
        Err(SdkError::Crypto(
            "Failed to draw a valid secret key".to_string(),
        ))
    }

    /// Create from secret key bytes (32 bytes)
    pub fn from_secret_bytes(bytes: &[u8; 32]) -> Result<Self> {
        let secret_key = SigningKey::from_bytes(&(*bytes).into())
            .map_err(|e| SdkError::Crypto(format!("Invalid private key: {}", e)))?;
        let public_key = public_key_from_secret(&secret_key)?;

        Ok(Self {
            secret_key,
            public_key,
        })
    }

    /// Create from hex-encoded secret key
    pub fn from_secret_hex(hex: &str) -> Result<Self> {
        let bytes = hex::decode(hex)?;
        if bytes.len() != 32 {
            return Err(SdkError::InvalidParameter(
                "Secret key must be 32 bytes".to_string(),
            ));
        }
        let mut array = [0u8; 32];
        array.copy_from_slice(&bytes);
        Self::from_secret_bytes(&array)
    }

    /// Create from a seed phrase (deterministic)
    pub fn from_seed(seed: &str) -> Result<Self> {
        use sha2::{Digest, Sha256};
        let hash = Sha256::digest(seed.as_bytes());
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hash);
        Self::from_secret_bytes(&bytes)
    }

    /// Get the secret key
    pub fn secret_key(&self) -> &SigningKey {
        &self.secret_key
    }

    /// Get the public key
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Export secret key as hex string
    pub fn secret_hex(&self) -> String {
        hex::encode(self.secret_key.to_bytes())
    }
}

/// Freshly generated identity for a new asset.
///
/// The address is derived from the public half; the secret half is the
/// asset's own key material and never leaves the caller.
pub struct AssetKeypair {
    key_pair: KeyPair,
    address: AssetAddress,
}

impl AssetKeypair {
    /// Generate a new asset identity without touching the network
    pub fn generate() -> Result<Self> {
        let key_pair = KeyPair::generate()?;
        let address = AssetAddress::from_public_key(key_pair.public_key());
        Ok(Self { key_pair, address })
    }

    pub fn address(&self) -> &AssetAddress {
        &self.address
    }

    pub fn key_pair(&self) -> &KeyPair {
        &self.key_pair
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_pair_generation() {
        let key_pair = KeyPair::generate().unwrap();
        assert_eq!(key_pair.secret_key().to_bytes().len(), 32);
        assert_eq!(key_pair.public_key().as_bytes().len(), 33);
    }

    #[test]
    fn test_key_pair_from_hex() {
        let secret_hex = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";
        let key_pair = KeyPair::from_secret_hex(secret_hex).unwrap();
        assert_eq!(key_pair.secret_hex(), secret_hex);
    }

    #[test]
    fn test_rejects_short_hex() {
        assert!(matches!(
            KeyPair::from_secret_hex("abcd"),
            Err(SdkError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_rejects_zero_scalar() {
        assert!(KeyPair::from_secret_bytes(&[0u8; 32]).is_err());
    }

    #[test]
    fn test_deterministic_from_seed() {
        let key1 = KeyPair::from_seed("test seed").unwrap();
        let key2 = KeyPair::from_seed("test seed").unwrap();
        assert_eq!(key1.secret_hex(), key2.secret_hex());
        assert_eq!(key1.public_key(), key2.public_key());
    }

    #[test]
    fn test_asset_keypairs_are_unique() {
        let first = AssetKeypair::generate().unwrap();
        let second = AssetKeypair::generate().unwrap();
        assert_ne!(first.address(), second.address());
        assert_eq!(
            first.address(),
            &AssetAddress::from_public_key(first.key_pair().public_key())
        );
    }
}
