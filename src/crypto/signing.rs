use crate::error::{Result, SdkError};
use crate::types::primitives::{PublicKey, Signature};
use k256::ecdsa::{
    signature::hazmat::PrehashVerifier, Signature as K256Signature, SigningKey, VerifyingKey,
};
use sha2::{Digest, Sha256};

/// Signing service for secp256k1 operations using k256
#[derive(Clone)]
pub struct SigningService;

impl SigningService {
    /// Create a new signing service
    pub fn new() -> Self {
        Self
    }

    /// Sign the SHA-256 digest of `data`
    pub fn sign(&self, data: &[u8], secret_key: &SigningKey) -> Result<Signature> {
        let msg_hash: [u8; 32] = Sha256::digest(data).into();

        let (sig, recovery_id) = secret_key
            .sign_prehash_recoverable(&msg_hash)
            .map_err(|e| SdkError::Crypto(format!("Signing failed: {}", e)))?;
        let sig_bytes = sig.to_bytes();

        // r || s || v
        let mut signature_bytes = [0u8; 65];
        signature_bytes[..64].copy_from_slice(sig_bytes.as_slice());
        signature_bytes[64] = recovery_id.to_byte();

        Ok(Signature::new(signature_bytes))
    }

    /// Verify a signature against data and public key
    pub fn verify(
        &self,
        data: &[u8],
        signature: &Signature,
        public_key: &PublicKey,
    ) -> Result<bool> {
        let msg_hash: [u8; 32] = Sha256::digest(data).into();

        let ecdsa_sig = K256Signature::from_slice(&signature.as_bytes()[..64])
            .map_err(|e| SdkError::Crypto(format!("Invalid signature: {}", e)))?;
        let verifying_key = public_key.to_verifying_key()?;

        Ok(verifying_key.verify_prehash(&msg_hash, &ecdsa_sig).is_ok())
    }
}

impl Default for SigningService {
    fn default() -> Self {
        Self::new()
    }
}

/// Get public key from secret key
pub fn public_key_from_secret(secret_key: &SigningKey) -> Result<PublicKey> {
    let verifying_key = VerifyingKey::from(secret_key);
    PublicKey::from_verifying_key(&verifying_key)
}
