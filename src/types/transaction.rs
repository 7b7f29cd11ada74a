use crate::crypto::{KeyPair, SigningService};
use crate::error::Result;
use crate::types::asset::AssetMetadata;
use crate::types::primitives::{AssetAddress, PublicKey, Signature};
use serde::{Deserialize, Serialize};

/// Bytes covered by the creator's signature
#[derive(Serialize)]
struct CreateAssetBody<'a> {
    asset_address: &'a AssetAddress,
    owner: &'a PublicKey,
    name: &'a str,
    symbol: &'a str,
    uri: &'a str,
}

/// Signed request to create a new asset on the ledger
#[derive(Debug, Clone, Serialize)]
pub struct CreateAssetTransaction {
    pub asset_address: AssetAddress,
    pub owner: PublicKey,
    #[serde(flatten)]
    pub metadata: AssetMetadata,
    pub signature: Signature,
}

impl CreateAssetTransaction {
    /// Build and sign a creation transaction for `asset_address`
    pub fn create(
        signer: &KeyPair,
        metadata: AssetMetadata,
        asset_address: AssetAddress,
    ) -> Result<Self> {
        let owner = signer.public_key().clone();
        let payload = Self::signing_payload(&asset_address, &owner, &metadata)?;
        let signature = SigningService::new().sign(&payload, signer.secret_key())?;

        Ok(Self {
            asset_address,
            owner,
            metadata,
            signature,
        })
    }

    /// Check the signature against the owner key
    pub fn verify(&self) -> Result<bool> {
        let payload = Self::signing_payload(&self.asset_address, &self.owner, &self.metadata)?;
        SigningService::new().verify(&payload, &self.signature, &self.owner)
    }

    fn signing_payload(
        asset_address: &AssetAddress,
        owner: &PublicKey,
        metadata: &AssetMetadata,
    ) -> Result<Vec<u8>> {
        let body = CreateAssetBody {
            asset_address,
            owner,
            name: metadata.name(),
            symbol: metadata.symbol(),
            uri: metadata.uri(),
        };
        Ok(serde_json::to_vec(&body)?)
    }
}

/// Ledger acknowledgement of an accepted submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitReceipt {
    pub signature: Signature,
}

impl SubmitReceipt {
    /// Transaction hash in canonical text form
    pub fn transaction_hash(&self) -> String {
        self.signature.to_base58()
    }
}
