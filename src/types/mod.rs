pub mod asset;
pub mod primitives;
pub mod transaction;

// Re-export commonly used types
pub use asset::{AssetMetadata, AssetRecord, MintOutcome, MintRequest};
pub use primitives::{AssetAddress, PublicKey, Signature};
pub use transaction::{CreateAssetTransaction, SubmitReceipt};
