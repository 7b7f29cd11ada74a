pub mod encoding;
pub mod keys;
pub mod signing;

// Re-export commonly used items
pub use encoding::{decode_base58, encode_base58};
pub use keys::{AssetKeypair, KeyPair};
pub use signing::{public_key_from_secret, SigningService};
