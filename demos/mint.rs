use ecoswap_sdk::config::{LedgerConfig, MintConfig};
use ecoswap_sdk::crypto::KeyPair;
use ecoswap_sdk::minter::{MintEvent, MintObserver, Minter};
use ecoswap_sdk::retry::RetryPolicy;
use ecoswap_sdk::types::{AssetMetadata, MintRequest};
use ecoswap_sdk::MintError;

/// Prints each phase change as it happens
struct PrintObserver;

impl MintObserver for PrintObserver {
    fn on_event(&self, event: &MintEvent) {
        println!("  {:?}", event.phase());
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize the SDK
    ecoswap_sdk::init();

    // Devnet unless ECOSWAP_LEDGER_URL says otherwise
    let config = MintConfig::new(LedgerConfig::from_env()?, RetryPolicy::default());

    let minter = Minter::from_config(&config)?.with_observer(PrintObserver);

    // Seller's key; in the marketplace this comes from the connected wallet
    let signer = KeyPair::from_seed("ecoswap demo seller")?;

    let metadata = AssetMetadata::new(
        "Reclaimed teak bench",
        "ECO",
        "https://meta.ecoswapchain.io/bench.json",
    )?;

    match minter.mint(MintRequest::new(&signer, metadata)).await {
        Ok(outcome) => {
            println!("Minted asset {}", outcome.asset_address);
            println!("Transaction {}", outcome.transaction_hash);
        }
        Err(MintError::ConfirmationTimeout {
            asset_address,
            transaction_hash,
            ..
        }) => {
            // Do not mint again: the asset may still show up
            println!("Submitted {} but not yet visible", transaction_hash);
            println!("Check asset {} before retrying", asset_address);
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
