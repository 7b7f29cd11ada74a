//! In-process ledger for tests and offline development.

use crate::client::ledger::LedgerClient;
use crate::error::{Result, SdkError};
use crate::types::{AssetAddress, AssetRecord, CreateAssetTransaction, SubmitReceipt};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tokio::time::Instant;

struct StoredAsset {
    record: AssetRecord,
    queries: u32,
}

struct LedgerState {
    assets: HashMap<AssetAddress, StoredAsset>,
    submit_failure: Option<String>,
    /// Query number (per asset, 1-based) from which the asset is visible
    visible_from_query: Option<u32>,
    submissions: u32,
    queries: Vec<Instant>,
    slot: u64,
}

/// Ledger kept in memory with scriptable confirmation lag.
///
/// By default every accepted asset is visible on its first query.
pub struct InMemoryLedger {
    state: Mutex<LedgerState>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LedgerState {
                assets: HashMap::new(),
                submit_failure: None,
                visible_from_query: Some(1),
                submissions: 0,
                queries: Vec::new(),
                slot: 0,
            }),
        }
    }

    /// Reject every submission with `reason`
    pub fn failing_submissions(self, reason: impl Into<String>) -> Self {
        self.lock().submit_failure = Some(reason.into());
        self
    }

    /// Make each asset visible from its `query`-th lookup onwards
    pub fn confirming_on_query(self, query: u32) -> Self {
        self.lock().visible_from_query = Some(query.max(1));
        self
    }

    /// Accept submissions but never show the assets
    pub fn never_confirming(self) -> Self {
        self.lock().visible_from_query = None;
        self
    }

    /// Number of submissions received, accepted or not
    pub fn submission_count(&self) -> u32 {
        self.lock().submissions
    }

    /// Number of asset lookups received
    pub fn query_count(&self) -> usize {
        self.lock().queries.len()
    }

    /// When each lookup arrived, in order
    pub fn query_times(&self) -> Vec<Instant> {
        self.lock().queries.clone()
    }

    /// Whether the asset was accepted, regardless of visibility
    pub fn contains(&self, address: &AssetAddress) -> bool {
        self.lock().assets.contains_key(address)
    }

    fn lock(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerClient for InMemoryLedger {
    async fn submit_create_asset(
        &self,
        transaction: &CreateAssetTransaction,
    ) -> Result<SubmitReceipt> {
        let mut state = self.lock();
        state.submissions += 1;

        if let Some(reason) = &state.submit_failure {
            return Err(SdkError::Rejected(reason.clone()));
        }
        if !transaction.verify()? {
            return Err(SdkError::Rejected("invalid transaction signature".to_string()));
        }
        if state.assets.contains_key(&transaction.asset_address) {
            return Err(SdkError::Rejected(format!(
                "asset {} already exists",
                transaction.asset_address
            )));
        }

        state.slot += 1;
        let record = AssetRecord {
            mint_address: transaction.asset_address.clone(),
            name: Some(transaction.metadata.name().to_string()),
            symbol: Some(transaction.metadata.symbol().to_string()),
            uri: Some(transaction.metadata.uri().to_string()),
            owner: Some(transaction.owner.clone()),
            slot: Some(state.slot),
        };
        state.assets.insert(
            transaction.asset_address.clone(),
            StoredAsset { record, queries: 0 },
        );

        Ok(SubmitReceipt {
            signature: transaction.signature.clone(),
        })
    }

    async fn fetch_asset(&self, address: &AssetAddress) -> Result<AssetRecord> {
        let mut state = self.lock();
        state.queries.push(Instant::now());

        let visible_from = state.visible_from_query;
        let stored = state
            .assets
            .get_mut(address)
            .ok_or_else(|| SdkError::AssetNotFound(address.to_string()))?;
        stored.queries += 1;

        match visible_from {
            Some(from) if stored.queries >= from => Ok(stored.record.clone()),
            _ => Err(SdkError::AssetNotFound(address.to_string())),
        }
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }
}
