use crate::error::Result;
use crate::types::{AssetAddress, AssetRecord, CreateAssetTransaction, SubmitReceipt};
use std::future::Future;
use std::sync::Arc;

/// The minter's view of the remote ledger.
///
/// `submit_create_asset` has a side effect and must be called at most once
/// per asset; `fetch_asset` is a pure read and may be repeated freely.
pub trait LedgerClient: Send + Sync {
    /// Submit a signed creation transaction and return its receipt
    fn submit_create_asset(
        &self,
        transaction: &CreateAssetTransaction,
    ) -> impl Future<Output = Result<SubmitReceipt>> + Send;

    /// Look an asset up by address.
    ///
    /// Fails with `AssetNotFound` while the ledger does not (yet) show it.
    fn fetch_asset(
        &self,
        address: &AssetAddress,
    ) -> impl Future<Output = Result<AssetRecord>> + Send;

    /// Whether the ledger endpoint answers at all
    fn health_check(&self) -> impl Future<Output = Result<bool>> + Send;
}

impl<L: LedgerClient> LedgerClient for Arc<L> {
    fn submit_create_asset(
        &self,
        transaction: &CreateAssetTransaction,
    ) -> impl Future<Output = Result<SubmitReceipt>> + Send {
        (**self).submit_create_asset(transaction)
    }

    fn fetch_asset(
        &self,
        address: &AssetAddress,
    ) -> impl Future<Output = Result<AssetRecord>> + Send {
        (**self).fetch_asset(address)
    }

    fn health_check(&self) -> impl Future<Output = Result<bool>> + Send {
        (**self).health_check()
    }
}
