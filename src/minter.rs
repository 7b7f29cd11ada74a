//! Mint-and-verify.
//!
//! A mint is only reported as successful once the asset has been read back
//! from the ledger. The flow is
//!
//! ```text
//! Idle -> Submitting -> SubmissionFailed
//!                    -> Submitted -> Confirming(1..=max) -> Confirmed
//!                                                        -> ConfirmationExhausted
//! ```
//!
//! The creation transaction is submitted exactly once; only the read-only
//! confirmation query is retried, strictly sequentially.

use crate::client::{LedgerClient, RpcLedgerClient};
use crate::config::MintConfig;
use crate::crypto::{AssetKeypair, KeyPair};
use crate::error::{MintError, Result, SdkError};
use crate::retry::RetryPolicy;
use crate::types::{
    AssetAddress, AssetMetadata, AssetRecord, CreateAssetTransaction, MintOutcome, MintRequest,
    SubmitReceipt,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Where a mint currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MintPhase {
    Idle,
    Submitting,
    SubmissionFailed,
    Submitted,
    Confirming { attempt: u32 },
    Confirmed,
    ConfirmationExhausted,
}

impl MintPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            MintPhase::SubmissionFailed | MintPhase::Confirmed | MintPhase::ConfirmationExhausted
        )
    }
}

/// Progress notification emitted while minting
#[derive(Debug, Clone, PartialEq)]
pub enum MintEvent {
    Submitting {
        asset_address: AssetAddress,
    },
    SubmissionFailed {
        asset_address: AssetAddress,
        reason: String,
    },
    Submitted {
        asset_address: AssetAddress,
        transaction_hash: String,
    },
    AttemptStarted {
        asset_address: AssetAddress,
        attempt: u32,
        max_attempts: u32,
    },
    AttemptFailed {
        asset_address: AssetAddress,
        attempt: u32,
        max_attempts: u32,
        reason: String,
        /// `None` on the last attempt
        retry_in: Option<Duration>,
    },
    Confirmed {
        asset_address: AssetAddress,
        attempts: u32,
    },
    ConfirmationExhausted {
        asset_address: AssetAddress,
        attempts: u32,
    },
}

impl MintEvent {
    /// Phase the mint is in once this event has been emitted
    pub fn phase(&self) -> MintPhase {
        match self {
            MintEvent::Submitting { .. } => MintPhase::Submitting,
            MintEvent::SubmissionFailed { .. } => MintPhase::SubmissionFailed,
            MintEvent::Submitted { .. } => MintPhase::Submitted,
            MintEvent::AttemptStarted { attempt, .. }
            | MintEvent::AttemptFailed { attempt, .. } => {
                MintPhase::Confirming { attempt: *attempt }
            }
            MintEvent::Confirmed { .. } => MintPhase::Confirmed,
            MintEvent::ConfirmationExhausted { .. } => MintPhase::ConfirmationExhausted,
        }
    }

    pub fn asset_address(&self) -> &AssetAddress {
        match self {
            MintEvent::Submitting { asset_address }
            | MintEvent::SubmissionFailed { asset_address, .. }
            | MintEvent::Submitted { asset_address, .. }
            | MintEvent::AttemptStarted { asset_address, .. }
            | MintEvent::AttemptFailed { asset_address, .. }
            | MintEvent::Confirmed { asset_address, .. }
            | MintEvent::ConfirmationExhausted { asset_address, .. } => asset_address,
        }
    }
}

/// Receives every [`MintEvent`] in order
pub trait MintObserver: Send + Sync {
    fn on_event(&self, event: &MintEvent);
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl MintObserver for NoopObserver {
    #[inline]
    fn on_event(&self, _event: &MintEvent) {}
}

impl<O: MintObserver + ?Sized> MintObserver for Arc<O> {
    fn on_event(&self, event: &MintEvent) {
        (**self).on_event(event)
    }
}

/// Observer that keeps every event, for inspection after the fact
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<MintEvent>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<MintEvent> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn phases(&self) -> Vec<MintPhase> {
        self.events().iter().map(MintEvent::phase).collect()
    }

    /// Number of confirmation queries issued
    pub fn attempts(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, MintEvent::AttemptStarted { .. }))
            .count()
    }
}

impl MintObserver for EventLog {
    fn on_event(&self, event: &MintEvent) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event.clone());
    }
}

/// The confirmation loop gave up
struct Exhausted {
    attempts: u32,
    last_error: SdkError,
}

/// Submits asset-creation transactions and waits until the ledger shows them
pub struct Minter<L, O = NoopObserver> {
    ledger: L,
    retry: RetryPolicy,
    observer: O,
}

impl<L: LedgerClient> Minter<L> {
    pub fn new(ledger: L, retry: RetryPolicy) -> Self {
        Self {
            ledger,
            retry,
            observer: NoopObserver,
        }
    }
}

impl Minter<RpcLedgerClient> {
    /// Minter talking JSON-RPC to the configured ledger
    pub fn from_config(config: &MintConfig) -> Result<Self> {
        let ledger = RpcLedgerClient::new(&config.ledger)?;
        Ok(Self::new(ledger, config.retry.clone()))
    }
}

impl<L: LedgerClient, O: MintObserver> Minter<L, O> {
    /// Replace the observer
    pub fn with_observer<P: MintObserver>(self, observer: P) -> Minter<L, P> {
        Minter {
            ledger: self.ledger,
            retry: self.retry,
            observer,
        }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Mint an asset and wait until the ledger shows it.
    ///
    /// Fails with [`MintError::Submission`] if the transaction never got
    /// accepted, and with [`MintError::ConfirmationTimeout`] if it was
    /// accepted but the asset could not be read back within the retry
    /// policy. In the latter case the asset may still appear later.
    pub async fn mint(
        &self,
        request: MintRequest<'_>,
    ) -> std::result::Result<MintOutcome, MintError> {
        let MintRequest { signer, metadata } = request;

        let asset = AssetKeypair::generate().map_err(|source| {
            tracing::error!(error = %source, "failed to generate asset identity");
            MintError::Submission { source }
        })?;
        let asset_address = asset.address().clone();

        self.emit(MintEvent::Submitting {
            asset_address: asset_address.clone(),
        });
        tracing::info!(
            asset = %asset_address,
            asset_name = metadata.name(),
            symbol = metadata.symbol(),
            "submitting asset creation"
        );

        let receipt = match self.submit(signer, metadata, &asset_address).await {
            Ok(receipt) => receipt,
            Err(source) => {
                tracing::error!(asset = %asset_address, error = %source, "asset creation rejected");
                self.emit(MintEvent::SubmissionFailed {
                    asset_address,
                    reason: source.to_string(),
                });
                return Err(MintError::Submission { source });
            }
        };

        let transaction_hash = receipt.transaction_hash();
        tracing::info!(asset = %asset_address, tx = %transaction_hash, "asset creation submitted");
        self.emit(MintEvent::Submitted {
            asset_address: asset_address.clone(),
            transaction_hash: transaction_hash.clone(),
        });

        match self.confirm(&asset_address).await {
            Ok((_record, attempts)) => {
                tracing::info!(asset = %asset_address, attempts, "asset confirmed");
                self.emit(MintEvent::Confirmed {
                    asset_address: asset_address.clone(),
                    attempts,
                });
                Ok(MintOutcome {
                    asset_address: asset_address.to_base58(),
                    transaction_hash,
                })
            }
            Err(Exhausted {
                attempts,
                last_error,
            }) => {
                tracing::error!(
                    asset = %asset_address,
                    tx = %transaction_hash,
                    attempts,
                    error = %last_error,
                    "asset not confirmed, verify manually"
                );
                self.emit(MintEvent::ConfirmationExhausted {
                    asset_address: asset_address.clone(),
                    attempts,
                });
                Err(MintError::ConfirmationTimeout {
                    asset_address,
                    transaction_hash,
                    attempts,
                    last_error,
                })
            }
        }
    }

    /// Re-run only the confirmation loop for an already submitted asset.
    ///
    /// Meant for the follow-up to a [`MintError::ConfirmationTimeout`]:
    /// check the known address before deciding to mint again.
    pub async fn reconfirm(&self, asset_address: &AssetAddress) -> Result<AssetRecord> {
        match self.confirm(asset_address).await {
            Ok((record, attempts)) => {
                tracing::info!(asset = %asset_address, attempts, "asset reconfirmed");
                self.emit(MintEvent::Confirmed {
                    asset_address: asset_address.clone(),
                    attempts,
                });
                Ok(record)
            }
            Err(Exhausted {
                attempts,
                last_error,
            }) => {
                tracing::warn!(
                    asset = %asset_address,
                    attempts,
                    error = %last_error,
                    "asset still not visible"
                );
                self.emit(MintEvent::ConfirmationExhausted {
                    asset_address: asset_address.clone(),
                    attempts,
                });
                Err(last_error)
            }
        }
    }

    async fn submit(
        &self,
        signer: &KeyPair,
        metadata: AssetMetadata,
        asset_address: &AssetAddress,
    ) -> Result<SubmitReceipt> {
        let transaction = CreateAssetTransaction::create(signer, metadata, asset_address.clone())?;
        self.ledger.submit_create_asset(&transaction).await
    }

    async fn confirm(
        &self,
        asset_address: &AssetAddress,
    ) -> std::result::Result<(AssetRecord, u32), Exhausted> {
        let mut retry = self.retry.start();
        let max_attempts = retry.max_attempts();

        loop {
            let attempt = retry.advance();
            self.emit(MintEvent::AttemptStarted {
                asset_address: asset_address.clone(),
                attempt,
                max_attempts,
            });

            let error = match self.ledger.fetch_asset(asset_address).await {
                Ok(record) => return Ok((record, attempt)),
                Err(e) => e,
            };

            let retry_in = (!retry.is_last()).then(|| retry.delay());
            tracing::debug!(
                asset = %asset_address,
                attempt,
                max_attempts,
                error = %error,
                "asset not visible yet"
            );
            self.emit(MintEvent::AttemptFailed {
                asset_address: asset_address.clone(),
                attempt,
                max_attempts,
                reason: error.to_string(),
                retry_in,
            });

            match retry_in {
                Some(delay) => tokio::time::sleep(delay).await,
                None => {
                    return Err(Exhausted {
                        attempts: attempt,
                        last_error: error,
                    })
                }
            }
        }
    }

    fn emit(&self, event: MintEvent) {
        self.observer.on_event(&event);
    }
}
