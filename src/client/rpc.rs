use crate::client::jsonrpc::JsonRpcHttpTransport;
use crate::client::ledger::LedgerClient;
use crate::config::{CommitmentLevel, LedgerConfig};
use crate::error::{Result, SdkError};
use crate::types::{AssetAddress, AssetRecord, CreateAssetTransaction, SubmitReceipt};
use serde_json::{json, Value};
use std::time::Duration;

const METHOD_CREATE_ASSET: &str = "createAsset";
const METHOD_GET_ASSET: &str = "getAsset";
const METHOD_GET_SLOT: &str = "getSlot";

/// Ledger client speaking JSON-RPC over HTTP
#[derive(Clone)]
pub struct RpcLedgerClient {
    transport: JsonRpcHttpTransport,
    commitment: CommitmentLevel,
}

impl RpcLedgerClient {
    /// Create a client for the configured endpoint
    pub fn new(config: &LedgerConfig) -> Result<Self> {
        let transport = JsonRpcHttpTransport::new(
            config.endpoint.clone(),
            Duration::from_secs(config.timeout_seconds),
        )?;
        Ok(Self {
            transport,
            commitment: config.commitment,
        })
    }

    pub fn commitment(&self) -> CommitmentLevel {
        self.commitment
    }

    /// Get the ledger URL
    pub fn url(&self) -> &str {
        self.transport.url()
    }

    /// Current slot at the configured commitment
    pub async fn get_slot(&self) -> Result<u64> {
        let response = self
            .transport
            .send_request(METHOD_GET_SLOT, json!({ "commitment": self.commitment }))
            .await?;
        Ok(serde_json::from_value(response)?)
    }

    fn create_asset_params(&self, transaction: &CreateAssetTransaction) -> Value {
        json!({
            "transaction": transaction,
            "commitment": self.commitment,
        })
    }

    fn get_asset_params(&self, address: &AssetAddress) -> Value {
        json!({
            "asset_address": address,
            "commitment": self.commitment,
        })
    }
}

/// Decode the ledger's answer to `createAsset`
fn decode_receipt(response: Value) -> Result<SubmitReceipt> {
    if response.is_null() {
        return Err(SdkError::Rejected("empty submission receipt".to_string()));
    }
    serde_json::from_value(response).map_err(|e| SdkError::Serialization(e.to_string()))
}

impl LedgerClient for RpcLedgerClient {
    async fn submit_create_asset(
        &self,
        transaction: &CreateAssetTransaction,
    ) -> Result<SubmitReceipt> {
        let params = self.create_asset_params(transaction);
        let response = self
            .transport
            .send_request(METHOD_CREATE_ASSET, params)
            .await?;
        let receipt = decode_receipt(response)?;

        if receipt.signature != transaction.signature {
            tracing::warn!(
                asset = %transaction.asset_address,
                receipt = %receipt.signature,
                "ledger receipt signature differs from submitted transaction"
            );
        }
        Ok(receipt)
    }

    async fn fetch_asset(&self, address: &AssetAddress) -> Result<AssetRecord> {
        let params = self.get_asset_params(address);
        let response = self.transport.send_request(METHOD_GET_ASSET, params).await?;
        AssetRecord::decode(response, address)
    }

    async fn health_check(&self) -> Result<bool> {
        match self.get_slot().await {
            Ok(_) => Ok(true),
            Err(_) => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{AssetKeypair, KeyPair};
    use crate::error::MintError;
    use crate::minter::{EventLog, MintEvent, Minter};
    use crate::retry::RetryPolicy;
    use crate::types::{AssetMetadata, MintRequest, Signature};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    /// Serve JSON-RPC on a local port, answering each request with
    /// `handler(method, params)` plus the `jsonrpc` and `id` members
    async fn stub_ledger<F>(handler: F) -> LedgerConfig
    where
        F: Fn(&str, &Value) -> Value + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let request = read_request(&mut socket).await;
                let method = request["method"].as_str().unwrap_or_default().to_string();
                let mut reply = handler(&method, &request["params"]);
                reply["jsonrpc"] = json!("2.0");
                reply["id"] = request["id"].clone();

                let body = reply.to_string();
                let response = format!(
                    "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\n\
                     content-length: {}\r\nconnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        LedgerConfig::new(endpoint).with_timeout_seconds(5)
    }

    async fn read_request(socket: &mut TcpStream) -> Value {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap_or(0);
            if n == 0 {
                return Value::Null;
            }
            buf.extend_from_slice(&chunk[..n]);

            let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
                continue;
            };
            let headers = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
            let length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            let body_start = end + 4;
            if buf.len() >= body_start + length {
                return serde_json::from_slice(&buf[body_start..body_start + length])
                    .unwrap_or(Value::Null);
            }
        }
    }

    /// `getAsset` answers: an RPC error, then null, then the record
    fn lagging_get_asset(queries: &AtomicUsize, params: &Value) -> Value {
        match queries.fetch_add(1, Ordering::SeqCst) {
            0 => json!({ "error": { "code": -32005, "message": "node is behind" } }),
            1 => json!({ "result": null }),
            _ => json!({
                "result": {
                    "mint_address": params["asset_address"],
                    "name": "Cork lamp",
                    "slot": 12
                }
            }),
        }
    }

    fn client() -> RpcLedgerClient {
        RpcLedgerClient::new(&LedgerConfig::local()).unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = client();
        assert_eq!(client.url(), crate::config::LOCAL_ENDPOINT);
        assert_eq!(client.commitment(), CommitmentLevel::Finalized);
    }

    #[test]
    fn test_create_asset_params() {
        let signer = KeyPair::from_seed("carol").unwrap();
        let asset = AssetKeypair::generate().unwrap();
        let metadata = AssetMetadata::new("Hemp tote", "ECO", "ipfs://tote").unwrap();
        let tx = CreateAssetTransaction::create(&signer, metadata, asset.address().clone())
            .unwrap();

        let params = client().create_asset_params(&tx);
        assert_eq!(params["commitment"], "finalized");
        assert_eq!(params["transaction"]["asset_address"], asset.address().to_base58());
        assert_eq!(params["transaction"]["owner"], signer.public_key().to_base58());
        assert_eq!(params["transaction"]["uri"], "ipfs://tote");
    }

    #[test]
    fn test_get_asset_params() {
        let address = AssetAddress::from_bytes([5u8; 33]);
        let config = LedgerConfig::local().with_commitment(CommitmentLevel::Confirmed);
        let client = RpcLedgerClient::new(&config).unwrap();

        let params = client.get_asset_params(&address);
        assert_eq!(params["asset_address"], address.to_base58());
        assert_eq!(params["commitment"], "confirmed");
    }

    #[test]
    fn test_decode_receipt() {
        let signature = Signature::new([1u8; 65]);
        let receipt = decode_receipt(json!({ "signature": signature.to_base58() })).unwrap();
        assert_eq!(receipt.signature, signature);

        assert!(matches!(
            decode_receipt(Value::Null),
            Err(SdkError::Rejected(_))
        ));
        assert!(matches!(
            decode_receipt(json!({ "signature": "not-base58-0OIl" })),
            Err(SdkError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn test_health_check_unreachable() {
        // nothing listens on port 9 locally
        let config = LedgerConfig::new("http://127.0.0.1:9").with_timeout_seconds(1);
        let client = RpcLedgerClient::new(&config).unwrap();
        assert!(!client.health_check().await.unwrap());

        let address = AssetAddress::from_bytes([4u8; 33]);
        assert!(matches!(
            client.fetch_asset(&address).await,
            Err(SdkError::Http(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_asset_over_http() {
        let queries = Arc::new(AtomicUsize::new(0));
        let counter = queries.clone();
        let config = stub_ledger(move |method, params| {
            assert_eq!(method, METHOD_GET_ASSET);
            assert_eq!(params["commitment"], "finalized");
            lagging_get_asset(&counter, params)
        })
        .await;
        let client = RpcLedgerClient::new(&config).unwrap();
        let address = AssetAddress::from_bytes([4u8; 33]);

        assert!(matches!(
            client.fetch_asset(&address).await,
            Err(SdkError::JsonRpc { code: -32005, .. })
        ));
        assert!(matches!(
            client.fetch_asset(&address).await,
            Err(SdkError::AssetNotFound(_))
        ));
        let record = client.fetch_asset(&address).await.unwrap();
        assert_eq!(record.mint_address, address);
        assert_eq!(record.name.as_deref(), Some("Cork lamp"));
        assert_eq!(record.slot, Some(12));
        assert_eq!(queries.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_minter_retries_rpc_errors_and_null_results() {
        let queries = Arc::new(AtomicUsize::new(0));
        let counter = queries.clone();
        let config = stub_ledger(move |method, params| match method {
            METHOD_CREATE_ASSET => {
                json!({ "result": { "signature": params["transaction"]["signature"] } })
            }
            _ => lagging_get_asset(&counter, params),
        })
        .await;
        let log = Arc::new(EventLog::new());
        let minter = Minter::new(
            RpcLedgerClient::new(&config).unwrap(),
            RetryPolicy::fixed(3, Duration::from_millis(10)),
        )
        .with_observer(log.clone());
        let signer = KeyPair::from_seed("frank").unwrap();
        let metadata = AssetMetadata::new("Cork lamp", "ECO", "https://meta/lamp.json").unwrap();

        let outcome = minter
            .mint(MintRequest::new(&signer, metadata))
            .await
            .unwrap();

        assert!(Signature::from_base58(&outcome.transaction_hash).is_ok());
        assert_eq!(log.attempts(), 3);
        let reasons: Vec<String> = log
            .events()
            .iter()
            .filter_map(|event| match event {
                MintEvent::AttemptFailed { reason, .. } => Some(reason.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(reasons.len(), 2);
        assert!(reasons[0].contains("node is behind"));
        assert!(reasons[1].contains("Asset not found"));
    }

    #[tokio::test]
    async fn test_minter_times_out_on_rpc_ledger() {
        let config = stub_ledger(|method, params| match method {
            METHOD_CREATE_ASSET => {
                json!({ "result": { "signature": params["transaction"]["signature"] } })
            }
            _ => json!({ "result": null }),
        })
        .await;
        let minter = Minter::new(
            RpcLedgerClient::new(&config).unwrap(),
            RetryPolicy::fixed(2, Duration::from_millis(10)),
        );
        let signer = KeyPair::from_seed("frank").unwrap();
        let metadata = AssetMetadata::new("Cork lamp", "ECO", "https://meta/lamp.json").unwrap();

        let err = minter
            .mint(MintRequest::new(&signer, metadata))
            .await
            .unwrap_err();

        match err {
            MintError::ConfirmationTimeout {
                attempts,
                last_error,
                ..
            } => {
                assert_eq!(attempts, 2);
                assert!(matches!(last_error, SdkError::AssetNotFound(_)));
            }
            other => panic!("expected ConfirmationTimeout, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_receipt_signature_from_ledger_wins() {
        let ledger_signature = Signature::new([9u8; 65]);
        let reported = ledger_signature.to_base58();
        let config = stub_ledger(move |method, _| {
            assert_eq!(method, METHOD_CREATE_ASSET);
            json!({ "result": { "signature": reported } })
        })
        .await;
        let client = RpcLedgerClient::new(&config).unwrap();

        let signer = KeyPair::from_seed("grace").unwrap();
        let asset = AssetKeypair::generate().unwrap();
        let metadata = AssetMetadata::new("Wool rug", "ECO", "ipfs://rug").unwrap();
        let tx = CreateAssetTransaction::create(&signer, metadata, asset.address().clone())
            .unwrap();

        let receipt = client.submit_create_asset(&tx).await.unwrap();
        assert_ne!(receipt.signature, tx.signature);
        assert_eq!(receipt.signature, ledger_signature);
        assert_eq!(receipt.transaction_hash(), ledger_signature.to_base58());
    }

    #[tokio::test]
    async fn test_null_receipt_is_rejection() {
        let config = stub_ledger(|_, _| json!({ "result": null })).await;
        let client = RpcLedgerClient::new(&config).unwrap();

        let signer = KeyPair::from_seed("grace").unwrap();
        let asset = AssetKeypair::generate().unwrap();
        let metadata = AssetMetadata::new("Wool rug", "ECO", "ipfs://rug").unwrap();
        let tx = CreateAssetTransaction::create(&signer, metadata, asset.address().clone())
            .unwrap();

        assert!(matches!(
            client.submit_create_asset(&tx).await,
            Err(SdkError::Rejected(_))
        ));
    }
}
