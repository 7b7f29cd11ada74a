pub mod jsonrpc;
pub mod ledger;
pub mod memory;
pub mod rpc;

// Re-export commonly used items
pub use jsonrpc::{JsonRpcHttpTransport, JsonRpcRequest, JsonRpcResponse};
pub use ledger::LedgerClient;
pub use memory::InMemoryLedger;
pub use rpc::RpcLedgerClient;
