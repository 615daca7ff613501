//! # RPC Module
//!
//! Typed HTTP access to a Meridian node.
//!
//! ```text
//! types.rs  — JSON-RPC 2.0 envelope + REST request/response payloads
//! client.rs — reqwest-based RpcClient with timeout and error mapping
//! ```
//!
//! Reads go through plain REST endpoints; transaction submission uses the
//! JSON-RPC `tx_submit` envelope. All calls share one configurable timeout,
//! and node-side error codes map onto [`crate::error::SdkError`] variants so
//! callers match on variants rather than numeric codes.

pub mod client;
pub mod types;

pub use client::RpcClient;
pub use types::{
    AccountInfo, BlockInfo, HealthStatus, MempoolInfo, NetworkStatus, ProposalInfo, RpcError,
    RpcRequest, RpcResponse, SubmitResult, TxReceipt, ValidatorInfo,
};
