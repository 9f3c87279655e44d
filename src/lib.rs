//! Staking wallet RPC client library.
//!
//! This crate provides a blocking Rust client for the JSON-RPC interface exposed by
//! staking wallet daemons. Every call is a single authenticated HTTP round trip that
//! decodes the daemon's response into a typed structure.

mod client;
mod error;
mod transport;
pub mod types;

pub use client::{Auth, Client, ClientBuilder};
pub use error::{Error, Result, RpcError};
pub use transport::{HttpResponse, MinreqTransport, Transport};
pub use types::{Info, Transaction, TransactionDetails, ValidateAddress, WalletConflict};

pub use jsonrpc;
