//! Ledger-client library for the WeShare REST façade.
//!
//! Provides everything the HTTP layer needs to reach a
//! Hyperledger-Fabric-style network: a file-system wallet of X.509
//! identities, a connection-profile loader, and a gateway client that
//! speaks JSON over HTTP to the organization's peer-gateway bridge.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod connector;
pub mod error;
pub mod gateway;
pub mod identity;
pub mod profile;
mod transport;
pub mod wallet;

pub use connector::{FabricConnector, LedgerConnector};
pub use error::FabricError;
pub use gateway::{Contract, Discovery, Gateway, Network, SessionId, TransactionPayload};
pub use identity::Identity;
pub use profile::{ConnectionProfile, Endpoint};
pub use wallet::Wallet;
