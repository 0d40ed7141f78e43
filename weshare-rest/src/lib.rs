//! HTTP façade for the WeShare ledger application.
//!
//! Four REST endpoints, each forwarding one named chaincode
//! transaction to the ledger network through `weshare-fabric`.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod routes;
