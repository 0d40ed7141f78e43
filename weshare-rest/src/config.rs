//! Environment-derived configuration.
//!
//! Every knob has the fixed value of the original deployment as its
//! default, so an empty environment reproduces the documented surface:
//! port 8083, `weshare/connection-org1.json`, a `wallet/` directory,
//! channel `mychannel`, chaincode `mycc`.

use std::path::PathBuf;

/// Runtime configuration for the façade.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to listen on (`WESHARE_LISTEN_ADDR`).
    pub listen_addr: String,
    /// Connection-profile path (`WESHARE_CONNECTION_PROFILE`).
    pub connection_profile: PathBuf,
    /// Wallet directory (`WESHARE_WALLET_DIR`).
    pub wallet_dir: PathBuf,
    /// Channel the chaincode is deployed to (`WESHARE_CHANNEL`).
    pub channel: String,
    /// Chaincode name (`WESHARE_CHAINCODE`).
    pub chaincode: String,
    /// Label whose wallet presence gates every request
    /// (`WESHARE_ENROLLMENT_ID`).
    pub enrollment_id: String,
    /// Label used to authenticate the gateway connection
    /// (`WESHARE_GATEWAY_IDENTITY`).
    pub gateway_identity: String,
}

impl Config {
    /// Load from `WESHARE_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_owned());
        Self {
            listen_addr: var("WESHARE_LISTEN_ADDR", "127.0.0.1:8083"),
            connection_profile: PathBuf::from(var(
                "WESHARE_CONNECTION_PROFILE",
                "weshare/connection-org1.json",
            )),
            wallet_dir: PathBuf::from(var("WESHARE_WALLET_DIR", "wallet")),
            channel: var("WESHARE_CHANNEL", "mychannel"),
            chaincode: var("WESHARE_CHAINCODE", "mycc"),
            enrollment_id: var("WESHARE_ENROLLMENT_ID", "user1"),
            gateway_identity: var("WESHARE_GATEWAY_IDENTITY", "admin"),
        }
    }
}
