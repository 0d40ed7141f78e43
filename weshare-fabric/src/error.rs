//! Error types for the ledger-client crate.

/// Errors that can occur while using the wallet, the connection
/// profile, or the peer-gateway bridge.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FabricError {
    /// The named identity does not exist in the wallet.
    #[error("identity '{label}' does not exist in the wallet")]
    IdentityNotFound { label: String },

    /// A wallet record exists but cannot be used.
    #[error("invalid identity '{label}': {reason}")]
    InvalidIdentity { label: String, reason: String },

    /// The connection profile cannot be read, parsed, or resolved.
    #[error("connection profile: {0}")]
    Profile(String),

    /// The profile names a peer endpoint this client cannot speak to.
    #[error("unsupported peer endpoint '{url}': {reason}")]
    Endpoint { url: String, reason: String },

    /// A request to the peer-gateway bridge failed.
    #[error("bridge request failed: {0}")]
    Bridge(String),

    /// Underlying I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
