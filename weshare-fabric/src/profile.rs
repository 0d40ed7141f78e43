//! Connection-profile document and gateway endpoint resolution.
//!
//! The profile is the usual Fabric connection JSON: a client section
//! naming the organization, organizations mapping to their peer names,
//! and a peers section with the addresses. The gateway endpoint is the
//! URL of the first listed peer of the client organization, so map
//! ordering is preserved as declared in the file.

use std::fmt;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::FabricError;

/// Parsed connection-profile document.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    pub client: ClientSection,
    pub organizations: IndexMap<String, Organization>,
    pub peers: IndexMap<String, Peer>,
}

/// The `client` section: which organization this process belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSection {
    pub organization: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Organization {
    pub mspid: String,
    #[serde(default)]
    pub peers: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Peer {
    pub url: String,
}

impl ConnectionProfile {
    /// Load and parse a profile file.
    ///
    /// # Errors
    /// Returns [`FabricError::Profile`] when the file cannot be read or
    /// is not a valid profile document.
    pub fn load(path: &Path) -> Result<Self, FabricError> {
        let raw = fs::read_to_string(path)
            .map_err(|e| FabricError::Profile(format!("{}: {e}", path.display())))?;
        Self::from_json(&raw)
            .map_err(|e| FabricError::Profile(format!("{}: {e}", path.display())))
    }

    /// Parse a profile from its JSON text.
    ///
    /// # Errors
    /// Returns the underlying JSON error on malformed input.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Resolve the gateway endpoint: the first listed peer of the
    /// client organization.
    ///
    /// # Errors
    /// Returns [`FabricError::Profile`] when the organization or peer
    /// references dangle, or [`FabricError::Endpoint`] when the peer
    /// URL is not plain HTTP.
    pub fn gateway_endpoint(&self) -> Result<Endpoint, FabricError> {
        let org_name = &self.client.organization;
        let org = self.organizations.get(org_name).ok_or_else(|| {
            FabricError::Profile(format!(
                "client organization '{org_name}' is not listed under organizations"
            ))
        })?;
        let peer_name = org.peers.first().ok_or_else(|| {
            FabricError::Profile(format!("organization '{org_name}' lists no peers"))
        })?;
        let peer = self.peers.get(peer_name).ok_or_else(|| {
            FabricError::Profile(format!("peer '{peer_name}' is not defined under peers"))
        })?;
        Endpoint::parse(&peer.url)
    }

    /// MSP id of the client organization, when it resolves.
    #[must_use]
    pub fn client_msp_id(&self) -> Option<&str> {
        self.organizations
            .get(&self.client.organization)
            .map(|org| org.mspid.as_str())
    }
}

/// A resolved peer-gateway bridge address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    host: String,
    port: u16,
}

impl Endpoint {
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Parse an `http://host:port` URL.
    ///
    /// Only plain HTTP is accepted; the bridge terminates TLS and the
    /// ledger's native protocol on its far side.
    ///
    /// # Errors
    /// Returns [`FabricError::Endpoint`] for any other scheme or a
    /// malformed authority.
    pub fn parse(url: &str) -> Result<Self, FabricError> {
        let reject = |reason: &str| FabricError::Endpoint {
            url: url.to_owned(),
            reason: reason.to_owned(),
        };

        let rest = url
            .strip_prefix("http://")
            .ok_or_else(|| reject("only http:// URLs are supported"))?;
        let rest = rest.strip_suffix('/').unwrap_or(rest);
        if rest.is_empty() || rest.contains('/') {
            return Err(reject("expected http://host:port with no path"));
        }

        let (host, port) = match rest.rsplit_once(':') {
            Some((host, port)) => {
                let port = port
                    .parse::<u16>()
                    .map_err(|_| reject("invalid port number"))?;
                (host, port)
            }
            None => (rest, 80),
        };
        if host.is_empty() {
            return Err(reject("missing host"));
        }
        Ok(Self::new(host, port))
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// `host:port`, used for both TCP connect and the `Host` header.
    #[must_use]
    pub fn authority(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
