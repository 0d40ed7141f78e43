//! Gateway sessions against the peer-gateway bridge.
//!
//! Mirrors the vendor-SDK object model: connect a [`Gateway`], get the
//! [`Network`] for a channel, get a [`Contract`] by name, submit or
//! evaluate a named transaction, disconnect. Each of connect, invoke,
//! and disconnect is its own one-shot HTTP exchange.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::FabricError;
use crate::identity::Identity;
use crate::profile::Endpoint;
use crate::transport;

/// Server-issued identifier for one gateway session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Returns the inner `Uuid`.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for SessionId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Service-discovery options passed at connect time.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Discovery {
    pub enabled: bool,
    #[serde(rename = "asLocalhost")]
    pub as_localhost: bool,
}

impl Default for Discovery {
    /// Discovery on, peer addresses taken as-is. This is the shape the
    /// façade always connects with.
    fn default() -> Self {
        Self {
            enabled: true,
            as_localhost: false,
        }
    }
}

#[derive(Serialize)]
struct ConnectRequest<'a> {
    #[serde(rename = "mspId")]
    msp_id: &'a str,
    certificate: &'a str,
    #[serde(rename = "privateKey")]
    private_key: &'a str,
    discovery: Discovery,
}

#[derive(Deserialize)]
struct ConnectResponse {
    session: Uuid,
}

#[derive(Serialize)]
struct InvokeRequest<'a> {
    session: Uuid,
    channel: &'a str,
    chaincode: &'a str,
    transaction: &'a str,
    args: &'a [String],
}

#[derive(Serialize)]
struct DisconnectRequest {
    session: Uuid,
}

/// Raw bytes returned by a chaincode transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionPayload(Vec<u8>);

impl TransactionPayload {
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The payload as a JSON value: parsed when the chaincode returned
    /// a JSON document, otherwise the bytes as a JSON string.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::from_slice(&self.0).unwrap_or_else(|_| {
            serde_json::Value::String(String::from_utf8_lossy(&self.0).into_owned())
        })
    }
}

/// An open session against the bridge.
///
/// Dropping a `Gateway` does not close the session; call
/// [`Gateway::disconnect`]. A session abandoned without disconnecting
/// expires on the bridge side.
#[derive(Debug)]
pub struct Gateway {
    endpoint: Endpoint,
    session: SessionId,
    connected_at: DateTime<Utc>,
}

impl Gateway {
    /// Open a session, authenticating with the given identity.
    ///
    /// # Errors
    /// Returns [`FabricError::Bridge`] when the bridge is unreachable,
    /// rejects the identity, or answers with something other than a
    /// session id.
    pub async fn connect(
        endpoint: &Endpoint,
        identity: &Identity,
        discovery: Discovery,
    ) -> Result<Self, FabricError> {
        let body = serde_json::to_string(&ConnectRequest {
            msp_id: &identity.msp_id,
            certificate: &identity.credentials.certificate,
            private_key: &identity.credentials.private_key,
            discovery,
        })
        .map_err(|e| FabricError::Bridge(format!("encode connect request: {e}")))?;

        let raw = transport::post_json(endpoint, "/gateway/v1/connect", body).await?;
        let resp: ConnectResponse = serde_json::from_slice(&raw)
            .map_err(|e| FabricError::Bridge(format!("decode connect response: {e}")))?;

        let session = SessionId(resp.session);
        tracing::debug!(
            %session,
            endpoint = %endpoint,
            identity = %identity.fingerprint(),
            "gateway connected"
        );
        Ok(Self {
            endpoint: endpoint.clone(),
            session,
            connected_at: Utc::now(),
        })
    }

    #[must_use]
    pub fn session(&self) -> SessionId {
        self.session
    }

    /// When the session was opened.
    #[must_use]
    pub fn connected_at(&self) -> DateTime<Utc> {
        self.connected_at
    }

    /// Handle to the named channel. No I/O; discovery already ran at
    /// connect time.
    #[must_use]
    pub fn network(&self, channel: impl Into<String>) -> Network<'_> {
        Network {
            gateway: self,
            channel: channel.into(),
        }
    }

    /// Close the session.
    ///
    /// # Errors
    /// Returns [`FabricError::Bridge`] when the bridge cannot be told.
    pub async fn disconnect(self) -> Result<(), FabricError> {
        let body = serde_json::to_string(&DisconnectRequest {
            session: self.session.0,
        })
        .map_err(|e| FabricError::Bridge(format!("encode disconnect request: {e}")))?;
        transport::post_json(&self.endpoint, "/gateway/v1/disconnect", body).await?;
        tracing::debug!(session = %self.session, "gateway disconnected");
        Ok(())
    }
}

/// A channel of the ledger, scoped to one gateway session.
#[derive(Debug)]
pub struct Network<'a> {
    gateway: &'a Gateway,
    channel: String,
}

impl Network<'_> {
    /// Handle to the named chaincode on this channel. No I/O.
    #[must_use]
    pub fn contract(&self, name: impl Into<String>) -> Contract<'_> {
        Contract {
            network: self,
            name: name.into(),
        }
    }
}

/// A deployed chaincode exposing named transactions.
#[derive(Debug)]
pub struct Contract<'a> {
    network: &'a Network<'a>,
    name: String,
}

impl Contract<'_> {
    /// Submit a transaction for ordering and commit.
    ///
    /// # Errors
    /// Returns [`FabricError::Bridge`] on any transport or chaincode
    /// failure.
    pub async fn submit_transaction(
        &self,
        transaction: &str,
        args: &[String],
    ) -> Result<TransactionPayload, FabricError> {
        self.invoke("/gateway/v1/submit", transaction, args).await
    }

    /// Evaluate a transaction on a single peer without committing.
    ///
    /// # Errors
    /// Returns [`FabricError::Bridge`] on any transport or chaincode
    /// failure.
    pub async fn evaluate_transaction(
        &self,
        transaction: &str,
        args: &[String],
    ) -> Result<TransactionPayload, FabricError> {
        self.invoke("/gateway/v1/evaluate", transaction, args).await
    }

    async fn invoke(
        &self,
        uri_path: &str,
        transaction: &str,
        args: &[String],
    ) -> Result<TransactionPayload, FabricError> {
        let gateway = self.network.gateway;
        let body = serde_json::to_string(&InvokeRequest {
            session: gateway.session.0,
            channel: &self.network.channel,
            chaincode: &self.name,
            transaction,
            args,
        })
        .map_err(|e| FabricError::Bridge(format!("encode invoke request: {e}")))?;

        tracing::debug!(
            session = %gateway.session,
            channel = %self.network.channel,
            chaincode = %self.name,
            %transaction,
            "invoking transaction"
        );
        let raw = transport::post_json(&gateway.endpoint, uri_path, body).await?;
        Ok(TransactionPayload::new(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_request_uses_camel_case_wire_names() {
        let req = ConnectRequest {
            msp_id: "Org1MSP",
            certificate: "CERT",
            private_key: "KEY",
            discovery: Discovery::default(),
        };
        let json = match serde_json::to_string(&req) {
            Ok(s) => s,
            Err(e) => panic!("serialization failed: {e}"),
        };
        assert!(json.contains("\"mspId\":\"Org1MSP\""));
        assert!(json.contains("\"privateKey\":\"KEY\""));
        assert!(json.contains("\"enabled\":true"));
        assert!(json.contains("\"asLocalhost\":false"));
    }

    #[test]
    fn invoke_request_carries_args_in_order() {
        let session = Uuid::nil();
        let args = vec!["bob".to_owned(), "42".to_owned()];
        let req = InvokeRequest {
            session,
            channel: "mychannel",
            chaincode: "mycc",
            transaction: "shopping",
            args: &args,
        };
        let json = match serde_json::to_string(&req) {
            Ok(s) => s,
            Err(e) => panic!("serialization failed: {e}"),
        };
        assert!(json.contains("\"transaction\":\"shopping\""));
        assert!(json.contains("\"args\":[\"bob\",\"42\"]"));
    }

    #[test]
    fn payload_parses_json_or_wraps_as_string() {
        let json = TransactionPayload::new(br#"{"balance":"100"}"#.to_vec());
        assert_eq!(
            json.to_json_value(),
            serde_json::json!({"balance": "100"})
        );

        let plain = TransactionPayload::new(b"72 units moved".to_vec());
        assert_eq!(
            plain.to_json_value(),
            serde_json::Value::String("72 units moved".to_owned())
        );

        assert!(TransactionPayload::new(Vec::new()).is_empty());
    }

    #[test]
    fn session_id_displays_as_uuid() {
        let id = SessionId::from(Uuid::nil());
        assert_eq!(id.to_string(), "00000000-0000-0000-0000-000000000000");
    }
}
