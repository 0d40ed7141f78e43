//! The seam between the HTTP façade and the ledger.
//!
//! [`LedgerConnector`] is what route handlers depend on;
//! [`FabricConnector`] is the production implementation running the
//! full per-request sequence: wallet check, connect, resolve channel
//! and contract, invoke, disconnect.

use async_trait::async_trait;

use crate::error::FabricError;
use crate::gateway::{Discovery, Gateway, TransactionPayload};
use crate::profile::Endpoint;
use crate::wallet::Wallet;

/// How a transaction reaches the ledger.
#[async_trait]
pub trait LedgerConnector: Send + Sync {
    /// Submit a named transaction for ordering and commit.
    async fn submit(
        &self,
        transaction: &str,
        args: &[String],
    ) -> Result<TransactionPayload, FabricError>;

    /// Evaluate a named transaction on a single peer, read-only.
    async fn evaluate(
        &self,
        transaction: &str,
        args: &[String],
    ) -> Result<TransactionPayload, FabricError>;
}

#[derive(Debug, Clone, Copy)]
enum Invocation {
    Submit,
    Evaluate,
}

/// Production connector: one wallet check, one gateway session, one
/// invocation per call. No state is shared between calls.
#[derive(Debug, Clone)]
pub struct FabricConnector {
    wallet: Wallet,
    endpoint: Endpoint,
    channel: String,
    chaincode: String,
    enrollment_id: String,
    gateway_identity: String,
}

impl FabricConnector {
    /// Create a connector bound to one wallet, bridge endpoint,
    /// channel, and chaincode.
    ///
    /// `enrollment_id` is the label whose presence gates every request;
    /// `gateway_identity` is the label used to authenticate the
    /// connection itself.
    #[must_use]
    pub fn new(
        wallet: Wallet,
        endpoint: Endpoint,
        channel: impl Into<String>,
        chaincode: impl Into<String>,
        enrollment_id: impl Into<String>,
        gateway_identity: impl Into<String>,
    ) -> Self {
        Self {
            wallet,
            endpoint,
            channel: channel.into(),
            chaincode: chaincode.into(),
            enrollment_id: enrollment_id.into(),
            gateway_identity: gateway_identity.into(),
        }
    }

    async fn invoke(
        &self,
        kind: Invocation,
        transaction: &str,
        args: &[String],
    ) -> Result<TransactionPayload, FabricError> {
        if !self.wallet.exists(&self.enrollment_id) {
            tracing::warn!(
                label = %self.enrollment_id,
                "identity does not exist in the wallet; run the register-user tool before retrying"
            );
            return Err(FabricError::IdentityNotFound {
                label: self.enrollment_id.clone(),
            });
        }

        let identity = self.wallet.get(&self.gateway_identity)?;
        let gateway = Gateway::connect(&self.endpoint, &identity, Discovery::default()).await?;
        let network = gateway.network(self.channel.clone());
        let contract = network.contract(self.chaincode.clone());

        let result = match kind {
            Invocation::Submit => contract.submit_transaction(transaction, args).await,
            Invocation::Evaluate => contract.evaluate_transaction(transaction, args).await,
        };

        // On failure the session is abandoned; the bridge expires it.
        let payload = result?;

        if let Err(e) = gateway.disconnect().await {
            tracing::debug!(error = %e, "disconnect after successful invocation failed");
        }
        Ok(payload)
    }
}

#[async_trait]
impl LedgerConnector for FabricConnector {
    async fn submit(
        &self,
        transaction: &str,
        args: &[String],
    ) -> Result<TransactionPayload, FabricError> {
        self.invoke(Invocation::Submit, transaction, args).await
    }

    async fn evaluate(
        &self,
        transaction: &str,
        args: &[String],
    ) -> Result<TransactionPayload, FabricError> {
        self.invoke(Invocation::Evaluate, transaction, args).await
    }
}
