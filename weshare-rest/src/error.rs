//! Request-handling errors.
//!
//! The original façade reports every failure the same way: HTTP 200
//! with `{"success":"false"}` and the real cause only in the log. The
//! typed variants exist so the log can tell wallet, profile, and
//! bridge failures apart; callers never see the distinction.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use weshare_fabric::FabricError;

/// Errors that can occur during façade request handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RestError {
    /// An error propagated from the ledger-client layer.
    #[error(transparent)]
    Fabric(#[from] FabricError),

    /// A required request field was absent.
    #[error("missing request field '{0}'")]
    MissingField(&'static str),
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        match &self {
            RestError::Fabric(FabricError::IdentityNotFound { .. }) => {
                tracing::warn!(error = %self, "request refused before any network I/O");
            }
            _ => tracing::error!(error = %self, "failed to invoke transaction"),
        }
        (StatusCode::OK, Json(json!({"success": "false"}))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(resp: Response) -> serde_json::Value {
        let bytes = match axum::body::to_bytes(resp.into_body(), 1024).await {
            Ok(b) => b,
            Err(e) => panic!("failed to read body: {e}"),
        };
        match serde_json::from_slice(&bytes) {
            Ok(v) => v,
            Err(e) => panic!("invalid JSON: {e}"),
        }
    }

    #[tokio::test]
    async fn every_variant_collapses_to_200_with_failure_flag() {
        let cases = [
            RestError::MissingField("userId"),
            RestError::Fabric(FabricError::IdentityNotFound {
                label: "user1".to_owned(),
            }),
            RestError::Fabric(FabricError::Bridge("peer unreachable".to_owned())),
        ];
        for err in cases {
            let resp = err.into_response();
            assert_eq!(resp.status(), StatusCode::OK, "errors must not change the status");
            let body = body_of(resp).await;
            assert_eq!(body, serde_json::json!({"success": "false"}));
        }
    }

    #[test]
    fn display_carries_the_field_name() {
        let err = RestError::MissingField("userArr");
        assert!(err.to_string().contains("userArr"));
    }
}
