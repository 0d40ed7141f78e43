//! Axum route handlers for the WeShare façade.
//!
//! Each ledger endpoint forwards one named chaincode transaction; the
//! transaction names are fixed by the deployed contract.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use weshare_fabric::{LedgerConnector, TransactionPayload};

use crate::error::RestError;

// ── Shared state ─────────────────────────────────────────────────────────────

type Connector = Arc<dyn LedgerConnector>;

// ── Request types ─────────────────────────────────────────────────────────────

// Fields are optional at the serde level: a missing field is a handled
// failure (the marker body), never a 422.

#[derive(Debug, Deserialize)]
pub struct QueryParams {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InitUserBody {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompleteShareBody {
    #[serde(rename = "userArr")]
    pub user_arr: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct ShoppingBody {
    #[serde(rename = "shoppingArr")]
    pub shopping_arr: Option<Vec<String>>,
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router over the given connector.
pub fn create_router(connector: Connector) -> Router {
    Router::new()
        .route("/query", get(query))
        .route("/initUser", post(init_user))
        .route("/completeShare", post(complete_share))
        .route("/shopping", post(shopping))
        .route("/health", get(health))
        .with_state(connector)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /health` — liveness probe; no ledger I/O.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// `GET /query?userId=..` — evaluate the `query` transaction and
/// return its payload.
///
/// # Errors
/// Every failure is reported as HTTP 200 with `{"success":"false"}`.
pub async fn query(
    State(connector): State<Connector>,
    Query(params): Query<QueryParams>,
) -> Result<Json<Value>, RestError> {
    let user_id = params.user_id.ok_or(RestError::MissingField("userId"))?;
    let payload = connector.evaluate("query", &[user_id]).await?;
    Ok(Json(payload.to_json_value()))
}

/// `POST /initUser` — submit the `initUser` transaction.
///
/// # Errors
/// Every failure is reported as HTTP 200 with `{"success":"false"}`.
pub async fn init_user(
    State(connector): State<Connector>,
    Json(body): Json<InitUserBody>,
) -> Result<Json<Value>, RestError> {
    let args = [body.user_id.ok_or(RestError::MissingField("userId"))?];
    connector.submit("initUser", &args).await?;
    tracing::info!(user_id = %args[0], "initUser transaction has been submitted");
    Ok(Json(json!({"success": "true"})))
}

/// `POST /completeShare` — submit `completeShare` with the sharer and
/// listener ids spread as arguments.
///
/// # Errors
/// Every failure is reported as HTTP 200 with `{"success":"false"}`.
pub async fn complete_share(
    State(connector): State<Connector>,
    Json(body): Json<CompleteShareBody>,
) -> Result<Json<Value>, RestError> {
    let args = body.user_arr.ok_or(RestError::MissingField("userArr"))?;
    let payload = connector.submit("completeShare", &args).await?;
    tracing::info!(participants = args.len(), "completeShare transaction has been submitted");
    Ok(Json(success_with_payload(&payload)))
}

/// `POST /shopping` — submit `shopping` with the user id and amount
/// spread as arguments.
///
/// # Errors
/// Every failure is reported as HTTP 200 with `{"success":"false"}`.
pub async fn shopping(
    State(connector): State<Connector>,
    Json(body): Json<ShoppingBody>,
) -> Result<Json<Value>, RestError> {
    let args = body
        .shopping_arr
        .ok_or(RestError::MissingField("shoppingArr"))?;
    let payload = connector.submit("shopping", &args).await?;
    tracing::info!("shopping transaction has been submitted");
    Ok(Json(success_with_payload(&payload)))
}

fn success_with_payload(payload: &TransactionPayload) -> Value {
    if payload.is_empty() {
        json!({"success": "true"})
    } else {
        json!({"success": "true", "payload": payload.to_json_value()})
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request};
    use tower::ServiceExt;
    use weshare_fabric::FabricError;

    enum Mode {
        Payload(&'static [u8]),
        MissingIdentity,
        BridgeDown,
    }

    struct MockConnector {
        mode: Mode,
    }

    impl MockConnector {
        fn result(&self) -> Result<TransactionPayload, FabricError> {
            match &self.mode {
                Mode::Payload(bytes) => Ok(TransactionPayload::new(bytes.to_vec())),
                Mode::MissingIdentity => Err(FabricError::IdentityNotFound {
                    label: "user1".to_owned(),
                }),
                Mode::BridgeDown => Err(FabricError::Bridge("peer unreachable".to_owned())),
            }
        }
    }

    #[async_trait]
    impl LedgerConnector for MockConnector {
        async fn submit(
            &self,
            _transaction: &str,
            _args: &[String],
        ) -> Result<TransactionPayload, FabricError> {
            self.result()
        }

        async fn evaluate(
            &self,
            _transaction: &str,
            _args: &[String],
        ) -> Result<TransactionPayload, FabricError> {
            self.result()
        }
    }

    fn app(mode: Mode) -> Router {
        create_router(Arc::new(MockConnector { mode }))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        match Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
        {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        }
    }

    async fn body_of(resp: axum::response::Response) -> Value {
        let bytes = match axum::body::to_bytes(resp.into_body(), 64 * 1024).await {
            Ok(b) => b,
            Err(e) => panic!("failed to read body: {e}"),
        };
        match serde_json::from_slice(&bytes) {
            Ok(v) => v,
            Err(e) => panic!("invalid JSON: {e}"),
        }
    }

    #[tokio::test]
    async fn health_reports_ok_without_ledger_io() {
        let app = app(Mode::BridgeDown);
        let req = match Request::builder().uri("/health").body(Body::empty()) {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        };
        let resp = match app.oneshot(req).await {
            Ok(r) => r,
            Err(e) => panic!("handler error: {e}"),
        };
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_of(resp).await["status"], "ok");
    }

    #[tokio::test]
    async fn query_returns_the_transaction_payload() {
        let app = app(Mode::Payload(br#"{"userId":"bob","balance":"100"}"#));
        let req = match Request::builder().uri("/query?userId=bob").body(Body::empty()) {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        };
        let resp = match app.oneshot(req).await {
            Ok(r) => r,
            Err(e) => panic!("handler error: {e}"),
        };
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            body_of(resp).await,
            json!({"userId": "bob", "balance": "100"})
        );
    }

    #[tokio::test]
    async fn query_without_user_id_reports_failure() {
        let app = app(Mode::Payload(b"{}"));
        let req = match Request::builder().uri("/query").body(Body::empty()) {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        };
        let resp = match app.oneshot(req).await {
            Ok(r) => r,
            Err(e) => panic!("handler error: {e}"),
        };
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_of(resp).await, json!({"success": "false"}));
    }

    #[tokio::test]
    async fn init_user_success_emits_the_string_flag() {
        let app = app(Mode::Payload(b""));
        let resp = match app
            .oneshot(post_json("/initUser", r#"{"userId":"alice"}"#))
            .await
        {
            Ok(r) => r,
            Err(e) => panic!("handler error: {e}"),
        };
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_of(resp).await, json!({"success": "true"}));
    }

    #[tokio::test]
    async fn missing_identity_collapses_to_the_failure_marker() {
        let app = app(Mode::MissingIdentity);
        let resp = match app
            .oneshot(post_json("/initUser", r#"{"userId":"alice"}"#))
            .await
        {
            Ok(r) => r,
            Err(e) => panic!("handler error: {e}"),
        };
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_of(resp).await, json!({"success": "false"}));
    }

    #[tokio::test]
    async fn complete_share_attaches_a_non_empty_payload() {
        let app = app(Mode::Payload(br#"{"shared":"3"}"#));
        let resp = match app
            .oneshot(post_json(
                "/completeShare",
                r#"{"userArr":["alice","bob","carol"]}"#,
            ))
            .await
        {
            Ok(r) => r,
            Err(e) => panic!("handler error: {e}"),
        };
        assert_eq!(
            body_of(resp).await,
            json!({"success": "true", "payload": {"shared": "3"}})
        );
    }

    #[tokio::test]
    async fn shopping_with_empty_payload_omits_the_payload_key() {
        let app = app(Mode::Payload(b""));
        let resp = match app
            .oneshot(post_json("/shopping", r#"{"shoppingArr":["bob","42"]}"#))
            .await
        {
            Ok(r) => r,
            Err(e) => panic!("handler error: {e}"),
        };
        assert_eq!(body_of(resp).await, json!({"success": "true"}));
    }

    #[tokio::test]
    async fn bridge_failure_reports_the_failure_marker_not_a_5xx() {
        let app = app(Mode::BridgeDown);
        let resp = match app
            .oneshot(post_json("/shopping", r#"{"shoppingArr":["bob","42"]}"#))
            .await
        {
            Ok(r) => r,
            Err(e) => panic!("handler error: {e}"),
        };
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_of(resp).await, json!({"success": "false"}));
    }

    #[tokio::test]
    async fn missing_body_field_reports_failure_not_422() {
        let app = app(Mode::Payload(b""));
        let resp = match app.oneshot(post_json("/completeShare", "{}")).await {
            Ok(r) => r,
            Err(e) => panic!("handler error: {e}"),
        };
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_of(resp).await, json!({"success": "false"}));
    }
}
