//! Minimal one-shot HTTP client for the peer-gateway bridge.
//!
//! Every call opens a fresh TCP connection, performs a single HTTP/1.1
//! exchange, and drops the connection. The façade opens and closes a
//! gateway session per REST request, so there is nothing to pool.

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;

use crate::error::FabricError;
use crate::profile::Endpoint;

/// POST a JSON body to the bridge and return the raw response bytes.
///
/// # Errors
/// Returns [`FabricError::Bridge`] on connection failure, HTTP errors,
/// or a non-2xx response (the bridge puts its error message in the
/// body).
pub(crate) async fn post_json(
    endpoint: &Endpoint,
    uri_path: &str,
    body: String,
) -> Result<Vec<u8>, FabricError> {
    let authority = endpoint.authority();
    let stream = TcpStream::connect(&authority)
        .await
        .map_err(|e| FabricError::Bridge(format!("connect to {authority}: {e}")))?;

    let io = TokioIo::new(stream);

    let (mut sender, conn) = hyper::client::conn::http1::handshake(io)
        .await
        .map_err(|e| FabricError::Bridge(format!("HTTP handshake: {e}")))?;

    // Drive the connection in the background.
    tokio::spawn(async move {
        if let Err(e) = conn.await {
            tracing::debug!("bridge connection closed: {e}");
        }
    });

    let body_bytes = Bytes::from(body);
    let req = Request::builder()
        .method(Method::POST)
        .uri(uri_path)
        .header("Host", authority.clone())
        .header("Content-Type", "application/json")
        .header("Content-Length", body_bytes.len().to_string())
        .body(Full::new(body_bytes))
        .map_err(|e| FabricError::Bridge(format!("build request: {e}")))?;

    let resp: Response<_> = sender
        .send_request(req)
        .await
        .map_err(|e| FabricError::Bridge(format!("send request: {e}")))?;

    let status = resp.status();
    let resp_bytes = resp
        .into_body()
        .collect()
        .await
        .map_err(|e| FabricError::Bridge(format!("read response body: {e}")))?
        .to_bytes();

    if !status.is_success() {
        let body_str = String::from_utf8_lossy(&resp_bytes);
        return Err(FabricError::Bridge(format!(
            "HTTP {status} from {uri_path}: {body_str}"
        )));
    }

    Ok(resp_bytes.to_vec())
}
