//! Entry point for the `weshare-rest` HTTP server.

use std::sync::Arc;

use tracing::info;
use weshare_fabric::{ConnectionProfile, FabricConnector, LedgerConnector, Wallet};
use weshare_rest::config::Config;
use weshare_rest::routes::create_router;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = Config::from_env();

    let profile = match ConnectionProfile::load(&config.connection_profile) {
        Ok(p) => p,
        Err(e) => {
            tracing::error!(
                path = %config.connection_profile.display(),
                error = %e,
                "failed to load connection profile"
            );
            std::process::exit(1);
        }
    };
    let endpoint = match profile.gateway_endpoint() {
        Ok(ep) => ep,
        Err(e) => {
            tracing::error!(error = %e, "failed to resolve gateway endpoint");
            std::process::exit(1);
        }
    };

    let connector: Arc<dyn LedgerConnector> = Arc::new(FabricConnector::new(
        Wallet::open(config.wallet_dir.clone()),
        endpoint.clone(),
        config.channel.clone(),
        config.chaincode.clone(),
        config.enrollment_id.clone(),
        config.gateway_identity.clone(),
    ));
    let app = create_router(connector);

    let listener = match tokio::net::TcpListener::bind(&config.listen_addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %config.listen_addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!(
        addr = %config.listen_addr,
        gateway = %endpoint,
        channel = %config.channel,
        chaincode = %config.chaincode,
        "weshare-rest listening"
    );

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
