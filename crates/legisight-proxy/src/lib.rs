//! Passthrough proxy for the Legistar matters API.
//!
//! The browser-facing dashboard never sees the Legistar read token. It calls
//! one of three whitelisted endpoints here, the proxy appends the token and
//! forwards the query, then relays the upstream JSON body unmodified.
//!
//! | Route                               | Upstream                                   |
//! |-------------------------------------|--------------------------------------------|
//! | `GET /proxy/matters`                | matters introduced in the last six months  |
//! | `GET /proxy/filtered-matters`       | matters matching `?filter=<odata expr>`    |
//! | `GET /proxy/matterhistory/{id}`     | history records of one matter              |
//!
//! Any upstream failure becomes a 500 with a fixed `{"error": ...}` body.
//! Nothing is cached or retried.

use std::time::Duration;

use anyhow::Context;
use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::get,
};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

pub mod clock;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod upstream;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::ProxyConfig;
pub use error::ApiError;
pub use state::AppState;
pub use upstream::{DateWindow, UpstreamClient, UpstreamError};

use routes::{filtered_matters_handler, healthz_handler, matter_history_handler, matters_handler};

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/healthz", get(healthz_handler))
        .route("/proxy/matters", get(matters_handler))
        .route("/proxy/filtered-matters", get(filtered_matters_handler))
        .route("/proxy/matterhistory/{matter_id}", get(matter_history_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until Ctrl-C or SIGTERM.
pub async fn serve(config: ProxyConfig) -> anyhow::Result<()> {
    info!(config = ?config, "starting proxy");
    let state = AppState::new(&config).context("building upstream client")?;
    let app = build_router(state);

    let address = config.address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("binding {address}"))?;
    info!("Proxy server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving proxy")?;

    info!("proxy shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
