//! API Gateway Library
//!
//! REST/JSON front door that translates auth requests into calls against the
//! GraphQL identity service and forwards incident requests to the incident
//! module.

pub mod clients;
pub mod config;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod services;
pub mod state;

use std::net::SocketAddr;

use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Run the HTTP server with the given configuration.
pub async fn run_server(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Upstream clients are built once and shared read-only by every request
    let state = AppState::from_config(&config)?;
    info!(
        identity = %config.identity.endpoint,
        incidents = %config.incidents.endpoint,
        "Upstream clients configured"
    );

    // Build router
    let app = create_router(state).layer(TraceLayer::new_for_http());

    // Build address
    let addr: SocketAddr = config.server_addr().parse()?;
    info!("Gateway listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
