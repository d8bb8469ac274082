use crate::config::RelayConfig;
use crate::relay::{Relay, RelayHandle};
use crate::signaling::{SignalingService, ws_handler};
use anyhow::{Context, Result};
use axum::http::{HeaderValue, Method};
use axum::{Router, routing::get};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

/// Starts the relay event loop and returns the service that feeds it.
pub fn spawn_relay(config: &RelayConfig) -> SignalingService {
    let (relay_handle, command_rx) = RelayHandle::channel(config.command_buffer);
    let service = SignalingService::new(relay_handle, config.ice_servers.clone());

    let relay = Relay::new(command_rx, Arc::new(service.clone()));
    tokio::spawn(relay.run());

    service
}

pub fn router(service: SignalingService, config: &RelayConfig) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .layer(cors_layer(&config.allowed_origins))
        .with_state(service)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods([Method::GET, Method::POST]);

    if allowed_origins.is_empty() {
        return layer.allow_origin(AllowOrigin::any());
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}

pub async fn serve(config: RelayConfig) -> Result<()> {
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    serve_with_listener(listener, config).await
}

pub async fn serve_with_listener(listener: TcpListener, config: RelayConfig) -> Result<()> {
    if config.command_buffer == 0 {
        anyhow::bail!("command_buffer must be greater than zero");
    }

    let service = spawn_relay(&config);
    let app = router(service, &config);

    let addr = listener.local_addr().context("Listener has no local address")?;
    info!("Signaling relay listening on ws://{}/ws", addr);

    axum::serve(listener, app)
        .await
        .context("Signaling server stopped")?;
    Ok(())
}
