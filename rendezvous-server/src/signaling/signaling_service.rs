use crate::error::RelayError;
use crate::relay::RelayHandle;
use crate::signaling::{ConnectionEndpoint, SignalingOutput};
use async_trait::async_trait;
use dashmap::DashMap;
use rendezvous_core::{ClientMessage, ConnectionId, IceServerConfig, ServerMessage};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

struct SignalingInner {
    endpoints: DashMap<ConnectionId, ConnectionEndpoint>,
    ice_servers: Vec<IceServerConfig>,
}

/// Directory of open connection endpoints plus the handle used to feed the
/// relay. Cheap to clone.
#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
    relay: RelayHandle,
}

impl SignalingService {
    pub fn new(relay: RelayHandle, ice_servers: Vec<IceServerConfig>) -> Self {
        Self {
            inner: Arc::new(SignalingInner {
                endpoints: DashMap::new(),
                ice_servers,
            }),
            relay,
        }
    }

    pub fn relay(&self) -> &RelayHandle {
        &self.relay
    }

    pub fn get_ice_servers(&self) -> Vec<IceServerConfig> {
        self.inner.ice_servers.clone()
    }

    /// Registers a new endpoint and queues its `welcome` frame.
    pub fn open(&self) -> (ConnectionId, mpsc::UnboundedReceiver<ServerMessage>) {
        let (endpoint, rx) = ConnectionEndpoint::open();
        let id = endpoint.id();

        endpoint.send(ServerMessage::Welcome {
            id,
            ice_servers: self.get_ice_servers(),
        });
        self.inner.endpoints.insert(id, endpoint);

        info!("Connection opened: {}", id);
        (id, rx)
    }

    /// Forwards a frame received on `from` to the relay.
    pub async fn submit(&self, from: ConnectionId, message: ClientMessage) -> Result<(), RelayError> {
        self.relay.submit(from, message).await
    }

    /// Drops the endpoint and lets the relay reclaim its rooms and identity.
    pub async fn close(&self, id: &ConnectionId) {
        if self.inner.endpoints.remove(id).is_none() {
            return;
        }
        info!("Connection closed: {}", id);

        if self.relay.disconnect(*id).await.is_err() {
            debug!("Relay already stopped, skipping cleanup for {}", id);
        }
    }

    pub fn is_open(&self, id: &ConnectionId) -> bool {
        self.inner
            .endpoints
            .get(id)
            .is_some_and(|endpoint| endpoint.is_open())
    }

    pub fn connection_count(&self) -> usize {
        self.inner.endpoints.len()
    }
}

#[async_trait]
impl SignalingOutput for SignalingService {
    async fn deliver(&self, to: &ConnectionId, msg: ServerMessage) -> bool {
        let delivered = self
            .inner
            .endpoints
            .get(to)
            .is_some_and(|endpoint| endpoint.send(msg));

        if !delivered {
            debug!("Dropping message for closed connection {}", to);
        }
        delivered
    }
}
