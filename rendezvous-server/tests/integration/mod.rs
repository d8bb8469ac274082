pub mod messaging_tests;

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::Level;

use rendezvous_server::{Relay, RelayConfig, RelayHandle, SignalingService, spawn_relay};

use crate::utils::{Delivery, MockSignalingOutput};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// A relay whose output is captured by a mock instead of real endpoints.
pub fn create_test_relay() -> (
    RelayHandle,
    MockSignalingOutput,
    mpsc::UnboundedReceiver<Delivery>,
) {
    let (handle, command_rx) = RelayHandle::channel(100);
    let (signaling, delivery_rx) = MockSignalingOutput::new();

    let relay = Relay::new(command_rx, Arc::new(signaling.clone()));

    tokio::spawn(async move {
        relay.run().await;
    });

    (handle, signaling, delivery_rx)
}

/// A relay wired to a real endpoint directory.
pub fn create_test_service() -> SignalingService {
    spawn_relay(&RelayConfig::default())
}
