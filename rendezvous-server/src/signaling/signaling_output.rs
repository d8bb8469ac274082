use async_trait::async_trait;
use rendezvous_core::{ConnectionId, ServerMessage};

/// Outbound side of the relay: whatever owns the live connections implements
/// this so the relay can reach participants.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    /// Best-effort delivery. Returns `false` when `to` has no open endpoint,
    /// in which case the message is dropped.
    async fn deliver(&self, to: &ConnectionId, msg: ServerMessage) -> bool;
}
