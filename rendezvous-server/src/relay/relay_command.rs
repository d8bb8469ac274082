use rendezvous_core::{ClientMessage, ConnectionId, ParticipantIdentity, RoomId};
use tokio::sync::oneshot;

/// Commands consumed by the relay event loop.
#[derive(Debug)]
pub enum RelayCommand {
    /// A decoded frame arrived on `from`.
    Inbound {
        from: ConnectionId,
        message: ClientMessage,
    },

    /// Transport for this connection is gone.
    Disconnect { connection_id: ConnectionId },

    Members {
        room: RoomId,
        reply: oneshot::Sender<Vec<ConnectionId>>,
    },

    Resolve {
        identity: ParticipantIdentity,
        reply: oneshot::Sender<Option<ConnectionId>>,
    },
}
