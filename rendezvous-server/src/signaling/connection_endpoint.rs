use rendezvous_core::{ConnectionId, ServerMessage};
use tokio::sync::mpsc;

/// One live transport session. The receiving half of the queue is drained by
/// the transport's send loop.
///
/// The queue is unbounded so the relay never waits on a slow peer; a peer that
/// stops reading without closing grows its queue until the socket drops.
#[derive(Debug, Clone)]
pub struct ConnectionEndpoint {
    id: ConnectionId,
    tx: mpsc::UnboundedSender<ServerMessage>,
}

impl ConnectionEndpoint {
    /// Allocates a fresh id and the outbound queue for it.
    pub fn open() -> (Self, mpsc::UnboundedReceiver<ServerMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let endpoint = Self {
            id: ConnectionId::new(),
            tx,
        };
        (endpoint, rx)
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Never blocks. Returns `false` once the transport has stopped reading.
    pub fn send(&self, msg: ServerMessage) -> bool {
        self.tx.send(msg).is_ok()
    }

    pub fn is_open(&self) -> bool {
        !self.tx.is_closed()
    }
}
