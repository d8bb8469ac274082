use crate::error::RelayError;
use crate::relay::RelayCommand;
use rendezvous_core::{ClientMessage, ConnectionId, ParticipantIdentity, RoomId};
use tokio::sync::{mpsc, oneshot};

/// Sending side of the relay command queue.
#[derive(Debug, Clone)]
pub struct RelayHandle {
    tx: mpsc::Sender<RelayCommand>,
}

impl RelayHandle {
    /// A zero capacity is raised to one.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<RelayCommand>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }

    pub async fn submit(&self, from: ConnectionId, message: ClientMessage) -> Result<(), RelayError> {
        self.send(RelayCommand::Inbound { from, message }).await
    }

    pub async fn disconnect(&self, connection_id: ConnectionId) -> Result<(), RelayError> {
        self.send(RelayCommand::Disconnect { connection_id }).await
    }

    /// Current members of `room`; empty if the room does not exist.
    pub async fn members(&self, room: RoomId) -> Result<Vec<ConnectionId>, RelayError> {
        let (reply, rx) = oneshot::channel();
        self.send(RelayCommand::Members { room, reply }).await?;
        rx.await.map_err(|_| RelayError::Closed)
    }

    /// Connection currently mapped to `identity`.
    pub async fn resolve(
        &self,
        identity: ParticipantIdentity,
    ) -> Result<Option<ConnectionId>, RelayError> {
        let (reply, rx) = oneshot::channel();
        self.send(RelayCommand::Resolve { identity, reply }).await?;
        rx.await.map_err(|_| RelayError::Closed)
    }

    async fn send(&self, cmd: RelayCommand) -> Result<(), RelayError> {
        self.tx.send(cmd).await.map_err(|_| RelayError::Closed)
    }
}
