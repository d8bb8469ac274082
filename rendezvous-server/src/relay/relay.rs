use crate::relay::RelayCommand;
use crate::room::{IdentityIndex, RoomRegistry};
use crate::signaling::SignalingOutput;
use futures::future::join_all;
use rendezvous_core::{ClientMessage, ConnectionId, RoomId, ServerMessage};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// The signaling relay event loop.
///
/// Owns the room registry and the identity index; every mutation goes through
/// this single task, so concurrent joins from different connections are
/// applied one after another.
pub struct Relay {
    registry: RoomRegistry,
    identities: IdentityIndex,
    command_rx: mpsc::Receiver<RelayCommand>,
    signaling: Arc<dyn SignalingOutput>,
}

impl Relay {
    pub fn new(command_rx: mpsc::Receiver<RelayCommand>, signaling: Arc<dyn SignalingOutput>) -> Self {
        Self {
            registry: RoomRegistry::new(),
            identities: IdentityIndex::new(),
            command_rx,
            signaling,
        }
    }

    pub async fn run(mut self) {
        info!("Relay event loop started");

        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd).await;
        }

        info!("Command channel closed. Relay event loop finished");
    }

    async fn handle_command(&mut self, cmd: RelayCommand) {
        match cmd {
            RelayCommand::Inbound { from, message } => self.dispatch(from, message).await,

            RelayCommand::Disconnect { connection_id } => {
                self.handle_disconnect(connection_id).await;
            }

            RelayCommand::Members { room, reply } => {
                let _ = reply.send(self.registry.members(&room));
            }

            RelayCommand::Resolve { identity, reply } => {
                let _ = reply.send(self.identities.lookup_by_identity(&identity));
            }
        }
    }

    async fn dispatch(&mut self, from: ConnectionId, message: ClientMessage) {
        match message {
            ClientMessage::RoomJoin { email, room, extra } => {
                info!("{} joins room '{}' as {}", from, room, email);

                let previous = self.identities.set_mapping(email.clone(), from);
                let added = self.registry.join(room.clone(), from);

                // A renamed connection is re-announced in every room it is in.
                let renamed = previous.as_ref() != Some(&email);
                let announce_in = match previous {
                    Some(_) if renamed => self.registry.rooms_of(&from),
                    _ if added || renamed => vec![room.clone()],
                    _ => Vec::new(),
                };
                for target in &announce_in {
                    let joined = ServerMessage::UserJoined {
                        email: email.clone(),
                        id: from,
                    };
                    self.broadcast(target, joined, Some(&from)).await;
                }

                self.unicast(&from, ServerMessage::RoomJoined { email, room, extra })
                    .await;
            }

            ClientMessage::RoomLeave { room } => {
                if self.registry.leave(&room, &from) {
                    info!("{} left room '{}'", from, room);
                    self.announce_departure(&room, from).await;
                }
            }

            ClientMessage::CallOffer { to, offer } => {
                self.unicast(&to, ServerMessage::IncomingCall { from, offer })
                    .await;
            }

            ClientMessage::CallAnswer { to, ans } => {
                self.unicast(&to, ServerMessage::CallAccepted { from, ans })
                    .await;
            }

            ClientMessage::NegotiationOffer { to, offer } => {
                self.unicast(&to, ServerMessage::NegotiationNeeded { from, offer })
                    .await;
            }

            ClientMessage::NegotiationAnswer { to, ans } => {
                self.unicast(&to, ServerMessage::NegotiationFinal { from, ans })
                    .await;
            }

            ClientMessage::IceCandidate { to, candidate } => {
                self.unicast(&to, ServerMessage::IceCandidate { from, candidate })
                    .await;
            }
        }
    }

    async fn handle_disconnect(&mut self, connection_id: ConnectionId) {
        let rooms = self.registry.leave_all(&connection_id);

        for room in &rooms {
            self.announce_departure(room, connection_id).await;
        }

        let identity = self.identities.remove_by_connection(&connection_id);
        info!(
            "Reclaimed {} (identity: {:?}, rooms left: {}, rooms open: {})",
            connection_id,
            identity,
            rooms.len(),
            self.registry.room_count()
        );
    }

    /// Must run before the identity entry for `id` is removed.
    async fn announce_departure(&self, room: &RoomId, id: ConnectionId) {
        let email = self.identities.lookup_by_connection(&id).cloned();
        self.broadcast(room, ServerMessage::UserLeft { email, id }, None)
            .await;
    }

    async fn unicast(&self, to: &ConnectionId, msg: ServerMessage) {
        let kind = msg.kind();
        if self.signaling.deliver(to, msg).await {
            debug!("Routed '{}' to {}", kind, to);
        } else {
            debug!("Dropped '{}' for unknown addressee {}", kind, to);
        }
    }

    async fn broadcast(&self, room: &RoomId, msg: ServerMessage, exclude: Option<&ConnectionId>) {
        let members: Vec<ConnectionId> = self
            .registry
            .members(room)
            .into_iter()
            .filter(|member| Some(member) != exclude)
            .collect();

        debug!(
            "Broadcasting '{}' to {} member(s) of '{}'",
            msg.kind(),
            members.len(),
            room
        );

        join_all(
            members
                .iter()
                .map(|member| self.signaling.deliver(member, msg.clone())),
        )
        .await;
    }
}
