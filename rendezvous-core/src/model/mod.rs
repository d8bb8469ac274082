mod connection;
mod identity;
mod room;
mod signaling;

pub use connection::ConnectionId;
pub use identity::ParticipantIdentity;
pub use room::RoomId;
pub use signaling::{ClientMessage, IceServerConfig, ServerMessage};
