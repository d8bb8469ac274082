use crate::error::ProtocolError;
use crate::model::{ConnectionId, ParticipantIdentity, RoomId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IceServerConfig {
    pub urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
}

impl IceServerConfig {
    pub fn stun(url: impl Into<String>) -> Self {
        Self {
            urls: vec![url.into()],
            username: None,
            credential: None,
        }
    }
}

/// Frames a participant sends to the relay.
///
/// Offer, answer and candidate payloads are kept as raw JSON and never
/// inspected. The sender is never part of the frame: the relay tags routed
/// messages with the id of the connection the frame arrived on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ClientMessage {
    #[serde(rename = "room:join")]
    RoomJoin {
        email: ParticipantIdentity,
        room: RoomId,
        /// Any additional fields, echoed back untouched in the join confirmation.
        #[serde(flatten)]
        extra: Map<String, Value>,
    },

    #[serde(rename = "room:leave")]
    RoomLeave { room: RoomId },

    #[serde(rename = "user:call")]
    CallOffer { to: ConnectionId, offer: Value },

    #[serde(rename = "call:accepted")]
    CallAnswer { to: ConnectionId, ans: Value },

    #[serde(rename = "peer:nego:needed")]
    NegotiationOffer { to: ConnectionId, offer: Value },

    #[serde(rename = "peer:nego:done")]
    NegotiationAnswer { to: ConnectionId, ans: Value },

    #[serde(rename = "ice-candidate")]
    IceCandidate { to: ConnectionId, candidate: Value },
}

impl ClientMessage {
    pub fn decode(text: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn encode(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::RoomJoin { .. } => "room:join",
            Self::RoomLeave { .. } => "room:leave",
            Self::CallOffer { .. } => "user:call",
            Self::CallAnswer { .. } => "call:accepted",
            Self::NegotiationOffer { .. } => "peer:nego:needed",
            Self::NegotiationAnswer { .. } => "peer:nego:done",
            Self::IceCandidate { .. } => "ice-candidate",
        }
    }

    /// Addressee of a peer-to-peer frame; `None` for room-scoped kinds.
    pub fn addressee(&self) -> Option<&ConnectionId> {
        match self {
            Self::RoomJoin { .. } | Self::RoomLeave { .. } => None,
            Self::CallOffer { to, .. }
            | Self::CallAnswer { to, .. }
            | Self::NegotiationOffer { to, .. }
            | Self::NegotiationAnswer { to, .. }
            | Self::IceCandidate { to, .. } => Some(to),
        }
    }
}

/// Frames the relay emits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ServerMessage {
    /// First frame on every connection.
    #[serde(rename = "welcome")]
    Welcome {
        id: ConnectionId,
        #[serde(rename = "iceServers")]
        ice_servers: Vec<IceServerConfig>,
    },

    #[serde(rename = "user:joined")]
    UserJoined {
        email: ParticipantIdentity,
        id: ConnectionId,
    },

    #[serde(rename = "user:left")]
    UserLeft {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        email: Option<ParticipantIdentity>,
        id: ConnectionId,
    },

    /// Echo of the joiner's own `room:join` payload.
    #[serde(rename = "room:join")]
    RoomJoined {
        email: ParticipantIdentity,
        room: RoomId,
        #[serde(flatten)]
        extra: Map<String, Value>,
    },

    #[serde(rename = "incoming:call")]
    IncomingCall { from: ConnectionId, offer: Value },

    #[serde(rename = "call:accepted")]
    CallAccepted { from: ConnectionId, ans: Value },

    #[serde(rename = "peer:nego:needed")]
    NegotiationNeeded { from: ConnectionId, offer: Value },

    #[serde(rename = "peer:nego:final")]
    NegotiationFinal { from: ConnectionId, ans: Value },

    #[serde(rename = "ice-candidate")]
    IceCandidate { from: ConnectionId, candidate: Value },
}

impl ServerMessage {
    pub fn decode(text: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn encode(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Welcome { .. } => "welcome",
            Self::UserJoined { .. } => "user:joined",
            Self::UserLeft { .. } => "user:left",
            Self::RoomJoined { .. } => "room:join",
            Self::IncomingCall { .. } => "incoming:call",
            Self::CallAccepted { .. } => "call:accepted",
            Self::NegotiationNeeded { .. } => "peer:nego:needed",
            Self::NegotiationFinal { .. } => "peer:nego:final",
            Self::IceCandidate { .. } => "ice-candidate",
        }
    }
}
