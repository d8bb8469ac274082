use rendezvous_core::{ConnectionId, ParticipantIdentity};
use std::collections::HashMap;

/// Bidirectional identity <-> connection index.
///
/// Both maps are always updated together: an identity maps to at most one
/// connection and a connection carries at most one identity.
#[derive(Debug, Default)]
pub struct IdentityIndex {
    by_identity: HashMap<ParticipantIdentity, ConnectionId>,
    by_connection: HashMap<ConnectionId, ParticipantIdentity>,
}

impl IdentityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last write wins. Returns the identity this connection carried before.
    pub fn set_mapping(
        &mut self,
        identity: ParticipantIdentity,
        connection_id: ConnectionId,
    ) -> Option<ParticipantIdentity> {
        if let Some(stale) = self.by_identity.insert(identity.clone(), connection_id) {
            if stale != connection_id {
                self.by_connection.remove(&stale);
            }
        }

        let previous = self.by_connection.insert(connection_id, identity.clone());
        if let Some(old) = &previous {
            if *old != identity {
                self.by_identity.remove(old);
            }
        }
        previous
    }

    pub fn remove_by_connection(
        &mut self,
        connection_id: &ConnectionId,
    ) -> Option<ParticipantIdentity> {
        let identity = self.by_connection.remove(connection_id)?;
        self.by_identity.remove(&identity);
        Some(identity)
    }

    pub fn lookup_by_identity(&self, identity: &ParticipantIdentity) -> Option<ConnectionId> {
        self.by_identity.get(identity).copied()
    }

    pub fn lookup_by_connection(&self, connection_id: &ConnectionId) -> Option<&ParticipantIdentity> {
        self.by_connection.get(connection_id)
    }

    pub fn len(&self) -> usize {
        self.by_connection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_connection.is_empty()
    }
}
