use rendezvous_core::{ConnectionId, RoomId};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Room membership, kept in both directions so a dropped connection can be
/// removed from every room without scanning them all.
///
/// Rooms appear on first join and are pruned as soon as they become empty.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: HashMap<RoomId, HashSet<ConnectionId>>,
    memberships: HashMap<ConnectionId, HashSet<RoomId>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the connection was already a member.
    pub fn join(&mut self, room_id: RoomId, connection_id: ConnectionId) -> bool {
        let members = self.rooms.entry(room_id.clone()).or_insert_with(|| {
            debug!("Creating room '{}'", room_id);
            HashSet::new()
        });

        if !members.insert(connection_id) {
            return false;
        }

        self.memberships
            .entry(connection_id)
            .or_default()
            .insert(room_id);
        true
    }

    /// Returns `false` if the connection was not a member.
    pub fn leave(&mut self, room_id: &RoomId, connection_id: &ConnectionId) -> bool {
        let Some(members) = self.rooms.get_mut(room_id) else {
            return false;
        };
        if !members.remove(connection_id) {
            return false;
        }
        if members.is_empty() {
            debug!("Pruning empty room '{}'", room_id);
            self.rooms.remove(room_id);
        }

        if let Some(rooms) = self.memberships.get_mut(connection_id) {
            rooms.remove(room_id);
            if rooms.is_empty() {
                self.memberships.remove(connection_id);
            }
        }
        true
    }

    /// Removes the connection from every room and returns the rooms it left.
    pub fn leave_all(&mut self, connection_id: &ConnectionId) -> Vec<RoomId> {
        let rooms: Vec<RoomId> = self
            .memberships
            .get(connection_id)
            .map(|rooms| rooms.iter().cloned().collect())
            .unwrap_or_default();

        for room_id in &rooms {
            self.leave(room_id, connection_id);
        }
        rooms
    }

    pub fn members(&self, room_id: &RoomId) -> Vec<ConnectionId> {
        self.rooms
            .get(room_id)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn rooms_of(&self, connection_id: &ConnectionId) -> Vec<RoomId> {
        self.memberships
            .get(connection_id)
            .map(|rooms| rooms.iter().cloned().collect())
            .unwrap_or_default()
    }

    #[cfg(test)]
    pub fn contains(&self, room_id: &RoomId, connection_id: &ConnectionId) -> bool {
        self.rooms
            .get(room_id)
            .is_some_and(|members| members.contains(connection_id))
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}
