//! Bounded per-room message history.

use crate::model::Broadcast;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// Rolling history of [`Broadcast`]s, one queue per room.
///
/// Invariant: no room ever holds more than `capacity` entries. The oldest
/// entries are evicted first.
#[derive(Debug)]
pub struct RoomHistory {
    capacity: usize,
    rooms: HashMap<String, VecDeque<Arc<Broadcast>>>,
}

impl RoomHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            rooms: HashMap::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Appends to the broadcast's room, evicting from the front when over capacity.
    pub fn push(&mut self, broadcast: Arc<Broadcast>) {
        let buf = self.rooms.entry(broadcast.room.clone()).or_default();
        buf.push_back(broadcast);
        while buf.len() > self.capacity {
            buf.pop_front();
        }
    }

    /// Entries of `room`, oldest first.
    pub fn recent(&self, room: &str) -> impl Iterator<Item = &Arc<Broadcast>> {
        self.rooms.get(room).into_iter().flatten()
    }

    pub fn len(&self, room: &str) -> usize {
        self.rooms.get(room).map_or(0, VecDeque::len)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn clear(&mut self) {
        self.rooms.clear();
    }
}
