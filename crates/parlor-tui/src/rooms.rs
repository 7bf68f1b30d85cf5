//! Rooms given on the command line.

use parlor_proto::RoomId;

/// Non-empty, ordered list of rooms with one active at a time.
///
/// Navigation cycles through the list in order and wraps around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomList {
    rooms: Vec<RoomId>,
    active: usize,
}

impl RoomList {
    /// Build a list with the first room active. `None` if `rooms` is empty.
    pub fn new(rooms: Vec<RoomId>) -> Option<Self> {
        if rooms.is_empty() {
            return None;
        }
        Some(Self { rooms, active: 0 })
    }

    /// Currently active room.
    pub fn active(&self) -> &RoomId {
        &self.rooms[self.active]
    }

    /// Activate the next room and return it.
    ///
    /// Returns `None` when there is only one room.
    pub fn advance(&mut self) -> Option<RoomId> {
        if self.rooms.len() < 2 {
            return None;
        }
        self.active = (self.active + 1) % self.rooms.len();
        Some(self.active().clone())
    }
}
