//! Identifier types for kitchen entities.
//!
//! Every replicated object is addressed by a small copyable handle rather
//! than a reference, so lifetimes of items, counters and players never
//! depend on each other.
//!
//! ## Holders
//!
//! Both counters and players can hold an item. [`HolderId`] names either
//! one:
//!
//! ```
//! use coop_kitchen::core::{CounterId, HolderId, PlayerId};
//!
//! let counter = HolderId::from(CounterId::new(3));
//! let player = HolderId::from(PlayerId::new(0));
//!
//! assert_eq!(counter.as_counter(), Some(CounterId::new(3)));
//! assert!(player.is_player());
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a spawned item.
///
/// Allocated by the authority; never reused within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u32);

impl ItemId {
    /// Create a new item ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Item({})", self.0)
    }
}

/// Counter identifier. Counters are indexed densely from 0 in the order
/// they were added to the kitchen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CounterId(pub u16);

impl CounterId {
    /// Create a new counter ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Index into the kitchen's counter table.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CounterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Counter({})", self.0)
    }
}

/// Player identifier. One player exists per connected client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Transport-level identity of a connected participant.
///
/// Attached implicitly to every request the authority receives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClientId(pub u64);

impl ClientId {
    /// Create a new client ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Client({})", self.0)
    }
}

/// Anything that can own an item: a counter or a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HolderId {
    Counter(CounterId),
    Player(PlayerId),
}

impl HolderId {
    /// The counter this holder refers to, if any.
    #[must_use]
    pub const fn as_counter(self) -> Option<CounterId> {
        match self {
            HolderId::Counter(id) => Some(id),
            HolderId::Player(_) => None,
        }
    }

    /// The player this holder refers to, if any.
    #[must_use]
    pub const fn as_player(self) -> Option<PlayerId> {
        match self {
            HolderId::Player(id) => Some(id),
            HolderId::Counter(_) => None,
        }
    }

    /// Check if this holder is a player.
    #[must_use]
    pub const fn is_player(self) -> bool {
        matches!(self, HolderId::Player(_))
    }
}

impl From<CounterId> for HolderId {
    fn from(id: CounterId) -> Self {
        HolderId::Counter(id)
    }
}

impl From<PlayerId> for HolderId {
    fn from(id: PlayerId) -> Self {
        HolderId::Player(id)
    }
}

impl std::fmt::Display for HolderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HolderId::Counter(id) => id.fmt(f),
            HolderId::Player(id) => id.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holder_conversions() {
        let counter = HolderId::from(CounterId::new(2));
        assert_eq!(counter.as_counter(), Some(CounterId::new(2)));
        assert_eq!(counter.as_player(), None);
        assert!(!counter.is_player());

        let player = HolderId::from(PlayerId::new(1));
        assert_eq!(player.as_player(), Some(PlayerId::new(1)));
        assert_eq!(player.as_counter(), None);
        assert!(player.is_player());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ItemId(42)), "Item(42)");
        assert_eq!(format!("{}", HolderId::Counter(CounterId(3))), "Counter(3)");
        assert_eq!(format!("{}", HolderId::Player(PlayerId(1))), "Player 1");
        assert_eq!(format!("{}", ClientId(7)), "Client(7)");
    }

    #[test]
    fn test_counter_index() {
        assert_eq!(CounterId::new(5).index(), 5);
        assert_eq!(PlayerId::new(2).index(), 2);
    }

    #[test]
    fn test_serialization() {
        let id = HolderId::Counter(CounterId(9));
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: HolderId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
