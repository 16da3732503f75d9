//! Entity identification system.
//!
//! Players, cards and board pieces each get a typed identifier, but all
//! three are drawn from one shared counter so an id is unique across the
//! whole game and allocation order is part of the deterministic replay.
//!
//! ```
//! use chute_ledger::core::IdAllocator;
//!
//! let mut ids = IdAllocator::default();
//! let player = ids.next_player();
//! let card = ids.next_card();
//! assert_eq!(player.raw(), 1);
//! assert_eq!(card.raw(), 2);
//! ```

use serde::{Deserialize, Serialize};

/// Identifier of a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

/// Identifier of a card, stable while it moves between deck and hands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

/// Identifier of a piece on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PieceId(pub u32);

impl PlayerId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl CardId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl PieceId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player({})", self.0)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Piece({})", self.0)
    }
}

/// Shared id counter. The first id handed out is 1.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdAllocator {
    last: u32,
}

impl IdAllocator {
    fn bump(&mut self) -> u32 {
        self.last += 1;
        self.last
    }

    /// Allocate a player id.
    pub fn next_player(&mut self) -> PlayerId {
        PlayerId(self.bump())
    }

    /// Allocate a card id.
    pub fn next_card(&mut self) -> CardId {
        CardId(self.bump())
    }

    /// Allocate a piece id.
    pub fn next_piece(&mut self) -> PieceId {
        PieceId(self.bump())
    }

    /// The most recently allocated raw id (0 before any allocation).
    #[must_use]
    pub fn last(&self) -> u32 {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_counter() {
        let mut ids = IdAllocator::default();

        assert_eq!(ids.next_player(), PlayerId(1));
        assert_eq!(ids.next_piece(), PieceId(2));
        assert_eq!(ids.next_card(), CardId(3));
        assert_eq!(ids.last(), 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", PlayerId(4)), "Player(4)");
        assert_eq!(format!("{}", CardId(42)), "Card(42)");
        assert_eq!(format!("{}", PieceId(7)), "Piece(7)");
    }

    #[test]
    fn test_serialization() {
        let id = PieceId(123);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: PieceId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
