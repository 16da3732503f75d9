//! Card targeting: which pieces an effect selects.
//!
//! - `Selector`: how pieces are chosen (all of a kind, one target, own, opponents')
//! - `PieceKind`: piece-type filter, with `Anything` as a wildcard
//! - `ActionTarget`: a masked (selector, filter) pair carried by a card

use serde::{Deserialize, Serialize};

use super::masked::MaskedValue;
use crate::core::GameRng;

/// How a card selects pieces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selector {
    /// Every piece matching the filter.
    All,
    /// One chosen piece matching the filter.
    Target,
    /// Pieces owned by the acting player.
    Own,
    /// Pieces owned by any other player.
    Opponent,
}

impl Selector {
    /// Option order used when generating cards.
    pub const ALL: [Selector; 4] = [Selector::All, Selector::Target, Selector::Own, Selector::Opponent];

    /// Whether the piece filter means anything for this selector.
    #[must_use]
    pub const fn uses_filter(self) -> bool {
        matches!(self, Selector::All | Selector::Target)
    }
}

/// Kind of board piece, or the `Anything` wildcard in filters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Ladder,
    Chute,
    Bomb,
    Coin,
    /// Wildcard; matches every kind.
    Anything,
}

impl PieceKind {
    /// Every kind including the wildcard, in generation order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Ladder,
        PieceKind::Chute,
        PieceKind::Bomb,
        PieceKind::Coin,
        PieceKind::Anything,
    ];

    /// Kinds a real piece can have.
    pub const REAL: [PieceKind; 5] = [
        PieceKind::Pawn,
        PieceKind::Ladder,
        PieceKind::Chute,
        PieceKind::Bomb,
        PieceKind::Coin,
    ];

    /// Wildcard-aware equality.
    #[must_use]
    pub fn matches(self, other: PieceKind) -> bool {
        self == other || self == PieceKind::Anything || other == PieceKind::Anything
    }

    /// Ladders and chutes span two tiles.
    #[must_use]
    pub const fn is_long(self) -> bool {
        matches!(self, PieceKind::Ladder | PieceKind::Chute)
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Ladder => "ladder",
            PieceKind::Chute => "chute",
            PieceKind::Bomb => "bomb",
            PieceKind::Coin => "coin",
            PieceKind::Anything => "anything",
        };
        f.write_str(name)
    }
}

/// Direction along the snake path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Option order used when generating cards.
    pub const ALL: [Direction; 2] = [Direction::Forward, Direction::Backward];
}

/// Masked selector and filter carried by a card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionTarget {
    pub selector: MaskedValue<Selector>,
    pub filter: MaskedValue<PieceKind>,
}

impl ActionTarget {
    /// Create a target from its two masked halves.
    #[must_use]
    pub fn new(selector: MaskedValue<Selector>, filter: MaskedValue<PieceKind>) -> Self {
        Self { selector, filter }
    }

    /// Reveal the selector, then the filter only when the selector uses one.
    pub fn reveal(&self, rng: &mut GameRng) -> (Selector, Option<PieceKind>) {
        let selector = self.selector.reveal(rng);
        let filter = selector.uses_filter().then(|| self.filter.reveal(rng));
        (selector, filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_matching() {
        assert!(PieceKind::Coin.matches(PieceKind::Coin));
        assert!(PieceKind::Coin.matches(PieceKind::Anything));
        assert!(PieceKind::Anything.matches(PieceKind::Ladder));
        assert!(!PieceKind::Coin.matches(PieceKind::Bomb));
    }

    #[test]
    fn test_reveal_skips_filter_for_own() {
        let mut rng = GameRng::new(5);
        let target = ActionTarget::new(
            MaskedValue::new(Selector::ALL.to_vec(), 2),
            MaskedValue::new(PieceKind::ALL.to_vec(), 0).with_flags(false, true),
        );

        let before = rng.state();
        assert_eq!(target.reveal(&mut rng), (Selector::Own, None));
        assert_eq!(rng.state(), before);
    }

    #[test]
    fn test_reveal_draws_mystery_filter_for_all() {
        let mut rng = GameRng::new(5);
        let target = ActionTarget::new(
            MaskedValue::new(Selector::ALL.to_vec(), 0),
            MaskedValue::new(PieceKind::ALL.to_vec(), 0).with_flags(false, true),
        );

        let before = rng.state();
        let (selector, filter) = target.reveal(&mut rng);
        assert_eq!(selector, Selector::All);
        assert!(filter.is_some());
        assert_ne!(rng.state(), before);
    }
}
