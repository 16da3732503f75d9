//! Board pieces.
//!
//! Every piece has a kind and a resting tile. Ladders and chutes are long
//! pieces: they also carry a far end, and a piece landing on the near end is
//! teleported there.

use serde::{Deserialize, Serialize};

use super::geometry::Position;
use crate::cards::PieceKind;
use crate::core::{PieceId, PlayerId};

/// Cosmetic mask drawn over a piece. No rules effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaskType {
    Clown,
    Joker,
    Gas,
    N95,
    Schrodinger,
    Japanese,
}

/// A piece on the board.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardPiece {
    pub id: PieceId,
    pub kind: PieceKind,
    pub pos: Position,
    /// Owning player; pawns only, in practice.
    pub owner: Option<PlayerId>,
    pub mask: Option<MaskType>,
    /// Second endpoint of a ladder or chute.
    pub far_end: Option<Position>,
}

impl BoardPiece {
    /// Create an unowned piece.
    ///
    /// Panics on `PieceKind::Anything`, which only exists as a filter.
    #[must_use]
    pub fn new(id: PieceId, kind: PieceKind, pos: Position) -> Self {
        assert!(kind != PieceKind::Anything, "Anything is not a piece kind");
        Self {
            id,
            kind,
            pos,
            owner: None,
            mask: None,
            far_end: None,
        }
    }

    /// A pawn owned by `owner`.
    #[must_use]
    pub fn pawn(id: PieceId, owner: PlayerId, pos: Position) -> Self {
        Self::new(id, PieceKind::Pawn, pos).with_owner(owner)
    }

    /// A ladder or chute between `pos` and `far_end`.
    #[must_use]
    pub fn long(id: PieceId, kind: PieceKind, pos: Position, far_end: Position) -> Self {
        assert!(kind.is_long(), "only ladders and chutes have a far end");
        Self::new(id, kind, pos).with_far_end(far_end)
    }

    #[must_use]
    pub fn with_owner(mut self, owner: PlayerId) -> Self {
        self.owner = Some(owner);
        self
    }

    #[must_use]
    pub fn with_mask(mut self, mask: MaskType) -> Self {
        self.mask = Some(mask);
        self
    }

    #[must_use]
    pub fn with_far_end(mut self, far_end: Position) -> Self {
        self.far_end = Some(far_end);
        self
    }

    /// Whether this piece spans two tiles.
    #[must_use]
    pub fn is_long(&self) -> bool {
        self.kind.is_long()
    }

    /// Whether `player` owns this piece.
    #[must_use]
    pub fn is_owned_by(&self, player: PlayerId) -> bool {
        self.owner == Some(player)
    }
}

impl std::fmt::Display for BoardPiece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} at ({}, {})", self.kind, self.id, self.pos.x, self.pos.y)?;
        if let Some(end) = self.far_end {
            write!(f, " to ({}, {})", end.x, end.y)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let pawn = BoardPiece::pawn(PieceId(3), PlayerId(1), Position::ORIGIN);
        assert!(pawn.is_owned_by(PlayerId(1)));
        assert!(!pawn.is_long());

        let ladder = BoardPiece::long(PieceId(4), PieceKind::Ladder, Position::new(1, 1), Position::new(2, 3))
            .with_mask(MaskType::Clown);
        assert!(ladder.is_long());
        assert_eq!(ladder.far_end, Some(Position::new(2, 3)));
        assert_eq!(ladder.mask, Some(MaskType::Clown));
        assert_eq!(ladder.owner, None);
    }

    #[test]
    #[should_panic(expected = "Anything is not a piece kind")]
    fn test_wildcard_is_not_a_piece() {
        let _ = BoardPiece::new(PieceId(1), PieceKind::Anything, Position::ORIGIN);
    }

    #[test]
    fn test_display() {
        let chute = BoardPiece::long(PieceId(7), PieceKind::Chute, Position::new(4, 2), Position::new(4, 0));
        assert_eq!(chute.to_string(), "chute Piece(7) at (4, 2) to (4, 0)");
    }
}
