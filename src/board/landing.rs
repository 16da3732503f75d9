//! The board and landing resolution.
//!
//! ## Landing
//!
//! After a piece stops moving, the tile it rests on is resolved:
//! - ladders and chutes never land themselves
//! - a chute on the tile teleports the piece to the chute's far end, else a
//!   ladder does the same; teleports repeat until the piece rests on a tile
//!   with neither
//! - pawns then pick up a coin, trigger a bomb, or score the winning tile
//!
//! A bomb removes every non-pawn piece in its 3×3 neighbourhood and pushes
//! every pawn there (the one that triggered it included) back along the
//! path. Pushed pawns land again, but that second landing skips bombs, so
//! one explosion never sets off another.
//!
//! Teleport chains stop after [`MAX_LANDING_DEPTH`] hops or as soon as a
//! tile repeats, whichever comes first, so cyclic ladder/chute layouts
//! always terminate.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use super::geometry::{Geometry, Position};
use super::piece::BoardPiece;
use crate::cards::{Direction, PieceKind, Selector};
use crate::core::{PieceId, PlayerId, ScoringConfig};

/// Maximum teleports resolved for one landing.
pub const MAX_LANDING_DEPTH: usize = 10;

/// Why a score changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScoreCause {
    Coin,
    Bomb,
    Win,
}

/// One score adjustment produced by a landing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScoreChange {
    pub player: PlayerId,
    pub delta: i64,
    pub cause: ScoreCause,
}

/// Result of resolving one or more landings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LandingOutcome {
    /// Score adjustments in the order they happened.
    pub changes: SmallVec<[ScoreChange; 4]>,
    /// A teleport chain hit the depth bound or revisited a tile.
    pub cut_short: bool,
}

impl LandingOutcome {
    /// Net score change for a player.
    #[must_use]
    pub fn total_for(&self, player: PlayerId) -> i64 {
        self.changes
            .iter()
            .filter(|c| c.player == player)
            .map(|c| c.delta)
            .sum()
    }

    /// Append the changes of another outcome.
    pub fn merge(&mut self, other: LandingOutcome) {
        self.changes.extend(other.changes);
        self.cut_short |= other.cut_short;
    }

    fn credit(&mut self, player: Option<PlayerId>, delta: i64, cause: ScoreCause) {
        if let Some(player) = player {
            self.changes.push(ScoreChange { player, delta, cause });
        }
    }
}

/// Board dimensions plus every piece on it, in placement order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    geometry: Geometry,
    pieces: Vec<BoardPiece>,
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            pieces: Vec::new(),
        }
    }

    #[must_use]
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// All pieces in placement order.
    #[must_use]
    pub fn pieces(&self) -> &[BoardPiece] {
        &self.pieces
    }

    /// Get a piece.
    #[must_use]
    pub fn piece(&self, id: PieceId) -> Option<&BoardPiece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    /// Get a mutable piece.
    pub fn piece_mut(&mut self, id: PieceId) -> Option<&mut BoardPiece> {
        self.pieces.iter_mut().find(|p| p.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: PieceId) -> bool {
        self.piece(id).is_some()
    }

    /// Add a piece on top of the placement order.
    pub fn push(&mut self, piece: BoardPiece) {
        self.pieces.push(piece);
    }

    /// Remove a piece, returning it.
    pub fn remove(&mut self, id: PieceId) -> Option<BoardPiece> {
        let index = self.pieces.iter().position(|p| p.id == id)?;
        Some(self.pieces.remove(index))
    }

    /// Remove every piece.
    pub fn clear(&mut self) {
        self.pieces.clear();
    }

    /// First piece (in placement order) at `pos` matching `kind`.
    #[must_use]
    pub fn first_at(&self, kind: PieceKind, pos: Position) -> Option<PieceId> {
        self.pieces
            .iter()
            .find(|p| p.pos == pos && kind.matches(p.kind))
            .map(|p| p.id)
    }

    /// Whether `player` has a pawn on the board.
    #[must_use]
    pub fn has_pawn(&self, player: PlayerId) -> bool {
        self.pieces
            .iter()
            .any(|p| p.kind == PieceKind::Pawn && p.is_owned_by(player))
    }

    /// Whether some piece matches `kind`.
    #[must_use]
    pub fn any_of_kind(&self, kind: PieceKind) -> bool {
        self.pieces.iter().any(|p| kind.matches(p.kind))
    }

    // === Selection ===

    /// Pieces chosen by a revealed card selection, in placement order.
    ///
    /// - `All`: every piece matching `filter`
    /// - `Target`: the `target` piece, if it matches `filter`
    /// - `Own`: pieces owned by `current`
    /// - `Opponent`: pieces owned by anyone else
    ///
    /// A missing filter matches everything.
    #[must_use]
    pub fn select(
        &self,
        selector: Selector,
        filter: Option<PieceKind>,
        target: Option<PieceId>,
        current: PlayerId,
    ) -> SmallVec<[PieceId; 8]> {
        let filter = filter.unwrap_or(PieceKind::Anything);
        self.pieces
            .iter()
            .filter(|p| match selector {
                Selector::All => filter.matches(p.kind),
                Selector::Target => Some(p.id) == target && filter.matches(p.kind),
                Selector::Own => p.is_owned_by(current),
                Selector::Opponent => p.owner.is_some_and(|owner| owner != current),
            })
            .map(|p| p.id)
            .collect()
    }

    // === Movement ===

    /// Walk a piece `steps` tiles along the path. Long pieces move both ends.
    pub fn advance(&mut self, id: PieceId, dir: Direction, steps: u32) {
        let geometry = self.geometry;
        if let Some(piece) = self.piece_mut(id) {
            piece.pos = geometry.walk(piece.pos, dir, steps);
            if let Some(end) = piece.far_end {
                piece.far_end = Some(geometry.walk(end, dir, steps));
            }
        }
    }

    /// Lengthen (`grow`) or shorten a ladder or chute by one row.
    ///
    /// A ladder's far end moves up when it grows; a chute's moves down.
    /// Other pieces are left alone.
    pub fn resize(&mut self, id: PieceId, grow: bool) {
        let geometry = self.geometry;
        let Some(piece) = self.piece_mut(id) else {
            return;
        };
        let delta = match (piece.kind, grow) {
            (PieceKind::Ladder, true) | (PieceKind::Chute, false) => 1,
            (PieceKind::Ladder, false) | (PieceKind::Chute, true) => -1,
            _ => return,
        };
        if let Some(end) = piece.far_end.as_mut() {
            end.y = geometry.clamp_y(end.y + delta);
        }
    }

    // === Landing ===

    /// Resolve the landing of one piece.
    pub fn land(&mut self, id: PieceId, scoring: &ScoringConfig) -> LandingOutcome {
        let mut outcome = LandingOutcome::default();
        self.land_piece(id, scoring, true, &mut outcome);
        outcome
    }

    fn land_piece(
        &mut self,
        id: PieceId,
        scoring: &ScoringConfig,
        with_bombs: bool,
        outcome: &mut LandingOutcome,
    ) {
        let Some(piece) = self.piece(id) else {
            return;
        };
        if piece.is_long() {
            return;
        }
        let (kind, owner, mut pos) = (piece.kind, piece.owner, piece.pos);

        let mut visited = FxHashSet::default();
        visited.insert(pos);
        let mut depth = 0;
        while let Some(dest) = self.teleport_from(pos) {
            depth += 1;
            trace!(piece = %id, from = ?pos, to = ?dest, depth, "teleport");
            pos = dest;
            if depth >= MAX_LANDING_DEPTH || !visited.insert(pos) {
                self.place(id, pos);
                outcome.cut_short = true;
                trace!(piece = %id, depth, "teleport chain cut short");
                return;
            }
        }
        self.place(id, pos);

        if kind != PieceKind::Pawn {
            return;
        }

        if let Some(coin) = self.first_at(PieceKind::Coin, pos) {
            self.remove(coin);
            outcome.credit(owner, scoring.coin_reward, ScoreCause::Coin);
            trace!(piece = %id, coin = %coin, "coin collected");
        }

        if with_bombs {
            if let Some(bomb) = self.first_at(PieceKind::Bomb, pos) {
                self.remove(bomb);
                outcome.credit(owner, -scoring.bomb_penalty, ScoreCause::Bomb);
                self.detonate(pos, scoring, outcome);
                return;
            }
        }

        if pos == self.geometry.winning_tile() {
            outcome.credit(owner, scoring.win_reward, ScoreCause::Win);
            trace!(piece = %id, "winning tile reached");
        }
    }

    fn detonate(&mut self, center: Position, scoring: &ScoringConfig, outcome: &mut LandingOutcome) {
        let before = self.pieces.len();
        self.pieces
            .retain(|p| p.kind == PieceKind::Pawn || p.pos.chebyshev(center) > 1);

        let pushed: SmallVec<[PieceId; 8]> = self
            .pieces
            .iter()
            .filter(|p| p.kind == PieceKind::Pawn && p.pos.chebyshev(center) <= 1)
            .map(|p| p.id)
            .collect();
        trace!(
            ?center,
            removed = before - self.pieces.len(),
            pushed = pushed.len(),
            "bomb detonated"
        );

        for pawn in pushed {
            self.advance(pawn, Direction::Backward, scoring.bomb_pushback);
            self.land_piece(pawn, scoring, false, outcome);
        }
    }

    /// Far end of the first chute at `pos`, else of the first ladder.
    fn teleport_from(&self, pos: Position) -> Option<Position> {
        let far_end = |kind: PieceKind| {
            self.pieces
                .iter()
                .find(|p| p.kind == kind && p.pos == pos)
                .and_then(|p| p.far_end)
        };
        far_end(PieceKind::Chute).or_else(|| far_end(PieceKind::Ladder))
    }

    fn place(&mut self, id: PieceId, pos: Position) {
        if let Some(piece) = self.piece_mut(id) {
            piece.pos = pos;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P1: PlayerId = PlayerId(1);
    const P2: PlayerId = PlayerId(2);

    fn board() -> Board {
        Board::new(Geometry::new(8, 8))
    }

    fn scoring() -> ScoringConfig {
        ScoringConfig::default()
    }

    #[test]
    fn test_coin_pickup() {
        let mut board = board();
        board.push(BoardPiece::pawn(PieceId(1), P1, Position::new(3, 0)));
        board.push(BoardPiece::new(PieceId(2), PieceKind::Coin, Position::new(3, 0)));

        let outcome = board.land(PieceId(1), &scoring());

        assert_eq!(outcome.total_for(P1), 25);
        assert!(!board.contains(PieceId(2)));

        // Nothing left to collect.
        let again = board.land(PieceId(1), &scoring());
        assert!(again.changes.is_empty());
    }

    #[test]
    fn test_ladder_then_coin() {
        let mut board = board();
        board.push(BoardPiece::pawn(PieceId(1), P1, Position::new(2, 0)));
        board.push(BoardPiece::long(PieceId(2), PieceKind::Ladder, Position::new(2, 0), Position::new(5, 2)));
        board.push(BoardPiece::new(PieceId(3), PieceKind::Coin, Position::new(5, 2)));

        let outcome = board.land(PieceId(1), &scoring());

        assert_eq!(board.piece(PieceId(1)).unwrap().pos, Position::new(5, 2));
        assert_eq!(outcome.total_for(P1), 25);
    }

    #[test]
    fn test_chute_takes_precedence_over_ladder() {
        let mut board = board();
        board.push(BoardPiece::long(PieceId(1), PieceKind::Ladder, Position::new(4, 3), Position::new(4, 5)));
        board.push(BoardPiece::long(PieceId(2), PieceKind::Chute, Position::new(4, 3), Position::new(4, 1)));
        board.push(BoardPiece::pawn(PieceId(3), P1, Position::new(4, 3)));

        board.land(PieceId(3), &scoring());

        assert_eq!(board.piece(PieceId(3)).unwrap().pos, Position::new(4, 1));
    }

    #[test]
    fn test_long_pieces_do_not_land() {
        let mut board = board();
        board.push(BoardPiece::long(PieceId(1), PieceKind::Ladder, Position::new(1, 1), Position::new(1, 3)));
        board.push(BoardPiece::long(PieceId(2), PieceKind::Chute, Position::new(1, 1), Position::new(1, 0)));

        board.land(PieceId(1), &scoring());

        assert_eq!(board.piece(PieceId(1)).unwrap().pos, Position::new(1, 1));
    }

    #[test]
    fn test_teleport_cycle_terminates() {
        let mut board = board();
        let a = Position::new(2, 1);
        let b = Position::new(2, 3);
        board.push(BoardPiece::long(PieceId(1), PieceKind::Ladder, a, b));
        board.push(BoardPiece::long(PieceId(2), PieceKind::Chute, b, a));
        board.push(BoardPiece::pawn(PieceId(3), P1, a));

        let outcome = board.land(PieceId(3), &scoring());

        assert!(outcome.cut_short);
        let pos = board.piece(PieceId(3)).unwrap().pos;
        assert!(pos == a || pos == b);
    }

    #[test]
    fn test_bomb_blast() {
        let mut board = board();
        let center = Position::new(4, 2);
        board.push(BoardPiece::pawn(PieceId(1), P1, center));
        board.push(BoardPiece::new(PieceId(2), PieceKind::Bomb, center));
        board.push(BoardPiece::new(PieceId(3), PieceKind::Coin, Position::new(5, 3)));
        board.push(BoardPiece::new(PieceId(4), PieceKind::Coin, Position::new(6, 2)));
        board.push(BoardPiece::pawn(PieceId(5), P2, Position::new(3, 1)));

        let outcome = board.land(PieceId(1), &scoring());

        assert_eq!(outcome.total_for(P1), -30);
        assert!(!board.contains(PieceId(2)));
        assert!(!board.contains(PieceId(3)));
        // Out of range.
        assert!(board.contains(PieceId(4)));

        let geometry = board.geometry();
        assert_eq!(
            board.piece(PieceId(1)).unwrap().pos,
            geometry.walk(center, Direction::Backward, 3)
        );
        assert_eq!(
            board.piece(PieceId(5)).unwrap().pos,
            geometry.walk(Position::new(3, 1), Direction::Backward, 3)
        );
    }

    #[test]
    fn test_pushed_pawn_does_not_chain_bombs() {
        let mut board = board();
        let center = Position::new(4, 2);
        let landing = board.geometry().walk(center, Direction::Backward, 3);
        board.push(BoardPiece::pawn(PieceId(1), P1, center));
        board.push(BoardPiece::new(PieceId(2), PieceKind::Bomb, center));
        board.push(BoardPiece::new(PieceId(3), PieceKind::Bomb, landing));

        let outcome = board.land(PieceId(1), &scoring());

        assert_eq!(outcome.total_for(P1), -30);
        assert!(board.contains(PieceId(3)));
    }

    #[test]
    fn test_pushed_pawn_still_collects_coin() {
        let mut board = board();
        let center = Position::new(4, 2);
        let landing = board.geometry().walk(center, Direction::Backward, 3);
        board.push(BoardPiece::pawn(PieceId(1), P1, center));
        board.push(BoardPiece::new(PieceId(2), PieceKind::Bomb, center));
        board.push(BoardPiece::new(PieceId(3), PieceKind::Coin, landing));

        let outcome = board.land(PieceId(1), &scoring());

        assert_eq!(outcome.total_for(P1), -5);
        assert!(!board.contains(PieceId(3)));
    }

    #[test]
    fn test_winning_tile() {
        let mut board = board();
        let win = board.geometry().winning_tile();
        board.push(BoardPiece::pawn(PieceId(1), P2, win));

        let outcome = board.land(PieceId(1), &scoring());

        assert_eq!(outcome.changes.as_slice(), &[ScoreChange { player: P2, delta: 100, cause: ScoreCause::Win }]);
    }

    #[test]
    fn test_select() {
        let mut board = board();
        board.push(BoardPiece::pawn(PieceId(1), P1, Position::ORIGIN));
        board.push(BoardPiece::pawn(PieceId(2), P2, Position::ORIGIN));
        board.push(BoardPiece::new(PieceId(3), PieceKind::Coin, Position::new(1, 1)));

        let all_pawns = board.select(Selector::All, Some(PieceKind::Pawn), None, P1);
        assert_eq!(all_pawns.as_slice(), &[PieceId(1), PieceId(2)]);

        let anything = board.select(Selector::All, Some(PieceKind::Anything), None, P1);
        assert_eq!(anything.len(), 3);

        let own = board.select(Selector::Own, None, None, P1);
        assert_eq!(own.as_slice(), &[PieceId(1)]);

        let opponents = board.select(Selector::Opponent, None, None, P1);
        assert_eq!(opponents.as_slice(), &[PieceId(2)]);

        let target = board.select(Selector::Target, Some(PieceKind::Coin), Some(PieceId(3)), P1);
        assert_eq!(target.as_slice(), &[PieceId(3)]);

        let wrong_kind = board.select(Selector::Target, Some(PieceKind::Bomb), Some(PieceId(3)), P1);
        assert!(wrong_kind.is_empty());
    }

    #[test]
    fn test_advance_moves_both_ends() {
        let mut board = board();
        board.push(BoardPiece::long(PieceId(1), PieceKind::Ladder, Position::new(1, 0), Position::new(1, 2)));

        board.advance(PieceId(1), Direction::Forward, 2);

        let ladder = board.piece(PieceId(1)).unwrap();
        assert_eq!(ladder.pos, Position::new(3, 0));
        assert_eq!(ladder.far_end, Some(Position::new(3, 2)));
    }

    #[test]
    fn test_resize() {
        let mut board = board();
        board.push(BoardPiece::long(PieceId(1), PieceKind::Ladder, Position::new(1, 0), Position::new(1, 7)));
        board.push(BoardPiece::long(PieceId(2), PieceKind::Chute, Position::new(1, 5), Position::new(1, 2)));

        board.resize(PieceId(1), true);
        board.resize(PieceId(2), true);
        assert_eq!(board.piece(PieceId(1)).unwrap().far_end, Some(Position::new(1, 7)));
        assert_eq!(board.piece(PieceId(2)).unwrap().far_end, Some(Position::new(1, 1)));

        board.resize(PieceId(1), false);
        board.resize(PieceId(2), false);
        assert_eq!(board.piece(PieceId(1)).unwrap().far_end, Some(Position::new(1, 6)));
        assert_eq!(board.piece(PieceId(2)).unwrap().far_end, Some(Position::new(1, 2)));
    }
}
