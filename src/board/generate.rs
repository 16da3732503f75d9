//! Board generation.
//!
//! Rows are visited bottom to top. Each row rolls independently for at most
//! one ladder (not on the top row), one chute, one coin and one bomb (none of
//! those three on the bottom row), in that order. Pawns are placed on the
//! origin after every hazard, one per player.

use tracing::debug;

use super::geometry::{Geometry, Position};
use super::landing::Board;
use super::piece::BoardPiece;
use crate::cards::PieceKind;
use crate::core::{GameRng, HazardConfig, IdAllocator, PlayerId};

/// Sample the far end of a ladder or chute whose near end is `from`.
///
/// Draws the column jitter first, then the vertical span. Ladders climb,
/// chutes drop; both are clamped to the board.
pub fn sample_far_end(
    rng: &mut GameRng,
    geometry: Geometry,
    hazards: &HazardConfig,
    kind: PieceKind,
    from: Position,
) -> Position {
    let jitter = f64::from(hazards.jitter);
    let offset = (rng.next_f64() * (2.0 * jitter + 1.0) - jitter).floor() as i32;
    let span = (rng.next_f64() * f64::from(hazards.max_span)).ceil() as i32;

    let y = if kind == PieceKind::Chute {
        from.y - span
    } else {
        from.y + span
    };
    Position::new(geometry.clamp_x(from.x + offset), geometry.clamp_y(y))
}

/// Fill an empty board with hazards, then one pawn per player.
pub fn populate(
    board: &mut Board,
    rng: &mut GameRng,
    ids: &mut IdAllocator,
    hazards: &HazardConfig,
    players: &[PlayerId],
) {
    let geometry = board.geometry();
    let width = geometry.width as usize;
    let height = geometry.height as i32;

    for y in 0..height {
        if y + 1 < height && rng.chance(hazards.ladder_chance) {
            let from = Position::new(rng.index(width) as i32, y);
            let to = sample_far_end(rng, geometry, hazards, PieceKind::Ladder, from);
            board.push(BoardPiece::long(ids.next_piece(), PieceKind::Ladder, from, to));
        }
        if y > 0 && rng.chance(hazards.chute_chance) {
            let from = Position::new(rng.index(width) as i32, y);
            let to = sample_far_end(rng, geometry, hazards, PieceKind::Chute, from);
            board.push(BoardPiece::long(ids.next_piece(), PieceKind::Chute, from, to));
        }
        if y > 0 && rng.chance(hazards.coin_chance) {
            let at = Position::new(rng.index(width) as i32, y);
            board.push(BoardPiece::new(ids.next_piece(), PieceKind::Coin, at));
        }
        if y > 0 && rng.chance(hazards.bomb_chance) {
            let at = Position::new(rng.index(width) as i32, y);
            board.push(BoardPiece::new(ids.next_piece(), PieceKind::Bomb, at));
        }
    }

    for &player in players {
        board.push(BoardPiece::pawn(ids.next_piece(), player, Position::ORIGIN));
    }

    debug!(
        width = geometry.width,
        height = geometry.height,
        pieces = board.pieces().len(),
        "board populated"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated(seed: &str) -> Board {
        let mut board = Board::new(Geometry::new(8, 8));
        let mut rng = GameRng::from_seed_str(Some(seed));
        let mut ids = IdAllocator::default();
        populate(&mut board, &mut rng, &mut ids, &HazardConfig::default(), &[PlayerId(100), PlayerId(101)]);
        board
    }

    #[test]
    fn test_populate_is_deterministic() {
        assert_eq!(populated("abc"), populated("abc"));
    }

    #[test]
    fn test_hazard_rows() {
        for seed in ["abc", "def", "ghi", "jkl"] {
            let board = populated(seed);
            let geometry = board.geometry();
            for piece in board.pieces() {
                assert!(geometry.contains(piece.pos), "{piece}");
                match piece.kind {
                    PieceKind::Ladder => {
                        assert!(piece.pos.y < 7);
                        let end = piece.far_end.unwrap();
                        assert!(geometry.contains(end));
                        assert!(end.y >= piece.pos.y);
                        assert!((end.x - piece.pos.x).abs() <= 2);
                    }
                    PieceKind::Chute => {
                        assert!(piece.pos.y > 0);
                        let end = piece.far_end.unwrap();
                        assert!(geometry.contains(end));
                        assert!(end.y <= piece.pos.y);
                    }
                    PieceKind::Coin | PieceKind::Bomb => assert!(piece.pos.y > 0),
                    PieceKind::Pawn => assert_eq!(piece.pos, Position::ORIGIN),
                    PieceKind::Anything => unreachable!(),
                }
            }
        }
    }

    #[test]
    fn test_pawns_placed_last() {
        let board = populated("abc");
        let pieces = board.pieces();
        let n = pieces.len();
        assert!(pieces[n - 2].is_owned_by(PlayerId(100)));
        assert!(pieces[n - 1].is_owned_by(PlayerId(101)));
        assert_eq!(pieces.iter().filter(|p| p.kind == PieceKind::Pawn).count(), 2);
    }

    #[test]
    fn test_single_row_board_has_no_hazards() {
        let mut board = Board::new(Geometry::new(5, 1));
        let mut rng = GameRng::new(9);
        let mut ids = IdAllocator::default();
        let before = rng.state();

        populate(&mut board, &mut rng, &mut ids, &HazardConfig::default(), &[PlayerId(1)]);

        assert_eq!(board.pieces().len(), 1);
        // No row qualifies for any roll.
        assert_eq!(rng.state(), before);
    }
}
