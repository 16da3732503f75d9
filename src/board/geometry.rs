//! Track geometry: a boustrophedon (snake) path over a `width × height` grid.
//!
//! Even rows run left to right, odd rows right to left. Tile numbers start
//! at 1 on the origin `(0, 0)` and end on the winning tile.
//!
//! ```
//! use chute_ledger::board::{Geometry, Position};
//!
//! let geometry = Geometry::new(8, 8);
//! assert_eq!(geometry.tile_number(Position::new(0, 0)), 1);
//! assert_eq!(geometry.tile_number(Position::new(7, 1)), 9);
//! assert_eq!(geometry.winning_tile(), Position::new(0, 7));
//! ```

use serde::{Deserialize, Serialize};

use crate::cards::Direction;

/// A grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The start tile.
    pub const ORIGIN: Position = Position::new(0, 0);

    /// Chebyshev distance (king moves).
    #[must_use]
    pub fn chebyshev(self, other: Position) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

/// Board dimensions and path arithmetic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
}

impl Geometry {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether row `y` runs left to right.
    #[must_use]
    pub const fn row_forward(y: i32) -> bool {
        y % 2 == 0
    }

    /// Whether the position lies on the board.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// 1-based tile number along the snake path.
    #[must_use]
    pub fn tile_number(&self, pos: Position) -> i32 {
        let width = self.width as i32;
        let along = if Self::row_forward(pos.y) { pos.x } else { width - 1 - pos.x };
        1 + pos.y * width + along
    }

    /// The last tile of the path.
    #[must_use]
    pub fn winning_tile(&self) -> Position {
        let y = self.height as i32 - 1;
        let x = if Self::row_forward(y) { self.width as i32 - 1 } else { 0 };
        Position::new(x, y)
    }

    /// Step one tile along the path.
    ///
    /// At the end of a row, a forward step climbs one row and a backward
    /// step drops one row (same column, since the next row runs the other
    /// way); rows are clamped to the board.
    #[must_use]
    pub fn step(&self, pos: Position, dir: Direction) -> Position {
        let last_x = self.width as i32 - 1;
        let forward_row = Self::row_forward(pos.y);
        let at_forward_edge = if forward_row { pos.x == last_x } else { pos.x == 0 };
        let at_backward_edge = if forward_row { pos.x == 0 } else { pos.x == last_x };

        match dir {
            Direction::Forward if at_forward_edge => {
                Position::new(pos.x, (pos.y + 1).min(self.height as i32 - 1))
            }
            Direction::Backward if at_backward_edge => Position::new(pos.x, (pos.y - 1).max(0)),
            Direction::Forward => Position::new(pos.x + if forward_row { 1 } else { -1 }, pos.y),
            Direction::Backward => Position::new(pos.x + if forward_row { -1 } else { 1 }, pos.y),
        }
    }

    /// Step `n` tiles along the path.
    #[must_use]
    pub fn walk(&self, mut pos: Position, dir: Direction, n: u32) -> Position {
        for _ in 0..n {
            pos = self.step(pos, dir);
        }
        pos
    }

    /// Clamp a column to the board. An empty board clamps to 0.
    #[must_use]
    pub fn clamp_x(&self, x: i32) -> i32 {
        if self.width == 0 {
            return 0;
        }
        x.clamp(0, self.width as i32 - 1)
    }

    /// Clamp a row to the board. An empty board clamps to 0.
    #[must_use]
    pub fn clamp_y(&self, y: i32) -> i32 {
        if self.height == 0 {
            return 0;
        }
        y.clamp(0, self.height as i32 - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_numbers_follow_snake() {
        let g = Geometry::new(4, 3);
        assert_eq!(g.tile_number(Position::new(0, 0)), 1);
        assert_eq!(g.tile_number(Position::new(3, 0)), 4);
        assert_eq!(g.tile_number(Position::new(3, 1)), 5);
        assert_eq!(g.tile_number(Position::new(0, 1)), 8);
        assert_eq!(g.tile_number(Position::new(0, 2)), 9);
        assert_eq!(g.tile_number(g.winning_tile()), 12);
    }

    #[test]
    fn test_step_forward_visits_tiles_in_order() {
        let g = Geometry::new(4, 3);
        let mut pos = Position::ORIGIN;
        for expected in 2..=12 {
            pos = g.step(pos, Direction::Forward);
            assert_eq!(g.tile_number(pos), expected);
        }
        // Clamped at the last tile's row; stepping past the end stays on the board.
        let past = g.step(pos, Direction::Forward);
        assert!(g.contains(past));
    }

    #[test]
    fn test_step_backward_reverses_forward() {
        let g = Geometry::new(5, 5);
        let start = Position::new(2, 3);
        let there = g.walk(start, Direction::Forward, 7);
        assert_eq!(g.walk(there, Direction::Backward, 7), start);
    }

    #[test]
    fn test_backward_from_origin_stays() {
        let g = Geometry::new(8, 8);
        assert_eq!(g.step(Position::ORIGIN, Direction::Backward), Position::ORIGIN);
    }

    #[test]
    fn test_winning_tile_parity() {
        assert_eq!(Geometry::new(8, 8).winning_tile(), Position::new(0, 7));
        assert_eq!(Geometry::new(8, 7).winning_tile(), Position::new(7, 6));
    }

    #[test]
    fn test_empty_board_clamps_to_origin() {
        let g = Geometry::default();
        assert_eq!(g.clamp_x(5), 0);
        assert_eq!(g.clamp_y(-3), 0);
    }

    #[test]
    fn test_chebyshev() {
        assert_eq!(Position::new(1, 1).chebyshev(Position::new(2, 0)), 1);
        assert_eq!(Position::new(1, 1).chebyshev(Position::new(3, 1)), 2);
    }
}
