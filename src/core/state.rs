//! Game state: the aggregate root every action mutates.
//!
//! ## GameState
//!
//! - Random stream and shared id counter
//! - Rules configuration and game type
//! - Board, players (seat order), deck (top = end of vec)
//! - The append-only action log and the current-player pointer
//!
//! Everything here is plain data and serializes as one document. The log
//! uses an `im` persistent vector so observers and snapshots clone it
//! cheaply. There are no hash maps, so equal states encode identically.
//!
//! Fields are crate-visible; outside the crate the state is read-only and
//! every change goes through `Engine::submit`.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::{ActionKind, GameAction};
use super::config::{GameType, RulesConfig};
use super::entity::{IdAllocator, PlayerId};
use super::player::Player;
use super::rng::GameRng;
use crate::board::{Board, Position};
use crate::cards::{Card, PieceKind, RevealedCard, Selector};

/// Complete game state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) rng: GameRng,
    pub(crate) ids: IdAllocator,
    pub(crate) config: RulesConfig,
    pub(crate) game_type: GameType,
    pub(crate) board: Board,
    pub(crate) players: Vec<Player>,
    pub(crate) deck: Vec<Card>,
    pub(crate) log: Vector<GameAction>,
    pub(crate) current_player: Option<PlayerId>,
}

impl GameState {
    /// Create a fresh state whose log holds the synthetic init entry.
    #[must_use]
    pub fn new(rng: GameRng, config: RulesConfig, game_type: GameType) -> Self {
        let mut log = Vector::new();
        log.push_back(GameAction::InitGame {
            rng: rng.state(),
            game_type,
        });

        Self {
            rng,
            ids: IdAllocator::default(),
            config,
            game_type,
            board: Board::default(),
            players: Vec::new(),
            deck: Vec::new(),
            log,
            current_player: None,
        }
    }

    // === Accessors ===

    /// The random stream (read-only; peeking requires a clone).
    #[must_use]
    pub fn rng(&self) -> &GameRng {
        &self.rng
    }

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    #[must_use]
    pub fn game_type(&self) -> GameType {
        self.game_type
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Players in seat order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Get a player.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Remaining deck; the last card is drawn first.
    #[must_use]
    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    /// The action log, oldest first.
    #[must_use]
    pub fn log(&self) -> &Vector<GameAction> {
        &self.log
    }

    /// The most recent log entry.
    #[must_use]
    pub fn last_action(&self) -> Option<&GameAction> {
        self.log.last()
    }

    /// The player whose turn it is; `None` before players exist.
    #[must_use]
    pub fn current_player(&self) -> Option<PlayerId> {
        self.current_player
    }

    /// Whether a setup action of this kind is already in the log.
    #[must_use]
    pub fn has_logged(&self, kind: ActionKind) -> bool {
        self.log.iter().any(|a| a.kind() == kind)
    }

    /// Actions since the most recent end-turn entry (the turn segment).
    pub fn turn_segment(&self) -> impl Iterator<Item = &GameAction> + '_ {
        let start = self
            .log
            .iter()
            .rposition(|a| a.kind() == ActionKind::EndTurn)
            .map_or(0, |i| i + 1);
        self.log.iter().skip(start)
    }

    /// The seat after `player`, wrapping around.
    #[must_use]
    pub fn next_player_after(&self, player: PlayerId) -> Option<PlayerId> {
        let seat = self.players.iter().position(|p| p.id == player)?;
        Some(self.players[(seat + 1) % self.players.len()].id)
    }

    // === Ownership transfers ===

    /// Pop the top of the deck into a player's hand. Returns whether a card moved.
    pub(crate) fn draw_into(&mut self, player: PlayerId) -> bool {
        let Some(seat) = self.players.iter().position(|p| p.id == player) else {
            return false;
        };
        match self.deck.pop() {
            Some(card) => {
                self.players[seat].hand.push(card);
                true
            }
            None => false,
        }
    }

    /// Apply landing score changes to their players.
    pub(crate) fn apply_scores(&mut self, outcome: &crate::board::LandingOutcome) {
        for change in &outcome.changes {
            if let Some(player) = self.player_mut(change.player) {
                player.score += change.delta;
            }
        }
    }

    // === Queries ===

    /// The last tile of the snake path.
    #[must_use]
    pub fn winning_tile(&self) -> Position {
        self.board.geometry().winning_tile()
    }

    /// A pawn stands on the winning tile, or every hand is empty.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        if self.players.is_empty() {
            return false;
        }
        let win = self.winning_tile();
        let pawn_home = self
            .board
            .pieces()
            .iter()
            .any(|p| p.kind == PieceKind::Pawn && p.pos == win);
        pawn_home || self.players.iter().all(|p| p.hand.is_empty())
    }

    /// Highest-scoring player; ties go to the later seat.
    #[must_use]
    pub fn leader(&self) -> Option<&Player> {
        self.players
            .iter()
            .reduce(|best, p| if best.score > p.score { best } else { p })
    }

    /// Whether a targeted card has something on the board to aim at.
    ///
    /// Only `Target` selections need a target; every other card reports false.
    #[must_use]
    pub fn has_valid_targets(&self, card: &RevealedCard) -> bool {
        match card.effect.selection() {
            Some((Selector::Target, filter)) => {
                self.board.any_of_kind(filter.unwrap_or(PieceKind::Anything))
            }
            _ => false,
        }
    }
}
