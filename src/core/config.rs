//! Rules configuration.
//!
//! Games configure the engine at creation by providing a `RulesConfig`:
//! - hand and deck sizes, die faces
//! - `CardWeight` table for deck composition
//! - `HazardConfig`: per-row hazard probabilities and ladder/chute spans
//! - `ScoringConfig`: coin, bomb and winning-tile scores
//!
//! The config is stored in `GameState` and travels with snapshots, so
//! every replica of a game resolves with the same numbers.

use serde::{Deserialize, Serialize};

use crate::cards::CardAction;
use crate::error::RulesError;

/// How the game is being played. Recorded on the init entry; it only
/// informs collaborators (persistence, transport) and never changes rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameType {
    /// Local, one device passed between players.
    #[default]
    PassAndPlay,
    /// Asynchronous; the log is handed off at the end of each turn.
    PlayByMail,
    /// Direct connection between peers.
    PeerToPeer,
}

/// Probability of one action kind when sampling the deck.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardWeight {
    pub action: CardAction,
    pub weight: f64,
}

impl CardWeight {
    #[must_use]
    pub const fn new(action: CardAction, weight: f64) -> Self {
        Self { action, weight }
    }
}

/// Board generation parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HazardConfig {
    /// Chance of a ladder on each row that has a row above it.
    pub ladder_chance: f64,
    /// Chance of a chute on each row above the first.
    pub chute_chance: f64,
    /// Chance of a coin on each row above the first.
    pub coin_chance: f64,
    /// Chance of a bomb on each row above the first.
    pub bomb_chance: f64,
    /// Far-end column offset is drawn from `-jitter..=jitter`.
    pub jitter: u32,
    /// Far-end row offset is drawn from `1..=max_span` (rarely 0).
    pub max_span: u32,
}

impl Default for HazardConfig {
    fn default() -> Self {
        Self {
            ladder_chance: 0.5,
            chute_chance: 0.7,
            coin_chance: 0.5,
            bomb_chance: 0.5,
            jitter: 2,
            max_span: 3,
        }
    }
}

/// Landing scores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub coin_reward: i64,
    pub bomb_penalty: i64,
    pub win_reward: i64,
    /// Tiles a bomb pushes nearby pawns backwards.
    pub bomb_pushback: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            coin_reward: 25,
            bomb_penalty: 30,
            win_reward: 100,
            bomb_pushback: 3,
        }
    }
}

/// Largest accepted hand size, dealt or as a limit.
pub const MAX_HAND_SIZE: usize = 64;

/// Largest accepted number of deck draws.
pub const MAX_DECK_DRAWS: usize = 10_000;

/// Largest accepted ladder/chute jitter or span.
pub const MAX_HAZARD_REACH: u32 = 1024;

/// Complete rules configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Cards dealt to each player.
    pub hand_size: usize,

    /// Hand size gating the draw and play limits.
    pub max_hand_size: usize,

    /// Number of weighted samples taken when generating the deck.
    pub deck_draws: usize,

    /// Faces on the movement die.
    pub die_faces: u8,

    /// Deck composition; weights must sum to 1.
    pub card_weights: Vec<CardWeight>,

    pub hazards: HazardConfig,

    pub scoring: ScoringConfig,

    /// One colour per seat; its length caps the player count.
    pub player_colors: Vec<String>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            hand_size: 4,
            max_hand_size: 4,
            deck_draws: 100,
            die_faces: 6,
            card_weights: vec![
                CardWeight::new(CardAction::Move, 0.25),
                CardWeight::new(CardAction::Grow, 0.05),
                CardWeight::new(CardAction::Shrink, 0.05),
                CardWeight::new(CardAction::Place, 0.25),
                CardWeight::new(CardAction::Remove, 0.10),
                CardWeight::new(CardAction::Swap, 0.20),
                CardWeight::new(CardAction::Draw, 0.10),
            ],
            hazards: HazardConfig::default(),
            scoring: ScoringConfig::default(),
            player_colors: ["#FF0077", "#00FFFF", "#CC7700", "#00FF00", "#7700FF", "#FFFF77"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl RulesConfig {
    /// Set the dealt hand size.
    #[must_use]
    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }

    /// Set the hand-size threshold used by the turn guards.
    #[must_use]
    pub fn with_max_hand_size(mut self, size: usize) -> Self {
        self.max_hand_size = size;
        self
    }

    /// Set how many cards are sampled into the deck.
    #[must_use]
    pub fn with_deck_draws(mut self, draws: usize) -> Self {
        self.deck_draws = draws;
        self
    }

    /// Replace the deck composition table.
    #[must_use]
    pub fn with_card_weights(mut self, weights: Vec<CardWeight>) -> Self {
        self.card_weights = weights;
        self
    }

    /// Replace the board generation parameters.
    #[must_use]
    pub fn with_hazards(mut self, hazards: HazardConfig) -> Self {
        self.hazards = hazards;
        self
    }

    /// Replace the scoring table.
    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    /// Maximum number of seats.
    #[must_use]
    pub fn max_players(&self) -> usize {
        self.player_colors.len()
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<(), RulesError> {
        if self.hand_size == 0 {
            return Err(RulesError::InvalidConfig("hand size must be positive"));
        }
        if self.hand_size > MAX_HAND_SIZE || self.max_hand_size > MAX_HAND_SIZE {
            return Err(RulesError::InvalidConfig("hand size too large"));
        }
        if self.deck_draws > MAX_DECK_DRAWS {
            return Err(RulesError::InvalidConfig("too many deck draws"));
        }
        if self.hazards.jitter > MAX_HAZARD_REACH || self.hazards.max_span > MAX_HAZARD_REACH {
            return Err(RulesError::InvalidConfig("hazard reach too large"));
        }
        let chances = [
            self.hazards.ladder_chance,
            self.hazards.chute_chance,
            self.hazards.coin_chance,
            self.hazards.bomb_chance,
        ];
        if chances.iter().any(|c| !(0.0..=1.0).contains(c)) {
            return Err(RulesError::InvalidConfig("hazard chances must lie in [0, 1]"));
        }
        if self.die_faces == 0 {
            return Err(RulesError::InvalidConfig("die needs at least one face"));
        }
        if self.player_colors.is_empty() {
            return Err(RulesError::InvalidConfig("player palette is empty"));
        }
        if self.card_weights.iter().any(|w| !(0.0..=1.0).contains(&w.weight)) {
            return Err(RulesError::InvalidConfig("card weights must lie in [0, 1]"));
        }
        let total: f64 = self.card_weights.iter().map(|w| w.weight).sum();
        if (total - 1.0).abs() > 1e-9 {
            return Err(RulesError::InvalidConfig("card weights must sum to 1"));
        }
        Ok(())
    }
}
