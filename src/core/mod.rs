//! Core engine types: entities, players, state, actions, RNG, configuration.
//!
//! These are the building blocks the rules operate on. Rules are tuned via
//! `RulesConfig` rather than by modifying the core.

pub mod entity;
pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use entity::{CardId, IdAllocator, PieceId, PlayerId};
pub use player::Player;
pub use rng::{GameRng, GameRngState};
pub use config::{CardWeight, GameType, HazardConfig, RulesConfig, ScoringConfig};
pub use action::{ActionKind, GameAction};
pub use state::GameState;
