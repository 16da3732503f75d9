//! # chute-ledger
//!
//! A deterministic rules engine for a chutes-and-ladders card game, built
//! around an append-only action ledger.
//!
//! ## Design Principles
//!
//! 1. **The log is the game**: every change is a `GameAction` appended by
//!    `Engine::submit`. Replaying the log on a fresh engine reproduces the
//!    state exactly.
//!
//! 2. **One random stream**: all randomness comes from a seeded ChaCha
//!    stream stored in the state. Computed results (die rolls, revealed
//!    cards) are written back onto log entries and checked on replay.
//!
//! 3. **All-or-nothing actions**: an action is validated in full before
//!    anything is mutated. A rejected action leaves state, stream and log
//!    untouched.
//!
//! ## Modules
//!
//! - `core`: ids, players, configuration, random stream, actions, state
//! - `cards`: masked fields, targeting, cards and deck generation
//! - `board`: snake-path geometry, pieces, hazard generation, landing
//! - `rules`: turn-phase guards, resolvers and the ledger `Engine`
//! - `error`: rejection and snapshot errors

pub mod core;
pub mod cards;
pub mod board;
pub mod rules;
pub mod error;

pub use crate::core::{
    ActionKind, CardId, GameAction, GameRng, GameRngState, GameState, GameType, PieceId,
    Player, PlayerId, RulesConfig,
};
pub use crate::cards::{Card, CardAction, RevealedCard};
pub use crate::board::{Board, BoardPiece, Geometry, Position};
pub use crate::rules::{Engine, LedgerObserver};
pub use crate::error::{RulesError, SnapshotError};
