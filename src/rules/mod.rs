//! Rules: turn-phase guards, setup and turn resolvers, and the ledger engine.
//!
//! - `phase`: which turn actions the current player may submit
//! - `setup` / `resolve`: what each action does to the state
//! - `Engine`: the single entry point that validates, applies and logs actions

pub mod phase;
pub mod setup;
mod resolve;
pub mod engine;

pub use engine::{Engine, LedgerObserver};
pub use phase::legal_kinds;
