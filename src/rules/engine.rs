//! The action ledger.
//!
//! `Engine` owns the `GameState` and is its only writer. Every change goes
//! through [`Engine::submit`], which:
//! - routes setup actions (each allowed once) to the setup resolvers
//! - checks turn actions against the actor, the phase guards and the
//!   referenced cards and pieces before touching anything
//! - fills in computed payloads (die roll, revealed card) and appends the
//!   entry to the log
//! - notifies observers
//!
//! A game shipped as a log replays through the same entry point, so two
//! engines fed the same log end in the same state.
//!
//! ## Example
//!
//! ```
//! use chute_ledger::core::GameAction;
//! use chute_ledger::rules::Engine;
//!
//! let mut engine = Engine::new(Some("abc"));
//! engine.setup_game(2, 8, 8).unwrap();
//!
//! let first = engine.state().current_player().unwrap();
//! engine.submit(GameAction::move_pawn(first)).unwrap();
//! engine.submit(GameAction::end_turn(first)).unwrap();
//!
//! let log: Vec<GameAction> = engine.state().log().iter().cloned().collect();
//! let replica = Engine::replay_from(None, &log).unwrap();
//! assert_eq!(replica.state(), engine.state());
//! ```

use tracing::{debug, warn};

use super::{resolve, setup};
use crate::core::{GameAction, GameRng, GameState, GameType, RulesConfig};
use crate::error::{RulesError, SnapshotError};

/// Hooks fired after the ledger changes.
///
/// Observers see the state after the action was applied and appended.
pub trait LedgerObserver {
    /// Called after every appended action, setup included.
    fn action_appended(&mut self, _state: &GameState, _action: &GameAction) {}

    /// Called after an end-turn entry, following `action_appended`.
    fn turn_ended(&mut self, _state: &GameState) {}
}

/// Deterministic rules engine for one game.
pub struct Engine {
    state: GameState,
    observers: Vec<Box<dyn LedgerObserver>>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Engine {
    /// Create an engine with the default rules for local play.
    #[must_use]
    pub fn new(seed: Option<&str>) -> Self {
        Self {
            state: GameState::new(
                GameRng::from_seed_str(seed),
                RulesConfig::default(),
                GameType::default(),
            ),
            observers: Vec::new(),
        }
    }

    /// Create an engine with custom rules.
    pub fn with_config(
        seed: Option<&str>,
        config: RulesConfig,
        game_type: GameType,
    ) -> Result<Self, RulesError> {
        config.validate()?;
        Ok(Self {
            state: GameState::new(GameRng::from_seed_str(seed), config, game_type),
            observers: Vec::new(),
        })
    }

    /// Rebuild a game from its log.
    ///
    /// The engine starts from `seed`; a log that begins with its own init
    /// entry resets to the stream captured there, so the seed only matters
    /// for logs without one. Any rejected entry aborts with `ReplayDesync`.
    pub fn replay_from(seed: Option<&str>, actions: &[GameAction]) -> Result<Self, RulesError> {
        Self::replay_with_config(seed, RulesConfig::default(), actions)
    }

    /// [`Engine::replay_from`] with custom rules.
    pub fn replay_with_config(
        seed: Option<&str>,
        config: RulesConfig,
        actions: &[GameAction],
    ) -> Result<Self, RulesError> {
        let mut engine = Self::with_config(seed, config, GameType::default())?;
        for (index, action) in actions.iter().enumerate() {
            if let Err(err) = engine.submit(action.clone()) {
                warn!(index, kind = %action.kind(), error = %err, "replay desync");
                return Err(RulesError::ReplayDesync {
                    index,
                    source: Box::new(err),
                });
            }
        }
        Ok(engine)
    }

    // === Accessors ===

    /// Read-only view of the state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Register an observer.
    pub fn add_observer(&mut self, observer: Box<dyn LedgerObserver>) {
        self.observers.push(observer);
    }

    // === Submission ===

    /// Validate, apply and append one action.
    ///
    /// On error nothing was changed and nothing was appended.
    pub fn submit(&mut self, action: GameAction) -> Result<(), RulesError> {
        let kind = action.kind();
        let actor = action.actor();

        let result = if kind.is_setup() {
            self.apply_setup(action)
        } else {
            resolve::prepare(&self.state, action)
                .map(|prepared| resolve::apply(&mut self.state, prepared))
        };

        match result {
            Ok(entry) => {
                self.state.log.push_back(entry.clone());
                debug!(
                    kind = %kind,
                    actor = ?actor,
                    log_len = self.state.log.len(),
                    "action appended"
                );
                self.notify(&entry);
                Ok(())
            }
            Err(err) => {
                warn!(kind = %kind, actor = ?actor, error = %err, "action rejected");
                Err(err)
            }
        }
    }

    /// Run the whole setup sequence: players, board, deck, shuffle, deal.
    pub fn setup_game(&mut self, players: usize, width: u32, height: u32) -> Result<(), RulesError> {
        self.submit(GameAction::CreatePlayers { count: players })?;
        self.submit(GameAction::SetupBoard { width, height })?;
        self.submit(GameAction::GenerateDeck)?;
        self.submit(GameAction::ShuffleDeck)?;
        self.submit(GameAction::DealCards)
    }

    fn apply_setup(&mut self, action: GameAction) -> Result<GameAction, RulesError> {
        let kind = action.kind();

        if let GameAction::InitGame { rng, game_type } = &action {
            // Only a fresh ledger may be re-seeded; the new init entry replaces the synthetic one.
            if self.state.log.len() > 1 {
                return Err(RulesError::DuplicateSetupAction(kind));
            }
            let config = self.state.config.clone();
            self.state = GameState::new(GameRng::from_state(rng), config, *game_type);
            self.state.log.clear();
            return Ok(action);
        }

        if self.state.has_logged(kind) {
            return Err(RulesError::DuplicateSetupAction(kind));
        }

        match &action {
            GameAction::CreatePlayers { count } => setup::create_players(&mut self.state, *count)?,
            GameAction::SetupBoard { width, height } => {
                setup::setup_board(&mut self.state, *width, *height)?;
            }
            GameAction::GenerateDeck => setup::generate_deck(&mut self.state),
            GameAction::ShuffleDeck => setup::shuffle_deck(&mut self.state),
            GameAction::DealCards => setup::deal_cards(&mut self.state)?,
            _ => return Err(RulesError::PhaseViolation(kind)),
        }
        Ok(action)
    }

    fn notify(&mut self, entry: &GameAction) {
        let turn_ended = matches!(entry, GameAction::EndTurn { .. });
        for observer in &mut self.observers {
            observer.action_appended(&self.state, entry);
            if turn_ended {
                observer.turn_ended(&self.state);
            }
        }
    }

    // === Snapshots ===

    /// Serialize the whole state as JSON.
    pub fn save(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(&self.state)?)
    }

    /// Replace the state with a JSON snapshot. Observers are kept.
    pub fn restore(&mut self, snapshot: &str) -> Result<(), SnapshotError> {
        let state: GameState = serde_json::from_str(snapshot)?;
        self.install(state)
    }

    /// Serialize the whole state with bincode.
    pub fn save_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(&self.state)?)
    }

    /// Replace the state with a bincode snapshot. Observers are kept.
    pub fn restore_bytes(&mut self, snapshot: &[u8]) -> Result<(), SnapshotError> {
        let state: GameState = bincode::deserialize(snapshot)?;
        self.install(state)
    }

    fn install(&mut self, state: GameState) -> Result<(), SnapshotError> {
        state
            .config
            .validate()
            .map_err(|err| SnapshotError::Invalid(err.to_string()))?;
        if let Some(current) = state.current_player {
            if state.player(current).is_none() {
                return Err(SnapshotError::Invalid(format!(
                    "current player {current} is not seated"
                )));
            }
        }
        if !matches!(state.log.front(), Some(GameAction::InitGame { .. })) {
            return Err(SnapshotError::Invalid("log does not start with an init entry".into()));
        }
        debug!(log_len = state.log.len(), "state restored");
        self.state = state;
        Ok(())
    }
}
