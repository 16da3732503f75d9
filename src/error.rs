//! Error types.
//!
//! Every `RulesError` rejects a single submitted action; the engine
//! guarantees nothing was mutated or appended when one is returned.

use thiserror::Error;

use crate::cards::{PieceKind, RedactField};
use crate::core::{ActionKind, CardId, PieceId, PlayerId};

/// Rejection of a submitted action.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("setup action {0} is already in the log")]
    DuplicateSetupAction(ActionKind),

    #[error("action by {actor:?} submitted while the current player is {current:?}")]
    WrongActor {
        actor: Option<PlayerId>,
        current: Option<PlayerId>,
    },

    #[error("{0} is not allowed in the current turn phase")]
    PhaseViolation(ActionKind),

    #[error("{0} is neither in the actor's hand nor the card in play")]
    InvalidCardReference(CardId),

    #[error("target {0} does not exist")]
    InvalidTargetReference(PieceId),

    #[error("target {piece} is not a {expected}")]
    TargetKindMismatch { piece: PieceId, expected: PieceKind },

    #[error("{0} requires a card")]
    MissingRequiredCard(ActionKind),

    #[error("{card} has no {field} field")]
    MissingCardField { card: CardId, field: RedactField },

    #[error("invalid setup: {0}")]
    InvalidSetup(&'static str),

    #[error("invalid rules config: {0}")]
    InvalidConfig(&'static str),

    #[error("{0} carries a result that does not match the random stream")]
    PayloadMismatch(ActionKind),

    #[error("replay diverged at log entry {index}: {source}")]
    ReplayDesync {
        index: usize,
        #[source]
        source: Box<RulesError>,
    },
}

/// Failure to save or restore a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot encoding: {0}")]
    Binary(#[from] bincode::Error),

    #[error("snapshot is not a valid game: {0}")]
    Invalid(String),
}
