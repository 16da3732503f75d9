//! Game actions: the entries of the append-only ledger.
//!
//! Actions fall in two groups:
//! - **setup** (no actor): init, create players, set up board, generate,
//!   shuffle and deal the deck; each may appear at most once
//! - **turn** (actor required): move pawn, play card, card effect, redact,
//!   pass, draw, end turn
//!
//! Payloads the engine computes while applying an action (die roll,
//! revealed card) are written back onto the entry before it is appended,
//! so the log alone is enough to replay a game.

use serde::{Deserialize, Serialize};

use super::config::GameType;
use super::entity::{CardId, PieceId, PlayerId};
use super::rng::GameRngState;
use crate::cards::{RedactField, RevealedCard};

/// Discriminant of a `GameAction`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    InitGame,
    CreatePlayers,
    SetupBoard,
    GenerateDeck,
    ShuffleDeck,
    DealCards,
    MovePawn,
    PlayCard,
    CardEffect,
    RedactCard,
    PassCard,
    DrawCard,
    EndTurn,
}

impl ActionKind {
    /// Whether this is a setup action.
    #[must_use]
    pub const fn is_setup(self) -> bool {
        matches!(
            self,
            ActionKind::InitGame
                | ActionKind::CreatePlayers
                | ActionKind::SetupBoard
                | ActionKind::GenerateDeck
                | ActionKind::ShuffleDeck
                | ActionKind::DealCards
        )
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ActionKind::InitGame => "init-game",
            ActionKind::CreatePlayers => "create-players",
            ActionKind::SetupBoard => "setup-board",
            ActionKind::GenerateDeck => "generate-deck",
            ActionKind::ShuffleDeck => "shuffle-deck",
            ActionKind::DealCards => "deal-cards",
            ActionKind::MovePawn => "move-pawn",
            ActionKind::PlayCard => "play-card",
            ActionKind::CardEffect => "card-effect",
            ActionKind::RedactCard => "redact-card",
            ActionKind::PassCard => "pass-card",
            ActionKind::DrawCard => "draw-card",
            ActionKind::EndTurn => "end-turn",
        };
        f.write_str(name)
    }
}

/// One ledger entry. Immutable once appended.
///
/// Card ids are optional on the wire so a malformed action can be
/// rejected with `MissingRequiredCard` instead of failing to decode.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameAction {
    /// Synthetic first entry; captures the stream state the game starts from.
    InitGame {
        rng: GameRngState,
        game_type: GameType,
    },
    CreatePlayers {
        count: usize,
    },
    SetupBoard {
        width: u32,
        height: u32,
    },
    GenerateDeck,
    ShuffleDeck,
    DealCards,

    /// Roll the die and move the actor's pawns forward.
    MovePawn {
        player: PlayerId,
        /// Filled in by the engine; checked against the stream on replay.
        die_roll: Option<u8>,
    },
    /// Reveal a card from hand and take it out of the hand.
    PlayCard {
        player: PlayerId,
        card: Option<CardId>,
        /// Filled in by the engine; checked against the stream on replay.
        revealed: Option<RevealedCard>,
    },
    /// Apply the effect of the card played by the previous entry.
    CardEffect {
        player: PlayerId,
        card: Option<CardId>,
        target: Option<PieceId>,
    },
    /// Conceal one field of a card in hand.
    RedactCard {
        player: PlayerId,
        card: Option<CardId>,
        field: RedactField,
    },
    /// Hand a card to the next player.
    PassCard {
        player: PlayerId,
        card: Option<CardId>,
    },
    DrawCard {
        player: PlayerId,
    },
    EndTurn {
        player: PlayerId,
    },
}

impl GameAction {
    /// Move-pawn request; the engine rolls the die.
    #[must_use]
    pub fn move_pawn(player: PlayerId) -> Self {
        GameAction::MovePawn {
            player,
            die_roll: None,
        }
    }

    /// Play-card request; the engine reveals the card.
    #[must_use]
    pub fn play_card(player: PlayerId, card: CardId) -> Self {
        GameAction::PlayCard {
            player,
            card: Some(card),
            revealed: None,
        }
    }

    /// Card-effect request for the card in play.
    #[must_use]
    pub fn card_effect(player: PlayerId, card: CardId, target: Option<PieceId>) -> Self {
        GameAction::CardEffect {
            player,
            card: Some(card),
            target,
        }
    }

    /// Redact-card request.
    #[must_use]
    pub fn redact_card(player: PlayerId, card: CardId, field: RedactField) -> Self {
        GameAction::RedactCard {
            player,
            card: Some(card),
            field,
        }
    }

    /// Pass-card request.
    #[must_use]
    pub fn pass_card(player: PlayerId, card: CardId) -> Self {
        GameAction::PassCard {
            player,
            card: Some(card),
        }
    }

    /// Draw-card request.
    #[must_use]
    pub fn draw_card(player: PlayerId) -> Self {
        GameAction::DrawCard { player }
    }

    /// End-turn request.
    #[must_use]
    pub fn end_turn(player: PlayerId) -> Self {
        GameAction::EndTurn { player }
    }

    /// The discriminant.
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            GameAction::InitGame { .. } => ActionKind::InitGame,
            GameAction::CreatePlayers { .. } => ActionKind::CreatePlayers,
            GameAction::SetupBoard { .. } => ActionKind::SetupBoard,
            GameAction::GenerateDeck => ActionKind::GenerateDeck,
            GameAction::ShuffleDeck => ActionKind::ShuffleDeck,
            GameAction::DealCards => ActionKind::DealCards,
            GameAction::MovePawn { .. } => ActionKind::MovePawn,
            GameAction::PlayCard { .. } => ActionKind::PlayCard,
            GameAction::CardEffect { .. } => ActionKind::CardEffect,
            GameAction::RedactCard { .. } => ActionKind::RedactCard,
            GameAction::PassCard { .. } => ActionKind::PassCard,
            GameAction::DrawCard { .. } => ActionKind::DrawCard,
            GameAction::EndTurn { .. } => ActionKind::EndTurn,
        }
    }

    /// Whether this is a setup action.
    #[must_use]
    pub fn is_setup(&self) -> bool {
        self.kind().is_setup()
    }

    /// The acting player; `None` for setup actions.
    #[must_use]
    pub fn actor(&self) -> Option<PlayerId> {
        match *self {
            GameAction::MovePawn { player, .. }
            | GameAction::PlayCard { player, .. }
            | GameAction::CardEffect { player, .. }
            | GameAction::RedactCard { player, .. }
            | GameAction::PassCard { player, .. }
            | GameAction::DrawCard { player }
            | GameAction::EndTurn { player } => Some(player),
            _ => None,
        }
    }

    /// The referenced card, if any.
    #[must_use]
    pub fn card(&self) -> Option<CardId> {
        match *self {
            GameAction::PlayCard { card, .. }
            | GameAction::CardEffect { card, .. }
            | GameAction::RedactCard { card, .. }
            | GameAction::PassCard { card, .. } => card,
            _ => None,
        }
    }

    /// The referenced board piece, if any.
    #[must_use]
    pub fn target_piece(&self) -> Option<PieceId> {
        match *self {
            GameAction::CardEffect { target, .. } => target,
            _ => None,
        }
    }

    /// The revealed card cached on a play-card entry.
    #[must_use]
    pub fn revealed(&self) -> Option<&RevealedCard> {
        match self {
            GameAction::PlayCard { revealed, .. } => revealed.as_ref(),
            _ => None,
        }
    }
}
