//! Turn-phase guards.
//!
//! Pure predicates over the current player's turn segment (the log entries
//! since the last end-turn) plus hand and deck sizes. A turn action is
//! accepted only while its guard holds; guards never mutate.
//!
//! A turn runs through two stages:
//! - **normal**: move the pawn once, draw, play a card and resolve its effect
//! - **closing**: once nothing normal is left, redact one card, then pass one
//!
//! Ending the turn is allowed at any point except while a played card is
//! waiting for its effect.

use smallvec::SmallVec;

use crate::core::{ActionKind, GameState, Player};

fn segment_has(state: &GameState, kind: ActionKind) -> bool {
    state.turn_segment().any(|a| a.kind() == kind)
}

fn current(state: &GameState) -> Option<&Player> {
    state.current_player().and_then(|id| state.player(id))
}

/// The deck has cards, and the hand is below its limit or nothing was drawn yet.
#[must_use]
pub fn can_draw_card(state: &GameState) -> bool {
    let Some(player) = current(state) else {
        return false;
    };
    if state.deck().is_empty() {
        return false;
    }
    player.hand.len() < state.config().max_hand_size || !segment_has(state, ActionKind::DrawCard)
}

/// The pawn has not moved this segment.
#[must_use]
pub fn can_move_pawn(state: &GameState) -> bool {
    current(state).is_some() && !segment_has(state, ActionKind::MovePawn)
}

/// Over the hand limit or nothing played yet, and no card is awaiting its effect.
#[must_use]
pub fn can_play_card(state: &GameState) -> bool {
    let Some(player) = current(state) else {
        return false;
    };
    let allowance =
        player.hand.len() > state.config().max_hand_size || !segment_has(state, ActionKind::PlayCard);
    allowance && !can_submit_card_effect(state)
}

/// The previous entry played a card whose effect is still due.
#[must_use]
pub fn can_submit_card_effect(state: &GameState) -> bool {
    current(state).is_some()
        && state
            .last_action()
            .is_some_and(|a| a.kind() == ActionKind::PlayCard)
}

fn normal_actions_left(state: &GameState) -> bool {
    can_move_pawn(state)
        || can_draw_card(state)
        || can_play_card(state)
        || can_submit_card_effect(state)
}

/// Closing stage, nothing redacted yet.
#[must_use]
pub fn should_redact_card(state: &GameState) -> bool {
    current(state).is_some()
        && !normal_actions_left(state)
        && !segment_has(state, ActionKind::RedactCard)
}

/// Closing stage, redaction done (or skipped), nothing passed yet.
#[must_use]
pub fn should_pass_card(state: &GameState) -> bool {
    current(state).is_some()
        && !normal_actions_left(state)
        && !should_redact_card(state)
        && !segment_has(state, ActionKind::PassCard)
}

/// No card is awaiting its effect.
///
/// Stricter than the browser game, which let a turn end with a played card
/// still unresolved; logs recorded there with that shape do not replay here.
#[must_use]
pub fn can_end_turn(state: &GameState) -> bool {
    current(state).is_some() && !can_submit_card_effect(state)
}

/// Players are seated, the board is set up and the hands are dealt.
///
/// Turn actions are only accepted once this holds.
#[must_use]
pub fn is_setup_complete(state: &GameState) -> bool {
    [ActionKind::CreatePlayers, ActionKind::SetupBoard, ActionKind::DealCards]
        .into_iter()
        .all(|kind| state.has_logged(kind))
}

/// Whether the guard for `kind` currently holds. Setup kinds have no
/// phase and always pass.
#[must_use]
pub fn allows(state: &GameState, kind: ActionKind) -> bool {
    match kind {
        ActionKind::MovePawn => can_move_pawn(state),
        ActionKind::PlayCard => can_play_card(state),
        ActionKind::CardEffect => can_submit_card_effect(state),
        ActionKind::RedactCard => should_redact_card(state),
        ActionKind::PassCard => should_pass_card(state),
        ActionKind::DrawCard => can_draw_card(state),
        ActionKind::EndTurn => can_end_turn(state),
        _ => true,
    }
}

/// Turn action kinds the current player may submit now.
#[must_use]
pub fn legal_kinds(state: &GameState) -> SmallVec<[ActionKind; 7]> {
    [
        ActionKind::MovePawn,
        ActionKind::DrawCard,
        ActionKind::PlayCard,
        ActionKind::CardEffect,
        ActionKind::RedactCard,
        ActionKind::PassCard,
        ActionKind::EndTurn,
    ]
    .into_iter()
    .filter(|kind| allows(state, *kind))
    .collect()
}
