//! Turn-action resolution.
//!
//! Resolution runs in two passes:
//!
//! 1. [`prepare`] validates against a shared borrow of the state. Anything
//!    that draws from the random stream (die roll, card reveal) runs on a
//!    clone of the stream, and the result is compared with the payload the
//!    action already carries, if any.
//! 2. [`apply`] commits the advanced stream and performs the mutation. It
//!    cannot fail.
//!
//! A rejected action therefore never leaves a trace on the state.

use smallvec::SmallVec;
use tracing::debug;

use super::phase;
use crate::board::{sample_far_end, Board, BoardPiece, LandingOutcome, Position};
use crate::cards::{Card, Direction, PieceKind, RedactField, RevealedCard, RevealedEffect, Selector};
use crate::core::{CardId, GameAction, GameRng, GameState, PieceId, PlayerId};
use crate::error::RulesError;

/// What a validated turn action will do.
#[derive(Clone, Debug)]
enum Plan {
    Move { roll: u8 },
    Play { card: CardId },
    Effect { card: RevealedCard, target: Option<PieceId> },
    Redact { card: CardId, field: RedactField },
    Pass { card: CardId },
    Draw,
    EndTurn,
}

/// A turn action that passed validation.
#[derive(Clone, Debug)]
pub(crate) struct Prepared {
    actor: PlayerId,
    plan: Plan,
    /// Advanced stream, for actions that drew from it.
    rng: Option<GameRng>,
    /// The log entry, payloads filled in.
    entry: GameAction,
}

fn hand_card(state: &GameState, player: PlayerId, card: CardId) -> Result<&Card, RulesError> {
    state
        .player(player)
        .and_then(|p| p.card(card))
        .ok_or(RulesError::InvalidCardReference(card))
}

/// The revealed card cached on the previous entry, if it played `card`.
fn card_in_play(state: &GameState, card: CardId) -> Result<&RevealedCard, RulesError> {
    match state.last_action() {
        Some(GameAction::PlayCard {
            card: Some(played),
            revealed: Some(revealed),
            ..
        }) if *played == card => Ok(revealed),
        _ => Err(RulesError::InvalidCardReference(card)),
    }
}

/// Validate a turn action without mutating anything.
pub(crate) fn prepare(state: &GameState, action: GameAction) -> Result<Prepared, RulesError> {
    let kind = action.kind();
    let current = state.current_player();
    let Some(actor) = action.actor().filter(|a| Some(*a) == current) else {
        return Err(RulesError::WrongActor {
            actor: action.actor(),
            current,
        });
    };

    if !phase::is_setup_complete(state) || !phase::allows(state, kind) {
        return Err(RulesError::PhaseViolation(kind));
    }

    let required = |card: Option<CardId>| card.ok_or(RulesError::MissingRequiredCard(kind));

    let (plan, rng, entry) = match action {
        GameAction::MovePawn { player, die_roll } => {
            let mut rng = state.rng.clone();
            let roll = rng.roll(state.config.die_faces);
            if die_roll.is_some_and(|r| r != roll) {
                return Err(RulesError::PayloadMismatch(kind));
            }
            let entry = GameAction::MovePawn {
                player,
                die_roll: Some(roll),
            };
            (Plan::Move { roll }, Some(rng), entry)
        }
        GameAction::PlayCard {
            player,
            card,
            revealed,
        } => {
            let card_id = required(card)?;
            let held = hand_card(state, player, card_id)?;
            let mut rng = state.rng.clone();
            let fresh = held.reveal(&mut rng);
            if revealed.is_some_and(|r| r != fresh) {
                return Err(RulesError::PayloadMismatch(kind));
            }
            let entry = GameAction::PlayCard {
                player,
                card: Some(card_id),
                revealed: Some(fresh),
            };
            (Plan::Play { card: card_id }, Some(rng), entry)
        }
        GameAction::CardEffect {
            player,
            card,
            target,
        } => {
            let card_id = required(card)?;
            let revealed = card_in_play(state, card_id)?;
            if let Some(target) = target {
                let piece = state
                    .board
                    .piece(target)
                    .ok_or(RulesError::InvalidTargetReference(target))?;
                if let Some((Selector::Target, filter)) = revealed.effect.selection() {
                    let expected = filter.unwrap_or(PieceKind::Anything);
                    if !expected.matches(piece.kind) {
                        return Err(RulesError::TargetKindMismatch {
                            piece: target,
                            expected,
                        });
                    }
                }
            }
            let plan = Plan::Effect {
                card: revealed.clone(),
                target,
            };
            (plan, None, GameAction::card_effect(player, card_id, target))
        }
        GameAction::RedactCard {
            player,
            card,
            field,
        } => {
            let card_id = required(card)?;
            let held = hand_card(state, player, card_id)?;
            if held.field(field).is_none() {
                return Err(RulesError::MissingCardField {
                    card: card_id,
                    field,
                });
            }
            let plan = Plan::Redact {
                card: card_id,
                field,
            };
            (plan, None, GameAction::redact_card(player, card_id, field))
        }
        GameAction::PassCard { player, card } => {
            let card_id = required(card)?;
            hand_card(state, player, card_id)?;
            (Plan::Pass { card: card_id }, None, GameAction::pass_card(player, card_id))
        }
        GameAction::DrawCard { player } => (Plan::Draw, None, GameAction::draw_card(player)),
        GameAction::EndTurn { player } => (Plan::EndTurn, None, GameAction::end_turn(player)),
        // Setup actions carry no actor and never get here.
        _ => return Err(RulesError::PhaseViolation(kind)),
    };

    Ok(Prepared {
        actor,
        plan,
        rng,
        entry,
    })
}

/// Commit a prepared action. Returns the entry to append.
pub(crate) fn apply(state: &mut GameState, prepared: Prepared) -> GameAction {
    let Prepared {
        actor,
        plan,
        rng,
        entry,
    } = prepared;
    if let Some(rng) = rng {
        state.rng = rng;
    }

    match plan {
        Plan::Move { roll } => {
            let outcome = move_pawns(state, actor, roll);
            debug!(player = %actor, roll, score_changes = outcome.changes.len(), "pawn moved");
        }
        Plan::Play { card } => {
            if let Some(player) = state.player_mut(actor) {
                player.take_card(card);
            }
        }
        Plan::Effect { card, target } => {
            let outcome = execute_card(state, &card, target, actor);
            debug!(
                player = %actor,
                card = %card.id,
                action = ?card.effect.action(),
                score_changes = outcome.changes.len(),
                "card effect resolved"
            );
        }
        Plan::Redact { card, field } => {
            if let Some(flags) = state
                .player_mut(actor)
                .and_then(|p| p.card_mut(card))
                .and_then(|c| c.field_mut(field))
            {
                flags.conceal();
            }
        }
        Plan::Pass { card } => pass_card(state, actor, card),
        Plan::Draw => {
            state.draw_into(actor);
        }
        Plan::EndTurn => end_turn(state, actor),
    }

    entry
}

// === Resolvers ===

/// Roll result: every piece the player owns moves forward, then lands.
fn move_pawns(state: &mut GameState, actor: PlayerId, roll: u8) -> LandingOutcome {
    let card = RevealedEffect::Move {
        selector: Selector::Own,
        filter: None,
        distance: roll,
        direction: Direction::Forward,
    };
    run_effect(state, card, None, actor)
}

fn pass_card(state: &mut GameState, actor: PlayerId, card: CardId) {
    let Some(next) = state.next_player_after(actor) else {
        return;
    };
    let Some(taken) = state.player_mut(actor).and_then(|p| p.take_card(card)) else {
        return;
    };
    if let Some(receiver) = state.player_mut(next) {
        receiver.hand.push(taken);
    }
}

fn end_turn(state: &mut GameState, actor: PlayerId) {
    let Some(next) = state.next_player_after(actor) else {
        return;
    };
    state.current_player = Some(next);

    if !state.board.has_pawn(next) {
        let id = state.ids.next_piece();
        state.board.push(BoardPiece::pawn(id, next, Position::ORIGIN));
        debug!(player = %next, pawn = %id, "pawn respawned");
    }
}

/// Apply a revealed card for `actor`, returning the score changes it caused.
pub(crate) fn execute_card(
    state: &mut GameState,
    card: &RevealedCard,
    target: Option<PieceId>,
    actor: PlayerId,
) -> LandingOutcome {
    run_effect(state, card.effect.clone(), target, actor)
}

fn run_effect(
    state: &mut GameState,
    effect: RevealedEffect,
    target: Option<PieceId>,
    actor: PlayerId,
) -> LandingOutcome {
    let mut outcome = LandingOutcome::default();

    match effect {
        RevealedEffect::Move {
            selector,
            filter,
            distance,
            direction,
        } => {
            let selected = state.board.select(selector, filter, target, actor);
            for &id in &selected {
                state.board.advance(id, direction, u32::from(distance));
            }
            for id in selected {
                outcome.merge(state.board.land(id, &state.config.scoring));
            }
        }
        RevealedEffect::Grow { selector, .. } => {
            resize_selected(&mut state.board, selector, target, true);
        }
        RevealedEffect::Shrink { selector, .. } => {
            resize_selected(&mut state.board, selector, target, false);
        }
        RevealedEffect::Remove {
            selector,
            filter,
            piece,
            distance,
            direction,
        } => {
            let selected = operation_selection(&state.board, selector, filter, target, actor);
            for tile in walked_tiles(&state.board, &selected, direction, distance) {
                let top = state
                    .board
                    .pieces()
                    .iter()
                    .find(|p| p.pos == tile)
                    .filter(|p| piece.matches(p.kind))
                    .map(|p| p.id);
                if let Some(id) = top {
                    state.board.remove(id);
                }
            }
        }
        RevealedEffect::Place {
            selector,
            filter,
            piece,
            distance,
            direction,
        } => {
            let selected = operation_selection(&state.board, selector, filter, target, actor);
            for tile in walked_tiles(&state.board, &selected, direction, distance) {
                place_piece(state, piece, tile, actor, &mut outcome);
            }
        }
        RevealedEffect::Swap {
            selector,
            filter,
            piece,
        } => {
            for id in operation_selection(&state.board, selector, filter, target, actor) {
                swap_piece(&mut state.board, id, piece, actor);
            }
        }
        RevealedEffect::Draw { count } => {
            for _ in 0..count {
                if !state.draw_into(actor) {
                    break;
                }
            }
        }
    }

    state.apply_scores(&outcome);
    outcome
}

/// Grow and shrink reach every long piece for `All`, whatever the filter;
/// any other selector reaches only the target.
fn resize_selected(board: &mut Board, selector: Selector, target: Option<PieceId>, grow: bool) {
    let selected: SmallVec<[PieceId; 8]> = board
        .pieces()
        .iter()
        .filter(|p| selector == Selector::All || Some(p.id) == target)
        .map(|p| p.id)
        .collect();
    for id in selected {
        board.resize(id, grow);
    }
}

/// Selection for remove, place and swap. A targeted piece must be exactly
/// the filter kind, so `Target` with the `Anything` filter selects nothing.
fn operation_selection(
    board: &Board,
    selector: Selector,
    filter: Option<PieceKind>,
    target: Option<PieceId>,
    actor: PlayerId,
) -> SmallVec<[PieceId; 8]> {
    if selector == Selector::Target && filter == Some(PieceKind::Anything) {
        return SmallVec::new();
    }
    board.select(selector, filter, target, actor)
}

/// Every tile visited walking `distance` steps from each selected piece.
fn walked_tiles(
    board: &Board,
    selected: &[PieceId],
    direction: Direction,
    distance: u8,
) -> SmallVec<[Position; 8]> {
    let geometry = board.geometry();
    let mut tiles = SmallVec::new();
    for piece in selected.iter().filter_map(|id| board.piece(*id)) {
        let mut pos = piece.pos;
        for _ in 0..distance {
            pos = geometry.step(pos, direction);
            tiles.push(pos);
        }
    }
    tiles
}

fn place_piece(
    state: &mut GameState,
    kind: PieceKind,
    tile: Position,
    actor: PlayerId,
    outcome: &mut LandingOutcome,
) {
    if kind == PieceKind::Anything {
        return;
    }
    let id = state.ids.next_piece();
    match kind {
        PieceKind::Ladder | PieceKind::Chute => {
            let geometry = state.board.geometry();
            let end = sample_far_end(&mut state.rng, geometry, &state.config.hazards, kind, tile);
            state.board.push(BoardPiece::long(id, kind, tile, end));
        }
        PieceKind::Pawn => {
            state.board.push(BoardPiece::pawn(id, actor, tile));
            outcome.merge(state.board.land(id, &state.config.scoring));
        }
        _ => state.board.push(BoardPiece::new(id, kind, tile)),
    }
}

fn swap_piece(board: &mut Board, id: PieceId, kind: PieceKind, actor: PlayerId) {
    if kind == PieceKind::Anything {
        return;
    }
    let geometry = board.geometry();
    let Some(piece) = board.piece_mut(id) else {
        return;
    };
    piece.kind = kind;
    piece.far_end = match kind {
        PieceKind::Ladder => Some(Position::new(piece.pos.x, geometry.clamp_y(piece.pos.y + 1))),
        PieceKind::Chute => Some(Position::new(piece.pos.x, geometry.clamp_y(piece.pos.y - 1))),
        _ => None,
    };
    piece.owner = (kind == PieceKind::Pawn).then_some(actor);
}
