//! Setup actions: players, board, deck.
//!
//! Each resolver validates first and mutates only once nothing can fail.
//! The at-most-once rule is enforced by the engine before these run.

use tracing::debug;

use crate::board::{populate, Board, Geometry};
use crate::cards::{build_deck, shuffle};
use crate::core::{GameState, Player, PlayerId};
use crate::error::RulesError;

/// Largest accepted board side.
pub const MAX_BOARD_SIDE: u32 = 1024;

/// Seat `count` players; the first seat becomes the current player.
pub fn create_players(state: &mut GameState, count: usize) -> Result<(), RulesError> {
    if count == 0 {
        return Err(RulesError::InvalidSetup("at least one player is required"));
    }
    if count > state.config.max_players() {
        return Err(RulesError::InvalidSetup("more players than seat colours"));
    }

    for seat in 0..count {
        let id = state.ids.next_player();
        let color = state.config.player_colors[seat].clone();
        state.players.push(Player::new(id, format!("P{seat}"), color));
    }
    state.current_player = state.players.first().map(|p| p.id);

    debug!(count, "players created");
    Ok(())
}

/// Size the board and populate it with hazards and one pawn per player.
pub fn setup_board(state: &mut GameState, width: u32, height: u32) -> Result<(), RulesError> {
    if width == 0 || height == 0 {
        return Err(RulesError::InvalidSetup("board needs at least one row and column"));
    }
    if width > MAX_BOARD_SIDE || height > MAX_BOARD_SIDE {
        return Err(RulesError::InvalidSetup("board side too large"));
    }

    let players: Vec<PlayerId> = state.players.iter().map(|p| p.id).collect();
    let mut board = Board::new(Geometry::new(width, height));
    populate(&mut board, &mut state.rng, &mut state.ids, &state.config.hazards, &players);
    state.board = board;
    Ok(())
}

/// Sample the deck from the configured weight table.
pub fn generate_deck(state: &mut GameState) {
    let deck = build_deck(
        &mut state.rng,
        &mut state.ids,
        &state.config.card_weights,
        state.config.deck_draws,
    );
    state.deck.extend(deck);
}

/// Shuffle the deck.
pub fn shuffle_deck(state: &mut GameState) {
    shuffle(&mut state.rng, &mut state.deck);
    debug!(cards = state.deck.len(), "deck shuffled");
}

/// Deal a full hand to every player in seat order, popping the deck top.
pub fn deal_cards(state: &mut GameState) -> Result<(), RulesError> {
    let hand_size = state.config.hand_size;
    let needed = hand_size.checked_mul(state.players.len());
    if needed.map_or(true, |n| state.deck.len() < n) {
        return Err(RulesError::InvalidSetup("not enough cards to deal"));
    }

    for player in &mut state.players {
        for _ in 0..hand_size {
            if let Some(card) = state.deck.pop() {
                player.hand.push(card);
            }
        }
    }

    debug!(hand_size, remaining = state.deck.len(), "cards dealt");
    Ok(())
}
