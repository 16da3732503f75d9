//! Players: identity, hand and score.

use serde::{Deserialize, Serialize};

use super::entity::{CardId, PlayerId};
use crate::cards::Card;

/// A seated player.
///
/// The hand keeps deal/draw order; rules never depend on it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub color: String,
    pub hand: Vec<Card>,
    /// Signed; bombs can push it below zero.
    pub score: i64,
}

impl Player {
    /// Create a player with an empty hand and zero score.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
            hand: Vec::new(),
            score: 0,
        }
    }

    /// Get a card in hand.
    #[must_use]
    pub fn card(&self, card_id: CardId) -> Option<&Card> {
        self.hand.iter().find(|c| c.id == card_id)
    }

    /// Get a mutable card in hand.
    pub fn card_mut(&mut self, card_id: CardId) -> Option<&mut Card> {
        self.hand.iter_mut().find(|c| c.id == card_id)
    }

    /// Check whether the hand holds a card.
    #[must_use]
    pub fn holds(&self, card_id: CardId) -> bool {
        self.card(card_id).is_some()
    }

    /// Remove a card from hand, transferring ownership to the caller.
    pub fn take_card(&mut self, card_id: CardId) -> Option<Card> {
        let pos = self.hand.iter().position(|c| c.id == card_id)?;
        Some(self.hand.remove(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{generate_card, CardAction};
    use crate::core::GameRng;

    #[test]
    fn test_take_card() {
        let mut rng = GameRng::new(1);
        let mut player = Player::new(PlayerId(1), "P0", "#FF0077");
        player.hand.push(generate_card(CardId(2), &mut rng, CardAction::Move));
        player.hand.push(generate_card(CardId(3), &mut rng, CardAction::Draw));

        assert!(player.holds(CardId(2)));
        let card = player.take_card(CardId(2)).unwrap();
        assert_eq!(card.id, CardId(2));
        assert!(!player.holds(CardId(2)));
        assert_eq!(player.hand.len(), 1);

        assert!(player.take_card(CardId(99)).is_none());
    }
}
