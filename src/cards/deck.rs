//! Card and deck generation.
//!
//! Every field value is drawn at generation time. Only a mystery flag
//! defers a choice to reveal time, and generation never sets one.

use tracing::debug;

use super::card::{Card, CardAction, CardEffect};
use super::masked::MaskedValue;
use super::target::{ActionTarget, Direction, PieceKind, Selector};
use crate::core::{CardId, CardWeight, GameRng, IdAllocator};

const DISTANCES: [u8; 3] = [1, 2, 3];
const DRAW_COUNTS: [u8; 3] = [2, 3, 4];

fn draw_masked<T: Clone>(rng: &mut GameRng, options: &[T]) -> MaskedValue<T> {
    let index = rng.index(options.len());
    MaskedValue::new(options.to_vec(), index)
}

/// Generate one card of the given action kind.
///
/// Every card first draws selector, filter, distance and direction in that
/// order, then the kind-specific fields. Fields the kind does not carry are
/// still drawn and dropped, so all cards consume the same prefix.
pub fn generate_card(id: CardId, rng: &mut GameRng, action: CardAction) -> Card {
    let selector = draw_masked(rng, &Selector::ALL);
    let filter = draw_masked(rng, &PieceKind::ALL);
    let distance = draw_masked(rng, &DISTANCES);
    let direction = draw_masked(rng, &Direction::ALL);
    let target = ActionTarget::new(selector, filter);

    let effect = match action {
        CardAction::Move => CardEffect::Move {
            target,
            distance,
            direction,
        },
        CardAction::Place => CardEffect::Place {
            target,
            piece: draw_masked(rng, &PieceKind::REAL),
            distance,
            direction,
        },
        CardAction::Swap => CardEffect::Swap {
            target,
            piece: draw_masked(rng, &PieceKind::REAL),
        },
        CardAction::Remove => CardEffect::Remove {
            target,
            piece: draw_masked(rng, &PieceKind::ALL),
            distance,
            direction,
        },
        CardAction::Grow | CardAction::Shrink => {
            let target = ActionTarget::new(
                draw_masked(rng, &[Selector::Target, Selector::All]),
                draw_masked(rng, &[PieceKind::Ladder, PieceKind::Chute]),
            );
            if action == CardAction::Grow {
                CardEffect::Grow { target }
            } else {
                CardEffect::Shrink { target }
            }
        }
        CardAction::Draw => CardEffect::Draw {
            count: draw_masked(rng, &DRAW_COUNTS),
        },
    };

    Card::new(id, effect)
}

/// Build an unshuffled deck by sampling `draws` action kinds from the
/// weight table. A draw that walks off the end of the table yields no card.
pub fn build_deck(
    rng: &mut GameRng,
    ids: &mut IdAllocator,
    weights: &[CardWeight],
    draws: usize,
) -> Vec<Card> {
    let table: Vec<f64> = weights.iter().map(|w| w.weight).collect();
    let mut deck = Vec::with_capacity(draws);

    for _ in 0..draws {
        if let Some(i) = rng.choose_weighted(&table) {
            let id = ids.next_card();
            deck.push(generate_card(id, rng, weights[i].action));
        }
    }

    debug!(cards = deck.len(), draws, "generated deck");
    deck
}

/// Shuffle the deck in place (Fisher-Yates over the game stream).
pub fn shuffle(rng: &mut GameRng, deck: &mut [Card]) {
    rng.shuffle(deck);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::RedactField;
    use crate::core::RulesConfig;

    #[test]
    fn test_field_presence_per_kind() {
        let mut rng = GameRng::new(11);
        let mut ids = IdAllocator::default();

        let expected: [(CardAction, &[RedactField]); 7] = [
            (
                CardAction::Move,
                &[
                    RedactField::Action,
                    RedactField::TargetSelector,
                    RedactField::TargetFilter,
                    RedactField::Distance,
                    RedactField::Direction,
                ],
            ),
            (
                CardAction::Grow,
                &[RedactField::Action, RedactField::TargetSelector, RedactField::TargetFilter],
            ),
            (
                CardAction::Shrink,
                &[RedactField::Action, RedactField::TargetSelector, RedactField::TargetFilter],
            ),
            (
                CardAction::Remove,
                &[
                    RedactField::Action,
                    RedactField::TargetSelector,
                    RedactField::TargetFilter,
                    RedactField::OperatePiece,
                    RedactField::Distance,
                    RedactField::Direction,
                ],
            ),
            (
                CardAction::Place,
                &[
                    RedactField::Action,
                    RedactField::TargetSelector,
                    RedactField::TargetFilter,
                    RedactField::OperatePiece,
                    RedactField::Distance,
                    RedactField::Direction,
                ],
            ),
            (
                CardAction::Swap,
                &[
                    RedactField::Action,
                    RedactField::TargetSelector,
                    RedactField::TargetFilter,
                    RedactField::OperatePiece,
                ],
            ),
            (CardAction::Draw, &[RedactField::Action, RedactField::Distance]),
        ];

        for (action, fields) in expected {
            let card = generate_card(ids.next_card(), &mut rng, action);
            assert_eq!(card.kind(), action);
            assert_eq!(card.fields().as_slice(), fields, "{action:?}");
        }
    }

    #[test]
    fn test_grow_targets_long_pieces_only() {
        let mut rng = GameRng::new(4);
        for i in 0..50 {
            let card = generate_card(CardId(i), &mut rng, CardAction::Grow);
            let CardEffect::Grow { target } = &card.effect else {
                panic!("expected grow");
            };
            assert!(target.filter.selected().is_long());
            assert!(matches!(target.selector.selected(), Selector::All | Selector::Target));
        }
    }

    #[test]
    fn test_operate_piece_options() {
        let mut rng = GameRng::new(4);
        let place = generate_card(CardId(1), &mut rng, CardAction::Place);
        let remove = generate_card(CardId(2), &mut rng, CardAction::Remove);

        let CardEffect::Place { piece, .. } = &place.effect else {
            panic!("expected place");
        };
        assert_eq!(piece.options(), &PieceKind::REAL);

        let CardEffect::Remove { piece, .. } = &remove.effect else {
            panic!("expected remove");
        };
        assert_eq!(piece.options(), &PieceKind::ALL);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let config = RulesConfig::default();
        let build = || {
            let mut rng = GameRng::from_seed_str(Some("deck"));
            let mut ids = IdAllocator::default();
            build_deck(&mut rng, &mut ids, &config.card_weights, config.deck_draws)
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_build_deck_size_and_ids() {
        let config = RulesConfig::default();
        let mut rng = GameRng::new(42);
        let mut ids = IdAllocator::default();
        let deck = build_deck(&mut rng, &mut ids, &config.card_weights, config.deck_draws);

        // Weights sum to 1, so only float residue can drop a draw.
        assert!(deck.len() >= config.deck_draws - 1);
        assert!(deck.len() <= config.deck_draws);
        assert!(deck.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn test_shuffle_keeps_cards() {
        let config = RulesConfig::default();
        let mut rng = GameRng::new(42);
        let mut ids = IdAllocator::default();
        let mut deck = build_deck(&mut rng, &mut ids, &config.card_weights, 20);
        let mut before: Vec<_> = deck.iter().map(|c| c.id).collect();

        shuffle(&mut rng, &mut deck);

        let mut after: Vec<_> = deck.iter().map(|c| c.id).collect();
        assert_ne!(before, after);
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }
}
