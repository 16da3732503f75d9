//! Cards and their revealed snapshots.
//!
//! A `Card` bundles masked fields whose shape depends on the action kind,
//! so `CardEffect` is an enum-of-structs: a swap card simply has no
//! distance or direction to read.
//!
//! Playing a card produces a `RevealedCard`, the immutable resolution of
//! every field. It is stored on the play-card log entry so the follow-up
//! effect action reads it back instead of revealing again.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::masked::{MaskFlags, MaskedValue};
use super::target::{ActionTarget, Direction, PieceKind, Selector};
use crate::core::{CardId, GameRng};

/// What a card does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardAction {
    Move,
    Grow,
    Shrink,
    Remove,
    Place,
    Swap,
    Draw,
}

impl CardAction {
    /// Option order of the action field.
    pub const ALL: [CardAction; 7] = [
        CardAction::Move,
        CardAction::Grow,
        CardAction::Shrink,
        CardAction::Remove,
        CardAction::Place,
        CardAction::Swap,
        CardAction::Draw,
    ];
}

/// A card field that can be redacted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RedactField {
    Action,
    TargetSelector,
    TargetFilter,
    OperatePiece,
    Distance,
    Direction,
}

impl RedactField {
    pub const ALL: [RedactField; 6] = [
        RedactField::Action,
        RedactField::TargetSelector,
        RedactField::TargetFilter,
        RedactField::OperatePiece,
        RedactField::Distance,
        RedactField::Direction,
    ];
}

impl std::fmt::Display for RedactField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RedactField::Action => "action",
            RedactField::TargetSelector => "target selector",
            RedactField::TargetFilter => "target filter",
            RedactField::OperatePiece => "operate piece",
            RedactField::Distance => "distance",
            RedactField::Direction => "direction",
        };
        f.write_str(name)
    }
}

/// Kind-specific masked fields.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardEffect {
    Move {
        target: ActionTarget,
        distance: MaskedValue<u8>,
        direction: MaskedValue<Direction>,
    },
    Grow {
        target: ActionTarget,
    },
    Shrink {
        target: ActionTarget,
    },
    Remove {
        target: ActionTarget,
        piece: MaskedValue<PieceKind>,
        distance: MaskedValue<u8>,
        direction: MaskedValue<Direction>,
    },
    Place {
        target: ActionTarget,
        piece: MaskedValue<PieceKind>,
        distance: MaskedValue<u8>,
        direction: MaskedValue<Direction>,
    },
    Swap {
        target: ActionTarget,
        piece: MaskedValue<PieceKind>,
    },
    Draw {
        count: MaskedValue<u8>,
    },
}

impl CardEffect {
    /// The action kind this shape belongs to.
    #[must_use]
    pub fn action(&self) -> CardAction {
        match self {
            CardEffect::Move { .. } => CardAction::Move,
            CardEffect::Grow { .. } => CardAction::Grow,
            CardEffect::Shrink { .. } => CardAction::Shrink,
            CardEffect::Remove { .. } => CardAction::Remove,
            CardEffect::Place { .. } => CardAction::Place,
            CardEffect::Swap { .. } => CardAction::Swap,
            CardEffect::Draw { .. } => CardAction::Draw,
        }
    }

    fn target(&self) -> Option<&ActionTarget> {
        match self {
            CardEffect::Move { target, .. }
            | CardEffect::Grow { target }
            | CardEffect::Shrink { target }
            | CardEffect::Remove { target, .. }
            | CardEffect::Place { target, .. }
            | CardEffect::Swap { target, .. } => Some(target),
            CardEffect::Draw { .. } => None,
        }
    }

    fn target_mut(&mut self) -> Option<&mut ActionTarget> {
        match self {
            CardEffect::Move { target, .. }
            | CardEffect::Grow { target }
            | CardEffect::Shrink { target }
            | CardEffect::Remove { target, .. }
            | CardEffect::Place { target, .. }
            | CardEffect::Swap { target, .. } => Some(target),
            CardEffect::Draw { .. } => None,
        }
    }
}

/// One card: identity, masked action kind and kind-specific fields.
///
/// The action field may be concealed but is never a mystery; the kind that
/// resolves is always the one `effect` is shaped for.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub action: MaskedValue<CardAction>,
    pub effect: CardEffect,
}

impl Card {
    /// Build a card, deriving the action field from the effect shape.
    #[must_use]
    pub fn new(id: CardId, effect: CardEffect) -> Self {
        let kind = effect.action();
        let index = CardAction::ALL.iter().position(|a| *a == kind).unwrap_or(0);
        Self {
            id,
            action: MaskedValue::new(CardAction::ALL.to_vec(), index),
            effect,
        }
    }

    /// The action kind (true value, regardless of concealment).
    #[must_use]
    pub fn kind(&self) -> CardAction {
        self.effect.action()
    }

    /// Visibility flags of a field, if the card carries it.
    #[must_use]
    pub fn field(&self, field: RedactField) -> Option<&dyn MaskFlags> {
        match (field, &self.effect) {
            (RedactField::Action, _) => Some(&self.action),
            (RedactField::TargetSelector, effect) => {
                effect.target().map(|t| &t.selector as &dyn MaskFlags)
            }
            (RedactField::TargetFilter, effect) => {
                effect.target().map(|t| &t.filter as &dyn MaskFlags)
            }
            (
                RedactField::OperatePiece,
                CardEffect::Remove { piece, .. }
                | CardEffect::Place { piece, .. }
                | CardEffect::Swap { piece, .. },
            ) => Some(piece),
            (
                RedactField::Distance,
                CardEffect::Move { distance, .. }
                | CardEffect::Remove { distance, .. }
                | CardEffect::Place { distance, .. },
            ) => Some(distance),
            (RedactField::Distance, CardEffect::Draw { count }) => Some(count),
            (
                RedactField::Direction,
                CardEffect::Move { direction, .. }
                | CardEffect::Remove { direction, .. }
                | CardEffect::Place { direction, .. },
            ) => Some(direction),
            _ => None,
        }
    }

    /// Mutable visibility flags of a field, if the card carries it.
    pub fn field_mut(&mut self, field: RedactField) -> Option<&mut dyn MaskFlags> {
        match (field, &mut self.effect) {
            (RedactField::Action, _) => Some(&mut self.action),
            (RedactField::TargetSelector, effect) => {
                effect.target_mut().map(|t| &mut t.selector as &mut dyn MaskFlags)
            }
            (RedactField::TargetFilter, effect) => {
                effect.target_mut().map(|t| &mut t.filter as &mut dyn MaskFlags)
            }
            (
                RedactField::OperatePiece,
                CardEffect::Remove { piece, .. }
                | CardEffect::Place { piece, .. }
                | CardEffect::Swap { piece, .. },
            ) => Some(piece),
            (
                RedactField::Distance,
                CardEffect::Move { distance, .. }
                | CardEffect::Remove { distance, .. }
                | CardEffect::Place { distance, .. },
            ) => Some(distance),
            (RedactField::Distance, CardEffect::Draw { count }) => Some(count),
            (
                RedactField::Direction,
                CardEffect::Move { direction, .. }
                | CardEffect::Remove { direction, .. }
                | CardEffect::Place { direction, .. },
            ) => Some(direction),
            _ => None,
        }
    }

    /// Fields this card carries, in redaction order.
    pub fn fields(&self) -> SmallVec<[RedactField; 6]> {
        RedactField::ALL
            .into_iter()
            .filter(|f| self.field(*f).is_some())
            .collect()
    }

    /// Whether some field still shows a literal value to its holder.
    #[must_use]
    pub fn is_redactable(&self) -> bool {
        RedactField::ALL
            .into_iter()
            .filter_map(|f| self.field(f))
            .any(|flags| flags.is_visible())
    }

    /// Resolve every field against the stream.
    ///
    /// Draw order: target selector, target filter (All/Target only),
    /// operate piece, then distance and direction (or draw count).
    pub fn reveal(&self, rng: &mut GameRng) -> RevealedCard {
        let effect = match &self.effect {
            CardEffect::Move {
                target,
                distance,
                direction,
            } => {
                let (selector, filter) = target.reveal(rng);
                RevealedEffect::Move {
                    selector,
                    filter,
                    distance: distance.reveal(rng),
                    direction: direction.reveal(rng),
                }
            }
            CardEffect::Grow { target } => {
                let (selector, filter) = target.reveal(rng);
                RevealedEffect::Grow { selector, filter }
            }
            CardEffect::Shrink { target } => {
                let (selector, filter) = target.reveal(rng);
                RevealedEffect::Shrink { selector, filter }
            }
            CardEffect::Remove {
                target,
                piece,
                distance,
                direction,
            } => {
                let (selector, filter) = target.reveal(rng);
                RevealedEffect::Remove {
                    selector,
                    filter,
                    piece: piece.reveal(rng),
                    distance: distance.reveal(rng),
                    direction: direction.reveal(rng),
                }
            }
            CardEffect::Place {
                target,
                piece,
                distance,
                direction,
            } => {
                let (selector, filter) = target.reveal(rng);
                RevealedEffect::Place {
                    selector,
                    filter,
                    piece: piece.reveal(rng),
                    distance: distance.reveal(rng),
                    direction: direction.reveal(rng),
                }
            }
            CardEffect::Swap { target, piece } => {
                let (selector, filter) = target.reveal(rng);
                RevealedEffect::Swap {
                    selector,
                    filter,
                    piece: piece.reveal(rng),
                }
            }
            CardEffect::Draw { count } => RevealedEffect::Draw {
                count: count.reveal(rng),
            },
        };

        RevealedCard { id: self.id, effect }
    }
}

/// Fully resolved card fields, captured when the card is played.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RevealedCard {
    pub id: CardId,
    pub effect: RevealedEffect,
}

/// Resolved fields per action kind. `filter` is `None` unless the
/// selector is `All` or `Target`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RevealedEffect {
    Move {
        selector: Selector,
        filter: Option<PieceKind>,
        distance: u8,
        direction: Direction,
    },
    Grow {
        selector: Selector,
        filter: Option<PieceKind>,
    },
    Shrink {
        selector: Selector,
        filter: Option<PieceKind>,
    },
    Remove {
        selector: Selector,
        filter: Option<PieceKind>,
        piece: PieceKind,
        distance: u8,
        direction: Direction,
    },
    Place {
        selector: Selector,
        filter: Option<PieceKind>,
        piece: PieceKind,
        distance: u8,
        direction: Direction,
    },
    Swap {
        selector: Selector,
        filter: Option<PieceKind>,
        piece: PieceKind,
    },
    Draw {
        count: u8,
    },
}

impl RevealedEffect {
    /// The action kind.
    #[must_use]
    pub fn action(&self) -> CardAction {
        match self {
            RevealedEffect::Move { .. } => CardAction::Move,
            RevealedEffect::Grow { .. } => CardAction::Grow,
            RevealedEffect::Shrink { .. } => CardAction::Shrink,
            RevealedEffect::Remove { .. } => CardAction::Remove,
            RevealedEffect::Place { .. } => CardAction::Place,
            RevealedEffect::Swap { .. } => CardAction::Swap,
            RevealedEffect::Draw { .. } => CardAction::Draw,
        }
    }

    /// Selector and filter, for every kind except draw.
    #[must_use]
    pub fn selection(&self) -> Option<(Selector, Option<PieceKind>)> {
        match *self {
            RevealedEffect::Move { selector, filter, .. }
            | RevealedEffect::Grow { selector, filter }
            | RevealedEffect::Shrink { selector, filter }
            | RevealedEffect::Remove { selector, filter, .. }
            | RevealedEffect::Place { selector, filter, .. }
            | RevealedEffect::Swap { selector, filter, .. } => Some((selector, filter)),
            RevealedEffect::Draw { .. } => None,
        }
    }
}
