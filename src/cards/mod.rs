//! Card model: masked fields, targeting, cards and deck generation.
//!
//! - `MaskedValue`: a field whose visibility is controlled independently of its value
//! - `ActionTarget`: masked selector + piece filter
//! - `Card` / `CardEffect`: one card, shaped by its action kind
//! - `RevealedCard`: the resolved snapshot cached on the play-card log entry

pub mod masked;
pub mod target;
pub mod card;
pub mod deck;

pub use masked::{Known, MaskFlags, MaskedValue};
pub use target::{ActionTarget, Direction, PieceKind, Selector};
pub use card::{Card, CardAction, CardEffect, RedactField, RevealedCard, RevealedEffect};
pub use deck::{build_deck, generate_card, shuffle};
