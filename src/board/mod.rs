//! Board model: snake-path geometry, pieces, generation and landing.
//!
//! - `Geometry` / `Position`: tile numbering and path stepping
//! - `BoardPiece`: pawns, hazards and collectibles; ladders and chutes carry a far end
//! - `Board`: piece storage, card selection, movement and landing resolution
//! - `populate`: per-row hazard generation

pub mod geometry;
pub mod piece;
pub mod landing;
pub mod generate;

pub use geometry::{Geometry, Position};
pub use piece::{BoardPiece, MaskType};
pub use landing::{Board, LandingOutcome, ScoreCause, ScoreChange, MAX_LANDING_DEPTH};
pub use generate::{populate, sample_far_end};
