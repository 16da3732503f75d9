//! Deterministic random stream whose state is part of the game state.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed string produces an identical sequence
//! - **Serializable**: O(1) state capture and restore via the ChaCha word position
//! - **Single stream**: Board generation, deck generation, shuffling, die rolls
//!   and mystery reveals all draw from one stream in action order
//!
//! ## Usage
//!
//! ```
//! use chute_ledger::core::GameRng;
//!
//! let mut rng = GameRng::from_seed_str(Some("abc"));
//! let snapshot = rng.state();
//! let first = rng.next_f64();
//!
//! let mut restored = GameRng::from_state(&snapshot);
//! assert_eq!(restored.next_f64(), first);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Deterministic RNG backing every random decision in a game.
///
/// Uses ChaCha8 for speed while keeping a stable, documented output stream.
/// Serializes as its [`GameRngState`] so snapshots carry the exact position.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(into = "GameRngState", from = "GameRngState")]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG from a numeric seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG from an optional seed string.
    ///
    /// The string is hashed with FNV-1a so the same text yields the same
    /// stream on every platform. Without a seed, fresh entropy is drawn once;
    /// the resulting state is what gets recorded on the init entry.
    #[must_use]
    pub fn from_seed_str(seed: Option<&str>) -> Self {
        match seed {
            Some(text) => Self::new(fnv1a(text.as_bytes())),
            None => Self::new(rand::random()),
        }
    }

    /// Next float in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Uniform index in `0..len`, computed as `floor(next_f64 * len)`.
    ///
    /// Returns 0 for an empty range without consuming the stream.
    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let i = (self.next_f64() * len as f64).floor() as usize;
        i.min(len - 1)
    }

    /// Bernoulli draw: consumes one float and returns whether it fell below `probability`.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }

    /// Roll a die with `faces` faces, returning `1..=faces`.
    pub fn roll(&mut self, faces: u8) -> u8 {
        self.index(faces as usize) as u8 + 1
    }

    /// Choose an index with weighted probability by walking the weight table.
    ///
    /// Draws one float `r` and subtracts each weight until `r` falls below
    /// one. Returns `None` if the walk runs off the end (weights summing
    /// below 1, or floating point residue).
    pub fn choose_weighted(&mut self, weights: &[f64]) -> Option<usize> {
        let mut threshold = self.next_f64();

        for (i, &weight) in weights.iter().enumerate() {
            if threshold < weight {
                return Some(i);
            }
            threshold -= weight;
        }

        None
    }

    /// Shuffle a slice in place with Fisher-Yates over this stream.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.index(i + 1);
            slice.swap(i, j);
        }
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl From<GameRngState> for GameRng {
    fn from(state: GameRngState) -> Self {
        Self::from_state(&state)
    }
}

impl PartialEq for GameRng {
    fn eq(&self, other: &Self) -> bool {
        self.state() == other.state()
    }
}

impl Eq for GameRng {}

impl From<GameRng> for GameRngState {
    fn from(rng: GameRng) -> Self {
        rng.state()
    }
}

/// Serializable RNG state for checkpointing.
///
/// Uses the ChaCha8 word position for O(1) serialization regardless of
/// how many random numbers have been generated.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameRngState {
    /// Expanded numeric seed.
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter).
    pub word_pos: u128,
}

const fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
        i += 1;
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::from_seed_str(Some("abc"));
        let mut rng2 = GameRng::from_seed_str(Some("abc"));

        for _ in 0..100 {
            assert_eq!(rng1.next_f64().to_bits(), rng2.next_f64().to_bits());
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::from_seed_str(Some("abc"));
        let mut rng2 = GameRng::from_seed_str(Some("abd"));

        let seq1: Vec<_> = (0..10).map(|_| rng1.index(1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.index(1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_fnv_is_stable() {
        // Reference FNV-1a 64 values.
        assert_eq!(fnv1a(b""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(fnv1a(b"a"), 0xaf63_dc4c_8601_ec8c);
    }

    #[test]
    fn test_floats_in_unit_interval() {
        let mut rng = GameRng::new(7);
        for _ in 0..1000 {
            let r = rng.next_f64();
            assert!((0.0..1.0).contains(&r));
        }
    }

    #[test]
    fn test_roll_range() {
        let mut rng = GameRng::new(42);
        for _ in 0..500 {
            let roll = rng.roll(6);
            assert!((1..=6).contains(&roll));
        }
    }

    #[test]
    fn test_index_empty_does_not_consume() {
        let mut rng = GameRng::new(42);
        let before = rng.state();
        assert_eq!(rng.index(0), 0);
        assert_eq!(rng.state(), before);
    }

    #[test]
    fn test_shuffle() {
        let mut rng = GameRng::new(42);
        let mut data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let original = data.clone();

        rng.shuffle(&mut data);

        assert_eq!(data.len(), original.len());
        assert_ne!(data, original);

        data.sort();
        assert_eq!(data, original);
    }

    #[test]
    fn test_shuffle_is_deterministic() {
        let mut a: Vec<u32> = (0..50).collect();
        let mut b = a.clone();
        GameRng::new(9).shuffle(&mut a);
        GameRng::new(9).shuffle(&mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_choose_weighted() {
        let mut rng = GameRng::new(42);

        let weights = [1.0, 0.0, 0.0];
        for _ in 0..10 {
            assert_eq!(rng.choose_weighted(&weights), Some(0));
        }

        assert_eq!(rng.choose_weighted(&[]), None);
        assert_eq!(rng.choose_weighted(&[0.0, 0.0]), None);
    }

    #[test]
    fn test_state_serialization() {
        let mut rng = GameRng::from_seed_str(Some("state"));

        for _ in 0..100 {
            rng.next_f64();
        }

        let state = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.next_f64().to_bits()).collect();

        let mut restored = GameRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.next_f64().to_bits()).collect();

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_rng_serde_roundtrip() {
        let mut rng = GameRng::new(42);
        rng.next_f64();

        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: GameRng = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.state(), rng.state());
        assert_eq!(restored.next_f64().to_bits(), rng.next_f64().to_bits());
    }
}
