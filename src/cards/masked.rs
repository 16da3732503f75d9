//! Masked values: card fields with independently controlled visibility.
//!
//! A `MaskedValue<T>` fixes its true value at generation time as an
//! `(options, index)` pair, and carries two flags:
//!
//! - `concealed`: the holder sees [`Known::Concealed`] instead of the value
//! - `mystery`: the holder sees [`Known::Mystery`], and revealing draws a
//!   fresh uniform choice from the random stream
//!
//! Revealing a mystery value twice may give two different answers, so a
//! revealed result must be cached (the ledger stores it on the play-card
//! entry) and never recomputed.
//!
//! A value with one option has nothing to hide: both flags are forced off.

use serde::{Deserialize, Serialize};

use crate::core::GameRng;

/// What a holder is allowed to observe about a masked value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Known<T> {
    /// Hidden by redaction.
    Concealed,
    /// Decided only when revealed.
    Mystery,
    /// Shown literally.
    Value(T),
}

impl<T> Known<T> {
    /// The shown value, if any.
    #[must_use]
    pub fn value(self) -> Option<T> {
        match self {
            Known::Value(v) => Some(v),
            Known::Concealed | Known::Mystery => None,
        }
    }
}

/// Visibility flags shared by every masked field, independent of its type.
pub trait MaskFlags {
    /// Whether the field is concealed.
    fn is_concealed(&self) -> bool;
    /// Whether the field is a mystery.
    fn is_mystery(&self) -> bool;
    /// Conceal the field. No-op for single-option fields.
    fn conceal(&mut self);

    /// Whether the holder currently sees a literal value.
    fn is_visible(&self) -> bool {
        !self.is_concealed() && !self.is_mystery()
    }
}

/// A hidden value with an option list and visibility flags.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    try_from = "MaskedParts<T>",
    bound(deserialize = "T: Deserialize<'de> + Clone")
)]
pub struct MaskedValue<T> {
    options: Vec<T>,
    index: usize,
    concealed: bool,
    mystery: bool,
}

impl<T: Clone> MaskedValue<T> {
    /// Create a visible masked value selecting `options[index]`.
    ///
    /// Panics if `options` is empty or `index` is out of range.
    #[must_use]
    pub fn new(options: Vec<T>, index: usize) -> Self {
        assert!(!options.is_empty(), "Masked value needs at least one option");
        assert!(index < options.len(), "Masked value index out of range");

        Self {
            options,
            index,
            concealed: false,
            mystery: false,
        }
    }

    /// A single-option value; never concealed, never a mystery.
    #[must_use]
    pub fn fixed(value: T) -> Self {
        Self::new(vec![value], 0)
    }

    /// Create a value selecting the first option equal to `value`.
    #[must_use]
    pub fn selecting(options: Vec<T>, value: &T) -> Option<Self>
    where
        T: PartialEq,
    {
        let index = options.iter().position(|o| o == value)?;
        Some(Self::new(options, index))
    }

    /// Set both visibility flags, honouring the single-option rule.
    #[must_use]
    pub fn with_flags(mut self, concealed: bool, mystery: bool) -> Self {
        let maskable = self.options.len() > 1;
        self.concealed = concealed && maskable;
        self.mystery = mystery && maskable;
        self
    }

    /// Mark as mystery, honouring the single-option rule.
    pub fn set_mystery(&mut self, mystery: bool) {
        self.mystery = mystery && self.options.len() > 1;
    }

    /// Candidate values in construction order.
    #[must_use]
    pub fn options(&self) -> &[T] {
        &self.options
    }

    /// Index of the selected option.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The true selected value, regardless of visibility.
    #[must_use]
    pub fn selected(&self) -> &T {
        &self.options[self.index]
    }

    /// The holder's view.
    #[must_use]
    pub fn known(&self) -> Known<&T> {
        if self.concealed {
            Known::Concealed
        } else if self.mystery {
            Known::Mystery
        } else {
            Known::Value(self.selected())
        }
    }

    /// Resolve the value for play.
    ///
    /// Mystery values draw uniformly from the options and consume the
    /// stream; all others return the selected option without drawing.
    pub fn reveal(&self, rng: &mut GameRng) -> T {
        if self.mystery {
            self.options[rng.index(self.options.len())].clone()
        } else {
            self.selected().clone()
        }
    }
}

impl<T> MaskFlags for MaskedValue<T> {
    fn is_concealed(&self) -> bool {
        self.concealed
    }

    fn is_mystery(&self) -> bool {
        self.mystery
    }

    fn conceal(&mut self) {
        if self.options.len() > 1 {
            self.concealed = true;
        }
    }
}

/// Plain field record used when deserializing; converted into a
/// `MaskedValue` only after its invariants are re-checked.
#[derive(Deserialize)]
struct MaskedParts<T> {
    options: Vec<T>,
    index: usize,
    concealed: bool,
    mystery: bool,
}

impl<T: Clone> TryFrom<MaskedParts<T>> for MaskedValue<T> {
    type Error = String;

    fn try_from(parts: MaskedParts<T>) -> Result<Self, Self::Error> {
        if parts.options.is_empty() {
            return Err("masked value has no options".to_string());
        }
        if parts.index >= parts.options.len() {
            return Err(format!(
                "masked value index {} out of range for {} options",
                parts.index,
                parts.options.len()
            ));
        }
        Ok(Self::new(parts.options, parts.index).with_flags(parts.concealed, parts.mystery))
    }
}
