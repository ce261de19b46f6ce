//! Scoring how well a text fits a mask, and choosing among alternative masks.

use std::cmp::Reverse;

use crate::caret_string::CaretString;
use crate::mask::Mask;

/// Affinity contributed by each event of a matching run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AffinityWeights {
    /// An input character was placed.
    pub consumed: i32,
    /// A state moved on without consuming the offered character.
    pub unconsumed: i32,
    /// An input character was rejected and dropped.
    pub dropped: i32,
}

impl Default for AffinityWeights {
    fn default() -> Self {
        Self {
            consumed: 1,
            unconsumed: -1,
            dropped: -1,
        }
    }
}

/// How to score a mask against a text when picking between masks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AffinityStrategy {
    /// The affinity of the whole matching run.
    #[default]
    WholeString,
    /// Length of the common prefix of formatted text and input.
    Prefix,
    /// Input length relative to the mask's maximum text length.
    ///
    /// Input longer than the mask scores `i32::MIN`.
    Capacity,
    /// Like `Capacity`, using the extracted value and the maximum value length.
    ExtractedValueCapacity,
}

impl AffinityStrategy {
    /// Score `mask` against `text`.
    pub fn affinity(self, mask: &Mask, text: &CaretString, autocomplete: bool) -> i32 {
        match self {
            Self::WholeString => mask.apply(text, autocomplete).affinity,
            Self::Prefix => {
                let result = mask.apply(text, autocomplete);
                let common = result
                    .formatted
                    .string
                    .chars()
                    .zip(text.string.chars())
                    .take_while(|(a, b)| a == b)
                    .count();
                to_i32(common)
            }
            Self::Capacity => capacity(text.len(), mask.max_text_length(), mask.is_unbounded()),
            Self::ExtractedValueCapacity => {
                let value = mask.apply(text, autocomplete).extracted_value;
                capacity(
                    value.chars().count(),
                    mask.max_value_length(),
                    mask.is_unbounded(),
                )
            }
        }
    }
}

fn capacity(len: usize, max: usize, unbounded: bool) -> i32 {
    if len > max {
        if unbounded { 0 } else { i32::MIN }
    } else {
        to_i32(len) - to_i32(max)
    }
}

fn to_i32(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

/// Pick the mask that fits `text` best.
///
/// Ties go to the earliest candidate, so `primary` wins a tie.
pub fn pick_mask<'a>(
    primary: &'a Mask,
    affine: impl IntoIterator<Item = &'a Mask>,
    text: &CaretString,
    autocomplete: bool,
    strategy: AffinityStrategy,
) -> &'a Mask {
    std::iter::once(primary)
        .chain(affine)
        .min_by_key(|mask| Reverse(strategy.affinity(mask, text, autocomplete)))
        .unwrap_or(primary)
}
