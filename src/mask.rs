//! A compiled mask and the matching run that formats text against it.

use std::sync::Arc;

use log::debug;

use crate::affinity::AffinityWeights;
use crate::cache::MaskCache;
use crate::caret_string::CaretString;
use crate::format::{FormatError, State, StateChain, compile, sanitize};

/// The outcome of applying a mask to some text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskResult {
    /// Formatted text with the corrected caret.
    pub formatted: CaretString,
    /// User-supplied characters and fixed literals, without free decoration.
    pub extracted_value: String,
    /// How well the text fitted. Higher is better; may be negative.
    pub affinity: i32,
    /// Whether every mandatory position was filled.
    pub complete: bool,
}

/// A compiled mask format.
///
/// Immutable once built; share it freely between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    format: String,
    chain: StateChain,
}

impl Mask {
    /// Sanitize and compile `format`.
    pub fn new(format: &str) -> Result<Self, FormatError> {
        let sanitized = sanitize(format)?;
        let chain = compile(&sanitized)?;
        debug!(
            "compiled mask {format:?} (sanitized {sanitized:?}) into {} states",
            chain.len()
        );
        Ok(Self {
            format: format.to_string(),
            chain,
        })
    }

    /// Fetch `format` from the process-wide cache, compiling it on first use.
    pub fn get_or_create(format: &str) -> Result<Arc<Self>, FormatError> {
        MaskCache::shared().get_or_create(format)
    }

    /// The format string this mask was built from.
    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn chain(&self) -> &StateChain {
        &self.chain
    }

    /// Format `text` using the default affinity weights.
    ///
    /// With `autocomplete` set and the caret at the end of the input, trailing
    /// literals are appended until the next position that needs user input.
    pub fn apply(&self, text: &CaretString, autocomplete: bool) -> MaskResult {
        self.apply_weighted(text, autocomplete, AffinityWeights::default())
    }

    /// Format `text`, scoring affinity with `weights`.
    pub fn apply_weighted(
        &self,
        text: &CaretString,
        autocomplete: bool,
        weights: AffinityWeights,
    ) -> MaskResult {
        let chain = &self.chain;
        let mut state = chain.head();
        let mut formatted = String::new();
        let mut extracted_value = String::new();
        let mut caret = text.caret;
        let mut affinity = 0i32;

        // Empty input counts as typing at the end.
        let mut before_caret = true;
        let mut chars = text.iter();
        let mut current = chars.next();

        while let Some((ch, is_before_caret)) = current {
            before_caret = is_before_caret;
            match chain.accept(state, ch) {
                Some(next) => {
                    state = next.state;
                    formatted.extend(next.insert);
                    extracted_value.extend(next.value);
                    if next.consumed {
                        current = chars.next();
                        affinity += weights.consumed;
                    } else {
                        // Same character goes to the next state.
                        if is_before_caret && next.insert.is_some() {
                            caret += 1;
                        }
                        affinity += weights.unconsumed;
                    }
                }
                None => {
                    if is_before_caret {
                        caret = caret.saturating_sub(1);
                    }
                    current = chars.next();
                    affinity += weights.dropped;
                }
            }
        }

        if autocomplete && before_caret {
            while let Some(next) = chain.autocomplete(state) {
                state = next.state;
                if let Some(c) = next.insert {
                    formatted.push(c);
                    caret += 1;
                }
                extracted_value.extend(next.value);
            }
        }

        MaskResult {
            formatted: CaretString::new(formatted, caret),
            extracted_value,
            affinity,
            complete: chain.is_complete_from(state),
        }
    }

    /// Placeholder characters: literals as themselves, values as class fillers.
    pub fn placeholder_chars(&self) -> impl Iterator<Item = char> + '_ {
        self.chain.iter().filter_map(|state| match *state {
            State::Fixed { literal, .. } | State::Free { literal, .. } => Some(literal),
            State::Value { class, .. } | State::OptionalValue { class, .. } => {
                Some(class.filler())
            }
            State::Ellipsis { .. } | State::EndOfLine => None,
        })
    }

    /// A template of the whole mask, e.g. `00-00` for `[00]{-}[00]`.
    pub fn placeholder(&self) -> String {
        self.placeholder_chars().collect()
    }

    /// Length of the shortest complete text.
    pub fn min_text_length(&self) -> usize {
        self.count(|s| {
            matches!(
                s,
                State::Fixed { .. } | State::Free { .. } | State::Value { .. }
            )
        })
    }

    /// Length of the longest text, not counting ellipsis repetitions.
    pub fn max_text_length(&self) -> usize {
        self.count(|s| {
            matches!(
                s,
                State::Fixed { .. }
                    | State::Free { .. }
                    | State::Value { .. }
                    | State::OptionalValue { .. }
            )
        })
    }

    /// Length of the shortest complete extracted value.
    pub fn min_value_length(&self) -> usize {
        self.count(|s| matches!(s, State::Fixed { .. } | State::Value { .. }))
    }

    /// Length of the longest extracted value, not counting ellipsis repetitions.
    pub fn max_value_length(&self) -> usize {
        self.count(|s| {
            matches!(
                s,
                State::Fixed { .. } | State::Value { .. } | State::OptionalValue { .. }
            )
        })
    }

    /// Whether the mask ends in an ellipsis and accepts any length of input.
    pub fn is_unbounded(&self) -> bool {
        self.chain
            .iter()
            .any(|s| matches!(s, State::Ellipsis { .. }))
    }

    fn count(&self, pred: impl Fn(&State) -> bool) -> usize {
        self.chain.iter().filter(|s| pred(s)).count()
    }
}
