//! Live text input formatting against declarative masks.
//!
//! A mask such as `{+7} ([000]) [000]-[00]-[00]` is compiled once, then
//! applied to the field's text after every edit. Each run returns the
//! formatted text with a corrected caret, the extracted value, an affinity
//! score and whether all mandatory positions are filled.
//!
//! # Example
//!
//! ```rust
//! use inputmask::{CaretString, Mask};
//!
//! let mask = Mask::new("[00]{-}[00]").unwrap();
//!
//! let result = mask.apply(&CaretString::at_end("1234"), false);
//! assert_eq!(result.formatted.string, "12-34");
//! assert_eq!(result.formatted.caret, 5);
//! assert!(result.complete);
//!
//! // Autocompletion appends the separator as soon as it is due.
//! let result = mask.apply(&CaretString::at_end("12"), true);
//! assert_eq!(result.formatted.string, "12-");
//!
//! assert_eq!(mask.placeholder(), "00-00");
//! ```

pub mod affinity;
mod cache;
mod caret_string;
pub mod format;
mod mask;

pub use affinity::{AffinityStrategy, AffinityWeights, pick_mask};
pub use cache::MaskCache;
pub use caret_string::{CaretChars, CaretString};
pub use format::FormatError;
pub use mask::{Mask, MaskResult};
