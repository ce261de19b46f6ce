//! Mask format language.
//!
//! A format string is sanitized, then compiled into a [`StateChain`].
//!
//! # Format syntax
//!
//! | Token      | Meaning                                              |
//! |------------|------------------------------------------------------|
//! | `[...]`    | Value group: user-supplied characters                |
//! | `{...}`    | Fixed group: literals kept in the extracted value    |
//! | other text | Free literals: decoration, not in the extracted value|
//! | `\x`       | Escape `[ ] { } \` so it is taken literally          |
//!
//! Inside a value group:
//!
//! | Symbol | Meaning                                                  |
//! |--------|----------------------------------------------------------|
//! | `0`    | Digit                                                    |
//! | `9`    | Optional digit                                           |
//! | `A`    | Letter                                                   |
//! | `a`    | Optional letter                                          |
//! | `_`    | Letter or digit                                          |
//! | `-`    | Optional letter or digit                                 |
//! | `…`    | Any number of the preceding class; must end the format   |
//!
//! For example `{+7} ([000]) [000]-[00]-[00]` formats Russian phone numbers.

pub mod char_class;
pub mod compiler;
mod error;
pub mod sanitizer;
pub mod state;

pub use char_class::CharClass;
pub use compiler::compile;
pub use error::FormatError;
pub use sanitizer::sanitize;
pub use state::{Next, State, StateChain, StateId};
