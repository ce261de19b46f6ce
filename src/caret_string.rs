//! Text paired with a caret offset.
//!
//! All offsets are **character** (not byte) indices.

use std::fmt;
use std::iter::FusedIterator;
use std::str::Chars;

/// A string with a caret position.
///
/// The caret sits between characters: `0` is before the first character and
/// `len` is after the last one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CaretString {
    pub string: String,
    pub caret: usize,
}

impl CaretString {
    /// Create a caret string, clamping `caret` to the text length.
    pub fn new(string: impl Into<String>, caret: usize) -> Self {
        let string = string.into();
        let len = string.chars().count();
        Self {
            string,
            caret: caret.min(len),
        }
    }

    /// Create a caret string with the caret after the last character.
    pub fn at_end(string: impl Into<String>) -> Self {
        let string = string.into();
        let caret = string.chars().count();
        Self { string, caret }
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.string.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.string.is_empty()
    }

    /// Iterate characters together with their position relative to the caret.
    pub fn iter(&self) -> CaretChars<'_> {
        CaretChars {
            chars: self.string.chars(),
            index: 0,
            caret: self.caret,
        }
    }
}

impl fmt::Display for CaretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.string)
    }
}

/// Iterator over the characters of a [`CaretString`].
///
/// Each item is `(ch, before_caret)`, where `before_caret` is true when the
/// character's original index is strictly less than the caret.
#[derive(Debug, Clone)]
pub struct CaretChars<'a> {
    chars: Chars<'a>,
    index: usize,
    caret: usize,
}

impl Iterator for CaretChars<'_> {
    type Item = (char, bool);

    fn next(&mut self) -> Option<Self::Item> {
        let ch = self.chars.next()?;
        let before_caret = self.index < self.caret;
        self.index += 1;
        Some((ch, before_caret))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chars.size_hint()
    }
}

impl FusedIterator for CaretChars<'_> {}
