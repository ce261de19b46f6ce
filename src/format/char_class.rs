//! Character classes accepted by value positions of a mask.

use phf::{Map, phf_map};

/// The ellipsis symbol: repeat the preceding class indefinitely.
pub const ELLIPSIS: char = '…';

/// Class of characters a value position accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    Numeric,
    Letter,
    AlphaNumeric,
}

impl CharClass {
    /// Test whether `ch` is a member of this class.
    pub fn matches(self, ch: char) -> bool {
        match self {
            Self::Numeric => ch.is_ascii_digit(),
            Self::Letter => ch.is_alphabetic(),
            Self::AlphaNumeric => ch.is_alphabetic() || ch.is_ascii_digit(),
        }
    }

    /// Character standing in for this class in a placeholder.
    pub fn filler(self) -> char {
        match self {
            Self::Numeric => '0',
            Self::Letter => 'a',
            Self::AlphaNumeric => '-',
        }
    }
}

/// A value-context symbol: which class it matches and whether it may be left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    pub class: CharClass,
    pub optional: bool,
}

/// Value-context symbols. Keep sorted by class, mandatory first.
const SYMBOLS: Map<char, Symbol> = phf_map! {
    '0' => Symbol { class: CharClass::Numeric, optional: false },
    '9' => Symbol { class: CharClass::Numeric, optional: true },
    'A' => Symbol { class: CharClass::Letter, optional: false },
    'a' => Symbol { class: CharClass::Letter, optional: true },
    '_' => Symbol { class: CharClass::AlphaNumeric, optional: false },
    '-' => Symbol { class: CharClass::AlphaNumeric, optional: true },
};

/// Look up a value-context symbol.
pub fn symbol(ch: char) -> Option<Symbol> {
    SYMBOLS.get(&ch).copied()
}
