/// Errors raised while turning a format string into a mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A `[` or `{` opened inside another group.
    NestedGroup(char),
    /// A group still open at the end of the format.
    UnclosedGroup(char),
    /// A group closed with the other kind of bracket, e.g. `[0}`.
    MismatchedGroup { open: char, close: char },
    /// A backslash with nothing after it.
    DanglingEscape,
    /// A character that is not a value symbol inside `[...]`.
    UnexpectedChar(char),
    /// An ellipsis whose preceding character has no class.
    EllipsisWithoutClass,
    /// Format content following an ellipsis.
    TrailingAfterEllipsis,
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NestedGroup(c) => write!(f, "Nested group {c:?} in mask format"),
            Self::UnclosedGroup(c) => write!(f, "Unclosed group {c:?} in mask format"),
            Self::MismatchedGroup { open, close } => {
                write!(f, "Group {open:?} closed by {close:?} in mask format")
            }
            Self::DanglingEscape => write!(f, "Trailing backslash in mask format"),
            Self::UnexpectedChar(c) => write!(f, "Unexpected character in value group: {c:?}"),
            Self::EllipsisWithoutClass => {
                write!(f, "Ellipsis must follow a value symbol")
            }
            Self::TrailingAfterEllipsis => {
                write!(f, "Nothing may follow an ellipsis in mask format")
            }
        }
    }
}

impl std::error::Error for FormatError {}
