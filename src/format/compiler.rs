//! Compiler from a sanitized format string to a [`StateChain`].
//!
//! The format is scanned left to right into a list of pending states, which
//! are then linked back to front so every successor gets the lower index.

use super::char_class::{CharClass, ELLIPSIS, Symbol, symbol};
use super::error::FormatError;
use super::state::{State, StateChain, StateId};

/// Which kind of group the compiler is inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    Free,
    Value,
    Fixed,
}

/// A state whose successor is not known yet.
#[derive(Debug, Clone, Copy)]
enum Pending {
    Fixed(char),
    Free(char),
    Value(Symbol),
    Ellipsis(CharClass),
}

/// Compile a sanitized format string.
///
/// Nothing is returned on failure; callers never observe a partial chain.
pub fn compile(sanitized: &str) -> Result<StateChain, FormatError> {
    let chars: Vec<char> = sanitized.chars().collect();
    let pending = scan(&chars)?;

    let mut states = Vec::with_capacity(pending.len() + 1);
    // An ellipsis has no successor, so it replaces the end of line.
    if !matches!(pending.last(), Some(Pending::Ellipsis(_))) {
        states.push(State::EndOfLine);
    }
    for p in pending.into_iter().rev() {
        let child = StateId(states.len().saturating_sub(1));
        states.push(match p {
            Pending::Fixed(literal) => State::Fixed { literal, child },
            Pending::Free(literal) => State::Free { literal, child },
            Pending::Value(sym) if sym.optional => State::OptionalValue {
                class: sym.class,
                child,
            },
            Pending::Value(sym) => State::Value {
                class: sym.class,
                child,
            },
            Pending::Ellipsis(class) => State::Ellipsis { class },
        });
    }
    let head = StateId(states.len() - 1);
    Ok(StateChain::new(states, head))
}

/// Turn the format into pending states in reading order.
///
/// `prev` is the last raw character consumed; an ellipsis takes its class.
fn scan(chars: &[char]) -> Result<Vec<Pending>, FormatError> {
    let mut pending = Vec::with_capacity(chars.len());
    let mut context = Context::Free;
    let mut prev: Option<char> = None;
    let mut rest = chars;

    loop {
        match rest {
            [] => break,
            ['\\', escaped, tail @ ..] => {
                pending.push(literal(*escaped, context)?);
                prev = Some(*escaped);
                rest = tail;
            }
            ['\\'] => return Err(FormatError::DanglingEscape),
            [c @ ('[' | '{' | ']' | '}'), tail @ ..] => {
                context = match c {
                    '[' => Context::Value,
                    '{' => Context::Fixed,
                    _ => Context::Free,
                };
                prev = Some(*c);
                rest = tail;
            }
            [ELLIPSIS, tail @ ..] if context == Context::Value => {
                let class = prev
                    .and_then(symbol)
                    .ok_or(FormatError::EllipsisWithoutClass)?
                    .class;
                if !matches!(tail, [] | [']']) {
                    return Err(FormatError::TrailingAfterEllipsis);
                }
                pending.push(Pending::Ellipsis(class));
                break;
            }
            [c, tail @ ..] if context == Context::Value => {
                let sym = symbol(*c).ok_or(FormatError::UnexpectedChar(*c))?;
                pending.push(Pending::Value(sym));
                prev = Some(*c);
                rest = tail;
            }
            [c, tail @ ..] => {
                pending.push(literal(*c, context)?);
                prev = Some(*c);
                rest = tail;
            }
        }
    }
    Ok(pending)
}

/// A literal character in the current context.
fn literal(literal: char, context: Context) -> Result<Pending, FormatError> {
    match context {
        Context::Value => Err(FormatError::UnexpectedChar(literal)),
        Context::Fixed => Ok(Pending::Fixed(literal)),
        Context::Free => Ok(Pending::Free(literal)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn states(format: &str) -> Vec<State> {
        let chain = compile(format).unwrap_or_else(|e| panic!("compile({format:?}): {e}"));
        chain.iter().cloned().collect()
    }

    /// Drop child links so tests can compare shapes.
    fn shape(format: &str) -> Vec<String> {
        states(format)
            .into_iter()
            .map(|s| match s {
                State::Fixed { literal, .. } => format!("fixed {literal}"),
                State::Free { literal, .. } => format!("free {literal}"),
                State::Value { class, .. } => format!("value {class:?}"),
                State::Ellipsis { class } => format!("ellipsis {class:?}"),
                State::OptionalValue { class, .. } => format!("optional {class:?}"),
                State::EndOfLine => "eol".to_string(),
            })
            .collect()
    }

    #[test]
    fn empty_format_is_end_of_line() {
        let chain = compile("").unwrap();
        assert_eq!(chain.len(), 1);
        assert_eq!(*chain.get(chain.head()), State::EndOfLine);
    }

    #[test]
    fn value_symbols() {
        assert_eq!(
            shape("[09Aa_-]"),
            vec![
                "value Numeric",
                "optional Numeric",
                "value Letter",
                "optional Letter",
                "value AlphaNumeric",
                "optional AlphaNumeric",
            ]
        );
    }

    #[test]
    fn fixed_and_free_literals() {
        assert_eq!(
            shape("([0]){-}"),
            vec!["free (", "value Numeric", "free )", "fixed -"]
        );
    }

    #[test]
    fn any_character_is_fixed_inside_braces() {
        assert_eq!(shape("{0a}"), vec!["fixed 0", "fixed a"]);
    }

    #[test]
    fn escaped_brackets_are_literals() {
        assert_eq!(shape(r"\[[0]\]"), vec!["free [", "value Numeric", "free ]"]);
        assert_eq!(shape(r"{\}}"), vec!["fixed }"]);
        assert_eq!(shape(r"\\"), vec!["free \\"]);
    }

    #[test]
    fn ellipsis_inherits_class() {
        assert_eq!(shape("[0…]"), vec!["value Numeric", "ellipsis Numeric"]);
        assert_eq!(shape("[a…]"), vec!["optional Letter", "ellipsis Letter"]);
        assert_eq!(shape("[-…]"), vec!["optional AlphaNumeric", "ellipsis AlphaNumeric"]);
    }

    #[test]
    fn ellipsis_outside_value_group_is_literal() {
        assert_eq!(shape("[0]…"), vec!["value Numeric", "free …"]);
    }

    #[test]
    fn ellipsis_without_class() {
        assert_eq!(compile("[…]"), Err(FormatError::EllipsisWithoutClass));
    }

    #[test]
    fn content_after_ellipsis() {
        assert_eq!(compile("[0…]{-}"), Err(FormatError::TrailingAfterEllipsis));
        assert_eq!(compile("[0…0]"), Err(FormatError::TrailingAfterEllipsis));
    }

    #[test]
    fn unknown_value_symbol() {
        assert_eq!(compile("[0x]"), Err(FormatError::UnexpectedChar('x')));
        assert_eq!(compile(r"[\]]"), Err(FormatError::UnexpectedChar(']')));
    }

    #[test]
    fn stray_closer_resets_context() {
        assert_eq!(shape("]a"), vec!["free a"]);
    }

    #[test]
    fn successors_have_lower_indices() {
        let chain = compile("{+7} ([000]) [000]-[00]").unwrap();
        let mut cursor = chain.head();
        while let Some(child) = chain.child(cursor) {
            assert!(child < cursor);
            cursor = child;
        }
        assert_eq!(*chain.get(cursor), State::EndOfLine);
    }

    #[test]
    fn long_formats_compile() {
        let chain = compile(&"x".repeat(100_000)).unwrap();
        assert_eq!(chain.len(), 100_001);
        assert_eq!(chain.iter().count(), 100_000);
    }

    #[test]
    fn ellipsis_replaces_end_of_line() {
        let chain = compile("[0…]").unwrap();
        assert_eq!(chain.len(), 2);
        assert_eq!(
            *chain.get(chain.head()),
            State::Value {
                class: CharClass::Numeric,
                child: StateId(0)
            }
        );
    }

    #[test]
    fn chain_classes() {
        let chain = compile("[A]").unwrap();
        assert_eq!(
            *chain.get(chain.head()),
            State::Value {
                class: CharClass::Letter,
                child: StateId(0)
            }
        );
    }
}
