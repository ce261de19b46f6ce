//! Compiled mask states and their per-character acceptance rules.

use super::char_class::CharClass;

/// Index of a state inside a [`StateChain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub(crate) usize);

/// One position in a compiled mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    /// Literal from a `{...}` group; part of the extracted value.
    Fixed { literal: char, child: StateId },
    /// Literal outside any group; decoration only.
    Free { literal: char, child: StateId },
    /// Mandatory user character.
    Value { class: CharClass, child: StateId },
    /// Mandatory class repeated indefinitely. Loops on itself.
    Ellipsis { class: CharClass },
    /// User character that may be left out.
    OptionalValue { class: CharClass, child: StateId },
    EndOfLine,
}

/// The outcome of offering one character to a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Next {
    /// State to continue from.
    pub state: StateId,
    /// Character appended to the formatted text.
    pub insert: Option<char>,
    /// Whether the offered character was consumed.
    pub consumed: bool,
    /// Character appended to the extracted value.
    pub value: Option<char>,
}

/// An immutable arena of states.
///
/// Successors always have a lower index than their parent, except for the
/// ellipsis, which refers to itself. Ids never leave the crate, so lookups
/// always index the chain that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateChain {
    states: Vec<State>,
    head: StateId,
}

impl StateChain {
    pub(crate) fn new(states: Vec<State>, head: StateId) -> Self {
        Self { states, head }
    }

    pub(crate) fn head(&self) -> StateId {
        self.head
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub(crate) fn get(&self, id: StateId) -> &State {
        &self.states[id.0]
    }

    /// The state following `id`, or `None` for the end of line and the ellipsis.
    pub(crate) fn child(&self, id: StateId) -> Option<StateId> {
        match self.get(id) {
            State::Fixed { child, .. }
            | State::Free { child, .. }
            | State::Value { child, .. }
            | State::OptionalValue { child, .. } => Some(*child),
            State::Ellipsis { .. } | State::EndOfLine => None,
        }
    }

    /// Walk the chain from the head, stopping before the end of line.
    ///
    /// An ellipsis is yielded once and ends the walk.
    pub fn iter(&self) -> impl Iterator<Item = &State> + '_ {
        let mut cursor = Some(self.head);
        std::iter::from_fn(move || {
            let id = cursor?;
            let state = self.get(id);
            if *state == State::EndOfLine {
                cursor = None;
                return None;
            }
            cursor = self.child(id);
            Some(state)
        })
    }

    /// Offer `ch` to the state `id`.
    ///
    /// Literals never reject: they either consume a matching character or
    /// insert themselves and leave it for the successor. Optional values pass
    /// non-matching characters through. Only mandatory values and the end of
    /// line reject.
    pub(crate) fn accept(&self, id: StateId, ch: char) -> Option<Next> {
        match *self.get(id) {
            State::Fixed { literal, child } => Some(Next {
                state: child,
                insert: Some(literal),
                consumed: ch == literal,
                value: Some(literal),
            }),
            State::Free { literal, child } => Some(Next {
                state: child,
                insert: Some(literal),
                consumed: ch == literal,
                value: None,
            }),
            State::Value { class, child } => class.matches(ch).then_some(Next {
                state: child,
                insert: Some(ch),
                consumed: true,
                value: Some(ch),
            }),
            State::Ellipsis { class } => class.matches(ch).then_some(Next {
                state: id,
                insert: Some(ch),
                consumed: true,
                value: Some(ch),
            }),
            State::OptionalValue { class, child } => {
                if class.matches(ch) {
                    Some(Next {
                        state: child,
                        insert: Some(ch),
                        consumed: true,
                        value: Some(ch),
                    })
                } else {
                    Some(Next {
                        state: child,
                        insert: None,
                        consumed: false,
                        value: None,
                    })
                }
            }
            State::EndOfLine => None,
        }
    }

    /// Produce the literal at `id` without user input.
    ///
    /// Defined for literals only; every other state halts autocompletion.
    pub(crate) fn autocomplete(&self, id: StateId) -> Option<Next> {
        match *self.get(id) {
            State::Fixed { literal, child } => Some(Next {
                state: child,
                insert: Some(literal),
                consumed: false,
                value: Some(literal),
            }),
            State::Free { literal, child } => Some(Next {
                state: child,
                insert: Some(literal),
                consumed: false,
                value: None,
            }),
            _ => None,
        }
    }

    /// Whether no mandatory position remains from `id` onwards.
    pub(crate) fn is_complete_from(&self, id: StateId) -> bool {
        let mut cursor = id;
        loop {
            match self.get(cursor) {
                State::EndOfLine | State::Ellipsis { .. } => return true,
                State::Fixed { .. } | State::Free { .. } | State::Value { .. } => return false,
                State::OptionalValue { child, .. } => cursor = *child,
            }
        }
    }
}
