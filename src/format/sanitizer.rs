//! Normalisation of raw format strings before compilation.
//!
//! The sanitizer checks group structure and rewrites value groups so each one
//! holds a single symbol family with mandatory symbols ahead of optional ones.

use std::str::Chars;

use itertools::Itertools;

use super::char_class::{ELLIPSIS, symbol};
use super::error::FormatError;

/// A top-level piece of a format string.
#[derive(Debug, PartialEq)]
enum Block {
    Free(String),
    Fixed(String),
    Value(String),
}

/// Validate and normalise `raw`.
pub fn sanitize(raw: &str) -> Result<String, FormatError> {
    let blocks = split_blocks(raw)?;
    Ok(blocks.iter().map(render_block).join(""))
}

fn split_blocks(raw: &str) -> Result<Vec<Block>, FormatError> {
    let mut blocks = Vec::new();
    let mut free = String::new();
    let mut chars = raw.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                let escaped = chars.next().ok_or(FormatError::DanglingEscape)?;
                free.push('\\');
                free.push(escaped);
            }
            '[' | '{' => {
                if !free.is_empty() {
                    blocks.push(Block::Free(std::mem::take(&mut free)));
                }
                let body = read_group(&mut chars, ch)?;
                blocks.push(if ch == '[' {
                    Block::Value(body)
                } else {
                    Block::Fixed(body)
                });
            }
            _ => free.push(ch),
        }
    }
    if !free.is_empty() {
        blocks.push(Block::Free(free));
    }
    Ok(blocks)
}

/// Read a group body (the opening bracket has already been consumed).
fn read_group(chars: &mut Chars<'_>, open: char) -> Result<String, FormatError> {
    let close = if open == '[' { ']' } else { '}' };
    let mut body = String::new();
    loop {
        match chars.next() {
            None => return Err(FormatError::UnclosedGroup(open)),
            Some('\\') => {
                let escaped = chars.next().ok_or(FormatError::DanglingEscape)?;
                body.push('\\');
                body.push(escaped);
            }
            Some(c) if c == close => return Ok(body),
            Some(c @ ('[' | '{')) => return Err(FormatError::NestedGroup(c)),
            Some(c @ (']' | '}')) => return Err(FormatError::MismatchedGroup { open, close: c }),
            Some(c) => body.push(c),
        }
    }
}

fn render_block(block: &Block) -> String {
    match block {
        Block::Free(text) => text.clone(),
        Block::Fixed(text) => format!("{{{text}}}"),
        Block::Value(text) => split_families(text)
            .into_iter()
            .map(|mut run| {
                // Unknown characters stay put; only the symbols between them move.
                for symbols in run.split_mut(|&c| rank(c).is_none()) {
                    symbols.sort_by_key(|&c| rank(c));
                }
                format!("[{}]", run.into_iter().collect::<String>())
            })
            .join(""),
    }
}

/// Split a value group body into runs of one symbol family each.
///
/// Ellipses and unknown characters stay with the run they appear in.
fn split_families(body: &str) -> Vec<Vec<char>> {
    let mut runs: Vec<Vec<char>> = Vec::new();
    let mut family = None;
    for ch in body.chars() {
        if let Some(sym) = symbol(ch) {
            if family.is_some_and(|f| f != sym.class) {
                runs.push(Vec::new());
            }
            family = Some(sym.class);
        }
        match runs.last_mut() {
            Some(run) => run.push(ch),
            None => runs.push(vec![ch]),
        }
    }
    runs
}

/// Sort key inside a run: mandatory, then optional, then the ellipsis.
///
/// `None` for characters that are not value symbols.
fn rank(ch: char) -> Option<u8> {
    match symbol(ch) {
        Some(sym) if !sym.optional => Some(0),
        Some(_) => Some(1),
        None if ch == ELLIPSIS => Some(2),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(raw: &str) -> String {
        sanitize(raw).unwrap_or_else(|e| panic!("sanitize({raw:?}) failed: {e}"))
    }

    #[test]
    fn plain_format_is_unchanged() {
        assert_eq!(ok("[00]{-}[00]"), "[00]{-}[00]");
        assert_eq!(ok("+7 ([000]) [000]-[00]-[00]"), "+7 ([000]) [000]-[00]-[00]");
    }

    #[test]
    fn mandatory_sorted_before_optional() {
        assert_eq!(ok("[9900]"), "[0099]");
        assert_eq!(ok("[aA]"), "[Aa]");
        assert_eq!(ok("[-_]"), "[_-]");
    }

    #[test]
    fn mixed_families_are_divided() {
        assert_eq!(ok("[00AA]"), "[00][AA]");
        assert_eq!(ok("[0A_]"), "[0][A][_]");
        assert_eq!(ok("[0a9]"), "[0][a][9]");
    }

    #[test]
    fn ellipsis_moves_to_end_of_its_run() {
        assert_eq!(ok("[0…9]"), "[09…]");
        assert_eq!(ok("[0A…]"), "[0][A…]");
    }

    #[test]
    fn unknown_characters_stay_in_place() {
        assert_eq!(ok("[9x]"), "[9x]");
        assert_eq!(ok("[90x]"), "[09x]");
        assert_eq!(ok("[9x90]"), "[9x09]");
        assert_eq!(
            sanitize("[9x]").and_then(|s| crate::format::compile(&s)),
            Err(FormatError::UnexpectedChar('x'))
        );
    }

    #[test]
    fn escapes_are_preserved() {
        assert_eq!(ok(r"\[[0]\]"), r"\[[0]\]");
        assert_eq!(ok(r"{\{}"), r"{\{}");
    }

    #[test]
    fn fixed_group_is_untouched() {
        assert_eq!(ok("{9a-}"), "{9a-}");
    }

    #[test]
    fn nested_groups_are_rejected() {
        assert_eq!(sanitize("[0[9]]"), Err(FormatError::NestedGroup('[')));
        assert_eq!(sanitize("{a[0]}"), Err(FormatError::NestedGroup('[')));
        assert_eq!(sanitize("[0{-}]"), Err(FormatError::NestedGroup('{')));
    }

    #[test]
    fn unclosed_group() {
        assert_eq!(sanitize("[00"), Err(FormatError::UnclosedGroup('[')));
        assert_eq!(sanitize("{-"), Err(FormatError::UnclosedGroup('{')));
    }

    #[test]
    fn mismatched_group() {
        assert_eq!(
            sanitize("[0}"),
            Err(FormatError::MismatchedGroup {
                open: '[',
                close: '}'
            })
        );
    }

    #[test]
    fn dangling_escape() {
        assert_eq!(sanitize(r"[0]\"), Err(FormatError::DanglingEscape));
        assert_eq!(sanitize(r"{\"), Err(FormatError::DanglingEscape));
    }
}
