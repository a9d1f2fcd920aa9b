//! Parsers extracting tokens from the stream.
//!
//! Every primitive here is atomic: on failure the stream is left exactly
//! where it was, via the `begin_transaction` / `rollback` / `commit`
//! convention. Character-valued primitives yield `String` values so that
//! results compose under concatenation ([`Parser::append`],
//! [`assemble`][crate::combinator::assemble]).

use std::sync::Arc;

use crate::error::ParseResult;
use crate::parser::Parser;
use crate::stream::Stream;

#[cfg(test)]
mod tests;

/// Matches a single character for which `pred` holds.
///
/// The label names the production in error messages, since a predicate has
/// no printable form.
///
/// ```rust
/// use riddle::token::satisfy;
///
/// let even = satisfy("even digit", |c| matches!(c, '0' | '2' | '4' | '6' | '8'));
/// assert_eq!(even.try_run("42").unwrap(), "4");
/// assert_eq!(even.try_run("7").unwrap_err().expected().to_string(), "even digit");
/// ```
pub fn satisfy(
    label: impl Into<Arc<str>>,
    pred: impl Fn(char) -> bool + Send + Sync + 'static,
) -> Parser<String> {
    let label = label.into();
    let expected = Arc::clone(&label);
    Parser::new(label, move |mut stream: Stream| {
        stream.begin_transaction();
        match stream.take1() {
            Some(c) if pred(c) => {
                stream.commit();
                ParseResult::success(c.to_string(), stream)
            }
            _ => {
                stream.rollback();
                ParseResult::failure(expected.as_ref(), stream)
            }
        }
    })
}

/// Matches exactly the character `c`.
///
/// ```rust
/// use riddle::token::char;
///
/// let a = char('a');
/// assert_eq!(a.try_run("abc").unwrap(), "a");
/// assert_eq!(a.try_run("xyz").unwrap_err().expected().to_string(), "'a'");
/// ```
pub fn char(c: char) -> Parser<String> {
    satisfy(format!("'{c}'"), move |got| got == c)
}

/// Matches `c` case-insensitively, yielding the character actually consumed.
///
/// ```rust
/// use riddle::token::char_i;
///
/// let k = char_i('k');
/// assert_eq!(k.try_run("k").unwrap(), "k");
/// assert_eq!(k.try_run("K").unwrap(), "K");
/// ```
pub fn char_i(c: char) -> Parser<String> {
    satisfy(format!("'{c}'"), move |got| {
        got == c || got.to_lowercase().eq(c.to_lowercase())
    })
}

/// Matches any single character; fails only at end of input.
pub fn any_single() -> Parser<String> {
    Parser::new("any character", |mut stream: Stream| {
        stream.begin_transaction();
        match stream.take1() {
            Some(c) => {
                stream.commit();
                ParseResult::success(c.to_string(), stream)
            }
            None => {
                stream.rollback();
                ParseResult::failure("EOF", stream)
            }
        }
    })
}

/// Matches any single character except `c`.
pub fn any_single_but(c: char) -> Parser<String> {
    satisfy(format!("any character but '{c}'"), move |got| got != c)
}

/// Matches any character contained in `set`.
///
/// ```rust
/// use riddle::token::one_of_s;
///
/// let op = one_of_s("+-*/");
/// assert_eq!(op.try_run("*").unwrap(), "*");
/// assert!(op.try_run("%").is_err());
/// ```
pub fn one_of_s(set: impl Into<String>) -> Parser<String> {
    let set = set.into();
    satisfy(format!("one of \"{set}\""), move |c| set.contains(c))
}

/// Matches any character *not* contained in `set`.
pub fn none_of_s(set: impl Into<String>) -> Parser<String> {
    let set = set.into();
    satisfy(format!("none of \"{set}\""), move |c| !set.contains(c))
}

/// Matches the literal `s`, verbatim and atomically: either all of `s` is
/// consumed, or nothing is.
///
/// # Panics
///
/// Panics when `s` is empty; an empty literal is a malformed grammar.
///
/// ```rust
/// use riddle::token::string;
///
/// let kw = string("while");
/// assert_eq!(kw.try_run("while(1)").unwrap(), "while");
///
/// // Atomic: after the failure the stream has not moved.
/// use riddle::stream::Stream;
/// let result = kw.run(Stream::new("whale"));
/// assert_eq!(result.got().unwrap().offset(), 0);
/// ```
pub fn string(s: impl Into<String>) -> Parser<String> {
    let s = s.into();
    assert!(!s.is_empty(), "string() requires a non-empty literal");
    let len = s.chars().count();
    let label = format!("\"{s}\"");
    let expected = label.clone();
    Parser::new(label, move |mut stream: Stream| {
        stream.begin_transaction();
        match stream.take_n(len) {
            Some(chunk) if chunk == s => {
                stream.commit();
                ParseResult::success(chunk, stream)
            }
            _ => {
                stream.rollback();
                ParseResult::failure(expected.as_str(), stream)
            }
        }
    })
}

/// Matches `s` case-insensitively, yielding the text actually consumed with
/// its original casing.
///
/// ```rust
/// use riddle::token::string_i;
///
/// let select = string_i("select");
/// assert_eq!(select.try_run("SELECT *").unwrap(), "SELECT");
/// ```
pub fn string_i(s: impl Into<String>) -> Parser<String> {
    let s = s.into();
    assert!(!s.is_empty(), "string_i() requires a non-empty literal");
    let len = s.chars().count();
    let folded = s.to_lowercase();
    let label = format!("\"{s}\"");
    let expected = label.clone();
    Parser::new(label, move |mut stream: Stream| {
        stream.begin_transaction();
        match stream.take_n(len) {
            Some(chunk) if chunk.to_lowercase() == folded => {
                stream.commit();
                ParseResult::success(chunk, stream)
            }
            _ => {
                stream.rollback();
                ParseResult::failure(expected.as_str(), stream)
            }
        }
    })
}
