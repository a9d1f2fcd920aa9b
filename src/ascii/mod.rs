//! Conventional character classes.
//!
//! Thin wrappers over [`satisfy`][crate::token::satisfy] with end-user-facing
//! labels. Classification follows `char`'s own methods, so `alpha_char` and
//! `alpha_num_char` accept the full Unicode repertoire while `digit_char`
//! and `hex_digit_char` stay ASCII, as grammars for numbers expect.

use crate::combinator::either;
use crate::error::ParseResult;
use crate::parser::Parser;
use crate::stream::Stream;
use crate::token::{satisfy, string};

#[cfg(test)]
mod tests;

/// Matches one decimal digit, `0-9`.
pub fn digit_char() -> Parser<String> {
    satisfy("digit", |c| c.is_ascii_digit())
}

/// Matches one hexadecimal digit, `0-9a-fA-F`.
pub fn hex_digit_char() -> Parser<String> {
    satisfy("hex digit", |c| c.is_ascii_hexdigit())
}

/// Matches one alphabetic character.
pub fn alpha_char() -> Parser<String> {
    satisfy("letter", |c| c.is_alphabetic())
}

/// Matches one alphanumeric character.
pub fn alpha_num_char() -> Parser<String> {
    satisfy("letter or digit", |c| c.is_alphanumeric())
}

/// Matches a single space character.
pub fn space() -> Parser<String> {
    satisfy("space", |c| c == ' ')
}

/// Matches a single tab character.
pub fn tab() -> Parser<String> {
    satisfy("tab", |c| c == '\t')
}

/// Matches a single `\n`.
pub fn newline() -> Parser<String> {
    satisfy("newline", |c| c == '\n')
}

/// Matches an end of line, `\n` or `\r\n`, yielding what was consumed.
pub fn eol() -> Parser<String> {
    either(newline(), string("\r\n")).label("end of line")
}

/// Consumes zero or more whitespace characters; never fails.
///
/// This is the conventional skipper glued after tokens:
///
/// ```rust
/// use riddle::ascii::whitespace;
/// use riddle::token::char;
///
/// let comma = char(',').then_ignore(whitespace());
/// assert_eq!(comma.try_run(",   x").unwrap(), ",");
/// ```
pub fn whitespace() -> Parser<String> {
    Parser::new("whitespace", |mut stream: Stream| {
        let consumed = stream.take_while(char::is_whitespace);
        ParseResult::success(consumed, stream)
    })
}
