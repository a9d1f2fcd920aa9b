//! # Error management
//!
//! Errors are designed with multiple needs in mind:
//! - Flow as plain values through combinators, so that
//!   [`choice`][crate::combinator::choice] can discard and merge them cheaply
//! - Carry the failed production's label and a stream snapshot, so a message
//!   can be rendered with filename, line, column, excerpt, and caret
//! - Stay structurally comparable for tests
//!
//! A parse failure is *recoverable*: it is a [`Failure`] value inside
//! [`ParseResult`], and alternation may consume it and try another branch.
//! Only at the [`Parser::try_run`][crate::Parser::try_run] boundary does a
//! failure become the user-facing [`ParserFailure`] error.
//!
//! Configuration errors — running an unbound recursive parser, mismatched
//! transactions, an empty [`string`][crate::token::string] needle — are
//! panics, never caught by combinators: the grammar itself is malformed.

use std::fmt;

use crate::parser::Parser;
use crate::stream::{Position, Stream};

/// What a failed parser was looking for.
///
/// Alternation merges the expectations of its branches into
/// [`Expected::OneOf`]; nested alternations are flattened and deduplicated,
/// so the set of labels is stable however the branches were grouped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expected {
    /// A single production label, e.g. `'a'` or `digit`.
    Label(String),
    /// Any of several alternatives, rendered as `('a' or 'b' or …)`.
    OneOf(Vec<Expected>),
}

impl Expected {
    /// A single label.
    pub fn label(text: impl Into<String>) -> Self {
        Expected::Label(text.into())
    }

    /// The merged expectation of several alternatives.
    ///
    /// Nested `OneOf`s are flattened, duplicates dropped, and a single
    /// remaining alternative collapses back to itself.
    pub fn one_of(alternatives: Vec<Expected>) -> Self {
        let mut flat: Vec<Expected> = Vec::with_capacity(alternatives.len());
        for alternative in alternatives {
            match alternative {
                Expected::OneOf(inner) => {
                    for e in inner {
                        if !flat.contains(&e) {
                            flat.push(e);
                        }
                    }
                }
                other => {
                    if !flat.contains(&other) {
                        flat.push(other);
                    }
                }
            }
        }
        if flat.len() == 1 {
            flat.into_iter().next().expect("length was checked")
        } else {
            Expected::OneOf(flat)
        }
    }

    /// The individual alternative labels, a single-element list for
    /// [`Expected::Label`].
    pub fn alternatives(&self) -> Vec<String> {
        match self {
            Expected::Label(label) => vec![label.clone()],
            Expected::OneOf(alternatives) => {
                alternatives.iter().map(|a| a.to_string()).collect()
            }
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Label(label) => f.write_str(label),
            Expected::OneOf(alternatives) => {
                f.write_str("(")?;
                for (i, alternative) in alternatives.iter().enumerate() {
                    if i != 0 {
                        f.write_str(" or ")?;
                    }
                    write!(f, "{alternative}")?;
                }
                f.write_str(")")
            }
        }
    }
}

impl From<&str> for Expected {
    fn from(label: &str) -> Self {
        Expected::Label(label.to_owned())
    }
}

impl From<String> for Expected {
    fn from(label: String) -> Self {
        Expected::Label(label)
    }
}

/// A parse failure: what was expected, and the stream at the point of
/// failure.
///
/// The carried stream snapshot is what makes rendering possible long after
/// the parse has moved on: it still knows the full source, the filename,
/// and the failure position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Failure {
    expected: Expected,
    got: Stream,
}

impl Failure {
    /// Creates a failure at the given stream's position.
    pub fn new(expected: impl Into<Expected>, got: Stream) -> Self {
        Failure {
            expected: expected.into(),
            got,
        }
    }

    /// The label of the failed production.
    pub fn expected(&self) -> &Expected {
        &self.expected
    }

    /// The stream snapshot at the point of failure.
    pub fn got(&self) -> &Stream {
        &self.got
    }

    /// The position of the failure.
    pub fn position(&self) -> Position {
        self.got.position()
    }

    pub(crate) fn into_got(self) -> Stream {
        self.got
    }

    pub(crate) fn into_parts(self) -> (Expected, Stream) {
        (self.expected, self.got)
    }

    pub(crate) fn relabel(self, label: &str) -> Self {
        Failure {
            expected: Expected::label(label),
            got: self.got,
        }
    }

    /// Renders the failure with filename, line and column, the offending
    /// source line, and a caret under the failure column.
    ///
    /// ```rust
    /// use riddle::combinator::either;
    /// use riddle::error::ParseResult;
    /// use riddle::stream::Stream;
    /// use riddle::token::char;
    ///
    /// let p = either(char('a'), char('b'));
    /// let failure = match p.run(Stream::with_filename("cd", "input.txt")) {
    ///     ParseResult::Failure(failure) => failure,
    ///     ParseResult::Success { .. } => unreachable!(),
    /// };
    /// assert_eq!(
    ///     failure.render(),
    ///     "parse error at input.txt:1:1\n  |\n1 | cd\n  | ^ expected one of: 'a', 'b'"
    /// );
    /// ```
    pub fn render(&self) -> String {
        let pos = self.position();
        let src = self.got.source();
        let offset = pos.offset();

        let line_start = src[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0);
        let line_end = src[offset..]
            .find('\n')
            .map(|i| offset + i)
            .unwrap_or(src.len());
        let excerpt = src[line_start..line_end].trim_end();
        let caret_column = src[line_start..offset].chars().count() + 1;

        let expected = match &self.expected {
            Expected::OneOf(_) => {
                format!("expected one of: {}", self.expected.alternatives().join(", "))
            }
            Expected::Label(label) => format!("expected {label}"),
        };
        let location = match self.got.filename() {
            Some(name) => format!("{name}:{}:{}", pos.line(), pos.column()),
            None => format!("line {}, column {}", pos.line(), pos.column()),
        };

        let line_no = pos.line().to_string();
        let gutter = " ".repeat(line_no.len());
        let mut out = format!("parse error at {location}\n");
        out.push_str(&format!("{gutter} |\n"));
        out.push_str(&format!("{line_no} | {excerpt}\n"));
        out.push_str(&format!("{gutter} | {caret:>width$} {expected}", caret = "^", width = caret_column));
        out
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Holds the outcome of running a [`Parser`].
///
/// - `Success` carries the parsed value and the remaining stream
/// - `Failure` carries a [`Failure`] value
///
/// Failures flow as values: combinators inspect and propagate them, and
/// [`choice`][crate::combinator::choice] consumes them when trying the next
/// branch.
#[derive(Clone, Debug, PartialEq)]
pub enum ParseResult<T> {
    /// The parser matched; `remaining` picks up where it stopped.
    Success {
        /// The parsed value.
        value: T,
        /// The stream positioned after the match.
        remaining: Stream,
    },
    /// The parser did not match.
    Failure(Failure),
}

impl<T> ParseResult<T> {
    /// A success at the given stream.
    pub fn success(value: T, remaining: Stream) -> Self {
        ParseResult::Success { value, remaining }
    }

    /// A failure at the given stream's position.
    pub fn failure(expected: impl Into<Expected>, got: Stream) -> Self {
        ParseResult::Failure(Failure::new(expected, got))
    }

    /// True for the `Success` variant.
    pub fn is_success(&self) -> bool {
        matches!(self, ParseResult::Success { .. })
    }

    /// True for the `Failure` variant.
    pub fn is_failure(&self) -> bool {
        matches!(self, ParseResult::Failure(_))
    }

    /// Applies `f` to the success value; failures pass through unchanged.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ParseResult<U> {
        match self {
            ParseResult::Success { value, remaining } => ParseResult::Success {
                value: f(value),
                remaining,
            },
            ParseResult::Failure(failure) => ParseResult::Failure(failure),
        }
    }

    /// Drops the success value, keeping only how far the parse got.
    pub fn discard(self) -> ParseResult<()> {
        self.map(|_| ())
    }

    /// Runs `next` on the remaining stream of a success; a failure returns
    /// itself.
    pub fn continue_with<U: 'static>(self, next: &Parser<U>) -> ParseResult<U> {
        match self {
            ParseResult::Success { remaining, .. } => next.run(remaining),
            ParseResult::Failure(failure) => ParseResult::Failure(failure),
        }
    }

    /// The success value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            ParseResult::Success { value, .. } => Some(value),
            ParseResult::Failure(_) => None,
        }
    }

    /// The success value, by move.
    pub fn into_value(self) -> Option<T> {
        match self {
            ParseResult::Success { value, .. } => Some(value),
            ParseResult::Failure(_) => None,
        }
    }

    /// The remaining stream of a success.
    pub fn remaining(&self) -> Option<&Stream> {
        match self {
            ParseResult::Success { remaining, .. } => Some(remaining),
            ParseResult::Failure(_) => None,
        }
    }

    /// The expected label of a failure.
    pub fn expected(&self) -> Option<&Expected> {
        match self {
            ParseResult::Success { .. } => None,
            ParseResult::Failure(failure) => Some(failure.expected()),
        }
    }

    /// The stream snapshot of a failure.
    pub fn got(&self) -> Option<&Stream> {
        match self {
            ParseResult::Success { .. } => None,
            ParseResult::Failure(failure) => Some(failure.got()),
        }
    }

    /// The position the parse reached: after the match on success, at the
    /// failure point otherwise.
    pub fn position(&self) -> Position {
        match self {
            ParseResult::Success { remaining, .. } => remaining.position(),
            ParseResult::Failure(failure) => failure.position(),
        }
    }
}

impl ParseResult<String> {
    /// Concatenates two string-valued results.
    ///
    /// Both successes yield one success holding the concatenation and the
    /// later remaining stream; either failure short-circuits.
    pub fn append(self, other: ParseResult<String>) -> ParseResult<String> {
        match (self, other) {
            (
                ParseResult::Success { value: mut first, .. },
                ParseResult::Success { value: second, remaining },
            ) => {
                first.push_str(&second);
                ParseResult::Success {
                    value: first,
                    remaining,
                }
            }
            (ParseResult::Failure(failure), _) | (_, ParseResult::Failure(failure)) => {
                ParseResult::Failure(failure)
            }
        }
    }
}

/// The error surfaced by [`Parser::try_run`][crate::Parser::try_run], for
/// callers who prefer `Result` to discriminating [`ParseResult`] themselves.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{failure}")]
pub struct ParserFailure {
    failure: Failure,
}

impl ParserFailure {
    /// Wraps a failure value.
    pub fn new(failure: Failure) -> Self {
        ParserFailure { failure }
    }

    /// The underlying failure.
    pub fn failure(&self) -> &Failure {
        &self.failure
    }

    /// The label of the failed production.
    pub fn expected(&self) -> &Expected {
        self.failure.expected()
    }

    /// The position of the failure.
    pub fn position(&self) -> Position {
        self.failure.position()
    }
}

impl From<Failure> for ParserFailure {
    fn from(failure: Failure) -> Self {
        ParserFailure::new(failure)
    }
}
