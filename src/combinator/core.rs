use std::sync::Arc;

use crate::error::ParseResult;
use crate::parser::Parser;
use crate::stream::Stream;

/// Always succeeds with `value`, consuming nothing.
///
/// Useful as the last alternative of a [`choice`][crate::combinator::choice]
/// to supply a default, and as the unit of [`Parser::bind`].
///
/// ```rust
/// use riddle::combinator::{either, pure};
/// use riddle::token::char;
///
/// let sign = either(char('-').value(-1), pure(1));
/// assert_eq!(sign.try_run("-4").unwrap(), -1);
/// assert_eq!(sign.try_run("4").unwrap(), 1);
/// ```
pub fn pure<T>(value: T) -> Parser<T>
where
    T: Clone + Send + Sync + 'static,
{
    Parser::new("pure", move |stream: Stream| {
        ParseResult::success(value.clone(), stream)
    })
}

/// Always succeeds with the empty string, consuming nothing.
pub fn succeed() -> Parser<String> {
    Parser::new("succeed", |stream: Stream| {
        ParseResult::success(String::new(), stream)
    })
}

/// Always fails with the given label, consuming nothing.
///
/// ```rust
/// use riddle::combinator::fail;
///
/// let p = fail::<()>("a better grammar");
/// assert_eq!(p.try_run("x").unwrap_err().expected().to_string(), "a better grammar");
/// ```
pub fn fail<T: 'static>(label: impl Into<Arc<str>>) -> Parser<T> {
    let label = label.into();
    let expected = Arc::clone(&label);
    Parser::new(label, move |stream: Stream| {
        ParseResult::failure(expected.as_ref(), stream)
    })
}

/// Succeeds, with the empty string, only at end of input.
///
/// ```rust
/// use riddle::combinator::eof;
/// use riddle::token::string;
///
/// let whole = string("done").then_ignore(eof());
/// assert!(whole.try_run("done").is_ok());
/// assert!(whole.try_run("done...").is_err());
/// ```
#[doc(alias = "end")]
pub fn eof() -> Parser<String> {
    Parser::new("end of input", |stream: Stream| {
        if stream.is_eof() {
            ParseResult::success(String::new(), stream)
        } else {
            ParseResult::failure("end of input", stream)
        }
    })
}

/// Applies `p`, turning a non-consuming failure into a `None` success.
///
/// A failure that consumed input still propagates, per the crate's
/// commitment discipline; wrap `p` in [`attempt`] first to suppress that
/// too.
///
/// ```rust
/// use riddle::combinator::optional;
/// use riddle::token::char;
///
/// let sign = optional(char('-'));
/// assert_eq!(sign.try_run("-3").unwrap(), Some("-".to_owned()));
/// assert_eq!(sign.try_run("3").unwrap(), None);
/// ```
#[doc(alias = "opt")]
pub fn optional<T: 'static>(p: Parser<T>) -> Parser<Option<T>> {
    let label = format!("optional {}", p.label);
    Parser::new(label, move |stream: Stream| {
        let start = stream.offset();
        match p.run(stream) {
            ParseResult::Success { value, remaining } => {
                ParseResult::success(Some(value), remaining)
            }
            ParseResult::Failure(failure) => {
                if failure.got().offset() == start {
                    ParseResult::success(None, failure.into_got())
                } else {
                    ParseResult::Failure(failure)
                }
            }
        }
    })
}

/// Runs `p`, restoring the stream on *any* failure — even one that consumed
/// input.
///
/// This is the opt-in to full backtracking. By default a parser that
/// consumes input and then fails is committed: [`either`][super::either]
/// reports it instead of trying the next branch. `attempt` erases the
/// consumption so alternation can continue.
///
/// ```rust
/// use riddle::combinator::{attempt, either};
/// use riddle::token::string;
///
/// let insert = string("in").append(string("sert"));
/// let inspect = string("in").append(string("spect"));
///
/// // `insert` consumes "in" before failing on "spect" input, so it is
/// // committed; only an attempt lets the second branch run.
/// assert!(either(insert.clone(), inspect.clone()).try_run("inspect").is_err());
/// assert_eq!(either(attempt(insert), inspect).try_run("inspect").unwrap(), "inspect");
/// ```
#[doc(alias = "try")]
pub fn attempt<T: 'static>(p: Parser<T>) -> Parser<T> {
    let label = Arc::clone(&p.label);
    Parser::new(label, move |mut stream: Stream| {
        stream.begin_transaction();
        match p.run(stream) {
            ParseResult::Success { value, mut remaining } => {
                remaining.commit();
                ParseResult::success(value, remaining)
            }
            ParseResult::Failure(failure) => {
                let (expected, mut got) = failure.into_parts();
                got.rollback();
                ParseResult::failure(expected, got)
            }
        }
    })
}

/// Runs `p` for its value but restores the stream, consuming nothing.
///
/// ```rust
/// use riddle::combinator::look_ahead;
/// use riddle::token::string;
///
/// let peeked = look_ahead(string("abc"));
/// let result = peeked.run(riddle::stream::Stream::new("abcdef"));
/// assert_eq!(result.value().map(String::as_str), Some("abc"));
/// assert_eq!(result.remaining().unwrap().offset(), 0);
/// ```
#[doc(alias = "peek")]
pub fn look_ahead<T: 'static>(p: Parser<T>) -> Parser<T> {
    let label = Arc::clone(&p.label);
    Parser::new(label, move |mut stream: Stream| {
        stream.begin_transaction();
        match p.run(stream) {
            ParseResult::Success { value, mut remaining } => {
                remaining.rollback();
                ParseResult::success(value, remaining)
            }
            ParseResult::Failure(failure) => {
                let (expected, mut got) = failure.into_parts();
                got.rollback();
                ParseResult::failure(expected, got)
            }
        }
    })
}

/// Succeeds, consuming nothing, exactly when `p` would fail.
///
/// ```rust
/// use riddle::combinator::not_followed_by;
/// use riddle::ascii::digit_char;
///
/// let no_digit = not_followed_by(digit_char());
/// assert!(no_digit.try_run("abc").is_ok());
/// assert!(no_digit.try_run("1bc").is_err());
/// ```
pub fn not_followed_by<T: 'static>(p: Parser<T>) -> Parser<()> {
    let label = format!("not {}", p.label);
    let expected = label.clone();
    Parser::new(label, move |mut stream: Stream| {
        stream.begin_transaction();
        match p.run(stream) {
            ParseResult::Success { mut remaining, .. } => {
                remaining.rollback();
                ParseResult::failure(expected.as_str(), remaining)
            }
            ParseResult::Failure(failure) => {
                let mut got = failure.into_got();
                got.rollback();
                ParseResult::success((), got)
            }
        }
    })
}

/// Applicative application: `pf` parses a function, `px` its argument, and
/// the result is the application.
///
/// ```rust
/// use riddle::combinator::{apply, pure};
/// use riddle::ascii::digit_char;
///
/// let double = pure(|d: String| d.parse::<u32>().unwrap() * 2);
/// assert_eq!(apply(double, digit_char()).try_run("7").unwrap(), 14);
/// ```
pub fn apply<F, A, B>(pf: Parser<F>, px: Parser<A>) -> Parser<B>
where
    F: Fn(A) -> B + Send + Sync + 'static,
    A: 'static,
    B: 'static,
{
    pf.bind(move |f| px.clone().map(f))
}
