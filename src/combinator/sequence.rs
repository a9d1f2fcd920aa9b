use crate::error::ParseResult;
use crate::parser::Parser;
use crate::stream::Stream;

/// Runs `first`, then `second` on the remainder, keeping `second`'s value.
///
/// Free-function form of [`Parser::followed_by`].
pub fn sequence<T: 'static, U: 'static>(first: Parser<T>, second: Parser<U>) -> Parser<U> {
    first.followed_by(second)
}

/// Runs both parsers, keeping `first`'s value.
///
/// Free-function form of [`Parser::then_ignore`].
pub fn keep_first<T: 'static, U: 'static>(first: Parser<T>, second: Parser<U>) -> Parser<T> {
    first.then_ignore(second)
}

/// `open`, then `inner`, then `close`, keeping `inner`'s value.
///
/// ```rust
/// use riddle::combinator::{at_least_one, between};
/// use riddle::ascii::digit_char;
/// use riddle::token::char;
///
/// let parenthesized = between(
///     char('('),
///     char(')'),
///     at_least_one::<String, String>(digit_char()),
/// );
/// assert_eq!(parenthesized.try_run("(42)").unwrap(), "42");
/// assert!(parenthesized.try_run("(42").is_err());
/// ```
#[doc(alias = "delimited")]
pub fn between<O: 'static, C: 'static, T: 'static>(
    open: Parser<O>,
    close: Parser<C>,
    inner: Parser<T>,
) -> Parser<T> {
    open.followed_by(inner).then_ignore(close)
}

/// Runs the parsers in order, collecting their values.
///
/// Atomic on failure: any branch failing rolls the stream back to where the
/// first parser started.
///
/// ```rust
/// use riddle::combinator::collect;
/// use riddle::ascii::{alpha_char, digit_char};
///
/// let cell = collect(vec![alpha_char(), digit_char()]);
/// assert_eq!(cell.try_run("a1").unwrap(), vec!["a", "1"]);
///
/// // After "a?" fails on the digit, nothing has been consumed.
/// let result = cell.run(riddle::stream::Stream::new("a?"));
/// assert_eq!(result.got().unwrap().offset(), 0);
/// ```
#[doc(alias = "tuple")]
pub fn collect<T: 'static>(parsers: Vec<Parser<T>>) -> Parser<Vec<T>> {
    let labels: Vec<&str> = parsers.iter().map(|p| p.label.as_ref()).collect();
    let label = format!("({})", labels.join(" "));
    Parser::new(label, move |mut stream: Stream| {
        stream.begin_transaction();
        let mut values = Vec::with_capacity(parsers.len());
        let mut current = stream;
        for parser in &parsers {
            match parser.run(current) {
                ParseResult::Success { value, remaining } => {
                    values.push(value);
                    current = remaining;
                }
                ParseResult::Failure(failure) => {
                    let (expected, mut got) = failure.into_parts();
                    got.rollback();
                    return ParseResult::failure(expected, got);
                }
            }
        }
        current.commit();
        ParseResult::success(values, current)
    })
}

/// N-ary string append: runs the parsers in order and concatenates their
/// values. Atomic on failure, like [`collect`].
///
/// ```rust
/// use riddle::combinator::{assemble, optional};
/// use riddle::ascii::digit_char;
/// use riddle::token::char;
///
/// let signed_digit = assemble(vec![
///     optional(char('-')).map(Option::unwrap_or_default),
///     digit_char(),
/// ]);
/// assert_eq!(signed_digit.try_run("-7").unwrap(), "-7");
/// assert_eq!(signed_digit.try_run("7").unwrap(), "7");
/// ```
pub fn assemble(parsers: Vec<Parser<String>>) -> Parser<String> {
    collect(parsers).map(|parts| parts.concat())
}
