//! Combinators applying their child parser multiple times.

use crate::error::ParseResult;
use crate::parser::Parser;
use crate::stream::{Accumulate, Stream};

/// Runs the accumulation loop shared by the repetition combinators: `item`
/// is applied until it fails without consuming, which ends the loop. A
/// failure that consumed input is a hard failure, and a success that
/// consumed nothing ends the loop to rule out spinning forever.
fn accumulate_rest<T: 'static, C>(
    item: &Parser<T>,
    mut acc: C,
    mut current: Stream,
) -> ParseResult<C>
where
    C: Accumulate<T>,
{
    loop {
        let start = current.offset();
        match item.run(current) {
            ParseResult::Success { value, remaining } => {
                if remaining.offset() == start {
                    current = remaining;
                    break;
                }
                acc.accumulate(value);
                current = remaining;
            }
            ParseResult::Failure(failure) => {
                if failure.got().offset() != start {
                    return ParseResult::Failure(failure);
                }
                current = failure.into_got();
                break;
            }
        }
    }
    ParseResult::success(acc, current)
}

/// [`Accumulate`]s zero or more successive matches of `item`.
///
/// The output is accumulator-generic: collect `String` pieces into one
/// `String`, values into a `Vec`, pairs into a map, or nothing into `()`.
///
/// ```rust
/// use riddle::combinator::zero_or_more;
/// use riddle::ascii::digit_char;
///
/// let digits = zero_or_more::<String, String>(digit_char());
/// assert_eq!(digits.try_run("123abc").unwrap(), "123");
/// assert_eq!(digits.try_run("abc").unwrap(), "");
/// ```
#[doc(alias = "many")]
#[doc(alias = "many0")]
pub fn zero_or_more<T: 'static, C>(item: Parser<T>) -> Parser<C>
where
    C: Accumulate<T> + 'static,
{
    let label = format!("({})*", item.label);
    Parser::new(label, move |stream: Stream| {
        accumulate_rest(&item, C::initial(None), stream)
    })
}

/// [`Accumulate`]s one or more successive matches of `item`.
///
/// ```rust
/// use riddle::combinator::at_least_one;
/// use riddle::token::char;
///
/// let run = at_least_one::<String, String>(char('a'));
/// assert_eq!(run.try_run("aaab").unwrap(), "aaa");
/// assert!(run.try_run("b").is_err());
/// ```
#[doc(alias = "many1")]
pub fn at_least_one<T: 'static, C>(item: Parser<T>) -> Parser<C>
where
    C: Accumulate<T> + 'static,
{
    let label = format!("({})+", item.label);
    Parser::new(label, move |stream: Stream| match item.run(stream) {
        ParseResult::Success { value, remaining } => {
            let mut acc = C::initial(None);
            acc.accumulate(value);
            accumulate_rest(&item, acc, remaining)
        }
        ParseResult::Failure(failure) => ParseResult::Failure(failure),
    })
}

/// Exactly `count` matches of `item`, atomic on failure.
///
/// ```rust
/// use riddle::combinator::repeat;
/// use riddle::ascii::hex_digit_char;
///
/// let short_hash = repeat::<String, String>(4, hex_digit_char());
/// assert_eq!(short_hash.try_run("deadbeef").unwrap(), "dead");
/// assert!(short_hash.try_run("dea").is_err());
/// ```
#[doc(alias = "count")]
pub fn repeat<T: 'static, C>(count: usize, item: Parser<T>) -> Parser<C>
where
    C: Accumulate<T> + 'static,
{
    let label = format!("({}){{{count}}}", item.label);
    Parser::new(label, move |mut stream: Stream| {
        stream.begin_transaction();
        let mut acc = C::initial(Some(count));
        let mut current = stream;
        for _ in 0..count {
            match item.run(current) {
                ParseResult::Success { value, remaining } => {
                    acc.accumulate(value);
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
        ParseResult::success(acc, current)
    })
}

/// Zero or more `item`s separated by `separator`, keeping the item values.
///
/// A separator that matches without a following item is a hard failure, so
/// trailing separators are rejected.
///
/// ```rust
/// use riddle::combinator::{at_least_one, sep_by};
/// use riddle::ascii::digit_char;
/// use riddle::token::char;
///
/// let number = at_least_one::<String, String>(digit_char());
/// let list = sep_by(number, char(','));
/// assert_eq!(list.try_run("1,22,333").unwrap(), vec!["1", "22", "333"]);
/// assert_eq!(list.try_run("x").unwrap(), Vec::<String>::new());
/// assert!(list.try_run("1,").is_err());
/// ```
#[doc(alias = "separated")]
pub fn sep_by<T: 'static, S: 'static>(item: Parser<T>, separator: Parser<S>) -> Parser<Vec<T>> {
    let label = format!("{} separated by {}", item.label, separator.label);
    Parser::new(label, move |stream: Stream| {
        let start = stream.offset();
        match item.run(stream) {
            ParseResult::Success { value, remaining } => {
                separated_rest(&item, &separator, vec![value], remaining)
            }
            ParseResult::Failure(failure) => {
                if failure.got().offset() != start {
                    return ParseResult::Failure(failure);
                }
                ParseResult::success(Vec::new(), failure.into_got())
            }
        }
    })
}

/// One or more `item`s separated by `separator`.
pub fn sep_by1<T: 'static, S: 'static>(item: Parser<T>, separator: Parser<S>) -> Parser<Vec<T>> {
    let label = format!("{} separated by {}", item.label, separator.label);
    Parser::new(label, move |stream: Stream| match item.run(stream) {
        ParseResult::Success { value, remaining } => {
            separated_rest(&item, &separator, vec![value], remaining)
        }
        ParseResult::Failure(failure) => ParseResult::Failure(failure),
    })
}

fn separated_rest<T: 'static, S: 'static>(
    item: &Parser<T>,
    separator: &Parser<S>,
    mut values: Vec<T>,
    mut current: Stream,
) -> ParseResult<Vec<T>> {
    loop {
        let start = current.offset();
        match separator.run(current) {
            ParseResult::Failure(failure) => {
                if failure.got().offset() != start {
                    return ParseResult::Failure(failure);
                }
                current = failure.into_got();
                break;
            }
            ParseResult::Success { remaining, .. } => match item.run(remaining) {
                ParseResult::Success { value, remaining } => {
                    if remaining.offset() == start {
                        current = remaining;
                        break;
                    }
                    values.push(value);
                    current = remaining;
                }
                ParseResult::Failure(failure) => {
                    // A consuming separator commits us to another item.
                    if failure.got().offset() != start {
                        return ParseResult::Failure(failure);
                    }
                    current = failure.into_got();
                    break;
                }
            },
        }
    }
    ParseResult::success(values, current)
}
