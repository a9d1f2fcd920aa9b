//! Building expression parsers from precedence tables.
//!
//! [`expression`] turns a parser for *terms* (literals, identifiers,
//! parenthesized sub-expressions) and an ordered list of operator
//! [`Level`]s into a single parser for full expressions. Levels are given
//! in descending order of precedence: the first level binds tightest,
//! wrapping the term parser directly, and each later level wraps the one
//! before it.
//!
//! ```rust
//! use riddle::combinator::{at_least_one, binary, expression, infix_left};
//! use riddle::ascii::digit_char;
//! use riddle::token::char;
//!
//! let number = at_least_one::<String, String>(digit_char())
//!     .map(|digits| digits.parse::<i64>().unwrap());
//! let expr = expression(
//!     number,
//!     vec![
//!         infix_left(vec![
//!             binary(char('*').discard(), |a, b| a * b),
//!             binary(char('/').discard(), |a, b| a / b),
//!         ]),
//!         infix_left(vec![
//!             binary(char('+').discard(), |a, b| a + b),
//!             binary(char('-').discard(), |a, b| a - b),
//!         ]),
//!     ],
//! );
//!
//! assert_eq!(expr.try_run("2+3*4").unwrap(), 14);
//! ```

use std::sync::Arc;

use crate::combinator::choice;
use crate::error::ParseResult;
use crate::parser::Parser;
use crate::stream::Stream;

type UnaryFold<T> = Arc<dyn Fn(T) -> T + Send + Sync>;
type BinaryFold<T> = Arc<dyn Fn(T, T) -> T + Send + Sync>;

/// A unary operator: a symbol parser paired with the fold applied to its
/// operand.
pub struct UnaryOperator<T: 'static> {
    symbol: Parser<()>,
    fold: UnaryFold<T>,
}

impl<T: 'static> Clone for UnaryOperator<T> {
    fn clone(&self) -> Self {
        UnaryOperator {
            symbol: self.symbol.clone(),
            fold: Arc::clone(&self.fold),
        }
    }
}

/// A binary operator: a symbol parser paired with the fold combining its
/// two operands.
pub struct BinaryOperator<T: 'static> {
    symbol: Parser<()>,
    fold: BinaryFold<T>,
}

impl<T: 'static> Clone for BinaryOperator<T> {
    fn clone(&self) -> Self {
        BinaryOperator {
            symbol: self.symbol.clone(),
            fold: Arc::clone(&self.fold),
        }
    }
}

/// Pairs a unary operator symbol with its fold.
pub fn unary<T: 'static>(symbol: Parser<()>, fold: impl Fn(T) -> T + Send + Sync + 'static) -> UnaryOperator<T> {
    UnaryOperator {
        symbol,
        fold: Arc::new(fold),
    }
}

/// Pairs a binary operator symbol with its fold.
pub fn binary<T: 'static>(
    symbol: Parser<()>,
    fold: impl Fn(T, T) -> T + Send + Sync + 'static,
) -> BinaryOperator<T> {
    BinaryOperator {
        symbol,
        fold: Arc::new(fold),
    }
}

/// One precedence level: a group of operators with equal binding power,
/// all sharing one associativity.
pub enum Level<T: 'static> {
    /// Left-associative infix operators: `a op b op c` is `(a op b) op c`.
    InfixLeft(Vec<BinaryOperator<T>>),
    /// Right-associative infix operators: `a op b op c` is `a op (b op c)`.
    InfixRight(Vec<BinaryOperator<T>>),
    /// Non-associative infix operators: at most one application; chaining
    /// two at the same level is a parse failure.
    InfixNone(Vec<BinaryOperator<T>>),
    /// Prefix operators, folded right to left: `- ! x` is `-(!x)`.
    Prefix(Vec<UnaryOperator<T>>),
    /// Postfix operators, folded left to right: `x ! ?` is `(x!)?`.
    Postfix(Vec<UnaryOperator<T>>),
}

/// A [`Level::InfixLeft`] level.
pub fn infix_left<T: 'static>(operators: Vec<BinaryOperator<T>>) -> Level<T> {
    Level::InfixLeft(operators)
}

/// A [`Level::InfixRight`] level.
pub fn infix_right<T: 'static>(operators: Vec<BinaryOperator<T>>) -> Level<T> {
    Level::InfixRight(operators)
}

/// A [`Level::InfixNone`] level.
pub fn infix_none<T: 'static>(operators: Vec<BinaryOperator<T>>) -> Level<T> {
    Level::InfixNone(operators)
}

/// A [`Level::Prefix`] level.
pub fn prefix<T: 'static>(operators: Vec<UnaryOperator<T>>) -> Level<T> {
    Level::Prefix(operators)
}

/// A [`Level::Postfix`] level.
pub fn postfix<T: 'static>(operators: Vec<UnaryOperator<T>>) -> Level<T> {
    Level::Postfix(operators)
}

/// Builds an expression parser bottom-up from a term parser and precedence
/// levels in descending order of precedence (tightest first).
///
/// The builder emits no code: it is a pure higher-order constructor over
/// the primitive combinators, and the result is an ordinary [`Parser`].
#[doc(alias = "precedence")]
#[doc(alias = "pratt")]
pub fn expression<T: 'static>(term: Parser<T>, levels: Vec<Level<T>>) -> Parser<T> {
    levels.into_iter().fold(term, wrap_level)
}

fn unary_symbols<T: 'static>(operators: Vec<UnaryOperator<T>>) -> Parser<UnaryFold<T>> {
    choice(
        operators
            .into_iter()
            .map(|op| op.symbol.value(op.fold))
            .collect(),
    )
}

fn binary_symbols<T: 'static>(operators: Vec<BinaryOperator<T>>) -> Parser<BinaryFold<T>> {
    choice(
        operators
            .into_iter()
            .map(|op| op.symbol.value(op.fold))
            .collect(),
    )
}

fn wrap_level<T: 'static>(inner: Parser<T>, level: Level<T>) -> Parser<T> {
    match level {
        Level::InfixLeft(operators) => {
            let op = binary_symbols(operators);
            Parser::new("expression", move |stream: Stream| {
                let (mut lhs, mut current) = match inner.run(stream) {
                    ParseResult::Success { value, remaining } => (value, remaining),
                    ParseResult::Failure(failure) => return ParseResult::Failure(failure),
                };
                loop {
                    let start = current.offset();
                    match op.run(current) {
                        ParseResult::Failure(failure) => {
                            if failure.got().offset() != start {
                                return ParseResult::Failure(failure);
                            }
                            current = failure.into_got();
                            break;
                        }
                        ParseResult::Success { value: fold, remaining } => {
                            match inner.run(remaining) {
                                ParseResult::Success { value: rhs, remaining } => {
                                    lhs = fold(lhs, rhs);
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
                    }
                }
                ParseResult::success(lhs, current)
            })
        }
        Level::InfixRight(operators) => {
            let op = binary_symbols(operators);
            Parser::new("expression", move |stream: Stream| {
                let (first, mut current) = match inner.run(stream) {
                    ParseResult::Success { value, remaining } => (value, remaining),
                    ParseResult::Failure(failure) => return ParseResult::Failure(failure),
                };
                let mut operands = vec![first];
                let mut folds: Vec<BinaryFold<T>> = Vec::new();
                loop {
                    let start = current.offset();
                    match op.run(current) {
                        ParseResult::Failure(failure) => {
                            if failure.got().offset() != start {
                                return ParseResult::Failure(failure);
                            }
                            current = failure.into_got();
                            break;
                        }
                        ParseResult::Success { value: fold, remaining } => {
                            match inner.run(remaining) {
                                ParseResult::Success { value: rhs, remaining } => {
                                    folds.push(fold);
                                    operands.push(rhs);
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
                    }
                }
                let mut acc = operands.pop().expect("one operand is always parsed");
                while let Some(fold) = folds.pop() {
                    let lhs = operands.pop().expect("operands run one ahead of folds");
                    acc = fold(lhs, acc);
                }
                ParseResult::success(acc, current)
            })
        }
        Level::InfixNone(operators) => {
            let op = binary_symbols(operators);
            Parser::new("expression", move |stream: Stream| {
                let (lhs, current) = match inner.run(stream) {
                    ParseResult::Success { value, remaining } => (value, remaining),
                    ParseResult::Failure(failure) => return ParseResult::Failure(failure),
                };
                let start = current.offset();
                let (fold, after_op) = match op.run(current) {
                    ParseResult::Failure(failure) => {
                        if failure.got().offset() != start {
                            return ParseResult::Failure(failure);
                        }
                        return ParseResult::success(lhs, failure.into_got());
                    }
                    ParseResult::Success { value, remaining } => (value, remaining),
                };
                let (rhs, mut current) = match inner.run(after_op) {
                    ParseResult::Success { value, remaining } => (value, remaining),
                    ParseResult::Failure(failure) => return ParseResult::Failure(failure),
                };
                let value = fold(lhs, rhs);
                // A second operator at the same level is an error, reported
                // at the second operator's site.
                current.begin_transaction();
                match op.run(current) {
                    ParseResult::Success { mut remaining, .. } => {
                        remaining.rollback();
                        ParseResult::failure(
                            "non-associative operator used associatively",
                            remaining,
                        )
                    }
                    ParseResult::Failure(failure) => {
                        let mut got = failure.into_got();
                        got.rollback();
                        ParseResult::success(value, got)
                    }
                }
            })
        }
        Level::Prefix(operators) => {
            let op = unary_symbols(operators);
            Parser::new("expression", move |stream: Stream| {
                let mut folds: Vec<UnaryFold<T>> = Vec::new();
                let mut current = stream;
                loop {
                    let start = current.offset();
                    match op.run(current) {
                        ParseResult::Success { value, remaining } => {
                            if remaining.offset() == start {
                                current = remaining;
                                break;
                            }
                            folds.push(value);
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
                match inner.run(current) {
                    ParseResult::Success { mut value, remaining } => {
                        for fold in folds.iter().rev() {
                            value = fold(value);
                        }
                        ParseResult::success(value, remaining)
                    }
                    ParseResult::Failure(failure) => ParseResult::Failure(failure),
                }
            })
        }
        Level::Postfix(operators) => {
            let op = unary_symbols(operators);
            Parser::new("expression", move |stream: Stream| {
                let (mut value, mut current) = match inner.run(stream) {
                    ParseResult::Success { value, remaining } => (value, remaining),
                    ParseResult::Failure(failure) => return ParseResult::Failure(failure),
                };
                loop {
                    let start = current.offset();
                    match op.run(current) {
                        ParseResult::Success { value: fold, remaining } => {
                            if remaining.offset() == start {
                                current = remaining;
                                break;
                            }
                            value = fold(value);
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
                ParseResult::success(value, current)
            })
        }
    }
}
