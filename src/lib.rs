//! # riddle, sifting text character by character
//!
//! riddle is a parser combinator library for character-oriented input. A
//! grammar is an expression: small, typed parsers ([`token::char`],
//! [`ascii::digit_char`], [`token::string`]) are combined by higher-order
//! functions ([`combinator::either`], [`combinator::zero_or_more`],
//! [`Parser::map`]) into larger parsers whose output is a typed value — a
//! number, a syntax tree, a domain object — never a raw token stream.
//!
//! ## Example
//!
//! ```rust
//! use riddle::ascii::digit_char;
//! use riddle::combinator::{at_least_one, either};
//! use riddle::token::char;
//!
//! let number = at_least_one::<String, String>(digit_char())
//!     .map(|digits| digits.parse::<i64>().unwrap());
//! let signed = either(
//!     char('-').followed_by(number.clone()).map(|n| -n),
//!     number,
//! );
//!
//! assert_eq!(signed.try_run("-42").unwrap(), -42);
//! assert!(signed.try_run("x").is_err());
//! ```
//!
//! ## How it fits together
//!
//! - [`stream::Stream`] owns the input text, the current
//!   [`Position`][stream::Position] (offset, line, column), and a LIFO
//!   transaction stack for checkpoint/rollback.
//! - A [`Parser<T>`] wraps a function `Stream -> ParseResult<T>` together
//!   with a human-readable label. Parsers are values: cheap to clone, and —
//!   once fully constructed — immutable and shareable across threads.
//! - [`error::ParseResult`] is the sum of `Success { value, remaining }`
//!   and `Failure { expected, got }`; failures flow as values and only
//!   become a [`error::ParserFailure`] error at the [`Parser::try_run`]
//!   boundary.
//! - [`combinator`] is the library of combining forms, including the
//!   [`combinator::expression`] precedence-table builder for operator
//!   grammars.
//!
//! ## Backtracking
//!
//! The default discipline is *no-consume backtracking*: [`combinator::either`]
//! tries its next branch only when the previous branch failed without
//! consuming input. A failure after consumption is a commitment and
//! propagates. Wrap a branch in [`combinator::attempt`] to opt into full
//! backtracking for that branch.
//!
//! ## Feature flags
//!
//! - `debug`: trace parser execution to stderr, with nesting depth and
//!   colored outcomes.
#![warn(missing_docs)]

pub mod ascii;
pub mod combinator;
pub mod error;
mod parser;
pub mod stream;
pub mod token;
mod trace;

pub use crate::parser::Parser;

/// Core types available for glob import.
///
/// ## Example
///
/// ```rust
/// use riddle::prelude::*;
/// use riddle::token::string;
///
/// let greeting = string("hello");
/// let result = greeting.run(Stream::new("hello world"));
/// assert!(result.is_success());
/// ```
pub mod prelude {
    pub use crate::error::{ParseResult, ParserFailure};
    pub use crate::stream::{Position, Stream};
    pub use crate::Parser;
}
