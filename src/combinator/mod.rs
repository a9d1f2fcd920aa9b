//! # List of combinators
//!
//! ## Basic combinators
//!
//! | combinator | usage | output |
//! |---|---|---|
//! | [`pure`] | `pure(3)` | always succeeds with the value, consuming nothing |
//! | [`succeed`] | `succeed()` | always succeeds with `""`, consuming nothing |
//! | [`fail`] | `fail("thing")` | always fails with the given label |
//! | [`eof`] | `eof()` | succeeds only at end of input |
//! | [`optional`] | `optional(char('-'))` | `Some(value)` or `None`, consuming nothing on `None` |
//! | [`attempt`] | `attempt(p)` | runs `p`, restoring the stream on *any* failure |
//! | [`look_ahead`] | `look_ahead(p)` | `p`'s value, consuming nothing |
//! | [`not_followed_by`] | `not_followed_by(p)` | succeeds iff `p` would fail, consuming nothing |
//! | [`apply`] | `apply(pf, px)` | applies a parsed function to a parsed argument |
//!
//! ## Choice
//!
//! | combinator | usage | output |
//! |---|---|---|
//! | [`either`] | `either(p, q)` | first success; `q` only tried if `p` failed without consuming |
//! | [`choice`] | `choice(vec![p, q, r])` | n-ary [`either`], merging labels into `(a or b or c)` |
//!
//! ## Sequencing
//!
//! | combinator | usage | output |
//! |---|---|---|
//! | [`sequence`] | `sequence(p, q)` | `q`'s value |
//! | [`keep_first`] | `keep_first(p, q)` | `p`'s value |
//! | [`between`] | `between(open, close, p)` | `p`'s value, bracketed |
//! | [`collect`] | `collect(vec![p, q, r])` | all values in order, atomic on failure |
//! | [`assemble`] | `assemble(vec![p, q, r])` | string concatenation of all values |
//!
//! ## Repetition
//!
//! | combinator | usage | output |
//! |---|---|---|
//! | [`zero_or_more`] | `zero_or_more::<_, String>(p)` | accumulated matches, possibly none |
//! | [`at_least_one`] | `at_least_one::<_, Vec<_>>(p)` | accumulated matches, at least one |
//! | [`repeat`] | `repeat::<_, String>(4, p)` | exactly `n` matches, atomic on failure |
//! | [`sep_by`] | `sep_by(p, sep)` | values separated by `sep`, possibly none |
//! | [`sep_by1`] | `sep_by1(p, sep)` | as above, at least one |
//!
//! ## Expressions
//!
//! [`expression`] builds a parser for operator grammars from a term parser
//! and a table of precedence [`Level`]s; see its module docs.

mod branch;
mod core;
mod expression;
mod multi;
mod sequence;


pub use self::branch::choice;
pub use self::branch::either;
pub use self::core::apply;
pub use self::core::attempt;
pub use self::core::eof;
pub use self::core::fail;
pub use self::core::look_ahead;
pub use self::core::not_followed_by;
pub use self::core::optional;
pub use self::core::pure;
pub use self::core::succeed;
pub use self::expression::binary;
pub use self::expression::expression;
pub use self::expression::infix_left;
pub use self::expression::infix_none;
pub use self::expression::infix_right;
pub use self::expression::postfix;
pub use self::expression::prefix;
pub use self::expression::unary;
pub use self::expression::BinaryOperator;
pub use self::expression::Level;
pub use self::expression::UnaryOperator;
pub use self::multi::at_least_one;
pub use self::multi::repeat;
pub use self::multi::sep_by;
pub use self::multi::sep_by1;
pub use self::multi::zero_or_more;
pub use self::sequence::assemble;
pub use self::sequence::between;
pub use self::sequence::collect;
pub use self::sequence::keep_first;
pub use self::sequence::sequence;
