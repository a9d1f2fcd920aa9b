//! Parser execution tracing.
//!
//! With the `debug` cargo feature enabled, every [`Parser::run`][crate::Parser::run]
//! writes an indented entry/exit pair to stderr, showing the parser label,
//! a peek at the input, and a colored outcome: green `+n` for a success
//! consuming `n` bytes, yellow `backtrack` for a failure that consumed
//! nothing, red `fail` for a committed failure. Without the feature the
//! hooks compile to nothing.

#[cfg(feature = "debug")]
mod internals;

use crate::error::ParseResult;
use crate::stream::Stream;

#[cfg(feature = "debug")]
pub(crate) fn start(label: &str, input: &Stream) -> internals::Depth {
    internals::start(label, input)
}

#[cfg(feature = "debug")]
pub(crate) fn end<T>(depth: internals::Depth, label: &str, entry: usize, result: &ParseResult<T>) {
    let severity = internals::Severity::with_result(entry, result);
    let consumed = result.position().offset().saturating_sub(entry);
    internals::end(depth, label, consumed, severity);
}

#[cfg(not(feature = "debug"))]
pub(crate) fn start(_label: &str, _input: &Stream) {}

#[cfg(not(feature = "debug"))]
pub(crate) fn end<T>(_depth: (), _label: &str, _entry: usize, _result: &ParseResult<T>) {}
