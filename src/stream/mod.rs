//! Character streams, position bookkeeping, and output accumulation.
//!
//! A [`Stream`] is the input handle threaded through a parse: it owns the
//! source text, tracks the current [`Position`], and exposes transactional
//! checkpoints ([`Stream::begin_transaction`] / [`Stream::rollback`] /
//! [`Stream::commit`]) that primitives use to stay atomic on failure.
//!
//! All character arithmetic is in Unicode code points; the stored offset is
//! a byte offset that always sits on a `char` boundary.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

#[cfg(test)]
mod tests;

/// A location in the source text.
///
/// `offset` is a byte offset into the source; `line` and `column` are
/// 1-based and count code points. Advancing past `\n` increments the line
/// and resets the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    offset: usize,
    line: u32,
    column: u32,
}

impl Position {
    /// The position before any input has been consumed: offset 0, line 1,
    /// column 1.
    pub fn start() -> Self {
        Position {
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Byte offset into the source.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// 1-based line number.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// 1-based column number, in code points.
    pub fn column(&self) -> u32 {
        self.column
    }

    /// The position after consuming `consumed`.
    ///
    /// ```rust
    /// use riddle::stream::Position;
    ///
    /// let pos = Position::start().advance("ab\ncd");
    /// assert_eq!((pos.line(), pos.column()), (2, 3));
    /// assert_eq!(pos.offset(), 5);
    /// ```
    #[must_use]
    pub fn advance(&self, consumed: &str) -> Position {
        let mut line = self.line;
        let mut column = self.column;
        for c in consumed.chars() {
            if c == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        Position {
            offset: self.offset + consumed.len(),
            line,
            column,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// The input handle threaded through a parse.
///
/// Constructed from a string with an optional filename, mutated only through
/// its own methods. Failure values carry `Stream` snapshots, so cloning is
/// kept cheap: the source is shared behind an [`Arc`].
///
/// Equality is structural for testability: two streams are equal when they
/// hold the same source and filename and sit at the same offset.
#[derive(Clone)]
pub struct Stream {
    src: Arc<str>,
    filename: Option<Arc<str>>,
    position: Position,
    transactions: Vec<Position>,
}

impl Stream {
    /// Creates a stream over `src` with no filename.
    pub fn new(src: impl Into<Arc<str>>) -> Self {
        Stream {
            src: src.into(),
            filename: None,
            position: Position::start(),
            transactions: Vec::new(),
        }
    }

    /// Creates a stream over `src`, remembering `filename` for error
    /// rendering.
    pub fn with_filename(src: impl Into<Arc<str>>, filename: impl Into<Arc<str>>) -> Self {
        Stream {
            filename: Some(filename.into()),
            ..Stream::new(src)
        }
    }

    /// The complete source text, consumed and unconsumed alike.
    pub fn source(&self) -> &str {
        &self.src
    }

    /// The unconsumed tail of the input.
    pub fn rest(&self) -> &str {
        &self.src[self.position.offset..]
    }

    /// The filename given at construction, if any.
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// The current position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// The current byte offset; shorthand for `position().offset()`.
    pub fn offset(&self) -> usize {
        self.position.offset
    }

    /// True when every character has been consumed.
    pub fn is_eof(&self) -> bool {
        self.position.offset >= self.src.len()
    }

    /// Consumes and returns the next character, or `None` at end of input.
    pub fn take1(&mut self) -> Option<char> {
        let c = self.rest().chars().next()?;
        let end = self.position.offset + c.len_utf8();
        self.position = self.position.advance(&self.src[self.position.offset..end]);
        Some(c)
    }

    /// Consumes up to `n` characters.
    ///
    /// Taking zero characters succeeds with an empty string without
    /// advancing; taking from an empty stream returns `None`; otherwise up
    /// to `n` characters are returned, fewer if fewer remain.
    pub fn take_n(&mut self, n: usize) -> Option<String> {
        if n == 0 {
            return Some(String::new());
        }
        if self.is_eof() {
            return None;
        }
        let chunk: String = self.rest().chars().take(n).collect();
        self.position = self.position.advance(&chunk);
        Some(chunk)
    }

    /// Consumes the maximal (possibly empty) prefix for which `pred` holds.
    pub fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let chunk: String = self.rest().chars().take_while(|c| pred(*c)).collect();
        self.position = self.position.advance(&chunk);
        chunk
    }

    /// [`take1`][Stream::take1] without advancing.
    pub fn peek1(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// [`take_n`][Stream::take_n] without advancing.
    pub fn peek_n(&self, n: usize) -> Option<String> {
        if n == 0 {
            return Some(String::new());
        }
        if self.is_eof() {
            return None;
        }
        Some(self.rest().chars().take(n).collect())
    }

    /// [`take_while`][Stream::take_while] without advancing.
    pub fn peek_while(&self, pred: impl Fn(char) -> bool) -> String {
        self.rest().chars().take_while(|c| pred(*c)).collect()
    }

    /// The character immediately before the cursor, or `None` at offset 0.
    pub fn peek_back(&self) -> Option<char> {
        self.src[..self.position.offset].chars().next_back()
    }

    /// Pushes the current position onto the transaction stack.
    pub fn begin_transaction(&mut self) {
        self.transactions.push(self.position);
    }

    /// Discards the most recent checkpoint, keeping the current position.
    ///
    /// # Panics
    ///
    /// Panics when no transaction is open; a mismatched commit is a bug in
    /// the calling parser, not a parse failure.
    pub fn commit(&mut self) {
        self.transactions
            .pop()
            .expect("commit() without a matching begin_transaction()");
    }

    /// Restores the position saved by the most recent
    /// [`begin_transaction`][Stream::begin_transaction].
    ///
    /// # Panics
    ///
    /// Panics when no transaction is open.
    pub fn rollback(&mut self) {
        let saved = self
            .transactions
            .pop()
            .expect("rollback() without a matching begin_transaction()");
        self.position = saved;
    }
}

impl PartialEq for Stream {
    fn eq(&self, other: &Self) -> bool {
        self.src == other.src && self.filename == other.filename && self.position == other.position
    }
}

impl Eq for Stream {}

impl fmt::Debug for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let excerpt: String = self.rest().chars().take(24).collect();
        f.debug_struct("Stream")
            .field("filename", &self.filename)
            .field("position", &self.position)
            .field("rest", &excerpt)
            .finish()
    }
}

impl From<&str> for Stream {
    fn from(src: &str) -> Self {
        Stream::new(src)
    }
}

impl From<String> for Stream {
    fn from(src: String) -> Self {
        Stream::new(src)
    }
}

/// Abstracts something which can be built up from parser outputs.
///
/// Repetition combinators like [`zero_or_more`][crate::combinator::zero_or_more]
/// are generic over their accumulator, so the same combinator collects
/// `String` matches into one `String`, arbitrary values into a `Vec`, pairs
/// into a map, or nothing at all into `()`.
pub trait Accumulate<T>: Sized {
    /// Creates a new accumulator, pre-sizing it when the caller knows how
    /// many items are coming.
    fn initial(capacity: Option<usize>) -> Self;
    /// Folds one more parsed value into the accumulator.
    fn accumulate(&mut self, acc: T);
}

impl<T> Accumulate<T> for () {
    fn initial(_capacity: Option<usize>) -> Self {}
    fn accumulate(&mut self, _acc: T) {}
}

impl<T> Accumulate<T> for usize {
    fn initial(_capacity: Option<usize>) -> Self {
        0
    }
    fn accumulate(&mut self, _acc: T) {
        *self += 1;
    }
}

impl<T> Accumulate<T> for Vec<T> {
    fn initial(capacity: Option<usize>) -> Self {
        match capacity {
            Some(capacity) => Vec::with_capacity(capacity),
            None => Vec::new(),
        }
    }
    fn accumulate(&mut self, acc: T) {
        self.push(acc);
    }
}

impl Accumulate<char> for String {
    fn initial(capacity: Option<usize>) -> Self {
        match capacity {
            Some(capacity) => String::with_capacity(capacity),
            None => String::new(),
        }
    }
    fn accumulate(&mut self, acc: char) {
        self.push(acc);
    }
}

impl Accumulate<String> for String {
    fn initial(capacity: Option<usize>) -> Self {
        match capacity {
            Some(capacity) => String::with_capacity(capacity),
            None => String::new(),
        }
    }
    fn accumulate(&mut self, acc: String) {
        self.push_str(&acc);
    }
}

impl<K, V> Accumulate<(K, V)> for BTreeMap<K, V>
where
    K: Ord,
{
    fn initial(_capacity: Option<usize>) -> Self {
        BTreeMap::new()
    }
    fn accumulate(&mut self, (key, value): (K, V)) {
        self.insert(key, value);
    }
}

impl<K, V> Accumulate<(K, V)> for HashMap<K, V>
where
    K: Eq + Hash,
{
    fn initial(capacity: Option<usize>) -> Self {
        match capacity {
            Some(capacity) => HashMap::with_capacity(capacity),
            None => HashMap::new(),
        }
    }
    fn accumulate(&mut self, (key, value): (K, V)) {
        self.insert(key, value);
    }
}
