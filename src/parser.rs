//! The first-class parser value.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::error::{ParseResult, ParserFailure};
use crate::stream::Stream;
use crate::trace;

pub(crate) type ParseFn<T> = dyn Fn(Stream) -> ParseResult<T> + Send + Sync;

enum Body<T: 'static> {
    Bound(Arc<ParseFn<T>>),
    /// A forward reference: the cell is filled exactly once by
    /// [`Parser::recurse`].
    Deferred(Arc<OnceCell<Arc<ParseFn<T>>>>),
}

impl<T: 'static> Clone for Body<T> {
    fn clone(&self) -> Self {
        match self {
            Body::Bound(f) => Body::Bound(Arc::clone(f)),
            Body::Deferred(cell) => Body::Deferred(Arc::clone(cell)),
        }
    }
}

/// A first-class parsing value: a function `Stream -> ParseResult<T>`
/// paired with a human-readable label.
///
/// Parsers are built by the constructors in [`token`][crate::token] and
/// [`ascii`][crate::ascii], combined by [`combinator`][crate::combinator]
/// functions and the methods below, and run with [`Parser::run`] or
/// [`Parser::try_run`].
///
/// Cloning is cheap (the body is shared), and a fully constructed parser is
/// immutable: it can be shared across threads and used for any number of
/// concurrent independent parses, each over its own [`Stream`].
///
/// ## Recursive grammars
///
/// A self- or mutually-referential grammar is built in two phases: declare
/// forward references with [`Parser::recursive`], compose the grammar from
/// clones of them, then bind each body with [`Parser::recurse`] — exactly
/// once, before the first [`Parser::run`].
///
/// ```rust
/// use riddle::combinator::{between, choice};
/// use riddle::token::{char, string};
/// use riddle::Parser;
///
/// // nested ::= "()" | "(" nested ")"
/// let nested = Parser::<String>::recursive();
/// let body = choice(vec![
///     string("()"),
///     between(char('('), char(')'), nested.clone()),
/// ]);
/// nested.recurse(body);
///
/// assert_eq!(nested.try_run("((()))").unwrap(), "()");
/// assert!(nested.try_run("((())").is_err());
/// ```
pub struct Parser<T: 'static> {
    pub(crate) label: Arc<str>,
    body: Body<T>,
}

impl<T: 'static> Clone for Parser<T> {
    fn clone(&self) -> Self {
        Parser {
            label: Arc::clone(&self.label),
            body: self.body.clone(),
        }
    }
}

impl<T: 'static> fmt::Debug for Parser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl<T: 'static> Parser<T> {
    /// Wraps a parsing function with a label.
    ///
    /// The function must be *atomic on failure*: a failure result must carry
    /// the stream at the position where the parser started. All primitives
    /// in this crate follow the convention `begin_transaction`; attempt;
    /// `rollback` on failure, `commit` on success.
    pub fn new(
        label: impl Into<Arc<str>>,
        f: impl Fn(Stream) -> ParseResult<T> + Send + Sync + 'static,
    ) -> Self {
        Parser {
            label: label.into(),
            body: Body::Bound(Arc::new(f)),
        }
    }

    /// Declares a forward reference for a recursive grammar.
    ///
    /// The returned parser is not yet runnable; bind its body with
    /// [`Parser::recurse`]. Clones share the binding, which is how mutually
    /// recursive productions see each other.
    pub fn recursive() -> Self {
        Parser {
            label: Arc::from("recursive"),
            body: Body::Deferred(Arc::new(OnceCell::new())),
        }
    }

    /// Binds the body of a parser declared with [`Parser::recursive`].
    ///
    /// # Panics
    ///
    /// Panics when called on a parser that was not created by
    /// [`Parser::recursive`], or when the body has already been bound.
    pub fn recurse(&self, inner: Parser<T>) {
        match &self.body {
            Body::Bound(_) => {
                panic!("recurse() called on a parser that is not a recursive placeholder")
            }
            Body::Deferred(cell) => {
                let bound: Arc<ParseFn<T>> = Arc::new(move |stream| inner.run(stream));
                if cell.set(bound).is_err() {
                    panic!("recurse() called twice on the same recursive parser");
                }
            }
        }
    }

    /// Runs the parser over `stream`.
    ///
    /// # Panics
    ///
    /// Panics when the parser is a [`Parser::recursive`] placeholder whose
    /// body was never bound — a configuration error in the grammar, not a
    /// parse failure.
    pub fn run(&self, stream: Stream) -> ParseResult<T> {
        let entry = stream.offset();
        let depth = trace::start(&self.label, &stream);
        let result = match &self.body {
            Body::Bound(f) => f(stream),
            Body::Deferred(cell) => {
                let f = cell
                    .get()
                    .expect("recursive parser was run before recurse() bound its body");
                f(stream)
            }
        };
        trace::end(depth, &self.label, entry, &result);
        result
    }

    /// Wraps `input` in a fresh [`Stream`] and runs, surfacing a failure as
    /// a [`ParserFailure`] error.
    ///
    /// ```rust
    /// use riddle::token::string;
    ///
    /// let p = string("yes");
    /// assert_eq!(p.try_run("yes and").unwrap(), "yes");
    ///
    /// let err = p.try_run("no").unwrap_err();
    /// assert_eq!(err.expected().to_string(), "\"yes\"");
    /// ```
    pub fn try_run(&self, input: &str) -> Result<T, ParserFailure> {
        match self.run(Stream::new(input)) {
            ParseResult::Success { value, .. } => Ok(value),
            ParseResult::Failure(failure) => Err(ParserFailure::new(failure)),
        }
    }

    /// Transforms the successful value through `f`.
    ///
    /// ```rust
    /// use riddle::combinator::at_least_one;
    /// use riddle::ascii::digit_char;
    ///
    /// let number = at_least_one::<String, String>(digit_char())
    ///     .map(|digits| digits.parse::<u32>().unwrap());
    /// assert_eq!(number.try_run("271x").unwrap(), 271);
    /// ```
    pub fn map<U: 'static>(self, f: impl Fn(T) -> U + Send + Sync + 'static) -> Parser<U> {
        Parser::new(Arc::clone(&self.label), move |stream| {
            self.run(stream).map(|value| f(value))
        })
    }

    /// Monadic bind: feeds the parsed value to `f`, obtaining the parser to
    /// run on the remainder.
    ///
    /// This is the escape hatch for context-sensitive grammars — the next
    /// parser can depend on what was just parsed.
    ///
    /// ```rust
    /// use riddle::combinator::repeat;
    /// use riddle::ascii::digit_char;
    /// use riddle::token::any_single;
    ///
    /// // A length-prefixed field: "3abc" parses the 3, then takes 3 chars.
    /// let field = digit_char()
    ///     .map(|d| d.parse::<usize>().unwrap())
    ///     .bind(|n| repeat::<String, String>(n, any_single()));
    /// assert_eq!(field.try_run("3abcd").unwrap(), "abc");
    /// ```
    pub fn bind<U: 'static>(
        self,
        f: impl Fn(T) -> Parser<U> + Send + Sync + 'static,
    ) -> Parser<U> {
        Parser::new(Arc::clone(&self.label), move |stream| {
            match self.run(stream) {
                ParseResult::Success { value, remaining } => f(value).run(remaining),
                ParseResult::Failure(failure) => ParseResult::Failure(failure),
            }
        })
    }

    /// Applicative application: `self` parses a function, `arg` parses its
    /// argument.
    pub fn apply<A: 'static, B: 'static>(self, arg: Parser<A>) -> Parser<B>
    where
        T: Fn(A) -> B + Send + Sync,
    {
        crate::combinator::apply(self, arg)
    }

    /// Replaces the expected-label of a failure with `name`; successes pass
    /// through unchanged.
    ///
    /// Labels are end-user-facing: a well-written grammar labels its
    /// productions so internal structure never leaks into error messages.
    /// A failure that consumed input keeps its own, more precise label —
    /// relabeling applies only where an alternation could still have tried
    /// something else.
    ///
    /// ```rust
    /// use riddle::combinator::either;
    /// use riddle::token::char;
    ///
    /// let sign = either(char('+'), char('-')).label("sign");
    /// let err = sign.try_run("x").unwrap_err();
    /// assert_eq!(err.expected().to_string(), "sign");
    /// ```
    pub fn label(self, name: impl Into<Arc<str>>) -> Parser<T> {
        let name = name.into();
        let expected = Arc::clone(&name);
        Parser::new(name, move |stream: Stream| {
            let start = stream.offset();
            match self.run(stream) {
                ParseResult::Failure(failure) if failure.got().offset() == start => {
                    ParseResult::Failure(failure.relabel(&expected))
                }
                other => other,
            }
        })
    }

    /// Runs `self`, then `next` on the remainder, keeping `next`'s value.
    ///
    /// ```rust
    /// use riddle::token::char;
    ///
    /// let p = char('a').followed_by(char('b'));
    /// assert_eq!(p.try_run("abc").unwrap(), "b");
    /// ```
    #[doc(alias = "sequence")]
    pub fn followed_by<U: 'static>(self, next: Parser<U>) -> Parser<U> {
        let label = format!("{} {}", self.label, next.label);
        Parser::new(label, move |stream| {
            self.run(stream).continue_with(&next)
        })
    }

    /// Runs `self`, then `next` on the remainder, keeping `self`'s value.
    ///
    /// ```rust
    /// use riddle::token::char;
    ///
    /// let p = char('a').then_ignore(char(';'));
    /// assert_eq!(p.try_run("a;").unwrap(), "a");
    /// assert!(p.try_run("a,").is_err());
    /// ```
    #[doc(alias = "keep_first")]
    pub fn then_ignore<U: 'static>(self, next: Parser<U>) -> Parser<T> {
        let label = format!("{} {}", self.label, next.label);
        Parser::new(label, move |stream| match self.run(stream) {
            ParseResult::Success { value, remaining } => match next.run(remaining) {
                ParseResult::Success { remaining, .. } => ParseResult::Success { value, remaining },
                ParseResult::Failure(failure) => ParseResult::Failure(failure),
            },
            failure => failure,
        })
    }

    /// Tries `self`, falling back to `other` when `self` fails without
    /// consuming input. See [`either`][crate::combinator::either].
    pub fn or(self, other: Parser<T>) -> Parser<T> {
        crate::combinator::either(self, other)
    }

    /// Makes the parser optional: its failure (without consumption) becomes
    /// a `None` success. See [`optional`][crate::combinator::optional].
    pub fn optional(self) -> Parser<Option<T>> {
        crate::combinator::optional(self)
    }

    /// Succeeds with `self`'s value only when `next` does not match
    /// afterwards; `next` never consumes.
    ///
    /// ```rust
    /// use riddle::ascii::alpha_num_char;
    /// use riddle::token::string;
    ///
    /// // The keyword `let`, but not the identifier `letter`.
    /// let keyword = string("let").not_followed_by(alpha_num_char());
    /// assert_eq!(keyword.try_run("let x").unwrap(), "let");
    /// assert!(keyword.try_run("letter").is_err());
    /// ```
    pub fn not_followed_by<U: 'static>(self, next: Parser<U>) -> Parser<T> {
        self.then_ignore(crate::combinator::not_followed_by(next))
    }

    /// Replaces the successful value with the constant `replacement`.
    ///
    /// ```rust
    /// use riddle::token::string;
    ///
    /// let yes = string("yes").value(true);
    /// assert_eq!(yes.try_run("yes").unwrap(), true);
    /// ```
    #[doc(alias = "void_left")]
    pub fn value<U>(self, replacement: U) -> Parser<U>
    where
        U: Clone + Send + Sync + 'static,
    {
        self.map(move |_| replacement.clone())
    }

    /// Drops the successful value, yielding `()`.
    pub fn discard(self) -> Parser<()> {
        self.map(|_| ())
    }

    /// Maps the value through a constructor — shorthand for [`Parser::map`]
    /// that reads well when building syntax-tree nodes.
    ///
    /// ```rust
    /// use riddle::combinator::at_least_one;
    /// use riddle::ascii::alpha_char;
    ///
    /// #[derive(Debug, PartialEq)]
    /// struct Ident(String);
    ///
    /// let ident = at_least_one::<String, String>(alpha_char()).construct(Ident);
    /// assert_eq!(ident.try_run("abc").unwrap(), Ident("abc".to_owned()));
    /// ```
    pub fn construct<U: 'static>(
        self,
        constructor: impl Fn(T) -> U + Send + Sync + 'static,
    ) -> Parser<U> {
        self.map(constructor)
    }

    /// Calls `sink` with every successfully parsed value, leaving the result
    /// untouched — an observation hook.
    pub fn emit(self, sink: impl Fn(&T) + Send + Sync + 'static) -> Parser<T> {
        Parser::new(Arc::clone(&self.label), move |stream| {
            let result = self.run(stream);
            if let ParseResult::Success { value, .. } = &result {
                sink(value);
            }
            result
        })
    }
}

impl Parser<String> {
    /// Runs `self` then `next`, concatenating the two string values.
    ///
    /// ```rust
    /// use riddle::token::{char, string};
    ///
    /// let p = char('#').append(string("tag"));
    /// assert_eq!(p.try_run("#tag").unwrap(), "#tag");
    /// ```
    pub fn append(self, next: Parser<String>) -> Parser<String> {
        let label = format!("{} {}", self.label, next.label);
        Parser::new(label, move |stream| match self.run(stream) {
            ParseResult::Success { value, remaining } => next.run(remaining).map(|second| {
                let mut combined = value;
                combined.push_str(&second);
                combined
            }),
            failure => failure,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinator::{between, choice, either};
    use crate::token::{any_single, char, string};

    #[test]
    fn run_threads_the_stream() {
        let p = char('a').followed_by(char('b'));
        match p.run(Stream::new("abc")) {
            ParseResult::Success { value, remaining } => {
                assert_eq!(value, "b");
                assert_eq!(remaining.rest(), "c");
            }
            ParseResult::Failure(failure) => panic!("unexpected failure: {failure}"),
        }
    }

    #[test]
    fn try_run_surfaces_failures_as_errors() {
        let p = string("yes");
        let err = p.try_run("no").unwrap_err();
        assert_eq!(err.expected().to_string(), "\"yes\"");
        assert_eq!(err.position().offset(), 0);
    }

    #[test]
    fn labels_rename_failures_only() {
        let p = char('x').label("the letter x");
        assert_eq!(p.try_run("x").unwrap(), "x");
        let err = p.try_run("y").unwrap_err();
        assert_eq!(err.expected().to_string(), "the letter x");
    }

    #[test]
    fn bind_sees_the_parsed_value() {
        // An opening quote character that must be matched by the same
        // closing character.
        let quoted = either(char('\''), char('"'))
            .bind(|open| any_single().then_ignore(char(open.chars().next().unwrap())));
        assert_eq!(quoted.try_run("'a'").unwrap(), "a");
        assert_eq!(quoted.try_run("\"b\"").unwrap(), "b");
        assert!(quoted.try_run("'c\"").is_err());
    }

    #[test]
    fn emit_observes_successes() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        let p = char('a').emit(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let _ = p.try_run("a");
        let _ = p.try_run("b");
        let _ = p.try_run("a");
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn recursive_grammars_bind_in_two_phases() {
        let nested = Parser::<String>::recursive();
        nested.recurse(choice(vec![
            string("()"),
            between(char('('), char(')'), nested.clone()),
        ]));
        assert_eq!(nested.try_run("((()))").unwrap(), "()");
        assert!(nested.try_run("((())").is_err());
    }

    #[test]
    #[should_panic(expected = "before recurse()")]
    fn running_an_unbound_recursive_parser_is_fatal() {
        let p = Parser::<String>::recursive();
        let _ = p.run(Stream::new("x"));
    }

    #[test]
    #[should_panic(expected = "recurse() called twice")]
    fn rebinding_a_recursive_parser_is_fatal() {
        let p = Parser::<String>::recursive();
        p.recurse(char('a'));
        p.recurse(char('b'));
    }

    #[test]
    #[should_panic(expected = "not a recursive placeholder")]
    fn recurse_on_a_plain_parser_is_fatal() {
        let p = char('a');
        p.recurse(char('b'));
    }

    #[test]
    fn parsers_are_shareable_across_threads() {
        let p = char('a').followed_by(char('b'));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let p = p.clone();
                std::thread::spawn(move || p.try_run("ab").unwrap())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), "b");
        }
    }
}
