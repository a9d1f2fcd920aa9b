use crate::error::{Expected, Failure, ParseResult};
use crate::parser::Parser;
use crate::stream::Stream;

/// Tries `first`; when it fails *without consuming input*, tries `second`.
///
/// When both fail the combined expected-label is `(a or b)`, reported at
/// the original input position.
///
/// ```rust
/// use riddle::combinator::either;
/// use riddle::token::char;
///
/// let ab = either(char('a'), char('b'));
/// assert_eq!(ab.try_run("b").unwrap(), "b");
///
/// let err = ab.try_run("cd").unwrap_err();
/// assert_eq!(err.expected().to_string(), "('a' or 'b')");
/// ```
#[doc(alias = "or")]
pub fn either<T: 'static>(first: Parser<T>, second: Parser<T>) -> Parser<T> {
    choice(vec![first, second])
}

/// N-ary [`either`]: tries each alternative in order, returning the first
/// success.
///
/// The stream is restored before each next branch is tried — which is only
/// reachable when the previous branch failed without consuming. A branch
/// that consumed input before failing is committed, and its failure
/// propagates; see [`attempt`][super::attempt] to opt out.
///
/// # Panics
///
/// Panics on an empty alternative list; a choice between nothing is a
/// malformed grammar.
///
/// ```rust
/// use riddle::combinator::choice;
/// use riddle::token::string;
///
/// let keyword = choice(vec![string("if"), string("else"), string("while")]);
/// assert_eq!(keyword.try_run("else").unwrap(), "else");
///
/// let err = keyword.try_run("match").unwrap_err();
/// assert_eq!(
///     err.expected().to_string(),
///     "(\"if\" or \"else\" or \"while\")"
/// );
/// ```
#[doc(alias = "alt")]
pub fn choice<T: 'static>(alternatives: Vec<Parser<T>>) -> Parser<T> {
    assert!(
        !alternatives.is_empty(),
        "choice() requires at least one alternative"
    );
    let label = if alternatives.len() == 1 {
        alternatives[0].label.to_string()
    } else {
        let labels: Vec<&str> = alternatives.iter().map(|p| p.label.as_ref()).collect();
        format!("({})", labels.join(" or "))
    };
    Parser::new(label, move |stream: Stream| {
        let start = stream.offset();
        let mut expected = Vec::with_capacity(alternatives.len());
        let mut current = stream;
        for alternative in &alternatives {
            match alternative.run(current) {
                success @ ParseResult::Success { .. } => return success,
                ParseResult::Failure(failure) => {
                    // A branch that consumed input is committed.
                    if failure.got().offset() != start {
                        return ParseResult::Failure(failure);
                    }
                    let (exp, got) = failure.into_parts();
                    expected.push(exp);
                    current = got;
                }
            }
        }
        ParseResult::Failure(Failure::new(Expected::one_of(expected), current))
    })
}
