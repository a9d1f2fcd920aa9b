use super::*;
use crate::stream::Stream;

fn fails_without_consuming<T: std::fmt::Debug + 'static>(p: &Parser<T>, input: &str) {
    let result = p.run(Stream::new(input));
    match result {
        ParseResult::Failure(failure) => assert_eq!(failure.got().offset(), 0),
        ParseResult::Success { value, .. } => panic!("expected failure, got {value:?}"),
    }
}

#[test]
fn char_matches_exactly() {
    let p = char('a');
    assert_eq!(p.try_run("abc").unwrap(), "a");
    let err = p.try_run("bcd").unwrap_err();
    assert_eq!(err.expected().to_string(), "'a'");
    fails_without_consuming(&p, "bcd");
    fails_without_consuming(&p, "");
}

#[test]
fn char_i_preserves_the_consumed_case() {
    let p = char_i('a');
    assert_eq!(p.try_run("a").unwrap(), "a");
    assert_eq!(p.try_run("A").unwrap(), "A");
    assert!(p.try_run("b").is_err());
}

#[test]
fn char_i_folds_unicode_case() {
    let p = char_i('ß');
    assert_eq!(p.try_run("ß").unwrap(), "ß");
    let p = char_i('Ω');
    assert_eq!(p.try_run("ω").unwrap(), "ω");
}

#[test]
fn any_single_fails_only_at_eof() {
    let p = any_single();
    assert_eq!(p.try_run("x").unwrap(), "x");
    assert_eq!(p.try_run("💧y").unwrap(), "💧");
    let err = p.try_run("").unwrap_err();
    assert_eq!(err.expected().to_string(), "EOF");
}

#[test]
fn any_single_but_excludes_one_character() {
    let p = any_single_but('"');
    assert_eq!(p.try_run("x").unwrap(), "x");
    assert!(p.try_run("\"").is_err());
}

#[test]
fn one_of_and_none_of() {
    assert_eq!(one_of_s("+-").try_run("-3").unwrap(), "-");
    fails_without_consuming(&one_of_s("+-"), "3");
    assert_eq!(none_of_s("+-").try_run("3").unwrap(), "3");
    fails_without_consuming(&none_of_s("+-"), "+");
}

#[test]
fn string_consumes_verbatim() {
    let p = string("abc");
    let result = p.run(Stream::new("abcdef"));
    assert_eq!(result.value().map(String::as_str), Some("abc"));
    assert_eq!(result.remaining().unwrap().rest(), "def");
}

#[test]
fn string_is_atomic_on_partial_match() {
    // "abd" shares a two-character prefix with the literal; the stream must
    // still be untouched after the failure.
    fails_without_consuming(&string("abc"), "abd");
    fails_without_consuming(&string("abc"), "ab");
    fails_without_consuming(&string("abc"), "");
}

#[test]
#[should_panic(expected = "non-empty literal")]
fn empty_string_literal_is_fatal() {
    let _ = string("");
}

#[test]
fn string_i_matches_case_insensitively_and_preserves_case() {
    let p = string_i("select");
    assert_eq!(p.try_run("SeLeCt 1").unwrap(), "SeLeCt");
    fails_without_consuming(&p, "selec");
}

#[test]
fn satisfy_reports_its_label() {
    let p = satisfy("vowel", |c| "aeiou".contains(c));
    assert_eq!(p.try_run("e").unwrap(), "e");
    let err = p.try_run("z").unwrap_err();
    assert_eq!(err.expected().to_string(), "vowel");
}

#[test]
fn primitives_balance_their_transactions() {
    // A failed primitive must leave the transaction stack usable: a
    // mismatched stack would panic on this rollback.
    let mut stream = Stream::new("xyz");
    stream.begin_transaction();
    let result = char('a').run(stream);
    let mut got = match result {
        ParseResult::Failure(failure) => failure.got().clone(),
        ParseResult::Success { .. } => panic!("expected failure"),
    };
    got.rollback();
    assert_eq!(got.rest(), "xyz");
}
