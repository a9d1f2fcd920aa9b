//! A complete JSON grammar written as a consumer of the public API.
//!
//! Nothing here reaches into the crate's internals: the grammar is a pure
//! composition of primitives and combinators, with `recursive` tying the
//! knot for nested values.

use std::collections::HashMap;

use pretty_assertions::assert_eq;

use riddle::ascii::{digit_char, hex_digit_char, whitespace};
use riddle::combinator::{
    at_least_one, between, choice, either, eof, fail, optional, pure, repeat, sep_by, zero_or_more,
};
use riddle::token::{char, one_of_s, satisfy, string};
use riddle::Parser;

#[derive(Clone, Debug, PartialEq)]
enum Json {
    Null,
    Bool(bool),
    Num(f64),
    Str(String),
    Array(Vec<Json>),
    Object(HashMap<String, Json>),
}

/// A token parser with trailing whitespace skipped.
fn lexeme<T: 'static>(p: Parser<T>) -> Parser<T> {
    p.then_ignore(whitespace())
}

fn digits() -> Parser<String> {
    at_least_one::<String, String>(digit_char())
}

fn number() -> Parser<f64> {
    let sign = optional(char('-')).map(Option::unwrap_or_default);
    let fraction = optional(char('.').append(digits())).map(Option::unwrap_or_default);
    let exponent = optional(
        one_of_s("eE")
            .append(optional(one_of_s("+-")).map(Option::unwrap_or_default))
            .append(digits()),
    )
    .map(Option::unwrap_or_default);
    sign.append(digits())
        .append(fraction)
        .append(exponent)
        .map(|text| text.parse::<f64>().unwrap())
        .label("number")
}

fn hex4() -> Parser<u32> {
    repeat::<String, String>(4, hex_digit_char())
        .map(|hex| u32::from_str_radix(&hex, 16).unwrap())
}

fn unicode_escape() -> Parser<String> {
    char('u').followed_by(hex4()).bind(|code_point| {
        if (0xD800..0xDC00).contains(&code_point) {
            // High surrogate: a low surrogate must follow.
            string("\\u").followed_by(hex4()).bind(move |low| {
                if (0xDC00..0xE000).contains(&low) {
                    let combined = 0x10000 + ((code_point - 0xD800) << 10) + (low - 0xDC00);
                    pure(char::from_u32(combined).unwrap().to_string())
                } else {
                    fail("low surrogate")
                }
            })
        } else if (0xDC00..0xE000).contains(&code_point) {
            fail("unicode escape")
        } else {
            pure(char::from_u32(code_point).unwrap().to_string())
        }
    })
}

fn escape() -> Parser<String> {
    char('\\').followed_by(choice(vec![
        char('"'),
        char('\\'),
        char('/'),
        char('b').value("\u{0008}".to_owned()),
        char('f').value("\u{000C}".to_owned()),
        char('n').value("\n".to_owned()),
        char('r').value("\r".to_owned()),
        char('t').value("\t".to_owned()),
        unicode_escape(),
    ]))
}

fn string_literal() -> Parser<String> {
    let ordinary = satisfy("string character", |c| c != '"' && c != '\\');
    between(
        char('"'),
        char('"'),
        zero_or_more::<String, String>(either(ordinary, escape())),
    )
    .label("string")
}

fn key_value(value: &Parser<Json>) -> Parser<(String, Json)> {
    let value = value.clone();
    lexeme(string_literal())
        .then_ignore(lexeme(char(':')))
        .bind(move |key| value.clone().map(move |v| (key.clone(), v)))
}

fn json_document() -> Parser<Json> {
    let value = Parser::<Json>::recursive();

    let array = between(
        lexeme(char('[')),
        lexeme(char(']')),
        sep_by(value.clone(), lexeme(char(','))),
    )
    .construct(Json::Array)
    .label("array");

    let object = between(
        lexeme(char('{')),
        lexeme(char('}')),
        sep_by(key_value(&value), lexeme(char(','))),
    )
    .map(|pairs| Json::Object(pairs.into_iter().collect()))
    .label("object");

    let body = choice(vec![
        string("null").value(Json::Null).label("null"),
        string("true").value(Json::Bool(true)).label("true"),
        string("false").value(Json::Bool(false)).label("false"),
        number().construct(Json::Num),
        string_literal().construct(Json::Str),
        array,
        object,
    ]);
    value.recurse(lexeme(body));

    whitespace().followed_by(value.clone()).then_ignore(eof())
}

#[test]
fn scalars() {
    let doc = json_document();
    assert_eq!(doc.try_run("null").unwrap(), Json::Null);
    assert_eq!(doc.try_run("true").unwrap(), Json::Bool(true));
    assert_eq!(doc.try_run("false").unwrap(), Json::Bool(false));
    assert_eq!(doc.try_run("0").unwrap(), Json::Num(0.0));
    assert_eq!(doc.try_run("  42  ").unwrap(), Json::Num(42.0));
}

#[test]
fn numbers() {
    let doc = json_document();
    assert_eq!(doc.try_run("-12.5e2").unwrap(), Json::Num(-1250.0));
    assert_eq!(doc.try_run("12.5").unwrap(), Json::Num(12.5));
    assert_eq!(doc.try_run("-3").unwrap(), Json::Num(-3.0));
    assert_eq!(doc.try_run("1e-2").unwrap(), Json::Num(0.01));
    assert_eq!(doc.try_run("2E+3").unwrap(), Json::Num(2000.0));
    assert!(doc.try_run("-").is_err());
    assert!(doc.try_run("1.").is_err());
}

#[test]
fn strings_with_escapes() {
    let doc = json_document();
    assert_eq!(doc.try_run("\"\"").unwrap(), Json::Str(String::new()));
    assert_eq!(
        doc.try_run("\"he\\nllo\"").unwrap(),
        Json::Str("he\nllo".to_owned())
    );
    assert_eq!(
        doc.try_run("\"a\\\"b\\\\c\\/d\\te\"").unwrap(),
        Json::Str("a\"b\\c/d\te".to_owned())
    );
    assert_eq!(
        doc.try_run("\"\\u0041\\u00e9\"").unwrap(),
        Json::Str("Aé".to_owned())
    );
    // A surrogate pair assembling into one code point.
    assert_eq!(
        doc.try_run("\"\\uD83D\\uDE10\"").unwrap(),
        Json::Str("😐".to_owned())
    );
}

#[test]
fn malformed_strings_are_rejected() {
    let doc = json_document();
    assert!(doc.try_run("\"unterminated").is_err());
    assert!(doc.try_run("\"bad \\q escape\"").is_err());
    assert!(doc.try_run("\"\\u12\"").is_err());
    // A lone high surrogate has no meaning.
    assert!(doc.try_run("\"\\uD800\"").is_err());
    assert!(doc.try_run("\"\\uD800\\u0041\"").is_err());
}

#[test]
fn arrays_and_objects_nest() {
    let doc = json_document();
    assert_eq!(doc.try_run("[]").unwrap(), Json::Array(vec![]));
    assert_eq!(
        doc.try_run("[1, [2, 3], 4]").unwrap(),
        Json::Array(vec![
            Json::Num(1.0),
            Json::Array(vec![Json::Num(2.0), Json::Num(3.0)]),
            Json::Num(4.0),
        ])
    );
    assert_eq!(
        doc.try_run("{\"a\": 1, \"b\": [true, null]}").unwrap(),
        Json::Object(
            vec![
                ("a".to_owned(), Json::Num(1.0)),
                (
                    "b".to_owned(),
                    Json::Array(vec![Json::Bool(true), Json::Null])
                ),
            ]
            .into_iter()
            .collect()
        )
    );
}

#[test]
fn whitespace_everywhere() {
    let doc = json_document();
    let input = r#"
  {
    "null" : null,
    "number" : 123e4 ,
    "string" : " abc 123 " ,
    "array" : [ false , 1 , "two" ] ,
    "object" : { "a" : 1.5 , "b" : "c" } ,
    "empty_array" : [  ] ,
    "empty_object" : {   }
  }
  "#;

    assert_eq!(
        doc.try_run(input).unwrap(),
        Json::Object(
            vec![
                ("null".to_owned(), Json::Null),
                ("number".to_owned(), Json::Num(123e4)),
                ("string".to_owned(), Json::Str(" abc 123 ".to_owned())),
                (
                    "array".to_owned(),
                    Json::Array(vec![
                        Json::Bool(false),
                        Json::Num(1.0),
                        Json::Str("two".to_owned())
                    ])
                ),
                (
                    "object".to_owned(),
                    Json::Object(
                        vec![
                            ("a".to_owned(), Json::Num(1.5)),
                            ("b".to_owned(), Json::Str("c".to_owned())),
                        ]
                        .into_iter()
                        .collect()
                    )
                ),
                ("empty_array".to_owned(), Json::Array(vec![])),
                ("empty_object".to_owned(), Json::Object(HashMap::new())),
            ]
            .into_iter()
            .collect()
        )
    );
}

#[test]
fn structural_errors_are_committed() {
    let doc = json_document();
    assert!(doc.try_run("[1, 2").is_err());
    assert!(doc.try_run("[1, 2,]").is_err());
    assert!(doc.try_run("{\"a\" 1}").is_err());
    assert!(doc.try_run("42 trailing").is_err());
}

#[test]
fn failures_surface_user_facing_labels() {
    let doc = json_document();
    let err = doc.try_run("{\"a\": tru}").unwrap_err();
    assert_eq!(
        err.expected().to_string(),
        "(null or true or false or number or string or array or object)"
    );
    assert_eq!(err.position().line(), 1);
    assert_eq!(err.position().column(), 7);

    let rendered = err.to_string();
    assert!(rendered.contains("parse error at line 1, column 7"));
    assert!(rendered.contains("expected one of: null, true, false"));
}
