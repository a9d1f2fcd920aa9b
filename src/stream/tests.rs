use super::*;

#[test]
fn position_starts_at_line_one_column_one() {
    let pos = Position::start();
    assert_eq!(pos.offset(), 0);
    assert_eq!(pos.line(), 1);
    assert_eq!(pos.column(), 1);
}

#[test]
fn position_advance_counts_lines_and_columns() {
    let pos = Position::start().advance("one\ntwo\nthr");
    assert_eq!(pos.line(), 3);
    assert_eq!(pos.column(), 4);
    assert_eq!(pos.offset(), 11);
}

#[test]
fn position_advance_counts_code_points_not_bytes() {
    let pos = Position::start().advance("héllo");
    assert_eq!(pos.column(), 6);
    // 'é' is two bytes in UTF-8
    assert_eq!(pos.offset(), 6);
}

#[test]
fn take1_advances_one_code_point() {
    let mut stream = Stream::new("héllo");
    assert_eq!(stream.take1(), Some('h'));
    assert_eq!(stream.take1(), Some('é'));
    assert_eq!(stream.rest(), "llo");
    assert_eq!(stream.position().column(), 3);
}

#[test]
fn take1_at_eof_returns_none() {
    let mut stream = Stream::new("");
    assert!(stream.is_eof());
    assert_eq!(stream.take1(), None);
}

#[test]
fn take_n_zero_is_empty_without_advancing() {
    let mut stream = Stream::new("abc");
    assert_eq!(stream.take_n(0), Some(String::new()));
    assert_eq!(stream.offset(), 0);
}

#[test]
fn take_n_returns_fewer_when_short() {
    let mut stream = Stream::new("ab");
    assert_eq!(stream.take_n(5).as_deref(), Some("ab"));
    assert!(stream.is_eof());
}

#[test]
fn take_n_on_empty_stream_fails() {
    let mut stream = Stream::new("");
    assert_eq!(stream.take_n(1), None);
}

#[test]
fn take_while_consumes_maximal_prefix() {
    let mut stream = Stream::new("123abc");
    assert_eq!(stream.take_while(|c| c.is_ascii_digit()), "123");
    assert_eq!(stream.rest(), "abc");
    assert_eq!(stream.take_while(|c| c.is_ascii_digit()), "");
    assert_eq!(stream.rest(), "abc");
}

#[test]
fn peeks_do_not_advance() {
    let stream = Stream::new("abc");
    assert_eq!(stream.peek1(), Some('a'));
    assert_eq!(stream.peek_n(2).as_deref(), Some("ab"));
    assert_eq!(stream.peek_while(|c| c.is_alphabetic()), "abc");
    assert_eq!(stream.offset(), 0);
}

#[test]
fn peek_back_sees_the_previous_character() {
    let mut stream = Stream::new("ab");
    assert_eq!(stream.peek_back(), None);
    stream.take1();
    assert_eq!(stream.peek_back(), Some('a'));
}

#[test]
fn rollback_restores_offset_and_position() {
    let mut stream = Stream::new("ab\ncd");
    stream.begin_transaction();
    stream.take_n(4);
    assert_eq!(stream.position().line(), 2);
    stream.rollback();
    assert_eq!(stream.offset(), 0);
    assert_eq!(stream.position(), Position::start());
    assert_eq!(stream.rest(), "ab\ncd");
}

#[test]
fn transactions_nest_lifo() {
    let mut stream = Stream::new("abcdef");
    stream.begin_transaction();
    stream.take_n(2);
    stream.begin_transaction();
    stream.take_n(2);
    stream.rollback();
    assert_eq!(stream.rest(), "cdef");
    stream.rollback();
    assert_eq!(stream.rest(), "abcdef");
}

#[test]
fn commit_keeps_the_new_position() {
    let mut stream = Stream::new("abcdef");
    stream.begin_transaction();
    stream.take_n(3);
    stream.commit();
    assert_eq!(stream.rest(), "def");
}

#[test]
#[should_panic(expected = "without a matching begin_transaction")]
fn commit_without_begin_is_fatal() {
    let mut stream = Stream::new("abc");
    stream.commit();
}

#[test]
#[should_panic(expected = "without a matching begin_transaction")]
fn rollback_without_begin_is_fatal() {
    let mut stream = Stream::new("abc");
    stream.rollback();
}

#[test]
fn equality_ignores_transaction_state() {
    let mut a = Stream::new("abc");
    let mut b = Stream::new("abc");
    a.begin_transaction();
    assert_eq!(a, b);
    a.take1();
    b.take1();
    assert_eq!(a, b);
    a.take1();
    assert_ne!(a, b);
}

#[test]
fn filename_is_retained() {
    let stream = Stream::with_filename("{}", "config.json");
    assert_eq!(stream.filename(), Some("config.json"));
    assert_eq!(Stream::new("{}").filename(), None);
}

#[test]
fn string_accumulates_strings_and_chars() {
    let mut s = <String as Accumulate<String>>::initial(None);
    Accumulate::accumulate(&mut s, "ab".to_owned());
    Accumulate::accumulate(&mut s, "cd".to_owned());
    assert_eq!(s, "abcd");

    let mut s = <String as Accumulate<char>>::initial(Some(2));
    s.accumulate('x');
    s.accumulate('y');
    assert_eq!(s, "xy");
}

#[test]
fn vec_and_unit_accumulate() {
    let mut v = <Vec<u8> as Accumulate<u8>>::initial(Some(3));
    v.accumulate(1);
    v.accumulate(2);
    assert_eq!(v, vec![1, 2]);

    let mut n = <usize as Accumulate<u8>>::initial(None);
    n.accumulate(9);
    n.accumulate(9);
    assert_eq!(n, 2);
}
