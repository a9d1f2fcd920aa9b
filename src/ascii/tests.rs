use super::*;

#[test]
fn digit_and_hex_digit_stay_ascii() {
    assert_eq!(digit_char().try_run("7a").unwrap(), "7");
    assert!(digit_char().try_run("a").is_err());
    // '٣' is an Arabic-Indic digit; number grammars do not want it.
    assert!(digit_char().try_run("٣").is_err());

    assert_eq!(hex_digit_char().try_run("f0").unwrap(), "f");
    assert_eq!(hex_digit_char().try_run("B").unwrap(), "B");
    assert!(hex_digit_char().try_run("g").is_err());
}

#[test]
fn alpha_classes_accept_unicode() {
    assert_eq!(alpha_char().try_run("früh").unwrap(), "f");
    assert_eq!(alpha_char().try_run("über").unwrap(), "ü");
    assert!(alpha_char().try_run("1").is_err());

    assert_eq!(alpha_num_char().try_run("1").unwrap(), "1");
    assert_eq!(alpha_num_char().try_run("x").unwrap(), "x");
    assert!(alpha_num_char().try_run("-").is_err());
}

#[test]
fn whitespace_singles() {
    assert_eq!(space().try_run(" x").unwrap(), " ");
    assert!(space().try_run("\tx").is_err());
    assert_eq!(tab().try_run("\tx").unwrap(), "\t");
    assert_eq!(newline().try_run("\nx").unwrap(), "\n");
}

#[test]
fn eol_accepts_both_conventions() {
    assert_eq!(eol().try_run("\nrest").unwrap(), "\n");
    assert_eq!(eol().try_run("\r\nrest").unwrap(), "\r\n");
    let err = eol().try_run("x").unwrap_err();
    assert_eq!(err.expected().to_string(), "end of line");
}

#[test]
fn whitespace_never_fails() {
    assert_eq!(whitespace().try_run("").unwrap(), "");
    assert_eq!(whitespace().try_run("xyz").unwrap(), "");
    assert_eq!(whitespace().try_run(" \t\n xyz").unwrap(), " \t\n ");
}
