use super::*;

#[test]
fn blank_line_is_zero_words() {
    assert!(lex("").is_empty());
    assert!(lex("   ").is_empty());
}

#[test]
fn comment_line_is_zero_words() {
    assert!(lex("   ; a comment").is_empty());
}

#[test]
fn normalise_commas_surrounds_bare_comma() {
    assert_eq!(normalise_commas("mov @r1,@r2"), "mov @r1 , @r2");
}

#[test]
fn two_operand_line_has_explicit_comma_token() {
    let l = lex("mov @r1, @r2");
    assert_eq!(l.count, WordCount::Four);
    assert_eq!(l.word(0), Some("mov"));
    assert_eq!(l.word(1), Some("@r1"));
    assert_eq!(l.word(2), Some(","));
    assert_eq!(l.word(3), Some("@r2"));
}

#[test]
fn sixth_token_overflows_the_count() {
    let l = lex("mov a , b c d e");
    assert_eq!(l.count, WordCount::MoreThanFive);
}

#[test]
fn strip_label_shifts_remaining_words_left() {
    let mut l = lex("X: mov @r1, @r2");
    let name = strip_label(&mut l);
    assert_eq!(name, Some("X".to_string()));
    assert_eq!(l.count, WordCount::Three);
    assert_eq!(l.word(0), Some("mov"));
    assert_eq!(l.word(1), Some("@r1"));
    assert_eq!(l.word(2), Some(","));
    assert_eq!(l.word(3), Some("@r2"));
}

#[test]
fn strip_label_is_none_without_trailing_colon() {
    let mut l = lex("mov @r1, @r2");
    assert_eq!(strip_label(&mut l), None);
}

#[test]
fn classify_word_recognises_directives() {
    assert_eq!(classify_word(".data"), Statement::Data);
    assert_eq!(classify_word(".string"), Statement::String);
    assert_eq!(classify_word(".extern"), Statement::Extern);
    assert_eq!(classify_word(".entry"), Statement::Entry);
    assert_eq!(classify_word("mov"), Statement::Code);
    assert_eq!(classify_word("LOOP"), Statement::Code);
}

#[test]
fn split_label_raw_separates_name_from_remainder() {
    assert_eq!(split_label_raw("X: .data 1, 2"), (Some("X".to_string()), ".data 1, 2"));
    assert_eq!(split_label_raw(".data 1, 2"), (None, ".data 1, 2"));
    assert_eq!(split_label_raw("X:"), (Some("X".to_string()), ""));
}

#[test]
fn split_first_token_separates_keyword_from_operands() {
    assert_eq!(split_first_token(".data 1, 2, 3"), (".data", "1, 2, 3"));
    assert_eq!(split_first_token(".string \"hi, there\""), (".string", "\"hi, there\""));
    assert_eq!(split_first_token(".entry"), (".entry", ""));
}

#[test]
fn identifier_rules() {
    assert!(is_valid_identifier("LOOP"));
    assert!(is_valid_identifier("a1"));
    assert!(!is_valid_identifier("1loop")); // must start alphabetic
    assert!(!is_valid_identifier("lo op")); // not alphanumeric
    assert!(!is_valid_identifier("mov")); // reserved mnemonic
    assert!(!is_valid_identifier("@r1")); // reserved register
    assert!(!is_valid_identifier(".data")); // reserved directive
    assert!(is_valid_identifier(&"a".repeat(31)));
    assert!(!is_valid_identifier(&"a".repeat(32)));
}
