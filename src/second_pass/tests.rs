use super::*;
use crate::first_pass;

#[test]
fn direct_operand_resolves_to_relocatable_word() {
    let text = "mov LOOP, @r2\nLOOP: stop\n";
    let mut state = first_pass::run(text);
    assert!(state.errors.is_empty());
    let result = run(text, &mut state);
    assert!(result.errors.is_empty());
    assert!(result.externals.is_empty());
    // word 0 is the instruction's first word, word 1 is the patched Direct operand.
    let patched = state.instruction_image[1];
    assert_eq!(patched & 0x03, EncodingType::Relocatable.code());
    assert_eq!(patched >> 2, state.symbol_table.lookup("LOOP").unwrap().address);
}

#[test]
fn direct_operand_to_extern_records_use_site() {
    let text = ".extern FOO\nmov FOO, @r2\n";
    let mut state = first_pass::run(text);
    assert!(state.errors.is_empty());
    let result = run(text, &mut state);
    assert!(result.errors.is_empty());
    assert_eq!(result.externals, vec![("FOO".to_string(), 101)]);
    let patched = state.instruction_image[1];
    assert_eq!(patched & 0x03, EncodingType::External.code());
}

#[test]
fn undefined_direct_label_is_an_error() {
    let text = "mov GHOST, @r2\n";
    let mut state = first_pass::run(text);
    assert!(state.errors.is_empty());
    let result = run(text, &mut state);
    assert_eq!(result.errors[0].kind, ErrorKind::LabelNotFound);
}

#[test]
fn entry_marks_existing_symbol() {
    let text = "X: stop\n.entry X\n";
    let mut state = first_pass::run(text);
    assert!(state.errors.is_empty());
    let result = run(text, &mut state);
    assert!(result.errors.is_empty());
    assert_eq!(state.symbol_table.lookup("X").unwrap().kind, SymbolKind::Entry);
    assert!(state.has_entry);
}

#[test]
fn entry_on_undefined_label_is_an_error() {
    let text = ".entry GHOST\nstop\n";
    let mut state = first_pass::run(text);
    assert!(state.errors.is_empty());
    let result = run(text, &mut state);
    assert_eq!(result.errors[0].kind, ErrorKind::CantFindLabelToEntry);
}

#[test]
fn malformed_entry_list_is_reported_not_dropped() {
    let text = "X: stop\n.entry X, , Y\n";
    let mut state = first_pass::run(text);
    assert!(state.errors.is_empty());
    let result = run(text, &mut state);
    assert_eq!(result.errors[0].kind, ErrorKind::InvalidCommaPosition);
}

#[test]
fn register_and_immediate_operands_are_left_untouched() {
    let text = "mov 5, @r2\n";
    let mut state = first_pass::run(text);
    assert!(state.errors.is_empty());
    let before = state.instruction_image.clone();
    let result = run(text, &mut state);
    assert!(result.errors.is_empty());
    assert_eq!(state.instruction_image, before);
}
