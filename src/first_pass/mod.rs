//! # First pass
//!
//! Walks the macro-expanded text once, building the symbol table and a
//! provisional instruction/data image. `Direct`-addressed operand words are
//! emitted as zero placeholders; the second pass patches them once every
//! label's final address is known.


use crate::context::{FileState, MEMORY_LIMIT};
use crate::directives::{parse_ident_list, parse_int_list, truncate_to_field};
use crate::encoder::{self, EncodingType};
use crate::error::{AsmError, ErrorKind};
use crate::isa::{addressing_of, register_number, AddressingMethod, Opcode, WordSlot};
use crate::lexer::{classify_word, is_valid_identifier, lex, split_first_token, split_label_raw, Statement};
use crate::symbol_table::SymbolKind;

/// Run the first pass over `text` (the macro-expanded source). Returns a
/// [`FileState`] whose `errors` field is empty iff the second pass may run.
pub fn run(text: &str) -> FileState {
    let mut state = FileState::new();

    for (idx, raw_line) in text.lines().enumerate() {
        process_line(&mut state, raw_line, idx + 1);
    }

    if state.errors.is_empty() {
        if state.combined_word_count() > MEMORY_LIMIT {
            state.errors.push(AsmError::new(0, ErrorKind::MemoryOverflow));
        } else {
            let ic_final = state.ic();
            state.symbol_table.relocate_data(ic_final);
        }
    }

    state
}

fn process_line(state: &mut FileState, raw_line: &str, line_no: usize) {
    if raw_line.chars().count() > crate::lexer::MAX_LINE_LEN {
        state.errors.push(AsmError::new(line_no, ErrorKind::LineTooLong));
        return;
    }
    if lex(raw_line).is_empty() {
        return;
    }

    let (label_raw, rest) = split_label_raw(raw_line);
    let (keyword, operand_text) = split_first_token(rest);
    let statement = classify_word(keyword);

    if label_raw.is_some() && matches!(statement, Statement::Entry) {
        state.errors.push(AsmError::new(line_no, ErrorKind::CantDefineLabelBeforeEntry));
        return;
    }
    if label_raw.is_some() && matches!(statement, Statement::Extern) {
        state.errors.push(AsmError::new(line_no, ErrorKind::CantDefineLabelBeforeExtern));
        return;
    }

    let mut label = None;
    if let Some(name) = label_raw {
        if is_valid_identifier(&name) {
            label = Some(name);
        } else {
            state.errors.push(AsmError::new(line_no, ErrorKind::InvalidLabelName));
        }
    }

    match statement {
        Statement::Data => {
            insert_label(state, label, state.dc, SymbolKind::Data, line_no);
            handle_data(state, operand_text, line_no);
        }
        Statement::String => {
            insert_label(state, label, state.dc, SymbolKind::Data, line_no);
            handle_string(state, operand_text, line_no);
        }
        Statement::Extern => handle_extern(state, operand_text, line_no),
        Statement::Entry => {}
        Statement::Code => {
            insert_label(state, label, state.ic(), SymbolKind::Code, line_no);
            handle_instruction(state, rest, line_no);
        }
    }
}

fn insert_label(state: &mut FileState, label: Option<String>, address: u16, kind: SymbolKind, line_no: usize) {
    if let Some(name) = label {
        if state.symbol_table.insert(&name, address, kind).is_err() {
            state.errors.push(AsmError::new(line_no, ErrorKind::LabelAlreadyExists));
        }
    }
}

fn handle_data(state: &mut FileState, operand_text: &str, line_no: usize) {
    match parse_int_list(operand_text) {
        Ok(values) => {
            for v in values {
                state.data_image.push(truncate_to_field(v));
                state.dc += 1;
            }
        }
        Err(kind) => state.errors.push(AsmError::new(line_no, kind)),
    }
}

fn handle_string(state: &mut FileState, operand_text: &str, line_no: usize) {
    if !operand_text.starts_with('"') {
        state.errors.push(AsmError::new(line_no, ErrorKind::StringStructureNotValid));
        return;
    }
    let rest = &operand_text[1..];
    let Some(close) = rest.find('"') else {
        state.errors.push(AsmError::new(line_no, ErrorKind::StringMustEndInQuotes));
        return;
    };
    let content = &rest[..close];
    let trailing = rest[close + 1..].trim();
    if !trailing.is_empty() {
        state.errors.push(AsmError::new(line_no, ErrorKind::StringDirectiveAcceptsOneParameter));
        return;
    }
    for ch in content.chars() {
        state.data_image.push(ch as u16);
        state.dc += 1;
    }
    state.data_image.push(0);
    state.dc += 1;
}

fn handle_extern(state: &mut FileState, operand_text: &str, line_no: usize) {
    state.has_extern = true;
    match parse_ident_list(operand_text) {
        Ok(names) => {
            for name in names {
                if !is_valid_identifier(&name) {
                    state.errors.push(AsmError::new(line_no, ErrorKind::InvalidExternName));
                    continue;
                }
                if state.symbol_table.insert(&name, 0, SymbolKind::External).is_err() {
                    state.errors.push(AsmError::new(line_no, ErrorKind::LabelAlreadyExists));
                }
            }
        }
        Err(kind) => state.errors.push(AsmError::new(line_no, kind)),
    }
}

fn handle_instruction(state: &mut FileState, rest: &str, line_no: usize) {
    let lexed = lex(rest);
    let Some(opcode) = lexed.word(0).and_then(Opcode::from_mnemonic) else {
        state.errors.push(AsmError::new(line_no, ErrorKind::InstructionNameNotExist));
        return;
    };

    if matches!(lexed.count, crate::lexer::WordCount::MoreThanFive) {
        state.errors.push(AsmError::new(line_no, ErrorKind::TooMuchWordsForInstruction));
        return;
    }

    let actual = word_count_value(lexed.count);
    let arity = opcode.arity();
    let expected = match arity {
        crate::isa::Arity::Zero => 1,
        crate::isa::Arity::One => 2,
        crate::isa::Arity::Two => 4,
    };
    if actual != expected {
        let kind = match arity {
            crate::isa::Arity::Zero => ErrorKind::InstructionShouldReceiveNoOperands,
            crate::isa::Arity::One => ErrorKind::InstructionShouldReceiveOneOperand,
            crate::isa::Arity::Two => ErrorKind::InstructionShouldReceiveTwoOperands,
        };
        state.errors.push(AsmError::new(line_no, kind));
        return;
    }
    if matches!(arity, crate::isa::Arity::Two) && lexed.word(2) != Some(",") {
        state.errors.push(AsmError::new(line_no, ErrorKind::InstructionShouldReceiveTwoOperands));
        return;
    }

    let (source_tok, destination_tok) = match arity {
        crate::isa::Arity::Zero => (None, None),
        crate::isa::Arity::One => (None, lexed.word(1)),
        crate::isa::Arity::Two => (lexed.word(1), lexed.word(3)),
    };
    let source = addressing_of(source_tok);
    let destination = addressing_of(destination_tok);

    if !opcode.addressing_allowed(source, destination) {
        state.errors.push(AsmError::new(line_no, ErrorKind::InvalidAddressMethodForInstruction));
        return;
    }

    // Resolve immediate values up front so a range violation aborts the
    // whole line before any word is emitted.
    let source_value = match resolve_immediate(source, source_tok) {
        Ok(v) => v,
        Err(kind) => {
            state.errors.push(AsmError::new(line_no, kind));
            return;
        }
    };
    let destination_value = match resolve_immediate(destination, destination_tok) {
        Ok(v) => v,
        Err(kind) => {
            state.errors.push(AsmError::new(line_no, kind));
            return;
        }
    };

    state.push_instruction_word(encoder::first_word(EncodingType::Absolute, destination, opcode, source));

    for slot in crate::isa::operand_plan(opcode, source, destination) {
        let word = match slot {
            WordSlot::SharedRegisters => {
                let src_reg = register_number(source_tok.unwrap()).unwrap();
                let dst_reg = register_number(destination_tok.unwrap()).unwrap();
                encoder::register_word(src_reg, dst_reg)
            }
            WordSlot::Source => operand_word(source, source_tok, source_value, true),
            WordSlot::Destination => operand_word(destination, destination_tok, destination_value, false),
        };
        state.push_instruction_word(word);
    }
}

/// Build a lone operand's word. `is_source` only matters for `Register`,
/// where it picks which half of the shared register word is written; a
/// solitary register operand still occupies a whole word, with the other
/// half zero.
fn operand_word(method: AddressingMethod, token: Option<&str>, immediate_value: Option<i32>, is_source: bool) -> u16 {
    match method {
        AddressingMethod::Register => {
            let reg = register_number(token.unwrap()).unwrap();
            if is_source {
                encoder::register_word(reg, 0)
            } else {
                encoder::register_word(0, reg)
            }
        }
        AddressingMethod::Immediate => encoder::value_word(EncodingType::Absolute, immediate_value.unwrap()),
        AddressingMethod::Direct => 0, // patched by the second pass
        AddressingMethod::Absent => 0,
    }
}

fn resolve_immediate(method: AddressingMethod, token: Option<&str>) -> Result<Option<i32>, ErrorKind> {
    if method != AddressingMethod::Immediate {
        return Ok(None);
    }
    let value: i32 = token.unwrap().parse().map_err(|_| ErrorKind::ImmediateOutOfRange)?;
    if !(-512..=511).contains(&value) {
        return Err(ErrorKind::ImmediateOutOfRange);
    }
    Ok(Some(value))
}

fn word_count_value(count: crate::lexer::WordCount) -> usize {
    use crate::lexer::WordCount::*;
    match count {
        Zero => 0,
        One => 1,
        Two => 2,
        Three => 3,
        Four => 4,
        Five => 5,
        MoreThanFive => 6,
    }
}
