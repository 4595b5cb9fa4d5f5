//! # Second pass
//!
//! Re-walks the macro-expanded text with IC restarted at
//! [`FIRST_CELL`](crate::context::FIRST_CELL), this time only to resolve
//! `.entry` declarations and patch the `Direct`-addressed operand words the
//! first pass left as zero placeholders.

#[cfg(test)]
mod tests;

use crate::context::{FileState, FIRST_CELL};
use crate::directives::parse_ident_list;
use crate::encoder::{self, EncodingType};
use crate::error::{AsmError, ErrorKind};
use crate::isa::{addressing_of, AddressingMethod, Arity, Opcode, WordSlot};
use crate::lexer::{classify_word, lex, split_first_token, split_label_raw, Statement};
use crate::symbol_table::SymbolKind;

/// One `name, use-site address` pair for the `.ext` file, in the order the
/// external was referenced.
pub struct SecondPassResult {
    pub errors: Vec<AsmError>,
    pub externals: Vec<(String, u16)>,
}

pub fn run(text: &str, state: &mut FileState) -> SecondPassResult {
    let mut errors = Vec::new();
    let mut externals = Vec::new();
    let mut ic = FIRST_CELL;

    for (idx, raw_line) in text.lines().enumerate() {
        let line_no = idx + 1;
        if raw_line.chars().count() > crate::lexer::MAX_LINE_LEN || lex(raw_line).is_empty() {
            continue;
        }

        let (label_raw, rest) = split_label_raw(raw_line);
        let (keyword, operand_text) = split_first_token(rest);
        let statement = classify_word(keyword);

        if label_raw.is_some() && matches!(statement, Statement::Entry | Statement::Extern) {
            continue; // already diagnosed in the first pass
        }

        match statement {
            Statement::Data | Statement::String | Statement::Extern => {}
            Statement::Entry => {
                state.has_entry = true;
                match parse_ident_list(operand_text) {
                    Ok(names) => {
                        for name in names {
                            if state.symbol_table.mark_entry(&name).is_err() {
                                errors.push(AsmError::new(line_no, ErrorKind::CantFindLabelToEntry));
                            }
                        }
                    }
                    Err(kind) => errors.push(AsmError::new(line_no, kind)),
                }
            }
            Statement::Code => {
                ic = patch_instruction(state, rest, ic, line_no, &mut errors, &mut externals);
            }
        }
    }

    SecondPassResult { errors, externals }
}

fn patch_instruction(
    state: &mut FileState,
    rest: &str,
    mut ic: u16,
    line_no: usize,
    errors: &mut Vec<AsmError>,
    externals: &mut Vec<(String, u16)>,
) -> u16 {
    let lexed = lex(rest);
    let Some(opcode) = lexed.word(0).and_then(Opcode::from_mnemonic) else {
        return ic; // malformed; first pass already recorded the error
    };

    ic += 1; // first word

    let (source_tok, destination_tok) = match opcode.arity() {
        Arity::Zero => (None, None),
        Arity::One => (None, lexed.word(1)),
        Arity::Two => (lexed.word(1), lexed.word(3)),
    };
    let source = addressing_of(source_tok);
    let destination = addressing_of(destination_tok);

    for slot in crate::isa::operand_plan(opcode, source, destination) {
        match slot {
            WordSlot::SharedRegisters => ic += 1,
            WordSlot::Source => ic = patch_if_direct(state, source, source_tok, ic, line_no, errors, externals),
            WordSlot::Destination => {
                ic = patch_if_direct(state, destination, destination_tok, ic, line_no, errors, externals)
            }
        }
    }

    ic
}

fn patch_if_direct(
    state: &mut FileState,
    method: AddressingMethod,
    token: Option<&str>,
    ic: u16,
    line_no: usize,
    errors: &mut Vec<AsmError>,
    externals: &mut Vec<(String, u16)>,
) -> u16 {
    if method == AddressingMethod::Direct {
        let name = token.unwrap();
        let idx = (ic - FIRST_CELL) as usize;
        match state.symbol_table.lookup(name) {
            None => errors.push(AsmError::new(line_no, ErrorKind::LabelNotFound)),
            Some(sym) if sym.kind == SymbolKind::External => {
                externals.push((name.to_string(), ic));
                state.instruction_image[idx] = encoder::value_word(EncodingType::External, 0);
            }
            Some(sym) => {
                state.instruction_image[idx] = encoder::value_word(EncodingType::Relocatable, sym.address as i32);
            }
        }
    }
    ic + 1
}
