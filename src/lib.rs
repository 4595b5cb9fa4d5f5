//! # mmn14-assembler
//!
//! A two-pass assembler for a 12-bit fictional word machine (16 opcodes, 8
//! registers, 3 addressing methods).
//!
//! ## Pipeline
//!
//! 1. **Preprocessor** - expands `mcro`/`endmcro` blocks into the `.am` text
//! 2. **First pass** - builds the symbol table and a provisional instruction/data image
//! 3. **Second pass** - resolves `.entry`/`.extern` and patches `Direct` operand words
//! 4. **Encoder/writer** - bit-packs words and renders `.ob`/`.ent`/`.ext` content
//!
//! ## Example
//!
//! ```rust,no_run
//! let source = std::fs::read_to_string("prog.as").unwrap();
//! let outcome = mmn14_assembler::assemble_source(&source);
//!
//! if outcome.errors.is_empty() {
//!     println!("compilation completed successfully, {} lines parsed", outcome.lines_parsed);
//! }
//! ```

pub mod context;
pub mod directives;
pub mod encoder;
pub mod error;
pub mod first_pass;
pub mod isa;
pub mod lexer;
pub mod preprocessor;
pub mod second_pass;
pub mod symbol_table;
pub mod writer;

use error::AsmError;

/// Everything the driver needs to report on, and write the outputs for, one
/// input file.
pub struct AssembleOutcome {
    pub errors: Vec<AsmError>,
    pub lines_parsed: usize,
    /// The macro-expanded text (`.am` contents). Always present: macro-pass
    /// errors don't stop the intermediate text from being produced.
    pub expanded_text: String,
    pub object_file: Option<String>,
    pub entries_file: Option<String>,
    pub externals_file: Option<String>,
}

/// Run the full pipeline over one file's raw source text.
pub fn assemble_source(source: &str) -> AssembleOutcome {
    let expanded = preprocessor::expand(source);
    let lines_parsed = expanded.text.lines().filter(|l| !lexer::lex(l).is_empty()).count();
    let mut errors = expanded.errors;

    let mut state = first_pass::run(&expanded.text);
    errors.extend(state.errors.drain(..));

    if !errors.is_empty() {
        return AssembleOutcome {
            errors,
            lines_parsed,
            expanded_text: expanded.text,
            object_file: None,
            entries_file: None,
            externals_file: None,
        };
    }

    let second = second_pass::run(&expanded.text, &mut state);
    if !second.errors.is_empty() {
        errors.extend(second.errors);
        return AssembleOutcome {
            errors,
            lines_parsed,
            expanded_text: expanded.text,
            object_file: None,
            entries_file: None,
            externals_file: None,
        };
    }

    let object_file = Some(writer::object_file(&state));
    let entries_file = writer::entries_file(&state);
    let externals_file = writer::externals_file(&state, &second.externals);

    AssembleOutcome {
        errors,
        lines_parsed,
        expanded_text: expanded.text,
        object_file,
        entries_file,
        externals_file,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_program_produces_all_outputs() {
        let outcome = assemble_source("stop\n");
        assert!(outcome.errors.is_empty());
        assert!(outcome.object_file.is_some());
        assert!(outcome.entries_file.is_none());
        assert!(outcome.externals_file.is_none());
    }

    #[test]
    fn first_pass_errors_suppress_all_outputs() {
        let outcome = assemble_source("frobnicate @r1\n");
        assert!(!outcome.errors.is_empty());
        assert!(outcome.object_file.is_none());
    }

    #[test]
    fn second_pass_errors_suppress_all_outputs() {
        let outcome = assemble_source("mov GHOST, @r2\n");
        assert!(!outcome.errors.is_empty());
        assert!(outcome.object_file.is_none());
    }
}
