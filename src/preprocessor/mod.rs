//! # Macro pre-processor
//!
//! Pure textual substitution: `mcro NAME` … `endmcro` blocks are recorded and
//! removed from the output; a later bare line naming a known macro is
//! replaced by its stored body. Expansions are pasted verbatim and are not
//! re-scanned for further macro references.


use crate::error::{AsmError, ErrorKind};
use crate::lexer::{is_valid_identifier, lex};

/// Insertion-ordered macro name → body mapping.
#[derive(Debug, Default)]
struct MacroTable {
    entries: Vec<(String, Vec<String>)>,
}

impl MacroTable {
    fn lookup(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, body)| body.as_slice())
    }

    fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    fn insert(&mut self, name: String, body: Vec<String>) {
        self.entries.push((name, body));
    }
}

enum State {
    Outside,
    InsideBody { name: Option<String>, body: Vec<String> },
}

pub struct ExpandResult {
    pub text: String,
    pub errors: Vec<AsmError>,
}

/// Expand all `mcro`/`endmcro` blocks in `source`, producing the
/// macro-expanded intermediate text (the `.am` contents).
pub fn expand(source: &str) -> ExpandResult {
    let mut macros = MacroTable::default();
    let mut errors = Vec::new();
    let mut out: Vec<String> = Vec::new();
    let mut state = State::Outside;

    for (idx, raw_line) in source.lines().enumerate() {
        let line_no = idx + 1;
        let lexed = lex(raw_line);
        let first = lexed.word(0);

        match &mut state {
            State::Outside => {
                if let Some(name) = first.filter(|w| macros.contains(w)) {
                    let body = macros.lookup(name).unwrap().to_vec();
                    out.extend(body);
                } else if first == Some("mcro") {
                    let macro_name = lexed.word(1).map(str::to_string);
                    match macro_name {
                        Some(name) if !macros.contains(&name) => {
                            state = State::InsideBody {
                                name: Some(name),
                                body: Vec::new(),
                            };
                        }
                        Some(name) => {
                            errors.push(AsmError::new(line_no, ErrorKind::MacroAlreadyExists));
                            state = State::InsideBody { name: Some(name), body: Vec::new() };
                        }
                        None => {
                            errors.push(AsmError::new(line_no, ErrorKind::InvalidLabelName));
                            state = State::InsideBody { name: None, body: Vec::new() };
                        }
                    }
                } else {
                    out.push(raw_line.to_string());
                }
            }
            State::InsideBody { name, body } => {
                if first == Some("mcro") {
                    errors.push(AsmError::new(line_no, ErrorKind::NestedMacroDefinition));
                    body.push(raw_line.to_string());
                } else if first == Some("endmcro") {
                    if let Some(name) = name.take() {
                        if is_valid_identifier(&name) {
                            macros.insert(name, std::mem::take(body));
                        } else {
                            errors.push(AsmError::new(line_no, ErrorKind::MacroNameIsReserved));
                        }
                    }
                    state = State::Outside;
                } else {
                    body.push(raw_line.to_string());
                }
            }
        }
    }

    ExpandResult {
        text: out.join("\n"),
        errors,
    }
}
