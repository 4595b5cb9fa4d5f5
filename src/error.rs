//! # Diagnostics
//!
//! Every phase of the pipeline accumulates [`AsmError`] values instead of
//! aborting at the first problem. A pass keeps scanning the rest of the file
//! so one bad line doesn't hide the next ten.

/// One diagnostic, tied to the source line it was found on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsmError {
    pub line: usize,
    pub kind: ErrorKind,
}

impl AsmError {
    pub fn new(line: usize, kind: ErrorKind) -> Self {
        Self { line, kind }
    }
}

impl std::fmt::Display for AsmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind.message())
    }
}

/// The full diagnostic taxonomy. Grouped in source order to match §7 of the
/// specification: structural, lexical, semantic, duplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    // --- structural ---
    NestedMacroDefinition,
    MacroNameIsReserved,
    MacroAlreadyExists,
    CantDefineLabelBeforeEntry,
    CantDefineLabelBeforeExtern,

    // --- lexical ---
    InvalidLabelName,
    InvalidCommaPosition,
    CommaRequiredBetweenValues,
    InstructionNameNotExist,
    InvalidExternName,
    LineTooLong,

    // --- semantic ---
    InstructionShouldReceiveTwoOperands,
    InstructionShouldReceiveOneOperand,
    InstructionShouldReceiveNoOperands,
    TooMuchWordsForInstruction,
    InvalidAddressMethodForInstruction,
    LabelNotFound,
    CantFindLabelToEntry,
    MustProvideValuesToData,
    DataNeedNumValue,
    ImmediateOutOfRange,
    MemoryOverflow,
    StringStructureNotValid,
    StringMustEndInQuotes,
    StringDirectiveAcceptsOneParameter,

    // --- duplication ---
    LabelAlreadyExists,
}

impl ErrorKind {
    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::NestedMacroDefinition => "a macro definition cannot contain another mcro",
            ErrorKind::MacroNameIsReserved => "macro name is a reserved word",
            ErrorKind::MacroAlreadyExists => "macro already defined",
            ErrorKind::CantDefineLabelBeforeEntry => {
                "a label cannot be defined on an .entry line"
            }
            ErrorKind::CantDefineLabelBeforeExtern => {
                "a label cannot be defined on an .extern line"
            }
            ErrorKind::InvalidLabelName => {
                "invalid label name (must start with a letter, be alphanumeric, \
                 at most 31 characters, and not a reserved word)"
            }
            ErrorKind::InvalidCommaPosition => "misplaced comma",
            ErrorKind::CommaRequiredBetweenValues => "missing comma between values",
            ErrorKind::InstructionNameNotExist => "unknown instruction",
            ErrorKind::InvalidExternName => "invalid identifier in .extern list",
            ErrorKind::LineTooLong => "line exceeds 80 characters",
            ErrorKind::InstructionShouldReceiveTwoOperands => {
                "this instruction requires two operands"
            }
            ErrorKind::InstructionShouldReceiveOneOperand => {
                "this instruction requires one operand"
            }
            ErrorKind::InstructionShouldReceiveNoOperands => "this instruction takes no operands",
            ErrorKind::TooMuchWordsForInstruction => "too many tokens on instruction line",
            ErrorKind::InvalidAddressMethodForInstruction => {
                "addressing method not allowed for this instruction/operand"
            }
            ErrorKind::LabelNotFound => "undefined label",
            ErrorKind::CantFindLabelToEntry => "label listed in .entry was never defined",
            ErrorKind::MustProvideValuesToData => ".data requires at least one value",
            ErrorKind::DataNeedNumValue => ".data value is not a valid integer",
            ErrorKind::ImmediateOutOfRange => "immediate value out of range (-512..511)",
            ErrorKind::MemoryOverflow => "combined instruction and data image exceeds 924 words",
            ErrorKind::StringStructureNotValid => ".string must start with an opening quote",
            ErrorKind::StringMustEndInQuotes => ".string is missing its closing quote",
            ErrorKind::StringDirectiveAcceptsOneParameter => {
                ".string accepts exactly one quoted parameter"
            }
            ErrorKind::LabelAlreadyExists => "label already defined",
        }
    }
}
