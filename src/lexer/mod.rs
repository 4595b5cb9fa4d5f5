//! # Lexical utilities
//!
//! Deterministic tokenisation of one source line into up to five
//! whitespace-delimited words. Nothing here looks ahead or behind a line;
//! the first and second pass each lex their own copy of a line independently.

#[cfg(test)]
mod tests;

/// Maximum source line length, not counting the newline (§6).
pub const MAX_LINE_LEN: usize = 80;

pub const DIRECTIVES: [&str; 4] = [".data", ".string", ".extern", ".entry"];
pub const REGISTERS: [&str; 8] = [
    "@r0", "@r1", "@r2", "@r3", "@r4", "@r5", "@r6", "@r7",
];
pub const MNEMONICS: [&str; 16] = [
    "mov", "cmp", "add", "sub", "not", "clr", "lea", "inc", "dec", "jmp", "bne", "red", "prn",
    "jsr", "rts", "stop",
];

/// Word count bucket for a lexed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordCount {
    Zero,
    One,
    Two,
    Three,
    Four,
    Five,
    MoreThanFive,
}

impl WordCount {
    fn from_total(total: usize) -> Self {
        match total {
            0 => WordCount::Zero,
            1 => WordCount::One,
            2 => WordCount::Two,
            3 => WordCount::Three,
            4 => WordCount::Four,
            5 => WordCount::Five,
            _ => WordCount::MoreThanFive,
        }
    }
}

/// A source line split into its (at most five) whitespace-delimited tokens.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LexedLine {
    pub words: [Option<String>; 5],
    pub count: WordCount,
}

impl Default for WordCount {
    fn default() -> Self {
        WordCount::Zero
    }
}

impl LexedLine {
    pub fn word(&self, i: usize) -> Option<&str> {
        self.words.get(i).and_then(|w| w.as_deref())
    }

    /// True iff the line is empty once blank/comment lines are discarded.
    pub fn is_empty(&self) -> bool {
        matches!(self.count, WordCount::Zero)
    }
}

/// Surround every comma with a single space so splitting on whitespace turns
/// a bare comma into its own token. This is the only normalisation lexing
/// performs; repeated whitespace otherwise stays insignificant as separators.
pub fn normalise_commas(line: &str) -> String {
    let mut out = String::with_capacity(line.len() + 4);
    for ch in line.chars() {
        if ch == ',' {
            out.push(' ');
            out.push(',');
            out.push(' ');
        } else {
            out.push(ch);
        }
    }
    out
}

/// Tokenise one line. A blank line or a comment line (first non-whitespace
/// character is `;`) lexes to `count = Zero` with no words.
pub fn lex(line: &str) -> LexedLine {
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with(';') {
        return LexedLine {
            words: Default::default(),
            count: WordCount::Zero,
        };
    }

    let normalised = normalise_commas(line);
    let tokens: Vec<&str> = normalised.split_whitespace().collect();
    let mut words: [Option<String>; 5] = Default::default();
    for (slot, token) in words.iter_mut().zip(tokens.iter()) {
        *slot = Some((*token).to_string());
    }

    LexedLine {
        words,
        count: WordCount::from_total(tokens.len()),
    }
}

/// Implements the spec's `is_label`: if `word1` ends with `:`, strip it,
/// shift `word2..word5` one slot leftward, and return the bare label name.
/// Returns `None` (no mutation) if there is no label on this line.
pub fn strip_label(line: &mut LexedLine) -> Option<String> {
    let first = line.words[0].as_ref()?;
    if !first.ends_with(':') {
        return None;
    }
    let name = {
        let first = line.words[0].take().unwrap();
        first.trim_end_matches(':').to_string()
    };
    line.words[0] = line.words[1].take();
    line.words[1] = line.words[2].take();
    line.words[2] = line.words[3].take();
    line.words[3] = line.words[4].take();
    line.words[4] = None;
    line.count = match line.count {
        WordCount::Zero => WordCount::Zero,
        WordCount::One => WordCount::Zero,
        WordCount::Two => WordCount::One,
        WordCount::Three => WordCount::Two,
        WordCount::Four => WordCount::Three,
        WordCount::Five => WordCount::Four,
        WordCount::MoreThanFive => WordCount::MoreThanFive,
    };
    Some(name)
}

/// Split a raw label off the front of a line, without routing through the
/// five-slot [`LexedLine`]. `.data`/`.string`/`.extern`/`.entry` argument
/// lists are unbounded, so directive handling works on the raw remainder of
/// the line rather than on `word2..word5`, which only has room for the
/// operands of an instruction.
pub fn split_label_raw(line: &str) -> (Option<String>, &str) {
    let trimmed = line.trim_start();
    let Some(end) = trimmed.find(char::is_whitespace) else {
        return match trimmed.strip_suffix(':') {
            Some(name) => (Some(name.to_string()), ""),
            None => (None, trimmed),
        };
    };
    let (first, rest) = trimmed.split_at(end);
    match first.strip_suffix(':') {
        Some(name) => (Some(name.to_string()), rest.trim_start()),
        None => (None, trimmed),
    }
}

/// Split off the first whitespace-delimited token, returning it and the
/// (left-trimmed) remainder of the line.
pub fn split_first_token(line: &str) -> (&str, &str) {
    let trimmed = line.trim_start();
    match trimmed.find(char::is_whitespace) {
        Some(end) => {
            let (first, rest) = trimmed.split_at(end);
            (first, rest.trim_start())
        }
        None => (trimmed, ""),
    }
}

/// A classified `word1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statement {
    Data,
    String,
    Extern,
    Entry,
    Code,
}

pub fn classify_word(token: &str) -> Statement {
    match token {
        ".data" => Statement::Data,
        ".string" => Statement::String,
        ".extern" => Statement::Extern,
        ".entry" => Statement::Entry,
        _ => Statement::Code,
    }
}

fn is_reserved(word: &str) -> bool {
    DIRECTIVES.contains(&word) || REGISTERS.contains(&word) || MNEMONICS.contains(&word)
}

/// A valid identifier: starts with a letter, the rest is alphanumeric, at
/// most 31 characters total, and not one of the reserved words.
pub fn is_valid_identifier(name: &str) -> bool {
    if name.is_empty() || name.len() > 31 {
        return false;
    }
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_ascii_alphabetic() {
        return false;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric()) {
        return false;
    }
    !is_reserved(name)
}
