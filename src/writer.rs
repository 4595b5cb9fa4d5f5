//! # Output file bodies
//!
//! Builds the text content of `.ob`, `.ent` and `.ext` files. Writing the
//! content to disk is the driver's job; this module only knows how to
//! render a [`FileState`] into the formats §5 describes.

use crate::context::FileState;
use crate::encoder::word_to_base64;
use crate::symbol_table::SymbolKind;

/// `<IC final - FIRST_CELL>\t<DC final>` followed by one base64 line per
/// word, instructions before data.
pub fn object_file(state: &FileState) -> String {
    let mut out = format!("{}\t{}\n", state.ic_relative(), state.dc);
    for &word in state.instruction_image.iter().chain(state.data_image.iter()) {
        out.push_str(&word_to_base64(word));
        out.push('\n');
    }
    out
}

/// `name\taddress` per entry symbol, in definition order. `None` unless the
/// file declared at least one `.entry`.
pub fn entries_file(state: &FileState) -> Option<String> {
    if !state.has_entry {
        return None;
    }
    let mut out = String::new();
    for sym in state.symbol_table.iter() {
        if sym.kind == SymbolKind::Entry {
            out.push_str(&format!("{}\t{}\n", sym.name, sym.address));
        }
    }
    Some(out)
}

/// `name\taddress` per external use-site, in reference order. `None` unless
/// the file declared `.extern` and at least one reference was resolved.
pub fn externals_file(state: &FileState, externals: &[(String, u16)]) -> Option<String> {
    if !state.has_extern || externals.is_empty() {
        return None;
    }
    let mut out = String::new();
    for (name, address) in externals {
        out.push_str(&format!("{}\t{}\n", name, address));
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::first_pass;
    use crate::second_pass;

    #[test]
    fn object_file_header_then_base64_lines() {
        let state = first_pass::run("stop\n");
        let text = object_file(&state);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("1\t0"));
        assert_eq!(lines.next(), Some("Hg"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn entries_file_absent_without_any_entry_directive() {
        let state = first_pass::run("stop\n");
        assert!(entries_file(&state).is_none());
    }

    #[test]
    fn entries_file_lists_entry_symbols() {
        let text = "X: stop\n.entry X\n";
        let mut state = first_pass::run(text);
        second_pass::run(text, &mut state);
        let out = entries_file(&state).unwrap();
        assert_eq!(out, "X\t100\n");
    }

    #[test]
    fn externals_file_absent_without_any_use_site() {
        let text = ".extern FOO\nstop\n";
        let mut state = first_pass::run(text);
        let result = second_pass::run(text, &mut state);
        assert!(externals_file(&state, &result.externals).is_none());
    }

    #[test]
    fn externals_file_lists_use_sites() {
        let text = ".extern FOO\nmov FOO, @r2\n";
        let mut state = first_pass::run(text);
        let result = second_pass::run(text, &mut state);
        let out = externals_file(&state, &result.externals).unwrap();
        assert_eq!(out, "FOO\t101\n");
    }
}
