//! # Symbol table
//!
//! Insertion-ordered mapping from label name to address and kind, shared by
//! the first and second pass. A single `Vec` plus linear scan is the right
//! tool here: programs in this dialect have at most a few dozen labels, so a
//! hash index would buy nothing but complexity.

/// What a symbol was defined as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Data,
    Code,
    External,
    Entry,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub address: u16,
    pub kind: SymbolKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateLabel;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryNotFound;

#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: Vec<Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new symbol. Fails if a symbol with this name already exists,
    /// covering the "External inserted twice" case along with ordinary
    /// label/label and label/extern collisions (§4.2).
    pub fn insert(&mut self, name: &str, address: u16, kind: SymbolKind) -> Result<(), DuplicateLabel> {
        if self.lookup(name).is_some() {
            return Err(DuplicateLabel);
        }
        self.entries.push(Symbol {
            name: name.to_string(),
            address,
            kind,
        });
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.entries.iter().find(|s| s.name == name)
    }

    /// Promote a previously-defined symbol to `Entry`, preserving its
    /// address. Fails if the name was never defined, or if it was defined as
    /// `External` — the two kinds are mutually exclusive (§3 invariant (v)).
    pub fn mark_entry(&mut self, name: &str) -> Result<(), EntryNotFound> {
        match self.entries.iter_mut().find(|s| s.name == name) {
            Some(sym) if sym.kind != SymbolKind::External => {
                sym.kind = SymbolKind::Entry;
                Ok(())
            }
            _ => Err(EntryNotFound),
        }
    }

    /// Add `ic_final` to every `Data` symbol's recorded address. Called
    /// exactly once, at the end of the first pass, only when no errors
    /// occurred — data addresses were recorded relative to DC, and DC-space
    /// sits right after the final instruction image.
    pub fn relocate_data(&mut self, ic_final: u16) {
        for sym in self.entries.iter_mut() {
            if sym.kind == SymbolKind::Data {
                sym.address += ic_final;
            }
        }
    }

    /// Insertion order, so `.ent`/`.ext` output is deterministic.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.entries.iter()
    }
}
