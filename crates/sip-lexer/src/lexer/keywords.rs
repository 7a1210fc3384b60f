//! Keyword tables
//!
//! A [`KeywordTable`] maps keyword spellings to codes for one grammar context.
//! The [`SymbolTable`] maps codes back to a readable spelling for diagnostics,
//! whichever table registered them.

use std::collections::HashMap;

use super::token::is_keyword_code;

/// Keyword spelling to code mapping for one lexer context
///
/// Lookups are case-insensitive: keys are stored upper-cased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordTable {
    entries: HashMap<String, u32>,
}

impl KeywordTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `spelling` as keyword `code`, replacing any previous code
    pub(crate) fn insert(&mut self, spelling: &str, code: u32) {
        self.entries.insert(spelling.to_ascii_uppercase(), code);
    }

    /// Code registered for `spelling`, in any casing
    pub fn lookup(&self, spelling: &str) -> Option<u32> {
        self.entries.get(&spelling.to_ascii_uppercase()).copied()
    }

    /// True if `spelling` is a keyword of this table
    pub fn contains(&self, spelling: &str) -> bool {
        self.lookup(spelling).is_some()
    }

    /// Number of keywords
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no keyword is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Code to canonical spelling mapping, first registration wins
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    names: HashMap<u32, String>,
}

impl SymbolTable {
    /// Create an empty symbol table
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `spelling` for `code` unless the code already has one
    pub fn register(&mut self, code: u32, spelling: &str) {
        debug_assert!(is_keyword_code(code));
        self.names.entry(code).or_insert_with(|| spelling.to_string());
    }

    /// Canonical spelling of `code`
    pub fn name(&self, code: u32) -> Option<&str> {
        self.names.get(&code).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::token::KEYWORD_START;

    #[test]
    fn test_case_insensitive_lookup() {
        let mut table = KeywordTable::new();
        table.insert("Bye", KEYWORD_START + 1);
        assert_eq!(table.lookup("BYE"), Some(KEYWORD_START + 1));
        assert_eq!(table.lookup("bye"), Some(KEYWORD_START + 1));
        assert_eq!(table.lookup("byes"), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_symbol_first_registration_wins() {
        let mut symbols = SymbolTable::new();
        symbols.register(KEYWORD_START + 2, "Via");
        symbols.register(KEYWORD_START + 2, "v");
        assert_eq!(symbols.name(KEYWORD_START + 2), Some("Via"));
        assert_eq!(symbols.name(KEYWORD_START + 3), None);
    }
}
