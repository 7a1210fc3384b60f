//! Parser configuration
//!
//! [`ParserConfig`] carries the few knobs the engine exposes: rule tracing,
//! the recovery behavior of a failed keyword match, and the keyword table a
//! fresh lexer starts in.

use serde::{Deserialize, Serialize};

/// Name of the keyword table used by the character-level grammars
/// (host names, parameters).
pub const CHAR_LEXER: &str = "charLexer";

/// Configuration for a [`Lexer`](crate::lexer::Lexer) and the parsers built on it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Emit enter/leave trace events for every grammar rule
    pub trace_rules: bool,
    /// Restore the cursor when a keyword match fails
    pub rewind_failed_keyword: bool,
    /// Keyword table selected when a lexer is created
    pub initial_table: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            trace_rules: false,
            rewind_failed_keyword: true,
            initial_table: CHAR_LEXER.to_string(),
        }
    }
}

impl ParserConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable enter/leave tracing of grammar rules
    pub fn with_rule_tracing(mut self) -> Self {
        self.trace_rules = true;
        self
    }

    /// Leave the identifier consumed when a keyword match fails
    ///
    /// Callers that rely on this must take a mark before every keyword match
    /// they may want to abandon.
    pub fn with_legacy_keyword_consumption(mut self) -> Self {
        self.rewind_failed_keyword = false;
        self
    }

    /// Start lexers in the given keyword table
    pub fn with_initial_table(mut self, name: impl Into<String>) -> Self {
        self.initial_table = name.into();
        self
    }
}
