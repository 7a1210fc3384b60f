//! Error handling for the lexer and parser core
//!
//! Every failure raised by the engine is an ordinary, recoverable outcome of
//! trying one grammar alternative. Callers either rewind to a mark and try
//! another production, or propagate the error further up.

use thiserror::Error;

/// Result type alias for lexer and parser operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while tokenizing or parsing SIP text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A read went past the end of the buffer
    #[error("End of input at position {position}")]
    EndOfInput { position: usize },

    /// A generic identifier was requested but none starts here
    #[error("ID expected at position {position}")]
    IdExpected { position: usize },

    /// The identifier at the cursor is not the requested keyword
    #[error("Unexpected token {found:?} at position {position} (expected {expected})")]
    UnexpectedToken {
        expected: String,
        found: String,
        position: usize,
    },

    /// A literal byte or character class did not match
    #[error("Expecting {expected} at position {position}, found {}", describe_found(.found))]
    UnexpectedChar {
        expected: String,
        found: Option<char>,
        position: usize,
    },

    /// A double-quoted string ran off the end of the buffer
    #[error("Unterminated quoted string starting at position {start}")]
    UnterminatedQuotedString { start: usize },

    /// A parenthesized comment ran off the end of the buffer
    #[error("Unterminated comment starting at position {start}")]
    UnterminatedComment { start: usize },

    /// No delimiter was found before the end of the buffer
    #[error("Missing delimiter {delimiter:?} after position {start}")]
    UnterminatedString { delimiter: char, start: usize },

    /// A digit run does not fit the requested integer type
    #[error("Number out of range: {digits}")]
    NumberOutOfRange { digits: String },

    /// Host name grammar failure
    #[error("Illegal host name at position {position}")]
    IllegalHostName { position: usize },

    /// Free-form grammar failure raised by header parsers
    #[error("Parse error: {0}")]
    Parse(String),
}

fn describe_found(found: &Option<char>) -> String {
    match found {
        Some(c) => format!("{:?}", c),
        None => "end of input".to_string(),
    }
}

impl Error {
    /// Create a free-form parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// The buffer position the error refers to, when it carries one
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::EndOfInput { position }
            | Self::IdExpected { position }
            | Self::UnexpectedToken { position, .. }
            | Self::UnexpectedChar { position, .. }
            | Self::IllegalHostName { position } => Some(*position),
            Self::UnterminatedQuotedString { start }
            | Self::UnterminatedComment { start }
            | Self::UnterminatedString { start, .. } => Some(*start),
            Self::NumberOutOfRange { .. } | Self::Parse(_) => None,
        }
    }

    /// True when the failure was caused by running out of input
    ///
    /// Callers commonly use this as a loop-termination signal rather than as
    /// a real error.
    pub fn is_end_of_input(&self) -> bool {
        matches!(
            self,
            Self::EndOfInput { .. } | Self::UnexpectedChar { found: None, .. }
        )
    }
}
