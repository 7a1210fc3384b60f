//! Tokens and the token type code space
//!
//! Token types share one integer code space split into bands:
//!
//! - `0..=255`: literal bytes
//! - `KEYWORD_START < code < KEYWORD_END`: keywords registered in a keyword
//!   table, with [`ID`] reserved at the top of the band for generic identifiers
//! - above `KEYWORD_END`: the character classes [`ALPHA`] and [`DIGIT`]

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lower bound (exclusive) of the keyword band
pub const KEYWORD_START: u32 = 2048;
/// Upper bound (exclusive) of the keyword band
pub const KEYWORD_END: u32 = KEYWORD_START + 2048;
/// Generic identifier code, inside the keyword band but never a keyword
pub const ID: u32 = KEYWORD_END - 1;
/// Single digit character class
pub const DIGIT: u32 = KEYWORD_END + 2;
/// Single letter character class
pub const ALPHA: u32 = KEYWORD_END + 3;

/// True if `code` may be registered as a keyword
pub fn is_keyword_code(code: u32) -> bool {
    code > KEYWORD_START && code < KEYWORD_END && code != ID
}

/// The type of a token, or of a token expected by [`Lexer::match_token`]
///
/// [`Lexer::match_token`]: crate::lexer::Lexer::match_token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenType {
    /// An exact byte
    Char(u8),
    /// A keyword code from the keyword band
    Keyword(u32),
    /// Any identifier run
    Id,
    /// One ASCII letter
    Alpha,
    /// One ASCII digit
    Digit,
}

impl TokenType {
    /// Keyword token type for `code`
    ///
    /// # Panics
    ///
    /// Panics if `code` is outside the keyword band or equal to [`ID`].
    pub fn keyword(code: u32) -> Self {
        assert!(
            is_keyword_code(code),
            "keyword code {} outside the keyword band ({}, {})",
            code,
            KEYWORD_START,
            KEYWORD_END
        );
        TokenType::Keyword(code)
    }

    /// Map a raw code back to a token type
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            c if c <= u8::MAX as u32 => Some(TokenType::Char(c as u8)),
            ID => Some(TokenType::Id),
            ALPHA => Some(TokenType::Alpha),
            DIGIT => Some(TokenType::Digit),
            c if is_keyword_code(c) => Some(TokenType::Keyword(c)),
            _ => None,
        }
    }

    /// The integer code of this token type
    pub fn code(&self) -> u32 {
        match self {
            TokenType::Char(b) => *b as u32,
            TokenType::Keyword(code) => *code,
            TokenType::Id => ID,
            TokenType::Alpha => ALPHA,
            TokenType::Digit => DIGIT,
        }
    }
}

impl From<u8> for TokenType {
    fn from(b: u8) -> Self {
        TokenType::Char(b)
    }
}

/// A matched piece of input and its type
///
/// For keywords the value keeps the casing found in the input, not the
/// registered spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    value: String,
    token_type: TokenType,
}

impl Token {
    /// Create a token
    pub fn new(value: impl Into<String>, token_type: TokenType) -> Self {
        Token {
            value: value.into(),
            token_type,
        }
    }

    /// The matched text
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The token type
    pub fn token_type(&self) -> TokenType {
        self.token_type
    }

    /// Consume the token, returning its text
    pub fn into_value(self) -> String {
        self.value
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tokenValue = {} / tokenType = {}", self.value, self.token_type.code())
    }
}
