//! # rvoip-sip-lexer: SIP lexing and parsing engine
//!
//! The scanning layer under the rvoip SIP parsers. A single [`Lexer`] walks a
//! byte buffer and classifies tokens against named, switchable keyword
//! tables; the parsers in [`parser`] are hand-written recursive descent on
//! top of it and produce the ordered parameter lists in [`types`].
//!
//! ## Layers
//!
//! - [`lexer::Cursor`]: position, lookahead, line reads
//! - [`lexer::Lexer`]: keyword tables, token matching, quoted strings,
//!   comments, numbers, mark/rewind
//! - [`parser::CoreParser`]: rule tracing and `name[=value]` productions
//! - [`parser::HostNameParser`], [`parser::HeaderParser`]: grammars that
//!   switch tables on a shared lexer
//! - [`types::NameValue`], [`types::NameValueList`]: parsed parameters
//!
//! ## Usage
//!
//! ```rust
//! use rvoip_sip_lexer::prelude::*;
//!
//! let mut parser = CoreParser::new(";tag=abc123");
//! parser.lexer_mut().match_token(TokenType::Char(b';'))?;
//! let tag = parser.name_value(b'=')?;
//! assert_eq!(tag.value(), Some("abc123"));
//! assert_eq!(tag.to_string(), "tag=abc123");
//! # Ok::<(), rvoip_sip_lexer::Error>(())
//! ```
//!
//! Lexers and parsers are plain owned values with no shared state; use one
//! per buffer and per thread.

pub mod config;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod types;

pub use config::ParserConfig;
pub use error::{Error, Result};
pub use lexer::{Lexer, Token, TokenType};
pub use parser::{CoreParser, HeaderParser, HostNameParser};
pub use types::{Host, HostPort, NameValue, NameValueList};

/// Commonly used items
pub mod prelude {
    pub use crate::config::{ParserConfig, CHAR_LEXER};
    pub use crate::error::{Error, Result};
    pub use crate::lexer::{Lexer, Mark, Token, TokenType, KEYWORD_START};
    pub use crate::parser::{CoreParser, ExtensionHeader, HeaderParser, HostNameParser};
    pub use crate::types::{Host, HostKind, HostPort, NameValue, NameValueList};
}
