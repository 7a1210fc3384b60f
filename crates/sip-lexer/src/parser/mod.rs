//! Recursive-descent parsers built on the [`Lexer`](crate::lexer::Lexer)
//!
//! [`CoreParser`] holds the lexer and the shared productions
//! (`name[=value]` and lists of them). The grammar-specific parsers wrap a
//! `CoreParser` and select their own keyword table; a lexer can be passed
//! from one parser to the next with `into_lexer`/`from_lexer` to continue in
//! the same buffer.

pub mod core_parser;
pub mod header;
pub mod host;

pub use core_parser::CoreParser;
pub use header::{header_names, register_header_names, ExtensionHeader, HeaderParser, HEADER_KEYWORD_TABLE};
pub use host::HostNameParser;
