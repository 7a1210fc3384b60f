//! Generic header parsing
//!
//! [`HeaderParser`] is the base the per-header grammars build on. It switches
//! the lexer to the header-name keyword table, so a concrete parser can
//! start with [`HeaderParser::header_name`] and then read its own fields,
//! usually finishing with [`HeaderParser::parameters`].
//!
//! Headers without a dedicated grammar go through [`HeaderParser::parse`],
//! which keeps the value as opaque text:
//!
//! ```
//! use rvoip_sip_lexer::parser::HeaderParser;
//!
//! let mut parser = HeaderParser::new("X-Custom-Header:  some opaque value\r\n");
//! let header = parser.parse().unwrap();
//! assert_eq!(header.name, "X-Custom-Header");
//! assert_eq!(header.value, "some opaque value");
//! ```

use std::fmt;

use bytes::Bytes;
use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::core_parser::CoreParser;
use crate::config::ParserConfig;
use crate::error::{Error, Result};
use crate::lexer::{Lexer, Token, TokenType};
use crate::types::NameValueList;

/// Keyword table holding the header names
pub const HEADER_KEYWORD_TABLE: &str = "command_keywordLexer";

/// Keyword codes for the header names known to [`HeaderParser`]
pub mod header_names {
    use crate::lexer::KEYWORD_START;

    pub const TO: u32 = KEYWORD_START + 1;
    pub const FROM: u32 = KEYWORD_START + 2;
    pub const VIA: u32 = KEYWORD_START + 3;
    pub const CALL_ID: u32 = KEYWORD_START + 4;
    pub const CSEQ: u32 = KEYWORD_START + 5;
    pub const CONTACT: u32 = KEYWORD_START + 6;
    pub const CONTENT_TYPE: u32 = KEYWORD_START + 7;
    pub const CONTENT_LENGTH: u32 = KEYWORD_START + 8;
    pub const CONTENT_LANGUAGE: u32 = KEYWORD_START + 9;
    pub const ACCEPT_ENCODING: u32 = KEYWORD_START + 10;
    pub const AUTHORIZATION: u32 = KEYWORD_START + 11;
    pub const WWW_AUTHENTICATE: u32 = KEYWORD_START + 12;
    pub const UNSUPPORTED: u32 = KEYWORD_START + 13;
    pub const REASON: u32 = KEYWORD_START + 14;
    pub const MAX_FORWARDS: u32 = KEYWORD_START + 15;
    pub const EXPIRES: u32 = KEYWORD_START + 16;
    pub const DATE: u32 = KEYWORD_START + 17;
}

const HEADER_NAMES: &[(&str, u32)] = &[
    ("To", header_names::TO),
    ("From", header_names::FROM),
    ("Via", header_names::VIA),
    ("Call-ID", header_names::CALL_ID),
    ("CSeq", header_names::CSEQ),
    ("Contact", header_names::CONTACT),
    ("Content-Type", header_names::CONTENT_TYPE),
    ("Content-Length", header_names::CONTENT_LENGTH),
    ("Content-Language", header_names::CONTENT_LANGUAGE),
    ("Accept-Encoding", header_names::ACCEPT_ENCODING),
    ("Authorization", header_names::AUTHORIZATION),
    ("WWW-Authenticate", header_names::WWW_AUTHENTICATE),
    ("Unsupported", header_names::UNSUPPORTED),
    ("Reason", header_names::REASON),
    ("Max-Forwards", header_names::MAX_FORWARDS),
    ("Expires", header_names::EXPIRES),
    ("Date", header_names::DATE),
];

/// Select the header-name table and register the known header names in it
pub fn register_header_names(lexer: &mut Lexer) {
    lexer.select_table(HEADER_KEYWORD_TABLE);
    for (spelling, code) in HEADER_NAMES {
        lexer.add_keyword(spelling, *code);
    }
}

/// A header kept as name and raw value text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionHeader {
    pub name: String,
    pub value: String,
}

impl ExtensionHeader {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        ExtensionHeader {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for ExtensionHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

/// Base parser for a single header line
#[derive(Debug, Clone)]
pub struct HeaderParser {
    core: CoreParser,
}

impl HeaderParser {
    pub fn new(header: impl Into<Bytes>) -> Self {
        Self::with_config(header, &ParserConfig::default())
    }

    pub fn with_config(header: impl Into<Bytes>, config: &ParserConfig) -> Self {
        let mut core = CoreParser::with_config(header, config);
        register_header_names(core.lexer_mut());
        HeaderParser { core }
    }

    /// Continue on a lexer handed over by another parser
    pub fn from_lexer(mut lexer: Lexer) -> Self {
        register_header_names(&mut lexer);
        HeaderParser {
            core: CoreParser::from_lexer(lexer),
        }
    }

    pub fn core(&self) -> &CoreParser {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut CoreParser {
        &mut self.core
    }

    pub fn into_lexer(self) -> Lexer {
        self.core.into_lexer()
    }

    /// Match the header name `code` and the colon after it
    ///
    /// Spaces and tabs are allowed on both sides of the colon. Returns the
    /// name as it was spelled in the input.
    pub fn header_name(&mut self, code: u32) -> Result<Token> {
        self.core.rule("headerName", |p| {
            let lexer = p.lexer_mut();
            let name = lexer.match_token(TokenType::keyword(code))?;
            lexer.skip_space_or_tab();
            lexer.match_token(TokenType::Char(b':'))?;
            lexer.skip_space_or_tab();
            Ok(name)
        })
    }

    /// Parse the header as an [`ExtensionHeader`]
    ///
    /// The name runs up to the first `:` and the value is the rest of the
    /// line; both are trimmed.
    pub fn parse(&mut self) -> Result<ExtensionHeader> {
        self.core.rule("parse", |p| {
            let lexer = p.lexer_mut();
            let name = lexer
                .cursor_mut()
                .next_token_by_delim(b':')
                .map_err(|_| Error::parse("header has no ':' after its name"))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(Error::parse("empty header name"));
            }
            lexer.consume(1);
            let value = lexer.rest_of_line();
            Ok(ExtensionHeader::new(name, value.trim()))
        })
    }

    /// Parse `*( SEMI name [ EQUAL value ] )`
    ///
    /// Stops, without consuming, at the first byte that does not start
    /// another parameter. Returns an empty list if there are none.
    pub fn parameters(&mut self) -> Result<NameValueList> {
        self.core.rule("parameters", |p| {
            let mut params = NameValueList::new();
            loop {
                p.lexer_mut().skip_space_or_tab();
                if p.lexer().lookahead(0).ok() != Some(b';') {
                    break;
                }
                p.lexer_mut().consume(1);
                p.lexer_mut().skip_space_or_tab();
                params.add(p.name_value(b'=')?);
            }
            Ok(params)
        })
    }

    /// Parse a three-letter weekday name, ignoring case
    pub fn wkday(&mut self) -> Result<Weekday> {
        self.core.rule("wkday", |p| {
            let lexer = p.lexer_mut();
            let position = lexer.position();
            let day = lexer.scan_identifier();
            match day.to_ascii_lowercase().as_str() {
                "mon" => Ok(Weekday::Mon),
                "tue" => Ok(Weekday::Tue),
                "wed" => Ok(Weekday::Wed),
                "thu" => Ok(Weekday::Thu),
                "fri" => Ok(Weekday::Fri),
                "sat" => Ok(Weekday::Sat),
                "sun" => Ok(Weekday::Sun),
                _ => Err(Error::parse(format!("bad wkday {:?} at position {}", day, position))),
            }
        })
    }
}
