//! # Table-switchable SIP lexer
//!
//! The [`Lexer`] is shared by every grammar in the crate. One instance holds
//! any number of named keyword tables and matches against whichever one is
//! selected, so the same scanning primitives serve host names, header names
//! and parameter lists inside a single buffer.
//!
//! ```
//! use rvoip_sip_lexer::lexer::{Lexer, TokenType, KEYWORD_START};
//!
//! const BYE: u32 = KEYWORD_START + 1;
//!
//! let mut lexer = Lexer::new("method_keywordLexer", "bye sip:bob@example.com");
//! lexer.add_keyword("BYE", BYE);
//!
//! let tok = lexer.match_token(TokenType::keyword(BYE)).unwrap();
//! assert_eq!(tok.value(), "bye");
//! lexer.skip_space_or_tab();
//! assert_eq!(lexer.match_token(TokenType::Id).unwrap().value(), "sip");
//! ```

mod cursor;
mod keywords;
mod token;

pub use cursor::{is_alpha, is_digit, is_hex_digit, Cursor};
pub use keywords::{KeywordTable, SymbolTable};
pub use token::{is_keyword_code, Token, TokenType, ALPHA, DIGIT, ID, KEYWORD_END, KEYWORD_START};

use std::collections::HashMap;

use bytes::Bytes;
use tracing::trace;

use crate::config::ParserConfig;
use crate::error::{Error, Result};

/// Bytes allowed in a SIP `token` (RFC 3261 Section 25.1)
pub fn is_id_char(ch: u8) -> bool {
    ch.is_ascii_alphanumeric()
        || matches!(ch, b'-' | b'.' | b'!' | b'%' | b'*' | b'_' | b'+' | b'`' | b'\'' | b'~')
}

/// Opaque snapshot of a lexer position, see [`Lexer::mark`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark(usize);

impl Mark {
    /// The buffer position this mark refers to
    pub fn position(&self) -> usize {
        self.0
    }
}

/// Lexical analyzer used by all parsers in the crate
#[derive(Debug, Clone)]
pub struct Lexer {
    cursor: Cursor,
    symbols: SymbolTable,
    tables: HashMap<String, KeywordTable>,
    table_name: String,
    current_match: Option<Token>,
    rewind_failed_keyword: bool,
    trace_rules: bool,
}

impl Lexer {
    /// Create a lexer over `buffer` with `table_name` as the active keyword table
    pub fn new(table_name: impl Into<String>, buffer: impl Into<Bytes>) -> Self {
        Lexer {
            cursor: Cursor::new(buffer),
            symbols: SymbolTable::new(),
            tables: HashMap::new(),
            table_name: table_name.into(),
            current_match: None,
            rewind_failed_keyword: true,
            trace_rules: false,
        }
    }

    /// Create a lexer configured from `config`
    pub fn with_config(buffer: impl Into<Bytes>, config: &ParserConfig) -> Self {
        let mut lexer = Self::new(config.initial_table.clone(), buffer);
        lexer.rewind_failed_keyword = config.rewind_failed_keyword;
        lexer.trace_rules = config.trace_rules;
        lexer
    }

    /// True if parsers driving this lexer trace their rules
    ///
    /// The setting travels with the lexer when it is handed from one parser
    /// to the next.
    pub fn trace_rules(&self) -> bool {
        self.trace_rules
    }

    pub fn set_trace_rules(&mut self, enabled: bool) {
        self.trace_rules = enabled;
    }


    /// Name of the active keyword table
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// The active keyword table, if any keyword has been registered in it
    pub fn current_table(&self) -> Option<&KeywordTable> {
        self.tables.get(&self.table_name)
    }

    /// True if a table named `name` exists
    pub fn has_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Register `spelling` as keyword `code` in the active table
    ///
    /// # Panics
    ///
    /// Panics if `code` lies outside the keyword band or is the generic
    /// [`ID`] code.
    pub fn add_keyword(&mut self, spelling: &str, code: u32) {
        assert!(
            is_keyword_code(code),
            "keyword {:?} registered with code {} outside the keyword band",
            spelling,
            code
        );
        self.tables
            .entry(self.table_name.clone())
            .or_default()
            .insert(spelling, code);
        self.symbols.register(code, spelling);
    }

    /// Select the table named `name`, creating it if needed
    pub fn add_table(&mut self, name: &str) -> &KeywordTable {
        self.table_name = name.to_string();
        self.tables.entry(name.to_string()).or_default()
    }

    /// Switch the active keyword table
    ///
    /// An unknown name selects an empty table; it is created on the first
    /// [`add_keyword`](Self::add_keyword).
    pub fn select_table(&mut self, name: &str) {
        self.table_name = name.to_string();
    }

    fn lookup_keyword(&self, spelling: &str) -> Option<u32> {
        self.current_table().and_then(|table| table.lookup(spelling))
    }

    /// Spelling of a keyword code for diagnostics
    ///
    /// Codes outside the keyword band, and unregistered keyword codes, are
    /// rendered as decimal numbers.
    pub fn lookup_token_name(&self, code: u32) -> String {
        if code > KEYWORD_START && code < KEYWORD_END {
            if let Some(name) = self.symbols.name(code) {
                return name.to_string();
            }
        }
        code.to_string()
    }

    fn describe(&self, expected: TokenType) -> String {
        match expected {
            TokenType::Char(ch) => format!("'{}'", ch as char),
            TokenType::Keyword(code) => self.lookup_token_name(code),
            TokenType::Id => "ID".to_string(),
            TokenType::Alpha => "ALPHA".to_string(),
            TokenType::Digit => "DIGIT".to_string(),
        }
    }


    /// The underlying cursor
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Mutable access to the underlying cursor
    pub fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    /// Index of the next unread byte
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// True while unread bytes remain
    pub fn has_more(&self) -> bool {
        self.cursor.has_more()
    }

    /// The byte `k` positions ahead, without consuming it
    pub fn lookahead(&self, k: usize) -> Result<u8> {
        self.cursor.lookahead(k)
    }

    /// Advance by `k` bytes
    pub fn consume(&mut self, k: usize) {
        self.cursor.consume(k)
    }

    /// Read and consume one byte
    pub fn next_byte(&mut self) -> Result<u8> {
        self.cursor.next_byte()
    }

    /// Consume through the end of the current line
    pub fn rest_of_line(&mut self) -> String {
        self.cursor.rest_of_line()
    }

    /// The current line, without consuming it
    pub fn peek_line(&mut self) -> String {
        self.cursor.peek_line()
    }

    /// The unparsed remainder of the buffer
    pub fn rest(&self) -> String {
        String::from_utf8_lossy(self.cursor.remaining()).into_owned()
    }

    /// Up to `n` bytes of lookahead as a string, without consuming them
    ///
    /// The cut is made in bytes, so a multi-byte UTF-8 character split at
    /// the end shows up as U+FFFD.
    pub fn n_chars(&self, n: usize) -> String {
        let start = self.position();
        let end = start.saturating_add(n).min(self.cursor.len());
        self.cursor.slice_to_string(start, end)
    }


    /// Snapshot the current position
    pub fn mark(&self) -> Mark {
        Mark(self.position())
    }

    /// Restore a position taken with [`mark`](Self::mark)
    pub fn rewind(&mut self, mark: Mark) {
        self.cursor.set_position(mark.0);
    }


    /// True if the next byte can start an identifier
    pub fn starts_id(&self) -> bool {
        matches!(self.cursor.peek(), Ok(ch) if is_id_char(ch))
    }

    fn scan_while(&mut self, accept: impl Fn(u8) -> bool) -> String {
        let start = self.position();
        while let Ok(ch) = self.cursor.peek() {
            if !accept(ch) {
                break;
            }
            self.cursor.consume(1);
        }
        self.cursor.slice_to_string(start, self.position())
    }

    /// Consume the longest identifier run at the cursor
    ///
    /// Returns an empty string, consuming nothing, if the next byte is not an
    /// identifier character.
    pub fn scan_identifier(&mut self) -> String {
        self.scan_while(is_id_char)
    }

    /// Like [`scan_identifier`](Self::scan_identifier) but spaces and tabs
    /// are part of the run
    pub fn scan_identifier_allowing_space(&mut self) -> String {
        self.scan_while(|ch| is_id_char(ch) || ch == b' ' || ch == b'\t')
    }

    /// Alias of [`scan_identifier`](Self::scan_identifier)
    pub fn next_id(&mut self) -> String {
        self.scan_identifier()
    }

    /// The next identifier, without consuming it
    ///
    /// The end of the identifier is recorded so that
    /// [`Cursor::consume_saved`] can commit it afterwards.
    pub fn peek_next_id(&mut self) -> String {
        let start = self.position();
        let id = self.scan_identifier();
        self.cursor.save_position();
        self.cursor.set_position(start);
        id
    }


    /// Last token produced by a successful [`match_token`](Self::match_token)
    pub fn current_match(&self) -> Option<&Token> {
        self.current_match.as_ref()
    }

    fn next_classified(&mut self) -> Option<Token> {
        if self.starts_id() {
            let id = self.scan_identifier();
            let token_type = match self.lookup_keyword(&id) {
                Some(code) => TokenType::Keyword(code),
                None => TokenType::Id,
            };
            return Some(Token::new(id, token_type));
        }
        let ch = self.cursor.next_byte().ok()?;
        Some(Token::new((ch as char).to_string(), TokenType::Char(ch)))
    }

    /// Look ahead up to `n` tokens without consuming input
    ///
    /// Fewer tokens are returned if the input ends first. The position after
    /// the last token is recorded for [`Cursor::consume_saved`].
    pub fn peek_tokens(&mut self, n: usize) -> Vec<Token> {
        let start = self.position();
        let mut tokens = Vec::with_capacity(n);
        for _ in 0..n {
            match self.next_classified() {
                Some(tok) => tokens.push(tok),
                None => break,
            }
        }
        self.cursor.save_position();
        self.cursor.set_position(start);
        tokens
    }

    /// Look ahead one token without consuming input
    pub fn peek_token(&mut self) -> Result<Token> {
        let position = self.position();
        self.peek_tokens(1)
            .into_iter()
            .next()
            .ok_or(Error::EndOfInput { position })
    }

    /// Match the expected token type at the cursor
    ///
    /// - [`TokenType::Id`] consumes one identifier run.
    /// - [`TokenType::Keyword`] consumes one identifier run and requires it to
    ///   map to the code in the active table, ignoring case. On failure the
    ///   cursor is restored unless the lexer was configured with
    ///   [`ParserConfig::with_legacy_keyword_consumption`].
    /// - [`TokenType::Alpha`], [`TokenType::Digit`] and [`TokenType::Char`]
    ///   consume exactly one byte on success and nothing on failure.
    pub fn match_token(&mut self, expected: TokenType) -> Result<Token> {
        let position = self.position();
        trace!(expected = %self.describe(expected), position, "match");

        let token = match expected {
            TokenType::Id => {
                if !self.starts_id() {
                    return Err(Error::IdExpected { position });
                }
                Token::new(self.scan_identifier(), TokenType::Id)
            }
            TokenType::Keyword(code) => {
                let id = self.scan_identifier();
                if self.lookup_keyword(&id) != Some(code) {
                    if self.rewind_failed_keyword {
                        self.cursor.set_position(position);
                    }
                    return Err(Error::UnexpectedToken {
                        expected: self.lookup_token_name(code),
                        found: id,
                        position,
                    });
                }
                Token::new(id, expected)
            }
            TokenType::Alpha => self.match_byte(expected, is_alpha)?,
            TokenType::Digit => self.match_byte(expected, is_digit)?,
            TokenType::Char(ch) => self.match_byte(expected, |b| b == ch)?,
        };

        self.current_match = Some(token.clone());
        Ok(token)
    }

    fn match_byte(&mut self, expected: TokenType, accept: impl Fn(u8) -> bool) -> Result<Token> {
        match self.cursor.peek() {
            Ok(ch) if accept(ch) => {
                self.cursor.consume(1);
                Ok(Token::new((ch as char).to_string(), expected))
            }
            other => Err(Error::UnexpectedChar {
                expected: self.describe(expected),
                found: other.ok().map(char::from),
                position: self.position(),
            }),
        }
    }

    /// Consume a run of spaces and tabs
    pub fn skip_space_or_tab(&mut self) {
        while let Ok(b' ' | b'\t') = self.cursor.peek() {
            self.cursor.consume(1);
        }
    }


    /// Consume bytes through an unescaped `close`, returning the bytes before it
    ///
    /// A backslash escapes the following byte; both are kept verbatim.
    fn escaped_until(&mut self, close: u8) -> Option<String> {
        let start = self.position();
        loop {
            match self.cursor.next_byte().ok()? {
                b'\\' => {
                    self.cursor.next_byte().ok()?;
                }
                ch if ch == close => {
                    return Some(self.cursor.slice_to_string(start, self.position() - 1));
                }
                _ => {}
            }
        }
    }

    fn expect_open(&mut self, open: u8) -> Result<usize> {
        let position = self.position();
        match self.cursor.peek() {
            Ok(ch) if ch == open => {
                self.cursor.consume(1);
                Ok(position)
            }
            other => Err(Error::UnexpectedChar {
                expected: format!("'{}'", open as char),
                found: other.ok().map(char::from),
                position,
            }),
        }
    }

    /// Read a double-quoted string starting at the cursor
    ///
    /// Escape sequences are kept as they appear in the input so the value
    /// re-encodes byte for byte. That holds for valid UTF-8 input only:
    /// invalid sequences inside the quotes are replaced with U+FFFD.
    pub fn quoted_string(&mut self) -> Result<String> {
        let start = self.expect_open(b'"')?;
        self.escaped_until(b'"')
            .ok_or(Error::UnterminatedQuotedString { start })
    }

    /// Read a parenthesized comment starting at the cursor
    ///
    /// Same escaping rules as [`quoted_string`](Self::quoted_string).
    pub fn comment(&mut self) -> Result<String> {
        let start = self.expect_open(b'(')?;
        self.escaped_until(b')')
            .ok_or(Error::UnterminatedComment { start })
    }

    /// Read up to an unescaped `delim` and consume it
    ///
    /// Unlike [`quoted_string`](Self::quoted_string), escapes are decoded: the
    /// backslash is dropped and the escaped byte kept. If the input ends first
    /// the cursor is restored and the call fails.
    pub fn string_until(&mut self, delim: u8) -> Result<String> {
        let start = self.position();
        let mut decoded = Vec::new();
        loop {
            let ch = match self.cursor.next_byte() {
                Ok(ch) => ch,
                Err(_) => break,
            };
            if ch == delim {
                return Ok(String::from_utf8_lossy(&decoded).into_owned());
            }
            if ch == b'\\' {
                match self.cursor.next_byte() {
                    Ok(escaped) => decoded.push(escaped),
                    Err(_) => break,
                }
            } else {
                decoded.push(ch);
            }
        }
        self.cursor.set_position(start);
        Err(Error::UnterminatedString {
            delimiter: delim as char,
            start,
        })
    }

    /// Consume up to, not including, a `;` or newline
    pub fn byte_string_no_semicolon(&mut self) -> String {
        self.scan_while(|ch| ch != b';' && ch != b'\n')
    }

    /// Consume up to, not including, a `,` or newline
    pub fn byte_string_no_comma(&mut self) -> String {
        self.scan_while(|ch| ch != b',' && ch != b'\n')
    }

    /// Consume a run of digits as a non-negative decimal number
    ///
    /// Fails without consuming if the cursor is not on a digit. A run too
    /// large for `u32` is consumed and reported as
    /// [`Error::NumberOutOfRange`].
    pub fn number(&mut self) -> Result<u32> {
        let position = self.position();
        match self.cursor.peek() {
            Ok(ch) if is_digit(ch) => {}
            other => {
                return Err(Error::UnexpectedChar {
                    expected: "DIGIT".to_string(),
                    found: other.ok().map(char::from),
                    position,
                })
            }
        }
        let digits = self.scan_while(is_digit);
        digits
            .parse::<u32>()
            .map_err(|_| Error::NumberOutOfRange { digits })
    }
}
