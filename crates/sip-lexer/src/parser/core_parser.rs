// Generic parser base shared by the host and header grammars.
//
// generic-param  =  token [ EQUAL gen-value ]
// gen-value      =  token / host / quoted-string
// (RFC 3261 Section 25.1; host values are read as tokens here)

use bytes::Bytes;
use tracing::{debug, trace};

use crate::config::ParserConfig;
use crate::error::Result;
use crate::lexer::{Lexer, TokenType};
use crate::types::{NameValue, NameValueList};

/// Parser base wrapping a [`Lexer`]
///
/// Grammar productions are written as functions over `&mut CoreParser` and
/// run through [`rule`](Self::rule), which keeps track of nesting depth for
/// trace output.
#[derive(Debug, Clone)]
pub struct CoreParser {
    lexer: Lexer,
    nesting_level: usize,
}

impl CoreParser {
    /// Create a parser over `buffer` with the default configuration
    pub fn new(buffer: impl Into<Bytes>) -> Self {
        Self::with_config(buffer, &ParserConfig::default())
    }

    /// Create a parser over `buffer` configured from `config`
    pub fn with_config(buffer: impl Into<Bytes>, config: &ParserConfig) -> Self {
        CoreParser {
            lexer: Lexer::with_config(buffer, config),
            nesting_level: 0,
        }
    }

    /// Continue parsing with an existing lexer, keeping its position, tables
    /// and rule tracing setting
    pub fn from_lexer(lexer: Lexer) -> Self {
        CoreParser {
            lexer,
            nesting_level: 0,
        }
    }

    pub fn lexer(&self) -> &Lexer {
        &self.lexer
    }

    pub fn lexer_mut(&mut self) -> &mut Lexer {
        &mut self.lexer
    }

    /// Give the lexer back, e.g. to hand it to the next parser
    pub fn into_lexer(self) -> Lexer {
        self.lexer
    }

    pub fn set_rule_tracing(&mut self, enabled: bool) {
        self.lexer.set_trace_rules(enabled);
    }

    /// Current rule nesting depth
    pub fn nesting_level(&self) -> usize {
        self.nesting_level
    }

    pub fn enter(&mut self, rule: &str) {
        if self.lexer.trace_rules() {
            trace!("{}{} lexer buffer = {:?}", ">".repeat(self.nesting_level), rule, self.lexer.rest());
        }
        self.nesting_level += 1;
    }

    pub fn leave(&mut self, rule: &str) {
        if self.lexer.trace_rules() {
            trace!("{}{} lexer buffer = {:?}", "<".repeat(self.nesting_level), rule, self.lexer.rest());
        }
        self.nesting_level = self.nesting_level.saturating_sub(1);
    }

    /// Run a production between [`enter`](Self::enter) and [`leave`](Self::leave)
    pub fn rule<T>(&mut self, name: &str, production: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.enter(name);
        let result = production(self);
        self.leave(name);
        result
    }

    /// Log the line about to be parsed by `rule`
    pub fn peek_line(&mut self, rule: &str) {
        if self.lexer.trace_rules() {
            let line = self.lexer.peek_line();
            debug!("{} {:?}", rule, line);
        }
    }

    /// Parse `name [separator value]`
    ///
    /// The value is either a quoted string, kept verbatim and flagged as
    /// quoted, or an identifier. Without the separator the value is absent.
    pub fn name_value(&mut self, separator: u8) -> Result<NameValue> {
        self.rule("nameValue", |p| {
            let name = p.lexer.match_token(TokenType::Id)?.into_value();
            p.lexer.skip_space_or_tab();

            if p.lexer.lookahead(0).ok() != Some(separator) {
                return Ok(NameValue::flag(name).with_separator((separator as char).to_string()));
            }
            p.lexer.consume(1);
            p.lexer.skip_space_or_tab();

            let nv = if p.lexer.lookahead(0).ok() == Some(b'"') {
                NameValue::new(name, Some(p.lexer.quoted_string()?)).quoted()
            } else {
                let value = p.lexer.match_token(TokenType::Id)?.into_value();
                NameValue::new(name, Some(value))
            };
            Ok(nv.with_separator((separator as char).to_string()))
        })
    }

    /// Parse one or more [`name_value`](Self::name_value) entries separated
    /// by `list_separator`
    pub fn name_value_list(&mut self, separator: u8, list_separator: u8) -> Result<NameValueList> {
        self.rule("nameValueList", |p| {
            let mut list = NameValueList::with_separator((list_separator as char).to_string());
            loop {
                p.lexer.skip_space_or_tab();
                list.add(p.name_value(separator)?);
                p.lexer.skip_space_or_tab();
                match p.lexer.lookahead(0) {
                    Ok(ch) if ch == list_separator => p.lexer.consume(1),
                    _ => break,
                }
            }
            Ok(list)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_name_value_token() {
        let mut parser = CoreParser::new("tag=abc123");
        let nv = parser.name_value(b'=').unwrap();
        assert_eq!(nv.name(), "tag");
        assert_eq!(nv.value(), Some("abc123"));
        assert!(!nv.is_value_quoted());
        assert_eq!(nv.to_string(), "tag=abc123");
    }

    #[test]
    fn test_name_value_quoted() {
        let mut parser = CoreParser::new("realm=\"example.com\"");
        let nv = parser.name_value(b'=').unwrap();
        assert_eq!(nv.value(), Some("example.com"));
        assert!(nv.is_value_quoted());
        assert_eq!(nv.to_string(), "realm=\"example.com\"");
    }

    #[test]
    fn test_name_value_whitespace_and_flag() {
        let mut parser = CoreParser::new("nonce \t= xyz");
        assert_eq!(parser.name_value(b'=').unwrap().value(), Some("xyz"));

        let mut parser = CoreParser::new("lr;transport=tcp");
        let nv = parser.name_value(b'=').unwrap();
        assert_eq!(nv.value(), None);
        assert_eq!(nv.to_string(), "lr");
        assert_eq!(parser.lexer().rest(), ";transport=tcp");
    }

    #[test]
    fn test_name_value_other_separator() {
        let mut parser = CoreParser::new("user:alice");
        let nv = parser.name_value(b':').unwrap();
        assert_eq!(nv.to_string(), "user:alice");
    }

    #[test]
    fn test_name_value_failures() {
        let mut parser = CoreParser::new(";tag=1");
        assert_eq!(parser.name_value(b'='), Err(Error::IdExpected { position: 0 }));

        let mut parser = CoreParser::new("tag=");
        assert!(parser.name_value(b'=').is_err());

        let mut parser = CoreParser::new("reason=\"unterminated");
        assert_eq!(
            parser.name_value(b'='),
            Err(Error::UnterminatedQuotedString { start: 7 })
        );
    }

    #[test]
    fn test_name_value_list() {
        let mut parser = CoreParser::new("username=\"bob\", nonce=abc , stale");
        let list = parser.name_value_list(b'=', b',').unwrap();
        assert_eq!(list.names(), vec!["username", "nonce", "stale"]);
        assert_eq!(list.to_string(), "username=\"bob\",nonce=abc,stale");
    }

    #[test]
    fn test_rule_nesting_restored_on_error() {
        let mut parser = CoreParser::with_config("=oops", &ParserConfig::new().with_rule_tracing());
        assert!(parser.name_value_list(b'=', b';').is_err());
        assert_eq!(parser.nesting_level(), 0);

        let depth = parser.rule("outer", |p| p.rule("inner", |p| Ok(p.nesting_level())));
        assert_eq!(depth, Ok(2));
    }

    #[test]
    fn test_rule_tracing_survives_lexer_handoff() {
        let parser = CoreParser::with_config("lr", &ParserConfig::new().with_rule_tracing());
        let mut next = CoreParser::from_lexer(parser.into_lexer());
        assert!(next.lexer().trace_rules());

        next.set_rule_tracing(false);
        let last = CoreParser::from_lexer(next.into_lexer());
        assert!(!last.lexer().trace_rules());
    }
}
