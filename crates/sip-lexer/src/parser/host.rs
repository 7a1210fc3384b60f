// Host name grammar (RFC 3261 Section 25.1)
//
// hostport       =  host [ ":" port ]
// host           =  hostname / IPv4address / IPv6reference
// hostname       =  *( domainlabel "." ) toplabel [ "." ]
// domainlabel    =  alphanum / alphanum *( alphanum / "-" ) alphanum
// IPv6reference  =  "[" IPv6address "]"
//
// Labels are scanned leniently (any mix of alphanum and "-"); the resulting
// text is classified by Host::new.

use bytes::Bytes;

use super::core_parser::CoreParser;
use crate::config::{ParserConfig, CHAR_LEXER};
use crate::error::{Error, Result};
use crate::lexer::{is_alpha, is_digit, is_hex_digit, Lexer};
use crate::types::{Host, HostPort};

/// Parser for host names and `host[:port]`
#[derive(Debug, Clone)]
pub struct HostNameParser {
    core: CoreParser,
}

impl HostNameParser {
    pub fn new(hostname: impl Into<Bytes>) -> Self {
        Self::with_config(hostname, &ParserConfig::default())
    }

    pub fn with_config(hostname: impl Into<Bytes>, config: &ParserConfig) -> Self {
        let mut core = CoreParser::with_config(hostname, config);
        core.lexer_mut().select_table(CHAR_LEXER);
        HostNameParser { core }
    }

    /// Continue on an existing lexer, switching it to the character table
    pub fn from_lexer(mut lexer: Lexer) -> Self {
        lexer.select_table(CHAR_LEXER);
        HostNameParser {
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

    pub fn domain_label(&mut self) -> Result<String> {
        self.core.rule("domainLabel", domain_label)
    }

    pub fn ipv6_reference(&mut self) -> Result<String> {
        self.core.rule("ipv6Reference", ipv6_reference)
    }

    pub fn host(&mut self) -> Result<Host> {
        self.core.rule("host", host)
    }

    pub fn host_port(&mut self) -> Result<HostPort> {
        self.core.rule("hostPort", |p| {
            let host = host(p)?;
            let lexer = p.lexer_mut();
            if lexer.lookahead(0).ok() != Some(b':') {
                return Ok(HostPort::new(host, None));
            }
            lexer.consume(1);
            let port = lexer.number()?;
            let port = u16::try_from(port).map_err(|_| Error::NumberOutOfRange {
                digits: port.to_string(),
            })?;
            Ok(HostPort::new(host, Some(port)))
        })
    }
}

fn domain_label(p: &mut CoreParser) -> Result<String> {
    let lexer = p.lexer_mut();
    let start = lexer.position();
    while let Ok(ch) = lexer.lookahead(0) {
        if !(is_alpha(ch) || is_digit(ch) || ch == b'-') {
            break;
        }
        lexer.consume(1);
    }
    Ok(lexer.cursor().slice_to_string(start, lexer.position()))
}

fn ipv6_reference(p: &mut CoreParser) -> Result<String> {
    let lexer = p.lexer_mut();
    let start = lexer.position();
    while let Ok(ch) = lexer.lookahead(0) {
        if is_hex_digit(ch) || matches!(ch, b'.' | b':' | b'[') {
            lexer.consume(1);
        } else if ch == b']' {
            lexer.consume(1);
            return Ok(lexer.cursor().slice_to_string(start, lexer.position()));
        } else {
            break;
        }
    }
    Err(Error::IllegalHostName { position: start })
}

fn host(p: &mut CoreParser) -> Result<Host> {
    let start = p.lexer().position();
    let hostname = if p.lexer().lookahead(0).ok() == Some(b'[') {
        p.rule("ipv6Reference", ipv6_reference)?
    } else {
        let mut name = p.rule("domainLabel", domain_label)?;
        while p.lexer().lookahead(0).ok() == Some(b'.') {
            p.lexer_mut().consume(1);
            name.push('.');
            name.push_str(&p.rule("domainLabel", domain_label)?);
        }
        name
    };

    if hostname.is_empty() {
        return Err(Error::IllegalHostName { position: start });
    }
    Ok(Host::new(hostname))
}
