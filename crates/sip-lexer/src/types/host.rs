//! Host names and `host[:port]` pairs
//!
//! These are the value objects produced by
//! [`HostNameParser`](crate::parser::HostNameParser).

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::parser::HostNameParser;

/// How a host string is classified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostKind {
    /// A DNS name (e.g., "atlanta.example.com")
    HostName,
    /// A dotted IPv4 address
    Ipv4Address,
    /// An IPv6 address, with or without brackets
    Ipv6Address,
}

/// A host as it appears in a SIP URI or Via header
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Host {
    hostname: String,
    kind: HostKind,
}

impl Host {
    /// Create a host, classifying the text
    ///
    /// Anything containing a `:` is taken to be IPv6; text that parses as an
    /// IPv4 address is IPv4; everything else is a host name.
    pub fn new(hostname: impl Into<String>) -> Self {
        let hostname = hostname.into().trim().to_string();
        let kind = if hostname.contains(':') {
            HostKind::Ipv6Address
        } else if hostname.parse::<Ipv4Addr>().is_ok() {
            HostKind::Ipv4Address
        } else {
            HostKind::HostName
        };
        Host { hostname, kind }
    }

    /// The host text as parsed
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// The classification of the host text
    pub fn kind(&self) -> HostKind {
        self.kind
    }

    /// True for DNS names
    pub fn is_host_name(&self) -> bool {
        self.kind == HostKind::HostName
    }

    /// True for IPv4 and IPv6 addresses
    pub fn is_ip_address(&self) -> bool {
        self.kind != HostKind::HostName
    }

    /// The address, for IP hosts
    pub fn ip_addr(&self) -> Option<IpAddr> {
        if !self.is_ip_address() {
            return None;
        }
        self.hostname
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse()
            .ok()
    }

    fn is_ipv6_reference(&self) -> bool {
        self.hostname.starts_with('[') && self.hostname.ends_with(']')
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind == HostKind::Ipv6Address && !self.is_ipv6_reference() {
            write!(f, "[{}]", self.hostname)
        } else {
            write!(f, "{}", self.hostname)
        }
    }
}

impl FromStr for Host {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parser = HostNameParser::new(s.to_string());
        let host = parser.host()?;
        reject_trailing(&parser, "host")?;
        Ok(host)
    }
}

/// A host with an optional port
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostPort {
    host: Host,
    port: Option<u16>,
}

impl HostPort {
    /// Create a host/port pair
    pub fn new(host: Host, port: Option<u16>) -> Self {
        HostPort { host, port }
    }

    /// The host part
    pub fn host(&self) -> &Host {
        &self.host
    }

    /// The port, if one was given
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// True if a port was given
    pub fn has_port(&self) -> bool {
        self.port.is_some()
    }

    /// Set the port
    pub fn set_port(&mut self, port: u16) {
        self.port = Some(port);
    }

    /// Drop the port
    pub fn remove_port(&mut self) {
        self.port = None;
    }

    /// Set the host part
    pub fn set_host(&mut self, host: Host) {
        self.host = host;
    }
}

impl fmt::Display for HostPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{}", port)?;
        }
        Ok(())
    }
}

impl FromStr for HostPort {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parser = HostNameParser::new(s.to_string());
        let host_port = parser.host_port()?;
        reject_trailing(&parser, "host:port")?;
        Ok(host_port)
    }
}

fn reject_trailing(parser: &HostNameParser, what: &str) -> Result<()> {
    let lexer = parser.core().lexer();
    if lexer.has_more() {
        return Err(Error::parse(format!("trailing input in {}: {:?}", what, lexer.rest())));
    }
    Ok(())
}
