//! # SIP name/value pairs
//!
//! [`NameValue`] is the building block of every SIP parameter grammar: the
//! `tag=1928301774` in a From header, the `realm="atlanta.com"` in a digest
//! challenge, or a bare flag such as `lr`.
//!
//! A value is either absent or present, and an absent value is different from
//! an empty one: `lr` and `lr=` are distinct encodings.
//!
//! ## Examples
//!
//! ```rust
//! use rvoip_sip_lexer::types::NameValue;
//!
//! let tag = NameValue::new("tag", Some("1928301774"));
//! assert_eq!(tag.to_string(), "tag=1928301774");
//!
//! let realm = NameValue::new("realm", Some("atlanta.com")).quoted();
//! assert_eq!(realm.to_string(), "realm=\"atlanta.com\"");
//!
//! let lr = NameValue::flag("lr");
//! assert_eq!(lr.to_string(), "lr");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default separator between a name and its value
pub const EQUALS: &str = "=";

/// A name and an optional value, rendered as `name=value`
///
/// The name may be empty, in which case only the value is rendered. Quoted
/// values are rendered inside double quotes exactly as stored; escape
/// sequences in the stored value are not altered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NameValue {
    name: String,
    value: Option<String>,
    separator: String,
    quoted: bool,
}

impl NameValue {
    /// Creates a name/value pair with the default `=` separator.
    ///
    /// # Parameters
    ///
    /// - `name`: The parameter name, possibly empty
    /// - `value`: The value, or `None` for a flag parameter
    ///
    /// # Examples
    ///
    /// ```
    /// use rvoip_sip_lexer::types::NameValue;
    ///
    /// let nv = NameValue::new("transport", Some("tcp"));
    /// assert_eq!(nv.name(), "transport");
    /// assert_eq!(nv.value(), Some("tcp"));
    /// ```
    pub fn new(name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        NameValue {
            name: name.into(),
            value: value.map(Into::into),
            separator: EQUALS.to_string(),
            quoted: false,
        }
    }

    /// Creates a parameter with no value, such as `lr`.
    pub fn flag(name: impl Into<String>) -> Self {
        Self::new(name, None::<String>)
    }

    /// Marks the value as double-quoted, builder style.
    pub fn quoted(mut self) -> Self {
        self.quoted = true;
        self
    }

    /// Uses `separator` between name and value, builder style.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvoip_sip_lexer::types::NameValue;
    ///
    /// let nv = NameValue::new("user", Some("alice")).with_separator(":");
    /// assert_eq!(nv.to_string(), "user:alice");
    /// ```
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Returns the name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value, `None` when absent.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Returns the separator used when rendering.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Returns `true` if the value is rendered inside double quotes.
    pub fn is_value_quoted(&self) -> bool {
        self.quoted
    }

    /// Sets the name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Sets or clears the value.
    pub fn set_value(&mut self, value: Option<impl Into<String>>) {
        self.value = value.map(Into::into);
    }

    /// Sets the separator used when rendering.
    pub fn set_separator(&mut self, separator: impl Into<String>) {
        self.separator = separator.into();
    }

    /// Sets whether the value is rendered inside double quotes.
    pub fn set_quoted(&mut self, quoted: bool) {
        self.quoted = quoted;
    }
}

impl fmt::Display for NameValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quote = if self.quoted { "\"" } else { "" };
        match (&self.value, self.name.is_empty()) {
            (Some(value), false) => write!(f, "{}{}{}{}{}", self.name, self.separator, quote, value, quote),
            (Some(value), true) => write!(f, "{}{}{}", quote, value, quote),
            (None, false) => write!(f, "{}", self.name),
            (None, true) => Ok(()),
        }
    }
}
