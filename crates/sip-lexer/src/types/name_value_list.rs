//! # Ordered SIP parameter lists
//!
//! [`NameValueList`] holds the `;name=value` parameters of a header or URI in
//! the order they were parsed. Lookups are linear and the first match wins;
//! parameter lists are short and their order is observable when re-encoding,
//! so a hash map would be the wrong structure here.
//!
//! ## Examples
//!
//! ```rust
//! use rvoip_sip_lexer::types::NameValueList;
//!
//! let mut params = NameValueList::new();
//! params.add_name_and_value("transport", Some("tcp"));
//! params.add_name_and_value("lr", None::<&str>);
//! assert_eq!(params.to_string(), "transport=tcp;lr");
//!
//! // Replacing a parameter moves it to the end
//! params.set_name_and_value("transport", Some("tls"));
//! assert_eq!(params.to_string(), "lr;transport=tls");
//!
//! let parsed: NameValueList = "transport=tcp;lr".parse().unwrap();
//! assert_eq!(parsed.get_value("transport"), Some("tcp"));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::name_value::NameValue;
use crate::error::{Error, Result};
use crate::parser::CoreParser;

/// Default separator between list elements
pub const SEMICOLON: &str = ";";

/// An ordered, name-keyed list of [`NameValue`] entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameValueList {
    entries: Vec<NameValue>,
    separator: String,
}

impl Default for NameValueList {
    fn default() -> Self {
        NameValueList {
            entries: Vec::new(),
            separator: SEMICOLON.to_string(),
        }
    }
}

impl NameValueList {
    /// Creates an empty list rendered with `;` between elements.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty list rendered with `separator` between elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvoip_sip_lexer::types::NameValueList;
    ///
    /// let mut list = NameValueList::with_separator(",");
    /// list.add_name_and_value("username", Some("bob"));
    /// list.add_name_and_value("nonce", Some("xyz"));
    /// assert_eq!(list.to_string(), "username=bob,nonce=xyz");
    /// ```
    pub fn with_separator(separator: impl Into<String>) -> Self {
        NameValueList {
            entries: Vec::new(),
            separator: separator.into(),
        }
    }

    /// Returns the separator used when rendering.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Sets the separator used when rendering.
    pub fn set_separator(&mut self, separator: impl Into<String>) {
        self.separator = separator.into();
    }

    /// Appends an entry.
    pub fn add(&mut self, nv: NameValue) {
        self.entries.push(nv);
    }

    /// Appends a new entry built from `name` and `value`.
    pub fn add_name_and_value(&mut self, name: impl Into<String>, value: Option<impl Into<String>>) {
        self.add(NameValue::new(name, value));
    }

    /// Replaces every entry named like `nv` with `nv`, appended at the end.
    ///
    /// Name comparison is case-sensitive.
    pub fn set(&mut self, nv: NameValue) {
        self.entries.retain(|existing| existing.name() != nv.name());
        self.entries.push(nv);
    }

    /// Replaces every entry named `name` with a new entry at the end.
    pub fn set_name_and_value(&mut self, name: impl Into<String>, value: Option<impl Into<String>>) {
        self.set(NameValue::new(name, value));
    }

    /// Returns the first entry named `name`.
    pub fn get(&self, name: &str) -> Option<&NameValue> {
        self.entries.iter().find(|nv| nv.name() == name)
    }

    /// Returns a mutable reference to the first entry named `name`.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut NameValue> {
        self.entries.iter_mut().find(|nv| nv.name() == name)
    }

    /// Returns the value of the first entry named `name`.
    ///
    /// `None` covers both a missing entry and a flag entry without value; use
    /// [`has`](Self::has) to tell them apart.
    pub fn get_value(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(NameValue::value)
    }

    /// Returns the value of `name`, or an empty string.
    pub fn get_parameter(&self, name: &str) -> &str {
        self.get_value(name).unwrap_or("")
    }

    /// Returns `true` if an entry named `name` exists.
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Removes the first entry named `name`.
    ///
    /// # Returns
    ///
    /// `true` if an entry was removed
    pub fn remove(&mut self, name: &str) -> bool {
        match self.entries.iter().position(|nv| nv.name() == name) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Splices the entries of `other` into this list, keeping their order.
    ///
    /// # Parameters
    ///
    /// - `other`: The list to copy entries from
    /// - `at_front`: Insert before the current first entry instead of after
    ///   the last one
    ///
    /// # Examples
    ///
    /// ```
    /// use rvoip_sip_lexer::types::NameValueList;
    ///
    /// let mut list: NameValueList = "c=3".parse().unwrap();
    /// let head: NameValueList = "a=1;b=2".parse().unwrap();
    /// list.concatenate(&head, true);
    /// assert_eq!(list.to_string(), "a=1;b=2;c=3");
    /// ```
    pub fn concatenate(&mut self, other: &NameValueList, at_front: bool) {
        if other.is_empty() {
            return;
        }
        if at_front {
            self.entries.splice(0..0, other.entries.iter().cloned());
        } else {
            self.entries.extend(other.entries.iter().cloned());
        }
    }

    /// Returns the entry names in order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(NameValue::name).collect()
    }

    /// Iterates over the entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, NameValue> {
        self.entries.iter()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the list has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a NameValueList {
    type Item = &'a NameValue;
    type IntoIter = std::slice::Iter<'a, NameValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<NameValue> for NameValueList {
    fn from_iter<I: IntoIterator<Item = NameValue>>(iter: I) -> Self {
        NameValueList {
            entries: iter.into_iter().collect(),
            separator: SEMICOLON.to_string(),
        }
    }
}

impl fmt::Display for NameValueList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, nv) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(&self.separator)?;
            }
            write!(f, "{}", nv)?;
        }
        Ok(())
    }
}

impl FromStr for NameValueList {
    type Err = Error;

    /// Parses `name[=value]` entries separated by `;`.
    fn from_str(s: &str) -> Result<Self> {
        let mut parser = CoreParser::new(s.to_string());
        let list = parser.name_value_list(b'=', b';')?;
        if parser.lexer().has_more() {
            return Err(Error::parse(format!("trailing input in parameter list: {:?}", parser.lexer().rest())));
        }
        Ok(list)
    }
}
