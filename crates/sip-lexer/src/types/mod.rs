//! Value types built by the parsers

pub mod host;
pub mod name_value;
pub mod name_value_list;

pub use host::{Host, HostKind, HostPort};
pub use name_value::NameValue;
pub use name_value_list::NameValueList;
