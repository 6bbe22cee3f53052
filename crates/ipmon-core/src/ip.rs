//! Textual IP address value
//!
//! The address is kept in the exact textual form the echo service and the
//! record store return it, trimmed of surrounding whitespace and nothing
//! else. Comparison is byte-exact: no case folding, no leading-zero
//! normalization, no IPv6 compression handling. Two textually different
//! spellings of the same address are treated as different addresses. This is
//! intentional — it mirrors the upstream API's own representation, and
//! "fixing" it here would mask representation drift upstream.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A public IP address in its canonical textual form (v4 or v6)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IpAddress(String);

impl IpAddress {
    /// Create an address from raw text, trimming surrounding whitespace
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().trim().to_string())
    }

    /// The address text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the trimmed text is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for IpAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for IpAddress {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}
