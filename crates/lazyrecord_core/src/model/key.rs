//! Attribute key normalization.
//!
//! # Responsibility
//! - Collapse textual and symbolic key spellings into one canonical form.
//! - Provide the only key type used by storage and the declared registry.
//!
//! # Invariants
//! - Normalization is case-sensitive and exact: no trimming, no case folding.
//! - `"name"`, `String::from("name")` and `Symbol::new("name")` address the
//!   same storage slot.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt::{Display, Formatter};

/// Canonical attribute name used for every lookup and storage slot.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeKey(String);

impl AttributeKey {
    /// Wraps `name` as-is; no trimming or case folding.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for AttributeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for AttributeKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for AttributeKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Symbolic key token.
///
/// Lets hosts keep attribute names as constants, e.g.
/// `const NAME: Symbol = Symbol::new("name");`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(&'static str);

impl Symbol {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, ":{}", self.0)
    }
}

impl From<&str> for AttributeKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for AttributeKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&String> for AttributeKey {
    fn from(value: &String) -> Self {
        Self(value.clone())
    }
}

impl From<Symbol> for AttributeKey {
    fn from(value: Symbol) -> Self {
        Self(value.0.to_string())
    }
}

impl From<&AttributeKey> for AttributeKey {
    fn from(value: &AttributeKey) -> Self {
        value.clone()
    }
}

/// Normalizes any accepted key spelling into its canonical form.
pub fn normalize_key(key: impl Into<AttributeKey>) -> AttributeKey {
    key.into()
}
