//! Per-instance attribute storage with dirty tracking.
//!
//! # Responsibility
//! - Own the normalized key/value mapping and the dirty flag of one record.
//! - Enforce the declared whitelist on every write.
//!
//! # Invariants
//! - Every stored key is a member of the declared set it was checked against.
//! - Construction filters silently and never marks the set dirty.
//! - A rejected write leaves values and dirty flag untouched.
//! - `dirty` only moves `false -> true`; nothing resets it.
//! - `assign` is not transactional: entries applied before a failing entry
//!   stay applied.

use crate::model::declared::DeclaredAttributes;
use crate::model::key::AttributeKey;
use log::{debug, trace};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Value held by one attribute. Values are never type-checked.
pub type AttributeValue = serde_json::Value;

/// Normalized attribute mapping. Callers must not rely on its ordering.
pub type AttributeMap = BTreeMap<AttributeKey, AttributeValue>;

/// Write rejected because the key is not in the declared set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndeclaredAttributeError {
    /// Normalized key the caller tried to write.
    pub key: AttributeKey,
    /// Host type name.
    pub owner: &'static str,
    /// Sorted declared names at the time of the failure.
    pub declared: Vec<String>,
}

impl Display for UndeclaredAttributeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "attribute `{}` is not declared for {} (declared: [{}])",
            self.key,
            self.owner,
            self.declared.join(", ")
        )
    }
}

impl Error for UndeclaredAttributeError {}

/// Crate-issued capability required to reach a host's mutable attribute set.
///
/// Only this crate can construct it, so `Attributes` provided methods are
/// the sole mutation path: nothing outside can swap in another set, inject
/// keys, or reset the dirty flag.
#[derive(Debug)]
pub struct StoreToken(());

impl StoreToken {
    pub(crate) fn new() -> Self {
        Self(())
    }
}

/// Normalized attribute values plus a dirty flag.
///
/// Read-only outside this crate; every mutation goes through `Attributes`.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSet {
    owner: &'static str,
    values: AttributeMap,
    dirty: bool,
}

impl AttributeSet {
    /// Creates an empty, clean set.
    pub(crate) fn empty(owner: &'static str) -> Self {
        Self {
            owner,
            values: AttributeMap::new(),
            dirty: false,
        }
    }

    /// Seeds a clean set from `initial`, dropping keys not in `declared`.
    pub(crate) fn filtered<I, K, V>(
        owner: &'static str,
        initial: I,
        declared: &DeclaredAttributes,
    ) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<AttributeKey>,
        V: Into<AttributeValue>,
    {
        let mut values = AttributeMap::new();
        let mut dropped = 0usize;
        for (key, value) in initial {
            let key = key.into();
            if declared.contains(&key) {
                values.insert(key, value.into());
            } else {
                dropped += 1;
            }
        }
        if dropped > 0 {
            trace!(
                "event=attributes_filtered module=attributes status=ok type={} kept={} dropped={}",
                owner,
                values.len(),
                dropped
            );
        }

        Self {
            owner,
            values,
            dirty: false,
        }
    }

    /// Stored value for `key`, `None` when unset.
    pub fn get(&self, key: impl Into<AttributeKey>) -> Option<&AttributeValue> {
        let key = key.into();
        self.values.get(&key)
    }

    /// Stores `value` under `key` and returns it.
    ///
    /// # Errors
    /// - `UndeclaredAttributeError` when `key` is not in `declared`; nothing
    ///   is mutated in that case.
    pub(crate) fn write(
        &mut self,
        key: impl Into<AttributeKey>,
        value: impl Into<AttributeValue>,
        declared: &DeclaredAttributes,
    ) -> Result<AttributeValue, UndeclaredAttributeError> {
        let key = key.into();
        if !declared.contains(&key) {
            debug!(
                "event=attribute_write module=attributes status=rejected type={} key={}",
                self.owner, key
            );
            return Err(UndeclaredAttributeError {
                key,
                owner: self.owner,
                declared: declared.names(),
            });
        }

        let value = value.into();
        self.dirty = true;
        self.values.insert(key, value.clone());
        Ok(value)
    }

    /// Writes every entry in iteration order, stopping at the first
    /// undeclared key.
    ///
    /// Entries before the failing one are kept. This is a pass-through loop,
    /// not a transaction; callers that need all-or-nothing must check keys
    /// against the declared set first.
    pub(crate) fn assign<I, K, V>(
        &mut self,
        values: I,
        declared: &DeclaredAttributes,
    ) -> Result<(), UndeclaredAttributeError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<AttributeKey>,
        V: Into<AttributeValue>,
    {
        for (key, value) in values {
            self.write(key, value, declared)?;
        }
        Ok(())
    }

    /// Live view of the normalized mapping.
    pub fn values(&self) -> &AttributeMap {
        &self.values
    }

    /// `true` once any write has succeeded.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Serializes as the bare attribute map; the dirty flag is not exported.
impl Serialize for AttributeSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}
