//! Per-type declared attribute sets.
//!
//! # Responsibility
//! - Hold the whitelist of attribute names each host type permits.
//! - Keep one independent entry per concrete type, keyed by `TypeId`.
//!
//! # Invariants
//! - A type that never declared anything resolves to an empty set.
//! - Declaring on one type never touches another type's entry.
//! - Declaration is configuration: it is expected to happen once, before
//!   instances of the type are constructed. The lock only guarantees memory
//!   safety, not ordering against concurrent writes.

use crate::model::key::AttributeKey;
use log::info;
use once_cell::sync::Lazy;
use std::any::TypeId;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, PoisonError, RwLock};

/// Whitelist of attribute names for one host type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclaredAttributes {
    names: BTreeSet<AttributeKey>,
}

impl DeclaredAttributes {
    /// Builds a set from any mix of key spellings; duplicates collapse.
    pub fn new<I, K>(names: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<AttributeKey>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Exact, case-sensitive membership check.
    pub fn contains(&self, key: &AttributeKey) -> bool {
        self.names.contains(key)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &AttributeKey> {
        self.names.iter()
    }

    /// Returns sorted names, mainly for diagnostics.
    pub fn names(&self) -> Vec<String> {
        self.names.iter().map(|key| key.as_str().to_string()).collect()
    }
}

static DECLARED: Lazy<RwLock<HashMap<TypeId, Arc<DeclaredAttributes>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

static EMPTY: Lazy<Arc<DeclaredAttributes>> = Lazy::new(|| Arc::new(DeclaredAttributes::default()));

/// Returns the declared set registered for `T`, or an empty set.
pub fn declared_for<T: 'static>() -> Arc<DeclaredAttributes> {
    let registry = DECLARED.read().unwrap_or_else(PoisonError::into_inner);
    registry
        .get(&TypeId::of::<T>())
        .cloned()
        .unwrap_or_else(|| Arc::clone(&EMPTY))
}

/// Replaces the declared set of `T`.
///
/// An empty `declared` resets `T` to the empty set; there is no inherited
/// default to fall back to.
pub fn declare_for<T: 'static>(declared: DeclaredAttributes) {
    info!(
        "event=attributes_declared module=attributes status=ok type={} count={}",
        std::any::type_name::<T>(),
        declared.len()
    );
    let mut registry = DECLARED.write().unwrap_or_else(PoisonError::into_inner);
    if declared.is_empty() {
        registry.remove(&TypeId::of::<T>());
    } else {
        registry.insert(TypeId::of::<T>(), Arc::new(declared));
    }
}
