//! `Attributes` capability for host record types.
//!
//! # Responsibility
//! - Attach a whitelisted, dirty-tracking attribute store to any type that
//!   can hand out its `AttributeSet`.
//! - Resolve the declared set per concrete host type on every call.
//!
//! # Invariants
//! - Construction filters unknown keys; writes reject them.
//! - The dirty state machine is `Clean -> Dirty`, triggered by the first
//!   successful write and never reversed.
//!
//! # Example
//! ```
//! use lazyrecord_core::{AttributeSet, Attributes, StoreToken, Symbol};
//! use serde_json::json;
//!
//! struct Profile {
//!     attributes: AttributeSet,
//! }
//!
//! impl Attributes for Profile {
//!     fn from_attribute_set(attributes: AttributeSet, _: StoreToken) -> Self {
//!         Self { attributes }
//!     }
//!     fn attribute_set(&self) -> &AttributeSet {
//!         &self.attributes
//!     }
//!     fn attribute_set_mut(&mut self, _: StoreToken) -> &mut AttributeSet {
//!         &mut self.attributes
//!     }
//! }
//!
//! Profile::set_declared_attributes(["name"]);
//! let mut profile = Profile::with_attributes([("name", "a"), ("extra", "x")]);
//! assert!(!profile.is_dirty());
//!
//! profile.write_attribute("name", "b").unwrap();
//! assert_eq!(profile.read_attribute(Symbol::new("name")), Some(&json!("b")));
//! assert!(profile.is_dirty());
//! ```
//!
//! Mutable access is sealed behind `StoreToken`, which only this crate can
//! issue. Callers cannot reach the set directly:
//!
//! ```compile_fail
//! # use lazyrecord_core::{AttributeSet, Attributes, StoreToken};
//! # struct Profile { attributes: AttributeSet }
//! # impl Attributes for Profile {
//! #     fn from_attribute_set(attributes: AttributeSet, _: StoreToken) -> Self { Self { attributes } }
//! #     fn attribute_set(&self) -> &AttributeSet { &self.attributes }
//! #     fn attribute_set_mut(&mut self, _: StoreToken) -> &mut AttributeSet { &mut self.attributes }
//! # }
//! let mut profile = Profile::blank();
//! let token = StoreToken(());
//! profile.attribute_set_mut(token);
//! ```
//!
//! Nor build a set of their own to swap in:
//!
//! ```compile_fail
//! use lazyrecord_core::AttributeSet;
//! let clean: AttributeSet = Default::default();
//! ```
//!
//! ```compile_fail
//! use lazyrecord_core::{AttributeSet, DeclaredAttributes};
//! let mut set = AttributeSet::empty("Profile");
//! set.write("ghost", 1, &DeclaredAttributes::new(["ghost"])).unwrap();
//! ```

use crate::model::declared::{declare_for, declared_for, DeclaredAttributes};
use crate::model::key::AttributeKey;
use crate::model::store::{
    AttributeMap, AttributeSet, AttributeValue, StoreToken, UndeclaredAttributeError,
};
use std::sync::Arc;

/// Whitelisted attribute access for a host type.
///
/// Implementors only wire up their `AttributeSet`; every operation is
/// provided. The declared set lives in a registry keyed by the concrete
/// type, so two hosts never share or inherit each other's declarations.
///
/// The two wiring methods take a `StoreToken`, which only this crate can
/// create, so they are callable solely from the provided methods.
pub trait Attributes: Sized + 'static {
    /// Builds the host around an already filtered attribute set.
    fn from_attribute_set(attributes: AttributeSet, token: StoreToken) -> Self;

    fn attribute_set(&self) -> &AttributeSet;

    fn attribute_set_mut(&mut self, token: StoreToken) -> &mut AttributeSet;

    /// Declared attribute names of this type, empty if never declared.
    fn declared_attributes() -> Arc<DeclaredAttributes> {
        declared_for::<Self>()
    }

    /// Replaces this type's declared names.
    ///
    /// Call once while registering the type, before constructing instances.
    fn set_declared_attributes<I, K>(names: I)
    where
        I: IntoIterator<Item = K>,
        K: Into<AttributeKey>,
    {
        declare_for::<Self>(DeclaredAttributes::new(names));
    }

    fn clear_declared_attributes() {
        declare_for::<Self>(DeclaredAttributes::default());
    }

    /// Constructs a clean instance from `initial`, silently dropping keys
    /// this type has not declared.
    fn with_attributes<I, K, V>(initial: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<AttributeKey>,
        V: Into<AttributeValue>,
    {
        let declared = Self::declared_attributes();
        Self::from_attribute_set(
            AttributeSet::filtered(std::any::type_name::<Self>(), initial, &declared),
            StoreToken::new(),
        )
    }

    /// Constructs a clean instance with no attributes set.
    fn blank() -> Self {
        Self::from_attribute_set(
            AttributeSet::empty(std::any::type_name::<Self>()),
            StoreToken::new(),
        )
    }

    /// Returns the stored value, or `None` for unset or undeclared keys.
    fn read_attribute(&self, key: impl Into<AttributeKey>) -> Option<&AttributeValue> {
        self.attribute_set().get(key)
    }

    /// Stores `value` under `key`, marks the record dirty and returns `value`.
    ///
    /// # Errors
    /// - `UndeclaredAttributeError` when `key` is not declared for this type.
    ///   Values and dirty flag are left exactly as they were.
    fn write_attribute(
        &mut self,
        key: impl Into<AttributeKey>,
        value: impl Into<AttributeValue>,
    ) -> Result<AttributeValue, UndeclaredAttributeError> {
        let declared = Self::declared_attributes();
        self.attribute_set_mut(StoreToken::new())
            .write(key, value, &declared)
    }

    /// Applies `write_attribute` to each entry in iteration order.
    ///
    /// # Errors
    /// - Stops at the first undeclared key and returns its error. Entries
    ///   written before it are NOT rolled back, so the record may be left
    ///   partially assigned (and dirty).
    fn assign_attributes<I, K, V>(&mut self, values: I) -> Result<(), UndeclaredAttributeError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<AttributeKey>,
        V: Into<AttributeValue>,
    {
        let declared = Self::declared_attributes();
        self.attribute_set_mut(StoreToken::new())
            .assign(values, &declared)
    }

    /// Current attribute mapping.
    fn attributes(&self) -> &AttributeMap {
        self.attribute_set().values()
    }

    fn is_dirty(&self) -> bool {
        self.attribute_set().is_dirty()
    }

    fn dirty(&self) -> bool {
        self.is_dirty()
    }

    /// Owned copy of the attribute mapping for external serializers.
    fn export(&self) -> AttributeMap {
        self.attributes().clone()
    }

    /// Attribute mapping as a JSON object.
    fn as_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.attributes()
                .iter()
                .map(|(key, value)| (key.as_str().to_string(), value.clone()))
                .collect(),
        )
    }
}
