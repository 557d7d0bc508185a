//! Shared host-type scaffolding for integration tests.
//!
//! The declared registry is process-global, so every test defines its own
//! host type through `attribute_record!` to stay isolated.

macro_rules! attribute_record {
    ($name:ident) => {
        #[derive(Debug)]
        struct $name {
            attributes: lazyrecord_core::AttributeSet,
        }

        impl lazyrecord_core::Attributes for $name {
            fn from_attribute_set(
                attributes: lazyrecord_core::AttributeSet,
                _: lazyrecord_core::StoreToken,
            ) -> Self {
                Self { attributes }
            }

            fn attribute_set(&self) -> &lazyrecord_core::AttributeSet {
                &self.attributes
            }

            fn attribute_set_mut(
                &mut self,
                _: lazyrecord_core::StoreToken,
            ) -> &mut lazyrecord_core::AttributeSet {
                &mut self.attributes
            }
        }
    };
}
