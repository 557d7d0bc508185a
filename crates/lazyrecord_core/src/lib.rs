//! Whitelisted, dirty-tracking attribute storage for record-like types.
//! Foundation layer for records that later add persistence or transport.

pub mod logging;
pub mod model;
pub mod schema;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::declared::DeclaredAttributes;
pub use model::key::{normalize_key, AttributeKey, Symbol};
pub use model::record::Attributes;
pub use model::store::{
    AttributeMap, AttributeSet, AttributeValue, StoreToken, UndeclaredAttributeError,
};
pub use schema::manifest::{parse_attribute_schema, AttributeSchema, SchemaError};

/// Minimal health-check API for host wiring.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
