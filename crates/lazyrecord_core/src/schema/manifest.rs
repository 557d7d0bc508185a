//! Attribute schema declaration and validation.

use crate::model::record::Attributes;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Declarative attribute schema for one record type.
///
/// ```json
/// { "record": "profile", "attributes": ["name", "email"] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttributeSchema {
    /// Human-readable record name, used for diagnostics only.
    pub record: String,
    /// Attribute names to declare. Empty declares nothing.
    #[serde(default)]
    pub attributes: Vec<String>,
}

impl AttributeSchema {
    /// Validates declaration-level schema invariants.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.record.trim().is_empty() {
            return Err(SchemaError::EmptyRecordName);
        }

        let mut dedup = BTreeSet::<&str>::new();
        for name in &self.attributes {
            if name.is_empty() {
                return Err(SchemaError::EmptyAttributeName);
            }
            // Keys are matched exactly, so padded names would be unreachable.
            if name.trim() != name {
                return Err(SchemaError::PaddedAttributeName(name.clone()));
            }
            if !dedup.insert(name.as_str()) {
                return Err(SchemaError::DuplicateAttribute(name.clone()));
            }
        }
        Ok(())
    }

    /// Validates, then replaces the declared attributes of `T`.
    pub fn apply<T: Attributes>(&self) -> Result<(), SchemaError> {
        self.validate()?;
        T::set_declared_attributes(self.attributes.iter());
        Ok(())
    }
}

/// Parses and validates one schema document.
pub fn parse_attribute_schema(json: &str) -> Result<AttributeSchema, SchemaError> {
    let schema: AttributeSchema =
        serde_json::from_str(json).map_err(|err| SchemaError::Parse(err.to_string()))?;
    schema.validate()?;
    Ok(schema)
}

/// Schema parse/validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    Parse(String),
    EmptyRecordName,
    EmptyAttributeName,
    PaddedAttributeName(String),
    DuplicateAttribute(String),
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(message) => write!(f, "attribute schema is malformed: {message}"),
            Self::EmptyRecordName => write!(f, "attribute schema record name must not be empty"),
            Self::EmptyAttributeName => write!(f, "attribute schema contains empty attribute name"),
            Self::PaddedAttributeName(value) => {
                write!(f, "attribute name has surrounding whitespace: `{value}`")
            }
            Self::DuplicateAttribute(value) => {
                write!(f, "attribute schema attribute is duplicated: {value}")
            }
        }
    }
}

impl Error for SchemaError {}
