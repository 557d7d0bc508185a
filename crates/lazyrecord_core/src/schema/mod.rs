//! Declarative attribute schemas.
//!
//! Schemas let a host declare its attribute names from a JSON document
//! instead of code. They only carry names; value typing is out of scope.

pub mod manifest;
