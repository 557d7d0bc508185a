//! Attribute store model.
//!
//! # Responsibility
//! - Normalize attribute keys (`key`).
//! - Keep per-type declared attribute sets (`declared`).
//! - Store per-instance values and dirty state (`store`).
//! - Expose the host-facing capability trait (`record`).
//!
//! # Invariants
//! - An instance never holds a key its type has not declared.
//! - Only a successful write marks an instance dirty.

pub mod declared;
pub mod key;
pub mod record;
pub mod store;
