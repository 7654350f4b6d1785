//! Local entity model shared by every resource kind.
//!
//! # Responsibility
//! - Define the attribute value type and the entity base record.
//!
//! # Invariants
//! - Entities are never physically removed by this layer; deletion is a
//!   soft-delete marker in the attribute map.

pub mod entity;
pub mod value;
