//! `uniformdesk-core`: identifiers, domain errors and model traits shared by every crate.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;
pub mod model;

pub use error::{DomainError, DomainResult, require_non_empty};
pub use id::{InventoryItemId, IssuanceId, RepairId, ResupplyId, SchoolId, StudentId};
pub use model::{Entity, ValueObject};
