//! Storage boundary: repository traits plus in-memory implementations.
//!
//! Everything here lives for the process lifetime only. The traits are the
//! seam for a persistent backend; any backend must keep the per-item
//! serialization contract of [`InventoryStore::adjust_quantity`].

pub mod inventory;
pub mod issuances;
pub mod repairs;
pub mod resupplies;
pub mod school_store;
pub mod students;

use std::sync::PoisonError;

use thiserror::Error;
use uniformdesk_core::DomainError;

pub use inventory::{InMemoryInventoryStore, InventoryStore};
pub use issuances::{InMemoryIssuanceLog, IssuanceLog};
pub use repairs::{InMemoryRepairLog, RepairLog};
pub use resupplies::{InMemoryResupplySchedule, ResupplySchedule};
pub use school_store::{InMemorySchoolStore, SchoolScoped};
pub use students::{InMemoryStudentRegistry, StudentRegistry};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    /// A decrement asked for more than the row holds. `on_hand` is the
    /// quantity seen under the row lock when the decrement was refused.
    #[error("insufficient stock: {on_hand} on hand")]
    InsufficientStock { on_hand: u32 },

    /// The mutation would break a stored invariant.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// The input was rejected by domain validation.
    #[error("invalid input: {0}")]
    Invalid(String),

    /// A uniqueness constraint was hit.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The backend could not serve the request (e.g. poisoned lock).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<DomainError> for StoreError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Validation(msg) | DomainError::InvalidId(msg) => StoreError::Invalid(msg),
            DomainError::InvariantViolation(msg) => StoreError::InvalidState(msg),
        }
    }
}

impl<T> From<PoisonError<T>> for StoreError {
    fn from(_: PoisonError<T>) -> Self {
        StoreError::Unavailable("lock poisoned".to_string())
    }
}
