//! Uniform issuance workflow.
//!
//! ```text
//! IssueUniform (validated)
//!   ↓
//! 1. Find the stock row for (school, item type, size)   → ItemNotFound
//!   ↓
//! 2+3. Atomic check-and-decrement on that row             → InsufficientStock
//!   ↓
//! 4. Append the issuance record (undo step 3 on failure)
//!   ↓
//! 5. Flip the student's uniform status to `issued`       (soft: missing student is logged)
//! ```

use chrono::Utc;
use thiserror::Error;

use uniformdesk_core::{DomainError, IssuanceId, SchoolId, StudentId};
use uniformdesk_inventory::{InventoryItem, IssuanceRecord, IssueUniform, StockKey, StockLevel};

use crate::store::{InventoryStore, IssuanceLog, StoreError, StudentRegistry};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IssueError {
    /// The request was malformed (non-positive quantity, blank fields).
    #[error("{0}")]
    InvalidInput(String),

    #[error("Inventory item not found: {0}")]
    ItemNotFound(StockKey),

    #[error("Insufficient stock: requested {requested}, on hand {on_hand}")]
    InsufficientStock { requested: u32, on_hand: u32 },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<DomainError> for IssueError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Validation(msg) | DomainError::InvalidId(msg) => {
                IssueError::InvalidInput(msg)
            }
            other => IssueError::Store(other.into()),
        }
    }
}

/// Result of a successful issuance.
#[derive(Debug, Clone, PartialEq)]
pub struct IssuanceOutcome {
    pub record: IssuanceRecord,
    pub item_after: InventoryItem,
    pub stock_level: StockLevel,
    /// `false` when the student was already issued or is not registered.
    pub student_status_changed: bool,
}

/// Orchestrates an issuance across the inventory store, the issuance log and
/// the student registry.
#[derive(Debug, Clone)]
pub struct IssuanceService<I, L, R> {
    inventory: I,
    log: L,
    students: R,
}

impl<I, L, R> IssuanceService<I, L, R>
where
    I: InventoryStore,
    L: IssuanceLog,
    R: StudentRegistry,
{
    pub fn new(inventory: I, log: L, students: R) -> Self {
        Self {
            inventory,
            log,
            students,
        }
    }

    #[tracing::instrument(
        skip(self, cmd),
        fields(key = %cmd.key(), quantity = cmd.quantity(), student_id = %cmd.student_id())
    )]
    pub fn issue_uniform(&self, cmd: IssueUniform) -> Result<IssuanceOutcome, IssueError> {
        let requested = cmd.quantity();

        let item = self
            .inventory
            .find_item(cmd.key())?
            .ok_or_else(|| IssueError::ItemNotFound(cmd.key().clone()))?;
        let item_id = item.id_typed();

        let item_after = match self.inventory.adjust_quantity(item_id, -i64::from(requested)) {
            Ok(after) => after,
            Err(StoreError::InsufficientStock { on_hand }) => {
                tracing::info!(on_hand, "issuance refused: insufficient stock");
                return Err(IssueError::InsufficientStock { requested, on_hand });
            }
            Err(StoreError::NotFound) => return Err(IssueError::ItemNotFound(cmd.key().clone())),
            Err(e) => return Err(e.into()),
        };

        let record = IssuanceRecord::from_command(IssuanceId::new(), &cmd, Utc::now());
        if let Err(e) = self.log.append(record.clone()) {
            tracing::warn!(error = %e, "issuance record not written; restoring stock");
            if let Err(undo) = self.inventory.adjust_quantity(item_id, i64::from(requested)) {
                tracing::error!(error = %undo, %item_id, "failed to restore stock after aborted issuance");
            }
            return Err(e.into());
        }

        let student_status_changed = match self.students.mark_uniform_issued(cmd.student_id()) {
            Ok(changed) => changed,
            Err(StoreError::NotFound) => {
                tracing::warn!("student not registered; uniform status not updated");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "uniform status update failed; issuance kept");
                false
            }
        };

        let stock_level = item_after.stock_level();
        tracing::info!(
            issuance_id = %record.id,
            remaining = item_after.quantity(),
            stock_level = stock_level.as_str(),
            student_status_changed,
            "uniform issued"
        );

        Ok(IssuanceOutcome {
            record,
            item_after,
            stock_level,
            student_status_changed,
        })
    }

    pub fn history_for_student(&self, student_id: StudentId) -> Result<Vec<IssuanceRecord>, IssueError> {
        Ok(self.log.for_student(student_id)?)
    }

    pub fn history_for_school(&self, school_id: &SchoolId) -> Result<Vec<IssuanceRecord>, IssueError> {
        Ok(self.log.for_school(school_id)?)
    }
}
