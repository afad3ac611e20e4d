//! Issuance command and the append-only record it produces.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use uniformdesk_core::{
    DomainError, DomainResult, Entity, IssuanceId, SchoolId, StudentId, require_non_empty,
};

use crate::item::StockKey;

/// Command: issue uniform units from a school's stock to a student.
///
/// Construction validates the request, so a value of this type is always
/// well-formed (positive quantity, non-blank key parts and issuer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueUniform {
    student_id: StudentId,
    key: StockKey,
    quantity: u32,
    issued_by: String,
}

impl IssueUniform {
    pub fn new(
        student_id: StudentId,
        school_id: SchoolId,
        item_type: &str,
        size: &str,
        quantity: i64,
        issued_by: &str,
    ) -> DomainResult<Self> {
        if quantity < 1 {
            return Err(DomainError::validation("quantity must be at least 1"));
        }
        let quantity = u32::try_from(quantity)
            .map_err(|_| DomainError::validation("quantity exceeds the supported maximum"))?;

        Ok(Self {
            student_id,
            key: StockKey::new(school_id, item_type, size)?,
            quantity,
            issued_by: require_non_empty("issued by", issued_by)?,
        })
    }

    pub fn student_id(&self) -> StudentId {
        self.student_id
    }

    pub fn key(&self) -> &StockKey {
        &self.key
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn issued_by(&self) -> &str {
        &self.issued_by
    }
}

/// Permanent log entry for one successful issuance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuanceRecord {
    pub id: IssuanceId,
    pub student_id: StudentId,
    pub school_id: SchoolId,
    pub item_type: String,
    pub size: String,
    pub quantity: u32,
    pub issued_at: DateTime<Utc>,
    pub issued_by: String,
}

impl IssuanceRecord {
    pub fn from_command(id: IssuanceId, cmd: &IssueUniform, issued_at: DateTime<Utc>) -> Self {
        Self {
            id,
            student_id: cmd.student_id,
            school_id: cmd.key.school_id.clone(),
            item_type: cmd.key.item_type.clone(),
            size: cmd.key.size.clone(),
            quantity: cmd.quantity,
            issued_at,
            issued_by: cmd.issued_by.clone(),
        }
    }
}

impl Entity for IssuanceRecord {
    type Id = IssuanceId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
