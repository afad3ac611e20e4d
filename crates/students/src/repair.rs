//! Reported uniform repairs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use uniformdesk_core::{DomainResult, Entity, RepairId, SchoolId, StudentId, require_non_empty};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepairStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRepair {
    pub school_id: SchoolId,
    pub student_id: StudentId,
    pub item_type: String,
    pub description: String,
    pub status: RepairStatus,
}

/// One damaged garment reported for a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repair {
    pub id: RepairId,
    pub school_id: SchoolId,
    pub student_id: StudentId,
    pub item_type: String,
    pub status: RepairStatus,
    pub description: String,
    pub reported_at: DateTime<Utc>,
    /// Set when the repair is recorded as already completed.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Repair {
    pub fn report(id: RepairId, input: NewRepair, now: DateTime<Utc>) -> DomainResult<Self> {
        let item_type = require_non_empty("item type", &input.item_type)?;
        let description = require_non_empty("description", &input.description)?;

        Ok(Self {
            id,
            school_id: input.school_id,
            student_id: input.student_id,
            item_type,
            status: input.status,
            description,
            reported_at: now,
            completed_at: (input.status == RepairStatus::Completed).then_some(now),
        })
    }
}

impl Entity for Repair {
    type Id = RepairId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_repair(status: RepairStatus) -> NewRepair {
        NewRepair {
            school_id: "SCH001".parse().unwrap(),
            student_id: StudentId::new(),
            item_type: " Sweater ".to_string(),
            description: "torn elbow".to_string(),
            status,
        }
    }

    #[test]
    fn report_trims_and_stamps() {
        let now = Utc::now();
        let repair = Repair::report(RepairId::new(), new_repair(RepairStatus::Pending), now).unwrap();
        assert_eq!(repair.item_type, "Sweater");
        assert_eq!(repair.reported_at, now);
        assert_eq!(repair.completed_at, None);
    }

    #[test]
    fn completed_repairs_carry_a_completion_time() {
        let now = Utc::now();
        let repair = Repair::report(RepairId::new(), new_repair(RepairStatus::Completed), now).unwrap();
        assert_eq!(repair.completed_at, Some(now));
    }

    #[test]
    fn description_is_required() {
        let mut input = new_repair(RepairStatus::InProgress);
        input.description = "  ".to_string();
        assert!(Repair::report(RepairId::new(), input, Utc::now()).is_err());
    }

    #[test]
    fn status_uses_kebab_case() {
        let json = serde_json::to_string(&RepairStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
    }
}
