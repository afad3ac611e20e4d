use std::sync::Arc;

use chrono::Utc;
use uniformdesk_core::{RepairId, SchoolId};
use uniformdesk_students::{NewRepair, Repair};

use super::{InMemorySchoolStore, StoreError};

/// Repair reports. Listings are newest first.
pub trait RepairLog: Send + Sync {
    fn record(&self, input: NewRepair) -> Result<Repair, StoreError>;
    fn for_school(&self, school_id: &SchoolId) -> Result<Vec<Repair>, StoreError>;
    fn all(&self) -> Result<Vec<Repair>, StoreError>;
}

impl<S> RepairLog for Arc<S>
where
    S: RepairLog + ?Sized,
{
    fn record(&self, input: NewRepair) -> Result<Repair, StoreError> {
        (**self).record(input)
    }

    fn for_school(&self, school_id: &SchoolId) -> Result<Vec<Repair>, StoreError> {
        (**self).for_school(school_id)
    }

    fn all(&self) -> Result<Vec<Repair>, StoreError> {
        (**self).all()
    }
}

#[derive(Debug, Default)]
pub struct InMemoryRepairLog {
    repairs: InMemorySchoolStore<Repair>,
}

impl InMemoryRepairLog {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(mut repairs: Vec<Repair>) -> Vec<Repair> {
    repairs.sort_by(|a, b| b.reported_at.cmp(&a.reported_at).then_with(|| b.id.cmp(&a.id)));
    repairs
}

impl RepairLog for InMemoryRepairLog {
    fn record(&self, input: NewRepair) -> Result<Repair, StoreError> {
        let repair = Repair::report(RepairId::new(), input, Utc::now())?;
        self.repairs.insert(repair.clone())?;
        Ok(repair)
    }

    fn for_school(&self, school_id: &SchoolId) -> Result<Vec<Repair>, StoreError> {
        self.repairs.list(school_id).map(newest_first)
    }

    fn all(&self) -> Result<Vec<Repair>, StoreError> {
        self.repairs.filter(|_| true).map(newest_first)
    }
}
