use std::sync::Arc;

use uniformdesk_core::{SchoolId, StudentId};
use uniformdesk_inventory::IssuanceRecord;

use super::{InMemorySchoolStore, StoreError};

/// Append-only issuance history. Records are never updated or removed.
pub trait IssuanceLog: Send + Sync {
    fn append(&self, record: IssuanceRecord) -> Result<(), StoreError>;
    /// Newest first.
    fn for_student(&self, student_id: StudentId) -> Result<Vec<IssuanceRecord>, StoreError>;
    /// Newest first.
    fn for_school(&self, school_id: &SchoolId) -> Result<Vec<IssuanceRecord>, StoreError>;
}

impl<S> IssuanceLog for Arc<S>
where
    S: IssuanceLog + ?Sized,
{
    fn append(&self, record: IssuanceRecord) -> Result<(), StoreError> {
        (**self).append(record)
    }

    fn for_student(&self, student_id: StudentId) -> Result<Vec<IssuanceRecord>, StoreError> {
        (**self).for_student(student_id)
    }

    fn for_school(&self, school_id: &SchoolId) -> Result<Vec<IssuanceRecord>, StoreError> {
        (**self).for_school(school_id)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryIssuanceLog {
    records: InMemorySchoolStore<IssuanceRecord>,
}

impl InMemoryIssuanceLog {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(mut records: Vec<IssuanceRecord>) -> Vec<IssuanceRecord> {
    // UUIDv7 ids break ties between records stamped in the same instant.
    records.sort_by(|a, b| b.issued_at.cmp(&a.issued_at).then_with(|| b.id.cmp(&a.id)));
    records
}

impl IssuanceLog for InMemoryIssuanceLog {
    fn append(&self, record: IssuanceRecord) -> Result<(), StoreError> {
        self.records.insert(record)
    }

    fn for_student(&self, student_id: StudentId) -> Result<Vec<IssuanceRecord>, StoreError> {
        self.records
            .filter(|r| r.student_id == student_id)
            .map(newest_first)
    }

    fn for_school(&self, school_id: &SchoolId) -> Result<Vec<IssuanceRecord>, StoreError> {
        self.records.list(school_id).map(newest_first)
    }
}
