use std::sync::Arc;

use uniformdesk_core::{SchoolId, StudentId};
use uniformdesk_students::{NewStudent, Student, StudentUpdate};

use super::{InMemorySchoolStore, StoreError};

/// Student records, keyed by id; admission numbers are unique per school.
pub trait StudentRegistry: Send + Sync {
    fn register(&self, input: NewStudent) -> Result<Student, StoreError>;
    fn get(&self, id: StudentId) -> Result<Option<Student>, StoreError>;
    fn list(&self, school_id: &SchoolId) -> Result<Vec<Student>, StoreError>;
    /// Apply the pending→issued transition. Returns whether the status changed;
    /// `NotFound` when no such student exists.
    fn mark_uniform_issued(&self, id: StudentId) -> Result<bool, StoreError>;
    /// Partial update of status, payment and grade. Any uniform status may
    /// be set, including moving back from issued.
    fn update_status(&self, id: StudentId, update: StudentUpdate) -> Result<Student, StoreError>;
}

impl<S> StudentRegistry for Arc<S>
where
    S: StudentRegistry + ?Sized,
{
    fn register(&self, input: NewStudent) -> Result<Student, StoreError> {
        (**self).register(input)
    }

    fn get(&self, id: StudentId) -> Result<Option<Student>, StoreError> {
        (**self).get(id)
    }

    fn list(&self, school_id: &SchoolId) -> Result<Vec<Student>, StoreError> {
        (**self).list(school_id)
    }

    fn mark_uniform_issued(&self, id: StudentId) -> Result<bool, StoreError> {
        (**self).mark_uniform_issued(id)
    }

    fn update_status(&self, id: StudentId, update: StudentUpdate) -> Result<Student, StoreError> {
        (**self).update_status(id, update)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryStudentRegistry {
    students: InMemorySchoolStore<Student>,
}

impl InMemoryStudentRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StudentRegistry for InMemoryStudentRegistry {
    fn register(&self, input: NewStudent) -> Result<Student, StoreError> {
        let student = Student::register(StudentId::new(), input)?;
        self.students
            .insert_unique(student.clone(), |existing, new| {
                existing.admission_number() == new.admission_number()
            })
            .map_err(|e| match e {
                StoreError::Conflict(_) => StoreError::Conflict(format!(
                    "admission number {} already registered at {}",
                    student.admission_number(),
                    student.school_id()
                )),
                other => other,
            })?;
        Ok(student)
    }

    fn get(&self, id: StudentId) -> Result<Option<Student>, StoreError> {
        self.students.get(&id)
    }

    fn list(&self, school_id: &SchoolId) -> Result<Vec<Student>, StoreError> {
        let mut students = self.students.list(school_id)?;
        students.sort_by(|a, b| a.admission_number().cmp(b.admission_number()));
        Ok(students)
    }

    fn mark_uniform_issued(&self, id: StudentId) -> Result<bool, StoreError> {
        self.students.update(&id, Student::mark_issued)
    }

    fn update_status(&self, id: StudentId, update: StudentUpdate) -> Result<Student, StoreError> {
        let updated = self
            .students
            .update(&id, |s| s.apply_update(update).map(|()| s.clone()))??;
        Ok(updated)
    }
}
