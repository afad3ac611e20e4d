use serde::{Deserialize, Serialize};

use uniformdesk_core::{DomainError, DomainResult, Entity, SchoolId, StudentId, require_non_empty};

/// Uniform condition/progress for a student.
///
/// Only `pending → issued` is driven by this system (first successful
/// issuance). The condition states are set through student updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UniformStatus {
    Pending,
    Issued,
    Good,
    NeedsRepair,
    NeedsReplacement,
}

impl UniformStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            UniformStatus::Pending => "pending",
            UniformStatus::Issued => "issued",
            UniformStatus::Good => "good",
            UniformStatus::NeedsRepair => "needs-repair",
            UniformStatus::NeedsReplacement => "needs-replacement",
        }
    }
}

/// Fee settlement state (carried as data; payments are processed elsewhere).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Partial,
    Paid,
}

impl PaymentStatus {
    pub fn from_amounts(amount_paid: u32, total_amount: u32) -> Self {
        if amount_paid >= total_amount {
            PaymentStatus::Paid
        } else if amount_paid == 0 {
            PaymentStatus::Pending
        } else {
            PaymentStatus::Partial
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Partial => "partial",
            PaymentStatus::Paid => "paid",
        }
    }
}

/// Registration input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub school_id: SchoolId,
    pub name: String,
    pub admission_number: String,
    #[serde(default)]
    pub grade: String,
    pub total_amount: u32,
    #[serde(default)]
    pub amount_paid: u32,
}

/// Partial update from staff or repair workflows. Absent fields are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentUpdate {
    #[serde(default)]
    pub uniform_status: Option<UniformStatus>,
    #[serde(default)]
    pub amount_paid: Option<u32>,
    #[serde(default)]
    pub grade: Option<String>,
}

/// A registered student at a school.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    id: StudentId,
    school_id: SchoolId,
    name: String,
    admission_number: String,
    grade: String,
    uniform_status: UniformStatus,
    payment_status: PaymentStatus,
    amount_paid: u32,
    total_amount: u32,
}

impl Student {
    /// Validate registration input. New students start with a pending uniform.
    pub fn register(id: StudentId, input: NewStudent) -> DomainResult<Self> {
        let name = require_non_empty("name", &input.name)?;
        let admission_number = require_non_empty("admission number", &input.admission_number)?;

        Ok(Self {
            id,
            school_id: input.school_id,
            name,
            admission_number,
            grade: input.grade.trim().to_string(),
            uniform_status: UniformStatus::Pending,
            payment_status: PaymentStatus::from_amounts(input.amount_paid, input.total_amount),
            amount_paid: input.amount_paid,
            total_amount: input.total_amount,
        })
    }

    pub fn id_typed(&self) -> StudentId {
        self.id
    }

    pub fn school_id(&self) -> &SchoolId {
        &self.school_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn admission_number(&self) -> &str {
        &self.admission_number
    }

    pub fn grade(&self) -> &str {
        &self.grade
    }

    pub fn uniform_status(&self) -> UniformStatus {
        self.uniform_status
    }

    pub fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    pub fn amount_paid(&self) -> u32 {
        self.amount_paid
    }

    pub fn total_amount(&self) -> u32 {
        self.total_amount
    }

    /// Record that the student has received uniform items.
    ///
    /// Returns `true` if the status changed. Any issuance counts, even if
    /// other pieces of the set are still outstanding.
    pub fn mark_issued(&mut self) -> bool {
        if self.uniform_status == UniformStatus::Issued {
            return false;
        }
        self.uniform_status = UniformStatus::Issued;
        true
    }

    /// Apply a staff update. Any uniform status may be set, including the
    /// condition states. A new amount paid recomputes the payment status.
    ///
    /// Validates everything before writing, so a rejected update changes nothing.
    pub fn apply_update(&mut self, update: StudentUpdate) -> DomainResult<()> {
        if let Some(amount_paid) = update.amount_paid {
            if amount_paid > self.total_amount {
                return Err(DomainError::validation(format!(
                    "amount paid {amount_paid} exceeds total amount {}",
                    self.total_amount
                )));
            }
        }

        if let Some(status) = update.uniform_status {
            self.uniform_status = status;
        }
        if let Some(amount_paid) = update.amount_paid {
            self.amount_paid = amount_paid;
            self.payment_status = PaymentStatus::from_amounts(amount_paid, self.total_amount);
        }
        if let Some(grade) = update.grade {
            self.grade = grade.trim().to_string();
        }
        Ok(())
    }
}

impl Entity for Student {
    type Id = StudentId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_student() -> NewStudent {
        NewStudent {
            school_id: "SCH001".parse().unwrap(),
            name: "Amina Otieno".to_string(),
            admission_number: "ADM-0042".to_string(),
            grade: "Grade 4".to_string(),
            total_amount: 4500,
            amount_paid: 0,
        }
    }

    #[test]
    fn register_starts_pending() {
        let student = Student::register(StudentId::new(), new_student()).unwrap();
        assert_eq!(student.uniform_status(), UniformStatus::Pending);
        assert_eq!(student.payment_status(), PaymentStatus::Pending);
    }

    #[test]
    fn register_requires_name_and_admission_number() {
        let mut input = new_student();
        input.admission_number = " ".to_string();
        let err = Student::register(StudentId::new(), input).unwrap_err();
        assert_eq!(err, DomainError::validation("admission number is required"));

        let mut input = new_student();
        input.name = String::new();
        assert!(Student::register(StudentId::new(), input).is_err());
    }

    #[test]
    fn mark_issued_flips_once() {
        let mut student = Student::register(StudentId::new(), new_student()).unwrap();
        assert!(student.mark_issued());
        assert_eq!(student.uniform_status(), UniformStatus::Issued);
        assert!(!student.mark_issued());
        assert_eq!(student.uniform_status(), UniformStatus::Issued);
    }

    #[test]
    fn apply_update_sets_condition_states_and_payment() {
        let mut student = Student::register(StudentId::new(), new_student()).unwrap();
        student.mark_issued();

        student
            .apply_update(StudentUpdate {
                uniform_status: Some(UniformStatus::NeedsRepair),
                amount_paid: Some(2000),
                ..StudentUpdate::default()
            })
            .unwrap();
        assert_eq!(student.uniform_status(), UniformStatus::NeedsRepair);
        assert_eq!(student.payment_status(), PaymentStatus::Partial);

        student
            .apply_update(StudentUpdate {
                uniform_status: Some(UniformStatus::Good),
                grade: Some(" Grade 5 ".to_string()),
                ..StudentUpdate::default()
            })
            .unwrap();
        assert_eq!(student.uniform_status(), UniformStatus::Good);
        assert_eq!(student.grade(), "Grade 5");
        assert_eq!(student.amount_paid(), 2000);
    }

    #[test]
    fn apply_update_rejects_overpayment_without_partial_write() {
        let mut student = Student::register(StudentId::new(), new_student()).unwrap();
        let err = student
            .apply_update(StudentUpdate {
                uniform_status: Some(UniformStatus::NeedsReplacement),
                amount_paid: Some(9000),
                grade: None,
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(student.uniform_status(), UniformStatus::Pending);
        assert_eq!(student.amount_paid(), 0);
    }

    #[test]
    fn payment_status_follows_amounts() {
        assert_eq!(PaymentStatus::from_amounts(0, 4500), PaymentStatus::Pending);
        assert_eq!(PaymentStatus::from_amounts(1000, 4500), PaymentStatus::Partial);
        assert_eq!(PaymentStatus::from_amounts(4500, 4500), PaymentStatus::Paid);
    }

    #[test]
    fn uniform_status_uses_kebab_case() {
        let json = serde_json::to_string(&UniformStatus::NeedsReplacement).unwrap();
        assert_eq!(json, "\"needs-replacement\"");
        assert_eq!(UniformStatus::NeedsRepair.as_str(), "needs-repair");
    }
}
