use std::sync::Arc;

use uniformdesk_core::{ResupplyId, SchoolId};
use uniformdesk_inventory::{NewResupply, Resupply};

use super::{InMemorySchoolStore, StoreError};

/// Scheduled deliveries. Listings are in delivery date order.
pub trait ResupplySchedule: Send + Sync {
    fn schedule(&self, input: NewResupply) -> Result<Resupply, StoreError>;
    fn for_school(&self, school_id: &SchoolId) -> Result<Vec<Resupply>, StoreError>;
    fn all(&self) -> Result<Vec<Resupply>, StoreError>;
}

impl<S> ResupplySchedule for Arc<S>
where
    S: ResupplySchedule + ?Sized,
{
    fn schedule(&self, input: NewResupply) -> Result<Resupply, StoreError> {
        (**self).schedule(input)
    }

    fn for_school(&self, school_id: &SchoolId) -> Result<Vec<Resupply>, StoreError> {
        (**self).for_school(school_id)
    }

    fn all(&self) -> Result<Vec<Resupply>, StoreError> {
        (**self).all()
    }
}

#[derive(Debug, Default)]
pub struct InMemoryResupplySchedule {
    deliveries: InMemorySchoolStore<Resupply>,
}

impl InMemoryResupplySchedule {
    pub fn new() -> Self {
        Self::default()
    }
}

fn by_date(mut deliveries: Vec<Resupply>) -> Vec<Resupply> {
    deliveries.sort_by(|a, b| a.scheduled_date.cmp(&b.scheduled_date).then_with(|| a.id.cmp(&b.id)));
    deliveries
}

impl ResupplySchedule for InMemoryResupplySchedule {
    fn schedule(&self, input: NewResupply) -> Result<Resupply, StoreError> {
        let resupply = Resupply::schedule(ResupplyId::new(), input)?;
        self.deliveries.insert(resupply.clone())?;
        tracing::debug!(resupply_id = %resupply.id, school_id = %resupply.school_id, "resupply scheduled");
        Ok(resupply)
    }

    fn for_school(&self, school_id: &SchoolId) -> Result<Vec<Resupply>, StoreError> {
        self.deliveries.list(school_id).map(by_date)
    }

    fn all(&self) -> Result<Vec<Resupply>, StoreError> {
        self.deliveries.filter(|_| true).map(by_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uniformdesk_inventory::ResupplyStatus;

    fn delivery(school: &str, days_out: i64) -> NewResupply {
        NewResupply {
            school_id: school.parse().unwrap(),
            item_type: "Sweater".to_string(),
            quantity: 24,
            scheduled_date: Utc::now() + Duration::days(days_out),
            status: ResupplyStatus::Scheduled,
            delivery_notes: None,
        }
    }

    #[test]
    fn listings_follow_the_delivery_date() {
        let schedule = InMemoryResupplySchedule::new();
        let later = schedule.schedule(delivery("SCH001", 7)).unwrap();
        let sooner = schedule.schedule(delivery("SCH001", 2)).unwrap();
        let elsewhere = schedule.schedule(delivery("SCH002", 1)).unwrap();

        let sch001 = schedule.for_school(&"SCH001".parse().unwrap()).unwrap();
        assert_eq!(sch001, vec![sooner.clone(), later.clone()]);
        assert_eq!(schedule.all().unwrap(), vec![elsewhere, sooner, later]);
    }

    #[test]
    fn zero_quantity_is_refused() {
        let schedule = InMemoryResupplySchedule::new();
        let mut input = delivery("SCH001", 1);
        input.quantity = 0;
        let err = schedule.schedule(input).unwrap_err();
        assert!(matches!(err, StoreError::Invalid(_)));
        assert!(schedule.all().unwrap().is_empty());
    }
}
