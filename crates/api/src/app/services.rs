use std::{convert::Infallible, sync::Arc, time::Duration};

use axum::response::sse::{Event as SseEvent, KeepAlive, Sse};
use tokio::sync::broadcast;
use tokio_stream::{StreamExt, wrappers::BroadcastStream};

use uniformdesk_core::{SchoolId, StudentId};
use uniformdesk_infra::{
    AppConfig, IssuanceOutcome, IssuanceService, IssueError, RestockService, StoreError,
    seed::seed_demo,
    store::{
        InMemoryInventoryStore, InMemoryIssuanceLog, InMemoryRepairLog, InMemoryResupplySchedule,
        InMemoryStudentRegistry, RepairLog, ResupplySchedule, StudentRegistry,
    },
};
use uniformdesk_inventory::{InventoryItem, IssuanceRecord, IssueUniform, NewResupply, Resupply};
use uniformdesk_students::{NewRepair, NewStudent, Repair, Student, StudentUpdate};

use crate::app::dto;

pub const TOPIC_UNIFORM_ISSUED: &str = "uniform.issued";
pub const TOPIC_LOW_STOCK: &str = "inventory.low_stock";

/// Realtime message broadcast to SSE subscribers.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RealtimeMessage {
    pub school_id: SchoolId,
    pub topic: &'static str,
    pub payload: serde_json::Value,
}

type Inventory = Arc<InMemoryInventoryStore>;
type Log = Arc<InMemoryIssuanceLog>;
type Students = Arc<InMemoryStudentRegistry>;

/// Everything the handlers need, shared behind one `Arc`.
pub struct AppServices {
    issuance: IssuanceService<Inventory, Log, Students>,
    restock: RestockService<Inventory>,
    students: Students,
    repairs: InMemoryRepairLog,
    resupplies: InMemoryResupplySchedule,
    realtime_tx: broadcast::Sender<RealtimeMessage>,
}

/// Wire the in-memory stores and workflows, seeding the demo school when asked.
pub fn build_services(config: &AppConfig) -> Result<AppServices, StoreError> {
    let inventory: Inventory = Arc::new(InMemoryInventoryStore::new());
    let log: Log = Arc::new(InMemoryIssuanceLog::new());
    let students: Students = Arc::new(InMemoryStudentRegistry::new());

    if config.seed_demo {
        seed_demo(&inventory, &students)?;
    }

    let (realtime_tx, _) = broadcast::channel(config.realtime_capacity);

    Ok(AppServices {
        issuance: IssuanceService::new(inventory.clone(), log, students.clone()),
        restock: RestockService::new(inventory),
        students,
        repairs: InMemoryRepairLog::new(),
        resupplies: InMemoryResupplySchedule::new(),
        realtime_tx,
    })
}

impl AppServices {
    pub fn issuance(&self) -> &IssuanceService<Inventory, Log, Students> {
        &self.issuance
    }

    pub fn restock(&self) -> &RestockService<Inventory> {
        &self.restock
    }

    pub fn realtime_tx(&self) -> &broadcast::Sender<RealtimeMessage> {
        &self.realtime_tx
    }

    /// Run an issuance and announce it to subscribers of the school.
    pub fn issue_uniform(&self, cmd: IssueUniform) -> Result<IssuanceRecord, IssueError> {
        let outcome = self.issuance.issue_uniform(cmd)?;
        self.announce_issuance(&outcome);
        Ok(outcome.record)
    }

    pub fn register_student(&self, input: NewStudent) -> Result<Student, StoreError> {
        let student = self.students.register(input)?;
        tracing::info!(student_id = %student.id_typed(), school_id = %student.school_id(), "student registered");
        Ok(student)
    }

    pub fn student(&self, id: StudentId) -> Result<Option<Student>, StoreError> {
        self.students.get(id)
    }

    pub fn students_at(&self, school_id: &SchoolId) -> Result<Vec<Student>, StoreError> {
        self.students.list(school_id)
    }

    pub fn update_student(&self, id: StudentId, update: StudentUpdate) -> Result<Student, StoreError> {
        let student = self.students.update_status(id, update)?;
        tracing::info!(
            student_id = %id,
            uniform_status = student.uniform_status().as_str(),
            payment_status = student.payment_status().as_str(),
            "student updated"
        );
        Ok(student)
    }

    /// Record a repair for a student registered at the same school.
    /// `NotFound` when the student is unknown there.
    pub fn report_repair(&self, input: NewRepair) -> Result<Repair, StoreError> {
        match self.students.get(input.student_id)? {
            Some(student) if *student.school_id() == input.school_id => {}
            _ => return Err(StoreError::NotFound),
        }
        let repair = self.repairs.record(input)?;
        tracing::info!(repair_id = %repair.id, school_id = %repair.school_id, "repair reported");
        Ok(repair)
    }

    pub fn repairs_at(&self, school_id: &SchoolId) -> Result<Vec<Repair>, StoreError> {
        self.repairs.for_school(school_id)
    }

    pub fn all_repairs(&self) -> Result<Vec<Repair>, StoreError> {
        self.repairs.all()
    }

    pub fn schedule_resupply(&self, input: NewResupply) -> Result<Resupply, StoreError> {
        self.resupplies.schedule(input)
    }

    pub fn resupplies_at(&self, school_id: &SchoolId) -> Result<Vec<Resupply>, StoreError> {
        self.resupplies.for_school(school_id)
    }

    pub fn all_resupplies(&self) -> Result<Vec<Resupply>, StoreError> {
        self.resupplies.all()
    }

    fn announce_issuance(&self, outcome: &IssuanceOutcome) {
        self.publish(
            outcome.record.school_id.clone(),
            TOPIC_UNIFORM_ISSUED,
            serde_json::json!({
                "issuance": outcome.record,
                "studentStatusChanged": outcome.student_status_changed,
            }),
        );
        if outcome.stock_level.needs_reorder() {
            self.announce_low_stock(&outcome.item_after);
        }
    }

    fn announce_low_stock(&self, item: &InventoryItem) {
        self.publish(item.school_id().clone(), TOPIC_LOW_STOCK, dto::inventory_to_json(item));
    }

    fn publish(&self, school_id: SchoolId, topic: &'static str, payload: serde_json::Value) {
        // Lossy: no subscribers is not an error.
        let _ = self.realtime_tx.send(RealtimeMessage {
            school_id,
            topic,
            payload,
        });
    }
}

/// Realtime messages from `rx`, restricted to one school when given.
pub fn school_messages(
    rx: broadcast::Receiver<RealtimeMessage>,
    school_id: Option<SchoolId>,
) -> impl tokio_stream::Stream<Item = RealtimeMessage> {
    BroadcastStream::new(rx).filter_map(move |msg| match msg {
        Ok(m) if school_id.as_ref().is_none_or(|s| *s == m.school_id) => Some(m),
        // Lagged receivers skip what they missed.
        _ => None,
    })
}

/// SSE stream of realtime messages, optionally restricted to one school.
pub fn school_sse_stream(
    services: Arc<AppServices>,
    school_id: Option<SchoolId>,
) -> Sse<impl tokio_stream::Stream<Item = Result<SseEvent, Infallible>>> {
    let stream = school_messages(services.realtime_tx().subscribe(), school_id).map(|m| {
        let data = serde_json::to_string(&m.payload).unwrap_or_else(|_| "{}".to_string());
        Ok::<_, Infallible>(SseEvent::default().event(m.topic).data(data))
    });

    Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::pin::pin;
    use tokio::sync::broadcast::error::TryRecvError;
    use tokio::time::timeout;
    use uniformdesk_inventory::NewInventoryItem;

    /// Demo school plus a second school stocking Shirt/M (20, threshold 5).
    fn two_schools() -> AppServices {
        let config = AppConfig {
            seed_demo: true,
            ..AppConfig::default()
        };
        let services = build_services(&config).unwrap();
        services
            .restock()
            .add_item(NewInventoryItem {
                school_id: "SCH002".parse().unwrap(),
                item_type: "Shirt".to_string(),
                size: "M".to_string(),
                quantity: 20,
                low_stock_threshold: 5,
            })
            .unwrap();
        services
    }

    fn issue_shirts(services: &AppServices, school: &str, quantity: i64) {
        let cmd = IssueUniform::new(
            StudentId::new(),
            school.parse().unwrap(),
            "Shirt",
            "M",
            quantity,
            "storekeeper",
        )
        .unwrap();
        services.issue_uniform(cmd).unwrap();
    }

    #[tokio::test]
    async fn low_stock_is_announced_only_when_the_line_needs_reorder() {
        let services = two_schools();
        let mut rx = services.realtime_tx().subscribe();

        // Demo Shirt/M: 10 -> 7 stays good.
        issue_shirts(&services, "SCH001", 3);
        let issued = rx.try_recv().unwrap();
        assert_eq!(issued.topic, TOPIC_UNIFORM_ISSUED);
        assert_eq!(issued.payload["issuance"]["quantity"], 3);
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));

        // 7 -> 4 drops below the threshold of 5.
        issue_shirts(&services, "SCH001", 3);
        assert_eq!(rx.try_recv().unwrap().topic, TOPIC_UNIFORM_ISSUED);
        let low = rx.try_recv().unwrap();
        assert_eq!(low.topic, TOPIC_LOW_STOCK);
        assert_eq!(low.payload["quantity"], 4);
        assert_eq!(low.payload["stockLevel"], "low-stock");
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn school_filter_drops_other_schools() {
        let services = two_schools();
        let sch002: SchoolId = "SCH002".parse().unwrap();
        let mut only_sch002 = pin!(school_messages(
            services.realtime_tx().subscribe(),
            Some(sch002.clone())
        ));
        let mut everything = pin!(school_messages(services.realtime_tx().subscribe(), None));

        issue_shirts(&services, "SCH001", 3);
        issue_shirts(&services, "SCH001", 3);
        issue_shirts(&services, "SCH002", 2);

        let first = timeout(Duration::from_secs(1), only_sch002.next())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(first.school_id, sch002);
        assert_eq!(first.topic, TOPIC_UNIFORM_ISSUED);
        assert!(timeout(Duration::from_millis(50), only_sch002.next()).await.is_err());

        let mut seen = Vec::new();
        for _ in 0..4 {
            let m = timeout(Duration::from_secs(1), everything.next())
                .await
                .unwrap()
                .unwrap();
            seen.push((m.school_id.to_string(), m.topic));
        }
        assert_eq!(
            seen,
            vec![
                ("SCH001".to_string(), TOPIC_UNIFORM_ISSUED),
                ("SCH001".to_string(), TOPIC_UNIFORM_ISSUED),
                ("SCH001".to_string(), TOPIC_LOW_STOCK),
                ("SCH002".to_string(), TOPIC_UNIFORM_ISSUED),
            ]
        );
    }
}
