use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use uniformdesk_inventory::{InventoryItem, ResupplyStatus};
use uniformdesk_students::{RepairStatus, Student};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueUniformRequest {
    pub student_id: String,
    pub school_id: String,
    pub item_type: String,
    pub size: String,
    pub quantity: i64,
    /// Accepted for client compatibility; the server clock stamps the record.
    #[serde(default)]
    pub issued_date: Option<String>,
    pub issued_by: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub school_id: String,
    pub item_type: String,
    pub size: String,
    #[serde(default)]
    pub quantity: u32,
    pub low_stock_threshold: u32,
}

#[derive(Debug, Deserialize)]
pub struct RestockRequest {
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterStudentRequest {
    pub school_id: String,
    pub name: String,
    pub admission_number: String,
    #[serde(default)]
    pub grade: String,
    pub total_amount: u32,
    #[serde(default)]
    pub amount_paid: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRepairRequest {
    pub school_id: String,
    pub student_id: String,
    pub item_type: String,
    pub description: String,
    #[serde(default)]
    pub status: RepairStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResupplyRequest {
    pub school_id: String,
    pub item_type: String,
    pub quantity: u32,
    pub scheduled_date: DateTime<Utc>,
    #[serde(default)]
    pub status: ResupplyStatus,
    #[serde(default)]
    pub delivery_notes: Option<String>,
}

/// `?status=&search=` on inventory listings.
#[derive(Debug, Default, Deserialize)]
pub struct InventoryQuery {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub search: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamQuery {
    pub school_id: Option<String>,
}

// -------------------------
// JSON mapping
// -------------------------

pub fn inventory_to_json(item: &InventoryItem) -> serde_json::Value {
    json!({
        "id": item.id_typed().to_string(),
        "schoolId": item.school_id(),
        "itemType": item.item_type(),
        "size": item.size(),
        "quantity": item.quantity(),
        "lowStockThreshold": item.low_stock_threshold(),
        "stockLevel": item.stock_level().as_str(),
        "stockPercentage": item.stock_percentage(),
        "createdAt": item.created_at(),
        "updatedAt": item.updated_at(),
    })
}

pub fn inventory_list_to_json(items: &[InventoryItem]) -> serde_json::Value {
    serde_json::Value::Array(items.iter().map(inventory_to_json).collect())
}

pub fn student_to_json(student: &Student) -> serde_json::Value {
    json!({
        "id": student.id_typed().to_string(),
        "schoolId": student.school_id(),
        "name": student.name(),
        "admissionNumber": student.admission_number(),
        "grade": student.grade(),
        "uniformStatus": student.uniform_status().as_str(),
        "paymentStatus": student.payment_status().as_str(),
        "amountPaid": student.amount_paid(),
        "totalAmount": student.total_amount(),
    })
}
