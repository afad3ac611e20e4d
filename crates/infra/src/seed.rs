//! Demo data for local runs: one school with a spread of stock levels.

use uniformdesk_core::SchoolId;
use uniformdesk_inventory::NewInventoryItem;
use uniformdesk_students::NewStudent;

use crate::store::{InventoryStore, StoreError, StudentRegistry};

pub const DEMO_SCHOOL: &str = "SCH001";

// (item type, size, quantity, low stock threshold)
const DEMO_STOCK: &[(&str, &str, u32, u32)] = &[
    ("Shirt", "S", 24, 5),
    ("Shirt", "M", 10, 5),
    ("Shirt", "L", 3, 5),
    ("Trousers", "28", 12, 4),
    ("Trousers", "32", 0, 4),
    ("Skirt", "M", 8, 4),
    ("Sweater", "M", 15, 6),
    ("Sweater", "L", 6, 6),
];

// (name, admission number, grade, total amount, amount paid)
const DEMO_STUDENTS: &[(&str, &str, &str, u32, u32)] = &[
    ("Amina Otieno", "ADM-0042", "Grade 4", 4500, 4500),
    ("Brian Kamau", "ADM-0043", "Grade 6", 5200, 2000),
];

/// Insert the demo school. Fails on the first store error (e.g. when run twice).
pub fn seed_demo(
    inventory: &impl InventoryStore,
    students: &impl StudentRegistry,
) -> Result<(), StoreError> {
    let school_id: SchoolId = DEMO_SCHOOL.parse()?;

    for &(item_type, size, quantity, low_stock_threshold) in DEMO_STOCK {
        inventory.insert_item(NewInventoryItem {
            school_id: school_id.clone(),
            item_type: item_type.to_string(),
            size: size.to_string(),
            quantity,
            low_stock_threshold,
        })?;
    }

    for &(name, admission_number, grade, total_amount, amount_paid) in DEMO_STUDENTS {
        students.register(NewStudent {
            school_id: school_id.clone(),
            name: name.to_string(),
            admission_number: admission_number.to_string(),
            grade: grade.to_string(),
            total_amount,
            amount_paid,
        })?;
    }

    tracing::info!(
        school_id = DEMO_SCHOOL,
        stock_lines = DEMO_STOCK.len(),
        students = DEMO_STUDENTS.len(),
        "demo data seeded"
    );
    Ok(())
}
