use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use uniformdesk_core::{
    DomainError, DomainResult, Entity, InventoryItemId, SchoolId, ValueObject, require_non_empty,
};

use crate::stock_level::{self, StockLevel};

/// Natural key of an inventory row: one school, one item type, one size.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockKey {
    pub school_id: SchoolId,
    pub item_type: String,
    pub size: String,
}

impl StockKey {
    /// Build a key, trimming the free-text parts.
    ///
    /// Matching is exact after trimming (`"Shirt"` and `"shirt"` are different rows).
    pub fn new(school_id: SchoolId, item_type: &str, size: &str) -> DomainResult<Self> {
        Ok(Self {
            school_id,
            item_type: require_non_empty("item type", item_type)?,
            size: require_non_empty("size", size)?,
        })
    }
}

impl ValueObject for StockKey {}

impl core::fmt::Display for StockKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}/{}", self.school_id, self.item_type, self.size)
    }
}

/// Input for stock setup (manual entry or first delivery).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInventoryItem {
    pub school_id: SchoolId,
    pub item_type: String,
    pub size: String,
    pub quantity: u32,
    pub low_stock_threshold: u32,
}

/// One stocked uniform line at a school.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryItem {
    id: InventoryItemId,
    key: StockKey,
    quantity: u32,
    low_stock_threshold: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl InventoryItem {
    /// Validate stock setup input and create the row.
    pub fn create(
        id: InventoryItemId,
        input: NewInventoryItem,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let key = StockKey::new(input.school_id, &input.item_type, &input.size)?;
        if input.low_stock_threshold < 1 {
            return Err(DomainError::validation(
                "low stock threshold must be at least 1",
            ));
        }

        Ok(Self {
            id,
            key,
            quantity: input.quantity,
            low_stock_threshold: input.low_stock_threshold,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id_typed(&self) -> InventoryItemId {
        self.id
    }

    pub fn key(&self) -> &StockKey {
        &self.key
    }

    pub fn school_id(&self) -> &SchoolId {
        &self.key.school_id
    }

    pub fn item_type(&self) -> &str {
        &self.key.item_type
    }

    pub fn size(&self) -> &str {
        &self.key.size
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn low_stock_threshold(&self) -> u32 {
        self.low_stock_threshold
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn stock_level(&self) -> StockLevel {
        stock_level::classify(self.quantity, self.low_stock_threshold)
    }

    pub fn stock_percentage(&self) -> f64 {
        stock_level::stock_percentage(self.quantity, self.low_stock_threshold)
    }

    /// Units to order when restocking a low line: twice the threshold.
    pub fn reorder_quantity(&self) -> u32 {
        self.low_stock_threshold.saturating_mul(2)
    }

    /// Move the on-hand quantity by `delta`, returning the new quantity.
    ///
    /// On error the item is left untouched.
    pub fn apply_delta(&mut self, delta: i64, at: DateTime<Utc>) -> DomainResult<u32> {
        if delta == 0 {
            return Err(DomainError::validation("delta cannot be zero"));
        }

        let next = i64::from(self.quantity).saturating_add(delta);
        if next < 0 {
            return Err(DomainError::invariant("stock cannot go negative"));
        }
        let next = u32::try_from(next)
            .map_err(|_| DomainError::validation("quantity exceeds the supported maximum"))?;

        self.quantity = next;
        self.updated_at = at;
        Ok(next)
    }
}

impl Entity for InventoryItem {
    type Id = InventoryItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
