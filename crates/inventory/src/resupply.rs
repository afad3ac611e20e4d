//! Scheduled stock deliveries from the distributor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use uniformdesk_core::{DomainError, DomainResult, Entity, ResupplyId, SchoolId, require_non_empty};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResupplyStatus {
    #[default]
    Scheduled,
    InTransit,
    Delivered,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewResupply {
    pub school_id: SchoolId,
    pub item_type: String,
    pub quantity: u32,
    pub scheduled_date: DateTime<Utc>,
    pub status: ResupplyStatus,
    pub delivery_notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resupply {
    pub id: ResupplyId,
    pub school_id: SchoolId,
    pub item_type: String,
    pub quantity: u32,
    pub scheduled_date: DateTime<Utc>,
    pub status: ResupplyStatus,
    pub delivery_notes: Option<String>,
}

impl Resupply {
    pub fn schedule(id: ResupplyId, input: NewResupply) -> DomainResult<Self> {
        if input.quantity == 0 {
            return Err(DomainError::validation("quantity must be at least 1"));
        }
        let item_type = require_non_empty("item type", &input.item_type)?;
        // Blank notes are stored as none.
        let delivery_notes = input
            .delivery_notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        Ok(Self {
            id,
            school_id: input.school_id,
            item_type,
            quantity: input.quantity,
            scheduled_date: input.scheduled_date,
            status: input.status,
            delivery_notes,
        })
    }
}

impl Entity for Resupply {
    type Id = ResupplyId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
