//! Low-stock classification and listing filters.
//!
//! Pure functions only. The percentage is a display scale; it never feeds the
//! classification decision.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use uniformdesk_core::DomainError;

use crate::item::InventoryItem;

/// Stock-level label for an inventory row.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockLevel {
    OutOfStock,
    LowStock,
    Good,
}

impl StockLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            StockLevel::OutOfStock => "out-of-stock",
            StockLevel::LowStock => "low-stock",
            StockLevel::Good => "good",
        }
    }

    /// Whether the line should be flagged for reordering.
    pub fn needs_reorder(self) -> bool {
        self != StockLevel::Good
    }
}

/// Classify on-hand quantity against the low-stock threshold.
///
/// The threshold is inclusive: `quantity == threshold` is low stock.
pub fn classify(quantity: u32, threshold: u32) -> StockLevel {
    if quantity == 0 {
        StockLevel::OutOfStock
    } else if quantity <= threshold {
        StockLevel::LowStock
    } else {
        StockLevel::Good
    }
}

/// Fill level for progress bars: `min(quantity / (threshold * 2), 1) * 100`.
pub fn stock_percentage(quantity: u32, threshold: u32) -> f64 {
    if threshold == 0 {
        return if quantity > 0 { 100.0 } else { 0.0 };
    }
    let full = f64::from(threshold) * 2.0;
    (f64::from(quantity) / full).min(1.0) * 100.0
}

/// Listing filter by stock state.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum StockFilter {
    #[default]
    All,
    InStock,
    LowStock,
    OutOfStock,
}

impl StockFilter {
    pub fn matches(self, item: &InventoryItem) -> bool {
        let quantity = item.quantity();
        match self {
            StockFilter::All => true,
            StockFilter::InStock => quantity > 0,
            StockFilter::LowStock => quantity > 0 && quantity <= item.low_stock_threshold(),
            StockFilter::OutOfStock => quantity == 0,
        }
    }
}

impl FromStr for StockFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(StockFilter::All),
            "in-stock" => Ok(StockFilter::InStock),
            "low-stock" => Ok(StockFilter::LowStock),
            "out-of-stock" => Ok(StockFilter::OutOfStock),
            other => Err(DomainError::validation(format!(
                "unknown stock filter '{other}' (expected all, in-stock, low-stock, out-of-stock)"
            ))),
        }
    }
}

/// Case-insensitive substring match on item type or size. Blank terms match everything.
pub fn matches_search(item: &InventoryItem, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    item.item_type().to_lowercase().contains(&term) || item.size().to_lowercase().contains(&term)
}
