//! Uniform inventory domain module.
//!
//! Stock rows keyed by school, item type and size, the low-stock classifier,
//! the issuance command/record, and scheduled resupplies. Pure domain logic (no IO, no HTTP, no
//! storage).

pub mod issuance;
pub mod item;
pub mod resupply;
pub mod stock_level;

pub use issuance::{IssuanceRecord, IssueUniform};
pub use item::{InventoryItem, NewInventoryItem, StockKey};
pub use resupply::{NewResupply, Resupply, ResupplyStatus};
pub use stock_level::{StockFilter, StockLevel, classify, matches_search, stock_percentage};
