//! Infrastructure layer: stores, workflows that span them, configuration.

pub mod config;
pub mod issuance;
pub mod restock;
pub mod seed;
pub mod store;

pub use config::{AppConfig, ConfigError};
pub use issuance::{IssuanceOutcome, IssuanceService, IssueError};
pub use restock::RestockService;
pub use store::StoreError;
